use serde::{Deserialize, Serialize, Serializer};

use crate::channel::Channel;
use crate::config::{MotionConfig, MultiMotionConfig};

/// Dense, ordered channel collection. A channel's identity is its position.
///
/// Out-of-range lookups return `None`; callers treat that as a no-op.
#[derive(Debug, Default, Deserialize)]
#[serde(from = "Vec<Channel>")]
pub struct ChannelStore {
    channels: Vec<Channel>,
}

impl ChannelStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_configs(configs: impl IntoIterator<Item = MotionConfig>) -> Self {
        let channels = configs
            .into_iter()
            .enumerate()
            .map(|(index, cfg)| Channel::new(index, cfg))
            .collect();
        Self { channels }
    }

    /// Appends a channel and returns its index.
    pub fn push(&mut self, configuration: MotionConfig) -> usize {
        let index = self.channels.len();
        self.channels.push(Channel::new(index, configuration));
        index
    }

    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.channels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Channel> {
        self.channels.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Channel> {
        self.channels.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Channel> {
        self.channels.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Channel> {
        self.channels.iter_mut()
    }

    /// Snapshot of the persisted part of every channel.
    #[must_use]
    pub fn to_config(&self) -> MultiMotionConfig {
        MultiMotionConfig::new(
            self.channels
                .iter()
                .map(|c| {
                    let mut cfg = c.configuration.clone();
                    cfg.motion.release();
                    cfg
                })
                .collect(),
        )
    }
}

impl From<Vec<Channel>> for ChannelStore {
    /// Indices are reassigned from position, whatever was stored.
    fn from(mut channels: Vec<Channel>) -> Self {
        for (index, channel) in channels.iter_mut().enumerate() {
            channel.index = index;
        }
        Self { channels }
    }
}

impl Serialize for ChannelStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.channels.serialize(serializer)
    }
}

impl From<MultiMotionConfig> for ChannelStore {
    fn from(config: MultiMotionConfig) -> Self {
        Self::from_configs(config.channels)
    }
}
