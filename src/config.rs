//! Channel Configuration
//!
//! Per-channel playback parameters, serialized with serde. A configuration
//! takes effect the next time the channel plays; setters on the component
//! additionally push values into a live instance.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::assets::MotionBinding;
use crate::errors::Result;

/// How a motion's pose combines with the motions below it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlendMode {
    Overwrite,
    #[default]
    Additive,
}

/// Playback parameters of one channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionConfig {
    /// Assigned motion asset (serialized as its id).
    pub motion: MotionBinding,
    pub blend_mode: BlendMode,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub retarget: bool,
    pub reverse: bool,
    pub mirror: bool,
    /// Must be positive; the runtime holds the frame otherwise.
    pub play_speed: f32,
    /// Blend in time in seconds.
    pub blend_in_time: f32,
    /// Blend out time in seconds.
    pub blend_out_time: f32,
    pub play_on_activation: bool,
    /// Strips positional and rotational root motion.
    pub in_place: bool,
    /// Hold the last frame after a non-looping motion ends instead of
    /// returning to the bind pose.
    pub freeze_at_last_frame: bool,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            motion: MotionBinding::default(),
            blend_mode: BlendMode::Additive,
            looping: false,
            retarget: false,
            reverse: false,
            mirror: false,
            play_speed: 1.0,
            blend_in_time: 0.0,
            blend_out_time: 0.0,
            play_on_activation: true,
            in_place: false,
            freeze_at_last_frame: true,
        }
    }
}

impl MotionConfig {
    #[must_use]
    pub fn with_motion(motion: impl Into<MotionBinding>) -> Self {
        Self {
            motion: motion.into(),
            ..Self::default()
        }
    }

    /// Editor display rule; has no effect on playback.
    #[must_use]
    pub fn blend_out_time_visible(&self) -> bool {
        !self.looping && !self.freeze_at_last_frame
    }

    /// Editor display rule; has no effect on playback.
    #[must_use]
    pub fn freeze_at_last_frame_visible(&self) -> bool {
        !self.looping
    }
}

/// Serialized channel setup of a multi-motion component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MultiMotionConfig {
    pub channels: Vec<MotionConfig>,
}

impl MultiMotionConfig {
    #[must_use]
    pub fn new(channels: Vec<MotionConfig>) -> Self {
        Self { channels }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_rules() {
        let mut cfg = MotionConfig::default();
        // Defaults: non-looping, freezing at the last frame.
        assert!(cfg.freeze_at_last_frame_visible());
        assert!(!cfg.blend_out_time_visible());

        cfg.freeze_at_last_frame = false;
        assert!(cfg.blend_out_time_visible());

        cfg.looping = true;
        assert!(!cfg.blend_out_time_visible());
        assert!(!cfg.freeze_at_last_frame_visible());
    }
}
