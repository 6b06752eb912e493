use crate::config::{BlendMode, MotionConfig};

/// How many times an instance plays through before it ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopCount {
    Forever,
    Times(u32),
}

impl LoopCount {
    #[must_use]
    pub fn from_looping(looping: bool) -> Self {
        if looping {
            LoopCount::Forever
        } else {
            LoopCount::Times(1)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlayMode {
    #[default]
    Forward,
    Backward,
}

impl PlayMode {
    #[must_use]
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse {
            PlayMode::Backward
        } else {
            PlayMode::Forward
        }
    }
}

/// Everything the runtime needs to start an instance.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackParams {
    pub max_loops: LoopCount,
    pub play_mode: PlayMode,
    pub retarget: bool,
    pub mirror: bool,
    pub play_speed: f32,
    pub blend_in_time: f32,
    pub blend_out_time: f32,
    pub in_place: bool,
    pub blend_mode: BlendMode,
    /// Mix with lower motions instead of replacing them.
    pub mix: bool,
    pub freeze_at_last_frame: bool,
    /// Runtime removes the instance by itself once its weight fades to zero.
    pub delete_on_zero_weight: bool,
    pub can_overwrite: bool,
    pub play_now: bool,
}

impl Default for PlaybackParams {
    fn default() -> Self {
        Self {
            max_loops: LoopCount::Times(1),
            play_mode: PlayMode::Forward,
            retarget: false,
            mirror: false,
            play_speed: 1.0,
            blend_in_time: 0.0,
            blend_out_time: 0.0,
            in_place: false,
            blend_mode: BlendMode::Overwrite,
            mix: false,
            freeze_at_last_frame: true,
            delete_on_zero_weight: true,
            can_overwrite: false,
            play_now: true,
        }
    }
}

impl From<&MotionConfig> for PlaybackParams {
    fn from(cfg: &MotionConfig) -> Self {
        Self {
            max_loops: LoopCount::from_looping(cfg.looping),
            play_mode: PlayMode::from_reverse(cfg.reverse),
            retarget: cfg.retarget,
            mirror: cfg.mirror,
            play_speed: cfg.play_speed,
            blend_in_time: cfg.blend_in_time,
            blend_out_time: cfg.blend_out_time,
            in_place: cfg.in_place,
            blend_mode: cfg.blend_mode,
            mix: cfg.blend_mode == BlendMode::Additive,
            freeze_at_last_frame: cfg.freeze_at_last_frame,
            delete_on_zero_weight: true,
            can_overwrite: false,
            play_now: true,
        }
    }
}
