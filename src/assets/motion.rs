use crate::assets::AssetId;
use crate::errors::{MotionError, Result};

/// Loaded motion payload.
///
/// Pose data lives in the animation runtime; the orchestration layer only
/// needs what it forwards or reports (name and duration).
#[derive(Debug, Clone, PartialEq)]
pub struct MotionData {
    pub name: String,
    /// Length of one playthrough, in seconds.
    pub duration: f32,
}

impl MotionData {
    #[must_use]
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }

    /// Rejects payloads the runtime cannot play.
    pub fn validate(&self, id: AssetId) -> Result<()> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(MotionError::InvalidMotionData {
                id,
                reason: format!("duration must be finite and >= 0, got {}", self.duration),
            });
        }
        Ok(())
    }
}
