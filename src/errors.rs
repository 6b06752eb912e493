//! Error Types
//!
//! This module defines the error types used by the fallible collaborator
//! paths of the crate.
//!
//! # Overview
//!
//! The main error type [`MotionError`] covers:
//! - Motion asset loading failures
//! - Channel configuration parsing errors
//! - Background loader task failures
//!
//! The playback surface of [`crate::MultiMotionComponent`] never returns
//! errors: bad channel indices, missing actors and unready assets degrade to
//! no-ops with a log line. Only loaders, sources and configuration parsing
//! return [`Result<T>`].
//!
//! ```rust,ignore
//! use multi_motion::errors::{MotionError, Result};
//!
//! fn load_setup(json: &str) -> Result<MultiMotionConfig> {
//!     MultiMotionConfig::from_json_str(json)
//! }
//! ```

use thiserror::Error;

use crate::assets::AssetId;

/// The main error type for motion loading and configuration.
#[derive(Error, Debug)]
pub enum MotionError {
    // ========================================================================
    // Asset Loading Errors
    // ========================================================================
    /// The source has no motion registered under this id.
    #[error("Motion asset not found: {0}")]
    AssetNotFound(AssetId),

    /// The source knows the asset but failed to produce motion data.
    #[error("Motion asset {id} failed to load: {hint}")]
    AssetLoadFailed {
        /// Asset that failed
        id: AssetId,
        /// Human-readable reason reported by the source
        hint: String,
    },

    /// Motion data was produced but is unusable (e.g. negative duration).
    #[error("Invalid motion data for {id}: {reason}")]
    InvalidMotionData {
        /// Asset carrying the data
        id: AssetId,
        /// Why the data was rejected
        reason: String,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    // ========================================================================
    // Async & Threading Errors
    // ========================================================================
    /// Task join error (when a background load fails to complete).
    #[error("Task join error: {0}")]
    TaskJoinError(String),
}

impl From<tokio::task::JoinError> for MotionError {
    fn from(err: tokio::task::JoinError) -> Self {
        MotionError::TaskJoinError(err.to_string())
    }
}

/// Alias for `Result<T, MotionError>`.
pub type Result<T> = std::result::Result<T, MotionError>;
