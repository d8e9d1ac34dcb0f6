//! Pipeline configuration
//!
//! All knobs have defaults and are injected at construction; the core
//! itself reads no config files. `from_env` is provided for hosts that
//! configure through the environment.

use serde::{Deserialize, Serialize};

/// Default feature window capacity
pub const DEFAULT_WINDOW_SIZE: usize = 10;

/// Default alignment tolerance in seconds
pub const DEFAULT_ALIGNMENT_TOLERANCE_SECS: f64 = 0.1;

/// Default forward-evolution horizon in seconds
pub const DEFAULT_PREDICTION_HORIZON_SECS: f64 = 10.0;

/// Default nominal beam offset drift rate (units per second)
pub const DEFAULT_NOMINAL_OFFSET_RATE: f64 = 0.02;

/// Configuration for a fusion pipeline instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Feature window capacity
    pub window_size: usize,
    /// Maximum timestamp distance from the reference time for a buffered
    /// packet to be accepted as fresh rather than falling back to cache
    pub alignment_tolerance_secs: f64,
    /// Forward-evolution projection horizon in seconds
    pub prediction_horizon_secs: f64,
    /// Assumed beam offset drift rate for forward evolution
    pub nominal_offset_rate: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            alignment_tolerance_secs: DEFAULT_ALIGNMENT_TOLERANCE_SECS,
            prediction_horizon_secs: DEFAULT_PREDICTION_HORIZON_SECS,
            nominal_offset_rate: DEFAULT_NOMINAL_OFFSET_RATE,
        }
    }
}

impl PipelineConfig {
    /// Create from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            window_size: std::env::var("LINK_TWIN_WINDOW_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_WINDOW_SIZE),
            alignment_tolerance_secs: std::env::var("LINK_TWIN_ALIGNMENT_TOLERANCE_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_ALIGNMENT_TOLERANCE_SECS),
            prediction_horizon_secs: std::env::var("LINK_TWIN_PREDICTION_HORIZON_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_PREDICTION_HORIZON_SECS),
            nominal_offset_rate: std::env::var("LINK_TWIN_NOMINAL_OFFSET_RATE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_NOMINAL_OFFSET_RATE),
        }
    }
}
