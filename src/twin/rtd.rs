//! Replication time difference
//!
//! RTD measures how far the twin lags the physical system: the absolute
//! difference between wall time and the mirrored snapshot's aligned
//! time.

use crate::fusion::packet::AlignedSnapshot;
use std::time::{SystemTime, UNIX_EPOCH};

/// Computes replication time difference against wall time
#[derive(Debug, Clone, Copy, Default)]
pub struct RtdEstimator;

impl RtdEstimator {
    pub fn new() -> Self {
        Self
    }

    /// RTD in seconds against the current wall clock
    pub fn compute(&self, state: &AlignedSnapshot) -> f64 {
        self.compute_at(unix_now_secs(), state)
    }

    /// RTD in seconds against an explicit wall time
    pub fn compute_at(&self, now_secs: f64, state: &AlignedSnapshot) -> f64 {
        (now_secs - state.time).abs()
    }
}

fn unix_now_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
