//! Bounded feature history
//!
//! Each mirrored state is reduced to a fixed 7-field scalar record; the
//! window keeps the last `W` of them in FIFO order for trend detection.

use crate::fusion::packet::AlignedSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Minimum records required before time-series prediction is meaningful.
/// Fixed by design, not configurable.
pub const READINESS_THRESHOLD: usize = 3;

/// Fixed scalar extraction from one aligned state.
///
/// A field the source state did not carry is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Aligned time of the source snapshot, in seconds
    pub time: f64,
    pub snr: Option<f64>,
    pub doppler: Option<f64>,
    pub timing_drift: Option<f64>,
    pub beam_offset: Option<f64>,
    pub beam_radius: Option<f64>,
    pub attenuation: Option<f64>,
}

impl FeatureRecord {
    /// Extract the feature record from a mirrored state
    pub fn from_state(state: &AlignedSnapshot) -> Self {
        Self {
            time: state.time,
            snr: state.rf.snr,
            doppler: state.rf.doppler,
            timing_drift: state.rf.timing_drift,
            beam_offset: state.beam.beam_offset,
            beam_radius: state.beam.beam_radius,
            attenuation: state.environment.attenuation,
        }
    }
}

/// FIFO sequence of feature records with fixed capacity
#[derive(Debug, Clone)]
pub struct FeatureWindow {
    capacity: usize,
    records: VecDeque<FeatureRecord>,
}

impl FeatureWindow {
    /// Create a window holding at most `capacity` records.
    ///
    /// A zero capacity is clamped to 1 so the latest record always
    /// exists once an update has happened.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            records: VecDeque::with_capacity(capacity),
        }
    }

    /// Window capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of records currently held
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the window holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Extract features from `state` and append them, evicting the
    /// oldest record when at capacity
    pub fn update(&mut self, state: &AlignedSnapshot) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(FeatureRecord::from_state(state));
    }

    /// Full ordered history, oldest to newest
    pub fn sequence(&self) -> impl Iterator<Item = &FeatureRecord> {
        self.records.iter()
    }

    /// Most recent record
    pub fn latest(&self) -> Option<&FeatureRecord> {
        self.records.back()
    }

    /// Record immediately before the most recent one
    pub fn previous(&self) -> Option<&FeatureRecord> {
        self.records.len().checked_sub(2).map(|i| &self.records[i])
    }

    /// Whether sufficient history exists for time-series prediction
    pub fn is_ready(&self) -> bool {
        self.records.len() >= READINESS_THRESHOLD
    }
}
