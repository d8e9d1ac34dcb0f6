//! Deterministic forward evolution
//!
//! Projects the near-future beam constraint from the current snapshot
//! alone, under a nominal offset drift rate. Unlike the trend predictor
//! in [`crate::predict`], this needs no history: it answers "if the
//! offset keeps drifting at the nominal rate, when does the beam edge
//! arrive?" and clamps the answer to a fixed horizon.

use crate::config::PipelineConfig;
use crate::fusion::packet::AlignedSnapshot;
use serde::{Deserialize, Serialize};

/// Why a projection did or did not produce an exit time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionReason {
    /// Beam payload has neither offset nor radius
    MissingBeamData,
    /// Offset already at or past the beam radius
    AlreadyOutside,
    /// Nominal rate is zero or negative; the offset never progresses
    NonProgressingOffset,
    /// Projected exit lies beyond the configured horizon
    OutsideHorizon,
    /// Exit projected within the horizon
    Projected,
}

/// Result of one beam-exit projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamExitProjection {
    /// Seconds until projected beam exit, if inside the horizon
    pub exit_in_secs: Option<f64>,
    pub reason: ProjectionReason,
}

/// Projects beam-constraint evolution under a nominal drift rate
#[derive(Debug, Clone, Copy)]
pub struct ForwardEvolution {
    horizon_secs: f64,
    nominal_offset_rate: f64,
}

impl ForwardEvolution {
    pub fn new(horizon_secs: f64, nominal_offset_rate: f64) -> Self {
        Self {
            horizon_secs,
            nominal_offset_rate,
        }
    }

    /// Build from pipeline configuration
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.prediction_horizon_secs, config.nominal_offset_rate)
    }

    /// Projection horizon in seconds
    pub fn horizon_secs(&self) -> f64 {
        self.horizon_secs
    }

    /// Project time until beam exit from the current state
    pub fn predict_beam_exit(&self, state: &AlignedSnapshot) -> BeamExitProjection {
        let (offset, radius) = match (state.beam.beam_offset, state.beam.beam_radius) {
            (Some(offset), Some(radius)) => (offset, radius),
            _ => {
                return BeamExitProjection {
                    exit_in_secs: None,
                    reason: ProjectionReason::MissingBeamData,
                }
            }
        };

        if offset >= radius {
            return BeamExitProjection {
                exit_in_secs: Some(0.0),
                reason: ProjectionReason::AlreadyOutside,
            };
        }

        if self.nominal_offset_rate <= 0.0 {
            return BeamExitProjection {
                exit_in_secs: None,
                reason: ProjectionReason::NonProgressingOffset,
            };
        }

        let time_to_exit = (radius - offset) / self.nominal_offset_rate;
        if time_to_exit > self.horizon_secs {
            return BeamExitProjection {
                exit_in_secs: None,
                reason: ProjectionReason::OutsideHorizon,
            };
        }

        BeamExitProjection {
            exit_in_secs: Some((time_to_exit * 1000.0).round() / 1000.0),
            reason: ProjectionReason::Projected,
        }
    }
}

impl Default for ForwardEvolution {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}
