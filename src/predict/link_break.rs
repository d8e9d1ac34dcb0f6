//! Link-break extrapolation
//!
//! Stateless, single-shot classification over the feature window's last
//! two records: linear forward extrapolation of the beam offset trend
//! toward the beam radius. Not a learned model; every outcome carries
//! an explicit reason code so downstream consumers never have to guess
//! why a prediction is absent.

use crate::predict::window::FeatureWindow;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Confidence grade attached to a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// Why the predictor produced (or withheld) a time-to-break
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionReason {
    /// Fewer records than the readiness threshold
    InsufficientHistory,
    /// Latest record lacks beam offset or beam radius
    MissingBeamData,
    /// Offset already at or past the beam radius
    AlreadyOutsideBeam,
    /// Non-positive time delta between the last two records
    InvalidTimeDelta,
    /// Offset flat or shrinking; forward extrapolation not meaningful
    NonIncreasingOffset,
    /// Time-to-break extrapolated from the recent offset trend
    TemporalTrendExtrapolation,
}

impl fmt::Display for PredictionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PredictionReason::InsufficientHistory => "insufficient_history",
            PredictionReason::MissingBeamData => "missing_beam_data",
            PredictionReason::AlreadyOutsideBeam => "already_outside_beam",
            PredictionReason::InvalidTimeDelta => "invalid_time_delta",
            PredictionReason::NonIncreasingOffset => "non_increasing_offset",
            PredictionReason::TemporalTrendExtrapolation => "temporal_trend_extrapolation",
        };
        f.write_str(s)
    }
}

/// Result of one predictor invocation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakPrediction {
    /// Predicted seconds until beam offset reaches beam radius, rounded
    /// to 3 decimal places; `None` when no extrapolation was possible
    pub time_to_break: Option<f64>,
    pub confidence: Confidence,
    pub reason: PredictionReason,
}

impl BreakPrediction {
    fn withheld(confidence: Confidence, reason: PredictionReason) -> Self {
        Self {
            time_to_break: None,
            confidence,
            reason,
        }
    }
}

/// Predicts time-to-link-break from temporal feature trends.
///
/// Pure function of the window; holds no memory between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkBreakPredictor;

impl LinkBreakPredictor {
    pub fn new() -> Self {
        Self
    }

    /// Extrapolate time-to-break from the window's last two records
    pub fn predict(&self, window: &FeatureWindow) -> BreakPrediction {
        if !window.is_ready() {
            return BreakPrediction::withheld(
                Confidence::Low,
                PredictionReason::InsufficientHistory,
            );
        }

        let (latest, prev) = match (window.latest(), window.previous()) {
            (Some(latest), Some(prev)) => (*latest, *prev),
            _ => {
                return BreakPrediction::withheld(
                    Confidence::Low,
                    PredictionReason::InsufficientHistory,
                )
            }
        };

        let (beam_offset, beam_radius) = match (latest.beam_offset, latest.beam_radius) {
            (Some(offset), Some(radius)) => (offset, radius),
            _ => {
                return BreakPrediction::withheld(
                    Confidence::Low,
                    PredictionReason::MissingBeamData,
                )
            }
        };

        if beam_offset >= beam_radius {
            return BreakPrediction {
                time_to_break: Some(0.0),
                confidence: Confidence::High,
                reason: PredictionReason::AlreadyOutsideBeam,
            };
        }

        // A missing previous offset contributes no trend: delta is zero.
        let delta_offset = beam_offset - prev.beam_offset.unwrap_or(beam_offset);
        let delta_time = latest.time - prev.time;

        if delta_time <= 0.0 {
            return BreakPrediction::withheld(Confidence::Low, PredictionReason::InvalidTimeDelta);
        }

        let offset_rate = delta_offset / delta_time;
        if offset_rate <= 0.0 {
            return BreakPrediction::withheld(
                Confidence::Medium,
                PredictionReason::NonIncreasingOffset,
            );
        }

        let time_to_break = (beam_radius - beam_offset) / offset_rate;
        let rounded = (time_to_break * 1000.0).round() / 1000.0;
        debug!(
            time_to_break = rounded,
            offset_rate,
            beam_offset,
            beam_radius,
            "Link break extrapolated"
        );

        BreakPrediction {
            time_to_break: Some(rounded),
            confidence: Confidence::Medium,
            reason: PredictionReason::TemporalTrendExtrapolation,
        }
    }
}
