//! Trend detection and link-break extrapolation
//!
//! A bounded window of scalar features extracted from mirrored states,
//! and a stateless predictor that extrapolates time-to-break from the
//! window's most recent trend.

pub mod link_break;
pub mod window;

pub use link_break::{BreakPrediction, Confidence, LinkBreakPredictor, PredictionReason};
pub use window::{FeatureRecord, FeatureWindow, READINESS_THRESHOLD};
