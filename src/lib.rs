//! LEO Link Twin - Telemetry Fusion Core
//!
//! This crate fuses asynchronous, multi-rate telemetry from five physical
//! domains (geometry, RF, beam pointing, topology, environment) into
//! consistent time-aligned snapshots, then extrapolates a near-term
//! link-stability event (beam exit / link break) from the recent trend of
//! those snapshots.
//!
//! # Pipeline
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Telemetry Sources (external)              │
//! │      geometry    rf    beam    topology    environment       │
//! └──────┬───────────┬──────┬─────────┬───────────┬──────────────┘
//!        ▼           ▼      ▼         ▼           ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  TimeSynchronizer                                            │
//! │  per-domain source buffers + last-known cache                │
//! │  try_align() ──────────────► AlignedSnapshot                 │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  StateMirror (authoritative twin state, copy-in/copy-out)    │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  FeatureWindow (bounded FIFO) ──► LinkBreakPredictor         │
//! │  ForwardEvolution / RtdEstimator                             │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # What this crate does NOT do
//!
//! - No packet generation or simulation
//! - No link ranking or path selection
//! - No network transport, persistence, or retries
//! - No distributed clock synchronization (all packets are assumed to
//!   share a compatible timestamp domain)
//!
//! Downstream collaborators consume the [`AlignedSnapshot`], the mirrored
//! state and the [`BreakPrediction`]; they are not part of this core.

pub mod config;
pub mod fusion;
pub mod pipeline;
pub mod predict;
pub mod twin;

pub use config::PipelineConfig;
pub use fusion::packet::{
    AlignedSnapshot, BeamPayload, Domain, DomainPayload, EnvironmentPayload, GeometryPayload,
    RfPayload, TelemetryPacket, TopologyPayload,
};
pub use fusion::synchronizer::TimeSynchronizer;
pub use pipeline::{FusionPipeline, FusionReport};
pub use predict::link_break::{BreakPrediction, Confidence, LinkBreakPredictor, PredictionReason};
pub use predict::window::{FeatureRecord, FeatureWindow};
pub use twin::evolution::{BeamExitProjection, ForwardEvolution, ProjectionReason};
pub use twin::mirror::{StateMirror, UninitializedStateError};
pub use twin::rtd::RtdEstimator;

/// Crate version (semver)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
