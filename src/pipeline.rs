//! Cooperative pipeline driver
//!
//! Wires the core together for hosts that drive it from a single loop:
//! ingest → align → mirror → window → predict → evolve. Each successful
//! cycle yields one [`FusionReport`], the record downstream narration
//! and logging collaborators consume.
//!
//! Alignment failures are not errors; [`FusionPipeline::step`] simply
//! returns `None` and the caller retries after the next ingest. Retry
//! cadence is entirely the caller's concern.

use crate::config::PipelineConfig;
use crate::fusion::packet::{AlignedSnapshot, TelemetryPacket};
use crate::fusion::synchronizer::TimeSynchronizer;
use crate::predict::link_break::{BreakPrediction, LinkBreakPredictor};
use crate::predict::window::FeatureWindow;
use crate::twin::evolution::{BeamExitProjection, ForwardEvolution};
use crate::twin::mirror::{StateMirror, UninitializedStateError};
use crate::twin::rtd::RtdEstimator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Output of one successful pipeline cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FusionReport {
    /// Unique report identifier
    pub report_id: Uuid,
    /// Wall-clock time the report was emitted
    pub generated_at: DateTime<Utc>,
    /// The snapshot this cycle aligned
    pub snapshot: AlignedSnapshot,
    /// Trend-based link-break extrapolation
    pub prediction: BreakPrediction,
    /// Nominal-rate beam-exit projection
    pub beam_exit: BeamExitProjection,
    /// Replication time difference in seconds, rounded to 4 decimals
    pub rtd_secs: f64,
}

/// Owns one instance of every core component and drives them in order.
///
/// Created once per pipeline instance; there are no process-wide
/// singletons. Packet producers may call [`ingest`](Self::ingest)
/// concurrently; [`step`](Self::step) is the single consumer.
pub struct FusionPipeline {
    config: PipelineConfig,
    synchronizer: TimeSynchronizer,
    mirror: StateMirror,
    window: FeatureWindow,
    predictor: LinkBreakPredictor,
    evolution: ForwardEvolution,
    rtd: RtdEstimator,
}

impl FusionPipeline {
    /// Create a pipeline from configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            synchronizer: TimeSynchronizer::new(config.alignment_tolerance_secs),
            mirror: StateMirror::new(),
            window: FeatureWindow::new(config.window_size),
            predictor: LinkBreakPredictor::new(),
            evolution: ForwardEvolution::from_config(&config),
            rtd: RtdEstimator::new(),
            config,
        }
    }

    /// Create a pipeline with default configuration
    pub fn with_defaults() -> Self {
        Self::new(PipelineConfig::default())
    }

    /// Pipeline configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Stage a telemetry packet for the next alignment cycle
    pub fn ingest(&self, packet: TelemetryPacket) {
        self.synchronizer.ingest(packet);
    }

    /// Run one alignment cycle around `reference_time`.
    ///
    /// Returns `None` while the synchronizer cannot yet produce a
    /// snapshot; no component state changes in that case.
    pub fn step(&mut self, reference_time: f64) -> Option<FusionReport> {
        let snapshot = self.synchronizer.try_align(reference_time)?;

        self.mirror.update(snapshot.clone());
        self.window.update(&snapshot);

        let prediction = self.predictor.predict(&self.window);
        let beam_exit = self.evolution.predict_beam_exit(&snapshot);
        let rtd_secs = (self.rtd.compute(&snapshot) * 10_000.0).round() / 10_000.0;

        let report = FusionReport {
            report_id: Uuid::now_v7(),
            generated_at: Utc::now(),
            snapshot,
            prediction,
            beam_exit,
            rtd_secs,
        };

        info!(
            report_id = %report.report_id,
            reference_time,
            time_to_break = ?report.prediction.time_to_break,
            reason = %report.prediction.reason,
            window_len = self.window.len(),
            "Fusion report emitted"
        );

        Some(report)
    }

    /// Isolated copy of the authoritative mirrored state
    pub fn current_state(&self) -> Result<AlignedSnapshot, UninitializedStateError> {
        self.mirror.current()
    }

    /// Access the synchronizer (buffer depths, last-known payloads)
    pub fn synchronizer(&self) -> &TimeSynchronizer {
        &self.synchronizer
    }

    /// Read-only view of the feature window
    pub fn window(&self) -> &FeatureWindow {
        &self.window
    }
}
