//! Integration tests for the full fusion pipeline
//!
//! Drives packets from all five domains through alignment, mirroring,
//! feature extraction and prediction the way a host loop would.

use leo_link_twin::{
    AlignedSnapshot, BeamPayload, Confidence, Domain, DomainPayload, EnvironmentPayload,
    FusionPipeline, GeometryPayload, PipelineConfig, PredictionReason, ProjectionReason,
    RfPayload, TelemetryPacket, TopologyPayload,
};

/// One packet per domain, all timestamped at `t`
fn full_burst(t: f64, beam_offset: f64) -> Vec<TelemetryPacket> {
    vec![
        TelemetryPacket::new(
            t,
            DomainPayload::Geometry(GeometryPayload {
                sat_pos: Some([7000.0, 0.0, 0.0]),
                sat_vel: Some([0.0, 7.5, 0.0]),
            }),
        ),
        TelemetryPacket::new(
            t,
            DomainPayload::Rf(RfPayload {
                snr: Some(30.0 - beam_offset * 10.0),
                doppler: Some(-1500.0),
                timing_drift: Some(2e-6),
            }),
        ),
        TelemetryPacket::new(
            t,
            DomainPayload::Beam(BeamPayload {
                beam_offset: Some(beam_offset),
                beam_radius: Some(1.0),
            }),
        ),
        TelemetryPacket::new(
            t,
            DomainPayload::Topology(TopologyPayload {
                active_links: vec!["SAT-A".into(), "SAT-B".into(), "GW-1".into()],
            }),
        ),
        TelemetryPacket::new(
            t,
            DomainPayload::Environment(EnvironmentPayload {
                attenuation: Some(0.1),
            }),
        ),
    ]
}

#[test]
fn test_full_cycle_aligns_all_domains() {
    let mut pipeline = FusionPipeline::with_defaults();
    for packet in full_burst(100.0, 0.3) {
        pipeline.ingest(packet);
    }

    let report = pipeline.step(100.0).expect("all domains fresh");
    let snapshot = &report.snapshot;
    assert_eq!(snapshot.time, 100.0);
    assert_eq!(snapshot.geometry.sat_pos, Some([7000.0, 0.0, 0.0]));
    assert_eq!(snapshot.rf.doppler, Some(-1500.0));
    assert_eq!(snapshot.beam.beam_offset, Some(0.3));
    assert_eq!(snapshot.topology.active_links.len(), 3);
    assert_eq!(snapshot.environment.attenuation, Some(0.1));

    // Success drains every source buffer.
    assert_eq!(pipeline.synchronizer().buffer_depths(), [0; Domain::COUNT]);
}

#[test]
fn test_drifting_beam_produces_break_prediction() {
    let mut pipeline = FusionPipeline::with_defaults();

    let mut last_report = None;
    for cycle in 0..6 {
        let t = 100.0 + cycle as f64 * 0.2;
        let offset = 0.40 + cycle as f64 * 0.02;
        for packet in full_burst(t, offset) {
            pipeline.ingest(packet);
        }
        last_report = pipeline.step(t);
        assert!(last_report.is_some(), "cycle {cycle} should align");
    }

    let report = last_report.unwrap();
    assert_eq!(
        report.prediction.reason,
        PredictionReason::TemporalTrendExtrapolation
    );
    assert_eq!(report.prediction.confidence, Confidence::Medium);
    // Offset 0.50 drifting at 0.1/s toward radius 1.0.
    assert_eq!(report.prediction.time_to_break, Some(5.0));

    // The window kept one record per successful cycle.
    assert_eq!(pipeline.window().len(), 6);
}

#[test]
fn test_partial_feed_falls_back_to_cache() {
    let mut pipeline = FusionPipeline::with_defaults();
    for packet in full_burst(10.0, 0.2) {
        pipeline.ingest(packet);
    }
    assert!(pipeline.step(10.0).is_some());

    // Geometry goes silent; everything else keeps reporting.
    for cycle in 1..4 {
        let t = 10.0 + cycle as f64;
        for packet in full_burst(t, 0.2) {
            if packet.domain() != Domain::Geometry {
                pipeline.ingest(packet);
            }
        }
        let report = pipeline.step(t).expect("cache covers silent geometry");
        assert_eq!(
            report.snapshot.geometry.sat_pos,
            Some([7000.0, 0.0, 0.0]),
            "stale geometry served from last-known cache"
        );
    }
}

#[test]
fn test_blocked_domain_retains_packets_until_alignable() {
    let pipeline_config = PipelineConfig {
        alignment_tolerance_secs: 0.05,
        ..Default::default()
    };
    let mut pipeline = FusionPipeline::new(pipeline_config);

    // Beam reports far from the reference; no cache yet.
    pipeline.ingest(TelemetryPacket::new(
        3.0,
        DomainPayload::Beam(BeamPayload {
            beam_offset: Some(0.1),
            beam_radius: Some(1.0),
        }),
    ));
    for packet in full_burst(10.0, 0.2) {
        if packet.domain() != Domain::Beam {
            pipeline.ingest(packet);
        }
    }

    assert!(pipeline.step(10.0).is_none());
    // Nothing lost: the stale beam packet and its peers are retained.
    assert_eq!(pipeline.synchronizer().buffer_depth(Domain::Beam), 1);
    assert_eq!(pipeline.synchronizer().buffer_depth(Domain::Rf), 1);

    // A fresh beam packet unblocks the next cycle.
    pipeline.ingest(TelemetryPacket::new(
        10.0,
        DomainPayload::Beam(BeamPayload {
            beam_offset: Some(0.2),
            beam_radius: Some(1.0),
        }),
    ));
    let report = pipeline.step(10.0).expect("fresh beam unblocks");
    assert_eq!(report.snapshot.beam.beam_offset, Some(0.2));
    assert_eq!(pipeline.synchronizer().buffer_depths(), [0; Domain::COUNT]);
}

#[test]
fn test_beam_exit_projection_tracks_snapshot() {
    let mut pipeline = FusionPipeline::with_defaults();
    // Offset 0.9, nominal rate 0.02: exit in 5 s, inside the horizon.
    for packet in full_burst(50.0, 0.9) {
        pipeline.ingest(packet);
    }
    let report = pipeline.step(50.0).unwrap();
    assert_eq!(report.beam_exit.reason, ProjectionReason::Projected);
    assert_eq!(report.beam_exit.exit_in_secs, Some(5.0));
}

#[test]
fn test_already_outside_beam_is_high_confidence_regardless_of_history() {
    let mut pipeline = FusionPipeline::with_defaults();
    for cycle in 0..3 {
        let t = cycle as f64;
        let offset = if cycle == 2 { 1.0 } else { 0.1 };
        for packet in full_burst(t, offset) {
            pipeline.ingest(packet);
        }
        let report = pipeline.step(t).unwrap();
        if cycle == 2 {
            assert_eq!(report.prediction.time_to_break, Some(0.0));
            assert_eq!(report.prediction.confidence, Confidence::High);
            assert_eq!(
                report.prediction.reason,
                PredictionReason::AlreadyOutsideBeam
            );
            assert_eq!(report.beam_exit.reason, ProjectionReason::AlreadyOutside);
        }
    }
}

#[test]
fn test_report_serializes_for_downstream_consumers() {
    let mut pipeline = FusionPipeline::with_defaults();
    for packet in full_burst(7.0, 0.4) {
        pipeline.ingest(packet);
    }
    let report = pipeline.step(7.0).unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["snapshot"]["time"], 7.0);
    assert_eq!(json["prediction"]["reason"], "insufficient_history");
    assert_eq!(json["prediction"]["confidence"], "low");
    assert!(json["report_id"].is_string());
    assert!(json["rtd_secs"].is_number());
}

#[test]
fn test_mirror_copy_is_isolated_from_pipeline() {
    let mut pipeline = FusionPipeline::with_defaults();
    for packet in full_burst(1.0, 0.2) {
        pipeline.ingest(packet);
    }
    pipeline.step(1.0).unwrap();

    let mut copy: AlignedSnapshot = pipeline.current_state().unwrap();
    copy.beam.beam_offset = Some(999.0);
    assert_eq!(
        pipeline.current_state().unwrap().beam.beam_offset,
        Some(0.2)
    );
}
