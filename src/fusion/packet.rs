//! Telemetry packet and snapshot value types
//!
//! Every payload is a fixed-schema record with explicitly nullable
//! fields. A field that the source did not report is `None`, never a
//! sentinel value; missing-field handling is therefore checked at
//! compile time instead of through runtime map lookups.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five telemetry categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// Orbital geometry (satellite position and velocity)
    Geometry,
    /// Radio-frequency channel quality
    Rf,
    /// Beam pointing error
    Beam,
    /// Active link topology
    Topology,
    /// Atmospheric environment
    Environment,
}

impl Domain {
    /// Number of telemetry domains
    pub const COUNT: usize = 5;

    /// All domains in canonical order
    pub const ALL: [Domain; Domain::COUNT] = [
        Domain::Geometry,
        Domain::Rf,
        Domain::Beam,
        Domain::Topology,
        Domain::Environment,
    ];

    /// Stable string form used in wire records and log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Geometry => "geometry",
            Domain::Rf => "rf",
            Domain::Beam => "beam",
            Domain::Topology => "topology",
            Domain::Environment => "environment",
        }
    }

    /// Position in [`Domain::ALL`], used as buffer index
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Orbital geometry observation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometryPayload {
    /// Satellite position in km (ECI frame)
    pub sat_pos: Option<[f64; 3]>,
    /// Satellite velocity in km/s
    pub sat_vel: Option<[f64; 3]>,
}

/// RF channel observation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RfPayload {
    /// Signal-to-noise ratio in dB
    pub snr: Option<f64>,
    /// Doppler shift in Hz
    pub doppler: Option<f64>,
    /// Symbol timing drift in seconds per second
    pub timing_drift: Option<f64>,
}

/// Beam pointing observation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeamPayload {
    /// Pointing-error magnitude
    pub beam_offset: Option<f64>,
    /// Maximum tolerable pointing-error magnitude before link loss
    pub beam_radius: Option<f64>,
}

/// Link topology observation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologyPayload {
    /// Identifiers of currently active links
    #[serde(default)]
    pub active_links: Vec<String>,
}

/// Environment observation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentPayload {
    /// Atmospheric attenuation in dB
    pub attenuation: Option<f64>,
}

/// Payload of a single telemetry packet, tagged by domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "domain", content = "payload")]
pub enum DomainPayload {
    Geometry(GeometryPayload),
    Rf(RfPayload),
    Beam(BeamPayload),
    Topology(TopologyPayload),
    Environment(EnvironmentPayload),
}

impl DomainPayload {
    /// Domain this payload belongs to
    pub fn domain(&self) -> Domain {
        match self {
            DomainPayload::Geometry(_) => Domain::Geometry,
            DomainPayload::Rf(_) => Domain::Rf,
            DomainPayload::Beam(_) => Domain::Beam,
            DomainPayload::Topology(_) => Domain::Topology,
            DomainPayload::Environment(_) => Domain::Environment,
        }
    }

    /// Empty payload for a domain (the "no data yet" value)
    pub fn empty(domain: Domain) -> Self {
        match domain {
            Domain::Geometry => DomainPayload::Geometry(GeometryPayload::default()),
            Domain::Rf => DomainPayload::Rf(RfPayload::default()),
            Domain::Beam => DomainPayload::Beam(BeamPayload::default()),
            Domain::Topology => DomainPayload::Topology(TopologyPayload::default()),
            Domain::Environment => DomainPayload::Environment(EnvironmentPayload::default()),
        }
    }
}

/// A single timestamped observation from one telemetry domain.
///
/// Immutable once created. Timestamps are float seconds in the shared
/// timestamp domain of the telemetry sources; no clock synchronization
/// is performed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryPacket {
    /// Source timestamp in seconds
    pub timestamp: f64,
    /// Domain-tagged observation
    #[serde(flatten)]
    pub payload: DomainPayload,
}

impl TelemetryPacket {
    /// Create a packet from a timestamp and payload
    pub fn new(timestamp: f64, payload: DomainPayload) -> Self {
        Self { timestamp, payload }
    }

    /// Domain this packet reports for
    pub fn domain(&self) -> Domain {
        self.payload.domain()
    }
}

/// One consistent, single-timestamp view combining the latest resolved
/// payload from every domain.
///
/// Produced atomically by the synchronizer: either every domain resolves
/// to some payload (fresh or cached) or no snapshot is produced. Domains
/// never seen resolve to their empty payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedSnapshot {
    /// Reference time the snapshot was aligned to, in seconds
    pub time: f64,
    pub geometry: GeometryPayload,
    pub rf: RfPayload,
    pub beam: BeamPayload,
    pub topology: TopologyPayload,
    pub environment: EnvironmentPayload,
}

impl AlignedSnapshot {
    /// Snapshot with every domain empty
    pub fn empty(time: f64) -> Self {
        Self {
            time,
            geometry: GeometryPayload::default(),
            rf: RfPayload::default(),
            beam: BeamPayload::default(),
            topology: TopologyPayload::default(),
            environment: EnvironmentPayload::default(),
        }
    }

    /// Replace one domain's payload, consuming the tagged value
    pub(crate) fn set(&mut self, payload: DomainPayload) {
        match payload {
            DomainPayload::Geometry(p) => self.geometry = p,
            DomainPayload::Rf(p) => self.rf = p,
            DomainPayload::Beam(p) => self.beam = p,
            DomainPayload::Topology(p) => self.topology = p,
            DomainPayload::Environment(p) => self.environment = p,
        }
    }
}
