//! Telemetry ingestion and time alignment
//!
//! Merges buffered packets across the five telemetry domains into one
//! [`AlignedSnapshot`](packet::AlignedSnapshot) per cycle, using a
//! last-known-value cache for domains with no fresh packet within
//! tolerance.

pub mod packet;
pub mod synchronizer;

pub use packet::{AlignedSnapshot, Domain, DomainPayload, TelemetryPacket};
pub use synchronizer::TimeSynchronizer;
