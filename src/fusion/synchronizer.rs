//! Closest-timestamp alignment with staleness fallback
//!
//! The synchronizer owns one source buffer per domain plus a last-known
//! cache. `ingest` only appends; `try_align` is the single critical
//! section that reads, accepts and clears.
//!
//! # Alignment Rules
//!
//! - A domain counts as *seen* once it has a buffered packet or a cache
//!   entry; unseen domains resolve to their empty payload.
//! - A buffered candidate is fresh when its timestamp is within
//!   tolerance of the reference time; ties between equally-close packets
//!   go to the earliest inserted.
//! - A seen domain with neither a fresh candidate nor a cached value
//!   blocks the whole cycle: no snapshot, no buffer cleared.
//! - Buffers are cleared only on success; the last-known cache is never
//!   cleared.
//!
//! Clearing only on success bounds memory in steady operation without
//! losing packets across transient gaps. The cost is unbounded buffer
//! growth if one domain permanently stops reporting while others
//! continue; [`TimeSynchronizer::buffer_depths`] exists so hosts can
//! watch for that condition.

use crate::fusion::packet::{AlignedSnapshot, Domain, DomainPayload, TelemetryPacket};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace};

/// Merges buffered packets across domains into aligned snapshots.
///
/// `ingest` calls for different domains may proceed in parallel; each
/// domain buffer has its own lock. `try_align` acquires every buffer
/// lock (in [`Domain::ALL`] order) plus the cache lock and holds them
/// for the whole read-accept-clear cycle, so producers can never race a
/// partially consumed alignment.
pub struct TimeSynchronizer {
    /// Maximum |timestamp - reference_time| for a packet to be fresh
    tolerance_secs: f64,
    /// Per-domain staging buffers, insertion ordered
    buffers: [Mutex<Vec<TelemetryPacket>>; Domain::COUNT],
    /// Most recently accepted payload per domain
    last_known: Mutex<[Option<DomainPayload>; Domain::COUNT]>,
}

impl TimeSynchronizer {
    /// Create a synchronizer with the given alignment tolerance
    pub fn new(tolerance_secs: f64) -> Self {
        Self {
            tolerance_secs,
            buffers: std::array::from_fn(|_| Mutex::new(Vec::new())),
            last_known: Mutex::new(std::array::from_fn(|_| None)),
        }
    }

    /// Alignment tolerance in seconds
    pub fn tolerance_secs(&self) -> f64 {
        self.tolerance_secs
    }

    /// Append a packet to its domain's source buffer.
    ///
    /// No other side effect: acceptance into a snapshot and cache
    /// updates happen only inside [`try_align`](Self::try_align).
    pub fn ingest(&self, packet: TelemetryPacket) {
        let domain = packet.domain();
        let mut buffer = lock(&self.buffers[domain.index()]);
        buffer.push(packet);
        trace!(domain = %domain, depth = buffer.len(), "Packet buffered");
    }

    /// Attempt to build an aligned snapshot around `reference_time`.
    ///
    /// Returns `None` while some seen domain has neither a fresh packet
    /// within tolerance nor a cached value. Failure leaves every buffer
    /// untouched; the caller simply retries after the next ingest.
    pub fn try_align(&self, reference_time: f64) -> Option<AlignedSnapshot> {
        // Lock order: buffers in Domain::ALL order, then the cache.
        let mut buffers: Vec<MutexGuard<'_, Vec<TelemetryPacket>>> =
            self.buffers.iter().map(lock).collect();
        let mut last_known = lock(&self.last_known);

        let mut resolved: [Option<DomainPayload>; Domain::COUNT] = std::array::from_fn(|_| None);
        let mut fresh_count = 0usize;

        for domain in Domain::ALL {
            let i = domain.index();
            let candidate = closest_packet(&buffers[i], reference_time);

            match candidate {
                Some(packet) if (packet.timestamp - reference_time).abs() <= self.tolerance_secs => {
                    // Fresh data: accept and remember it for later cycles.
                    last_known[i] = Some(packet.payload.clone());
                    resolved[i] = Some(packet.payload.clone());
                    fresh_count += 1;
                }
                _ => {
                    if let Some(cached) = &last_known[i] {
                        resolved[i] = Some(cached.clone());
                    } else if !buffers[i].is_empty() {
                        // Seen, but nothing fresh and nothing cached:
                        // the cycle cannot produce a snapshot yet.
                        debug!(
                            domain = %domain,
                            reference_time,
                            depth = buffers[i].len(),
                            "Alignment blocked: no fresh or cached data"
                        );
                        return None;
                    }
                    // Never seen: leave unresolved, maps to empty payload.
                }
            }
        }

        let mut snapshot = AlignedSnapshot::empty(reference_time);
        for payload in resolved.into_iter().flatten() {
            snapshot.set(payload);
        }

        for buffer in buffers.iter_mut() {
            buffer.clear();
        }

        debug!(reference_time, fresh_count, "Aligned snapshot produced");
        Some(snapshot)
    }

    /// Number of packets currently staged for a domain.
    ///
    /// Grows without bound if the domain's peers keep reporting while an
    /// alignment-blocking domain stays silent.
    pub fn buffer_depth(&self, domain: Domain) -> usize {
        lock(&self.buffers[domain.index()]).len()
    }

    /// Staged packet counts for all domains, in [`Domain::ALL`] order
    pub fn buffer_depths(&self) -> [usize; Domain::COUNT] {
        std::array::from_fn(|i| lock(&self.buffers[i]).len())
    }

    /// Most recently accepted payload for a domain, if any
    pub fn last_known(&self, domain: Domain) -> Option<DomainPayload> {
        lock(&self.last_known)[domain.index()].clone()
    }
}

/// Lock a mutex, recovering the data if a panicking producer poisoned it
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Packet whose timestamp is closest to `reference_time`, earliest
/// insertion winning ties
fn closest_packet(buffer: &[TelemetryPacket], reference_time: f64) -> Option<&TelemetryPacket> {
    let mut best: Option<&TelemetryPacket> = None;
    for packet in buffer {
        let distance = (packet.timestamp - reference_time).abs();
        match best {
            Some(current) if distance >= (current.timestamp - reference_time).abs() => {}
            _ => best = Some(packet),
        }
    }
    best
}
