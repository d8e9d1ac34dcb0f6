//! Digital twin state
//!
//! Holds the authoritative mirrored copy of the latest aligned physical
//! state and derives twin-side quantities from it: replication time
//! difference and deterministic forward evolution of the beam
//! constraint.

pub mod evolution;
pub mod mirror;
pub mod rtd;

pub use evolution::{BeamExitProjection, ForwardEvolution, ProjectionReason};
pub use mirror::{StateMirror, UninitializedStateError};
pub use rtd::RtdEstimator;
