//! Authoritative mirrored state
//!
//! Exactly one [`AlignedSnapshot`] is current at a time. Writers copy
//! in, readers copy out, so neither side can mutate the authoritative
//! copy in place and a reader never observes a partially written
//! snapshot.

use crate::fusion::packet::AlignedSnapshot;
use std::sync::{PoisonError, RwLock};
use thiserror::Error;
use tracing::trace;

/// State mirror read before the first update.
///
/// This is a caller sequencing bug, not a data-quality condition, which
/// is why it surfaces as a hard error instead of an empty default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("digital twin state has not been initialized yet")]
pub struct UninitializedStateError;

/// Holds the single most recent aligned snapshot
#[derive(Debug, Default)]
pub struct StateMirror {
    state: RwLock<Option<AlignedSnapshot>>,
}

impl StateMirror {
    /// Create an empty mirror
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `snapshot` as the current state, replacing any prior state
    pub fn update(&self, snapshot: AlignedSnapshot) {
        trace!(time = snapshot.time, "State mirror updated");
        let mut slot = self
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *slot = Some(snapshot);
    }

    /// Isolated copy of the current state.
    ///
    /// Mutating the returned snapshot never affects the mirror.
    pub fn current(&self) -> Result<AlignedSnapshot, UninitializedStateError> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(UninitializedStateError)
    }

    /// Whether the mirror has been populated at least once
    pub fn is_initialized(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
