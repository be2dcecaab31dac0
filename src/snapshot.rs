//! Snapshot codec: whole-scene state to and from an opaque string token.
//!
//! DESIGN
//! ======
//! A snapshot is the JSON form of [`SceneState`]. Equality is string
//! equality; the token is never edited after creation. Encoding is
//! synchronous. Restoring is the one suspension point of the history engine:
//! the surface signals import completion through a callback, which is bridged
//! to a oneshot channel so callers can `await` it. No `RefCell` borrow of the
//! surface is held across that await.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use std::cell::RefCell;
use std::fmt;

use scene::{SceneError, SceneState};
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tracing::debug;

use crate::surface::Surface;

/// Opaque serialized scene.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(String);

impl Snapshot {
    /// Wrap a previously stored token without validating it.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot encode failed: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("malformed snapshot: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("scene import failed: {0}")]
    Import(#[from] SceneError),
    #[error("surface dropped the import completion callback")]
    Abandoned,
}

/// Serialize the surface's full state.
///
/// # Errors
///
/// Returns [`SnapshotError::Encode`] if the state cannot be serialized.
pub fn encode<S: Surface + ?Sized>(surface: &S) -> Result<Snapshot, SnapshotError> {
    encode_state(&surface.export_state())
}

/// Serialize an exported state.
///
/// # Errors
///
/// Returns [`SnapshotError::Encode`] if the state cannot be serialized.
pub fn encode_state(state: &SceneState) -> Result<Snapshot, SnapshotError> {
    serde_json::to_string(state).map(Snapshot).map_err(SnapshotError::Encode)
}

/// Parse a snapshot back into scene state without touching any surface.
///
/// # Errors
///
/// Returns [`SnapshotError::Decode`] for malformed input.
pub fn decode(snapshot: &Snapshot) -> Result<SceneState, SnapshotError> {
    serde_json::from_str(&snapshot.0).map_err(SnapshotError::Decode)
}

/// Decode `snapshot` into `surface` and wait for the import to complete,
/// then re-render.
///
/// On any error the surface keeps its previous state.
///
/// # Errors
///
/// Returns [`SnapshotError::Decode`] for malformed input,
/// [`SnapshotError::Import`] when the surface rejects the state, and
/// [`SnapshotError::Abandoned`] when the completion callback is dropped.
pub async fn restore<S: Surface + ?Sized>(surface: &RefCell<S>, snapshot: &Snapshot) -> Result<(), SnapshotError> {
    let state = decode(snapshot)?;
    let (tx, rx) = oneshot::channel();
    surface.borrow_mut().import_state(
        state,
        Box::new(move |result| {
            if tx.send(result).is_err() {
                debug!("snapshot restore receiver dropped before import completed");
            }
        }),
    );
    rx.await.map_err(|_| SnapshotError::Abandoned)??;
    surface.borrow_mut().render_all();
    debug!(bytes = snapshot.len(), "snapshot restored");
    Ok(())
}
