//! JSON encoding of the persisted inventory record.
//!
//! There is no migration path: anything that is not a well-formed version-3
//! record decodes to `None` and the caller falls back to fresh state.

use serde::Deserialize;

use invtrack_inventory::{SNAPSHOT_VERSION, StoreSnapshot};

use crate::snapshot_store::PersistenceError;

#[derive(Deserialize)]
struct VersionProbe {
    version: Option<u32>,
}

pub fn encode_store(snapshot: &StoreSnapshot) -> Result<Vec<u8>, PersistenceError> {
    Ok(serde_json::to_vec_pretty(snapshot)?)
}

/// Decode a persisted record, or `None` if it is corrupt or from another version.
pub fn decode_store(bytes: &[u8]) -> Option<StoreSnapshot> {
    let probe: VersionProbe = match serde_json::from_slice(bytes) {
        Ok(probe) => probe,
        Err(err) => {
            tracing::warn!(error = %err, "discarding unreadable inventory snapshot");
            return None;
        }
    };

    if probe.version != Some(SNAPSHOT_VERSION) {
        tracing::warn!(
            found = ?probe.version,
            expected = SNAPSHOT_VERSION,
            "discarding inventory snapshot with unsupported version"
        );
        return None;
    }

    match serde_json::from_slice(bytes) {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            tracing::warn!(error = %err, "discarding malformed inventory snapshot");
            None
        }
    }
}
