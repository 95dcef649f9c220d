//! JSON state file holding one collection of named items.
//!
//! The file stores a [`Snapshot`] of an `OrderedCollection<String>`. A missing
//! file means an empty collection with the default relationship names.

use std::path::Path;

use reorder::collection::{OrderedCollection, RelationshipConfig, Snapshot};
use serde::{Deserialize, Deserializer, Serialize};

/// The current state file format version.
const STATE_VERSION: u8 = 0;

const DEFAULT_OWNER_TYPE: &str = "List";
const DEFAULT_ITEM_TYPE: &str = "Entry";
const DEFAULT_ARRAY_NAME: &str = "entries";

fn is_v0(v: &u8) -> bool {
    *v == 0
}

fn validate_state_version<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let version = u8::deserialize(deserializer)?;
    if version != STATE_VERSION {
        return Err(serde::de::Error::custom(format!(
            "unsupported state version {version}; only version {STATE_VERSION} is supported"
        )));
    }
    Ok(version)
}

#[derive(Serialize, Deserialize)]
struct StateFile {
    #[serde(
        rename = "_v",
        default,
        skip_serializing_if = "is_v0",
        deserialize_with = "validate_state_version"
    )]
    version: u8,
    collection: Snapshot<String>,
}

/// Loads the collection stored at `path`.
///
/// If the file does not exist, a new, empty collection is returned.
pub fn load(path: &Path) -> Result<OrderedCollection<String>, Box<dyn std::error::Error>> {
    match std::fs::read_to_string(path) {
        Ok(json) => {
            let state: StateFile = serde_json::from_str(&json)?;
            let collection = OrderedCollection::restore(state.collection)?;
            tracing::debug!(path = %path.display(), links = collection.len(), "Loaded state");
            Ok(collection)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "No state file, starting an empty collection");
            let config =
                RelationshipConfig::new(DEFAULT_OWNER_TYPE, DEFAULT_ITEM_TYPE, DEFAULT_ARRAY_NAME)?;
            Ok(OrderedCollection::new(config))
        }
        Err(e) => Err(e.into()),
    }
}

/// Writes the collection to `path`, replacing any previous content.
pub fn save(
    path: &Path,
    collection: &OrderedCollection<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = StateFile {
        version: STATE_VERSION,
        collection: collection.snapshot(),
    };
    std::fs::write(path, serde_json::to_string_pretty(&state)?)?;
    tracing::debug!(path = %path.display(), links = collection.len(), "Saved state");
    Ok(())
}
