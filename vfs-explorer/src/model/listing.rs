//! ``src/model/listing.rs``
//! ============================================================================
//! # Listing payloads
//!
//! Parses the backend's JSON bodies into typed values. This is the fallible
//! boundary of the controller: a 2xx body that does not have the expected
//! shape becomes [`ListingError::Malformed`] instead of a panic further on.
//!
//! Wire format (success):
//! `{"path": "/home", "files": [{"name", "isDir", "fullSize", "path",
//! "havePermission"}], "elapsed": 1234}`
//!
//! Wire format (failure): `{"message": "..."}`.

use std::time::Duration;

use compact_str::CompactString;
use serde::{Deserialize, Deserializer};

use crate::error::ListingError;
use crate::model::entry::DirectoryEntry;

/// A successfully parsed listing of one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Absolute path the backend resolved the request to.
    pub path: String,

    /// Entries in response order.
    pub entries: Vec<DirectoryEntry>,

    /// Scan time reported by the backend.
    pub elapsed: Option<Duration>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireListing {
    path: String,
    #[serde(deserialize_with = "null_as_empty")]
    files: Vec<WireEntry>,
    #[serde(default)]
    elapsed: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireEntry {
    name: CompactString,
    is_dir: bool,
    #[serde(default)]
    path: Option<String>,
    have_permission: bool,
    #[serde(default)]
    full_size: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WireFailure {
    message: Option<String>,
}

// The backend serializes an empty slice as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl From<WireEntry> for DirectoryEntry {
    fn from(wire: WireEntry) -> Self {
        Self {
            name: wire.name,
            path: wire.path.filter(|p| !p.is_empty()),
            is_directory: wire.is_dir,
            has_permission: wire.have_permission,
            is_parent_marker: false,
            full_size: wire.full_size.and_then(|s| u64::try_from(s).ok()),
        }
    }
}

impl Listing {
    /// Parses and validates a 2xx response body.
    pub fn from_json(body: &[u8]) -> Result<Self, ListingError> {
        let wire: WireListing =
            serde_json::from_slice(body).map_err(|e| ListingError::malformed(e.to_string()))?;

        if wire.path.is_empty() {
            return Err(ListingError::malformed("field `path` is empty"));
        }

        Ok(Self {
            path: wire.path,
            entries: wire.files.into_iter().map(DirectoryEntry::from).collect(),
            elapsed: wire
                .elapsed
                .and_then(|us| u64::try_from(us).ok())
                .map(Duration::from_micros),
        })
    }
}

/// Builds the error for a non-2xx response, using the body's `message`
/// when it has one.
#[must_use]
pub fn application_error(status: u16, body: &[u8]) -> ListingError {
    let message = serde_json::from_slice::<WireFailure>(body)
        .ok()
        .and_then(|failure| failure.message)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("Request failed with status {status}"));

    ListingError::Application { status, message }
}
