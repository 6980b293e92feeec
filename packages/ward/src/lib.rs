#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Static ward directory.
//!
//! Maps ward identifiers to a display name and locality. The built-in
//! directory is embedded at compile time from `wards/delhi.toml`; other
//! directories can be parsed from TOML text with the same schema.

use std::collections::BTreeMap;

use flood_risk_ward_models::{WardId, WardInfo};
use serde::Deserialize;
use thiserror::Error;

/// Number of wards in the built-in directory. Enforced by a test.
#[cfg(test)]
const EXPECTED_WARD_COUNT: usize = 20;

/// Embedded TOML for the built-in directory.
const BUILTIN_TOML: &str = include_str!("../wards/delhi.toml");

/// Errors that can occur while building a ward directory.
#[derive(Debug, Error)]
pub enum WardDirectoryError {
    /// The directory TOML could not be parsed.
    #[error("Failed to parse ward directory: {0}")]
    Toml(#[from] toml::de::Error),

    /// The same ward identifier appears twice.
    #[error("Duplicate ward id in directory: {0}")]
    DuplicateWard(WardId),
}

/// On-disk schema of a ward directory file.
#[derive(Debug, Deserialize)]
struct DirectoryFile {
    region: String,
    wards: Vec<DirectoryEntry>,
}

#[derive(Debug, Deserialize)]
struct DirectoryEntry {
    id: WardId,
    name: String,
    locality: String,
}

/// Lookup table from [`WardId`] to [`WardInfo`].
#[derive(Debug, Clone)]
pub struct WardDirectory {
    region: String,
    entries: BTreeMap<WardId, WardInfo>,
}

impl WardDirectory {
    /// Returns the built-in directory.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML fails to parse. Since it is a
    /// compile-time constant, a parse failure is a development error and
    /// is caught by the tests.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_toml(BUILTIN_TOML)
            .unwrap_or_else(|e| panic!("Failed to parse built-in ward directory: {e}"))
    }

    /// Parses a directory from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`WardDirectoryError`] if the text is not a valid directory
    /// or lists a ward twice.
    pub fn from_toml(text: &str) -> Result<Self, WardDirectoryError> {
        let file: DirectoryFile = toml::from_str(text)?;
        let mut entries = BTreeMap::new();
        for entry in file.wards {
            let info = WardInfo {
                name: entry.name,
                locality: entry.locality,
            };
            if entries.insert(entry.id.clone(), info).is_some() {
                return Err(WardDirectoryError::DuplicateWard(entry.id));
            }
        }
        log::debug!(
            "Loaded ward directory for {} ({} wards)",
            file.region,
            entries.len()
        );
        Ok(Self {
            region: file.region,
            entries,
        })
    }

    /// Returns the directory entry for a ward, if one exists.
    #[must_use]
    pub fn get(&self, ward_id: &WardId) -> Option<&WardInfo> {
        self.entries.get(ward_id)
    }

    /// Returns the default region name, used as the locality of wards that
    /// have no entry.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Returns the number of wards in the directory.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the directory has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
