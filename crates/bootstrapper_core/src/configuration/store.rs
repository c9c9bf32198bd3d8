//! In-memory section store with a JSON source format.
//!
//! # Responsibility
//! - Hold named configuration sections resolved before the bind pass.
//! - Parse the JSON settings layout used by host configuration files.
//!
//! # Invariants
//! - Section names are looked up exactly (case-sensitive).
//! - I/O and parse failures surface at load time, never during binding.

use crate::configuration::section::ConfigurationSection;
use crate::configuration::strategy::SectionLoader;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Named configuration sections.
///
/// JSON layout:
/// `{ "sections": { "<name>": [ { "key": "...", "value": "..." } ] } }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionStore {
    #[serde(default)]
    sections: BTreeMap<String, ConfigurationSection>,
}

impl SectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces one section.
    pub fn insert_section(&mut self, name: impl Into<String>, section: ConfigurationSection) {
        self.sections.insert(name.into(), section);
    }

    /// Builder-style variant of [`SectionStore::insert_section`].
    pub fn with_section(mut self, name: impl Into<String>, section: ConfigurationSection) -> Self {
        self.insert_section(name, section);
        self
    }

    pub fn section(&self, name: &str) -> Option<&ConfigurationSection> {
        self.sections.get(name)
    }

    /// Returns sorted section names.
    pub fn section_names(&self) -> Vec<String> {
        self.sections.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn from_json_str(raw: &str) -> Result<Self, SectionStoreError> {
        serde_json::from_str(raw).map_err(SectionStoreError::Parse)
    }

    /// Reads and parses one JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SectionStoreError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| SectionStoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_json_str(&raw)?;
        info!(
            "event=section_store_load module=configuration status=ok sections={}",
            store.len()
        );
        Ok(store)
    }
}

impl SectionLoader for SectionStore {
    fn get_section(&self, name: &str) -> Option<ConfigurationSection> {
        self.section(name).cloned()
    }
}

/// Section store load errors.
#[derive(Debug)]
pub enum SectionStoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
}

impl Display for SectionStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read configuration `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid configuration json: {err}"),
        }
    }
}

impl Error for SectionStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}
