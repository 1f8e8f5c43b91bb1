//! Variable defaults catalog.
//!
//! Maps a diagnostic variable name to its default observational metadata.
//! The table ships embedded in the binary; a config-specified override file
//! replaces it wholesale. When the host configuration disables defaults the
//! catalog is simply empty.

use crate::error::{SetupError, SetupResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// The built-in variable defaults table, embedded at build time.
const BUILTIN_TABLE: &str = include_str!("../config/variable_defaults.yaml");

/// Default observational metadata for one variable.
///
/// Only the observation-related keys are read; defaults files may carry
/// additional per-variable keys (plot settings and the like), which serde
/// ignores here.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VarDefault {
    /// Path to the observational data file, absolute or relative to the
    /// run's fallback search directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obs_file: Option<PathBuf>,

    /// Label for the observational dataset. Falls back to the file name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obs_name: Option<String>,

    /// Name of the variable inside the observational dataset. Falls back to
    /// the model variable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obs_var_name: Option<String>,
}

/// Where a defaults catalog came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultsSource {
    /// The table embedded in the binary.
    Builtin,
    /// A user-specified override file.
    File(PathBuf),
    /// Defaults are disabled (`use_defaults: false`).
    Disabled,
}

impl fmt::Display for DefaultsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultsSource::Builtin => write!(f, "built-in table"),
            DefaultsSource::File(path) => write!(f, "{}", path.display()),
            DefaultsSource::Disabled => write!(f, "disabled"),
        }
    }
}

/// Mapping from variable name to its default record, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDefaults {
    records: IndexMap<String, VarDefault>,
    source: DefaultsSource,
}

impl VariableDefaults {
    /// Load the defaults catalog.
    ///
    /// With an override path the file must exist and parse as a
    /// variable-to-record mapping; anything else is fatal. Without one the
    /// built-in table is used.
    pub fn load(override_path: Option<&Path>) -> SetupResult<Self> {
        match override_path {
            Some(path) => {
                let text =
                    std::fs::read_to_string(path).map_err(|source| SetupError::ReadDefaults {
                        path: path.to_path_buf(),
                        source,
                    })?;
                let records =
                    serde_yaml::from_str(&text).map_err(|source| SetupError::ParseDefaults {
                        path: path.to_path_buf(),
                        source,
                    })?;
                Ok(Self {
                    records,
                    source: DefaultsSource::File(path.to_path_buf()),
                })
            }
            None => Self::builtin(),
        }
    }

    /// The built-in table embedded in the binary.
    pub fn builtin() -> SetupResult<Self> {
        let records = serde_yaml::from_str(BUILTIN_TABLE)
            .map_err(|source| SetupError::BuiltinDefaults { source })?;
        Ok(Self {
            records,
            source: DefaultsSource::Builtin,
        })
    }

    /// The empty catalog used when defaults are disabled.
    pub fn empty() -> Self {
        Self {
            records: IndexMap::new(),
            source: DefaultsSource::Disabled,
        }
    }

    /// Record for a variable, if the catalog has one.
    pub fn get(&self, var: &str) -> Option<&VarDefault> {
        self.records.get(var)
    }

    /// Whether the catalog has a record for a variable.
    pub fn contains(&self, var: &str) -> bool {
        self.records.contains_key(var)
    }

    /// Number of variables in the catalog.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The full mapping, in source order.
    pub fn records(&self) -> &IndexMap<String, VarDefault> {
        &self.records
    }

    /// Where this catalog came from.
    pub fn source(&self) -> &DefaultsSource {
        &self.source
    }
}
