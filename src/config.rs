//! Structured configuration access.
//!
//! The resolver reads its settings through the [`ConfigRead`] trait rather
//! than owning a config format: raw lookups are the only required method, and
//! the typed getters are provided on top. [`YamlConfig`] is the file-backed
//! implementation used by the binary.
//!
//! Values are returned exactly as stored. Any string templating in the config
//! is expected to have been expanded by whatever produced the file.

use crate::error::{SetupError, SetupResult};
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

/// Read-only access to structured configuration values.
///
/// A key that is absent or explicitly null reads as `None`; a present value
/// of the wrong type is a fatal [`SetupError::WrongType`]. `require_*`
/// variants turn an absent key into [`SetupError::MissingKey`].
pub trait ConfigRead {
    /// Look up a raw value, optionally inside a top-level section mapping.
    fn lookup(&self, section: Option<&str>, key: &str) -> Option<&Value>;

    /// Read an optional boolean.
    fn get_bool(&self, section: Option<&str>, key: &str) -> SetupResult<Option<bool>> {
        match self.lookup(section, key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(SetupError::WrongType {
                key: key_path(section, key),
                expected: "boolean",
            }),
        }
    }

    /// Read an optional string.
    fn get_string(&self, section: Option<&str>, key: &str) -> SetupResult<Option<String>> {
        match self.lookup(section, key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(SetupError::WrongType {
                key: key_path(section, key),
                expected: "string",
            }),
        }
    }

    /// Read an optional filesystem path.
    fn get_path(&self, section: Option<&str>, key: &str) -> SetupResult<Option<PathBuf>> {
        Ok(self.get_string(section, key)?.map(PathBuf::from))
    }

    /// Read an optional list of strings.
    fn get_string_list(&self, section: Option<&str>, key: &str) -> SetupResult<Option<Vec<String>>> {
        let seq = match self.lookup(section, key) {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Sequence(seq)) => seq,
            Some(_) => {
                return Err(SetupError::WrongType {
                    key: key_path(section, key),
                    expected: "list of strings",
                });
            }
        };

        let mut items = Vec::with_capacity(seq.len());
        for value in seq {
            match value {
                Value::String(s) => items.push(s.clone()),
                _ => {
                    return Err(SetupError::WrongType {
                        key: key_path(section, key),
                        expected: "list of strings",
                    });
                }
            }
        }
        Ok(Some(items))
    }

    /// Read a required list of strings.
    fn require_string_list(&self, section: Option<&str>, key: &str) -> SetupResult<Vec<String>> {
        self.get_string_list(section, key)?
            .ok_or_else(|| SetupError::MissingKey {
                key: key_path(section, key),
            })
    }

    /// Enforce that a top-level section mapping is present.
    fn require_section(&self, name: &str) -> SetupResult<()> {
        match self.lookup(None, name) {
            Some(Value::Mapping(_)) => Ok(()),
            None | Some(Value::Null) => Err(SetupError::MissingKey {
                key: name.to_string(),
            }),
            Some(_) => Err(SetupError::WrongType {
                key: name.to_string(),
                expected: "mapping",
            }),
        }
    }
}

/// Dotted key path for error messages.
fn key_path(section: Option<&str>, key: &str) -> String {
    match section {
        Some(name) => format!("{name}.{key}"),
        None => key.to_string(),
    }
}

/// Diagnostics configuration backed by a YAML file.
#[derive(Debug, Clone)]
pub struct YamlConfig {
    root: Mapping,
    path: PathBuf,
}

impl YamlConfig {
    /// Load configuration from a YAML file whose root is a mapping.
    pub fn load(path: impl AsRef<Path>) -> SetupResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SetupError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        let root: Mapping =
            serde_yaml::from_str(&text).map_err(|source| SetupError::ParseConfig {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            root,
            path: path.to_path_buf(),
        })
    }

    /// Path the configuration was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigRead for YamlConfig {
    fn lookup(&self, section: Option<&str>, key: &str) -> Option<&Value> {
        let scope = match section {
            Some(name) => self.root.get(name)?.as_mapping()?,
            None => &self.root,
        };
        scope.get(key)
    }
}
