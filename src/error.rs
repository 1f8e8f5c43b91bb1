//! Fatal setup errors.
//!
//! Only structural problems are errors: missing or mistyped config keys and
//! unreadable/unparseable config or defaults files. A variable that cannot be
//! resolved during the observation pass is never an error; it is skipped with
//! a logged notice and simply has no catalog entry.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort diagnostics setup.
#[derive(Debug, Error)]
pub enum SetupError {
    /// A required configuration key is absent.
    #[error("required config key '{key}' is missing")]
    MissingKey { key: String },

    /// A configuration key holds a value of an unexpected type.
    #[error("config key '{key}' should be a {expected}")]
    WrongType { key: String, expected: &'static str },

    /// The diagnostics config file could not be read.
    #[error("failed to read config file '{}'", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The diagnostics config file is not a YAML mapping.
    #[error("failed to parse config file '{}'", path.display())]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// An explicitly specified variable defaults file could not be read.
    #[error("failed to read variable defaults file '{}'", path.display())]
    ReadDefaults {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An explicitly specified variable defaults file is not a
    /// variable-to-record mapping.
    #[error("failed to parse variable defaults file '{}'", path.display())]
    ParseDefaults {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The defaults table embedded in the binary failed to parse.
    #[error("bundled variable defaults table is invalid")]
    BuiltinDefaults {
        #[source]
        source: serde_yaml::Error,
    },
}

/// Result type for setup operations.
pub type SetupResult<T> = std::result::Result<T, SetupError>;
