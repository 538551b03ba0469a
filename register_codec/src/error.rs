/*!
Common error types for the register codec and converter.
*/

use std::path::PathBuf;
use thiserror::Error;

/// Common result type used throughout the codec library
pub type Result<T> = std::result::Result<T, ConverterError>;

/// Error type for catalog loading and codec operations
#[derive(Error, Debug)]
pub enum ConverterError {
    /// The configuration source could not be read
    #[error("Failed to read configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration document is structurally invalid
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(String),

    /// A digit group is not a valid unsigned value for the register width
    #[error("Malformed value {value:?}: slice {slice:?} at offset {offset} is not an unsigned decimal")]
    MalformedValue {
        value: String,
        offset: usize,
        slice: String,
    },

    /// No supplied value matched an encodable parameter
    #[error("No encodable value")]
    NoEncodableValue,

    /// Decode was called without a usable raw message
    #[error("No message to decode")]
    NoMessage,

    /// The operation exists at the plugin boundary but has no implementation
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
}

impl ConverterError {
    /// Create a new configuration read error
    pub fn config_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigRead {
            path: path.into(),
            source,
        }
    }

    /// Create a new configuration parse error
    pub fn config_parse(msg: impl Into<String>) -> Self {
        Self::ConfigParse(msg.into())
    }

    /// Create a new malformed value error
    pub fn malformed_value(value: &str, offset: usize, slice: &[u8]) -> Self {
        Self::MalformedValue {
            value: value.to_string(),
            offset,
            slice: String::from_utf8_lossy(slice).into_owned(),
        }
    }
}

impl From<serde_yaml::Error> for ConverterError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::ConfigParse(err.to_string())
    }
}
