/*!
Registry types and parameter descriptors.

A parameter occupies `registry_count` consecutive cells of one registry type.
The registry type fixes the cell width and therefore the payload length of
an encoded value.
*/

use crate::error::{ConverterError, Result};
use crate::protocol::{COIL_CELL_BYTES, REGISTRY_CELL_BYTES};
use serde::{Deserialize, Serialize};

/// Register cell kinds of the device protocol.
///
/// Configuration names are matched by [`RegistryType::from_str`], so they
/// ignore case and surrounding whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum RegistryType {
    /// 16-bit read/write cell
    #[serde(rename = "holding registry")]
    HoldingRegistry,
    /// 8-bit read/write cell
    #[serde(rename = "coil")]
    Coil,
    /// 8-bit read-only cell
    #[serde(rename = "discrete input")]
    DiscreteInput,
    /// 16-bit read-only cell
    #[serde(rename = "input registry")]
    InputRegistry,
}

impl RegistryType {
    /// Parse registry type from its configuration name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "holding registry" => Some(Self::HoldingRegistry),
            "coil" => Some(Self::Coil),
            "discrete input" => Some(Self::DiscreteInput),
            "input registry" => Some(Self::InputRegistry),
            _ => None,
        }
    }

    /// Convert to configuration name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HoldingRegistry => "holding registry",
            Self::Coil => "coil",
            Self::DiscreteInput => "discrete input",
            Self::InputRegistry => "input registry",
        }
    }

    /// Width of one cell in bytes
    fn cell_bytes(self) -> usize {
        match self {
            Self::HoldingRegistry | Self::InputRegistry => REGISTRY_CELL_BYTES,
            Self::Coil | Self::DiscreteInput => COIL_CELL_BYTES,
        }
    }

    /// Whether values can be issued to cells of this type
    pub fn is_writable(self) -> bool {
        matches!(self, Self::HoldingRegistry | Self::Coil)
    }

    /// Payload length in bytes for `count` cells
    pub fn payload_len(self, count: u16) -> usize {
        usize::from(count) * self.cell_bytes()
    }
}

impl TryFrom<String> for RegistryType {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::from_str(&value).ok_or_else(|| {
            format!(
                "unknown registry type {value:?}, expected one of \"holding registry\", \"coil\", \"discrete input\", \"input registry\""
            )
        })
    }
}

impl std::fmt::Display for RegistryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static metadata describing how a parameter's value occupies register cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    id: String,
    registry_type: RegistryType,
    registry_count: u16,
}

impl ParameterDescriptor {
    /// Create a descriptor, rejecting a zero cell count
    pub fn new(id: impl Into<String>, registry_type: RegistryType, registry_count: u16) -> Result<Self> {
        let id = id.into();
        if registry_count == 0 {
            return Err(ConverterError::config_parse(format!(
                "parameter {id:?}: registryCount must be at least 1"
            )));
        }

        Ok(Self {
            id,
            registry_type,
            registry_count,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn registry_type(&self) -> RegistryType {
        self.registry_type
    }

    pub fn registry_count(&self) -> u16 {
        self.registry_count
    }

    /// Length of the encoded payload for this parameter
    pub fn payload_len(&self) -> usize {
        self.registry_type.payload_len(self.registry_count)
    }
}
