/*!
Declarative protocol configuration document.

The document lists the devices served by this converter and the device models
they implement. Each model groups features; `command` features carry ordered
input and output parameters.
*/

use crate::protocol::COMMAND_FEATURE_TYPE;
use crate::registry::RegistryType;
use serde::{Deserialize, Serialize};

/// Root of the protocol configuration document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Protocol {
    #[serde(default)]
    pub devices: Vec<Device>,
    #[serde(default)]
    pub models: Vec<Model>,
}

/// A concrete device instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub device_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
}

/// A device model and its features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub model_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// A model feature (property, event or command)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub input_params: Vec<Param>,
    #[serde(default)]
    pub output_params: Vec<Param>,
}

impl Feature {
    /// Only command features contribute parameters to the catalog
    pub fn is_command(&self) -> bool {
        self.kind == COMMAND_FEATURE_TYPE
    }
}

/// A command parameter as written in configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Param {
    pub id: String,
    pub registry_type: RegistryType,
    #[serde(alias = "registryNum")]
    pub registry_count: u16,
}
