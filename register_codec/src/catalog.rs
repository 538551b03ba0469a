/*!
Parameter catalog.

Identifier-keyed lookups over the protocol configuration, built once at
startup and read-only afterwards. Share it between callers behind an `Arc`.
*/

use crate::error::{ConverterError, Result};
use crate::model::{Device, Model, Feature, Param, Protocol};
use crate::registry::ParameterDescriptor;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Read-only lookups for models, devices, features and command parameters
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    models: HashMap<String, Model>,
    devices: HashMap<String, Device>,
    features: HashMap<String, Feature>,
    input_params: HashMap<String, ParameterDescriptor>,
    output_params: HashMap<String, ParameterDescriptor>,
}

impl Catalog {
    /// Load the catalog from a YAML protocol configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConverterError::config_read(path, e))?;

        info!(path = %path.display(), "loading protocol configuration");
        Self::from_yaml_str(&content)
    }

    /// Build the catalog from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let protocol: Protocol = serde_yaml::from_str(content)?;
        Self::from_protocol(protocol)
    }

    /// Build the catalog from a parsed document. Later duplicates replace earlier ones.
    pub fn from_protocol(protocol: Protocol) -> Result<Self> {
        let mut catalog = Self::default();

        for device in protocol.devices {
            debug!(device_id = %device.device_id, "registered device");
            if let Some(old) = catalog.devices.insert(device.device_id.clone(), device) {
                warn!(device_id = %old.device_id, "duplicate device id, keeping last");
            }
        }

        for model in protocol.models {
            for feature in &model.features {
                debug!(feature_id = %feature.id, kind = %feature.kind, "registered feature");
                if feature.is_command() {
                    for param in &feature.input_params {
                        debug!(param_id = %param.id, "registered input param");
                        insert_param(&mut catalog.input_params, param, "input")?;
                    }
                    for param in &feature.output_params {
                        debug!(param_id = %param.id, "registered output param");
                        insert_param(&mut catalog.output_params, param, "output")?;
                    }
                }
                if catalog.features.insert(feature.id.clone(), feature.clone()).is_some() {
                    warn!(feature_id = %feature.id, "duplicate feature id, keeping last");
                }
            }

            debug!(model_id = %model.model_id, "registered model");
            let model_id = model.model_id.clone();
            if catalog.models.insert(model_id.clone(), model).is_some() {
                warn!(model_id = %model_id, "duplicate model id, keeping last");
            }
        }

        info!(
            devices = catalog.devices.len(),
            models = catalog.models.len(),
            features = catalog.features.len(),
            input_params = catalog.input_params.len(),
            output_params = catalog.output_params.len(),
            "catalog built"
        );

        Ok(catalog)
    }

    pub fn model(&self, id: &str) -> Option<&Model> {
        self.models.get(id)
    }

    pub fn device(&self, id: &str) -> Option<&Device> {
        self.devices.get(id)
    }

    pub fn feature(&self, id: &str) -> Option<&Feature> {
        self.features.get(id)
    }

    pub fn input_param(&self, id: &str) -> Option<&ParameterDescriptor> {
        self.input_params.get(id)
    }

    pub fn output_param(&self, id: &str) -> Option<&ParameterDescriptor> {
        self.output_params.get(id)
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    /// Number of distinct input and output parameters
    pub fn parameter_count(&self) -> usize {
        self.input_params.len() + self.output_params.len()
    }
}

fn insert_param(
    params: &mut HashMap<String, ParameterDescriptor>,
    param: &Param,
    side: &str,
) -> Result<()> {
    let descriptor = ParameterDescriptor::new(param.id.clone(), param.registry_type, param.registry_count)?;
    if params.insert(param.id.clone(), descriptor).is_some() {
        warn!(param_id = %param.id, side, "duplicate param id, keeping last");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistryType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
devices:
  - deviceId: hum-001
    modelId: humidity-v1
  - deviceId: hum-002
models:
  - modelId: humidity-v1
    features:
      - id: humidity
        type: property
        inputParams:
          - id: ignored
            registryType: coil
            registryCount: 1
      - id: set-threshold
        type: command
        inputParams:
          - id: threshold
            registryType: holding registry
            registryCount: 2
          - id: alarm
            registryType: coil
            registryCount: 3
        outputParams:
          - id: result
            registryType: input registry
            registryCount: 1
"#;

    #[test]
    fn test_build_from_yaml() {
        let catalog = Catalog::from_yaml_str(SAMPLE).unwrap();

        assert_eq!(catalog.device_count(), 2);
        assert_eq!(catalog.model_count(), 1);
        assert_eq!(catalog.feature_count(), 2);
        assert_eq!(catalog.parameter_count(), 3);

        let threshold = catalog.input_param("threshold").unwrap();
        assert_eq!(threshold.registry_type(), RegistryType::HoldingRegistry);
        assert_eq!(threshold.registry_count(), 2);

        assert_eq!(catalog.output_param("result").unwrap().id(), "result");
        assert!(catalog.input_param("result").is_none());
        assert_eq!(catalog.device("hum-001").unwrap().model_id.as_deref(), Some("humidity-v1"));
    }

    #[test]
    fn test_non_command_features_have_no_params() {
        let catalog = Catalog::from_yaml_str(SAMPLE).unwrap();
        assert!(catalog.feature("humidity").is_some());
        assert!(catalog.input_param("ignored").is_none());
        assert!(catalog.output_param("ignored").is_none());
    }

    #[test]
    fn test_duplicate_ids_last_write_wins() {
        let doc = r#"
models:
  - modelId: m1
    features:
      - id: f1
        type: command
        inputParams:
          - id: p1
            registryType: coil
            registryCount: 1
  - modelId: m2
    features:
      - id: f2
        type: command
        inputParams:
          - id: p1
            registryType: holding registry
            registryCount: 4
"#;
        let catalog = Catalog::from_yaml_str(doc).unwrap();
        let p1 = catalog.input_param("p1").unwrap();
        assert_eq!(p1.registry_type(), RegistryType::HoldingRegistry);
        assert_eq!(p1.registry_count(), 4);
    }

    #[test]
    fn test_malformed_document() {
        let result = Catalog::from_yaml_str("models: [ {modelId: m1, features: 7 }");
        assert!(matches!(result, Err(ConverterError::ConfigParse(_))));
    }

    #[test]
    fn test_registry_type_names_ignore_case() {
        let doc = r#"
models:
  - modelId: m1
    features:
      - id: f1
        type: command
        inputParams:
          - id: p1
            registryType: Holding Registry
            registryCount: 1
          - id: p2
            registryType: " COIL "
            registryCount: 1
"#;
        let catalog = Catalog::from_yaml_str(doc).unwrap();
        assert_eq!(catalog.input_param("p1").unwrap().registry_type(), RegistryType::HoldingRegistry);
        assert_eq!(catalog.input_param("p2").unwrap().registry_type(), RegistryType::Coil);
    }

    #[test]
    fn test_unknown_registry_type() {
        let doc = r#"
models:
  - modelId: m1
    features:
      - id: f1
        type: command
        inputParams:
          - id: p1
            registryType: analog output
            registryCount: 1
"#;
        assert!(matches!(Catalog::from_yaml_str(doc), Err(ConverterError::ConfigParse(_))));
    }

    #[test]
    fn test_zero_registry_count() {
        let doc = r#"
models:
  - modelId: m1
    features:
      - id: f1
        type: command
        outputParams:
          - id: p1
            registryType: coil
            registryCount: 0
"#;
        assert!(matches!(Catalog::from_yaml_str(doc), Err(ConverterError::ConfigParse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(SAMPLE.as_bytes()).unwrap();

        let catalog = Catalog::load(temp_file.path()).unwrap();
        assert!(catalog.input_param("alarm").is_some());
    }

    #[test]
    fn test_load_malformed_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"devices:\n  - deviceId: [unclosed\n").unwrap();

        let result = Catalog::load(temp_file.path());
        assert!(matches!(result, Err(ConverterError::ConfigParse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Catalog::load(dir.path().join("missing.yaml"));
        assert!(matches!(result, Err(ConverterError::ConfigRead { .. })));
    }
}
