/*!
Plugin-facing converter capability.

The host platform drives a converter through three operations: building
report requests for every device of a model, turning a command issue into
device payloads, and turning device replies into message-queue payloads.
*/

use crate::catalog::Catalog;
use crate::codec::RegisterCodec;
use crate::error::{ConverterError, Result};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Device payloads produced for a command issue
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueConversion {
    /// Device issue payloads, one per command input param
    pub input_messages: Vec<Vec<u8>>,
    /// Device report payloads, one per command output param
    pub output_messages: Vec<Vec<u8>>,
    /// Topic the input messages are issued on
    pub issue_topic: String,
    /// Topic the device answers on
    pub issue_response_topic: String,
}

/// A device reply converted for the message queue
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MqMessage {
    pub topic: String,
    pub payload: Vec<u8>,
}

/// Operations a device converter exposes to the host platform
pub trait DeviceConverter: Send + Sync {
    /// Build data report requests for each device of a model
    fn convert_report_message_to_devices(&self, model_id: &str, feature_id: &str) -> Result<Vec<String>>;

    /// Convert a command issue into device payloads
    fn convert_issue_message_to_device(
        &self,
        device_id: &str,
        model_id: &str,
        feature_id: &str,
        values: &BTreeMap<String, String>,
    ) -> Result<IssueConversion>;

    /// Convert device command responses into the message-queue format
    fn convert_device_messages_to_mq_format(&self, messages: &[Vec<u8>], feature_type: &str) -> Result<MqMessage>;
}

/// Register converter backed by a shared read-only catalog
#[derive(Debug, Clone)]
pub struct Converter {
    catalog: Arc<Catalog>,
}

impl Converter {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl DeviceConverter for Converter {
    fn convert_report_message_to_devices(&self, model_id: &str, feature_id: &str) -> Result<Vec<String>> {
        debug!(model_id, feature_id, "report conversion requested");
        Err(ConverterError::NotImplemented("report message conversion"))
    }

    fn convert_issue_message_to_device(
        &self,
        device_id: &str,
        model_id: &str,
        feature_id: &str,
        values: &BTreeMap<String, String>,
    ) -> Result<IssueConversion> {
        if self.catalog.device(device_id).is_none() {
            debug!(device_id, "device not in catalog");
        }
        if self.catalog.model(model_id).is_none() {
            debug!(model_id, "model not in catalog");
        }
        if self.catalog.feature(feature_id).is_none() {
            debug!(feature_id, "feature not in catalog");
        }

        let input_messages = RegisterCodec::encode_values(&self.catalog, values)?;
        debug!(device_id, feature_id, messages = input_messages.len(), "issue converted");

        Ok(IssueConversion {
            input_messages,
            ..IssueConversion::default()
        })
    }

    fn convert_device_messages_to_mq_format(&self, messages: &[Vec<u8>], feature_type: &str) -> Result<MqMessage> {
        let decoded = RegisterCodec::decode(messages)?;
        debug!(feature_type, value = %decoded.value, "device reply converted");

        Ok(MqMessage {
            topic: String::new(),
            payload: decoded.value.into_bytes(),
        })
    }
}
