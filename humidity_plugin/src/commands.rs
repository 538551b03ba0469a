/*!
Command handlers for the plugin command line.
*/

use std::collections::BTreeMap;
use anyhow::{Context, Result};
use register_codec::{Converter, DeviceConverter};
use serde::Serialize;
use tracing::{info, warn};

/// Decoded reply as printed on stdout
#[derive(Debug, Serialize)]
struct DecodeOutput {
    topic: String,
    value: String,
}

/// Parse an `ID=DIGITS` command-line value
pub fn parse_value_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((id, value)) if !id.is_empty() => Ok((id.to_string(), value.to_string())),
        _ => Err(format!("expected ID=DIGITS, got {s:?}")),
    }
}

/// Parse hex-encoded raw replies
fn parse_messages(messages: &[String]) -> Result<Vec<Vec<u8>>> {
    messages
        .iter()
        .map(|m| hex::decode(m.trim()).with_context(|| format!("Invalid hex message {m:?}")))
        .collect()
}

pub fn check(converter: &Converter) -> Result<()> {
    let catalog = converter.catalog();
    println!("register_codec {}", register_codec::VERSION);
    println!("devices:    {}", catalog.device_count());
    println!("models:     {}", catalog.model_count());
    println!("features:   {}", catalog.feature_count());
    println!("parameters: {}", catalog.parameter_count());
    Ok(())
}

pub fn encode(
    converter: &Converter,
    device: &str,
    model: &str,
    feature: &str,
    values: Vec<(String, String)>,
) -> Result<()> {
    let values: BTreeMap<String, String> = values.into_iter().collect();
    let conversion = converter
        .convert_issue_message_to_device(device, model, feature, &values)
        .with_context(|| format!("Failed to convert issue for feature {feature}"))?;

    info!(device, feature, messages = conversion.input_messages.len(), "issue converted");
    for message in &conversion.input_messages {
        println!("{}", hex::encode(message));
    }
    Ok(())
}

pub fn decode(converter: &Converter, messages: &[String], feature_type: &str) -> Result<()> {
    let raw = parse_messages(messages)?;
    let message = converter
        .convert_device_messages_to_mq_format(&raw, feature_type)
        .context("Failed to convert device reply")?;

    let output = DecodeOutput {
        topic: message.topic,
        value: String::from_utf8(message.payload).context("Decoded payload is not UTF-8")?,
    };
    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

pub fn report(converter: &Converter, model: &str, feature: &str) -> Result<()> {
    match converter.convert_report_message_to_devices(model, feature) {
        Ok(requests) => {
            for request in requests {
                println!("{request}");
            }
            Ok(())
        }
        Err(e) => {
            warn!(model, feature, "report conversion unavailable: {}", e);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_pair() {
        assert_eq!(
            parse_value_pair("threshold=0102").unwrap(),
            ("threshold".to_string(), "0102".to_string())
        );
        assert_eq!(parse_value_pair("p=").unwrap(), ("p".to_string(), String::new()));
        assert!(parse_value_pair("0102").is_err());
        assert!(parse_value_pair("=0102").is_err());
    }

    fn sample_converter() -> Converter {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/protocol.yaml");
        let catalog = register_codec::Catalog::load(path).unwrap();
        Converter::new(std::sync::Arc::new(catalog))
    }

    #[test]
    fn test_sample_configuration() {
        let converter = sample_converter();
        assert!(check(&converter).is_ok());
        assert_eq!(converter.catalog().parameter_count(), 3);

        let values = vec![("alarm".to_string(), "050607".to_string())];
        assert!(encode(&converter, "hum-001", "humidity-v1", "set-alarm", values).is_ok());
        assert!(decode(&converter, &["07".to_string()], "command").is_ok());
        assert!(report(&converter, "humidity-v1", "humidity").is_err());
    }

    #[test]
    fn test_parse_messages() {
        let raw = parse_messages(&["07".to_string(), "0a0b".to_string()]).unwrap();
        assert_eq!(raw, vec![vec![0x07], vec![0x0a, 0x0b]]);
        assert!(parse_messages(&["zz".to_string()]).is_err());
    }
}
