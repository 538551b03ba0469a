/*!
Register field encoding and reply decoding.

Values travel to the device as consecutive two-digit decimal groups, one
group per payload byte (see [`DigitGroupEncoding`]). Replies are read back as
a single big-endian 16-bit field and reported in hexadecimal. The two
directions are not inverses of each other.
*/

use crate::catalog::Catalog;
use crate::error::{ConverterError, Result};
use crate::protocol::{DECODED_FIELD_BYTES, DIGITS_PER_BYTE};
use crate::registry::{ParameterDescriptor, RegistryType};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Fixed-point wire convention: every payload byte is written as two decimal digits.
///
/// `"0102"` packs to `[1, 2]`. Groups past the end of the target buffer are
/// dropped, bytes with no group left stay zero, and a dangling odd digit is
/// never read. Each group is stored as the low 8 bits of its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitGroupEncoding<'a> {
    digits: &'a str,
}

impl<'a> DigitGroupEncoding<'a> {
    pub fn new(digits: &'a str) -> Self {
        Self { digits }
    }

    /// Number of complete two-digit groups in the value
    pub fn group_count(&self) -> usize {
        self.digits.len() / DIGITS_PER_BYTE
    }

    /// Parse group `index`, or `None` when the value has no complete group there
    pub fn group(&self, index: usize) -> Option<Result<u8>> {
        let offset = index * DIGITS_PER_BYTE;
        let slice = self.digits.as_bytes().get(offset..offset + DIGITS_PER_BYTE)?;

        Some(parse_group(slice).ok_or_else(|| ConverterError::malformed_value(self.digits, offset, slice)))
    }

    /// Pack the value into a zeroed buffer of `len` bytes
    pub fn pack(&self, len: usize) -> Result<Vec<u8>> {
        let mut bytes = vec![0u8; len];
        let groups = self.group_count().min(len);
        for (i, byte) in bytes.iter_mut().take(groups).enumerate() {
            if let Some(group) = self.group(i) {
                *byte = group?;
            }
        }
        Ok(bytes)
    }
}

/// Decimal digits only; signs and whitespace are rejected.
fn parse_group(slice: &[u8]) -> Option<u8> {
    if !slice.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let value = std::str::from_utf8(slice).ok()?.parse::<u16>().ok()?;
    Some((value & 0xFF) as u8)
}

/// A decoded device reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Hexadecimal rendering of the 16-bit field, no prefix or padding
    pub value: String,
    /// The two bytes the field was read from, after padding
    pub consumed: Vec<u8>,
}

/// Stateless register encoder/decoder
pub struct RegisterCodec;

impl RegisterCodec {
    /// Encode one value into the payload for `descriptor`.
    ///
    /// The payload is always `descriptor.payload_len()` bytes long.
    pub fn encode(descriptor: &ParameterDescriptor, value: &str) -> Result<Vec<u8>> {
        match descriptor.registry_type() {
            RegistryType::HoldingRegistry | RegistryType::Coil => {
                let payload = DigitGroupEncoding::new(value).pack(descriptor.payload_len())?;
                trace!(
                    param_id = descriptor.id(),
                    registry_type = %descriptor.registry_type(),
                    payload_len = payload.len(),
                    "encoded value"
                );
                Ok(payload)
            }
            RegistryType::DiscreteInput | RegistryType::InputRegistry => {
                debug!(
                    param_id = descriptor.id(),
                    registry_type = %descriptor.registry_type(),
                    "registry type is read-only"
                );
                Err(ConverterError::NoEncodableValue)
            }
        }
    }

    /// Encode the first value whose parameter resolves to a writable descriptor.
    ///
    /// Values are visited in key order and at most one payload is produced.
    pub fn encode_values(catalog: &Catalog, values: &BTreeMap<String, String>) -> Result<Vec<Vec<u8>>> {
        for (param_id, value) in values {
            let Some(descriptor) = catalog.input_param(param_id) else {
                debug!(param_id = %param_id, "no input param for value");
                continue;
            };
            if !descriptor.registry_type().is_writable() {
                debug!(param_id = %param_id, registry_type = %descriptor.registry_type(), "skipping read-only param");
                continue;
            }
            return Ok(vec![Self::encode(descriptor, value)?]);
        }

        Err(ConverterError::NoEncodableValue)
    }

    /// Decode the first raw message as a big-endian 16-bit field.
    ///
    /// A single byte (coil reply) is widened with a trailing zero byte.
    pub fn decode<M: AsRef<[u8]>>(messages: &[M]) -> Result<Decoded> {
        let first: &[u8] = messages.first().map(|m| m.as_ref()).unwrap_or_default();
        if first.is_empty() {
            return Err(ConverterError::NoMessage);
        }

        let mut field = [0u8; DECODED_FIELD_BYTES];
        let n = first.len().min(DECODED_FIELD_BYTES);
        field[..n].copy_from_slice(&first[..n]);

        let value = format!("{:x}", u16::from_be_bytes(field));
        trace!(raw_len = first.len(), value = %value, "decoded reply");

        Ok(Decoded {
            value,
            consumed: field.to_vec(),
        })
    }
}
