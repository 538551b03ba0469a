/*!
# Register Codec

Parameter catalog and register field codec for the humidity device converter
plugin. Translates a device model's parameter values (decimal-digit strings)
into fixed-width register payloads, and device replies back into reportable
values.

## Core Types

- [`RegistryType`] - Register cell kind (holding registry, coil, ...)
- [`ParameterDescriptor`] - How one parameter occupies register cells
- [`Catalog`] - Read-only identifier lookups built from configuration
- [`RegisterCodec`] - Value to register packing and reply decoding
- [`Converter`] - Plugin boundary operations over a shared catalog

## Modules

- [`registry`] - Registry types and parameter descriptors
- [`model`] - Declarative protocol configuration document
- [`catalog`] - Catalog construction and lookups
- [`codec`] - Encode/decode algorithms
- [`converter`] - Plugin-facing converter capability
- [`error`] - Common error types
*/

pub mod registry;
pub mod model;
pub mod catalog;
pub mod codec;
pub mod converter;
pub mod error;

// Re-export commonly used types
pub use registry::{RegistryType, ParameterDescriptor};
pub use model::{Protocol, Device, Model, Feature, Param};
pub use catalog::Catalog;
pub use codec::{RegisterCodec, DigitGroupEncoding, Decoded};
pub use converter::{Converter, DeviceConverter, IssueConversion, MqMessage};
pub use error::{ConverterError, Result};

/// Version information for the codec library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Protocol constants
pub mod protocol {
    /// Size of a holding/input registry cell in bytes
    pub const REGISTRY_CELL_BYTES: usize = 2;

    /// Size of a coil/discrete input cell in bytes
    pub const COIL_CELL_BYTES: usize = 1;

    /// Decimal digits consumed per encoded byte
    pub const DIGITS_PER_BYTE: usize = 2;

    /// Bytes interpreted by the reply decoder
    pub const DECODED_FIELD_BYTES: usize = 2;

    /// Feature type tag that carries input/output parameters
    pub const COMMAND_FEATURE_TYPE: &str = "command";
}
