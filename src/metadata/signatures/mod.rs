//! Signature blob parsing (ECMA-335 II.23.2).
//!
//! Only the signature kinds that describe declarations are supported: fields, methods,
//! properties and the standalone types behind `TypeSpec` rows.
//!
//! ```rust
//! use dotscribe::metadata::signatures::{parse_method_signature, TypeSignature};
//!
//! // instance string M(int32)
//! let sig = parse_method_signature(&[0x20, 0x01, 0x0E, 0x08])?;
//! assert!(sig.has_this);
//! assert_eq!(sig.return_type.base, TypeSignature::String);
//! assert_eq!(sig.params[0].base, TypeSignature::I4);
//! # Ok::<(), dotscribe::Error>(())
//! ```

mod parser;
mod types;

pub use parser::SignatureParser;
pub use types::*;

use crate::Result;

/// Parses a `MethodDefSig` blob.
///
/// # Errors
/// Returns an error if the blob is malformed or truncated.
pub fn parse_method_signature(data: &[u8]) -> Result<SignatureMethod> {
    SignatureParser::new(data).parse_method_signature()
}

/// Parses a `FieldSig` blob.
///
/// # Errors
/// Returns an error if the blob does not start with `FIELD` or is truncated.
pub fn parse_field_signature(data: &[u8]) -> Result<SignatureField> {
    SignatureParser::new(data).parse_field_signature()
}

/// Parses a `PropertySig` blob.
///
/// # Errors
/// Returns an error if the blob does not start with `PROPERTY` or is truncated.
pub fn parse_property_signature(data: &[u8]) -> Result<SignatureProperty> {
    SignatureParser::new(data).parse_property_signature()
}

/// Parses a `TypeSpec` blob.
///
/// # Errors
/// Returns an error if the blob is malformed or truncated.
pub fn parse_type_spec_signature(data: &[u8]) -> Result<TypeSignature> {
    SignatureParser::new(data).parse_type_spec_signature()
}
