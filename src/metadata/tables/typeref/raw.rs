use crate::metadata::{tables::CodedIndex, token::Token};

/// A raw `TypeRef` row (table 0x01, ECMA-335 II.22.38).
///
/// Heap and table indexes are kept as stored; the loader resolves them.
///
/// Only names are resolved from references; the defining assembly is never opened.
#[derive(Clone, Debug)]
pub struct TypeRefRaw {
    /// Row id
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// `ResolutionScope` coded index; a `TypeRef` scope marks a nested type reference
    pub resolution_scope: CodedIndex,
    /// `#Strings` index of the type name
    pub type_name: u32,
    /// `#Strings` index of the namespace
    pub type_namespace: u32,
}
