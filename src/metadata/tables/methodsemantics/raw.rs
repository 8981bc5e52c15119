use crate::metadata::{tables::CodedIndex, token::Token};

/// A raw `MethodSemantics` row (table 0x18, ECMA-335 II.22.28).
///
/// Heap and table indexes are kept as stored; the loader resolves them.
///
/// Links property getters and setters, and event add and remove methods, to their owner.
#[derive(Clone, Debug)]
pub struct MethodSemanticsRaw {
    /// Row id
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// `MethodSemanticsAttributes` bit mask
    pub semantics: u32,
    /// Accessor `MethodDef` row
    pub method: u32,
    /// `HasSemantics` coded index of the owning event or property
    pub association: CodedIndex,
}
