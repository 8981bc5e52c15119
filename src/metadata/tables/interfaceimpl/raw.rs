use crate::metadata::{tables::CodedIndex, token::Token};

/// A raw `InterfaceImpl` row (table 0x09, ECMA-335 II.22.23).
///
/// Heap and table indexes are kept as stored; the loader resolves them.
///
/// One row per implemented interface, in declaration order for each class.
#[derive(Clone, Debug)]
pub struct InterfaceImplRaw {
    /// Row id
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Implementing `TypeDef` row
    pub class: u32,
    /// `TypeDefOrRef` coded index of the implemented interface
    pub interface: CodedIndex,
}
