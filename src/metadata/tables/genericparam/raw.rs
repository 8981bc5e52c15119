use crate::metadata::{tables::CodedIndex, token::Token};

/// A raw `GenericParam` row (table 0x2A, ECMA-335 II.22.20).
///
/// Heap and table indexes are kept as stored; the loader resolves them.
///
/// Rows are keyed by owner, so the loader groups them into name lists per type or method
/// token.
#[derive(Clone, Debug)]
pub struct GenericParamRaw {
    /// Row id
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// 0-based position in the owner's parameter list
    pub number: u32,
    /// `GenericParamAttributes` bit mask
    pub flags: u32,
    /// `TypeOrMethodDef` coded index of the declaring type or method
    pub owner: CodedIndex,
    /// `#Strings` index of the parameter name
    pub name: u32,
}
