use crate::metadata::{tables::CodedIndex, token::Token};

/// A raw `TypeDef` row (table 0x02, ECMA-335 II.22.37).
///
/// Heap and table indexes are kept as stored; the loader resolves them.
///
/// Every row becomes one model type. Member lists are resolved from the list columns
/// against the next row.
#[derive(Clone, Debug)]
pub struct TypeDefRaw {
    /// Row id
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// `TypeAttributes` bit mask
    pub flags: u32,
    /// `#Strings` index of the type name
    pub type_name: u32,
    /// `#Strings` index of the namespace
    pub type_namespace: u32,
    /// `TypeDefOrRef` coded index of the base type, null for interfaces and `System.Object`
    pub extends: CodedIndex,
    /// First owned `Field` row
    pub field_list: u32,
    /// First owned `MethodDef` row
    pub method_list: u32,
}
