use crate::metadata::token::Token;

/// A raw `Field` row (table 0x04, ECMA-335 II.22.15).
///
/// Heap and table indexes are kept as stored; the loader resolves them.
///
/// Fields are owned in runs starting at `TypeDef.FieldList`. The signature blob holds the
/// declared type.
#[derive(Clone, Debug)]
pub struct FieldRaw {
    /// Row id
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// `FieldAttributes` bit mask
    pub flags: u32,
    /// `#Strings` index of the field name
    pub name: u32,
    /// `#Blob` index of the field signature
    pub signature: u32,
}
