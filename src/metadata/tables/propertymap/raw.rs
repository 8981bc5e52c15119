use crate::metadata::token::Token;

/// A raw `PropertyMap` row (table 0x15, ECMA-335 II.22.35).
///
/// Heap and table indexes are kept as stored; the loader resolves them.
///
/// Each row opens the run of `Property` rows owned by one type; the run ends where the next
/// row's list begins.
#[derive(Clone, Debug)]
pub struct PropertyMapRaw {
    /// Row id
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Owning `TypeDef` row
    pub parent: u32,
    /// First owned `Property` row
    pub property_list: u32,
}
