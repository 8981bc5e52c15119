use crate::metadata::token::Token;

/// A raw `Property` row (table 0x17, ECMA-335 II.22.34).
///
/// Heap and table indexes are kept as stored; the loader resolves them.
///
/// Properties are listed in runs owned by `PropertyMap` rows. Accessors come from
/// `MethodSemantics`.
#[derive(Clone, Debug)]
pub struct PropertyRaw {
    /// Row id
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// `PropertyAttributes` bit mask
    pub flags: u32,
    /// `#Strings` index of the property name
    pub name: u32,
    /// `#Blob` index of the property signature
    pub signature: u32,
}
