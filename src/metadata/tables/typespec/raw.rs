use crate::metadata::token::Token;

/// A raw `TypeSpec` row (table 0x1B, ECMA-335 II.22.39).
///
/// Heap and table indexes are kept as stored; the loader resolves them.
///
/// Generic instances, arrays and other constructed types referenced from signatures and
/// `Extends` columns.
#[derive(Clone, Debug)]
pub struct TypeSpecRaw {
    /// Row id
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// `#Blob` index of the type signature
    pub signature: u32,
}
