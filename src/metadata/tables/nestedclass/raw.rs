use crate::metadata::token::Token;

/// A raw `NestedClass` row (table 0x29, ECMA-335 II.22.32).
///
/// Heap and table indexes are kept as stored; the loader resolves them.
///
/// Maps a nested type to the type that declares it; full names are built from this chain.
#[derive(Clone, Debug)]
pub struct NestedClassRaw {
    /// Row id
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Nested `TypeDef` row
    pub nested_class: u32,
    /// Enclosing `TypeDef` row
    pub enclosing_class: u32,
}
