use crate::metadata::token::Token;

/// A raw `EventMap` row (table 0x12, ECMA-335 II.22.12).
///
/// Heap and table indexes are kept as stored; the loader resolves them.
///
/// Each row opens the run of `Event` rows owned by one type; the run ends where the next
/// row's list begins.
#[derive(Clone, Debug)]
pub struct EventMapRaw {
    /// Row id
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Owning `TypeDef` row
    pub parent: u32,
    /// First owned `Event` row
    pub event_list: u32,
}
