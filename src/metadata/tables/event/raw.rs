use crate::metadata::{tables::CodedIndex, token::Token};

/// A raw `Event` row (table 0x14, ECMA-335 II.22.13).
///
/// Heap and table indexes are kept as stored; the loader resolves them.
///
/// Events are listed in runs owned by `EventMap` rows. The add and remove accessors are
/// linked through `MethodSemantics`, not through this row.
#[derive(Clone, Debug)]
pub struct EventRaw {
    /// Row id
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// `EventAttributes` bit mask
    pub flags: u32,
    /// `#Strings` index of the event name
    pub name: u32,
    /// `TypeDefOrRef` coded index of the delegate type
    pub event_type: CodedIndex,
}
