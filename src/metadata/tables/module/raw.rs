use crate::metadata::token::Token;

/// A raw `Module` row (table 0x00, ECMA-335 II.22.30).
///
/// Heap and table indexes are kept as stored; the loader resolves them.
///
/// A valid image has exactly one row. Only its name is used.
#[derive(Clone, Debug)]
pub struct ModuleRaw {
    /// Row id
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Reserved, zero
    pub generation: u32,
    /// `#Strings` index of the module file name, e.g. `Assembly-CSharp.dll`
    pub name: u32,
    /// `#GUID` index of the module version id
    pub mvid: u32,
    /// `#GUID` index, reserved
    pub encid: u32,
    /// `#GUID` index, reserved
    pub encbaseid: u32,
}
