use crate::metadata::token::Token;

/// A raw `MethodDef` row (table 0x06, ECMA-335 II.22.26).
///
/// Heap and table indexes are kept as stored; the loader resolves them.
///
/// Methods are owned in runs starting at `TypeDef.MethodList`, and own their `Param` rows
/// the same way.
#[derive(Clone, Debug)]
pub struct MethodDefRaw {
    /// Row id
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// RVA of the method body, zero for abstract or extern methods
    pub rva: u32,
    /// `MethodImplAttributes` bit mask
    pub impl_flags: u32,
    /// `MethodAttributes` bit mask
    pub flags: u32,
    /// `#Strings` index of the method name
    pub name: u32,
    /// `#Blob` index of the method signature
    pub signature: u32,
    /// First owned `Param` row
    pub param_list: u32,
}
