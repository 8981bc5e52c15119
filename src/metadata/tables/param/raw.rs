use crate::metadata::token::Token;

/// A raw `Param` row (table 0x08, ECMA-335 II.22.33).
///
/// Heap and table indexes are kept as stored; the loader resolves them.
///
/// Sequence 0 describes the return value; 1 and up follow the signature's parameter order.
#[derive(Clone, Debug)]
pub struct ParamRaw {
    /// Row id
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// `ParamAttributes` bit mask
    pub flags: u32,
    /// 0 for the return value, otherwise the 1-based parameter position
    pub sequence: u32,
    /// `#Strings` index of the parameter name
    pub name: u32,
}
