//! The `MethodSemantics` table (0x18): links accessor methods to their property or event.

mod raw;
mod reader;

pub use raw::*;

#[allow(non_snake_case)]
/// `MethodSemantics.Semantics` constants (ECMA-335 II.23.1.12).
pub mod MethodSemanticsAttributes {
    /// Property setter
    pub const SETTER: u32 = 0x0001;
    /// Property getter
    pub const GETTER: u32 = 0x0002;
    /// Other accessor
    pub const OTHER: u32 = 0x0004;
    /// Event add accessor
    pub const ADD_ON: u32 = 0x0008;
    /// Event remove accessor
    pub const REMOVE_ON: u32 = 0x0010;
    /// Event raise accessor
    pub const FIRE: u32 = 0x0020;
}
