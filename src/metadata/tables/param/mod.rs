//! The `Param` table (0x08): names and flags of method parameters.
//!
//! Sequence 0 describes the return value; sequence `n` describes the `n`th declared
//! parameter. Parameters without metadata (no name, no flags) may have no row at all.

mod raw;
mod reader;

pub use raw::*;

#[allow(non_snake_case)]
/// `Param.Flags` constants (ECMA-335 II.23.1.13).
pub mod ParamAttributes {
    /// Parameter is `[In]`
    pub const IN: u32 = 0x0001;
    /// Parameter is `[Out]`
    pub const OUT: u32 = 0x0002;
    /// Parameter is optional
    pub const OPTIONAL: u32 = 0x0010;
    /// Parameter has a default value
    pub const HAS_DEFAULT: u32 = 0x1000;
}
