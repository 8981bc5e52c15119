//! The `Field` table (0x04).

mod raw;
mod reader;

pub use raw::*;

#[allow(non_snake_case)]
/// `Field.Flags` constants (ECMA-335 II.23.1.5).
pub mod FieldAttributes {
    /// Mask for the accessibility bits
    pub const FIELD_ACCESS_MASK: u32 = 0x0007;
    /// Member not referenceable
    pub const COMPILER_CONTROLLED: u32 = 0x0000;
    /// Accessible only by the parent type
    pub const PRIVATE: u32 = 0x0001;
    /// Accessible by sub-types only in this assembly
    pub const FAM_AND_ASSEM: u32 = 0x0002;
    /// Accessible by anyone in the assembly
    pub const ASSEMBLY: u32 = 0x0003;
    /// Accessible only by type and sub-types
    pub const FAMILY: u32 = 0x0004;
    /// Accessible by sub-types anywhere, plus anyone in the assembly
    pub const FAM_OR_ASSEM: u32 = 0x0005;
    /// Accessible by anyone
    pub const PUBLIC: u32 = 0x0006;
    /// Defined on type, else per instance
    pub const STATIC: u32 = 0x0010;
    /// Field can only be initialized, not written to after init
    pub const INIT_ONLY: u32 = 0x0020;
    /// Value is a compile time constant
    pub const LITERAL: u32 = 0x0040;
    /// Field is special
    pub const SPECIAL_NAME: u32 = 0x0200;
    /// Runtime provides special behavior based on the name
    pub const RTSPECIAL_NAME: u32 = 0x0400;
}
