//! The `TypeDef` table (0x02): every type defined in the module.
//!
//! Fields and methods of a type are not listed in the row itself. Each row stores the
//! first `Field` and `MethodDef` row it owns, and the run ends where the next `TypeDef`
//! row's list begins (or at the end of the target table for the last row).

mod raw;
mod reader;

pub use raw::*;

#[allow(non_snake_case)]
/// `TypeDef.Flags` constants (ECMA-335 II.23.1.15).
pub mod TypeAttributes {
    /// Mask for the visibility bits
    pub const VISIBILITY_MASK: u32 = 0x0000_0007;
    /// Top-level type not visible outside the assembly
    pub const NOT_PUBLIC: u32 = 0x0000_0000;
    /// Top-level public type
    pub const PUBLIC: u32 = 0x0000_0001;
    /// Nested public type
    pub const NESTED_PUBLIC: u32 = 0x0000_0002;
    /// Nested private type
    pub const NESTED_PRIVATE: u32 = 0x0000_0003;
    /// Nested protected type
    pub const NESTED_FAMILY: u32 = 0x0000_0004;
    /// Nested internal type
    pub const NESTED_ASSEMBLY: u32 = 0x0000_0005;
    /// Nested `private protected` type
    pub const NESTED_FAM_AND_ASSEM: u32 = 0x0000_0006;
    /// Nested `protected internal` type
    pub const NESTED_FAM_OR_ASSEM: u32 = 0x0000_0007;
    /// Mask for class semantics
    pub const CLASS_SEMANTICS_MASK: u32 = 0x0000_0020;
    /// Type is a class
    pub const CLASS: u32 = 0x0000_0000;
    /// Type is an interface
    pub const INTERFACE: u32 = 0x0000_0020;
    /// Type is abstract
    pub const ABSTRACT: u32 = 0x0000_0080;
    /// Type cannot be derived from
    pub const SEALED: u32 = 0x0000_0100;
    /// Name is special
    pub const SPECIAL_NAME: u32 = 0x0000_0400;
}
