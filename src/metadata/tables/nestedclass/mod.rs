//! The `NestedClass` table (0x29): pairs of nested and enclosing `TypeDef` rows.

mod raw;
mod reader;

pub use raw::*;
