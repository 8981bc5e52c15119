//! The `TypeSpec` table (0x1B): constructed types (generic instances, arrays, ...)
//! described by a signature blob.

mod raw;
mod reader;

pub use raw::*;
