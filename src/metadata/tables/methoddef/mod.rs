//! The `MethodDef` table (0x06).

mod raw;
mod reader;

pub use raw::*;
