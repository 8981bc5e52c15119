//! The `GenericParam` table (0x2A): generic parameters declared by types and methods.

mod raw;
mod reader;

pub use raw::*;
