//! The `Module` table (0x00): the single row naming the module of this image.

mod raw;
mod reader;

pub use raw::*;
