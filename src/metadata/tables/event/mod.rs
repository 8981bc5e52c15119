//! The `Event` table (0x14).

mod raw;
mod reader;

pub use raw::*;
