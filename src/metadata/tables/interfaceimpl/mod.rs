//! The `InterfaceImpl` table (0x09): interfaces implemented by each type.

mod raw;
mod reader;

pub use raw::*;
