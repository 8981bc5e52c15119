//! The `EventMap` table (0x12): the run of `Event` rows owned by a type.

mod raw;
mod reader;

pub use raw::*;
