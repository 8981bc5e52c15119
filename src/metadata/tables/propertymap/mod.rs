//! The `PropertyMap` table (0x15): the run of `Property` rows owned by a type.

mod raw;
mod reader;

pub use raw::*;
