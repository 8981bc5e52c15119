//! Typed readers for the metadata tables the type model is built from (ECMA-335 II.22).
//!
//! Every table lives in its own module with a `*Raw` row struct that mirrors the physical
//! layout, heap and table indexes left unresolved. Resolution into names and signatures
//! happens in [`crate::metadata::loader`].

mod types;

mod event;
mod eventmap;
mod field;
mod genericparam;
mod interfaceimpl;
mod methoddef;
mod methodsemantics;
mod module;
mod nestedclass;
mod param;
mod property;
mod propertymap;
mod typedef;
mod typeref;
mod typespec;

pub use event::*;
pub use eventmap::*;
pub use field::*;
pub use genericparam::*;
pub use interfaceimpl::*;
pub use methoddef::*;
pub use methodsemantics::*;
pub use module::*;
pub use nestedclass::*;
pub use param::*;
pub use property::*;
pub use propertymap::*;
pub use typedef::*;
pub use typeref::*;
pub use typespec::*;
pub use types::*;
