//! ECMA-335 metadata reading for .NET PE files.
//!
//! Only the structures needed to describe the types of a module are read: the CLR header,
//! the metadata root with its stream headers, the `#Strings` and `#Blob` heaps, the
//! compressed `#~` tables stream and the signatures of fields, methods and properties.
//!
//! # Key Components
//!
//! - [`cor20header`] - The CLR runtime header locating the metadata root
//! - [`root`] - The `BSJB` metadata root and its stream directory
//! - [`streams`] - Heap readers and the tables stream header
//! - [`tables`] - Typed row readers for the tables the type model is built from
//! - [`signatures`] - Field, method, property and type specification signatures
//! - [`token`] - Metadata table row references
//! - [`typesystem`] - The read-only [`typesystem::CilModule`] handed to the synthesizers
//!
//! # Examples
//!
//! ```rust,no_run
//! use dotscribe::metadata::typesystem::CilModule;
//! use std::path::Path;
//!
//! let module = CilModule::from_file(Path::new("Assembly-CSharp.dll"))?;
//! println!("Module: {}", module.name);
//! println!("Types: {}", module.types.len());
//! # Ok::<(), dotscribe::Error>(())
//! ```

/// The CLR runtime header
pub mod cor20header;
/// Construction of the type model from the metadata tables
pub(crate) mod loader;
/// The metadata root and stream directory
pub mod root;
/// Signature blob parsing
pub mod signatures;
/// Metadata streams and heaps
pub mod streams;
/// Metadata table row readers
pub mod tables;
/// Metadata tokens
pub mod token;
/// The type model consumed by the synthesizers
pub mod typesystem;
