// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(clippy::too_many_arguments)]
// - 'file/bytes.rs' maps input files with mmap

//! # dotscribe
//!
//! Turns the metadata of a .NET assembly into a deterministic, size-bounded text knowledge
//! base. For every input `X.dll` two artifacts are written:
//!
//! - `X-knowledge-base-index.txt` - every included type with one-line member signatures,
//!   grouped by namespace
//! - `X-knowledge-base-completo.txt` - the reconstructed source of every included type,
//!   cut off once an approximate token ceiling is exceeded
//!
//! The metadata reader is built in: PE images are parsed with `goblin`, the ECMA-335
//! metadata root, heaps, tables and signatures are read directly, and the result is a
//! read-only [`metadata::typesystem::CilModule`]. Source reconstruction is delegated to a
//! [`decompiler::Decompiler`], by default the external `ilspycmd` tool.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dotscribe::prelude::*;
//! use std::path::PathBuf;
//!
//! let config = Config::from_file("dotscribe.toml".as_ref())?;
//! let decompiler = dotscribe::decompiler::from_config(&config.decompiler);
//!
//! let outcome = Orchestrator::new(&config, &PeLoader, decompiler.as_ref())
//!     .run(&[PathBuf::from("Assembly-CSharp.dll")], &mut LogReporter);
//!
//! for summary in &outcome.summaries {
//!     println!("{} types indexed", summary.index_types);
//! }
//! # Ok::<(), dotscribe::Error>(())
//! ```
//!
//! ### Working with the model directly
//!
//! ```rust,no_run
//! use dotscribe::{
//!     knowledge::{IndexSynthesizer, SEPARATOR},
//!     metadata::typesystem::CilModule,
//!     Config,
//! };
//!
//! let module = CilModule::from_mem(std::fs::read("Assembly-CSharp.dll")?)?;
//! let config = Config::default();
//!
//! let index = IndexSynthesizer::new(&config.synthesis).synthesize(&module, "2025-01-01 00:00:00");
//! println!("{}", index.text);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - [`metadata`] - ECMA-335 reader and the type model
//! - [`knowledge`] - filtering, ordering, signature formatting and both synthesizers
//! - [`decompiler`] - the source reconstruction seam and its backends
//! - [`orchestrator`] - per-input validation, loading, synthesis and output
//! - [`config`] - the TOML configuration passed through the pipeline
//! - [`Error`] and [`Result`] - error handling
//!
//! ## Error Handling
//!
//! Failures are isolated to the narrowest unit. A type that fails to decompile becomes a
//! comment line in the knowledge base; an input that fails to load is reported and skipped.
//!
//! ```rust,no_run
//! use dotscribe::{Error, metadata::typesystem::CilModule};
//!
//! match CilModule::from_file(std::path::Path::new("tests/samples/crafted.dll")) {
//!     Ok(module) => println!("Loaded {}", module.name),
//!     Err(Error::NotSupported) => println!("File format not supported"),
//!     Err(Error::Malformed { message, .. }) => println!("Malformed file: {}", message),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```
//!
//! ## Standards Compliance
//!
//! The reader follows the **ECMA-335 specification** (6th edition) for the metadata
//! structures it reads.
//!
//! - [ECMA-335 Standard](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf) - Official CLI specification
#[macro_use]
pub(crate) mod error;
pub(crate) mod file;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust,no_run
/// use dotscribe::prelude::*;
///
/// let module = CilModule::from_file("Assembly-CSharp.dll".as_ref())?;
/// let config = Config::default();
/// let index = IndexSynthesizer::new(&config.synthesis).synthesize(&module, "now");
/// # Ok::<(), dotscribe::Error>(())
/// ```
pub mod prelude;

/// Run configuration
pub mod config;

/// Source reconstruction backends
pub mod decompiler;

/// Artifact synthesis
pub mod knowledge;

/// Definitions, parsing and loading of CIL metadata based on ECMA-335
///
/// # Key Components
///
/// - [`metadata::cor20header`] - CLR 2.0 header information
/// - [`metadata::root`] - Metadata root and stream directory
/// - [`metadata::streams`] - Heaps and the tables stream header
/// - [`metadata::signatures`] - Method, field and property signatures
/// - [`metadata::typesystem`] - The type model of a module
///
/// # Examples
///
/// ```rust,no_run
/// use dotscribe::metadata::typesystem::CilModule;
/// use std::path::Path;
///
/// let module = CilModule::from_file(Path::new("Assembly-CSharp.dll"))?;
/// for ty in module.types.iter().filter(|ty| !ty.is_compiler_generated()) {
///     println!("{} {}", ty.kind, ty.full_name);
/// }
/// # Ok::<(), dotscribe::Error>(())
/// ```
pub mod metadata;

/// Input validation, artifact writing and run reporting
pub mod orchestrator;

/// `dotscribe` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
///
/// # Examples
///
/// ```rust,no_run
/// use dotscribe::{Result, metadata::typesystem::CilModule};
///
/// fn load(path: &str) -> Result<CilModule> {
///     CilModule::from_file(std::path::Path::new(path))
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `dotscribe` Error type
///
/// The main error type for all operations in this crate, covering metadata reading and
/// the synthesis pipeline.
pub use error::Error;

/// The run configuration.
pub use config::Config;

/// Metadata heaps and stream headers for direct access to ECMA-335 data structures.
pub use metadata::streams::{Blob, StreamHeader, Strings, TablesHeader};

/// Low-level file and byte-cursor utilities.
pub use file::{parser::Parser, File};
