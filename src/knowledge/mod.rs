//! Synthesis of the two knowledge-base artifacts from a loaded module.
//!
//! The pipeline is a chain of small, pure stages:
//!
//! - [`NamespaceFilter`] decides which namespaces take part at all
//! - [`order`] removes compiler-generated types and fixes a total, ordinal ordering
//! - [`format`] renders one-line member signatures with textual type simplification
//! - [`IndexSynthesizer`] writes the structural index (signatures only)
//! - [`KnowledgeBaseSynthesizer`] asks a [`crate::decompiler::Decompiler`] for the source of
//!   every type, cleans it with [`sanitize`] and accumulates it in a [`BudgetEmitter`]
//!
//! Both synthesizers take the generation timestamp as an argument, so the same module and
//! configuration always produce byte-identical text.
//!
//! # Example
//!
//! ```rust,no_run
//! use dotscribe::{
//!     decompiler::SkeletonDecompiler,
//!     knowledge::{IndexSynthesizer, KnowledgeBaseSynthesizer},
//!     metadata::typesystem::CilModule,
//!     Config,
//! };
//! use std::path::Path;
//!
//! let config = Config::default();
//! let module = CilModule::from_file(Path::new("Assembly-CSharp.dll"))?;
//!
//! let index = IndexSynthesizer::new(&config.synthesis).synthesize(&module, "2025-01-01 00:00:00");
//! let kb = KnowledgeBaseSynthesizer::new(&config.synthesis).synthesize(
//!     &module,
//!     &SkeletonDecompiler,
//!     "2025-01-01 00:00:00",
//! );
//!
//! println!("{} types indexed, {} emitted", index.types, kb.types_emitted);
//! # Ok::<(), dotscribe::Error>(())
//! ```

mod budget;
mod filter;
pub mod format;
mod index;
mod kb;
pub mod order;
mod sanitize;

pub use budget::{BudgetEmitter, CHARS_PER_TOKEN};
pub use filter::NamespaceFilter;
pub use format::simplify_type_name;
pub use index::{IndexArtifact, IndexSynthesizer};
pub use kb::{KnowledgeBaseArtifact, KnowledgeBaseSynthesizer, TRUNCATION_WARNING};
pub use sanitize::sanitize;

/// Line between the artifact header and its body.
pub const SEPARATOR: &str =
    "======================================================================";
