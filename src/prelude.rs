//! # dotscribe Prelude
//!
//! The types needed to load a module and synthesize its artifacts, for glob import.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all dotscribe operations
pub use crate::Error;

/// The result type used throughout dotscribe
pub use crate::Result;

/// Run configuration
pub use crate::config::{Config, DecompilerBackend, DecompilerConfig, OutputConfig, SynthesisConfig};

// ================================================================================================
// Metadata
// ================================================================================================

/// Metadata token type for referencing table entries
pub use crate::metadata::token::Token;

/// The type model
pub use crate::metadata::typesystem::{
    CilModule, CilType, Event, Field, Method, Parameter, Property, TypeKind,
};

// ================================================================================================
// Synthesis
// ================================================================================================

/// Artifact synthesizers and their results
pub use crate::knowledge::{
    IndexArtifact, IndexSynthesizer, KnowledgeBaseArtifact, KnowledgeBaseSynthesizer,
    NamespaceFilter,
};

/// Source reconstruction
pub use crate::decompiler::{Decompiler, IlSpyDecompiler, SkeletonDecompiler};

/// Per-input driver
pub use crate::orchestrator::{
    LogReporter, ModuleLoader, Orchestrator, PeLoader, Reporter, RunOutcome, RunSummary, Stage,
};
