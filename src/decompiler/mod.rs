//! Source reconstruction of single types.
//!
//! The knowledge-base synthesizer does not reconstruct source itself. It asks a
//! [`Decompiler`] for the text of one type at a time and treats every error as a failure
//! of that type alone.
//!
//! Two backends ship with the crate:
//!
//! - [`IlSpyDecompiler`] spawns the external `ilspycmd` tool once per type
//! - [`SkeletonDecompiler`] renders a declaration-only view from metadata, with no
//!   external dependency
//!
//! # Adding a backend
//!
//! ```rust
//! use dotscribe::{
//!     decompiler::Decompiler,
//!     metadata::typesystem::{CilModule, CilType},
//!     Result,
//! };
//!
//! struct NameOnly;
//!
//! impl Decompiler for NameOnly {
//!     fn name(&self) -> &str {
//!         "name-only"
//!     }
//!
//!     fn decompile(&self, _module: &CilModule, ty: &CilType) -> Result<String> {
//!         Ok(format!("// {}", ty.full_name))
//!     }
//! }
//! ```

mod ilspy;
mod skeleton;

pub use ilspy::IlSpyDecompiler;
pub use skeleton::SkeletonDecompiler;

use crate::{
    config::{DecompilerBackend, DecompilerConfig},
    metadata::typesystem::{CilModule, CilType},
    Result,
};

/// Reconstructs the source text of one type of a module.
///
/// Implementations must be usable from several threads at once, since types may be
/// decompiled in parallel. A call must not depend on any earlier call.
pub trait Decompiler: Send + Sync {
    /// Short backend name used in logs.
    fn name(&self) -> &str;

    /// Returns the source text of `ty`, which belongs to `module`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Decompile`] (or any other error) if the type cannot be
    /// reconstructed. The error's message is written into the artifact.
    fn decompile(&self, module: &CilModule, ty: &CilType) -> Result<String>;
}

/// Creates the backend selected by `config`.
#[must_use]
pub fn from_config(config: &DecompilerConfig) -> Box<dyn Decompiler> {
    match config.backend {
        DecompilerBackend::Ilspy => Box::new(IlSpyDecompiler::new(config)),
        DecompilerBackend::Skeleton => Box::new(SkeletonDecompiler),
    }
}
