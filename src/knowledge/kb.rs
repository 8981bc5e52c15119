//! The full-detail knowledge-base artifact: reconstructed source per type.

use std::collections::BTreeSet;

use rayon::prelude::*;

use crate::{
    config::SynthesisConfig,
    decompiler::Decompiler,
    knowledge::{order::selected_types, sanitize, BudgetEmitter, NamespaceFilter, SEPARATOR},
    metadata::typesystem::{CilModule, CilType},
    Result,
};

/// Last line of a knowledge base cut short by the token ceiling.
pub const TRUNCATION_WARNING: &str = "// WARNING: Token limit reached. Output may be incomplete.";

/// The knowledge-base text and what went into it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KnowledgeBaseArtifact {
    /// Complete artifact text
    pub text: String,
    /// Distinct namespaces among the selected types
    pub namespaces: usize,
    /// Types selected for the artifact
    pub types_considered: usize,
    /// Types whose source was appended
    pub types_emitted: usize,
    /// Types replaced by a failure comment
    pub failures: usize,
    /// The token ceiling stopped emission early
    pub truncated: bool,
}

/// Builds the knowledge-base artifact of a module with a [`Decompiler`].
///
/// Types are processed in full-name order. With `jobs > 1` they are decompiled in
/// batches of `jobs` on a dedicated thread pool; results are merged in order and the
/// budget is checked during the merge, so the artifact is identical to a sequential run.
pub struct KnowledgeBaseSynthesizer<'c> {
    config: &'c SynthesisConfig,
    filter: NamespaceFilter,
}

impl<'c> KnowledgeBaseSynthesizer<'c> {
    /// Creates a synthesizer for one run configuration.
    #[must_use]
    pub fn new(config: &'c SynthesisConfig) -> Self {
        KnowledgeBaseSynthesizer {
            config,
            filter: NamespaceFilter::from_config(config),
        }
    }

    /// Configured full-detail names that match no type of `module`, by full or simple name.
    #[must_use]
    pub fn missing_full_detail_types(&self, module: &CilModule) -> Vec<&'c str> {
        self.config
            .full_detail_type_names
            .iter()
            .filter(|wanted| {
                !module
                    .types
                    .iter()
                    .any(|ty| ty.full_name == **wanted || ty.name == **wanted)
            })
            .map(String::as_str)
            .collect()
    }

    fn pool(&self) -> Option<rayon::ThreadPool> {
        if self.config.jobs <= 1 {
            return None;
        }

        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.jobs)
            .build()
        {
            Ok(pool) => Some(pool),
            Err(e) => {
                log::warn!("Falling back to sequential decompilation: {e}");
                None
            }
        }
    }

    /// Renders the knowledge base of `module`, stamped with `generated_at`.
    ///
    /// Never fails: a type that cannot be decompiled becomes a one-line comment and the
    /// run continues with the next type.
    pub fn synthesize(
        &self,
        module: &CilModule,
        decompiler: &dyn Decompiler,
        generated_at: &str,
    ) -> KnowledgeBaseArtifact {
        for missing in self.missing_full_detail_types(module) {
            log::warn!("Full-detail type '{missing}' not found in '{}'", module.name);
        }

        let types = selected_types(module, &self.filter);
        let namespaces: BTreeSet<&str> = types
            .iter()
            .map(|ty| {
                if ty.namespace.is_empty() {
                    self.config.global_namespace_label.as_str()
                } else {
                    ty.namespace.as_str()
                }
            })
            .collect();

        let mut emitter = BudgetEmitter::new(self.config.token_approx_ceiling);
        emitter.push_line(&format!(
            "// === Hybrid Knowledge Base for Assembly: {} ===",
            module.name
        ));
        emitter.push_line(&format!(
            "// Generated at: {generated_at} with On-Demand Detail."
        ));
        emitter.push_line(SEPARATOR);

        log::info!(
            "Decompiling {} types of '{}' with {}",
            types.len(),
            module.name,
            decompiler.name()
        );

        let pool = self.pool();
        let batch_size = if pool.is_some() { self.config.jobs } else { 1 };
        let decompile = |ty: &CilType| -> Result<String> {
            log::debug!("Decompiling {}", ty.full_name);
            decompiler.decompile(module, ty)
        };

        let mut emitted = 0;
        let mut failures = 0;

        'batches: for batch in types.chunks(batch_size) {
            if !emitter.has_room() {
                break;
            }

            let results: Vec<Result<String>> = match &pool {
                Some(pool) => pool.install(|| batch.par_iter().map(|ty| decompile(*ty)).collect()),
                None => batch.iter().map(|ty| decompile(*ty)).collect(),
            };

            for (ty, result) in batch.iter().zip(results) {
                if !emitter.has_room() {
                    break 'batches;
                }

                match result {
                    Ok(source) => {
                        emitter.push_str(&sanitize(&source));
                        emitter.push_str("\n\n");
                        emitted += 1;
                    }
                    Err(e) => {
                        log::warn!("Failed to decompile {}: {e}", ty.full_name);
                        emitter.push_line(&format!(
                            "// Failed to decompile type: {} -> {e}",
                            ty.full_name
                        ));
                        failures += 1;
                    }
                }
            }
        }

        if emitter.is_truncated() {
            emitter.push_line(TRUNCATION_WARNING);
        }
        let (text, truncated) = emitter.finish();

        KnowledgeBaseArtifact {
            text,
            namespaces: namespaces.len(),
            types_considered: types.len(),
            types_emitted: emitted,
            failures,
            truncated,
        }
    }
}
