//! Per-input driver: validate, load, synthesize both artifacts, write them.
//!
//! Every input is processed in isolation. An invalid path, an unloadable module or a
//! failed write is reported through the [`Reporter`] and recorded in the [`RunOutcome`];
//! the remaining inputs are still processed.
//!
//! # Example
//!
//! ```rust,no_run
//! use dotscribe::{
//!     decompiler::SkeletonDecompiler,
//!     orchestrator::{LogReporter, Orchestrator, PeLoader},
//!     Config,
//! };
//! use std::path::PathBuf;
//!
//! let config = Config::default();
//! let orchestrator = Orchestrator::new(&config, &PeLoader, &SkeletonDecompiler);
//!
//! let outcome = orchestrator.run(&[PathBuf::from("Assembly-CSharp.dll")], &mut LogReporter);
//! assert!(outcome.is_success());
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use strum::Display;

use crate::{
    decompiler::Decompiler,
    knowledge::{IndexSynthesizer, KnowledgeBaseSynthesizer},
    metadata::typesystem::CilModule,
    Config, Error, Result,
};

/// Suffix of the index artifact file name.
pub const INDEX_SUFFIX: &str = "-knowledge-base-index.txt";
/// Suffix of the knowledge-base artifact file name.
pub const KNOWLEDGE_BASE_SUFFIX: &str = "-knowledge-base-completo.txt";

/// Turns an input path into a module.
pub trait ModuleLoader: Send + Sync {
    /// Loads the module at `path`.
    ///
    /// # Errors
    /// Returns any reader error; the orchestrator wraps it into [`Error::MetadataLoad`].
    fn load(&self, path: &Path) -> Result<CilModule>;
}

/// Loads PE images with the in-crate metadata reader.
#[derive(Clone, Copy, Debug, Default)]
pub struct PeLoader;

impl ModuleLoader for PeLoader {
    fn load(&self, path: &Path) -> Result<CilModule> {
        CilModule::from_file(path)
    }
}

/// Progress steps of one input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum Stage {
    /// The module was loaded
    #[strum(serialize = "Module successfully loaded.")]
    Loaded,
    /// The index is being built
    #[strum(serialize = "Generating index...")]
    Index,
    /// The knowledge base is being built
    #[strum(serialize = "Generating knowledge base...")]
    KnowledgeBase,
}

impl Stage {
    /// Number of stages per input.
    pub const COUNT: usize = 3;

    /// One-based position of the stage.
    #[must_use]
    pub fn step(self) -> usize {
        match self {
            Stage::Loaded => 1,
            Stage::Index => 2,
            Stage::KnowledgeBase => 3,
        }
    }
}

/// What was written for one input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// The processed input
    pub input: PathBuf,
    /// Where the index was written
    pub index_path: PathBuf,
    /// Where the knowledge base was written
    pub knowledge_base_path: PathBuf,
    /// Namespace blocks in the index
    pub index_namespaces: usize,
    /// Types in the index
    pub index_types: usize,
    /// Member lines in the index
    pub index_members: usize,
    /// Namespaces in the knowledge base
    pub kb_namespaces: usize,
    /// Types selected for the knowledge base
    pub kb_types_considered: usize,
    /// Types whose source was emitted
    pub kb_types_emitted: usize,
    /// Types that failed to decompile
    pub kb_failures: usize,
    /// The token ceiling cut the knowledge base short
    pub truncated: bool,
}

/// Receives status updates while inputs are processed.
pub trait Reporter {
    /// Processing of `input` begins.
    fn start(&mut self, input: &Path);

    /// `stage` of the current input begins or, for [`Stage::Loaded`], completed.
    fn stage(&mut self, stage: Stage);

    /// `input` was processed and both artifacts written.
    fn success(&mut self, summary: &RunSummary);

    /// `input` was abandoned.
    fn failure(&mut self, input: &Path, error: &Error);

    /// All inputs were attempted.
    fn finished(&mut self, outcome: &RunOutcome);
}

/// Reports through the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn start(&mut self, input: &Path) {
        log::info!("Starting extraction of: {}", input.display());
    }

    fn stage(&mut self, stage: Stage) {
        log::info!("[{}/{}] {stage}", stage.step(), Stage::COUNT);
    }

    fn success(&mut self, summary: &RunSummary) {
        log::info!(
            "Wrote '{}' and '{}'",
            summary.index_path.display(),
            summary.knowledge_base_path.display()
        );
    }

    fn failure(&mut self, input: &Path, error: &Error) {
        log::error!("Failed to process '{}': {error}", input.display());
    }

    fn finished(&mut self, outcome: &RunOutcome) {
        log::info!(
            "{} inputs processed, {} failed",
            outcome.summaries.len(),
            outcome.failures.len()
        );
    }
}

/// Result of a whole run.
#[derive(Debug, Default)]
pub struct RunOutcome {
    /// Inputs that were fully processed, in input order
    pub summaries: Vec<RunSummary>,
    /// Inputs that were abandoned, in input order
    pub failures: Vec<(PathBuf, Error)>,
}

impl RunOutcome {
    /// True if no input failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drives the pipeline over a list of inputs.
pub struct Orchestrator<'a> {
    config: &'a Config,
    loader: &'a dyn ModuleLoader,
    decompiler: &'a dyn Decompiler,
    clock: Box<dyn Fn() -> String + 'a>,
}

/// The current local time, `%Y-%m-%d %H:%M:%S`.
#[must_use]
pub fn local_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

impl<'a> Orchestrator<'a> {
    /// Creates an orchestrator stamping artifacts with the local time.
    #[must_use]
    pub fn new(
        config: &'a Config,
        loader: &'a dyn ModuleLoader,
        decompiler: &'a dyn Decompiler,
    ) -> Self {
        Orchestrator {
            config,
            loader,
            decompiler,
            clock: Box::new(local_timestamp),
        }
    }

    /// Replaces the timestamp source.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Fn() -> String + 'a) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Checks that `input` is an existing file with the configured extension.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`] describing the first failed check.
    pub fn validate_input(&self, input: &Path) -> Result<()> {
        let invalid = |reason: String| Error::InvalidInput {
            path: input.to_path_buf(),
            reason,
        };

        if !input.is_file() {
            return Err(invalid("file does not exist".to_string()));
        }

        let expected = self.config.output.binary_extension.trim_start_matches('.');
        match input.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case(expected) => Ok(()),
            _ => Err(invalid(format!("expected a .{expected} file"))),
        }
    }

    /// Paths of the index and knowledge-base artifacts of `input`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`] if `input` has no file name.
    pub fn artifact_paths(&self, input: &Path) -> Result<(PathBuf, PathBuf)> {
        let stem = input
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| Error::InvalidInput {
                path: input.to_path_buf(),
                reason: "path has no file name".to_string(),
            })?;

        let directory = match &self.config.output.directory {
            Some(directory) => directory.clone(),
            None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
        };

        Ok((
            directory.join(format!("{stem}{INDEX_SUFFIX}")),
            directory.join(format!("{stem}{KNOWLEDGE_BASE_SUFFIX}")),
        ))
    }

    /// Processes one input and writes both artifacts.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`], [`Error::MetadataLoad`] or the I/O error of a
    /// failed write. Per-type decompilation failures are not errors.
    pub fn process(&self, input: &Path, reporter: &mut dyn Reporter) -> Result<RunSummary> {
        self.validate_input(input)?;
        let (index_path, knowledge_base_path) = self.artifact_paths(input)?;

        let module = self.loader.load(input).map_err(|e| Error::MetadataLoad {
            path: input.to_path_buf(),
            source: Box::new(e),
        })?;
        reporter.stage(Stage::Loaded);

        let generated_at = (self.clock)();
        let synthesis = &self.config.synthesis;

        reporter.stage(Stage::Index);
        let index = IndexSynthesizer::new(synthesis).synthesize(&module, &generated_at);

        reporter.stage(Stage::KnowledgeBase);
        let kb = KnowledgeBaseSynthesizer::new(synthesis).synthesize(
            &module,
            self.decompiler,
            &generated_at,
        );

        if let Some(parent) = index_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&index_path, &index.text)?;
        fs::write(&knowledge_base_path, &kb.text)?;

        Ok(RunSummary {
            input: input.to_path_buf(),
            index_path,
            knowledge_base_path,
            index_namespaces: index.namespaces,
            index_types: index.types,
            index_members: index.members,
            kb_namespaces: kb.namespaces,
            kb_types_considered: kb.types_considered,
            kb_types_emitted: kb.types_emitted,
            kb_failures: kb.failures,
            truncated: kb.truncated,
        })
    }

    /// Processes every input in order, isolating failures to their input.
    pub fn run(&self, inputs: &[PathBuf], reporter: &mut dyn Reporter) -> RunOutcome {
        let mut outcome = RunOutcome::default();

        for input in inputs {
            reporter.start(input);
            match self.process(input, reporter) {
                Ok(summary) => {
                    reporter.success(&summary);
                    outcome.summaries.push(summary);
                }
                Err(e) => {
                    reporter.failure(input, &e);
                    outcome.failures.push((input.clone(), e));
                }
            }
        }

        reporter.finished(&outcome);
        outcome
    }
}
