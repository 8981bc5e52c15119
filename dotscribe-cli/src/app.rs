use std::path::PathBuf;

use clap::{ArgAction, Parser};
use dotscribe::{config::DecompilerBackend, Config};

/// dotscribe - turns .NET assemblies into plain-text knowledge bases
///
/// For every input `X.dll`, writes `X-knowledge-base-index.txt` (types and member
/// signatures) and `X-knowledge-base-completo.txt` (reconstructed source per type).
#[derive(Debug, Parser)]
#[command(name = "dotscribe", version, about, long_about = None)]
pub struct Cli {
    /// Assemblies to process.
    #[arg(value_name = "INPUTS", required = true)]
    pub inputs: Vec<PathBuf>,

    /// TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write artifacts to this directory instead of next to each input.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Source reconstruction backend: ilspy or skeleton.
    #[arg(long, value_name = "BACKEND")]
    pub decompiler: Option<DecompilerBackend>,

    /// Path of the ilspycmd executable.
    #[arg(long, value_name = "PATH")]
    pub ilspy: Option<PathBuf>,

    /// Approximate token ceiling of the knowledge base.
    #[arg(long, value_name = "N")]
    pub max_tokens: Option<usize>,

    /// List private and internal members in the index.
    #[arg(long)]
    pub include_private: bool,

    /// Number of types decompiled concurrently.
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Increase logging output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored status output.
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Log level selected by `-v` repetitions.
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    /// The configuration file, if any, with command line flags applied on top.
    pub fn config(&self) -> dotscribe::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(directory) = &self.output_dir {
            config.output.directory = Some(directory.clone());
        }
        if let Some(backend) = self.decompiler {
            config.decompiler.backend = backend;
        }
        if let Some(program) = &self.ilspy {
            config.decompiler.program = program.clone();
        }
        if let Some(ceiling) = self.max_tokens {
            config.synthesis.token_approx_ceiling = ceiling;
        }
        if self.include_private {
            config.synthesis.default_include_non_public_members = true;
        }
        if let Some(jobs) = self.jobs {
            config.synthesis.jobs = jobs;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "dotscribe",
            "--decompiler",
            "skeleton",
            "--max-tokens",
            "500",
            "--include-private",
            "-j",
            "4",
            "-vv",
            "Assembly-CSharp.dll",
        ])
        .unwrap();

        assert_eq!(cli.log_level(), log::LevelFilter::Debug);

        let config = cli.config().unwrap();
        assert_eq!(config.decompiler.backend, DecompilerBackend::Skeleton);
        assert_eq!(config.synthesis.token_approx_ceiling, 500);
        assert!(config.synthesis.default_include_non_public_members);
        assert_eq!(config.synthesis.jobs, 4);
        assert_eq!(cli.inputs, [PathBuf::from("Assembly-CSharp.dll")]);
    }

    #[test]
    fn inputs_are_required() {
        let err = Cli::try_parse_from(["dotscribe"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn invalid_overrides_are_rejected() {
        let cli = Cli::try_parse_from(["dotscribe", "--max-tokens", "0", "a.dll"]).unwrap();
        assert!(cli.config().is_err());
    }
}
