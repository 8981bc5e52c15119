//! Run configuration.
//!
//! Every option that shapes the generated artifacts lives in [`Config`] and is passed
//! into the pipeline explicitly. All fields are defaulted, so an empty TOML document (or
//! none at all) yields the built-in behavior.
//!
//! ```rust
//! use dotscribe::Config;
//!
//! let config = Config::from_toml_str(
//!     r#"
//!     [synthesis]
//!     include_prefixes = ["Game"]
//!     token_approx_ceiling = 5000
//!     "#,
//! )?;
//!
//! assert_eq!(config.synthesis.include_prefixes, ["Game"]);
//! assert!(config.synthesis.exclude_prefixes.contains(&"UnityEngine".to_string()));
//! # Ok::<(), dotscribe::Error>(())
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use strum::{Display, EnumString};

use crate::{Error, Result};

/// Options of the synthesis pipeline: filtering, member visibility and the size budget.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SynthesisConfig {
    /// Namespace prefixes a type must match when the list is non-empty
    pub include_prefixes: Vec<String>,
    /// Namespace prefixes that always exclude a type
    pub exclude_prefixes: Vec<String>,
    /// Approximate token ceiling of the knowledge-base artifact (characters / 4)
    pub token_approx_ceiling: usize,
    /// List private and internal members in the index
    pub default_include_non_public_members: bool,
    /// Types flagged for full detail. Checked for presence only.
    pub full_detail_type_names: Vec<String>,
    /// Namespace the filter substitutes for the empty namespace
    pub default_namespace: String,
    /// Label of the empty namespace in the index
    pub global_namespace_label: String,
    /// Number of types decompiled concurrently
    pub jobs: usize,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        let strings = |items: &[&str]| items.iter().map(ToString::to_string).collect();

        SynthesisConfig {
            include_prefixes: strings(&["Assembly-CSharp", "InnerNet"]),
            exclude_prefixes: strings(&[
                "System",
                "Unity",
                "UnityEngine",
                "UnityEditor",
                "Microsoft",
                "Mono",
                "TMPro",
                "Cinemachine",
                "Photon",
                "PlayFab",
                "Firebase",
                "Google",
                "Newtonsoft",
                "I2",
                "Plugins",
                "OdinInspector",
                "Rewired",
            ]),
            token_approx_ceiling: 1_000_000,
            default_include_non_public_members: false,
            full_detail_type_names: strings(&[
                "PlayerControl",
                "GameManager",
                "AmongUsClient",
                "InnerNet.InnerNetClient",
            ]),
            default_namespace: "Assembly-CSharp".to_string(),
            global_namespace_label: "Global".to_string(),
            jobs: 1,
        }
    }
}

/// Source reconstruction backends.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DecompilerBackend {
    /// The external `ilspycmd` tool
    #[default]
    Ilspy,
    /// Declarations rendered from metadata alone
    Skeleton,
}

/// Options of the decompiler collaborator.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DecompilerConfig {
    /// Which backend reconstructs type source
    pub backend: DecompilerBackend,
    /// Program spawned by the `ilspy` backend
    pub program: PathBuf,
    /// C# language version passed to `ilspycmd -lv`
    pub language_version: String,
    /// Extra arguments appended to every `ilspycmd` invocation
    pub extra_args: Vec<String>,
}

impl Default for DecompilerConfig {
    fn default() -> Self {
        DecompilerConfig {
            backend: DecompilerBackend::Ilspy,
            program: PathBuf::from("ilspycmd"),
            language_version: "CSharp7_3".to_string(),
            extra_args: Vec::new(),
        }
    }
}

/// Where and for which inputs artifacts are written.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Extension an input must carry, compared case-insensitively, without the dot
    pub binary_extension: String,
    /// Artifact directory; `None` writes next to each input
    pub directory: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            binary_extension: "dll".to_string(),
            directory: None,
        }
    }
}

/// The complete configuration of a run.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Synthesis options
    pub synthesis: SynthesisConfig,
    /// Decompiler options
    pub decompiler: DecompilerConfig,
    /// Output options
    pub output: OutputConfig,
}

impl Config {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    /// Returns [`Error::TomlErr`] for invalid TOML or unknown keys and [`Error::Config`]
    /// if a value is out of range.
    pub fn from_toml_str(text: &str) -> Result<Config> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;

        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    /// Returns [`Error::FileError`] if the file cannot be read, otherwise see
    /// [`Config::from_toml_str`].
    pub fn from_file(path: &Path) -> Result<Config> {
        let text = std::fs::read_to_string(path)?;
        log::debug!("Loaded configuration from '{}'", path.display());

        Config::from_toml_str(&text)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    /// Returns [`Error::Config`] naming the first offending option.
    pub fn validate(&self) -> Result<()> {
        if self.synthesis.token_approx_ceiling == 0 {
            return Err(Error::Config(
                "synthesis.token_approx_ceiling must be greater than 0".to_string(),
            ));
        }

        if self.synthesis.jobs == 0 {
            return Err(Error::Config("synthesis.jobs must be at least 1".to_string()));
        }

        if self.output.binary_extension.trim_start_matches('.').is_empty() {
            return Err(Error::Config(
                "output.binary_extension must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.synthesis.token_approx_ceiling, 1_000_000);
        assert_eq!(config.decompiler.backend, DecompilerBackend::Ilspy);
        assert_eq!(config.output.binary_extension, "dll");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            [synthesis]
            exclude_prefixes = []
            jobs = 4

            [decompiler]
            backend = "skeleton"

            [output]
            directory = "out"
            "#,
        )
        .unwrap();

        assert!(config.synthesis.exclude_prefixes.is_empty());
        assert_eq!(config.synthesis.include_prefixes, ["Assembly-CSharp", "InnerNet"]);
        assert_eq!(config.synthesis.jobs, 4);
        assert_eq!(config.decompiler.backend, DecompilerBackend::Skeleton);
        assert_eq!(config.decompiler.language_version, "CSharp7_3");
        assert_eq!(config.output.directory, Some(PathBuf::from("out")));
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            Config::from_toml_str("[synthesis]\ntoken_approx_ceiling = 0"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_toml_str("[synthesis]\njobs = 0"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_toml_str("[output]\nbinary_extension = \".\""),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_toml_str("[synthesis]\nunknown = 1"),
            Err(Error::TomlErr(_))
        ));
    }

    #[test]
    fn backend_names() {
        assert_eq!(DecompilerBackend::Skeleton.to_string(), "skeleton");
        assert_eq!(
            "ilspy".parse::<DecompilerBackend>().unwrap(),
            DecompilerBackend::Ilspy
        );
    }
}
