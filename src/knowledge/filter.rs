//! Namespace inclusion rules.

use crate::config::SynthesisConfig;

/// Decides whether a type takes part in synthesis, by its namespace alone.
///
/// The empty namespace is replaced by a default name before matching. Prefixes match
/// case-insensitively, and an exclude match always wins over an include match.
///
/// ```rust
/// use dotscribe::knowledge::NamespaceFilter;
///
/// let filter = NamespaceFilter::new(&["Game"], &["Game.Editor"], "Game");
/// assert!(filter.should_include("Game.Combat"));
/// assert!(filter.should_include(""));
/// assert!(!filter.should_include("game.editor.Tools"));
/// assert!(!filter.should_include("Vendor"));
/// ```
#[derive(Clone, Debug)]
pub struct NamespaceFilter {
    include: Vec<String>,
    exclude: Vec<String>,
    default_namespace: String,
}

impl NamespaceFilter {
    /// Creates a filter from prefix lists and the namespace substituted for `""`.
    pub fn new<S: AsRef<str>>(include: &[S], exclude: &[S], default_namespace: &str) -> Self {
        let lowered = |prefixes: &[S]| {
            prefixes
                .iter()
                .map(|prefix| prefix.as_ref().to_lowercase())
                .collect()
        };

        NamespaceFilter {
            include: lowered(include),
            exclude: lowered(exclude),
            default_namespace: default_namespace.to_string(),
        }
    }

    /// Creates the filter configured for a run.
    #[must_use]
    pub fn from_config(config: &SynthesisConfig) -> Self {
        Self::new(
            &config.include_prefixes,
            &config.exclude_prefixes,
            &config.default_namespace,
        )
    }

    /// True if types of `namespace` are synthesized.
    #[must_use]
    pub fn should_include(&self, namespace: &str) -> bool {
        let namespace = if namespace.is_empty() {
            self.default_namespace.to_lowercase()
        } else {
            namespace.to_lowercase()
        };

        if self
            .exclude
            .iter()
            .any(|prefix| namespace.starts_with(prefix.as_str()))
        {
            return false;
        }

        self.include.is_empty()
            || self
                .include
                .iter()
                .any(|prefix| namespace.starts_with(prefix.as_str()))
    }
}
