//! Build configuration loaded from `baler.config.json`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use baler_graph::{MissingPolicy, ResolveOptions};

use crate::error::{BundleError, Result};

/// Default config file name, searched in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "baler.config.json";

/// Project configuration.
///
/// Keys are camelCase in the file, matching the JS-adjacent audience:
///
/// ```json
/// {
///   "entry": ["src/main.js"],
///   "outDir": "dist",
///   "remoteRoot": "/srv/shared",
///   "remoteSymbol": "@remote",
///   "minifier": ["terser", "--compress"]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalerConfig {
    /// Entry files, each resolved into its own dependency-set plan.
    pub entry: Vec<PathBuf>,

    /// Directory for compiled files and manifests.
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Directory holding remote/shared assets.
    pub remote_root: PathBuf,

    /// Symbolic prefix for remote logical paths.
    #[serde(default = "default_remote_symbol")]
    pub remote_symbol: String,

    /// Root for `@tests` annotations; defaults to each entry's directory.
    #[serde(default)]
    pub tests_root: Option<PathBuf>,

    /// Substitute empty leaves for missing files instead of failing.
    /// Useful for best-effort dev builds.
    #[serde(default)]
    pub mute_missing: bool,

    /// External minifier invocation (program followed by arguments). The
    /// source is piped to its stdin and the minified result read from its
    /// stdout. When unset, units are concatenated verbatim.
    #[serde(default)]
    pub minifier: Option<Vec<String>>,
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_remote_symbol() -> String {
    "@remote".to_string()
}

impl BalerConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|_| BundleError::ConfigNotFound(path.to_path_buf()))?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants the type system cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.entry.is_empty() {
            return Err(BundleError::InvalidConfig("no entries specified".to_string()));
        }
        if self.remote_symbol.is_empty() {
            return Err(BundleError::InvalidConfig("remoteSymbol must not be empty".to_string()));
        }
        if self.minifier.as_ref().is_some_and(Vec::is_empty) {
            return Err(BundleError::MinifierNotConfigured);
        }
        Ok(())
    }

    /// Resolution options for the graph resolver.
    pub fn resolve_options(&self) -> ResolveOptions {
        let mut options = ResolveOptions::new(&self.remote_root, &self.remote_symbol);
        if let Some(tests_root) = &self.tests_root {
            options = options.tests_root(tests_root);
        }
        if self.mute_missing {
            options = options.missing_policy(MissingPolicy::Mute);
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> BalerConfig {
        serde_json::from_str(
            r#"{"entry": ["src/main.js"], "remoteRoot": "/srv/shared"}"#,
        )
        .unwrap()
    }

    #[test]
    fn defaults_are_filled_in() {
        let config = minimal();
        assert_eq!(config.out_dir, PathBuf::from("dist"));
        assert_eq!(config.remote_symbol, "@remote");
        assert!(config.tests_root.is_none());
        assert!(!config.mute_missing);
        assert!(config.minifier.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_entries_fail_validation() {
        let mut config = minimal();
        config.entry.clear();
        assert!(matches!(config.validate(), Err(BundleError::InvalidConfig(_))));
    }

    #[test]
    fn empty_minifier_command_is_rejected() {
        let mut config = minimal();
        config.minifier = Some(Vec::new());
        assert!(matches!(config.validate(), Err(BundleError::MinifierNotConfigured)));
    }

    #[test]
    fn resolve_options_carry_the_policy() {
        let mut config = minimal();
        config.mute_missing = true;
        let options = config.resolve_options();
        assert_eq!(options.missing_policy, MissingPolicy::Mute);
        assert_eq!(options.remote_symbol, "@remote");
    }

    #[test]
    fn missing_config_file_reports_its_path() {
        let err = BalerConfig::load(Path::new("/nope/baler.config.json")).unwrap_err();
        assert!(matches!(err, BundleError::ConfigNotFound(_)));
    }
}
