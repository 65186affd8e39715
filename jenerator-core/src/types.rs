//! Domain types shared by every jenerator crate.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Default name of the config files searched for.
pub const DEFAULT_CONFIG_NAME: &str = "jenerator.yaml";
/// Default template file name.
pub const DEFAULT_TEMPLATE_NAME: &str = "Jenkinsfile.jinja2";
/// Default output file name.
pub const DEFAULT_OUTPUT_NAME: &str = "Jenkinsfile";
/// Fallback template directory, relative to the working directory.
pub const FALLBACK_TEMPLATE_DIR: &str = "templates";

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Directory walk behaviour for config discovery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkOptions {
    /// Maximum descent depth; the root is depth 0. `None` means unbounded.
    pub max_depth: Option<usize>,
    /// Directory base names that are never descended into.
    pub exclude: Vec<String>,
    /// Follow symbolic links to directories.
    pub follow_links: bool,
}

/// Everything a run needs, passed explicitly to discovery, render, and write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Working directory: discovery root and parent of the fallback template dir.
    pub root: PathBuf,
    pub config_name: String,
    pub template_name: String,
    pub output_name: String,
    /// Overwrite existing output files.
    pub force: bool,
    /// Dump each parsed record before rendering.
    pub verbose: bool,
    /// Render and decide, but never touch the filesystem.
    pub dry_run: bool,
    pub walk: WalkOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            root: PathBuf::from("."),
            config_name: DEFAULT_CONFIG_NAME.to_string(),
            template_name: DEFAULT_TEMPLATE_NAME.to_string(),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            force: false,
            verbose: false,
            dry_run: false,
            walk: WalkOptions::default(),
        }
    }
}

impl Settings {
    /// Settings rooted at `root`, everything else at its default.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Settings {
            root: root.into(),
            ..Settings::default()
        }
    }

    /// `<root>/templates`, pure.
    pub fn fallback_template_dir(&self) -> PathBuf {
        self.root.join(FALLBACK_TEMPLATE_DIR)
    }

    /// `<dir of config>/<output name>`, pure.
    pub fn output_path_for(&self, config_path: &Path) -> PathBuf {
        containing_dir(config_path).join(&self.output_name)
    }
}

/// Directory holding `config_path`.
///
/// A bare file name has an empty parent; that maps to `.`.
pub fn containing_dir(config_path: &Path) -> &Path {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

// ---------------------------------------------------------------------------
// ConfigRecord
// ---------------------------------------------------------------------------

/// A parsed config document: top-level keys become template variables.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConfigRecord(pub serde_json::Map<String, serde_json::Value>);

impl ConfigRecord {
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pretty JSON rendering used for `--verbose` payload dumps.
    pub fn to_pretty_string(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| format!("{:?}", self.0))
    }
}
