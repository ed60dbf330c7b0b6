//! Project settings from `.tenet.toml`
//!
//! The file is looked up from the working directory towards the filesystem
//! root; the first one found wins. Every table is optional:
//!
//! ```toml
//! [rules.no-ternary]
//! enabled = true
//!
//! [rules.no-var-declaration]
//! severity = "should"
//!
//! [paths]
//! exclude = ["vendor/", "*.min.js"]
//!
//! [parser]
//! command = ["acorn", "--ecma2022", "--locations"]
//! extensions = ["js", "mjs"]
//!
//! [run]
//! timeout_secs = 60
//! jobs = 4
//!
//! [output]
//! format = "github"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use tenet_core::RuleOverride;

pub const CONFIG_FILE: &str = ".tenet.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Overrides keyed by rule id; unknown ids are rejected at selection
    pub rules: BTreeMap<String, RuleOverride>,
    pub paths: PathsConfig,
    pub parser: ParserConfig,
    pub run: RunConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// `name/` skips any directory called `name`; other entries are globs
    /// tried against the whole path and the file name
    pub exclude: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// External parser printing ESTree JSON; the file path is appended
    pub command: Vec<String>,
    /// Source extensions handed to `command`
    pub extensions: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            command: Vec::new(),
            extensions: vec!["js".to_string(), "mjs".to_string(), "cjs".to_string()],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Whole-run deadline in seconds
    pub timeout_secs: Option<u64>,
    /// Worker threads; rayon picks one per core when unset
    pub jobs: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// `text`, `json` or `github`; validated by the CLI
    pub format: Option<String>,
}

impl Config {
    pub fn load() -> Result<Option<(Config, PathBuf)>> {
        Self::load_from(std::env::current_dir()?)
    }

    /// Nearest `.tenet.toml` in `start_dir` or one of its ancestors
    pub fn load_from(start_dir: PathBuf) -> Result<Option<(Config, PathBuf)>> {
        let Some(found) = start_dir
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE))
            .find(|candidate| candidate.is_file())
        else {
            return Ok(None);
        };
        let config = Self::load_path(&found)?;
        Ok(Some((config, found)))
    }

    pub fn load_path(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Whether a file found while walking a directory is skipped
    pub fn should_exclude(&self, path: &Path) -> bool {
        self.paths.exclude.iter().any(|pattern| match pattern.strip_suffix('/') {
            Some(dir) => in_directory(path, dir),
            None => matches_glob(pattern, path),
        })
    }
}

fn in_directory(path: &Path, dir: &str) -> bool {
    path.parent().is_some_and(|parent| {
        parent
            .components()
            .any(|c| c == Component::Normal(OsStr::new(dir)))
    })
}

fn matches_glob(pattern: &str, path: &Path) -> bool {
    let Ok(pattern) = glob::Pattern::new(pattern) else {
        return false;
    };
    pattern.matches_path(path)
        || path
            .file_name()
            .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
}
