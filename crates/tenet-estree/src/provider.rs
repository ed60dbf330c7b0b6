//! Syntax providers backed by ESTree JSON

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tenet_core::{ParseError, ParsedSource, SyntaxProvider};

use crate::convert::tree_from_json;

/// File suffix of serialized ESTree documents
pub const ESTREE_SUFFIX: &str = ".estree.json";

/// Reads trees that a parser already serialized to disk
///
/// `app.js.estree.json` is paired with `app.js` when that file exists, so
/// rules and inline directives see the source text too.
#[derive(Debug, Default)]
pub struct EstreeJsonProvider;

impl EstreeJsonProvider {
    /// The source file a serialized tree was produced from, if it exists
    pub fn source_path(path: &Path) -> Option<PathBuf> {
        let name = path.file_name()?.to_str()?;
        let stem = name.strip_suffix(ESTREE_SUFFIX)?;
        let source = path.with_file_name(stem);
        source.is_file().then_some(source)
    }
}

impl SyntaxProvider for EstreeJsonProvider {
    fn name(&self) -> &'static str {
        "estree-json"
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == "json")
    }

    fn parse(&self, path: &Path) -> Result<ParsedSource, ParseError> {
        let json = fs::read_to_string(path)
            .map_err(|e| ParseError::new(path, format!("cannot read: {e}")))?;
        let tree = tree_from_json(&json).map_err(|e| ParseError::new(path, e.to_string()))?;

        let source = match Self::source_path(path) {
            Some(source_path) => {
                debug!("pairing {} with {}", path.display(), source_path.display());
                fs::read_to_string(&source_path).unwrap_or_default()
            }
            None => String::new(),
        };
        Ok(ParsedSource { source, tree })
    }
}

/// Runs an external parser that prints ESTree JSON for a file
///
/// The file path is appended to `command`, e.g.
/// `["acorn", "--ecma2022", "--locations"]` runs
/// `acorn --ecma2022 --locations app.js`.
#[derive(Debug, Clone)]
pub struct CommandProvider {
    command: Vec<String>,
    extensions: Vec<String>,
}

impl CommandProvider {
    /// `None` when `command` is empty
    pub fn new(command: Vec<String>, extensions: Vec<String>) -> Option<Self> {
        if command.is_empty() {
            return None;
        }
        Some(Self {
            command,
            extensions,
        })
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

impl SyntaxProvider for CommandProvider {
    fn name(&self) -> &'static str {
        "command"
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    fn parse(&self, path: &Path) -> Result<ParsedSource, ParseError> {
        let source = fs::read_to_string(path)
            .map_err(|e| ParseError::new(path, format!("cannot read: {e}")))?;

        debug!("running {} on {}", self.command.join(" "), path.display());
        let output = Command::new(&self.command[0])
            .args(&self.command[1..])
            .arg(path)
            .output()
            .map_err(|e| ParseError::new(path, format!("cannot run {}: {e}", self.command[0])))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = stderr.lines().next().unwrap_or("parser failed").trim().to_string();
            return Err(ParseError::new(path, reason));
        }

        let json = String::from_utf8_lossy(&output.stdout);
        let tree = tree_from_json(&json).map_err(|e| ParseError::new(path, e.to_string()))?;
        Ok(ParsedSource { source, tree })
    }
}
