//! File discovery and per-file scanning

use log::{debug, warn};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tenet_core::{FileOutcome, RuleSet, SyntaxProvider, Walker};
use tenet_estree::{CommandProvider, EstreeJsonProvider, ESTREE_SUFFIX};

use crate::cache::{hash_files, hash_rules, Cache, CacheEntry};
use crate::config::Config;
use crate::ignore::IgnoreDirectives;

/// Files to scan, plus named paths that cannot produce a tree
#[derive(Debug, Default)]
pub struct Discovered {
    pub files: Vec<PathBuf>,
    /// Missing paths and files no provider accepts; reported as unparseable
    pub rejected: Vec<PathBuf>,
}

impl Discovered {
    pub fn rejected_outcomes(&self) -> impl Iterator<Item = FileOutcome> + '_ {
        self.rejected.iter().map(FileOutcome::unparseable)
    }
}

/// Result of scanning one file
#[derive(Debug)]
pub struct Scanned {
    pub outcome: FileOutcome,
    /// Fresh cache entry when the file was walked cleanly
    pub cache_entry: Option<CacheEntry>,
}

impl Scanned {
    fn uncached(outcome: FileOutcome) -> Self {
        Self {
            outcome,
            cache_entry: None,
        }
    }
}

/// Parses, walks and filters files for one run
pub struct Scanner<'r> {
    walker: Walker<'r>,
    estree: EstreeJsonProvider,
    command: Option<CommandProvider>,
    rules_hash: u64,
    deadline: Option<Instant>,
}

impl<'r> Scanner<'r> {
    pub fn new(rules: &RuleSet<'r>, command: Option<CommandProvider>, deadline: Option<Instant>) -> Self {
        Self {
            walker: Walker::new(rules),
            estree: EstreeJsonProvider,
            command,
            rules_hash: hash_rules(&rules.fingerprint()),
            deadline,
        }
    }

    #[cfg(test)]
    pub fn rules_hash(&self) -> u64 {
        self.rules_hash
    }

    /// Provider for a file; serialized trees always go to the JSON reader
    fn provider_for(&self, path: &Path) -> Option<&dyn SyntaxProvider> {
        if is_estree_file(path) {
            return Some(&self.estree);
        }
        if let Some(command) = self.command.as_ref().filter(|c| c.accepts(path)) {
            return Some(command);
        }
        if self.estree.accepts(path) {
            return Some(&self.estree);
        }
        None
    }

    /// Whether a directory walk should pick up `path`
    fn collects(&self, path: &Path) -> bool {
        is_estree_file(path) || self.command.as_ref().is_some_and(|c| c.accepts(path))
    }

    /// Expand files and directories into a sorted, deduplicated file list
    pub fn discover(&self, paths: &[PathBuf], config: &Config) -> Discovered {
        let mut files = BTreeSet::new();
        let mut rejected = Vec::new();

        for path in paths {
            if path.is_file() {
                if self.provider_for(path).is_some() {
                    files.insert(path.clone());
                } else {
                    warn!("no provider understands {}", path.display());
                    rejected.push(path.clone());
                }
            } else if path.is_dir() {
                for entry in walkdir::WalkDir::new(path)
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_type().is_file() && self.collects(e.path()))
                {
                    let file_path = entry.path();
                    if config.should_exclude(file_path) {
                        debug!("excluded {}", file_path.display());
                    } else {
                        files.insert(file_path.to_path_buf());
                    }
                }
            } else {
                warn!("path does not exist: {}", path.display());
                rejected.push(path.clone());
            }
        }

        Discovered {
            files: files.into_iter().collect(),
            rejected,
        }
    }

    /// Scan one file, consulting the cache when one is given
    pub fn scan(&self, path: &Path, cache: Option<&Cache>) -> Scanned {
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            warn!("run deadline passed before {} was scanned", path.display());
            return Scanned::uncached(FileOutcome::abandoned(path));
        }

        let content_hash = cache.and_then(|_| self.content_hash(path));
        if let (Some(cache), Some(hash)) = (cache, content_hash) {
            if let Some(entry) = cache.get_if_valid(path, hash, self.rules_hash) {
                debug!("cache hit for {}", path.display());
                let mut outcome = FileOutcome::new(path);
                outcome.findings = entry.findings.clone();
                return Scanned::uncached(outcome);
            }
        }

        let Some(provider) = self.provider_for(path) else {
            warn!("no provider understands {}", path.display());
            return Scanned::uncached(FileOutcome::unparseable(path));
        };

        debug!("parsing {} with {}", path.display(), provider.name());
        let parsed = match provider.parse(path) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("unparseable {}", e);
                return Scanned::uncached(FileOutcome::unparseable(path));
            }
        };

        let mut outcome = self.walker.walk(path, &parsed.source, &parsed.tree);
        outcome.findings = IgnoreDirectives::parse(&parsed.source).filter(outcome.findings);

        let cache_entry = match content_hash {
            Some(content_hash) if outcome.crashes.is_empty() => Some(CacheEntry {
                content_hash,
                rules_hash: self.rules_hash,
                findings: outcome.findings.clone(),
            }),
            _ => None,
        };

        Scanned {
            outcome,
            cache_entry,
        }
    }

    fn content_hash(&self, path: &Path) -> Option<u64> {
        let source = is_estree_file(path)
            .then(|| EstreeJsonProvider::source_path(path))
            .flatten();
        let result = match &source {
            Some(source) => hash_files(&[path, source.as_path()]),
            None => hash_files(&[path]),
        };
        match result {
            Ok(hash) => Some(hash),
            Err(e) => {
                debug!("not caching {}: {:#}", path.display(), e);
                None
            }
        }
    }
}

fn is_estree_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(ESTREE_SUFFIX))
}
