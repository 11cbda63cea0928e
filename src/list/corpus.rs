use std::{
    collections::{BTreeSet, HashSet},
    fs,
    path::{Path, PathBuf},
};

use crate::error::FilterError;

use super::line::{Line, classify};

/// Which flavour of the pipeline is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Exclusion lines in the corpus count as block rules; no validation
    #[default]
    Simple,
    /// Exclusion lines in the corpus are skipped; new entries are validated
    Extended,
}

impl Variant {
    pub fn validates(self) -> bool {
        matches!(self, Variant::Extended)
    }
}

/// Block rules already present in the existing lists
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Corpus {
    entries: HashSet<String>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every regular file directly under `dir` into a corpus
    ///
    /// # Behavior
    /// - Subdirectories are not descended into; symlinks to files are followed
    /// - Dot-files are skipped, the same way a shell `*` glob skips them
    /// - Files are visited in sorted path order so logs are reproducible
    /// - An unreadable or non-UTF-8 file is skipped with a warning
    /// - A missing or empty directory yields an empty corpus and a warning
    ///
    /// # Arguments
    /// * `dir` - Directory holding the existing lists
    /// * `variant` - Decides whether `@@` lines count as block rules
    pub fn load(dir: &Path, variant: Variant) -> Self {
        let mut corpus = Self::new();

        let files = match list_files(dir) {
            Ok(files) => files,
            Err(err) => {
                log::warn!("No existing lists loaded: {err}");
                return corpus;
            }
        };

        if files.is_empty() {
            log::warn!("No files found in {}", dir.display());
            return corpus;
        }

        for path in files {
            match fs::read_to_string(&path) {
                Ok(content) => {
                    let before = corpus.len();
                    corpus.extend_from_str(&content, variant);
                    log::debug!(
                        "Loaded {} new rule(s) from {}",
                        corpus.len() - before,
                        path.display()
                    );
                }
                Err(source) => {
                    let err = FilterError::Read { path, source };
                    log::warn!("Skipping existing list: {err}");
                }
            }
        }

        corpus
    }

    /// Add the block rules found in `content`
    pub fn extend_from_str(&mut self, content: &str, variant: Variant) {
        for raw in content.lines() {
            match classify(raw) {
                Line::BlockRule(rule) => {
                    self.insert(rule);
                }
                Line::Exclusion(rule) if variant == Variant::Simple => {
                    self.insert(rule);
                }
                Line::Exclusion(_) | Line::Comment | Line::Blank => {}
            }
        }
    }

    pub fn insert(&mut self, rule: &str) -> bool {
        if self.entries.contains(rule) {
            return false;
        }
        self.entries.insert(rule.to_string())
    }

    pub fn contains(&self, rule: &str) -> bool {
        self.entries.contains(rule)
    }

    /// Entries of `entries` that the corpus does not already hold
    pub fn novel_entries(&self, entries: &BTreeSet<String>) -> BTreeSet<String> {
        entries
            .iter()
            .filter(|entry| !self.contains(entry))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn list_files(dir: &Path) -> Result<Vec<PathBuf>, FilterError> {
    let read_err = |source| FilterError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("Skipping unreadable entry in {}: {err}", dir.display());
                continue;
            }
        };
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        // fs::metadata follows symlinks
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => files.push(path),
            Ok(_) => {}
            Err(err) => log::warn!("Cannot stat {}: {err}", path.display()),
        }
    }
    files.sort();
    Ok(files)
}
