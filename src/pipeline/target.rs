use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    error::FilterError,
    list::{Corpus, ExclusionList, Line, classify},
};

const OUTPUT_SUFFIX: &str = "_filters.txt";

/// What one target list contributes
#[derive(Debug, Default, PartialEq)]
pub struct TargetResult {
    /// Block rules found in the target
    pub entries: BTreeSet<String>,
    /// Block rules the corpus does not already contain
    pub novel: BTreeSet<String>,
}

/// Read one target list and compare it against the corpus
///
/// Exclusion lines are appended to `exclusions`, which is shared by every
/// target of the run. Block rules are never deduplicated against exclusions
/// and exclusions never against the corpus.
///
/// # Returns
/// * `Ok(TargetResult)` - The target's block rules and the novel subset
/// * `Err(FilterError::Read)` - If the file is missing, unreadable or not UTF-8
pub fn process_target(
    path: &Path,
    corpus: &Corpus,
    exclusions: &mut ExclusionList,
) -> Result<TargetResult, FilterError> {
    let content = fs::read_to_string(path).map_err(|source| FilterError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut entries = BTreeSet::new();
    for raw in content.lines() {
        match classify(raw) {
            Line::BlockRule(rule) => {
                entries.insert(rule.to_string());
            }
            Line::Exclusion(rule) => {
                exclusions.insert(rule);
            }
            Line::Comment | Line::Blank => {}
        }
    }

    let novel = corpus.novel_entries(&entries);
    Ok(TargetResult { entries, novel })
}

/// `<output_dir>/<stem>_filters.txt` for a target path
pub fn output_path(output_dir: &Path, target: &Path) -> PathBuf {
    let stem = target
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_dir.join(format!("{stem}{OUTPUT_SUFFIX}"))
}
