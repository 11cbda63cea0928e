use std::{collections::BTreeSet, fs, path::Path};

use chrono::{DateTime, Utc};

use crate::{error::FilterError, list::ExclusionList};

/// Descriptive fields written at the top of the combined list
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub title: String,
    pub description: String,
    pub homepage: String,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            title: "Japan Youth Restricted Filter".to_string(),
            description: "It contains a blacklist of content considered inappropriate for young people in Japan; restricts inappropriate content on LINE and Yahoo searches.".to_string(),
            homepage: "https://github.com/matsuhiro/AdGuardFilters".to_string(),
        }
    }
}

impl Header {
    /// Render the `! Key: value` block, one line per field
    pub fn render(&self, modified: DateTime<Utc>) -> String {
        format!(
            "! Title: {}\n! Description: {}\n! Homepage: {}\n! Last modified: {}\n",
            self.title,
            self.description,
            self.homepage,
            format_timestamp(modified)
        )
    }
}

/// UTC timestamp with millisecond precision, e.g. `2024-05-01T09:30:00.123Z`
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Write sorted entries one per line, each terminated by a newline
pub fn write_entries(path: &Path, entries: &BTreeSet<String>) -> Result<(), FilterError> {
    let mut content = String::new();
    push_lines(&mut content, entries.iter().map(String::as_str));
    write(path, &content)
}

/// Write the combined list: header, exclusions, then the final entries
///
/// The exclusion block and the blank line after it are only emitted when at
/// least one exclusion was collected.
pub fn write_combined(
    path: &Path,
    header: &Header,
    modified: DateTime<Utc>,
    exclusions: &ExclusionList,
    entries: &BTreeSet<String>,
) -> Result<(), FilterError> {
    let mut content = header.render(modified);
    content.push('\n');
    // No exclusions: a single blank line separates header and entries
    if !exclusions.is_empty() {
        push_lines(&mut content, exclusions.iter());
        content.push('\n');
    }
    push_lines(&mut content, entries.iter().map(String::as_str));
    write(path, &content)
}

fn push_lines<'a>(content: &mut String, lines: impl Iterator<Item = &'a str>) {
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
}

fn write(path: &Path, content: &str) -> Result<(), FilterError> {
    fs::write(path, content).map_err(|source| FilterError::Write {
        path: path.to_path_buf(),
        source,
    })
}
