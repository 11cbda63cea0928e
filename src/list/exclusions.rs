use std::collections::HashSet;

/// Exclusion lines in first-seen order without duplicates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExclusionList {
    ordered: Vec<String>,
    seen: HashSet<String>,
}

impl ExclusionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line unless an identical one was already recorded
    ///
    /// Returns `true` when the line was new.
    pub fn insert(&mut self, line: &str) -> bool {
        if self.seen.contains(line) {
            return false;
        }
        self.seen.insert(line.to_string());
        self.ordered.push(line.to_string());
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
