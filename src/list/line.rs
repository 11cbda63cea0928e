/// Prefix marking an allow rule in AdGuard-style filter lists
pub const EXCLUSION_MARKER: &str = "@@";

const COMMENT_MARKER: char = '#';

/// Classification of a single list line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Comment,
    /// Allow rule, kept verbatim (marker included)
    Exclusion(&'a str),
    /// Domain or pattern that blocks
    BlockRule(&'a str),
}

/// Classify one raw line of a filter list
///
/// Surrounding whitespace is trimmed before any rule applies. The order of the
/// checks matters: a trimmed empty line is blank, a leading `#` makes a
/// comment, a leading `@@` makes an exclusion, and anything else is a block
/// rule. The returned slices borrow from `raw` and are already trimmed.
///
/// # Examples
/// ```
/// use filterdiff::list::{Line, classify};
///
/// assert_eq!(classify("  ||ads.example^ "), Line::BlockRule("||ads.example^"));
/// assert_eq!(classify("@@||ok.example^"), Line::Exclusion("@@||ok.example^"));
/// ```
pub fn classify(raw: &str) -> Line<'_> {
    let line = raw.trim();
    if line.is_empty() {
        Line::Blank
    } else if line.starts_with(COMMENT_MARKER) {
        Line::Comment
    } else if line.starts_with(EXCLUSION_MARKER) {
        Line::Exclusion(line)
    } else {
        Line::BlockRule(line)
    }
}
