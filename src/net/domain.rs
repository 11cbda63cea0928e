use crate::error::FilterError;

/// Strip AdGuard list syntax from a block rule to get the domain to look up
///
/// Leading `|` anchors and trailing `^` separators are removed; everything
/// else is passed through untouched.
///
/// # Examples
/// ```
/// use filterdiff::net::bare_domain;
///
/// assert_eq!(bare_domain("||ads.example^").unwrap(), "ads.example");
/// assert_eq!(bare_domain("plain.example").unwrap(), "plain.example");
/// ```
pub fn bare_domain(entry: &str) -> Result<&str, FilterError> {
    let domain = entry.trim_start_matches('|').trim_end_matches('^');
    if domain.is_empty() {
        return Err(FilterError::EmptyDomain {
            entry: entry.to_string(),
        });
    }
    Ok(domain)
}
