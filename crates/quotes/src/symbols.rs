//! Ticker symbol normalization.
//!
//! Symbols are trimmed and uppercased; entries that end up empty are dropped.
//! Duplicates are kept as given.

/// Normalize a list of raw symbols.
pub fn normalize_symbols<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .map(|s| s.as_ref().trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Normalize a comma separated symbol list such as `"vcb, acb,,bid"`.
pub fn parse_symbol_list(raw: &str) -> Vec<String> {
    normalize_symbols(raw.split(','))
}
