//! URL query-string lookup.
//!
//! The update page can be opened with a board preselected, e.g.
//! `https://example.org/update/?board=FRDM-K64F`. Values are returned exactly
//! as they appear in the URL; no percent-decoding is applied.

/// The query portion of a URL: after the first `?`, before any `#`.
///
/// A `?` inside the fragment does not start a query.
#[must_use]
pub fn query_string(url: &str) -> Option<&str> {
    let url = url.split_once('#').map_or(url, |(url, _)| url);
    url.split_once('?').map(|(_, query)| query)
}

/// Iterate over the `key=value` pairs of a URL's query string.
///
/// A pair without `=` yields an empty value. Empty segments (`a=1&&b=2`)
/// are skipped.
pub fn query_pairs(url: &str) -> impl Iterator<Item = (&str, &str)> {
    query_string(url)
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
}

/// Raw value of the first occurrence of `name` in the URL's query string.
#[must_use]
pub fn query_parameter<'a>(url: &'a str, name: &str) -> Option<&'a str> {
    query_pairs(url)
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}
