//! Fragment filename parsing for the `<page-key>-content.html` convention.
//!
//! Every page on the site is produced from a fragment file named after its
//! page key:
//! - `faq-content.html` → `faq`
//! - `herbstclient-content.html` → `herbstclient`
//!
//! Names that don't carry the suffix are passed through untouched. They will
//! not match any page key in practice, so composing them fails later as an
//! unknown page rather than as a separate "bad filename" error.

use std::path::Path;

/// Suffix shared by every fragment file.
pub const FRAGMENT_SUFFIX: &str = "-content.html";

/// Extension of composed pages, used when building links to sub-pages.
pub const PAGE_EXTENSION: &str = ".html";

/// Extract the page key from a fragment file name.
///
/// - `"faq-content.html"` → `"faq"`
/// - `"index-content.html"` → `"index"`
/// - `"notes.html"` → `"notes.html"` (no suffix, unchanged)
pub fn page_key_from_name(name: &str) -> &str {
    name.strip_suffix(FRAGMENT_SUFFIX).unwrap_or(name)
}

/// Extract the page key from a fragment path.
///
/// Only the final path component is considered, so fragments can live in any
/// directory. Returns an empty key for paths without a file name.
pub fn page_key_from_path(path: &Path) -> String {
    path.file_name()
        .map(|name| page_key_from_name(&name.to_string_lossy()).to_string())
        .unwrap_or_default()
}

/// The output file a page key is published as (`faq` → `faq.html`).
pub fn page_file_name(key: &str) -> String {
    format!("{key}{PAGE_EXTENSION}")
}

/// The fragment file a page key is read from (`faq` → `faq-content.html`).
pub fn fragment_file_name(key: &str) -> String {
    format!("{key}{FRAGMENT_SUFFIX}")
}
