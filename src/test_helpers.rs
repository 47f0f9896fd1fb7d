//! Shared test utilities for the hlwm-compose test suite.
//!
//! Provides fixture setup and small assertions over composed HTML.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let html = compose(&config, &tmp.path().join("faq-content.html"), &now).unwrap();
//!
//! assert_eq!(tab_class(&html, "FAQ"), Some("curtab"));
//! assert_eq!(count(&html, r#"<td class="curtab">"#), 1);
//! ```

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::naming::fragment_file_name;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/fragments/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/fragments");
    for entry in std::fs::read_dir(&fixtures).unwrap() {
        let entry = entry.unwrap();
        std::fs::copy(entry.path(), tmp.path().join(entry.file_name())).unwrap();
    }
    tmp
}

/// Write `<key>-content.html` into `dir` and return its path.
pub fn write_fragment(dir: &Path, key: &str, content: &str) -> PathBuf {
    let path = dir.join(fragment_file_name(key));
    std::fs::write(&path, content).unwrap();
    path
}

// =========================================================================
// HTML assertions
// =========================================================================

/// Number of non-overlapping occurrences of `needle` in `html`.
pub fn count(html: &str, needle: &str) -> usize {
    html.matches(needle).count()
}

/// Class of the navigation cell whose link text is `tab`.
pub fn tab_class<'a>(html: &'a str, tab: &str) -> Option<&'a str> {
    const CELL: &str = "<td class=\"";
    let anchor = html.find(&format!(">{tab}</a></td>"))?;
    let start = html[..anchor].rfind(CELL)? + CELL.len();
    let end = start + html[start..].find('"')?;
    Some(&html[start..end])
}

/// Everything between the opening of `div#content` and the footer, which is
/// exactly the fragment.
pub fn content_between(html: &str) -> Option<&str> {
    const OPEN: &str = "<div id=\"content\">";
    const FOOTER: &str = "<div class=\"footer\">";
    let start = html.find(OPEN)? + OPEN.len();
    let end = start + html[start..].find(FOOTER)?;
    Some(&html[start..end])
}

/// Assert that each needle occurs in `html`, each after the previous one.
pub fn assert_in_order(html: &str, needles: &[&str]) {
    let mut pos = 0;
    for needle in needles {
        match html[pos..].find(needle) {
            Some(offset) => pos += offset + needle.len(),
            None => panic!("`{needle}` not found after byte {pos} in:\n{html}"),
        }
    }
}
