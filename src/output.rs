//! CLI output formatting for the `check` command and file output.
//!
//! The composed document itself goes to stdout, so nothing here is printed
//! during a plain compose run. Formatting only happens when the document goes
//! to a file (`--output`) or for `check`.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Tabs
//! 001 Overview
//!     001 (index) → index.html
//!         Source: index-content.html
//! 002 Documentation
//!     001 News → news.html
//!         Source: news-content.html
//!     ...
//! 005 Wiki → http://wiki.herbstluftwm.org
//!
//! Site
//!     Name: herbstluftwm
//!     Tagline: a manual tiling window manager for X
//!     Stylesheet: main.css
//!     Icon: herbstluftwm.svg
//!
//! 5 tabs, 9 pages
//! ```
//!
//! Format functions return `Vec<String>` and are pure; `print_*` wrappers
//! write to stdout.

use crate::config::ComposeConfig;
use crate::naming::{fragment_file_name, page_file_name};
use crate::sitemap::TabEntry;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format a page line: titled pages show the title, untitled ones the key in
/// parens.
///
/// ```text
/// 001 News → news.html
/// 001 (index) → index.html
/// ```
fn page_line(index: usize, title: &str, key: &str) -> String {
    let label = if title.is_empty() {
        format!("({key})")
    } else {
        title.to_string()
    };
    format!("{} {} → {}", format_index(index), label, page_file_name(key))
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Format the resolved configuration as a navigation tree.
pub fn format_check_output(config: &ComposeConfig) -> Vec<String> {
    let mut lines = vec!["Tabs".to_string()];
    let mut page_count = 0;

    for (i, tab) in config.tabs.tabs().iter().enumerate() {
        match &tab.entry {
            TabEntry::ExternalLink(url) => {
                lines.push(format!("{} {} → {}", format_index(i + 1), tab.name, url));
            }
            TabEntry::SubpageGroup(pages) => {
                lines.push(format!("{} {}", format_index(i + 1), tab.name));
                for (j, page) in pages.iter().enumerate() {
                    lines.push(format!("{}{}", indent(1), page_line(j + 1, &page.title, &page.key)));
                    lines.push(format!(
                        "{}Source: {}",
                        indent(2),
                        fragment_file_name(&page.key)
                    ));
                }
                page_count += pages.len();
            }
        }
    }

    let site = &config.site;
    lines.push(String::new());
    lines.push("Site".to_string());
    lines.push(format!("{}Name: {}", indent(1), site.name));
    lines.push(format!("{}Tagline: {}", indent(1), site.tagline));
    lines.push(format!("{}Stylesheet: {}", indent(1), site.stylesheet));
    lines.push(format!("{}Icon: {}", indent(1), site.icon));

    lines.push(String::new());
    lines.push(format!(
        "{}, {}",
        plural(config.tabs.tabs().len(), "tab"),
        plural(page_count, "page")
    ));
    lines
}

/// Print check output to stdout.
pub fn print_check_output(config: &ComposeConfig) {
    for line in format_check_output(config) {
        println!("{}", line);
    }
}

/// Line reported after writing a composed page to a file.
pub fn format_written(fragment: &Path, output: &Path) -> String {
    format!("Composed {} → {}", fragment.display(), output.display())
}
