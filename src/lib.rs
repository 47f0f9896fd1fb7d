//! # hlwm-compose
//!
//! Assembles the pages of the herbstluftwm website. Each page starts life as
//! a pre-rendered HTML fragment (`faq-content.html`); this crate wraps it in
//! the shared shell: header, tab bar, sub-page bar and footer.
//!
//! ```text
//! faq-content.html  ──►  hlwm-compose  ──►  stdout (faq.html)
//!                            ▲
//!                 site map + site settings
//! ```
//!
//! One invocation composes one page. The upstream build runs it once per
//! fragment and redirects stdout to the page file.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`compose`] | Resolves the page and renders the document with Maud |
//! | [`sitemap`] | Tabs, sub-pages, and the page-key → tab index |
//! | [`naming`] | `<page-key>-content.html` filename convention |
//! | [`config`] | Optional `compose.toml` loading, merging, and validation |
//! | [`output`] | CLI output for `check` and file output |
//! | [`clock`] | Local time with a named zone for the footer |
//!
//! # Design Decisions
//!
//! ## Ordered Site Map
//!
//! Tab order and sub-page order are what the reader sees, so the site map is
//! a `Vec` of tabs, each holding a `Vec` of pages. Lookup by page key goes
//! through a separate [`sitemap::PageIndex`] built per run.
//!
//! ## Tabs Are Either Links or Page Groups
//!
//! [`sitemap::TabEntry`] makes the two kinds of tab explicit. External links
//! never own pages and are skipped by the index; page groups always link to
//! their first page.
//!
//! ## Config Is Passed In
//!
//! The built-in herbstluftwm map is just the default of
//! [`config::ComposeConfig`]. The composer receives the config as a value, so
//! tests and other sites can use their own map.
//!
//! ## Fragments Are Trusted
//!
//! Fragment content is copied byte for byte, without escaping or UTF-8
//! validation. It is produced by the site's own content pipeline. Everything
//! else that ends up in the shell is escaped by Maud.

pub mod clock;
pub mod compose;
pub mod config;
pub mod naming;
pub mod output;
pub mod sitemap;

#[cfg(test)]
pub(crate) mod test_helpers;
