//! Page composition.
//!
//! Takes one content fragment and wraps it in the shared page shell:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ [icon] herbstluftwm                          │  header
//! │        a manual tiling window manager for X  │
//! ├──────────────────────────────────────────────┤
//! │ Overview │ Documentation │ FAQ │ ... │ Wiki  │  navigation bar
//! ├──────────────────────────────────────────────┤
//! │ News  Migration  Tutorial  ...               │  sub-page bar (tabs with >1 page)
//! ├──────────────────────────────────────────────┤
//! │ <fragment, verbatim>                         │  content
//! │ Generated on 2024-03-01 at 12:30:05 CET      │  footer
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The page is identified by the fragment's file name (`faq-content.html` →
//! `faq`). The site map decides which tab is highlighted, whether the
//! sub-page bar appears, and what the window title says.
//!
//! ## HTML Generation
//!
//! The shell is built with [maud](https://maud.lambda.xyz/), so every
//! interpolated name and title is escaped. The fragment never passes through
//! maud: the shell is rendered around an empty slot, split there, and the
//! fragment's raw bytes go in between. Its encoding is not checked.
//!
//! Void elements in the head and header are written XHTML-style (`<link ... />`)
//! to match the `application/xhtml+xml` content type.
//!
//! The whole document is built in memory. Nothing is written unless every
//! step succeeded, so a failed run never leaves half a page behind.

use crate::config::{ComposeConfig, SiteSettings};
use crate::naming::{page_file_name, page_key_from_path};
use crate::sitemap::{PageIndex, PageLocation, Tab};
use chrono::{DateTime, TimeZone};
use maud::{Markup, PreEscaped, html};
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Footer timestamp layout, e.g. `2024-03-01 at 12:30:05 CET`. The `%Z` slot
/// is a zone abbreviation when the time carries a named zone (see
/// [`crate::clock`]).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d at %H:%M:%S %Z";

/// Where the fragment goes in the rendered shell. Escaped text can't contain
/// `<`, so this can only come from the shell itself.
const FRAGMENT_SLOT: &str = "<!--hlwm-compose:fragment-->";

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("page `{0}` is not in the site map (fragments are named `<page>-content.html`)")]
    UnknownPage(String),
    #[error("cannot read fragment `{}`: {source}", .path.display())]
    Fragment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A page key resolved against the site map.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPage<'a> {
    pub location: PageLocation<'a>,
    /// Contents of `<title>`.
    pub window_title: String,
}

impl ResolvedPage<'_> {
    pub fn key(&self) -> &str {
        &self.location.page.key
    }

    pub fn tab(&self) -> &Tab {
        self.location.tab
    }
}

/// A composed page: rendered shell around the untouched fragment bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    head: String,
    fragment: Vec<u8>,
    tail: String,
}

impl Document {
    /// Write the page: shell up to `div#content`, fragment, then footer onward.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(self.head.as_bytes())?;
        out.write_all(&self.fragment)?;
        out.write_all(self.tail.as_bytes())
    }

    pub fn into_bytes(self) -> Vec<u8> {
        let mut bytes = self.head.into_bytes();
        bytes.extend_from_slice(&self.fragment);
        bytes.extend_from_slice(self.tail.as_bytes());
        bytes
    }
}

/// Window title for a page: `"<title> - <site>"`, or just `"<site>"` when the
/// page has no display title.
pub fn window_title(page_title: &str, site_name: &str) -> String {
    if page_title.is_empty() {
        site_name.to_string()
    } else {
        format!("{page_title} - {site_name}")
    }
}

/// Look up a page key and work out everything the shell needs to know about it.
pub fn resolve_page<'a>(
    index: &PageIndex<'a>,
    site: &SiteSettings,
    key: &str,
) -> Result<ResolvedPage<'a>, ComposeError> {
    let location = index
        .lookup(key)
        .ok_or_else(|| ComposeError::UnknownPage(key.to_string()))?;
    let window_title = window_title(&location.page.title, &site.name);
    Ok(ResolvedPage {
        location,
        window_title,
    })
}

/// Read a fragment file as raw bytes.
pub fn read_fragment(path: &Path) -> Result<Vec<u8>, ComposeError> {
    fs::read(path).map_err(|source| ComposeError::Fragment {
        path: path.to_path_buf(),
        source,
    })
}

/// Format the footer timestamp.
pub fn format_generated_on<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Compose the full document for the fragment at `fragment_path`.
///
/// The page key comes from the fragment's file name. The key is resolved
/// before the fragment is read, so an unknown page is reported even when
/// its fragment is also missing.
pub fn compose<Tz>(
    config: &ComposeConfig,
    fragment_path: &Path,
    now: &DateTime<Tz>,
) -> Result<Document, ComposeError>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let key = page_key_from_path(fragment_path);
    let index = config.tabs.index();
    let page = resolve_page(&index, &config.site, &key)?;
    debug!(
        page = %key,
        tab = %page.tab().name,
        title = %page.window_title,
        "resolved page"
    );

    let fragment = read_fragment(fragment_path)?;
    debug!(path = %fragment_path.display(), bytes = fragment.len(), "read fragment");

    let generated_on = format_generated_on(now);
    Ok(assemble(render_shell(config, &page, &generated_on), fragment))
}

/// Split the rendered shell at the fragment slot and put the fragment there.
fn assemble(shell: Markup, fragment: Vec<u8>) -> Document {
    let shell = shell.into_string();
    let (head, tail) = shell
        .split_once(FRAGMENT_SLOT)
        .expect("page shell always contains the fragment slot");
    Document {
        head: head.to_string(),
        fragment,
        tail: tail.to_string(),
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the complete document around an already-resolved page, with an
/// empty slot where the fragment goes.
pub fn render_shell(config: &ComposeConfig, page: &ResolvedPage<'_>, generated_on: &str) -> Markup {
    let site = &config.site;
    html! {
        html {
            head {
                (void_tag("link", &[("rel", "stylesheet"), ("href", site.stylesheet.as_str()), ("type", "text/css")]))
                (void_tag("meta", &[
                    ("http-equiv", "Content-Type"),
                    ("content", "application/xhtml+xml; charset=UTF-8"),
                ]))
                title { (page.window_title) }
            }
            body {
                div #frame {
                    (site_header(site))
                    (navigation_bar(config.tabs.tabs(), page.location.tab_index))
                    @if let Some(bar) = subpage_bar(page.tab(), page.key()) {
                        (bar)
                    }
                    div #content {
                        (PreEscaped(FRAGMENT_SLOT))
                        (footer(generated_on))
                    }
                }
            }
        }
    }
}

/// Self-closing element (`<img src="..." />`) with escaped attribute values.
fn void_tag(name: &str, attrs: &[(&str, &str)]) -> Markup {
    let mut tag = format!("<{name}");
    for (attr, value) in attrs {
        let value = html! { (value) }.into_string();
        tag.push_str(&format!(" {attr}=\"{value}\""));
    }
    tag.push_str(" />");
    PreEscaped(tag)
}

/// Logo, site name and tagline.
fn site_header(site: &SiteSettings) -> Markup {
    html! {
        div #header {
            div #logoname {
                (void_tag("img", &[("id", "icon"), ("src", site.icon.as_str())]))
                div #squeezeheader {
                    h1 { (site.name) }
                    div #subheader { (site.tagline) }
                }
            }
        }
    }
}

fn spacer_cell() -> Markup {
    html! {
        td.notab.spacing { (PreEscaped("&nbsp;")) }
    }
}

/// Renders the top-level tab row.
///
/// Every tab is preceded by a spacer cell and one more spacer closes the row.
/// Only the tab at `current` gets `curtab`.
pub fn navigation_bar(tabs: &[Tab], current: usize) -> Markup {
    html! {
        table #navigationbar width="100%" cellspacing="0" {
            tr {
                @for (i, tab) in tabs.iter().enumerate() {
                    (spacer_cell())
                    td class=(if i == current { "curtab" } else { "notab" }) {
                        a href=[tab.link_target()] { (tab.name) }
                    }
                }
                (spacer_cell())
            }
        }
        div.tabbarseparator {}
    }
}

/// Renders the sub-page links of the current tab.
///
/// Returns `None` when the tab has a single page (or none): there is nothing
/// to switch between.
pub fn subpage_bar(tab: &Tab, current_key: &str) -> Option<Markup> {
    let pages = tab.subpages();
    if pages.len() <= 1 {
        return None;
    }
    Some(html! {
        div.subpagebar {
            @for page in pages {
                @let class = if page.key == current_key { "subpagecur subpage" } else { "subpage" };
                span class=(class) {
                    a href=(page_file_name(&page.key)) { (page.title) }
                }
            }
        }
    })
}

fn footer(generated_on: &str) -> Markup {
    html! {
        div.footer {
            "Generated on " (generated_on)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sitemap::{SiteMap, Subpage};
    use crate::test_helpers::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap()
    }

    fn compose_html(config: &ComposeConfig, path: &Path) -> String {
        let document = compose(config, path, &fixed_time()).unwrap();
        String::from_utf8(document.into_bytes()).unwrap()
    }

    fn compose_key(key: &str) -> String {
        let tmp = TempDir::new().unwrap();
        let path = write_fragment(tmp.path(), key, "<p>body</p>");
        compose_html(&ComposeConfig::default(), &path)
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    #[test]
    fn window_title_with_display_title() {
        assert_eq!(window_title("FAQ", "herbstluftwm"), "FAQ - herbstluftwm");
    }

    #[test]
    fn window_title_without_display_title() {
        assert_eq!(window_title("", "herbstluftwm"), "herbstluftwm");
    }

    #[test]
    fn resolve_known_page() {
        let config = ComposeConfig::default();
        let index = config.tabs.index();
        let page = resolve_page(&index, &config.site, "tutorial").unwrap();
        assert_eq!(page.key(), "tutorial");
        assert_eq!(page.tab().name, "Documentation");
        assert_eq!(page.window_title, "Tutorial - herbstluftwm");
    }

    #[test]
    fn resolve_unknown_page() {
        let config = ComposeConfig::default();
        let index = config.tabs.index();
        let err = resolve_page(&index, &config.site, "nope").unwrap_err();
        assert!(matches!(err, ComposeError::UnknownPage(ref k) if k == "nope"));
    }

    #[test]
    fn timestamp_format() {
        assert_eq!(format_generated_on(&fixed_time()), "2024-03-01 at 12:30:05 UTC");
    }

    // =========================================================================
    // Components
    // =========================================================================

    #[test]
    fn navigation_bar_marks_only_current_tab() {
        let map = SiteMap::herbstluftwm();
        let html = navigation_bar(map.tabs(), 2).into_string();
        assert_eq!(count(&html, r#"<td class="curtab">"#), 1);
        assert_eq!(count(&html, r#"<td class="notab">"#), 4);
        assert_eq!(tab_class(&html, "FAQ"), Some("curtab"));
        assert_eq!(tab_class(&html, "Wiki"), Some("notab"));
    }

    #[test]
    fn navigation_bar_spacers_surround_tabs() {
        let map = SiteMap::herbstluftwm();
        let html = navigation_bar(map.tabs(), 0).into_string();
        assert_eq!(count(&html, r#"<td class="notab spacing">&nbsp;</td>"#), 6);
        assert!(html.contains(r#"<div class="tabbarseparator"></div>"#));
    }

    #[test]
    fn navigation_bar_link_targets() {
        let map = SiteMap::herbstluftwm();
        let html = navigation_bar(map.tabs(), 0).into_string();
        assert!(html.contains(r#"<a href="index.html">Overview</a>"#));
        assert!(html.contains(r#"<a href="news.html">Documentation</a>"#));
        assert!(html.contains(r#"<a href="faq.html">FAQ</a>"#));
        assert!(html.contains(r#"<a href="download.html">Download</a>"#));
        assert!(html.contains(r#"<a href="http://wiki.herbstluftwm.org">Wiki</a>"#));
    }

    #[test]
    fn navigation_bar_tabs_in_site_map_order() {
        let map = SiteMap::herbstluftwm();
        let html = navigation_bar(map.tabs(), 0).into_string();
        assert_in_order(&html, &[">Overview<", ">Documentation<", ">FAQ<", ">Download<", ">Wiki<"]);
    }

    #[test]
    fn navigation_bar_escapes_tab_names() {
        let tabs = vec![Tab::group("Q&A", vec![Subpage::new("qa", "Q&A")])];
        let html = navigation_bar(&tabs, 0).into_string();
        assert!(html.contains(">Q&amp;A<"));
    }

    #[test]
    fn subpage_bar_absent_for_single_page_tab() {
        let tab = Tab::group("FAQ", vec![Subpage::new("faq", "FAQ")]);
        assert!(subpage_bar(&tab, "faq").is_none());
    }

    #[test]
    fn subpage_bar_absent_for_external_tab() {
        let tab = Tab::link("Wiki", "http://wiki.herbstluftwm.org");
        assert!(subpage_bar(&tab, "index").is_none());
    }

    #[test]
    fn subpage_bar_lists_pages_in_order() {
        let map = SiteMap::herbstluftwm();
        let html = subpage_bar(&map.tabs()[1], "migration").unwrap().into_string();

        assert_eq!(count(&html, r#"<span class="subpage">"#), 4);
        assert_eq!(count(&html, r#"<span class="subpagecur subpage">"#), 1);
        assert!(html.contains(
            r#"<span class="subpagecur subpage"><a href="migration.html">Migration</a></span>"#
        ));
        assert_in_order(
            &html,
            &[
                "news.html",
                "migration.html",
                "tutorial.html",
                "herbstluftwm.html",
                "herbstclient.html",
            ],
        );
    }

    // =========================================================================
    // Full documents
    // =========================================================================

    #[test]
    fn index_page_scenario() {
        let html = compose_key("index");

        assert!(html.contains("<title>herbstluftwm</title>"));
        assert_eq!(count(&html, r#"<td class="curtab">"#), 1);
        assert_eq!(tab_class(&html, "Overview"), Some("curtab"));
        for tab in ["Documentation", "FAQ", "Download", "Wiki"] {
            assert_eq!(tab_class(&html, tab), Some("notab"), "{tab}");
        }
        assert!(!html.contains("subpagebar"));
    }

    #[test]
    fn faq_page_scenario() {
        let html = compose_key("faq");
        assert!(html.contains("<title>FAQ - herbstluftwm</title>"));
        assert_eq!(tab_class(&html, "FAQ"), Some("curtab"));
        assert!(!html.contains("subpagebar"));
    }

    #[test]
    fn documentation_page_has_subpage_bar() {
        let html = compose_key("herbstclient");
        assert!(html.contains("<title>herbstclient(1) - herbstluftwm</title>"));
        assert_eq!(tab_class(&html, "Documentation"), Some("curtab"));
        assert!(html.contains(r#"<div class="subpagebar">"#));
        assert!(html.contains(
            r#"<span class="subpagecur subpage"><a href="herbstclient.html">herbstclient(1)</a></span>"#
        ));
    }

    #[test]
    fn every_builtin_page_composes() {
        let config = ComposeConfig::default();
        for tab in config.tabs.tabs() {
            for page in tab.subpages() {
                let html = compose_key(&page.key);
                let expected = window_title(&page.title, "herbstluftwm");
                assert!(html.contains(&format!("<title>{expected}</title>")), "{}", page.key);
                assert_eq!(count(&html, r#"<td class="curtab">"#), 1, "{}", page.key);
                assert_eq!(tab_class(&html, &tab.name), Some("curtab"), "{}", page.key);
            }
        }
    }

    #[test]
    fn fragment_inserted_verbatim() {
        let tmp = TempDir::new().unwrap();
        let fragment = "<h2>Install</h2>\n<pre>make &amp;&amp; make install</pre>\n<!-- raw & < > -->\n";
        let path = write_fragment(tmp.path(), "download", fragment);

        let html = compose_html(&ComposeConfig::default(), &path);
        assert_eq!(content_between(&html), Some(fragment));
    }

    #[test]
    fn fixture_fragments_compose() {
        let tmp = setup_fixtures();
        let config = ComposeConfig::default();

        let path = tmp.path().join("tutorial-content.html");
        let html = compose_html(&config, &path);
        let fragment = fs::read_to_string(&path).unwrap();
        assert_eq!(content_between(&html), Some(fragment.as_str()));
        assert_eq!(tab_class(&html, "Documentation"), Some("curtab"));

        let orphan = tmp.path().join("orphan-content.html");
        assert!(matches!(
            compose(&config, &orphan, &fixed_time()),
            Err(ComposeError::UnknownPage(_))
        ));
    }

    #[test]
    fn header_and_footer() {
        let html = compose_key("news");
        assert!(html.contains(r#"<link rel="stylesheet" href="main.css" type="text/css" />"#));
        assert!(html.contains(
            r#"<meta http-equiv="Content-Type" content="application/xhtml+xml; charset=UTF-8" />"#
        ));
        assert!(html.contains(r#"<img id="icon" src="herbstluftwm.svg" />"#));
        assert!(html.contains("<h1>herbstluftwm</h1>"));
        assert!(html.contains("a manual tiling window manager for X"));
        assert!(html.contains(r#"<div class="footer">Generated on 2024-03-01 at 12:30:05 UTC</div>"#));
    }

    #[test]
    fn custom_site_settings() {
        let mut config = ComposeConfig::default();
        config.site.name = "mysite".to_string();
        config.site.stylesheet = "style/site.css".to_string();

        let tmp = TempDir::new().unwrap();
        let path = write_fragment(tmp.path(), "faq", "");
        let html = compose_html(&config, &path);
        assert!(html.contains("<title>FAQ - mysite</title>"));
        assert!(html.contains(r#"href="style/site.css""#));
    }

    #[test]
    fn unknown_page_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = write_fragment(tmp.path(), "missing", "<p>x</p>");
        let err = compose(&ComposeConfig::default(), &path, &fixed_time()).unwrap_err();
        assert!(matches!(err, ComposeError::UnknownPage(ref k) if k == "missing"));
    }

    #[test]
    fn name_without_suffix_is_unknown_page() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("faq.html");
        fs::write(&path, "<p>x</p>").unwrap();
        let err = compose(&ComposeConfig::default(), &path, &fixed_time()).unwrap_err();
        assert!(matches!(err, ComposeError::UnknownPage(ref k) if k == "faq.html"));
    }

    #[test]
    fn missing_fragment_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("faq-content.html");
        let err = compose(&ComposeConfig::default(), &path, &fixed_time()).unwrap_err();
        assert!(matches!(err, ComposeError::Fragment { .. }));
        assert!(err.to_string().contains("faq-content.html"));
    }

    #[test]
    fn unknown_page_reported_before_missing_fragment() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("ghost-content.html");
        let err = compose(&ComposeConfig::default(), &path, &fixed_time()).unwrap_err();
        assert!(matches!(err, ComposeError::UnknownPage(_)));
    }

    #[test]
    fn non_utf8_fragment_passes_through() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("faq-content.html");
        let fragment = b"<p>caf\xe9 \xff\xfe</p>\n";
        fs::write(&path, fragment).unwrap();

        let bytes = compose(&ComposeConfig::default(), &path, &fixed_time())
            .unwrap()
            .into_bytes();
        let open = b"<div id=\"content\">";
        let start = bytes.windows(open.len()).position(|w| w == open).unwrap() + open.len();
        assert_eq!(&bytes[start..start + fragment.len()], fragment);
        assert!(bytes[start + fragment.len()..].starts_with(b"<div class=\"footer\">"));
    }

    #[test]
    fn write_to_matches_into_bytes() {
        let tmp = TempDir::new().unwrap();
        let path = write_fragment(tmp.path(), "news", "<p>news</p>");
        let document = compose(&ComposeConfig::default(), &path, &fixed_time()).unwrap();

        let mut written = Vec::new();
        document.write_to(&mut written).unwrap();
        assert_eq!(written, document.into_bytes());
    }

    #[test]
    fn fragment_slot_does_not_leak() {
        let html = compose_key("faq");
        assert!(!html.contains(FRAGMENT_SLOT));
    }

    #[test]
    fn void_tags_are_self_closing_and_escaped() {
        let tag = void_tag("img", &[("id", "icon"), ("src", "a\"b&c.svg")]).into_string();
        assert_eq!(tag, r#"<img id="icon" src="a&quot;b&amp;c.svg" />"#);
    }

    #[test]
    fn shell_has_no_unclosed_void_tags() {
        let html = compose_key("index");
        for tag in ["<link ", "<meta ", "<img "] {
            let start = html.find(tag).unwrap();
            let end = start + html[start..].find('>').unwrap();
            assert!(html[..end].ends_with(" /"), "{tag}");
        }
    }
}
