//! The site map: which tabs the navigation bar shows and which pages live
//! under each tab.
//!
//! Order matters everywhere. Tabs render left to right in the order they are
//! listed, and sub-pages render in the order they are listed within their tab.
//! The first sub-page of a tab is also where the tab's own link points.
//!
//! A tab is either a group of local sub-pages or a plain external link (the
//! wiki). In TOML, a tab carries exactly one of `pages` or `url`:
//!
//! ```toml
//! [[tabs]]
//! name = "FAQ"
//! pages = [{ key = "faq", title = "FAQ" }]
//!
//! [[tabs]]
//! name = "Wiki"
//! url = "http://wiki.herbstluftwm.org"
//! ```

use crate::naming::page_file_name;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A local page inside a tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Subpage {
    /// Page key, also the stem of both the fragment and the output file.
    pub key: String,
    /// Label in the sub-page bar and prefix of the window title. May be empty.
    #[serde(default)]
    pub title: String,
}

impl Subpage {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TabEntry {
    /// The tab links off-site and owns no pages.
    ExternalLink(String),
    /// The tab owns these pages, in display order.
    SubpageGroup(Vec<Subpage>),
}

/// One entry of the top-level navigation bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTab", into = "RawTab")]
pub struct Tab {
    pub name: String,
    pub entry: TabEntry,
}

impl Tab {
    pub fn link(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entry: TabEntry::ExternalLink(url.into()),
        }
    }

    pub fn group(name: impl Into<String>, pages: Vec<Subpage>) -> Self {
        Self {
            name: name.into(),
            entry: TabEntry::SubpageGroup(pages),
        }
    }

    /// Sub-pages of this tab; empty for external links.
    pub fn subpages(&self) -> &[Subpage] {
        match &self.entry {
            TabEntry::ExternalLink(_) => &[],
            TabEntry::SubpageGroup(pages) => pages.as_slice(),
        }
    }

    /// Where the tab's navigation cell points: the URL of an external link,
    /// or the first sub-page's output file. `None` for an empty group.
    pub fn link_target(&self) -> Option<String> {
        match &self.entry {
            TabEntry::ExternalLink(url) => Some(url.clone()),
            TabEntry::SubpageGroup(pages) => pages.first().map(|p| page_file_name(&p.key)),
        }
    }
}

/// On-disk shape of a tab, before `url`/`pages` are turned into a `TabEntry`.
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTab {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pages: Option<Vec<Subpage>>,
}

impl TryFrom<RawTab> for Tab {
    type Error = String;

    fn try_from(raw: RawTab) -> Result<Self, Self::Error> {
        let entry = match (raw.url, raw.pages) {
            (Some(url), None) => TabEntry::ExternalLink(url),
            (None, Some(pages)) => TabEntry::SubpageGroup(pages),
            (Some(_), Some(_)) => {
                return Err(format!(
                    "tab `{}` sets both `url` and `pages`; pick one",
                    raw.name
                ));
            }
            (None, None) => {
                return Err(format!("tab `{}` needs either `url` or `pages`", raw.name));
            }
        };
        Ok(Tab {
            name: raw.name,
            entry,
        })
    }
}

impl From<Tab> for RawTab {
    fn from(tab: Tab) -> Self {
        let (url, pages) = match tab.entry {
            TabEntry::ExternalLink(url) => (Some(url), None),
            TabEntry::SubpageGroup(pages) => (None, Some(pages)),
        };
        RawTab {
            name: tab.name,
            url,
            pages,
        }
    }
}

/// Ordered list of tabs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteMap {
    tabs: Vec<Tab>,
}

impl SiteMap {
    pub fn new(tabs: Vec<Tab>) -> Self {
        Self { tabs }
    }

    /// The herbstluftwm website navigation.
    pub fn herbstluftwm() -> Self {
        Self::new(vec![
            Tab::group("Overview", vec![Subpage::new("index", "")]),
            Tab::group(
                "Documentation",
                vec![
                    Subpage::new("news", "News"),
                    Subpage::new("migration", "Migration"),
                    Subpage::new("tutorial", "Tutorial"),
                    Subpage::new("herbstluftwm", "herbstluftwm(1)"),
                    Subpage::new("herbstclient", "herbstclient(1)"),
                ],
            ),
            Tab::group("FAQ", vec![Subpage::new("faq", "FAQ")]),
            Tab::group("Download", vec![Subpage::new("download", "Download")]),
            Tab::link("Wiki", "http://wiki.herbstluftwm.org"),
        ])
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Flatten the site map into a page-key lookup.
    pub fn index(&self) -> PageIndex<'_> {
        PageIndex::new(self)
    }
}

impl Default for SiteMap {
    fn default() -> Self {
        Self::herbstluftwm()
    }
}

/// Where a page sits in the site map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLocation<'a> {
    /// Position of the owning tab in the navigation bar.
    pub tab_index: usize,
    pub tab: &'a Tab,
    pub page: &'a Subpage,
}

/// Page key → owning tab, derived from a [`SiteMap`].
///
/// External-link tabs own no pages and are skipped. If a key appears twice
/// the later tab wins; config validation rejects such maps before they get
/// here.
#[derive(Debug)]
pub struct PageIndex<'a> {
    site_map: &'a SiteMap,
    by_key: HashMap<&'a str, (usize, usize)>,
}

impl<'a> PageIndex<'a> {
    fn new(site_map: &'a SiteMap) -> Self {
        let mut by_key = HashMap::new();
        for (tab_index, tab) in site_map.tabs.iter().enumerate() {
            for (page_index, page) in tab.subpages().iter().enumerate() {
                by_key.insert(page.key.as_str(), (tab_index, page_index));
            }
        }
        Self { site_map, by_key }
    }

    pub fn lookup(&self, key: &str) -> Option<PageLocation<'a>> {
        let &(tab_index, page_index) = self.by_key.get(key)?;
        let tab = &self.site_map.tabs[tab_index];
        Some(PageLocation {
            tab_index,
            tab,
            page: &tab.subpages()[page_index],
        })
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.by_key.len()
    }
}
