//! Composer configuration.
//!
//! Everything has a built-in default that reproduces the herbstluftwm website,
//! so a config file is optional. When present, `compose.toml` is merged on top
//! of the stock defaults and validated.
//!
//! ## Config File Location
//!
//! `compose.toml` in the working directory is picked up automatically. Another
//! file can be named with `--config`; in that case the file must exist.
//!
//! ## Configuration Options
//!
//! ```toml
//! [site]
//! name = "herbstluftwm"                          # <h1> and window title suffix
//! tagline = "a manual tiling window manager for X"
//! stylesheet = "main.css"
//! icon = "herbstluftwm.svg"
//!
//! [[tabs]]
//! name = "Overview"
//! pages = [{ key = "index", title = "" }]
//!
//! [[tabs]]
//! name = "Wiki"
//! url = "http://wiki.herbstluftwm.org"
//! ```
//!
//! ## Partial Configuration
//!
//! Tables merge key by key, so `[site]` can override a single value. Arrays
//! replace wholesale: a config that lists any `[[tabs]]` replaces the entire
//! site map, not just the tabs it names.
//!
//! Unknown keys are rejected to catch typos early.

use crate::sitemap::{SiteMap, TabEntry};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "compose.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Full composer configuration: site chrome plus navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComposeConfig {
    /// Text and asset references of the page shell.
    pub site: SiteSettings,
    /// Navigation tabs, in display order.
    pub tabs: SiteMap,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            site: SiteSettings::default(),
            tabs: SiteMap::herbstluftwm(),
        }
    }
}

/// Fixed parts of the page shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSettings {
    /// Shown in the header `<h1>` and used as the window title.
    pub name: String,
    /// Subheader line under the name.
    pub tagline: String,
    /// `href` of the stylesheet link.
    pub stylesheet: String,
    /// `src` of the header logo.
    pub icon: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            name: "herbstluftwm".to_string(),
            tagline: "a manual tiling window manager for X".to_string(),
            stylesheet: "main.css".to_string(),
            icon: "herbstluftwm.svg".to_string(),
        }
    }
}

impl ComposeConfig {
    /// Check the site map invariants the composer relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.name.is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        if self.tabs.is_empty() {
            return Err(ConfigError::Validation(
                "at least one [[tabs]] entry is required".into(),
            ));
        }

        let mut seen = HashSet::new();
        for tab in self.tabs.tabs() {
            if tab.name.is_empty() {
                return Err(ConfigError::Validation("tab names must not be empty".into()));
            }
            let TabEntry::SubpageGroup(pages) = &tab.entry else {
                continue;
            };
            if pages.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "tab `{}` must list at least one page",
                    tab.name
                )));
            }
            for page in pages {
                if page.key.is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "tab `{}` has a page with an empty key",
                        tab.name
                    )));
                }
                if !seen.insert(page.key.as_str()) {
                    return Err(ConfigError::Validation(format!(
                        "page key `{}` appears more than once",
                        page.key
                    )));
                }
            }
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// Base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ComposeConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay, arrays included, replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ComposeConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ComposeConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults if it is absent.
pub fn load_config(path: &Path) -> Result<ComposeConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Load config from a file the user named explicitly. A missing file is an
/// error here rather than a silent fallback to defaults.
pub fn load_required_config(path: &Path) -> Result<ComposeConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let overlay: toml::Value = toml::from_str(&content)?;
    resolve_config(stock_defaults_value(), Some(overlay))
}

/// Returns a fully-commented stock `compose.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# hlwm-compose configuration
# ==========================
# All settings are optional. Values shown below are the defaults, which
# reproduce the herbstluftwm website.
#
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Page shell
# ---------------------------------------------------------------------------
[site]
# Header title. Also the window title, or its suffix on pages with a title.
name = "herbstluftwm"

# Line shown under the header title.
tagline = "a manual tiling window manager for X"

# Stylesheet linked from every page.
stylesheet = "main.css"

# Logo shown next to the header title.
icon = "herbstluftwm.svg"

# ---------------------------------------------------------------------------
# Navigation
# ---------------------------------------------------------------------------
# Tabs render left to right in the order listed. Each tab has either:
#   pages = [...]  local pages; the tab links to the first one
#   url = "..."    an external link
#
# Page keys must be unique across all tabs. A page `key` is composed from
# `<key>-content.html` and published as `<key>.html`. Its `title` labels the
# sub-page bar and prefixes the window title; leave it empty to use the bare
# site name. Listing any [[tabs]] replaces the whole default navigation.

[[tabs]]
name = "Overview"
pages = [
    { key = "index", title = "" },
]

[[tabs]]
name = "Documentation"
pages = [
    { key = "news", title = "News" },
    { key = "migration", title = "Migration" },
    { key = "tutorial", title = "Tutorial" },
    { key = "herbstluftwm", title = "herbstluftwm(1)" },
    { key = "herbstclient", title = "herbstclient(1)" },
]

[[tabs]]
name = "FAQ"
pages = [
    { key = "faq", title = "FAQ" },
]

[[tabs]]
name = "Download"
pages = [
    { key = "download", title = "Download" },
]

[[tabs]]
name = "Wiki"
url = "http://wiki.herbstluftwm.org"
"##
}
