//! Settings loading, validation, and site-access resolution.
//!
//! Settings live in a directory (default `settings/`) holding a root
//! `config.toml` and one optional overlay per site access:
//!
//! ```text
//! settings/
//! ├── config.toml              # Root settings (required)
//! └── siteaccess/
//!     ├── eng/
//!     │   └── config.toml      # Overlay for access "eng" (locale, URL)
//!     └── ger/
//!         └── config.toml
//! ```
//!
//! Each overlay is merged table-by-table onto the root settings, so an access
//! only specifies what differs: typically its locale and, for multi-domain
//! sites, its URL.
//!
//! ```toml
//! [regional]
//! locale = "ger-DE"
//!
//! [site]
//! url = "de.example.com"
//! ```
//!
//! Required keys live in the root file; a missing one aborts the run before
//! any tree access. Unknown keys are rejected to catch typos early.

use crate::tree::ClassFilter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_FILE: &str = "config.toml";
const SITEACCESS_DIR: &str = "siteaccess";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("Missing settings file: {0}")]
    MissingSettings(PathBuf),
}

/// Fully resolved settings view.
///
/// The same type describes the root file and the per-access merged view; the
/// overlay mechanism guarantees every required key is present in both.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Sitemap generation settings.
    pub sitemap: SitemapSettings,
    /// Content-class filter applied to subtree fetches.
    pub classes: ClassFilter,
    /// Site URL and access list.
    pub site: SiteSettings,
    /// Locale settings; usually supplied per access.
    #[serde(default)]
    pub regional: RegionalSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SitemapSettings {
    /// Node id the sitemap is rooted at.
    pub root_node_id: u64,
    /// Output directory prefix, concatenated as-is in front of the filename.
    pub path: String,
    pub filename: String,
    pub suffix: String,
    /// Emitted as `<changefreq>` for every URL when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changefreq: Option<Changefreq>,
    /// Emitted as `<priority>` for every URL when set. 0.0 to 1.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<f32>,
}

impl SitemapSettings {
    /// Output file for one site access: `{path}{filename}_{access}{suffix}`,
    /// by literal concatenation. A `path` without a trailing slash acts as a
    /// filename prefix.
    pub fn output_file(&self, access: &str) -> PathBuf {
        PathBuf::from(format!(
            "{}{}_{}{}",
            self.path, self.filename, access, self.suffix
        ))
    }
}

/// sitemaps.org change frequency hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Changefreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl Changefreq {
    pub fn as_str(self) -> &'static str {
        match self {
            Changefreq::Always => "always",
            Changefreq::Hourly => "hourly",
            Changefreq::Daily => "daily",
            Changefreq::Weekly => "weekly",
            Changefreq::Monthly => "monthly",
            Changefreq::Yearly => "yearly",
            Changefreq::Never => "never",
        }
    }
}

impl fmt::Display for Changefreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteSettings {
    /// Base URL without scheme, e.g. `"example.com"`. Overridable per access.
    pub url: String,
    /// Access used when `accesses` is not set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_access: Option<String>,
    /// Site accesses to generate, in order. An explicitly empty list
    /// generates nothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accesses: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegionalSettings {
    /// Content locale, e.g. `"eng-GB"`. An access without a resolvable
    /// locale is skipped.
    pub locale: Option<String>,
}

impl Config {
    /// Validate value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(priority) = self.sitemap.priority {
            if !(0.0..=1.0).contains(&priority) {
                return Err(ConfigError::Validation(
                    "sitemap.priority must be between 0.0 and 1.0".into(),
                ));
            }
        }
        if self.sitemap.filename.is_empty() {
            return Err(ConfigError::Validation(
                "sitemap.filename must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// One published version of the site: a named access with its locale and URL.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteVariant {
    pub access: String,
    pub locale: String,
    pub site_url: String,
}

/// Loaded settings: the root config plus the resolved site-variant list.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: Config,
    pub variants: Vec<SiteVariant>,
}

impl Settings {
    /// Load and resolve settings from a settings directory.
    ///
    /// Enumerates accesses from `site.accesses` (falling back to
    /// `site.default_access`), merges each access overlay over the root
    /// settings, and keeps the accesses with a resolvable locale, in
    /// configuration order.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let root_raw = load_raw_config(dir)?
            .ok_or_else(|| ConfigError::MissingSettings(dir.join(CONFIG_FILE)))?;
        let config = resolve_config(root_raw.clone(), None)?;

        let access_names = match &config.site.accesses {
            Some(list) => list.clone(),
            None => {
                let access = config.site.default_access.clone().ok_or_else(|| {
                    ConfigError::Validation(
                        "site.default_access is required when site.accesses is not set".into(),
                    )
                })?;
                vec![access]
            }
        };

        let mut variants = Vec::new();
        for access in access_names {
            let overlay = load_raw_config(&dir.join(SITEACCESS_DIR).join(&access))?;
            let merged = resolve_config(root_raw.clone(), overlay)?;
            let Some(locale) = merged.regional.locale else {
                continue;
            };
            variants.push(SiteVariant {
                access,
                locale,
                site_url: merged.site.url,
            });
        }

        Ok(Settings { config, variants })
    }
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
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

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<Config, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: Config = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Sitemapper Configuration
# ========================
# Required keys are uncommented below; optional ones are commented out with
# their defaults or examples. Unknown keys cause an error.
#
# Per-access overlays live in siteaccess/<name>/config.toml and only need the
# keys they override (typically [regional] locale and [site] url):
#   settings/config.toml                  -> root settings
#   settings/siteaccess/eng/config.toml   -> overrides for access "eng"

# ---------------------------------------------------------------------------
# Sitemap generation
# ---------------------------------------------------------------------------
[sitemap]
# Node id the sitemap is rooted at. Descendants of this node are listed.
root_node_id = 2

# Output location, assembled as {path}{filename}_{access}{suffix}.
path = "var/sitemaps/"
filename = "sitemap"
suffix = ".xml"

# Change frequency hint, emitted for every URL when set.
# One of: always, hourly, daily, weekly, monthly, yearly, never.
# changefreq = "weekly"

# Priority hint (0.0 to 1.0), emitted for every URL when set.
# priority = 0.5

# ---------------------------------------------------------------------------
# Content classes
# ---------------------------------------------------------------------------
[classes]
# "include" keeps only the listed classes; "exclude" keeps everything else.
filter_mode = "include"
filter_list = ["article", "folder"]

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Base URL without scheme. Overridable per access.
url = "example.com"

# Access used when `accesses` is not set.
default_access = "site"

# Site accesses to generate, in order. One sitemap file per access.
# accesses = ["eng", "ger"]

# ---------------------------------------------------------------------------
# Regional
# ---------------------------------------------------------------------------
[regional]
# Site-wide default locale; normally set per access instead.
# locale = "eng-GB"
"##
}
