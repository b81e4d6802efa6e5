//! Per-variant sitemap generation.
//!
//! The orchestration step of the pipeline: walks the resolved site-variant
//! list in order and, for each variant, fetches the configured root node at
//! the variant's locale, fetches the filtered subtree, builds the sitemap
//! document, and writes it to `{path}{filename}_{access}{suffix}` under the
//! output base directory.
//!
//! The run is strictly sequential and all-or-nothing: the first failure
//! (including a root node that does not resolve for one variant) aborts the
//! whole run. Files already written for earlier variants stay on disk;
//! variants not yet processed produce nothing.
//!
//! Progress is reported through [`GenerateEvent`] callbacks so the CLI can
//! print (or suppress) lines without this module touching stdout.

use crate::config::{Config, ConfigError, Settings, SiteVariant};
use crate::sitemap::Sitemap;
use crate::tree::{ContentTree, TreeError};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),
    #[error(
        "Invalid sitemap root node {node_id} for site access {access} (locale {locale})"
    )]
    InvalidRootNode {
        node_id: u64,
        access: String,
        locale: String,
    },
    #[error("Failed to write sitemap {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Progress notifications, one consumer-facing line each.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateEvent {
    Started,
    VariantStarted {
        access: String,
    },
    VariantWritten {
        access: String,
        locale: String,
        path: PathBuf,
        url_count: usize,
    },
}

/// Outcome of one variant, for summaries and `check` listings.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantReport {
    pub access: String,
    pub locale: String,
    pub output_path: PathBuf,
    pub url_count: usize,
}

/// Generate one sitemap file per resolved site variant.
///
/// Output paths are the configured `{path}{filename}_{access}{suffix}`
/// resolved against `out_base`. Existing files are overwritten.
pub fn generate(
    settings: &Settings,
    tree: &impl ContentTree,
    out_base: &Path,
    mut on_event: impl FnMut(GenerateEvent),
) -> Result<Vec<VariantReport>, GenerateError> {
    on_event(GenerateEvent::Started);

    let mut reports = Vec::new();
    for variant in &settings.variants {
        on_event(GenerateEvent::VariantStarted {
            access: variant.access.clone(),
        });

        let sitemap = build_variant(&settings.config, tree, variant)?;
        let path = out_base.join(settings.config.sitemap.output_file(&variant.access));
        sitemap
            .write(&path)
            .map_err(|source| GenerateError::Write {
                path: path.clone(),
                source,
            })?;

        on_event(GenerateEvent::VariantWritten {
            access: variant.access.clone(),
            locale: variant.locale.clone(),
            path: path.clone(),
            url_count: sitemap.len(),
        });
        reports.push(VariantReport {
            access: variant.access.clone(),
            locale: variant.locale.clone(),
            output_path: path,
            url_count: sitemap.len(),
        });
    }

    Ok(reports)
}

/// Dry run: resolve every variant and count its URLs without writing.
///
/// Reported paths are the configured ones, not resolved against an output
/// base, since nothing is written.
pub fn check(
    settings: &Settings,
    tree: &impl ContentTree,
) -> Result<Vec<VariantReport>, GenerateError> {
    let mut reports = Vec::new();
    for variant in &settings.variants {
        let sitemap = build_variant(&settings.config, tree, variant)?;
        reports.push(VariantReport {
            access: variant.access.clone(),
            locale: variant.locale.clone(),
            output_path: settings.config.sitemap.output_file(&variant.access),
            url_count: sitemap.len(),
        });
    }
    Ok(reports)
}

fn build_variant(
    config: &Config,
    tree: &impl ContentTree,
    variant: &SiteVariant,
) -> Result<Sitemap, GenerateError> {
    let root = tree
        .fetch_root(config.sitemap.root_node_id, &variant.locale)?
        .ok_or_else(|| GenerateError::InvalidRootNode {
            node_id: config.sitemap.root_node_id,
            access: variant.access.clone(),
            locale: variant.locale.clone(),
        })?;
    let nodes = tree.fetch_subtree(&root, &config.classes, &variant.locale)?;
    Ok(Sitemap::from_nodes(
        &nodes,
        &variant.site_url,
        &config.sitemap,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FsStore;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, Settings, FsStore) {
        let tmp = TempDir::new().unwrap();
        let settings_dir = tmp.path().join("settings");
        let content_dir = tmp.path().join("content");
        sample_settings(&settings_dir);
        sample_content_tree(&content_dir);
        let settings = Settings::load(&settings_dir).unwrap();
        let store = FsStore::open(&content_dir).unwrap();
        (tmp, settings, store)
    }

    #[test]
    fn one_file_per_variant() {
        let (tmp, settings, store) = fixture();
        let out = tmp.path().join("out");

        let reports = generate(&settings, &store, &out, |_| {}).unwrap();

        assert_eq!(reports.len(), 2);
        assert!(out.join("var/sitemaps/sitemap_eng.xml").is_file());
        assert!(out.join("var/sitemaps/sitemap_ger.xml").is_file());
    }

    #[test]
    fn file_contents_follow_locale_and_site_url() {
        let (tmp, settings, store) = fixture();
        let out = tmp.path().join("out");

        generate(&settings, &store, &out, |_| {}).unwrap();

        let eng = std::fs::read_to_string(out.join("var/sitemaps/sitemap_eng.xml")).unwrap();
        assert!(eng.contains("<loc>http://example.com/about</loc>"));
        assert!(eng.contains("<loc>http://example.com/products/widget</loc>"));
        assert!(eng.contains("<loc>http://example.com/products/gadget</loc>"));

        let ger = std::fs::read_to_string(out.join("var/sitemaps/sitemap_ger.xml")).unwrap();
        // German variant uses its URL override and translated slugs; the
        // untranslated gadget node is absent.
        assert!(ger.contains("<loc>http://de.example.com/produkte/widget</loc>"));
        assert!(!ger.contains("gadget"));
    }

    #[test]
    fn zero_matching_nodes_writes_an_empty_urlset() {
        let (tmp, mut settings, store) = fixture();
        settings.config.classes.filter_list = vec!["press-release".to_string()];
        let out = tmp.path().join("out");

        let reports = generate(&settings, &store, &out, |_| {}).unwrap();
        assert_eq!(reports[0].url_count, 0);

        let xml = std::fs::read_to_string(out.join("var/sitemaps/sitemap_eng.xml")).unwrap();
        assert!(xml.contains("<urlset"));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn unknown_root_node_aborts_before_any_file() {
        let (tmp, mut settings, store) = fixture();
        settings.config.sitemap.root_node_id = 999;
        let out = tmp.path().join("out");

        let result = generate(&settings, &store, &out, |_| {});
        assert!(matches!(
            result,
            Err(GenerateError::InvalidRootNode { node_id: 999, .. })
        ));
        assert!(!out.join("var/sitemaps/sitemap_eng.xml").exists());
        assert!(!out.join("var/sitemaps/sitemap_ger.xml").exists());
    }

    #[test]
    fn failing_second_variant_keeps_first_file_only() {
        let tmp = TempDir::new().unwrap();
        let settings_dir = tmp.path().join("settings");
        let content_dir = tmp.path().join("content");
        sample_settings(&settings_dir);
        // Root translated to eng-GB only: the ger variant cannot resolve it
        write_node_translated(
            &content_dir,
            2,
            "folder",
            "home",
            "2014-01-01T00:00:00+00:00",
            &[("eng-GB", "home")],
        );
        write_node(
            &content_dir.join("about"),
            20,
            "article",
            "about",
            "2014-03-02T08:15:00+00:00",
        );

        let settings = Settings::load(&settings_dir).unwrap();
        let store = FsStore::open(&content_dir).unwrap();
        let out = tmp.path().join("out");

        let result = generate(&settings, &store, &out, |_| {});
        assert!(matches!(
            result,
            Err(GenerateError::InvalidRootNode { .. })
        ));
        // All-or-nothing across the remaining run: eng was already written,
        // ger never is.
        assert!(out.join("var/sitemaps/sitemap_eng.xml").is_file());
        assert!(!out.join("var/sitemaps/sitemap_ger.xml").exists());
    }

    #[test]
    fn events_are_emitted_in_order() {
        let (tmp, settings, store) = fixture();
        let out = tmp.path().join("out");

        let mut events = Vec::new();
        generate(&settings, &store, &out, |e| events.push(e)).unwrap();

        assert_eq!(events[0], GenerateEvent::Started);
        assert!(matches!(
            &events[1],
            GenerateEvent::VariantStarted { access } if access == "eng"
        ));
        assert!(matches!(
            &events[2],
            GenerateEvent::VariantWritten { access, url_count: 3, .. } if access == "eng"
        ));
        assert!(matches!(
            &events[3],
            GenerateEvent::VariantStarted { access } if access == "ger"
        ));
        assert!(matches!(
            &events[4],
            GenerateEvent::VariantWritten { access, url_count: 2, .. } if access == "ger"
        ));
        assert_eq!(events.len(), 5);
    }

    #[test]
    fn check_reports_without_writing() {
        let (tmp, settings, store) = fixture();

        let reports = check(&settings, &store).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].access, "eng");
        assert_eq!(reports[0].url_count, 3);
        assert_eq!(
            reports[0].output_path,
            PathBuf::from("var/sitemaps/sitemap_eng.xml")
        );
        assert_eq!(reports[1].url_count, 2);

        assert!(!tmp.path().join("var").exists());
    }
}
