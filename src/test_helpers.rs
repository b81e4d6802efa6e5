//! Shared test utilities for the sitemapper test suite.
//!
//! Provides fixture builders for the two input trees the tool consumes: a
//! settings directory (root config plus per-access overlays) and a content
//! tree of `node.toml` descriptors.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! sample_settings(&tmp.path().join("settings"));
//! sample_content_tree(&tmp.path().join("content"));
//! ```

use std::fs;
use std::path::Path;

// =========================================================================
// Content-tree fixtures
// =========================================================================

/// Write an untranslated node descriptor into `dir`, creating the directory.
///
/// Untranslated nodes are available in every locale under their default slug.
pub fn write_node(dir: &Path, id: u64, class: &str, slug: &str, modified: &str) {
    write_node_translated(dir, id, class, slug, modified, &[]);
}

/// Write a node descriptor with an explicit translation table.
pub fn write_node_translated(
    dir: &Path,
    id: u64,
    class: &str,
    slug: &str,
    modified: &str,
    translations: &[(&str, &str)],
) {
    let mut body = format!(
        "id = {id}\nclass = \"{class}\"\nslug = \"{slug}\"\nmodified = \"{modified}\"\n"
    );
    if !translations.is_empty() {
        body.push_str("\n[translations]\n");
        for (locale, slug) in translations {
            body.push_str(&format!("{locale} = \"{slug}\"\n"));
        }
    }
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("node.toml"), body).unwrap();
}

/// Build the canonical content tree used across the suite.
///
/// ```text
/// <root>          id 2,  folder,  "home"       (all locales)
/// ├── about       id 20, article, "about"      (all locales)
/// ├── internal    id 30, folder,  "internal"   (all locales)
/// │   └── note    id 31, comment, "note"       (all locales)
/// └── products    id 10, folder,  eng-GB "products" / ger-DE "produkte"
///     ├── gadget  id 12, article, eng-GB "gadget" only
///     └── widget  id 11, article, eng-GB + ger-DE "widget"
/// ```
///
/// With an include filter on `article`, locale `eng-GB` yields
/// `about`, `products/gadget`, `products/widget` (in that order) and
/// `ger-DE` yields `about`, `produkte/widget`.
pub fn sample_content_tree(root: &Path) {
    write_node(root, 2, "folder", "home", "2014-01-01T00:00:00+00:00");
    write_node(
        &root.join("about"),
        20,
        "article",
        "about",
        "2014-03-02T08:15:00+00:00",
    );
    write_node(
        &root.join("internal"),
        30,
        "folder",
        "internal",
        "2014-01-05T00:00:00+00:00",
    );
    write_node(
        &root.join("internal/note"),
        31,
        "comment",
        "note",
        "2014-01-06T00:00:00+00:00",
    );
    write_node_translated(
        &root.join("products"),
        10,
        "folder",
        "products",
        "2014-02-01T12:00:00+00:00",
        &[("eng-GB", "products"), ("ger-DE", "produkte")],
    );
    write_node_translated(
        &root.join("products/gadget"),
        12,
        "article",
        "gadget",
        "2014-02-20T09:00:00+01:00",
        &[("eng-GB", "gadget")],
    );
    write_node_translated(
        &root.join("products/widget"),
        11,
        "article",
        "widget",
        "2014-02-10T16:45:00+00:00",
        &[("eng-GB", "widget"), ("ger-DE", "widget")],
    );
}

// =========================================================================
// Settings fixtures
// =========================================================================

/// Write the root `config.toml` into a settings directory.
pub fn write_root_settings(dir: &Path, body: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("config.toml"), body).unwrap();
}

/// Write a per-access overlay into `siteaccess/<access>/config.toml`.
pub fn write_access_settings(dir: &Path, access: &str, body: &str) {
    let access_dir = dir.join("siteaccess").join(access);
    fs::create_dir_all(&access_dir).unwrap();
    fs::write(access_dir.join("config.toml"), body).unwrap();
}

/// Build the canonical settings directory: accesses `eng` and `ger`, an
/// include filter on `article`, and a German URL override.
pub fn sample_settings(dir: &Path) {
    write_root_settings(
        dir,
        r#"
[sitemap]
root_node_id = 2
path = "var/sitemaps/"
filename = "sitemap"
suffix = ".xml"

[classes]
filter_mode = "include"
filter_list = ["article"]

[site]
url = "example.com"
default_access = "eng"
accesses = ["eng", "ger"]
"#,
    );
    write_access_settings(dir, "eng", "[regional]\nlocale = \"eng-GB\"\n");
    write_access_settings(
        dir,
        "ger",
        "[regional]\nlocale = \"ger-DE\"\n\n[site]\nurl = \"de.example.com\"\n",
    );
}
