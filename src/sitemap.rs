//! Sitemap document building and XML serialization.
//!
//! Renders the sitemaps.org 0.9 schema:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>http://example.com/products/widget</loc>
//!     <lastmod>2014-01-15T10:30:00+00:00</lastmod>
//!   </url>
//! </urlset>
//! ```
//!
//! `<changefreq>` and `<priority>` are emitted only when configured. A
//! document with zero entries is still a well-formed `<urlset>`.

use crate::config::{Changefreq, SitemapSettings};
use crate::tree::ContentNode;
use chrono::SecondsFormat;
use std::borrow::Cow;
use std::fs;
use std::path::Path;

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// One `<url>` record.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlEntry {
    pub loc: String,
    /// RFC 3339 with numeric offset, the XML-schema dateTime rendering.
    pub lastmod: String,
    pub changefreq: Option<Changefreq>,
    pub priority: Option<f32>,
}

impl UrlEntry {
    /// Map a fetched node to a record: `loc` is `http://` + site URL + `/` +
    /// the node's URL path; `lastmod` is the node's modification timestamp.
    pub fn from_node(node: &ContentNode, site_url: &str, settings: &SitemapSettings) -> Self {
        UrlEntry {
            loc: format!("http://{}/{}", site_url, node.url_path),
            lastmod: node
                .modified
                .to_rfc3339_opts(SecondsFormat::Secs, false),
            changefreq: settings.changefreq,
            priority: settings.priority,
        }
    }
}

/// An ordered sitemap document, built fresh per site variant.
#[derive(Debug, Clone)]
pub struct Sitemap {
    urls: Vec<UrlEntry>,
}

impl Sitemap {
    pub fn new(urls: Vec<UrlEntry>) -> Self {
        Sitemap { urls }
    }

    /// Build from fetched nodes, keeping fetch order.
    pub fn from_nodes(
        nodes: &[ContentNode],
        site_url: &str,
        settings: &SitemapSettings,
    ) -> Self {
        let urls = nodes
            .iter()
            .map(|node| UrlEntry::from_node(node, site_url, settings))
            .collect();
        Sitemap { urls }
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\">\n");

        for entry in &self.urls {
            xml.push_str("  <url>\n    <loc>");
            xml.push_str(&escape_xml(&entry.loc));
            xml.push_str("</loc>\n    <lastmod>");
            xml.push_str(&entry.lastmod);
            xml.push_str("</lastmod>\n");
            if let Some(changefreq) = entry.changefreq {
                xml.push_str("    <changefreq>");
                xml.push_str(changefreq.as_str());
                xml.push_str("</changefreq>\n");
            }
            if let Some(priority) = entry.priority {
                xml.push_str("    <priority>");
                xml.push_str(&format!("{:.1}", priority));
                xml.push_str("</priority>\n");
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Write the document to `path`, creating parent directories and
    /// overwriting any existing file.
    pub fn write(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_xml())
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> Cow<'_, str> {
    // Fast path: check if escaping is needed
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}
