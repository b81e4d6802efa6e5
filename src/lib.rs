//! # Sitemapper
//!
//! An XML sitemap generator for CMS content trees. One run walks the content
//! tree once per configured site access and writes one sitemaps.org XML file
//! per access, localized to that access's locale and base URL.
//!
//! # Architecture: One Pass Per Site Access
//!
//! ```text
//! settings/  ─┐
//!             ├─ resolve variants ─ for each access: fetch ─ build ─ write
//! content/   ─┘                                                      │
//!                                      var/sitemaps/sitemap_<access>.xml
//! ```
//!
//! The pipeline is strictly sequential and all-or-nothing: the first failure
//! aborts the run. Earlier accesses' files stay on disk; later ones are never
//! written.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Settings loading, per-access overlay merging, site-variant resolution |
//! | [`tree`] | The `ContentTree` query trait, node and class-filter types |
//! | [`store`] | Filesystem content-tree backend (`node.toml` descriptors) |
//! | [`sitemap`] | Sitemap document building and XML serialization |
//! | [`generate`] | Per-variant orchestration: fetch → build → write, progress events |
//! | [`output`] | CLI output formatting — pure `format_*` functions plus print wrappers |
//!
//! # Design Decisions
//!
//! ## Tree Access Behind a Trait
//!
//! The pipeline only sees [`tree::ContentTree`]. The shipped backend is a
//! filesystem mirror ([`store::FsStore`]) — every node a directory with a
//! `node.toml` descriptor — so the tool runs and tests end-to-end without a
//! live CMS, and a database-backed tree is a new impl away.
//!
//! ## Overlay Settings
//!
//! Site accesses share the root settings file; each access overlays only what
//! differs (its locale, and for multi-domain sites its URL). The merge is
//! raw-TOML, table by table, so overlays stay sparse and the merged view is
//! re-validated as a whole.
//!
//! ## Hand-Rendered XML
//!
//! The sitemap schema is four elements deep with text-only content; the
//! serializer is a string builder with an escaping helper rather than an XML
//! library. Malformed output is caught by the test suite, not a runtime
//! dependency.

pub mod config;
pub mod generate;
pub mod output;
pub mod sitemap;
pub mod store;
pub mod tree;

#[cfg(test)]
pub(crate) mod test_helpers;
