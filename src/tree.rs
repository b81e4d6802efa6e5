//! Content-tree query capability.
//!
//! The sitemap pipeline never talks to a tree storage engine directly; it
//! consumes nodes through the narrow [`ContentTree`] trait. This keeps the
//! orchestration in [`crate::generate`] testable against any backend, be it
//! the shipped filesystem mirror ([`crate::store::FsStore`]) or an in-memory
//! stub.
//!
//! A fetch is always localized: the same tree yields a different node set and
//! different URL paths per locale, which is what makes one sitemap file per
//! site access meaningful.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid node descriptor {path}: {source}")]
    NodeFile {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid modification timestamp in {path}: {source}")]
    Timestamp {
        path: PathBuf,
        source: chrono::ParseError,
    },
    #[error("Duplicate node id {id} at {path}")]
    DuplicateNodeId { id: u64, path: PathBuf },
    #[error("Content root has no node descriptor: {0}")]
    MissingRoot(PathBuf),
}

/// A content node as seen by the sitemap pipeline.
///
/// `url_path` is already resolved for the locale the node was fetched in:
/// slash-joined URL segments below the content root, no leading slash.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentNode {
    pub id: u64,
    /// Content class identifier (e.g. `"article"`, `"folder"`).
    pub class: String,
    pub url_path: String,
    /// Last modification of the underlying content object.
    pub modified: DateTime<FixedOffset>,
}

/// Which side of the class list is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Keep only nodes whose class is in the list.
    Include,
    /// Keep only nodes whose class is not in the list.
    Exclude,
}

/// Content-class selection for subtree fetches.
///
/// Deserialized straight from the `[classes]` settings section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassFilter {
    pub filter_mode: FilterMode,
    pub filter_list: Vec<String>,
}

impl ClassFilter {
    pub fn matches(&self, class: &str) -> bool {
        let listed = self.filter_list.iter().any(|c| c == class);
        match self.filter_mode {
            FilterMode::Include => listed,
            FilterMode::Exclude => !listed,
        }
    }
}

/// Read access to a localized content tree.
pub trait ContentTree {
    /// Fetch a node by id, localized. `Ok(None)` means the id does not exist
    /// or the node is not available in the requested locale.
    fn fetch_root(
        &self,
        node_id: u64,
        locale: &str,
    ) -> Result<Option<ContentNode>, TreeError>;

    /// Fetch the strict descendants of `root` (the root itself is not
    /// listed), keeping only nodes available in `locale` that pass `filter`.
    /// Order is backend-defined but must be stable across calls.
    fn fetch_subtree(
        &self,
        root: &ContentNode,
        filter: &ClassFilter,
        locale: &str,
    ) -> Result<Vec<ContentNode>, TreeError>;
}
