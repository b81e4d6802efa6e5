//! Filesystem content-tree backend.
//!
//! [`FsStore`] serves a content tree mirrored on disk: every node is a
//! directory carrying a `node.toml` descriptor, and subdirectories with their
//! own descriptor are its children. Directories without a descriptor are
//! ignored, so assets can live next to content.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                         # Content root node
//! ├── node.toml
//! ├── products/
//! │   ├── node.toml
//! │   ├── widget/
//! │   │   └── node.toml
//! │   └── datasheets/              # No node.toml = not part of the tree
//! │       └── widget.pdf
//! └── about/
//!     └── node.toml
//! ```
//!
//! ## Node Descriptor
//!
//! ```toml
//! id = 42                                  # unique across the tree
//! class = "article"
//! slug = "my-article"                      # default URL segment
//! modified = "2014-01-15T10:30:00+00:00"   # RFC 3339
//!
//! [translations]                           # optional
//! eng-GB = "my-article"
//! ger-DE = "mein-artikel"
//! ```
//!
//! ## Locale Semantics
//!
//! A node without a `[translations]` table is available in every locale under
//! its default slug. A node with translations is available only in the listed
//! locales, under that locale's slug. URL paths are built from the slugs of
//! all ancestors below the content root; each segment resolves to the
//! locale's slug, falling back to the default slug for untranslated
//! ancestors.
//!
//! Subtree queries return strict descendants depth-first, siblings in
//! directory-name order. Traversal descends through nodes that fail the
//! class filter or locale check, so a translated article under an
//! untranslated folder is still found.

use crate::tree::{ClassFilter, ContentNode, ContentTree, TreeError};
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

const NODE_FILE: &str = "node.toml";

/// On-disk node descriptor. Unknown keys are rejected.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NodeFile {
    id: u64,
    class: String,
    slug: String,
    modified: String,
    #[serde(default)]
    translations: BTreeMap<String, String>,
}

#[derive(Debug)]
struct StoredNode {
    id: u64,
    class: String,
    slug: String,
    translations: BTreeMap<String, String>,
    modified: DateTime<FixedOffset>,
    parent: Option<usize>,
    children: Vec<usize>,
}

impl StoredNode {
    fn available_in(&self, locale: &str) -> bool {
        self.translations.is_empty() || self.translations.contains_key(locale)
    }

    fn slug_in(&self, locale: &str) -> &str {
        self.translations
            .get(locale)
            .map(String::as_str)
            .unwrap_or(&self.slug)
    }
}

/// A content tree loaded from a directory of `node.toml` descriptors.
///
/// The whole tree is read into memory at [`FsStore::open`]; queries never
/// touch the filesystem again.
pub struct FsStore {
    nodes: Vec<StoredNode>,
    by_id: HashMap<u64, usize>,
}

impl FsStore {
    /// Load the content tree rooted at `root`.
    ///
    /// `root` itself must carry a `node.toml`; it becomes the content root,
    /// which contributes no URL segment.
    pub fn open(root: &Path) -> Result<Self, TreeError> {
        if !root.join(NODE_FILE).exists() {
            return Err(TreeError::MissingRoot(root.to_path_buf()));
        }
        let mut store = FsStore {
            nodes: Vec::new(),
            by_id: HashMap::new(),
        };
        store.load_dir(root, None)?;
        Ok(store)
    }

    fn load_dir(&mut self, dir: &Path, parent: Option<usize>) -> Result<usize, TreeError> {
        let file = read_node_file(&dir.join(NODE_FILE))?;
        let index = self.nodes.len();
        if self.by_id.insert(file.id, index).is_some() {
            return Err(TreeError::DuplicateNodeId {
                id: file.id,
                path: dir.to_path_buf(),
            });
        }
        self.nodes.push(StoredNode {
            id: file.id,
            class: file.class,
            slug: file.slug,
            translations: file.translations,
            modified: parse_modified(&file.modified, dir)?,
            parent,
            children: Vec::new(),
        });

        let mut child_dirs: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_dir() && p.join(NODE_FILE).exists())
            .collect();
        child_dirs.sort();

        for child_dir in child_dirs {
            let child = self.load_dir(&child_dir, Some(index))?;
            self.nodes[index].children.push(child);
        }
        Ok(index)
    }

    /// Slash-joined slugs from below the content root down to `index`.
    fn url_path(&self, index: usize, locale: &str) -> String {
        let mut segments = Vec::new();
        let mut current = Some(index);
        while let Some(i) = current {
            let node = &self.nodes[i];
            if node.parent.is_none() {
                break;
            }
            segments.push(node.slug_in(locale));
            current = node.parent;
        }
        segments.reverse();
        segments.join("/")
    }

    fn localized(&self, index: usize, locale: &str) -> ContentNode {
        let node = &self.nodes[index];
        ContentNode {
            id: node.id,
            class: node.class.clone(),
            url_path: self.url_path(index, locale),
            modified: node.modified,
        }
    }

    fn collect_descendants(
        &self,
        index: usize,
        filter: &ClassFilter,
        locale: &str,
        out: &mut Vec<ContentNode>,
    ) {
        for &child in &self.nodes[index].children {
            let node = &self.nodes[child];
            if node.available_in(locale) && filter.matches(&node.class) {
                out.push(self.localized(child, locale));
            }
            self.collect_descendants(child, filter, locale, out);
        }
    }
}

impl ContentTree for FsStore {
    fn fetch_root(
        &self,
        node_id: u64,
        locale: &str,
    ) -> Result<Option<ContentNode>, TreeError> {
        let Some(&index) = self.by_id.get(&node_id) else {
            return Ok(None);
        };
        if !self.nodes[index].available_in(locale) {
            return Ok(None);
        }
        Ok(Some(self.localized(index, locale)))
    }

    fn fetch_subtree(
        &self,
        root: &ContentNode,
        filter: &ClassFilter,
        locale: &str,
    ) -> Result<Vec<ContentNode>, TreeError> {
        let Some(&index) = self.by_id.get(&root.id) else {
            return Ok(Vec::new());
        };
        let mut out = Vec::new();
        self.collect_descendants(index, filter, locale, &mut out);
        Ok(out)
    }
}

fn read_node_file(path: &Path) -> Result<NodeFile, TreeError> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|source| TreeError::NodeFile {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_modified(raw: &str, dir: &Path) -> Result<DateTime<FixedOffset>, TreeError> {
    DateTime::parse_from_rfc3339(raw).map_err(|source| TreeError::Timestamp {
        path: dir.join(NODE_FILE),
        source,
    })
}
