//! Segment classifier
//!
//! Turns a scanned [`FileNode`] tree into a [`SegmentTree`]: one node per
//! routable directory, each with its URL, its kind (page or group) and the
//! role files found directly inside it.
//!
//! ## Conventions
//!
//! - `(name)` directories are groups: they keep their parent's URL
//! - `_name` directories are excluded together with their whole subtree
//! - `<role>.<ext>` files assign a role (see [`RoleKind`])
//!
//! Directories that own no role file and have no routable descendant are
//! dropped; the root is always kept.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::ops::Index;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{Result, RouterError};
use crate::path::join_url;
use crate::role::{RoleKind, RoleMap};
use crate::scanner::FileNode;

pub mod hierarchy;
pub use hierarchy::Ancestors;

/// Marker that opens a group directory name
pub const GROUP_OPEN: char = '(';
/// Marker that closes a group directory name
pub const GROUP_CLOSE: char = ')';
/// Prefix that excludes a directory and its subtree
pub const EXCLUDE_PREFIX: char = '_';

/// Returns true for `(name)` directory names
///
/// ```
/// use pen_router::segment::is_group_name;
///
/// assert!(is_group_name("(auth)"));
/// assert!(!is_group_name("auth"));
/// assert!(!is_group_name("(auth"));
/// ```
pub fn is_group_name(name: &str) -> bool {
    name.len() >= 2 && name.starts_with(GROUP_OPEN) && name.ends_with(GROUP_CLOSE)
}

/// Returns true for directory names that are excluded from routing
pub fn is_excluded_name(name: &str) -> bool {
    name.starts_with(EXCLUDE_PREFIX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Page,
    Group,
}

/// Handle into a [`SegmentTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(usize);

impl SegmentId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One route segment (one directory)
#[derive(Debug, Clone)]
pub struct SegmentNode {
    /// Directory name; empty for the root
    pub segment: String,
    /// URL with leading and trailing slash
    pub url: String,
    pub kind: SegmentKind,
    /// Role files owned by this directory (full source paths)
    pub roles: RoleMap<PathBuf>,
    /// Directory path on disk
    pub dir: PathBuf,
    parent: Option<SegmentId>,
    children: Vec<SegmentId>,
}

impl SegmentNode {
    pub fn parent(&self) -> Option<SegmentId> {
        self.parent
    }

    pub fn children(&self) -> &[SegmentId] {
        &self.children
    }

    pub fn is_group(&self) -> bool {
        self.kind == SegmentKind::Group
    }

    pub fn screen(&self) -> Option<&PathBuf> {
        self.roles.get(RoleKind::Screen)
    }
}

/// Arena-backed segment tree
///
/// Nodes are stored in pre-order with the root at index 0. Children own
/// nothing; `parent` is a plain handle used for ancestor walks.
#[derive(Debug, Clone)]
pub struct SegmentTree {
    nodes: Vec<SegmentNode>,
}

impl SegmentTree {
    /// Classifies a scanned app directory
    ///
    /// # Errors
    ///
    /// - [`RouterError::RootIsFile`] if `root` is a file node
    /// - [`RouterError::DuplicateRoleFile`] if one directory has two files for
    ///   the same role (e.g. `screen.tsx` and `screen.jsx`)
    /// - [`RouterError::DuplicateScreen`] if two segments resolve to the same URL
    ///   and both own a screen
    pub fn from_file_tree(root: &FileNode) -> Result<Self> {
        if !root.is_dir() {
            return Err(RouterError::RootIsFile {
                path: root.path.clone(),
            });
        }

        let mut classifier = Classifier::default();
        let draft = classifier
            .classify(root, String::new(), "/".to_string(), SegmentKind::Page, true)?
            .unwrap_or_else(|| Draft::empty_root(root));

        let mut nodes = Vec::new();
        flatten(&mut nodes, draft, None);

        debug!(
            segments = nodes.len(),
            screens = classifier.screens.len(),
            "classified segment tree"
        );
        Ok(Self { nodes })
    }

    pub fn root(&self) -> SegmentId {
        SegmentId(0)
    }

    pub fn get(&self, id: SegmentId) -> Option<&SegmentNode> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates all segments in pre-order (parents before children,
    /// siblings by name)
    pub fn iter(&self) -> impl Iterator<Item = (SegmentId, &SegmentNode)> + '_ {
        self.nodes.iter().enumerate().map(|(i, node)| (SegmentId(i), node))
    }

    /// Walks from `id` up to the root, `id` first
    pub fn ancestors(&self, id: SegmentId) -> Ancestors<'_> {
        Ancestors::new(self, id)
    }

    /// Finds the segment that owns the screen for `url`
    pub fn find_screen(&self, url: &str) -> Option<SegmentId> {
        self.iter()
            .find(|(_, node)| node.url == url && node.screen().is_some())
            .map(|(id, _)| id)
    }
}

impl Index<SegmentId> for SegmentTree {
    type Output = SegmentNode;

    fn index(&self, id: SegmentId) -> &Self::Output {
        &self.nodes[id.0]
    }
}

/// Owned intermediate form, flattened into the arena once pruning is done
struct Draft {
    segment: String,
    url: String,
    kind: SegmentKind,
    roles: RoleMap<PathBuf>,
    dir: PathBuf,
    children: Vec<Draft>,
}

impl Draft {
    fn empty_root(root: &FileNode) -> Self {
        Self {
            segment: String::new(),
            url: "/".to_string(),
            kind: SegmentKind::Page,
            roles: RoleMap::default(),
            dir: root.path.clone(),
            children: Vec::new(),
        }
    }
}

/// Per-build state; dropped when the build returns
#[derive(Default)]
struct Classifier {
    /// url → screen file that claimed it
    screens: HashMap<String, PathBuf>,
}

impl Classifier {
    fn classify(
        &mut self,
        dir: &FileNode,
        segment: String,
        url: String,
        kind: SegmentKind,
        is_root: bool,
    ) -> Result<Option<Draft>> {
        let roles = assign_roles(dir)?;

        if let Some(screen) = roles.get(RoleKind::Screen) {
            match self.screens.entry(url.clone()) {
                Entry::Occupied(existing) => {
                    return Err(RouterError::DuplicateScreen {
                        url,
                        paths: vec![existing.get().clone(), screen.clone()],
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(screen.clone());
                }
            }
        }

        let mut subdirs: Vec<&FileNode> = dir
            .entries()
            .iter()
            .filter(|child| child.is_dir() && !is_excluded_name(&child.name))
            .collect();
        subdirs.sort_by(|a, b| a.name.cmp(&b.name));

        let mut children = Vec::new();
        for child in subdirs {
            let (child_url, child_kind) = if is_group_name(&child.name) {
                (url.clone(), SegmentKind::Group)
            } else {
                (join_url(&url, &child.name), SegmentKind::Page)
            };
            if let Some(draft) =
                self.classify(child, child.name.clone(), child_url, child_kind, false)?
            {
                children.push(draft);
            }
        }

        if !is_root && roles.is_empty() && children.is_empty() {
            trace!(dir = %dir.path.display(), "pruned segment without routes");
            return Ok(None);
        }

        trace!(url = %url, segment = %segment, ?kind, "classified segment");
        Ok(Some(Draft {
            segment,
            url,
            kind,
            roles,
            dir: dir.path.clone(),
            children,
        }))
    }
}

/// Collects the role files sitting directly inside `dir`
fn assign_roles(dir: &FileNode) -> Result<RoleMap<PathBuf>> {
    let mut files: Vec<&FileNode> = dir.entries().iter().filter(|c| !c.is_dir()).collect();
    files.sort_by(|a, b| a.name.cmp(&b.name));

    let mut claims: BTreeMap<RoleKind, Vec<PathBuf>> = BTreeMap::new();
    for file in files {
        if let Some(role) = RoleKind::from_file_name(&file.name) {
            claims.entry(role).or_default().push(file.path.clone());
        }
    }

    let mut roles = RoleMap::default();
    for (role, mut paths) in claims {
        if paths.len() > 1 {
            return Err(RouterError::DuplicateRoleFile {
                dir: dir.path.clone(),
                role,
                paths,
            });
        }
        if let Some(path) = paths.pop() {
            roles.insert(role, path);
        }
    }
    Ok(roles)
}

fn flatten(nodes: &mut Vec<SegmentNode>, draft: Draft, parent: Option<SegmentId>) -> SegmentId {
    let Draft {
        segment,
        url,
        kind,
        roles,
        dir,
        children,
    } = draft;

    let id = SegmentId(nodes.len());
    nodes.push(SegmentNode {
        segment,
        url,
        kind,
        roles,
        dir,
        parent,
        children: Vec::new(),
    });

    let child_ids: Vec<SegmentId> = children
        .into_iter()
        .map(|child| flatten(nodes, child, Some(id)))
        .collect();
    nodes[id.0].children = child_ids;
    id
}
