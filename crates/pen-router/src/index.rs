//! Component index
//!
//! Assigns every module path referenced by a manifest a small integer. Paths
//! are sorted before numbering, so the same manifest always yields the same
//! numbers no matter how it was assembled.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::manifest::RouteManifest;
use crate::path::{relative_path, to_slash};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentIndex {
    /// Sorted module paths; position = index
    paths: Vec<String>,
    indices: BTreeMap<String, usize>,
}

impl ComponentIndex {
    /// Collects, sorts and numbers every path in every chain of `manifest`
    ///
    /// # Examples
    ///
    /// ```
    /// use pen_router::{ComponentIndex, FileNode, RouteManifest, SegmentTree};
    ///
    /// let root = FileNode::dir("app", "/app", vec![
    ///     FileNode::file("screen.tsx", "/app/screen.tsx"),
    ///     FileNode::file("layout.tsx", "/app/layout.tsx"),
    /// ]);
    /// let manifest = RouteManifest::from_segments(&SegmentTree::from_file_tree(&root).unwrap());
    /// let index = ComponentIndex::from_manifest(&manifest);
    ///
    /// assert_eq!(index.get("/app/layout"), Some(0));
    /// assert_eq!(index.get("/app/screen"), Some(1));
    /// ```
    pub fn from_manifest(manifest: &RouteManifest) -> Self {
        let unique: BTreeSet<&str> = manifest.routes().flat_map(|route| route.paths()).collect();
        Self::from_sorted(unique.into_iter().map(str::to_string).collect())
    }

    fn from_sorted(paths: Vec<String>) -> Self {
        let indices = paths
            .iter()
            .enumerate()
            .map(|(i, path)| (path.clone(), i))
            .collect();
        Self { paths, indices }
    }

    pub fn get(&self, path: &str) -> Option<usize> {
        self.indices.get(path).copied()
    }

    /// Module path for an index
    pub fn path(&self, index: usize) -> Option<&str> {
        self.paths.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// `(index, path)` pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.paths.iter().map(String::as_str).enumerate()
    }

    /// Import specifiers for generated code living in `generated_dir`
    ///
    /// Each module path becomes a `/`-separated relative specifier with a
    /// `.js` suffix, e.g. `../../src/app/screen.js`.
    pub fn import_paths(&self, generated_dir: impl AsRef<Path>) -> Vec<String> {
        let base = generated_dir.as_ref();
        self.paths
            .iter()
            .map(|path| {
                let rel = to_slash(&relative_path(base, path));
                if rel.starts_with('.') || rel.starts_with('/') {
                    format!("{rel}.js")
                } else {
                    format!("./{rel}.js")
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Route;
    use crate::role::{RoleKind, RoleMap};
    use pretty_assertions::assert_eq;

    fn route(url: &str, levels: &[&[(RoleKind, &str)]]) -> Route {
        let chain = levels
            .iter()
            .map(|pairs| {
                let mut link = RoleMap::default();
                for &(role, path) in pairs.iter() {
                    link.insert(role, path.to_string());
                }
                link
            })
            .collect();
        Route {
            url: url.to_string(),
            chain,
        }
    }

    #[test]
    fn test_empty_manifest_gives_empty_index() {
        let index = ComponentIndex::from_manifest(&RouteManifest::new());
        assert!(index.is_empty());
        assert_eq!(index.get("/app/screen"), None);
    }

    #[test]
    fn test_shared_paths_are_indexed_once() {
        let mut manifest = RouteManifest::new();
        manifest.insert(route("/", &[&[(RoleKind::Screen, "/app/screen"), (RoleKind::Layout, "/app/layout")]]));
        manifest.insert(route("/a/", &[&[(RoleKind::Screen, "/app/a/screen")], &[(RoleKind::Layout, "/app/layout")]]));

        let index = ComponentIndex::from_manifest(&manifest);
        let pairs: Vec<_> = index.iter().collect();
        assert_eq!(
            pairs,
            vec![(0, "/app/a/screen"), (1, "/app/layout"), (2, "/app/screen")]
        );
        assert_eq!(index.path(1), Some("/app/layout"));
        assert_eq!(index.path(3), None);
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let a = route("/a/", &[&[(RoleKind::Screen, "/app/a/screen"), (RoleKind::Error, "/app/a/error")]]);
        let b = route("/b/", &[&[(RoleKind::Screen, "/app/b/screen"), (RoleKind::NotFound, "/app/b/not-found")]]);

        let mut first = RouteManifest::new();
        first.insert(a.clone());
        first.insert(b.clone());

        let mut second = RouteManifest::new();
        second.insert(b);
        second.insert(a);

        assert_eq!(ComponentIndex::from_manifest(&first), ComponentIndex::from_manifest(&second));
    }

    #[test]
    fn test_import_paths_relative_to_generated_dir() {
        let mut manifest = RouteManifest::new();
        manifest.insert(route("/", &[&[(RoleKind::Screen, "/proj/src/app/screen")]]));
        manifest.insert(route("/x/", &[&[(RoleKind::Screen, "/proj/.pen/generated/x/screen")]]));
        let index = ComponentIndex::from_manifest(&manifest);

        assert_eq!(
            index.import_paths("/proj/.pen/generated"),
            vec!["./x/screen.js", "../../src/app/screen.js"]
        );
    }
}
