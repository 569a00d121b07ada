//! Route manifest
//!
//! Flattens a [`SegmentTree`] into a URL-keyed map with one [`Route`] per
//! segment that owns a screen. Each route carries its chain of owned roles,
//! leaf first, so consumers can rebuild layout/error/not-found inheritance
//! without the segment tree.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{Result, RouterError};
use crate::path::module_path;
use crate::role::{RoleKind, RoleMap};
use crate::segment::{SegmentId, SegmentTree};

/// Roles owned by one segment level, as module paths
pub type ChainLink = RoleMap<String>;

/// One routable URL and the roles needed to compose it
///
/// `chain[0]` is the segment that owns the screen; each following element is
/// the next ancestor up to the root. Only `chain[0]` carries a screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub url: String,
    pub chain: Vec<ChainLink>,
}

impl Route {
    /// The segment that owns the screen
    pub fn leaf(&self) -> Result<&ChainLink> {
        self.chain.first().ok_or_else(|| RouterError::EmptyChain {
            url: self.url.clone(),
        })
    }

    pub fn screen(&self) -> Result<&str> {
        self.leaf()?
            .screen
            .as_deref()
            .ok_or_else(|| RouterError::MissingScreen {
                url: self.url.clone(),
            })
    }

    /// Checks the chain invariants: non-empty, screen at the leaf and nowhere else
    pub fn validate(&self) -> Result<()> {
        self.screen()?;
        match self.chain.iter().skip(1).position(|link| link.screen.is_some()) {
            Some(offset) => Err(RouterError::StrayScreen {
                url: self.url.clone(),
                level: offset + 1,
            }),
            None => Ok(()),
        }
    }

    /// Every module path referenced by the chain
    pub fn paths(&self) -> impl Iterator<Item = &str> + '_ {
        self.chain
            .iter()
            .flat_map(|link| link.iter().map(|(_, path)| path.as_str()))
    }

    /// Applies nearest-wins inheritance over the chain
    ///
    /// Layouts are collected leaf → root; `error` and `not-found` come from the
    /// closest level that owns one.
    pub fn resolve(&self) -> Result<ResolvedRoute> {
        let screen = self.screen()?.to_string();
        let mut resolved = ResolvedRoute {
            screen,
            layouts: Vec::new(),
            error: None,
            not_found: None,
        };

        for link in &self.chain {
            if let Some(layout) = &link.layout {
                resolved.layouts.push(layout.clone());
            }
            if resolved.error.is_none() {
                resolved.error = link.error.clone();
            }
            if resolved.not_found.is_none() {
                resolved.not_found = link.not_found.clone();
            }
        }
        Ok(resolved)
    }
}

/// A route with inheritance applied, in the shape code generators consume
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRoute {
    pub screen: String,
    /// Leaf → root
    pub layouts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, rename = "not-found", skip_serializing_if = "Option::is_none")]
    pub not_found: Option<String>,
}

/// URL → [`Route`]
///
/// Lookups are by key. Iteration happens to be URL-sorted but callers must
/// not rely on any order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteManifest {
    routes: BTreeMap<String, Route>,
}

impl RouteManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the manifest from a classified segment tree
    ///
    /// # Examples
    ///
    /// ```
    /// use pen_router::{FileNode, RouteManifest, SegmentTree};
    ///
    /// let root = FileNode::dir("app", "/app", vec![
    ///     FileNode::file("layout.tsx", "/app/layout.tsx"),
    ///     FileNode::file("screen.tsx", "/app/screen.tsx"),
    /// ]);
    /// let tree = SegmentTree::from_file_tree(&root).unwrap();
    /// let manifest = RouteManifest::from_segments(&tree);
    ///
    /// let route = manifest.get("/").unwrap();
    /// assert_eq!(route.screen().unwrap(), "/app/screen");
    /// assert_eq!(route.resolve().unwrap().layouts, vec!["/app/layout"]);
    /// ```
    pub fn from_segments(tree: &SegmentTree) -> Self {
        let mut manifest = Self::new();
        collect(tree, tree.root(), &Inherited::default(), &mut manifest);
        debug!(routes = manifest.len(), "built route manifest");
        manifest
    }

    /// Parses a manifest from JSON and re-checks every chain
    pub fn from_json(json: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(json)?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Inserts a route under its own URL, returning the route it replaced
    pub fn insert(&mut self, route: Route) -> Option<Route> {
        self.routes.insert(route.url.clone(), route)
    }

    pub fn get(&self, url: &str) -> Option<&Route> {
        self.routes.get(url)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> + '_ {
        self.routes.values()
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> + '_ {
        self.routes.keys().map(String::as_str)
    }

    pub fn validate(&self) -> Result<()> {
        self.routes().try_for_each(Route::validate)
    }

    /// Resolved view of every route, keyed by URL
    pub fn resolved(&self) -> Result<BTreeMap<String, ResolvedRoute>> {
        self.routes
            .iter()
            .map(|(url, route)| Ok((url.clone(), route.resolve()?)))
            .collect()
    }
}

/// Effective roles flowing down from ancestors during the walk
#[derive(Debug, Clone, Default)]
struct Inherited {
    /// Root → current
    layouts: Vec<String>,
    error: Option<String>,
    not_found: Option<String>,
}

impl Inherited {
    fn descend(&self, roles: &RoleMap<PathBuf>) -> Self {
        let mut next = self.clone();
        if let Some(layout) = &roles.layout {
            next.layouts.push(module_path(layout));
        }
        if let Some(error) = &roles.error {
            next.error = Some(module_path(error));
        }
        if let Some(not_found) = &roles.not_found {
            next.not_found = Some(module_path(not_found));
        }
        next
    }

    fn resolve(&self, screen: String) -> ResolvedRoute {
        ResolvedRoute {
            screen,
            layouts: self.layouts.iter().rev().cloned().collect(),
            error: self.error.clone(),
            not_found: self.not_found.clone(),
        }
    }
}

fn collect(tree: &SegmentTree, id: SegmentId, parent: &Inherited, manifest: &mut RouteManifest) {
    let node = &tree[id];
    let state = parent.descend(&node.roles);

    if let Some(screen) = node.screen() {
        let chain: Vec<ChainLink> = tree
            .ancestors(id)
            .map(|level| owned_link(&tree[level].roles, level == id))
            .collect();
        let route = Route {
            url: node.url.clone(),
            chain,
        };

        debug_assert_eq!(
            route.resolve().ok(),
            Some(state.resolve(module_path(screen))),
            "chain and inherited state disagree for {}",
            node.url
        );
        trace!(url = %route.url, depth = route.chain.len(), layouts = state.layouts.len(), "route");
        manifest.insert(route);
    }

    for &child in node.children() {
        collect(tree, child, &state, manifest);
    }
}

/// Owned roles of one level; ancestors never contribute their screen
fn owned_link(roles: &RoleMap<PathBuf>, is_leaf: bool) -> ChainLink {
    let mut link = roles.map(|path| module_path(path));
    if !is_leaf {
        link.remove(RoleKind::Screen);
    }
    link
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::FileNode;
    use pretty_assertions::assert_eq;

    fn link(pairs: &[(RoleKind, &str)]) -> ChainLink {
        let mut link = ChainLink::default();
        for &(role, path) in pairs {
            link.insert(role, path.to_string());
        }
        link
    }

    fn manifest_for(root: FileNode) -> RouteManifest {
        RouteManifest::from_segments(&SegmentTree::from_file_tree(&root).unwrap())
    }

    #[test]
    fn test_only_screen_segments_become_routes() {
        let manifest = manifest_for(FileNode::dir("app", "/app", vec![
            FileNode::dir("docs", "/app/docs", vec![
                FileNode::file("layout.tsx", "/app/docs/layout.tsx"),
                FileNode::dir("api", "/app/docs/api", vec![
                    FileNode::file("screen.tsx", "/app/docs/api/screen.tsx"),
                ]),
            ]),
        ]));
        assert_eq!(manifest.urls().collect::<Vec<_>>(), vec!["/docs/api/"]);
    }

    #[test]
    fn test_chain_keeps_owned_roles_per_level() {
        let manifest = manifest_for(FileNode::dir("app", "/app", vec![
            FileNode::file("error.tsx", "/app/error.tsx"),
            FileNode::file("layout.tsx", "/app/layout.tsx"),
            FileNode::file("screen.tsx", "/app/screen.tsx"),
            FileNode::dir("settings", "/app/settings", vec![
                FileNode::file("error.tsx", "/app/settings/error.tsx"),
                FileNode::file("screen.tsx", "/app/settings/screen.tsx"),
            ]),
        ]));

        let route = manifest.get("/settings/").unwrap();
        assert_eq!(
            route.chain,
            vec![
                link(&[
                    (RoleKind::Screen, "/app/settings/screen"),
                    (RoleKind::Error, "/app/settings/error"),
                ]),
                link(&[(RoleKind::Layout, "/app/layout"), (RoleKind::Error, "/app/error")]),
            ]
        );

        let resolved = route.resolve().unwrap();
        assert_eq!(resolved.error.as_deref(), Some("/app/settings/error"));
        assert_eq!(resolved.layouts, vec!["/app/layout"]);
    }

    #[test]
    fn test_nearest_not_found_wins_and_propagates() {
        let manifest = manifest_for(FileNode::dir("app", "/app", vec![
            FileNode::file("not-found.tsx", "/app/not-found.tsx"),
            FileNode::dir("shop", "/app/shop", vec![
                FileNode::file("not-found.tsx", "/app/shop/not-found.tsx"),
                FileNode::dir("cart", "/app/shop/cart", vec![
                    FileNode::file("screen.tsx", "/app/shop/cart/screen.tsx"),
                ]),
            ]),
        ]));
        let resolved = manifest.get("/shop/cart/").unwrap().resolve().unwrap();
        assert_eq!(resolved.not_found.as_deref(), Some("/app/shop/not-found"));
        assert_eq!(resolved.error, None);
    }

    #[test]
    fn test_validate_rejects_bad_chains() {
        let empty = Route { url: "/a/".into(), chain: vec![] };
        assert!(matches!(empty.validate(), Err(RouterError::EmptyChain { .. })));

        let no_screen = Route { url: "/a/".into(), chain: vec![link(&[(RoleKind::Layout, "/l")])] };
        assert!(matches!(no_screen.validate(), Err(RouterError::MissingScreen { .. })));

        let stray = Route {
            url: "/a/".into(),
            chain: vec![link(&[(RoleKind::Screen, "/a/s")]), link(&[(RoleKind::Screen, "/s")])],
        };
        assert!(matches!(stray.validate(), Err(RouterError::StrayScreen { level: 1, .. })));
    }

    #[test]
    fn test_json_shape_and_reload() {
        let manifest = manifest_for(FileNode::dir("app", "/app", vec![
            FileNode::file("layout.tsx", "/app/layout.tsx"),
            FileNode::file("screen.tsx", "/app/screen.tsx"),
        ]));
        let json = manifest.to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "/": {
                    "url": "/",
                    "chain": [{ "layout": "/app/layout", "screen": "/app/screen" }]
                }
            })
        );
        assert_eq!(RouteManifest::from_json(&json).unwrap(), manifest);
    }

    #[test]
    fn test_from_json_rejects_invalid_chain() {
        let json = r#"{ "/x/": { "url": "/x/", "chain": [{ "layout": "/app/layout" }] } }"#;
        assert!(matches!(RouteManifest::from_json(json), Err(RouterError::MissingScreen { .. })));
    }
}
