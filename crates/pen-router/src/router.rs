//! Runtime router
//!
//! Stateless exact-key lookup into a [`RouteManifest`]. The request URL only
//! gets a missing trailing slash appended; there is no other cleanup, no
//! prefix matching and no parameter interpolation.

use tracing::trace;

use crate::compose::{compose_route, ComposedElement};
use crate::error::{Result, RouterError};
use crate::index::ComponentIndex;
use crate::manifest::{Route, RouteManifest};
use crate::path::with_trailing_slash;

/// Looks up the route for `url`
///
/// `/about` and `/about/` resolve to the same key; anything else must match
/// the key exactly.
///
/// # Examples
///
/// ```
/// use pen_router::{match_route, Route, RouteManifest};
///
/// let mut manifest = RouteManifest::new();
/// manifest.insert(serde_json::from_str::<Route>(
///     r#"{ "url": "/about/", "chain": [{ "screen": "/app/about/screen" }] }"#,
/// ).unwrap());
///
/// assert!(match_route("/about", &manifest).is_some());
/// assert!(match_route("/about/", &manifest).is_some());
/// assert!(match_route("//about//", &manifest).is_none());
/// assert!(match_route("/about/team", &manifest).is_none());
/// ```
pub fn match_route<'m>(url: &str, manifest: &'m RouteManifest) -> Option<&'m Route> {
    let key = with_trailing_slash(url);
    let found = manifest.get(&key);
    trace!(url, key = %key, matched = found.is_some(), "match");
    found
}

/// Matches `url` against `manifest` and composes the route with `index`
///
/// Fails with [`RouterError::NoRoute`] when nothing matches.
pub fn compose_url(
    url: &str,
    manifest: &RouteManifest,
    index: &ComponentIndex,
) -> Result<ComposedElement> {
    let route = match_route(url, manifest).ok_or_else(|| RouterError::NoRoute {
        url: with_trailing_slash(url).into_owned(),
    })?;
    compose_route(route, index)
}

/// A manifest paired with the index built from it
#[derive(Debug, Clone, Default)]
pub struct Router {
    manifest: RouteManifest,
    index: ComponentIndex,
}

impl Router {
    pub fn new(manifest: RouteManifest) -> Self {
        let index = ComponentIndex::from_manifest(&manifest);
        Self { manifest, index }
    }

    pub fn manifest(&self) -> &RouteManifest {
        &self.manifest
    }

    pub fn index(&self) -> &ComponentIndex {
        &self.index
    }

    pub fn match_route(&self, url: &str) -> Option<&Route> {
        match_route(url, &self.manifest)
    }

    /// Matches `url` and composes its element tree
    pub fn compose(&self, url: &str) -> Result<ComposedElement> {
        compose_url(url, &self.manifest, &self.index)
    }
}

impl From<RouteManifest> for Router {
    fn from(manifest: RouteManifest) -> Self {
        Self::new(manifest)
    }
}
