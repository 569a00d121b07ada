//! Composition builder
//!
//! Turns a [`Route`] into a nested element description. Per chain level,
//! leaf → root, the current tree is wrapped in this fixed order:
//!
//! 1. not-found boundary
//! 2. error boundary
//! 3. layout
//!
//! An error boundary therefore catches failures from its own level's
//! not-found boundary and everything below, while layouts above it keep
//! rendering.

use std::collections::HashMap;
use std::hash::BuildHasher;

use serde::Serialize;

use crate::error::{Result, RouterError};
use crate::index::ComponentIndex;
use crate::manifest::Route;

/// Resolves a module path to whatever handle the consumer renders with
///
/// [`ComponentIndex`] yields integer indices for code generation; a map of
/// loaded components yields the components themselves for runtime rendering.
pub trait ComponentLookup {
    type Handle: Clone;

    fn lookup(&self, path: &str) -> Option<Self::Handle>;
}

impl ComponentLookup for ComponentIndex {
    type Handle = usize;

    fn lookup(&self, path: &str) -> Option<usize> {
        self.get(path)
    }
}

impl<H: Clone, S: BuildHasher> ComponentLookup for HashMap<String, H, S> {
    type Handle = H;

    fn lookup(&self, path: &str) -> Option<H> {
        self.get(path).cloned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    Component,
    ErrorBoundary,
    NotFoundBoundary,
}

/// One node of a composed route
///
/// `component` is the wrapped component for [`ElementKind::Component`] and
/// the fallback component for boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedElement<H = usize> {
    pub kind: ElementKind,
    pub component: H,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child: Option<Box<ComposedElement<H>>>,
}

impl<H> ComposedElement<H> {
    pub fn leaf(kind: ElementKind, component: H) -> Self {
        Self {
            kind,
            component,
            child: None,
        }
    }

    pub fn wrap(kind: ElementKind, component: H, child: ComposedElement<H>) -> Self {
        Self {
            kind,
            component,
            child: Some(Box::new(child)),
        }
    }

    /// Walks from this node inward, outermost first
    pub fn iter(&self) -> impl Iterator<Item = &ComposedElement<H>> + '_ {
        std::iter::successors(Some(self), |node| node.child.as_deref())
    }

    pub fn depth(&self) -> usize {
        self.iter().count()
    }
}

/// Builds the element tree for `route` using the component index
///
/// # Errors
///
/// - [`RouterError::EmptyChain`] / [`RouterError::MissingScreen`] if the
///   route violates its own chain invariant
/// - [`RouterError::ComponentNotFound`] if the index does not cover a path
///
/// # Examples
///
/// ```
/// use pen_router::{compose_route, ComponentIndex, ElementKind, RouteManifest, SegmentTree, FileNode};
///
/// let root = FileNode::dir("app", "/app", vec![
///     FileNode::file("error.tsx", "/app/error.tsx"),
///     FileNode::file("layout.tsx", "/app/layout.tsx"),
///     FileNode::file("screen.tsx", "/app/screen.tsx"),
/// ]);
/// let manifest = RouteManifest::from_segments(&SegmentTree::from_file_tree(&root).unwrap());
/// let index = ComponentIndex::from_manifest(&manifest);
///
/// let element = compose_route(manifest.get("/").unwrap(), &index).unwrap();
/// let kinds: Vec<_> = element.iter().map(|e| e.kind).collect();
/// assert_eq!(kinds, vec![ElementKind::Component, ElementKind::ErrorBoundary, ElementKind::Component]);
/// ```
pub fn compose_route<L: ComponentLookup>(
    route: &Route,
    components: &L,
) -> Result<ComposedElement<L::Handle>> {
    let lookup = |path: &str| {
        components
            .lookup(path)
            .ok_or_else(|| RouterError::ComponentNotFound {
                path: path.to_string(),
            })
    };

    let screen = route.screen()?;
    let mut element = ComposedElement::leaf(ElementKind::Component, lookup(screen)?);

    for link in &route.chain {
        if let Some(path) = &link.not_found {
            element = ComposedElement::wrap(ElementKind::NotFoundBoundary, lookup(path)?, element);
        }
        if let Some(path) = &link.error {
            element = ComposedElement::wrap(ElementKind::ErrorBoundary, lookup(path)?, element);
        }
        if let Some(path) = &link.layout {
            element = ComposedElement::wrap(ElementKind::Component, lookup(path)?, element);
        }
    }

    Ok(element)
}
