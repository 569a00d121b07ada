//! # Pen Router
//!
//! A file-based route compiler. Scans an app directory and turns its layout
//! into a deterministic route manifest, a component index and nested
//! element trees ready for code generation:
//!
//! - Screens (`screen.tsx`) make a directory routable
//! - Layouts (`layout.tsx`) wrap every screen below them
//! - Error and not-found boundaries (`error.tsx`, `not-found.tsx`)
//! - Route groups (`(marketing)/`) that add no URL segment
//! - Private directories (`_components/`) that are never routed
//!
//! ## Pipeline
//!
//! ```text
//! scan_dir ─► SegmentTree ─► RouteManifest ─► ComponentIndex ─► compose_route
//! ```
//!
//! Every stage is a pure function of the previous one; only the scanner
//! touches the filesystem.
//!
//! ## Example
//!
//! ```
//! use pen_router::{compose_route, ComponentIndex, FileNode, RouteManifest, SegmentTree};
//!
//! let root = FileNode::dir("app", "/app", vec![
//!     FileNode::file("layout.tsx", "/app/layout.tsx"),
//!     FileNode::dir("(marketing)", "/app/(marketing)", vec![
//!         FileNode::dir("about", "/app/(marketing)/about", vec![
//!             FileNode::file("screen.tsx", "/app/(marketing)/about/screen.tsx"),
//!         ]),
//!     ]),
//! ]);
//!
//! let segments = SegmentTree::from_file_tree(&root).unwrap();
//! let manifest = RouteManifest::from_segments(&segments);
//! let index = ComponentIndex::from_manifest(&manifest);
//!
//! let route = manifest.get("/about/").unwrap();
//! let element = compose_route(route, &index).unwrap();
//! assert_eq!(element.depth(), 2);
//! ```

pub mod codegen;
mod compose;
mod error;
mod index;
mod manifest;
pub mod path;
mod pipeline;
mod role;
mod router;
mod scanner;
pub mod segment;

pub use codegen::{generate_routes_module, render_element, CodegenOptions};
pub use compose::{compose_route, ComponentLookup, ComposedElement, ElementKind};
pub use error::{Result, RouterError};
pub use index::ComponentIndex;
pub use manifest::{ChainLink, ResolvedRoute, Route, RouteManifest};
pub use path::with_trailing_slash;
pub use pipeline::{compile_app, CompiledApp};
pub use role::{RoleKind, RoleMap, ROLE_EXTENSIONS};
pub use router::{compose_url, match_route, Router};
pub use scanner::{scan_dir, FileNode};
pub use segment::{SegmentId, SegmentKind, SegmentNode, SegmentTree};
