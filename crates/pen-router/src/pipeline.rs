//! One-call build: scan → classify → manifest → index

use std::path::Path;

use tracing::{debug, info};

use crate::codegen::{generate_routes_module, CodegenOptions};
use crate::compose::ComposedElement;
use crate::error::Result;
use crate::index::ComponentIndex;
use crate::manifest::{Route, RouteManifest};
use crate::router::{compose_url, match_route};
use crate::scanner::{scan_dir, FileNode};
use crate::segment::SegmentTree;

/// Every intermediate product of a build
#[derive(Debug, Clone)]
pub struct CompiledApp {
    pub root: FileNode,
    pub segments: SegmentTree,
    pub manifest: RouteManifest,
    pub index: ComponentIndex,
}

/// Compiles the app directory at `app_dir`
///
/// The first failing stage aborts the build; nothing partial is returned.
pub fn compile_app(app_dir: impl AsRef<Path>) -> Result<CompiledApp> {
    let app_dir = app_dir.as_ref();
    debug!(app_dir = %app_dir.display(), "compiling app");

    let root = scan_dir(app_dir)?;
    let segments = SegmentTree::from_file_tree(&root)?;
    let manifest = RouteManifest::from_segments(&segments);
    let index = ComponentIndex::from_manifest(&manifest);

    info!(
        routes = manifest.len(),
        segments = segments.len(),
        components = index.len(),
        "compiled app"
    );
    Ok(CompiledApp {
        root,
        segments,
        manifest,
        index,
    })
}

impl CompiledApp {
    pub fn match_route(&self, url: &str) -> Option<&Route> {
        match_route(url, &self.manifest)
    }

    /// Router match followed by composition
    pub fn compose(&self, url: &str) -> Result<ComposedElement> {
        compose_url(url, &self.manifest, &self.index)
    }

    pub fn routes_module(&self, options: &CodegenOptions) -> Result<String> {
        generate_routes_module(&self.manifest, &self.index, options)
    }
}
