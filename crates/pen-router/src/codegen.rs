//! Routes module generator
//!
//! Serializes composed routes into a JavaScript module of nested
//! `createElement` calls. The output only depends on the manifest, the index
//! and the options, so identical inputs produce byte-identical files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::compose::{compose_route, ComposedElement, ElementKind};
use crate::error::Result;
use crate::index::ComponentIndex;
use crate::manifest::{Route, RouteManifest};

/// Name of the generated file inside the generated directory
pub const ROUTES_MODULE: &str = "routes.js";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenOptions {
    /// Directory the generated module is written to; import paths are
    /// relative to it
    pub generated_dir: PathBuf,
    /// Module exporting `ErrorBoundary` and `NotFoundBoundary`
    pub runtime_module: String,
    /// Module exporting `createElement`
    pub element_module: String,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            generated_dir: PathBuf::from(".pen/generated"),
            runtime_module: "pen".to_string(),
            element_module: "react".to_string(),
        }
    }
}

/// Component identifier used for index `index` in generated code
pub fn component_ident(index: usize) -> String {
    format!("Component{index}")
}

/// Renders an element tree as nested `createElement` calls
///
/// `key_expr` produces the `key` prop expression for a component index.
///
/// # Examples
///
/// ```
/// use pen_router::codegen::render_element;
/// use pen_router::{ComposedElement, ElementKind};
///
/// let element = ComposedElement::wrap(
///     ElementKind::ErrorBoundary,
///     1,
///     ComposedElement::leaf(ElementKind::Component, 0),
/// );
/// assert_eq!(
///     render_element(&element, |i| format!("importPaths[{i}]")),
///     "createElement(ErrorBoundary, { key: importPaths[1], fallback: Component1 }, \
///      createElement(Component0, { key: importPaths[0] }))"
/// );
/// ```
pub fn render_element<F>(element: &ComposedElement, key_expr: F) -> String
where
    F: Fn(usize) -> String,
{
    render(element, &key_expr)
}

fn render(element: &ComposedElement, key_expr: &dyn Fn(usize) -> String) -> String {
    let key = key_expr(element.component);
    let component = component_ident(element.component);
    let child = element.child.as_deref().map(|child| render(child, key_expr));

    let (callee, props) = match element.kind {
        ElementKind::Component => (component, format!("{{ key: {key} }}")),
        ElementKind::ErrorBoundary => (
            "ErrorBoundary".to_string(),
            format!("{{ key: {key}, fallback: {component} }}"),
        ),
        ElementKind::NotFoundBoundary => (
            "NotFoundBoundary".to_string(),
            format!("{{ key: {key}, fallback: {component} }}"),
        ),
    };

    match child {
        Some(child) => format!("createElement({callee}, {props}, {child})"),
        None => format!("createElement({callee}, {props})"),
    }
}

/// Generates the complete routes module
///
/// Layout:
///
/// ```text
/// import { createElement } from "react";
/// import { ErrorBoundary, NotFoundBoundary } from "pen";
///
/// import Component0 from "./...js";
///
/// export const importPaths = [ ... ];
///
/// export const routes = {
///   "/": () => createElement(...),
/// };
/// ```
pub fn generate_routes_module(
    manifest: &RouteManifest,
    index: &ComponentIndex,
    options: &CodegenOptions,
) -> Result<String> {
    let import_paths = index.import_paths(&options.generated_dir);

    let mut out = String::new();
    out.push_str(&format!(
        "import {{ createElement }} from {};\n",
        js_string(&options.element_module)?
    ));
    out.push_str(&format!(
        "import {{ ErrorBoundary, NotFoundBoundary }} from {};\n",
        js_string(&options.runtime_module)?
    ));

    if !import_paths.is_empty() {
        out.push('\n');
    }
    for (i, path) in import_paths.iter().enumerate() {
        out.push_str(&format!("import {} from {};\n", component_ident(i), js_string(path)?));
    }

    out.push_str("\nexport const importPaths = [\n");
    for path in &import_paths {
        out.push_str(&format!("  {},\n", js_string(path)?));
    }
    out.push_str("];\n");

    let mut routes: Vec<&Route> = manifest.routes().collect();
    routes.sort_by(|a, b| a.url.cmp(&b.url));

    out.push_str("\nexport const routes = {\n");
    for route in routes {
        let element = compose_route(route, index)?;
        let code = render_element(&element, |i| format!("importPaths[{i}]"));
        out.push_str(&format!("  {}: () => {},\n", js_string(&route.url)?, code));
    }
    out.push_str("};\n");

    debug!(
        routes = manifest.len(),
        components = index.len(),
        bytes = out.len(),
        "generated routes module"
    );
    Ok(out)
}

/// Double-quoted JavaScript string literal
fn js_string(value: &str) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}
