use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use pen_router::{with_trailing_slash, ElementKind};

use super::{compile, display_path};
use crate::config::BuildConfig;

pub fn execute(config: &BuildConfig, url: &str) -> Result<ExitCode> {
    let app = compile(config)?;
    let key = with_trailing_slash(url);

    if app.match_route(&key).is_none() {
        println!("{} No route matches {}", "✗".red(), key.bold());
        return Ok(ExitCode::FAILURE);
    }

    let element = app.compose(&key)?;
    println!("{} {}", "✓".green(), key.bold());
    println!();

    let root = app.root.path.as_path();
    for (depth, node) in element.iter().enumerate() {
        let path = app
            .index
            .path(node.component)
            .map(|module| display_path(root, module))
            .unwrap_or_default();
        println!("{}{} {}", "  ".repeat(depth + 1), label(node.kind), path.dimmed());
    }

    Ok(ExitCode::SUCCESS)
}

fn label(kind: ElementKind) -> colored::ColoredString {
    match kind {
        ElementKind::Component => "component".normal(),
        ElementKind::ErrorBoundary => "error-boundary".red(),
        ElementKind::NotFoundBoundary => "not-found-boundary".yellow(),
    }
}
