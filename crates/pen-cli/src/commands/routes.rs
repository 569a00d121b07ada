use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;

use super::{compile, display_path};
use crate::config::BuildConfig;

pub fn execute(config: &BuildConfig) -> Result<ExitCode> {
    let app = compile(config)?;
    let root = app.root.path.as_path();

    if app.manifest.is_empty() {
        println!("{}", "⚠ No routes found".yellow());
        return Ok(ExitCode::SUCCESS);
    }

    for (url, route) in app.manifest.resolved()? {
        println!("{}", url.cyan().bold());
        println!("  {:<10} {}", "screen", display_path(root, &route.screen));
        for layout in &route.layouts {
            println!("  {:<10} {}", "layout", display_path(root, layout));
        }
        if let Some(error) = &route.error {
            println!("  {:<10} {}", "error", display_path(root, error));
        }
        if let Some(not_found) = &route.not_found {
            println!("  {:<10} {}", "not-found", display_path(root, not_found));
        }
        println!();
    }
    println!("{} routes", app.manifest.len());

    Ok(ExitCode::SUCCESS)
}
