pub mod build;
pub mod match_url;
pub mod routes;

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use pen_router::{compile_app, CompiledApp, RouterError};

use crate::config::BuildConfig;

/// Runs the route pipeline against the configured app directory
pub fn compile(config: &BuildConfig) -> Result<CompiledApp> {
    let app = compile_app(&config.app_dir)?;
    Ok(app)
}

/// Module path shown relative to the app directory when it lives inside it
pub fn display_path(app_root: &Path, module: &str) -> String {
    Path::new(module)
        .strip_prefix(app_root)
        .map(|rel| format!("app/{}", rel.to_string_lossy().replace('\\', "/")))
        .unwrap_or_else(|_| module.to_string())
}

pub fn report_failure(err: &anyhow::Error) {
    eprintln!("{} Build failed", "✗".red());
    eprintln!();
    eprintln!("{}", format!("{err:#}").red());
    eprintln!();
    if let Some(hint) = failure_hint(err) {
        eprintln!("{}", hint.dimmed());
        eprintln!();
    }
}

/// Extra line for failures that point at pen itself rather than the app
pub fn failure_hint(err: &anyhow::Error) -> Option<&'static str> {
    match err.downcast_ref::<RouterError>() {
        Some(router_err) if !router_err.is_user_error() => {
            Some("This is an internal error in pen, not a problem with your app directory. Please report it.")
        }
        _ => None,
    }
}

pub(crate) fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {:?}", dir))
}
