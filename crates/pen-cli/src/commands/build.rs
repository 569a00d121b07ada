use std::fs;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::Colorize;
use pen_router::codegen::{CodegenOptions, ROUTES_MODULE};
use tracing::debug;

use super::{compile, ensure_dir};
use crate::config::BuildConfig;

pub fn execute(config: &BuildConfig) -> Result<ExitCode> {
    let started = Instant::now();

    println!("{}", "Building routes...".green().bold());
    println!();
    println!("{}", format!("  entry:  {}", config.app_dir.display()).dimmed());
    println!("{}", format!("  output: {}", config.out_dir.display()).dimmed());
    println!();

    let app = compile(config)?;

    ensure_dir(&config.out_dir)?;
    let manifest_path = config.manifest_path();
    fs::write(&manifest_path, app.manifest.to_json_pretty()?)
        .with_context(|| format!("Failed to write manifest: {:?}", manifest_path))?;
    debug!(path = %manifest_path.display(), "wrote manifest");

    let generated_dir = config.generated_dir();
    ensure_dir(&generated_dir)?;
    let module_path = generated_dir.join(ROUTES_MODULE);
    let options = CodegenOptions {
        generated_dir: fs::canonicalize(&generated_dir)
            .with_context(|| format!("Failed to resolve directory: {:?}", generated_dir))?,
        ..config.codegen_options()
    };
    let module = app.routes_module(&options)?;
    fs::write(&module_path, module)
        .with_context(|| format!("Failed to write routes module: {:?}", module_path))?;
    debug!(path = %module_path.display(), "wrote routes module");

    if app.manifest.is_empty() {
        println!("{}", "⚠ No routes found (add a screen.tsx to the app directory)".yellow());
    }
    for url in app.manifest.urls() {
        println!("  {} {}", "○".cyan(), url);
    }
    println!();
    println!("  {} routes, {} components", app.manifest.len(), app.index.len());
    println!("  {}", manifest_path.display().to_string().dimmed());
    println!("  {}", module_path.display().to_string().dimmed());
    println!();
    println!(
        "{} Built in {}",
        "✓".green(),
        format!("{}ms", started.elapsed().as_millis()).bold()
    );

    Ok(ExitCode::SUCCESS)
}
