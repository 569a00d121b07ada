// File: src/config.rs
// Purpose: Configuration parsing from pen.toml

use anyhow::{Context, Result};
use pen_router::CodegenOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "pen.toml";

/// Project configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub build: BuildConfig,
}

/// Build configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildConfig {
    /// Directory scanned for routes (default: "./src/app")
    #[serde(default = "default_app_dir")]
    pub app_dir: PathBuf,

    /// Directory receiving manifest.json and generated/ (default: "./.pen")
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Import specifier for ErrorBoundary and NotFoundBoundary
    #[serde(default = "default_runtime_module")]
    pub runtime_module: String,

    /// Import specifier for createElement
    #[serde(default = "default_element_module")]
    pub element_module: String,
}

// Default values
fn default_app_dir() -> PathBuf {
    PathBuf::from("./src/app")
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("./.pen")
}

fn default_runtime_module() -> String {
    "pen".to_string()
}

fn default_element_module() -> String {
    "react".to_string()
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            app_dir: default_app_dir(),
            out_dir: default_out_dir(),
            runtime_module: default_runtime_module(),
            element_module: default_element_module(),
        }
    }
}

impl BuildConfig {
    pub fn generated_dir(&self) -> PathBuf {
        self.out_dir.join("generated")
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.out_dir.join("manifest.json")
    }

    pub fn codegen_options(&self) -> CodegenOptions {
        CodegenOptions {
            generated_dir: self.generated_dir(),
            runtime_module: self.runtime_module.clone(),
            element_module: self.element_module.clone(),
        }
    }
}

impl Config {
    /// Load configuration from a pen.toml file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing or empty file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Applies `--app-dir` / `--out-dir` on top of the file
    pub fn with_overrides(mut self, app_dir: Option<PathBuf>, out_dir: Option<PathBuf>) -> Self {
        if let Some(app_dir) = app_dir {
            self.build.app_dir = app_dir;
        }
        if let Some(out_dir) = out_dir {
            self.build.out_dir = out_dir;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.build.app_dir, PathBuf::from("./src/app"));
        assert_eq!(config.build.out_dir, PathBuf::from("./.pen"));
        assert_eq!(config.build.runtime_module, "pen");
        assert_eq!(config.build.manifest_path(), PathBuf::from("./.pen/manifest.json"));
    }

    #[test]
    fn test_missing_and_empty_files_use_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_FILE);
        assert_eq!(Config::load(&path).unwrap(), Config::default());

        fs::write(&path, "  \n").unwrap();
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_partial_build_section() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "[build]\napp_dir = \"app\"\nruntime_module = \"@acme/pen\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.build.app_dir, PathBuf::from("app"));
        assert_eq!(config.build.out_dir, PathBuf::from("./.pen"));
        assert_eq!(config.build.codegen_options().runtime_module, "@acme/pen");
    }

    #[test]
    fn test_invalid_toml_mentions_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "[build\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_flags_override_file() {
        let config = Config::default().with_overrides(Some("web/app".into()), None);
        assert_eq!(config.build.app_dir, PathBuf::from("web/app"));
        assert_eq!(config.build.out_dir, PathBuf::from("./.pen"));
    }
}
