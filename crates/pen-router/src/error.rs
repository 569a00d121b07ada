//! Error kinds raised while compiling an app directory into a route manifest.
//!
//! Every variant is fatal for the current build. Messages already contain the
//! offending paths and URLs so callers can print them verbatim.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::role::RoleKind;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, RouterError>;

#[derive(Debug, Error)]
pub enum RouterError {
    #[error("Directory not found: \"{}\"", path.display())]
    NotFound { path: PathBuf },

    #[error("Path is not a directory: \"{}\"", path.display())]
    NotADirectory { path: PathBuf },

    #[error(
        "Root path is a file, not a directory: \"{}\"\n\nThe app directory must be a directory, not a file.",
        path.display()
    )]
    RootIsFile { path: PathBuf },

    #[error(
        "Conflicting {role} files found in \"{}\":\n{}\n\nOnly one {role} file is allowed per directory.\nKeep one file and remove the others.",
        dir.display(),
        bullet_list(paths)
    )]
    DuplicateRoleFile {
        dir: PathBuf,
        role: RoleKind,
        paths: Vec<PathBuf>,
    },

    #[error(
        "Conflicting screen routes found at \"{url}\":\n{}\n\nEach URL can only have one screen file.\nMove one screen to a different directory or rename the route segment.",
        bullet_list(paths)
    )]
    DuplicateScreen { url: String, paths: Vec<PathBuf> },

    #[error("Route \"{url}\" has an empty segment chain")]
    EmptyChain { url: String },

    #[error("Route \"{url}\" has no screen in its leaf segment")]
    MissingScreen { url: String },

    #[error("Route \"{url}\" carries a screen at ancestor level {level}; only the leaf may own a screen")]
    StrayScreen { url: String, level: usize },

    #[error("Component not found in index: \"{path}\"")]
    ComponentNotFound { path: String },

    #[error("No route matches \"{url}\"")]
    NoRoute { url: String },

    #[error("Failed to read \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read app directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid route manifest: {0}")]
    Json(#[from] serde_json::Error),
}

impl RouterError {
    /// Whether this error points at the user's app directory rather than at
    /// an internal inconsistency between pipeline stages.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            RouterError::NotFound { .. }
                | RouterError::NotADirectory { .. }
                | RouterError::RootIsFile { .. }
                | RouterError::DuplicateRoleFile { .. }
                | RouterError::DuplicateScreen { .. }
                | RouterError::NoRoute { .. }
                | RouterError::Io { .. }
                | RouterError::Walk(_)
        )
    }
}

fn bullet_list<P: AsRef<Path>>(paths: &[P]) -> String {
    paths
        .iter()
        .map(|p| format!("  - {}", p.as_ref().display()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_screen_message_lists_both_paths() {
        let err = RouterError::DuplicateScreen {
            url: "/x/".to_string(),
            paths: vec![PathBuf::from("/app/(a)/x/screen.tsx"), PathBuf::from("/app/(b)/x/screen.tsx")],
        };
        let msg = err.to_string();
        assert!(msg.contains("\"/x/\""));
        assert!(msg.contains("  - /app/(a)/x/screen.tsx"));
        assert!(msg.contains("  - /app/(b)/x/screen.tsx"));
        assert!(err.is_user_error());
    }

    #[test]
    fn test_duplicate_role_message_names_role() {
        let err = RouterError::DuplicateRoleFile {
            dir: PathBuf::from("/app/blog"),
            role: RoleKind::NotFound,
            paths: vec![PathBuf::from("/app/blog/not-found.jsx"), PathBuf::from("/app/blog/not-found.tsx")],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Conflicting not-found files found in \"/app/blog\""));
        assert!(msg.contains("not-found.jsx"));
    }

    #[test]
    fn test_pipeline_bugs_are_not_user_errors() {
        assert!(!RouterError::MissingScreen { url: "/".into() }.is_user_error());
        assert!(!RouterError::ComponentNotFound { path: "/app/screen".into() }.is_user_error());
    }
}
