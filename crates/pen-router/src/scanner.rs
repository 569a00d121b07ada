//! Directory scanner
//!
//! Reads an app directory into a [`FileNode`] tree. No route semantics live
//! here; the classifier in [`crate::segment`] interprets the tree.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Result, RouterError};

/// One filesystem entry
///
/// `children` is `Some` (possibly empty) for directories and `None` for files.
/// Children are sorted by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    pub name: String,
    pub path: PathBuf,
    pub children: Option<Vec<FileNode>>,
}

impl FileNode {
    pub fn file(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            children: None,
        }
    }

    pub fn dir(name: impl Into<String>, path: impl Into<PathBuf>, children: Vec<FileNode>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            children: Some(children),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.children.is_some()
    }

    /// Direct children, empty for files
    pub fn entries(&self) -> &[FileNode] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// Scans `root` recursively into a [`FileNode`] tree
///
/// The root path is canonicalized so every node carries an absolute path.
/// Symlinks and entries that are neither files nor directories are skipped.
///
/// # Errors
///
/// - [`RouterError::NotFound`] if `root` does not exist
/// - [`RouterError::NotADirectory`] if `root` is a file
/// - [`RouterError::Io`] / [`RouterError::Walk`] if the root or a directory
///   below it cannot be read
pub fn scan_dir(root: impl AsRef<Path>) -> Result<FileNode> {
    let root = root.as_ref();

    let metadata = fs::metadata(root).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => RouterError::NotFound {
            path: root.to_path_buf(),
        },
        _ => RouterError::Io {
            path: root.to_path_buf(),
            source: e,
        },
    })?;
    if !metadata.is_dir() {
        return Err(RouterError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let root = fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
    let root_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    // walkdir yields a sorted pre-order walk; `open[d]` is the directory
    // currently being filled at depth d.
    let mut open: Vec<FileNode> = vec![FileNode::dir(root_name, root.clone(), Vec::new())];
    let mut entries = 0usize;

    let walker = WalkDir::new(&root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry?;
        let file_type = entry.file_type();
        if file_type.is_symlink() || !(file_type.is_dir() || file_type.is_file()) {
            continue;
        }

        close_until(&mut open, entry.depth());

        let name = entry.file_name().to_string_lossy().into_owned();
        let path = entry.into_path();
        entries += 1;

        if file_type.is_dir() {
            open.push(FileNode::dir(name, path, Vec::new()));
        } else if let Some(parent) = open.last_mut() {
            parent.children.get_or_insert_with(Vec::new).push(FileNode::file(name, path));
        }
    }

    close_until(&mut open, 1);
    debug!(root = %root.display(), entries, "scanned app directory");

    open.pop().ok_or(RouterError::NotFound { path: root })
}

/// Pops finished directories until only `depth` levels remain open,
/// attaching each popped directory to its parent.
fn close_until(open: &mut Vec<FileNode>, depth: usize) {
    while open.len() > depth.max(1) {
        if let Some(done) = open.pop() {
            if let Some(parent) = open.last_mut() {
                parent.children.get_or_insert_with(Vec::new).push(done);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn names(node: &FileNode) -> Vec<&str> {
        node.entries().iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_scan_missing_root() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let err = scan_dir(&missing).unwrap_err();
        assert!(matches!(err, RouterError::NotFound { path } if path == missing));
    }

    #[test]
    fn test_scan_root_is_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("screen.tsx");
        fs::write(&file, "").unwrap();
        let err = scan_dir(&file).unwrap_err();
        assert!(matches!(err, RouterError::NotADirectory { .. }));
    }

    #[test]
    fn test_scan_sorted_children_and_kinds() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("zeta/inner")).unwrap();
        fs::create_dir_all(root.join("alpha")).unwrap();
        fs::create_dir_all(root.join("empty")).unwrap();
        fs::write(root.join("screen.tsx"), "").unwrap();
        fs::write(root.join("layout.tsx"), "").unwrap();
        fs::write(root.join("alpha/screen.tsx"), "").unwrap();
        fs::write(root.join("zeta/inner/b.ts"), "").unwrap();
        fs::write(root.join("zeta/inner/a.ts"), "").unwrap();

        let tree = scan_dir(root).unwrap();
        assert!(tree.is_dir());
        assert_eq!(names(&tree), vec!["alpha", "empty", "layout.tsx", "screen.tsx", "zeta"]);

        let empty = &tree.entries()[1];
        assert_eq!(empty.children, Some(Vec::new()));

        let screen = &tree.entries()[3];
        assert_eq!(screen.children, None);

        let inner = &tree.entries()[4].entries()[0];
        assert_eq!(inner.name, "inner");
        assert_eq!(names(inner), vec!["a.ts", "b.ts"]);
        assert!(inner.path.is_absolute());
        assert!(inner.path.ends_with("zeta/inner"));
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_skips_symlinks() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("app");
        let outside = temp.path().join("outside");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&outside).unwrap();
        fs::write(outside.join("screen.tsx"), "").unwrap();
        fs::write(root.join("screen.tsx"), "").unwrap();
        std::os::unix::fs::symlink(&outside, root.join("linked")).unwrap();
        std::os::unix::fs::symlink(outside.join("screen.tsx"), root.join("layout.tsx")).unwrap();

        let tree = scan_dir(&root).unwrap();
        assert_eq!(names(&tree), vec!["screen.tsx"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_skips_sockets() {
        use std::os::unix::net::UnixListener;

        let temp = TempDir::new().unwrap();
        let root = temp.path().join("app");
        fs::create_dir_all(root.join("blog")).unwrap();
        fs::write(root.join("screen.tsx"), "").unwrap();
        fs::write(root.join("blog/screen.tsx"), "").unwrap();
        let _top = UnixListener::bind(root.join("dev.sock")).unwrap();
        let _nested = UnixListener::bind(root.join("blog/hmr.sock")).unwrap();

        let tree = scan_dir(&root).unwrap();
        assert_eq!(names(&tree), vec!["blog", "screen.tsx"]);
        assert_eq!(names(&tree.entries()[0]), vec!["screen.tsx"]);
    }
}
