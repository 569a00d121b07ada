//! URL and module-path helpers
//!
//! All functions are pure: same input, same output, no filesystem access.

use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

/// Turns a request URL into a manifest key by appending a missing `/`
///
/// Nothing else is rewritten: doubled slashes, backslashes and a missing
/// leading slash are left as they are and will not match any key.
///
/// # Examples
///
/// ```
/// use pen_router::path::with_trailing_slash;
/// use std::borrow::Cow;
///
/// assert!(matches!(with_trailing_slash("/about/"), Cow::Borrowed("/about/")));
/// assert_eq!(with_trailing_slash("/about"), "/about/");
/// assert_eq!(with_trailing_slash(""), "/");
/// assert_eq!(with_trailing_slash("//about"), "//about/");
/// ```
pub fn with_trailing_slash(url: &str) -> Cow<'_, str> {
    if url.ends_with('/') {
        Cow::Borrowed(url)
    } else {
        Cow::Owned(format!("{url}/"))
    }
}

/// Appends a segment name to a parent URL
///
/// ```
/// use pen_router::path::join_url;
///
/// assert_eq!(join_url("/", "blog"), "/blog/");
/// assert_eq!(join_url("/blog/", "posts"), "/blog/posts/");
/// ```
pub fn join_url(parent: &str, segment: &str) -> String {
    let mut url = String::with_capacity(parent.len() + segment.len() + 1);
    url.push_str(parent);
    if !url.ends_with('/') {
        url.push('/');
    }
    url.push_str(segment);
    url.push('/');
    url
}

/// Converts a role file path into the module path stored in the manifest
///
/// The extension is dropped and separators are forced to `/` so the value
/// is identical across platforms.
///
/// ```
/// use pen_router::path::module_path;
///
/// assert_eq!(module_path("/srv/app/about/screen.tsx"), "/srv/app/about/screen");
/// assert_eq!(module_path("/srv/app/not-found.jsx"), "/srv/app/not-found");
/// ```
pub fn module_path(path: impl AsRef<Path>) -> String {
    to_slash(&path.as_ref().with_extension(""))
}

/// Renders a path with `/` separators
pub fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Computes `target` relative to the directory `base`
///
/// Both paths are treated lexically; `.` components are ignored and `..`
/// pops a component. Returns `target` unchanged when the two paths share no
/// root (e.g. different Windows drives).
///
/// ```
/// use pen_router::path::relative_path;
/// use std::path::PathBuf;
///
/// assert_eq!(
///     relative_path("/proj/.pen/generated", "/proj/src/app/screen"),
///     PathBuf::from("../../src/app/screen")
/// );
/// assert_eq!(relative_path("/a/b", "/a/b/c"), PathBuf::from("c"));
/// ```
pub fn relative_path(base: impl AsRef<Path>, target: impl AsRef<Path>) -> PathBuf {
    let base = lexical(base.as_ref());
    let target_path = target.as_ref();
    let target = lexical(target_path);

    if base.first() != target.first() {
        return target_path.to_path_buf();
    }

    let shared = base
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for _ in shared..base.len() {
        out.push("..");
    }
    for part in &target[shared..] {
        out.push(part);
    }
    out
}

fn lexical(path: &Path) -> Vec<Component<'_>> {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(parts.last(), Some(Component::Normal(_))) {
                    parts.pop();
                } else {
                    parts.push(component);
                }
            }
            other => parts.push(other),
        }
    }
    parts
}
