//! Role files and their per-segment assignment
//!
//! A role file is a conventionally named file (`screen.tsx`, `layout.tsx`,
//! `error.tsx`, `not-found.tsx`) that fills one structural function for the
//! directory it lives in.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Extensions a role file may carry
pub const ROLE_EXTENSIONS: [&str; 4] = ["tsx", "ts", "jsx", "js"];

/// The four structural roles a file can play inside a segment
///
/// # Examples
///
/// ```
/// use pen_router::RoleKind;
///
/// assert_eq!(RoleKind::from_file_name("screen.tsx"), Some(RoleKind::Screen));
/// assert_eq!(RoleKind::from_file_name("not-found.jsx"), Some(RoleKind::NotFound));
/// assert_eq!(RoleKind::from_file_name("screen.css"), None);
/// assert_eq!(RoleKind::from_file_name("screen.test.tsx"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoleKind {
    Layout,
    Screen,
    Error,
    NotFound,
}

impl RoleKind {
    pub const ALL: [RoleKind; 4] = [
        RoleKind::Layout,
        RoleKind::Screen,
        RoleKind::Error,
        RoleKind::NotFound,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RoleKind::Layout => "layout",
            RoleKind::Screen => "screen",
            RoleKind::Error => "error",
            RoleKind::NotFound => "not-found",
        }
    }

    /// Maps a bare role name (no extension) to its kind
    pub fn from_stem(stem: &str) -> Option<Self> {
        match stem {
            "layout" => Some(RoleKind::Layout),
            "screen" => Some(RoleKind::Screen),
            "error" => Some(RoleKind::Error),
            "not-found" => Some(RoleKind::NotFound),
            _ => None,
        }
    }

    /// Classifies a file name as a role file
    ///
    /// The name must be exactly `<role>.<ext>` with `ext` in [`ROLE_EXTENSIONS`].
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (stem, ext) = name.rsplit_once('.')?;
        if !ROLE_EXTENSIONS.contains(&ext) {
            return None;
        }
        Self::from_stem(stem)
    }
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partial mapping from [`RoleKind`] to a path
///
/// Segments hold `RoleMap<PathBuf>` (source files); manifest chains hold
/// `RoleMap<String>` (module paths). Serializes with the role names as keys
/// and omits unset roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMap<P> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<P>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen: Option<P>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<P>,
    #[serde(default, rename = "not-found", skip_serializing_if = "Option::is_none")]
    pub not_found: Option<P>,
}

impl<P> Default for RoleMap<P> {
    fn default() -> Self {
        Self {
            layout: None,
            screen: None,
            error: None,
            not_found: None,
        }
    }
}

impl<P> RoleMap<P> {
    pub fn get(&self, role: RoleKind) -> Option<&P> {
        self.slot(role).as_ref()
    }

    /// Sets a role, returning the previous occupant if any
    pub fn insert(&mut self, role: RoleKind, path: P) -> Option<P> {
        self.slot_mut(role).replace(path)
    }

    pub fn remove(&mut self, role: RoleKind) -> Option<P> {
        self.slot_mut(role).take()
    }

    pub fn contains(&self, role: RoleKind) -> bool {
        self.get(role).is_some()
    }

    pub fn is_empty(&self) -> bool {
        RoleKind::ALL.iter().all(|&role| !self.contains(role))
    }

    /// Iterates the assigned roles in [`RoleKind::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = (RoleKind, &P)> + '_ {
        RoleKind::ALL
            .into_iter()
            .filter_map(move |role| self.get(role).map(|path| (role, path)))
    }

    pub fn map<Q>(&self, mut f: impl FnMut(&P) -> Q) -> RoleMap<Q> {
        RoleMap {
            layout: self.layout.as_ref().map(&mut f),
            screen: self.screen.as_ref().map(&mut f),
            error: self.error.as_ref().map(&mut f),
            not_found: self.not_found.as_ref().map(&mut f),
        }
    }

    fn slot(&self, role: RoleKind) -> &Option<P> {
        match role {
            RoleKind::Layout => &self.layout,
            RoleKind::Screen => &self.screen,
            RoleKind::Error => &self.error,
            RoleKind::NotFound => &self.not_found,
        }
    }

    fn slot_mut(&mut self, role: RoleKind) -> &mut Option<P> {
        match role {
            RoleKind::Layout => &mut self.layout,
            RoleKind::Screen => &mut self.screen,
            RoleKind::Error => &mut self.error,
            RoleKind::NotFound => &mut self.not_found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("screen.tsx", Some(RoleKind::Screen))]
    #[case("screen.jsx", Some(RoleKind::Screen))]
    #[case("layout.ts", Some(RoleKind::Layout))]
    #[case("error.js", Some(RoleKind::Error))]
    #[case("not-found.tsx", Some(RoleKind::NotFound))]
    #[case("screen.css", None)]
    #[case("screen", None)]
    #[case("screen.test.tsx", None)]
    #[case("Screen.tsx", None)]
    #[case("page.tsx", None)]
    #[case(".tsx", None)]
    fn test_from_file_name(#[case] name: &str, #[case] expected: Option<RoleKind>) {
        assert_eq!(RoleKind::from_file_name(name), expected);
    }

    #[test]
    fn test_role_names_round_trip_through_stem() {
        for role in RoleKind::ALL {
            assert_eq!(RoleKind::from_stem(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_role_map_insert_reports_previous() {
        let mut roles = RoleMap::default();
        assert_eq!(roles.insert(RoleKind::Error, "a"), None);
        assert_eq!(roles.insert(RoleKind::Error, "b"), Some("a"));
        assert_eq!(roles.get(RoleKind::Error), Some(&"b"));
        assert!(!roles.is_empty());
        assert_eq!(roles.remove(RoleKind::Error), Some("b"));
        assert!(roles.is_empty());
    }

    #[test]
    fn test_role_map_iter_order() {
        let mut roles = RoleMap::default();
        roles.insert(RoleKind::NotFound, 4);
        roles.insert(RoleKind::Layout, 1);
        roles.insert(RoleKind::Screen, 2);
        let kinds: Vec<_> = roles.iter().map(|(kind, _)| kind).collect();
        assert_eq!(kinds, vec![RoleKind::Layout, RoleKind::Screen, RoleKind::NotFound]);
    }

    #[test]
    fn test_role_map_json_keys() {
        let mut roles: RoleMap<String> = RoleMap::default();
        roles.insert(RoleKind::NotFound, "/app/not-found".to_string());
        roles.insert(RoleKind::Layout, "/app/layout".to_string());
        let json = serde_json::to_string(&roles).unwrap();
        assert_eq!(json, r#"{"layout":"/app/layout","not-found":"/app/not-found"}"#);

        let back: RoleMap<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, roles);
    }
}
