use super::{SegmentId, SegmentTree};

/// Lazy iterator over a segment and its ancestors
///
/// For a segment at `/a/(g)/b/`, yields: `b` → `(g)` → `a` → root.
///
/// Walks the non-owning parent handles of a [`SegmentTree`]; stops after the
/// root. Nothing is allocated.
///
/// # Examples
///
/// ```
/// use pen_router::{FileNode, SegmentTree};
///
/// let root = FileNode::dir("app", "/app", vec![
///     FileNode::dir("docs", "/app/docs", vec![
///         FileNode::file("screen.tsx", "/app/docs/screen.tsx"),
///     ]),
/// ]);
/// let tree = SegmentTree::from_file_tree(&root).unwrap();
/// let docs = tree.find_screen("/docs/").unwrap();
///
/// let segments: Vec<&str> = tree
///     .ancestors(docs)
///     .map(|id| tree[id].segment.as_str())
///     .collect();
/// assert_eq!(segments, vec!["docs", ""]);
/// ```
#[derive(Clone)]
pub struct Ancestors<'a> {
    tree: &'a SegmentTree,
    current: Option<SegmentId>,
}

impl<'a> Ancestors<'a> {
    pub(crate) fn new(tree: &'a SegmentTree, start: SegmentId) -> Self {
        Self {
            tree,
            current: Some(start),
        }
    }
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = SegmentId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = self.tree[current].parent();
        Some(current)
    }
}
