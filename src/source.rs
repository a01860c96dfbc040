use crate::path::NodePath;

/// Minimal tree contract required by the row mapping.
///
/// A proper tree is expected (not a DAG):
/// - no cycles (DFS traversal is used directly);
/// - answers are stable for a given path between expansion changes;
/// - every path reachable through valid child indices has an answer.
pub trait TreeSource {
    /// Returns the number of direct children at `path`.
    fn child_count(&self, path: &NodePath) -> usize;

    /// Returns `true` if the node at `path` can never be expanded.
    ///
    /// Defaults to "has no children". A lazily-loaded source may answer
    /// `false` for a node whose children are not materialized yet.
    fn is_leaf(&self, path: &NodePath) -> bool {
        self.child_count(path) == 0
    }

    /// Returns an approximate total node count (not required to be exact).
    fn size_hint(&self) -> usize {
        0
    }
}

impl<S: TreeSource + ?Sized> TreeSource for &S {
    fn child_count(&self, path: &NodePath) -> usize {
        (**self).child_count(path)
    }

    fn is_leaf(&self, path: &NodePath) -> bool {
        (**self).is_leaf(path)
    }

    fn size_hint(&self) -> usize {
        (**self).size_hint()
    }
}

/// Source with no nodes at all.
///
/// Stands in for a data source that is not attached yet: every query
/// reports zero children, so the list renders empty instead of failing.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyTree;

impl TreeSource for EmptyTree {
    fn child_count(&self, _path: &NodePath) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tree_has_no_rows() {
        let source = EmptyTree;
        assert_eq!(source.child_count(&NodePath::root()), 0);
        assert!(source.is_leaf(&NodePath::from([0])));
    }
}
