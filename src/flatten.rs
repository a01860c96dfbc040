//! Pre-order flattening of the tree into one linear row sequence.
//!
//! Everything here is a pure function of the source and the expansion set:
//! no cache is kept, so the answers always reflect the set as it is now.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::path::NodePath;
use crate::source::TreeSource;

/// Number of rows currently visible in the subtree under `path`, excluding
/// the row of `path` itself.
///
/// Direct children always count; a child's own expansion flag only decides
/// whether its descendants count too. The flag of `path` itself is never
/// consulted — that happens one level up, in the parent's enumeration.
pub fn visible_count<S>(source: &S, expanded: &FxHashSet<NodePath>, path: &NodePath) -> usize
where
    S: TreeSource + ?Sized,
{
    let child_count = source.child_count(path);
    let mut rows = child_count;
    for i in 0..child_count {
        let child = path.child(i);
        if expanded.contains(&child) {
            rows += visible_count(source, expanded, &child);
        }
    }
    rows
}

/// Resolves a flat row position to the path occupying it.
///
/// Returns `None` when `target` is outside the visible range — the caller
/// should treat that as a stale index and drop the event.
pub fn path_for_flat_index<S>(
    source: &S,
    expanded: &FxHashSet<NodePath>,
    target: usize,
) -> Option<NodePath>
where
    S: TreeSource + ?Sized,
{
    descend(source, expanded, target, &NodePath::root())
}

fn descend<S>(
    source: &S,
    expanded: &FxHashSet<NodePath>,
    target: usize,
    prefix: &NodePath,
) -> Option<NodePath>
where
    S: TreeSource + ?Sized,
{
    let mut offset = 0;
    for i in 0..source.child_count(prefix) {
        let child = prefix.child(i);
        if target == offset {
            return Some(child);
        }
        offset += 1;
        if expanded.contains(&child) {
            let subtree_rows = visible_count(source, expanded, &child);
            if target < offset + subtree_rows {
                return descend(source, expanded, target - offset, &child);
            }
            offset += subtree_rows;
        }
    }
    None
}

/// Current flat row position of `path`.
///
/// Returns `None` for the root (it is never a row) and for paths with a
/// segment that exceeds its ancestor's child count. Collapsed ancestors do
/// not enter the computation: the result is the position the row holds once
/// its ancestors are open.
pub fn flat_index_for_path<S>(
    source: &S,
    expanded: &FxHashSet<NodePath>,
    path: &NodePath,
) -> Option<usize>
where
    S: TreeSource + ?Sized,
{
    if path.is_root() {
        return None;
    }

    let segments = path.segments();
    let mut index = 0;
    let mut prefix = NodePath::root();
    for (depth, &segment) in segments.iter().enumerate() {
        if segment >= source.child_count(&prefix) {
            return None;
        }
        for i in 0..segment {
            index += 1;
            let sibling = prefix.child(i);
            if expanded.contains(&sibling) {
                index += visible_count(source, expanded, &sibling);
            }
        }
        prefix = prefix.child(segment);
        if depth + 1 < segments.len() {
            // Step past the ancestor's own row before entering its subtree.
            index += 1;
        }
    }
    Some(index)
}

/// A visible row with the metadata used for rendering and navigation.
#[derive(Clone, Debug)]
pub struct VisibleRow {
    /// Tree position of the row.
    pub path: NodePath,
    /// Whether the row shows an expander (the node is not a leaf).
    pub has_children: bool,
    /// `is_last` flags of this node and its ancestors below the top level,
    /// used to pick guide-line glyphs.
    pub is_tail_stack: SmallVec<[bool; 8]>,
}

impl VisibleRow {
    /// Indentation level of the row; top-level rows sit at 0.
    pub fn level(&self) -> u16 {
        u16::try_from(self.path.indent_level()).unwrap_or(u16::MAX)
    }
}

/// Enumerates every visible row in pre-order.
pub fn visible_rows<S>(source: &S, expanded: &FxHashSet<NodePath>) -> Vec<VisibleRow>
where
    S: TreeSource + ?Sized,
{
    let mut rows = Vec::with_capacity(source.size_hint());
    let mut is_tail_stack: SmallVec<[bool; 8]> = SmallVec::new();
    collect_rows(
        source,
        expanded,
        &NodePath::root(),
        &mut is_tail_stack,
        &mut rows,
    );
    rows
}

fn collect_rows<S>(
    source: &S,
    expanded: &FxHashSet<NodePath>,
    prefix: &NodePath,
    is_tail_stack: &mut SmallVec<[bool; 8]>,
    rows: &mut Vec<VisibleRow>,
) where
    S: TreeSource + ?Sized,
{
    let child_count = source.child_count(prefix);
    // Top-level rows are flush-left, so they contribute no guide column.
    let track_tail = !prefix.is_root();
    for i in 0..child_count {
        let child = prefix.child(i);
        if track_tail {
            is_tail_stack.push(i + 1 == child_count);
        }
        rows.push(VisibleRow {
            has_children: !source.is_leaf(&child),
            is_tail_stack: is_tail_stack.clone(),
            path: child.clone(),
        });
        if expanded.contains(&child) {
            collect_rows(source, expanded, &child, is_tail_stack, rows);
        }
        if track_tail {
            is_tail_stack.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // root -> A { A0, A1 }, B; all nodes addressed by path.
    struct SmallTree;

    impl TreeSource for SmallTree {
        fn child_count(&self, path: &NodePath) -> usize {
            match path.segments() {
                [] => 2,
                [0] => 2,
                _ => 0,
            }
        }
    }

    // root -> X -> { Y -> { W }, Z }
    struct DeepTree;

    impl TreeSource for DeepTree {
        fn child_count(&self, path: &NodePath) -> usize {
            match path.segments() {
                [] => 1,
                [0] => 2,
                [0, 0] => 1,
                _ => 0,
            }
        }
    }

    fn expanded(paths: &[&[usize]]) -> FxHashSet<NodePath> {
        paths.iter().map(|p| NodePath::from_slice(p)).collect()
    }

    #[test]
    fn visible_count_ignores_own_flag() {
        let source = SmallTree;
        let none = expanded(&[]);
        // A's children are counted by A's subtree regardless of A's flag.
        assert_eq!(visible_count(&source, &none, &NodePath::from([0])), 2);
        assert_eq!(visible_count(&source, &none, &NodePath::root()), 2);

        let with_a = expanded(&[&[0]]);
        assert_eq!(visible_count(&source, &with_a, &NodePath::root()), 4);
    }

    #[test]
    fn resolver_round_trips_over_all_rows() {
        let source = DeepTree;
        let set = expanded(&[&[0], &[0, 0]]);
        let total = visible_count(&source, &set, &NodePath::root());
        assert_eq!(total, 4);
        for index in 0..total {
            let path = path_for_flat_index(&source, &set, index).unwrap();
            assert_eq!(flat_index_for_path(&source, &set, &path), Some(index));
        }
        assert_eq!(path_for_flat_index(&source, &set, total), None);
    }

    #[test]
    fn collapsed_tree_resolves_top_level_only() {
        let source = SmallTree;
        let set = expanded(&[]);
        assert_eq!(
            path_for_flat_index(&source, &set, 0),
            Some(NodePath::from([0]))
        );
        assert_eq!(
            path_for_flat_index(&source, &set, 1),
            Some(NodePath::from([1]))
        );
        assert_eq!(path_for_flat_index(&source, &set, 2), None);
    }

    #[test]
    fn expanding_first_sibling_shifts_later_rows() {
        let source = SmallTree;
        let set = expanded(&[&[0]]);
        assert_eq!(
            flat_index_for_path(&source, &set, &NodePath::from([0])),
            Some(0)
        );
        assert_eq!(
            flat_index_for_path(&source, &set, &NodePath::from([0, 0])),
            Some(1)
        );
        assert_eq!(
            flat_index_for_path(&source, &set, &NodePath::from([0, 1])),
            Some(2)
        );
        assert_eq!(
            flat_index_for_path(&source, &set, &NodePath::from([1])),
            Some(3)
        );
    }

    #[test]
    fn root_and_invalid_paths_have_no_index() {
        let source = SmallTree;
        let set = expanded(&[]);
        assert_eq!(flat_index_for_path(&source, &set, &NodePath::root()), None);
        assert_eq!(
            flat_index_for_path(&source, &set, &NodePath::from([5])),
            None
        );
        assert_eq!(
            flat_index_for_path(&source, &set, &NodePath::from([1, 0])),
            None
        );
    }

    #[test]
    fn visible_rows_match_resolver_order() {
        let source = DeepTree;
        let set = expanded(&[&[0], &[0, 0]]);
        let rows = visible_rows(&source, &set);
        assert_eq!(
            rows.len(),
            visible_count(&source, &set, &NodePath::root())
        );
        let paths: Vec<_> = rows.iter().map(|row| row.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                NodePath::from([0]),
                NodePath::from([0, 0]),
                NodePath::from([0, 0, 0]),
                NodePath::from([0, 1]),
            ]
        );
        for (index, row) in rows.iter().enumerate() {
            assert_eq!(flat_index_for_path(&source, &set, &row.path), Some(index));
        }
        let levels: Vec<_> = rows.iter().map(VisibleRow::level).collect();
        assert_eq!(levels, vec![0, 1, 2, 1]);
    }

    #[test]
    fn tail_stack_tracks_sibling_runs() {
        let source = DeepTree;
        let set = expanded(&[&[0], &[0, 0]]);
        let rows = visible_rows(&source, &set);
        // Top-level X: no guide column.
        assert!(rows[0].is_tail_stack.is_empty());
        // Y is not the last child of X; its leaf W is.
        assert_eq!(rows[1].is_tail_stack.as_slice(), &[false]);
        assert_eq!(rows[2].is_tail_stack.as_slice(), &[false, true]);
        assert_eq!(rows[3].is_tail_stack.as_slice(), &[true]);
    }
}
