use ratatui::widgets::ListState;
use rustc_hash::{FxBuildHasher, FxHashSet};

use crate::action::{TreeAction, TreeEvent};
use crate::flatten;
use crate::host::{ListHost, RowEdit, RowRange};
use crate::path::NodePath;
use crate::source::TreeSource;
use crate::style::TreeScrollPolicy;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "keymap")]
use crate::keymap::TreeKeyBindings;
#[cfg(feature = "keymap")]
use crossterm::event::KeyEvent;

/// Widget state: expanded paths plus selection and scroll position.
///
/// The expansion set is owned here and mutated only through the
/// expand/collapse methods, so every query observes a settled state.
pub struct TreeListState {
    list_state: ListState,
    // Membership records intent: a path may stay expanded while an
    // ancestor is collapsed, and leaves never enter the set.
    expanded: FxHashSet<NodePath>,
    draw_lines: bool,
    #[cfg(feature = "keymap")]
    keymap: TreeKeyBindings,
}

/// Snapshot of state (expansion, selection, scroll).
///
/// With the `serde` feature enabled, this type derives
/// `Serialize`/`Deserialize`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub struct TreeListSnapshot {
    /// Expanded paths.
    pub expanded: Vec<NodePath>,
    /// Selected row index in the visible list.
    pub selected: Option<usize>,
    /// Scroll offset within the visible list.
    pub offset: usize,
    /// Whether guide lines were enabled.
    pub draw_lines: bool,
}

impl Default for TreeListState {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeListState {
    /// Creates a new state with nothing expanded and nothing selected.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a state with preallocated capacity for the given number of
    /// expanded paths.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            list_state: ListState::default(),
            expanded: FxHashSet::with_capacity_and_hasher(capacity, FxBuildHasher),
            draw_lines: true,
            #[cfg(feature = "keymap")]
            keymap: TreeKeyBindings::new(),
        }
    }

    #[cfg(feature = "keymap")]
    /// Returns a mutable reference to the key binding set.
    pub const fn keymap_mut(&mut self) -> &mut TreeKeyBindings {
        &mut self.keymap
    }

    pub(crate) const fn list_state(&self) -> &ListState {
        &self.list_state
    }

    pub(crate) const fn list_state_mut(&mut self) -> &mut ListState {
        &mut self.list_state
    }

    pub(crate) const fn expanded_set(&self) -> &FxHashSet<NodePath> {
        &self.expanded
    }

    /// Returns whether guide lines are drawn.
    #[inline]
    pub const fn draw_lines(&self) -> bool {
        self.draw_lines
    }

    /// Enables or disables drawing of guide lines.
    pub const fn set_draw_lines(&mut self, draw: bool) {
        self.draw_lines = draw;
    }

    /// Returns `true` if `path` is currently expanded.
    #[inline]
    pub fn is_expanded(&self, path: &NodePath) -> bool {
        self.expanded.contains(path)
    }

    /// Total number of visible rows.
    pub fn visible_row_count<S: TreeSource + ?Sized>(&self, source: &S) -> usize {
        flatten::visible_count(source, &self.expanded, &NodePath::root())
    }

    /// Rows currently visible under `path`, excluding `path` itself.
    pub fn visible_count<S: TreeSource + ?Sized>(&self, source: &S, path: &NodePath) -> usize {
        flatten::visible_count(source, &self.expanded, path)
    }

    /// Resolves a flat row position to its path, or `None` for stale
    /// indices.
    pub fn path_at<S: TreeSource + ?Sized>(&self, source: &S, index: usize) -> Option<NodePath> {
        flatten::path_for_flat_index(source, &self.expanded, index)
    }

    /// Current flat row position of `path`, or `None` if the path does not
    /// exist in the source (or is the root).
    pub fn flat_index_of<S: TreeSource + ?Sized>(
        &self,
        source: &S,
        path: &NodePath,
    ) -> Option<usize> {
        flatten::flat_index_for_path(source, &self.expanded, path)
    }

    /// Expands `path`, returning the flat row range that appeared.
    ///
    /// No-op (`None`) for leaves, already-expanded paths, and paths the
    /// source does not know.
    pub fn expand<S: TreeSource + ?Sized>(
        &mut self,
        source: &S,
        path: &NodePath,
    ) -> Option<RowRange> {
        if self.expanded.contains(path) {
            return None;
        }
        let index = flatten::flat_index_for_path(source, &self.expanded, path)?;
        if source.is_leaf(path) {
            return None;
        }
        self.expanded.insert(path.clone());
        // The subtree count does not depend on the node's own flag, so it
        // can equally be read before or after the insert.
        let count = flatten::visible_count(source, &self.expanded, path);
        Some(RowRange::new(index + 1, count))
    }

    /// Collapses `path`, returning the flat row range that disappeared.
    ///
    /// No-op (`None`) when `path` is not expanded.
    pub fn collapse<S: TreeSource + ?Sized>(
        &mut self,
        source: &S,
        path: &NodePath,
    ) -> Option<RowRange> {
        if !self.expanded.contains(path) {
            return None;
        }
        // Range math runs while the flag is still set, so the reported rows
        // are the ones on screen right now.
        let index = flatten::flat_index_for_path(source, &self.expanded, path)?;
        let count = flatten::visible_count(source, &self.expanded, path);
        self.expanded.remove(path);
        Some(RowRange::new(index + 1, count))
    }

    /// Expands `path` and pushes the resulting insert range to `host`.
    ///
    /// Returns `true` if the state changed.
    pub fn expand_node<S, H>(&mut self, source: &S, path: &NodePath, host: &mut H) -> bool
    where
        S: TreeSource + ?Sized,
        H: ListHost,
    {
        self.expand(source, path).is_some_and(|range| {
            host.apply(RowEdit::Insert(range));
            true
        })
    }

    /// Collapses `path` and pushes the resulting remove range to `host`.
    ///
    /// Returns `true` if the state changed.
    pub fn collapse_node<S, H>(&mut self, source: &S, path: &NodePath, host: &mut H) -> bool
    where
        S: TreeSource + ?Sized,
        H: ListHost,
    {
        self.collapse(source, path).is_some_and(|range| {
            host.apply(RowEdit::Remove(range));
            true
        })
    }

    /// Routes an activation (tap, Enter) on flat row `index`.
    ///
    /// Unresolvable indices are dropped: they mean the host queued the event
    /// against a row layout that a pending edit has already superseded.
    pub fn activate<S, H>(&mut self, source: &S, index: usize, host: &mut H) -> TreeEvent
    where
        S: TreeSource + ?Sized,
        H: ListHost,
    {
        self.activate_as(source, index, host)
    }

    fn activate_as<S, H, C>(&mut self, source: &S, index: usize, host: &mut H) -> TreeEvent<C>
    where
        S: TreeSource + ?Sized,
        H: ListHost,
    {
        let Some(path) = self.path_at(source, index) else {
            return TreeEvent::Unhandled;
        };
        if source.is_leaf(&path) {
            return TreeEvent::LeafSelected(path);
        }
        if self.expanded.contains(&path) {
            self.collapse_node(source, &path, host);
            TreeEvent::NodeCollapsed(path)
        } else {
            self.expand_node(source, &path, host);
            TreeEvent::NodeExpanded(path)
        }
    }

    /// Expands every proper ancestor of `path` so its row can appear.
    ///
    /// Returns `true` if any flag changed. No row ranges are emitted; hosts
    /// must reload after bulk operations.
    pub fn expand_to<S: TreeSource + ?Sized>(&mut self, source: &S, path: &NodePath) -> bool {
        let mut changed = false;
        for ancestor in path.ancestors() {
            if !source.is_leaf(&ancestor) && self.expanded.insert(ancestor) {
                changed = true;
            }
        }
        changed
    }

    /// Expands ancestors of `path` and selects its row.
    ///
    /// Returns `false` if the path does not resolve to a row.
    pub fn select_path<S: TreeSource + ?Sized>(&mut self, source: &S, path: &NodePath) -> bool {
        self.expand_to(source, path);
        match self.flat_index_of(source, path) {
            Some(index) => {
                self.list_state.select(Some(index));
                true
            }
            None => false,
        }
    }

    /// Expands every non-leaf node reachable from the root.
    ///
    /// No row ranges are emitted; hosts must reload afterwards.
    pub fn expand_all<S: TreeSource + ?Sized>(&mut self, source: &S) {
        self.expanded.clear();
        let hint = source.size_hint();
        let extra = hint.saturating_sub(self.expanded.capacity());
        if extra > 0 {
            self.expanded.reserve(extra);
        }
        self.expand_subtree(source, &NodePath::root());
    }

    fn expand_subtree<S: TreeSource + ?Sized>(&mut self, source: &S, prefix: &NodePath) {
        for i in 0..source.child_count(prefix) {
            let child = prefix.child(i);
            if !source.is_leaf(&child) {
                self.expand_subtree(source, &child);
                self.expanded.insert(child);
            }
        }
    }

    /// Collapses all nodes.
    ///
    /// No row ranges are emitted; hosts must reload afterwards.
    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Returns the selected row index, if any.
    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Sets the selected row index.
    pub fn select(&mut self, index: Option<usize>) {
        self.list_state.select(index);
    }

    /// Returns the path of the currently selected row, if any.
    pub fn selected_path<S: TreeSource + ?Sized>(&self, source: &S) -> Option<NodePath> {
        self.path_at(source, self.list_state.selected()?)
    }

    /// Selects the first visible row.
    pub fn select_first(&mut self) {
        self.list_state.select_first();
    }

    /// Selects the last visible row.
    pub fn select_last<S: TreeSource + ?Sized>(&mut self, source: &S) {
        let rows = self.visible_row_count(source);
        if rows == 0 {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(rows - 1));
        }
    }

    /// Moves selection to the previous visible row.
    pub fn select_prev<S: TreeSource + ?Sized>(&mut self, source: &S) {
        if self.visible_row_count(source) == 0 {
            self.list_state.select(None);
            return;
        }
        let selected = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some(selected.saturating_sub(1)));
    }

    /// Moves selection to the next visible row.
    pub fn select_next<S: TreeSource + ?Sized>(&mut self, source: &S) {
        let rows = self.visible_row_count(source);
        if rows == 0 {
            self.list_state.select(None);
            return;
        }
        let selected = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some((selected + 1).min(rows - 1)));
    }

    /// Scrolls the view down by the given number of rows.
    pub fn scroll_down_by(&mut self, amount: u16) {
        self.list_state.scroll_down_by(amount);
    }

    /// Scrolls the view up by the given number of rows.
    pub fn scroll_up_by(&mut self, amount: u16) {
        self.list_state.scroll_up_by(amount);
    }

    /// Adjusts scroll offset so the selection is within the viewport.
    pub fn ensure_selection_visible<S: TreeSource + ?Sized>(
        &mut self,
        source: &S,
        viewport_height: usize,
    ) {
        self.clamp_selection(source);
        let Some(selected) = self.list_state.selected() else {
            return;
        };
        let viewport_height = viewport_height.max(1);
        let offset = self.list_state.offset();
        if selected < offset {
            *self.list_state.offset_mut() = selected;
        } else if selected >= offset + viewport_height {
            *self.list_state.offset_mut() = selected + 1 - viewport_height;
        }
    }

    /// Adjusts selection visibility according to the provided scroll policy.
    pub fn ensure_selection_visible_with_policy<S: TreeSource + ?Sized>(
        &mut self,
        source: &S,
        viewport_height: usize,
        policy: TreeScrollPolicy,
    ) {
        match policy {
            TreeScrollPolicy::KeepInView => self.ensure_selection_visible(source, viewport_height),
            TreeScrollPolicy::CenterOnSelect => {
                self.ensure_selection_visible_centered(source, viewport_height);
            }
        }
    }

    fn ensure_selection_visible_centered<S: TreeSource + ?Sized>(
        &mut self,
        source: &S,
        viewport_height: usize,
    ) {
        self.clamp_selection(source);
        let Some(selected) = self.list_state.selected() else {
            return;
        };
        let viewport_height = viewport_height.max(1);
        let total = self.visible_row_count(source);
        if total <= viewport_height {
            *self.list_state.offset_mut() = 0;
            return;
        }

        // Center selection, then clamp to valid scroll range.
        let half = viewport_height / 2;
        let mut offset = selected.saturating_sub(half);
        let max_offset = total.saturating_sub(viewport_height);
        if offset > max_offset {
            offset = max_offset;
        }
        *self.list_state.offset_mut() = offset;
    }

    fn clamp_selection<S: TreeSource + ?Sized>(&mut self, source: &S) {
        let rows = self.visible_row_count(source);
        if rows == 0 {
            self.list_state.select(None);
            return;
        }
        if let Some(selected) = self.list_state.selected()
            && selected >= rows
        {
            self.list_state.select(Some(rows - 1));
        }
    }

    /// Captures a snapshot of the current state for persistence or restore.
    pub fn snapshot(&self) -> TreeListSnapshot {
        TreeListSnapshot {
            expanded: self.expanded.iter().cloned().collect(),
            selected: self.list_state.selected(),
            offset: self.list_state.offset(),
            draw_lines: self.draw_lines,
        }
    }

    /// Restores state from a previously captured snapshot.
    pub fn restore(&mut self, snapshot: TreeListSnapshot) {
        self.expanded = snapshot.expanded.into_iter().collect();
        self.draw_lines = snapshot.draw_lines;
        *self.list_state.offset_mut() = snapshot.offset;
        self.list_state.select(snapshot.selected);
    }

    /// Handles a tree action, pushing any row edits to `host`, and returns
    /// the resulting event.
    pub fn handle_action<S, H, C>(
        &mut self,
        source: &S,
        action: TreeAction<C>,
        host: &mut H,
    ) -> TreeEvent<C>
    where
        S: TreeSource + ?Sized,
        H: ListHost,
    {
        match action {
            TreeAction::SelectPrev => {
                self.select_prev(source);
                TreeEvent::Handled
            }
            TreeAction::SelectNext => {
                self.select_next(source);
                TreeEvent::Handled
            }
            TreeAction::SelectFirst => {
                self.select_first();
                TreeEvent::Handled
            }
            TreeAction::SelectLast => {
                self.select_last(source);
                TreeEvent::Handled
            }
            TreeAction::SelectParent => {
                if let Some(path) = self.selected_path(source)
                    && let Some(parent) = path.parent()
                    && let Some(index) = self.flat_index_of(source, &parent)
                {
                    self.list_state.select(Some(index));
                    return TreeEvent::Handled;
                }
                TreeEvent::Unhandled
            }
            TreeAction::SelectChild => {
                let Some(selected) = self.list_state.selected() else {
                    return TreeEvent::Unhandled;
                };
                let Some(path) = self.path_at(source, selected) else {
                    return TreeEvent::Unhandled;
                };
                if source.is_leaf(&path) {
                    return TreeEvent::Unhandled;
                }
                self.expand_node(source, &path, host);
                if source.child_count(&path) > 0 {
                    self.list_state.select(Some(selected + 1));
                }
                TreeEvent::Handled
            }
            TreeAction::Activate => {
                if let Some(selected) = self.list_state.selected() {
                    self.activate_as(source, selected, host)
                } else {
                    TreeEvent::Unhandled
                }
            }
            TreeAction::ExpandAll => {
                self.expand_all(source);
                TreeEvent::Handled
            }
            TreeAction::CollapseAll => {
                self.collapse_all();
                TreeEvent::Handled
            }
            TreeAction::ToggleGuides => {
                self.draw_lines = !self.draw_lines;
                TreeEvent::Handled
            }
            TreeAction::Custom(custom) => TreeEvent::Action(TreeAction::Custom(custom)),
        }
    }

    #[cfg(feature = "keymap")]
    /// Resolves a key event into an action and handles it.
    pub fn handle_key<S, H>(&mut self, source: &S, key: KeyEvent, host: &mut H) -> TreeEvent
    where
        S: TreeSource + ?Sized,
        H: ListHost,
    {
        let Some(action) = self.keymap.resolve(key) else {
            return TreeEvent::Unhandled;
        };
        self.handle_action(source, action, host)
    }

    #[cfg(feature = "keymap")]
    /// Resolves a key event with a custom mapping and handles it.
    pub fn handle_key_with<S, H, C, F>(
        &mut self,
        source: &S,
        key: KeyEvent,
        host: &mut H,
        custom: F,
    ) -> TreeEvent<C>
    where
        S: TreeSource + ?Sized,
        H: ListHost,
        F: Fn(KeyEvent) -> Option<C>,
    {
        let Some(action) = self.keymap.resolve_with(key, custom) else {
            return TreeEvent::Unhandled;
        };
        self.handle_action(source, action, host)
    }
}
