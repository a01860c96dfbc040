//! Collapsible tree list for ratatui: a path-addressed tree flattened into
//! one scrollable row sequence, with incremental insert/remove row ranges
//! for hosts that animate updates instead of reloading.
//!
//! Feature flags:
//! - `keymap`: crossterm-based key bindings and `TreeListState::handle_key*` helpers.
//! - `serde`: serde support for `NodePath` and `TreeListSnapshot`.

mod action;
mod context;
mod flatten;
mod glyphs;
mod host;
#[cfg(feature = "keymap")]
mod keymap;
mod path;
pub mod prelude;
mod source;
mod state;
mod style;
mod widget;

pub use action::{TreeAction, TreeEvent};
pub use context::TreeRowContext;
pub use flatten::{
    VisibleRow, flat_index_for_path, path_for_flat_index, visible_count, visible_rows,
};
pub use glyphs::{
    TreeGlyphs, TreeLabelPrefix, TreeLabelProvider, TreeLabelRenderer, tree_label_line,
};
pub use host::{ListHost, RowEdit, RowRange};
#[cfg(feature = "keymap")]
pub use keymap::{KeymapProfile, TreeKeyBindings};
pub use path::NodePath;
pub use source::{EmptyTree, TreeSource};
pub use state::{TreeListSnapshot, TreeListState};
pub use style::{TreeListStyle, TreeScrollPolicy};
pub use widget::TreeListView;
