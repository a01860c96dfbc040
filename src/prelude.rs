pub use crate::{
    EmptyTree, ListHost, NodePath, RowEdit, RowRange, TreeAction, TreeEvent, TreeGlyphs,
    TreeLabelPrefix, TreeLabelProvider, TreeLabelRenderer, TreeListSnapshot, TreeListState,
    TreeListStyle, TreeListView, TreeRowContext, TreeScrollPolicy, TreeSource, VisibleRow,
    flat_index_for_path, path_for_flat_index, tree_label_line, visible_count, visible_rows,
};

#[cfg(feature = "keymap")]
pub use crate::{KeymapProfile, TreeKeyBindings};
