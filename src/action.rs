use crate::path::NodePath;

/// Actions that a user or application can initiate on the tree view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeAction<Custom = ()> {
    /// Move selection to the previous visible row.
    SelectPrev,
    /// Move selection to the next visible row.
    SelectNext,
    /// Move selection to the parent node.
    SelectParent,
    /// Expand the selected node and move into its first child.
    SelectChild,
    /// Activate the selected row: select a leaf, toggle anything else.
    Activate,
    /// Expand all nodes in the tree.
    ExpandAll,
    /// Collapse all nodes in the tree.
    CollapseAll,
    /// Select the first visible row.
    SelectFirst,
    /// Select the last visible row.
    SelectLast,
    /// Toggle drawing of guide lines.
    ToggleGuides,
    /// Custom action forwarded to the caller without internal handling.
    Custom(Custom),
}

/// Result of handling an action, key event, or row activation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeEvent<Custom = ()> {
    /// The action was handled internally and state was updated.
    Handled,
    /// The action was ignored (nothing selected, stale index, nothing to do).
    Unhandled,
    /// A leaf row was activated; no state changed.
    LeafSelected(NodePath),
    /// The node was expanded and its row range pushed to the host.
    NodeExpanded(NodePath),
    /// The node was collapsed and its row range pushed to the host.
    NodeCollapsed(NodePath),
    /// The action is forwarded to the caller for handling.
    Action(TreeAction<Custom>),
}
