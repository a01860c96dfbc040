// Minimal example: a tiny tree rendered into an in-memory buffer.
use ratatui::layout::Rect;
use ratatui::prelude::Buffer;
use ratatui::widgets::StatefulWidget;

use tui_treeflat::{
    NodePath, TreeGlyphs, TreeLabelPrefix, TreeLabelProvider, TreeListState, TreeListStyle,
    TreeListView, TreeSource,
};

// Two top-level nodes; "alpha" has two leaf children. The widget queries
// the tree through child counts per path only.
struct Model;

impl TreeSource for Model {
    fn child_count(&self, path: &NodePath) -> usize {
        match path.segments() {
            [] | [0] => 2,
            _ => 0,
        }
    }
}

// Label provider: maps a path to the visible row text.
struct Label;

impl TreeLabelProvider<Model> for Label {
    fn label_parts<'a>(&'a self, _source: &'a Model, path: &NodePath) -> TreeLabelPrefix<'a> {
        let name = match path.segments() {
            [0] => "alpha",
            [0, 0] => "alpha-one",
            [0, 1] => "alpha-two",
            [1] => "beta",
            _ => "?",
        };
        TreeLabelPrefix { name, prefix: None }
    }
}

fn main() {
    let model = Model;
    let label = Label;

    // State holds selection/expansion and must live across frames.
    let mut state = TreeListState::new();
    state.expand_node(&model, &NodePath::from([0]), &mut ());

    // Style controls borders/highlights and scrolling policy.
    let style = TreeListStyle::default();
    let widget = TreeListView::new(&model, &label, style).glyphs(TreeGlyphs::ascii());

    // Render into an in-memory buffer (no terminal required for the example).
    let area = Rect::new(0, 0, 40, 8);
    let mut buffer = Buffer::empty(area);

    widget.render(area, &mut buffer, &mut state);
}
