use ratatui::layout::Rect;
use ratatui::prelude::Buffer;
use ratatui::widgets::{
    Block, Borders, List, ListItem, Scrollbar, ScrollbarOrientation, ScrollbarState,
    StatefulWidget,
};

use crate::context::TreeRowContext;
use crate::flatten::visible_rows;
use crate::glyphs::{TreeGlyphs, TreeLabelRenderer};
use crate::source::TreeSource;
use crate::state::TreeListState;
use crate::style::TreeListStyle;

/// Основной виджет дерева (list + stateful).
///
/// Renders the flattened visible rows of `source`, one label line per row.
/// The row set is recomputed from the expansion state on every render, so
/// the widget needs no invalidation calls.
pub struct TreeListView<'a, S, L>
where
    S: TreeSource,
    L: TreeLabelRenderer<S>,
{
    source: &'a S,
    label: &'a L,
    style: TreeListStyle<'a>,
    glyphs: TreeGlyphs<'a>,
}

impl<'a, S, L> TreeListView<'a, S, L>
where
    S: TreeSource,
    L: TreeLabelRenderer<S>,
{
    pub const fn new(source: &'a S, label: &'a L, style: TreeListStyle<'a>) -> Self {
        Self {
            source,
            label,
            style,
            glyphs: TreeGlyphs::unicode(),
        }
    }

    pub const fn glyphs(mut self, glyphs: TreeGlyphs<'a>) -> Self {
        self.glyphs = glyphs;
        self
    }

    fn render_scrollbar(
        area: Rect,
        buf: &mut Buffer,
        state: &TreeListState,
        inner_height: usize,
        scroll_rows: usize,
    ) {
        let scroll_len = scroll_rows.saturating_add(1);
        let position = state
            .list_state()
            .offset()
            .min(scroll_len.saturating_sub(1));
        let mut scrollbar_state = ScrollbarState::new(scroll_len)
            .position(position)
            .viewport_content_length(inner_height);
        Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .render(area, buf, &mut scrollbar_state);
    }
}

impl<S, L> StatefulWidget for TreeListView<'_, S, L>
where
    S: TreeSource,
    L: TreeLabelRenderer<S>,
{
    type State = TreeListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let rows = visible_rows(self.source, state.expanded_set());

        let mut block = Block::default().borders(self.style.borders);
        if let Some(title) = self.style.title.clone() {
            block = block.title(title);
        }
        block = block
            .style(self.style.block_style)
            .border_style(self.style.border_style);

        let inner_height = block.inner(area).height as usize;
        state.ensure_selection_visible_with_policy(
            self.source,
            inner_height,
            self.style.scroll_policy,
        );

        let items: Vec<ListItem<'_>> = rows
            .iter()
            .map(|row| {
                let ctx = TreeRowContext {
                    level: row.level(),
                    is_tail_stack: &row.is_tail_stack,
                    is_expanded: state.is_expanded(&row.path),
                    has_children: row.has_children,
                    draw_lines: state.draw_lines(),
                    line_style: self.style.line_style,
                };
                ListItem::new(self.label.line(self.source, &row.path, &ctx, &self.glyphs))
            })
            .collect();

        let scroll_rows = rows.len().saturating_sub(inner_height);
        let (list_area, list_block, scrollbar_area) = if scroll_rows > 0 {
            let list_area = Rect {
                width: area.width.saturating_sub(1),
                ..area
            };
            let scrollbar_area = Rect {
                x: area.x + area.width - 1,
                y: area.y,
                width: 1,
                height: area.height,
            };
            let mut list_borders = self.style.borders;
            list_borders.remove(Borders::RIGHT);
            (list_area, block.borders(list_borders), Some(scrollbar_area))
        } else {
            (area, block, None)
        };

        let list = List::new(items)
            .style(self.style.block_style)
            .block(list_block)
            .highlight_style(self.style.highlight_style)
            .highlight_symbol(self.style.highlight_symbol);
        StatefulWidget::render(list, list_area, buf, state.list_state_mut());

        if let Some(scrollbar_area) = scrollbar_area {
            Self::render_scrollbar(scrollbar_area, buf, state, inner_height, scroll_rows);
        }
    }
}
