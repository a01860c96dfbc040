use std::borrow::Cow;

use ratatui::text::{Line, Span};

use crate::context::TreeRowContext;
use crate::path::NodePath;
use crate::source::TreeSource;

#[derive(Clone, Copy)]
pub struct TreeGlyphs<'a> {
    pub indent: &'a str,
    pub branch_last: &'a str,
    pub branch: &'a str,
    pub vert: &'a str,
    pub empty: &'a str,
    pub leaf: &'a str,
    pub expanded: &'a str,
    pub collapsed: &'a str,
}

impl TreeGlyphs<'static> {
    pub const fn unicode() -> Self {
        Self {
            indent: "   ",
            branch_last: "└──",
            branch: "├──",
            vert: "│  ",
            empty: "   ",
            leaf: "•",
            expanded: "▼",
            collapsed: "▶",
        }
    }

    pub const fn ascii() -> Self {
        Self {
            indent: "   ",
            branch_last: "`--",
            branch: "|--",
            vert: "|  ",
            empty: "   ",
            leaf: "*",
            expanded: "v",
            collapsed: ">",
        }
    }
}

impl<'a> TreeGlyphs<'a> {
    const fn expander(&self, ctx: &TreeRowContext<'_>) -> &'a str {
        if ctx.has_children {
            if ctx.is_expanded {
                self.expanded
            } else {
                self.collapsed
            }
        } else {
            self.leaf
        }
    }
}

/// Label text split into the node name and an optional short prefix
/// (status marker, icon) rendered before it.
#[derive(Clone)]
pub struct TreeLabelPrefix<'a> {
    pub name: &'a str,
    pub prefix: Option<Cow<'a, str>>,
}

/// Supplies the label parts for a node; rendering is handled by the
/// default glyph assembly.
pub trait TreeLabelProvider<S: TreeSource + ?Sized> {
    fn label_parts<'a>(&'a self, source: &'a S, path: &NodePath) -> TreeLabelPrefix<'a>;
}

/// Turns a node into its rendered row line. Implemented for free by any
/// [`TreeLabelProvider`].
pub trait TreeLabelRenderer<S: TreeSource + ?Sized> {
    fn line<'a>(
        &'a self,
        source: &'a S,
        path: &NodePath,
        ctx: &TreeRowContext,
        glyphs: &TreeGlyphs<'a>,
    ) -> Line<'a>;
}

impl<S, P> TreeLabelRenderer<S> for P
where
    S: TreeSource + ?Sized,
    P: TreeLabelProvider<S>,
{
    fn line<'a>(
        &'a self,
        source: &'a S,
        path: &NodePath,
        ctx: &TreeRowContext,
        glyphs: &TreeGlyphs<'a>,
    ) -> Line<'a> {
        tree_label_line(ctx, self.label_parts(source, path), glyphs)
    }
}

/// Assembles a row line: guide lines (or plain indent), expander, optional
/// prefix, name.
pub fn tree_label_line<'a>(
    ctx: &TreeRowContext<'_>,
    parts: TreeLabelPrefix<'a>,
    glyphs: &TreeGlyphs<'a>,
) -> Line<'a> {
    let TreeLabelPrefix { name, prefix } = parts;
    let prefix = prefix.filter(|value| !value.is_empty());
    let expander = glyphs.expander(ctx);

    if ctx.level == 0 || !ctx.draw_lines {
        let mut spans = Vec::with_capacity(ctx.level as usize + 5);
        for _ in 0..ctx.level {
            spans.push(Span::raw(glyphs.empty));
        }
        if !expander.is_empty() {
            spans.push(Span::raw(expander));
        }
        if let Some(prefix) = prefix {
            spans.push(Span::raw(prefix));
        }
        spans.push(Span::raw(" "));
        spans.push(Span::raw(name));
        return Line::from(spans);
    }

    let mut spans = Vec::with_capacity(ctx.is_tail_stack.len() + 5);
    for (depth, is_tail) in ctx.is_tail_stack.iter().enumerate() {
        let part = if depth == (ctx.level as usize) - 1 {
            if *is_tail {
                glyphs.branch_last
            } else {
                glyphs.branch
            }
        } else if *is_tail {
            glyphs.indent
        } else {
            glyphs.vert
        };
        spans.push(Span::styled(part, ctx.line_style));
    }

    if !expander.is_empty() {
        spans.push(Span::raw(expander));
        spans.push(Span::raw(" "));
    }
    if let Some(prefix) = prefix {
        spans.push(Span::raw(prefix));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::raw(name));
    Line::from(spans)
}
