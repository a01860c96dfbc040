// Interactive demo: a category catalog with an incremental row-edit log.
//
// The left pane is the tree; the right pane shows the ranges the state
// emitted for each expand/collapse, the way an animating list host would
// receive them.
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::{DefaultTerminal, Frame};

use tui_treeflat::{
    NodePath, RowEdit, TreeEvent, TreeLabelPrefix, TreeLabelProvider, TreeListState,
    TreeListStyle, TreeListView, TreeSource,
};

struct Category {
    name: &'static str,
    subcategories: Vec<Category>,
}

impl Category {
    fn leaf(name: &'static str) -> Self {
        Self {
            name,
            subcategories: Vec::new(),
        }
    }

    fn group(name: &'static str, subcategories: Vec<Self>) -> Self {
        Self {
            name,
            subcategories,
        }
    }
}

struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    fn sample() -> Self {
        Self {
            categories: vec![
                Category::group(
                    "Produce",
                    vec![
                        Category::group(
                            "Fruits",
                            vec![Category::leaf("Apples"), Category::leaf("Pears")],
                        ),
                        Category::group("Vegetables", vec![Category::leaf("Carrots")]),
                    ],
                ),
                Category::group(
                    "Dairy",
                    vec![
                        Category::leaf("Milk"),
                        Category::group(
                            "Cheese",
                            vec![Category::leaf("Cheddar"), Category::leaf("Gouda")],
                        ),
                    ],
                ),
                Category::leaf("Bakery"),
            ],
        }
    }

    fn node(&self, path: &NodePath) -> Option<&Category> {
        let (&first, rest) = path.segments().split_first()?;
        let mut node = self.categories.get(first)?;
        for &index in rest {
            node = node.subcategories.get(index)?;
        }
        Some(node)
    }
}

impl TreeSource for Catalog {
    fn child_count(&self, path: &NodePath) -> usize {
        if path.is_root() {
            return self.categories.len();
        }
        self.node(path).map_or(0, |node| node.subcategories.len())
    }
}

struct CatalogLabel;

impl TreeLabelProvider<Catalog> for CatalogLabel {
    fn label_parts<'a>(&'a self, source: &'a Catalog, path: &NodePath) -> TreeLabelPrefix<'a> {
        TreeLabelPrefix {
            name: source.node(path).map_or("?", |node| node.name),
            prefix: None,
        }
    }
}

struct App {
    catalog: Catalog,
    state: TreeListState,
    edits: Vec<RowEdit>,
    status: String,
}

impl App {
    fn new() -> Self {
        let mut state = TreeListState::new();
        state.select(Some(0));
        Self {
            catalog: Catalog::sample(),
            state,
            edits: Vec::new(),
            status: "↑/↓ move · ←/→ fold · enter toggle · g guides · q quit".to_string(),
        }
    }

    fn note(&mut self, event: TreeEvent) {
        match event {
            TreeEvent::LeafSelected(path) => self.status = format!("selected leaf {path}"),
            TreeEvent::NodeExpanded(path) => self.status = format!("expanded {path}"),
            TreeEvent::NodeCollapsed(path) => self.status = format!("collapsed {path}"),
            TreeEvent::Handled | TreeEvent::Unhandled | TreeEvent::Action(_) => {}
        }
    }
}

fn main() -> io::Result<()> {
    let terminal = ratatui::init();
    let result = run(terminal);
    ratatui::restore();
    result
}

fn run(mut terminal: DefaultTerminal) -> io::Result<()> {
    let mut app = App::new();
    loop {
        terminal.draw(|frame| draw(frame, &mut app))?;
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.code == KeyCode::Char('q') {
                return Ok(());
            }
            let event = app.state.handle_key(&app.catalog, key, &mut app.edits);
            app.note(event);
        }
    }
}

fn draw(frame: &mut Frame, app: &mut App) {
    let [tree_area, side_area] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
            .areas(frame.area());

    let style = TreeListStyle {
        title: Some(Line::from(" Catalog ")),
        highlight_style: Style::default().add_modifier(Modifier::REVERSED),
        line_style: Style::default().fg(Color::DarkGray),
        ..TreeListStyle::default()
    };
    let label = CatalogLabel;
    let widget = TreeListView::new(&app.catalog, &label, style);
    frame.render_stateful_widget(widget, tree_area, &mut app.state);

    let [log_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).areas(side_area);

    let items: Vec<ListItem<'_>> = app
        .edits
        .iter()
        .rev()
        .take(log_area.height.saturating_sub(2) as usize)
        .map(|edit| {
            let text = match edit {
                RowEdit::Insert(range) => {
                    format!("insert rows [{}, {})", range.start, range.end())
                }
                RowEdit::Remove(range) => {
                    format!("remove rows [{}, {})", range.start, range.end())
                }
            };
            ListItem::new(text)
        })
        .collect();
    frame.render_widget(
        List::new(items).block(Block::default().borders(Borders::ALL).title(" Row edits ")),
        log_area,
    );

    frame.render_widget(
        Paragraph::new(app.status.as_str()).block(Block::default().borders(Borders::ALL)),
        status_area,
    );
}
