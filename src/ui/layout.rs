//! Main layout and rendering for the interactive browser.
//!
//! The screen is a header block (title, path, metric summary, key hints and
//! the active sort) above a bordered table of the current directory.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::report::format::{ellipsize, format_count, format_metrics, format_size};
use crate::tree::TreeNode;
use crate::ui::colors::ColorScheme;
use crate::ui::view::{Row, ViewModel};

/// Application version string.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
const APP_NAME: &str = "loc-tree";

/// Smallest terminal the browser will draw into.
const MIN_WIDTH: u16 = 60;
const MIN_HEIGHT: u16 = 10;

const HEADER_HEIGHT: u16 = 6;

// Fixed column widths
const COUNTED_WIDTH: usize = 3;
const LINES_WIDTH: usize = 9;
const TOKENS_WIDTH: usize = 9;
const SIZE_WIDTH: usize = 10;

/// Bar width for a terminal `width` columns wide.
pub fn bar_width_for(width: u16) -> usize {
    (width as usize / 10).clamp(6, 16)
}

/// Main render function that draws the entire UI.
///
/// Also records the visible page height on the app so page commands move
/// by what is actually on screen.
pub fn render_ui(frame: &mut Frame, app: &mut App, colors: &ColorScheme) {
    let size = frame.area();

    if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
        render_too_small(frame, size, colors);
        return;
    }

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // Header
            Constraint::Min(3),                // Table
        ])
        .split(size);

    let table_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));
    let table_inner = table_block.inner(main_layout[1]);

    // One line of the table is the column header
    let visible_rows = table_inner.height.saturating_sub(1) as usize;
    app.page_size = visible_rows.max(1);
    app.ensure_visible(visible_rows);

    let view = ViewModel::build(app, bar_width_for(size.width));

    render_header(frame, main_layout[0], &view, colors);

    frame.render_widget(table_block, main_layout[1]);
    render_table(frame, table_inner, &view, app.scroll_offset, colors);
}

fn render_too_small(frame: &mut Frame, area: Rect, colors: &ColorScheme) {
    let message = Paragraph::new(vec![
        Line::from(Span::styled(
            "Terminal too small",
            Style::default()
                .fg(colors.warning_fg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("need at least {}x{}", MIN_WIDTH, MIN_HEIGHT),
            Style::default().fg(colors.text_dim),
        )),
    ])
    .alignment(Alignment::Center);

    frame.render_widget(message, area);
}

fn render_header(frame: &mut Frame, area: Rect, view: &ViewModel, colors: &ColorScheme) {
    let header_style = Style::default().fg(colors.header_fg).bg(colors.header_bg);
    let title_style = Style::default()
        .fg(colors.accent)
        .add_modifier(Modifier::BOLD);
    let path_style = Style::default().fg(colors.path_fg);
    let label_style = Style::default().fg(colors.text_dim);
    let metrics_style = Style::default().fg(colors.metrics_fg);
    let key_style = Style::default()
        .fg(colors.key_fg)
        .add_modifier(Modifier::BOLD);
    let hint_style = Style::default().fg(colors.hint_fg);

    let title = format!("{} v{}", APP_NAME, VERSION);
    let max_path_width = (area.width as usize).saturating_sub(title.width() + 7);
    let path = ellipsize(&view.current.path.to_string_lossy(), max_path_width);

    let dir = view.current;
    let mut controls = vec![Span::raw(" ")];
    let hints: &[(&str, &str)] = if view.depth > 0 {
        &[
            ("j/k", "move"),
            ("enter", "open"),
            ("bksp", "up"),
            ("s", "sort"),
            ("r", "reverse"),
            ("q", "quit"),
        ]
    } else {
        &[
            ("j/k", "move"),
            ("enter", "open"),
            ("s", "sort"),
            ("r", "reverse"),
            ("q", "quit"),
        ]
    };
    for &(key, action) in hints {
        controls.push(Span::styled(key, key_style));
        controls.push(Span::styled(format!(" {}  ", action), hint_style));
    }
    controls.push(Span::styled("\u{2502} sort: ", label_style));
    controls.push(Span::styled(view.sort_label(), title_style));

    let lines = vec![
        Line::from(vec![
            Span::raw(" "),
            Span::styled(title, title_style),
            Span::raw(" "),
            Span::styled("\u{2502}", header_style), // Vertical separator
            Span::raw(" "),
            Span::styled(path, path_style),
        ]),
        Line::from(vec![
            Span::styled(" total: ", label_style),
            Span::styled(format_metrics(&dir.total()), metrics_style),
        ]),
        Line::from(vec![
            Span::styled(" root: ", label_style),
            Span::styled(format_metrics(&dir.root()), metrics_style),
            Span::styled(" \u{2502} subdirs: ", label_style),
            Span::styled(format_metrics(&dir.subdirs()), metrics_style),
        ]),
        Line::from(controls),
    ];

    let header_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .style(header_style);

    frame.render_widget(Paragraph::new(lines).block(header_block), area);
}

/// Width left for the name column once the fixed columns and bars are laid
/// out, with one space between columns.
fn name_width(total_width: usize, bar_width: usize) -> usize {
    let fixed = COUNTED_WIDTH + LINES_WIDTH + TOKENS_WIDTH + SIZE_WIDTH + 2 * bar_width + 6;
    total_width.saturating_sub(fixed)
}

/// Pad (or cut) `s` to exactly `width` display columns.
fn pad_to_width(s: &str, width: usize) -> String {
    let cut = ellipsize(s, width);
    let fill = width.saturating_sub(cut.width());
    format!("{}{}", cut, " ".repeat(fill))
}

fn render_table(
    frame: &mut Frame,
    area: Rect,
    view: &ViewModel,
    scroll_offset: usize,
    colors: &ColorScheme,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let name_w = name_width(area.width as usize, view.bar_width);

    let column_header = format!(
        "{} {:<cw$} {:>lw$} {:>tw$} {:>sw$} {:<bw$} {:<bw$}",
        pad_to_width("Name", name_w),
        "Cnt",
        "Lines",
        "Tokens",
        "Size",
        "LOC bar",
        "Tok bar",
        cw = COUNTED_WIDTH,
        lw = LINES_WIDTH,
        tw = TOKENS_WIDTH,
        sw = SIZE_WIDTH,
        bw = view.bar_width,
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            column_header,
            Style::default()
                .fg(colors.text_dim)
                .add_modifier(Modifier::BOLD),
        ))),
        chunks[0],
    );

    if view.rows.is_empty() {
        let placeholder = Line::from(Span::styled(
            "<empty>",
            Style::default()
                .fg(colors.text_dim)
                .add_modifier(Modifier::ITALIC),
        ));
        frame.render_widget(List::new(vec![ListItem::new(placeholder)]), chunks[1]);
        return;
    }

    let visible_height = chunks[1].height as usize;
    let end = (scroll_offset + visible_height).min(view.rows.len());

    let items: Vec<ListItem> = view.rows[scroll_offset.min(end)..end]
        .iter()
        .enumerate()
        .map(|(offset, row)| {
            let is_selected = scroll_offset + offset == view.cursor;
            let item = ListItem::new(build_row_line(row, name_w, view.bar_width, colors));
            if is_selected {
                item.style(
                    Style::default()
                        .fg(colors.selected)
                        .add_modifier(Modifier::REVERSED),
                )
            } else {
                item
            }
        })
        .collect();

    frame.render_widget(List::new(items), chunks[1]);
}

/// Build a single table row.
fn build_row_line(
    row: &Row,
    name_w: usize,
    bar_width: usize,
    colors: &ColorScheme,
) -> Line<'static> {
    let metrics = row.node.metrics();

    let (name, name_color, counted) = match row.node {
        TreeNode::Dir(dir) => (format!("{}/", dir.name), colors.dirs, "-"),
        TreeNode::File(file) if file.counted => (file.name.clone(), colors.counted_files, "yes"),
        TreeNode::File(file) => (file.name.clone(), colors.uncounted_files, "no"),
    };

    let text_style = Style::default().fg(colors.text);

    let mut spans = vec![
        Span::styled(pad_to_width(&name, name_w), Style::default().fg(name_color)),
        Span::raw(" "),
        Span::styled(format!("{:<w$}", counted, w = COUNTED_WIDTH), text_style),
        Span::raw(" "),
        Span::styled(
            format!("{:>w$}", format_count(metrics.lines), w = LINES_WIDTH),
            text_style,
        ),
        Span::raw(" "),
        Span::styled(
            format!("{:>w$}", format_count(metrics.tokens), w = TOKENS_WIDTH),
            text_style,
        ),
        Span::raw(" "),
        Span::styled(
            format!("{:>w$}", format_size(metrics.size_bytes), w = SIZE_WIDTH),
            text_style,
        ),
        Span::raw(" "),
    ];
    spans.extend(bar_spans(row.loc_bar, bar_width, colors));
    spans.push(Span::raw(" "));
    spans.extend(bar_spans(row.token_bar, bar_width, colors));

    Line::from(spans)
}

fn bar_spans(filled: usize, width: usize, colors: &ColorScheme) -> [Span<'static>; 2] {
    let empty = width.saturating_sub(filled);
    [
        Span::styled(
            "\u{2588}".repeat(filled),
            Style::default().fg(colors.bar_color(filled, width)),
        ),
        Span::styled("\u{2591}".repeat(empty), Style::default().fg(colors.bar_empty)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{DirNode, FileNode, Metrics};
    use ratatui::{backend::TestBackend, Terminal};
    use std::path::PathBuf;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|line| line.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn sample() -> DirNode {
        DirNode::new(
            "proj",
            PathBuf::from("/work/proj"),
            vec![
                TreeNode::Dir(DirNode::new("empty", PathBuf::from("/work/proj/empty"), Vec::new())),
                TreeNode::File(FileNode::new("main.py", Metrics::new(1200, 3400, 13600), true)),
                TreeNode::File(FileNode::new("README.md", Metrics::size_only(80), false)),
            ],
        )
    }

    #[test]
    fn test_bar_width_for() {
        assert_eq!(bar_width_for(40), 6);
        assert_eq!(bar_width_for(100), 10);
        assert_eq!(bar_width_for(400), 16);
    }

    #[test]
    fn test_pad_to_width() {
        assert_eq!(pad_to_width("abc", 5), "abc  ");
        assert_eq!(pad_to_width("abcdefgh", 6), "abc...");
        assert_eq!(pad_to_width("", 2), "  ");
    }

    #[test]
    fn test_name_width_never_underflows() {
        assert_eq!(name_width(10, 16), 0);
        assert_eq!(name_width(100, 10), 100 - (31 + 20 + 6));
    }

    #[test]
    fn test_render_directory() {
        let root = sample();
        let mut app = App::new(&root);
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();

        terminal
            .draw(|frame| render_ui(frame, &mut app, &ColorScheme::monochrome()))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("/work/proj"));
        assert!(text.contains("total: 1,200 lines, ~3,400 tokens, 13.4 KiB"));
        let main_row = text.lines().find(|l| l.contains("main.py")).unwrap();
        assert!(main_row.contains("13.3 KiB"));
        assert!(text.contains("LOC bar"));
        assert!(text.contains("Tok bar"));
        assert!(text.contains("sort: tokens (desc)"));
        assert!(text.contains("main.py"));
        assert!(text.contains("empty/"));
        assert!(text.contains("yes"));
        assert!(text.contains("1,200"));
        assert!(!text.contains("bksp"));
        // The visible rows area is what page commands move by
        assert_eq!(app.page_size, 20 - HEADER_HEIGHT as usize - 3);
    }

    #[test]
    fn test_render_empty_directory_placeholder() {
        let root = sample();
        let mut app = App::new(&root);
        // tokens desc: main.py, then the zero-token ties by name
        app.handle_command(crate::ui::Command::MoveDown);
        app.handle_command(crate::ui::Command::Open);
        assert_eq!(app.current().name, "empty");

        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        terminal
            .draw(|frame| render_ui(frame, &mut app, &ColorScheme::default()))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("<empty>"));
        assert!(text.contains("bksp up"));
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_render_too_small() {
        let root = sample();
        let mut app = App::new(&root);
        let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();

        terminal
            .draw(|frame| render_ui(frame, &mut app, &ColorScheme::default()))
            .unwrap();

        assert!(screen_text(&terminal).contains("Terminal too small"));
    }
}
