use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table, TableState};

use crate::filter::{FieldKind, FilterField};
use crate::output::format_score;
use crate::tui::app::{App, InputMode};
use crate::tui::theme::ThemeColors;

const PANEL_COLUMNS: usize = 3;

/// Header line plus its bottom margin
const TABLE_HEADER_ROWS: u16 = 2;

pub fn draw(frame: &mut Frame, app: &mut App, theme: &ThemeColors) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 14 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    let panel_rows = FilterField::ALL.len().div_ceil(PANEL_COLUMNS) as u16;

    // Layout: Title(1) + Summary(2) + Filters(rows + border) + Table(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Length(panel_rows + 2),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_title(frame, chunks[0], app, theme);
    render_summary(frame, chunks[1], app, theme);
    render_filter_panel(frame, chunks[2], app, theme);
    render_table(frame, chunks[3], app, theme);
    render_status_bar(frame, chunks[4], app, theme);

    if app.input_mode == InputMode::Help {
        render_help_popup(frame, theme);
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let left = "Domain Radar";
    let mut spans = vec![Span::styled(left, Style::default().fg(theme.title_color).bold())];

    let right = format!("source: {}", app.source.display_name());
    let padding_len = (area.width as usize).saturating_sub(left.len() + right.len());
    spans.push(Span::raw(" ".repeat(padding_len)));
    spans.push(Span::styled(right, Style::default().fg(theme.muted)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_summary(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let summary = app.summary();

    let mut counts = vec![
        Span::styled(
            format!("{}", summary.filtered),
            Style::default().fg(theme.title_color).bold(),
        ),
        Span::raw(format!(" of {} domains match", summary.total)),
    ];
    if app.query.is_pending() {
        counts.push(Span::styled("  (searching...)", Style::default().fg(theme.muted)));
    }

    let lines = vec![
        Line::from(counts),
        Line::from(vec![
            Span::styled("Top picks: ", Style::default().fg(theme.muted)),
            Span::raw(summary.suggestions_line()),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn field_line<'a>(app: &App, field: FilterField, focused: bool, theme: &ThemeColors) -> Line<'a> {
    let editing = focused && app.input_mode == InputMode::Editing;

    let value = if editing {
        format!("{}|", app.edit_buffer)
    } else {
        let v = app.filters.value_of(field);
        if v.is_empty() && field.kind() == FieldKind::Text {
            "-".to_string()
        } else {
            v
        }
    };

    let label_style = if focused {
        theme.field_focused
    } else {
        Style::default().fg(theme.field_label)
    };
    let value_style = if editing {
        theme.field_editing
    } else if field.kind() == FieldKind::Text && !app.filters.value_of(field).is_empty() {
        Style::default().fg(theme.field_active)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::styled(format!("{:<14}", field.label()), label_style),
        Span::styled(value, value_style),
    ])
}

fn render_filter_panel(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let block = Block::bordered()
        .title(" Filters ")
        .border_style(Style::default().fg(theme.panel_border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::horizontal([Constraint::Ratio(1, PANEL_COLUMNS as u32); PANEL_COLUMNS])
        .split(inner);
    let per_column = FilterField::ALL.len().div_ceil(PANEL_COLUMNS);
    let focused = app.focused_field();

    for (col, fields) in FilterField::ALL.chunks(per_column).enumerate() {
        let lines: Vec<Line> = fields
            .iter()
            .map(|field| field_line(app, *field, *field == focused, theme))
            .collect();
        frame.render_widget(Paragraph::new(lines), columns[col]);
    }
}

fn render_table(frame: &mut Frame, area: Rect, app: &mut App, theme: &ThemeColors) {
    if app.records.is_empty() {
        let text = match &app.load_error {
            Some(err) => err.clone(),
            None => "No domains match the current filters".to_string(),
        };
        let empty_msg = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default());
        frame.render_widget(empty_msg, area);
        return;
    }

    // Only the rows that fit are built; the list can hold tens of thousands
    let len = app.records.len();
    let visible = area.height.saturating_sub(TABLE_HEADER_ROWS) as usize;
    let selected = app.table_state.selected().filter(|&i| i < len);
    let offset = viewport_offset(len, selected, app.table_state.offset(), visible);
    *app.table_state.offset_mut() = offset;
    let end = (offset + visible).min(len);

    let rows: Vec<Row> = app.records[offset..end]
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let idx = offset + i;
            let score_color = theme.score_color(record.score);
            let mut score_spans = vec![Span::styled(
                format!("{} ", format_score(record.score)),
                Style::default().fg(score_color),
            )];
            score_spans.extend(score_bar(record.score, 8, theme).spans);

            // Alternating row background (odd rows get subtle background)
            let row_style = if idx % 2 == 1 {
                Style::default().bg(theme.row_alt_bg)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(format!("{}.", idx + 1)).style(Style::default().fg(theme.index_color)),
                Cell::from(Line::from(score_spans)),
                Cell::from(record.domain.clone()),
                Cell::from(format!("{:>3}", record.length)),
                Cell::from(format!("{:>2}", record.hyphen_count)),
                Cell::from(format!("{:>2}", record.digit_count)),
                Cell::from(format_score(record.readable_ratio)),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(7),  // Index: "99999."
        Constraint::Length(14), // Score + bar: "0.91 ███████░"
        Constraint::Fill(1),    // Domain
        Constraint::Length(4),  // Length
        Constraint::Length(3),  // Hyphens
        Constraint::Length(3),  // Digits
        Constraint::Length(9),  // Readable
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["#", "Score", "Domain", "Len", "-", "0-9", "Readable"])
                .style(theme.header_style)
                .bottom_margin(1),
        )
        .row_highlight_style(theme.row_selected);

    let mut window_state = TableState::default().with_selected(selected.map(|i| i - offset));
    frame.render_stateful_widget(table, area, &mut window_state);
}

/// First record to show so that `selected` stays inside a viewport of
/// `height` rows, scrolling as little as possible from `offset`.
fn viewport_offset(len: usize, selected: Option<usize>, offset: usize, height: usize) -> usize {
    if len == 0 || height == 0 {
        return 0;
    }
    let mut offset = offset.min(len.saturating_sub(height));
    if let Some(selected) = selected {
        if selected < offset {
            offset = selected;
        } else if selected >= offset + height {
            offset = selected + 1 - height;
        }
    }
    offset
}

fn score_bar(score: f64, width: usize, theme: &ThemeColors) -> Line<'static> {
    let filled = (score.clamp(0.0, 1.0) * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    let mut spans = Vec::new();
    if filled > 0 {
        spans.push(Span::styled(
            "█".repeat(filled),
            Style::default().fg(theme.score_color(score)),
        ));
    }
    if empty > 0 {
        spans.push(Span::styled("░".repeat(empty), Style::default().fg(theme.bar_empty)));
    }

    Line::from(spans)
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Failed") || msg.starts_with("Error") {
            theme.flash_error
        } else {
            theme.flash_success
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let hints: &[(&str, &str)] = match app.input_mode {
            InputMode::Editing => &[("Enter", ":apply "), ("Esc", ":cancel")],
            _ => &[
                ("j/k", ":nav "),
                ("/", ":search "),
                ("Tab", ":field "),
                ("Enter", ":edit "),
                ("c", ":clear "),
                ("e", ":export "),
                ("R", ":reload "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
        };

        let mut spans = Vec::new();
        if let Some(record) = app.selected_record() {
            spans.push(Span::styled(
                format!("{}  ", record.domain),
                Style::default().fg(theme.muted),
            ));
        }
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(theme.status_key_color)));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.status_bar_bg)),
        area,
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame, theme: &ThemeColors) {
    let popup_area = centered_rect_fixed(52, 17, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(" Keyboard Shortcuts ")
        .border_style(Style::default().fg(theme.popup_border));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let entries = [
        ("j / Down      ", "Move down"),
        ("k / Up        ", "Move up"),
        ("PgDn / PgUp   ", "Move ten rows"),
        ("/             ", "Search (applied as you pause typing)"),
        ("Tab / S-Tab   ", "Next / previous filter"),
        ("Enter         ", "Edit, toggle or cycle filter"),
        ("c             ", "Clear search and patterns"),
        ("e             ", "Export results to CSV"),
        ("R             ", "Reload the source file"),
        ("?             ", "Show/hide this help"),
        ("q / Ctrl-c    ", "Quit"),
    ];

    let mut help_lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(*key, Style::default().fg(theme.popup_key).bold()),
                Span::raw(*desc),
            ])
        })
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}
