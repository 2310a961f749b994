//! TUI rendering module.
//!
//! This module handles all visual rendering using ratatui:
//! - Line numbers gutter with the current line highlighted
//! - Record headers in bold, ORF bases colored per nucleotide
//! - Status bar with mode, messages and position
//! - Help overlay

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::model::{AppMode, AppState, ResultLine};
use crate::scan::walker::LineKind;

/// Width of the line number gutter (number plus one space).
const GUTTER_WIDTH: u16 = 8;
/// Height of the status bar.
const STATUS_BAR_HEIGHT: u16 = 1;
/// Maximum width of the help overlay.
const HELP_WIDTH: u16 = 60;

const HELP_TEXT: &[(&str, &str)] = &[
    ("j / k", "next / previous line"),
    ("h / l", "scroll left / right"),
    ("gg / G", "first / last line"),
    ("] / [", "next / previous record"),
    ("Ctrl+D / Ctrl+U", "half page down / up"),
    ("PageDown / PageUp", "page down / up"),
    ("/pattern, ?pattern", "search forward / backward (case-insensitive)"),
    ("n / N", "repeat search in same / opposite direction"),
    (":<number>", "go to line"),
    (":w <file>", "save the results exactly as printed by `orfscan -o <file>`"),
    (":h", "show this help"),
    (":q", "quit"),
];

/// Color scheme for nucleotides.
pub trait ColorScheme {
    fn get_color(&self, c: char) -> Color;
}

/// DNA nucleotide color scheme.
pub struct DnaColorScheme;

impl ColorScheme for DnaColorScheme {
    fn get_color(&self, c: char) -> Color {
        match c.to_ascii_uppercase() {
            'A' => Color::Red,
            'C' => Color::Green,
            'G' => Color::Yellow,
            'T' => Color::Blue,
            _ => Color::DarkGray,
        }
    }
}

/// Renders the complete UI.
pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);

    render_lines_panel(frame, state, main_layout[0]);
    render_status_bar(frame, state, main_layout[1]);

    if state.show_help {
        render_help(frame, area);
    }
}

/// Renders the result lines with their line numbers.
fn render_lines_panel(frame: &mut Frame, state: &AppState, area: Rect) {
    let visible_rows = area.height.saturating_sub(2) as usize;
    let visible_cols = area.width.saturating_sub(2 + GUTTER_WIDTH) as usize;
    let start_row = state.viewport.first_row;
    let end_row = (start_row + visible_rows).min(state.results.line_count());

    let mut lines: Vec<Line> = Vec::with_capacity(end_row.saturating_sub(start_row));
    for row in start_row..end_row {
        let Some(line) = state.results.get(row) else {
            break;
        };
        let is_current = row == state.cursor_row;

        let gutter_style = if is_current {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut spans = vec![Span::styled(
            format!("{:>width$} ", row + 1, width = GUTTER_WIDTH as usize - 1),
            gutter_style,
        )];
        spans.extend(line_spans(line, state.viewport.first_col, visible_cols, is_current));
        lines.push(Line::from(spans));
    }

    let title = format!(
        "{} [Records: {} | ORFs: {}]",
        state.source_name,
        state.results.record_count(),
        state.results.orf_count()
    );
    let block = Block::default().borders(Borders::ALL).title(title);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Styles the visible part of one line.
fn line_spans(line: &ResultLine, first_col: usize, width: usize, is_current: bool) -> Vec<Span<'static>> {
    let visible = line.text.chars().skip(first_col).take(width);

    match line.kind {
        LineKind::Separator => Vec::new(),
        LineKind::Header => {
            let mut style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
            if is_current {
                style = style.add_modifier(Modifier::REVERSED);
            }
            vec![Span::styled(visible.collect::<String>(), style)]
        }
        LineKind::Orf => {
            let scheme = DnaColorScheme;
            visible
                .map(|c| {
                    let mut style = Style::default().fg(Color::Black).bg(scheme.get_color(c));
                    if is_current {
                        style = style.add_modifier(Modifier::BOLD);
                    }
                    Span::styled(c.to_string(), style)
                })
                .collect()
        }
    }
}

/// Renders the status bar at the bottom.
fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let (mode_str, input_str) = match &state.mode {
        AppMode::Normal => ("NORMAL", None),
        AppMode::Command(cmd) => ("COMMAND", Some(format!(":{}", cmd))),
        AppMode::Search(p) => ("SEARCH", Some(format!("/{}", p))),
        AppMode::SearchBackward(p) => ("SEARCH", Some(format!("?{}", p))),
    };

    let record = state
        .results
        .record_of(state.cursor_row)
        .map(|r| format!("Record {}/{} | ", r, state.results.record_count()))
        .unwrap_or_default();
    let position_info = format!(
        "{}Line {}/{} ",
        record,
        state.cursor_row + 1,
        state.results.line_count()
    );

    let message = state.status_message.as_deref().unwrap_or("");
    let left_content = match input_str {
        Some(input) => format!(" {} | {} ", mode_str, input),
        None => format!(" {} | {} ", mode_str, message),
    };

    let left_len = left_content.chars().count();
    let status_line = Line::from(vec![
        Span::styled(
            left_content,
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
        Span::styled(
            " ".repeat((area.width as usize).saturating_sub(left_len + position_info.len())),
            Style::default().bg(Color::Cyan),
        ),
        Span::styled(
            position_info,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    frame.render_widget(Paragraph::new(status_line), area);
}

/// Help text, wrapped to fit `width` columns.
pub fn help_lines(width: usize) -> Vec<String> {
    let key_width = HELP_TEXT.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let desc_width = width.saturating_sub(key_width + 2).max(10);
    let mut out = Vec::new();
    for (keys, desc) in HELP_TEXT {
        for (i, part) in textwrap::wrap(desc, desc_width).iter().enumerate() {
            let key = if i == 0 { *keys } else { "" };
            out.push(format!("{:<key_width$}  {}", key, part, key_width = key_width));
        }
    }
    out
}

fn render_help(frame: &mut Frame, area: Rect) {
    let width = HELP_WIDTH.min(area.width.saturating_sub(4));
    let inner_width = width.saturating_sub(2) as usize;
    let lines: Vec<Line> = help_lines(inner_width).into_iter().map(Line::from).collect();
    let height = (lines.len() as u16 + 2).min(area.height);

    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Help (any key to close)");
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

/// Calculates the visible dimensions for the lines panel.
pub fn calculate_visible_dimensions(terminal_width: u16, terminal_height: u16) -> (usize, usize) {
    // Account for borders, gutter and status bar
    let visible_cols = terminal_width.saturating_sub(GUTTER_WIDTH + 2) as usize;
    let visible_rows = terminal_height.saturating_sub(STATUS_BAR_HEIGHT + 2) as usize;
    (visible_rows, visible_cols)
}
