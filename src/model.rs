//! Data model for the results viewer.
//!
//! This module contains all data structures for representing:
//! - The line sequence produced by a walk
//! - Viewport state
//! - Application state (modes, search, pending commands)

use std::ops::Range;

use crate::scan::walker::LineKind;
use crate::sink::{replay, WriterSink};

/// One output line with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultLine {
    pub kind: LineKind,
    pub text: String,
}

impl ResultLine {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            kind: LineKind::of(&text),
            text,
        }
    }

    /// Number of displayed columns.
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }
}

/// The full result of a walk, as shown by the viewer.
#[derive(Debug, Clone)]
pub struct ResultLines {
    pub lines: Vec<ResultLine>,
    /// Row index of every header line
    headers: Vec<usize>,
    orf_count: usize,
    max_width: usize,
}

impl ResultLines {
    pub fn new(lines: Vec<String>) -> Self {
        let lines: Vec<ResultLine> = lines.into_iter().map(ResultLine::new).collect();
        let headers = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.kind == LineKind::Header)
            .map(|(row, _)| row)
            .collect();
        let orf_count = lines.iter().filter(|l| l.kind == LineKind::Orf).count();
        let max_width = lines.iter().map(ResultLine::width).max().unwrap_or(0);
        Self {
            lines,
            headers,
            orf_count,
            max_width,
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn record_count(&self) -> usize {
        self.headers.len()
    }

    pub fn orf_count(&self) -> usize {
        self.orf_count
    }

    /// Width of the widest line.
    pub fn max_width(&self) -> usize {
        self.max_width
    }

    pub fn get(&self, row: usize) -> Option<&ResultLine> {
        self.lines.get(row)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Raw text of every line, in emission order.
    pub fn texts(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.text.clone()).collect()
    }

    /// First header row strictly after `row`.
    pub fn next_header(&self, row: usize) -> Option<usize> {
        self.headers.iter().copied().find(|&h| h > row)
    }

    /// Last header row strictly before `row`.
    pub fn previous_header(&self, row: usize) -> Option<usize> {
        self.headers.iter().copied().rev().find(|&h| h < row)
    }

    /// Index of the record a row belongs to (1-based), if any.
    pub fn record_of(&self, row: usize) -> Option<usize> {
        match self.headers.binary_search(&row) {
            Ok(idx) => Some(idx + 1),
            Err(0) => None,
            Err(idx) => Some(idx),
        }
    }
}

/// The viewport defines what portion of the lines is currently visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Index of the first visible line
    pub first_row: usize,
    /// Index of the first visible column
    pub first_col: usize,
    /// Number of visible rows
    pub visible_rows: usize,
    /// Number of visible columns
    pub visible_cols: usize,
}

impl Viewport {
    pub fn new(visible_rows: usize, visible_cols: usize) -> Self {
        Self {
            first_row: 0,
            first_col: 0,
            visible_rows,
            visible_cols,
        }
    }

    pub fn resize(&mut self, visible_rows: usize, visible_cols: usize) {
        self.visible_rows = visible_rows;
        self.visible_cols = visible_cols;
    }

    /// Returns the range of visible rows.
    pub fn row_range(&self) -> Range<usize> {
        self.first_row..self.first_row + self.visible_rows
    }

    /// Returns the range of visible columns.
    pub fn col_range(&self) -> Range<usize> {
        self.first_col..self.first_col + self.visible_cols
    }
}

/// Application mode for handling different input states.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Command input mode (after pressing ':')
    Command(String),
    /// Forward search input (after pressing '/')
    Search(String),
    /// Backward search input (after pressing '?')
    SearchBackward(String),
}

/// Last executed search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    pub pattern: String,
    pub backward: bool,
}

/// The complete application state.
#[derive(Debug)]
pub struct AppState {
    /// The lines being browsed
    pub results: ResultLines,
    /// Name of the scanned source, shown in the title
    pub source_name: String,
    /// Current viewport
    pub viewport: Viewport,
    /// Current line
    pub cursor_row: usize,
    /// Current application mode
    pub mode: AppMode,
    /// Whether the application should quit
    pub should_quit: bool,
    /// Status message to display
    pub status_message: Option<String>,
    /// Whether the help overlay is shown
    pub show_help: bool,
    /// Whether a 'g' was pressed and waits for its second key
    pub pending_g: bool,
    /// Last search, reused by n/N
    pub last_search: Option<SearchState>,
}

impl AppState {
    /// Creates a new application state over the given lines.
    pub fn new(results: ResultLines, source_name: impl Into<String>) -> Self {
        Self {
            results,
            source_name: source_name.into(),
            viewport: Viewport::new(0, 0),
            cursor_row: 0,
            mode: AppMode::Normal,
            should_quit: false,
            status_message: None,
            show_help: false,
            pending_g: false,
            last_search: None,
        }
    }

    /// Updates the viewport size based on terminal dimensions.
    pub fn update_viewport_size(&mut self, rows: usize, cols: usize) {
        self.viewport.resize(rows, cols);
        self.ensure_cursor_visible();
    }

    pub fn move_up(&mut self) {
        if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.ensure_cursor_visible();
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor_row + 1 < self.results.line_count() {
            self.cursor_row += 1;
            self.ensure_cursor_visible();
        }
    }

    /// Scrolls one column left.
    pub fn scroll_left(&mut self) {
        self.viewport.first_col = self.viewport.first_col.saturating_sub(1);
    }

    /// Scrolls one column right, stopping once the widest line is fully shown.
    pub fn scroll_right(&mut self) {
        let max_first = self
            .results
            .max_width()
            .saturating_sub(self.viewport.visible_cols);
        if self.viewport.first_col < max_first {
            self.viewport.first_col += 1;
        }
    }

    pub fn goto_top(&mut self) {
        self.goto_row(0);
    }

    pub fn goto_bottom(&mut self) {
        self.goto_row(self.results.line_count().saturating_sub(1));
    }

    pub fn half_page_up(&mut self) {
        let step = (self.viewport.visible_rows / 2).max(1);
        self.goto_row(self.cursor_row.saturating_sub(step));
    }

    pub fn half_page_down(&mut self) {
        let step = (self.viewport.visible_rows / 2).max(1);
        self.goto_row(self.cursor_row + step);
    }

    pub fn page_up(&mut self) {
        let step = self.viewport.visible_rows.max(1);
        self.goto_row(self.cursor_row.saturating_sub(step));
    }

    pub fn page_down(&mut self) {
        let step = self.viewport.visible_rows.max(1);
        self.goto_row(self.cursor_row + step);
    }

    /// Jumps to the next record header.
    pub fn next_record(&mut self) {
        match self.results.next_header(self.cursor_row) {
            Some(row) => self.goto_row(row),
            None => self.status_message = Some("Already at the last record".to_string()),
        }
    }

    /// Jumps to the previous record header.
    pub fn previous_record(&mut self) {
        match self.results.previous_header(self.cursor_row) {
            Some(row) => self.goto_row(row),
            None => self.status_message = Some("Already at the first record".to_string()),
        }
    }

    /// Moves the cursor to `row`, clamped to the last line.
    pub fn goto_row(&mut self, row: usize) {
        let max_row = self.results.line_count().saturating_sub(1);
        self.cursor_row = row.min(max_row);
        self.ensure_cursor_visible();
    }

    /// Ensures the cursor is visible in the viewport.
    fn ensure_cursor_visible(&mut self) {
        if self.cursor_row < self.viewport.first_row {
            self.viewport.first_row = self.cursor_row;
        } else if self.viewport.visible_rows > 0
            && self.cursor_row >= self.viewport.first_row + self.viewport.visible_rows
        {
            self.viewport.first_row = self.cursor_row + 1 - self.viewport.visible_rows;
        }
        self.clamp_viewport();
    }

    /// Clamps the viewport to valid bounds.
    fn clamp_viewport(&mut self) {
        let line_count = self.results.line_count();
        if self.viewport.first_row + self.viewport.visible_rows > line_count {
            self.viewport.first_row = line_count.saturating_sub(self.viewport.visible_rows);
        }
        let max_first_col = self
            .results
            .max_width()
            .saturating_sub(self.viewport.visible_cols);
        self.viewport.first_col = self.viewport.first_col.min(max_first_col);
        self.cursor_row = self.cursor_row.min(line_count.saturating_sub(1));
    }

    pub fn set_pending_g(&mut self) {
        self.pending_g = true;
    }

    pub fn dismiss_help(&mut self) {
        self.show_help = false;
    }

    /// Enters command mode.
    pub fn enter_command_mode(&mut self) {
        self.mode = AppMode::Command(String::new());
    }

    /// Handles a character input in command mode.
    pub fn command_input(&mut self, c: char) {
        if let AppMode::Command(ref mut cmd) = self.mode {
            cmd.push(c);
        }
    }

    /// Handles backspace in command mode.
    pub fn command_backspace(&mut self) {
        if let AppMode::Command(ref mut cmd) = self.mode {
            if cmd.pop().is_none() {
                self.mode = AppMode::Normal;
            }
        }
    }

    /// Executes the current command.
    pub fn execute_command(&mut self) {
        if let AppMode::Command(cmd) = std::mem::take(&mut self.mode) {
            let cmd = cmd.trim();
            match cmd {
                "q" | "quit" => self.should_quit = true,
                "h" | "help" => self.show_help = true,
                "w" => self.status_message = Some("Usage: :w <file>".to_string()),
                _ => {
                    if let Some(path) = cmd.strip_prefix("w ") {
                        self.write_results(path.trim());
                    } else if let Ok(line) = cmd.parse::<usize>() {
                        if line > 0 && line <= self.results.line_count() {
                            self.goto_row(line - 1); // 1-indexed for user
                        } else {
                            self.status_message = Some(format!("Invalid line: {}", line));
                        }
                    } else {
                        self.status_message = Some(format!("Unknown command: {}", cmd));
                    }
                }
            }
        }
        self.mode = AppMode::Normal;
    }

    /// Saves the lines to `path` through a file sink.
    pub fn write_results(&mut self, path: &str) {
        let result = WriterSink::create(path)
            .and_then(|mut sink| replay(&self.results.texts(), &mut sink));
        self.status_message = Some(match result {
            Ok(()) => format!("Wrote {} lines to {}", self.results.line_count(), path),
            Err(e) => format!("Cannot write {}: {}", path, e),
        });
    }

    /// Cancels command mode and returns to normal mode.
    pub fn cancel_command(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// Enters search mode.
    pub fn enter_search_mode(&mut self, backward: bool) {
        self.mode = if backward {
            AppMode::SearchBackward(String::new())
        } else {
            AppMode::Search(String::new())
        };
    }

    pub fn search_input(&mut self, c: char) {
        if let AppMode::Search(ref mut p) | AppMode::SearchBackward(ref mut p) = self.mode {
            p.push(c);
        }
    }

    pub fn search_backspace(&mut self) {
        if let AppMode::Search(ref mut p) | AppMode::SearchBackward(ref mut p) = self.mode {
            if p.pop().is_none() {
                self.mode = AppMode::Normal;
            }
        }
    }

    pub fn cancel_search(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// Runs the typed search from the cursor.
    pub fn execute_search(&mut self) {
        let search = match std::mem::take(&mut self.mode) {
            AppMode::Search(pattern) => SearchState {
                pattern,
                backward: false,
            },
            AppMode::SearchBackward(pattern) => SearchState {
                pattern,
                backward: true,
            },
            other => {
                self.mode = other;
                return;
            }
        };

        if search.pattern.is_empty() {
            return;
        }
        let backward = search.backward;
        self.last_search = Some(search);
        self.search(backward);
    }

    /// Repeats the last search in its own direction (n).
    pub fn find_next(&mut self) {
        match &self.last_search {
            Some(search) => {
                let backward = search.backward;
                self.search(backward);
            }
            None => self.status_message = Some("No previous search".to_string()),
        }
    }

    /// Repeats the last search in the opposite direction (N).
    pub fn find_previous(&mut self) {
        match &self.last_search {
            Some(search) => {
                let backward = !search.backward;
                self.search(backward);
            }
            None => self.status_message = Some("No previous search".to_string()),
        }
    }

    /// Case-insensitive search for the last pattern, wrapping around.
    fn search(&mut self, backward: bool) {
        let Some(search) = &self.last_search else {
            return;
        };
        let needle = search.pattern.to_uppercase();
        let count = self.results.line_count();
        if count == 0 {
            return;
        }

        let matches = |row: usize| {
            self.results
                .get(row)
                .is_some_and(|line| line.text.to_uppercase().contains(&needle))
        };

        let found = (1..=count).find_map(|step| {
            let row = if backward {
                (self.cursor_row + count - step % count) % count
            } else {
                (self.cursor_row + step) % count
            };
            matches(row).then_some((row, step))
        });

        match found {
            Some((row, _)) => {
                let wrapped = if backward {
                    row >= self.cursor_row
                } else {
                    row <= self.cursor_row
                };
                self.status_message = if wrapped {
                    Some(if backward {
                        "search hit TOP, continuing at BOTTOM".to_string()
                    } else {
                        "search hit BOTTOM, continuing at TOP".to_string()
                    })
                } else {
                    None
                };
                self.goto_row(row);
            }
            None => {
                self.status_message = Some(format!("Pattern not found: {}", search.pattern));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AppState {
        let lines = [
            ">SEQ2004", "ATGAAATAA", "ATGCCCTGA", "", ">SEQ2005", "", ">SEQ2006", "ATGTGA", "",
        ];
        let results = ResultLines::new(lines.iter().map(|s| s.to_string()).collect());
        AppState::new(results, "test")
    }

    #[test]
    fn test_result_lines_counts() {
        let state = sample();
        assert_eq!(state.results.line_count(), 9);
        assert_eq!(state.results.record_count(), 3);
        assert_eq!(state.results.orf_count(), 3);
        assert_eq!(state.results.max_width(), 9);
    }

    #[test]
    fn test_record_of() {
        let state = sample();
        assert_eq!(state.results.record_of(0), Some(1));
        assert_eq!(state.results.record_of(2), Some(1));
        assert_eq!(state.results.record_of(4), Some(2));
        assert_eq!(state.results.record_of(8), Some(3));

        let results = ResultLines::new(vec!["ATG".into(), ">S1".into()]);
        assert_eq!(results.record_of(0), None);
    }

    #[test]
    fn test_viewport_range() {
        let vp = Viewport::new(10, 20);
        assert_eq!(vp.row_range(), 0..10);
        assert_eq!(vp.col_range(), 0..20);
    }

    #[test]
    fn test_cursor_movement() {
        let mut state = sample();
        state.update_viewport_size(3, 4);

        state.move_down();
        state.move_down();
        state.move_down();
        assert_eq!(state.cursor_row, 3);
        assert_eq!(state.viewport.first_row, 1);

        state.move_up();
        assert_eq!(state.cursor_row, 2);

        state.goto_top();
        state.move_up();
        assert_eq!(state.cursor_row, 0);
        assert_eq!(state.viewport.first_row, 0);

        state.goto_bottom();
        assert_eq!(state.cursor_row, 8);
        assert_eq!(state.viewport.first_row, 6);
        state.move_down();
        assert_eq!(state.cursor_row, 8);
    }

    #[test]
    fn test_horizontal_scroll() {
        let mut state = sample();
        state.update_viewport_size(3, 4);
        for _ in 0..20 {
            state.scroll_right();
        }
        assert_eq!(state.viewport.first_col, 5);
        state.scroll_left();
        assert_eq!(state.viewport.first_col, 4);
    }

    #[test]
    fn test_record_navigation() {
        let mut state = sample();
        state.update_viewport_size(5, 20);
        state.next_record();
        assert_eq!(state.cursor_row, 4);
        state.next_record();
        assert_eq!(state.cursor_row, 6);
        state.next_record();
        assert_eq!(state.cursor_row, 6);
        assert!(state.status_message.is_some());
        state.previous_record();
        assert_eq!(state.cursor_row, 4);
    }

    #[test]
    fn test_goto_line_command() {
        let mut state = sample();
        state.update_viewport_size(5, 20);
        state.enter_command_mode();
        for c in "8".chars() {
            state.command_input(c);
        }
        state.execute_command();
        assert_eq!(state.cursor_row, 7);
        assert_eq!(state.mode, AppMode::Normal);

        state.enter_command_mode();
        state.command_input('4');
        state.command_input('2');
        state.execute_command();
        assert_eq!(state.status_message.as_deref(), Some("Invalid line: 42"));
    }

    #[test]
    fn test_quit_and_help_commands() {
        let mut state = sample();
        state.enter_command_mode();
        state.command_input('h');
        state.execute_command();
        assert!(state.show_help);
        state.dismiss_help();
        assert!(!state.show_help);

        state.enter_command_mode();
        state.command_input('q');
        state.execute_command();
        assert!(state.should_quit);
    }

    #[test]
    fn test_command_backspace_leaves_mode() {
        let mut state = sample();
        state.enter_command_mode();
        state.command_input('w');
        state.command_backspace();
        assert_eq!(state.mode, AppMode::Command(String::new()));
        state.command_backspace();
        assert_eq!(state.mode, AppMode::Normal);
    }

    #[test]
    fn test_write_command() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.txt");
        let mut state = sample();
        state.enter_command_mode();
        for c in format!("w {}", path.display()).chars() {
            state.command_input(c);
        }
        state.execute_command();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            ">SEQ2004\nATGAAATAA\nATGCCCTGA\n\n>SEQ2005\n\n>SEQ2006\nATGTGA\n\n"
        );
        assert!(state.status_message.unwrap().starts_with("Wrote 9 lines"));
    }

    #[test]
    fn test_search_forward_and_wrap() {
        let mut state = sample();
        state.update_viewport_size(5, 20);
        state.enter_search_mode(false);
        for c in "tga".chars() {
            state.search_input(c);
        }
        state.execute_search();
        assert_eq!(state.cursor_row, 1);
        assert_eq!(state.status_message, None);

        state.find_next();
        assert_eq!(state.cursor_row, 2);
        state.find_next();
        assert_eq!(state.cursor_row, 7);

        state.find_next();
        assert_eq!(state.cursor_row, 1);
        assert_eq!(
            state.status_message.as_deref(),
            Some("search hit BOTTOM, continuing at TOP")
        );

        state.find_previous();
        assert_eq!(state.cursor_row, 7);
        assert_eq!(
            state.status_message.as_deref(),
            Some("search hit TOP, continuing at BOTTOM")
        );
    }

    #[test]
    fn test_search_backward() {
        let mut state = sample();
        state.update_viewport_size(5, 20);
        state.goto_bottom();
        state.enter_search_mode(true);
        state.search_input('>');
        state.execute_search();
        assert_eq!(state.cursor_row, 6);
        state.find_next();
        assert_eq!(state.cursor_row, 4);
    }

    #[test]
    fn test_search_not_found() {
        let mut state = sample();
        state.enter_search_mode(false);
        state.search_input('Z');
        state.execute_search();
        assert_eq!(state.cursor_row, 0);
        assert_eq!(state.status_message.as_deref(), Some("Pattern not found: Z"));
    }
}
