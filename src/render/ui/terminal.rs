//! Terminal UI implementation using ratatui
//!
//! Draws whatever the patch buffer holds. Rows are grouped into runs of the
//! same kind so each run of error or new rows gets one gutter marker.

use crate::error::{Result, TaildiffError};
use crate::render::ui::{ColorTheme, UIRenderer, ViewState};
use crate::window::{aggregate, DisplayedRow, LogGroup};
use ratatui::crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Wrap a terminal I/O failure as a UI error naming what was attempted.
fn terminal_error(action: &'static str) -> impl FnOnce(io::Error) -> TaildiffError {
    move |err| TaildiffError::ui(format!("Cannot {action}: {err}"))
}

/// Terminal UI implementation with ratatui backend
pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
}

impl TerminalUI {
    /// Create a new terminal UI instance with the default theme
    pub fn new() -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme: ColorTheme::default(),
        })
    }

    /// Create terminal UI with custom theme
    pub fn with_theme(theme: ColorTheme) -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme,
        })
    }

    /// Build the styled lines for the visible rows, marking the first row of each run
    fn content_lines<'a>(rows: Vec<&'a DisplayedRow>, theme: &ColorTheme) -> Vec<Line<'a>> {
        let mut lines = Vec::with_capacity(rows.len());
        for group in aggregate(rows) {
            lines.extend(Self::group_lines(&group, theme));
        }
        lines
    }

    fn group_lines<'a>(group: &LogGroup<&'a DisplayedRow>, theme: &ColorTheme) -> Vec<Line<'a>> {
        let kind = group.kind();
        let (marker, marker_style) = if kind.is_error {
            ("!", theme.error_gutter)
        } else if kind.is_new_line {
            ("+", theme.new_gutter)
        } else {
            (" ", Style::default())
        };

        group
            .rows()
            .iter()
            .enumerate()
            .map(|(idx, &row)| {
                let gutter = if idx == 0 { marker } else { " " };
                let mut spans = Vec::with_capacity(row.blocks.len() + 1);
                spans.push(Span::styled(format!("{gutter} "), marker_style));
                spans.extend(
                    row.blocks
                        .iter()
                        .map(|block| Span::styled(block.text.as_str(), theme.block_style(block))),
                );
                Line::from(spans)
            })
            .collect()
    }

    fn render_content(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let rows = view_state.buffer.visible(area.height as usize);
        let paragraph = Paragraph::new(Self::content_lines(rows, theme));
        frame.render_widget(paragraph, area);
    }

    fn render_status(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let status_style = Style::default().bg(theme.status_bg).fg(theme.status_fg);
        let status = Paragraph::new(view_state.format_status_line()).style(status_style);
        frame.render_widget(status, area);
    }
}

impl UIRenderer for TerminalUI {
    fn render(&mut self, view_state: &ViewState) -> Result<()> {
        if let Some(ref mut terminal) = self.terminal {
            // Extract theme before closure to avoid borrowing issues
            let theme = &self.theme;

            terminal.draw(move |frame| {
                let size = frame.size();

                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(1)])
                    .split(size);

                Self::render_content(frame, chunks[0], view_state, theme);
                Self::render_status(frame, chunks[1], view_state, theme);
            })
            .map_err(terminal_error("draw frame"))?;
        }
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode().map_err(terminal_error("enable raw mode"))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(terminal_error("enter alternate screen"))?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).map_err(terminal_error("create terminal"))?;
        self.terminal = Some(terminal);

        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.terminal.is_some() {
            disable_raw_mode().map_err(terminal_error("disable raw mode"))?;
            execute!(io::stdout(), LeaveAlternateScreen)
                .map_err(terminal_error("leave alternate screen"))?;
            self.terminal = None;
        }
        Ok(())
    }

    fn get_terminal_size(&self) -> Result<(u16, u16)> {
        let (cols, rows) =
            ratatui::crossterm::terminal::size().map_err(terminal_error("query terminal size"))?;
        Ok((cols, rows))
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::Row;
    use ratatui::style::Color;

    fn displayed(text: &str, is_error: bool, is_new_line: bool) -> DisplayedRow {
        DisplayedRow::from_row(
            &Row {
                text: text.to_string(),
                is_new_line,
                is_error,
            },
            "",
        )
    }

    #[test]
    fn test_terminal_ui_creation() {
        let ui = TerminalUI::new().unwrap();
        assert!(ui.terminal.is_none());
        assert_eq!(ui.theme.status_bg, Color::Blue);

        let ui = TerminalUI::with_theme(ColorTheme::monochrome()).unwrap();
        assert_eq!(ui.theme.status_bg, Color::Black);
    }

    #[test]
    fn gutter_marks_first_row_of_each_run() {
        let rows = vec![
            displayed("boom", true, false),
            displayed("boom again", true, false),
            displayed("fresh", false, true),
            displayed("old", false, false),
        ];
        let theme = ColorTheme::default();
        let lines = TerminalUI::content_lines(rows.iter().collect(), &theme);

        let gutters: Vec<String> = lines
            .iter()
            .map(|line| line.spans[0].content.to_string())
            .collect();
        assert_eq!(gutters, vec!["! ", "  ", "+ ", "  "]);
        assert_eq!(lines[1].spans[1].content, "boom again");
    }

    #[test]
    fn terminal_failures_surface_as_ui_errors() {
        let err = terminal_error("enable raw mode")(io::Error::other("not a tty"));
        assert!(matches!(err, TaildiffError::UIError { .. }));
        assert_eq!(
            err.to_string(),
            "UI operation failed: Cannot enable raw mode: not a tty"
        );
    }
}
