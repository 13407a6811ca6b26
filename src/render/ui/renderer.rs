//! UI renderer trait
//!
//! This module defines the `UIRenderer` trait for rendering terminal interfaces and managing
//! lifecycle hooks such as initialization and cleanup.

use crate::error::Result;
use crate::render::ui::state::ViewState;

/// Core trait for UI rendering
pub trait UIRenderer {
    /// Draw the patch buffer and the status line
    fn render(&mut self, view_state: &ViewState) -> Result<()>;

    /// Enter raw mode and the alternate screen
    fn initialize(&mut self) -> Result<()>;

    /// Restore the terminal
    fn cleanup(&mut self) -> Result<()>;

    /// Get current terminal dimensions
    fn get_terminal_size(&self) -> Result<(u16, u16)>; // (width, height)
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::render::ui::state::ViewState;

    /// Mock UI renderer for testing
    ///
    /// Records what each render call would have drawn.
    pub struct MockUIRenderer {
        pub render_count: usize,
        pub terminal_size: (u16, u16),
        pub is_initialized: bool,
        pub last_frame: Vec<String>,
    }

    impl Default for MockUIRenderer {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockUIRenderer {
        /// Create a new mock renderer with default settings
        pub fn new() -> Self {
            Self {
                render_count: 0,
                terminal_size: (80, 24),
                is_initialized: false,
                last_frame: Vec::new(),
            }
        }

        /// Set terminal size for testing
        pub fn set_terminal_size(&mut self, width: u16, height: u16) {
            self.terminal_size = (width, height);
        }
    }

    impl UIRenderer for MockUIRenderer {
        fn render(&mut self, view_state: &ViewState) -> Result<()> {
            self.render_count += 1;
            self.last_frame = view_state
                .buffer
                .visible(view_state.lines_per_page() as usize)
                .into_iter()
                .map(|row| row.text())
                .collect();
            self.last_frame.push(view_state.format_status_line());
            Ok(())
        }

        fn initialize(&mut self) -> Result<()> {
            self.is_initialized = true;
            Ok(())
        }

        fn cleanup(&mut self) -> Result<()> {
            self.is_initialized = false;
            Ok(())
        }

        fn get_terminal_size(&self) -> Result<(u16, u16)> {
            Ok(self.terminal_size)
        }
    }

    #[test]
    fn test_mock_renderer_basic() {
        use crate::render::protocol::ViewEvent;
        use crate::window::{DisplayedRow, Row};

        let mut renderer = MockUIRenderer::new();
        renderer.set_terminal_size(80, 3);
        let (width, height) = renderer.get_terminal_size().unwrap();
        let mut view_state = ViewState::new("/test/app.log", width, height, true);
        view_state.buffer.apply(ViewEvent::AddedToTheBottom {
            rows: ["c", "b", "a"]
                .iter()
                .map(|text| DisplayedRow::from_row(&Row::new(*text), ""))
                .collect(),
            deleted_from_top: 0,
            is_on_last_page: true,
        });

        renderer.initialize().unwrap();
        assert!(renderer.is_initialized);

        renderer.render(&view_state).unwrap();
        assert_eq!(renderer.render_count, 1);
        assert_eq!(renderer.last_frame, vec!["c", "b", "app.log | TAIL"]);

        renderer.cleanup().unwrap();
        assert!(!renderer.is_initialized);
    }
}
