//! Render coordination helpers.
//!
//! Mediates between input actions, the view worker and the view state: local
//! scrolling is served from the patch buffer, everything that changes the
//! window becomes a `ViewCommand`.

use crate::app::runtime::InputDebouncer;
use crate::error::Result;
use crate::input::{InputAction, PromptKind, ScrollDirection};
use crate::render::protocol::{ViewCommand, ViewUpdate};
use crate::render::ui::ViewState;
use crate::window::ViewHandle;
use log::debug;
use tokio::time::Instant;

/// The command that applies `value` to the option a prompt edits.
pub fn option_command(kind: PromptKind, value: String) -> ViewCommand {
    match kind {
        PromptKind::Filter => ViewCommand::Filter(value),
        PromptKind::Highlight => ViewCommand::Highlight(value),
        PromptKind::Mask => ViewCommand::Mask(value),
        PromptKind::ErrorTag => ViewCommand::SetErrorTag(value),
    }
}

/// Tracks render-related state that must persist across input actions and worker updates.
pub struct RenderLoopState {
    debouncer: InputDebouncer,
}

impl RenderLoopState {
    pub fn new(debouncer: InputDebouncer) -> Self {
        Self { debouncer }
    }

    /// When a debounced prompt edit is due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Handle one input action. Returns false when the user asked to quit.
    pub async fn process_action(
        &mut self,
        action: InputAction,
        view_state: &mut ViewState,
        view: &ViewHandle,
    ) -> Result<bool> {
        match action {
            InputAction::Quit => Ok(false),
            InputAction::Scroll { direction, lines } => {
                self.scroll(direction, lines, view_state, view).await?;
                Ok(true)
            }
            InputAction::PageUp => {
                let page = view_state.lines_per_page() as usize;
                self.scroll(ScrollDirection::Up, page, view_state, view).await?;
                Ok(true)
            }
            InputAction::PageDown => {
                let page = view_state.lines_per_page() as usize;
                self.scroll(ScrollDirection::Down, page, view_state, view)
                    .await?;
                Ok(true)
            }
            InputAction::NextPage => {
                view.send(ViewCommand::Next).await?;
                Ok(true)
            }
            InputAction::PreviousPage => {
                view.send(ViewCommand::Previous).await?;
                Ok(true)
            }
            InputAction::GoToTop => {
                view.send(ViewCommand::GoToTop).await?;
                Ok(true)
            }
            InputAction::StartPrompt(kind) => {
                view_state.status_line.clear_message();
                view_state.status_line.set_prompt(kind);
                Ok(true)
            }
            InputAction::UpdatePrompt { kind, buffer } => {
                view_state.status_line.update_prompt(kind, buffer.clone());
                self.debouncer.schedule(kind, buffer);
                Ok(true)
            }
            InputAction::CancelPrompt(kind) => {
                view_state.status_line.clear_prompt();
                self.debouncer.cancel();
                // A debounced edit may already have been applied.
                let committed = view_state.options.get(kind).to_string();
                view.send(option_command(kind, committed)).await?;
                Ok(true)
            }
            InputAction::CommitPrompt { kind, value } => {
                view_state.status_line.clear_prompt();
                self.debouncer.cancel();
                view_state.options.set(kind, value.clone());
                view.send(option_command(kind, value)).await?;
                Ok(true)
            }
            InputAction::Resize { width, height } => {
                if view_state.update_terminal_size(width, height) {
                    let rows = view_state.lines_per_page() as usize;
                    view.send(ViewCommand::SetDisplayedRange(rows)).await?;
                }
                Ok(true)
            }
            InputAction::NoAction | InputAction::InvalidInput => Ok(true),
        }
    }

    /// Send the debounced prompt edit if it is due.
    pub async fn flush_due(&mut self, now: Instant, view: &ViewHandle) -> Result<()> {
        if let Some((kind, value)) = self.debouncer.take_due(now) {
            debug!("applying {} edit {:?}", kind.label(), value);
            view.send(option_command(kind, value)).await?;
        }
        Ok(())
    }

    /// Apply a worker update to the view.
    pub fn handle_update(&mut self, update: ViewUpdate, view_state: &mut ViewState) {
        match update {
            ViewUpdate::Events { events, .. } => view_state.buffer.apply_all(events),
            ViewUpdate::Failed { error, .. } => view_state
                .status_line
                .set_message(format!("Operation failed: {}", error)),
        }
    }

    /// Scroll inside the patch buffer; past its edge, page the window instead.
    async fn scroll(
        &mut self,
        direction: ScrollDirection,
        lines: usize,
        view_state: &mut ViewState,
        view: &ViewHandle,
    ) -> Result<()> {
        // Down walks toward older rows when the newest row is drawn on top.
        let toward_older = (direction == ScrollDirection::Down) == view_state.buffer.append_to_top();
        let page = view_state.lines_per_page() as usize;

        if toward_older {
            if !view_state.buffer.scroll_older(lines, page) {
                view.send(ViewCommand::Previous).await?;
            }
        } else if !view_state.buffer.scroll_newer(lines) && !view_state.buffer.is_on_last_page() {
            view.send(ViewCommand::Next).await?;
        }
        Ok(())
    }
}
