//! UI state management structures
//!
//! Everything the terminal needs to draw a frame: the patch buffer, the
//! committed view options and the status line.

use crate::input::PromptKind;
use crate::render::surface::PatchBuffer;
use std::path::{Path, PathBuf};

/// View options as last committed by the user, shown in the status line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewOptions {
    pub filter: String,
    pub highlight: String,
    pub mask: String,
    pub error_tag: String,
}

impl ViewOptions {
    pub fn get(&self, kind: PromptKind) -> &str {
        match kind {
            PromptKind::Filter => &self.filter,
            PromptKind::Highlight => &self.highlight,
            PromptKind::Mask => &self.mask,
            PromptKind::ErrorTag => &self.error_tag,
        }
    }

    pub fn set(&mut self, kind: PromptKind, value: String) {
        match kind {
            PromptKind::Filter => self.filter = value,
            PromptKind::Highlight => self.highlight = value,
            PromptKind::Mask => self.mask = value,
            PromptKind::ErrorTag => self.error_tag = value,
        }
    }

    fn summary(&self) -> String {
        [
            (PromptKind::Filter, &self.filter),
            (PromptKind::Highlight, &self.highlight),
            (PromptKind::Mask, &self.mask),
            (PromptKind::ErrorTag, &self.error_tag),
        ]
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(kind, value)| format!("{}: {}", kind.label(), value))
        .collect::<Vec<_>>()
        .join(" | ")
    }
}

/// Viewport state for rendering
#[derive(Debug)]
pub struct ViewState {
    /// Rows as patched by the view worker's events
    pub buffer: PatchBuffer,

    /// Status line content
    pub status_line: StatusLine,

    /// Committed options
    pub options: ViewOptions,

    /// File path for display
    pub file_path: PathBuf,

    /// Viewport dimensions
    pub viewport_width: u16,
    pub viewport_height: u16,
}

impl ViewState {
    pub fn new(
        file_path: impl AsRef<Path>,
        viewport_width: u16,
        viewport_height: u16,
        append_to_top: bool,
    ) -> Self {
        Self {
            buffer: PatchBuffer::new(append_to_top),
            status_line: StatusLine::new(),
            options: ViewOptions::default(),
            file_path: file_path.as_ref().to_path_buf(),
            viewport_width,
            viewport_height,
        }
    }

    /// Get the filename for display
    pub fn filename(&self) -> String {
        self.file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("<unnamed>")
            .to_string()
    }

    /// Get lines per page (viewport height minus status line)
    pub fn lines_per_page(&self) -> u16 {
        self.viewport_height.saturating_sub(1)
    }

    /// Update terminal dimensions. Returns true if the number of content rows changed.
    pub fn update_terminal_size(&mut self, width: u16, height: u16) -> bool {
        let changed = self.viewport_height != height;
        self.viewport_width = width;
        self.viewport_height = height;
        changed
    }

    /// Format the complete status line for this view state
    pub fn format_status_line(&self) -> String {
        let position = if self.buffer.is_empty() {
            "Empty"
        } else if self.buffer.is_on_last_page() && self.buffer.offset() == 0 {
            "TAIL"
        } else {
            "HISTORY"
        };
        self.status_line
            .format_status_line(&self.filename(), position, &self.options.summary())
    }
}

/// Status line information
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub message: Option<String>,
    pub prompt: Option<(PromptKind, String)>,
}

impl StatusLine {
    /// Create a new status line
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a temporary message
    pub fn set_message(&mut self, message: String) {
        self.message = Some(message);
    }

    /// Clear any temporary message
    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn set_prompt(&mut self, kind: PromptKind) {
        self.prompt = Some((kind, String::new()));
    }

    pub fn update_prompt(&mut self, kind: PromptKind, buffer: String) {
        self.prompt = Some((kind, buffer));
    }

    pub fn clear_prompt(&mut self) {
        self.prompt = None;
    }

    pub fn format_status_line(&self, filename: &str, position: &str, options: &str) -> String {
        if let Some((kind, buffer)) = &self.prompt {
            return format!("{}: {}", kind.label(), buffer);
        }

        let mut parts = vec![filename.to_string(), position.to_string()];
        if !options.is_empty() {
            parts.push(options.to_string());
        }
        if let Some(ref message) = self.message {
            parts.push(message.clone());
        }
        parts.join(" | ")
    }
}
