//! The consumer side of the event stream.
//!
//! `PatchBuffer` applies each [`ViewEvent`] literally. It never compares
//! old and new content; if the events are right, the buffer is right.

use crate::render::protocol::ViewEvent;
use crate::window::DisplayedRow;
use std::collections::VecDeque;

/// Rows currently shown, newest first, plus a scroll offset from the newest row.
#[derive(Debug, Default)]
pub struct PatchBuffer {
    rows: VecDeque<DisplayedRow>,
    /// Rows hidden above the viewport, counted from the newest row.
    offset: usize,
    /// Draw the newest row at the top (true) or at the bottom.
    append_to_top: bool,
    is_on_last_page: bool,
}

impl PatchBuffer {
    pub fn new(append_to_top: bool) -> Self {
        Self {
            append_to_top,
            is_on_last_page: true,
            ..Self::default()
        }
    }

    pub fn apply(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::AddedToTheTop {
                rows,
                deleted_from_bottom,
                is_on_last_page,
            } => {
                let keep = self.rows.len().saturating_sub(deleted_from_bottom);
                self.rows.truncate(keep);
                if self.offset > 0 {
                    self.offset += rows.len();
                }
                for row in rows.into_iter().rev() {
                    self.rows.push_front(row);
                }
                self.is_on_last_page = is_on_last_page;
            }
            ViewEvent::AddedToTheBottom {
                rows,
                deleted_from_top,
                is_on_last_page,
            } => {
                let dropped = deleted_from_top.min(self.rows.len());
                self.rows.drain(..dropped);
                self.offset = self.offset.saturating_sub(dropped);
                self.rows.extend(rows);
                self.is_on_last_page = is_on_last_page;
            }
            ViewEvent::AllDeleted => {
                self.rows.clear();
                self.offset = 0;
            }
            ViewEvent::AllReplaced {
                rows,
                is_on_last_page,
            } => {
                self.rows = rows.into();
                self.is_on_last_page = is_on_last_page;
            }
        }
        self.clamp_offset();
    }

    pub fn apply_all(&mut self, events: impl IntoIterator<Item = ViewEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    fn clamp_offset(&mut self) {
        self.offset = self.offset.min(self.rows.len().saturating_sub(1));
    }

    /// Rows newest first, regardless of drawing direction.
    pub fn rows(&self) -> impl Iterator<Item = &DisplayedRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_on_last_page(&self) -> bool {
        self.is_on_last_page
    }

    pub fn append_to_top(&self) -> bool {
        self.append_to_top
    }

    /// Scroll toward older rows. Returns false when the buffer has no more.
    pub fn scroll_older(&mut self, lines: usize, page: usize) -> bool {
        let max_offset = self.rows.len().saturating_sub(page.max(1));
        if self.offset >= max_offset {
            return false;
        }
        self.offset = (self.offset + lines).min(max_offset);
        true
    }

    /// Scroll toward newer rows. Returns false when already showing the newest.
    pub fn scroll_newer(&mut self, lines: usize) -> bool {
        if self.offset == 0 {
            return false;
        }
        self.offset = self.offset.saturating_sub(lines);
        true
    }

    /// The rows a viewport of `height` lines shows, in top-to-bottom drawing order.
    pub fn visible(&self, height: usize) -> Vec<&DisplayedRow> {
        let mut visible: Vec<&DisplayedRow> =
            self.rows.iter().skip(self.offset).take(height).collect();
        if !self.append_to_top {
            visible.reverse();
        }
        visible
    }
}
