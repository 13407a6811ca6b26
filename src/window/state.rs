//! The reducer that turns view commands into patch events.
//!
//! `State` owns the cache and the paginator, remembers which window the
//! consumer currently shows, and after every command diffs that window
//! against the one the paginator now wants. Events accumulate until the
//! consumer drains them with [`State::clear_events`].

use crate::error::Result;
use crate::render::protocol::{ViewCommand, ViewEvent};
use crate::window::cache::Cache;
use crate::window::page_range::{Comparison, PageRange};
use crate::window::paginator::Paginator;
use crate::window::row::DisplayedRow;
use log::{debug, trace};

fn same_ignoring_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

#[derive(Debug, Default)]
pub struct State {
    cache: Cache,
    paginator: Paginator,
    /// Window the consumer is showing, as of the last emitted events.
    current: PageRange,
    highlight: String,
    events: Vec<ViewEvent>,
}

impl State {
    pub fn new(capacity: usize) -> Self {
        Self {
            paginator: Paginator::new(capacity),
            ..Self::default()
        }
    }

    /// Apply one command, queueing whatever events it produces.
    pub fn handle(&mut self, command: ViewCommand) -> Result<()> {
        trace!("handling {:?}", command);
        match command {
            ViewCommand::AddRows(lines) => self.add_rows(lines),
            ViewCommand::Filter(term) => {
                if same_ignoring_case(self.cache.search_term(), &term) {
                    return Ok(());
                }
                self.cache.set_search_term(term);
                self.rebuild()
            }
            ViewCommand::Mask(mask) => {
                if same_ignoring_case(self.cache.mask(), &mask) {
                    return Ok(());
                }
                self.cache.set_mask(mask);
                self.rebuild()
            }
            ViewCommand::SetErrorTag(tag) => {
                if same_ignoring_case(self.cache.error_tag(), &tag) {
                    return Ok(());
                }
                self.cache.set_error_tag(tag);
                self.rebuild()
            }
            ViewCommand::Highlight(term) => self.set_highlight(term),
            ViewCommand::Next => {
                if !self.paginator.move_forward() {
                    return Ok(());
                }
                self.apply_window()
            }
            ViewCommand::Previous => {
                if !self.paginator.move_backward() {
                    return Ok(());
                }
                self.apply_window()
            }
            ViewCommand::GoToTop => self.rebuild(),
            ViewCommand::SetDisplayedRange(capacity) => {
                self.paginator.set_capacity(capacity);
                self.rebuild()
            }
        }
    }

    /// Events produced since the last [`State::clear_events`].
    pub fn events(&self) -> &[ViewEvent] {
        &self.events
    }

    /// Hand the pending events to the consumer and end the "just added" emphasis.
    ///
    /// Call once per apply cycle; otherwise rows from the last batch keep
    /// being tagged as new on later diffs.
    pub fn clear_events(&mut self) -> Vec<ViewEvent> {
        self.cache.clear_last_added();
        std::mem::take(&mut self.events)
    }

    pub fn current_page(&self) -> PageRange {
        self.current
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn highlight(&self) -> &str {
        &self.highlight
    }

    /// Rows of the displayed window as the consumer should be showing them, newest first.
    pub fn displayed_rows(&self) -> Vec<DisplayedRow> {
        self.materialize(self.current)
    }

    fn add_rows(&mut self, lines: Vec<String>) -> Result<()> {
        let count = lines.len();
        self.cache.push(lines);
        if self.cache.is_initialized() {
            self.paginator.push(self.cache.last_added_index().len());
        } else {
            self.paginator.reset(self.cache.filtered_len());
        }
        debug!(
            "added {} lines, {} matching, window {}",
            count,
            self.cache.last_added_index().len(),
            self.paginator.current()
        );
        self.apply_window()
    }

    fn set_highlight(&mut self, term: String) -> Result<()> {
        if same_ignoring_case(&self.highlight, &term) {
            return Ok(());
        }
        self.highlight = term;
        if !self.current.is_empty() {
            self.events.push(ViewEvent::AllReplaced {
                rows: self.materialize(self.current),
                is_on_last_page: self.paginator.is_on_last_page(),
            });
        }
        Ok(())
    }

    /// Clear the view and rebuild it over the newest matching lines.
    fn rebuild(&mut self) -> Result<()> {
        if !self.current.is_empty() {
            self.events.push(ViewEvent::AllDeleted);
            self.current = PageRange::EMPTY;
        }
        self.paginator.reset(self.cache.filtered_len());
        self.apply_window()
    }

    /// Diff the shown window against the paginator's and queue the patch.
    fn apply_window(&mut self) -> Result<()> {
        let next = self.paginator.current();
        let comparison = self.current.compare(&next)?;
        debug!("window {} -> {}: {:?}", self.current, next, comparison);
        self.current = next;
        let is_on_last_page = self.paginator.is_on_last_page();

        match comparison {
            Comparison::Unchanged => {}
            Comparison::GoneForward {
                deleted_from_bottom,
                added_from_top,
                ..
            } => {
                let rows = self.materialize(added_from_top);
                if !rows.is_empty() {
                    self.events.push(ViewEvent::AddedToTheTop {
                        rows,
                        deleted_from_bottom: deleted_from_bottom.size(),
                        is_on_last_page,
                    });
                }
            }
            Comparison::GoneBackward {
                deleted_from_top,
                added_from_bottom,
                ..
            } => {
                let rows = self.materialize(added_from_bottom);
                if !rows.is_empty() {
                    self.events.push(ViewEvent::AddedToTheBottom {
                        rows,
                        deleted_from_top: deleted_from_top.size(),
                        is_on_last_page,
                    });
                }
            }
        }
        Ok(())
    }

    fn materialize(&self, range: PageRange) -> Vec<DisplayedRow> {
        self.cache
            .rows(range)
            .iter()
            .rev()
            .map(|row| DisplayedRow::from_row(row, &self.highlight))
            .collect()
    }
}
