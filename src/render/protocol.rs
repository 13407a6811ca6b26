//! Protocol definitions shared between the view worker and its consumers.

use crate::error::TaildiffError;
use crate::window::DisplayedRow;

/// Identifier attached to queued commands so published updates can be correlated.
pub type RequestId = u64;

/// Everything a log view can be asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    /// Lines newly read from the source, oldest first.
    AddRows(Vec<String>),
    Filter(String),
    Mask(String),
    SetErrorTag(String),
    Highlight(String),
    /// Page toward newer lines.
    Next,
    /// Page toward older lines.
    Previous,
    /// Rebuild the view over the newest lines.
    GoToTop,
    /// Number of rows the viewport can show.
    SetDisplayedRange(usize),
}

/// A patch for the rendering surface.
///
/// Row lists are newest first: the first row belongs closest to the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// Rows to put above the current top; drop `deleted_from_bottom` rows at the bottom.
    AddedToTheTop {
        rows: Vec<DisplayedRow>,
        deleted_from_bottom: usize,
        is_on_last_page: bool,
    },
    /// Rows to put below the current bottom; drop `deleted_from_top` rows at the top.
    AddedToTheBottom {
        rows: Vec<DisplayedRow>,
        deleted_from_top: usize,
        is_on_last_page: bool,
    },
    /// Clear the view.
    AllDeleted,
    /// Replace every visible row.
    AllReplaced {
        rows: Vec<DisplayedRow>,
        is_on_last_page: bool,
    },
}

/// Messages accepted by the view worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerCommand {
    Handle {
        request_id: RequestId,
        command: ViewCommand,
    },
    Shutdown,
}

/// Messages published by the view worker, one per handled command that produced output.
#[derive(Debug)]
pub enum ViewUpdate {
    Events {
        request_id: RequestId,
        events: Vec<ViewEvent>,
    },
    Failed {
        request_id: RequestId,
        error: TaildiffError,
    },
}
