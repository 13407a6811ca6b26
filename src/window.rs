//! The windowed diff engine.
//!
//! Lines go into a [`Cache`], a [`Paginator`] decides which slice of the
//! filtered lines should be on screen, and [`State`] diffs consecutive
//! windows into the smallest patch the rendering surface can apply.

pub mod cache;
pub mod group;
pub mod highlight;
pub mod page_range;
pub mod paginator;
pub mod row;
pub mod state;
pub mod worker;

pub use cache::Cache;
pub use group::{aggregate, LogGroup, RowKind};
pub use highlight::{all_index_of, cut, Span};
pub use page_range::{Comparison, PageRange};
pub use paginator::Paginator;
pub use row::{DisplayedRow, Row, TextBlock};
pub use state::State;
pub use worker::{view_worker_loop, ViewHandle};
