//! File following: reading appended lines and noticing when a file changes.
//!
//! The view core never touches the file system. This module supplies it with
//! batches of new lines ([`LineSupplier`]) and wakes the follower when the
//! watched file is modified ([`ChangeNotifier`]).

pub mod tailer;
pub mod validation;
pub mod watcher;

pub use tailer::{FileTailer, LineSupplier};
pub use validation::validate_file_path;
pub use watcher::{ChangeNotifier, Subscription, DEFAULT_DEBOUNCE_MS};
