//! Background pieces the application loop drives: prompt-edit debouncing and
//! the file follower task.

use crate::error::TaildiffError;
use crate::file_handler::{LineSupplier, Subscription};
use crate::input::PromptKind;
use crate::render::ViewCommand;
use crate::window::ViewHandle;
use log::{debug, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Holds back prompt edits until the user pauses typing.
///
/// Every edit replaces the pending value and restarts the delay; only the
/// latest value is released.
#[derive(Debug)]
pub struct InputDebouncer {
    delay: Duration,
    pending: Option<(PromptKind, String)>,
    deadline: Option<Instant>,
}

impl InputDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            deadline: None,
        }
    }

    pub fn schedule(&mut self, kind: PromptKind, value: String) {
        self.pending = Some((kind, value));
        self.deadline = Some(Instant::now() + self.delay);
    }

    pub fn cancel(&mut self) {
        self.pending = None;
        self.deadline = None;
    }

    /// When the pending edit becomes due, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Release the pending edit if its deadline has passed at `now`.
    pub fn take_due(&mut self, now: Instant) -> Option<(PromptKind, String)> {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }
}

/// Spawn the task that feeds appended lines into the view worker.
///
/// It reads once immediately, then again whenever the change notifier fires or
/// `poll_interval` elapses. The first successful read is always forwarded, even
/// when it is empty, so the view counts it as the initial load. Failures are
/// reported on `errors` and the next wake-up tries again from the same offset.
pub fn spawn_follower<S>(
    mut supplier: S,
    mut subscription: Option<Subscription>,
    view: ViewHandle,
    poll_interval: Duration,
    cancel: Arc<AtomicBool>,
    errors: UnboundedSender<TaildiffError>,
) -> JoinHandle<()>
where
    S: LineSupplier + 'static,
{
    tokio::spawn(async move {
        let mut loaded = false;
        loop {
            if cancel.load(Ordering::Relaxed) {
                break;
            }

            match supplier.read_new_lines(&cancel).await {
                Ok(lines) if lines.is_empty() && loaded => {}
                Ok(lines) => {
                    if view.send(ViewCommand::AddRows(lines)).await.is_err() {
                        break;
                    }
                    loaded = true;
                }
                Err(err) => {
                    warn!("Reading {} failed: {}", supplier.path().display(), err);
                    if errors.send(err).is_err() {
                        break;
                    }
                }
            }

            let notified = match subscription.as_mut() {
                Some(sub) => {
                    tokio::select! {
                        changed = sub.changed() => changed.is_ok(),
                        _ = tokio::time::sleep(poll_interval) => true,
                    }
                }
                None => {
                    tokio::time::sleep(poll_interval).await;
                    true
                }
            };
            if !notified {
                warn!("Change notifier closed, falling back to polling");
                subscription = None;
            }
        }
        debug!("follower for {} stopped", supplier.path().display());
    })
}
