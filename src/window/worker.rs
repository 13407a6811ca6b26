use crate::error::{Result, TaildiffError};
use crate::render::protocol::{RequestId, ViewCommand, ViewUpdate, WorkerCommand};
use crate::window::state::State;
use log::{debug, error};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::task::JoinHandle;

/// Run the view worker: handle commands one at a time, in arrival order, and
/// publish each command's events before looking at the next one.
pub async fn view_worker_loop(
    mut rx: Receiver<WorkerCommand>,
    tx: Sender<ViewUpdate>,
    mut state: State,
) {
    while let Some(cmd) = rx.recv().await {
        let outcome = handle_command(&mut state, cmd);
        if let Some(update) = outcome.update {
            if tx.send(update).await.is_err() {
                break;
            }
        }

        if outcome.done {
            break;
        }
    }
    debug!("view worker stopped");
}

fn handle_command(state: &mut State, cmd: WorkerCommand) -> HandlerOutcome {
    match cmd {
        WorkerCommand::Handle {
            request_id,
            command,
        } => match state.handle(command) {
            Ok(()) => {
                let events = state.clear_events();
                if events.is_empty() {
                    HandlerOutcome::continue_without_update()
                } else {
                    HandlerOutcome::publish(ViewUpdate::Events { request_id, events })
                }
            }
            Err(error) => {
                error!("request {} failed: {}", request_id, error);
                // Anything queued before the failure was already applied to the state.
                let events = state.clear_events();
                if !events.is_empty() {
                    debug!("dropping {} events of failed request", events.len());
                }
                HandlerOutcome::publish(ViewUpdate::Failed { request_id, error })
            }
        },
        WorkerCommand::Shutdown => HandlerOutcome::exit(),
    }
}

struct HandlerOutcome {
    update: Option<ViewUpdate>,
    done: bool,
}

impl HandlerOutcome {
    fn publish(update: ViewUpdate) -> Self {
        Self {
            update: Some(update),
            done: false,
        }
    }

    fn continue_without_update() -> Self {
        Self {
            update: None,
            done: false,
        }
    }

    fn exit() -> Self {
        Self {
            update: None,
            done: true,
        }
    }
}

/// Cloneable producer side of a view worker's queue.
#[derive(Debug, Clone)]
pub struct ViewHandle {
    tx: Sender<WorkerCommand>,
    next_request_id: Arc<AtomicU64>,
}

impl ViewHandle {
    /// Spawn a worker owning `state` and return its handle, update stream and task.
    pub fn spawn(
        state: State,
        queue_depth: usize,
    ) -> (Self, Receiver<ViewUpdate>, JoinHandle<()>) {
        let (cmd_tx, cmd_rx) = mpsc::channel(queue_depth.max(1));
        let (update_tx, update_rx) = mpsc::channel(queue_depth.max(1));
        let worker = tokio::spawn(view_worker_loop(cmd_rx, update_tx, state));
        let handle = Self {
            tx: cmd_tx,
            next_request_id: Arc::new(AtomicU64::new(1)),
        };
        (handle, update_rx, worker)
    }

    /// Queue a command, returning the id its update will carry.
    pub async fn send(&self, command: ViewCommand) -> Result<RequestId> {
        let request_id = self.next_request_id.fetch_add(1, Ordering::Relaxed);
        self.tx
            .send(WorkerCommand::Handle {
                request_id,
                command,
            })
            .await
            .map_err(|_| TaildiffError::WorkerUnavailable)?;
        Ok(request_id)
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.tx
            .send(WorkerCommand::Shutdown)
            .await
            .map_err(|_| TaildiffError::WorkerUnavailable)
    }
}
