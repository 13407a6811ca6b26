//! Application orchestration layer
//!
//! Wires the file follower, the view worker, keyboard input and the terminal
//! together. The view itself lives in the worker; this loop only forwards
//! commands and applies the events that come back.

pub mod runtime;

use crate::config::Settings;
use crate::error::{Result, TaildiffError};
use crate::file_handler::{validate_file_path, ChangeNotifier, FileTailer};
use crate::input::{spawn_input_thread, PromptKind};
use crate::render::service::{option_command, RenderLoopState};
use crate::render::ui::{UIRenderer, ViewOptions, ViewState};
use crate::window::{State, ViewHandle};
use log::{info, warn};
use runtime::{spawn_follower, InputDebouncer};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);
const VIEW_QUEUE_DEPTH: usize = 256;

/// Application orchestrator - coordinates components without duplicating their state
pub struct Application {
    file_path: PathBuf,
    settings: Settings,
    initial_options: ViewOptions,
    ui_renderer: Box<dyn UIRenderer>,
}

impl Application {
    /// Create an application for `file_path`, checking the file can be followed.
    pub fn new(
        file_path: &Path,
        settings: Settings,
        initial_options: ViewOptions,
        ui_renderer: Box<dyn UIRenderer>,
    ) -> Result<Self> {
        validate_file_path(file_path)?;
        Ok(Self {
            file_path: file_path.to_path_buf(),
            settings,
            initial_options,
            ui_renderer,
        })
    }

    /// Run until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        self.ui_renderer.initialize()?;
        let result = self.event_loop().await;
        self.ui_renderer.cleanup()?;
        result
    }

    async fn event_loop(&mut self) -> Result<()> {
        let (width, height) = self.ui_renderer.get_terminal_size()?;
        let mut view_state =
            ViewState::new(&self.file_path, width, height, self.settings.append_to_top);
        view_state.options = self.initial_options.clone();

        let (view, mut updates, worker) = ViewHandle::spawn(
            State::new(view_state.lines_per_page() as usize),
            VIEW_QUEUE_DEPTH,
        );

        // Options go in before the first batch so it is projected once.
        for kind in [
            PromptKind::Filter,
            PromptKind::Mask,
            PromptKind::ErrorTag,
            PromptKind::Highlight,
        ] {
            let value = view_state.options.get(kind);
            if !value.is_empty() {
                view.send(option_command(kind, value.to_string())).await?;
            }
        }

        let notifier = ChangeNotifier::new(Duration::from_millis(self.settings.debounce_ms));
        let subscription = match notifier.subscribe(&self.file_path) {
            Ok(subscription) => Some(subscription),
            Err(err) => {
                warn!("Falling back to polling {}: {}", self.file_path.display(), err);
                None
            }
        };

        let cancel = Arc::new(AtomicBool::new(false));
        let (error_tx, mut follower_errors) = mpsc::unbounded_channel::<TaildiffError>();
        let follower = spawn_follower(
            FileTailer::new(&self.file_path)?,
            subscription,
            view.clone(),
            Duration::from_millis(self.settings.poll_interval_ms),
            Arc::clone(&cancel),
            error_tx,
        );

        let shutdown = Arc::new(AtomicBool::new(false));
        let (input_tx, mut input_rx) = mpsc::unbounded_channel();
        let input_thread = spawn_input_thread(input_tx, Arc::clone(&shutdown), INPUT_POLL_INTERVAL);

        let mut render_state = RenderLoopState::new(InputDebouncer::new(Duration::from_millis(
            self.settings.input_debounce_ms,
        )));
        info!("Following {}", self.file_path.display());

        let result = loop {
            self.ui_renderer.render(&view_state)?;

            let deadline = render_state.next_deadline();
            let step = tokio::select! {
                action = input_rx.recv() => match action {
                    Some(action) => render_state.process_action(action, &mut view_state, &view).await,
                    None => Ok(false),
                },
                update = updates.recv() => match update {
                    Some(update) => {
                        render_state.handle_update(update, &mut view_state);
                        Ok(true)
                    }
                    None => Err(TaildiffError::WorkerUnavailable),
                },
                Some(err) = follower_errors.recv() => {
                    view_state.status_line.set_message(err.to_string());
                    Ok(true)
                },
                _ = async {
                    match deadline {
                        Some(deadline) => tokio::time::sleep_until(deadline).await,
                        None => std::future::pending().await,
                    }
                } => {
                    render_state
                        .flush_due(tokio::time::Instant::now(), &view)
                        .await
                        .map(|_| true)
                },
            };

            match step {
                Ok(true) => {}
                Ok(false) => break Ok(()),
                Err(err) => break Err(err),
            }
        };

        cancel.store(true, Ordering::Relaxed);
        shutdown.store(true, Ordering::SeqCst);
        follower.abort();
        // A worker blocked on a full update queue exits once nobody listens.
        drop(updates);
        let _ = view.shutdown().await;
        let _ = worker.await;
        if input_thread.join().is_err() {
            warn!("Input thread panicked");
        }
        drop(notifier);

        result
    }
}
