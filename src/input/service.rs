//! High-level input service.
//!
//! Polls crossterm, runs the key state machine, and yields domain-level
//! `InputAction`s that the application turns into view commands.

use crate::error::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Which view option a text prompt edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    Filter,
    Highlight,
    Mask,
    ErrorTag,
}

impl PromptKind {
    /// Label shown in front of the prompt buffer.
    pub fn label(self) -> &'static str {
        match self {
            PromptKind::Filter => "filter",
            PromptKind::Highlight => "highlight",
            PromptKind::Mask => "mask",
            PromptKind::ErrorTag => "error tag",
        }
    }
}

/// Current input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    Navigation,
    Prompt { kind: PromptKind },
}

/// Direction for scroll actions, in screen terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// High-level input actions emitted by the state machine/service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Scroll {
        direction: ScrollDirection,
        lines: usize,
    },
    PageUp,
    PageDown,
    /// Page the window toward newer lines.
    NextPage,
    /// Page the window toward older lines.
    PreviousPage,
    GoToTop,
    Quit,
    StartPrompt(PromptKind),
    UpdatePrompt {
        kind: PromptKind,
        buffer: String,
    },
    CancelPrompt(PromptKind),
    CommitPrompt {
        kind: PromptKind,
        value: String,
    },
    Resize {
        width: u16,
        height: u16,
    },
    NoAction,
    InvalidInput,
}

/// Key state machine: navigation keys, and a line editor while a prompt is open.
pub struct InputStateMachine {
    state: InputState,
    buffer: String,
}

impl InputStateMachine {
    pub fn new() -> Self {
        Self {
            state: InputState::Navigation,
            buffer: String::new(),
        }
    }

    fn open_prompt(&mut self, kind: PromptKind) -> InputAction {
        self.state = InputState::Prompt { kind };
        self.buffer.clear();
        InputAction::StartPrompt(kind)
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> InputAction {
        if key_event.kind != KeyEventKind::Press {
            return InputAction::NoAction;
        }

        let plain = !key_event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

        match (self.state, key_event.code) {
            (_, KeyCode::Char('c')) if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                match self.state {
                    InputState::Navigation => InputAction::Quit,
                    InputState::Prompt { kind } => {
                        self.state = InputState::Navigation;
                        self.buffer.clear();
                        InputAction::CancelPrompt(kind)
                    }
                }
            }
            (InputState::Navigation, KeyCode::Char('j')) if plain => InputAction::Scroll {
                direction: ScrollDirection::Down,
                lines: 1,
            },
            (InputState::Navigation, KeyCode::Down) => InputAction::Scroll {
                direction: ScrollDirection::Down,
                lines: 1,
            },
            (InputState::Navigation, KeyCode::Char('k')) if plain => InputAction::Scroll {
                direction: ScrollDirection::Up,
                lines: 1,
            },
            (InputState::Navigation, KeyCode::Up) => InputAction::Scroll {
                direction: ScrollDirection::Up,
                lines: 1,
            },
            (InputState::Navigation, KeyCode::Char(' ') | KeyCode::Char('f')) if plain => {
                InputAction::PageDown
            }
            (InputState::Navigation, KeyCode::PageDown) => InputAction::PageDown,
            (InputState::Navigation, KeyCode::Char('b')) if plain => InputAction::PageUp,
            (InputState::Navigation, KeyCode::PageUp) => InputAction::PageUp,
            (InputState::Navigation, KeyCode::Char('n')) if plain => InputAction::NextPage,
            (InputState::Navigation, KeyCode::Char('p')) if plain => InputAction::PreviousPage,
            (InputState::Navigation, KeyCode::Char('g')) if plain => InputAction::GoToTop,
            (InputState::Navigation, KeyCode::Home) => InputAction::GoToTop,
            (InputState::Navigation, KeyCode::Char('q')) if plain => InputAction::Quit,
            (InputState::Navigation, KeyCode::Char('/')) if plain => {
                self.open_prompt(PromptKind::Filter)
            }
            (InputState::Navigation, KeyCode::Char('h')) if plain => {
                self.open_prompt(PromptKind::Highlight)
            }
            (InputState::Navigation, KeyCode::Char('m')) if plain => {
                self.open_prompt(PromptKind::Mask)
            }
            (InputState::Navigation, KeyCode::Char('e')) if plain => {
                self.open_prompt(PromptKind::ErrorTag)
            }
            (InputState::Prompt { kind }, KeyCode::Char(ch)) if plain => {
                self.buffer.push(ch);
                InputAction::UpdatePrompt {
                    kind,
                    buffer: self.buffer.clone(),
                }
            }
            (InputState::Prompt { kind }, KeyCode::Backspace) => {
                self.buffer.pop();
                InputAction::UpdatePrompt {
                    kind,
                    buffer: self.buffer.clone(),
                }
            }
            (InputState::Prompt { kind }, KeyCode::Enter) => {
                self.state = InputState::Navigation;
                InputAction::CommitPrompt {
                    kind,
                    value: std::mem::take(&mut self.buffer),
                }
            }
            (InputState::Prompt { kind }, KeyCode::Esc) => {
                self.state = InputState::Navigation;
                self.buffer.clear();
                InputAction::CancelPrompt(kind)
            }
            _ => InputAction::InvalidInput,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn state(&self) -> InputState {
        self.state
    }
}

impl Default for InputStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Service responsible for producing high-level `InputAction`s from terminal events.
pub struct InputService {
    state_machine: InputStateMachine,
}

impl InputService {
    pub fn new() -> Self {
        Self {
            state_machine: InputStateMachine::new(),
        }
    }

    /// Wait up to `timeout` for a terminal event and translate it.
    pub fn poll_action(&mut self, timeout: Duration) -> Result<Option<InputAction>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        Ok(self.process_event(event::read()?))
    }

    pub fn process_event(&mut self, event: Event) -> Option<InputAction> {
        let action = match event {
            Event::Key(key_event) => self.state_machine.handle_key_event(key_event),
            Event::Resize(width, height) => InputAction::Resize { width, height },
            _ => InputAction::NoAction,
        };

        match action {
            InputAction::NoAction | InputAction::InvalidInput => None,
            _ => Some(action),
        }
    }
}

impl Default for InputService {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn a blocking thread that polls for terminal events and forwards actions to the app loop.
pub fn spawn_input_thread(
    tx: UnboundedSender<InputAction>,
    shutdown: Arc<AtomicBool>,
    poll_interval: Duration,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut service = InputService::new();
        while !shutdown.load(Ordering::SeqCst) {
            match service.poll_action(poll_interval) {
                Ok(Some(action)) => {
                    if tx.send(action).is_err() {
                        return;
                    }
                }
                Ok(None) => continue,
                Err(err) => {
                    log::error!("input thread error: {}", err);
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(sm: &mut InputStateMachine, text: &str) -> InputAction {
        let mut last = InputAction::NoAction;
        for ch in text.chars() {
            last = sm.handle_key_event(key(KeyCode::Char(ch)));
        }
        last
    }

    #[test]
    fn navigation_keys_map_to_actions() {
        let mut sm = InputStateMachine::new();
        assert_eq!(
            sm.handle_key_event(key(KeyCode::Char('j'))),
            InputAction::Scroll {
                direction: ScrollDirection::Down,
                lines: 1,
            }
        );
        assert_eq!(sm.handle_key_event(key(KeyCode::Char('n'))), InputAction::NextPage);
        assert_eq!(
            sm.handle_key_event(key(KeyCode::Char('p'))),
            InputAction::PreviousPage
        );
        assert_eq!(sm.handle_key_event(key(KeyCode::Home)), InputAction::GoToTop);
        assert_eq!(sm.handle_key_event(key(KeyCode::Char('q'))), InputAction::Quit);
    }

    #[test]
    fn prompt_edits_and_commits() {
        let mut sm = InputStateMachine::new();
        assert_eq!(
            sm.handle_key_event(key(KeyCode::Char('/'))),
            InputAction::StartPrompt(PromptKind::Filter)
        );
        assert_eq!(
            type_text(&mut sm, "errq"),
            InputAction::UpdatePrompt {
                kind: PromptKind::Filter,
                buffer: "errq".to_string(),
            }
        );
        assert_eq!(
            sm.handle_key_event(key(KeyCode::Backspace)),
            InputAction::UpdatePrompt {
                kind: PromptKind::Filter,
                buffer: "err".to_string(),
            }
        );
        assert_eq!(
            sm.handle_key_event(key(KeyCode::Enter)),
            InputAction::CommitPrompt {
                kind: PromptKind::Filter,
                value: "err".to_string(),
            }
        );
        assert_eq!(sm.state(), InputState::Navigation);
        assert!(sm.buffer().is_empty());
    }

    #[test]
    fn escape_cancels_prompt() {
        let mut sm = InputStateMachine::new();
        sm.handle_key_event(key(KeyCode::Char('h')));
        type_text(&mut sm, "abc");
        assert_eq!(
            sm.handle_key_event(key(KeyCode::Esc)),
            InputAction::CancelPrompt(PromptKind::Highlight)
        );
        assert_eq!(sm.state(), InputState::Navigation);
    }

    #[test]
    fn ctrl_c_quits_only_outside_prompt() {
        let mut sm = InputStateMachine::new();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        sm.handle_key_event(key(KeyCode::Char('m')));
        assert_eq!(
            sm.handle_key_event(ctrl_c),
            InputAction::CancelPrompt(PromptKind::Mask)
        );
        assert_eq!(sm.handle_key_event(ctrl_c), InputAction::Quit);
    }

    #[test]
    fn resize_passes_through_service() {
        let mut service = InputService::new();
        assert_eq!(
            service.process_event(Event::Resize(100, 40)),
            Some(InputAction::Resize {
                width: 100,
                height: 40,
            })
        );
        assert_eq!(service.process_event(Event::FocusGained), None);
    }
}
