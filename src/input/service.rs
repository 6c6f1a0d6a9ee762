//! High-level input service.
//!
//! Runs the `less`-style key state machine over coalesced raw events and yields
//! `InputAction`s that map one-to-one onto viewer operations.

use crate::error::Result;
use crate::input::raw::{RawInputCollector, RawInputEvent, ScrollDirection};
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// What a prompt on the status line is collecting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// A regex to highlight and search for
    Pattern,
    /// A byte offset to jump to
    Offset,
}

impl PromptKind {
    /// Character displayed in front of the prompt buffer.
    pub fn to_char(self) -> char {
        match self {
            PromptKind::Pattern => '/',
            PromptKind::Offset => ':',
        }
    }
}

/// Current input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    Navigation,
    Prompt { kind: PromptKind },
}

/// Actions emitted by the state machine
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    Scroll {
        direction: ScrollDirection,
        lines: usize,
    },
    PageUp,
    PageDown,
    GoToStart,
    GoToEnd,
    Quit,
    StartPrompt(PromptKind),
    UpdatePrompt {
        kind: PromptKind,
        buffer: String,
    },
    CancelPrompt,
    ApplyPattern(String),
    GoToOffset(u64),
    /// Offset prompt text that does not fit a byte offset
    InvalidOffset(String),
    SearchNext,
    ClearPattern,
    Resize {
        width: u16,
        height: u16,
    },
    NoAction,
    InvalidInput,
}

/// Key bindings of the viewer
pub struct InputStateMachine {
    state: InputState,
    prompt_buffer: String,
}

fn plain(modifiers: KeyModifiers) -> bool {
    !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

impl InputStateMachine {
    pub fn new() -> Self {
        Self {
            state: InputState::Navigation,
            prompt_buffer: String::new(),
        }
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> InputAction {
        if key_event.kind != KeyEventKind::Press {
            return InputAction::NoAction;
        }

        match self.state {
            InputState::Navigation => self.handle_navigation(key_event),
            InputState::Prompt { kind } => self.handle_prompt(kind, key_event),
        }
    }

    fn handle_navigation(&mut self, key_event: KeyEvent) -> InputAction {
        let line = |direction| InputAction::Scroll {
            direction,
            lines: 1,
        };

        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('j'), m) if plain(m) => line(ScrollDirection::Down),
            (KeyCode::Down, _) => line(ScrollDirection::Down),
            (KeyCode::Char('k'), m) if plain(m) => line(ScrollDirection::Up),
            (KeyCode::Up, _) => line(ScrollDirection::Up),
            (KeyCode::Char(' ') | KeyCode::Char('f'), m) if plain(m) => InputAction::PageDown,
            (KeyCode::PageDown, _) => InputAction::PageDown,
            (KeyCode::Char('b'), m) if plain(m) => InputAction::PageUp,
            (KeyCode::PageUp, _) => InputAction::PageUp,
            (KeyCode::Char('g'), m) if plain(m) => InputAction::GoToStart,
            (KeyCode::Home, _) => InputAction::GoToStart,
            (KeyCode::Char('G'), m) if plain(m) => InputAction::GoToEnd,
            (KeyCode::End, _) => InputAction::GoToEnd,
            (KeyCode::Char('n'), m) if plain(m) => InputAction::SearchNext,
            (KeyCode::Esc, _) => InputAction::ClearPattern,
            (KeyCode::Char('q'), m) if plain(m) => InputAction::Quit,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => InputAction::Quit,
            (KeyCode::Char('/'), m) if plain(m) => self.start_prompt(PromptKind::Pattern),
            (KeyCode::Char(':'), m) if plain(m) => self.start_prompt(PromptKind::Offset),
            _ => InputAction::InvalidInput,
        }
    }

    fn start_prompt(&mut self, kind: PromptKind) -> InputAction {
        self.state = InputState::Prompt { kind };
        self.prompt_buffer.clear();
        InputAction::StartPrompt(kind)
    }

    fn cancel_prompt(&mut self) -> InputAction {
        self.state = InputState::Navigation;
        self.prompt_buffer.clear();
        InputAction::CancelPrompt
    }

    fn handle_prompt(&mut self, kind: PromptKind, key_event: KeyEvent) -> InputAction {
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
                self.cancel_prompt()
            }
            (KeyCode::Char(ch), m) if plain(m) && accepts(kind, ch) => {
                self.prompt_buffer.push(ch);
                InputAction::UpdatePrompt {
                    kind,
                    buffer: self.prompt_buffer.clone(),
                }
            }
            (KeyCode::Backspace, _) => {
                self.prompt_buffer.pop();
                if self.prompt_buffer.is_empty() {
                    self.cancel_prompt()
                } else {
                    InputAction::UpdatePrompt {
                        kind,
                        buffer: self.prompt_buffer.clone(),
                    }
                }
            }
            (KeyCode::Enter, _) => {
                let buffer = std::mem::take(&mut self.prompt_buffer);
                self.state = InputState::Navigation;

                if buffer.trim().is_empty() {
                    return InputAction::CancelPrompt;
                }
                match kind {
                    PromptKind::Pattern => InputAction::ApplyPattern(buffer),
                    PromptKind::Offset => match buffer.parse() {
                        Ok(offset) => InputAction::GoToOffset(offset),
                        Err(_) => InputAction::InvalidOffset(buffer),
                    },
                }
            }
            _ => InputAction::InvalidInput,
        }
    }

    pub fn prompt_buffer(&self) -> &str {
        &self.prompt_buffer
    }

    pub fn state(&self) -> InputState {
        self.state
    }
}

/// Characters a prompt will take into its buffer
fn accepts(kind: PromptKind, ch: char) -> bool {
    match kind {
        PromptKind::Pattern => !ch.is_control(),
        PromptKind::Offset => ch.is_ascii_digit(),
    }
}

impl Default for InputStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Produces `InputAction`s from terminal events
pub struct InputService {
    state_machine: InputStateMachine,
    raw_input: RawInputCollector,
}

impl InputService {
    pub fn new() -> Self {
        Self::with_collector(RawInputCollector::new())
    }

    pub fn with_collector(raw_input: RawInputCollector) -> Self {
        Self {
            state_machine: InputStateMachine::new(),
            raw_input,
        }
    }

    pub fn state(&self) -> InputState {
        self.state_machine.state()
    }

    /// Wait up to `timeout` for terminal input and drain everything ready
    pub fn poll_actions(&mut self, timeout: Option<Duration>) -> Result<Vec<InputAction>> {
        let mut actions = Vec::new();

        if let Some(raw_event) = self.raw_input.poll_event(timeout)? {
            actions.extend(self.process_raw_event(raw_event));
            while let Some(extra_event) = self.raw_input.try_flush() {
                actions.extend(self.process_raw_event(extra_event));
            }
        }

        Ok(actions)
    }

    /// Feed a single event, returning whatever actions are ready
    pub fn process_event(&mut self, event: Event) -> Vec<InputAction> {
        self.raw_input.process_event(event);

        let mut actions = Vec::new();
        while let Some(raw_event) = self.raw_input.try_flush() {
            actions.extend(self.process_raw_event(raw_event));
        }
        actions
    }

    fn process_raw_event(&mut self, event: RawInputEvent) -> Option<InputAction> {
        let action = match event {
            RawInputEvent::Key(key_event) => self.state_machine.handle_key_event(key_event),
            RawInputEvent::Resize { width, height } => InputAction::Resize { width, height },
            RawInputEvent::Scroll { direction, lines } => InputAction::Scroll { direction, lines },
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

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{MouseEvent, MouseEventKind};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(machine: &mut InputStateMachine, text: &str) -> InputAction {
        let mut last = InputAction::NoAction;
        for ch in text.chars() {
            last = machine.handle_key_event(key(KeyCode::Char(ch)));
        }
        last
    }

    #[test]
    fn navigation_bindings() {
        let mut machine = InputStateMachine::new();
        let cases = [
            (key(KeyCode::Char(' ')), InputAction::PageDown),
            (key(KeyCode::Char('f')), InputAction::PageDown),
            (key(KeyCode::PageDown), InputAction::PageDown),
            (key(KeyCode::Char('b')), InputAction::PageUp),
            (key(KeyCode::PageUp), InputAction::PageUp),
            (key(KeyCode::Char('g')), InputAction::GoToStart),
            (key(KeyCode::Home), InputAction::GoToStart),
            (
                KeyEvent::new(KeyCode::Home, KeyModifiers::CONTROL),
                InputAction::GoToStart,
            ),
            (key(KeyCode::Char('G')), InputAction::GoToEnd),
            (
                KeyEvent::new(KeyCode::End, KeyModifiers::CONTROL),
                InputAction::GoToEnd,
            ),
            (key(KeyCode::Char('n')), InputAction::SearchNext),
            (key(KeyCode::Esc), InputAction::ClearPattern),
            (key(KeyCode::Char('q')), InputAction::Quit),
            (
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                InputAction::Quit,
            ),
            (key(KeyCode::Char('x')), InputAction::InvalidInput),
        ];

        for (event, expected) in cases {
            assert_eq!(machine.handle_key_event(event), expected, "{event:?}");
        }
    }

    #[test]
    fn pattern_prompt_applies_on_enter() {
        let mut machine = InputStateMachine::new();
        assert_eq!(
            machine.handle_key_event(key(KeyCode::Char('/'))),
            InputAction::StartPrompt(PromptKind::Pattern)
        );
        assert_eq!(
            type_str(&mut machine, "a.c"),
            InputAction::UpdatePrompt {
                kind: PromptKind::Pattern,
                buffer: "a.c".to_string()
            }
        );
        assert_eq!(machine.prompt_buffer(), "a.c");
        assert_eq!(
            machine.handle_key_event(key(KeyCode::Enter)),
            InputAction::ApplyPattern("a.c".to_string())
        );
        assert_eq!(machine.state(), InputState::Navigation);
    }

    #[test]
    fn prompt_swallows_navigation_keys() {
        let mut machine = InputStateMachine::new();
        machine.handle_key_event(key(KeyCode::Char('/')));
        assert_eq!(
            type_str(&mut machine, "q"),
            InputAction::UpdatePrompt {
                kind: PromptKind::Pattern,
                buffer: "q".to_string()
            }
        );
        assert_eq!(
            machine.handle_key_event(key(KeyCode::Esc)),
            InputAction::CancelPrompt
        );
        assert_eq!(machine.state(), InputState::Navigation);
    }

    #[test]
    fn offset_prompt_accepts_digits_only() {
        let mut machine = InputStateMachine::new();
        assert_eq!(
            machine.handle_key_event(key(KeyCode::Char(':'))),
            InputAction::StartPrompt(PromptKind::Offset)
        );
        type_str(&mut machine, "12");
        assert_eq!(
            machine.handle_key_event(key(KeyCode::Char('x'))),
            InputAction::InvalidInput
        );
        type_str(&mut machine, "34");
        assert_eq!(
            machine.handle_key_event(key(KeyCode::Enter)),
            InputAction::GoToOffset(1234)
        );
    }

    #[test]
    fn offset_prompt_overflow_is_reported() {
        let mut machine = InputStateMachine::new();
        machine.handle_key_event(key(KeyCode::Char(':')));
        type_str(&mut machine, "99999999999999999999999");
        assert_eq!(
            machine.handle_key_event(key(KeyCode::Enter)),
            InputAction::InvalidOffset("99999999999999999999999".to_string())
        );
        assert_eq!(machine.state(), InputState::Navigation);
    }

    #[test]
    fn backspace_on_last_char_cancels() {
        let mut machine = InputStateMachine::new();
        machine.handle_key_event(key(KeyCode::Char('/')));
        type_str(&mut machine, "a");
        assert_eq!(
            machine.handle_key_event(key(KeyCode::Backspace)),
            InputAction::CancelPrompt
        );
        assert_eq!(machine.state(), InputState::Navigation);
    }

    #[test]
    fn empty_enter_cancels() {
        let mut machine = InputStateMachine::new();
        machine.handle_key_event(key(KeyCode::Char('/')));
        assert_eq!(
            machine.handle_key_event(key(KeyCode::Enter)),
            InputAction::CancelPrompt
        );
    }

    #[test]
    fn mouse_scrolls_are_coalesced_upstream() {
        let mut service = InputService::new();
        let wheel = || {
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::ScrollDown,
                column: 0,
                row: 0,
                modifiers: KeyModifiers::NONE,
            })
        };

        assert!(service.process_event(wheel()).is_empty());
        assert!(service.process_event(wheel()).is_empty());
        let actions = service.process_event(Event::Resize(80, 24));

        assert_eq!(
            actions,
            vec![
                InputAction::Scroll {
                    direction: ScrollDirection::Down,
                    lines: 2,
                },
                InputAction::Resize {
                    width: 80,
                    height: 24,
                },
            ]
        );
    }

    #[test]
    fn keyboard_events_pass_through_state_machine() {
        let mut service = InputService::new();
        assert_eq!(
            service.process_event(Event::Key(key(KeyCode::Char('j')))),
            vec![InputAction::Scroll {
                direction: ScrollDirection::Down,
                lines: 1,
            }]
        );
        assert!(service
            .process_event(Event::Key(key(KeyCode::Char('z'))))
            .is_empty());
    }
}
