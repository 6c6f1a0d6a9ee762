//! Raw terminal events: crossterm polling and mouse wheel coalescing.
//!
//! A fast wheel spin produces dozens of events per frame. They are merged into a single
//! scroll of N lines so the viewer re-materializes once instead of once per tick.

use crate::error::Result;
use ratatui::crossterm::event::{self, Event, KeyEvent, MouseEvent, MouseEventKind};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Wheel events closer together than this are merged.
const DEFAULT_COALESCE_WINDOW_MS: u64 = 12;
/// Lines per wheel tick unless configured otherwise.
const DEFAULT_SCROLL_LINES: usize = 1;
/// Poll timeout used when the caller does not provide one.
const DEFAULT_POLL_TIMEOUT_MS: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Events surfaced by [`RawInputCollector`]
#[derive(Debug, Clone, PartialEq)]
pub enum RawInputEvent {
    Key(KeyEvent),
    Resize {
        width: u16,
        height: u16,
    },
    Scroll {
        direction: ScrollDirection,
        lines: usize,
    },
}

/// Merges same-direction scrolls that arrive within a time window
#[derive(Debug, Clone)]
pub struct InputCoalescer {
    window: Duration,
    pending: Option<PendingScroll>,
}

#[derive(Debug, Clone)]
struct PendingScroll {
    direction: ScrollDirection,
    lines: usize,
    last_event: Instant,
}

impl InputCoalescer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Add a scroll; a change of direction returns the scroll queued so far
    pub fn push(
        &mut self,
        direction: ScrollDirection,
        lines: usize,
        now: Instant,
    ) -> Option<(ScrollDirection, usize)> {
        match self.pending {
            Some(ref mut pending) if pending.direction == direction => {
                pending.lines = pending.lines.saturating_add(lines);
                pending.last_event = now;
                None
            }
            _ => {
                let flushed = self.flush();
                self.pending = Some(PendingScroll {
                    direction,
                    lines,
                    last_event: now,
                });
                flushed
            }
        }
    }

    /// Take the queued scroll once no event has arrived for a full window
    pub fn flush_if_stale(&mut self, now: Instant) -> Option<(ScrollDirection, usize)> {
        if let Some(pending) = &self.pending {
            if now.duration_since(pending.last_event) >= self.window {
                return self.flush();
            }
        }
        None
    }

    pub fn flush(&mut self) -> Option<(ScrollDirection, usize)> {
        self.pending
            .take()
            .map(|pending| (pending.direction, pending.lines))
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }
}

/// Polls crossterm and queues key, resize and coalesced scroll events
#[derive(Debug)]
pub struct RawInputCollector {
    coalescer: InputCoalescer,
    scroll_lines: usize,
    pending_events: VecDeque<RawInputEvent>,
}

impl RawInputCollector {
    pub fn new() -> Self {
        Self::with_window(Duration::from_millis(DEFAULT_COALESCE_WINDOW_MS))
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            coalescer: InputCoalescer::new(window),
            scroll_lines: DEFAULT_SCROLL_LINES,
            pending_events: VecDeque::new(),
        }
    }

    /// Set how many lines one wheel tick scrolls
    pub fn with_scroll_lines(mut self, lines: usize) -> Self {
        self.scroll_lines = lines.max(1);
        self
    }

    pub fn is_idle(&self) -> bool {
        self.pending_events.is_empty() && self.coalescer.is_empty()
    }

    /// Feed an event without polling the terminal
    pub fn process_event(&mut self, event: Event) {
        self.enqueue_event(event);
    }

    /// Next queued event, flushing a stale scroll first
    pub fn try_flush(&mut self) -> Option<RawInputEvent> {
        self.coalescer
            .flush_if_stale(Instant::now())
            .map(|(direction, lines)| RawInputEvent::Scroll { direction, lines })
            .or_else(|| self.pending_events.pop_front())
    }

    /// Next event, waiting up to `timeout` for the terminal
    pub fn poll_event(&mut self, timeout: Option<Duration>) -> Result<Option<RawInputEvent>> {
        if let Some(event) = self.try_flush() {
            return Ok(Some(event));
        }

        let poll_timeout = timeout.unwrap_or(Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS));
        if !event::poll(poll_timeout)? {
            return Ok(self.try_flush());
        }

        let event = event::read()?;
        self.enqueue_event(event);
        Ok(self.pending_events.pop_front())
    }

    fn enqueue_event(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => {
                self.flush_pending_scroll();
                self.pending_events.push_back(RawInputEvent::Key(key_event));
            }
            Event::Resize(width, height) => {
                self.flush_pending_scroll();
                self.pending_events
                    .push_back(RawInputEvent::Resize { width, height });
            }
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event),
            _ => {}
        }
    }

    fn handle_mouse_event(&mut self, mouse_event: MouseEvent) {
        let direction = match mouse_event.kind {
            MouseEventKind::ScrollUp => ScrollDirection::Up,
            MouseEventKind::ScrollDown => ScrollDirection::Down,
            _ => return,
        };

        if let Some((direction, lines)) =
            self.coalescer
                .push(direction, self.scroll_lines, Instant::now())
        {
            self.pending_events
                .push_back(RawInputEvent::Scroll { direction, lines });
        }
    }

    fn flush_pending_scroll(&mut self) {
        if let Some((direction, lines)) = self.coalescer.flush() {
            self.pending_events
                .push_back(RawInputEvent::Scroll { direction, lines });
        }
    }
}

impl Default for RawInputCollector {
    fn default() -> Self {
        Self::new()
    }
}
