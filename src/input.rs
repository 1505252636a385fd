/// Input events as the scenes see them, and the terminal source that
/// produces them.

use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Escape,
    Space,
    Tab,
    Enter,
    Left,
    Right,
    Up,
    Down,
    /// Printable key, lower-cased.
    Char(char),
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    KeyUp(Key),
}

/// Anything that can hand the loop the events queued since the last frame.
pub trait EventSource {
    fn poll_events(&mut self) -> Vec<InputEvent>;
}

fn key_from(code: KeyCode) -> Key {
    match code {
        KeyCode::Esc => Key::Escape,
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Tab => Key::Tab,
        KeyCode::Enter => Key::Enter,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Char(c) => Key::Char(c.to_ascii_lowercase()),
        _ => Key::Other,
    }
}

/// A key counts as held if its last press or repeat arrived within this
/// window.  Only used on terminals that never report key releases: the OS
/// repeat rate keeps a held key refreshed well inside it.
pub const HOLD_WINDOW: Duration = Duration::from_millis(130);

/// Terminal input.  A dedicated thread blocks on `event::read` and forwards
/// everything through a channel so the frame loop never blocks on I/O.
pub struct TerminalEvents {
    rx: mpsc::Receiver<Event>,
    /// Held key → when it was last seen pressed or repeating.
    held: HashMap<Key, Instant>,
    reports_release: bool,
}

impl TerminalEvents {
    /// Spawn the reader thread.  `reports_release` says whether the terminal
    /// accepted the keyboard-enhancement flags.
    pub fn spawn(reports_release: bool) -> Self {
        let (tx, rx) = mpsc::channel::<Event>();
        thread::spawn(move || loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped → program exiting
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "terminal event reader stopped");
                    break;
                }
            }
        });
        Self::from_channel(rx, reports_release)
    }

    pub fn from_channel(rx: mpsc::Receiver<Event>, reports_release: bool) -> Self {
        Self {
            rx,
            held: HashMap::new(),
            reports_release,
        }
    }

    fn translate(&mut self, ev: Event, now: Instant, out: &mut Vec<InputEvent>) {
        let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
            return;
        };
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            out.push(InputEvent::Quit);
            return;
        }
        let key = key_from(code);
        match kind {
            KeyEventKind::Press => {
                self.held.insert(key, now);
                out.push(InputEvent::KeyDown(key));
            }
            KeyEventKind::Repeat => {
                self.held.insert(key, now);
            }
            KeyEventKind::Release => {
                if self.held.remove(&key).is_some() {
                    out.push(InputEvent::KeyUp(key));
                }
            }
        }
    }

    /// Synthesise key-ups for keys whose repeats stopped arriving.
    fn expire_held(&mut self, now: Instant, out: &mut Vec<InputEvent>) {
        if self.reports_release {
            return;
        }
        let mut expired: Vec<Key> = self
            .held
            .iter()
            .filter(|&(_, &last)| now.saturating_duration_since(last) > HOLD_WINDOW)
            .map(|(&key, _)| key)
            .collect();
        expired.sort();
        for key in expired {
            self.held.remove(&key);
            out.push(InputEvent::KeyUp(key));
        }
    }
}

impl EventSource for TerminalEvents {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        let now = Instant::now();
        let mut events = Vec::new();
        while let Ok(ev) = self.rx.try_recv() {
            self.translate(ev, now, &mut events);
        }
        self.expire_held(now, &mut events);
        events
    }
}
