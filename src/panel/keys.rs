use std::time::{Duration, Instant};

use crate::link::Key;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// One button input line.
pub trait KeyLine {
    /// Whether the button reads pressed right now.
    fn is_active(&self) -> bool;
}

/// Scans the bound key lines and emits debounced presses.
///
/// The debounce window is global: after any accepted press, every key is
/// ignored until `debounce` has elapsed. Bindings are scanned in order, so
/// of two keys held in the same tick only the first one is reported.
pub struct KeyScanner {
    bindings: Vec<(Key, Box<dyn KeyLine>)>,
    debounce: Duration,
    last_press: Option<Instant>,
}

impl KeyScanner {
    pub fn new(bindings: Vec<(Key, Box<dyn KeyLine>)>, debounce: Duration) -> Self {
        Self {
            bindings,
            debounce,
            last_press: None,
        }
    }

    pub fn scan(&mut self) -> Vec<Key> {
        self.scan_at(Instant::now())
    }

    pub fn scan_at(&mut self, now: Instant) -> Vec<Key> {
        let mut pressed = Vec::new();
        for (key, line) in &self.bindings {
            if !line.is_active() {
                continue;
            }
            if self
                .last_press
                .is_some_and(|last| now.duration_since(last) < self.debounce)
            {
                continue;
            }
            self.last_press = Some(now);
            pressed.push(*key);
        }
        pressed
    }
}
