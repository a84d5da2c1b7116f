mod state;

pub use state::{HeldModifiers, TrackerState};

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::errors::{HintError, Result};
use crate::hook::KeyHandler;
use crate::key::PhysicalKey;
use crate::sink::ChordSink;

#[derive(Debug, Clone, Copy)]
enum Direction {
    Down,
    Up,
}

/// Turns raw key-down/key-up events into chord notifications.
///
/// Events may arrive from several hook threads at once; each one is
/// processed inside the state lock, and its notification is delivered
/// before the lock is released, so notifications leave in event order.
pub struct ModifierChordTracker {
    state: Mutex<TrackerState>,
    sink: Box<dyn ChordSink>,
}

impl ModifierChordTracker {
    pub fn new(sink: impl ChordSink + 'static) -> Self {
        Self {
            state: Mutex::new(TrackerState::default()),
            sink: Box::new(sink),
        }
    }

    pub fn on_key_down(&self, key: &PhysicalKey) {
        self.process(key, Direction::Down);
    }

    pub fn on_key_up(&self, key: &PhysicalKey) {
        self.process(key, Direction::Up);
    }

    /// Forgets every held key without emitting release notifications.
    pub fn reset_state(&self) {
        self.lock().clear();
        tracing::debug!("Modifier state reset");
    }

    #[must_use]
    pub fn held(&self) -> HeldModifiers {
        self.lock().held()
    }

    #[must_use]
    pub fn state(&self) -> TrackerState {
        self.lock().clone()
    }

    // Poisoning cannot leave a half-applied state: transitions are computed on
    // a copy and only swapped in once delivered.
    fn lock(&self) -> MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn process(&self, key: &PhysicalKey, direction: Direction) {
        let mut state = self.lock();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| -> Result<TrackerState> {
            let mut next = state.clone();
            let event = match direction {
                Direction::Down => next.press(key),
                Direction::Up => next.release(key),
            };
            if let Some(event) = event {
                tracing::trace!("{:?} {} -> {:?}", direction, key, event);
                event.deliver(self.sink.as_ref())?;
            }
            Ok(next)
        }));
        match outcome {
            Ok(Ok(next)) => *state = next,
            Ok(Err(err)) => {
                tracing::error!("Dropped key {:?} of {}: {}", direction, key, err);
            }
            Err(_) => {
                tracing::error!("{}", HintError::HandlerPanicked(key.to_string()));
            }
        }
    }
}

impl KeyHandler for ModifierChordTracker {
    fn on_key_down(&self, key: PhysicalKey) {
        ModifierChordTracker::on_key_down(self, &key);
    }

    fn on_key_up(&self, key: PhysicalKey) {
        ModifierChordTracker::on_key_up(self, &key);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use super::ModifierChordTracker;
    use crate::chord::Chord;
    use crate::errors::{Error, HintError};
    use crate::key::PhysicalKey;
    use crate::sink::ChordSink;

    #[derive(Default, Clone)]
    struct FlakySink {
        fail: Arc<AtomicBool>,
        panic: Arc<AtomicBool>,
        seen: Arc<Mutex<Vec<Chord>>>,
    }

    impl ChordSink for FlakySink {
        fn chord_pressed(&self, chord: Chord) -> Error {
            if self.panic.load(Ordering::SeqCst) {
                panic!("sink exploded");
            }
            if self.fail.load(Ordering::SeqCst) {
                return Err(HintError::SinkClosed);
            }
            self.seen.lock().unwrap().push(chord);
            Ok(())
        }

        fn chord_released(&self, chord: Chord) -> Error {
            self.chord_pressed(chord)
        }
    }

    #[test]
    fn failed_delivery_leaves_state_untouched() {
        let sink = FlakySink::default();
        let tracker = ModifierChordTracker::new(sink.clone());

        sink.fail.store(true, Ordering::SeqCst);
        tracker.on_key_down(&PhysicalKey::ControlLeft);
        assert!(tracker.state().is_empty());

        sink.fail.store(false, Ordering::SeqCst);
        tracker.on_key_down(&PhysicalKey::ControlLeft);
        assert!(tracker.held().ctrl);
        assert_eq!(*sink.seen.lock().unwrap(), vec![Chord::Ctrl]);
    }

    #[test]
    fn panicking_sink_is_contained() {
        let sink = FlakySink::default();
        let tracker = ModifierChordTracker::new(sink.clone());

        sink.panic.store(true, Ordering::SeqCst);
        tracker.on_key_down(&PhysicalKey::AltLeft);
        assert!(tracker.state().is_empty());

        sink.panic.store(false, Ordering::SeqCst);
        tracker.on_key_down(&PhysicalKey::AltLeft);
        assert_eq!(*sink.seen.lock().unwrap(), vec![Chord::Alt]);
    }

    #[test]
    fn concurrent_hooks_lose_nothing() {
        let sink = FlakySink::default();
        let tracker = Arc::new(ModifierChordTracker::new(sink.clone()));
        let handles: Vec<_> = [PhysicalKey::ControlLeft, PhysicalKey::AltLeft]
            .into_iter()
            .map(|key| {
                let tracker = tracker.clone();
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        tracker.on_key_down(&key);
                        tracker.on_key_up(&key);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert!(tracker.state().is_empty());
        // Every press is matched by exactly one release.
        assert_eq!(sink.seen.lock().unwrap().len(), 800);
    }
}
