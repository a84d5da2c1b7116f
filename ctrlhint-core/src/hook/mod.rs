pub mod evdev;

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::oneshot;

use crate::errors::Error;
use crate::key::PhysicalKey;
use crate::tracker::{HeldModifiers, ModifierChordTracker};

/// How long `stop` waits for hook threads before giving up on them.
pub const STOP_TIMEOUT: Duration = Duration::from_millis(500);

/// The consumer side of a global key hook.
pub trait KeyHandler: Send + Sync {
    fn on_key_down(&self, key: PhysicalKey);

    fn on_key_up(&self, key: PhysicalKey);
}

/// A process-wide source of raw key events.
pub trait KeySource: Send + Sync {
    /// Starts delivering events to `handler` from background threads.
    ///
    /// # Errors
    ///
    /// Errors when the platform hook cannot be registered, e.g. no readable
    /// keyboard device.
    fn install(&self, handler: Arc<dyn KeyHandler>) -> crate::errors::Result<Hook>;
}

/// Handle on an installed hook. Dropping it releases every hook thread.
#[derive(Debug)]
pub struct Hook {
    task_guards: Vec<oneshot::Receiver<()>>,
    done_transmitter: Option<mpsc::Sender<()>>,
    done_receiver: mpsc::Receiver<()>,
}

impl Default for Hook {
    fn default() -> Self {
        let (done_transmitter, done_receiver) = mpsc::channel();
        Self {
            task_guards: vec![],
            done_transmitter: Some(done_transmitter),
            done_receiver,
        }
    }
}

impl Hook {
    /// Creates the guard a new hook thread must hold for its lifetime.
    pub fn guard(&mut self) -> HookGuard {
        let (guard, task_guard) = oneshot::channel();
        self.task_guards.push(task_guard);
        HookGuard {
            guard,
            _done: self.done_transmitter.clone(),
        }
    }

    /// Releases the hook threads and waits up to `timeout` for them to exit.
    /// Returns false on timeout.
    pub fn stop(mut self, timeout: Duration) -> bool {
        self.task_guards.clear();
        self.done_transmitter = None;
        match self.done_receiver.recv_timeout(timeout) {
            Err(RecvTimeoutError::Disconnected) | Ok(()) => true,
            Err(RecvTimeoutError::Timeout) => false,
        }
    }
}

/// Held by a hook thread; the thread must return once `is_released` is true.
#[derive(Debug)]
pub struct HookGuard {
    guard: oneshot::Sender<()>,
    _done: Option<mpsc::Sender<()>>,
}

impl HookGuard {
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.guard.is_closed()
    }
}

/// Owns the key source and the tracker fed by it.
pub struct HookListener {
    source: Box<dyn KeySource>,
    tracker: Arc<ModifierChordTracker>,
    hook: Mutex<Option<Hook>>,
    stop_timeout: Duration,
}

impl HookListener {
    pub fn new(source: impl KeySource + 'static, tracker: ModifierChordTracker) -> Self {
        Self {
            source: Box::new(source),
            tracker: Arc::new(tracker),
            hook: Mutex::new(None),
            stop_timeout: STOP_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_stop_timeout(mut self, stop_timeout: Duration) -> Self {
        self.stop_timeout = stop_timeout;
        self
    }

    /// Installs the hook. Calling it again while running does nothing.
    ///
    /// # Errors
    ///
    /// Returns the source's error when the hook cannot be registered.
    pub fn start(&self) -> Error {
        let mut hook = self.lock();
        if hook.is_some() {
            tracing::debug!("Keyboard listener already running");
            return Ok(());
        }
        let handler: Arc<dyn KeyHandler> = self.tracker.clone();
        match self.source.install(handler) {
            Ok(installed) => {
                *hook = Some(installed);
                tracing::info!("Keyboard listener started");
                Ok(())
            }
            Err(err) => {
                tracing::error!("Failed to start keyboard listener: {}", err);
                Err(err)
            }
        }
    }

    /// Unregisters the hook, waiting at most the stop timeout, then clears
    /// the tracker state.
    pub fn stop(&self) {
        let Some(hook) = self.lock().take() else {
            return;
        };
        if hook.stop(self.stop_timeout) {
            tracing::info!("Keyboard listener stopped");
        } else {
            tracing::warn!(
                "Keyboard listener did not stop within {:?}, continuing",
                self.stop_timeout
            );
        }
        self.tracker.reset_state();
    }

    pub fn reset_state(&self) {
        self.tracker.reset_state();
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.lock().is_some()
    }

    #[must_use]
    pub fn held(&self) -> HeldModifiers {
        self.tracker.held()
    }

    #[must_use]
    pub fn tracker(&self) -> &ModifierChordTracker {
        &self.tracker
    }

    fn lock(&self) -> MutexGuard<'_, Option<Hook>> {
        self.hook.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for HookListener {
    fn drop(&mut self) {
        self.stop();
    }
}
