mod display;
mod signals;

pub use display::HintDisplay;

use std::path::PathBuf;

use tokio::sync::mpsc;

use crate::chord::Chord;
use crate::config::HintBoard;
use crate::errors::{self, HintError};
use crate::hook::{HookListener, KeySource};
use crate::ipc::Pipe;
use crate::present::Presenter;
use crate::sink::{ChannelSink, ChordEvent};
use crate::tracker::{HeldModifiers, ModifierChordTracker};
use signals::SignalWatcher;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Status {
    Reload,
    Kill,
    Continue,
}

/// Owns the key hook, the tracker behind it and the presenter, and moves
/// chord events from one to the other.
pub struct Worker {
    board: HintBoard,
    pipe_file: PathBuf,
    listener: HookListener,
    chord_receiver: mpsc::UnboundedReceiver<ChordEvent>,
    presenter: Box<dyn Presenter>,
    display: HintDisplay,

    pub status: Status,
}

impl Worker {
    pub fn new(
        board: HintBoard,
        source: impl KeySource + 'static,
        presenter: impl Presenter + 'static,
        pipe_file: PathBuf,
    ) -> Self {
        let (sink, chord_receiver) = ChannelSink::new();
        Self {
            board,
            pipe_file,
            listener: HookListener::new(source, ModifierChordTracker::new(sink)),
            chord_receiver,
            presenter: Box::new(presenter),
            display: HintDisplay::default(),
            status: Status::Continue,
        }
    }

    /// Runs until a command or a signal ends it. Returns `Status::Kill`
    /// straight away when no key hook can be installed.
    pub async fn event_loop(mut self) -> Status {
        if self.listener.start().is_err() {
            return Status::Kill;
        }
        let mut pipe = errors::exit!(Pipe::new(self.pipe_file.clone()).await);
        let mut signals = errors::exit!(SignalWatcher::new());

        while self.status == Status::Continue {
            tokio::select! {
                Some(event) = self.chord_receiver.recv() => {
                    self.handle_event(&event);
                }
                Some(command) = pipe.get_next_command() => {
                    tracing::debug!("Received command {}", command.get_name());
                    errors::log!(command.execute(&mut self));
                }
                Some(signal) = signals.recv() => {
                    tracing::info!("Received signal {}, shutting down", signal);
                    self.status = Status::Kill;
                }
                else => break,
            };
        }

        self.listener.stop();
        self.display.hide(self.presenter.as_mut());
        self.status
    }

    pub fn handle_event(&mut self, event: &ChordEvent) {
        tracing::debug!("Chord event {:?}", event);
        self.display.apply(event, &self.board, self.presenter.as_mut());
    }

    /// Clears the tracker without release events and hides the panel.
    pub fn reset(&mut self) {
        self.listener.reset_state();
        self.display.hide(self.presenter.as_mut());
    }

    #[must_use]
    pub fn held(&self) -> HeldModifiers {
        self.listener.held()
    }

    #[must_use]
    pub fn visible(&self) -> Option<Chord> {
        self.display.visible()
    }

    #[must_use]
    pub fn listener(&self) -> &HookListener {
        &self.listener
    }
}
