use tokio::sync::mpsc;

use crate::chord::Chord;
use crate::errors::{Error, HintError};

/// Notifications produced by the chord tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChordEvent {
    Pressed(Chord),
    Released(Chord),
    SpecificKeyPressed { chord: Chord, label: String },
}

/// Receives chord notifications. Called on the hook thread, so
/// implementations must return quickly.
pub trait ChordSink: Send + Sync {
    fn chord_pressed(&self, chord: Chord) -> Error;

    fn chord_released(&self, chord: Chord) -> Error;

    fn specific_key_pressed(&self, _chord: Chord, _label: &str) -> Error {
        Ok(())
    }
}

impl ChordEvent {
    pub(crate) fn deliver(&self, sink: &dyn ChordSink) -> Error {
        match self {
            ChordEvent::Pressed(chord) => sink.chord_pressed(*chord),
            ChordEvent::Released(chord) => sink.chord_released(*chord),
            ChordEvent::SpecificKeyPressed { chord, label } => {
                sink.specific_key_pressed(*chord, label)
            }
        }
    }
}

/// Forwards every notification into an unbounded channel drained by the
/// worker.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<ChordEvent>,
}

impl ChannelSink {
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ChordEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn send(&self, event: ChordEvent) -> Error {
        self.tx.send(event).map_err(|_| HintError::SinkClosed)
    }
}

impl ChordSink for ChannelSink {
    fn chord_pressed(&self, chord: Chord) -> Error {
        self.send(ChordEvent::Pressed(chord))
    }

    fn chord_released(&self, chord: Chord) -> Error {
        self.send(ChordEvent::Released(chord))
    }

    fn specific_key_pressed(&self, chord: Chord, label: &str) -> Error {
        self.send(ChordEvent::SpecificKeyPressed {
            chord,
            label: label.to_owned(),
        })
    }
}
