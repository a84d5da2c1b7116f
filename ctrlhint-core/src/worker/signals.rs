use signal_hook::consts::signal::{SIGINT, SIGTERM};
use signal_hook::iterator::{Handle, Signals};
use tokio::sync::mpsc;

use crate::errors::Result;

/// Forwards SIGINT and SIGTERM into the worker loop.
pub struct SignalWatcher {
    receiver: mpsc::UnboundedReceiver<i32>,
    handle: Handle,
}

impl SignalWatcher {
    /// # Errors
    ///
    /// Errors when the signal handlers cannot be registered.
    pub fn new() -> Result<Self> {
        let mut signals = Signals::new([SIGINT, SIGTERM])?;
        let handle = signals.handle();
        let (transmitter, receiver) = mpsc::unbounded_channel();
        std::thread::Builder::new()
            .name("signals".to_owned())
            .spawn(move || {
                for signal in signals.forever() {
                    if transmitter.send(signal).is_err() {
                        return;
                    }
                }
            })?;
        Ok(Self { receiver, handle })
    }

    pub async fn recv(&mut self) -> Option<i32> {
        self.receiver.recv().await
    }
}

impl Drop for SignalWatcher {
    fn drop(&mut self) {
        self.handle.close();
    }
}
