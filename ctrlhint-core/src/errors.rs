use thiserror::Error;

macro_rules! r#return {
    ($a: expr) => {
        match $a {
            Ok(value) => value,
            Err(err) => {
                tracing::error!("{}", HintError::from(err));
                return;
            }
        }
    };
}

macro_rules! log {
    ($a: expr) => {
        match $a {
            Ok(value) => value,
            Err(err) => tracing::error!("{}", HintError::from(err)),
        }
    };
}

macro_rules! exit {
    ($a: expr) => {
        match $a {
            Ok(value) => value,
            Err(err) => {
                tracing::error!("Exiting due to error: {}", HintError::from(err));
                std::process::exit(1);
            }
        }
    };
}

pub(crate) use exit;
pub(crate) use log;
pub(crate) use r#return;

pub type Result<T> = std::result::Result<T, HintError>;
pub type Error = std::result::Result<(), HintError>;

#[derive(Debug, Error)]
pub enum HintError {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),
    #[error("Nix errno: {0}.")]
    NixErrno(#[from] nix::errno::Errno),

    #[error("No readable keyboard device found.")]
    KeyboardNotFound,
    #[error("Chord event receiver has been dropped.")]
    SinkClosed,
    #[error("Key handler panicked while processing {0}.")]
    HandlerPanicked(String),
}
