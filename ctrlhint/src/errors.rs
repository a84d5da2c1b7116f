use thiserror::Error;

macro_rules! return_on_error {
    ($a: expr) => {
        match $a {
            Ok(value) => value,
            Err(err) => {
                tracing::error!("Returning due to error: {}", HintError::from(err));
                return;
            }
        }
    };
}

macro_rules! exit_on_error {
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

pub(crate) use exit_on_error;
pub(crate) use return_on_error;

pub type Result<T> = std::result::Result<T, HintError>;
pub type Error = std::result::Result<(), HintError>;

#[derive(Debug, Error)]
pub enum HintError {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),
    #[error("RON parse error: {0}.")]
    RonError(#[from] ron::error::SpannedError),
    #[error("RON serialization error: {0}.")]
    RonSerializeError(#[from] ron::Error),
    #[error("XDG error: {0}.")]
    XdgBaseDirError(#[from] xdg::BaseDirectoriesError),
    #[error("{0}")]
    CoreError(#[from] ctrlhint_core::errors::HintError),

    #[error("Invalid config: {0}.")]
    InvalidConfig(String),
    #[error("Unknown appearance preset `{0}`.")]
    UnknownPreset(String),
}
