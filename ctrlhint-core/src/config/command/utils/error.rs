#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CommandError {
    #[error("No registered command matches `{0}`.")]
    UnmatchingCommand(String),
}
