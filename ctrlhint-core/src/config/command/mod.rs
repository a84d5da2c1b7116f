mod kill;
mod reload;
mod reset_state;

pub mod utils;

use crate::errors::Error;
use crate::worker::Worker;
use self::utils::{
    denormalize_function::DenormalizeCommandFunction, error::CommandError,
};

pub use self::utils::normalized_command::NormalizedCommand;
pub use self::{kill::Kill, reload::Reload, reset_state::ResetState};

inventory::collect!(DenormalizeCommandFunction);

pub trait Command {
    fn normalize(&self) -> NormalizedCommand;

    fn denormalize(generalized: &NormalizedCommand) -> Option<Box<Self>>
    where
        Self: Sized;

    /// # Errors
    ///
    /// Errors when the worker cannot carry the command out.
    fn execute(&self, worker: &mut Worker) -> Error;

    fn get_name(&self) -> &'static str;
}

/// Finds the registered command matching `normalized_command`.
///
/// # Errors
///
/// Errors when no registered command accepts the input.
pub fn denormalize(normalized_command: &NormalizedCommand) -> Result<Box<dyn Command>, CommandError> {
    for denormalizer in inventory::iter::<DenormalizeCommandFunction> {
        if let Some(denormalized_command) = (denormalizer.0)(normalized_command) {
            return Ok(denormalized_command);
        }
    }
    Err(CommandError::UnmatchingCommand(normalized_command.to_string()))
}
