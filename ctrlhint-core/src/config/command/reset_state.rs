use serde::{Deserialize, Serialize};

use crate::{
    config::command::utils::denormalize_function::DenormalizeCommandFunction,
    errors::Error, worker::Worker,
};

use super::{Command, NormalizedCommand};

inventory::submit! {DenormalizeCommandFunction::new::<ResetState>()}

/// Forgets all held modifiers and hides the panel. Used after a key-up was
/// missed, e.g. when a grab swallowed it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
pub struct ResetState;

impl Command for ResetState {
    fn normalize(&self) -> NormalizedCommand {
        NormalizedCommand::from_command(self)
    }

    fn denormalize(generalized: &NormalizedCommand) -> Option<Box<Self>> {
        generalized.to_command().map(Box::new)
    }

    fn execute(&self, worker: &mut Worker) -> Error {
        worker.reset();
        Ok(())
    }

    fn get_name(&self) -> &'static str {
        "ResetState"
    }
}
