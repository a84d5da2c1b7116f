use serde::{Deserialize, Serialize};

use crate::{
    config::command::utils::denormalize_function::DenormalizeCommandFunction,
    errors::Error,
    worker::{self, Worker},
};

use super::{Command, NormalizedCommand};

inventory::submit! {DenormalizeCommandFunction::new::<Kill>()}

/// Stops the daemon.
#[derive(Debug, Clone, PartialEq, Hash, Eq, Serialize, Deserialize)]
pub struct Kill;

impl Command for Kill {
    fn normalize(&self) -> NormalizedCommand {
        NormalizedCommand::from_command(self)
    }

    fn denormalize(generalized: &NormalizedCommand) -> Option<Box<Self>> {
        generalized.to_command().map(Box::new)
    }

    fn execute(&self, worker: &mut Worker) -> Error {
        worker.status = worker::Status::Kill;
        Ok(())
    }

    fn get_name(&self) -> &'static str {
        "Kill"
    }
}
