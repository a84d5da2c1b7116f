use serde::{Deserialize, Serialize};

use crate::{
    config::command::utils::denormalize_function::DenormalizeCommandFunction,
    errors::Error,
    worker::{self, Worker},
};

use super::{Command, NormalizedCommand};

inventory::submit! {DenormalizeCommandFunction::new::<Reload>()}

/// Restarts the worker with a freshly loaded config.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reload;

impl Command for Reload {
    fn normalize(&self) -> NormalizedCommand {
        NormalizedCommand::from_command(self)
    }

    fn denormalize(generalized: &NormalizedCommand) -> Option<Box<Self>> {
        generalized.to_command().map(Box::new)
    }

    fn execute(&self, worker: &mut Worker) -> Error {
        worker.status = worker::Status::Reload;
        Ok(())
    }

    fn get_name(&self) -> &'static str {
        "Reload"
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Command;

    use super::Reload;

    #[test]
    fn normalize_process() {
        let normalized = Reload.normalize();
        assert_eq!(normalized.0, "Reload");
        assert_eq!(Reload::denormalize(&normalized), Some(Box::new(Reload)));
    }
}
