//! Dispatcher: hand a finished parse to its command's action.

use tracing::debug;

use crate::error::Result;
use crate::parsed::ParsedCommand;
use crate::runner::RunOutcome;
use crate::spec::CommandSpec;

/// Invoke the command's action with the parse result and await it to
/// completion. Runs only after a fully successful parse; a command without
/// an action is a successful no-op and the parse result travels back to
/// the caller instead.
pub(crate) async fn dispatch(spec: &CommandSpec, parsed: ParsedCommand) -> Result<RunOutcome> {
    match &spec.action {
        Some(action) => {
            debug!(command = %spec.name, "dispatching action");
            action(parsed).await?;
            debug!(command = %spec.name, "action completed");
            Ok(RunOutcome::Ran {
                command: spec.name.clone(),
            })
        }
        None => {
            debug!(command = %spec.name, "no action declared, returning parse result");
            Ok(RunOutcome::NoAction {
                command: spec.name.clone(),
                parsed,
            })
        }
    }
}
