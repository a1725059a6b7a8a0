//! Command dispatch
//!
//! Resolves a raw command buffer to an [`Operation`] and executes it:
//!
//! 1. decode the [`CommandEnvelope`] header
//! 2. resolve the object tag to an [`EntityKind`]
//! 3. resolve the action tag to an [`Action`]
//! 4. ask the entity kind for the operation, which decodes its own payload
//! 5. execute against the collection
//!
//! Any failure in steps 1-4 means nothing is executed.

use tracing::{debug, warn};

use crate::codec::CommandEnvelope;
use crate::collection::{Collection, IdAllocator};
use crate::error::Result;
use crate::operation::{Action, DeletePolicy, Operation};
use crate::record::EntityKind;
use crate::report::{CommandReport, CommandSummary};
use crate::source::RawCommand;

/// Turns raw commands into executed operations.
///
/// Owns the identity counter so that creates of every kind draw from one
/// sequence, in the order commands are dispatched.
#[derive(Debug, Default)]
pub struct Dispatcher {
    ids: IdAllocator,
    policy: DeletePolicy,
}

impl Dispatcher {
    pub fn new(policy: DeletePolicy) -> Self {
        Self {
            ids: IdAllocator::new(),
            policy,
        }
    }

    pub fn ids(&self) -> &IdAllocator {
        &self.ids
    }

    pub fn policy(&self) -> DeletePolicy {
        self.policy
    }

    /// Decode the operation a command describes without executing it
    pub fn resolve(&self, command: &RawCommand) -> Result<Operation> {
        let envelope: CommandEnvelope = command.encoding.decode(&command.bytes)?;
        Self::resolve_envelope(&envelope, command)
    }

    fn resolve_envelope(envelope: &CommandEnvelope, command: &RawCommand) -> Result<Operation> {
        let kind: EntityKind = envelope.object.parse()?;
        let action: Action = envelope.action.parse()?;
        kind.operation(action, command.encoding, &command.bytes)
    }

    /// Decode and execute one command against the collection
    pub fn dispatch(&mut self, command: &RawCommand, collection: &mut Collection) -> CommandReport {
        let envelope: CommandEnvelope = match command.encoding.decode(&command.bytes) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(source = %command.name, error = %e, "undecodable command");
                return CommandReport::new(&command.name, None, Err(e));
            }
        };

        let mut summary = CommandSummary::new(&envelope.action, &envelope.object);

        let operation = match Self::resolve_envelope(&envelope, command) {
            Ok(operation) => operation,
            Err(e) => {
                warn!(source = %command.name, error = %e, "command rejected");
                return CommandReport::new(&command.name, Some(summary), Err(e));
            }
        };

        summary.id = operation.target().map(str::to_string);
        debug!(
            source = %command.name,
            action = %operation.action(),
            kind = %operation.kind(),
            id = ?summary.id,
            "dispatching command"
        );

        let result = operation.execute(collection, &mut self.ids, self.policy);
        match &result {
            Ok(outcome) => summary.id = Some(outcome.id().to_string()),
            Err(e) => warn!(source = %command.name, error = %e, "command failed"),
        }

        CommandReport::new(&command.name, Some(summary), result)
    }
}
