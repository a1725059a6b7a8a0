//! Operations applied to the collection
//!
//! One [`Operation`] is built per command by the entity kind's factories
//! (see [`crate::record::Entity`]) and consumed by [`Operation::execute`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::collection::{Collection, IdAllocator};
use crate::error::{RecordError, Result};
use crate::record::{EntityKind, Record};

/// Action named by a command envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl FromStr for Action {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "create" => Ok(Action::Create),
            "read" => Ok(Action::Read),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            other => Err(RecordError::UnknownAction(other.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a delete of an absent identity does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletePolicy {
    /// Report `NotFound`
    #[default]
    Error,
    /// Leave the collection unchanged and report success
    Ignore,
}

/// A decoded unit of work
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Full record without identity; one is assigned on execution
    Create(Record),
    Read { kind: EntityKind, id: String },
    /// Full record including the identity to replace
    Update(Record),
    Delete { kind: EntityKind, id: String },
}

impl Operation {
    pub fn action(&self) -> Action {
        match self {
            Operation::Create(_) => Action::Create,
            Operation::Read { .. } => Action::Read,
            Operation::Update(_) => Action::Update,
            Operation::Delete { .. } => Action::Delete,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Operation::Create(record) | Operation::Update(record) => record.kind(),
            Operation::Read { kind, .. } | Operation::Delete { kind, .. } => *kind,
        }
    }

    /// Identity addressed by the payload; `None` for create
    pub fn target(&self) -> Option<&str> {
        match self {
            Operation::Create(_) => None,
            Operation::Update(record) => Some(record.id()),
            Operation::Read { id, .. } | Operation::Delete { id, .. } => Some(id),
        }
    }

    /// Apply this operation to the collection.
    ///
    /// Failures leave both the collection and the allocator untouched.
    pub fn execute(
        self,
        collection: &mut Collection,
        ids: &mut IdAllocator,
        policy: DeletePolicy,
    ) -> Result<Outcome> {
        match self {
            Operation::Create(mut record) => {
                let id = ids.allocate();
                record.set_id(id.clone());
                let kind = record.kind();
                collection.append(record);
                info!(%kind, %id, "record created");
                Ok(Outcome::Created { kind, id })
            }
            Operation::Read { kind, id } => {
                let record = collection
                    .find(&id)
                    .cloned()
                    .ok_or(RecordError::NotFound { kind, id })?;
                Ok(Outcome::Read(record))
            }
            Operation::Update(record) => {
                let kind = record.kind();
                let id = record.id().to_string();
                let position = locate(collection, kind, &id)?;
                collection
                    .replace(position, record)
                    .ok_or_else(|| RecordError::NotFound { kind, id: id.clone() })?;
                info!(%kind, %id, "record updated");
                Ok(Outcome::Updated { kind, id })
            }
            Operation::Delete { kind, id } => {
                let position = match locate(collection, kind, &id) {
                    Ok(position) => position,
                    Err(_) if policy == DeletePolicy::Ignore => {
                        return Ok(Outcome::Unchanged { kind, id });
                    }
                    Err(e) => return Err(e),
                };
                let removed = collection
                    .remove_at(position)
                    .ok_or_else(|| RecordError::NotFound { kind, id: id.clone() })?;
                let kind = removed.kind();
                info!(%kind, %id, "record deleted");
                Ok(Outcome::Deleted { kind, id })
            }
        }
    }
}

/// Position of the first record with `id`, whatever its kind.
///
/// `kind` only names the object in the `NotFound` error.
fn locate(collection: &Collection, kind: EntityKind, id: &str) -> Result<usize> {
    collection.index_of(id).ok_or_else(|| RecordError::NotFound {
        kind,
        id: id.to_string(),
    })
}

/// Result of a successfully executed operation
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Created { kind: EntityKind, id: String },
    Read(Record),
    Updated { kind: EntityKind, id: String },
    Deleted { kind: EntityKind, id: String },
    /// Delete of an absent identity under [`DeletePolicy::Ignore`]
    Unchanged { kind: EntityKind, id: String },
}

impl Outcome {
    pub fn id(&self) -> &str {
        match self {
            Outcome::Read(record) => record.id(),
            Outcome::Created { id, .. }
            | Outcome::Updated { id, .. }
            | Outcome::Deleted { id, .. }
            | Outcome::Unchanged { id, .. } => id,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Created { kind, id } => write!(f, "created {} ID:{}", kind, id),
            Outcome::Read(record) => write!(f, "{}", record),
            Outcome::Updated { kind, id } => write!(f, "updated {} ID:{}", kind, id),
            Outcome::Deleted { kind, id } => write!(f, "deleted {} ID:{}", kind, id),
            Outcome::Unchanged { kind, id } => write!(f, "no {} with ID:{}, nothing deleted", kind, id),
        }
    }
}
