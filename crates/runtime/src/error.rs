//! Errors surfaced by the colony API.
//!
//! Rejected stimuli are not errors here: a creature refusing a stimulus is
//! normal and reported as `Ok(false)`. These cover addressing mistakes made by
//! the host.
use creature_core::{Command, EntityId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("no creature {0} in the colony")]
    UnknownCreature(EntityId),

    #[error("creature {0} already exists")]
    DuplicateCreature(EntityId),

    #[error("species `{0}` is not in the catalog")]
    UnknownSpecies(String),

    #[error("{species} cannot be given {command} commands")]
    NotTameable {
        species: String,
        command: &'static str,
    },
}

impl RuntimeError {
    pub(crate) fn not_tameable(species: &str, command: &Command) -> Self {
        Self::NotTameable {
            species: species.to_owned(),
            command: command.name(),
        }
    }
}
