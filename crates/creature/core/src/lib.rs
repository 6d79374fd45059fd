//! Decision core for autonomous creatures.
//!
//! Everything here is pure: given a creature's current [`CreatureState`] and
//! one [`Senses`] value, [`Will::decide`] yields the next state or a
//! [`Rejection`]. Orchestration, logging and scheduling live in the runtime
//! crate.
//!
//! # Architecture
//!
//! - [`StateKind`]: priority order over state categories, plus the transition rule
//! - [`CreatureState`] and [`Disposition`]: the state value and its derived flags
//! - [`Command`], [`PassiveCommand`], [`ExecuteCommand`]: player directives
//! - [`Stimulus`] and [`Senses`]: one input plus the snapshot it is judged against
//! - [`Env`]: collaborator traits ([`Terrain`], [`Team`], [`Census`], [`Locomotion`])
//! - [`Body`]: the context behavior nodes run against

pub mod body;
pub mod command;
pub mod config;
pub mod env;
pub mod error;
pub mod priority;
pub mod senses;
pub mod state;
pub mod types;
pub mod will;

#[cfg(test)]
pub(crate) mod testing;

pub use body::{Action, ActionKind, ActionTarget, Body, Signal};
pub use command::{
    Command, ExecuteCommand, FollowDirective, Offense, PassiveCommand, PassiveKind, Plan,
    TargetedPlan,
};
pub use config::{CreatureConfig, SpeciesConfig};
pub use env::{Census, Env, Locomotion, Team, Terrain};
pub use error::{ErrorSeverity, Misuse, Rejection};
pub use priority::{StateKind, can_transition, can_transition_to, permits};
pub use senses::{
    Desire, EnvironmentDelta, Feedback, Hint, LogLevel, OverrideDelta, PeerMessage, Senses,
    Snapshot, Stimulus,
};
pub use state::{CreatureState, Disposition, Focus, FocusPurpose};
pub use types::{EntityId, Point, TeamId};
pub use will::Will;
