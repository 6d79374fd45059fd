//! Runtime orchestration for creature behavior.
//!
//! This crate turns the pure decisions of `creature-core` into running
//! behavior. A [`Brain`] owns one creature's state, applies stimuli through
//! the decision function and keeps exactly one running behavior (plus an
//! optional background scanner) in step with it. A [`Colony`] ticks many
//! brains against a shared world and routes what they emit.
//!
//! Modules are organized by responsibility:
//! - [`brain`] hosts the per-creature orchestrator and its timers
//! - `habit` maps each state kind to its enter/exit/update hooks and behavior
//! - [`behaviors`] and [`plans`] build the behavior nodes creatures run
//! - [`species`] provides capability sets selected by species kind
//! - [`colony`] drives many brains and routes peer messages and broadcasts
//! - [`sandbox`] is a self-contained world used by tests and the simulator
pub mod behaviors;
pub mod brain;
pub mod colony;
pub mod plans;
pub mod sandbox;
pub mod species;

mod error;
mod habit;

pub use behaviors::Node;
pub use brain::{Brain, Timer};
pub use colony::Colony;
pub use error::{Result, RuntimeError};
pub use sandbox::{Cover, Placement, SandboxWorld};
pub use species::Capabilities;
