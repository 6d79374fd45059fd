//! Suspendable behavior nodes for cooperative, tick-driven creature AI.
//!
//! A behavior node is a resumable computation. Every call to
//! [`Behavior::resume`] runs synchronously until the node either finishes
//! ([`Poll::Ready`]) or voluntarily suspends with a [`Wait`] instruction
//! ([`Poll::Pending`]). A [`Task`] owns one root node and decides, once per
//! scheduler step, whether the pending wait has elapsed.
//!
//! - **Deterministic**: no threads, no wall clock; time only advances through [`Clock`]
//! - **Explicit suspension**: waits are return values, never hidden yields
//! - **Zero dependencies**: Pure Rust with no external crates
//!
//! # Architecture
//!
//! - [`Behavior`]: Core trait for all nodes
//! - [`Status`], [`Poll`], [`Wait`]: Outcome of a single resumption
//! - Composite nodes: [`Sequence`]
//! - Decorator nodes: [`Guard`], [`Repeat`], [`Delay`]
//! - [`Recipe`] and [`TargetedBehavior`]: lazily instantiated nodes
//! - [`Queue`]: directive queue with replace/chain merge semantics
//! - [`Task`]: the cooperative unit a scheduler starts, advances and stops

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod decorator;
pub mod queue;
pub mod recipe;
pub mod status;
pub mod task;

// Re-export core types for ergonomic API
pub use behavior::{Behavior, BoxedBehavior, FromFn};
pub use composite::Sequence;
pub use decorator::{Delay, Guard, Repeat};
pub use queue::{MergePolicy, Queue};
pub use recipe::{Recipe, TargetedBehavior};
pub use status::{Poll, Status, Wait};
pub use task::{Clock, Completion, Phase, Task};
