//! The context every behavior node runs against.
//!
//! A [`Body`] is owned by the creature's orchestrator and refreshed before
//! each scheduler step. Behaviors read a snapshot of the decision state and
//! the world through it, steer through [`Locomotion`](crate::env::Locomotion),
//! and leave everything else (stimuli for the creature itself, messages to
//! other creatures, actions on the world) in outboxes the orchestrator drains
//! after the step.

use behavior_tree::Wait;

use crate::config::SpeciesConfig;
use crate::env::Env;
use crate::senses::{Desire, LogLevel, PeerMessage, Stimulus};
use crate::state::CreatureState;
use crate::types::{EntityId, Point};

/// Effects on the world that the creature itself cannot apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    Strike,
    Tame,
    Gather,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActionTarget {
    Entity(EntityId),
    Point(Point),
}

/// A performed action, applied by whoever owns the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Action {
    pub actor: EntityId,
    pub kind: ActionKind,
    pub target: ActionTarget,
}

/// Something a behavior asked to happen outside its own creature.
#[derive(Clone, Debug, PartialEq)]
pub enum Signal {
    Peer { to: EntityId, message: PeerMessage },
    Broadcast(Desire),
    Perform(Action),
}

/// Behavior context for one creature.
#[derive(Debug)]
pub struct Body {
    id: EntityId,
    env: Env,
    species: SpeciesConfig,
    state: CreatureState,
    position: Point,
    now: f64,
    last_paired: Option<f64>,
    posted: Vec<(Stimulus, LogLevel)>,
    signals: Vec<Signal>,
}

impl Body {
    pub fn new(id: EntityId, env: Env, species: SpeciesConfig) -> Self {
        Self {
            id,
            env,
            species,
            state: CreatureState::roam(),
            position: Point::ORIGIN,
            now: 0.0,
            last_paired: None,
            posted: Vec::new(),
            signals: Vec::new(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn species(&self) -> &SpeciesConfig {
        &self.species
    }

    /// Snapshot of the decision state as of the last refresh.
    pub fn state(&self) -> &CreatureState {
        &self.state
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Seconds since the creature spawned.
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn last_paired(&self) -> Option<f64> {
        self.last_paired
    }

    /// Whether enough time passed since the last pairing to court again.
    pub fn ready_to_pair(&self) -> bool {
        match (self.species.pair_interval, self.last_paired) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(interval), Some(at)) => self.now - at >= f64::from(interval),
        }
    }

    // ===== orchestrator side =====

    pub fn refresh(&mut self, state: &CreatureState, position: Point) {
        self.state = state.clone();
        self.position = position;
    }

    pub fn tick(&mut self, dt: f32) {
        self.now += f64::from(dt);
    }

    pub fn remember_pairing(&mut self) {
        self.last_paired = Some(self.now);
    }

    pub fn take_posted(&mut self) -> Vec<(Stimulus, LogLevel)> {
        std::mem::take(&mut self.posted)
    }

    pub fn take_signals(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.signals)
    }

    // ===== behavior side =====

    /// Queues a stimulus for this creature, processed after the current step.
    pub fn post(&mut self, stimulus: impl Into<Stimulus>, level: LogLevel) {
        self.posted.push((stimulus.into(), level));
    }

    pub fn send(&mut self, to: EntityId, message: PeerMessage) {
        self.signals.push(Signal::Peer { to, message });
    }

    /// Alerts the rest of the team about a threat.
    pub fn broadcast(&mut self, desire: Desire) {
        self.signals.push(Signal::Broadcast(desire));
    }

    pub fn perform(&mut self, kind: ActionKind, target: ActionTarget) {
        self.signals.push(Signal::Perform(Action {
            actor: self.id,
            kind,
            target,
        }));
    }

    pub fn position_of(&self, target: EntityId) -> Option<Point> {
        self.env.census().position(target)
    }

    pub fn is_alive(&self, target: EntityId) -> bool {
        self.env.census().is_alive(target)
    }

    pub fn can_see(&self, target: EntityId) -> bool {
        self.env.can_see(self.position, target)
    }

    pub fn roam(&self) -> Wait {
        self.env.locomotion().roam(self.id)
    }

    pub fn follow(&self, target: Point) -> Wait {
        self.env.locomotion().follow(self.id, target)
    }

    pub fn approach_then_idle(&self, point: Point) -> Wait {
        let tolerance = self.env.config().arrival_tolerance;
        self.env
            .locomotion()
            .approach_then_idle(self.id, point, tolerance)
    }

    pub fn move_toward(&self, point: Point) {
        self.env.locomotion().move_toward(self.id, point);
    }

    pub fn face(&self, point: Point) {
        self.env.locomotion().face(self.id, point);
    }

    pub fn halt(&self) {
        self.env.locomotion().halt(self.id);
    }

    pub fn obstacle(&self) -> Option<Point> {
        self.env.locomotion().obstacle(self.id)
    }

    /// Whether `point` is within the arrival tolerance.
    pub fn has_arrived(&self, point: Point) -> bool {
        self.position
            .within(point, self.env.config().arrival_tolerance)
    }
}
