//! In-memory collaborators for unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use behavior_tree::Wait;

use crate::config::{CreatureConfig, SpeciesConfig};
use crate::env::{Census, Env, Locomotion, Team, Terrain};
use crate::senses::{Senses, Snapshot, Stimulus};
use crate::types::{EntityId, Point, TeamId};

pub(crate) const ME: EntityId = EntityId(1);

#[derive(Default)]
pub(crate) struct StubWorld {
    positions: HashMap<EntityId, Point>,
    teams: HashMap<EntityId, TeamId>,
    concealed: HashSet<EntityId>,
    intangible: HashSet<EntityId>,
}

impl StubWorld {
    pub(crate) fn new() -> Self {
        Self::default().with_creature(ME, Point::ORIGIN)
    }

    pub(crate) fn with_creature(mut self, id: EntityId, at: Point) -> Self {
        self.positions.insert(id, at);
        self
    }

    pub(crate) fn on_team(mut self, id: EntityId, team: TeamId) -> Self {
        self.teams.insert(id, team);
        self
    }

    /// Hidden behind cover from every observer.
    pub(crate) fn concealed(mut self, id: EntityId) -> Self {
        self.concealed.insert(id);
        self
    }

    /// No visual presence: never concealed.
    pub(crate) fn intangible(mut self, id: EntityId) -> Self {
        self.intangible.insert(id);
        self
    }

    pub(crate) fn into_env(self) -> Env {
        Env::from_world(Arc::new(self), CreatureConfig::default())
    }
}

impl Terrain for StubWorld {
    fn line_of_sight(&self, _from: Point, to: Point) -> bool {
        !self
            .positions
            .iter()
            .any(|(id, at)| *at == to && self.concealed.contains(id))
    }

    fn nearby(&self, center: Point, radius: f32) -> Vec<EntityId> {
        let mut found: Vec<_> = self
            .positions
            .iter()
            .filter(|(_, at)| center.within(**at, radius))
            .map(|(id, at)| (*id, center.distance_squared(*at)))
            .collect();
        found.sort_by(|a, b| a.1.total_cmp(&b.1));
        found.into_iter().map(|(id, _)| id).collect()
    }
}

impl Team for StubWorld {
    fn team_of(&self, id: EntityId) -> Option<TeamId> {
        self.teams.get(&id).copied()
    }

    fn members(&self, team: TeamId) -> Vec<EntityId> {
        self.teams
            .iter()
            .filter(|(_, t)| **t == team)
            .map(|(id, _)| *id)
            .collect()
    }
}

impl Census for StubWorld {
    fn position(&self, id: EntityId) -> Option<Point> {
        self.positions.get(&id).copied()
    }

    fn has_visual_presence(&self, id: EntityId) -> bool {
        !self.intangible.contains(&id)
    }
}

impl Locomotion for StubWorld {
    fn roam(&self, _me: EntityId) -> Wait {
        Wait::Seconds(1.0)
    }

    fn follow(&self, _me: EntityId, _target: Point) -> Wait {
        Wait::NextPhysicsStep
    }

    fn approach_then_idle(&self, _me: EntityId, _point: Point, _tolerance: f32) -> Wait {
        Wait::NextPhysicsStep
    }

    fn move_toward(&self, _me: EntityId, _point: Point) {}

    fn face(&self, _me: EntityId, _point: Point) {}

    fn halt(&self, _me: EntityId) {}

    fn obstacle(&self, _me: EntityId) -> Option<Point> {
        None
    }
}

pub(crate) fn snapshot(species: SpeciesConfig) -> Snapshot {
    Snapshot {
        me: ME,
        position: Point::ORIGIN,
        team: None,
        species,
    }
}

pub(crate) fn senses(stimulus: impl Into<Stimulus>) -> Senses {
    Senses::new(stimulus, snapshot(SpeciesConfig::new().attacking()))
}
