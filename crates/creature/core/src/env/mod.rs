//! Collaborators the decision logic and behaviors read the world through.
//!
//! Each concern is a trait object so that the runtime can plug in a real
//! world or the sandbox. [`Env`] bundles them; it is cheap to clone and is
//! handed to the decision function and to every behavior context.
mod census;
mod locomotion;
mod team;
mod terrain;

use std::fmt;
use std::sync::Arc;

pub use census::Census;
pub use locomotion::Locomotion;
pub use team::Team;
pub use terrain::Terrain;

use crate::config::CreatureConfig;
use crate::types::{EntityId, Point};

/// Aggregates the collaborator traits plus global configuration.
#[derive(Clone)]
pub struct Env {
    terrain: Arc<dyn Terrain>,
    team: Arc<dyn Team>,
    census: Arc<dyn Census>,
    locomotion: Arc<dyn Locomotion>,
    config: Arc<CreatureConfig>,
}

impl Env {
    pub fn new(
        terrain: Arc<dyn Terrain>,
        team: Arc<dyn Team>,
        census: Arc<dyn Census>,
        locomotion: Arc<dyn Locomotion>,
        config: CreatureConfig,
    ) -> Self {
        Self {
            terrain,
            team,
            census,
            locomotion,
            config: Arc::new(config),
        }
    }

    /// Wires every collaborator to one value implementing all of them.
    pub fn from_world<W>(world: Arc<W>, config: CreatureConfig) -> Self
    where
        W: Terrain + Team + Census + Locomotion + 'static,
    {
        Self::new(world.clone(), world.clone(), world.clone(), world, config)
    }

    pub fn terrain(&self) -> &dyn Terrain {
        self.terrain.as_ref()
    }

    pub fn team(&self) -> &dyn Team {
        self.team.as_ref()
    }

    pub fn census(&self) -> &dyn Census {
        self.census.as_ref()
    }

    pub fn locomotion(&self) -> &dyn Locomotion {
        self.locomotion.as_ref()
    }

    pub fn config(&self) -> &CreatureConfig {
        &self.config
    }

    /// Whether an observer at `observer` can see `target`.
    ///
    /// - Dead or unknown targets are never visible.
    /// - Targets outside the neighborhood radius are never visible.
    /// - Targets without a visual presence are always visible inside it.
    /// - Otherwise the terrain decides.
    pub fn can_see(&self, observer: Point, target: EntityId) -> bool {
        let Some(position) = self.census.position(target) else {
            return false;
        };
        if !observer.within(position, self.config.neighborhood_radius) {
            return false;
        }
        if !self.census.has_visual_presence(target) {
            return true;
        }
        self.terrain.line_of_sight(observer, position)
    }

    /// Living creatures near `center` that are not on `me`'s team.
    pub fn hostiles_near(&self, me: EntityId, center: Point, radius: f32) -> Vec<EntityId> {
        self.terrain
            .nearby(center, radius)
            .into_iter()
            .filter(|&other| other != me && !self.team.same_team(me, other))
            .collect()
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Env")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
