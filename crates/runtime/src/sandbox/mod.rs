//! A self-contained 2-D world for tests and the simulation binary.
//!
//! [`SandboxWorld`] implements every collaborator trait on one value, so a
//! colony can run against it through [`Env::from_world`]. Concealment comes
//! from circular cover zones: a creature inside cover cannot be seen by an
//! observer standing outside that cover. Steering calls only record an
//! intent; positions change when the host calls [`SandboxWorld::physics_step`].

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use behavior_tree::Wait;
use creature_core::{
    Action, ActionKind, ActionTarget, Census, CreatureConfig, EntityId, Env, Locomotion, Point,
    Team, TeamId, Terrain,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Health a creature spawns with unless told otherwise.
pub const DEFAULT_HEALTH: u32 = 30;

/// Damage dealt by one strike.
pub const STRIKE_DAMAGE: u32 = 10;

/// How far a roaming creature wanders from where it stands.
const ROAM_RADIUS: f32 = 6.0;

/// Seconds a roaming creature keeps a wander point before picking a new one.
const ROAM_RETARGET_SECONDS: f32 = 2.0;

/// Followers stop this close to whoever they follow.
const FOLLOW_DISTANCE: f32 = 1.5;

/// How far ahead `obstacle` looks along the current heading.
const LOOKAHEAD: f32 = 2.0;

/// A circular zone that hides whatever stands inside it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cover {
    pub center: Point,
    pub radius: f32,
}

impl Cover {
    pub fn new(center: Point, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, point: Point) -> bool {
        self.center.within(point, self.radius)
    }
}

/// Spawn parameters for one sandbox creature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub position: Point,
    pub team: Option<TeamId>,
    pub speed: f32,
    pub health: u32,
    pub visible: bool,
}

impl Placement {
    pub fn at(position: Point) -> Self {
        Self {
            position,
            team: None,
            speed: 4.0,
            health: DEFAULT_HEALTH,
            visible: true,
        }
    }

    pub fn on_team(mut self, team: TeamId) -> Self {
        self.team = Some(team);
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health;
        self
    }

    /// Sensed regardless of cover, like a sound source.
    pub fn invisible(mut self) -> Self {
        self.visible = false;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Intent {
    Idle,
    MoveTo(Point),
}

#[derive(Debug)]
struct Occupant {
    position: Point,
    team: Option<TeamId>,
    speed: f32,
    health: u32,
    visible: bool,
    intent: Intent,
    facing: Point,
    /// Seconds left before a roaming creature picks a new wander point.
    roam_left: f32,
}

#[derive(Debug)]
struct World {
    occupants: BTreeMap<EntityId, Occupant>,
    cover: Vec<Cover>,
    rng: StdRng,
}

impl World {
    fn alive(&self, id: EntityId) -> Option<&Occupant> {
        self.occupants.get(&id).filter(|o| o.health > 0)
    }
}

/// Shared, interior-mutable sandbox world.
#[derive(Debug)]
pub struct SandboxWorld {
    world: Mutex<World>,
}

impl SandboxWorld {
    pub fn new(seed: u64) -> Self {
        Self {
            world: Mutex::new(World {
                occupants: BTreeMap::new(),
                cover: Vec::new(),
                rng: StdRng::seed_from_u64(seed),
            }),
        }
    }

    /// Wraps a world in an [`Env`] the colony can share.
    pub fn env(self: &Arc<Self>, config: CreatureConfig) -> Env {
        Env::from_world(Arc::clone(self), config)
    }

    fn lock(&self) -> MutexGuard<'_, World> {
        self.world.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ===== host side =====

    pub fn add_creature(&self, id: EntityId, placement: Placement) {
        self.lock().occupants.insert(
            id,
            Occupant {
                position: placement.position,
                team: placement.team,
                speed: placement.speed,
                health: placement.health,
                visible: placement.visible,
                intent: Intent::Idle,
                facing: placement.position,
                roam_left: 0.0,
            },
        );
    }

    pub fn remove_creature(&self, id: EntityId) -> bool {
        self.lock().occupants.remove(&id).is_some()
    }

    pub fn add_cover(&self, cover: Cover) {
        self.lock().cover.push(cover);
    }

    pub fn set_team(&self, id: EntityId, team: Option<TeamId>) {
        if let Some(occupant) = self.lock().occupants.get_mut(&id) {
            occupant.team = team;
        }
    }

    pub fn teleport(&self, id: EntityId, to: Point) {
        if let Some(occupant) = self.lock().occupants.get_mut(&id) {
            occupant.position = to;
            occupant.intent = Intent::Idle;
        }
    }

    pub fn kill(&self, id: EntityId) {
        if let Some(occupant) = self.lock().occupants.get_mut(&id) {
            occupant.health = 0;
        }
    }

    pub fn health(&self, id: EntityId) -> Option<u32> {
        self.lock().occupants.get(&id).map(|o| o.health)
    }

    /// The point the creature last turned toward.
    pub fn facing(&self, id: EntityId) -> Option<Point> {
        self.lock().occupants.get(&id).map(|o| o.facing)
    }

    /// Whether the creature is currently steering somewhere.
    pub fn is_moving(&self, id: EntityId) -> bool {
        self.lock()
            .occupants
            .get(&id)
            .is_some_and(|o| matches!(o.intent, Intent::MoveTo(_)))
    }

    /// Moves every living creature along its intent.
    pub fn physics_step(&self, dt: f32) {
        let mut world = self.lock();
        for occupant in world.occupants.values_mut().filter(|o| o.health > 0) {
            occupant.roam_left -= dt;
            if let Intent::MoveTo(target) = occupant.intent {
                occupant.position = occupant.position.step_toward(target, occupant.speed * dt);
                if occupant.position == target {
                    occupant.intent = Intent::Idle;
                }
            }
        }
    }

    /// Applies performed actions; returns the creatures killed by them.
    pub fn apply(&self, actions: &[Action]) -> Vec<EntityId> {
        let mut world = self.lock();
        let mut killed = Vec::new();
        for action in actions {
            let Some(actor_team) = world.alive(action.actor).map(|o| o.team) else {
                continue;
            };
            match (action.kind, action.target) {
                (ActionKind::Strike, ActionTarget::Entity(target)) => {
                    if let Some(victim) = world.occupants.get_mut(&target).filter(|o| o.health > 0) {
                        victim.health = victim.health.saturating_sub(STRIKE_DAMAGE);
                        if victim.health == 0 {
                            debug!(attacker = %action.actor, victim = %target, "killed");
                            killed.push(target);
                        }
                    }
                }
                (ActionKind::Tame, ActionTarget::Entity(target)) => {
                    if let Some(tamed) = world.occupants.get_mut(&target) {
                        tamed.team = actor_team;
                    }
                }
                (kind, target) => {
                    debug!(actor = %action.actor, %kind, ?target, "action has no effect in the sandbox");
                }
            }
        }
        killed
    }

    fn steer(&self, me: EntityId, intent: Intent) {
        if let Some(occupant) = self.lock().occupants.get_mut(&me) {
            occupant.intent = intent;
        }
    }
}

impl Terrain for SandboxWorld {
    fn line_of_sight(&self, from: Point, to: Point) -> bool {
        !self
            .lock()
            .cover
            .iter()
            .any(|cover| cover.contains(to) && !cover.contains(from))
    }

    fn nearby(&self, center: Point, radius: f32) -> Vec<EntityId> {
        let world = self.lock();
        let mut found: Vec<_> = world
            .occupants
            .iter()
            .filter(|(_, o)| o.health > 0 && center.within(o.position, radius))
            .map(|(&id, o)| (id, center.distance_squared(o.position)))
            .collect();
        found.sort_by(|a, b| a.1.total_cmp(&b.1));
        found.into_iter().map(|(id, _)| id).collect()
    }
}

impl Team for SandboxWorld {
    fn team_of(&self, id: EntityId) -> Option<TeamId> {
        self.lock().occupants.get(&id).and_then(|o| o.team)
    }

    fn members(&self, team: TeamId) -> Vec<EntityId> {
        self.lock()
            .occupants
            .iter()
            .filter(|(_, o)| o.health > 0 && o.team == Some(team))
            .map(|(&id, _)| id)
            .collect()
    }
}

impl Census for SandboxWorld {
    fn position(&self, id: EntityId) -> Option<Point> {
        self.lock().alive(id).map(|o| o.position)
    }

    fn has_visual_presence(&self, id: EntityId) -> bool {
        self.lock().occupants.get(&id).is_some_and(|o| o.visible)
    }
}

impl Locomotion for SandboxWorld {
    fn roam(&self, me: EntityId) -> Wait {
        let mut world = self.lock();
        let World { occupants, rng, .. } = &mut *world;
        if let Some(occupant) = occupants.get_mut(&me) {
            let idle = occupant.intent == Intent::Idle;
            if idle || occupant.roam_left <= 0.0 {
                let dx = rng.gen_range(-ROAM_RADIUS..=ROAM_RADIUS);
                let dy = rng.gen_range(-ROAM_RADIUS..=ROAM_RADIUS);
                let target = Point::new(occupant.position.x + dx, occupant.position.y + dy);
                occupant.intent = Intent::MoveTo(target);
                occupant.roam_left = ROAM_RETARGET_SECONDS;
            }
        }
        Wait::Seconds(ROAM_RETARGET_SECONDS / 4.0)
    }

    fn follow(&self, me: EntityId, target: Point) -> Wait {
        let mut world = self.lock();
        if let Some(occupant) = world.occupants.get_mut(&me) {
            occupant.intent = if occupant.position.within(target, FOLLOW_DISTANCE) {
                Intent::Idle
            } else {
                Intent::MoveTo(target)
            };
        }
        Wait::NextFrame
    }

    fn approach_then_idle(&self, me: EntityId, point: Point, tolerance: f32) -> Wait {
        let mut world = self.lock();
        if let Some(occupant) = world.occupants.get_mut(&me) {
            occupant.intent = if occupant.position.within(point, tolerance) {
                Intent::Idle
            } else {
                Intent::MoveTo(point)
            };
        }
        Wait::NextPhysicsStep
    }

    fn move_toward(&self, me: EntityId, point: Point) {
        self.steer(me, Intent::MoveTo(point));
    }

    fn face(&self, me: EntityId, point: Point) {
        if let Some(occupant) = self.lock().occupants.get_mut(&me) {
            occupant.facing = point;
        }
    }

    fn halt(&self, me: EntityId) {
        self.steer(me, Intent::Idle);
    }

    fn obstacle(&self, me: EntityId) -> Option<Point> {
        let world = self.lock();
        let occupant = world.occupants.get(&me)?;
        let Intent::MoveTo(target) = occupant.intent else {
            return None;
        };
        let ahead = occupant.position.step_toward(target, LOOKAHEAD);
        world
            .cover
            .iter()
            .find(|cover| cover.contains(ahead) && !cover.contains(occupant.position))
            .map(|cover| cover.center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: EntityId = EntityId(1);
    const B: EntityId = EntityId(2);

    fn world() -> SandboxWorld {
        let world = SandboxWorld::new(7);
        world.add_creature(A, Placement::at(Point::ORIGIN).on_team(TeamId(1)));
        world.add_creature(B, Placement::at(Point::new(5.0, 0.0)));
        world
    }

    #[test]
    fn cover_hides_only_from_outside() {
        let world = world();
        world.add_cover(Cover::new(Point::new(5.0, 0.0), 1.0));

        assert!(!world.line_of_sight(Point::ORIGIN, Point::new(5.0, 0.0)));
        assert!(world.line_of_sight(Point::new(5.5, 0.0), Point::new(5.0, 0.0)));
        assert!(world.line_of_sight(Point::new(5.0, 0.0), Point::ORIGIN));
    }

    #[test]
    fn physics_step_moves_toward_intent() {
        let world = world();
        world.move_toward(A, Point::new(10.0, 0.0));
        world.physics_step(0.5);

        let at = world.position(A).unwrap();
        assert!((at.x - 2.0).abs() < 1e-4 && at.y == 0.0, "{at}");
        assert!(world.is_moving(A));
    }

    #[test]
    fn approach_idles_once_within_tolerance() {
        let world = world();
        assert_eq!(
            world.approach_then_idle(A, Point::new(0.5, 0.0), 0.75),
            Wait::NextPhysicsStep
        );
        assert!(!world.is_moving(A));
    }

    #[test]
    fn strikes_kill_and_tame_switches_team() {
        let world = world();
        let strike = Action {
            actor: A,
            kind: ActionKind::Strike,
            target: ActionTarget::Entity(B),
        };
        assert!(world.apply(&[strike, strike]).is_empty());
        assert_eq!(world.apply(&[strike]), vec![B]);
        assert!(!world.is_alive(B));
        assert!(world.nearby(Point::ORIGIN, 10.0) == vec![A]);

        let c = EntityId(3);
        world.add_creature(c, Placement::at(Point::new(1.0, 0.0)));
        world.apply(&[Action {
            actor: A,
            kind: ActionKind::Tame,
            target: ActionTarget::Entity(c),
        }]);
        assert!(world.same_team(A, c));
        assert_eq!(world.members(TeamId(1)), vec![A, c]);
    }

    #[test]
    fn roaming_is_seeded() {
        let left = world();
        let right = world();
        left.roam(A);
        right.roam(A);
        left.physics_step(1.0);
        right.physics_step(1.0);

        assert_eq!(left.position(A), right.position(A));
        assert_ne!(left.position(A), Some(Point::ORIGIN));
    }

    #[test]
    fn obstacle_reports_cover_ahead() {
        let world = world();
        world.add_cover(Cover::new(Point::new(1.5, 0.0), 1.0));
        world.move_toward(A, Point::new(10.0, 0.0));

        assert_eq!(world.obstacle(A), Some(Point::new(1.5, 0.0)));
        world.halt(A);
        assert_eq!(world.obstacle(A), None);
    }
}
