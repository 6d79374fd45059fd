//! Species capability sets.
//!
//! A species plugs into the generic [`Brain`](crate::Brain) as data: a table
//! of function pointers selected by [`SpeciesKind`]. There is no per-species
//! brain type.

use std::fmt;

use creature_content::SpeciesKind;
use creature_core::{ActionKind, Body, Focus, FocusPurpose, Offense, PassiveCommand, SpeciesConfig};

use crate::behaviors::{self, Node};

/// What a species can do and how it picks fights.
#[derive(Clone, Copy)]
pub struct Capabilities {
    kind: SpeciesKind,
    find_focus: fn(&Body) -> Option<Focus>,
    focused_behavior: fn(Focus) -> Node,
    actions: &'static [ActionKind],
    can_tame: fn(&SpeciesConfig) -> bool,
}

impl Capabilities {
    pub fn of(kind: SpeciesKind) -> Self {
        match kind {
            SpeciesKind::Predator => PREDATOR,
            SpeciesKind::Grazer => GRAZER,
            SpeciesKind::Companion => COMPANION,
        }
    }

    pub fn kind(&self) -> SpeciesKind {
        self.kind
    }

    /// Scans the surroundings for something worth focusing on.
    pub fn find_focus(&self, body: &Body) -> Option<Focus> {
        (self.find_focus)(body)
    }

    /// The behavior run while focused.
    pub fn focused_behavior(&self, focus: Focus) -> Node {
        (self.focused_behavior)(focus)
    }

    pub fn actions(&self) -> &'static [ActionKind] {
        self.actions
    }

    pub fn can_perform(&self, action: ActionKind) -> bool {
        self.actions.contains(&action)
    }

    /// Whether players may command this species.
    pub fn can_tame(&self, config: &SpeciesConfig) -> bool {
        (self.can_tame)(config)
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("kind", &self.kind)
            .field("actions", &self.actions)
            .finish_non_exhaustive()
    }
}

const PREDATOR: Capabilities = Capabilities {
    kind: SpeciesKind::Predator,
    find_focus: nearest_hostile,
    focused_behavior: pursue,
    actions: &[ActionKind::Strike],
    can_tame: never,
};

const GRAZER: Capabilities = Capabilities {
    kind: SpeciesKind::Grazer,
    find_focus: willing_partner,
    focused_behavior: pursue,
    actions: &[ActionKind::Gather],
    can_tame: never,
};

const COMPANION: Capabilities = Capabilities {
    kind: SpeciesKind::Companion,
    find_focus: guard_leader,
    focused_behavior: pursue,
    actions: &[ActionKind::Strike, ActionKind::Gather],
    can_tame: configured,
};

fn never(_: &SpeciesConfig) -> bool {
    false
}

fn configured(config: &SpeciesConfig) -> bool {
    config.can_tame
}

fn pursue(focus: Focus) -> Node {
    match focus.purpose {
        FocusPurpose::Engage => behaviors::engage(focus.target),
        FocusPurpose::Pair => behaviors::court(focus.target),
    }
}

fn nearest_hostile(body: &Body) -> Option<Focus> {
    if !body.species().can_attack {
        return None;
    }
    body.env()
        .hostiles_near(body.id(), body.position(), body.species().sense_radius)
        .into_iter()
        .find(|&other| body.can_see(other))
        .map(Focus::engage)
}

/// A visible teammate, once enough time has passed since the last pairing.
fn willing_partner(body: &Body) -> Option<Focus> {
    if !body.ready_to_pair() {
        return None;
    }
    let team = body.env().team();
    body.env()
        .terrain()
        .nearby(body.position(), body.species().sense_radius)
        .into_iter()
        .find(|&other| {
            other != body.id() && team.same_team(body.id(), other) && body.can_see(other)
        })
        .map(Focus::pair)
}

/// Fights on behalf of whoever the companion follows, as its offense allows.
fn guard_leader(body: &Body) -> Option<Focus> {
    let Some(PassiveCommand::Follow(directive)) = body.state().passive().copied() else {
        return None;
    };
    match directive.offense {
        Offense::Passive => None,
        Offense::Targeting(target) => body.can_see(target).then(|| Focus::engage(target)),
        Offense::Seeking => body
            .env()
            .hostiles_near(body.id(), body.position(), body.species().sense_radius)
            .into_iter()
            .filter(|&other| other != directive.target)
            .find(|&other| body.can_see(other))
            .map(Focus::engage),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use creature_core::{
        CreatureConfig, CreatureState, EntityId, FollowDirective, Point, SpeciesConfig, TeamId,
    };

    use super::*;
    use crate::sandbox::{Cover, Placement, SandboxWorld};

    const ME: EntityId = EntityId(1);
    const MATE: EntityId = EntityId(2);
    const STRANGER: EntityId = EntityId(3);
    const LURKER: EntityId = EntityId(4);

    fn body(species: SpeciesConfig, state: CreatureState) -> Body {
        let world = Arc::new(SandboxWorld::new(5));
        world.add_creature(ME, Placement::at(Point::ORIGIN).on_team(TeamId(1)));
        world.add_creature(MATE, Placement::at(Point::new(1.0, 0.0)).on_team(TeamId(1)));
        world.add_creature(STRANGER, Placement::at(Point::new(4.0, 0.0)));
        world.add_creature(LURKER, Placement::at(Point::new(-2.0, 0.0)));
        world.add_cover(Cover::new(Point::new(-2.0, 0.0), 1.0));

        let mut body = Body::new(ME, world.env(CreatureConfig::default()), species);
        body.refresh(&state, Point::ORIGIN);
        body
    }

    #[test]
    fn predators_pick_the_nearest_visible_stranger() {
        let hunter = body(SpeciesConfig::new().attacking(), CreatureState::roam());
        assert_eq!(PREDATOR.find_focus(&hunter), Some(Focus::engage(STRANGER)));

        let harmless = body(SpeciesConfig::new(), CreatureState::roam());
        assert_eq!(PREDATOR.find_focus(&harmless), None);
    }

    #[test]
    fn grazers_court_teammates_only_when_ready() {
        let ready = body(SpeciesConfig::new().with_pair_interval(10.0), CreatureState::roam());
        assert_eq!(GRAZER.find_focus(&ready), Some(Focus::pair(MATE)));

        let mut recent = body(SpeciesConfig::new().with_pair_interval(10.0), CreatureState::roam());
        recent.remember_pairing();
        assert_eq!(GRAZER.find_focus(&recent), None);
    }

    #[test]
    fn companions_fight_only_when_told_to() {
        let leader = FollowDirective::new(MATE);
        let calm = CreatureState::PassiveCommand(PassiveCommand::Follow(leader));
        let species = SpeciesConfig::new().attacking().tameable();
        assert_eq!(COMPANION.find_focus(&body(species.clone(), calm)), None);

        let seeking = CreatureState::PassiveCommand(PassiveCommand::Follow(
            leader.with_offense(Offense::Seeking),
        ));
        assert_eq!(
            COMPANION.find_focus(&body(species.clone(), seeking)),
            Some(Focus::engage(STRANGER))
        );

        // Concealed targets stay out of reach even when named.
        let targeting = CreatureState::PassiveCommand(PassiveCommand::Follow(
            leader.with_offense(Offense::Targeting(LURKER)),
        ));
        assert_eq!(COMPANION.find_focus(&body(species, targeting)), None);
    }

    #[test]
    fn only_configured_companions_are_tameable() {
        let tameable = SpeciesConfig::new().tameable();
        assert!(COMPANION.can_tame(&tameable));
        assert!(!COMPANION.can_tame(&SpeciesConfig::new()));
        assert!(!PREDATOR.can_tame(&tameable));
        assert!(Capabilities::of(SpeciesKind::Grazer).can_perform(ActionKind::Gather));
        assert!(!Capabilities::of(SpeciesKind::Grazer).can_perform(ActionKind::Strike));
    }
}
