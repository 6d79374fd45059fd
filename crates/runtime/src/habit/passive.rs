//! Behaviors shared by every state that retains a standing command.

use creature_core::{Body, PassiveCommand, PassiveKind, Point};

use crate::behaviors::{self, Node};

pub(crate) struct PassiveHabit {
    /// Behavior run while the command is the active state.
    pub run: fn(&PassiveCommand) -> Node,
    /// Point that focus-type behaviors must stay near while this command is retained.
    pub tether: fn(&PassiveCommand, &Body) -> Option<Point>,
}

pub(crate) fn passive_habit(kind: PassiveKind) -> &'static PassiveHabit {
    match kind {
        PassiveKind::Roam => &ROAM,
        PassiveKind::Follow => &FOLLOW,
        PassiveKind::Station => &STATION,
    }
}

/// The tether point of `passive`, looked up in the table.
pub(crate) fn tether(passive: &PassiveCommand, body: &Body) -> Option<Point> {
    (passive_habit(passive.kind()).tether)(passive, body)
}

static ROAM: PassiveHabit = PassiveHabit {
    run: run_roam,
    tether: untethered,
};

static FOLLOW: PassiveHabit = PassiveHabit {
    run: run_follow,
    tether: leader,
};

static STATION: PassiveHabit = PassiveHabit {
    run: run_station,
    tether: post,
};

fn run_roam(_: &PassiveCommand) -> Node {
    behaviors::roam()
}

fn run_follow(passive: &PassiveCommand) -> Node {
    match passive {
        PassiveCommand::Follow(directive) => behaviors::follow(directive.target),
        _ => behaviors::roam(),
    }
}

fn run_station(passive: &PassiveCommand) -> Node {
    match passive {
        PassiveCommand::Station(point) => behaviors::station(*point),
        _ => behaviors::roam(),
    }
}

fn untethered(_: &PassiveCommand, _: &Body) -> Option<Point> {
    None
}

fn leader(passive: &PassiveCommand, body: &Body) -> Option<Point> {
    passive
        .follow_directive()
        .and_then(|directive| body.position_of(directive.target))
}

fn post(passive: &PassiveCommand, _: &Body) -> Option<Point> {
    match passive {
        PassiveCommand::Station(point) => Some(*point),
        _ => None,
    }
}
