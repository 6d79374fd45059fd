//! Per-state hooks.
//!
//! Each [`StateKind`] maps to a [`Habit`]: `on_enter` and `on_exit` run when
//! the kind changes, `on_update` runs instead when a transition keeps the kind
//! and reports whether the running behavior restarts, resumes or is not
//! supported at all, and `run` builds the behavior the running task executes.

mod passive;

pub(crate) use passive::tether;

use creature_core::{
    CreatureState, Desire, EnvironmentDelta, FocusPurpose, LogLevel, PassiveCommand, PeerMessage,
    StateKind, Stimulus,
};
use tracing::debug;

use crate::behaviors::{self, Node};
use crate::brain::{Brain, Timer};
use crate::species::Capabilities;

use self::passive::passive_habit;

/// Outcome of a transition that keeps the state kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Update {
    /// The kind never transitions to itself.
    Unsupported,
    /// The new state's behavior starts from scratch.
    Restart,
    /// The running behavior carries on into the new state.
    Resume,
}

pub(crate) struct Habit {
    pub on_enter: fn(&mut Brain),
    pub on_exit: fn(&mut Brain, &CreatureState),
    pub on_update: fn(&mut Brain, &CreatureState) -> Update,
    pub run: fn(&CreatureState, Capabilities) -> Option<Node>,
}

pub(crate) fn habit(kind: StateKind) -> &'static Habit {
    match kind {
        StateKind::PassiveCommand => &PASSIVE_COMMAND,
        StateKind::Investigate => &INVESTIGATE,
        StateKind::Pair => &PAIR,
        StateKind::CharacterFocus => &CHARACTER_FOCUS,
        StateKind::Execute => &EXECUTE,
        StateKind::Faint => &FAINT,
        StateKind::Override => &OVERRIDE,
    }
}

static PASSIVE_COMMAND: Habit = Habit {
    on_enter: update_follow_offensive,
    on_exit: nothing,
    on_update: reaffirm_passive,
    run: run_passive,
};

static INVESTIGATE: Habit = Habit {
    on_enter: start_investigating,
    on_exit: stop_investigating,
    on_update: restart_investigation,
    run: run_investigate,
};

static PAIR: Habit = Habit {
    on_enter: begin_pairing,
    on_exit: end_pairing,
    on_update: unsupported,
    run: run_pair,
};

static CHARACTER_FOCUS: Habit = Habit {
    on_enter: take_focus,
    on_exit: drop_focus,
    on_update: unsupported,
    run: run_focus,
};

static EXECUTE: Habit = Habit {
    on_enter: nothing_on_enter,
    on_exit: halt,
    on_update: extend_execute,
    run: run_execute,
};

static FAINT: Habit = Habit {
    on_enter: collapse,
    on_exit: recover,
    on_update: supported,
    run: run_faint,
};

static OVERRIDE: Habit = Habit {
    on_enter: halt_on_enter,
    on_exit: nothing,
    on_update: supported,
    run: run_nothing,
};

// ===== shared =====

fn nothing(_: &mut Brain, _: &CreatureState) {}

fn nothing_on_enter(_: &mut Brain) {}

fn supported(_: &mut Brain, _: &CreatureState) -> Update {
    Update::Restart
}

fn unsupported(_: &mut Brain, _: &CreatureState) -> Update {
    Update::Unsupported
}

fn halt(brain: &mut Brain, _: &CreatureState) {
    brain.body().halt();
}

fn halt_on_enter(brain: &mut Brain) {
    brain.body().halt();
}

fn run_nothing(_: &CreatureState, _: Capabilities) -> Option<Node> {
    None
}

// ===== passive command =====

/// Looks for a fight as soon as a follow directive turns offensive.
fn update_follow_offensive(brain: &mut Brain) {
    let CreatureState::PassiveCommand(PassiveCommand::Follow(directive)) = brain.state() else {
        return;
    };
    if !directive.offense.is_offensive() {
        return;
    }
    brain.refresh_body();
    let found = brain.capabilities().find_focus(brain.body());
    if let Some(focus) = found {
        brain.try_update_state(EnvironmentDelta::AddFocus(focus), LogLevel::Debug);
    }
}

fn reaffirm_passive(brain: &mut Brain, _: &CreatureState) -> Update {
    update_follow_offensive(brain);
    Update::Restart
}

fn run_passive(state: &CreatureState, _: Capabilities) -> Option<Node> {
    let passive = state.passive()?;
    Some((passive_habit(passive.kind()).run)(passive))
}

// ===== investigate =====

fn start_investigating(brain: &mut Brain) {
    let Some(point) = brain.state().investigation() else {
        return;
    };
    let distance = brain.position().distance(point);
    let body = brain.body();
    let seconds = body
        .env()
        .config()
        .investigation_timeout(distance, body.species().speed);
    brain.start_timer(
        Timer::InvestigationTimeout,
        seconds,
        EnvironmentDelta::ClearInvestigation.into(),
    );
}

fn stop_investigating(brain: &mut Brain, _: &CreatureState) {
    brain.stop_timer(Timer::InvestigationTimeout);
}

/// A nearer point resets the give-up timer.
fn restart_investigation(brain: &mut Brain, old: &CreatureState) -> Update {
    stop_investigating(brain, old);
    start_investigating(brain);
    Update::Restart
}

fn run_investigate(state: &CreatureState, _: Capabilities) -> Option<Node> {
    let CreatureState::Investigate { point, passive } = state else {
        return None;
    };
    Some(behaviors::restrict(behaviors::investigate(*point), *passive))
}

// ===== pair =====

fn begin_pairing(brain: &mut Brain) {
    let body = brain.body_mut();
    body.remember_pairing();
    body.halt();
}

/// Releases the initiator once the subject stops pairing.
fn end_pairing(brain: &mut Brain, old: &CreatureState) {
    let CreatureState::Pair { initiator, .. } = old else {
        return;
    };
    let from = brain.id();
    brain
        .body_mut()
        .send(*initiator, PeerMessage::EndPairToInitiator { from });
}

fn run_pair(state: &CreatureState, _: Capabilities) -> Option<Node> {
    let CreatureState::Pair { initiator, .. } = state else {
        return None;
    };
    Some(behaviors::be_courted(*initiator))
}

// ===== character focus =====

/// Rallies the team when a rallying species starts a fight.
fn take_focus(brain: &mut Brain) {
    let Some(focus) = brain.state().focus().copied() else {
        return;
    };
    if focus.purpose != FocusPurpose::Engage || !brain.body().species().rallies {
        return;
    }
    if let Some(last_seen) = brain.body().position_of(focus.target) {
        debug!(creature = %brain.id(), target = %focus.target, "rallying team");
        brain.body_mut().broadcast(Desire {
            target: focus.target,
            last_seen,
        });
    }
}

/// Releases the subject when a courting creature stops focusing on it.
fn drop_focus(brain: &mut Brain, old: &CreatureState) {
    let Some(focus) = old.focus() else {
        return;
    };
    if focus.purpose == FocusPurpose::Pair {
        let from = brain.id();
        brain
            .body_mut()
            .send(focus.target, PeerMessage::EndPairToSubject { from });
    }
}

fn run_focus(state: &CreatureState, capabilities: Capabilities) -> Option<Node> {
    let CreatureState::CharacterFocus { focus, passive } = state else {
        return None;
    };
    Some(behaviors::focused(capabilities, *focus, *passive))
}

// ===== execute =====

/// Plans chained behind the running one leave it running.
fn extend_execute(brain: &mut Brain, old: &CreatureState) -> Update {
    match (old, brain.state()) {
        (CreatureState::Execute(earlier), CreatureState::Execute(now)) if now.extends(earlier) => {
            Update::Resume
        }
        _ => Update::Restart,
    }
}

fn run_execute(state: &CreatureState, _: Capabilities) -> Option<Node> {
    let CreatureState::Execute(command) = state else {
        return None;
    };
    command.current().map(|plan| plan.instantiate())
}

// ===== faint =====

fn collapse(brain: &mut Brain) {
    brain.body().halt();
    if let Some(seconds) = brain.body().species().faint_recovery {
        brain.start_timer(
            Timer::FaintRecovery,
            seconds,
            Stimulus::end_state(StateKind::Faint),
        );
    }
}

fn recover(brain: &mut Brain, _: &CreatureState) {
    brain.stop_timer(Timer::FaintRecovery);
}

fn run_faint(_: &CreatureState, _: Capabilities) -> Option<Node> {
    Some(behaviors::lie_still())
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn override_runs_nothing_and_every_other_kind_runs_something() {
        let capabilities = Capabilities::of(creature_content::SpeciesKind::Predator);
        let states = [
            CreatureState::roam(),
            CreatureState::Investigate {
                point: creature_core::Point::new(1.0, 1.0),
                passive: PassiveCommand::Roam,
            },
            CreatureState::Pair {
                initiator: creature_core::EntityId(2),
                passive: PassiveCommand::Roam,
            },
            CreatureState::CharacterFocus {
                focus: creature_core::Focus::engage(creature_core::EntityId(3)),
                passive: PassiveCommand::Roam,
            },
            CreatureState::Faint,
            CreatureState::Override {
                controller: creature_core::EntityId(9),
                suspended: Box::new(CreatureState::roam()),
            },
        ];
        for state in states {
            let runs = (habit(state.kind()).run)(&state, capabilities).is_some();
            assert_eq!(runs, state.kind() != StateKind::Override, "{}", state.kind());
        }
    }

    #[test]
    fn every_kind_has_a_habit() {
        for kind in StateKind::iter() {
            let _ = habit(kind);
        }
    }
}
