//! The pure decision function.
//!
//! [`Will::decide`] maps the current state and one [`Senses`] value to either
//! the next state or a [`Rejection`]. Each stimulus first proposes a
//! candidate state, then the priority model judges it: a candidate either
//! escalates (its kind strictly outranks the current one) or relinquishes an
//! explicit level that must cover the current kind.
//!
//! Nothing here mutates anything; applying an accepted state is the
//! orchestrator's job.

use crate::command::{Command, ExecuteCommand, Offense, PassiveCommand};
use crate::env::Env;
use crate::error::{Misuse, Rejection};
use crate::priority::{self, StateKind};
use crate::senses::{
    Desire, EnvironmentDelta, Feedback, Hint, OverrideDelta, PeerMessage, Senses, Snapshot,
    Stimulus,
};
use crate::state::{CreatureState, Focus, FocusPurpose};
use crate::types::EntityId;

/// A proposed next state and how it claims the right to replace the current one.
#[derive(Debug)]
struct Candidate {
    state: CreatureState,
    relinquished: Option<StateKind>,
}

impl Candidate {
    fn escalate(state: CreatureState) -> Self {
        Self {
            state,
            relinquished: None,
        }
    }

    fn relinquish(level: StateKind, state: CreatureState) -> Self {
        Self {
            state,
            relinquished: Some(level),
        }
    }
}

type Proposal = Result<Candidate, Rejection>;

/// Decision function bound to the world it reads.
#[derive(Clone, Copy, Debug)]
pub struct Will<'a> {
    env: &'a Env,
}

impl<'a> Will<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }

    /// Decides the state that follows `old` given `senses`.
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] explaining why the stimulus was refused. A
    /// rejected stimulus leaves the creature in `old`.
    pub fn decide(&self, old: &CreatureState, senses: &Senses) -> Result<CreatureState, Rejection> {
        let candidate = self.propose(old, senses)?;
        let from = old.kind();
        let to = candidate.state.kind();

        if priority::permits(from, to, candidate.relinquished) {
            Ok(candidate.state)
        } else {
            Err(match candidate.relinquished {
                Some(relinquished) => Rejection::Insufficient { from, relinquished },
                None => Rejection::Outranked { from, to },
            })
        }
    }

    fn propose(&self, old: &CreatureState, senses: &Senses) -> Proposal {
        let snapshot = &senses.snapshot;
        match &senses.stimulus {
            Stimulus::Nothing => Err(Rejection::NoChange),
            Stimulus::Override(delta) => override_delta(old, *delta),
            Stimulus::Faint => Ok(faint(old)),
            Stimulus::Command(command) => command_delta(old, command, snapshot),
            Stimulus::Hint(hint) => hint_delta(old, *hint, snapshot),
            Stimulus::Peer(message) => peer_delta(old, *message, snapshot),
            Stimulus::Desire(desire) => self.desire_delta(old, desire, snapshot),
            Stimulus::Environment(delta) => environment_delta(old, *delta, snapshot),
            Stimulus::Feedback(Feedback::EndState(kind)) => end_state(old, *kind),
        }
    }

    fn desire_delta(&self, old: &CreatureState, desire: &Desire, snapshot: &Snapshot) -> Proposal {
        refuse_self(desire.target, snapshot)?;
        let passive = retained(old);

        if self.env.can_see(snapshot.position, desire.target) {
            focusable(old)?;
            return Ok(Candidate::escalate(CreatureState::CharacterFocus {
                focus: Focus::engage(desire.target),
                passive,
            }));
        }

        match old {
            CreatureState::Investigate { point, passive } => {
                let here = snapshot.position;
                if here.distance_squared(desire.last_seen) < here.distance_squared(*point) {
                    Ok(Candidate::relinquish(
                        StateKind::Investigate,
                        CreatureState::Investigate {
                            point: desire.last_seen,
                            passive: *passive,
                        },
                    ))
                } else {
                    Err(Rejection::InvestigatingSomethingMoreImportant)
                }
            }
            _ => Ok(Candidate::escalate(CreatureState::Investigate {
                point: desire.last_seen,
                passive,
            })),
        }
    }
}

/// The standing command carried into a focus-type state.
fn retained(old: &CreatureState) -> PassiveCommand {
    old.passive().copied().unwrap_or_default()
}

fn refuse_self(target: EntityId, snapshot: &Snapshot) -> Result<(), Rejection> {
    if target == snapshot.me {
        Err(Rejection::TargetIsSelf)
    } else {
        Ok(())
    }
}

/// Busy creatures and creatures that already have a focus cannot take a new one.
fn focusable(old: &CreatureState) -> Result<(), Rejection> {
    if old.focus().is_some() {
        Err(Rejection::AlreadyFocused)
    } else if old.is_busy() {
        Err(Rejection::Busy {
            current: old.kind(),
        })
    } else {
        Ok(())
    }
}

fn override_delta(old: &CreatureState, delta: OverrideDelta) -> Proposal {
    match (delta, old) {
        (OverrideDelta::Seize { .. }, CreatureState::Override { controller, .. }) => {
            Err(Misuse::NestedOverride {
                controller: *controller,
            }
            .into())
        }
        (OverrideDelta::Seize { controller }, _) => Ok(Candidate::relinquish(
            StateKind::Override,
            CreatureState::Override {
                controller,
                suspended: Box::new(old.clone()),
            },
        )),
        (OverrideDelta::Release, CreatureState::Override { suspended, .. }) => Ok(
            Candidate::relinquish(StateKind::Override, suspended.as_ref().clone()),
        ),
        (OverrideDelta::Release, _) => Err(Misuse::NotOverridden.into()),
    }
}

/// Fainting always succeeds; under an override it replaces the suspended state.
fn faint(old: &CreatureState) -> Candidate {
    match old {
        CreatureState::Override { controller, .. } => Candidate::relinquish(
            StateKind::Override,
            CreatureState::Override {
                controller: *controller,
                suspended: Box::new(CreatureState::Faint),
            },
        ),
        _ => Candidate::relinquish(StateKind::Faint, CreatureState::Faint),
    }
}

fn command_delta(old: &CreatureState, command: &Command, snapshot: &Snapshot) -> Proposal {
    if let Command::Follow(directive) = command {
        refuse_self(directive.target, snapshot)?;
    }

    let passive = match command {
        Command::Execute(incoming) => return Ok(execute(old, incoming)),
        Command::Roam => PassiveCommand::Roam,
        Command::Follow(directive) => PassiveCommand::Follow(*directive),
        Command::Station(point) => PassiveCommand::Station(*point),
    };

    let candidate = match (old, passive) {
        (CreatureState::Execute(_), _) => {
            Candidate::relinquish(StateKind::Execute, CreatureState::PassiveCommand(passive))
        }
        (CreatureState::Faint, PassiveCommand::Roam) => {
            Candidate::relinquish(StateKind::Faint, CreatureState::roam())
        }
        (CreatureState::PassiveCommand(_), PassiveCommand::Roam) => {
            Candidate::relinquish(StateKind::PassiveCommand, CreatureState::roam())
        }
        _ => Candidate::relinquish(
            StateKind::CharacterFocus,
            CreatureState::PassiveCommand(passive),
        ),
    };
    Ok(candidate)
}

/// Merges an execute directive into whatever is running.
fn execute(old: &CreatureState, incoming: &ExecuteCommand) -> Candidate {
    let return_to = incoming
        .return_to
        .or_else(|| old.follow_directive().copied());
    let plans = match old {
        CreatureState::Execute(active) => active.plans.clone().merge(incoming.plans.clone()),
        _ => incoming.plans.clone(),
    };
    Candidate::relinquish(
        StateKind::Execute,
        CreatureState::Execute(ExecuteCommand { plans, return_to }),
    )
}

fn hint_delta(old: &CreatureState, hint: Hint, snapshot: &Snapshot) -> Proposal {
    if !snapshot.species.can_attack {
        return Err(Rejection::CannotAttack);
    }
    let directive = match (old, hint) {
        (CreatureState::PassiveCommand(PassiveCommand::Follow(directive)), _) => directive,
        // Standing down also calls off a fight picked while following.
        (
            CreatureState::CharacterFocus {
                focus,
                passive: PassiveCommand::Follow(directive),
            },
            Hint::StandDown,
        ) if focus.purpose == FocusPurpose::Engage => {
            return Ok(Candidate::relinquish(
                StateKind::CharacterFocus,
                CreatureState::PassiveCommand(PassiveCommand::Follow(
                    directive.with_offense(Offense::Passive),
                )),
            ));
        }
        _ => return Err(Rejection::NotFollowing),
    };

    let offense = match hint {
        Hint::Offensive if directive.offense == Offense::Seeking => Offense::Passive,
        Hint::Offensive => Offense::Seeking,
        Hint::Target(target) => {
            refuse_self(target, snapshot)?;
            if directive.offense == Offense::Targeting(target) {
                Offense::Passive
            } else {
                Offense::Targeting(target)
            }
        }
        Hint::StandDown => Offense::Passive,
    };

    Ok(Candidate::relinquish(
        StateKind::PassiveCommand,
        CreatureState::PassiveCommand(PassiveCommand::Follow(directive.with_offense(offense))),
    ))
}

fn peer_delta(old: &CreatureState, message: PeerMessage, snapshot: &Snapshot) -> Proposal {
    match message {
        PeerMessage::PairRequest { from } => {
            refuse_self(from, snapshot)?;
            Ok(Candidate::escalate(CreatureState::Pair {
                initiator: from,
                passive: retained(old),
            }))
        }
        PeerMessage::EndPairToSubject { from } => match old {
            CreatureState::Pair { initiator, passive } if *initiator == from => Ok(
                Candidate::relinquish(StateKind::Pair, CreatureState::PassiveCommand(*passive)),
            ),
            _ => Err(Rejection::NotPairedWith { requester: from }),
        },
        PeerMessage::EndPairToInitiator { from } => match old {
            CreatureState::CharacterFocus { focus, passive } if focus.target == from => {
                Ok(Candidate::relinquish(
                    StateKind::CharacterFocus,
                    CreatureState::PassiveCommand(*passive),
                ))
            }
            CreatureState::CharacterFocus { focus, .. } => Err(Rejection::FocusedElsewhere {
                target: focus.target,
                requester: from,
            }),
            _ => Err(Rejection::NotFocused),
        },
    }
}

fn environment_delta(old: &CreatureState, delta: EnvironmentDelta, snapshot: &Snapshot) -> Proposal {
    match delta {
        EnvironmentDelta::AddFocus(focus) => {
            refuse_self(focus.target, snapshot)?;
            focusable(old)?;
            Ok(Candidate::escalate(CreatureState::CharacterFocus {
                focus,
                passive: retained(old),
            }))
        }
        EnvironmentDelta::RemoveFocus => match old {
            CreatureState::CharacterFocus { passive, .. } => Ok(Candidate::relinquish(
                StateKind::CharacterFocus,
                CreatureState::PassiveCommand(*passive),
            )),
            _ => Err(Rejection::NotFocused),
        },
        EnvironmentDelta::ClearInvestigation => match old {
            CreatureState::Investigate { passive, .. } => Ok(Candidate::relinquish(
                StateKind::Investigate,
                CreatureState::PassiveCommand(*passive),
            )),
            _ => Err(Rejection::NotInvestigating),
        },
    }
}

/// Natural successor of a state whose running behavior finished.
fn end_state(old: &CreatureState, ended: StateKind) -> Proposal {
    let current = old.kind();
    if ended != current {
        return Err(Rejection::StaleEndState { ended, current });
    }

    let next = match old {
        CreatureState::PassiveCommand(_) | CreatureState::Faint => CreatureState::roam(),
        CreatureState::Investigate { passive, .. }
        | CreatureState::Pair { passive, .. }
        | CreatureState::CharacterFocus { passive, .. } => CreatureState::PassiveCommand(*passive),
        CreatureState::Execute(command) => match command.plans.clone().advance() {
            Some(plans) => CreatureState::Execute(ExecuteCommand {
                plans,
                return_to: command.return_to,
            }),
            None => CreatureState::PassiveCommand(command.fallback()),
        },
        // Overrides run nothing, so they never end on their own.
        CreatureState::Override { .. } => return Err(Rejection::NoChange),
    };
    Ok(Candidate::relinquish(current, next))
}
