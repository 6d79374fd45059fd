//! Behavior nodes run by a creature's tasks.
//!
//! Every node here is built over [`Body`]: it reads the world through it,
//! steers through its locomotion shorthands and leaves stimuli and signals in
//! its outboxes. None of them touch the decision state.

use behavior_tree::builder::{delay, from_fn, guard, repeat, sequence};
use behavior_tree::{BoxedBehavior, Poll, Wait};
use creature_core::{
    ActionKind, ActionTarget, Body, EntityId, EnvironmentDelta, Focus, LogLevel, PassiveCommand,
    PeerMessage, Point,
};

use crate::habit;
use crate::species::Capabilities;

/// Seconds spent looking around once an investigated point is reached.
const LOOK_AROUND_SECONDS: f32 = 1.5;

/// A paired subject gives up waiting after this many pair durations.
const SUBJECT_PATIENCE: f32 = 2.0;

/// Distance multiplier on the arrival tolerance at which a courting creature asks to pair.
const COURTING_DISTANCE: f32 = 2.0;

pub type Node = BoxedBehavior<Body>;

// ===== passive commands =====

/// Wanders forever.
pub fn roam() -> Node {
    repeat(|| from_fn(|body: &mut Body| Poll::Pending(body.roam())))
}

/// Keeps up with `target`; fails once the target is gone.
pub fn follow(target: EntityId) -> Node {
    from_fn(move |body: &mut Body| match body.position_of(target) {
        Some(at) => Poll::Pending(body.follow(at)),
        None => Poll::FAILURE,
    })
}

/// Walks to `point` and holds it.
pub fn station(point: Point) -> Node {
    from_fn(move |body: &mut Body| {
        if body.has_arrived(point) {
            body.halt();
            Poll::Pending(Wait::Seconds(1.0))
        } else {
            Poll::Pending(body.approach_then_idle(point))
        }
    })
}

/// Walks to `point` and succeeds once within the arrival tolerance.
pub fn go_to(point: Point) -> Node {
    from_fn(move |body: &mut Body| {
        if body.has_arrived(point) {
            body.halt();
            Poll::SUCCESS
        } else {
            Poll::Pending(body.approach_then_idle(point))
        }
    })
}

/// Aborts `child` once the creature strays beyond its sense radius from the
/// tether point of the standing command it interrupted.
///
/// The tether is re-evaluated on every resumption because followed leaders
/// move. Roaming never restricts.
pub fn restrict(child: Node, passive: PassiveCommand) -> Node {
    guard(child, move |body: &Body| match habit::tether(&passive, body) {
        Some(point) => body.position().within(point, body.species().sense_radius),
        None => true,
    })
}

// ===== focus-type states =====

/// Walks to a remembered point, looks around, then succeeds.
pub fn investigate(point: Point) -> Node {
    sequence(vec![go_to(point), delay(LOOK_AROUND_SECONDS)])
}

/// Chases `target` and strikes whenever it is in range and the cooldown allows.
///
/// Fails when the target is no longer visible and succeeds when it is gone.
pub fn engage(target: EntityId) -> Node {
    let mut ready_at = 0.0_f64;
    from_fn(move |body: &mut Body| {
        let Some(at) = body.position_of(target) else {
            return Poll::SUCCESS;
        };
        if !body.can_see(target) {
            return Poll::FAILURE;
        }
        let species = body.species();
        if !body.position().within(at, species.attack_range) {
            body.move_toward(at);
            return Poll::Pending(Wait::NextPhysicsStep);
        }

        let cooldown = species.attack_cooldown;
        body.halt();
        body.face(at);
        if body.now() >= ready_at {
            body.perform(ActionKind::Strike, ActionTarget::Entity(target));
            ready_at = body.now() + f64::from(cooldown);
        }
        Poll::Pending(Wait::Seconds(cooldown))
    })
}

/// Approaches a partner, asks it to pair, then stays with it for the pair duration.
pub fn court(partner: EntityId) -> Node {
    let approach = from_fn(move |body: &mut Body| {
        let Some(at) = body.position_of(partner) else {
            return Poll::FAILURE;
        };
        let reach = body.env().config().arrival_tolerance * COURTING_DISTANCE;
        if body.position().within(at, reach) {
            body.halt();
            body.face(at);
            let me = body.id();
            body.send(partner, PeerMessage::PairRequest { from: me });
            body.remember_pairing();
            Poll::SUCCESS
        } else {
            body.move_toward(at);
            Poll::Pending(Wait::NextPhysicsStep)
        }
    });
    sequence(vec![approach, wait_once(|body| body.species().pair_duration)])
}

/// Faces the initiator until it ends the pairing, giving up after a while.
pub fn be_courted(initiator: EntityId) -> Node {
    let mut waited = 0.0_f32;
    from_fn(move |body: &mut Body| {
        let patience = body.species().pair_duration * SUBJECT_PATIENCE;
        if waited >= patience {
            return Poll::SUCCESS;
        }
        let Some(at) = body.position_of(initiator) else {
            return Poll::FAILURE;
        };
        body.halt();
        body.face(at);
        waited += 0.5;
        Poll::Pending(Wait::Seconds(0.5))
    })
}

/// Lies still.
pub fn lie_still() -> Node {
    repeat(|| {
        from_fn(|body: &mut Body| {
            body.halt();
            Poll::Pending(Wait::Seconds(1.0))
        })
    })
}

// ===== background tasks =====

/// Periodically looks for a focus and proposes it.
pub fn scanner(capabilities: Capabilities) -> Node {
    repeat(move || {
        sequence(vec![
            wait_once(|body| body.species().scan_interval),
            from_fn(move |body: &mut Body| {
                if let Some(focus) = capabilities.find_focus(body) {
                    body.post(EnvironmentDelta::AddFocus(focus), LogLevel::Silent);
                }
                Poll::SUCCESS
            }),
        ])
    })
}

/// Waits once for a duration read from the body on first resumption.
fn wait_once(seconds: fn(&Body) -> f32) -> Node {
    let mut waited = false;
    from_fn(move |body: &mut Body| {
        if waited {
            Poll::SUCCESS
        } else {
            waited = true;
            Poll::Pending(Wait::Seconds(seconds(body)))
        }
    })
}

/// Runs `then` once `seconds` have elapsed.
pub fn after<F>(seconds: f32, then: F) -> Node
where
    F: FnMut(&mut Body) + Send + 'static,
{
    let mut then = then;
    sequence(vec![
        delay(seconds),
        from_fn(move |body: &mut Body| {
            then(body);
            Poll::SUCCESS
        }),
    ])
}

/// The behavior a focus runs, tethered to the standing command it interrupted.
pub fn focused(capabilities: Capabilities, focus: Focus, passive: PassiveCommand) -> Node {
    restrict(capabilities.focused_behavior(focus), passive)
}
