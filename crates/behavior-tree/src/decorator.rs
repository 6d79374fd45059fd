//! Decorator behavior nodes.
//!
//! Decorators wrap a single child behavior and modify its result or execution:
//! [`Guard`] aborts when a condition stops holding, [`Repeat`] restarts a
//! freshly built child and [`Delay`] is the one-shot timed wait.

use crate::{Behavior, Poll, Status, Wait};

/// Aborts its child as soon as a condition stops holding.
///
/// # Semantics
///
/// - The condition is checked **before** every resumption of the child
/// - If it fails, the guard returns `Failure` and the child is never resumed again
/// - Otherwise the child's result is passed through unchanged
///
/// This is the single-target wrapper: the condition typically checks that
/// the target the child is working on still exists.
pub struct Guard<C: ?Sized> {
    child: Box<dyn Behavior<C>>,
    condition: Box<dyn Fn(&C) -> bool + Send>,
    aborted: bool,
}

impl<C: ?Sized> Guard<C> {
    /// Creates a new guard around `child`.
    pub fn new(
        child: Box<dyn Behavior<C>>,
        condition: impl Fn(&C) -> bool + Send + 'static,
    ) -> Self {
        Self {
            child,
            condition: Box::new(condition),
            aborted: false,
        }
    }

    /// Returns `true` if the guard tripped.
    pub fn aborted(&self) -> bool {
        self.aborted
    }
}

impl<C: ?Sized> Behavior<C> for Guard<C> {
    fn resume(&mut self, ctx: &mut C) -> Poll {
        if self.aborted || !(self.condition)(ctx) {
            self.aborted = true;
            return Poll::FAILURE;
        }
        self.child.resume(ctx)
    }
}

/// Repeats a freshly built child until it fails.
///
/// # Semantics
///
/// - A new child is built from the factory for every iteration
/// - When an iteration succeeds, the repeat suspends until the next frame
///   before starting the next one, so a child that finishes instantly can
///   never spin forever inside one resumption
/// - When an iteration fails, the repeat returns `Failure`
/// - With a limit, the repeat returns `Success` after that many iterations
pub struct Repeat<C: ?Sized> {
    factory: Box<dyn FnMut() -> Box<dyn Behavior<C>> + Send>,
    current: Option<Box<dyn Behavior<C>>>,
    remaining: Option<u32>,
}

impl<C: ?Sized> Repeat<C> {
    /// Repeats forever (until the child fails or the task is stopped).
    pub fn forever(factory: impl FnMut() -> Box<dyn Behavior<C>> + Send + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            current: None,
            remaining: None,
        }
    }

    /// Repeats at most `times` iterations.
    pub fn times(
        times: u32,
        factory: impl FnMut() -> Box<dyn Behavior<C>> + Send + 'static,
    ) -> Self {
        Self {
            factory: Box::new(factory),
            current: None,
            remaining: Some(times),
        }
    }
}

impl<C: ?Sized> Behavior<C> for Repeat<C> {
    fn resume(&mut self, ctx: &mut C) -> Poll {
        if self.remaining == Some(0) {
            return Poll::SUCCESS;
        }

        let child = self.current.get_or_insert_with(|| (self.factory)());
        match child.resume(ctx) {
            Poll::Pending(wait) => Poll::Pending(wait),
            Poll::Ready(Status::Failure) => {
                self.current = None;
                Poll::FAILURE
            }
            Poll::Ready(Status::Success) => {
                self.current = None;
                if let Some(remaining) = self.remaining.as_mut() {
                    *remaining -= 1;
                    if *remaining == 0 {
                        return Poll::SUCCESS;
                    }
                }
                Poll::Pending(Wait::NextFrame)
            }
        }
    }
}

/// Suspends for a fixed number of seconds, then succeeds.
#[derive(Debug, Clone, Copy)]
pub struct Delay {
    seconds: f32,
    elapsed: bool,
}

impl Delay {
    pub fn new(seconds: f32) -> Self {
        Self {
            seconds,
            elapsed: false,
        }
    }
}

impl<C: ?Sized> Behavior<C> for Delay {
    fn resume(&mut self, _ctx: &mut C) -> Poll {
        if self.elapsed {
            return Poll::SUCCESS;
        }
        self.elapsed = true;
        Poll::Pending(Wait::Seconds(self.seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FromFn;

    struct TestContext {
        value: i32,
        target_alive: bool,
    }

    fn increment() -> Box<dyn Behavior<TestContext>> {
        Box::new(FromFn::new(|ctx: &mut TestContext| {
            ctx.value += 1;
            Poll::SUCCESS
        }))
    }

    fn fail_and_increment() -> Box<dyn Behavior<TestContext>> {
        Box::new(FromFn::new(|ctx: &mut TestContext| {
            ctx.value += 1;
            Poll::FAILURE
        }))
    }

    fn pending_forever() -> Box<dyn Behavior<TestContext>> {
        Box::new(FromFn::new(|ctx: &mut TestContext| {
            ctx.value += 1;
            Poll::Pending(Wait::NextFrame)
        }))
    }

    #[test]
    fn guard_passes_through_while_condition_holds() {
        let mut guard = Guard::new(pending_forever(), |ctx: &TestContext| ctx.target_alive);

        let mut ctx = TestContext {
            value: 0,
            target_alive: true,
        };
        assert_eq!(guard.resume(&mut ctx), Poll::Pending(Wait::NextFrame));
        assert_eq!(guard.resume(&mut ctx), Poll::Pending(Wait::NextFrame));
        assert_eq!(ctx.value, 2);
    }

    #[test]
    fn guard_aborts_when_target_disappears() {
        let mut guard = Guard::new(pending_forever(), |ctx: &TestContext| ctx.target_alive);

        let mut ctx = TestContext {
            value: 0,
            target_alive: true,
        };
        guard.resume(&mut ctx);
        ctx.target_alive = false;
        assert_eq!(guard.resume(&mut ctx), Poll::FAILURE);
        assert!(guard.aborted());

        // Stays aborted even if the condition recovers
        ctx.target_alive = true;
        assert_eq!(guard.resume(&mut ctx), Poll::FAILURE);
        assert_eq!(ctx.value, 1);
    }

    #[test]
    fn repeat_yields_between_iterations() {
        let mut repeat = Repeat::forever(increment);

        let mut ctx = TestContext {
            value: 0,
            target_alive: true,
        };
        assert_eq!(repeat.resume(&mut ctx), Poll::Pending(Wait::NextFrame));
        assert_eq!(repeat.resume(&mut ctx), Poll::Pending(Wait::NextFrame));
        assert_eq!(ctx.value, 2);
    }

    #[test]
    fn repeat_times_stops_after_limit() {
        let mut repeat = Repeat::times(2, increment);

        let mut ctx = TestContext {
            value: 0,
            target_alive: true,
        };
        assert_eq!(repeat.resume(&mut ctx), Poll::Pending(Wait::NextFrame));
        assert_eq!(repeat.resume(&mut ctx), Poll::SUCCESS);
        assert_eq!(repeat.resume(&mut ctx), Poll::SUCCESS);
        assert_eq!(ctx.value, 2);
    }

    #[test]
    fn repeat_propagates_failure() {
        let mut repeat = Repeat::forever(fail_and_increment);

        let mut ctx = TestContext {
            value: 0,
            target_alive: true,
        };
        assert_eq!(repeat.resume(&mut ctx), Poll::FAILURE);
    }

    #[test]
    fn delay_waits_once() {
        let mut delay = Delay::new(1.5);
        let mut ctx = TestContext {
            value: 0,
            target_alive: true,
        };
        assert_eq!(
            Behavior::<TestContext>::resume(&mut delay, &mut ctx),
            Poll::Pending(Wait::Seconds(1.5))
        );
        assert_eq!(
            Behavior::<TestContext>::resume(&mut delay, &mut ctx),
            Poll::SUCCESS
        );
    }
}
