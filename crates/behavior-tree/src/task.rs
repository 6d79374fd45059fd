//! Cooperative task: one root behavior node plus its pending wait.
//!
//! A scheduler owns one [`Task`] per concurrent activity and advances each of
//! them once per step with a [`Clock`]. Stopping a task is immediate and
//! total; only natural completion fires the completion callback.

use crate::{Behavior, Poll, Status, Wait};

/// Which kind of step the scheduler is performing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Regular frame step. Simulated time advances only here.
    Frame,
    /// Fixed physics step.
    Physics,
}

/// Time information handed to [`Task::advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clock {
    pub dt: f32,
    pub phase: Phase,
}

impl Clock {
    pub const fn frame(dt: f32) -> Self {
        Self {
            dt,
            phase: Phase::Frame,
        }
    }

    pub const fn physics() -> Self {
        Self {
            dt: 0.0,
            phase: Phase::Physics,
        }
    }
}

/// Callback invoked when a task's node finishes on its own.
pub type Completion<C> = Box<dyn FnOnce(Status, &mut C) + Send>;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Pending {
    /// Resume on the next advance of any phase.
    Immediately,
    Seconds(f32),
    NextFrame,
    NextPhysicsStep,
}

impl From<Wait> for Pending {
    fn from(wait: Wait) -> Self {
        match wait {
            Wait::Seconds(seconds) => Pending::Seconds(seconds),
            Wait::NextFrame => Pending::NextFrame,
            Wait::NextPhysicsStep => Pending::NextPhysicsStep,
        }
    }
}

/// A cooperatively scheduled behavior.
///
/// At most one node is owned at a time: [`Task::start`] stops the previous
/// node before installing the new one.
pub struct Task<C: ?Sized> {
    node: Option<Box<dyn Behavior<C>>>,
    pending: Pending,
    on_complete: Option<Completion<C>>,
    started: u64,
}

impl<C: ?Sized> Default for Task<C> {
    fn default() -> Self {
        Self::idle()
    }
}

impl<C: ?Sized> Task<C> {
    /// A task that is not running anything.
    pub fn idle() -> Self {
        Self {
            node: None,
            pending: Pending::Immediately,
            on_complete: None,
            started: 0,
        }
    }

    /// Starts `node`, stopping whatever was running before.
    ///
    /// The node is first resumed on the next [`Task::advance`].
    pub fn start(&mut self, node: Box<dyn Behavior<C>>, on_complete: Option<Completion<C>>) {
        self.stop();
        self.node = Some(node);
        self.pending = Pending::Immediately;
        self.on_complete = on_complete;
        self.started += 1;
    }

    /// Cancels the running node without invoking the completion callback.
    ///
    /// Returns `true` if a node was running.
    pub fn stop(&mut self) -> bool {
        self.on_complete = None;
        self.node.take().is_some()
    }

    pub fn is_running(&self) -> bool {
        self.node.is_some()
    }

    /// Number of times a node has been started on this task.
    pub fn starts(&self) -> u64 {
        self.started
    }

    /// Resumes the node if its pending wait is satisfied by this step.
    ///
    /// Returns the final status when the node finished during this call.
    pub fn advance(&mut self, ctx: &mut C, clock: Clock) -> Option<Status> {
        let node = self.node.as_mut()?;

        let due = match (&mut self.pending, clock.phase) {
            (Pending::Immediately, _) => true,
            (Pending::Seconds(remaining), Phase::Frame) => {
                *remaining -= clock.dt;
                *remaining <= 0.0
            }
            (Pending::Seconds(_), Phase::Physics) => false,
            (Pending::NextFrame, phase) => phase == Phase::Frame,
            (Pending::NextPhysicsStep, phase) => phase == Phase::Physics,
        };
        if !due {
            return None;
        }

        match node.resume(ctx) {
            Poll::Pending(wait) => {
                self.pending = wait.into();
                None
            }
            Poll::Ready(status) => {
                self.node = None;
                if let Some(on_complete) = self.on_complete.take() {
                    on_complete(status, ctx);
                }
                Some(status)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Delay, FromFn, Sequence};

    #[derive(Default)]
    struct TestContext {
        steps: u32,
        completions: Vec<Status>,
    }

    fn counting(wait: Wait) -> Box<dyn Behavior<TestContext>> {
        Box::new(FromFn::new(move |ctx: &mut TestContext| {
            ctx.steps += 1;
            Poll::Pending(wait)
        }))
    }

    fn record_completion() -> Option<Completion<TestContext>> {
        Some(Box::new(|status: Status, ctx: &mut TestContext| {
            ctx.completions.push(status)
        }))
    }

    #[test]
    fn seconds_wait_only_counts_frames() {
        let mut task: Task<TestContext> = Task::idle();
        let mut ctx = TestContext::default();
        task.start(counting(Wait::Seconds(1.0)), None);

        task.advance(&mut ctx, Clock::frame(0.1));
        assert_eq!(ctx.steps, 1);

        task.advance(&mut ctx, Clock::physics());
        task.advance(&mut ctx, Clock::frame(0.5));
        assert_eq!(ctx.steps, 1);

        task.advance(&mut ctx, Clock::frame(0.5));
        assert_eq!(ctx.steps, 2);
    }

    #[test]
    fn physics_wait_ignores_frames() {
        let mut task: Task<TestContext> = Task::idle();
        let mut ctx = TestContext::default();
        task.start(counting(Wait::NextPhysicsStep), None);

        task.advance(&mut ctx, Clock::frame(0.1));
        task.advance(&mut ctx, Clock::frame(0.1));
        assert_eq!(ctx.steps, 1);

        task.advance(&mut ctx, Clock::physics());
        assert_eq!(ctx.steps, 2);
    }

    #[test]
    fn natural_completion_fires_callback() {
        let mut task: Task<TestContext> = Task::idle();
        let mut ctx = TestContext::default();
        task.start(
            Box::new(Sequence::new(vec![Box::new(Delay::new(0.2))])),
            record_completion(),
        );

        assert_eq!(task.advance(&mut ctx, Clock::frame(0.1)), None);
        assert_eq!(task.advance(&mut ctx, Clock::frame(0.3)), Some(Status::Success));
        assert!(!task.is_running());
        assert_eq!(ctx.completions, vec![Status::Success]);
    }

    #[test]
    fn stop_discards_callback() {
        let mut task: Task<TestContext> = Task::idle();
        let mut ctx = TestContext::default();
        task.start(counting(Wait::NextFrame), record_completion());

        assert!(task.stop());
        assert!(!task.stop());
        assert_eq!(task.advance(&mut ctx, Clock::frame(0.1)), None);
        assert!(ctx.completions.is_empty());
    }

    #[test]
    fn start_replaces_previous_node() {
        let mut task: Task<TestContext> = Task::idle();
        let mut ctx = TestContext::default();
        task.start(counting(Wait::NextFrame), record_completion());
        task.start(Box::new(Delay::new(0.0)), None);

        task.advance(&mut ctx, Clock::frame(0.1));
        task.advance(&mut ctx, Clock::frame(0.1));
        assert_eq!(ctx.steps, 0);
        assert!(ctx.completions.is_empty());
        assert_eq!(task.starts(), 2);
    }
}
