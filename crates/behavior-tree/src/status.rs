//! Outcomes returned by behavior nodes.

/// The final result of a behavior node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The behavior completed successfully.
    ///
    /// For conditions: The condition was met.
    /// For actions: The action ran to its natural end.
    Success,

    /// The behavior failed.
    ///
    /// For conditions: The condition was not met.
    /// For actions: The action was abandoned (e.g., its target vanished).
    Failure,
}

impl Status {
    /// Returns `true` if this status is `Success`.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    /// Returns `true` if this status is `Failure`.
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    /// Inverts the status: Success becomes Failure and vice versa.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
        }
    }
}

/// Suspension instruction yielded by a node that is not finished yet.
///
/// The scheduler consumes the instruction and resumes the node once the
/// condition is met.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Wait {
    /// Resume after the given amount of simulated seconds.
    Seconds(f32),
    /// Resume on the next frame step.
    NextFrame,
    /// Resume on the next physics step.
    NextPhysicsStep,
}

/// Result of resuming a node once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Poll {
    /// The node suspended itself and wants to be resumed later.
    Pending(Wait),
    /// The node finished.
    Ready(Status),
}

impl Poll {
    pub const SUCCESS: Poll = Poll::Ready(Status::Success);
    pub const FAILURE: Poll = Poll::Ready(Status::Failure);

    /// Returns `true` if the node finished.
    #[inline]
    pub fn is_ready(self) -> bool {
        matches!(self, Poll::Ready(_))
    }
}

impl From<Status> for Poll {
    #[inline]
    fn from(status: Status) -> Self {
        Poll::Ready(status)
    }
}

impl From<Wait> for Poll {
    #[inline]
    fn from(wait: Wait) -> Self {
        Poll::Pending(wait)
    }
}
