//! Directive queue with replace/chain merge semantics.
//!
//! A [`Queue`] holds the pending directives of a long-running command. When a
//! new directive arrives while one is active, the incoming queue's
//! [`MergePolicy`] decides whether it discards what is queued or is appended
//! behind it.

use std::collections::VecDeque;

/// How an incoming queue combines with the one already active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MergePolicy {
    /// The incoming directives discard the active ones.
    #[default]
    Replace,
    /// The incoming directives are appended behind the active ones.
    Chain,
}

/// Ordered directives plus the policy used when this queue is merged into
/// an active one.
#[derive(Debug, Clone, PartialEq)]
pub struct Queue<T> {
    entries: VecDeque<T>,
    policy: MergePolicy,
}

impl<T> Queue<T> {
    /// A single directive that replaces whatever is active.
    pub fn single(entry: T) -> Self {
        Self {
            entries: VecDeque::from([entry]),
            policy: MergePolicy::Replace,
        }
    }

    /// Directives that are appended behind whatever is active.
    pub fn chain(entries: impl IntoIterator<Item = T>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
            policy: MergePolicy::Chain,
        }
    }

    /// Directives with an explicit merge policy.
    pub fn with_policy(entries: impl IntoIterator<Item = T>, policy: MergePolicy) -> Self {
        Self {
            entries: entries.into_iter().collect(),
            policy,
        }
    }

    pub fn policy(&self) -> MergePolicy {
        self.policy
    }

    /// Merges `incoming` into this active queue according to the incoming policy.
    ///
    /// The merged queue keeps the active queue's own policy.
    #[must_use]
    pub fn merge(mut self, incoming: Queue<T>) -> Queue<T> {
        match incoming.policy {
            MergePolicy::Replace => incoming,
            MergePolicy::Chain => {
                self.entries.extend(incoming.entries);
                self
            }
        }
    }

    /// The directive that is currently active.
    pub fn front(&self) -> Option<&T> {
        self.entries.front()
    }

    /// Drops the active directive.
    ///
    /// Returns `None` once the queue is drained.
    #[must_use]
    pub fn advance(mut self) -> Option<Queue<T>> {
        self.entries.pop_front();
        if self.entries.is_empty() {
            None
        } else {
            Some(self)
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_discards_active_entries() {
        let active = Queue::chain(["dig", "haul"]);
        let merged = active.merge(Queue::single("eat"));

        assert_eq!(merged.iter().copied().collect::<Vec<_>>(), vec!["eat"]);
    }

    #[test]
    fn chain_appends_behind_active_entries() {
        let active = Queue::single("dig");
        let merged = active.merge(Queue::chain(["haul", "build"]));

        assert_eq!(
            merged.iter().copied().collect::<Vec<_>>(),
            vec!["dig", "haul", "build"]
        );
        assert_eq!(merged.front(), Some(&"dig"));
        // The active queue's policy survives the merge
        assert_eq!(merged.policy(), MergePolicy::Replace);
    }

    #[test]
    fn advance_drains_to_none() {
        let queue = Queue::chain([1, 2]);

        let queue = queue.advance().expect("one entry left");
        assert_eq!(queue.front(), Some(&2));
        assert!(queue.advance().is_none());
    }
}
