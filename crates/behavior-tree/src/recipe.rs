//! Lazily instantiated behavior nodes.
//!
//! Behavior nodes carry mutable progress and cannot be cloned. A [`Recipe`]
//! is the clonable description of a node: state values can hold recipes and
//! the scheduler instantiates a fresh node whenever it starts running one.

use std::fmt;
use std::sync::Arc;

use crate::{Behavior, Guard};

type Factory<C> = dyn Fn() -> Box<dyn Behavior<C>> + Send + Sync;
type TargetFactory<T, C> = dyn Fn(&T) -> Box<dyn Behavior<C>> + Send + Sync;
type Validity<T, C> = dyn Fn(&C, &T) -> bool + Send + Sync;

/// A named, shareable factory for a behavior node.
pub struct Recipe<C: ?Sized> {
    label: Arc<str>,
    make: Arc<Factory<C>>,
}

impl<C: ?Sized> Recipe<C> {
    pub fn new(
        label: impl Into<Arc<str>>,
        make: impl Fn() -> Box<dyn Behavior<C>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            make: Arc::new(make),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Builds a fresh node.
    pub fn instantiate(&self) -> Box<dyn Behavior<C>> {
        (self.make)()
    }
}

impl<C: ?Sized> Clone for Recipe<C> {
    fn clone(&self) -> Self {
        Self {
            label: Arc::clone(&self.label),
            make: Arc::clone(&self.make),
        }
    }
}

impl<C: ?Sized> fmt::Debug for Recipe<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Recipe").field(&self.label).finish()
    }
}

/// Two recipes are equal when they share the same factory.
impl<C: ?Sized> PartialEq for Recipe<C> {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && Arc::ptr_eq(&self.make, &other.make)
    }
}

/// Captures "what to do once a target of type `T` is known".
///
/// Binding a target yields a [`Recipe`] whose nodes are wrapped in a
/// [`Guard`]: if the target stops being valid mid-run the node terminates
/// early with `Failure`.
pub struct TargetedBehavior<T, C: ?Sized> {
    label: Arc<str>,
    make: Arc<TargetFactory<T, C>>,
    valid: Arc<Validity<T, C>>,
}

impl<T, C> TargetedBehavior<T, C>
where
    T: Clone + Send + Sync + 'static,
    C: ?Sized + 'static,
{
    pub fn new(
        label: impl Into<Arc<str>>,
        make: impl Fn(&T) -> Box<dyn Behavior<C>> + Send + Sync + 'static,
        valid: impl Fn(&C, &T) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            make: Arc::new(make),
            valid: Arc::new(valid),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Binds a concrete target, producing a runnable recipe.
    pub fn bind(&self, target: T) -> Recipe<C> {
        let make = Arc::clone(&self.make);
        let valid = Arc::clone(&self.valid);
        Recipe::new(Arc::clone(&self.label), move || {
            let target = target.clone();
            let valid = Arc::clone(&valid);
            let node = make(&target);
            Box::new(Guard::new(node, move |ctx: &C| valid(ctx, &target))) as Box<dyn Behavior<C>>
        })
    }
}

impl<T, C: ?Sized> Clone for TargetedBehavior<T, C> {
    fn clone(&self) -> Self {
        Self {
            label: Arc::clone(&self.label),
            make: Arc::clone(&self.make),
            valid: Arc::clone(&self.valid),
        }
    }
}

impl<T, C: ?Sized> fmt::Debug for TargetedBehavior<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TargetedBehavior").field(&self.label).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FromFn, Poll, Wait};

    struct TestContext {
        alive: Vec<u32>,
        hits: Vec<u32>,
    }

    fn strike() -> TargetedBehavior<u32, TestContext> {
        TargetedBehavior::new(
            "strike",
            |target: &u32| {
                let target = *target;
                Box::new(FromFn::new(move |ctx: &mut TestContext| {
                    ctx.hits.push(target);
                    Poll::Pending(Wait::NextFrame)
                })) as Box<dyn Behavior<TestContext>>
            },
            |ctx: &TestContext, target: &u32| ctx.alive.contains(target),
        )
    }

    #[test]
    fn recipe_instantiates_fresh_nodes() {
        let recipe = strike().bind(7);
        let mut ctx = TestContext {
            alive: vec![7],
            hits: Vec::new(),
        };

        recipe.instantiate().resume(&mut ctx);
        recipe.instantiate().resume(&mut ctx);
        assert_eq!(ctx.hits, vec![7, 7]);
    }

    #[test]
    fn bound_target_terminates_when_invalid() {
        let mut node = strike().bind(3).instantiate();
        let mut ctx = TestContext {
            alive: vec![3],
            hits: Vec::new(),
        };

        assert_eq!(node.resume(&mut ctx), Poll::Pending(Wait::NextFrame));
        ctx.alive.clear();
        assert_eq!(node.resume(&mut ctx), Poll::FAILURE);
        assert_eq!(ctx.hits, vec![3]);
    }

    #[test]
    fn clones_compare_equal() {
        let recipe = strike().bind(1);
        assert_eq!(recipe.clone(), recipe);
        assert_ne!(strike().bind(1), recipe);
        assert_eq!(recipe.label(), "strike");
    }
}
