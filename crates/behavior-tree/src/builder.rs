//! Builder utilities for ergonomic behavior construction.
//!
//! This module provides helper functions to reduce boilerplate when building
//! behaviors. Instead of writing verbose `Box::new(Sequence::new(vec![...]))`,
//! you can use shorter functions like `sequence(vec![...])`.

use crate::{Behavior, Delay, FromFn, Guard, Poll, Repeat, Sequence};

/// Creates a sequence node.
///
/// Shorthand for `Box::new(Sequence::new(children))`.
#[inline]
pub fn sequence<C: ?Sized + 'static>(children: Vec<Box<dyn Behavior<C>>>) -> Box<dyn Behavior<C>> {
    Box::new(Sequence::new(children))
}

/// Creates a guard node.
///
/// Shorthand for `Box::new(Guard::new(child, condition))`.
#[inline]
pub fn guard<C: ?Sized + 'static>(
    child: Box<dyn Behavior<C>>,
    condition: impl Fn(&C) -> bool + Send + 'static,
) -> Box<dyn Behavior<C>> {
    Box::new(Guard::new(child, condition))
}

/// Creates a node that repeats a freshly built child forever.
#[inline]
pub fn repeat<C: ?Sized + 'static>(
    factory: impl FnMut() -> Box<dyn Behavior<C>> + Send + 'static,
) -> Box<dyn Behavior<C>> {
    Box::new(Repeat::forever(factory))
}

/// Creates a timed wait.
#[inline]
pub fn delay<C: ?Sized + 'static>(seconds: f32) -> Box<dyn Behavior<C>> {
    Box::new(Delay::new(seconds))
}

/// Creates a leaf node from a closure.
#[inline]
pub fn from_fn<C, F>(step: F) -> Box<dyn Behavior<C>>
where
    C: ?Sized + 'static,
    F: FnMut(&mut C) -> Poll + Send + 'static,
{
    Box::new(FromFn::new(step))
}
