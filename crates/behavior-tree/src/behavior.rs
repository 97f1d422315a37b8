//! Core behavior trait.
//!
//! Every node, composite or leaf, implements [`Behavior`] for some context
//! type `C`. The context is the blackboard: it carries the state a node reads
//! and the resources an action node spends.

use crate::Status;

/// A behavior tree node that can be evaluated against a context.
pub trait Behavior<C>: Send + Sync {
    /// Evaluates this node once.
    ///
    /// Nodes may mutate `ctx`. A node that returns `Failure` must leave the
    /// context as it found it.
    fn tick(&self, ctx: &mut C) -> Status;
}

/// A boxed node that may borrow from its surroundings for `'n`.
///
/// Contexts that borrow game state are not `'static`, so every composite
/// carries the lifetime of the boxes it owns.
pub type Node<'n, C> = Box<dyn Behavior<C> + 'n>;

/// Lets a [`Node`] sit anywhere a concrete node can.
impl<C> Behavior<C> for Node<'_, C> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }
}
