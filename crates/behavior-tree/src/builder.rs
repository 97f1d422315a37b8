//! Shorthand constructors for boxed nodes.
//!
//! `sequence(vec![condition(Check::Adjacent), action(Op::Attack)])` instead
//! of spelling out every `Box::new`.

use crate::{Action, Condition, Inverter, Node, Operation, Predicate, Selector, Sequence};

#[inline]
pub fn sequence<'n, C: 'n>(children: Vec<Node<'n, C>>) -> Node<'n, C> {
    Box::new(Sequence::new(children))
}

#[inline]
pub fn selector<'n, C: 'n>(children: Vec<Node<'n, C>>) -> Node<'n, C> {
    Box::new(Selector::new(children))
}

#[inline]
pub fn inverter<'n, C: 'n>(child: Node<'n, C>) -> Node<'n, C> {
    Box::new(Inverter::new(child))
}

#[inline]
pub fn condition<'n, C: 'n, P: Predicate<C> + 'n>(predicate: P) -> Node<'n, C> {
    Box::new(Condition(predicate))
}

#[inline]
pub fn action<'n, C: 'n, O: Operation<C> + 'n>(operation: O) -> Node<'n, C> {
    Box::new(Action(operation))
}
