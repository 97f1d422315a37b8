//! Leaf nodes backed by tagged operations.
//!
//! A leaf holds a value of a caller-defined type, typically an enum such as
//! `enum Check { TargetAdjacent, HealthBelow(u8) }`. The tag decides what the
//! leaf does, which keeps trees free of captured closures.

use crate::{Behavior, Status};

/// A read-only question asked of the context.
pub trait Predicate<C>: Send + Sync {
    fn holds(&self, ctx: &C) -> bool;
}

/// A side-effecting step applied to the context.
///
/// Returns `true` when the operation was applied. An operation that cannot
/// find a valid application returns `false` and must not have spent anything.
pub trait Operation<C>: Send + Sync {
    fn apply(&self, ctx: &mut C) -> bool;
}

/// Leaf that succeeds when its predicate holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Condition<P>(pub P);

impl<C, P: Predicate<C>> Behavior<C> for Condition<P> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        Status::from_bool(self.0.holds(ctx))
    }
}

/// Leaf that succeeds when its operation was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Action<O>(pub O);

impl<C, O: Operation<C>> Behavior<C> for Action<O> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        Status::from_bool(self.0.apply(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Purse {
        coins: u32,
    }

    enum Ask {
        HasCoins,
    }

    impl Predicate<Purse> for Ask {
        fn holds(&self, ctx: &Purse) -> bool {
            match self {
                Ask::HasCoins => ctx.coins > 0,
            }
        }
    }

    enum Spend {
        One,
    }

    impl Operation<Purse> for Spend {
        fn apply(&self, ctx: &mut Purse) -> bool {
            match self {
                Spend::One => match ctx.coins.checked_sub(1) {
                    Some(rest) => {
                        ctx.coins = rest;
                        true
                    }
                    None => false,
                },
            }
        }
    }

    #[test]
    fn condition_reflects_predicate() {
        let mut purse = Purse { coins: 1 };
        assert_eq!(Condition(Ask::HasCoins).tick(&mut purse), Status::Success);
        purse.coins = 0;
        assert_eq!(Condition(Ask::HasCoins).tick(&mut purse), Status::Failure);
    }

    #[test]
    fn failed_action_leaves_context_untouched() {
        let mut purse = Purse { coins: 0 };
        assert_eq!(Action(Spend::One).tick(&mut purse), Status::Failure);
        assert_eq!(purse.coins, 0);
    }
}
