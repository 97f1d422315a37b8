//! Decorator behavior nodes.

use crate::{Behavior, Node, Status};

/// Inverts the result of its child (logical NOT).
pub struct Inverter<'n, C> {
    child: Node<'n, C>,
}

impl<'n, C> Inverter<'n, C> {
    pub fn new(child: Node<'n, C>) -> Self {
        Self { child }
    }
}

impl<C> Behavior<C> for Inverter<'_, C> {
    fn tick(&self, ctx: &mut C) -> Status {
        self.child.tick(ctx).invert()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct IsPositive;
    impl Behavior<i32> for IsPositive {
        fn tick(&self, ctx: &mut i32) -> Status {
            Status::from_bool(*ctx > 0)
        }
    }

    #[test]
    fn inverter_flips_child_result() {
        let inverter = Inverter::new(Box::new(IsPositive));
        assert_eq!(inverter.tick(&mut 10), Status::Failure);
        assert_eq!(inverter.tick(&mut -3), Status::Success);
    }
}
