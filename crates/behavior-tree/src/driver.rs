//! Polling a root node to a fixed point.
//!
//! A turn is modelled as "keep acting while you still can": the root is
//! ticked repeatedly until it fails. Pacing between ticks (animation, delays)
//! belongs to the host, not to this loop.

use crate::Behavior;

/// Summary of one [`drive`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollReport {
    /// Number of ticks that returned `Success`.
    pub successes: usize,
    /// `true` when the loop stopped because it hit `max_ticks` rather than
    /// because the root failed.
    pub hit_limit: bool,
}

/// Ticks `root` until it fails or `max_ticks` successful ticks have run.
pub fn drive<C, B>(root: &B, ctx: &mut C, max_ticks: usize) -> PollReport
where
    B: Behavior<C> + ?Sized,
{
    let mut successes = 0;
    while successes < max_ticks {
        if root.tick(ctx).is_failure() {
            return PollReport {
                successes,
                hit_limit: false,
            };
        }
        successes += 1;
    }
    PollReport {
        successes,
        hit_limit: true,
    }
}
