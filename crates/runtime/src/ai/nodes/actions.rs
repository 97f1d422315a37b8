//! Action leaves.
//!
//! Each [`Op`] runs one turn operation. An op that has nothing sensible to
//! do, or whose operation is rejected, fails without spending anything.

use behavior_tree::Operation;
use tracing::debug;

use crate::ai::TurnContext;
use crate::ai::scoring::{best_target, score_targets};

/// Steps a behavior tree can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    /// Scores living enemies and remembers the best one.
    PickTarget,
    /// As `PickTarget`, preferring enemies the actor can reach this turn.
    PickEngageableTarget,
    Attack,
    /// Walks to the cheapest cell adjacent to the target, if affordable.
    MoveAdjacent,
    /// Walks to the cheapest affordable cell within ranged reach.
    MoveIntoRange,
    /// Spends whatever movement is left walking toward the target.
    Advance,
    Dash,
    SelfHeal,
}

impl Operation<TurnContext<'_>> for Op {
    fn apply(&self, ctx: &mut TurnContext<'_>) -> bool {
        match self {
            Op::PickTarget => pick_target(ctx, false),
            Op::PickEngageableTarget => pick_target(ctx, true),
            Op::Attack => match ctx.target {
                Some(target) => report(*self, ctx.attack(target).map(drop)),
                None => false,
            },
            Op::MoveAdjacent => {
                let Some(actor) = ctx.actor() else {
                    return false;
                };
                let (from, budget) = (actor.position, actor.resources.move_points);
                match ctx.approach_target() {
                    Some(approach) if approach.cell != from && approach.cost <= budget => {
                        report(*self, ctx.move_to(approach.cell).map(drop))
                    }
                    _ => false,
                }
            }
            Op::MoveIntoRange => {
                let Some(actor) = ctx.actor() else {
                    return false;
                };
                let (from, budget) = (actor.position, actor.resources.move_points);
                match ctx.firing_position(budget) {
                    Some((cell, _)) if cell != from => report(*self, ctx.move_to(cell).map(drop)),
                    _ => false,
                }
            }
            Op::Advance => {
                let (Some(actor), Some(target)) = (ctx.actor(), ctx.target()) else {
                    return false;
                };
                let (from, to, budget) = (
                    actor.position,
                    target.position,
                    actor.resources.move_points,
                );
                let approach = ctx.pathfinder().approach(from, to, Some(budget));
                match approach {
                    Some(approach) if approach.cell != from => {
                        report(*self, ctx.move_to(approach.cell).map(drop))
                    }
                    _ => false,
                }
            }
            Op::Dash => report(*self, ctx.dash()),
            Op::SelfHeal => report(*self, ctx.second_wind().map(drop)),
        }
    }
}

/// With `engageable`, enemies out of reach this turn are only considered
/// when nobody is in reach.
fn pick_target(ctx: &mut TurnContext<'_>, engageable: bool) -> bool {
    if !ctx.actor().is_some_and(|actor| actor.is_alive()) {
        ctx.target = None;
        return false;
    }
    let mut scores = score_targets(ctx.actor, ctx.roster(), ctx.grid(), ctx.rules());
    if engageable {
        let budget = ctx.engage_budget();
        let reachable: Vec<_> = scores
            .iter()
            .filter(|score| {
                ctx.roster()
                    .get(score.id)
                    .is_some_and(|enemy| ctx.can_engage(enemy, budget))
            })
            .copied()
            .collect();
        if !reachable.is_empty() {
            scores = reachable;
        }
    }
    ctx.target = best_target(&scores).map(|best| best.id);
    debug!(actor = %ctx.actor, target = ?ctx.target, candidates = scores.len(), "picked target");
    ctx.target.is_some()
}

fn report<E: std::fmt::Display>(op: Op, result: Result<(), E>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            debug!(?op, %err, "operation rejected");
            false
        }
    }
}
