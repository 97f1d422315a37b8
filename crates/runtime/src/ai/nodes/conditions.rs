//! Condition leaves.
//!
//! Conditions only read the context. They never spend resources or change
//! the target.

use behavior_tree::Predicate;

use crate::ai::TurnContext;

/// Questions a behavior tree can ask about the current turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Check {
    /// An attack is left over from an Attack action, or an action is free.
    CanAttack,
    HasAction,
    /// At least one orthogonal step of movement is left.
    HasMovement,
    TargetInReach,
    /// The actor can get into attack position with the movement it has.
    CanReachTargetWithMove,
    /// As above, after dashing. Requires a free action.
    CanReachTargetWithDash,
    /// Health at or below the configured danger threshold.
    InDanger,
    /// Second wind unused and a bonus action to spend on it.
    HasSelfHeal,
}

impl Predicate<TurnContext<'_>> for Check {
    fn holds(&self, ctx: &TurnContext<'_>) -> bool {
        let Some(actor) = ctx.actor() else {
            return false;
        };
        let resources = &actor.resources;
        match self {
            Check::CanAttack => resources.can_attack(),
            Check::HasAction => resources.actions > 0,
            Check::HasMovement => resources.move_points >= ctx.rules().movement.orthogonal_cost,
            Check::TargetInReach => ctx.target_in_reach(),
            Check::CanReachTargetWithMove => ctx.engage_cost(resources.move_points).is_some(),
            Check::CanReachTargetWithDash => {
                resources.actions > 0
                    && ctx
                        .engage_cost(resources.move_points + ctx.rules().movement.speed)
                        .is_some()
            }
            Check::InDanger => {
                actor.hit_points.percent() <= ctx.rules().ai.danger_threshold_pct
            }
            Check::HasSelfHeal => actor.second_wind && resources.bonus_actions > 0,
        }
    }
}
