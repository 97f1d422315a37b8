//! Behavior profiles and the trees behind them.
//!
//! A profile is chosen once at the start of an AI turn; its tree is then
//! polled until it fails:
//!
//! ```text
//! melee
//!   └─ Sequence
//!       ├─ PickEngageableTarget
//!       └─ Selector
//!           ├─ TargetInReach → CanAttack → Attack
//!           ├─ CanAttack → CanReachTargetWithMove → MoveAdjacent → Attack
//!           ├─ HasAction → !CanReachTargetWithMove → CanReachTargetWithDash → Dash → MoveAdjacent
//!           ├─ HasAction → Dash
//!           └─ HasMovement → Advance
//! ```
//!
//! The dash branch ends next to the target; a later poll attacks if an
//! attack is still available. The last two branches close the distance when
//! the target is out of reach even with a dash.

use behavior_tree::Node;
use behavior_tree::builder::{action, condition, inverter, selector, sequence};
use serde::{Deserialize, Serialize};

use super::TurnContext;
use super::nodes::{Check, Op};

pub type TurnTree<'a> = Node<'a, TurnContext<'a>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BehaviorProfile {
    /// Attack in place, or walk up and attack, or dash up.
    Melee,
    /// Attack in range, or walk into range and attack.
    Ranged,
    /// Nobody can be engaged this turn: dash and close the distance.
    Safe,
    /// Badly hurt with a self-heal left: heal first, then fight.
    InDanger,
}

impl BehaviorProfile {
    pub fn select(ctx: &TurnContext<'_>) -> Self {
        let Some(actor) = ctx.actor() else {
            return Self::Safe;
        };
        let rules = ctx.rules();
        if actor.second_wind
            && actor.resources.bonus_actions > 0
            && actor.hit_points.percent() <= rules.ai.danger_threshold_pct
        {
            return Self::InDanger;
        }
        if actor.main_hand.is_ranged() {
            return Self::Ranged;
        }

        let budget = ctx.engage_budget();
        let engageable = ctx
            .roster()
            .enemies_of(ctx.actor)
            .any(|enemy| ctx.can_engage(enemy, budget));
        if engageable { Self::Melee } else { Self::Safe }
    }

    /// Builds this profile's tree. `ranged` picks the weapon tree that
    /// `InDanger` falls back to.
    pub fn tree<'a>(self, ranged: bool) -> TurnTree<'a> {
        match self {
            Self::Melee => melee(),
            Self::Ranged => self::ranged(),
            Self::Safe => safe(),
            Self::InDanger => in_danger(if ranged { self::ranged() } else { melee() }),
        }
    }
}

pub fn melee<'a>() -> TurnTree<'a> {
    sequence(vec![
        action(Op::PickEngageableTarget),
        selector(vec![
            sequence(vec![
                condition(Check::TargetInReach),
                condition(Check::CanAttack),
                action(Op::Attack),
            ]),
            sequence(vec![
                condition(Check::CanAttack),
                condition(Check::CanReachTargetWithMove),
                action(Op::MoveAdjacent),
                action(Op::Attack),
            ]),
            sequence(vec![
                condition(Check::HasAction),
                inverter(condition(Check::CanReachTargetWithMove)),
                condition(Check::CanReachTargetWithDash),
                action(Op::Dash),
                action(Op::MoveAdjacent),
            ]),
            sequence(vec![condition(Check::HasAction), action(Op::Dash)]),
            sequence(vec![condition(Check::HasMovement), action(Op::Advance)]),
        ]),
    ])
}

pub fn ranged<'a>() -> TurnTree<'a> {
    sequence(vec![
        action(Op::PickTarget),
        selector(vec![
            sequence(vec![
                condition(Check::TargetInReach),
                condition(Check::CanAttack),
                action(Op::Attack),
            ]),
            sequence(vec![
                condition(Check::CanAttack),
                condition(Check::CanReachTargetWithMove),
                action(Op::MoveIntoRange),
                action(Op::Attack),
            ]),
            sequence(vec![
                condition(Check::CanAttack),
                condition(Check::HasMovement),
                action(Op::Advance),
            ]),
        ]),
    ])
}

pub fn safe<'a>() -> TurnTree<'a> {
    sequence(vec![
        action(Op::PickTarget),
        selector(vec![
            sequence(vec![
                condition(Check::TargetInReach),
                condition(Check::CanAttack),
                action(Op::Attack),
            ]),
            sequence(vec![condition(Check::HasAction), action(Op::Dash)]),
            sequence(vec![condition(Check::HasMovement), action(Op::Advance)]),
        ]),
    ])
}

pub fn in_danger<'a>(fallback: TurnTree<'a>) -> TurnTree<'a> {
    selector(vec![
        sequence(vec![
            condition(Check::HasSelfHeal),
            condition(Check::InDanger),
            action(Op::SelfHeal),
        ]),
        fallback,
    ])
}
