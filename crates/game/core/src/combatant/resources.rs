//! Per-turn action economy.
//!
//! `try_*` methods either spend and return `Ok`, or return the missing
//! [`Resource`] and change nothing.

use crate::error::{ActionError, Resource};

#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnResources {
    pub actions: u8,
    pub bonus_actions: u8,
    /// Attacks left from an Attack action already taken this turn.
    pub attacks_remaining: u8,
    /// Feet of movement left.
    pub move_points: f64,
    /// Refilled at round start rather than turn start.
    pub reactions: u8,
}

impl TurnResources {
    /// Start-of-turn refill. Reactions are untouched.
    pub fn reset_turn(&mut self, speed: f64) {
        self.actions = 1;
        self.bonus_actions = 1;
        self.attacks_remaining = 0;
        self.move_points = speed;
    }

    pub fn reset_round(&mut self) {
        self.reactions = 1;
    }

    /// Zeroes everything spendable this turn (used when a turn is passed).
    pub fn exhaust(&mut self) {
        self.actions = 0;
        self.bonus_actions = 0;
        self.attacks_remaining = 0;
        self.move_points = 0.0;
    }

    /// True if an attack can be made now, either left over from an Attack
    /// action or by taking a new one.
    pub fn can_attack(&self) -> bool {
        self.attacks_remaining > 0 || self.actions > 0
    }

    /// Spends one attack. Takes the Attack action first if none are left,
    /// which grants `attacks_per_action` attacks.
    pub fn try_spend_attack(&mut self, attacks_per_action: u8) -> Result<(), ActionError> {
        if self.attacks_remaining == 0 {
            self.try_spend_action()?;
            self.attacks_remaining = attacks_per_action.max(1);
        }
        self.attacks_remaining -= 1;
        Ok(())
    }

    pub fn try_spend_action(&mut self) -> Result<(), ActionError> {
        self.actions = self
            .actions
            .checked_sub(1)
            .ok_or_else(|| ActionError::insufficient(Resource::Action))?;
        Ok(())
    }

    pub fn try_spend_bonus_action(&mut self) -> Result<(), ActionError> {
        self.bonus_actions = self
            .bonus_actions
            .checked_sub(1)
            .ok_or_else(|| ActionError::insufficient(Resource::BonusAction))?;
        Ok(())
    }

    pub fn try_spend_reaction(&mut self) -> Result<(), ActionError> {
        self.reactions = self
            .reactions
            .checked_sub(1)
            .ok_or_else(|| ActionError::insufficient(Resource::Reaction))?;
        Ok(())
    }

    /// Spends `cost` feet. A cost exactly equal to what is left is affordable.
    pub fn try_spend_movement(&mut self, cost: f64) -> Result<(), ActionError> {
        if cost > self.move_points {
            return Err(ActionError::insufficient(Resource::Movement));
        }
        self.move_points -= cost;
        Ok(())
    }

    /// Dash: spends the action for another `speed` feet of movement.
    pub fn try_dash(&mut self, speed: f64) -> Result<(), ActionError> {
        self.try_spend_action()?;
        self.move_points += speed;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> TurnResources {
        let mut resources = TurnResources::default();
        resources.reset_turn(30.0);
        resources.reset_round();
        resources
    }

    #[test]
    fn attack_action_grants_extra_attacks() {
        let mut resources = fresh();
        resources.try_spend_attack(2).unwrap();
        assert_eq!(resources.actions, 0);
        assert_eq!(resources.attacks_remaining, 1);
        resources.try_spend_attack(2).unwrap();
        assert_eq!(
            resources.try_spend_attack(2),
            Err(ActionError::insufficient(Resource::Action))
        );
        assert_eq!(resources.attacks_remaining, 0);
    }

    #[test]
    fn movement_equal_to_budget_is_affordable() {
        let mut resources = fresh();
        resources.try_spend_movement(30.0).unwrap();
        assert_eq!(resources.move_points, 0.0);
        assert!(resources.try_spend_movement(5.0).is_err());
    }

    #[test]
    fn dash_adds_speed_and_costs_action() {
        let mut resources = fresh();
        resources.try_dash(30.0).unwrap();
        assert_eq!(resources.move_points, 60.0);
        assert!(!resources.can_attack());
        assert!(resources.try_dash(30.0).is_err());
        assert_eq!(resources.move_points, 60.0);
    }

    #[test]
    fn exhaust_keeps_reactions() {
        let mut resources = fresh();
        resources.exhaust();
        assert_eq!(resources.actions, 0);
        assert_eq!(resources.move_points, 0.0);
        assert_eq!(resources.reactions, 1);
    }
}
