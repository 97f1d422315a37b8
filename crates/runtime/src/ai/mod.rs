//! Computer-controlled turns.
//!
//! An AI turn picks a [`BehaviorProfile`] from the actor's situation, builds
//! that profile's tree and polls it until it fails. Every step the tree takes
//! goes through the same turn operations a player would use, so AI and
//! player turns obey identical rules.

pub mod context;
pub mod nodes;
pub mod presets;
pub mod scoring;

use behavior_tree::drive;
use tracing::{debug, warn};

pub use context::TurnContext;
pub use presets::BehaviorProfile;

/// Plays the rest of `ctx.actor`'s turn. Returns the profile that drove it.
pub fn play_turn(ctx: &mut TurnContext<'_>) -> BehaviorProfile {
    let profile = BehaviorProfile::select(ctx);
    let ranged = ctx.actor().is_some_and(|actor| actor.main_hand.is_ranged());
    let tree = profile.tree(ranged);
    let limit = ctx.rules().ai.max_iterations;
    let report = drive(&tree, ctx, limit);
    debug!(actor = %ctx.actor, ?profile, steps = report.successes, "AI turn finished");
    if report.hit_limit {
        warn!(actor = %ctx.actor, limit, "AI turn hit the iteration cap");
    }
    ctx.flush_log();
    profile
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EncounterEvent;
    use skirmish_core::{
        Ability, AbilityScores, CombatLog, Combatant, CombatantId, DiceSpec, Grid, Position,
        Roster, RulesConfig, ScriptedRng, Team, VitalityStatus, Weapon,
    };

    struct Board {
        grid: Grid,
        roster: Roster,
        rules: RulesConfig,
        log: CombatLog,
        events: Vec<EncounterEvent>,
    }

    impl Board {
        fn new(size: u32) -> Self {
            Self {
                grid: Grid::new(size),
                roster: Roster::new(),
                rules: RulesConfig::default(),
                log: CombatLog::new(),
                events: Vec::new(),
            }
        }

        fn put(&mut self, mut combatant: Combatant, at: Position) -> CombatantId {
            combatant.position = at;
            combatant.resources.reset_turn(30.0);
            combatant.resources.reset_round();
            let id = self.roster.add(combatant);
            self.grid.place(id, at).unwrap();
            id
        }

        fn turn<'a>(&'a mut self, actor: CombatantId, rng: &'a mut ScriptedRng) -> TurnContext<'a> {
            TurnContext::new(
                actor,
                &mut self.grid,
                &mut self.roster,
                rng,
                &self.rules,
                &mut self.log,
                &mut self.events,
            )
        }
    }

    fn soldier(name: &str, team: Team) -> Combatant {
        Combatant::new(name, 1, AbilityScores::new([16, 10, 10, 10, 10, 10]), 20)
            .with_team(team)
            .with_weapon(Weapon::new("Longsword", 5, DiceSpec::new(1, 8), Ability::Strength))
    }

    fn archer(name: &str, team: Team) -> Combatant {
        Combatant::new(name, 1, AbilityScores::new([10, 16, 10, 10, 10, 10]), 20)
            .with_team(team)
            .with_weapon(Weapon::new("Longbow", 150, DiceSpec::new(1, 8), Ability::Dexterity))
    }

    #[test]
    fn adjacent_melee_attacks_in_place() {
        let mut board = Board::new(10);
        let ash = board.put(soldier("Ash", Team::One), Position::new(2, 2));
        board.put(soldier("Bryn", Team::Two), Position::new(3, 2));
        let mut rng = ScriptedRng::new([2]);

        let profile = play_turn(&mut board.turn(ash, &mut rng));
        assert_eq!(profile, BehaviorProfile::Melee);
        let attacks = board
            .events
            .iter()
            .filter(|e| matches!(e, EncounterEvent::Attacked(_)))
            .count();
        assert_eq!(attacks, 1);
        assert_eq!(board.roster.get(ash).unwrap().position, Position::new(2, 2));
        assert_eq!(board.roster.get(ash).unwrap().resources.actions, 0);
    }

    #[test]
    fn melee_walks_up_then_attacks() {
        let mut board = Board::new(10);
        let ash = board.put(soldier("Ash", Team::One), Position::new(1, 1));
        board.put(soldier("Bryn", Team::Two), Position::new(5, 1));
        let mut rng = ScriptedRng::new([2]);

        play_turn(&mut board.turn(ash, &mut rng));
        let me = board.roster.get(ash).unwrap();
        assert_eq!(me.position, Position::new(4, 1));
        assert_eq!(me.resources.move_points, 15.0);
        assert!(board.events.iter().any(|e| matches!(e, EncounterEvent::Attacked(_))));
    }

    #[test]
    fn distant_melee_dashes_and_closes_in() {
        let mut board = Board::new(20);
        let ash = board.put(soldier("Ash", Team::One), Position::new(0, 0));
        board.put(soldier("Bryn", Team::Two), Position::new(10, 0));
        let mut rng = ScriptedRng::new([2]);

        play_turn(&mut board.turn(ash, &mut rng));
        let me = board.roster.get(ash).unwrap();
        assert_eq!(me.position, Position::new(9, 0));
        assert!(board.events.iter().any(|e| matches!(e, EncounterEvent::Dashed { .. })));
        assert!(!board.events.iter().any(|e| matches!(e, EncounterEvent::Attacked(_))));
    }

    #[test]
    fn melee_engages_the_enemy_it_can_reach() {
        let mut board = Board::new(30);
        let ash = board.put(soldier("Ash", Team::One), Position::new(0, 0));
        let near = board.put(soldier("Near", Team::Two), Position::new(9, 0));
        let mut weak = soldier("Far", Team::Two);
        weak.hit_points.current = 1;
        board.put(weak, Position::new(25, 0));
        let mut rng = ScriptedRng::new([2]);

        let mut turn = board.turn(ash, &mut rng);
        let profile = play_turn(&mut turn);
        let target = turn.target;
        drop(turn);

        assert_eq!(profile, BehaviorProfile::Melee);
        assert_eq!(target, Some(near));
        let me = board.roster.get(ash).unwrap();
        assert_eq!(me.position, Position::new(8, 0));
        assert_eq!(me.resources.actions, 0);
        assert!(board.events.iter().any(|e| matches!(e, EncounterEvent::Dashed { .. })));
    }

    #[test]
    fn unreachable_enemies_select_safe_profile() {
        let mut board = Board::new(30);
        let ash = board.put(soldier("Ash", Team::One), Position::new(0, 0));
        board.put(soldier("Bryn", Team::Two), Position::new(25, 0));
        let mut rng = ScriptedRng::new([2]);

        let profile = play_turn(&mut board.turn(ash, &mut rng));
        assert_eq!(profile, BehaviorProfile::Safe);
        let me = board.roster.get(ash).unwrap();
        assert_eq!(me.position, Position::new(12, 0));
        assert_eq!(me.resources.actions, 0);
    }

    #[test]
    fn archer_shoots_without_moving() {
        let mut board = Board::new(20);
        let robin = board.put(archer("Robin", Team::One), Position::new(0, 0));
        board.put(soldier("Bryn", Team::Two), Position::new(12, 0));
        let mut rng = ScriptedRng::new([2]);

        let profile = play_turn(&mut board.turn(robin, &mut rng));
        assert_eq!(profile, BehaviorProfile::Ranged);
        assert_eq!(board.roster.get(robin).unwrap().position, Position::new(0, 0));
        assert!(board.events.iter().any(|e| matches!(e, EncounterEvent::Attacked(_))));
    }

    #[test]
    fn wounded_fighter_uses_second_wind_first() {
        let mut board = Board::new(10);
        let mut hurt = soldier("Ash", Team::One);
        hurt.hit_points.current = 4;
        hurt.second_wind = true;
        let ash = board.put(hurt, Position::new(2, 2));
        board.put(soldier("Bryn", Team::Two), Position::new(3, 2));
        // 1d10 heal rolls 5, then the attack misses with a 2.
        let mut rng = ScriptedRng::new([5, 2]);

        let profile = play_turn(&mut board.turn(ash, &mut rng));
        assert_eq!(profile, BehaviorProfile::InDanger);
        let me = board.roster.get(ash).unwrap();
        assert!(!me.second_wind);
        assert_eq!(me.hit_points.current, 10);
        assert_eq!(me.resources.bonus_actions, 0);
        assert!(board.events.iter().any(|e| matches!(e, EncounterEvent::Attacked(_))));
    }

    #[test]
    fn downed_actor_does_nothing() {
        let mut board = Board::new(10);
        let mut down = soldier("Ash", Team::One);
        down.status = VitalityStatus::Unconscious;
        down.hit_points.current = 0;
        let ash = board.put(down, Position::new(2, 2));
        board.put(soldier("Bryn", Team::Two), Position::new(3, 2));
        let mut rng = ScriptedRng::new([2]);

        play_turn(&mut board.turn(ash, &mut rng));
        assert!(board.events.is_empty());
    }
}
