/// Tunable rules for one encounter.
///
/// Every section falls back to its defaults when loaded from a partial file.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RulesConfig {
    pub grid: GridRules,
    pub movement: MovementRules,
    pub death_saves: DeathSaveRules,
    pub ai: AiRules,
    /// Rounds after which a stalemate ends as a draw.
    pub max_rounds: u32,
}

impl RulesConfig {
    pub const DEFAULT_MAX_ROUNDS: u32 = 100;

    pub fn new() -> Self {
        Self {
            grid: GridRules::default(),
            movement: MovementRules::default(),
            death_saves: DeathSaveRules::default(),
            ai: AiRules::default(),
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Board size and terrain density.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridRules {
    pub size: u32,
    /// Fraction of cells turned into forest, in `[0, 1]`.
    pub forest_fraction: f64,
    /// Fraction of cells turned into hills, in `[0, 1]`.
    pub hill_fraction: f64,
}

impl Default for GridRules {
    fn default() -> Self {
        Self {
            size: 40,
            forest_fraction: 0.2,
            hill_fraction: 0.1,
        }
    }
}

/// Movement costs in feet.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MovementRules {
    pub orthogonal_cost: f64,
    pub diagonal_cost: f64,
    /// Multiplier applied when the entered cell is a hill.
    pub hill_multiplier: f64,
    /// Movement granted at the start of each turn, and again by a dash.
    pub speed: f64,
}

impl MovementRules {
    /// Feet covered by one cell, used to turn grid distances into feet.
    pub fn feet_per_cell(&self) -> f64 {
        self.orthogonal_cost
    }
}

impl Default for MovementRules {
    fn default() -> Self {
        Self {
            orthogonal_cost: 5.0,
            diagonal_cost: 7.5,
            hill_multiplier: 2.0,
            speed: 30.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeathSaveRules {
    /// Lowest natural d20 that counts as a success.
    pub success_threshold: u32,
    /// Successes (or failures) needed to stabilize (or die).
    pub limit: u8,
}

impl Default for DeathSaveRules {
    fn default() -> Self {
        Self {
            success_threshold: 10,
            limit: 3,
        }
    }
}

/// Weights applied to the four targeting axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreWeights {
    pub hp: u32,
    pub hit: u32,
    pub threat: u32,
    pub movement: u32,
}

impl ScoreWeights {
    pub const MELEE: Self = Self {
        hp: 3,
        hit: 1,
        threat: 1,
        movement: 3,
    };

    pub const RANGED: Self = Self {
        hp: 4,
        hit: 2,
        threat: 1,
        movement: 1,
    };
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AiRules {
    /// Upper bound on root ticks per AI turn.
    pub max_iterations: usize,
    /// Health percentage at or below which a combatant with a self-heal
    /// prefers to use it.
    pub danger_threshold_pct: u32,
    pub melee_weights: ScoreWeights,
    pub ranged_weights: ScoreWeights,
    /// Divisor applied to the weighted sum of axis scores.
    pub score_divisor: u32,
}

impl Default for AiRules {
    fn default() -> Self {
        Self {
            max_iterations: 16,
            danger_threshold_pct: 25,
            melee_weights: ScoreWeights::MELEE,
            ranged_weights: ScoreWeights::RANGED,
            score_divisor: 4,
        }
    }
}
