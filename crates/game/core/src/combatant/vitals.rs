//! Hit points, death saves and conscious state.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VitalityStatus {
    #[default]
    Alive,
    /// At 0 hp and rolling death saves.
    Unconscious,
    /// At 0 hp, no longer rolling.
    Stabilized,
    Dead,
}

impl VitalityStatus {
    /// Only living combatants act or react.
    pub fn can_act(self) -> bool {
        matches!(self, Self::Alive)
    }

    /// Down but not dead.
    pub fn is_downed(self) -> bool {
        matches!(self, Self::Unconscious | Self::Stabilized)
    }

    pub fn is_dead(self) -> bool {
        matches!(self, Self::Dead)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitPoints {
    pub base: i32,
    pub current: i32,
}

impl HitPoints {
    pub fn full(base: i32) -> Self {
        Self {
            base,
            current: base,
        }
    }

    /// Current hit points as a whole percentage of base.
    pub fn percent(&self) -> u32 {
        if self.base <= 0 {
            return 0;
        }
        (self.current.max(0) * 100 / self.base) as u32
    }

    pub fn missing(&self) -> i32 {
        (self.base - self.current).max(0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeathSaves {
    pub successes: u8,
    pub failures: u8,
}

impl DeathSaves {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
