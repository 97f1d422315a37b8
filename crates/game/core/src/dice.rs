//! Dice and random number sources.
//!
//! Every roll in the rules goes through a [`RngSource`] passed in by the
//! caller. Given the same source state, the same sequence of rolls comes out,
//! which keeps encounters replayable from a seed.
//!
//! - [`PcgRng`]: seeded PCG-XSH-RR generator for real play
//! - [`ScriptedRng`]: replays a fixed list of faces, for tests and replays

use std::collections::VecDeque;
use std::fmt;

/// Stateful source of random numbers.
pub trait RngSource {
    /// Returns the next raw 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Rolls a die with `sides` faces (1..=sides). A zero-sided die rolls 0.
    fn roll_die(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        (self.next_u32() % sides) + 1
    }

    fn roll_d20(&mut self) -> u32 {
        self.roll_die(20)
    }

    /// Rolls a d20 once, or twice keeping the better or worse face.
    fn roll_d20_with(&mut self, mode: RollMode) -> D20Roll {
        let first = self.roll_d20();
        match mode {
            RollMode::Normal => D20Roll {
                natural: first,
                discarded: None,
                mode,
            },
            RollMode::Advantage | RollMode::Disadvantage => {
                let second = self.roll_d20();
                let (keep, drop) = match mode {
                    RollMode::Advantage => (first.max(second), first.min(second)),
                    _ => (first.min(second), first.max(second)),
                };
                D20Roll {
                    natural: keep,
                    discarded: Some(drop),
                    mode,
                }
            }
        }
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        let span = max.abs_diff(min) + 1;
        min + (self.next_u32() % span) as i32
    }
}

impl<R: RngSource + ?Sized> RngSource for &mut R {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    #[inline]
    fn roll_die(&mut self, sides: u32) -> u32 {
        (**self).roll_die(sides)
    }
}

impl<R: RngSource + ?Sized> RngSource for Box<R> {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    #[inline]
    fn roll_die(&mut self, sides: u32) -> u32 {
        (**self).roll_die(sides)
    }
}

/// How many d20s an attack rolls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RollMode {
    #[default]
    Normal,
    Advantage,
    Disadvantage,
}

impl RollMode {
    /// Advantage and disadvantage together cancel out.
    pub fn from_flags(advantage: bool, disadvantage: bool) -> Self {
        match (advantage, disadvantage) {
            (true, false) => Self::Advantage,
            (false, true) => Self::Disadvantage,
            _ => Self::Normal,
        }
    }
}

/// Result of a d20 roll under a [`RollMode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct D20Roll {
    /// The face that counts.
    pub natural: u32,
    /// The other face when two dice were rolled.
    pub discarded: Option<u32>,
    pub mode: RollMode,
}

impl fmt::Display for D20Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.discarded {
            Some(other) => write!(f, "{} ({} dropped)", self.natural, other),
            None => write!(f, "{}", self.natural),
        }
    }
}

/// `count` dice with `sides` faces each, e.g. `2d6`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiceSpec {
    pub count: u32,
    pub sides: u32,
}

impl DiceSpec {
    pub const fn new(count: u32, sides: u32) -> Self {
        Self { count, sides }
    }

    pub fn roll(&self, rng: &mut (impl RngSource + ?Sized)) -> u32 {
        self.roll_rerolling(rng, 0)
    }

    /// Rolls every die, rerolling once each face at or below `floor`.
    /// The reroll stands even if it is lower.
    pub fn roll_rerolling(&self, rng: &mut (impl RngSource + ?Sized), floor: u32) -> u32 {
        (0..self.count)
            .map(|_| {
                let face = rng.roll_die(self.sides);
                if face <= floor { rng.roll_die(self.sides) } else { face }
            })
            .sum()
    }

    /// Same dice, twice as many of them.
    pub const fn doubled(&self) -> Self {
        Self {
            count: self.count * 2,
            sides: self.sides,
        }
    }
}

impl fmt::Display for DiceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 64-bit LCG state, 32-bit permuted output.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        Self {
            state: Self::scramble(seed),
        }
    }

    /// SplitMix64 finalizer so nearby seeds start far apart.
    fn scramble(seed: u64) -> u64 {
        let mut hash = seed ^ 0x9e3779b97f4a7c15;
        hash ^= hash >> 33;
        hash = hash.wrapping_mul(0xff51afd7ed558ccd);
        hash ^= hash >> 33;
        hash
    }

    /// `state' = (state * multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngSource for PcgRng {
    fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }
}

/// Replays a fixed list of values, cycling when it runs out.
///
/// [`roll_die`](RngSource::roll_die) returns the scripted value itself
/// (wrapped into the die's range), so a script reads as the faces rolled.
/// An empty script always rolls 1.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptedRng {
    values: VecDeque<u32>,
}

impl ScriptedRng {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    fn next_value(&mut self) -> u32 {
        match self.values.pop_front() {
            Some(value) => {
                self.values.push_back(value);
                value
            }
            None => 0,
        }
    }
}

impl RngSource for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        self.next_value()
    }

    fn roll_die(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        ((self.next_value().max(1) - 1) % sides) + 1
    }
}
