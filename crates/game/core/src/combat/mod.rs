//! Attack resolution.
//!
//! Pure rule functions live in [`hit`] and [`damage`]. [`CombatResolver`]
//! strings them into the full pipeline:
//!
//! attack roll -> hit/critical -> damage roll -> reductions -> vitality
//!
//! and handles the reactions that interrupt it (opportunity attacks,
//! protection, interception).

pub mod damage;
pub mod hit;
mod log;
mod reactions;
mod resolver;
mod result;

pub use damage::{DamageRoll, interception_reduction, reduce, roll_damage};
pub use hit::check_hit;
pub use log::CombatLog;
pub use resolver::CombatResolver;
pub use result::{AttackOutcome, AttackReport};
