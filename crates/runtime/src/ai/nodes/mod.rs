//! Behavior-tree leaves for combat turns.
//!
//! Leaves are tags, not closures:
//!
//! - `conditions`: [`Check`] questions about the turn context
//! - `actions`: [`Op`] steps that spend the actor's resources

pub mod actions;
pub mod conditions;

pub use actions::Op;
pub use conditions::Check;
