//! Behavior tree primitives for turn-based decision making.
//!
//! Trees are plain data: composites own their children, and leaves wrap a
//! caller-defined tag type (usually an enum) that knows how to evaluate itself
//! against a context. Nothing captures closures, so a tree can be rebuilt
//! cheaply every turn.
//!
//! - **No Running state**: every tick resolves to [`Status::Success`] or
//!   [`Status::Failure`] immediately
//! - **Fixed-point polling**: [`drive`] re-ticks a root until it fails, with a
//!   hard iteration cap so a misbehaving tree can never spin forever
//! - **Zero dependencies**
//!
//! # Architecture
//!
//! - [`Behavior`]: core trait for all nodes, boxed as [`Node`]
//! - Composite nodes: [`Sequence`], [`Selector`]
//! - Decorator node: [`Inverter`]
//! - Leaf nodes: [`Condition`] over a [`Predicate`], [`Action`] over an [`Operation`]

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod decorator;
pub mod driver;
pub mod leaf;
pub mod status;

pub use behavior::{Behavior, Node};
pub use composite::{Selector, Sequence};
pub use decorator::Inverter;
pub use driver::{PollReport, drive};
pub use leaf::{Action, Condition, Operation, Predicate};
pub use status::Status;
