//! Drop-race physics for Plummet
//!
//! This crate is the collision & response core of the drop race:
//! - Per-tick gravity integration of falling bodies
//! - Type-specific narrow-phase collision against course obstacles
//! - Body-body impulse exchange
//! - Boundary containment, velocity capping and stuck recovery
//!
//! The engine mutates bodies in place once per frame via
//! [`RaceWorld::step`] and reports finishers through a callback.

pub mod body;
pub mod collision;
pub mod obstacle;
pub mod stuck;
pub mod world;

// Re-export commonly used types
pub use body::Body;
pub use obstacle::{Bumper, FunnelWall, Launcher, MovingPlatform, Obstacle, Peg, Platform, Spinner};
pub use stuck::{StuckAction, StuckConfig, StuckTracker};
pub use world::{RaceConfig, RaceWorld};
