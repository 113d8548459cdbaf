//! # Invaders Core
//!
//! Deterministic simulation core for the grid-invaders arcade game.
//!
//! This crate contains **only** deterministic logic:
//! - No rendering
//! - No IO
//! - No system randomness (seeded PRNG only)
//! - No wall clock
//!
//! The separation keeps the simulation reproducible: a seed and a
//! configuration fully determine every tick, which makes games replayable
//! and the test suite exact.
//!
//! ## Crate Structure
//!
//! - [`entity`] - entity model, grid, and clamped movement
//! - [`factory`] - entity creation with canonical placement
//! - [`collision`] - pairwise collision classification and reaction
//! - [`engine`] - tick loop, level progression, and termination
//! - [`events`] - typed notifications and the output-sink trait
//! - [`error`] - error taxonomy

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod collision;
pub mod engine;
pub mod entity;
pub mod error;
pub mod events;
pub mod factory;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::collision::{collides, CollisionOutcome, CollisionResolver};
    pub use crate::engine::{Engine, EngineConfig, GamePhase, GameReport};
    pub use crate::entity::{Bounds, Entity, EntityId, EntityKind, Grid, Health, Position};
    pub use crate::error::{GameError, Result};
    pub use crate::events::{EventSink, GameEvent, NullSink, RecordingSink};
    pub use crate::factory::EntityFactory;
}
