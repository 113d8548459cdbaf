//! Entity model: kinds, positions, bounds, health, and grid-clamped movement.
//!
//! Entities are a single record with a kind tag rather than a type hierarchy.
//! Only the player carries a score; invaders and bullets are plain positioned
//! health-bearers. All movement saturates at the grid edges: an out-of-bounds
//! request is a silent no-op, never an error and never a wrap.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Unique identifier for entities.
pub type EntityId = u64;

/// Default side length of the square play grid.
pub const DEFAULT_GRID_SIZE: i32 = 20;

/// The bounded integer coordinate space entities move within.
///
/// Coordinates on both axes stay in `[0, size - 1]` after any move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: i32,
}

impl Grid {
    /// Create a square grid with the given side length.
    #[must_use]
    pub fn new(size: i32) -> Self {
        debug_assert!(size > 1, "grid must have room for a player and a spawn row");
        Self { size }
    }

    /// Side length of the grid.
    #[must_use]
    pub const fn size(&self) -> i32 {
        self.size
    }

    /// Index of the bottom row (`size - 1`), where invaders exit and the
    /// player lives.
    #[must_use]
    pub const fn floor(&self) -> i32 {
        self.size - 1
    }

    /// Check whether a position lies inside the grid.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.x >= 0 && position.x < self.size && position.y >= 0 && position.y < self.size
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE)
    }
}

/// Kind tag distinguishing the three simulated entity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// The defending player ship at the bottom of the grid.
    Player,
    /// A descending invader.
    Invader,
    /// A projectile fired by the player.
    Bullet,
}

impl EntityKind {
    /// Canonical lowercase tag for this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Invader => "invader",
            Self::Bullet => "bullet",
        }
    }
}

impl FromStr for EntityKind {
    type Err = GameError;

    /// Parse a kind tag.
    ///
    /// Unrecognized tags fail with [`GameError::UnknownEntityKind`]; this is
    /// the explicit failure point that keeps a kindless entity out of the
    /// simulation.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "player" => Ok(Self::Player),
            "invader" => Ok(Self::Invader),
            "bullet" => Ok(Self::Bullet),
            other => Err(GameError::UnknownEntityKind(other.to_string())),
        }
    }
}

/// Integer grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column, 0 at the left edge.
    pub x: i32,
    /// Row, 0 at the top edge.
    pub y: i32,
}

impl Position {
    /// Create a position at the given coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The top-left corner of the grid.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };
}

/// Integer footprint, used only for clamping movement at grid edges.
///
/// Collision ignores bounds entirely; it is decided by point equality of
/// positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    /// Footprint width in cells.
    pub width: i32,
    /// Footprint height in cells.
    pub height: i32,
}

impl Bounds {
    /// A single-cell footprint, used by all current entity kinds.
    pub const POINT: Self = Self {
        width: 1,
        height: 1,
    };
}

/// Health component for damageable entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// Current health points.
    pub current: u32,
    /// Maximum health points.
    pub max: u32,
}

impl Health {
    /// Create a new health component at full health.
    #[must_use]
    pub const fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Check if the entity is destroyed (health == 0).
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.current == 0
    }

    /// Apply damage, returning actual damage dealt.
    /// Uses saturating subtraction to prevent underflow.
    pub fn apply_damage(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.current);
        self.current = self.current.saturating_sub(actual);
        actual
    }
}

/// A positioned, health-bearing simulation object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique identifier, assigned by the factory.
    pub id: EntityId,
    /// Kind tag.
    pub kind: EntityKind,
    /// Current grid position.
    pub position: Position,
    /// Footprint for edge clamping.
    pub bounds: Bounds,
    /// Remaining health.
    pub health: Health,
    /// Destroyed-invader count; `Some` only for the player.
    pub score: Option<u32>,
}

impl Entity {
    /// Create an entity at full health.
    ///
    /// The player starts with a zero score; other kinds carry none.
    #[must_use]
    pub fn new(id: EntityId, kind: EntityKind, position: Position, max_health: u32) -> Self {
        Self {
            id,
            kind,
            position,
            bounds: Bounds::POINT,
            health: Health::new(max_health),
            score: match kind {
                EntityKind::Player => Some(0),
                EntityKind::Invader | EntityKind::Bullet => None,
            },
        }
    }

    /// Move one column left; a no-op at the left edge.
    pub fn move_left(&mut self) {
        if self.position.x > 0 {
            self.position.x -= 1;
        }
    }

    /// Move one column right; a no-op at the right edge.
    pub fn move_right(&mut self, grid: Grid) {
        if self.position.x < grid.size() - self.bounds.width {
            self.position.x += 1;
        }
    }

    /// Move one row up; a no-op at the top edge.
    pub fn move_up(&mut self) {
        if self.position.y > 0 {
            self.position.y -= 1;
        }
    }

    /// Move one row down; a no-op at the grid floor.
    pub fn move_down(&mut self, grid: Grid) {
        if self.position.y < grid.size() - self.bounds.height {
            self.position.y += 1;
        }
    }

    /// Current score; zero for kinds that carry none.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score.unwrap_or(0)
    }

    /// Add points to the score, if this entity keeps one.
    pub fn increase_score(&mut self, points: u32) {
        if let Some(score) = self.score.as_mut() {
            *score += points;
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn kind_tags_round_trip() {
        for kind in [EntityKind::Player, EntityKind::Invader, EntityKind::Bullet] {
            assert_eq!(kind.as_str().parse::<EntityKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kind_tag_is_an_explicit_error() {
        let err = "mothership".parse::<EntityKind>().unwrap_err();
        assert!(matches!(err, GameError::UnknownEntityKind(tag) if tag == "mothership"));
    }

    #[test]
    fn moves_clamp_at_every_edge() {
        let grid = Grid::default();
        let mut entity = Entity::new(1, EntityKind::Player, Position::ORIGIN, 1);

        entity.move_left();
        entity.move_up();
        assert_eq!(entity.position, Position::ORIGIN);

        entity.position = Position::new(grid.floor(), grid.floor());
        entity.move_right(grid);
        entity.move_down(grid);
        assert_eq!(entity.position, Position::new(19, 19));
    }

    #[test]
    fn only_the_player_keeps_score() {
        let mut player = Entity::new(1, EntityKind::Player, Position::ORIGIN, 100);
        let mut invader = Entity::new(2, EntityKind::Invader, Position::ORIGIN, 1);

        player.increase_score(3);
        invader.increase_score(3);

        assert_eq!(player.score(), 3);
        assert_eq!(invader.score(), 0);
        assert_eq!(invader.score, None);
    }

    #[test]
    fn damage_saturates_at_zero() {
        let mut health = Health::new(1);
        assert_eq!(health.apply_damage(5), 1);
        assert!(health.is_dead());
        assert_eq!(health.apply_damage(5), 0);
    }

    /// A single move request, for property tests.
    #[derive(Debug, Clone, Copy)]
    enum Move {
        Left,
        Right,
        Up,
        Down,
    }

    fn arb_move() -> impl Strategy<Value = Move> {
        prop_oneof![
            Just(Move::Left),
            Just(Move::Right),
            Just(Move::Up),
            Just(Move::Down),
        ]
    }

    proptest! {
        /// No sequence of moves ever produces a coordinate outside the grid.
        #[test]
        fn movement_never_escapes_the_grid(
            x in 0i32..DEFAULT_GRID_SIZE,
            y in 0i32..DEFAULT_GRID_SIZE,
            moves in proptest::collection::vec(arb_move(), 0..64),
        ) {
            let grid = Grid::default();
            let mut entity = Entity::new(1, EntityKind::Invader, Position::new(x, y), 1);

            for request in moves {
                match request {
                    Move::Left => entity.move_left(),
                    Move::Right => entity.move_right(grid),
                    Move::Up => entity.move_up(),
                    Move::Down => entity.move_down(grid),
                }
                prop_assert!(grid.contains(entity.position));
            }
        }
    }
}
