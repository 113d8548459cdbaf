//! Pairwise collision classification and reaction.
//!
//! The engine decides *whether* two entities collide (exact position
//! equality); the resolver decides *what that means*. Handlers form an
//! ordered list, each matching one kind signature. The first matching
//! handler wins: the two reactions here are neither commutative nor
//! idempotent, so a pair is never handled twice.
//!
//! Handlers report the collision to the sink and return a
//! [`CollisionOutcome`] describing the reaction; the engine applies the
//! state changes (removal, scoring, termination).

use std::fmt;

use crate::entity::{Entity, EntityKind};
use crate::events::{EventSink, GameEvent};

/// Damage a bullet deals to whatever it hits.
pub const BULLET_DAMAGE: u32 = 1;

/// Check whether two entities collide.
///
/// Collision is exact positional coincidence on both coordinates,
/// irrespective of footprint. Symmetric by construction.
#[must_use]
pub fn collides(a: &Entity, b: &Entity) -> bool {
    a.position == b.position
}

/// The reaction a handler asks the engine to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    /// The player was struck; the run ends in defeat.
    PlayerDown,
    /// An invader was shot; remove bullet and invader, score one point.
    InvaderShot,
}

/// One entry in the resolver's ordered handler list.
///
/// A handler inspects an ordered pair, and on a kind-signature match reports
/// the collision and returns its outcome. A non-match returns `None` and the
/// resolver moves on to the next handler.
pub trait CollisionHandler: fmt::Debug {
    /// Classify the ordered pair and react on a match.
    fn handle(
        &self,
        first: &Entity,
        second: &Entity,
        sink: &mut dyn EventSink,
    ) -> Option<CollisionOutcome>;
}

/// Reacts to the player sharing a cell with an invader: fatal collision.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerInvaderHandler;

impl CollisionHandler for PlayerInvaderHandler {
    fn handle(
        &self,
        first: &Entity,
        second: &Entity,
        sink: &mut dyn EventSink,
    ) -> Option<CollisionOutcome> {
        if first.kind != EntityKind::Player || second.kind != EntityKind::Invader {
            return None;
        }
        sink.notify(&GameEvent::PlayerStruck {
            x: second.position.x,
            y: second.position.y,
        });
        Some(CollisionOutcome::PlayerDown)
    }
}

/// Reacts to a bullet sharing a cell with an invader: invader destroyed.
#[derive(Debug, Clone, Copy, Default)]
pub struct BulletInvaderHandler;

impl CollisionHandler for BulletInvaderHandler {
    fn handle(
        &self,
        first: &Entity,
        second: &Entity,
        sink: &mut dyn EventSink,
    ) -> Option<CollisionOutcome> {
        if first.kind != EntityKind::Bullet || second.kind != EntityKind::Invader {
            return None;
        }
        sink.notify(&GameEvent::InvaderDestroyed {
            x: second.position.x,
            y: second.position.y,
        });
        Some(CollisionOutcome::InvaderShot)
    }
}

/// Ordered list of collision handlers.
#[derive(Debug)]
pub struct CollisionResolver {
    handlers: Vec<Box<dyn CollisionHandler>>,
}

impl CollisionResolver {
    /// Resolver with the two standard handlers, player collisions first.
    #[must_use]
    pub fn new() -> Self {
        Self::with_handlers(vec![
            Box::new(PlayerInvaderHandler),
            Box::new(BulletInvaderHandler),
        ])
    }

    /// Resolver with a custom handler list, in dispatch order.
    #[must_use]
    pub fn with_handlers(handlers: Vec<Box<dyn CollisionHandler>>) -> Self {
        Self { handlers }
    }

    /// Dispatch an ordered pair to the first handler that matches it.
    ///
    /// Returns `None` when no handler recognizes the pair's kind signature.
    pub fn resolve(
        &self,
        first: &Entity,
        second: &Entity,
        sink: &mut dyn EventSink,
    ) -> Option<CollisionOutcome> {
        self.handlers
            .iter()
            .find_map(|handler| handler.handle(first, second, sink))
    }
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::entity::{Position, DEFAULT_GRID_SIZE};
    use crate::events::RecordingSink;

    fn entity_at(kind: EntityKind, x: i32, y: i32) -> Entity {
        Entity::new(0, kind, Position::new(x, y), 1)
    }

    #[test]
    fn bullet_on_invader_is_a_kill() {
        let bullet = entity_at(EntityKind::Bullet, 5, 3);
        let invader = entity_at(EntityKind::Invader, 5, 3);
        let mut sink = RecordingSink::default();

        let resolver = CollisionResolver::new();
        assert!(collides(&bullet, &invader));
        assert_eq!(
            resolver.resolve(&bullet, &invader, &mut sink),
            Some(CollisionOutcome::InvaderShot)
        );
        assert_eq!(sink.events, vec![GameEvent::InvaderDestroyed { x: 5, y: 3 }]);
    }

    #[test]
    fn player_on_invader_ends_the_game() {
        let player = entity_at(EntityKind::Player, 10, 19);
        let invader = entity_at(EntityKind::Invader, 10, 19);
        let mut sink = RecordingSink::default();

        let outcome = CollisionResolver::new().resolve(&player, &invader, &mut sink);
        assert_eq!(outcome, Some(CollisionOutcome::PlayerDown));
        assert_eq!(sink.events, vec![GameEvent::PlayerStruck { x: 10, y: 19 }]);
    }

    #[test]
    fn unrecognized_pairs_are_ignored() {
        let bullet = entity_at(EntityKind::Bullet, 1, 1);
        let player = entity_at(EntityKind::Player, 1, 1);
        let mut sink = RecordingSink::default();

        let resolver = CollisionResolver::new();
        assert_eq!(resolver.resolve(&bullet, &player, &mut sink), None);
        assert_eq!(resolver.resolve(&player, &bullet, &mut sink), None);
        assert!(sink.events.is_empty());
    }

    #[test]
    fn first_matching_handler_wins() {
        // Two handlers matching the same signature: only the first reacts.
        let resolver = CollisionResolver::with_handlers(vec![
            Box::new(BulletInvaderHandler),
            Box::new(BulletInvaderHandler),
        ]);
        let bullet = entity_at(EntityKind::Bullet, 2, 2);
        let invader = entity_at(EntityKind::Invader, 2, 2);
        let mut sink = RecordingSink::default();

        resolver.resolve(&bullet, &invader, &mut sink);
        assert_eq!(sink.events.len(), 1);
    }

    proptest! {
        /// `collides(a, b) == collides(b, a)` for every pair of positions.
        #[test]
        fn collision_is_symmetric(
            ax in 0i32..DEFAULT_GRID_SIZE,
            ay in 0i32..DEFAULT_GRID_SIZE,
            bx in 0i32..DEFAULT_GRID_SIZE,
            by in 0i32..DEFAULT_GRID_SIZE,
        ) {
            let a = entity_at(EntityKind::Bullet, ax, ay);
            let b = entity_at(EntityKind::Invader, bx, by);
            prop_assert_eq!(collides(&a, &b), collides(&b, &a));
        }
    }
}
