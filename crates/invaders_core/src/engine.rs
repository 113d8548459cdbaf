//! Core simulation engine.
//!
//! The engine owns the live entity collections and advances the game one
//! tick at a time. Each tick runs in a fixed order:
//!
//! 1. Simulated player action (maybe move, then fire).
//! 2. Invader descent, with an immediate defeat check against the player.
//! 3. Bullet advance and bullet/invader collision resolution, guarded by
//!    the tick fault policy.
//! 4. Level-clear check.
//!
//! Everything is deterministic for a given [`EngineConfig`]: the only
//! randomness is a seeded PRNG, and collections are iterated in insertion
//! order. Removal never happens mid-iteration; each pass collects its
//! casualties and applies them afterwards.
//!
//! # Example
//!
//! ```
//! use invaders_core::engine::{Engine, EngineConfig, GamePhase};
//! use invaders_core::events::NullSink;
//!
//! let engine = Engine::new(EngineConfig { seed: 7, ..Default::default() });
//! assert_eq!(engine.phase(), GamePhase::Idle);
//!
//! let report = engine.run(&mut NullSink);
//! assert!(matches!(
//!     report.outcome,
//!     GamePhase::PlayerDefeated | GamePhase::AllLevelsCleared
//! ));
//! ```

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::collision::{collides, CollisionOutcome, CollisionResolver, BULLET_DAMAGE};
use crate::entity::{Entity, EntityId, EntityKind, Grid, Position};
use crate::error::{GameError, Result};
use crate::events::{EventSink, GameEvent};
use crate::factory::EntityFactory;

/// Number of levels in a standard game.
pub const DEFAULT_MAX_LEVEL: u32 = 5;

/// Probability that the simulated player acts (moves and fires) on a tick.
pub const DEFAULT_ACTION_CHANCE: f64 = 0.5;

/// Phase of the engine's state machine.
///
/// `Idle` precedes the first level. `LevelCleared` is transient between
/// levels; `PlayerDefeated` and `AllLevelsCleared` are terminal, and a
/// finished engine can never run again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// No active level.
    Idle,
    /// A level is in progress.
    Running,
    /// The current level's invaders are gone; more levels remain.
    LevelCleared,
    /// Terminal: an invader reached the player.
    PlayerDefeated,
    /// Terminal: the final level was cleared.
    AllLevelsCleared,
}

impl GamePhase {
    /// Check whether this phase ends the game permanently.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::PlayerDefeated | Self::AllLevelsCleared)
    }
}

/// Configuration for a single game.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Play grid.
    pub grid: Grid,
    /// Seed for all simulation randomness.
    pub seed: u64,
    /// Number of levels; level `k` spawns `k` invaders.
    pub max_level: u32,
    /// Probability in `[0, 1]` that the player acts on a given tick.
    pub action_chance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid: Grid::default(),
            seed: 0,
            max_level: DEFAULT_MAX_LEVEL,
            action_chance: DEFAULT_ACTION_CHANCE,
        }
    }
}

/// Final outcome of a game, reported once at termination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameReport {
    /// Terminal phase the game ended in.
    pub outcome: GamePhase,
    /// Invaders destroyed across all play.
    pub score: u32,
    /// Highest level that was started.
    pub level_reached: u32,
    /// Total ticks simulated.
    pub ticks: u64,
}

/// The simulation engine.
///
/// Owns every live entity exclusively. Construct one per game; [`run`]
/// consumes the engine, so a finished game cannot be restarted in place.
///
/// [`run`]: Engine::run
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    phase: GamePhase,
    level: u32,
    tick: u64,
    player: Option<Entity>,
    invaders: Vec<Entity>,
    bullets: Vec<Entity>,
    factory: EntityFactory,
    resolver: CollisionResolver,
    rng: Pcg32,
}

impl Engine {
    /// Create an idle engine for the given configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        debug_assert!(
            (0.0..=1.0).contains(&config.action_chance),
            "action chance must be a probability"
        );
        let mut rng = Pcg32::seed_from_u64(config.seed);
        let factory = EntityFactory::new(config.grid, rng.random());
        Self {
            phase: GamePhase::Idle,
            level: 0,
            tick: 0,
            player: None,
            invaders: Vec::new(),
            bullets: Vec::new(),
            factory,
            resolver: CollisionResolver::new(),
            rng,
            config,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Whether a level is in progress.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Invaders destroyed so far.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.player.as_ref().map_or(0, Entity::score)
    }

    /// Current level number; 0 before the first level starts.
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Ticks simulated so far.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// The player, once the first level has started.
    #[must_use]
    pub fn player(&self) -> Option<&Entity> {
        self.player.as_ref()
    }

    /// Live invaders.
    #[must_use]
    pub fn invaders(&self) -> &[Entity] {
        &self.invaders
    }

    /// Live bullets.
    #[must_use]
    pub fn bullets(&self) -> &[Entity] {
        &self.bullets
    }

    /// Play a full game: levels `1..=max_level`, each ticked until it
    /// resolves. Consumes the engine; a new game needs a new engine.
    pub fn run(mut self, sink: &mut dyn EventSink) -> GameReport {
        sink.notify(&GameEvent::GameStarted);

        for level in 1..=self.config.max_level {
            if let Err(error) = self.start_level(level, sink) {
                tracing::error!(%error, level, "level initialization failed");
                break;
            }
            while self.tick(sink) == GamePhase::Running {}
            if self.phase.is_terminal() {
                break;
            }
        }

        GameReport {
            outcome: self.phase,
            score: self.score(),
            level_reached: self.level,
            ticks: self.tick,
        }
    }

    /// Begin a level: spawn the player if absent, clear leftover bullets,
    /// and spawn `level` invaders along the top row.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidState`] if the game has already ended.
    pub fn start_level(&mut self, level: u32, sink: &mut dyn EventSink) -> Result<()> {
        if self.phase.is_terminal() {
            return Err(GameError::InvalidState(format!(
                "cannot start level {level}: the game is over"
            )));
        }

        if self.player.is_none() {
            self.player = Some(self.factory.create(EntityKind::Player));
        }

        self.level = level;
        self.phase = GamePhase::Running;
        self.invaders.clear();
        self.bullets.clear();

        sink.notify(&GameEvent::LevelStarted { level });
        for _ in 0..level {
            let invader = self.factory.create(EntityKind::Invader);
            sink.notify(&GameEvent::InvaderSpawned {
                x: invader.position.x,
                y: invader.position.y,
            });
            self.invaders.push(invader);
        }

        Ok(())
    }

    /// Advance the simulation by one tick and return the resulting phase.
    ///
    /// A tick on an engine that is not `Running` changes nothing.
    pub fn tick(&mut self, sink: &mut dyn EventSink) -> GamePhase {
        if self.phase != GamePhase::Running {
            return self.phase;
        }
        self.tick += 1;

        self.simulate_player(sink);

        if self.advance_invaders(sink) {
            return self.phase;
        }

        if let Err(fault) = self.process_bullets(sink) {
            tracing::warn!(%fault, "bullet step abandoned for this tick");
            let message = match fault {
                GameError::TickFault { message, .. } => message,
                other => other.to_string(),
            };
            sink.notify(&GameEvent::TickFault {
                tick: self.tick,
                message,
            });
        }

        if self.invaders.is_empty() {
            self.complete_level(sink);
        }

        tracing::debug!(
            tick = self.tick,
            phase = ?self.phase,
            invaders = self.invaders.len(),
            bullets = self.bullets.len(),
            score = self.score(),
            "tick complete"
        );

        self.phase
    }

    /// Maybe move the player one column and fire a bullet.
    ///
    /// The bullet spawns one row above the player; the reposition happens
    /// before the bullet joins the live collection, so no bullet is ever
    /// live at the factory's placeholder position.
    fn simulate_player(&mut self, sink: &mut dyn EventSink) {
        if !self.rng.random_bool(self.config.action_chance) {
            return;
        }
        let grid = self.config.grid;
        let step_left = self.rng.random_bool(0.5);

        let Some(player) = self.player.as_mut() else {
            return;
        };
        if step_left {
            player.move_left();
        } else {
            player.move_right(grid);
        }
        let fire_from = player.position;

        let mut bullet = self.factory.create(EntityKind::Bullet);
        bullet.position = Position::new(fire_from.x, fire_from.y - 1);
        sink.notify(&GameEvent::BulletFired {
            x: fire_from.x,
            y: fire_from.y,
        });
        self.bullets.push(bullet);
    }

    /// Move every invader down one row. Returns `true` on defeat, in which
    /// case the tick performs no further processing. Invaders that reach
    /// the floor without striking the player leave without scoring.
    fn advance_invaders(&mut self, sink: &mut dyn EventSink) -> bool {
        let grid = self.config.grid;
        for invader in &mut self.invaders {
            invader.move_down(grid);
        }

        if let Some(player) = self.player.as_ref() {
            if let Some(invader) = self
                .invaders
                .iter()
                .find(|invader| collides(player, invader))
            {
                if self.resolver.resolve(player, invader, sink)
                    == Some(CollisionOutcome::PlayerDown)
                {
                    let score = player.score();
                    self.phase = GamePhase::PlayerDefeated;
                    sink.notify(&GameEvent::PlayerDefeated { score });
                    return true;
                }
            }
        }

        let floor = grid.floor();
        self.invaders.retain(|invader| invader.position.y < floor);
        false
    }

    /// Advance bullets and resolve their collisions.
    ///
    /// Bullets already on the top row exit the grid instead of advancing.
    /// Every invader sharing a cell with a bullet is destroyed and scored;
    /// the bullet itself is spent once. Casualties are collected during the
    /// pass and removed after it.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::TickFault`] if the live bullet collection is
    /// corrupted (a bullet outside the grid). The caller treats this as
    /// non-fatal and skips the step.
    fn process_bullets(&mut self, sink: &mut dyn EventSink) -> Result<()> {
        let grid = self.config.grid;
        if let Some(bullet) = self
            .bullets
            .iter()
            .find(|bullet| !grid.contains(bullet.position))
        {
            return Err(GameError::TickFault {
                tick: self.tick,
                message: format!(
                    "bullet {} is outside the grid at ({}, {})",
                    bullet.id, bullet.position.x, bullet.position.y
                ),
            });
        }

        self.bullets.retain(|bullet| bullet.position.y > 0);
        for bullet in &mut self.bullets {
            bullet.move_up();
        }

        let mut spent: Vec<EntityId> = Vec::new();
        for bullet in &self.bullets {
            for invader in &mut self.invaders {
                if invader.health.is_dead() || !collides(bullet, invader) {
                    continue;
                }
                if self.resolver.resolve(bullet, invader, sink)
                    == Some(CollisionOutcome::InvaderShot)
                {
                    invader.health.apply_damage(BULLET_DAMAGE);
                    if invader.health.is_dead() {
                        if let Some(player) = self.player.as_mut() {
                            player.increase_score(1);
                        }
                    }
                    if !spent.contains(&bullet.id) {
                        spent.push(bullet.id);
                    }
                }
            }
        }

        self.invaders.retain(|invader| !invader.health.is_dead());
        self.bullets.retain(|bullet| !spent.contains(&bullet.id));
        Ok(())
    }

    /// Close out a level whose invaders are gone.
    fn complete_level(&mut self, sink: &mut dyn EventSink) {
        sink.notify(&GameEvent::LevelCleared {
            level: self.level,
            score: self.score(),
        });
        if self.level >= self.config.max_level {
            self.phase = GamePhase::AllLevelsCleared;
            sink.notify(&GameEvent::AllLevelsCleared { score: self.score() });
        } else {
            self.phase = GamePhase::LevelCleared;
        }
    }
}
