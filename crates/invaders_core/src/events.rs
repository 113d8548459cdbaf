//! Typed game events and the output-sink interface.
//!
//! The simulation never prints. Everything a player would want to hear about
//! is reported as a [`GameEvent`] to an [`EventSink`]; the presentation layer
//! decides what to do with it. `Display` carries the human-readable text.

use std::fmt;

use serde::Serialize;

/// A notification produced by the engine or a collision handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// The game began; a player was placed on the grid.
    GameStarted,
    /// A level began.
    LevelStarted {
        /// Level number, starting at 1.
        level: u32,
    },
    /// An invader appeared on the spawn row.
    InvaderSpawned {
        /// Spawn column.
        x: i32,
        /// Spawn row (always the top row).
        y: i32,
    },
    /// The player moved and fired a bullet.
    BulletFired {
        /// Player column at the moment of firing.
        x: i32,
        /// Player row at the moment of firing.
        y: i32,
    },
    /// A bullet destroyed an invader.
    InvaderDestroyed {
        /// Collision column.
        x: i32,
        /// Collision row.
        y: i32,
    },
    /// An invader reached the player's cell.
    PlayerStruck {
        /// Collision column.
        x: i32,
        /// Collision row.
        y: i32,
    },
    /// The invader collection emptied while the level was running.
    LevelCleared {
        /// The cleared level.
        level: u32,
        /// Running score after the level.
        score: u32,
    },
    /// Terminal loss: an invader struck the player.
    PlayerDefeated {
        /// Final score.
        score: u32,
    },
    /// Terminal win: every level was cleared.
    AllLevelsCleared {
        /// Final score.
        score: u32,
    },
    /// A tick's bullet step was abandoned after an internal fault.
    TickFault {
        /// Tick during which the fault was detected.
        tick: u64,
        /// Description of the fault.
        message: String,
    },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GameStarted => write!(f, "Game started"),
            Self::LevelStarted { level } => write!(f, "Starting level {level}"),
            Self::InvaderSpawned { x, y } => write!(f, "Invader spawned at ({x}, {y})"),
            Self::BulletFired { x, y } => {
                write!(f, "Pew! Player shoots and moves from ({x}, {y})")
            }
            Self::InvaderDestroyed { x, y } => {
                write!(f, "[BOOM!] Invader destroyed at ({x}, {y})")
            }
            Self::PlayerStruck { x, y } => {
                write!(f, "[CRASH!] Player collided with an invader at ({x}, {y})")
            }
            Self::LevelCleared { level, score } => {
                write!(f, "Level {level} cleared, {score} invader(s) destroyed so far")
            }
            Self::PlayerDefeated { score } => {
                write!(f, "Game over. Player lost but destroyed {score} invader(s)")
            }
            Self::AllLevelsCleared { score } => {
                write!(f, "Player completed all levels! Invaders destroyed: {score}")
            }
            Self::TickFault { tick, message } => {
                write!(f, "Simulation fault on tick {tick}: {message}")
            }
        }
    }
}

/// Receiver for game notifications.
///
/// Fire-and-forget: sinks may not fail and the engine never waits on them.
pub trait EventSink {
    /// Deliver one event.
    fn notify(&mut self, event: &GameEvent);
}

/// Sink that discards every event. Useful for benchmarks and headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn notify(&mut self, _event: &GameEvent) {}
}

/// Sink that keeps every event in order. Useful for tests and replays.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    /// Events in delivery order.
    pub events: Vec<GameEvent>,
}

impl RecordingSink {
    /// Count recorded events matching a predicate.
    #[must_use]
    pub fn count_matching(&self, predicate: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.iter().filter(|event| predicate(event)).count()
    }
}

impl EventSink for RecordingSink {
    fn notify(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_text_matches_the_console_voice() {
        let fired = GameEvent::BulletFired { x: 10, y: 19 };
        assert_eq!(fired.to_string(), "Pew! Player shoots and moves from (10, 19)");

        let struck = GameEvent::PlayerStruck { x: 4, y: 19 };
        assert_eq!(
            struck.to_string(),
            "[CRASH!] Player collided with an invader at (4, 19)"
        );

        let won = GameEvent::AllLevelsCleared { score: 15 };
        assert_eq!(
            won.to_string(),
            "Player completed all levels! Invaders destroyed: 15"
        );
    }

    #[test]
    fn recording_sink_preserves_order() {
        let mut sink = RecordingSink::default();
        sink.notify(&GameEvent::GameStarted);
        sink.notify(&GameEvent::LevelStarted { level: 1 });

        assert_eq!(
            sink.events,
            vec![GameEvent::GameStarted, GameEvent::LevelStarted { level: 1 }]
        );
        assert_eq!(
            sink.count_matching(|e| matches!(e, GameEvent::LevelStarted { .. })),
            1
        );
    }

    #[test]
    fn events_serialize_with_a_tag() {
        let json = serde_json::to_value(GameEvent::InvaderSpawned { x: 3, y: 0 }).unwrap();
        assert_eq!(json["event"], "invader_spawned");
        assert_eq!(json["x"], 3);
    }
}
