//! Console event sink.

use std::thread;
use std::time::Duration;

use invaders_core::events::{EventSink, GameEvent};

/// Sink that prints every event to stdout in the game's console voice.
///
/// An optional pacing delay is applied after each shot so a watching human
/// can follow the action. Pacing is presentation-only: the simulation is
/// oblivious to it, and headless consumers simply construct the sink
/// without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink {
    pace: Option<Duration>,
}

impl ConsoleSink {
    /// Sink with a pacing delay in milliseconds; 0 disables pacing.
    #[must_use]
    pub fn with_pace(delay_ms: u64) -> Self {
        Self {
            pace: (delay_ms > 0).then(|| Duration::from_millis(delay_ms)),
        }
    }
}

impl EventSink for ConsoleSink {
    fn notify(&mut self, event: &GameEvent) {
        println!("{event}");
        match event {
            GameEvent::GameStarted => println!("------------"),
            GameEvent::LevelStarted { .. } => println!("--------------"),
            GameEvent::BulletFired { .. } => {
                if let Some(pace) = self.pace {
                    thread::sleep(pace);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_delay_disables_pacing() {
        assert!(ConsoleSink::with_pace(0).pace.is_none());
        assert_eq!(
            ConsoleSink::with_pace(250).pace,
            Some(Duration::from_millis(250))
        );
    }

    #[test]
    fn unpaced_sink_delivers_without_blocking() {
        let mut sink = ConsoleSink::with_pace(0);
        sink.notify(&GameEvent::GameStarted);
        sink.notify(&GameEvent::BulletFired { x: 10, y: 19 });
    }
}
