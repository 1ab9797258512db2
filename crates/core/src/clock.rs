//! Countdown abstraction driven by externally delivered ticks.

/// What a single tick did to the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    /// One second elapsed; `remaining` seconds are left.
    Tick { remaining: u32 },
    /// The countdown reached zero. Emitted once per arming.
    Expired,
    /// The clock was not armed; nothing changed.
    Idle,
}

/// A countdown that the host advances one second at a time.
pub trait SessionClock {
    /// Start counting down from `duration_secs`.
    fn arm(&mut self, duration_secs: u32);

    /// Stop counting. Safe to call when not armed.
    fn cancel(&mut self);

    /// Stop counting and restore `duration_secs` without arming.
    fn rewind(&mut self, duration_secs: u32);

    /// Advance by one second.
    fn tick(&mut self) -> ClockEvent;

    fn remaining(&self) -> u32;

    fn is_armed(&self) -> bool;

    /// Arming epoch. Changes whenever the clock becomes armed or stops being
    /// armed, so tick sources tagged with an older value are stale.
    fn generation(&self) -> u64;
}

/// In-memory `SessionClock`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    armed: bool,
    generation: u64,
}

impl Countdown {
    #[must_use]
    pub fn new(duration_secs: u32) -> Self {
        Self {
            remaining: duration_secs,
            armed: false,
            generation: 0,
        }
    }

    fn disarm(&mut self) {
        if self.armed {
            self.armed = false;
            self.generation += 1;
        }
    }
}

impl SessionClock for Countdown {
    fn arm(&mut self, duration_secs: u32) {
        self.remaining = duration_secs;
        self.armed = true;
        self.generation += 1;
    }

    fn cancel(&mut self) {
        self.disarm();
    }

    fn rewind(&mut self, duration_secs: u32) {
        self.disarm();
        self.remaining = duration_secs;
    }

    fn tick(&mut self) -> ClockEvent {
        if !self.armed {
            return ClockEvent::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.disarm();
            return ClockEvent::Expired;
        }
        ClockEvent::Tick {
            remaining: self.remaining,
        }
    }

    fn remaining(&self) -> u32 {
        self.remaining
    }

    fn is_armed(&self) -> bool {
        self.armed
    }

    fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_and_expires_once() {
        let mut clock = Countdown::new(3);
        clock.arm(3);
        assert_eq!(clock.tick(), ClockEvent::Tick { remaining: 2 });
        assert_eq!(clock.tick(), ClockEvent::Tick { remaining: 1 });
        assert_eq!(clock.tick(), ClockEvent::Expired);
        assert!(!clock.is_armed());
        assert_eq!(clock.tick(), ClockEvent::Idle);
        assert_eq!(clock.remaining(), 0);
    }

    #[test]
    fn idle_until_armed() {
        let mut clock = Countdown::new(10);
        assert_eq!(clock.tick(), ClockEvent::Idle);
        assert_eq!(clock.remaining(), 10);
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut clock = Countdown::new(10);
        clock.cancel();
        assert_eq!(clock.generation(), 0);

        clock.arm(10);
        let armed = clock.generation();
        clock.cancel();
        clock.cancel();
        assert_eq!(clock.generation(), armed + 1);
        assert_eq!(clock.tick(), ClockEvent::Idle);
    }

    #[test]
    fn rewind_restores_duration_and_disarms() {
        let mut clock = Countdown::new(5);
        clock.arm(5);
        clock.tick();
        clock.rewind(5);
        assert_eq!(clock.remaining(), 5);
        assert!(!clock.is_armed());
    }

    #[test]
    fn every_arming_gets_a_new_generation() {
        let mut clock = Countdown::new(5);
        clock.arm(5);
        let first = clock.generation();
        clock.rewind(5);
        clock.arm(5);
        assert!(clock.generation() > first + 1);
    }
}
