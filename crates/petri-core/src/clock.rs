//! The tick clock: the single source of truth for simulation time.
//!
//! The counter starts at 0, increments exactly once per generation, and
//! is reset only by process restart. The advance is checked so the
//! counter can never silently wrap.

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Tick counter would overflow.
    #[error("tick counter overflow: cannot advance beyond u64::MAX")]
    TickOverflow,
}

/// Monotonically increasing tick counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickClock {
    /// Current tick number (0 before the first generation completes).
    tick: u64,
}

impl TickClock {
    /// Create a clock at tick 0.
    pub const fn new() -> Self {
        Self { tick: 0 }
    }

    /// Restore a clock from a saved tick number (testing).
    pub const fn from_tick(tick: u64) -> Self {
        Self { tick }
    }

    /// Advance the clock by one tick. Returns the new tick number.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::TickOverflow`] if the counter would exceed
    /// `u64::MAX`.
    pub const fn advance(&mut self) -> Result<u64, ClockError> {
        match self.tick.checked_add(1) {
            Some(next) => {
                self.tick = next;
                Ok(next)
            }
            None => Err(ClockError::TickOverflow),
        }
    }

    /// The current tick number.
    pub const fn tick(&self) -> u64 {
        self.tick
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn clock_starts_at_zero() {
        let clock = TickClock::new();
        assert_eq!(clock.tick(), 0);
    }

    #[test]
    fn advance_increments_by_exactly_one() {
        let mut clock = TickClock::new();
        assert_eq!(clock.advance().unwrap(), 1);
        assert_eq!(clock.advance().unwrap(), 2);
        assert_eq!(clock.tick(), 2);
    }

    #[test]
    fn advance_at_max_is_an_error() {
        let mut clock = TickClock::from_tick(u64::MAX);
        assert!(clock.advance().is_err());
        // The counter is untouched on failure.
        assert_eq!(clock.tick(), u64::MAX);
    }
}
