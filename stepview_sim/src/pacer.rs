//! Play/pause/speed pacing for the step loop.
//!
//! A windowed visualizer owns a real-time clock, a playing flag and a
//! speed multiplier. Here that UI state lives in [`Pacer`], driven by a
//! [`Clock`] that is either wall time or a manually advanced virtual
//! clock, so pacing is testable without a display (and without
//! sleeping in tests).

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Minimum speed multiplier (steps per second at 1x is 1.0).
pub const MIN_SPEED: f64 = 0.25;

/// Maximum speed multiplier.
pub const MAX_SPEED: f64 = 8.0;

/// Monotonic time source, expressed as elapsed time since start.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall-clock time for the real CLI loop.
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Virtual clock advanced by hand - deterministic pacing tests.
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Cell::new(Duration::ZERO),
        }
    }

    /// Advances virtual time by the given duration.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// User commands the input layer translates clicks/keys into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Space / play-pause button
    TogglePlay,
    /// Double the speed, capped at [`MAX_SPEED`]
    SpeedUp,
    /// Halve the speed, floored at [`MIN_SPEED`]
    SlowDown,
    /// One `step()` regardless of play state
    SingleStep,
}

/// Play/pause and speed state deciding *when* the engine steps.
///
/// At speed `s`, a step becomes due every `1/s` seconds while playing.
/// Toggling play restarts the interval, so a resume never inherits
/// time that elapsed while paused.
pub struct Pacer {
    playing: bool,
    speed: f64,
    last_step: Duration,
    pending_single_step: bool,
}

impl Pacer {
    /// Creates a paused pacer at 1x speed.
    pub fn new() -> Self {
        Self {
            playing: false,
            speed: 1.0,
            last_step: Duration::ZERO,
            pending_single_step: false,
        }
    }

    /// Creates a paused pacer at the given speed, clamped to bounds.
    pub fn with_speed(speed: f64) -> Self {
        let mut pacer = Self::new();
        pacer.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        pacer
    }

    /// Applies a user command at the given instant.
    pub fn apply(&mut self, command: Command, now: Duration) {
        match command {
            Command::TogglePlay => {
                self.playing = !self.playing;
                self.last_step = now;
            }
            Command::SpeedUp => {
                self.speed = (self.speed * 2.0).min(MAX_SPEED);
            }
            Command::SlowDown => {
                self.speed = (self.speed / 2.0).max(MIN_SPEED);
            }
            Command::SingleStep => {
                self.pending_single_step = true;
            }
        }
    }

    /// Returns true if the driver should call `step()` now.
    ///
    /// Consumes a pending single-step first; otherwise a step is due
    /// when playing and the current interval has elapsed.
    pub fn poll(&mut self, now: Duration) -> bool {
        if self.pending_single_step {
            self.pending_single_step = false;
            return true;
        }
        if self.playing && now.saturating_sub(self.last_step) > self.step_interval() {
            self.last_step = now;
            return true;
        }
        false
    }

    /// Time between steps at the current speed.
    pub fn step_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.speed)
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paused_pacer_never_steps() {
        let clock = ManualClock::new();
        let mut pacer = Pacer::new();

        for _ in 0..10 {
            clock.advance(Duration::from_secs(5));
            assert!(!pacer.poll(clock.now()));
        }
    }

    #[test]
    fn test_playing_steps_once_per_interval() {
        let clock = ManualClock::new();
        let mut pacer = Pacer::new();
        pacer.apply(Command::TogglePlay, clock.now());

        // 1x speed: due after a bit more than one second.
        clock.advance(Duration::from_millis(500));
        assert!(!pacer.poll(clock.now()));
        clock.advance(Duration::from_millis(600));
        assert!(pacer.poll(clock.now()));
        // Interval restarts from the step just taken.
        assert!(!pacer.poll(clock.now()));
    }

    #[test]
    fn test_speed_doubles_and_halves_within_bounds() {
        let clock = ManualClock::new();
        let mut pacer = Pacer::new();

        for _ in 0..10 {
            pacer.apply(Command::SpeedUp, clock.now());
        }
        assert_eq!(pacer.speed(), MAX_SPEED);

        for _ in 0..10 {
            pacer.apply(Command::SlowDown, clock.now());
        }
        assert_eq!(pacer.speed(), MIN_SPEED);
    }

    #[test]
    fn test_faster_speed_shortens_interval() {
        let clock = ManualClock::new();
        let mut pacer = Pacer::new();
        pacer.apply(Command::TogglePlay, clock.now());
        pacer.apply(Command::SpeedUp, clock.now());
        pacer.apply(Command::SpeedUp, clock.now()); // 4x -> due after 250ms

        clock.advance(Duration::from_millis(300));
        assert!(pacer.poll(clock.now()));
    }

    #[test]
    fn test_single_step_works_while_paused() {
        let clock = ManualClock::new();
        let mut pacer = Pacer::new();

        pacer.apply(Command::SingleStep, clock.now());
        assert!(pacer.poll(clock.now()));
        // Consumed: no second step without a new command.
        assert!(!pacer.poll(clock.now()));
    }

    #[test]
    fn test_toggle_restarts_interval() {
        let clock = ManualClock::new();
        let mut pacer = Pacer::new();
        pacer.apply(Command::TogglePlay, clock.now());

        clock.advance(Duration::from_millis(900));
        // Pause then resume: elapsed time before the toggle must not count.
        pacer.apply(Command::TogglePlay, clock.now());
        pacer.apply(Command::TogglePlay, clock.now());
        clock.advance(Duration::from_millis(900));
        assert!(!pacer.poll(clock.now()));
        clock.advance(Duration::from_millis(200));
        assert!(pacer.poll(clock.now()));
    }
}
