//! Focus-flower timer state for one dashboard instance.
//!
//! # Responsibility
//! - Track the countdown and growth phase that the host renders.
//! - Pick the reward flower when a session completes.
//!
//! # Invariants
//! - `time_left_secs` never exceeds [`FOCUS_DURATION_SECS`].
//! - Only a `Growing` session counts down.
//! - Each surface owns its own `FocusSession`; nothing is shared globally.

/// Length of one focus session.
pub const FOCUS_DURATION_SECS: u32 = 25 * 60;

/// Reward flowers, picked uniformly on completion.
pub const FLOWERS: [&str; 10] = [
    "\u{1F33B}",
    "\u{1F337}",
    "\u{1F339}",
    "\u{1F33A}",
    "\u{1F338}",
    "\u{1F33C}",
    "\u{1FAB7}",
    "\u{1F490}",
    "\u{1F940}",
    "\u{2618}\u{FE0F}",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPhase {
    /// Fresh dashboard, nothing started yet.
    Idle,
    /// Counting down.
    Growing,
    /// Stopped before the countdown finished.
    Withered,
    /// Countdown finished; holds the reward flower.
    Bloomed(&'static str),
    /// Reset after a bloom, ready for another round.
    Ready,
}

/// Result of one countdown step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTick {
    /// Session is not growing; nothing changed.
    Paused,
    Running,
    /// Countdown hit zero on this tick and the flower bloomed.
    Completed(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusSession {
    time_left_secs: u32,
    phase: FocusPhase,
}

impl Default for FocusSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusSession {
    pub fn new() -> Self {
        Self {
            time_left_secs: FOCUS_DURATION_SECS,
            phase: FocusPhase::Idle,
        }
    }

    pub fn phase(&self) -> FocusPhase {
        self.phase
    }

    pub fn time_left_secs(&self) -> u32 {
        self.time_left_secs
    }

    pub fn is_growing(&self) -> bool {
        self.phase == FocusPhase::Growing
    }

    /// Starts (or resumes) growing. An exhausted countdown restarts in full.
    pub fn start(&mut self) {
        if self.time_left_secs == 0 {
            self.time_left_secs = FOCUS_DURATION_SECS;
        }
        self.phase = FocusPhase::Growing;
    }

    /// Advances the countdown by one second.
    ///
    /// `flower_roll` is a host random value in `[0, 1)`; it is only read on
    /// the completing tick.
    pub fn tick(&mut self, flower_roll: f64) -> FocusTick {
        if !self.is_growing() {
            return FocusTick::Paused;
        }

        self.time_left_secs = self.time_left_secs.saturating_sub(1);
        if self.time_left_secs > 0 {
            return FocusTick::Running;
        }

        let flower = pick_flower(flower_roll);
        self.phase = FocusPhase::Bloomed(flower);
        FocusTick::Completed(flower)
    }

    /// Abandons the session; the plant withers and the countdown resets.
    pub fn stop(&mut self) {
        self.phase = FocusPhase::Withered;
        self.time_left_secs = FOCUS_DURATION_SECS;
    }

    /// Clears a bloom so another session can start.
    pub fn reset_after_bloom(&mut self) {
        self.time_left_secs = FOCUS_DURATION_SECS;
        self.phase = FocusPhase::Ready;
    }

    /// Countdown text as `MM:SS`.
    pub fn display(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.time_left_secs / 60,
            self.time_left_secs % 60
        )
    }

    /// Status line shown under the timer, if any.
    pub fn status_message(&self) -> Option<&'static str> {
        match self.phase {
            FocusPhase::Idle => None,
            FocusPhase::Growing => Some("Growing... Stay focused!"),
            FocusPhase::Withered => Some("Oh no! The plant withered."),
            FocusPhase::Bloomed(_) => Some("yay! You grew a flower!"),
            FocusPhase::Ready => Some("Ready to grow another one!"),
        }
    }
}

fn pick_flower(roll: f64) -> &'static str {
    let roll = if roll.is_finite() {
        roll.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let index = ((roll * FLOWERS.len() as f64) as usize).min(FLOWERS.len() - 1);
    FLOWERS[index]
}

#[cfg(test)]
mod tests {
    use super::{FocusPhase, FocusSession, FocusTick, FLOWERS, FOCUS_DURATION_SECS};

    #[test]
    fn new_session_shows_full_duration() {
        let session = FocusSession::new();
        assert_eq!(session.display(), "25:00");
        assert_eq!(session.phase(), FocusPhase::Idle);
        assert_eq!(session.status_message(), None);
    }

    #[test]
    fn idle_session_does_not_count_down() {
        let mut session = FocusSession::new();
        assert_eq!(session.tick(0.0), FocusTick::Paused);
        assert_eq!(session.time_left_secs(), FOCUS_DURATION_SECS);
    }

    #[test]
    fn running_to_zero_blooms_a_flower() {
        let mut session = FocusSession::new();
        session.start();
        for _ in 1..FOCUS_DURATION_SECS {
            assert_eq!(session.tick(0.5), FocusTick::Running);
        }
        assert_eq!(session.display(), "00:01");

        let outcome = session.tick(0.99);
        assert_eq!(outcome, FocusTick::Completed(FLOWERS[9]));
        assert_eq!(session.phase(), FocusPhase::Bloomed(FLOWERS[9]));
        assert_eq!(session.status_message(), Some("yay! You grew a flower!"));

        session.reset_after_bloom();
        assert_eq!(session.display(), "25:00");
        assert_eq!(session.status_message(), Some("Ready to grow another one!"));
    }

    #[test]
    fn stop_withers_and_resets() {
        let mut session = FocusSession::new();
        session.start();
        session.tick(0.0);
        session.tick(0.0);
        assert_eq!(session.display(), "24:58");

        session.stop();
        assert_eq!(session.phase(), FocusPhase::Withered);
        assert_eq!(session.display(), "25:00");
        assert_eq!(session.tick(0.0), FocusTick::Paused);
    }

    #[test]
    fn out_of_range_rolls_still_pick_a_flower() {
        let mut session = FocusSession::new();
        session.start();
        for _ in 1..FOCUS_DURATION_SECS {
            session.tick(0.0);
        }
        assert_eq!(session.tick(f64::NAN), FocusTick::Completed(FLOWERS[0]));
    }
}
