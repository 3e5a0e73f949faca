/// Time-based animation driver for the fold/unfold progress value
use tracing::debug;

use crate::ease::ease_in_out_cubic;

/// Current motion of the progress value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Idle,
    Unfolding,
    Folding,
}

/// Terminal value reached by an `advance` step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    Unfolded,
    Folded,
}

/// The single scalar progress value in [0, 1] driving all visual
/// interpolation, advanced at a fixed rate scaled by elapsed frame time.
///
/// Commands that do not satisfy their precondition are silent no-ops.
/// Switching direction mid-animation is plain cancellation: progress is a
/// value, not a suspended computation, so nothing needs unwinding.
#[derive(Debug, Clone)]
pub struct AnimationState {
    progress: f32,
    direction: Direction,
    rate: f32,
}

impl AnimationState {
    /// `rate` is progress units per second.
    pub fn new(rate: f32) -> Self {
        Self {
            progress: 0.0,
            direction: Direction::Idle,
            rate,
        }
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Eased progress; all downstream consumers use this, never raw
    /// progress.
    pub fn eased(&self) -> f32 {
        ease_in_out_cubic(self.progress)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_idle(&self) -> bool {
        self.direction == Direction::Idle
    }

    pub fn is_unfolded(&self) -> bool {
        self.is_idle() && self.progress >= 1.0
    }

    pub fn is_folded(&self) -> bool {
        self.is_idle() && self.progress <= 0.0
    }

    /// Start (or redirect toward) unfolding. Returns whether the command
    /// took effect.
    pub fn unfold(&mut self) -> bool {
        if self.direction == Direction::Unfolding || self.is_unfolded() {
            debug!("unfold ignored: already unfolding or unfolded");
            return false;
        }
        self.direction = Direction::Unfolding;
        true
    }

    /// Start (or redirect toward) folding. Returns whether the command took
    /// effect.
    pub fn fold(&mut self) -> bool {
        if self.direction == Direction::Folding || self.is_folded() {
            debug!("fold ignored: already folding or folded");
            return false;
        }
        self.direction = Direction::Folding;
        true
    }

    /// Advance progress by `dt` seconds. The next state is computed fully
    /// before being committed; reaching a terminal value clamps progress,
    /// returns the terminal once, and drops back to `Idle`.
    pub fn advance(&mut self, dt: f32) -> Option<Terminal> {
        match self.direction {
            Direction::Idle => None,
            Direction::Unfolding => {
                let next = self.progress + dt * self.rate;
                if next >= 1.0 {
                    self.progress = 1.0;
                    self.direction = Direction::Idle;
                    debug!("unfold complete");
                    Some(Terminal::Unfolded)
                } else {
                    self.progress = next;
                    None
                }
            }
            Direction::Folding => {
                let next = self.progress - dt * self.rate;
                if next <= 0.0 {
                    self.progress = 0.0;
                    self.direction = Direction::Idle;
                    debug!("fold complete");
                    Some(Terminal::Folded)
                } else {
                    self.progress = next;
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle_and_folded() {
        let state = AnimationState::new(0.4);
        assert!(state.is_idle());
        assert!(state.is_folded());
        assert!(!state.is_unfolded());
    }

    #[test]
    fn test_unfold_is_idempotent() {
        let mut state = AnimationState::new(0.4);
        assert!(state.unfold());
        state.advance(0.5);
        let progress = state.progress();
        // Repeating the command while already unfolding changes nothing.
        assert!(!state.unfold());
        assert_eq!(state.direction(), Direction::Unfolding);
        assert_eq!(state.progress(), progress);
    }

    #[test]
    fn test_unfold_clamps_and_goes_idle() {
        let mut state = AnimationState::new(0.4);
        state.unfold();
        // 0.4 * 2.5 = 1.0 exactly.
        assert_eq!(state.advance(2.5), Some(Terminal::Unfolded));
        assert_eq!(state.progress(), 1.0);
        assert!(state.is_unfolded());
        // Further frames are no-ops.
        assert_eq!(state.advance(1.0), None);
        assert_eq!(state.progress(), 1.0);
    }

    #[test]
    fn test_unfold_rejected_when_fully_unfolded() {
        let mut state = AnimationState::new(1.0);
        state.unfold();
        state.advance(2.0);
        assert!(state.is_unfolded());
        assert!(!state.unfold());
        assert!(state.is_idle());
    }

    #[test]
    fn test_fold_rejected_when_fully_folded() {
        let mut state = AnimationState::new(1.0);
        assert!(!state.fold());
        assert!(state.is_idle());
    }

    #[test]
    fn test_fold_cancels_inflight_unfold() {
        let mut state = AnimationState::new(1.0);
        state.unfold();
        state.advance(0.3);
        assert!(state.fold());
        assert_eq!(state.direction(), Direction::Folding);
        assert_eq!(state.advance(1.0), Some(Terminal::Folded));
        assert_eq!(state.progress(), 0.0);
    }

    #[test]
    fn test_round_trip_restores_zero() {
        let mut state = AnimationState::new(0.8);
        state.unfold();
        while state.advance(1.0 / 30.0).is_none() {}
        assert_eq!(state.progress(), 1.0);
        state.fold();
        while state.advance(1.0 / 30.0).is_none() {}
        assert_eq!(state.progress(), 0.0);
        assert!(state.is_folded());
    }

    #[test]
    fn test_eased_uses_cubic_curve() {
        let mut state = AnimationState::new(1.0);
        state.unfold();
        state.advance(0.25);
        assert!((state.eased() - 4.0 * 0.25f32.powi(3)).abs() < 1e-6);
    }
}
