//! Scaffold step walker.
//!
//! Drives the sequential reveal of solution steps, gating advancement on
//! pitfall acknowledgment: a step's pitfall must be shown at least once
//! before the index may move past that step.

use crate::content::Step;

/// Progress through one scaffold session. `step_index` is monotonically
/// non-decreasing within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScaffoldProgress {
    pub step_index: usize,
    pub pitfall_shown: bool,
}

/// Outcome of one `advance` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The current step's pitfall was revealed; the index did not move.
    PitfallRevealed,
    /// Moved to the next step.
    Stepped,
    /// Already on the last step; the walker signals completion instead of
    /// moving the index (maps to the Scaffold → Summary transition).
    Completed,
}

impl ScaffoldProgress {
    pub fn advance(&mut self, steps: &[Step]) -> Advance {
        let Some(step) = steps.get(self.step_index) else {
            // Empty scaffold: nothing to walk.
            return Advance::Completed;
        };

        if step.pitfall.is_some() && !self.pitfall_shown {
            self.pitfall_shown = true;
            return Advance::PitfallRevealed;
        }

        self.pitfall_shown = false;
        if self.step_index + 1 < steps.len() {
            self.step_index += 1;
            Advance::Stepped
        } else {
            Advance::Completed
        }
    }

    pub fn is_last_step(&self, steps: &[Step]) -> bool {
        self.step_index + 1 >= steps.len()
    }
}
