//! Undo/redo over animation states.
//!
//! [`History`] holds exactly one `present` state, a `past` stack (oldest
//! first) and a `future` stack filled only by undo. States only ever move
//! between the three slots; nothing is synthesized, so `present` stays
//! structurally valid across any sequence of edits, undos and redos.

use log::debug;

use crate::animation::AnimationState;

/// Result of an undo or redo request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoOutcome {
    Applied,
    NothingToUndo,
    NothingToRedo,
}

impl UndoOutcome {
    pub fn is_applied(self) -> bool {
        self == UndoOutcome::Applied
    }
}

/// Time-travel wrapper around [`AnimationState`].
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    present: AnimationState,
    past: Vec<AnimationState>,
    future: Vec<AnimationState>,
    /// Maximum `past` depth (`None` = unbounded).
    max_past: Option<usize>,
}

impl History {
    pub fn new(present: AnimationState) -> Self {
        Self {
            present,
            past: Vec::new(),
            future: Vec::new(),
            max_past: None,
        }
    }

    /// History that evicts its oldest entries beyond `max_past`.
    pub fn with_max_past(present: AnimationState, max_past: Option<usize>) -> Self {
        Self {
            max_past,
            ..Self::new(present)
        }
    }

    pub fn present(&self) -> &AnimationState {
        &self.present
    }

    /// Undo stack, oldest first.
    pub fn past(&self) -> &[AnimationState] {
        &self.past
    }

    /// Redo stack, next redo last.
    pub fn future(&self) -> &[AnimationState] {
        &self.future
    }

    pub fn max_past(&self) -> Option<usize> {
        self.max_past
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    fn enforce_cap(&mut self) {
        if let Some(cap) = self.max_past
            && self.past.len() > cap
        {
            let excess = self.past.len() - cap;
            self.past.drain(..excess);
            debug!("Evicted {excess} oldest history entries (cap {cap})");
        }
    }

    /// Commit a new present. The old one becomes undoable and redo is lost.
    pub fn edit(&mut self, present: AnimationState) {
        let previous = std::mem::replace(&mut self.present, present);
        self.past.push(previous);
        self.future.clear();
        self.enforce_cap();
        debug!("History edit committed (past depth {})", self.past.len());
    }

    /// Run a fallible transform on the present and commit the result.
    /// On error the history is left exactly as it was.
    pub fn try_edit<E>(
        &mut self,
        f: impl FnOnce(&AnimationState) -> Result<AnimationState, E>,
    ) -> Result<(), E> {
        let next = f(&self.present)?;
        self.edit(next);
        Ok(())
    }

    /// Swap the present for a view-only change (cursor, zoom) without
    /// recording an undo step.
    pub fn replace_present(&mut self, present: AnimationState) {
        self.present = present;
    }

    pub fn undo(&mut self) -> UndoOutcome {
        let Some(previous) = self.past.pop() else {
            return UndoOutcome::NothingToUndo;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push(current);
        debug!(
            "Undo applied (past {}, future {})",
            self.past.len(),
            self.future.len()
        );
        UndoOutcome::Applied
    }

    pub fn redo(&mut self) -> UndoOutcome {
        let Some(next) = self.future.pop() else {
            return UndoOutcome::NothingToRedo;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.past.push(current);
        self.enforce_cap();
        debug!(
            "Redo applied (past {}, future {})",
            self.past.len(),
            self.future.len()
        );
        UndoOutcome::Applied
    }

    /// Replace the timeline from a restored sequence. The last element becomes
    /// the present; an empty sequence keeps the current present. Redo is
    /// always cleared.
    pub fn reset(&mut self, mut past: Vec<AnimationState>) {
        if let Some(present) = past.pop() {
            self.present = present;
        }
        self.past = past;
        self.future.clear();
        self.enforce_cap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Frame;
    use crate::bitmap::Bitmap;
    use proptest::prelude::*;

    fn state(value: u8) -> AnimationState {
        let frame = Frame::new(Bitmap::from_buffer(2, 1, vec![value, value]).unwrap());
        AnimationState::new(vec![frame], 100).unwrap()
    }

    #[test]
    fn test_edit_pushes_past_and_clears_future() {
        let mut history = History::new(state(0));
        history.edit(state(1));
        history.edit(state(2));
        assert_eq!(history.undo(), UndoOutcome::Applied);
        assert!(history.can_redo());

        history.edit(state(3));
        assert_eq!(history.present(), &state(3));
        assert_eq!(history.past(), &[state(0), state(1)]);
        assert!(history.future().is_empty());
    }

    #[test]
    fn test_undo_on_empty_is_noop() {
        let mut history = History::new(state(0));
        let before = history.clone();
        assert_eq!(history.undo(), UndoOutcome::NothingToUndo);
        assert_eq!(history, before);
        assert_eq!(history.redo(), UndoOutcome::NothingToRedo);
        assert_eq!(history, before);
    }

    #[test]
    fn test_edit_edit_undo_undo_redo() {
        let mut history = History::new(state(0));
        history.edit(state(1));
        history.edit(state(2));
        history.undo();
        history.undo();
        assert_eq!(history.present(), &state(0));
        history.redo();
        assert_eq!(history.present(), &state(1));
        assert_eq!(history.past(), &[state(0)]);
        assert_eq!(history.future(), &[state(2)]);
    }

    #[test]
    fn test_try_edit_failure_leaves_history() {
        let mut history = History::new(state(0));
        history.edit(state(1));
        let before = history.clone();
        let result = history.try_edit(|s| s.set_interval(0));
        assert!(result.is_err());
        assert_eq!(history, before);

        history.try_edit(|s| s.set_interval(40)).unwrap();
        assert_eq!(history.present().interval(), 40);
        assert_eq!(history.past().len(), 2);
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut history = History::with_max_past(state(0), Some(2));
        for v in 1..=4 {
            history.edit(state(v));
        }
        assert_eq!(history.past(), &[state(2), state(3)]);
        assert_eq!(history.present(), &state(4));
    }

    #[test]
    fn test_reset_takes_last_as_present() {
        let mut history = History::new(state(0));
        history.edit(state(9));
        history.undo();
        history.reset(vec![state(1), state(2), state(3)]);
        assert_eq!(history.present(), &state(3));
        assert_eq!(history.past(), &[state(1), state(2)]);
        assert!(history.future().is_empty());

        history.reset(Vec::new());
        assert_eq!(history.present(), &state(3));
        assert!(history.past().is_empty());
    }

    #[test]
    fn test_replace_present_keeps_stacks() {
        let mut history = History::new(state(0));
        history.edit(state(1));
        history.undo();
        history.replace_present(state(5));
        assert_eq!(history.past().len(), 0);
        assert_eq!(history.future(), &[state(1)]);
    }

    proptest! {
        #[test]
        fn prop_undo_inverts_edit(seed in proptest::collection::vec(0u8..16, 0..6), edit in 0u8..16) {
            let mut history = History::new(state(0));
            for v in seed {
                history.edit(state(v));
            }
            let before_present = history.present().clone();
            let before_past = history.past().to_vec();

            history.edit(state(edit));
            prop_assert_eq!(history.undo(), UndoOutcome::Applied);
            prop_assert_eq!(history.present(), &before_present);
            prop_assert_eq!(history.past(), before_past.as_slice());
        }

        #[test]
        fn prop_redo_inverts_undo(seed in proptest::collection::vec(0u8..16, 1..6)) {
            let mut history = History::new(state(0));
            for v in seed {
                history.edit(state(v));
            }
            let before = history.clone();
            prop_assert_eq!(history.undo(), UndoOutcome::Applied);
            prop_assert_eq!(history.redo(), UndoOutcome::Applied);
            prop_assert_eq!(history, before);
        }
    }
}
