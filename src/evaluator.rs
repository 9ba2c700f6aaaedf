//! Clear and win detection. Both checks are safe to run any number of times.

use crate::model::Tube;
use crate::state::PuzzleState;

/// Result of evaluating the board after a pour attempt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Evaluation {
    /// Tubes that became cleared during this evaluation.
    pub newly_cleared: Vec<usize>,
    /// The board is in a winning arrangement.
    pub won: bool,
}

/// Mark every full uniform tube as cleared and return those that were not cleared
/// before.
pub fn clear_check(tubes: &mut [Tube]) -> Vec<usize> {
    let mut newly_cleared = Vec::new();
    for (index, tube) in tubes.iter_mut().enumerate() {
        if tube.is_sorted() && !tube.is_cleared() {
            tube.mark_cleared();
            newly_cleared.push(index);
        }
    }
    newly_cleared
}

/// Every tube is empty or full of a single color.
pub fn is_won(tubes: &[Tube]) -> bool {
    tubes.iter().all(|tube| tube.is_empty() || tube.is_sorted())
}

pub fn too_many_hints(hints_used: usize, threshold: usize) -> bool {
    hints_used > threshold
}

pub fn evaluate(state: &mut PuzzleState) -> Evaluation {
    let newly_cleared = clear_check(state.tubes_mut());
    Evaluation {
        newly_cleared,
        won: is_won(state.tubes()),
    }
}
