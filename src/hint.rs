//! First-match hint search.
//!
//! The advisor only promises a legal pour, not one that leads to a solution.

use crate::model::Tube;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HintSuggestion {
    pub source: usize,
    pub target: usize,
}

/// Scan sources in order and, for the first non-empty one that has somewhere to go,
/// return the first other tube that is empty or shows the same top color.
pub fn find_hint(tubes: &[Tube]) -> Option<HintSuggestion> {
    tubes.iter().enumerate().find_map(|(source, src)| {
        let color = src.top_color()?;
        tubes
            .iter()
            .enumerate()
            .find(|&(target, tgt)| target != source && tgt.accepts(color))
            .map(|(target, _)| HintSuggestion { source, target })
    })
}
