use crate::hint::HintSuggestion;
use crate::model::LiquidColor;

/// Notifications queued by the engine for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    LevelStarted { level: usize, tube_count: usize },
    /// A tube's layers changed. Emitted once per tube on level start and for both
    /// tubes after every single-layer step of a pour.
    TubeRendered { index: usize, layers: Vec<LiquidColor> },
    /// Highlight toggle for a tube.
    SelectionChanged { index: usize, selected: bool },
    TubeCleared { index: usize },
    LevelWon { moves: usize, too_many_hints: bool },
    HintFound(HintSuggestion),
    HintNotFound,
    AllLevelsCompleted,
}
