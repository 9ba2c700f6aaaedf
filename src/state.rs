use crate::model::Tube;

/// Everything that changes while a level is played. Replaced wholesale when a
/// level starts, resets or is retried.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct PuzzleState {
    tubes: Vec<Tube>,
    moves: usize,
    hints_used: usize,
    selected: Option<usize>,
    won: bool,
}

impl PuzzleState {
    pub fn new(tubes: Vec<Tube>) -> Self {
        Self {
            tubes,
            ..Self::default()
        }
    }

    /// Parse tubes separated by `|`, each written bottom first, e.g.
    /// `"AABC|BBCA|CCAB||"` for three mixed tubes and two empty ones.
    pub fn new_from_repr(repr: &str, capacity: usize) -> Option<Self> {
        let tubes = repr
            .split('|')
            .map(|token| Tube::from_repr(token, capacity))
            .collect::<Option<Vec<_>>>()?;
        Some(Self::new(tubes))
    }

    pub fn tubes(&self) -> &[Tube] {
        &self.tubes
    }

    pub(crate) fn tubes_mut(&mut self) -> &mut [Tube] {
        &mut self.tubes
    }

    pub fn tube(&self, index: usize) -> Option<&Tube> {
        self.tubes.get(index)
    }

    pub fn tube_count(&self) -> usize {
        self.tubes.len()
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    pub(crate) fn record_move(&mut self) {
        self.moves += 1;
    }

    pub fn hints_used(&self) -> usize {
        self.hints_used
    }

    pub(crate) fn record_hint(&mut self) {
        self.hints_used += 1;
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: Option<usize>) {
        self.selected = selected;
    }

    /// Set once the winning pour has been seen.
    pub fn is_won(&self) -> bool {
        self.won
    }

    pub(crate) fn mark_won(&mut self) {
        self.won = true;
    }

    pub fn total_layers(&self) -> usize {
        self.tubes.iter().map(Tube::len).sum()
    }

    pub fn get_text_representation(&self) -> String {
        self.tubes
            .iter()
            .map(Tube::text_representation)
            .collect::<Vec<_>>()
            .join("|")
    }
}
