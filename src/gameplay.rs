//! The controller that owns a level's [`PuzzleState`].
//!
//! All mutations go through [`GameEngine`]: tube selection, pours, hints and level
//! changes. Each one commits atomically and queues [`GameEvent`]s that the
//! presentation layer drains and animates at its own pace.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{ConfigError, GameConfig};
use crate::evaluator::{self, evaluate};
use crate::events::GameEvent;
use crate::hint::{HintSuggestion, find_hint};
use crate::level::{Level, deal_tubes, generate_levels};
use crate::model::Tube;
use crate::pour::pour_with;
use crate::state::PuzzleState;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ControlAction {
    SelectTube(usize),
    Deselect,
    PourInto(usize, usize),
    Hint,
    Reset,
    NextLevel,
    PreviousLevel,
    SelectLevel(usize),
}

/// What a tube selection turned into.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Out of range, or an empty tube with nothing selected.
    Ignored,
    Selected(usize),
    Deselected(usize),
    /// A pour was attempted; `moved` may be zero.
    Poured {
        source: usize,
        target: usize,
        moved: usize,
    },
}

pub struct GameEngine<R: Rng = StdRng> {
    config: GameConfig,
    rng: R,
    levels: Vec<Level>,
    current_level: usize,
    state: PuzzleState,
    events: Vec<GameEvent>,
}

impl GameEngine<StdRng> {
    /// Engine seeded from `config.seed`, or from the OS when no seed is set.
    pub fn from_config(config: GameConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(config, rng)
    }
}

impl<R: Rng> GameEngine<R> {
    /// Generate the level list and start level 1.
    pub fn new(config: GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let levels = generate_levels(&config, &mut rng);
        let mut engine = Self {
            config,
            rng,
            levels,
            current_level: 1,
            state: PuzzleState::default(),
            events: Vec::new(),
        };
        engine.init_level(1);
        Ok(engine)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// 1-based index of the level being played.
    pub fn current_level(&self) -> usize {
        self.current_level
    }

    pub fn get_state(&self) -> &PuzzleState {
        &self.state
    }

    pub fn tube(&self, index: usize) -> Option<&Tube> {
        self.state.tube(index)
    }

    pub fn moves(&self) -> usize {
        self.state.moves()
    }

    pub fn hints_used(&self) -> usize {
        self.state.hints_used()
    }

    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    /// Whether the board is currently in a winning arrangement. A level dealt
    /// without any colors is won from the start.
    pub fn is_won(&self) -> bool {
        evaluator::is_won(self.state.tubes())
    }

    pub fn too_many_hints(&self) -> bool {
        evaluator::too_many_hints(self.state.hints_used(), self.config.hint_threshold)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn handle_action(&mut self, action: ControlAction) {
        debug!("Action {action:?}");
        match action {
            ControlAction::SelectTube(index) => {
                self.select_tube(index);
            }
            ControlAction::Deselect => self.deselect(),
            ControlAction::PourInto(source, target) => {
                self.pour_tubes(source, target);
            }
            ControlAction::Hint => {
                self.request_hint();
            }
            ControlAction::Reset => self.reset_level(),
            ControlAction::NextLevel => {
                self.next_level();
            }
            ControlAction::PreviousLevel => {
                self.previous_level();
            }
            ControlAction::SelectLevel(index) => {
                self.init_level(index);
            }
        }
    }

    /// Start the given 1-based level with a freshly dealt layout and evaluate it.
    /// Out-of-range indices leave everything untouched.
    pub fn init_level(&mut self, index: usize) -> bool {
        let Some(level) = index
            .checked_sub(1)
            .and_then(|i| self.levels.get(i))
            .copied()
        else {
            debug!("Ignoring unknown level {index}");
            return false;
        };

        let tubes = deal_tubes(
            level.tube_count,
            self.config.capacity,
            self.config.palette_size,
            &mut self.rng,
        );
        self.current_level = index;
        self.state = PuzzleState::new(tubes);
        info!("Level {index} started with {} tubes", level.tube_count);

        self.events.push(GameEvent::LevelStarted {
            level: index,
            tube_count: level.tube_count,
        });
        self.render_all_tubes();
        // A deal can already be sorted, e.g. a level with a single color.
        self.run_evaluation();
        true
    }

    /// Deal the current level again.
    pub fn reset_level(&mut self) {
        self.init_level(self.current_level);
    }

    pub fn next_level(&mut self) -> bool {
        if self.current_level < self.levels.len() {
            return self.init_level(self.current_level + 1);
        }
        info!("All {} levels completed", self.levels.len());
        self.events.push(GameEvent::AllLevelsCompleted);
        false
    }

    pub fn previous_level(&mut self) -> bool {
        if self.current_level > 1 {
            return self.init_level(self.current_level - 1);
        }
        false
    }

    /// Replace the board wholesale, keeping the level list.
    pub fn load_state(&mut self, state: PuzzleState) {
        self.state = state;
        self.state.set_selected(None);
        self.render_all_tubes();
    }

    /// Nothing selected: pick up a non-empty tube. Same tube again: put it down.
    /// Another tube: pour the selected tube into it.
    pub fn select_tube(&mut self, index: usize) -> SelectOutcome {
        let Some(tube) = self.state.tube(index) else {
            return SelectOutcome::Ignored;
        };
        match self.state.selected() {
            None => {
                if tube.is_empty() {
                    return SelectOutcome::Ignored;
                }
                self.set_selection(Some(index));
                SelectOutcome::Selected(index)
            }
            Some(selected) if selected == index => {
                self.set_selection(None);
                SelectOutcome::Deselected(index)
            }
            Some(source) => {
                let moved = self.attempt_pour(source, index);
                self.set_selection(None);
                self.run_evaluation();
                SelectOutcome::Poured {
                    source,
                    target: index,
                    moved,
                }
            }
        }
    }

    pub fn deselect(&mut self) {
        self.set_selection(None);
    }

    /// Pour directly, bypassing selection, then evaluate the board.
    pub fn pour_tubes(&mut self, source: usize, target: usize) -> usize {
        let moved = self.attempt_pour(source, target);
        self.run_evaluation();
        moved
    }

    /// Suggest the first legal pour. Only a found hint counts towards the
    /// level's hint usage.
    pub fn request_hint(&mut self) -> Option<HintSuggestion> {
        match find_hint(self.state.tubes()) {
            Some(hint) => {
                self.state.record_hint();
                debug!(
                    "Hint {} -> {} ({} used)",
                    hint.source,
                    hint.target,
                    self.state.hints_used()
                );
                self.events.push(GameEvent::HintFound(hint));
                Some(hint)
            }
            None => {
                debug!("No hint available");
                self.events.push(GameEvent::HintNotFound);
                None
            }
        }
    }

    fn set_selection(&mut self, selection: Option<usize>) {
        let previous = self.state.selected();
        if previous == selection {
            return;
        }
        if let Some(index) = previous {
            self.events.push(GameEvent::SelectionChanged {
                index,
                selected: false,
            });
        }
        if let Some(index) = selection {
            self.events.push(GameEvent::SelectionChanged {
                index,
                selected: true,
            });
        }
        self.state.set_selected(selection);
    }

    fn attempt_pour(&mut self, source: usize, target: usize) -> usize {
        let events = &mut self.events;
        let moved = pour_with(self.state.tubes_mut(), source, target, |from, to| {
            events.push(GameEvent::TubeRendered {
                index: source,
                layers: from.layers().to_vec(),
            });
            events.push(GameEvent::TubeRendered {
                index: target,
                layers: to.layers().to_vec(),
            });
        });
        if moved > 0 {
            self.state.record_move();
        }
        moved
    }

    fn run_evaluation(&mut self) {
        let evaluation = evaluate(&mut self.state);
        for index in evaluation.newly_cleared {
            debug!("Tube {index} cleared");
            self.events.push(GameEvent::TubeCleared { index });
        }
        if evaluation.won && !self.state.is_won() {
            self.state.mark_won();
            let too_many_hints = self.too_many_hints();
            info!(
                "Level {} won in {} moves with {} hint(s)",
                self.current_level,
                self.state.moves(),
                self.state.hints_used()
            );
            self.events.push(GameEvent::LevelWon {
                moves: self.state.moves(),
                too_many_hints,
            });
        }
    }

    fn render_all_tubes(&mut self) {
        for (index, tube) in self.state.tubes().iter().enumerate() {
            self.events.push(GameEvent::TubeRendered {
                index,
                layers: tube.layers().to_vec(),
            });
        }
    }
}
