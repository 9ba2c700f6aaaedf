//! Rule engine for the water sort puzzle.
//!
//! Tubes hold stacks of colored layers. The player pours the top run of one tube
//! onto an empty tube or onto a matching color, until every tube is either empty
//! or full of a single color.

pub mod config;
pub mod evaluator;
pub mod events;
pub mod gameplay;
pub mod hint;
pub mod level;
pub mod model;
pub mod pour;
pub mod state;

pub use config::{ConfigError, GameConfig};
pub use events::GameEvent;
pub use gameplay::{ControlAction, GameEngine, SelectOutcome};
pub use hint::HintSuggestion;
pub use model::{LiquidColor, Tube};
pub use state::PuzzleState;
