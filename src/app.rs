use log::trace;
use water_sort::{ControlAction, GameEngine, GameEvent};

use crate::effects::{Banner, CLEAR_CONFETTI, DisplayBoard, Effects, WIN_CONFETTI};
use crate::renderer::{FrameView, PALETTE, Renderer};
use crate::ui::{Button, HitItem};

/// Glue between the engine and the screen: turns clicks into actions and engine
/// events into effects.
pub struct GameApp {
    engine: GameEngine,
    renderer: Renderer,
    board: DisplayBoard,
    effects: Effects,
    buttons: Vec<Button>,
}

impl GameApp {
    pub fn new(engine: GameEngine) -> Self {
        let buttons = vec![
            Button::new("Hint", ControlAction::Hint, PALETTE[1]),
            Button::new("Reset", ControlAction::Reset, PALETTE[0]),
            Button::new("< Level", ControlAction::PreviousLevel, PALETTE[5]),
            Button::new("Level >", ControlAction::NextLevel, PALETTE[2]),
        ];
        let mut app = Self {
            engine,
            renderer: Renderer::new(),
            board: DisplayBoard::default(),
            effects: Effects::new(),
            buttons,
        };
        app.process_events();
        app
    }

    pub fn handle_action(&mut self, action: ControlAction) {
        self.engine.handle_action(action);
        self.process_events();
    }

    pub fn handle_click(&mut self, x: f32, y: f32) {
        let registry = self.renderer.get_hit_test_registry();
        let Some(item) = registry.hit_test(x, y).map(|hit| hit.item) else {
            return;
        };
        match item {
            HitItem::Button { action } => {
                if self.effects.banner().is_some() {
                    self.effects.dismiss_banner();
                }
                self.handle_action(action);
            }
            HitItem::Tube { index } => self.handle_action(ControlAction::SelectTube(index)),
            HitItem::DismissBanner => self.effects.dismiss_banner(),
            HitItem::Backdrop => {}
        }
    }

    fn process_events(&mut self) {
        let palette_size = self.engine.config().palette_size;
        let mut level_started = false;
        for event in self.engine.drain_events() {
            trace!("{event:?}");
            match event {
                GameEvent::LevelStarted { .. } => {
                    level_started = true;
                    self.effects.reset();
                    self.board.snap_to(self.engine.get_state());
                }
                GameEvent::TubeRendered { index, layers } => {
                    // A fresh level is already on screen in full.
                    if !level_started {
                        self.board.queue(index, layers);
                    }
                }
                GameEvent::SelectionChanged { .. } => {}
                GameEvent::TubeCleared { .. } => {
                    self.effects.spawn_confetti(CLEAR_CONFETTI, palette_size);
                }
                GameEvent::LevelWon {
                    moves,
                    too_many_hints,
                } => {
                    self.effects.spawn_confetti(WIN_CONFETTI, palette_size);
                    let banner = if too_many_hints {
                        Banner::TooManyHints
                    } else {
                        Banner::Completed {
                            level: self.engine.current_level(),
                            moves,
                        }
                    };
                    self.effects.schedule_banner(banner);
                }
                GameEvent::HintFound(hint) => self.effects.show_hint(hint),
                GameEvent::HintNotFound => self.effects.show_notice("No hint available"),
                GameEvent::AllLevelsCompleted => {
                    self.effects.schedule_banner(Banner::AllLevelsCompleted)
                }
            }
        }

        let hints = self.engine.hints_used();
        let hint_label = if hints == 0 {
            "Hint".to_string()
        } else {
            format!("Hint ({hints})")
        };
        self.buttons[0].set_label(&hint_label);
    }

    pub fn update(&mut self, dt: f32) {
        self.board.update(dt);
        self.effects.update(dt, self.board.is_idle());
    }

    pub fn render(&mut self) {
        self.renderer.autoset_viewport();
        let level = self.engine.current_level();
        let tube_count = self.engine.get_state().tube_count();
        let status = format!(
            "Level {level} - {tube_count} tubes    Moves: {}",
            self.engine.moves()
        );
        let view = FrameView {
            tubes: self.board.tubes(),
            capacity: self.engine.config().capacity,
            selected: self.engine.selected(),
            hint: self.effects.hint(),
            buttons: &self.buttons,
            status: &status,
            notice: self.effects.notice(),
        };
        self.renderer.render_board(&view);
        self.effects.draw_confetti();
        if let Some(banner) = self.effects.banner() {
            self.renderer.render_banner(banner);
        }
    }
}
