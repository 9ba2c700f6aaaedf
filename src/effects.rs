//! Cosmetic effects: the per-layer pour replay, confetti, the hint arrow and the
//! end-of-level banner. None of this feeds back into the rule engine.

use std::collections::VecDeque;

use ::rand::Rng;
use macroquad::prelude::{Color, draw_circle, screen_height, screen_width};
use water_sort::{HintSuggestion, LiquidColor, PuzzleState};

use crate::renderer::palette_color;

/// Time between two replayed tube updates. A pour step updates two tubes, so a
/// layer travels every 75 ms.
const RENDER_STEP_SEC: f32 = 0.0375;

/// The hint arrow stays fully visible this long, then fades out.
const HINT_VISIBLE_SEC: f32 = 2.0;
const HINT_FADE_SEC: f32 = 0.3;

/// Delay between the winning pour settling and the banner appearing.
const BANNER_DELAY_SEC: f32 = 0.3;

const NOTICE_SEC: f32 = 1.5;

pub const CLEAR_CONFETTI: usize = 30;
pub const WIN_CONFETTI: usize = 60;

/// What the tubes look like on screen. Lags behind the engine while a pour is
/// being replayed.
#[derive(Default)]
pub struct DisplayBoard {
    tubes: Vec<Vec<LiquidColor>>,
    pending: VecDeque<(usize, Vec<LiquidColor>)>,
    timer: f32,
}

impl DisplayBoard {
    pub fn snap_to(&mut self, state: &PuzzleState) {
        self.pending.clear();
        self.timer = 0.0;
        self.tubes = state
            .tubes()
            .iter()
            .map(|tube| tube.layers().to_vec())
            .collect();
    }

    pub fn queue(&mut self, index: usize, layers: Vec<LiquidColor>) {
        self.pending.push_back((index, layers));
    }

    pub fn update(&mut self, dt: f32) {
        if self.pending.is_empty() {
            self.timer = 0.0;
            return;
        }
        self.timer += dt;
        while self.timer >= RENDER_STEP_SEC {
            self.timer -= RENDER_STEP_SEC;
            let Some((index, layers)) = self.pending.pop_front() else {
                break;
            };
            if let Some(tube) = self.tubes.get_mut(index) {
                *tube = layers;
            }
        }
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn tubes(&self) -> &[Vec<LiquidColor>] {
        &self.tubes
    }
}

struct Particle {
    x: f32,
    y: f32,
    r: f32,
    dx: f32,
    dy: f32,
    color: Color,
}

pub struct HintCue {
    pub hint: HintSuggestion,
    age: f32,
}

impl HintCue {
    pub fn alpha(&self) -> f32 {
        if self.age <= HINT_VISIBLE_SEC {
            1.0
        } else {
            (1.0 - (self.age - HINT_VISIBLE_SEC) / HINT_FADE_SEC).clamp(0.0, 1.0)
        }
    }

    fn expired(&self) -> bool {
        self.age >= HINT_VISIBLE_SEC + HINT_FADE_SEC
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Banner {
    Completed { level: usize, moves: usize },
    TooManyHints,
    AllLevelsCompleted,
}

#[derive(Default)]
pub struct Effects {
    confetti: Vec<Particle>,
    hint: Option<HintCue>,
    pending_banner: Option<(Banner, f32)>,
    banner: Option<Banner>,
    notice: Option<(String, f32)>,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything tied to the previous level.
    pub fn reset(&mut self) {
        self.confetti.clear();
        self.hint = None;
        self.pending_banner = None;
        self.banner = None;
        self.notice = None;
    }

    pub fn spawn_confetti(&mut self, count: usize, palette_size: usize) {
        let mut rng = ::rand::rng();
        let (w, h) = (screen_width(), screen_height());
        for _ in 0..count {
            self.confetti.push(Particle {
                x: rng.random_range(0.0..w.max(1.0)),
                y: rng.random_range(0.0..h.max(1.0)) - 20.0,
                r: rng.random_range(4.0..10.0),
                dx: rng.random_range(-1.0..1.0),
                dy: rng.random_range(2.0..5.0),
                color: palette_color(LiquidColor::new(rng.random_range(0..palette_size.max(1)))),
            });
        }
    }

    pub fn show_hint(&mut self, hint: HintSuggestion) {
        self.hint = Some(HintCue { hint, age: 0.0 });
    }

    pub fn hint(&self) -> Option<&HintCue> {
        self.hint.as_ref()
    }

    pub fn show_notice(&mut self, text: &str) {
        self.notice = Some((text.to_string(), 0.0));
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_ref().map(|(text, _)| text.as_str())
    }

    pub fn schedule_banner(&mut self, banner: Banner) {
        self.pending_banner = Some((banner, 0.0));
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Advance all effects. The banner waits until the board has finished
    /// replaying the last pour.
    pub fn update(&mut self, dt: f32, board_idle: bool) {
        let frames = dt * 60.0;
        let height = screen_height();
        for p in &mut self.confetti {
            p.x += p.dx * frames;
            p.y += p.dy * frames;
        }
        self.confetti.retain(|p| p.y <= height);

        if let Some(cue) = &mut self.hint {
            cue.age += dt;
            if cue.expired() {
                self.hint = None;
            }
        }

        if let Some((_, age)) = &mut self.notice {
            *age += dt;
            if *age >= NOTICE_SEC {
                self.notice = None;
            }
        }

        if board_idle && let Some((banner, waited)) = &mut self.pending_banner {
            *waited += dt;
            if *waited >= BANNER_DELAY_SEC {
                self.banner = Some(banner.clone());
                self.pending_banner = None;
            }
        }
    }

    pub fn draw_confetti(&self) {
        for p in &self.confetti {
            draw_circle(p.x, p.y, p.r, p.color);
        }
    }
}
