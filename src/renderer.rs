use std::{collections::HashMap, sync::Mutex};

use macroquad::prelude::*;
use water_sort::{ControlAction, LiquidColor};

use crate::effects::{Banner, HintCue};
use crate::ui::{Button, HitItem, HitTestRegistry};

/// The eight classic liquid colors, followed by extras for larger palettes.
pub const PALETTE: [Color; 16] = [
    Color::new(1.0  , 0.302, 0.302, 1.0), //RED
    Color::new(0.231, 0.510, 0.965, 1.0), //BLUE
    Color::new(0.063, 0.725, 0.506, 1.0), //GREEN
    Color::new(0.980, 0.800, 0.082, 1.0), //YELLOW
    Color::new(0.984, 0.486, 0.020, 1.0), //ORANGE
    Color::new(0.545, 0.361, 0.965, 1.0), //PURPLE
    Color::new(1.0  , 0.478, 0.714, 1.0), //PINK
    Color::new(0.024, 0.714, 0.831, 1.0), //CYAN
    Color::new(0.647, 0.164, 0.164, 1.0), //BROWN
    Color::new(0.0  , 0.0  , 0.5  , 1.0), //NAVY
    Color::new(0.0  , 1.0  , 0.0  , 1.0), //LIME
    Color::new(0.0  , 0.5  , 0.5  , 1.0), //TEAL
    Color::new(1.0  , 0.843, 0.0  , 1.0), //GOLD
    Color::new(0.75 , 0.75 , 0.75 , 1.0), //SILVER
    Color::new(0.862, 0.078, 0.235, 1.0), //CRIMSON
    Color::new(0.294, 0.0  , 0.509, 1.0), //INDIGO
];

const SELECTED_OUTLINE: Color = Color::new(0.0, 1.0, 0.0, 1.0);
const HINT_OUTLINE: Color = Color::new(0.0, 0.0, 1.0, 1.0);

pub fn palette_color(color: LiquidColor) -> Color {
    PALETTE[color.id() % PALETTE.len()]
}

/// Font size and offsets that fit a text into a rectangle, cached per text and
/// rectangle size.
#[derive(Default)]
pub struct CachedTextSizer {
    cache: Mutex<HashMap<(String, u16, u16), (f32, f32, f32)>>,
}

impl CachedTextSizer {
    pub fn fit(&self, text: &str, rect_width: f32, rect_height: f32) -> (f32, f32, f32) {
        let key = (
            text.to_string(),
            rect_width.round().clamp(0.0, u16::MAX as f32) as u16,
            rect_height.round().clamp(0.0, u16::MAX as f32) as u16,
        );
        if let Ok(cache) = self.cache.lock()
            && let Some(fitted) = cache.get(&key)
        {
            return *fitted;
        }

        let reference_size = 100u16;
        let dimensions = measure_text(text, None, reference_size, 1.0);
        let scale = (rect_width / dimensions.width.max(1.0))
            .min(rect_height / dimensions.height.max(1.0));
        let size = reference_size as f32 * scale;
        let offset_x = (rect_width - dimensions.width * scale) / 2.0;
        // draw_text anchors on the baseline
        let offset_y = (rect_height + dimensions.offset_y * scale) / 2.0;
        let fitted = (size, offset_x, offset_y);

        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(key, fitted);
        }
        fitted
    }
}

/// Everything a frame needs to know.
pub struct FrameView<'a> {
    pub tubes: &'a [Vec<LiquidColor>],
    pub capacity: usize,
    pub selected: Option<usize>,
    pub hint: Option<&'a HintCue>,
    pub buttons: &'a [Button],
    pub status: &'a str,
    pub notice: Option<&'a str>,
}

pub struct Renderer {
    text_sizer: CachedTextSizer,
    hit_test: HitTestRegistry,
    tube_rects: Vec<Rect>,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            text_sizer: CachedTextSizer::default(),
            hit_test: HitTestRegistry::new(),
            tube_rects: Vec::new(),
            x: 0.0,
            y: 0.0,
            width: 800.0,
            height: 600.0,
        }
    }

    pub fn get_hit_test_registry(&self) -> &HitTestRegistry {
        &self.hit_test
    }

    pub fn autoset_viewport(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
        self.width = screen_width();
        self.height = screen_height();
    }

    /// Draws everything except confetti, which goes between the board and the
    /// banner.
    pub fn render_board(&mut self, view: &FrameView) {
        self.hit_test.clear();
        self.tube_rects.clear();

        clear_background(Color::new(0.07, 0.07, 0.12, 1.0));
        let padding = 10.0;
        let button_height = self.height * 0.1;
        let status_height = self.height * 0.06;
        let tube_area_height = self.height - button_height - status_height - 3.0 * padding;

        self.render_button_lineup(
            view.buttons,
            Rect::new(self.x, self.y, self.width, button_height),
        );
        self.render_text(
            view.notice.unwrap_or(view.status),
            Rect::new(
                self.x + self.width * 0.2,
                self.y + button_height + padding,
                self.width * 0.6,
                status_height,
            ),
            WHITE,
        );
        self.render_tube_grid(
            view,
            4,
            Rect::new(
                self.x + padding,
                self.y + button_height + status_height + 2.0 * padding,
                self.width - 2.0 * padding,
                tube_area_height,
            ),
        );
        if let Some(cue) = view.hint {
            self.render_hint_arrow(cue);
        }
    }

    pub fn render_text(&self, text: &str, rect: Rect, color: Color) {
        let (size, x, y) = self.text_sizer.fit(text, rect.w, rect.h);
        draw_text(text, rect.x + x, rect.y + y, size, color);
    }

    fn render_tube(
        &mut self,
        layers: &[LiquidColor],
        capacity: usize,
        index: usize,
        outline: Option<Color>,
        rect: Rect,
    ) {
        self.hit_test.push(rect, HitItem::Tube { index });
        self.tube_rects.push(rect);

        let layer_height = rect.h / capacity.max(1) as f32;
        for (i, color) in layers.iter().enumerate() {
            let layer_y = rect.y + rect.h - (i as f32 + 1.0) * layer_height;
            draw_rectangle(rect.x, layer_y, rect.w, layer_height, palette_color(*color));
        }
        match outline {
            Some(color) => draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 6.0, color),
            None => draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 4.0, WHITE),
        }
    }

    fn render_tube_grid(&mut self, view: &FrameView, max_columns: usize, rect: Rect) {
        let tube_count = view.tubes.len();
        if tube_count == 0 {
            return;
        }
        let rows = tube_count.div_ceil(max_columns);
        let columns = tube_count.min(max_columns);
        let spacing = 20.0;
        let tube_height = (rect.h - spacing * (rows as f32 - 1.0)) / rows as f32;
        let tube_width = ((rect.w - spacing * (columns as f32 - 1.0)) / columns as f32)
            .min(tube_height * 0.4);
        let row_width = columns as f32 * tube_width + (columns as f32 - 1.0) * spacing;
        let start_x = rect.x + (rect.w - row_width) / 2.0;

        for (index, layers) in view.tubes.iter().enumerate() {
            let row = index / max_columns;
            let column = index % max_columns;
            let hinted = view
                .hint
                .is_some_and(|cue| cue.hint.source == index || cue.hint.target == index);
            let outline = if view.selected == Some(index) {
                Some(SELECTED_OUTLINE)
            } else if hinted {
                Some(HINT_OUTLINE)
            } else {
                None
            };
            self.render_tube(
                layers,
                view.capacity,
                index,
                outline,
                Rect::new(
                    start_x + column as f32 * (tube_width + spacing),
                    rect.y + row as f32 * (tube_height + spacing),
                    tube_width,
                    tube_height,
                ),
            );
        }
    }

    fn render_hint_arrow(&self, cue: &HintCue) {
        let (Some(from), Some(to)) = (
            self.tube_rects.get(cue.hint.source),
            self.tube_rects.get(cue.hint.target),
        ) else {
            return;
        };
        let start = from.center();
        let end = to.center();
        let color = Color::new(1.0, 1.0, 1.0, cue.alpha());
        draw_line(start.x, start.y, end.x, end.y, 6.0, color);

        let direction = (end - start).normalize_or_zero();
        let normal = vec2(-direction.y, direction.x);
        let head = 24.0;
        let back = end - direction * head;
        let left = back + normal * head * 0.5;
        let right = back - normal * head * 0.5;
        draw_triangle(end, left, right, color);
    }

    fn render_button(&mut self, button: &Button, rect: Rect) {
        self.hit_test.push(
            rect,
            HitItem::Button {
                action: button.get_action(),
            },
        );
        draw_rectangle(rect.x, rect.y, rect.w, rect.h, button.get_color());
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 2.0, BLACK);
        self.render_text(button.get_label(), rect, WHITE);
    }

    fn render_button_lineup(&mut self, buttons: &[Button], rect: Rect) {
        if buttons.is_empty() {
            return;
        }
        let button_count = buttons.len() as f32;
        let spacing = 10.0;
        let button_width = (rect.w - spacing * (button_count - 1.0)) / button_count;
        for (i, button) in buttons.iter().enumerate() {
            let button_x = rect.x + i as f32 * (button_width + spacing);
            self.render_button(button, Rect::new(button_x, rect.y, button_width, rect.h));
        }
    }

    /// Modal banner drawn on top of everything. The backdrop swallows clicks on
    /// the board and the button, registered last, wins the hit test.
    pub fn render_banner(&mut self, banner: &Banner) {
        let full = Rect::new(self.x, self.y, self.width, self.height);
        draw_rectangle(full.x, full.y, full.w, full.h, Color::new(0.0, 0.0, 0.0, 0.6));

        let card = Rect::new(
            self.x + self.width * 0.2,
            self.y + self.height * 0.3,
            self.width * 0.6,
            self.height * 0.4,
        );
        draw_rectangle(card.x, card.y, card.w, card.h, Color::new(0.15, 0.15, 0.22, 1.0));
        draw_rectangle_lines(card.x, card.y, card.w, card.h, 3.0, WHITE);

        let (title, body, button) = match banner {
            Banner::Completed { level, moves } => (
                format!("Level {level} Completed!"),
                format!("You finished in {moves} moves!"),
                Some(Button::new("Next Level", ControlAction::NextLevel, PALETTE[2])),
            ),
            Banner::TooManyHints => (
                "You Used Too Many Hints!".to_string(),
                "Better luck next time!".to_string(),
                Some(Button::new("Retry Level", ControlAction::Reset, PALETTE[0])),
            ),
            Banner::AllLevelsCompleted => (
                "You've completed all available levels!".to_string(),
                String::new(),
                None,
            ),
        };

        let line = card.h / 4.0;
        let title_rect = Rect::new(card.x + 20.0, card.y + 10.0, card.w - 40.0, line);
        self.render_text(&title, title_rect, WHITE);
        if !body.is_empty() {
            let body_rect = Rect::new(
                card.x + 40.0,
                card.y + line + 10.0,
                card.w - 80.0,
                line * 0.7,
            );
            self.render_text(&body, body_rect, WHITE);
        }

        self.hit_test.push(full, HitItem::Backdrop);
        let button_rect = Rect::new(
            card.x + card.w * 0.3,
            card.y + card.h - line - 10.0,
            card.w * 0.4,
            line,
        );
        match button {
            Some(button) => self.render_button(&button, button_rect),
            // Closing only dismisses the banner, the engine has nothing to do.
            None => {
                let r = button_rect;
                draw_rectangle(r.x, r.y, r.w, r.h, PALETTE[1]);
                draw_rectangle_lines(r.x, r.y, r.w, r.h, 2.0, BLACK);
                self.render_text("Close", r, WHITE);
                self.hit_test.push(r, HitItem::DismissBanner);
            }
        }
    }
}
