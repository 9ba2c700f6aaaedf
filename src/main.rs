mod app;
mod cli_options;
mod effects;
mod renderer;
mod ui;

use macroquad::prelude::*;
use water_sort::{ControlAction, GameEngine};

use crate::app::GameApp;

fn main() {
    let options = match cli_options::parse() {
        Ok(options) => options,
        Err(code) => std::process::exit(code.into()),
    };

    let mut engine = match GameEngine::from_config(options.config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };

    if options.list_levels {
        for level in engine.levels() {
            println!("Level {} - {} tubes", level.index, level.tube_count);
        }
        return;
    }

    if options.start_level != 1 && !engine.init_level(options.start_level) {
        eprintln!(
            "Unknown level {}, starting at level 1. Use --ls to list the levels.",
            options.start_level
        );
    }

    macroquad::Window::new("Water Sort", run(engine));
}

async fn run(engine: GameEngine) {
    let mut app = GameApp::new(engine);
    loop {
        app.update(get_frame_time());
        app.render();
        if is_mouse_button_pressed(MouseButton::Left) {
            let (x, y) = mouse_position();
            app.handle_click(x, y);
        }
        if is_key_pressed(KeyCode::H) {
            app.handle_action(ControlAction::Hint);
        }
        if is_key_pressed(KeyCode::R) {
            app.handle_action(ControlAction::Reset);
        }
        if is_key_pressed(KeyCode::Escape) {
            app.handle_action(ControlAction::Deselect);
        }
        next_frame().await;
    }
}
