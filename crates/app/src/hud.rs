//! In-game overlay: health bar, run stats line, and the crosshair.

use crate::render::to_color;
use game_core::sim::Simulation;
use macroquad::prelude::{
    Color, draw_line, draw_rectangle, draw_text, get_fps, screen_height, screen_width,
};

use game_core::types::Rgb;

const BAR_HEIGHT: f32 = 64.0;
const BAR_BACKGROUND: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 0.5 };
const HEALTH_BAR_WIDTH: f32 = 220.0;
const HEALTH_BAR_HEIGHT: f32 = 18.0;
const PAD: f32 = 14.0;
const CROSSHAIR_ARM: f32 = 8.0;

const HEALTHY_THRESHOLD: i32 = 50;
const WOUNDED_THRESHOLD: i32 = 25;

/// Green above half health, yellow while wounded, red when critical.
pub fn health_color(health: i32) -> Rgb {
    if health > HEALTHY_THRESHOLD {
        Rgb::new(60, 220, 60)
    } else if health > WOUNDED_THRESHOLD {
        Rgb::new(230, 210, 50)
    } else {
        Rgb::new(220, 50, 50)
    }
}

pub fn stats_line(sim: &Simulation, fps: i32) -> String {
    let player = &sim.player;
    format!(
        "SCORE {}   AMMO {}   KILLS {}/{}   FPS {}",
        player.score,
        player.ammo,
        player.kills,
        player.kills as usize + sim.enemies.len(),
        fps
    )
}

pub fn draw_hud(sim: &Simulation) {
    let width = screen_width();
    let height = screen_height();
    let bar_top = height - BAR_HEIGHT;

    draw_rectangle(0.0, bar_top, width, BAR_HEIGHT, BAR_BACKGROUND);

    let player = &sim.player;
    let fraction = (player.health.max(0) as f32 / player.max_health as f32).min(1.0);
    draw_rectangle(
        PAD,
        bar_top + PAD,
        HEALTH_BAR_WIDTH,
        HEALTH_BAR_HEIGHT,
        Color { r: 0.15, g: 0.15, b: 0.15, a: 1.0 },
    );
    draw_rectangle(
        PAD,
        bar_top + PAD,
        HEALTH_BAR_WIDTH * fraction,
        HEALTH_BAR_HEIGHT,
        to_color(health_color(player.health)),
    );

    let line = stats_line(sim, get_fps());
    let text_color = Color { r: 0.9, g: 0.9, b: 0.9, a: 1.0 };
    draw_text(&line, PAD + HEALTH_BAR_WIDTH + PAD, bar_top + PAD + HEALTH_BAR_HEIGHT, 22.0, text_color);

    let center_x = width / 2.0;
    let center_y = height / 2.0;
    let crosshair = Color { r: 1.0, g: 1.0, b: 1.0, a: 0.8 };
    draw_line(center_x - CROSSHAIR_ARM, center_y, center_x + CROSSHAIR_ARM, center_y, 1.5, crosshair);
    draw_line(center_x, center_y - CROSSHAIR_ARM, center_x, center_y + CROSSHAIR_ARM, 1.5, crosshair);
}
