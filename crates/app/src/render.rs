//! Frame composition: ceiling and floor halves, wall columns, then sprites as
//! one-pixel vertical strips tested against the wall depth buffer.

use game_core::cast_walls;
use game_core::raycast::{RenderContext, Side, WallColumn, shade};
use game_core::sim::Simulation;
use game_core::sprite::{project, sort_back_to_front, visible_columns};
use game_core::types::Rgb;
use macroquad::prelude::{
    Color, DrawTextureParams, FilterMode, Rect, Texture2D, draw_rectangle, draw_texture_ex,
    load_texture, screen_height, screen_width, vec2,
};

const CEILING_COLOR: Color = Color { r: 0.14, g: 0.14, b: 0.20, a: 1.0 };
const FLOOR_COLOR: Color = Color { r: 0.20, g: 0.17, b: 0.14, a: 1.0 };

/// Wall rendering mode, fixed at startup: flat shaded colors, or a texture
/// sampled per column at the fractional hit coordinate.
pub enum WallStyle {
    Flat,
    Textured(Texture2D),
}

/// `--texture <path>` / `--texture=<path>` from the raw argument list.
pub fn texture_path_from_args(args: &[String]) -> Option<String> {
    let mut index = 1usize;
    while index < args.len() {
        let argument = args[index].as_str();
        if argument == "--texture" {
            return args.get(index + 1).cloned();
        }
        if let Some(path) = argument.strip_prefix("--texture=") {
            return Some(path.to_string());
        }
        index += 1;
    }
    None
}

pub async fn resolve_wall_style(args: &[String]) -> Result<WallStyle, String> {
    match texture_path_from_args(args) {
        None => Ok(WallStyle::Flat),
        Some(path) => {
            let texture = load_texture(&path)
                .await
                .map_err(|error| format!("failed to load wall texture '{path}': {error}"))?;
            texture.set_filter(FilterMode::Nearest);
            Ok(WallStyle::Textured(texture))
        }
    }
}

pub fn to_color(rgb: Rgb) -> Color {
    Color::from_rgba(rgb.r, rgb.g, rgb.b, 255)
}

pub fn draw_world(ctx: &mut RenderContext, sim: &Simulation, style: &WallStyle) {
    let width = screen_width();
    let height = screen_height();
    ctx.reset(width as usize, height as usize);

    draw_rectangle(0.0, 0.0, width, height / 2.0, CEILING_COLOR);
    draw_rectangle(0.0, height / 2.0, width, height / 2.0, FLOOR_COLOR);

    let columns = cast_walls(ctx, &sim.map, &sim.player.camera);
    for column in &columns {
        match style {
            WallStyle::Flat => draw_flat_column(column),
            WallStyle::Textured(texture) => draw_textured_column(column, texture, height),
        }
    }

    draw_sprites(ctx, sim);
}

fn draw_flat_column(column: &WallColumn) {
    let top = column.draw_start as f32;
    let bottom = column.draw_end as f32;
    draw_rectangle(column.x as f32, top, 1.0, (bottom - top).max(1.0), to_color(column.color));
}

fn draw_textured_column(column: &WallColumn, texture: &Texture2D, screen_height: f32) {
    let source_x = ((column.wall_x * f64::from(texture.width())) as f32)
        .clamp(0.0, texture.width() - 1.0);
    // The unclipped height keeps the texture mapping stable when the slice
    // overflows the screen.
    let dest_height = column.line_height as f32;
    let top = (screen_height - dest_height) / 2.0;
    let tint = shade(Rgb::new(255, 255, 255), column.side, column.perp_dist);

    draw_texture_ex(
        texture,
        column.x as f32,
        top,
        to_color(tint),
        DrawTextureParams {
            dest_size: Some(vec2(1.0, dest_height)),
            source: Some(Rect::new(source_x, 0.0, 1.0, texture.height())),
            ..Default::default()
        },
    );
}

fn draw_sprites(ctx: &RenderContext, sim: &Simulation) {
    let camera = &sim.player.camera;
    let mut projections: Vec<_> = sim
        .sprite_instances()
        .iter()
        .filter_map(|instance| project(camera, ctx, instance))
        .collect();
    sort_back_to_front(&mut projections);

    for projection in &projections {
        // Same fog curve as the walls so sprites sit in the scene.
        let color = to_color(shade(projection.color, Side::X, projection.depth));
        let top = projection.draw_start_y as f32;
        let strip_height = (projection.draw_end_y - projection.draw_start_y).max(1) as f32;
        for column in visible_columns(projection, ctx) {
            draw_rectangle(column as f32, top, 1.0, strip_height, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| part.to_string()).collect()
    }

    #[test]
    fn texture_flag_parses_both_forms() {
        assert_eq!(
            texture_path_from_args(&as_args(&["game", "--texture", "bricks.png"])),
            Some("bricks.png".to_string())
        );
        assert_eq!(
            texture_path_from_args(&as_args(&["game", "--texture=bricks.png"])),
            Some("bricks.png".to_string())
        );
        assert_eq!(texture_path_from_args(&as_args(&["game"])), None);
    }

    #[test]
    fn rgb_converts_to_opaque_color() {
        let color = to_color(Rgb::new(120, 80, 60));
        assert!((color.a - 1.0).abs() < 1e-6);
        assert!((color.r - 120.0 / 255.0).abs() < 1e-6);
    }
}
