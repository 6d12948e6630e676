//! DDA wall casting: per-column ray marching over the tile grid, producing
//! wall slices and the depth buffer that sprite occlusion tests against.

use crate::camera::Camera;
use crate::tilemap::TileMap;
use crate::types::{Rgb, Vec2};

/// Stand-in for an infinite per-axis step when a ray component is zero.
const FAR: f64 = 1e30;
/// Perpendicular distances are clamped here to keep projected heights finite.
pub const MIN_WALL_DIST: f64 = 0.1;
/// Distance at which fog fully saturates.
pub const FOG_DISTANCE: f64 = 20.0;
/// Fraction of the color removed at full fog.
const FOG_STRENGTH: f64 = 0.7;

const WALL_BASE_COLOR: Rgb = Rgb::new(120, 80, 60);

/// Which grid axis the DDA stepped across last; determines shading and the
/// perpendicular-distance formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    X,
    Y,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallHit {
    pub perp_dist: f64,
    pub side: Side,
    pub map_x: i32,
    pub map_y: i32,
    /// Fractional hit coordinate along the wall face, for texture sampling.
    pub wall_x: f64,
}

/// One vertical strip of wall, ready for the display surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallColumn {
    pub x: usize,
    /// Unclipped projected height in pixels; texture mapping needs it even
    /// when the drawn range is clipped.
    pub line_height: i32,
    pub draw_start: i32,
    pub draw_end: i32,
    pub side: Side,
    pub wall_x: f64,
    pub perp_dist: f64,
    pub color: Rgb,
}

/// Per-frame rendering state: screen dimensions plus the column depth buffer.
/// Transient; `reset` clears it at the start of every frame.
pub struct RenderContext {
    pub screen_width: usize,
    pub screen_height: usize,
    pub depth: Vec<f64>,
}

impl RenderContext {
    pub fn new(screen_width: usize, screen_height: usize) -> Self {
        Self { screen_width, screen_height, depth: vec![FAR; screen_width] }
    }

    pub fn reset(&mut self, screen_width: usize, screen_height: usize) {
        self.screen_width = screen_width;
        self.screen_height = screen_height;
        self.depth.clear();
        self.depth.resize(screen_width, FAR);
    }
}

/// March one ray through the grid with DDA, stepping whichever axis has the
/// smaller accumulated side distance. Out-of-bounds tiles read as wall, so
/// every ray terminates.
pub fn cast_ray(map: &TileMap, origin: Vec2, ray_dir: Vec2) -> WallHit {
    let mut map_x = origin.x.floor() as i32;
    let mut map_y = origin.y.floor() as i32;

    let delta_dist_x = if ray_dir.x == 0.0 { FAR } else { (1.0 / ray_dir.x).abs() };
    let delta_dist_y = if ray_dir.y == 0.0 { FAR } else { (1.0 / ray_dir.y).abs() };

    let (step_x, mut side_dist_x) = if ray_dir.x < 0.0 {
        (-1, (origin.x - f64::from(map_x)) * delta_dist_x)
    } else {
        (1, (f64::from(map_x) + 1.0 - origin.x) * delta_dist_x)
    };
    let (step_y, mut side_dist_y) = if ray_dir.y < 0.0 {
        (-1, (origin.y - f64::from(map_y)) * delta_dist_y)
    } else {
        (1, (f64::from(map_y) + 1.0 - origin.y) * delta_dist_y)
    };

    let mut side = Side::X;
    loop {
        if side_dist_x < side_dist_y {
            side_dist_x += delta_dist_x;
            map_x += step_x;
            side = Side::X;
        } else {
            side_dist_y += delta_dist_y;
            map_y += step_y;
            side = Side::Y;
        }
        if map.is_blocking(map_x, map_y) {
            break;
        }
    }

    // Perpendicular distance along the camera's forward axis, not euclidean
    // ray length; this is what keeps projected wall heights fisheye-free.
    let perp_dist = match side {
        Side::X => (f64::from(map_x) - origin.x + f64::from(1 - step_x) / 2.0) / ray_dir.x,
        Side::Y => (f64::from(map_y) - origin.y + f64::from(1 - step_y) / 2.0) / ray_dir.y,
    }
    .max(MIN_WALL_DIST);

    let wall_x = match side {
        Side::X => origin.y + perp_dist * ray_dir.y,
        Side::Y => origin.x + perp_dist * ray_dir.x,
    };

    WallHit { perp_dist, side, map_x, map_y, wall_x: wall_x - wall_x.floor() }
}

/// Shade a wall color for its hit: the y-stepped side is darkened as a cheap
/// lighting cue, then fog blends toward black with distance.
pub fn shade(base: Rgb, side: Side, perp_dist: f64) -> Rgb {
    let sided = match side {
        Side::X => base,
        Side::Y => base.scaled(1.0 / 1.5),
    };
    let fog = (perp_dist / FOG_DISTANCE).min(1.0);
    sided.scaled(1.0 - fog * FOG_STRENGTH)
}

/// Cast one ray per screen column, filling `ctx.depth` and returning the wall
/// slices to draw. The depth values stored here are the exact perpendicular
/// distances sprite occlusion compares against.
pub fn cast_walls(ctx: &mut RenderContext, map: &TileMap, camera: &Camera) -> Vec<WallColumn> {
    let screen_width = ctx.screen_width;
    let screen_height = ctx.screen_height as i32;
    let mut columns = Vec::with_capacity(screen_width);

    for x in 0..screen_width {
        let camera_x = 2.0 * x as f64 / screen_width as f64 - 1.0;
        let hit = cast_ray(map, camera.pos, camera.ray_dir(camera_x));

        ctx.depth[x] = hit.perp_dist;

        let line_height = (f64::from(screen_height) / hit.perp_dist) as i32;
        let draw_start = (-line_height / 2 + screen_height / 2).max(0);
        let draw_end = (line_height / 2 + screen_height / 2).min(screen_height - 1);

        columns.push(WallColumn {
            x,
            line_height,
            draw_start,
            draw_end,
            side: hit.side,
            wall_x: hit.wall_x,
            perp_dist: hit.perp_dist,
            color: shade(WALL_BASE_COLOR, hit.side, hit.perp_dist),
        });
    }

    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tile;

    /// 12x5 walls with an open row at y = 2, x in 1..=8; wall face at x = 9.
    fn corridor() -> TileMap {
        let mut tiles = vec![Tile::Wall; 12 * 5];
        for x in 1..=8 {
            tiles[2 * 12 + x] = Tile::Floor;
        }
        TileMap::new(12, 5, tiles)
    }

    #[test]
    fn straight_ray_measures_corridor_length_exactly() {
        let map = corridor();
        let hit = cast_ray(&map, Vec2::new(1.5, 2.5), Vec2::new(1.0, 0.0));
        assert_eq!(hit.side, Side::X);
        assert_eq!((hit.map_x, hit.map_y), (9, 2));
        assert!((hit.perp_dist - 7.5).abs() < 1e-9, "no fisheye at the center ray");
    }

    #[test]
    fn rays_cannot_escape_the_grid() {
        let map = TileMap::filled(4, 4, Tile::Floor);
        // Fully open map: the out-of-bounds border still stops the march.
        let hit = cast_ray(&map, Vec2::new(2.0, 2.0), Vec2::new(0.0, 1.0));
        assert_eq!(hit.side, Side::Y);
        assert_eq!(hit.map_y, 4);
    }

    #[test]
    fn axis_aligned_rays_handle_zero_components() {
        let map = corridor();
        let hit = cast_ray(&map, Vec2::new(1.5, 2.5), Vec2::new(0.0, -1.0));
        assert_eq!(hit.side, Side::Y);
        assert_eq!(hit.map_y, 1);
    }

    #[test]
    fn distance_clamp_prevents_degenerate_heights() {
        let map = corridor();
        // Standing almost against the wall face.
        let hit = cast_ray(&map, Vec2::new(8.99, 2.5), Vec2::new(1.0, 0.0));
        assert!(hit.perp_dist >= MIN_WALL_DIST);
    }

    #[test]
    fn center_column_depth_matches_the_straight_ray() {
        let map = corridor();
        let camera = Camera {
            pos: Vec2::new(1.5, 2.5),
            dir: Vec2::new(1.0, 0.0),
            plane: Vec2::new(0.0, 0.66),
        };
        let mut ctx = RenderContext::new(64, 48);
        let columns = cast_walls(&mut ctx, &map, &camera);

        assert_eq!(columns.len(), 64);
        // Column 32 has camera_x == 0 exactly.
        assert!((ctx.depth[32] - 7.5).abs() < 1e-9);
        assert_eq!(columns[32].draw_end - columns[32].draw_start, (48.0 / 7.5) as i32);
    }

    #[test]
    fn y_side_walls_are_drawn_darker() {
        let near = shade(Rgb::new(120, 80, 60), Side::X, 1.0);
        let near_y = shade(Rgb::new(120, 80, 60), Side::Y, 1.0);
        assert!(near_y.r < near.r && near_y.g < near.g && near_y.b < near.b);
    }

    #[test]
    fn fog_saturates_at_the_fog_distance() {
        let base = Rgb::new(120, 80, 60);
        let at_limit = shade(base, Side::X, FOG_DISTANCE);
        let beyond = shade(base, Side::X, FOG_DISTANCE * 3.0);
        assert_eq!(at_limit, beyond);
        assert_eq!(at_limit, base.scaled(1.0 - 0.7));
    }

    #[test]
    fn wall_x_is_fractional() {
        let map = corridor();
        let hit = cast_ray(&map, Vec2::new(1.5, 2.25), Vec2::new(1.0, 0.0));
        assert!((0.0..1.0).contains(&hit.wall_x));
        assert!((hit.wall_x - 0.25).abs() < 1e-9);
    }
}
