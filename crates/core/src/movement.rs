//! Collision testing and wall-sliding movement against the tile grid.

use crate::tilemap::TileMap;
use crate::types::Vec2;

pub const PLAYER_RADIUS: f64 = 0.3;
pub const ENEMY_RADIUS: f64 = 0.2;
pub const MOVE_SPEED: f64 = 5.0;
pub const STRAFE_SPEED: f64 = 4.5;
pub const ROT_SPEED: f64 = 3.0;
pub const FRICTION: f64 = 0.90;
/// Momentum components below this snap to exactly zero instead of decaying
/// forever.
pub const MOMENTUM_EPSILON: f64 = 0.001;

/// Corner-sampled collision test: the four corners of the axis-aligned square
/// of half-width `radius` are truncated to tile indices and checked.
/// Out-of-bounds corners collide.
pub fn collides(map: &TileMap, x: f64, y: f64, radius: f64) -> bool {
    let corners = [
        (x - radius, y - radius),
        (x + radius, y - radius),
        (x - radius, y + radius),
        (x + radius, y + radius),
    ];
    corners.iter().any(|&(corner_x, corner_y)| {
        let tile_x = corner_x as i32;
        let tile_y = corner_y as i32;
        corner_x < 0.0 || corner_y < 0.0 || map.is_blocking(tile_x, tile_y)
    })
}

/// Attempt the full move, then the x-only component, then the y-only
/// component. The x-before-y order is an arbitrary but fixed tie-break; it is
/// what makes diagonal movement slide along walls instead of stopping.
pub fn slide_move(map: &TileMap, pos: Vec2, target: Vec2, radius: f64) -> Vec2 {
    if !collides(map, target.x, target.y, radius) {
        return target;
    }
    if !collides(map, target.x, pos.y, radius) {
        return Vec2::new(target.x, pos.y);
    }
    if !collides(map, pos.x, target.y, radius) {
        return Vec2::new(pos.x, target.y);
    }
    pos
}

/// Direct step used by enemies: no momentum, no sliding. Returns the stepped
/// position only when it is clear.
pub fn step_if_clear(map: &TileMap, pos: Vec2, step: Vec2, radius: f64) -> Option<Vec2> {
    let stepped = pos.add(step);
    if collides(map, stepped.x, stepped.y, radius) { None } else { Some(stepped) }
}

/// Friction decay for a frame without movement input.
pub fn apply_friction(momentum: Vec2) -> Vec2 {
    let mut decayed = momentum.scaled(FRICTION);
    if decayed.x.abs() < MOMENTUM_EPSILON {
        decayed.x = 0.0;
    }
    if decayed.y.abs() < MOMENTUM_EPSILON {
        decayed.y = 0.0;
    }
    decayed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tile;

    /// 5x5 walls with a single open tile at (2, 2).
    fn closet() -> TileMap {
        let mut tiles = vec![Tile::Wall; 25];
        tiles[2 * 5 + 2] = Tile::Floor;
        TileMap::new(5, 5, tiles)
    }

    /// 6x5 walls with an open row at y = 2, x in 1..=4.
    fn corridor() -> TileMap {
        let mut tiles = vec![Tile::Wall; 30];
        for x in 1..=4 {
            tiles[2 * 6 + x] = Tile::Floor;
        }
        TileMap::new(6, 5, tiles)
    }

    #[test]
    fn collision_hits_walls_and_bounds() {
        let map = closet();
        assert!(!collides(&map, 2.5, 2.5, 0.3));
        assert!(collides(&map, 2.5, 1.5, 0.3));
        assert!(collides(&map, -0.5, 2.5, 0.3));
        assert!(collides(&map, 2.5, 200.0, 0.3));
    }

    #[test]
    fn points_bounded_inside_a_wall_tile_always_collide() {
        let map = closet();
        for step_x in 0..10 {
            for step_y in 0..10 {
                let x = 1.05 + f64::from(step_x) * 0.09;
                let y = 1.05 + f64::from(step_y) * 0.09;
                if x < 2.0 || y < 2.0 {
                    assert!(collides(&map, x, y, 0.04), "({x}, {y}) lies in wall tiles");
                }
            }
        }
    }

    #[test]
    fn blocked_on_both_axes_is_a_no_op() {
        let map = closet();
        let pos = Vec2::new(2.5, 2.5);
        let resolved = slide_move(&map, pos, Vec2::new(3.5, 3.5), 0.3);
        assert_eq!(resolved, pos);
    }

    #[test]
    fn diagonal_into_a_wall_slides_along_it() {
        let map = corridor();
        let pos = Vec2::new(2.5, 2.5);
        let resolved = slide_move(&map, pos, Vec2::new(3.2, 3.2), 0.3);
        // The y component is blocked by the corridor wall; x passes.
        assert_eq!(resolved, Vec2::new(3.2, 2.5));
    }

    #[test]
    fn unobstructed_move_lands_on_target() {
        let map = corridor();
        let resolved = slide_move(&map, Vec2::new(1.5, 2.5), Vec2::new(2.0, 2.5), 0.3);
        assert_eq!(resolved, Vec2::new(2.0, 2.5));
    }

    #[test]
    fn enemy_step_commits_only_when_clear() {
        let map = corridor();
        let pos = Vec2::new(2.5, 2.5);
        assert_eq!(
            step_if_clear(&map, pos, Vec2::new(0.5, 0.0), ENEMY_RADIUS),
            Some(Vec2::new(3.0, 2.5))
        );
        assert_eq!(step_if_clear(&map, pos, Vec2::new(0.0, 0.5), ENEMY_RADIUS), None);
    }

    #[test]
    fn friction_decays_and_snaps_to_zero() {
        let mut momentum = Vec2::new(0.5, -0.5);
        momentum = apply_friction(momentum);
        assert!((momentum.x - 0.45).abs() < 1e-12);
        assert!((momentum.y + 0.45).abs() < 1e-12);

        let mut creeping = Vec2::new(0.001, 0.0);
        creeping = apply_friction(creeping);
        assert_eq!(creeping, Vec2::ZERO);
    }
}
