//! Cellular-automata cave generation for the top-down world.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

use crate::tilemap::TileMap;
use crate::types::Tile;

/// Percentile threshold for the seed pass; blends above it become floor.
const INITIAL_FILL_THRESHOLD: u64 = 45;
const SMOOTHING_PASSES: usize = 5;
/// Percent of floor tiles reclassified as water after smoothing.
const WATER_PERCENT: i32 = 3;

/// Noise seed, then neighbor smoothing, then a sparse water pass. The result
/// can contain unreachable floor pockets; that is accepted output, not
/// repaired.
pub fn generate_cave(rng: &mut ChaCha8Rng, width: usize, height: usize) -> TileMap {
    let mut tiles = vec![Tile::Wall; width * height];

    // Uniform noise blended with a fixed positional pattern so clusters get a
    // reproducible grain on top of the random fill.
    for y in 0..height {
        for x in 0..width {
            let noise = rng.next_u64() % 101;
            let pattern = ((x * 7 + y * 11) % 100) as u64;
            if (noise + pattern) / 2 > INITIAL_FILL_THRESHOLD {
                tiles[y * width + x] = Tile::Floor;
            }
        }
    }

    for _ in 0..SMOOTHING_PASSES {
        tiles = smooth_pass(&tiles, width, height);
    }

    for y in 0..height {
        for x in 0..width {
            if tiles[y * width + x] == Tile::Floor && ((x * 13 + y * 17) % 100) < WATER_PERCENT as usize
            {
                tiles[y * width + x] = Tile::Water;
            }
        }
    }

    TileMap::new(width, height, tiles)
}

/// One smoothing generation, computed against a snapshot of the previous one.
/// Strictly more than 4 wall neighbors turns a tile to wall, strictly fewer
/// turns it to floor, exactly 4 leaves it unchanged.
fn smooth_pass(tiles: &[Tile], width: usize, height: usize) -> Vec<Tile> {
    let mut next = tiles.to_vec();
    for y in 0..height {
        for x in 0..width {
            let walls = count_wall_neighbors(tiles, width, height, x as i32, y as i32);
            if walls > 4 {
                next[y * width + x] = Tile::Wall;
            } else if walls < 4 {
                next[y * width + x] = Tile::Floor;
            }
        }
    }
    next
}

/// Wall count among the 8 neighbors; out-of-bounds neighbors count as wall.
fn count_wall_neighbors(tiles: &[Tile], width: usize, height: usize, x: i32, y: i32) -> u32 {
    let mut walls = 0;
    for ny in (y - 1)..=(y + 1) {
        for nx in (x - 1)..=(x + 1) {
            if nx == x && ny == y {
                continue;
            }
            let out_of_bounds =
                nx < 0 || ny < 0 || nx as usize >= width || ny as usize >= height;
            if out_of_bounds || tiles[(ny as usize) * width + nx as usize] == Tile::Wall {
                walls += 1;
            }
        }
    }
    walls
}
