//! Fixed-size tile grid shared by generation, collision, and rendering.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;
use xxhash_rust::xxh3::xxh3_64;

use crate::types::Tile;

/// Random probes spent looking for an open tile before giving up. Bounded so
/// a degenerate all-wall map cannot hang spawn placement.
const EMPTY_SPOT_ATTEMPTS: u32 = 100;

/// Rectangular tile grid. Immutable once a generator has produced it; both
/// collision and the raycaster only ever read it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileMap {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileMap {
    pub fn new(width: usize, height: usize, tiles: Vec<Tile>) -> Self {
        assert_eq!(tiles.len(), width * height, "tile buffer must match dimensions");
        Self { width, height, tiles }
    }

    pub fn filled(width: usize, height: usize, tile: Tile) -> Self {
        Self { width, height, tiles: vec![tile; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Bounds-checked lookup. Anything outside the grid reads as `Wall`, so
    /// rays and collision probes can never escape the map.
    pub fn tile_at(&self, x: i32, y: i32) -> Tile {
        if x < 0 || y < 0 {
            return Tile::Wall;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return Tile::Wall;
        }
        self.tiles[y * self.width + x]
    }

    /// Toroidal lookup for the seamless top-down cave world. The raycast
    /// dungeon never uses this; its edges are hard walls via `tile_at`.
    pub fn wrapped_tile_at(&self, x: i32, y: i32) -> Tile {
        let width = self.width as i32;
        let height = self.height as i32;
        let wrapped_x = ((x % width) + width) % width;
        let wrapped_y = ((y % height) + height) % height;
        self.tiles[(wrapped_y as usize) * self.width + (wrapped_x as usize)]
    }

    pub fn is_blocking(&self, x: i32, y: i32) -> bool {
        self.tile_at(x, y).is_blocking()
    }

    /// Pick a random open interior tile, or `None` once the attempt limit is
    /// spent. Callers should fall back to `first_open_tile` before treating
    /// the map as unusable.
    pub fn find_empty_spot(&self, rng: &mut ChaCha8Rng) -> Option<(i32, i32)> {
        if self.width < 6 || self.height < 6 {
            return self.first_open_tile();
        }
        for _ in 0..EMPTY_SPOT_ATTEMPTS {
            let x = 2 + (rng.next_u64() as usize % (self.width - 4)) as i32;
            let y = 2 + (rng.next_u64() as usize % (self.height - 4)) as i32;
            if !self.is_blocking(x, y) {
                return Some((x, y));
            }
        }
        None
    }

    /// Linear scan for any open tile. `None` only for an all-wall map.
    pub fn first_open_tile(&self) -> Option<(i32, i32)> {
        for y in 0..self.height {
            for x in 0..self.width {
                if !self.tiles[y * self.width + x].is_blocking() {
                    return Some((x as i32, y as i32));
                }
            }
        }
        None
    }

    pub fn open_tile_count(&self) -> usize {
        self.tiles.iter().filter(|tile| !tile.is_blocking()).count()
    }

    /// Stable hash of the map contents, used by the run-state file and the
    /// determinism tests.
    pub fn fingerprint(&self) -> u64 {
        let mut bytes = Vec::with_capacity(8 + self.tiles.len());
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        for tile in &self.tiles {
            bytes.push(match tile {
                Tile::Wall => 0,
                Tile::Floor => 1,
                Tile::Water => 2,
            });
        }
        xxh3_64(&bytes)
    }
}
