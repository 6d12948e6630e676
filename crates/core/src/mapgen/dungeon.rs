//! Room placement and L-shaped corridor carving.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

use crate::tilemap::TileMap;
use crate::types::Tile;

const MIN_ROOM_COUNT: u64 = 20;
const MAX_ROOM_COUNT: u64 = 30;
const MIN_ROOM_SIDE: u64 = 5;
const MAX_ROOM_SIDE: u64 = 12;
/// Rooms keep this many tiles of wall between each other.
const ROOM_MARGIN: usize = 1;
/// Placement attempts per targeted room; guarantees termination even when the
/// grid is too crowded to reach the target count.
const ATTEMPTS_PER_ROOM: usize = 3;

/// Integer room rectangle, used during generation and for spawn placement.
/// The map itself does not retain rooms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoomRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl RoomRect {
    fn right(self) -> usize {
        self.x + self.width - 1
    }

    fn bottom(self) -> usize {
        self.y + self.height - 1
    }

    pub fn center(self) -> (i32, i32) {
        ((self.x + self.width / 2) as i32, (self.y + self.height / 2) as i32)
    }

    pub fn expanded(self, margin: usize) -> Self {
        let expanded_x = self.x.saturating_sub(margin);
        let expanded_y = self.y.saturating_sub(margin);
        let expanded_right = self.right().saturating_add(margin);
        let expanded_bottom = self.bottom().saturating_add(margin);
        Self {
            x: expanded_x,
            y: expanded_y,
            width: expanded_right - expanded_x + 1,
            height: expanded_bottom - expanded_y + 1,
        }
    }

    pub fn intersects(self, other: &Self) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedDungeon {
    pub map: TileMap,
    pub rooms: Vec<RoomRect>,
}

fn rand_range(rng: &mut ChaCha8Rng, min_value: u64, max_value: u64) -> u64 {
    debug_assert!(min_value <= max_value);
    min_value + rng.next_u64() % (max_value - min_value + 1)
}

/// Fill the grid with wall, place non-overlapping rooms, then connect each
/// room to the previously placed one with a width-2 L corridor.
///
/// Tiny grids may yield fewer rooms than targeted, possibly zero; the result
/// is still a valid map and spawn placement recovers via the open-tile
/// search.
pub fn generate_dungeon(rng: &mut ChaCha8Rng, width: usize, height: usize) -> GeneratedDungeon {
    let mut tiles = vec![Tile::Wall; width * height];

    let target_room_count = rand_range(rng, MIN_ROOM_COUNT, MAX_ROOM_COUNT) as usize;
    let mut rooms: Vec<RoomRect> = Vec::new();

    for _ in 0..target_room_count * ATTEMPTS_PER_ROOM {
        if rooms.len() >= target_room_count {
            break;
        }
        let room_width = rand_range(rng, MIN_ROOM_SIDE, MAX_ROOM_SIDE) as usize;
        let room_height = rand_range(rng, MIN_ROOM_SIDE, MAX_ROOM_SIDE) as usize;
        // Keep a two-tile border so corridors can widen without clipping the edge.
        if room_width + 4 >= width || room_height + 4 >= height {
            continue;
        }
        let x = rand_range(rng, 2, (width - room_width - 2) as u64) as usize;
        let y = rand_range(rng, 2, (height - room_height - 2) as u64) as usize;

        let candidate = RoomRect { x, y, width: room_width, height: room_height };
        let candidate_with_margin = candidate.expanded(ROOM_MARGIN);
        if rooms.iter().any(|room| room.expanded(ROOM_MARGIN).intersects(&candidate_with_margin)) {
            continue;
        }

        carve_room(&mut tiles, width, &candidate);
        rooms.push(candidate);
    }

    for index in 1..rooms.len() {
        let (from_x, from_y) = rooms[index - 1].center();
        let (to_x, to_y) = rooms[index].center();
        carve_corridor(&mut tiles, width, height, (from_x, from_y), (to_x, to_y));
    }

    GeneratedDungeon { map: TileMap::new(width, height, tiles), rooms }
}

fn carve_room(tiles: &mut [Tile], width: usize, room: &RoomRect) {
    for y in room.y..=room.bottom() {
        for x in room.x..=room.right() {
            tiles[y * width + x] = Tile::Floor;
        }
    }
}

/// Horizontal leg at the first room's center row, then vertical leg at the
/// second room's center column. Each leg also carves the adjacent parallel
/// tile for a corridor two tiles wide.
fn carve_corridor(
    tiles: &mut [Tile],
    width: usize,
    height: usize,
    from: (i32, i32),
    to: (i32, i32),
) {
    let (from_x, from_y) = from;
    let (to_x, to_y) = to;

    for x in from_x.min(to_x)..=from_x.max(to_x) {
        carve_at(tiles, width, height, x, from_y);
        carve_at(tiles, width, height, x, from_y + 1);
    }
    for y in from_y.min(to_y)..=from_y.max(to_y) {
        carve_at(tiles, width, height, to_x, y);
        carve_at(tiles, width, height, to_x + 1, y);
    }
}

fn carve_at(tiles: &mut [Tile], width: usize, height: usize, x: i32, y: i32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= width || y >= height {
        return;
    }
    tiles[y * width + x] = Tile::Floor;
}
