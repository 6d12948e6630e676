pub mod camera;
pub mod entity;
pub mod mapgen;
pub mod movement;
pub mod raycast;
pub mod sim;
pub mod sprite;
pub mod tilemap;
pub mod types;

pub use camera::Camera;
pub use entity::{Enemy, Pickup, Player, Projectile};
pub use mapgen::{GeneratedDungeon, RoomRect, generate_cave, generate_dungeon};
pub use raycast::{RenderContext, WallColumn, cast_walls};
pub use sim::{FrameCommands, Simulation};
pub use sprite::{SpriteInstance, SpriteProjection};
pub use tilemap::TileMap;
pub use types::*;
