use slotmap::new_key_type;

new_key_type! {
    pub struct EnemyId;
    pub struct ProjectileId;
    pub struct PickupId;
}

/// Tile classification. `Water` only appears in cave maps and is a render
/// label; collision treats it as open ground.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tile {
    Wall,
    Floor,
    Water,
}

impl Tile {
    pub fn is_blocking(self) -> bool {
        self == Self::Wall
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GamePhase {
    Title,
    Playing,
    Victory,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnemyKind {
    Wolf,
    SmokeDemon,
    TophatOgre,
    RedDemon,
}

impl EnemyKind {
    pub const ALL: [Self; 4] = [Self::Wolf, Self::SmokeDemon, Self::TophatOgre, Self::RedDemon];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PickupKind {
    HealthPack,
    Ammo,
    Armor,
}

impl PickupKind {
    pub const ALL: [Self; 3] = [Self::HealthPack, Self::Ammo, Self::Armor];
}

/// Continuous map-unit position or direction. One unit is one tile.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(self, other: Self) -> Self {
        Self { x: self.x + other.x, y: self.y + other.y }
    }

    pub fn sub(self, other: Self) -> Self {
        Self { x: self.x - other.x, y: self.y - other.y }
    }

    pub fn scaled(self, factor: f64) -> Self {
        Self { x: self.x * factor, y: self.y * factor }
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Rotate counter-clockwise by `angle` radians.
    pub fn rotated(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { x: self.x * cos - self.y * sin, y: self.x * sin + self.y * cos }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `factor`, clamped to the valid byte range.
    pub fn scaled(self, factor: f64) -> Self {
        let scale = |channel: u8| (f64::from(channel) * factor).clamp(0.0, 255.0) as u8;
        Self { r: scale(self.r), g: scale(self.g), b: scale(self.b) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_walls_block() {
        assert!(Tile::Wall.is_blocking());
        assert!(!Tile::Floor.is_blocking());
        assert!(!Tile::Water.is_blocking());
    }

    #[test]
    fn rotation_preserves_length() {
        let v = Vec2::new(-1.0, 0.0);
        let rotated = v.rotated(1.234);
        assert!((rotated.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn quarter_turn_maps_axes() {
        let v = Vec2::new(1.0, 0.0).rotated(std::f64::consts::FRAC_PI_2);
        assert!(v.x.abs() < 1e-12);
        assert!((v.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rgb_scaling_clamps() {
        let color = Rgb::new(200, 100, 0);
        assert_eq!(color.scaled(2.0), Rgb::new(255, 200, 0));
        assert_eq!(color.scaled(0.0), Rgb::new(0, 0, 0));
    }
}
