//! Entity state and the static per-kind parameter tables.

use crate::camera::Camera;
use crate::types::{EnemyKind, PickupKind, Rgb, Vec2};

pub const PLAYER_MAX_HEALTH: i32 = 100;
pub const PLAYER_STARTING_AMMO: i32 = 50;
/// Seconds between shots.
pub const SHOOT_COOLDOWN: f64 = 0.3;
/// Post-hit invincibility window; shorter than any single enemy's attack
/// cooldown so packs still out-damage a lone attacker.
pub const HURT_COOLDOWN: f64 = 0.5;

pub const PROJECTILE_SPEED: f64 = 12.0;
pub const PROJECTILE_DAMAGE: i32 = 25;
pub const PROJECTILE_LIFETIME: f64 = 2.0;

pub const ENEMY_AGGRO_RADIUS: f64 = 15.0;
pub const ENEMY_ATTACK_RANGE: f64 = 1.5;
pub const ENEMY_ATTACK_COOLDOWN: f64 = 1.5;
pub const ENEMY_ATTACK_DAMAGE: i32 = 10;

pub const PICKUP_RADIUS: f64 = 0.8;

pub const BLOOD_LIFETIME: f64 = 0.8;
pub const BLOOD_GRAVITY: f64 = 9.8;
pub const BLOOD_PARTICLES_PER_HIT: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyParams {
    pub max_hp: i32,
    pub speed: f64,
    pub score: u32,
    pub color: Rgb,
}

/// One row per `EnemyKind`, in declaration order. Built once; every spawn and
/// render site indexes it instead of re-switching on the kind.
const ENEMY_PARAMS: [EnemyParams; 4] = [
    EnemyParams { max_hp: 50, speed: 2.0, score: 100, color: Rgb::new(200, 50, 50) },
    EnemyParams { max_hp: 75, speed: 1.5, score: 150, color: Rgb::new(150, 0, 150) },
    EnemyParams { max_hp: 100, speed: 1.2, score: 200, color: Rgb::new(50, 150, 50) },
    EnemyParams { max_hp: 150, speed: 1.0, score: 300, color: Rgb::new(220, 0, 0) },
];

impl EnemyKind {
    pub fn params(self) -> &'static EnemyParams {
        &ENEMY_PARAMS[self as usize]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PickupParams {
    pub value: i32,
    pub color: Rgb,
}

const PICKUP_PARAMS: [PickupParams; 3] = [
    PickupParams { value: 25, color: Rgb::new(0, 255, 0) },
    PickupParams { value: 20, color: Rgb::new(255, 255, 0) },
    PickupParams { value: 50, color: Rgb::new(0, 0, 255) },
];

impl PickupKind {
    pub fn params(self) -> &'static PickupParams {
        &PICKUP_PARAMS[self as usize]
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub camera: Camera,
    pub momentum: Vec2,
    pub health: i32,
    pub max_health: i32,
    pub ammo: i32,
    pub score: u32,
    pub kills: u32,
    pub shoot_cooldown: f64,
    pub hurt_cooldown: f64,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            camera: Camera::new(pos),
            momentum: Vec2::ZERO,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            ammo: PLAYER_STARTING_AMMO,
            score: 0,
            kills: 0,
            shoot_cooldown: 0.0,
            hurt_cooldown: 0.0,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.camera.pos
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub hp: i32,
    pub dir: Vec2,
    /// Seconds until this enemy may strike again.
    pub attack_cooldown: f64,
    pub alive: bool,
}

impl Enemy {
    pub fn new(kind: EnemyKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            hp: kind.params().max_hp,
            dir: Vec2::ZERO,
            attack_cooldown: 0.0,
            alive: true,
        }
    }

    pub fn health_fraction(&self) -> f64 {
        f64::from(self.hp.max(0)) / f64::from(self.kind.params().max_hp)
    }
}

#[derive(Clone, Debug)]
pub struct Projectile {
    pub pos: Vec2,
    pub dir: Vec2,
    pub age: f64,
    pub alive: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, dir: Vec2) -> Self {
        Self { pos, dir, age: 0.0, alive: true }
    }
}

#[derive(Clone, Debug)]
pub struct Pickup {
    pub kind: PickupKind,
    pub pos: Vec2,
    /// Drives the idle bobbing animation.
    pub age: f64,
    pub alive: bool,
}

impl Pickup {
    pub fn new(kind: PickupKind, pos: Vec2) -> Self {
        Self { kind, pos, age: 0.0, alive: true }
    }
}

#[derive(Clone, Debug)]
pub struct BloodParticle {
    pub pos: Vec2,
    pub z: f64,
    pub vel: Vec2,
    pub vel_z: f64,
    pub age: f64,
}

impl BloodParticle {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, z: 0.5, vel, vel_z: 0.5, age: 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enemy_table_rows_match_kind_order() {
        assert_eq!(EnemyKind::Wolf.params().max_hp, 50);
        assert_eq!(EnemyKind::SmokeDemon.params().score, 150);
        assert!((EnemyKind::TophatOgre.params().speed - 1.2).abs() < 1e-12);
        assert_eq!(EnemyKind::RedDemon.params().max_hp, 150);
    }

    #[test]
    fn tougher_kinds_are_slower_and_worth_more() {
        for pair in EnemyKind::ALL.windows(2) {
            let (weaker, tougher) = (pair[0].params(), pair[1].params());
            assert!(tougher.max_hp > weaker.max_hp);
            assert!(tougher.speed < weaker.speed);
            assert!(tougher.score > weaker.score);
        }
    }

    #[test]
    fn health_fraction_floors_at_zero() {
        let mut enemy = Enemy::new(EnemyKind::Wolf, Vec2::ZERO);
        enemy.hp = -10;
        assert_eq!(enemy.health_fraction(), 0.0);
    }
}
