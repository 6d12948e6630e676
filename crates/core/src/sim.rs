//! Frame-stepped simulation: player movement, enemy AI, projectiles, blood,
//! pickups, and the run phase machine.

use std::f64::consts::TAU;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use slotmap::SlotMap;

use crate::entity::{
    BLOOD_GRAVITY, BLOOD_LIFETIME, BLOOD_PARTICLES_PER_HIT, BloodParticle, ENEMY_AGGRO_RADIUS,
    ENEMY_ATTACK_COOLDOWN, ENEMY_ATTACK_DAMAGE, ENEMY_ATTACK_RANGE, Enemy, HURT_COOLDOWN,
    PICKUP_RADIUS, PROJECTILE_DAMAGE, PROJECTILE_LIFETIME, PROJECTILE_SPEED, Pickup, Player,
    Projectile, SHOOT_COOLDOWN,
};
use crate::mapgen::generate_dungeon;
use crate::movement::{
    ENEMY_RADIUS, MOVE_SPEED, PLAYER_RADIUS, ROT_SPEED, STRAFE_SPEED, apply_friction, slide_move,
    step_if_clear,
};
use crate::sprite::SpriteInstance;
use crate::tilemap::TileMap;
use crate::types::{
    EnemyId, EnemyKind, GamePhase, PickupId, PickupKind, ProjectileId, Rgb, Vec2,
};

pub const MAP_WIDTH: usize = 64;
pub const MAP_HEIGHT: usize = 64;
pub const ENEMY_SPAWN_COUNT: usize = 15;
pub const PICKUP_SPAWN_COUNT: usize = 10;

/// Enemies must be at least this far away to act; avoids a zero-length
/// direction when an enemy ends up on top of the player.
const MIN_ACT_DISTANCE: f64 = 0.1;
const PROJECTILE_HIT_RADIUS: f64 = 0.5;

const PROJECTILE_COLOR: Rgb = Rgb::new(255, 220, 80);
const BLOOD_COLOR: Rgb = Rgb::new(180, 20, 20);

/// Held-input snapshot for one frame. Plain data so the simulation can be
/// driven headless by tests and tools.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameCommands {
    pub forward: bool,
    pub backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub shoot: bool,
    /// Extra rotation this frame in radians (mouse look).
    pub turn_delta: f64,
}

/// The whole mutable game state for one run, stepped once per frame. Owns the
/// single RNG for the run; the map is immutable after generation.
pub struct Simulation {
    pub map: TileMap,
    pub player: Player,
    pub enemies: SlotMap<EnemyId, Enemy>,
    pub projectiles: SlotMap<ProjectileId, Projectile>,
    pub pickups: SlotMap<PickupId, Pickup>,
    pub blood: Vec<BloodParticle>,
    pub phase: GamePhase,
    spawned_enemy_count: usize,
    seed: u64,
    rng: ChaCha8Rng,
}

impl Simulation {
    pub fn new(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let dungeon = generate_dungeon(&mut rng, MAP_WIDTH, MAP_HEIGHT);
        let map = dungeon.map;

        let start_tile = dungeon
            .rooms
            .first()
            .map(|room| room.center())
            .or_else(|| map.find_empty_spot(&mut rng))
            .or_else(|| map.first_open_tile())
            .unwrap_or((MAP_WIDTH as i32 / 2, MAP_HEIGHT as i32 / 2));
        let player = Player::new(tile_center(start_tile));

        let mut enemies = SlotMap::with_key();
        for index in 0..ENEMY_SPAWN_COUNT {
            if let Some(tile) = map.find_empty_spot(&mut rng) {
                let kind = EnemyKind::ALL[index % EnemyKind::ALL.len()];
                enemies.insert(Enemy::new(kind, tile_center(tile)));
            }
        }
        let spawned_enemy_count = enemies.len();

        let mut pickups = SlotMap::with_key();
        for index in 0..PICKUP_SPAWN_COUNT {
            if let Some(tile) = map.find_empty_spot(&mut rng) {
                let kind = PickupKind::ALL[index % PickupKind::ALL.len()];
                pickups.insert(Pickup::new(kind, tile_center(tile)));
            }
        }

        Self {
            map,
            player,
            enemies,
            projectiles: SlotMap::with_key(),
            pickups,
            blood: Vec::new(),
            phase: GamePhase::Title,
            spawned_enemy_count,
            seed,
            rng,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn start(&mut self) {
        if self.phase == GamePhase::Title {
            self.phase = GamePhase::Playing;
        }
    }

    /// Advance the run by one frame. Terminal phases ignore everything until
    /// the caller starts a fresh run.
    pub fn update(&mut self, commands: &FrameCommands, dt: f64) {
        if self.phase != GamePhase::Playing {
            return;
        }

        self.update_player(commands, dt);
        self.update_enemies(dt);
        self.update_projectiles(dt);
        self.update_blood(dt);
        self.collect_pickups(dt);
        self.sweep_dead();

        if self.player.health <= 0 {
            self.phase = GamePhase::GameOver;
        } else if self.spawned_enemy_count > 0 && self.enemies.is_empty() {
            self.phase = GamePhase::Victory;
        }
    }

    fn update_player(&mut self, commands: &FrameCommands, dt: f64) {
        let player = &mut self.player;
        player.shoot_cooldown = (player.shoot_cooldown - dt).max(0.0);
        player.hurt_cooldown = (player.hurt_cooldown - dt).max(0.0);

        let mut moving = false;
        if commands.forward {
            player.momentum = player.momentum.add(player.camera.dir.scaled(MOVE_SPEED * dt));
            moving = true;
        }
        if commands.backward {
            player.momentum = player.momentum.sub(player.camera.dir.scaled(MOVE_SPEED * dt));
            moving = true;
        }
        if commands.strafe_left {
            player.momentum = player.momentum.add(player.camera.plane.scaled(STRAFE_SPEED * dt));
            moving = true;
        }
        if commands.strafe_right {
            player.momentum = player.momentum.sub(player.camera.plane.scaled(STRAFE_SPEED * dt));
            moving = true;
        }
        if !moving {
            player.momentum = apply_friction(player.momentum);
        }

        let target = player.camera.pos.add(player.momentum.scaled(dt));
        player.camera.pos = slide_move(&self.map, player.camera.pos, target, PLAYER_RADIUS);

        let mut angle = commands.turn_delta;
        if commands.turn_left {
            angle += ROT_SPEED * dt;
        }
        if commands.turn_right {
            angle -= ROT_SPEED * dt;
        }
        if angle != 0.0 {
            player.camera.rotate(angle);
        }

        if commands.shoot && player.shoot_cooldown <= 0.0 && player.ammo > 0 {
            let projectile = Projectile::new(player.camera.pos, player.camera.dir);
            self.projectiles.insert(projectile);
            player.ammo -= 1;
            player.shoot_cooldown = SHOOT_COOLDOWN;
        }
    }

    fn update_enemies(&mut self, dt: f64) {
        let player_pos = self.player.pos();
        for enemy in self.enemies.values_mut() {
            if !enemy.alive {
                continue;
            }
            enemy.attack_cooldown = (enemy.attack_cooldown - dt).max(0.0);

            let delta = player_pos.sub(enemy.pos);
            let dist = delta.length();
            if dist <= MIN_ACT_DISTANCE || dist >= ENEMY_AGGRO_RADIUS {
                continue;
            }

            enemy.dir = delta.scaled(1.0 / dist);
            let step = enemy.dir.scaled(enemy.kind.params().speed * dt);
            if let Some(stepped) = step_if_clear(&self.map, enemy.pos, step, ENEMY_RADIUS) {
                enemy.pos = stepped;
            }

            if dist < ENEMY_ATTACK_RANGE
                && enemy.attack_cooldown <= 0.0
                && self.player.hurt_cooldown <= 0.0
            {
                self.player.health -= ENEMY_ATTACK_DAMAGE;
                self.player.hurt_cooldown = HURT_COOLDOWN;
                enemy.attack_cooldown = ENEMY_ATTACK_COOLDOWN;
            }
        }
    }

    fn update_projectiles(&mut self, dt: f64) {
        let mut spawned_blood = Vec::new();

        for projectile in self.projectiles.values_mut() {
            if !projectile.alive {
                continue;
            }
            projectile.age += dt;
            projectile.pos = projectile.pos.add(projectile.dir.scaled(PROJECTILE_SPEED * dt));

            let tile_x = projectile.pos.x as i32;
            let tile_y = projectile.pos.y as i32;
            if projectile.age > PROJECTILE_LIFETIME || self.map.is_blocking(tile_x, tile_y) {
                projectile.alive = false;
                continue;
            }

            for enemy in self.enemies.values_mut() {
                if !enemy.alive {
                    continue;
                }
                if projectile.pos.sub(enemy.pos).length() >= PROJECTILE_HIT_RADIUS {
                    continue;
                }

                enemy.hp -= PROJECTILE_DAMAGE;
                projectile.alive = false;
                for index in 0..BLOOD_PARTICLES_PER_HIT {
                    let angle = index as f64 / BLOOD_PARTICLES_PER_HIT as f64 * TAU;
                    let velocity = Vec2::new(angle.cos() * 2.0, angle.sin() * 2.0);
                    spawned_blood.push(BloodParticle::new(enemy.pos, velocity));
                }

                if enemy.hp <= 0 {
                    enemy.alive = false;
                    self.player.score += enemy.kind.params().score;
                    self.player.kills += 1;
                }
                break;
            }
        }

        self.blood.extend(spawned_blood);
    }

    fn update_blood(&mut self, dt: f64) {
        for particle in &mut self.blood {
            particle.vel_z -= BLOOD_GRAVITY * dt;
            particle.pos = particle.pos.add(particle.vel.scaled(dt));
            particle.z = (particle.z + particle.vel_z * dt).max(0.0);
            particle.age += dt;
        }
    }

    fn collect_pickups(&mut self, dt: f64) {
        let player_pos = self.player.pos();
        for pickup in self.pickups.values_mut() {
            pickup.age += dt;
            if !pickup.alive || player_pos.sub(pickup.pos).length() >= PICKUP_RADIUS {
                continue;
            }
            pickup.alive = false;
            let value = pickup.kind.params().value;
            match pickup.kind {
                PickupKind::HealthPack => {
                    self.player.health = (self.player.health + value).min(self.player.max_health);
                }
                PickupKind::Ammo => self.player.ammo += value,
                PickupKind::Armor => {
                    // No separate armor pool; credits half its value as health.
                    self.player.health =
                        (self.player.health + value / 2).min(self.player.max_health);
                }
            }
        }
    }

    /// Second phase of the liveness sweep: everything flagged dead during the
    /// update pass is compacted here, so no pass above ever removes from a
    /// container it is iterating.
    fn sweep_dead(&mut self) {
        self.enemies.retain(|_, enemy| enemy.alive);
        self.projectiles.retain(|_, projectile| projectile.alive);
        self.pickups.retain(|_, pickup| pickup.alive);
        self.blood.retain(|particle| particle.age <= BLOOD_LIFETIME);
    }

    /// World-space billboards for this frame, one per live entity. The
    /// projector sorts them; order here is irrelevant.
    pub fn sprite_instances(&self) -> Vec<SpriteInstance> {
        let mut instances = Vec::with_capacity(
            self.enemies.len() + self.pickups.len() + self.projectiles.len() + self.blood.len(),
        );

        for enemy in self.enemies.values() {
            instances.push(SpriteInstance {
                pos: enemy.pos,
                scale: 1.0,
                v_offset_px: 0.0,
                // Fading tint doubles as a health indicator.
                color: enemy.kind.params().color.scaled(enemy.health_fraction()),
            });
        }
        for pickup in self.pickups.values() {
            instances.push(SpriteInstance {
                pos: pickup.pos,
                scale: 0.5,
                v_offset_px: (pickup.age * 3.0).sin() * 10.0,
                color: pickup.kind.params().color,
            });
        }
        for projectile in self.projectiles.values() {
            instances.push(SpriteInstance {
                pos: projectile.pos,
                scale: 0.2,
                v_offset_px: 0.0,
                color: PROJECTILE_COLOR,
            });
        }
        for particle in &self.blood {
            instances.push(SpriteInstance {
                pos: particle.pos,
                scale: 0.08,
                v_offset_px: -particle.z * 64.0,
                color: BLOOD_COLOR,
            });
        }

        instances
    }
}

fn tile_center(tile: (i32, i32)) -> Vec2 {
    Vec2::new(f64::from(tile.0) + 0.5, f64::from(tile.1) + 0.5)
}
