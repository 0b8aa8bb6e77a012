//! Player weapons: railgun slugs, the hitscan beam, and tethering harpoons.
//!
//! The weapon system owns player projectiles and per-slot cooldowns. Enemies
//! live in the wave orchestrator's world; harpoons only hold `Entity`
//! handles and look them up every frame.

use glam::DVec3;
use hecs::{Entity, World};

use starhand_core::constants::*;
use starhand_core::enums::{ProjectileSource, WeaponKind};
use starhand_core::state::{BeamView, ProjectileView, TetherView, WeaponCooldownView, WeaponView};

use starhand_enemy_ai::EnemyAgent;

use crate::collision::{ray_sphere, segment_sphere};
use crate::ship::ShipState;

/// An in-flight player projectile.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub weapon: WeaponKind,
    pub position: DVec3,
    pub velocity: DVec3,
    pub damage: f64,
    pub age_secs: f64,
    pub ttl_secs: f64,
    /// Harpoon target once latched.
    pub attached: Option<Entity>,
}

impl Projectile {
    fn expired(&self) -> bool {
        self.age_secs >= self.ttl_secs
    }
}

/// Damage dealt to one enemy during `update`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponHit {
    pub enemy: Entity,
    pub weapon: WeaponKind,
    pub damage: f64,
    pub point: DVec3,
    pub killed: bool,
    /// A harpoon latched on with this hit.
    pub attached: bool,
}

/// Current beam segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamState {
    pub start: DVec3,
    pub end: DVec3,
    pub target: Option<Entity>,
}

#[derive(Debug, Clone, Default)]
pub struct WeaponSystem {
    active: WeaponKind,
    /// Seconds until each slot may fire again, indexed like `WeaponKind::ALL`.
    cooldowns: [f64; 3],
    projectiles: Vec<Projectile>,
    beam_active: bool,
    beam: Option<BeamState>,
}

fn slot(weapon: WeaponKind) -> usize {
    match weapon {
        WeaponKind::Railgun => 0,
        WeaponKind::Beam => 1,
        WeaponKind::Harpoon => 2,
    }
}

fn full_cooldown(weapon: WeaponKind) -> f64 {
    match weapon {
        WeaponKind::Railgun => RAILGUN_COOLDOWN_SECS,
        WeaponKind::Beam => 0.0,
        WeaponKind::Harpoon => HARPOON_COOLDOWN_SECS,
    }
}

impl WeaponSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> WeaponKind {
        self.active
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn beam_active(&self) -> bool {
        self.beam_active
    }

    pub fn beam(&self) -> Option<&BeamState> {
        self.beam.as_ref()
    }

    /// Switch slots. The outgoing weapon's projectiles and beam are torn
    /// down. Returns false when `weapon` is already active.
    pub fn select_weapon(&mut self, weapon: WeaponKind) -> bool {
        if weapon == self.active {
            return false;
        }
        let outgoing = self.active;
        self.projectiles.retain(|p| p.weapon != outgoing);
        if outgoing == WeaponKind::Beam {
            self.beam_active = false;
            self.beam = None;
        }
        self.active = weapon;
        log::debug!("weapon {:?} -> {:?}", outgoing, weapon);
        true
    }

    /// Remove every projectile and switch the beam off. Cooldowns are kept.
    pub fn cleanup(&mut self) {
        self.projectiles.clear();
        self.beam_active = false;
        self.beam = None;
    }

    /// Fire the active weapon. Railgun and harpoon spawn a projectile when
    /// off cooldown and affordable; the beam toggles. Returns true when a
    /// shot left the muzzle or the beam switched on.
    pub fn fire_primary(&mut self, ship: &mut ShipState) -> bool {
        match self.active {
            WeaponKind::Beam => {
                let on = !self.beam_active;
                self.set_beam_active(on, ship)
            }
            weapon => self.fire_projectile(weapon, ship),
        }
    }

    /// Force the beam on or off. Turning on needs energy. Returns the new state.
    pub fn set_beam_active(&mut self, on: bool, ship: &ShipState) -> bool {
        self.beam_active = on && self.active == WeaponKind::Beam && ship.energy > 0.0;
        if !self.beam_active {
            self.beam = None;
        }
        self.beam_active
    }

    fn fire_projectile(&mut self, weapon: WeaponKind, ship: &mut ShipState) -> bool {
        let (cost, speed, damage, ttl) = match weapon {
            WeaponKind::Railgun => (
                RAILGUN_ENERGY_COST,
                RAILGUN_SPEED,
                RAILGUN_DAMAGE,
                RAILGUN_TTL,
            ),
            WeaponKind::Harpoon => (
                HARPOON_ENERGY_COST,
                HARPOON_SPEED,
                HARPOON_DAMAGE,
                HARPOON_TTL,
            ),
            WeaponKind::Beam => return false,
        };
        if self.cooldowns[slot(weapon)] > 0.0 || !ship.spend_energy(cost) {
            return false;
        }
        self.cooldowns[slot(weapon)] = full_cooldown(weapon);
        self.projectiles.push(Projectile {
            weapon,
            position: ship.nose(),
            velocity: ship.forward() * speed,
            damage,
            age_secs: 0.0,
            ttl_secs: ttl,
            attached: None,
        });
        true
    }

    /// Advance cooldowns, move and expire projectiles, resolve hits
    /// against `enemies`, and run the beam.
    pub fn update(&mut self, ship: &mut ShipState, enemies: &mut World, dt: f64) -> Vec<WeaponHit> {
        for cooldown in &mut self.cooldowns {
            *cooldown = (*cooldown - dt).max(0.0);
        }

        let mut hits = Vec::new();
        let ship_position = ship.position();

        self.projectiles.retain_mut(|projectile| {
            projectile.age_secs += dt;
            if projectile.expired() {
                return false;
            }
            match projectile.attached {
                Some(enemy) => reel_in(projectile, enemy, enemies, ship_position, dt),
                None => fly(projectile, enemies, dt, &mut hits),
            }
        });

        self.run_beam(ship, enemies, dt, &mut hits);
        hits
    }

    fn run_beam(
        &mut self,
        ship: &mut ShipState,
        enemies: &mut World,
        dt: f64,
        hits: &mut Vec<WeaponHit>,
    ) {
        if !self.beam_active {
            self.beam = None;
            return;
        }
        if ship.energy <= 0.0 {
            self.beam_active = false;
            self.beam = None;
            return;
        }
        ship.drain_energy(BEAM_ENERGY_DRAIN * dt);

        let start = ship.nose();
        let direction = ship.forward();
        let nearest = enemies
            .query::<&EnemyAgent>()
            .iter()
            .filter(|(_, agent)| !agent.is_dead())
            .filter_map(|(entity, agent)| {
                ray_sphere(
                    start,
                    direction,
                    BEAM_MAX_RANGE,
                    agent.position(),
                    agent.profile.hit_radius,
                )
                .map(|t| (entity, t))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1));

        let (end, target) = match nearest {
            Some((entity, t)) => {
                let point = start + direction * t;
                let damage = BEAM_DPS * dt;
                if let Some(hit) = damage_enemy(enemies, entity, WeaponKind::Beam, damage, point) {
                    hits.push(hit);
                }
                (point, Some(entity))
            }
            None => (start + direction * BEAM_MAX_RANGE, None),
        };
        self.beam = Some(BeamState { start, end, target });

        if ship.energy <= 0.0 {
            self.beam_active = false;
            self.beam = None;
        }
    }

    /// HUD cooldown per slot: 0 = ready, 1 = just fired. The beam reports 0.
    pub fn cooldown_fractions(&self) -> [(WeaponKind, f64); 3] {
        WeaponKind::ALL.map(|weapon| {
            let full = full_cooldown(weapon);
            let fraction = if full > 0.0 {
                (self.cooldowns[slot(weapon)] / full).clamp(0.0, 1.0)
            } else {
                0.0
            };
            (weapon, fraction)
        })
    }

    pub fn view(&self) -> WeaponView {
        WeaponView {
            active: self.active,
            cooldowns: self
                .cooldown_fractions()
                .into_iter()
                .map(|(weapon, fraction)| WeaponCooldownView { weapon, fraction })
                .collect(),
            beam: self.beam.map(|beam| BeamView {
                start: beam.start,
                end: beam.end,
                target: beam.target.map(entity_id),
            }),
            tethers: self
                .projectiles
                .iter()
                .filter_map(|p| {
                    p.attached.map(|enemy| TetherView {
                        harpoon: p.position,
                        enemy_id: entity_id(enemy),
                    })
                })
                .collect(),
        }
    }

    pub fn projectile_views(&self) -> impl Iterator<Item = ProjectileView> + '_ {
        self.projectiles.iter().map(|p| ProjectileView {
            source: ProjectileSource::Player(p.weapon),
            position: p.position,
            velocity: p.velocity,
        })
    }
}

/// Stable numeric id of an enemy entity for events and views.
pub fn entity_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}

/// Attached harpoon: follow the enemy and pull it toward the ship. A
/// vanished or dead target detaches and drops the harpoon.
fn reel_in(
    projectile: &mut Projectile,
    enemy: Entity,
    enemies: &mut World,
    ship_position: DVec3,
    dt: f64,
) -> bool {
    let Ok(mut agent) = enemies.get::<&mut EnemyAgent>(enemy) else {
        return false;
    };
    if agent.is_dead() {
        return false;
    }
    let to_ship = ship_position - agent.transform.position;
    let step = (HARPOON_PULL_SPEED * dt).min(to_ship.length());
    agent.transform.position += to_ship.normalize_or_zero() * step;
    projectile.position = agent.transform.position;
    true
}

/// Free-flying projectile: sweep the frame's travel against every live
/// enemy and take the earliest hit.
fn fly(
    projectile: &mut Projectile,
    enemies: &mut World,
    dt: f64,
    hits: &mut Vec<WeaponHit>,
) -> bool {
    let start = projectile.position;
    let end = start + projectile.velocity * dt;
    projectile.position = end;

    let first = enemies
        .query::<&EnemyAgent>()
        .iter()
        .filter(|(_, agent)| !agent.is_dead())
        .filter_map(|(entity, agent)| {
            segment_sphere(start, end, agent.position(), agent.profile.hit_radius)
                .map(|t| (entity, t, agent.position()))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1));

    let Some((entity, t, enemy_position)) = first else {
        return true;
    };
    let point = start + (end - start) * t;
    let Some(mut hit) =
        damage_enemy(enemies, entity, projectile.weapon, projectile.damage, point)
    else {
        return true;
    };

    match projectile.weapon {
        WeaponKind::Harpoon if !hit.killed => {
            projectile.attached = Some(entity);
            projectile.position = enemy_position;
            hit.attached = true;
            hits.push(hit);
            true
        }
        _ => {
            hits.push(hit);
            false
        }
    }
}

fn damage_enemy(
    enemies: &mut World,
    entity: Entity,
    weapon: WeaponKind,
    damage: f64,
    point: DVec3,
) -> Option<WeaponHit> {
    let mut agent = enemies.get::<&mut EnemyAgent>(entity).ok()?;
    let killed = agent.take_damage(damage);
    Some(WeaponHit {
        enemy: entity,
        weapon,
        damage,
        point,
        killed,
        attached: false,
    })
}
