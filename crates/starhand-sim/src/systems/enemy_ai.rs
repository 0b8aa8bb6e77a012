//! Enemy AI system: advances every live agent and collects its shots.
//!
//! Calls into `starhand-enemy-ai` for state selection and steering.

use glam::DVec3;
use hecs::World;

use starhand_enemy_ai::{AttackDescriptor, EnemyAgent};

/// Update each agent toward `target` and queue any attack it makes.
pub fn run(world: &mut World, target: Option<DVec3>, dt: f64, attacks: &mut Vec<AttackDescriptor>) {
    for (_entity, agent) in world.query_mut::<&mut EnemyAgent>() {
        // Killed this frame; cleanup removes it.
        if agent.is_dead() {
            continue;
        }
        agent.update(target, dt);
        if let Some(attack) = agent.attack(target) {
            attacks.push(attack);
        }
    }
}
