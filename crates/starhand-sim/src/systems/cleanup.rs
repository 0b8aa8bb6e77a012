//! Cleanup system: removes enemies whose health reached zero.

use hecs::{Entity, World};

use starhand_core::enums::EnemyKind;

use starhand_enemy_ai::EnemyAgent;

/// A removed enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kill {
    pub entity: Entity,
    pub kind: EnemyKind,
    pub score_value: u32,
}

/// Despawn dead enemies, recording each in `kills`.
/// Uses a pre-allocated buffer to avoid per-frame allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>, kills: &mut Vec<Kill>) {
    despawn_buffer.clear();

    for (entity, agent) in world.query_mut::<&EnemyAgent>() {
        if agent.is_dead() {
            despawn_buffer.push(entity);
            kills.push(Kill {
                entity,
                kind: agent.kind,
                score_value: agent.profile.score_value,
            });
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
