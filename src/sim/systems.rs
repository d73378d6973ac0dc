use glam::{Vec3, vec3};
use hecs::{Entity, World};

use super::components::{Billboard, Particle, Position};
use crate::renderer::Rgba;
use crate::world::TextureId;

pub const GRAVITY: f32 = 9.8; // cells / s²

/// Golden angle in radians; spreads burst particles evenly around a circle.
const GOLDEN_ANGLE: f32 = 2.399_963;

/* ── Particle system ──────────────────────────────────────────────── */

/// Integrate particle motion over `dt` seconds and despawn expired ones.
pub fn particles(world: &mut World, dt: f32) {
    let mut dead: Vec<Entity> = Vec::new();

    for (e, (pos, p)) in world.query_mut::<(&mut Position, &mut Particle)>() {
        pos.0 += p.vel * dt;
        p.vel.z -= GRAVITY * dt;
        p.life -= dt;
        if p.life <= 0.0 {
            dead.push(e);
        }
    }

    for e in dead {
        // entity was alive a moment ago; nothing to do if it already vanished
        let _ = world.despawn(e);
    }
}

/// Spawn `count` particles flying outwards from `at`.
pub fn spawn_burst(world: &mut World, at: Vec3, color: Rgba, count: usize) {
    for i in 0..count {
        let a = i as f32 * GOLDEN_ANGLE;
        let speed = 1.0 + (i % 3) as f32 * 0.5;
        let vel = vec3(a.cos() * speed, a.sin() * speed, 1.0 + (i % 4) as f32 * 0.5);
        world.spawn((
            Position(at),
            Particle {
                vel,
                life: 0.5,
                max_life: 0.5,
                color,
                size: 1.5,
            },
        ));
    }
}

/// Spawn a target billboard standing on the floor at `(x, y)`.
pub fn spawn_target(world: &mut World, x: f32, y: f32, texture: TextureId, scale: f32) -> Entity {
    world.spawn((Position(vec3(x, y, 0.0)), Billboard::new(texture, scale)))
}
