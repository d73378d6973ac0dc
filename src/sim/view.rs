//! Typed per-frame snapshot of everything the sprite pass can draw.
//!
//! Only two capability sets are ever yielded:
//! `Position + Billboard` and `Position + Particle`.  Entities without a
//! position never reach the renderer.

use glam::Vec3;
use hecs::World;

use super::components::{Billboard, Particle, Position};

/// The one visual payload a drawable carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Visual {
    Billboard(Billboard),
    Particle(Particle),
}

/// Copy of one renderable entity, detached from the ECS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drawable {
    pub pos: Vec3,
    pub visual: Visual,
}

impl Drawable {
    pub fn billboard(pos: Vec3, billboard: Billboard) -> Self {
        Self {
            pos,
            visual: Visual::Billboard(billboard),
        }
    }

    pub fn particle(pos: Vec3, particle: Particle) -> Self {
        Self {
            pos,
            visual: Visual::Particle(particle),
        }
    }
}

/// Refill `out` with the drawables currently in `world`.
pub fn drawables(world: &World, out: &mut Vec<Drawable>) {
    out.clear();
    for (_, (pos, bb)) in world.query::<(&Position, &Billboard)>().iter() {
        out.push(Drawable::billboard(pos.0, *bb));
    }
    for (_, (pos, p)) in world.query::<(&Position, &Particle)>().iter() {
        out.push(Drawable::particle(pos.0, *p));
    }
}
