use glam::Vec3;

use crate::renderer::Rgba;
use crate::world::TextureId;

/// World-space position: x,y in grid cells, z = height above the floor.
#[derive(Debug, Clone, Copy)]
pub struct Position(pub Vec3);

/// Flat image always drawn screen-aligned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Billboard {
    /// `None` while the texture is not bound; such billboards are not drawn.
    pub texture: Option<TextureId>,
    pub scale: f32,
    pub width: f32,  // world units
    pub height: f32, // world units
    pub face_camera: bool,
}

impl Billboard {
    pub fn new(texture: TextureId, scale: f32) -> Self {
        Self {
            texture: Some(texture),
            scale,
            width: 0.5,
            height: 0.5,
            face_camera: true,
        }
    }
}

/// Short-lived coloured speck.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub vel: Vec3,
    pub life: f32, // seconds left
    pub max_life: f32,
    pub color: Rgba,
    pub size: f32,
}

impl Particle {
    /// Remaining brightness in `[0, 1]`: full when spawned, 0 at expiry.
    #[inline]
    pub fn fade(&self) -> f32 {
        if self.max_life > 0.0 {
            (self.life / self.max_life).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ember(life: f32, max_life: f32) -> Particle {
        Particle {
            vel: Vec3::ZERO,
            life,
            max_life,
            color: 0xFF_FFFFFF,
            size: 1.0,
        }
    }

    #[test]
    fn fade_follows_remaining_life() {
        assert_eq!(ember(1.0, 1.0).fade(), 1.0);
        assert!((ember(0.25, 1.0).fade() - 0.25).abs() < 1e-6);
        assert_eq!(ember(-0.1, 1.0).fade(), 0.0);
        assert_eq!(ember(0.3, 0.0).fade(), 1.0);
    }
}
