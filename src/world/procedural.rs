//! Procedurally generated textures, so the renderer runs without any asset
//! files on disk.

use crate::renderer::color::rgb;
use crate::world::texture::{Texture, TextureBank, TextureError};

/// Bank names the software renderer resolves its wall materials by.
pub const WALL_BRICK: &str = "WALL_BRICK";
pub const WALL_MOSSY: &str = "WALL_MOSSY";
/// Round archery target on a wooden stand.
pub const TARGET: &str = "TARGET";

const SIZE: usize = 64;
const BRICK_W: usize = 32;
const BRICK_H: usize = 16;

/// 64×64 running-bond brick pattern: `mortar` one-pixel joints around
/// `brick` faces, odd courses shifted by half a brick.
pub fn brick_wall(name: &str, mortar: u32, brick: u32) -> Result<Texture, TextureError> {
    Texture::from_fn(name, SIZE, SIZE, |x, y| {
        let course = y / BRICK_H;
        let shift = if course % 2 == 0 { 0 } else { BRICK_W / 2 };
        let bx = (x + shift) % BRICK_W;
        let by = y % BRICK_H;
        if bx == 0 || by == 0 { mortar } else { brick }
    })
}

/// 64×64 target: alternating red/white rings with a black outline on a brown
/// stand.  Everything else is transparent.
pub fn target() -> Result<Texture, TextureError> {
    const RINGS: [(f32, u32); 4] = [
        (20.0, rgb(255, 0, 0)),
        (15.0, rgb(255, 255, 255)),
        (10.0, rgb(255, 0, 0)),
        (5.0, rgb(255, 255, 255)),
    ];
    const STAND: u32 = rgb(100, 50, 0);
    const OUTLINE: u32 = rgb(0, 0, 0);

    Texture::from_fn(TARGET, SIZE, SIZE, |x, y| {
        let dx = x as f32 + 0.5 - 32.0;
        let dy = y as f32 + 0.5 - 32.0;
        let r = (dx * dx + dy * dy).sqrt();

        // innermost ring that still contains the texel wins
        let mut colour = None;
        for (radius, c) in RINGS {
            if r <= radius {
                colour = Some(if radius - r < 1.0 { OUTLINE } else { c });
            }
        }
        match colour {
            Some(c) => c,
            None if (28..=36).contains(&x) && y >= 40 => STAND,
            None => 0,
        }
    })
}

/// Bank pre-filled with every procedural texture.
pub fn standard_bank() -> Result<TextureBank, TextureError> {
    let mut bank = TextureBank::default_with_checker();
    bank.insert(
        WALL_BRICK,
        brick_wall(WALL_BRICK, rgb(100, 100, 100), rgb(150, 100, 100))?,
    )?;
    bank.insert(
        WALL_MOSSY,
        brick_wall(WALL_MOSSY, rgb(80, 100, 80), rgb(50, 120, 50))?,
    )?;
    bank.insert(TARGET, target()?)?;
    Ok(bank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brick_joints_are_mortar() {
        let tex = brick_wall("B", 1, 2).unwrap();
        assert_eq!((tex.w, tex.h), (64, 64));
        assert_eq!(tex.texel(5, 0), 1); // horizontal joint
        assert_eq!(tex.texel(0, 5), 1); // vertical joint, even course
        assert_eq!(tex.texel(16, 20), 1); // shifted joint, odd course
        assert_eq!(tex.texel(5, 5), 2);
    }

    #[test]
    fn target_is_transparent_outside_rings() {
        let tex = target().unwrap();
        assert_eq!(tex.texel(0, 0) >> 24, 0);
        assert_eq!(tex.texel(63, 0) >> 24, 0);
        assert_eq!(tex.texel(32, 32), rgb(255, 255, 255));
        assert_eq!(tex.texel(32, 60), rgb(100, 50, 0));
    }

    #[test]
    fn standard_bank_has_named_textures() {
        let bank = standard_bank().unwrap();
        assert_eq!(bank.len(), 4);
        for name in [WALL_BRICK, WALL_MOSSY, TARGET] {
            assert!(bank.id(name).is_some(), "{name} missing");
        }
    }
}
