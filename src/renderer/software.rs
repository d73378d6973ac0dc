//! ---------------------------------------------------------------------------
//! Software (CPU) ray-casting renderer
//!
//! * Fills an internal `Vec<u32>` frame-buffer in **0xAARRGGBB** format.
//! * One frame = sky → floor rows → wall columns → sprites → post effects.
//! * Walls leave one depth value per column behind; sprites are clipped
//!   against it column by column and drawn far-to-near, so no per-pixel
//!   Z-buffer is needed.
//! ---------------------------------------------------------------------------

mod planes;
mod post;
mod renderer;
mod sprites;
mod walls;

pub use planes::row_distance;
pub use post::ambient_pulse;
pub use renderer::Software;
pub use sprites::{Look, NEAR_DEPTH, PARTICLE_SCALE, SPRITE_EYE_HEIGHT, VisSprite};
pub use walls::{MIN_PERP_DIST, NO_HIT_DELTA, Side, WallHit, cast_ray};
