//! Billboard and particle pass.
//!
//! Drawables are sorted far-to-near by planar distance, projected into
//! screen rectangles, then painted column by column.  A column is only
//! touched when the sprite is strictly nearer than the wall recorded in
//! the depth buffer, so walls hide sprites without a per-pixel Z-buffer.

use super::Software;
use crate::renderer::{Rgba, color};
use crate::sim::{Drawable, Visual};
use crate::world::{Camera, Horizon, TextureId, ViewBasis};

/// Sprites at or nearer than this camera-space depth are culled.
pub const NEAR_DEPTH: f32 = 0.1;

/// Eye height at which a sprite with `z = 0` is drawn centred on the horizon.
pub const SPRITE_EYE_HEIGHT: f32 = 0.5;

/// Particle `size` → on-screen scale factor.
pub const PARTICLE_SCALE: f32 = 0.05;

/// What fills a projected sprite rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Look {
    /// Textured billboard; alpha-0 texels are skipped.
    Texture(TextureId),
    /// Solid vertical segment (particles).
    Solid(Rgba),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisSprite {
    pub x0: i32, // inclusive, unclipped
    pub x1: i32, // exclusive, unclipped
    pub top: f32,
    pub bottom: f32,
    pub depth: f32, // camera-space Y
    pub look: Look,
}

impl Software {
    /// Sort `drawables` far-to-near and project the visible ones into
    /// `self.sprites`.
    pub(super) fn collect_sprites(
        &mut self,
        drawables: &[Drawable],
        cam: &Camera,
        basis: &ViewBasis,
        horizon: &Horizon,
    ) {
        self.sprites.clear();
        if drawables.is_empty() {
            return;
        }
        if basis.is_degenerate() {
            tracing::debug!(
                det = basis.determinant(),
                "degenerate camera basis; sprite pass skipped"
            );
            return;
        }

        let eye = cam.pos.truncate();
        let mut keys = std::mem::take(&mut self.sort_keys);
        keys.clear();
        keys.extend(
            drawables
                .iter()
                .enumerate()
                .map(|(i, d)| ((d.pos.truncate() - eye).length_squared(), i)),
        );
        // far-to-near painter's order; stable for equal distances
        keys.sort_by(|a, b| b.0.total_cmp(&a.0));

        for &(_, i) in &keys {
            if let Some(spr) = self.project_sprite(&drawables[i], cam, basis, horizon) {
                self.sprites.push(spr);
            }
        }
        self.sort_keys = keys;
    }

    fn project_sprite(
        &self,
        d: &Drawable,
        cam: &Camera,
        basis: &ViewBasis,
        horizon: &Horizon,
    ) -> Option<VisSprite> {
        let (scale, look) = match d.visual {
            Visual::Billboard(bb) => {
                let Some(id) = bb.texture else {
                    tracing::trace!("billboard without texture skipped");
                    return None;
                };
                if self.bank.texture(id).is_err() {
                    tracing::trace!(id, "billboard texture not in bank; skipped");
                    return None;
                }
                (bb.scale, Look::Texture(id))
            }
            Visual::Particle(p) => (
                p.size * PARTICLE_SCALE,
                Look::Solid(color::scale(p.color, p.fade())),
            ),
        };

        let t = basis.to_cam(d.pos.truncate() - cam.pos.truncate())?;
        // also rejects NaN
        if !(t.y > NEAR_DEPTH) {
            return None;
        }

        let screen_x = self.half_w * (1.0 + t.x / t.y);
        let size = (self.height_f / t.y).abs() * scale;
        if !(size >= 1.0) || !screen_x.is_finite() {
            return None;
        }

        let x0 = (screen_x - size * 0.5).floor() as i32;
        let x1 = x0.saturating_add(size as i32);
        if x1 <= 0 || x0 >= self.width as i32 {
            return None;
        }

        // shift by the height difference to a standing eye
        let v_move = (d.pos.z - (cam.pos.z - SPRITE_EYE_HEIGHT)) * self.height_f / t.y;
        let centre = horizon.row(screen_x) - v_move;

        Some(VisSprite {
            x0,
            x1,
            top: centre - size * 0.5,
            bottom: centre + size * 0.5,
            depth: t.y,
            look,
        })
    }

    /// Paint `self.sprites` in order, clipped against the wall depth.
    pub(super) fn draw_sprites(&mut self) {
        let sprites = std::mem::take(&mut self.sprites);
        for spr in &sprites {
            self.draw_sprite(spr);
        }
        self.sprites = sprites;
    }

    fn draw_sprite(&mut self, spr: &VisSprite) {
        let cx0 = spr.x0.max(0) as usize;
        let cx1 = spr.x1.clamp(0, self.width as i32) as usize;
        let y0 = spr.top.clamp(0.0, self.height_f) as usize;
        let y1 = spr.bottom.clamp(0.0, self.height_f) as usize;
        if cx0 >= cx1 || y0 >= y1 {
            return;
        }
        let span_w = (spr.x1 as i64 - spr.x0 as i64).max(1) as f32;
        let span_h = (spr.bottom - spr.top).max(f32::EPSILON);

        match spr.look {
            Look::Solid(c) => {
                let c = self.fog(c, spr.depth);
                for x in cx0..cx1 {
                    if !(spr.depth < self.depth[x]) {
                        continue;
                    }
                    for y in y0..y1 {
                        self.scratch[y * self.width + x] = c;
                    }
                }
            }
            Look::Texture(id) => {
                let tex = self.bank.texture_or_missing(id);
                for x in cx0..cx1 {
                    if !(spr.depth < self.depth[x]) {
                        continue;
                    }
                    let u = ((x as i64 - spr.x0 as i64) as f32 / span_w * tex.w as f32) as usize;
                    for y in y0..y1 {
                        let v = ((y as f32 - spr.top) / span_h * tex.h as f32) as usize;
                        let texel = tex.texel(u, v);
                        if color::alpha(texel) == 0 {
                            continue;
                        }
                        let c = self.fog(texel, spr.depth);
                        self.scratch[y * self.width + x] = c;
                    }
                }
            }
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
