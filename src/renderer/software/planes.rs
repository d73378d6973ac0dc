//! Sky and floor: everything the wall pass does not cover.
//!
//! The sky is a flat vertical gradient.  Floor rows are cast row by row:
//! each row below the horizon sits at one fixed distance, so the world
//! position under the left screen edge plus a constant per-pixel step
//! walks the whole row.

use glam::Vec2;

use super::Software;
use crate::renderer::color::{mix, rgb, scale};
use crate::renderer::{FloorMode, Rgba};
use crate::world::{Camera, Grid, Tile, ViewBasis};

const SKY_TOP: Rgba = rgb(70, 130, 200);
const SKY_HORIZON: Rgba = rgb(135, 206, 235);
const HORIZON_GLOW: Rgba = rgb(200, 220, 255);

const CONCRETE: Rgba = rgb(100, 100, 110);
const LAUNCH_PAD: Rgba = rgb(0, 200, 200);
const PIT_DARK: Rgba = rgb(20, 20, 25);
const PIT_LIGHT: Rgba = rgb(30, 30, 35);

/// Distance to the floor seen `row_offset` rows below the horizon.
///
/// ```text
/// dist = eye_z · view_h / row_offset
/// ```
#[inline(always)]
pub fn row_distance(eye_z: f32, view_h: f32, row_offset: f32) -> f32 {
    eye_z * view_h / row_offset
}

/// Checkerboard of the deep layer under a pit.
#[inline]
fn pit_checker(deep: Vec2) -> Rgba {
    let cx = deep.x.floor() as i32;
    let cy = deep.y.floor() as i32;
    if cx.wrapping_add(cy).rem_euclid(2) == 0 {
        PIT_DARK
    } else {
        PIT_LIGHT
    }
}

/// First screen row at or below which the floor starts.
#[inline]
fn horizon_row(horizon: f32) -> i32 {
    horizon.floor() as i32
}

impl Software {
    /// Paint rows `0 ..= horizon` with the sky gradient and the horizon row
    /// with a thin glow line.
    pub(super) fn fill_sky(&mut self, horizon: f32, pulse: f32) {
        let h_row = horizon_row(horizon);
        if h_row < 0 {
            return;
        }
        let last = (h_row as usize).min(self.height - 1);
        let span = h_row.max(1) as f32;

        for y in 0..=last {
            let c = if y as i32 == h_row {
                scale(HORIZON_GLOW, pulse)
            } else {
                scale(mix(SKY_HORIZON, SKY_TOP, y as f32 / span), pulse)
            };
            let row_idx = y * self.width;
            self.scratch[row_idx..][..self.width].fill(c);
        }
    }

    /// Paint every row below the horizon according to the floor mode.
    pub(super) fn draw_floor(
        &mut self,
        grid: &Grid,
        cam: &Camera,
        basis: &ViewBasis,
        horizon: f32,
        pulse: f32,
    ) {
        let h_row = horizon_row(horizon);
        let start = h_row.saturating_add(1).clamp(0, self.height as i32) as usize;

        let mode = self.config.floor;
        let pit_depth = self.config.pit_depth;
        let (ray0, ray1) = basis.edge_rays();
        let origin = cam.pos.truncate();
        let eye_z = cam.pos.z;
        let (w, width_f, height_f, half_h) = (self.width, self.width_f, self.height_f, self.half_h);

        for y in start..self.height {
            // whole rows below the horizon, never 0
            let p = (y as i64 - h_row as i64) as f32;
            let shade = (p / half_h * pulse).max(0.0);
            let concrete = scale(CONCRETE, shade);

            let row = &mut self.scratch[y * w..][..w];
            if mode == FloorMode::Shaded {
                row.fill(concrete);
                continue;
            }

            let dist = row_distance(eye_z, height_f, p);
            let pit_dist = row_distance(eye_z + pit_depth, height_f, p);
            let step = (ray1 - ray0) * (dist / width_f);
            let deep_step = (ray1 - ray0) * (pit_dist / width_f);
            let mut at = origin + ray0 * dist;
            let mut deep = origin + ray0 * pit_dist;

            for px in row.iter_mut() {
                *px = match grid.get_cell(at.floor().as_ivec2()) {
                    Tile::Void if mode == FloorMode::Parallax => pit_checker(deep),
                    Tile::Void => PIT_DARK,
                    Tile::Pad => scale(LAUNCH_PAD, shade),
                    _ => concrete,
                };
                at += step;
                deep += deep_step;
            }
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
