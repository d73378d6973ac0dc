//! Full-screen passes applied after all geometry: ambient pulse factor,
//! edge vignette and the focus-mode tint.

use super::Software;
use crate::renderer::color::{blend, rgb};
use crate::renderer::{Effects, Rgba};

const BLACK: Rgba = rgb(0, 0, 0);
const WHITE: Rgba = rgb(255, 255, 255);

const VIGNETTE_SIDE_PX: usize = 80;
const VIGNETTE_SIDE_ALPHA: u8 = 60;
const VIGNETTE_EDGE_PX: usize = 40;
const VIGNETTE_EDGE_ALPHA: u8 = 40;

const FOCUS_TINT: Rgba = rgb(0, 50, 150);
const FOCUS_TINT_ALPHA: u8 = 40;
const FOCUS_GLOW_ALPHA: u8 = 10;

/// Brightness multiplier in `[0.9, 1.0]` for floor and sky.
#[inline]
pub fn ambient_pulse(time: f32) -> f32 {
    0.95 + (time * 2.0).sin() * 0.05
}

impl Software {
    pub(super) fn composite(&mut self, focus: bool) {
        if self.config.effects.contains(Effects::VIGNETTE) {
            self.vignette();
        }
        if focus {
            self.focus_tint();
        }
    }

    /// Blend `color` over the half-open rectangle `[x0, x1) × [y0, y1)`,
    /// clipped to the viewport.
    fn shade_rect(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, color: Rgba, alpha: u8) {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        if x0 >= x1 {
            return;
        }
        let w = self.width;
        for y in y0..y1 {
            let row = &mut self.scratch[y * w..][x0..x1];
            for px in row {
                *px = blend(*px, color, alpha);
            }
        }
    }

    /// Dark bands on all four edges; corners get both.
    fn vignette(&mut self) {
        let (w, h) = (self.width, self.height);
        let side = VIGNETTE_SIDE_PX.min(w);
        let edge = VIGNETTE_EDGE_PX.min(h);

        self.shade_rect(0, 0, side, h, BLACK, VIGNETTE_SIDE_ALPHA);
        self.shade_rect(w - side, 0, w, h, BLACK, VIGNETTE_SIDE_ALPHA);
        self.shade_rect(0, 0, w, edge, BLACK, VIGNETTE_EDGE_ALPHA);
        self.shade_rect(0, h - edge, w, h, BLACK, VIGNETTE_EDGE_ALPHA);
    }

    /// Cool full-screen wash plus a faint bright centre.
    fn focus_tint(&mut self) {
        let (w, h) = (self.width, self.height);
        self.shade_rect(0, 0, w, h, FOCUS_TINT, FOCUS_TINT_ALPHA);
        self.shade_rect(w / 4, h / 4, w / 4 + w / 2, h / 4 + h / 2, WHITE, FOCUS_GLOW_ALPHA);
    }
}
