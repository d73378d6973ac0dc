//! Rendering abstraction layer.
//!
//! *The rest of the engine never touches a pixel buffer directly.*
//! It assembles a [`Scene`] (grid, camera, drawable snapshot) and hands it
//! to a type that implements [`Renderer`].
//!
//! * The helper blanket‐impl [`RendererExt`] adds `draw_frame` so call-sites
//!   stay short.
//! * Every optional effect is switched through one [`RenderConfig`]; there
//!   is a single code path with feature flags, not one renderer per
//!   feature set.

use bitflags::bitflags;

use crate::sim::Drawable;
use crate::world::{Camera, Grid};

pub mod color;
pub mod software;

pub use software::Software;

/// Pixel format of the software frame-buffer (0xAARRGGBB).
pub type Rgba = u32;

bitflags! {
    /// Optional per-frame effects.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Effects: u8 {
        /// Blend walls and sprites toward the fog colour with distance.
        const FOG      = 0b0001;
        /// Shear the horizon by the camera roll.
        const ROLL     = 0b0010;
        /// Darken the screen edges.
        const VIGNETTE = 0b0100;
        /// Slow sine brightness pulse on floor and sky.
        const PULSE    = 0b1000;
    }
}

impl Default for Effects {
    fn default() -> Self {
        Effects::all()
    }
}

/// How the area below the horizon is filled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum FloorMode {
    /// Brightness gradient only; no per-pixel map lookups.
    Shaded,
    /// Floor-cast with per-tile colours; pits drawn flat.
    Cast,
    /// Floor-cast plus the deep parallax layer under pit tiles.
    #[default]
    Parallax,
}

/// Renderer tuning, fixed for the lifetime of a renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderConfig {
    pub effects: Effects,
    pub floor: FloorMode,
    pub fog_color: Rgba,
    /// `k` in the fog weight `1 / (1 + k·distance)`.
    pub fog_density: f32,
    /// Lower clamp of the fog weight (most fog a surface can get).
    pub fog_min_weight: f32,
    /// How far below the walkable floor the pit layer sits.
    pub pit_depth: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            effects: Effects::default(),
            floor: FloorMode::default(),
            fog_color: color::rgb(180, 200, 220),
            fog_density: 0.1,
            fog_min_weight: 0.1,
            pit_depth: 20.0,
        }
    }
}

/// Everything one frame is rendered from.  Borrowed, read-only, and only
/// for the duration of the call.
#[derive(Clone, Copy)]
pub struct Scene<'a> {
    pub grid: &'a Grid,
    pub camera: &'a Camera,
    pub drawables: &'a [Drawable],
    /// Seconds since start; drives the ambient pulse.
    pub time: f32,
    /// Slow-motion / focus state: adds a tinted overlay.
    pub focus: bool,
}

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
/// Software callers typically forward it to their window-manager.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Draw the whole scene: sky, floor, walls, sprites, post effects.
    fn draw_scene(&mut self, scene: &Scene<'_>);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// * `submit(&[Rgba], w, h)` is run exactly once per frame.
    /// * Software caller passes `|fb, w, h| window.update_with_buffer(fb, w, h)`.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

/// Convenience blanket-impl with a one-liner `draw_frame` adaptor.
pub trait RendererExt: Renderer {
    fn draw_frame<F>(&mut self, width: usize, height: usize, scene: &Scene<'_>, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        self.begin_frame(width, height);
        self.draw_scene(scene);
        self.end_frame(submit);
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}
