use std::sync::Arc;

use crate::{
    renderer::software::{post::ambient_pulse, sprites::VisSprite},
    renderer::{Effects, RenderConfig, Renderer, Rgba, Scene, color},
    world::procedural::{WALL_BRICK, WALL_MOSSY},
    world::{TextureBank, TextureId, Tile},
};

/// Wall texture ids, resolved by name once per renderer.
#[derive(Clone, Copy, Debug)]
pub(super) struct Materials {
    pub brick: TextureId,
    pub moss: TextureId,
}

impl Materials {
    fn resolve(bank: &TextureBank) -> Self {
        Self {
            brick: bank.id_or_missing(WALL_BRICK),
            moss: bank.id_or_missing(WALL_MOSSY),
        }
    }

    #[inline]
    pub fn for_tile(&self, tile: Tile) -> TextureId {
        match tile {
            Tile::Moss => self.moss,
            _ => self.brick,
        }
    }
}

pub struct Software {
    pub scratch: Vec<Rgba>,
    /// Perpendicular wall distance per screen column.
    pub depth: Vec<f32>,
    pub sprites: Vec<VisSprite>,
    pub(super) sort_keys: Vec<(f32, usize)>,

    pub width: usize,
    pub height: usize,

    pub width_f: f32,
    pub height_f: f32,
    pub half_w: f32,
    pub half_h: f32,

    pub(super) config: RenderConfig,
    pub(super) bank: Arc<TextureBank>,
    pub(super) materials: Materials,
}

impl Default for Software {
    fn default() -> Self {
        Self::new(
            Arc::new(TextureBank::default_with_checker()),
            RenderConfig::default(),
        )
    }
}

impl Software {
    pub fn new(bank: Arc<TextureBank>, config: RenderConfig) -> Self {
        let materials = Materials::resolve(&bank);
        Self {
            scratch: Vec::new(),
            depth: Vec::new(),
            sprites: Vec::new(),
            sort_keys: Vec::new(),
            width: 0,
            height: 0,
            width_f: 0.0,
            height_f: 0.0,
            half_w: 0.0,
            half_h: 0.0,
            config,
            bank,
            materials,
        }
    }

    #[inline]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Last rendered frame, row-major.
    #[inline]
    pub fn frame(&self) -> &[Rgba] {
        &self.scratch
    }

    /// Wall depth left behind by the last frame, one entry per column.
    #[inline]
    pub fn depth(&self) -> &[f32] {
        &self.depth
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        self.scratch[y * self.width + x]
    }

    /// Blend `c` toward the fog colour for a surface `distance` away.
    #[inline]
    pub(super) fn fog(&self, c: Rgba, distance: f32) -> Rgba {
        if !self.config.effects.contains(Effects::FOG) {
            return c;
        }
        let w = color::fog_weight(
            distance,
            self.config.fog_density,
            self.config.fog_min_weight,
        );
        color::mix(c, self.config.fog_color, w)
    }
}

impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        if w != self.width || h != self.height {
            tracing::debug!(
                from_w = self.width,
                from_h = self.height,
                w,
                h,
                "software viewport resized"
            );
            self.width = w;
            self.height = h;
            self.width_f = w as f32;
            self.height_f = h as f32;
            self.half_w = self.width_f * 0.5;
            self.half_h = self.height_f * 0.5;
            self.scratch.resize(w * h, 0);
            self.depth.resize(w, f32::INFINITY);
        }
        // black clear
        self.scratch.fill(0xFF_00_00_00);
        self.depth.fill(f32::INFINITY);
        self.sprites.clear();
    }

    fn draw_scene(&mut self, scene: &Scene<'_>) {
        if self.width == 0 || self.height == 0 {
            return;
        }

        let cam = scene.camera;
        let basis = cam.basis();
        let horizon = cam.horizon(
            self.width,
            self.height,
            self.config.effects.contains(Effects::ROLL),
        );
        let pulse = if self.config.effects.contains(Effects::PULSE) {
            ambient_pulse(scene.time)
        } else {
            1.0
        };

        // Floor and sky use the level horizon; roll only shears walls and sprites.
        self.fill_sky(horizon.center(), pulse);
        self.draw_floor(scene.grid, cam, &basis, horizon.center(), pulse);

        self.draw_walls(scene.grid, cam, &basis, &horizon);

        self.collect_sprites(scene.drawables, cam, &basis, &horizon);
        self.draw_sprites();

        self.composite(scene.focus);
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.scratch, self.width, self.height);
    }
}
