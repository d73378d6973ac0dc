//! Wall pass: one DDA ray per screen column.

use glam::{IVec2, Vec2};

use super::Software;
use crate::renderer::color;
use crate::world::{Camera, Grid, Horizon, Tile, ViewBasis};

/// Stand-in for `|1 / 0|` on an axis the ray never crosses.
pub const NO_HIT_DELTA: f32 = 1e30;

/// Hits closer than this are pushed out to it (camera hugging a wall).
pub const MIN_PERP_DIST: f32 = 1e-4;

/// Y-side faces are drawn darker than X-side faces.
const SIDE_SHADE: f32 = 150.0 / 255.0;
/// Top and bottom two rows of every wall slice.
const EDGE_SHADE: f32 = 100.0 / 255.0;
const EDGE_ROWS: f32 = 2.0;

/// Which family of grid lines the ray crossed last.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// A vertical line (constant x).
    X,
    /// A horizontal line (constant y).
    Y,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallHit {
    /// Distance to the wall along the view direction (not the ray length).
    pub perp_dist: f32,
    pub tile: Tile,
    pub side: Side,
    /// Fractional position of the hit along the wall face, `[0, 1)`.
    pub wall_x: f32,
    pub cell: IVec2,
    /// Grid lines crossed before the hit.
    pub steps: u32,
}

impl WallHit {
    /// On-screen slice height for a `view_h`-tall viewport.
    #[inline]
    pub fn projected_height(&self, view_h: f32) -> f32 {
        view_h / self.perp_dist
    }

    /// Texture column for a `tex_w`-wide texture, mirrored so the image
    /// reads the same way from both sides of a wall.
    #[inline]
    pub fn tex_column(&self, ray: Vec2, tex_w: usize) -> usize {
        let u = ((self.wall_x * tex_w as f32) as usize).min(tex_w - 1);
        let flip = match self.side {
            Side::X => ray.x > 0.0,
            Side::Y => ray.y < 0.0,
        };
        if flip { tex_w - u - 1 } else { u }
    }
}

/// March `ray` from `origin` through `grid` until a solid tile is entered.
///
/// Out-of-bounds cells read as walls, so the march always terminates.
pub fn cast_ray(grid: &Grid, origin: Vec2, ray: Vec2) -> WallHit {
    let mut cell = origin.floor().as_ivec2();

    let delta = Vec2::new(
        if ray.x == 0.0 { NO_HIT_DELTA } else { (1.0 / ray.x).abs() },
        if ray.y == 0.0 { NO_HIT_DELTA } else { (1.0 / ray.y).abs() },
    );

    let (step_x, mut side_x) = if ray.x < 0.0 {
        (-1, (origin.x - cell.x as f32) * delta.x)
    } else {
        (1, (cell.x as f32 + 1.0 - origin.x) * delta.x)
    };
    let (step_y, mut side_y) = if ray.y < 0.0 {
        (-1, (origin.y - cell.y as f32) * delta.y)
    } else {
        (1, (cell.y as f32 + 1.0 - origin.y) * delta.y)
    };

    let mut steps = 0u32;
    let (tile, side) = loop {
        let side = if side_x < side_y {
            side_x += delta.x;
            cell.x = cell.x.saturating_add(step_x);
            Side::X
        } else {
            side_y += delta.y;
            cell.y = cell.y.saturating_add(step_y);
            Side::Y
        };
        steps += 1;

        let tile = grid.get_cell(cell);
        if tile.is_solid() {
            break (tile, side);
        }
    };

    let perp_dist = match side {
        Side::X => side_x - delta.x,
        Side::Y => side_y - delta.y,
    }
    .max(MIN_PERP_DIST);

    let along = match side {
        Side::X => origin.y + perp_dist * ray.y,
        Side::Y => origin.x + perp_dist * ray.x,
    };

    WallHit {
        perp_dist,
        tile,
        side,
        wall_x: along - along.floor(),
        cell,
        steps,
    }
}

impl Software {
    /// Cast every column, paint its slice and record the wall depth.
    pub(super) fn draw_walls(
        &mut self,
        grid: &Grid,
        cam: &Camera,
        basis: &ViewBasis,
        horizon: &Horizon,
    ) {
        let origin = cam.pos.truncate();
        for x in 0..self.width {
            let ray = basis.ray(x, self.width);
            let hit = cast_ray(grid, origin, ray);
            self.depth[x] = hit.perp_dist;
            self.draw_wall_column(x, &hit, ray, cam.pos.z, horizon.row(x as f32));
        }
    }

    fn draw_wall_column(&mut self, x: usize, hit: &WallHit, ray: Vec2, eye_z: f32, horizon: f32) {
        let line_h = hit.projected_height(self.height_f);
        // eye at `eye_z` of a unit-high wall
        let top = horizon - (1.0 - eye_z) * line_h;
        let bottom = horizon + eye_z * line_h;
        let span = (bottom - top).max(f32::EPSILON);

        let y0 = top.clamp(0.0, self.height_f) as usize;
        let y1 = bottom.clamp(0.0, self.height_f) as usize;
        if y0 >= y1 {
            return;
        }

        let tex = self.bank.texture_or_missing(self.materials.for_tile(hit.tile));
        let u = hit.tex_column(ray, tex.w);
        let side_k = if hit.side == Side::Y { SIDE_SHADE } else { 1.0 };

        for y in y0..y1 {
            let yf = y as f32;
            let v = ((yf - top) / span * tex.h as f32) as usize;

            let mut c = self.fog(color::scale(tex.texel(u, v), side_k), hit.perp_dist);
            if yf - top < EDGE_ROWS || bottom - yf <= EDGE_ROWS {
                c = color::scale(c, EDGE_SHADE);
            }
            self.scratch[y * self.width + x] = c;
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::color::{channels, rgb};
    use crate::renderer::{Effects, RenderConfig, Renderer, Rgba};
    use crate::world::procedural::WALL_BRICK;
    use crate::world::{DEMO_SIZE, Texture, TextureBank};
    use glam::vec2;
    use proptest::prelude::*;
    use std::sync::Arc;

    const GREY: Rgba = rgb(200, 200, 200);
    const BLACK: Rgba = rgb(0, 0, 0);
    const COL_H: usize = 100;

    /// One-column viewport whose brick material is flat grey.
    fn column_renderer(effects: Effects) -> Software {
        let mut bank = TextureBank::default_with_checker();
        let grey = Texture::new(WALL_BRICK, 4, 4, vec![GREY; 16]).unwrap();
        bank.insert(WALL_BRICK, grey).unwrap();
        let config = RenderConfig {
            effects,
            ..RenderConfig::default()
        };
        let mut sw = Software::new(Arc::new(bank), config);
        sw.begin_frame(1, COL_H);
        sw
    }

    fn hit_at(perp_dist: f32, side: Side) -> WallHit {
        WallHit {
            perp_dist,
            tile: Tile::Wall,
            side,
            wall_x: 0.5,
            cell: IVec2::ZERO,
            steps: 1,
        }
    }

    fn column(sw: &Software) -> Vec<Rgba> {
        (0..COL_H).map(|y| sw.pixel(0, y)).collect()
    }

    fn channel_gap(a: Rgba, b: Rgba) -> i32 {
        let (ar, ag, ab) = channels(a);
        let (br, bg, bb) = channels(b);
        [(ar, br), (ag, bg), (ab, bb)]
            .iter()
            .map(|&(x, y)| (x as i32 - y as i32).abs())
            .sum()
    }

    #[test]
    fn straight_ray_hits_far_border() {
        let grid = Grid::bordered(24, 24);
        let hit = cast_ray(&grid, vec2(2.0, 2.0), vec2(1.0, 0.0));
        assert_eq!(hit.cell, IVec2::new(23, 2));
        assert_eq!(hit.side, Side::X);
        assert_eq!(hit.tile, Tile::Wall);
        assert!((hit.perp_dist - 21.0).abs() < 1e-4);
        assert!((hit.projected_height(600.0) - 600.0 / 21.0).abs() < 1e-2);
    }

    #[test]
    fn zero_component_rays_terminate() {
        let grid = Grid::bordered(8, 8);
        for (ray, want) in [
            (vec2(0.0, 1.0), 3.5),
            (vec2(0.0, -1.0), 2.5),
            (vec2(-1.0, 0.0), 2.5),
        ] {
            let hit = cast_ray(&grid, vec2(3.5, 3.5), ray);
            assert!(hit.perp_dist.is_finite());
            assert!((hit.perp_dist - want).abs() < 1e-4, "{ray}: {}", hit.perp_dist);
        }
    }

    #[test]
    fn perpendicular_distance_has_no_fisheye() {
        // every column looking at a flat wall reports the same depth
        let grid = Grid::bordered(DEMO_SIZE, DEMO_SIZE);
        let b = ViewBasis::from_yaw(0.0);
        let origin = vec2(2.5, 12.0);
        for col in [60, 120, 200, 280, 340] {
            let hit = cast_ray(&grid, origin, b.ray(col, 400));
            assert_eq!(hit.cell.x, 23);
            assert!((hit.perp_dist - 20.5).abs() < 1e-3, "col {col}: {}", hit.perp_dist);
        }
    }

    #[test]
    fn hugging_a_wall_clamps_depth() {
        let grid = Grid::bordered(8, 8);
        let hit = cast_ray(&grid, vec2(6.999_99, 3.5), vec2(1.0, 0.0));
        assert!(hit.perp_dist >= MIN_PERP_DIST);
        assert!(hit.projected_height(600.0).is_finite());
    }

    #[test]
    fn texture_column_mirrors_by_facing() {
        let hit = WallHit {
            perp_dist: 1.0,
            tile: Tile::Wall,
            side: Side::X,
            wall_x: 0.25,
            cell: IVec2::ZERO,
            steps: 1,
        };
        assert_eq!(hit.tex_column(vec2(-1.0, 0.0), 64), 16);
        assert_eq!(hit.tex_column(vec2(1.0, 0.0), 64), 47);
        let y_hit = WallHit { side: Side::Y, ..hit };
        assert_eq!(y_hit.tex_column(vec2(0.0, 1.0), 64), 16);
        assert_eq!(y_hit.tex_column(vec2(0.0, -1.0), 64), 47);
    }

    #[test]
    fn moss_tile_reported() {
        let mut grid = Grid::bordered(8, 8);
        grid.set(5, 3, Tile::Moss);
        let hit = cast_ray(&grid, vec2(1.5, 3.5), vec2(1.0, 0.0));
        assert_eq!(hit.tile, Tile::Moss);
        assert!((hit.perp_dist - 3.5).abs() < 1e-4);
    }

    #[test]
    fn slice_span_follows_eye_height() {
        // perp 2 in a 100-row view: a 50-row slice around horizon 50
        let mut sw = column_renderer(Effects::empty());
        sw.draw_wall_column(0, &hit_at(2.0, Side::X), vec2(1.0, 0.0), 0.5, 50.0);
        let col = column(&sw);
        assert_eq!(col[24], BLACK);
        assert_ne!(col[25], BLACK);
        assert_ne!(col[74], BLACK);
        assert_eq!(col[75], BLACK);

        // a lower eye sees more wall above the horizon than below
        let mut sw = column_renderer(Effects::empty());
        sw.draw_wall_column(0, &hit_at(2.0, Side::X), vec2(1.0, 0.0), 0.25, 50.0);
        let col = column(&sw);
        assert_eq!(col[11], BLACK);
        assert_ne!(col[12], BLACK);
        assert_ne!(col[61], BLACK);
        assert_eq!(col[62], BLACK);
    }

    #[test]
    fn y_side_is_darker_than_x_side() {
        let mut x_side = column_renderer(Effects::empty());
        x_side.draw_wall_column(0, &hit_at(2.0, Side::X), vec2(1.0, 0.0), 0.5, 50.0);
        let mut y_side = column_renderer(Effects::empty());
        y_side.draw_wall_column(0, &hit_at(2.0, Side::Y), vec2(0.0, 1.0), 0.5, 50.0);

        assert_eq!(x_side.pixel(0, 50), GREY);
        assert_eq!(y_side.pixel(0, 50), color::scale(GREY, SIDE_SHADE));
        assert!(channels(x_side.pixel(0, 50)).0 > channels(y_side.pixel(0, 50)).0);
    }

    #[test]
    fn fog_pulls_far_walls_toward_fog_colour() {
        let fog = RenderConfig::default().fog_color;
        let hit = hit_at(15.0, Side::X);

        let mut clear = column_renderer(Effects::empty());
        clear.draw_wall_column(0, &hit, vec2(1.0, 0.0), 0.5, 50.0);
        let mut foggy = column_renderer(Effects::FOG);
        foggy.draw_wall_column(0, &hit, vec2(1.0, 0.0), 0.5, 50.0);

        let (c, f) = (clear.pixel(0, 50), foggy.pixel(0, 50));
        assert_eq!(c, GREY);
        assert_eq!(f, color::mix(GREY, fog, color::fog_weight(15.0, 0.1, 0.1)));
        assert!(channel_gap(f, fog) < channel_gap(c, fog));
    }

    #[test]
    fn two_rows_at_each_end_are_shaded() {
        // slice covers rows [25, 75)
        let mut sw = column_renderer(Effects::empty());
        sw.draw_wall_column(0, &hit_at(2.0, Side::X), vec2(1.0, 0.0), 0.5, 50.0);
        let edge = color::scale(GREY, EDGE_SHADE);
        let col = column(&sw);
        assert_eq!(col[25], edge);
        assert_eq!(col[26], edge);
        assert_eq!(col[27], GREY);
        assert_eq!(col[72], GREY);
        assert_eq!(col[73], edge);
        assert_eq!(col[74], edge);
    }

    proptest! {
        #[test]
        fn march_is_bounded_in_open_grid(
            ox in 0.0f32..24.0, oy in 0.0f32..24.0,
            yaw in 0.0f32..std::f32::consts::TAU,
        ) {
            let grid = Grid::new(24, 24);
            let ray = vec2(yaw.cos(), yaw.sin());
            let hit = cast_ray(&grid, vec2(ox, oy), ray);
            prop_assert!(hit.steps <= 24 + 24);
            prop_assert!(hit.perp_dist.is_finite() && hit.perp_dist > 0.0);
            prop_assert!((0.0..=1.0).contains(&hit.wall_x));
        }

        #[test]
        fn march_stops_at_border(
            ox in 1.0f32..23.0, oy in 1.0f32..23.0,
            dx in -1.0f32..1.0, dy in -1.0f32..1.0,
        ) {
            let grid = Grid::bordered(24, 24);
            let hit = cast_ray(&grid, vec2(ox, oy), vec2(dx, dy));
            prop_assert!(hit.steps <= 24 + 24);
            prop_assert!(grid.get_cell(hit.cell).is_solid());
        }
    }
}
