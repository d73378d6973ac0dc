//! Grid clip-and-slide for the viewer's walking camera.
//!
//! The move is split into fixed slices; each slice tries X and Y
//! separately, so a blocked axis is dropped and the other one glides
//! along the wall.

use glam::Vec2;

use crate::world::Grid;

/// What the caller gets back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveResult {
    pub pos: Vec2,
    pub hit_wall: bool,
}

/// `true` when a body of `radius` centred at `p` overlaps a solid tile.
#[inline]
fn blocked(grid: &Grid, p: Vec2, radius: f32) -> bool {
    let lo = (p - Vec2::splat(radius)).floor().as_ivec2();
    let hi = (p + Vec2::splat(radius)).floor().as_ivec2();
    (lo.y..=hi.y).any(|y| (lo.x..=hi.x).any(|x| grid.get(x, y).is_solid()))
}

/// Move from `pos` by `delta`, never entering a solid tile.
pub fn slide_move(grid: &Grid, mut pos: Vec2, delta: Vec2, radius: f32) -> MoveResult {
    const SLICE_COUNT: i32 = 4;
    let slice = delta / SLICE_COUNT as f32;
    let mut touched = false;

    for _ in 0..SLICE_COUNT {
        let try_x = Vec2::new(pos.x + slice.x, pos.y);
        if blocked(grid, try_x, radius) {
            touched = true;
        } else {
            pos = try_x;
        }

        let try_y = Vec2::new(pos.x, pos.y + slice.y);
        if blocked(grid, try_y, radius) {
            touched = true;
        } else {
            pos = try_y;
        }
    }

    MoveResult {
        pos,
        hit_wall: touched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    #[test]
    fn free_move_is_exact() {
        let grid = Grid::bordered(8, 8);
        let r = slide_move(&grid, vec2(2.5, 2.5), vec2(1.0, 0.5), 0.2);
        assert!((r.pos - vec2(3.5, 3.0)).length() < 1e-5);
        assert!(!r.hit_wall);
    }

    #[test]
    fn wall_stops_one_axis_and_slides_the_other() {
        let grid = Grid::bordered(8, 8);
        // wall at x = 7; push diagonally into it
        let r = slide_move(&grid, vec2(6.5, 3.5), vec2(1.0, 1.0), 0.2);
        assert!(r.hit_wall);
        assert!(r.pos.x + 0.2 < 7.0);
        assert!((r.pos.y - 4.5).abs() < 1e-5);
    }

    #[test]
    fn never_ends_inside_a_solid_tile() {
        let grid = Grid::bordered(4, 4);
        let r = slide_move(&grid, vec2(1.5, 1.5), vec2(-5.0, -5.0), 0.2);
        assert!(!grid.get(r.pos.x.floor() as i32, r.pos.y.floor() as i32).is_solid());
    }
}
