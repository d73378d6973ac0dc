use glam::{Vec2, Vec3};

/// Length of the view-plane vector relative to the unit forward vector.
/// 0.66 gives a horizontal field of view of roughly 66°.
pub const PLANE_SCALE: f32 = 0.66;

/// Horizon rows shifted per column per degree of roll.
pub const ROLL_SHEAR: f32 = 0.02;

/// Below this |det| the `(plane, dir)` matrix is treated as singular.
const MIN_DET: f32 = 1e-6;

/// Player view-point in grid space.
///
/// * `pos.z` is eye height above the floor (0.5 = standing).
/// * `pitch` is a vertical screen offset in rows, not an angle.
/// * `roll` is in degrees and only shears the horizon.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub pos: Vec3, // x,y in grid cells; z = eye height
    pub yaw: f32,  // radians (0 = +X, counter-clockwise)
    pub pitch: f32,
    pub roll: f32,
}

impl Camera {
    /// Create a level camera at `pos`, facing `yaw`.
    pub fn new(pos: Vec3, yaw: f32) -> Self {
        Self {
            pos,
            yaw,
            pitch: 0.0,
            roll: 0.0,
        }
    }

    /// Ray-casting basis for the current yaw.
    #[inline]
    pub fn basis(&self) -> ViewBasis {
        ViewBasis::from_yaw(self.yaw)
    }

    /// Horizon line for a `width × height` viewport.  Pass `roll = false`
    /// to get a level horizon regardless of the camera's roll.
    pub fn horizon(&self, width: usize, height: usize, roll: bool) -> Horizon {
        Horizon {
            center: height as f32 * 0.5 + self.pitch,
            half_w: width as f32 * 0.5,
            shear: if roll { self.roll * ROLL_SHEAR } else { 0.0 },
        }
    }

    /*──────────────────────── movement helpers ──────────────────────*/

    /// Rotate around Z-axis (positive = counter-clockwise).
    pub fn turn(&mut self, delta_yaw: f32) {
        self.yaw = (self.yaw + delta_yaw).rem_euclid(std::f32::consts::TAU);
    }
}

/// Forward direction plus the view-plane vector spanning the screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBasis {
    pub dir: Vec2,
    pub plane: Vec2,
}

impl ViewBasis {
    /// `dir = (cos, sin)`, `plane = PLANE_SCALE · (-dir.y, dir.x)`.
    #[inline]
    pub fn from_yaw(yaw: f32) -> Self {
        let (s, c) = yaw.sin_cos();
        let dir = Vec2::new(c, s);
        Self {
            dir,
            plane: dir.perp() * PLANE_SCALE,
        }
    }

    /// Ray through screen column `column` of a `width`-wide viewport.
    ///
    /// ```text
    /// ray = dir + plane · (2·column/width − 1)
    /// ```
    #[inline(always)]
    pub fn ray(&self, column: usize, width: usize) -> Vec2 {
        let camera_x = 2.0 * column as f32 / width as f32 - 1.0;
        self.dir + self.plane * camera_x
    }

    /// Leftmost and rightmost rays (screen edges).
    #[inline]
    pub fn edge_rays(&self) -> (Vec2, Vec2) {
        (self.dir - self.plane, self.dir + self.plane)
    }

    #[inline]
    pub fn determinant(&self) -> f32 {
        self.plane.x * self.dir.y - self.dir.x * self.plane.y
    }

    /// `dir` and `plane` are (nearly) parallel or not finite.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        let det = self.determinant();
        det.abs() < MIN_DET || !det.is_finite()
    }

    /// Transform a camera-relative point into camera space:
    ///  .x = lateral offset in view-plane units
    ///  .y = depth along `dir`
    ///
    /// Returns `None` when the basis is degenerate.
    #[inline]
    pub fn to_cam(&self, rel: Vec2) -> Option<Vec2> {
        if self.is_degenerate() {
            return None;
        }
        let inv_det = 1.0 / self.determinant();
        Some(Vec2::new(
            inv_det * (self.dir.y * rel.x - self.dir.x * rel.y),
            inv_det * (-self.plane.y * rel.x + self.plane.x * rel.y),
        ))
    }
}

/// Screen row of eye level, sheared linearly across columns by roll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Horizon {
    center: f32,
    half_w: f32,
    shear: f32,
}

impl Horizon {
    /// Horizon row at `column`.
    #[inline(always)]
    pub fn row(&self, column: f32) -> f32 {
        self.center + (column - self.half_w) * self.shear
    }

    /// Row at the screen's vertical centre line (no shear).
    #[inline(always)]
    pub fn center(&self) -> f32 {
        self.center
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn basis_is_perpendicular_with_fixed_fov() {
        let b = ViewBasis::from_yaw(0.3);
        assert!((b.dir.length() - 1.0).abs() < 1e-5);
        assert!((b.plane.length() - PLANE_SCALE).abs() < 1e-5);
        assert!(b.dir.dot(b.plane).abs() < 1e-5);
    }

    #[test]
    fn yaw_zero_basis() {
        let b = ViewBasis::from_yaw(0.0);
        assert!((b.dir - vec2(1.0, 0.0)).length() < 1e-6);
        assert!((b.plane - vec2(0.0, PLANE_SCALE)).length() < 1e-6);
    }

    #[test]
    fn centre_column_ray_is_forward() {
        let b = ViewBasis::from_yaw(1.1);
        assert!((b.ray(400, 800) - b.dir).length() < 1e-6);
        assert!((b.ray(0, 800) - (b.dir - b.plane)).length() < 1e-6);
        assert_eq!(b.edge_rays().0, b.dir - b.plane);
    }

    #[test]
    fn to_cam_axes_align() {
        let b = ViewBasis::from_yaw(0.0);
        // straight ahead → (lateral = 0, depth = 10)
        let p = b.to_cam(vec2(10.0, 0.0)).unwrap();
        assert!((p - vec2(0.0, 10.0)).length() < 1e-5);
        // on the plane direction → depth 0, lateral 1 plane length
        let p = b.to_cam(vec2(0.0, PLANE_SCALE)).unwrap();
        assert!(p.y.abs() < 1e-5);
        assert!((p.x.abs() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn to_cam_rotated_yaw() {
        let b = ViewBasis::from_yaw(FRAC_PI_2);
        let p = b.to_cam(vec2(0.0, 10.0)).unwrap();
        assert!((p - vec2(0.0, 10.0)).length() < 1e-4);
    }

    #[test]
    fn degenerate_basis_has_no_transform() {
        let b = ViewBasis {
            dir: vec2(1.0, 0.0),
            plane: vec2(0.66, 0.0),
        };
        assert_eq!(b.determinant(), 0.0);
        assert_eq!(b.to_cam(vec2(3.0, 1.0)), None);
    }

    #[test]
    fn horizon_pitch_and_roll() {
        let mut cam = Camera::new(Vec3::new(2.0, 2.0, 0.5), 0.0);
        cam.pitch = 30.0;
        cam.roll = 5.0;
        let h = cam.horizon(800, 600, true);
        assert_eq!(h.center(), 330.0);
        assert_eq!(h.row(400.0), 330.0);
        assert!((h.row(500.0) - (330.0 + 100.0 * 5.0 * ROLL_SHEAR)).abs() < 1e-4);
        let level = cam.horizon(800, 600, false);
        assert_eq!(level.row(0.0), 330.0);
    }

    #[test]
    fn turn_wraps_into_one_revolution() {
        let mut cam = Camera::new(Vec3::new(2.0, 2.0, 0.5), 0.0);
        cam.turn(-0.5);
        assert!(cam.yaw > 0.0 && cam.yaw < std::f32::consts::TAU);
        cam.turn(0.5);
        assert!(cam.yaw.abs() < 1e-4 || (cam.yaw - std::f32::consts::TAU).abs() < 1e-4);
        assert!((cam.basis().dir.x - 1.0).abs() < 1e-4);
    }
}
