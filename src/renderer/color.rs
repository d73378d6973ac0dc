//! Packed 0xAARRGGBB colour arithmetic.

use super::Rgba;

#[inline(always)]
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgba {
    0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

#[inline(always)]
pub const fn channels(c: Rgba) -> (u8, u8, u8) {
    ((c >> 16) as u8, (c >> 8) as u8, c as u8)
}

/// Alpha byte; 0 means a transparent texel.
#[inline(always)]
pub const fn alpha(c: Rgba) -> u8 {
    (c >> 24) as u8
}

#[inline(always)]
fn to_u8(v: f32) -> u8 {
    v.clamp(0.0, 255.0) as u8
}

/// Multiply every channel by `k`, saturating at 255.
#[inline]
pub fn scale(c: Rgba, k: f32) -> Rgba {
    let (r, g, b) = channels(c);
    rgb(
        to_u8(r as f32 * k),
        to_u8(g as f32 * k),
        to_u8(b as f32 * k),
    )
}

/// `a·w + b·(1 − w)`.
#[inline]
pub fn mix(a: Rgba, b: Rgba, w: f32) -> Rgba {
    let (ar, ag, ab) = channels(a);
    let (br, bg, bb) = channels(b);
    let f = |x: u8, y: u8| to_u8(x as f32 * w + y as f32 * (1.0 - w));
    rgb(f(ar, br), f(ag, bg), f(ab, bb))
}

/// Fog weight for a surface `distance` away: `1 / (1 + k·d)`, clamped to
/// `[min_weight, 1]`.  1 means no fog.
#[inline]
pub fn fog_weight(distance: f32, density: f32, min_weight: f32) -> f32 {
    (1.0 / (1.0 + distance * density)).clamp(min_weight, 1.0)
}

/// Standard "source over" blend of an opaque `src` with 8-bit `alpha`.
#[inline]
pub fn blend(dst: Rgba, src: Rgba, alpha: u8) -> Rgba {
    mix(src, dst, alpha as f32 / 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_and_unpack() {
        let c = rgb(1, 2, 3);
        assert_eq!(c, 0xFF_010203);
        assert_eq!(channels(c), (1, 2, 3));
        assert_eq!(alpha(c), 0xFF);
        assert_eq!(alpha(0x00_FFFFFF), 0);
    }

    #[test]
    fn scale_saturates() {
        assert_eq!(scale(rgb(200, 100, 0), 0.5), rgb(100, 50, 0));
        assert_eq!(scale(rgb(200, 100, 0), 2.0), rgb(255, 200, 0));
        assert_eq!(scale(rgb(200, 100, 50), -1.0), rgb(0, 0, 0));
    }

    #[test]
    fn fog_weight_is_monotone_and_clamped() {
        assert_eq!(fog_weight(0.0, 0.1, 0.1), 1.0);
        let near = fog_weight(2.0, 0.1, 0.1);
        let far = fog_weight(8.0, 0.1, 0.1);
        assert!(near > far);
        assert!((far - 1.0 / 1.8).abs() < 1e-6);
        assert_eq!(fog_weight(1000.0, 0.1, 0.1), 0.1);
    }

    #[test]
    fn mix_endpoints() {
        let a = rgb(10, 20, 30);
        let b = rgb(200, 200, 200);
        assert_eq!(mix(a, b, 1.0), a);
        assert_eq!(mix(a, b, 0.0), b);
    }

    #[test]
    fn blend_with_black() {
        let dst = rgb(255, 255, 255);
        assert_eq!(blend(dst, rgb(0, 0, 0), 0), dst);
        assert_eq!(blend(dst, rgb(0, 0, 0), 255), rgb(0, 0, 0));
        let half = blend(dst, rgb(0, 0, 0), 60);
        assert!((194..=195).contains(&channels(half).0));
    }
}
