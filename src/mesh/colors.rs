//! Cell colors

use glam::Vec4;

/// RGBA color type
pub type HexColor = [f32; 4];

pub const WHITE: HexColor = [1.0, 1.0, 1.0, 1.0];

/// Linear interpolation between two colors
#[inline]
pub fn lerp_color(a: HexColor, b: HexColor, t: f32) -> HexColor {
    let a = Vec4::from_array(a);
    let b = Vec4::from_array(b);
    (a + (b - a) * t).to_array()
}
