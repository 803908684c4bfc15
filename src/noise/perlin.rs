//! Tileable 2D Perlin noise
//!
//! Uses the standard Ken Perlin permutation table. Lattice coordinates wrap at
//! a caller-chosen period, so a texture filled with it repeats seamlessly.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for generating a noise texture
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PerlinConfig {
    /// Width and height of the generated texture in texels
    pub size: usize,
    /// Lattice cells across the texture for the first octave (lower = larger features)
    pub base_period: u32,
    /// Number of octaves for fractal detail layers; each doubles the period
    pub octaves: usize,
    /// Amplitude decay per octave (controls roughness)
    pub persistence: f32,
}

impl Default for PerlinConfig {
    fn default() -> Self {
        Self {
            size: 256,
            base_period: 8,
            octaves: 4,
            persistence: 0.5,
        }
    }
}

// Must remain unchanged to keep textures deterministic across versions.
const PERM: [u32; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

/// Hash a lattice point together with the seed
#[inline]
fn hash(x: u32, y: u32, seed: u32) -> u32 {
    let seed_hash = (seed.wrapping_mul(1103515245).wrapping_add(12345)) >> 16;
    let ix = (x ^ seed_hash) & 255;
    let iy = (y ^ (seed_hash >> 8)) & 255;
    let a = PERM[ix as usize];
    PERM[((a + iy) & 255) as usize]
}

/// Dot product of (x, y) with one of eight lattice gradients
#[inline]
fn gradient(hash_value: u32, x: f32, y: f32) -> f32 {
    match hash_value & 7 {
        0 => x + y,
        1 => -x + y,
        2 => x - y,
        3 => -x - y,
        4 => x,
        5 => -x,
        6 => y,
        _ => -y,
    }
}

/// Quintic smoothstep: 6t⁵ - 15t⁴ + 10t³
#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Sample 2D Perlin noise whose lattice repeats every `period` cells.
///
/// Returns a value in roughly [-1, 1].
pub(crate) fn perlin_2d(x: f32, y: f32, period: u32, seed: u32) -> f32 {
    let period = period.max(1) as i64;
    let xf0 = x.floor();
    let yf0 = y.floor();
    let xf = x - xf0;
    let yf = y - yf0;

    let x0 = (xf0 as i64).rem_euclid(period) as u32;
    let y0 = (yf0 as i64).rem_euclid(period) as u32;
    let x1 = ((xf0 as i64) + 1).rem_euclid(period) as u32;
    let y1 = ((yf0 as i64) + 1).rem_euclid(period) as u32;

    let u = fade(xf);
    let v = fade(yf);

    let g00 = gradient(hash(x0, y0, seed), xf, yf);
    let g10 = gradient(hash(x1, y0, seed), xf - 1.0, yf);
    let g01 = gradient(hash(x0, y1, seed), xf, yf - 1.0);
    let g11 = gradient(hash(x1, y1, seed), xf - 1.0, yf - 1.0);

    lerp(lerp(g00, g10, u), lerp(g01, g11, u), v)
}

/// Fractal Brownian motion over tileable Perlin noise, normalized to [0, 1].
///
/// `(u, v)` are texture coordinates in [0, 1); the result tiles across whole
/// texture repeats because each octave's period is an integer multiple of the
/// texture size.
pub fn sample_tileable_fbm(u: f32, v: f32, seed: u32, config: &PerlinConfig) -> f32 {
    let mut value = 0.0;
    let mut amplitude = 1.0;
    let mut max_value = 0.0;
    let mut period = config.base_period.max(1);

    for _ in 0..config.octaves.max(1) {
        let p = period as f32;
        value += perlin_2d(u * p, v * p, period, seed) * amplitude;
        max_value += amplitude;

        period = period.saturating_mul(2);
        amplitude *= config.persistence;
    }

    (((value / max_value) + 1.0) / 2.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let config = PerlinConfig::default();
        let a = sample_tileable_fbm(0.3, 0.7, 42, &config);
        let b = sample_tileable_fbm(0.3, 0.7, 42, &config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_range() {
        let config = PerlinConfig::default();
        for i in 0..50 {
            let u = i as f32 / 50.0;
            let value = sample_tileable_fbm(u, 1.0 - u * 0.5, 12345, &config);
            assert!((0.0..=1.0).contains(&value), "value {} out of range", value);
        }
    }

    #[test]
    fn test_different_seeds() {
        let config = PerlinConfig::default();
        let differs = (0..20).any(|i| {
            let u = 0.013 + i as f32 * 0.047;
            sample_tileable_fbm(u, u, 42, &config) != sample_tileable_fbm(u, u, 999, &config)
        });
        assert!(differs, "different seeds should produce different values");
    }

    #[test]
    fn test_lattice_points_are_zero() {
        // Gradient noise vanishes at integer lattice points
        assert_eq!(perlin_2d(3.0, 5.0, 8, 7), 0.0);
    }

    #[test]
    fn test_tiles() {
        let a = perlin_2d(0.25, 0.6, 4, 11);
        let b = perlin_2d(4.25, 0.6, 4, 11);
        let c = perlin_2d(0.25, -3.4, 4, 11);
        assert!((a - b).abs() < 1e-5);
        assert!((a - c).abs() < 1e-4);
    }
}
