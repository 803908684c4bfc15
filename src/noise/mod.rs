//! Noise sources used for vertex perturbation
//!
//! The triangulation engine only needs a bilinear sample over a 2D field. The
//! field is injected, never global, so tests can use [`ConstantNoise`] and get
//! exact, unperturbed geometry.

mod perlin;

pub use perlin::{sample_tileable_fbm, PerlinConfig};

use glam::Vec4;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{HexError, Result};

/// A 2D field of four-channel values in `[0, 1]`
pub trait NoiseSource {
    /// Sample the field at texture coordinates `(u, v)` with bilinear filtering.
    ///
    /// Coordinates outside `[0, 1)` wrap.
    fn sample_bilinear(&self, u: f32, v: f32) -> Vec4;
}

/// A noise source that returns the same sample everywhere
///
/// A sample of 0.5 in every channel maps to zero perturbation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantNoise(pub Vec4);

impl ConstantNoise {
    pub fn new(sample: Vec4) -> Self {
        Self(sample)
    }

    /// Noise that leaves every position where it is
    pub fn neutral() -> Self {
        Self(Vec4::splat(0.5))
    }
}

impl Default for ConstantNoise {
    fn default() -> Self {
        Self::neutral()
    }
}

impl NoiseSource for ConstantNoise {
    #[inline]
    fn sample_bilinear(&self, _u: f32, _v: f32) -> Vec4 {
        self.0
    }
}

/// A square, repeating RGBA noise texture
///
/// Each channel holds independent tileable Perlin fBm. Sampling follows GPU
/// texture conventions: texel centers sit at `(i + 0.5) / size`.
#[derive(Debug, Clone)]
pub struct NoiseTexture {
    size: usize,
    texels: Vec<Vec4>,
}

impl NoiseTexture {
    /// Generate a texture deterministically from a seed
    pub fn generate(seed: u32, config: &PerlinConfig) -> Result<Self> {
        if config.size == 0 {
            return Err(HexError::InvalidConfig(
                "noise texture size must be >= 1".to_string(),
            ));
        }

        // One independent seed per channel
        let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
        let channel_seeds: [u32; 4] = [rng.gen(), rng.gen(), rng.gen(), rng.gen()];

        let size = config.size;
        let mut texels = Vec::with_capacity(size * size);
        for y in 0..size {
            let v = y as f32 / size as f32;
            for x in 0..size {
                let u = x as f32 / size as f32;
                texels.push(Vec4::from_array(
                    channel_seeds.map(|s| sample_tileable_fbm(u, v, s, config)),
                ));
            }
        }

        log::debug!("generated {}x{} noise texture from seed {}", size, size, seed);

        Ok(Self { size, texels })
    }

    /// Wrap existing texel data, stored row by row
    pub fn from_texels(size: usize, texels: Vec<Vec4>) -> Result<Self> {
        if size == 0 || texels.len() != size * size {
            return Err(HexError::InvalidConfig(format!(
                "noise texture needs {}x{} texels (got {})",
                size,
                size,
                texels.len()
            )));
        }
        Ok(Self { size, texels })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Texel at integer coordinates, wrapping in both directions
    #[inline]
    pub fn texel(&self, x: i64, y: i64) -> Vec4 {
        let n = self.size as i64;
        let x = x.rem_euclid(n) as usize;
        let y = y.rem_euclid(n) as usize;
        self.texels[y * self.size + x]
    }
}

impl NoiseSource for NoiseTexture {
    fn sample_bilinear(&self, u: f32, v: f32) -> Vec4 {
        let px = u * self.size as f32 - 0.5;
        let py = v * self.size as f32 - 0.5;
        let x0 = px.floor();
        let y0 = py.floor();
        let fx = px - x0;
        let fy = py - y0;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let bottom = self.texel(x0, y0).lerp(self.texel(x0 + 1, y0), fx);
        let top = self.texel(x0, y0 + 1).lerp(self.texel(x0 + 1, y0 + 1), fx);
        bottom.lerp(top, fy)
    }
}
