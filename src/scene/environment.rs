//! Equirectangular environment maps for image-based lighting.
//!
//! Texel `(0, 0)` is the top-left of the image: the top row looks straight
//! up (+Y) and the horizontal centre of the image looks down -Z. The same
//! mapping is used by `lighting.wgsl`.

use std::f32::consts::{PI, TAU};
use std::fmt;
use std::path::Path;

use glam::Vec3;

/// Longest side of the filtered copy the irradiance convolution reads.
const IRRADIANCE_SOURCE_SIZE: u32 = 64;

/// Errors produced while loading an environment map.
#[derive(Debug)]
pub enum EnvironmentError {
    /// Decoding failed (includes I/O failures while reading the file).
    Decode(image::ImageError),
    /// The decoded image has zero width or height.
    Empty,
}

impl fmt::Display for EnvironmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(e) => write!(f, "failed to decode image: {e}"),
            Self::Empty => write!(f, "environment image is empty"),
        }
    }
}

impl std::error::Error for EnvironmentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(e) => Some(e),
            Self::Empty => None,
        }
    }
}

impl From<image::ImageError> for EnvironmentError {
    fn from(e: image::ImageError) -> Self {
        Self::Decode(e)
    }
}

/// Linear-RGB equirectangular image.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentMap {
    /// Width in texels (longitude).
    pub width: u32,
    /// Height in texels (latitude).
    pub height: u32,
    /// Row-major texels, `width * height` entries.
    pub texels: Vec<[f32; 3]>,
}

impl EnvironmentMap {
    /// Wrap raw texels.
    ///
    /// # Errors
    ///
    /// [`EnvironmentError::Empty`] if a dimension is zero or `texels` does
    /// not hold `width * height` entries.
    pub fn from_texels(
        width: u32,
        height: u32,
        texels: Vec<[f32; 3]>,
    ) -> Result<Self, EnvironmentError> {
        if width == 0 || height == 0 || texels.len() != (width * height) as usize {
            return Err(EnvironmentError::Empty);
        }
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Decode an image file (Radiance `.hdr`, PNG, JPEG).
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentError`] if the file cannot be read or decoded.
    pub fn load(path: &Path) -> Result<Self, EnvironmentError> {
        let image = image::ImageReader::open(path)
            .map_err(image::ImageError::IoError)?
            .with_guessed_format()
            .map_err(image::ImageError::IoError)?
            .decode()?
            .into_rgb32f();
        let (width, height) = image.dimensions();
        let texels = image.pixels().map(|p| p.0).collect();
        let map = Self::from_texels(width, height, texels)?;
        log::info!("loaded environment {} ({width}x{height})", path.display());
        Ok(map)
    }

    /// Procedural studio backdrop: warm white overhead fading to cool blue
    /// below.
    #[must_use]
    pub fn studio(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let mut texels = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            let dir = direction_at(0.5, (y as f32 + 0.5) / height as f32);
            texels.extend(std::iter::repeat_n(studio_radiance(dir), width as usize));
        }
        Self {
            width,
            height,
            texels,
        }
    }

    /// Nearest-texel radiance seen along `direction`.
    #[must_use]
    pub fn sample(&self, direction: Vec3) -> Vec3 {
        let (u, v) = equirect_uv(direction);
        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = ((v * self.height as f32) as u32).min(self.height - 1);
        Vec3::from_array(self.texels[(y * self.width + x) as usize])
    }

    /// Diffuse irradiance map of `size x size/2` texels.
    ///
    /// Each output texel holds the cosine-weighted mean radiance over the
    /// hemisphere around its direction, integrated over a copy of the
    /// source box-filtered to at most 64 texels across, so small bright
    /// features keep their share of the energy.
    #[must_use]
    pub fn irradiance(&self, size: u32) -> Self {
        let width = size.max(2);
        let height = (width / 2).max(1);

        // Filtered source texels with their solid-angle weights.
        let source = self.downsampled(IRRADIANCE_SOURCE_SIZE);
        let mut samples = Vec::with_capacity(source.texels.len());
        for y in 0..source.height {
            let v = (y as f32 + 0.5) / source.height as f32;
            let solid_angle = (v * PI).sin();
            for x in 0..source.width {
                let u = (x as f32 + 0.5) / source.width as f32;
                let radiance = source.texels[(y * source.width + x) as usize];
                samples.push((direction_at(u, v), Vec3::from_array(radiance), solid_angle));
            }
        }

        let mut texels = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                let normal = direction_at(
                    (x as f32 + 0.5) / width as f32,
                    (y as f32 + 0.5) / height as f32,
                );
                let mut sum = Vec3::ZERO;
                let mut weight = 0.0;
                for &(dir, radiance, solid_angle) in &samples {
                    let cos = normal.dot(dir);
                    if cos > 0.0 {
                        sum += radiance * cos * solid_angle;
                        weight += cos * solid_angle;
                    }
                }
                let value = if weight > 0.0 { sum / weight } else { Vec3::ZERO };
                texels.push(value.to_array());
            }
        }
        Self {
            width,
            height,
            texels,
        }
    }

    /// Box-filter down by the smallest integer factor that brings both
    /// dimensions within `max_dimension`.
    #[must_use]
    pub fn downsampled(&self, max_dimension: u32) -> Self {
        let max_dimension = max_dimension.max(1);
        let factor = self
            .width
            .div_ceil(max_dimension)
            .max(self.height.div_ceil(max_dimension));
        if factor <= 1 {
            return self.clone();
        }
        let width = (self.width / factor).max(1);
        let height = (self.height / factor).max(1);
        let mut texels = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                let mut sum = Vec3::ZERO;
                let mut count = 0.0;
                for sy in y * factor..((y + 1) * factor).min(self.height) {
                    for sx in x * factor..((x + 1) * factor).min(self.width) {
                        sum += Vec3::from_array(self.texels[(sy * self.width + sx) as usize]);
                        count += 1.0;
                    }
                }
                texels.push((sum / count).to_array());
            }
        }
        Self {
            width,
            height,
            texels,
        }
    }

    /// Pack as little-endian `Rgba16Float` texels (alpha = 1).
    #[must_use]
    pub fn to_rgba16f(&self) -> Vec<u8> {
        let one = half::f16::ONE.to_le_bytes();
        let mut data = Vec::with_capacity(self.texels.len() * 8);
        for texel in &self.texels {
            for &c in texel {
                // Rgba16Float saturates at 65504.
                let c = if c.is_finite() { c.clamp(0.0, 65504.0) } else { 0.0 };
                data.extend_from_slice(&half::f16::from_f32(c).to_le_bytes());
            }
            data.extend_from_slice(&one);
        }
        data
    }
}

/// Equirectangular `(u, v)` in `[0, 1]` for a direction.
#[must_use]
pub fn equirect_uv(direction: Vec3) -> (f32, f32) {
    let d = direction.normalize_or(Vec3::NEG_Z);
    let u = 0.5 + d.x.atan2(-d.z) / TAU;
    let v = d.y.clamp(-1.0, 1.0).acos() / PI;
    (u.rem_euclid(1.0), v)
}

/// Inverse of [`equirect_uv`].
#[must_use]
pub fn direction_at(u: f32, v: f32) -> Vec3 {
    let phi = (u - 0.5) * TAU;
    let theta = v * PI;
    Vec3::new(
        theta.sin() * phi.sin(),
        theta.cos(),
        -theta.sin() * phi.cos(),
    )
}

fn studio_radiance(dir: Vec3) -> [f32; 3] {
    let t = dir.y * 0.5 + 0.5;
    let t = t * t * (3.0 - 2.0 * t);

    let top = Vec3::new(1.0, 0.92, 0.8);
    let bottom = Vec3::new(0.28, 0.32, 0.45);
    bottom.lerp(top, t).to_array()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uv_round_trips_through_direction() {
        for dir in [Vec3::X, Vec3::NEG_X, Vec3::Z, Vec3::new(0.3, 0.5, -0.8)] {
            let dir = dir.normalize();
            let (u, v) = equirect_uv(dir);
            assert!((direction_at(u, v) - dir).length() < 1e-5, "{dir}");
        }
        let (u, v) = equirect_uv(Vec3::NEG_Z);
        assert!((u - 0.5).abs() < 1e-6 && (v - 0.5).abs() < 1e-6);
    }

    #[test]
    fn studio_is_brighter_overhead() {
        let env = EnvironmentMap::studio(16, 8);
        assert_eq!(env.texels.len(), 128);
        let up = env.sample(Vec3::Y);
        let down = env.sample(Vec3::NEG_Y);
        assert!(up.x > down.x && up.y > down.y);
    }

    #[test]
    fn irradiance_of_uniform_map_is_uniform() {
        let env = EnvironmentMap::from_texels(8, 4, vec![[0.5, 0.25, 1.0]; 32])
            .unwrap();
        let irr = env.irradiance(8);
        assert_eq!((irr.width, irr.height), (8, 4));
        for t in irr.texels {
            assert!((t[0] - 0.5).abs() < 1e-4);
            assert!((t[2] - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn irradiance_keeps_small_bright_features() {
        // A single hot texel away from any 4x4 block centre.
        let mut texels = vec![[0.0; 3]; 256 * 128];
        texels[64 * 256 + 128] = [1000.0; 3];
        let env = EnvironmentMap::from_texels(256, 128, texels).unwrap();

        // The same energy spread over the block it falls in.
        let mut coarse = vec![[0.0; 3]; 64 * 32];
        coarse[16 * 64 + 32] = [62.5; 3];
        let filtered = EnvironmentMap::from_texels(64, 32, coarse).unwrap();

        let irr = env.irradiance(16);
        let expected = filtered.irradiance(16);
        for (t, e) in irr.texels.iter().zip(&expected.texels) {
            assert!((t[0] - e[0]).abs() < 1e-4, "{t:?} vs {e:?}");
        }
        let facing = irr.sample(Vec3::NEG_Z)[0];
        assert!(facing > 0.0 && facing < 62.5, "{facing}");
        assert_eq!(irr.sample(Vec3::Z)[0], 0.0);
    }

    #[test]
    fn downsampling_averages_blocks() {
        let texels = (0..16).map(|i| [i as f32, 0.0, 0.0]).collect();
        let env = EnvironmentMap::from_texels(4, 4, texels).unwrap();
        let small = env.downsampled(2);
        assert_eq!((small.width, small.height), (2, 2));
        // Top-left block holds 0, 1, 4, 5.
        assert_eq!(small.texels[0][0], 2.5);
        assert_eq!(env.downsampled(8), env);
    }

    #[test]
    fn texel_count_mismatch_is_empty() {
        assert!(matches!(
            EnvironmentMap::from_texels(4, 4, vec![[0.0; 3]; 3]),
            Err(EnvironmentError::Empty)
        ));
    }

    #[test]
    fn rgba16f_has_eight_bytes_per_texel() {
        let env = EnvironmentMap::studio(4, 2);
        let data = env.to_rgba16f();
        assert_eq!(data.len(), 4 * 2 * 8);
        assert_eq!(&data[6..8], &half::f16::ONE.to_le_bytes());
    }

    #[test]
    fn missing_file_is_decode_error() {
        let err = EnvironmentMap::load(Path::new("/nonexistent/meshview.hdr"))
            .unwrap_err();
        assert!(matches!(err, EnvironmentError::Decode(_)));
    }
}
