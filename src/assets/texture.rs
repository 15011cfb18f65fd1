use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::foundation::{
    arena::Arena,
    error::{MikoError, MikoResult},
    math::{Vector2, Vector4},
};

/// Texture filtering mode used by shaders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sampling {
    /// Pick the texel containing the sample point.
    Nearest,
    /// Blend the four neighbouring texels.
    #[default]
    Bilinear,
}

/// 2D grid of normalized RGBA samples.
///
/// Texels are stored row-major and bottom-to-top: row 0 is the bottom image row and maps to
/// `v = 0`, so uv `(0, 0)` addresses the bottom-left image corner and `(1, 1)` the top-right.
#[derive(Clone, Debug)]
pub struct Texture {
    width: u32,
    height: u32,
    texels: Arena<Vector4>,
}

impl Texture {
    /// Build a texture from bottom-to-top row-major texels.
    pub fn new(width: u32, height: u32, texels: Vec<Vector4>) -> MikoResult<Self> {
        if width == 0 || height == 0 {
            return Err(MikoError::validation("texture dimensions must be > 0"));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| MikoError::validation("texture dimensions overflow"))?;
        if texels.len() != expected {
            return Err(MikoError::validation(format!(
                "texture expects {expected} texels for {width}x{height}, got {}",
                texels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            texels: Arena::from_vec(texels),
        })
    }

    /// 1x1 texture holding a single color, with channels clamped to `[0, 1]`.
    pub fn solid(color: Vector4) -> Self {
        Self {
            width: 1,
            height: 1,
            texels: Arena::filled(1, color.clamp(0.0, 1.0)),
        }
    }

    /// Convert a decoded image (top-to-bottom rows) into a texture.
    pub fn from_image(img: &image::DynamicImage) -> MikoResult<Self> {
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(MikoError::asset("image has no pixels"));
        }

        let mut texels = Vec::with_capacity(width as usize * height as usize);
        for y in (0..height).rev() {
            for x in 0..width {
                let [r, g, b, a] = rgba.get_pixel(x, y).0;
                texels.push(Vector4::new(
                    f32::from(r) / 255.0,
                    f32::from(g) / 255.0,
                    f32::from(b) / 255.0,
                    f32::from(a) / 255.0,
                ));
            }
        }
        Self::new(width, height, texels)
    }

    /// Decode encoded image bytes (PNG, JPEG, ...) into a texture.
    pub fn decode(bytes: &[u8]) -> MikoResult<Self> {
        let img = image::load_from_memory(bytes).context("decode texture from memory")?;
        Self::from_image(&img)
    }

    /// Load and decode an image file into a texture.
    pub fn open(path: impl AsRef<Path>) -> MikoResult<Self> {
        let path = path.as_ref();
        let img = image::open(path).with_context(|| format!("open texture {}", path.display()))?;
        Self::from_image(&img)
    }

    /// Width in texels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in texels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Texel at integer coordinates, `y = 0` being the bottom row.
    ///
    /// Panics when `(x, y)` lies outside the texture.
    pub fn texel(&self, x: u32, y: u32) -> Vector4 {
        assert!(
            x < self.width && y < self.height,
            "texel ({x}, {y}) out of bounds for {}x{} texture",
            self.width,
            self.height
        );
        self.texels[y as usize * self.width as usize + x as usize]
    }

    /// Sample with the given filtering mode.
    pub fn sample(&self, uv: Vector2, mode: Sampling) -> Vector4 {
        match mode {
            Sampling::Nearest => self.sample_nearest(uv),
            Sampling::Bilinear => self.sample_bilinear(uv),
        }
    }

    /// Nearest-texel lookup with `u`, `v` clamped to `[0, 1]`.
    pub fn sample_nearest(&self, uv: Vector2) -> Vector4 {
        let (fx, fy) = self.texel_coords(uv);
        self.texel(fx.floor() as u32, fy.floor() as u32)
    }

    /// Bilinear lookup with edge-clamped neighbours.
    pub fn sample_bilinear(&self, uv: Vector2) -> Vector4 {
        let (fx, fy) = self.texel_coords(uv);
        let x0 = fx.floor();
        let y0 = fy.floor();
        let tx = fx - x0;
        let ty = fy - y0;

        let x0 = x0 as u32;
        let y0 = y0 as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);

        let bottom = self.texel(x0, y0).lerp(self.texel(x1, y0), tx);
        let top = self.texel(x0, y1).lerp(self.texel(x1, y1), tx);
        bottom.lerp(top, ty)
    }

    fn texel_coords(&self, uv: Vector2) -> (f32, f32) {
        // NaN clamps to NaN; treat it as 0.
        let unit = |t: f32| {
            if t.is_nan() {
                0.0
            } else {
                t.clamp(0.0, 1.0)
            }
        };
        let (u, v) = (unit(uv.x), unit(uv.y));
        ((self.width - 1) as f32 * u, (self.height - 1) as f32 * v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/texture.rs"]
mod tests;
