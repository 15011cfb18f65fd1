use crate::foundation::{
    error::{MikoError, MikoResult},
    math::Vector3,
};

/// Read-only view of the color buffer produced by [`Engine::get_frame`](crate::Engine::get_frame).
///
/// Pixels are linear RGB with every channel in `[0, 1]`, row-major, row 0 at the top of the
/// image. The view borrows the engine, so it cannot outlive the next render call.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    width: usize,
    height: usize,
    pixels: &'a [Vector3],
}

impl<'a> Frame<'a> {
    pub(crate) fn new(width: usize, height: usize, pixels: &'a [Vector3]) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Frame width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &'a [Vector3] {
        self.pixels
    }

    /// Pixel at column `x`, row `y`. Panics when out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Vector3 {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds ({}x{})",
            self.width,
            self.height
        );
        self.pixels[y * self.width + x]
    }

    /// Tightly packed RGB8 bytes, quantized with `round(clamp(c, 0, 1) * 255)`.
    pub fn to_rgb8(&self) -> Vec<u8> {
        fn to_u8(c: f32) -> u8 {
            (c.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        let mut out = Vec::with_capacity(self.pixels.len() * 3);
        for p in self.pixels {
            out.extend_from_slice(&[to_u8(p.x), to_u8(p.y), to_u8(p.z)]);
        }
        out
    }

    /// Quantized copy as an [`image::RgbImage`], ready for encoding.
    pub fn to_image(&self) -> MikoResult<image::RgbImage> {
        let width = u32::try_from(self.width)
            .map_err(|_| MikoError::validation("frame width exceeds u32"))?;
        let height = u32::try_from(self.height)
            .map_err(|_| MikoError::validation("frame height exceeds u32"))?;
        image::RgbImage::from_raw(width, height, self.to_rgb8())
            .ok_or_else(|| MikoError::validation("frame buffer size does not match dimensions"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
