use rayon::prelude::*;
use smallvec::SmallVec;

use crate::{
    foundation::{
        arena::Arena,
        math::{Vector2, Vector3, Vector4, compute_barycentric, max3, min3},
    },
    shading::program::{ErasedShader, Uniforms},
};

/// Vertex after the viewport transform and perspective divide.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct ScreenVertex {
    /// Pixel-space `x`, `y`, divided `z`, and the untouched clip `w`.
    pub(crate) position: Vector4,
    /// View-space depth; negative in front of the camera.
    pub(crate) depth: f32,
}

/// Per-pixel buffers written by the depth test.
#[derive(Debug)]
pub(crate) struct RasterTargets {
    width: usize,
    pub(crate) depth: Arena<f32>,
    pub(crate) coverage: Arena<Option<u32>>,
    pub(crate) bary: Arena<Vector3>,
}

impl RasterTargets {
    pub(crate) fn new(width: usize, height: usize) -> Self {
        let len = width * height;
        Self {
            width,
            depth: Arena::filled(len, f32::NEG_INFINITY),
            coverage: Arena::filled(len, None),
            bary: Arena::new(len),
        }
    }

    pub(crate) fn reset_depth(&mut self) {
        self.depth.fill(f32::NEG_INFINITY);
    }

    pub(crate) fn reset_coverage(&mut self) {
        self.coverage.fill(None);
    }
}

/// Screen-space triangle that survived culling, with its clipped pixel bounds.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Triangle {
    index: u32,
    points: [Vector2; 3],
    inv_w: [f32; 3],
    depth: [f32; 3],
    min_x: usize,
    max_x: usize,
    min_y: usize,
    max_y: usize,
}

impl Triangle {
    /// Cull and bound one triangle.
    ///
    /// Returns `None` for zero-area triangles, triangles with a vertex at or behind the camera
    /// plane, non-finite screen positions, or bounds entirely off screen.
    pub(crate) fn setup(
        index: u32,
        verts: [ScreenVertex; 3],
        width: usize,
        height: usize,
    ) -> Option<Self> {
        if verts
            .iter()
            .any(|v| !v.position.is_finite() || !v.depth.is_finite() || v.depth >= 0.0)
        {
            return None;
        }
        let points = verts.map(|v| v.position.xy());
        let [a, b, c] = points;
        let doubled_area = (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y);
        if doubled_area == 0.0 || !doubled_area.is_finite() {
            return None;
        }

        let (min_x, max_x) = pixel_span(min3(a.x, b.x, c.x), max3(a.x, b.x, c.x), width)?;
        let (min_y, max_y) = pixel_span(min3(a.y, b.y, c.y), max3(a.y, b.y, c.y), height)?;
        Some(Self {
            index,
            points,
            inv_w: verts.map(|v| 1.0 / v.position.w),
            depth: verts.map(|v| v.depth),
            min_x,
            max_x,
            min_y,
            max_y,
        })
    }

    /// Perspective-corrected weights and depth key at the center of pixel `(x, y)`.
    pub(crate) fn sample(&self, x: usize, y: usize) -> Option<(Vector3, f32)> {
        let [p1, p2, p3] = self.points;
        let w = compute_barycentric(p1, p2, p3, x as f32 + 0.5, y as f32 + 0.5)?;
        let scaled = Vector3::new(
            w.x * self.inv_w[0],
            w.y * self.inv_w[1],
            w.z * self.inv_w[2],
        );
        let weights = scaled * (1.0 / (scaled.x + scaled.y + scaled.z));
        if !weights.is_finite() {
            return None;
        }
        let depth = weights.dot(Vector3::new(self.depth[0], self.depth[1], self.depth[2]));
        Some((weights, depth))
    }
}

// Floor both ends of `[lo, hi]` and clip to `[0, extent - 1]`.
fn pixel_span(lo: f32, hi: f32, extent: usize) -> Option<(usize, usize)> {
    let last = (extent - 1) as f32;
    let lo = lo.floor().max(0.0);
    let hi = hi.floor().min(last);
    (lo <= hi).then_some((lo as usize, hi as usize))
}

/// Culled triangle list for one model, in draw order.
pub(crate) fn setup_triangles(
    verts: &[ScreenVertex],
    width: usize,
    height: usize,
) -> Vec<Triangle> {
    verts
        .par_chunks_exact(3)
        .enumerate()
        .filter_map(|(t, v)| {
            let index = u32::try_from(t).ok()?;
            Triangle::setup(index, [v[0], v[1], v[2]], width, height)
        })
        .collect()
}

/// Depth-test `triangles` into `targets`, one worker per band of `tile_rows` rows.
///
/// Every band walks the full triangle list in order and writes only its own rows, so the
/// result does not depend on the band size or thread count.
pub(crate) fn rasterize(targets: &mut RasterTargets, triangles: &[Triangle], tile_rows: usize) {
    let RasterTargets {
        width,
        depth,
        coverage,
        bary,
    } = targets;
    let width = *width;
    let rows = tile_rows.max(1);
    let band_len = width.saturating_mul(rows);

    depth
        .as_mut_slice()
        .par_chunks_mut(band_len)
        .zip(coverage.as_mut_slice().par_chunks_mut(band_len))
        .zip(bary.as_mut_slice().par_chunks_mut(band_len))
        .enumerate()
        .for_each(|(band, ((depth, coverage), bary))| {
            let y0 = band * rows;
            let y1 = y0 + depth.len() / width;
            for tri in triangles {
                let ys = tri.min_y.max(y0);
                let ye = (tri.max_y + 1).min(y1);
                for y in ys..ye {
                    let row = (y - y0) * width;
                    for x in tri.min_x..=tri.max_x {
                        let Some((weights, key)) = tri.sample(x, y) else {
                            continue;
                        };
                        let slot = row + x;
                        if key < 0.0 && key > depth[slot] {
                            depth[slot] = key;
                            coverage[slot] = Some(tri.index);
                            bary[slot] = weights;
                        }
                    }
                }
            }
        });
}

/// Inputs of the per-pixel shading pass for one model.
pub(crate) struct ShadeInputs<'a> {
    pub(crate) shader: &'a dyn ErasedShader,
    pub(crate) uniforms: &'a Uniforms<'a>,
    /// Varying blocks of every vertex, `varying_len` floats each.
    pub(crate) varyings: &'a [f32],
}

/// Interpolate varyings and run the fragment stage for every covered pixel.
///
/// Returns the number of pixels shaded.
pub(crate) fn shade(
    color: &mut [Vector3],
    targets: &RasterTargets,
    inputs: &ShadeInputs<'_>,
) -> usize {
    let len = inputs.shader.varying_len();
    color
        .par_iter_mut()
        .zip(targets.coverage.as_slice().par_iter())
        .zip(targets.bary.as_slice().par_iter())
        .map_init(
            || SmallVec::<[f32; 16]>::from_elem(0.0, len),
            |scratch, ((out, covered), w)| {
                let Some(tri) = *covered else {
                    return false;
                };
                let base = tri as usize * 3 * len;
                let v0 = &inputs.varyings[base..base + len];
                let v1 = &inputs.varyings[base + len..base + 2 * len];
                let v2 = &inputs.varyings[base + 2 * len..base + 3 * len];
                for (t, slot) in scratch.iter_mut().enumerate() {
                    *slot = w.x * v0[t] + w.y * v1[t] + w.z * v2[t];
                }
                let rgba = inputs.shader.fragment_flat(inputs.uniforms, &scratch[..]);
                *out = rgba.xyz().clamp(0.0, 1.0);
                true
            },
        )
        .filter(|&hit| hit)
        .count()
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
