use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{
    foundation::{
        arena::Arena,
        error::{MikoError, MikoResult},
        math::{Matrix4x4, Vector3, Vector4},
    },
    render::{
        frame::Frame,
        raster::{self, RasterTargets, ScreenVertex, ShadeInputs},
    },
    scene::{
        camera::Camera,
        light::{Light, MAX_LIGHTS},
        model::Model,
    },
    shading::program::{ErasedShader, Uniforms},
};

/// Engine construction options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineOpts {
    /// Color every pixel is reset to at the start of a frame. Alpha is ignored.
    pub background: Vector4,
    /// Worker threads of the engine's pool. `None` uses rayon's default; `Some(0)` is rejected.
    pub threads: Option<usize>,
    /// Rows per rasterization band, clamped to `[1, height]`.
    pub tile_rows: usize,
}

impl Default for EngineOpts {
    fn default() -> Self {
        Self {
            background: Vector4::new(0.0, 0.0, 0.0, 1.0),
            threads: None,
            tile_rows: 16,
        }
    }
}

/// CPU rendering engine owning a fixed-size set of frame buffers.
///
/// Configure a camera, up to [`MAX_LIGHTS`] lights and any number of models, then call
/// [`Engine::get_frame`]. Models draw in insertion order; visibility is resolved by the
/// per-pixel depth test alone.
///
/// ```no_run
/// use std::sync::Arc;
/// use miko::{Camera, Engine, Light, LitShader, Model, Texture, Vector3, Vector4, primitives};
///
/// # fn main() -> miko::MikoResult<()> {
/// let shader = LitShader::new(Arc::new(Texture::solid(Vector4::ONE)));
/// let mut engine = Engine::new(240, 320)?;
/// engine
///     .set_camera(Camera::default())?
///     .add_light(Light::point(Vector3::new(2.0, 2.0, 2.0), Vector3::ONE, 6.0))?
///     .add_model(Model::new(primitives::cube(), shader)?);
/// let frame = engine.get_frame()?;
/// assert_eq!(frame.width(), 320);
/// # Ok(())
/// # }
/// ```
pub struct Engine {
    width: usize,
    height: usize,
    background: Vector4,
    tile_rows: usize,
    pool: rayon::ThreadPool,
    camera: Option<Camera>,
    view: Matrix4x4,
    projection: Matrix4x4,
    viewport: Matrix4x4,
    lights: SmallVec<[Light; MAX_LIGHTS]>,
    models: Vec<Model>,
    color: Arena<Vector3>,
    targets: RasterTargets,
}

impl Engine {
    /// Engine rendering `height` rows of `width` pixels with default options.
    pub fn new(height: usize, width: usize) -> MikoResult<Self> {
        Self::with_opts(height, width, EngineOpts::default())
    }

    /// Engine rendering `height` rows of `width` pixels.
    pub fn with_opts(height: usize, width: usize, opts: EngineOpts) -> MikoResult<Self> {
        if width == 0 || height == 0 {
            return Err(MikoError::validation(format!(
                "engine size must be non-zero (got {width}x{height})"
            )));
        }
        let len = width
            .checked_mul(height)
            .ok_or_else(|| MikoError::validation("engine size overflows usize"))?;
        let pool = build_thread_pool(opts.threads)?;

        Ok(Self {
            width,
            height,
            background: opts.background,
            tile_rows: opts.tile_rows.clamp(1, height),
            pool,
            camera: None,
            view: Matrix4x4::IDENTITY,
            projection: Matrix4x4::IDENTITY,
            viewport: viewport_matrix(width, height),
            lights: SmallVec::new(),
            models: Vec::new(),
            color: Arena::filled(len, background_rgb(opts.background)),
            targets: RasterTargets::new(width, height),
        })
    }

    /// Frame width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Active camera, if one has been set.
    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    /// Active lights in insertion order.
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Models in draw order.
    pub fn models(&self) -> &[Model] {
        &self.models
    }

    /// Validate `camera` and derive the view and projection transforms.
    ///
    /// On error nothing changes and the previous camera stays in effect.
    pub fn set_camera(&mut self, camera: Camera) -> MikoResult<&mut Self> {
        camera.validate()?;
        self.view = camera.view_matrix();
        self.projection = camera.projection_matrix();
        self.camera = Some(camera);
        Ok(self)
    }

    /// Add a light. Fails once [`MAX_LIGHTS`] are active or when the intensity is negative or
    /// not finite.
    pub fn add_light(&mut self, light: Light) -> MikoResult<&mut Self> {
        if self.lights.len() >= MAX_LIGHTS {
            return Err(MikoError::validation(format!(
                "at most {MAX_LIGHTS} lights can be active"
            )));
        }
        if !(light.intensity.is_finite() && light.intensity >= 0.0) {
            return Err(MikoError::validation(format!(
                "light intensity must be finite and >= 0 (got {})",
                light.intensity
            )));
        }
        self.lights.push(light);
        Ok(self)
    }

    /// Remove every light.
    pub fn clear_lights(&mut self) -> &mut Self {
        self.lights.clear();
        self
    }

    /// Append a model to the draw list.
    pub fn add_model(&mut self, model: Model) -> &mut Self {
        self.models.push(model);
        self
    }

    /// Remove every model.
    pub fn clear_models(&mut self) -> &mut Self {
        self.models.clear();
        self
    }

    /// Change the color pixels are reset to at the start of each frame.
    pub fn set_background(&mut self, color: Vector4) -> &mut Self {
        self.background = color;
        self
    }

    /// Render every model and return a view of the color buffer.
    ///
    /// Fails with a configuration error when no camera has been set. Models without a complete
    /// triangle are skipped.
    #[tracing::instrument(
        skip(self),
        fields(width = self.width, height = self.height, models = self.models.len())
    )]
    pub fn get_frame(&mut self) -> MikoResult<Frame<'_>> {
        let camera = self
            .camera
            .ok_or_else(|| MikoError::configuration("no camera set"))?;

        self.color.fill(background_rgb(self.background));
        self.targets.reset_depth();

        for (index, model) in self.models.iter().enumerate() {
            let triangles = model.triangle_count();
            if triangles == 0 {
                tracing::debug!(model = index, "skipping model without a complete triangle");
                continue;
            }
            let uniforms = Uniforms::new(
                &camera,
                &self.lights,
                model.transform(),
                self.view,
                self.projection,
            );
            let shader = model.shader();
            let vertices = triangles * 3;
            let stride = shader.vertex_in_len();
            let data = &model.data()[..vertices * stride];

            let (tris, covered) = self.pool.install(|| {
                let mut screen = Arena::<ScreenVertex>::new(vertices);
                let mut varyings = vec![0.0f32; vertices * shader.varying_len()];
                vertex_stage(
                    &VertexStage {
                        shader,
                        uniforms: &uniforms,
                        camera: &camera,
                        viewport: self.viewport,
                        stride,
                    },
                    data,
                    screen.as_mut_slice(),
                    &mut varyings,
                );

                self.targets.reset_coverage();
                let tris = raster::setup_triangles(screen.as_slice(), self.width, self.height);
                raster::rasterize(&mut self.targets, &tris, self.tile_rows);
                screen.release();

                let covered = raster::shade(
                    self.color.as_mut_slice(),
                    &self.targets,
                    &ShadeInputs {
                        shader,
                        uniforms: &uniforms,
                        varyings: &varyings,
                    },
                );
                (tris.len(), covered)
            });
            tracing::debug!(
                model = index,
                vertices,
                triangles = tris,
                covered,
                "model rendered"
            );
        }

        Ok(Frame::new(self.width, self.height, self.color.as_slice()))
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("threads", &self.pool.current_num_threads())
            .field("camera", &self.camera)
            .field("lights", &self.lights.len())
            .field("models", &self.models.len())
            .finish_non_exhaustive()
    }
}

struct VertexStage<'a> {
    shader: &'a dyn ErasedShader,
    uniforms: &'a Uniforms<'a>,
    camera: &'a Camera,
    viewport: Matrix4x4,
    stride: usize,
}

impl VertexStage<'_> {
    fn project(&self, clip: Vector4) -> ScreenVertex {
        let p = self.viewport * clip;
        ScreenVertex {
            position: Vector4::new(p.x / p.w, p.y / p.w, p.z / p.w, p.w),
            depth: self.camera.view_depth(clip),
        }
    }
}

// One task per vertex; each writes only its own screen slot and varying block.
fn vertex_stage(
    stage: &VertexStage<'_>,
    data: &[f32],
    screen: &mut [ScreenVertex],
    varyings: &mut [f32],
) {
    let len = stage.shader.varying_len();
    let inputs = data.par_chunks_exact(stage.stride).zip(screen.par_iter_mut());
    if len == 0 {
        inputs.for_each(|(input, out)| {
            *out = stage.project(stage.shader.vertex_flat(stage.uniforms, input, &mut []));
        });
    } else {
        inputs
            .zip(varyings.par_chunks_exact_mut(len))
            .for_each(|((input, out), varying)| {
                *out = stage.project(stage.shader.vertex_flat(stage.uniforms, input, varying));
            });
    }
}

/// Map NDC `[-1, 1]` to pixel space `[0, width] x [0, height]` with row 0 at the top.
fn viewport_matrix(width: usize, height: usize) -> Matrix4x4 {
    let (w, h) = (width as f32, height as f32);
    Matrix4x4::from_rows([
        [w / 2.0, 0.0, 0.0, w / 2.0],
        [0.0, -h / 2.0, 0.0, h / 2.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

fn background_rgb(color: Vector4) -> Vector3 {
    color.xyz().clamp(0.0, 1.0)
}

fn build_thread_pool(threads: Option<usize>) -> MikoResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(MikoError::validation(
            "engine option 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| MikoError::configuration(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/engine.rs"]
mod tests;
