use crate::{
    foundation::math::{Matrix4x4, Vector2, Vector3, Vector4},
    scene::{camera::Camera, light::Light},
};

/// Fixed-layout attribute record with a flat `f32` encoding.
///
/// Model buffers store one encoded `VertexIn` record per vertex; the engine stores one encoded
/// `Varying` record per vertex and rebuilds a per-pixel record as the barycentric blend of three
/// of them. `decode` receives exactly [`Attributes::LEN`] floats and `encode` must write exactly
/// that many.
pub trait Attributes: Copy + Default + Send + Sync {
    /// Number of `f32` values in the encoded record.
    const LEN: usize;

    /// Rebuild a record from its flat encoding.
    fn decode(src: &[f32]) -> Self;

    /// Write the flat encoding into `dst`.
    fn encode(&self, dst: &mut [f32]);
}

/// Sequential, bounds-checked reader over a flat attribute block.
pub struct AttributeReader<'a> {
    src: &'a [f32],
}

impl<'a> AttributeReader<'a> {
    /// Start reading at the beginning of `src`.
    pub fn new(src: &'a [f32]) -> Self {
        Self { src }
    }

    /// Read one float. Panics when the block is exhausted.
    pub fn f32(&mut self) -> f32 {
        let (first, rest) = self
            .src
            .split_first()
            .expect("attribute block shorter than its declared layout");
        self.src = rest;
        *first
    }

    /// Read two floats.
    pub fn vec2(&mut self) -> Vector2 {
        Vector2::new(self.f32(), self.f32())
    }

    /// Read three floats.
    pub fn vec3(&mut self) -> Vector3 {
        Vector3::new(self.f32(), self.f32(), self.f32())
    }

    /// Read four floats.
    pub fn vec4(&mut self) -> Vector4 {
        Vector4::new(self.f32(), self.f32(), self.f32(), self.f32())
    }
}

/// Sequential, bounds-checked writer over a flat attribute block.
pub struct AttributeWriter<'a> {
    dst: &'a mut [f32],
    pos: usize,
}

impl<'a> AttributeWriter<'a> {
    /// Start writing at the beginning of `dst`.
    pub fn new(dst: &'a mut [f32]) -> Self {
        Self { dst, pos: 0 }
    }

    /// Write one float. Panics when the block is full.
    pub fn f32(&mut self, v: f32) -> &mut Self {
        let slot = self
            .dst
            .get_mut(self.pos)
            .expect("attribute block shorter than its declared layout");
        *slot = v;
        self.pos += 1;
        self
    }

    /// Write two floats.
    pub fn vec2(&mut self, v: Vector2) -> &mut Self {
        self.f32(v.x).f32(v.y)
    }

    /// Write three floats.
    pub fn vec3(&mut self, v: Vector3) -> &mut Self {
        self.f32(v.x).f32(v.y).f32(v.z)
    }

    /// Write four floats.
    pub fn vec4(&mut self, v: Vector4) -> &mut Self {
        self.f32(v.x).f32(v.y).f32(v.z).f32(v.w)
    }
}

impl Attributes for () {
    const LEN: usize = 0;

    fn decode(_src: &[f32]) -> Self {}

    fn encode(&self, _dst: &mut [f32]) {}
}

impl Attributes for Vector2 {
    const LEN: usize = 2;

    fn decode(src: &[f32]) -> Self {
        AttributeReader::new(src).vec2()
    }

    fn encode(&self, dst: &mut [f32]) {
        AttributeWriter::new(dst).vec2(*self);
    }
}

impl Attributes for Vector3 {
    const LEN: usize = 3;

    fn decode(src: &[f32]) -> Self {
        AttributeReader::new(src).vec3()
    }

    fn encode(&self, dst: &mut [f32]) {
        AttributeWriter::new(dst).vec3(*self);
    }
}

impl Attributes for Vector4 {
    const LEN: usize = 4;

    fn decode(src: &[f32]) -> Self {
        AttributeReader::new(src).vec4()
    }

    fn encode(&self, dst: &mut [f32]) {
        AttributeWriter::new(dst).vec4(*self);
    }
}

/// Per-draw uniform state, read-only for the duration of one model's render pass.
#[derive(Clone, Copy, Debug)]
pub struct Uniforms<'a> {
    /// Model-to-world transform.
    pub model: Matrix4x4,
    /// World-to-camera transform.
    pub view: Matrix4x4,
    /// Camera-to-clip transform.
    pub projection: Matrix4x4,
    /// Active camera.
    pub camera: &'a Camera,
    /// Active lights, at most [`MAX_LIGHTS`](crate::MAX_LIGHTS).
    pub lights: &'a [Light],
    mvp: Matrix4x4,
}

impl<'a> Uniforms<'a> {
    /// Bundle uniforms and precompute `projection * view * model`.
    pub fn new(
        camera: &'a Camera,
        lights: &'a [Light],
        model: Matrix4x4,
        view: Matrix4x4,
        projection: Matrix4x4,
    ) -> Self {
        Self {
            model,
            view,
            projection,
            camera,
            lights,
            mvp: projection * view * model,
        }
    }

    /// Transform a model-space position to clip space.
    pub fn model_to_clip(&self, p: Vector3) -> Vector4 {
        self.mvp * p.extend(1.0)
    }
}

/// Programmable vertex/fragment stage pair.
///
/// Both stages are pure functions of their input record and the uniforms. `vertex` runs once
/// per vertex and returns the clip-space position; `fragment` runs once per covered pixel and
/// returns an RGBA color that the engine clamps to `[0, 1]`.
pub trait Shader: Send + Sync {
    /// Per-vertex input record read from the model buffer.
    type VertexIn: Attributes;
    /// Record produced per vertex and interpolated per pixel.
    type Varying: Attributes;

    /// Vertex stage.
    fn vertex(
        &self,
        uniforms: &Uniforms<'_>,
        input: &Self::VertexIn,
        out: &mut Self::Varying,
    ) -> Vector4;

    /// Fragment stage.
    fn fragment(&self, uniforms: &Uniforms<'_>, input: &Self::Varying) -> Vector4;
}

/// Object-safe view of a [`Shader`] over flat attribute blocks.
pub(crate) trait ErasedShader: Send + Sync {
    fn vertex_in_len(&self) -> usize;

    fn varying_len(&self) -> usize;

    fn vertex_flat(&self, uniforms: &Uniforms<'_>, input: &[f32], out: &mut [f32]) -> Vector4;

    fn fragment_flat(&self, uniforms: &Uniforms<'_>, input: &[f32]) -> Vector4;
}

impl<S: Shader> ErasedShader for S {
    fn vertex_in_len(&self) -> usize {
        S::VertexIn::LEN
    }

    fn varying_len(&self) -> usize {
        S::Varying::LEN
    }

    fn vertex_flat(&self, uniforms: &Uniforms<'_>, input: &[f32], out: &mut [f32]) -> Vector4 {
        assert_eq!(input.len(), S::VertexIn::LEN, "vertex input block length");
        assert_eq!(out.len(), S::Varying::LEN, "varying block length");
        let vin = S::VertexIn::decode(input);
        let mut varying = S::Varying::default();
        let clip = self.vertex(uniforms, &vin, &mut varying);
        varying.encode(out);
        clip
    }

    fn fragment_flat(&self, uniforms: &Uniforms<'_>, input: &[f32]) -> Vector4 {
        assert_eq!(input.len(), S::Varying::LEN, "varying block length");
        self.fragment(uniforms, &S::Varying::decode(input))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shading/program.rs"]
mod tests;
