use crate::{
    foundation::math::{Vector3, Vector4},
    shading::program::{AttributeReader, AttributeWriter, Attributes, Shader, Uniforms},
};

/// Unlit shader painting every covered pixel with one color.
///
/// Vertex layout: position only (3 floats).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolidShader {
    /// Output color.
    pub color: Vector4,
}

impl SolidShader {
    /// Shader returning `color` for every fragment.
    pub fn new(color: Vector4) -> Self {
        Self { color }
    }
}

impl Shader for SolidShader {
    type VertexIn = Vector3;
    type Varying = ();

    fn vertex(&self, uniforms: &Uniforms<'_>, input: &Vector3, _out: &mut ()) -> Vector4 {
        uniforms.model_to_clip(*input)
    }

    fn fragment(&self, _uniforms: &Uniforms<'_>, _input: &()) -> Vector4 {
        self.color
    }
}

/// Vertex layout consumed by [`VertexColorShader`]: position and RGB color (6 floats).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColorVertex {
    /// Model-space position.
    pub position: Vector3,
    /// Linear RGB color.
    pub color: Vector3,
}

impl Attributes for ColorVertex {
    const LEN: usize = 6;

    fn decode(src: &[f32]) -> Self {
        let mut r = AttributeReader::new(src);
        Self {
            position: r.vec3(),
            color: r.vec3(),
        }
    }

    fn encode(&self, dst: &mut [f32]) {
        AttributeWriter::new(dst).vec3(self.position).vec3(self.color);
    }
}

/// Unlit shader interpolating a per-vertex color.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VertexColorShader;

impl Shader for VertexColorShader {
    type VertexIn = ColorVertex;
    type Varying = Vector3;

    fn vertex(&self, uniforms: &Uniforms<'_>, input: &ColorVertex, out: &mut Vector3) -> Vector4 {
        *out = input.color;
        uniforms.model_to_clip(input.position)
    }

    fn fragment(&self, _uniforms: &Uniforms<'_>, input: &Vector3) -> Vector4 {
        input.extend(1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shading/basic.rs"]
mod tests;
