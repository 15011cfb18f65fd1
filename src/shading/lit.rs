use std::sync::Arc;

use crate::{
    assets::texture::{Sampling, Texture},
    foundation::math::{Vector2, Vector3, Vector4},
    scene::light::{Light, LightKind},
    shading::program::{AttributeReader, AttributeWriter, Attributes, Shader, Uniforms},
};

const SPECULAR_EXPONENT: i32 = 64;

/// Vertex layout consumed by [`LitShader`]: position, normal, texture coordinate (8 floats).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LitVertex {
    /// Model-space position.
    pub position: Vector3,
    /// Model-space normal.
    pub normal: Vector3,
    /// Texture coordinate.
    pub uv: Vector2,
}

impl Attributes for LitVertex {
    const LEN: usize = 8;

    fn decode(src: &[f32]) -> Self {
        let mut r = AttributeReader::new(src);
        Self {
            position: r.vec3(),
            normal: r.vec3(),
            uv: r.vec2(),
        }
    }

    fn encode(&self, dst: &mut [f32]) {
        AttributeWriter::new(dst)
            .vec3(self.position)
            .vec3(self.normal)
            .vec2(self.uv);
    }
}

/// Interpolated record produced by [`LitShader`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LitVarying {
    /// World-space position.
    pub world_position: Vector3,
    /// World-space normal (not normalized after interpolation).
    pub normal: Vector3,
    /// Texture coordinate.
    pub uv: Vector2,
}

impl Attributes for LitVarying {
    const LEN: usize = 8;

    fn decode(src: &[f32]) -> Self {
        let mut r = AttributeReader::new(src);
        Self {
            world_position: r.vec3(),
            normal: r.vec3(),
            uv: r.vec2(),
        }
    }

    fn encode(&self, dst: &mut [f32]) {
        AttributeWriter::new(dst)
            .vec3(self.world_position)
            .vec3(self.normal)
            .vec2(self.uv);
    }
}

/// Diffuse and specular terms of one light at one surface point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct LightTerms {
    pub(crate) diffuse: Vector3,
    pub(crate) highlight: Vector3,
}

/// Half-Lambert diffuse plus Blinn-Phong highlight for point and directional lights.
///
/// `normal` must be unit length. Point lights fall off with `intensity / max(d², 1)`;
/// directional lights use `intensity` unattenuated.
pub(crate) fn light_terms(
    light: &Light,
    eye: Vector3,
    position: Vector3,
    normal: Vector3,
) -> LightTerms {
    let (to_light, attenuation) = match light.kind {
        LightKind::Point => {
            let offset = light.position - position;
            let dist_sq = offset.length_squared().max(1.0);
            (offset.normalize(), light.intensity / dist_sq)
        }
        LightKind::Directional | LightKind::Area => {
            ((-light.direction).normalize(), light.intensity)
        }
    };

    let to_eye = (eye - position).normalize();
    let halfway = (to_eye + to_light).normalize();

    let lambert = to_light.dot(normal).max(0.0) * 0.5 + 0.5;
    let spec = halfway.dot(normal).max(0.0).powi(SPECULAR_EXPONENT);
    LightTerms {
        diffuse: light.color * (lambert * attenuation),
        highlight: light.color * (spec * attenuation),
    }
}

/// Textured multi-light shader with half-Lambert diffuse and a specular highlight.
#[derive(Clone, Debug)]
pub struct LitShader {
    texture: Arc<Texture>,
    smoothness: f32,
    sampling: Sampling,
}

impl LitShader {
    /// Shader sampling `texture`, smoothness `0.5`, bilinear filtering.
    pub fn new(texture: Arc<Texture>) -> Self {
        Self {
            texture,
            smoothness: 0.5,
            sampling: Sampling::Bilinear,
        }
    }

    /// Set the material smoothness, clamped to `[0, 1]`.
    pub fn with_smoothness(mut self, smoothness: f32) -> Self {
        self.smoothness = if smoothness.is_nan() {
            0.0
        } else {
            smoothness.clamp(0.0, 1.0)
        };
        self
    }

    /// Set the texture filtering mode.
    pub fn with_sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Material smoothness.
    pub fn smoothness(&self) -> f32 {
        self.smoothness
    }

    /// Contribution of one light at a surface point with texture color `albedo`.
    pub(crate) fn contribution(
        &self,
        light: &Light,
        eye: Vector3,
        position: Vector3,
        normal: Vector3,
        albedo: Vector3,
    ) -> Vector3 {
        if light.intensity == 0.0 {
            return Vector3::ZERO;
        }
        if light.kind == LightKind::Area {
            return light.color * light.intensity * albedo * self.smoothness;
        }
        let terms = light_terms(light, eye, position, normal);
        terms.diffuse * albedo * self.smoothness + terms.highlight
    }
}

impl Shader for LitShader {
    type VertexIn = LitVertex;
    type Varying = LitVarying;

    fn vertex(&self, uniforms: &Uniforms<'_>, input: &LitVertex, out: &mut LitVarying) -> Vector4 {
        out.world_position = uniforms.model.transform_point(input.position);
        out.normal = uniforms.model.transform_normal(input.normal);
        out.uv = input.uv;
        uniforms.model_to_clip(input.position)
    }

    fn fragment(&self, uniforms: &Uniforms<'_>, input: &LitVarying) -> Vector4 {
        let albedo = self.texture.sample(input.uv, self.sampling).xyz();
        let normal = input.normal.normalize();
        let eye = uniforms.camera.position;

        let mut color = Vector3::ZERO;
        for light in uniforms.lights {
            color += self.contribution(light, eye, input.world_position, normal, albedo);
        }
        color.extend(1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shading/lit.rs"]
mod tests;
