use super::*;
use crate::{foundation::math::Matrix4x4, scene::camera::Camera};

#[test]
fn solid_shader_ignores_inputs() {
    let camera = Camera::default();
    let u = Uniforms::new(
        &camera,
        &[],
        Matrix4x4::translation(Vector3::new(0.0, 0.0, -1.0)),
        Matrix4x4::IDENTITY,
        Matrix4x4::IDENTITY,
    );
    let shader = SolidShader::new(Vector4::new(0.1, 0.2, 0.3, 1.0));
    let clip = shader.vertex(&u, &Vector3::new(1.0, 2.0, 3.0), &mut ());
    assert_eq!(clip, Vector4::new(1.0, 2.0, 2.0, 1.0));
    assert_eq!(shader.fragment(&u, &()), Vector4::new(0.1, 0.2, 0.3, 1.0));
}

#[test]
fn vertex_color_passes_color_through() {
    let camera = Camera::default();
    let u = Uniforms::new(
        &camera,
        &[],
        Matrix4x4::IDENTITY,
        Matrix4x4::IDENTITY,
        Matrix4x4::IDENTITY,
    );
    let input = ColorVertex::decode(&[1.0, 2.0, 3.0, 0.25, 0.5, 0.75]);
    assert_eq!(input.color, Vector3::new(0.25, 0.5, 0.75));

    let mut out = Vector3::ZERO;
    let clip = VertexColorShader.vertex(&u, &input, &mut out);
    assert_eq!(clip, Vector4::new(1.0, 2.0, 3.0, 1.0));
    assert_eq!(VertexColorShader.fragment(&u, &out), Vector4::new(0.25, 0.5, 0.75, 1.0));
}
