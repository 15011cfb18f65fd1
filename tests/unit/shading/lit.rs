use super::*;
use crate::{foundation::math::Matrix4x4, scene::camera::Camera};

fn approx3(a: Vector3, b: Vector3) -> bool {
    (a - b).length() <= 1e-5
}

fn white_shader() -> LitShader {
    LitShader::new(Arc::new(Texture::solid(Vector4::ONE)))
}

#[test]
fn point_light_diffuse_is_inverse_square() {
    let color = Vector3::new(1.0, 0.5, 0.25);
    let intensity = 8.0;
    let light = Light::point(Vector3::new(0.0, 0.0, 2.0), color, intensity);

    let terms = light_terms(&light, Vector3::new(0.0, 0.0, 5.0), Vector3::ZERO, Vector3::UNIT_Z);
    // dot(N, L) = 1, d² = 4.
    assert!(approx3(terms.diffuse, color * (1.0 * (intensity / 4.0))));
}

#[test]
fn point_light_closer_than_unit_distance_is_not_amplified() {
    let light = Light::point(Vector3::new(0.0, 0.0, 0.5), Vector3::ONE, 3.0);
    let terms = light_terms(&light, Vector3::new(0.0, 0.0, 5.0), Vector3::ZERO, Vector3::UNIT_Z);
    assert!(approx3(terms.diffuse, Vector3::splat(3.0)));
}

#[test]
fn back_facing_surface_gets_half_lambert_floor() {
    let light = Light::point(Vector3::new(0.0, 0.0, 2.0), Vector3::ONE, 4.0);
    let terms = light_terms(&light, Vector3::new(0.0, 0.0, 5.0), Vector3::ZERO, -Vector3::UNIT_Z);
    assert!(approx3(terms.diffuse, Vector3::splat(0.5)));
    assert!(approx3(terms.highlight, Vector3::ZERO));
}

#[test]
fn directional_light_has_no_falloff_and_full_highlight_head_on() {
    let light = Light::directional(Vector3::new(0.0, 0.0, -1.0), Vector3::ONE, 2.0);
    let terms = light_terms(&light, Vector3::new(0.0, 0.0, 100.0), Vector3::ZERO, Vector3::UNIT_Z);
    assert!(approx3(terms.diffuse, Vector3::splat(2.0)));
    assert!(approx3(terms.highlight, Vector3::splat(2.0)));
}

#[test]
fn zero_intensity_contributes_nothing() {
    let shader = white_shader();
    for light in [
        Light::point(Vector3::UNIT_Z, Vector3::ONE, 0.0),
        Light::directional(-Vector3::UNIT_Z, Vector3::ONE, 0.0),
        Light::area(Vector3::ONE, 0.0),
    ] {
        let c = shader.contribution(
            &light,
            Vector3::UNIT_Z,
            Vector3::ZERO,
            Vector3::UNIT_Z,
            Vector3::ONE,
        );
        assert_eq!(c, Vector3::ZERO);
    }
}

#[test]
fn area_light_is_a_tinted_fill_without_highlight() {
    let shader = white_shader().with_smoothness(0.5);
    let light = Light::area(Vector3::new(1.0, 0.0, 0.5), 0.8);
    let albedo = Vector3::new(0.5, 1.0, 1.0);
    let c = shader.contribution(&light, Vector3::UNIT_Z, Vector3::ZERO, Vector3::UNIT_Z, albedo);
    assert!(approx3(c, Vector3::new(0.2, 0.0, 0.2)));
}

#[test]
fn smoothness_is_clamped() {
    assert_eq!(white_shader().with_smoothness(3.0).smoothness(), 1.0);
    assert_eq!(white_shader().with_smoothness(-1.0).smoothness(), 0.0);
    assert_eq!(white_shader().with_smoothness(f32::NAN).smoothness(), 0.0);
}

#[test]
fn fragment_sums_all_lights() {
    let shader = white_shader().with_smoothness(1.0);
    let camera = Camera::default();
    let lights = [Light::area(Vector3::ONE, 0.25), Light::area(Vector3::ONE, 0.5)];
    let u = Uniforms::new(
        &camera,
        &lights,
        Matrix4x4::IDENTITY,
        Matrix4x4::IDENTITY,
        Matrix4x4::IDENTITY,
    );
    let input = LitVarying {
        world_position: Vector3::ZERO,
        normal: Vector3::UNIT_Z * 3.0,
        uv: Vector2::new(0.5, 0.5),
    };
    let c = shader.fragment(&u, &input);
    assert!(approx3(c.xyz(), Vector3::splat(0.75)));
    assert_eq!(c.w, 1.0);
}

#[test]
fn vertex_outputs_world_space_varyings() {
    let shader = white_shader();
    let camera = Camera::default();
    let model = Matrix4x4::translation(Vector3::new(0.0, 2.0, 0.0));
    let u = Uniforms::new(&camera, &[], model, Matrix4x4::IDENTITY, Matrix4x4::IDENTITY);

    let input = LitVertex {
        position: Vector3::new(1.0, 0.0, 0.0),
        normal: Vector3::UNIT_Y,
        uv: Vector2::new(0.1, 0.9),
    };
    let mut out = LitVarying::default();
    let clip = shader.vertex(&u, &input, &mut out);

    assert_eq!(out.world_position, Vector3::new(1.0, 2.0, 0.0));
    assert_eq!(out.normal, Vector3::UNIT_Y);
    assert_eq!(out.uv, input.uv);
    assert_eq!(clip, Vector4::new(1.0, 2.0, 0.0, 1.0));
}

#[test]
fn lit_records_roundtrip_through_flat_layout() {
    let v = LitVertex {
        position: Vector3::new(1.0, 2.0, 3.0),
        normal: Vector3::new(4.0, 5.0, 6.0),
        uv: Vector2::new(7.0, 8.0),
    };
    let mut flat = [0.0f32; LitVertex::LEN];
    v.encode(&mut flat);
    assert_eq!(flat, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    assert_eq!(LitVertex::decode(&flat), v);
}
