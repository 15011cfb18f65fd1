use super::*;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct PosUv {
    position: Vector3,
    uv: Vector2,
}

impl Attributes for PosUv {
    const LEN: usize = 5;

    fn decode(src: &[f32]) -> Self {
        let mut r = AttributeReader::new(src);
        Self {
            position: r.vec3(),
            uv: r.vec2(),
        }
    }

    fn encode(&self, dst: &mut [f32]) {
        AttributeWriter::new(dst).vec3(self.position).vec2(self.uv);
    }
}

struct PassThrough;

impl Shader for PassThrough {
    type VertexIn = PosUv;
    type Varying = Vector2;

    fn vertex(&self, uniforms: &Uniforms<'_>, input: &PosUv, out: &mut Vector2) -> Vector4 {
        *out = input.uv;
        uniforms.model_to_clip(input.position)
    }

    fn fragment(&self, _uniforms: &Uniforms<'_>, input: &Vector2) -> Vector4 {
        Vector4::new(input.x, input.y, 0.0, 1.0)
    }
}

fn uniforms(camera: &Camera) -> Uniforms<'_> {
    Uniforms::new(
        camera,
        &[],
        Matrix4x4::translation(Vector3::new(1.0, 0.0, 0.0)),
        Matrix4x4::IDENTITY,
        Matrix4x4::scale(Vector3::splat(2.0)),
    )
}

#[test]
fn erased_shader_reports_layout() {
    let s: &dyn ErasedShader = &PassThrough;
    assert_eq!(s.vertex_in_len(), 5);
    assert_eq!(s.varying_len(), 2);
}

#[test]
fn erased_vertex_decodes_and_encodes() {
    let camera = Camera::default();
    let u = uniforms(&camera);
    let s: &dyn ErasedShader = &PassThrough;

    let mut out = [0.0f32; 2];
    let clip = s.vertex_flat(&u, &[1.0, 2.0, 3.0, 0.25, 0.75], &mut out);
    assert_eq!(out, [0.25, 0.75]);
    // projection * view * model applied right-to-left.
    assert_eq!(clip, Vector4::new(4.0, 4.0, 6.0, 1.0));

    let color = s.fragment_flat(&u, &out);
    assert_eq!(color, Vector4::new(0.25, 0.75, 0.0, 1.0));
}

#[test]
#[should_panic(expected = "vertex input block length")]
fn erased_vertex_rejects_short_block() {
    let camera = Camera::default();
    let u = uniforms(&camera);
    let mut out = [0.0f32; 2];
    PassThrough.vertex_flat(&u, &[1.0, 2.0], &mut out);
}

#[test]
#[should_panic(expected = "shorter than its declared layout")]
fn reader_panics_when_exhausted() {
    let mut r = AttributeReader::new(&[1.0, 2.0]);
    let _ = r.vec3();
}

#[test]
fn unit_record_is_empty() {
    assert_eq!(<() as Attributes>::LEN, 0);
    ().encode(&mut []);
}
