//! Procedural vertex buffers in [`LitVertex`] layout.
//!
//! Both meshes are centered on the origin with counter-clockwise front faces, as seen from
//! outside.

use crate::{
    foundation::math::{Vector2, Vector3},
    shading::{lit::LitVertex, program::Attributes},
};

/// Unit quad in the XY plane facing `+z`, two triangles.
pub fn plane() -> Vec<f32> {
    let mut out = Vec::with_capacity(6 * LitVertex::LEN);
    push_quad(&mut out, Vector3::ZERO, Vector3::UNIT_Z, Vector3::UNIT_X, Vector3::UNIT_Y);
    out
}

/// Unit cube (edge length 1), 12 triangles with per-face normals and a full `[0,1]` uv square
/// on every face.
pub fn cube() -> Vec<f32> {
    let faces = [
        (Vector3::UNIT_Z, Vector3::UNIT_X, Vector3::UNIT_Y),
        (-Vector3::UNIT_Z, -Vector3::UNIT_X, Vector3::UNIT_Y),
        (Vector3::UNIT_X, -Vector3::UNIT_Z, Vector3::UNIT_Y),
        (-Vector3::UNIT_X, Vector3::UNIT_Z, Vector3::UNIT_Y),
        (Vector3::UNIT_Y, Vector3::UNIT_X, -Vector3::UNIT_Z),
        (-Vector3::UNIT_Y, Vector3::UNIT_X, Vector3::UNIT_Z),
    ];
    let mut out = Vec::with_capacity(faces.len() * 6 * LitVertex::LEN);
    for (normal, right, up) in faces {
        push_quad(&mut out, normal * 0.5, normal, right, up);
    }
    out
}

// Unit square around `center`; `right x up == normal`.
fn push_quad(out: &mut Vec<f32>, center: Vector3, normal: Vector3, right: Vector3, up: Vector3) {
    let corner = |u: f32, v: f32| LitVertex {
        position: center + right * (u - 0.5) + up * (v - 0.5),
        normal,
        uv: Vector2::new(u, v),
    };
    let quad = [
        corner(0.0, 0.0),
        corner(1.0, 0.0),
        corner(1.0, 1.0),
        corner(0.0, 0.0),
        corner(1.0, 1.0),
        corner(0.0, 1.0),
    ];
    for v in quad {
        let start = out.len();
        out.resize(start + LitVertex::LEN, 0.0);
        v.encode(&mut out[start..]);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/primitives.rs"]
mod tests;
