//! `miko` is a CPU 3D rendering pipeline.
//!
//! An [`Engine`] owns fixed-size frame buffers and renders a scene made of a [`Camera`], up to
//! [`MAX_LIGHTS`] [`Light`]s and any number of [`Model`]s. Each model pairs a flat vertex buffer
//! with a [`Shader`]: a typed vertex stage and fragment stage over fixed-layout
//! [`Attributes`] records. A frame runs three parallel phases per model (vertex, tiled
//! rasterization with a depth test, per-pixel shading) and yields a [`Frame`] of linear RGB
//! pixels in `[0, 1]`.
//!
//! Vectors multiply matrices on the right (`projection * view * model * point`) and camera
//! space looks down `-z`.
#![forbid(unsafe_code)]

mod assets;
mod foundation;
mod render;
mod scene;
mod shading;

pub use assets::texture::{Sampling, Texture};
pub use foundation::arena::Arena;
pub use foundation::error::{MikoError, MikoResult};
pub use foundation::math::{Matrix4x4, Vector2, Vector3, Vector4, compute_barycentric};
pub use render::engine::{Engine, EngineOpts};
pub use render::frame::Frame;
pub use scene::camera::{Camera, Projection};
pub use scene::light::{Light, LightKind, MAX_LIGHTS};
pub use scene::model::Model;
pub use scene::primitives;
pub use shading::basic::{ColorVertex, SolidShader, VertexColorShader};
pub use shading::lit::{LitShader, LitVarying, LitVertex};
pub use shading::program::{AttributeReader, AttributeWriter, Attributes, Shader, Uniforms};
