use std::{fmt, sync::Arc};

use crate::{
    foundation::{
        error::{MikoError, MikoResult},
        math::Matrix4x4,
    },
    shading::program::{ErasedShader, Shader},
};

/// Non-indexed triangle list with a transform and the shader that draws it.
///
/// `data` holds one encoded `VertexIn` record per vertex; every three consecutive vertices form
/// a triangle. Cloning is cheap: the buffer and shader are shared.
#[derive(Clone)]
pub struct Model {
    data: Arc<[f32]>,
    transform: Matrix4x4,
    shader: Arc<dyn ErasedShader>,
}

impl Model {
    /// Model drawn by `shader`.
    ///
    /// Fails when the buffer length is not a multiple of the shader's vertex stride. An empty
    /// buffer is accepted; such a model is skipped at render time.
    pub fn new<S: Shader + 'static>(data: impl Into<Arc<[f32]>>, shader: S) -> MikoResult<Self> {
        Self::with_shared_shader(data, Arc::new(shader))
    }

    /// Model drawn by a shader shared with other models.
    pub fn with_shared_shader<S: Shader + 'static>(
        data: impl Into<Arc<[f32]>>,
        shader: Arc<S>,
    ) -> MikoResult<Self> {
        let data = data.into();
        let stride = shader.vertex_in_len();
        if stride == 0 {
            return Err(MikoError::validation(
                "shader vertex input layout must not be empty",
            ));
        }
        if data.len() % stride != 0 {
            return Err(MikoError::validation(format!(
                "model buffer length {} is not a multiple of vertex stride {stride}",
                data.len()
            )));
        }
        if data.len() / stride / 3 > u32::MAX as usize {
            return Err(MikoError::validation(
                "model has more triangles than a coverage index can address",
            ));
        }
        Ok(Self {
            data,
            transform: Matrix4x4::IDENTITY,
            shader,
        })
    }

    /// Replace the model-to-world transform.
    pub fn with_transform(mut self, transform: Matrix4x4) -> Self {
        self.transform = transform;
        self
    }

    /// Model-to-world transform.
    pub fn transform(&self) -> Matrix4x4 {
        self.transform
    }

    /// Flat vertex buffer.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Number of vertices in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.data.len() / self.shader.vertex_in_len()
    }

    /// Number of complete triangles; trailing vertices are ignored.
    pub fn triangle_count(&self) -> usize {
        self.vertex_count() / 3
    }

    pub(crate) fn shader(&self) -> &dyn ErasedShader {
        self.shader.as_ref()
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("vertices", &self.vertex_count())
            .field("stride", &self.shader.vertex_in_len())
            .field("transform", &self.transform)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
