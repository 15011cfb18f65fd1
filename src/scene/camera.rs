use serde::{Deserialize, Serialize};

use crate::foundation::{
    error::{MikoError, MikoResult},
    math::{Matrix4x4, Vector3, Vector4},
};

/// Projection applied after the view transform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    /// Parallel projection of a `width x height` view volume.
    Orthographic,
    /// Pinhole projection; the view volume is `width x height` at the near plane.
    #[default]
    Perspective,
}

/// Look-at camera.
///
/// Camera space is right-handed with the camera looking down `-z`, so visible geometry has a
/// negative view depth.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Eye position in world space.
    pub position: Vector3,
    /// Approximate up direction.
    pub up: Vector3,
    /// Point the camera looks at (not a direction).
    pub target: Vector3,
    /// Near plane distance, `0 < near < far`.
    pub near: f32,
    /// Far plane distance.
    pub far: f32,
    /// View volume width in world units.
    pub width: f32,
    /// View volume height in world units.
    pub height: f32,
    /// Projection mode.
    pub projection: Projection,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 3.0),
            up: Vector3::UNIT_Y,
            target: Vector3::ZERO,
            near: 1.0,
            far: 10.0,
            width: 1.0,
            height: 1.0,
            projection: Projection::Perspective,
        }
    }
}

impl Camera {
    /// Check plane distances, view volume size, and that the look-at basis is well defined.
    pub fn validate(&self) -> MikoResult<()> {
        if !(self.near > 0.0 && self.far > 0.0 && self.near < self.far) {
            return Err(MikoError::configuration(format!(
                "camera planes must satisfy 0 < near < far (near={}, far={})",
                self.near, self.far
            )));
        }
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(MikoError::configuration(
                "camera view volume width and height must be > 0",
            ));
        }
        let forward = (self.position - self.target).normalize();
        if !forward.is_finite() || forward == Vector3::ZERO {
            return Err(MikoError::configuration(
                "camera position and target must be finite and distinct",
            ));
        }
        if !(self.up.normalize().cross(forward).length() > 1e-6) {
            return Err(MikoError::configuration(
                "camera up must not be zero or parallel to the view direction",
            ));
        }
        Ok(())
    }

    /// World-to-camera transform built from an orthonormal look-at basis.
    pub fn view_matrix(&self) -> Matrix4x4 {
        let z_axis = (self.position - self.target).normalize();
        let x_axis = self.up.cross(z_axis).normalize();
        let y_axis = z_axis.cross(x_axis).normalize();

        let rotate = Matrix4x4::from_rows([
            [x_axis.x, x_axis.y, x_axis.z, 0.0],
            [y_axis.x, y_axis.y, y_axis.z, 0.0],
            [z_axis.x, z_axis.y, z_axis.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        rotate * Matrix4x4::translation(-self.position)
    }

    /// Camera-to-clip transform for the configured projection.
    pub fn projection_matrix(&self) -> Matrix4x4 {
        match self.projection {
            Projection::Orthographic => self.orthographic(),
            Projection::Perspective => self.orthographic() * self.perspective_scale(),
        }
    }

    /// View-space depth (negative in front of the camera) of a clip-space position.
    ///
    /// Perspective clip `w` already equals view depth; orthographic depth is recovered from the
    /// normalized `z`.
    pub fn view_depth(&self, clip: Vector4) -> f32 {
        match self.projection {
            Projection::Perspective => clip.w,
            Projection::Orthographic => {
                let (n, f) = (self.near, self.far);
                let ndc_z = clip.z / clip.w;
                (ndc_z * (f - n) - f - n) * 0.5
            }
        }
    }

    fn orthographic(&self) -> Matrix4x4 {
        let (n, f) = (self.near, self.far);
        Matrix4x4::from_rows([
            [2.0 / self.width, 0.0, 0.0, 0.0],
            [0.0, 2.0 / self.height, 0.0, 0.0],
            [0.0, 0.0, 2.0 / (f - n), (f + n) / (f - n)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    // Squashes the frustum into the orthographic box and moves view depth into `w`.
    fn perspective_scale(&self) -> Matrix4x4 {
        let (n, f) = (self.near, self.far);
        Matrix4x4::from_rows([
            [-n, 0.0, 0.0, 0.0],
            [0.0, -n, 0.0, 0.0],
            [0.0, 0.0, -n - f, -n * f],
            [0.0, 0.0, 1.0, 0.0],
        ])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/camera.rs"]
mod tests;
