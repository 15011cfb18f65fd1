use serde::{Deserialize, Serialize};

use crate::foundation::math::Vector3;

/// Maximum number of lights active in one render pass.
pub const MAX_LIGHTS: usize = 4;

/// Light category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightKind {
    /// Infinitely distant light shining along `direction`.
    Directional,
    /// Ambient fill that tints the surface without a highlight.
    Area,
    /// Omnidirectional light at `position` with inverse-square falloff.
    #[default]
    Point,
}

/// A scene light.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Light {
    /// World-space position (point lights).
    pub position: Vector3,
    /// Direction the light travels (directional lights).
    pub direction: Vector3,
    /// Linear RGB color.
    pub color: Vector3,
    /// Non-negative intensity; `0` disables the light.
    pub intensity: f32,
    /// Light category.
    pub kind: LightKind,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vector3::ZERO,
            direction: Vector3::new(0.0, 0.0, -1.0),
            color: Vector3::ONE,
            intensity: 1.0,
            kind: LightKind::Point,
        }
    }
}

impl Light {
    /// Point light at `position`.
    pub fn point(position: Vector3, color: Vector3, intensity: f32) -> Self {
        Self {
            position,
            color,
            intensity,
            kind: LightKind::Point,
            ..Self::default()
        }
    }

    /// Directional light travelling along `direction`.
    pub fn directional(direction: Vector3, color: Vector3, intensity: f32) -> Self {
        Self {
            direction,
            color,
            intensity,
            kind: LightKind::Directional,
            ..Self::default()
        }
    }

    /// Area fill light.
    pub fn area(color: Vector3, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            kind: LightKind::Area,
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/light.rs"]
mod tests;
