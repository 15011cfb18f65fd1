pub(crate) mod camera;
pub(crate) mod light;
pub(crate) mod model;
pub mod primitives;
