pub(crate) mod engine;
pub(crate) mod frame;
pub(crate) mod raster;
