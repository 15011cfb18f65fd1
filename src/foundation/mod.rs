pub(crate) mod arena;
pub(crate) mod error;
pub(crate) mod math;
