pub(crate) mod texture;
