pub(crate) mod basic;
pub(crate) mod lit;
pub(crate) mod program;
