/// Convenience result type used across Miko.
pub type MikoResult<T> = Result<T, MikoError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum MikoError {
    /// Invalid user-provided construction data (sizes, strides, capacities).
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid camera or engine configuration detected before rendering.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Errors while decoding or preparing external assets such as textures.
    #[error("asset error: {0}")]
    Asset(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MikoError {
    /// Build a [`MikoError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MikoError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`MikoError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
