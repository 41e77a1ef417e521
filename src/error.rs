//! Error types for the tracer front-end.

use std::path::PathBuf;
use thiserror::Error;

use crate::uniforms::SlotKind;

/// Errors raised while setting up the shader host or loading configuration.
///
/// The per-frame camera and accumulation code never produces these; it clamps
/// and guards instead.
#[derive(Error, Debug)]
pub enum TracerError {
    /// Shader text could not be read from disk
    #[error("Failed to read shader {path}: {source}")]
    ShaderRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Shader compilation or pipeline creation reported a validation error
    #[error("Shader compilation failed: {0}")]
    ShaderCompile(String),

    /// Uniforms were requested before a program was linked
    #[error("No linked shader program")]
    NoProgram,

    /// The program declares a slot with a different type than expected
    #[error("Uniform {name} has type {actual:?}, expected {expected:?}")]
    SlotType {
        name: &'static str,
        expected: SlotKind,
        actual: SlotKind,
    },

    /// No GPU adapter compatible with the surface
    #[error("Failed to find appropriate adapter: {0}")]
    Adapter(String),

    /// Device request failed
    #[error("Failed to create device: {0}")]
    Device(String),

    /// Surface creation or configuration failed
    #[error("Surface error: {0}")]
    Surface(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON configuration
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TracerError>;
