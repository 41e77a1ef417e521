use std::borrow::Cow;
use std::path::PathBuf;

use log::{error, info};

use crate::error::{Result, TracerError};

/// WGSL tracer compiled into the binary
pub const BUILTIN_SHADER: &str = include_str!("../shaders/tracer.wgsl");

/// Where the tracer program's WGSL text comes from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ShaderSource {
    #[default]
    Builtin,
    File(PathBuf),
}

impl ShaderSource {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(ShaderSource::Builtin, ShaderSource::File)
    }

    /// Human-readable label, used for GPU object labels and logs
    pub fn label(&self) -> String {
        match self {
            ShaderSource::Builtin => "builtin tracer".to_string(),
            ShaderSource::File(path) => path.display().to_string(),
        }
    }

    /// Read the shader text. Read failures are logged before being returned.
    pub fn load(&self) -> Result<Cow<'static, str>> {
        match self {
            ShaderSource::Builtin => Ok(Cow::Borrowed(BUILTIN_SHADER)),
            ShaderSource::File(path) => match std::fs::read_to_string(path) {
                Ok(text) => {
                    info!("Read shader {} ({} bytes)", path.display(), text.len());
                    Ok(Cow::Owned(text))
                }
                Err(source) => {
                    error!("Failed to read shader {}: {}", path.display(), source);
                    Err(TracerError::ShaderRead {
                        path: path.clone(),
                        source,
                    })
                }
            },
        }
    }
}
