// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::camera::RotationMode;
use crate::config::AppConfig;
use crate::error::Result;
use crate::shader_source::ShaderSource;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "progressive-tracer")]
#[command(about = "Interactive progressive GPU ray tracer", long_about = None)]
pub struct Cli {
    /// Window width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Vertical field of view in degrees
    #[arg(long)]
    pub fov: Option<f32>,

    /// WGSL tracer program to load instead of the built-in one
    #[arg(long)]
    pub shader: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Orientation model for mouse look
    #[arg(long, value_parser = parse_rotation)]
    pub rotation: Option<RotationMode>,

    /// Skip the per-pixel ray direction cache
    #[arg(long = "no-ray-cache", default_value = "false")]
    pub no_ray_cache: bool,

    /// Hide the egui overlay
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Lock the field of view (zoom keys do nothing)
    #[arg(long = "fixed-fov", default_value = "false")]
    pub fixed_fov: bool,
}

fn parse_rotation(value: &str) -> std::result::Result<RotationMode, String> {
    match value.to_ascii_lowercase().as_str() {
        "composed" => Ok(RotationMode::Composed),
        "constrained" => Ok(RotationMode::Constrained),
        other => Err(format!("unknown rotation mode '{other}', expected composed or constrained")),
    }
}

impl Cli {
    /// Configuration file (or defaults) with command-line overrides applied
    pub fn app_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };

        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
        if let Some(fov) = self.fov {
            config.camera.fov_deg = fov;
        }
        if let Some(rotation) = self.rotation {
            config.camera.rotation = rotation;
        }
        if self.no_ray_cache {
            config.camera.ray_cache = false;
        }
        if self.no_ui {
            config.window.show_ui = false;
        }
        if self.fixed_fov {
            config.camera.fov_mutable = false;
        }

        config.sanitize();
        Ok(config)
    }

    pub fn shader_source(&self) -> ShaderSource {
        ShaderSource::from_path(self.shader.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_flags() {
        let cli = Cli::parse_from(["progressive-tracer"]);
        let config = cli.app_config().unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(cli.shader_source(), ShaderSource::Builtin);
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "progressive-tracer",
            "--width",
            "1024",
            "--fov",
            "75",
            "--rotation",
            "constrained",
            "--no-ray-cache",
            "--fixed-fov",
        ]);
        let config = cli.app_config().unwrap();

        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 800);
        assert_eq!(config.camera.fov_deg, 75.0);
        assert_eq!(config.camera.rotation, RotationMode::Constrained);
        assert!(!config.camera.ray_cache);
        assert!(!config.camera.fov_mutable);
    }

    #[test]
    fn out_of_range_fov_is_clamped() {
        let cli = Cli::parse_from(["progressive-tracer", "--fov", "200"]);
        assert_eq!(cli.app_config().unwrap().camera.fov_deg, 120.0);
    }

    #[test]
    fn unknown_rotation_is_rejected() {
        assert!(Cli::try_parse_from(["progressive-tracer", "--rotation", "spin"]).is_err());
    }
}
