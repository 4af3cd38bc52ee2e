//! Command-line configuration

use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::Parser;

use crate::core::{CommandPolicy, RenderParams};
use crate::types::{MeshMode, DEFAULT_Z_SCALE, DEFAULT_ZOOM, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Terminal heightfield viewer
#[derive(Parser, Clone, Debug)]
#[command(name = "heightview")]
#[command(about = "Orbit a shaded 3-D heightfield in the terminal")]
pub struct Cli {
    /// Grayscale image to use as the heightfield (red channel)
    #[arg(long, env = "HEIGHTVIEW_HEIGHTMAP")]
    pub heightmap: Option<PathBuf>,

    /// Mesh mode: wireframe or shaded
    #[arg(long, env = "HEIGHTVIEW_MODE", default_value = "shaded", value_parser = parse_mode)]
    pub mode: MeshMode,

    /// Height exaggeration applied to every sample
    #[arg(long, env = "HEIGHTVIEW_Z_SCALE", default_value_t = DEFAULT_Z_SCALE)]
    pub z_scale: f32,

    /// Initial zoom (pixels per model unit)
    #[arg(long, env = "HEIGHTVIEW_ZOOM", default_value_t = DEFAULT_ZOOM)]
    pub zoom: f32,

    /// Use an orthographic projection
    #[arg(long, env = "HEIGHTVIEW_NO_PERSPECTIVE")]
    pub no_perspective: bool,

    /// Draw every vertex at full intensity
    #[arg(long, env = "HEIGHTVIEW_NO_SHADING")]
    pub no_shading: bool,

    /// Canvas width in pixels
    #[arg(long, env = "HEIGHTVIEW_SCREEN_WIDTH", default_value_t = SCREEN_WIDTH)]
    pub screen_width: u32,

    /// Canvas height in pixels
    #[arg(long, env = "HEIGHTVIEW_SCREEN_HEIGHT", default_value_t = SCREEN_HEIGHT)]
    pub screen_height: u32,

    /// Fail on unknown commands instead of ignoring them
    #[arg(long, env = "HEIGHTVIEW_STRICT")]
    pub strict: bool,

    /// Side length of the built-in terrain when no heightmap is given
    #[arg(long, env = "HEIGHTVIEW_SYNTHETIC_SIZE", default_value_t = 48)]
    pub synthetic_size: usize,

    /// Commands applied before the first frame, e.g. orbitLeft,zoomIn
    #[arg(long, env = "HEIGHTVIEW_SCRIPT", value_delimiter = ',')]
    pub script: Vec<String>,

    /// Print the frame as JSON on stdout and exit
    #[arg(long, env = "HEIGHTVIEW_DUMP_FRAME")]
    pub dump_frame: bool,

    /// Write logs to this file while the viewer owns the terminal
    #[arg(long, env = "HEIGHTVIEW_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

fn parse_mode(s: &str) -> Result<MeshMode, String> {
    MeshMode::from_str(s).ok_or_else(|| format!("unknown mode `{s}` (expected wireframe or shaded)"))
}

impl Cli {
    /// Reject values the pipeline cannot draw with.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.z_scale.is_finite(),
            "z-scale must be finite, got {}",
            self.z_scale
        );
        ensure!(
            self.zoom.is_finite() && self.zoom > 0.0,
            "zoom must be positive, got {}",
            self.zoom
        );
        ensure!(
            self.screen_width > 0 && self.screen_height > 0,
            "screen size must be non-zero, got {}x{}",
            self.screen_width,
            self.screen_height
        );
        ensure!(
            self.synthetic_size >= 2,
            "synthetic-size must be at least 2, got {}",
            self.synthetic_size
        );
        Ok(())
    }

    pub fn render_params(&self) -> RenderParams {
        RenderParams {
            mode: self.mode,
            z_scale: self.z_scale,
            zoom: self.zoom,
            perspective: !self.no_perspective,
            shading: !self.no_shading,
            screen_width: self.screen_width,
            screen_height: self.screen_height,
            ..RenderParams::default()
        }
    }

    pub fn policy(&self) -> CommandPolicy {
        if self.strict {
            CommandPolicy::Strict
        } else {
            CommandPolicy::Ignore
        }
    }
}
