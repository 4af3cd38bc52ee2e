//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the viewer.
//! All types are plain data with no I/O, making them usable in any context
//! (geometry pipeline, terminal rasterizer, headless dumps).
//!
//! # Canvas
//!
//! The pipeline projects into a fixed-size virtual canvas:
//!
//! - **Width**: 640 pixels
//! - **Height**: 480 pixels
//! - **Origin**: bottom-left, y grows upward
//!
//! # Tuning Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `ORBIT_STEP_DEG` | 5 | Camera orbit step per command |
//! | `LIGHT_STEP_DEG` | 10 | Light rotation step per command |
//! | `ZOOM_RATIO` | 1.1 | Magnification change per zoom command |
//! | `NEAR_THRESHOLD` | 1e-3 | Depths below this skip perspective division |
//! | `MIN_DISTANCE` / `MAX_DISTANCE` | 0.25 / 50 | Camera distance clamp |
//!
//! # Examples
//!
//! ```
//! use heightview_types::{Command, OrbitDirection, Heightfield};
//!
//! let cmd = Command::from_str("orbitLeft").unwrap();
//! assert_eq!(cmd, Command::Orbit(OrbitDirection::Left));
//! assert_eq!(cmd.as_str(), "orbitLeft");
//!
//! let hf = Heightfield::from_fn(3, 2, |row, col| (row + col) as f32 / 3.0);
//! assert_eq!(hf.width(), 3);
//! assert_eq!(hf.get(1, 2), Some(1.0));
//! assert_eq!(hf.get(2, 0), None);
//! ```

pub mod heightfield;
pub mod mesh;

pub use heightfield::{Heightfield, HeightfieldError};
pub use mesh::{Mesh, MeshMode, Vertex};

/// Virtual canvas width in pixels.
pub const SCREEN_WIDTH: u32 = 640;

/// Virtual canvas height in pixels.
pub const SCREEN_HEIGHT: u32 = 480;

/// Camera orbit step in degrees.
pub const ORBIT_STEP_DEG: f32 = 5.0;

/// Light rotation step in degrees.
pub const LIGHT_STEP_DEG: f32 = 10.0;

/// Magnification ratio applied by one zoom step.
pub const ZOOM_RATIO: f32 = 1.1;

/// View-space depth below which perspective division is skipped.
pub const NEAR_THRESHOLD: f32 = 1e-3;

/// Closest the camera may get to its focus point.
pub const MIN_DISTANCE: f32 = 0.25;

/// Farthest the camera may get from its focus point.
pub const MAX_DISTANCE: f32 = 50.0;

/// Default elevation scale (model units per unit sample).
pub const DEFAULT_Z_SCALE: f32 = 0.25;

/// Default zoom factor (pixels per model unit at the focus plane).
pub const DEFAULT_ZOOM: f32 = 400.0;


/// Orbit direction for camera commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrbitDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Discrete control commands accepted by the frame pipeline.
///
/// These are produced by key mapping and by scripted/headless input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Rotate the camera about its focus point by one orbit step
    Orbit(OrbitDirection),
    /// Move the camera closer and magnify
    ZoomIn,
    /// Move the camera away and shrink
    ZoomOut,
    /// Rotate the light one step counter-clockwise about world Z
    LightRotatePositive,
    /// Rotate the light one step clockwise about world Z
    LightRotateNegative,
    /// Stop rendering for good
    Quit,
}

impl Command {
    /// Every command, in a stable order.
    pub const ALL: [Command; 9] = [
        Command::Orbit(OrbitDirection::Up),
        Command::Orbit(OrbitDirection::Down),
        Command::Orbit(OrbitDirection::Left),
        Command::Orbit(OrbitDirection::Right),
        Command::ZoomIn,
        Command::ZoomOut,
        Command::LightRotatePositive,
        Command::LightRotateNegative,
        Command::Quit,
    ];

    /// Parse a command from its name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use heightview_types::Command;
    ///
    /// assert_eq!(Command::from_str("zoomIn"), Some(Command::ZoomIn));
    /// assert_eq!(Command::from_str("lightnegative"), Some(Command::LightRotateNegative));
    /// assert_eq!(Command::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "orbitup" => Some(Command::Orbit(OrbitDirection::Up)),
            "orbitdown" => Some(Command::Orbit(OrbitDirection::Down)),
            "orbitleft" => Some(Command::Orbit(OrbitDirection::Left)),
            "orbitright" => Some(Command::Orbit(OrbitDirection::Right)),
            "zoomin" => Some(Command::ZoomIn),
            "zoomout" => Some(Command::ZoomOut),
            "lightpositive" => Some(Command::LightRotatePositive),
            "lightnegative" => Some(Command::LightRotateNegative),
            "quit" => Some(Command::Quit),
            _ => None,
        }
    }

    /// Canonical camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Orbit(OrbitDirection::Up) => "orbitUp",
            Command::Orbit(OrbitDirection::Down) => "orbitDown",
            Command::Orbit(OrbitDirection::Left) => "orbitLeft",
            Command::Orbit(OrbitDirection::Right) => "orbitRight",
            Command::ZoomIn => "zoomIn",
            Command::ZoomOut => "zoomOut",
            Command::LightRotatePositive => "lightPositive",
            Command::LightRotateNegative => "lightNegative",
            Command::Quit => "quit",
        }
    }
}

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Scale the color channels by `intensity` (clamped to [0, 1]); alpha is kept.
    pub fn scaled(self, intensity: f32) -> Self {
        let k = intensity.clamp(0.0, 1.0);
        let ch = |c: u8| (c as f32 * k).round() as u8;
        Self::new(ch(self.r), ch(self.g), ch(self.b), self.a)
    }
}
