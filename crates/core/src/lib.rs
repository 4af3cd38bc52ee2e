//! Core geometry pipeline - pure, deterministic, and testable
//!
//! This crate turns a heightfield into screen-space frames through an
//! orbiting camera. It has **zero dependencies** on terminals, windows or
//! files, making it:
//!
//! - **Deterministic**: the same scene always yields the same frame
//! - **Testable**: every stage is a plain function over plain data
//! - **Portable**: any 2-D rasterizer can consume its [`Frame`]s
//!
//! # Module Structure
//!
//! - [`mesh`]: heightfield to vertices, normals and wireframe/triangle topology
//! - [`camera`]: orthonormal view basis and the orbit camera
//! - [`projector`]: model space to screen pixels, with optional perspective
//! - [`visibility`]: painter's-algorithm triangle ordering
//! - [`shader`]: directional-light intensity
//! - [`scene`]: mesh, camera, light and zoom state plus command handling
//! - [`frame`]: the payload handed to the rasterizer
//! - [`pipeline`]: the `Built -> Drawable -> Quit` state machine
//!
//! # Example
//!
//! ```
//! use heightview_core::{FramePipeline, RenderParams};
//! use heightview_core::types::{Command, Heightfield, OrbitDirection};
//!
//! let hf = Heightfield::from_fn(8, 8, |r, c| ((r + c) % 4) as f32 / 4.0);
//! let mut pipeline = FramePipeline::with_defaults(&hf, RenderParams::default());
//!
//! let frame = pipeline.render().unwrap();
//! assert_eq!(frame.element_count(), 2 * 7 * 7);
//!
//! pipeline
//!     .apply_command(Command::Orbit(OrbitDirection::Left))
//!     .unwrap();
//! ```

pub mod camera;
pub mod frame;
pub mod mesh;
pub mod pipeline;
pub mod projector;
pub mod scene;
pub mod shader;
pub mod visibility;

pub use heightview_types as types;

// Re-export commonly used types for convenience
pub use camera::{Camera, CameraBasis};
pub use frame::{Frame, Primitive};
pub use mesh::MeshBuilder;
pub use pipeline::{CommandPolicy, FramePipeline, PipelineError, PipelineState};
pub use projector::Projection;
pub use scene::{Light, RenderParams, Scene};
pub use shader::{intensity, shade};
pub use visibility::{back_to_front, depth_key, sort_back_to_front};
