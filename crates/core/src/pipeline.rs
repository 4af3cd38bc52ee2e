//! Frame pipeline - the per-frame state machine
//!
//! ```text
//! initialize ──> Built ──render──> Drawable ──command──> Drawable
//!                  │                   │
//!                  └──────quit─────────┴──> Quit (terminal)
//! ```
//!
//! A render projects every vertex, orders triangles back to front (shaded
//! mode), shades every vertex and emits a fresh [`Frame`]. Renders run to
//! completion; there is no partial or incremental update.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::camera::Camera;
use crate::frame::{Frame, Primitive};
use crate::scene::{Light, RenderParams, Scene};
use crate::shader::shade;
use crate::types::{Command, Heightfield, Mesh};
use crate::visibility::back_to_front;

/// Pipeline lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Mesh built, nothing rendered yet
    Built,
    /// A frame is ready for the rasterizer
    Drawable,
    /// Terminal; no further rendering
    Quit,
}

/// What to do with input that names no known command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandPolicy {
    /// Log and leave state unchanged
    #[default]
    Ignore,
    /// Report [`PipelineError::UnsupportedCommand`]
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("unsupported command: {0}")]
    UnsupportedCommand(String),

    #[error("pipeline has quit")]
    Terminated,
}

/// Owns the scene and drives rendering.
#[derive(Debug, Clone)]
pub struct FramePipeline {
    scene: Scene,
    state: PipelineState,
    policy: CommandPolicy,
    frame: Option<Frame>,
    renders: u64,
}

impl FramePipeline {
    /// Build the mesh once and enter `Built`.
    pub fn initialize(
        hf: &Heightfield,
        params: RenderParams,
        camera: Camera,
        light: Light,
        policy: CommandPolicy,
    ) -> Self {
        let scene = Scene::new(hf, params, camera, light);
        info!(
            width = hf.width(),
            height = hf.height(),
            mode = params.mode.as_str(),
            vertices = scene.mesh().vertices().len(),
            elements = scene.mesh().element_count(),
            "mesh built"
        );
        Self {
            scene,
            state: PipelineState::Built,
            policy,
            frame: None,
            renders: 0,
        }
    }

    /// Default eye at (1, 1, 1) looking at the origin, default light.
    pub fn with_defaults(hf: &Heightfield, params: RenderParams) -> Self {
        Self::initialize(
            hf,
            params,
            Camera::default(),
            Light::default(),
            CommandPolicy::default(),
        )
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn policy(&self) -> CommandPolicy {
        self.policy
    }

    /// The most recent frame, if any.
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    /// Number of completed renders.
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    /// Project, order and shade the whole mesh into a new frame.
    pub fn render(&mut self) -> Result<&Frame, PipelineError> {
        if self.state == PipelineState::Quit {
            return Err(PipelineError::Terminated);
        }

        let frame = build_frame(&self.scene);
        self.renders += 1;
        self.state = PipelineState::Drawable;
        debug!(
            render = self.renders,
            distance = self.scene.camera().distance(),
            zoom = self.scene.zoom(),
            elements = frame.element_count(),
            "frame rendered"
        );
        Ok(self.frame.insert(frame))
    }

    /// Apply a command and re-render.
    ///
    /// Returns `Ok(None)` for `Quit`, which moves to the terminal state.
    pub fn apply_command(&mut self, command: Command) -> Result<Option<&Frame>, PipelineError> {
        if self.state == PipelineState::Quit {
            return Err(PipelineError::Terminated);
        }
        if command == Command::Quit {
            info!(renders = self.renders, "pipeline quit");
            self.state = PipelineState::Quit;
            self.frame = None;
            return Ok(None);
        }

        if !self.scene.apply(command) {
            debug!(command = command.as_str(), "command left scene unchanged");
        }
        self.render().map(Some)
    }

    /// Apply a command by name.
    ///
    /// Unknown names follow the command policy: `Ok(None)` with state
    /// unchanged, or `UnsupportedCommand`.
    pub fn apply_named(&mut self, name: &str) -> Result<Option<&Frame>, PipelineError> {
        match Command::from_str(name) {
            Some(command) => self.apply_command(command),
            None => {
                self.unsupported(name)?;
                Ok(None)
            }
        }
    }

    /// Route input that maps to no command through the policy.
    pub fn unsupported(&self, input: &str) -> Result<(), PipelineError> {
        if self.state == PipelineState::Quit {
            return Err(PipelineError::Terminated);
        }
        match self.policy {
            CommandPolicy::Ignore => {
                warn!(input, "ignoring unsupported command");
                Ok(())
            }
            CommandPolicy::Strict => Err(PipelineError::UnsupportedCommand(input.to_string())),
        }
    }
}

fn build_frame(scene: &Scene) -> Frame {
    let params = scene.params();
    let vertices = scene.mesh().vertices();
    let projected = scene.projection().project(scene.camera(), vertices);

    let intensities = if params.shading {
        shade(vertices, scene.light().direction())
    } else {
        vertices.iter().map(|v| v.intensity).collect()
    };

    let (primitive, indices): (Primitive, Vec<u32>) = match scene.mesh() {
        Mesh::Wireframe { edges, .. } => (Primitive::Lines, edges.iter().flatten().copied().collect()),
        Mesh::Shaded { triangles, .. } => {
            let order = back_to_front(triangles, &projected);
            let indices = order
                .iter()
                .flat_map(|&t| triangles[t as usize])
                .collect();
            (Primitive::Triangles, indices)
        }
    };

    Frame {
        primitive,
        width: params.screen_width,
        height: params.screen_height,
        positions: projected.iter().map(|p| [p.x, p.y]).collect(),
        depths: projected.iter().map(|p| p.z).collect(),
        colors: intensities
            .iter()
            .map(|&i| params.base_color.scaled(i))
            .collect(),
        indices,
    }
}
