//! Scene - everything one frame is rendered from
//!
//! The scene owns the immutable mesh plus the mutable camera, light and
//! zoom/focal state. Commands mutate it; the pipeline reads it.

use glam::{Quat, Vec3};

use crate::camera::Camera;
use crate::mesh::MeshBuilder;
use crate::projector::Projection;
use crate::types::*;

/// Directional light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    direction: Vec3,
}

impl Light {
    /// Light along `direction` (normalized; zero falls back to +Z).
    pub fn new(direction: Vec3) -> Self {
        Self {
            direction: direction.try_normalize().unwrap_or(Vec3::Z),
        }
    }

    /// Unit direction
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Spin about world Z by `angle` radians.
    pub fn rotate(&mut self, angle: f32) {
        self.direction = (Quat::from_rotation_z(angle) * self.direction).normalize();
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::new(Vec3::new(1.0, 0.5, 2.0))
    }
}

/// Tunable render parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    pub mode: MeshMode,
    pub z_scale: f32,
    /// Initial zoom factor (pixels per unit at the focus plane)
    pub zoom: f32,
    pub perspective: bool,
    /// When off every vertex keeps its base intensity
    pub shading: bool,
    pub screen_width: u32,
    pub screen_height: u32,
    pub near_threshold: f32,
    pub base_color: Rgba,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            mode: MeshMode::Shaded,
            z_scale: DEFAULT_Z_SCALE,
            zoom: DEFAULT_ZOOM,
            perspective: true,
            shading: true,
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            near_threshold: NEAR_THRESHOLD,
            base_color: Rgba::new(170, 220, 140, 255),
        }
    }
}

/// Mesh, camera, light and projection state.
#[derive(Debug, Clone)]
pub struct Scene {
    mesh: Mesh,
    camera: Camera,
    light: Light,
    params: RenderParams,
    zoom: f32,
    focal: f32,
}

impl Scene {
    pub fn new(hf: &Heightfield, params: RenderParams, camera: Camera, light: Light) -> Self {
        let mesh = MeshBuilder::new(params.z_scale, params.mode).build(hf);
        Self {
            mesh,
            focal: camera.distance(),
            camera,
            light,
            zoom: params.zoom,
            params,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn light(&self) -> &Light {
        &self.light
    }

    pub fn params(&self) -> &RenderParams {
        &self.params
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn focal(&self) -> f32 {
        self.focal
    }

    /// Projection for the current camera and zoom.
    pub fn projection(&self) -> Projection {
        Projection {
            zoom: self.zoom,
            focal: self.params.perspective.then_some(self.focal),
            screen_width: self.params.screen_width as f32,
            screen_height: self.params.screen_height as f32,
            near_threshold: self.params.near_threshold,
        }
    }

    /// Apply a camera or light command. Returns true if the scene changed.
    ///
    /// `Quit` is a pipeline concern and leaves the scene untouched.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Orbit(dir) => self.camera.orbit(dir, ORBIT_STEP_DEG.to_radians()),
            Command::ZoomIn => self.zoom_by(ZOOM_RATIO),
            Command::ZoomOut => self.zoom_by(1.0 / ZOOM_RATIO),
            Command::LightRotatePositive => {
                self.light.rotate(LIGHT_STEP_DEG.to_radians());
                true
            }
            Command::LightRotateNegative => {
                self.light.rotate(-LIGHT_STEP_DEG.to_radians());
                true
            }
            Command::Quit => false,
        }
    }

    /// Move the eye by `1 / ratio` of its distance and magnify by the ratio
    /// actually achieved, then re-derive the focal factor.
    fn zoom_by(&mut self, ratio: f32) -> bool {
        let before = self.camera.distance();
        let after = self.camera.dolly(1.0 / ratio);
        if (after - before).abs() <= f32::EPSILON * before.max(1.0) {
            return false;
        }
        self.zoom *= before / after;
        self.focal = after;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        Scene::new(
            &Heightfield::flat(4, 4),
            RenderParams::default(),
            Camera::looking_at_origin(Vec3::ONE),
            Light::default(),
        )
    }

    #[test]
    fn focal_starts_at_camera_distance() {
        let s = scene();
        assert!((s.focal() - 3f32.sqrt()).abs() < 1e-5);
        assert_eq!(s.projection().focal, Some(s.focal()));
    }

    #[test]
    fn zoom_in_moves_closer_and_magnifies() {
        let mut s = scene();
        let (d0, z0) = (s.camera().distance(), s.zoom());
        assert!(s.apply(Command::ZoomIn));
        assert!(s.camera().distance() < d0);
        assert!(s.zoom() > z0);
        assert!((s.focal() - s.camera().distance()).abs() < 1e-6);

        assert!(s.apply(Command::ZoomOut));
        assert!((s.camera().distance() - d0).abs() < 1e-4);
        assert!((s.zoom() - z0).abs() < 1e-2);
    }

    #[test]
    fn zoom_at_clamp_is_a_no_op() {
        let mut s = scene();
        while s.apply(Command::ZoomIn) {}
        assert!((s.camera().distance() - MIN_DISTANCE).abs() < 1e-5);
        let zoom = s.zoom();
        assert!(!s.apply(Command::ZoomIn));
        assert_eq!(s.zoom(), zoom);
    }

    #[test]
    fn light_rotation_stays_unit_and_reverses() {
        let mut s = scene();
        let start = s.light().direction();
        assert!(s.apply(Command::LightRotatePositive));
        assert!((s.light().direction().length() - 1.0).abs() < 1e-5);
        assert!((s.light().direction() - start).length() > 1e-3);
        assert!(s.apply(Command::LightRotateNegative));
        assert!((s.light().direction() - start).length() < 1e-5);
    }

    #[test]
    fn orthographic_has_no_focal() {
        let params = RenderParams {
            perspective: false,
            ..RenderParams::default()
        };
        let s = Scene::new(
            &Heightfield::flat(2, 2),
            params,
            Camera::looking_at_origin(Vec3::ONE),
            Light::default(),
        );
        assert_eq!(s.projection().focal, None);
    }
}
