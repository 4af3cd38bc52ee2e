//! View projector - model space to screen pixels
//!
//! Per vertex:
//!
//! 1. `v_view = transpose(view_matrix) * (v_model - eye)`
//! 2. with perspective on and `|v_view.z| > near_threshold`, scale x and y
//!    by `focal / |v_view.z|`; z is never divided
//! 3. scale x and y by the zoom factor
//! 4. shift by half the screen size
//!
//! The output is a fresh buffer of `(x_px, y_px, view_z)`. Source vertices are
//! never touched and nothing is cached between calls.

use glam::Vec3;

use crate::camera::Camera;
use crate::types::{Vertex, NEAR_THRESHOLD};

/// Projection parameters for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Pixels per view-space unit after perspective scaling
    pub zoom: f32,
    /// Focal factor for perspective division; `None` projects orthographically
    pub focal: Option<f32>,
    pub screen_width: f32,
    pub screen_height: f32,
    pub near_threshold: f32,
}

impl Projection {
    pub fn orthographic(zoom: f32, screen_width: f32, screen_height: f32) -> Self {
        Self {
            zoom,
            focal: None,
            screen_width,
            screen_height,
            near_threshold: NEAR_THRESHOLD,
        }
    }

    pub fn perspective(zoom: f32, focal: f32, screen_width: f32, screen_height: f32) -> Self {
        Self {
            focal: Some(focal),
            ..Self::orthographic(zoom, screen_width, screen_height)
        }
    }

    /// Project a single model-space point.
    #[inline]
    pub fn project_point(&self, camera: &Camera, point: Vec3) -> Vec3 {
        let v = camera.basis().to_view(point - camera.position());

        let (mut x, mut y) = (v.x, v.y);
        if let Some(focal) = self.focal {
            let depth = v.z.abs();
            if depth > self.near_threshold {
                let k = focal / depth;
                x *= k;
                y *= k;
            }
        }

        Vec3::new(
            x * self.zoom + self.screen_width / 2.0,
            y * self.zoom + self.screen_height / 2.0,
            v.z,
        )
    }

    /// Project every vertex into a new buffer.
    pub fn project(&self, camera: &Camera, vertices: &[Vertex]) -> Vec<Vec3> {
        vertices
            .iter()
            .map(|v| self.project_point(camera, v.position))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    #[test]
    fn focus_point_lands_on_screen_center() {
        let cam = Camera::looking_at_origin(Vec3::new(1.0, 2.0, 3.0));
        for proj in [
            Projection::orthographic(400.0, 640.0, 480.0),
            Projection::perspective(400.0, cam.distance(), 640.0, 480.0),
        ] {
            let p = proj.project_point(&cam, Vec3::ZERO);
            assert!((p.x - 320.0).abs() < EPS);
            assert!((p.y - 240.0).abs() < EPS);
            assert!((p.z + cam.distance()).abs() < EPS);
        }
    }

    #[test]
    fn perspective_shrinks_far_points() {
        let cam = Camera::looking_at_origin(Vec3::new(0.0, -4.0, 0.0));
        let proj = Projection::perspective(100.0, 4.0, 200.0, 200.0);
        // Same lateral offset, one point nearer than the focus and one farther.
        let near = proj.project_point(&cam, Vec3::new(1.0, -2.0, 0.0));
        let far = proj.project_point(&cam, Vec3::new(1.0, 2.0, 0.0));
        assert!((near.x - 100.0).abs() > (far.x - 100.0).abs());
        // Depth is kept raw.
        assert!((near.z + 2.0).abs() < EPS);
        assert!((far.z + 6.0).abs() < EPS);
    }

    #[test]
    fn points_inside_near_threshold_skip_division() {
        let cam = Camera::looking_at_origin(Vec3::new(0.0, -4.0, 0.0));
        let proj = Projection::perspective(10.0, 4.0, 0.0, 0.0);
        // A point in the eye's own view plane: depth 0.
        let p = proj.project_point(&cam, Vec3::new(1.0, -4.0, 0.0));
        assert!(p.is_finite());
        assert!((p.x.abs() - 10.0).abs() < EPS);
    }

    #[test]
    fn projection_does_not_mutate_source() {
        let cam = Camera::looking_at_origin(Vec3::ONE);
        let verts = vec![Vertex::new(Vec3::new(0.2, 0.1, 0.0), Vec3::Z); 3];
        let before = verts.clone();
        let out = Projection::orthographic(1.0, 10.0, 10.0).project(&cam, &verts);
        assert_eq!(out.len(), 3);
        assert_eq!(verts, before);
    }
}
