//! Directional-light shading.

use glam::Vec3;

use crate::types::Vertex;

/// `|normal . light|`, clamped to [0, 1].
#[inline]
pub fn intensity(normal: Vec3, light_dir: Vec3) -> f32 {
    normal.dot(light_dir).abs().min(1.0)
}

/// Intensity for every vertex under `light_dir`.
pub fn shade(vertices: &[Vertex], light_dir: Vec3) -> Vec<f32> {
    vertices
        .iter()
        .map(|v| intensity(v.normal, light_dir))
        .collect()
}
