//! Mesh builder - turns a heightfield into vertices and topology
//!
//! Grid point (row, col) becomes vertex `row * width + col` at
//! `(row / height - 0.5, col / width - 0.5, z_scale * sample)`.
//!
//! Wireframe mode links every point to its up and left neighbors:
//! `(height - 1) * width + height * (width - 1)` edges.
//!
//! Shaded mode emits two triangles per cell, `(v00, v01, v10)` then
//! `(v01, v10, v11)`, where `v11` is the cell's bottom-right point:
//! `2 * (width - 1) * (height - 1)` triangles.
//!
//! Grids narrower or shorter than 2 produce an empty mesh.

use glam::Vec3;

use crate::types::{Heightfield, Mesh, MeshMode, Vertex};

/// Builds meshes from heightfields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshBuilder {
    pub z_scale: f32,
    pub mode: MeshMode,
}

impl MeshBuilder {
    pub fn new(z_scale: f32, mode: MeshMode) -> Self {
        Self { z_scale, mode }
    }

    pub fn build(&self, hf: &Heightfield) -> Mesh {
        if hf.is_degenerate() {
            return match self.mode {
                MeshMode::Wireframe => Mesh::Wireframe {
                    vertices: Vec::new(),
                    edges: Vec::new(),
                },
                MeshMode::Shaded => Mesh::Shaded {
                    vertices: Vec::new(),
                    triangles: Vec::new(),
                },
            };
        }

        let vertices = self.vertices(hf);
        match self.mode {
            MeshMode::Wireframe => Mesh::Wireframe {
                vertices,
                edges: grid_edges(hf.width(), hf.height()),
            },
            MeshMode::Shaded => Mesh::Shaded {
                vertices,
                triangles: grid_triangles(hf.width(), hf.height()),
            },
        }
    }

    fn vertices(&self, hf: &Heightfield) -> Vec<Vertex> {
        let (w, h) = (hf.width(), hf.height());
        let mut out = Vec::with_capacity(w * h);
        for row in 0..h {
            for col in 0..w {
                let position = Vec3::new(
                    row as f32 / h as f32 - 0.5,
                    col as f32 / w as f32 - 0.5,
                    self.z_scale * sample(hf, row, col),
                );
                // Wireframe vertices keep a straight-up normal.
                let normal = match self.mode {
                    MeshMode::Shaded => self.normal_at(hf, row, col),
                    MeshMode::Wireframe => Vec3::Z,
                };
                out.push(Vertex::new(position, normal));
            }
        }
        out
    }

    /// Central-difference normal, one-sided at the grid border.
    ///
    /// Deltas are raw samples; `z_scale` shapes positions only.
    fn normal_at(&self, hf: &Heightfield, row: usize, col: usize) -> Vec3 {
        let (w, h) = (hf.width(), hf.height());
        let here = sample(hf, row, col);

        let mut d_vertical = 0.0;
        if row + 1 < h {
            d_vertical += sample(hf, row + 1, col) - here;
        }
        if row > 0 {
            d_vertical += here - sample(hf, row - 1, col);
        }

        let mut d_horizontal = 0.0;
        if col + 1 < w {
            d_horizontal += sample(hf, row, col + 1) - here;
        }
        if col > 0 {
            d_horizontal += here - sample(hf, row, col - 1);
        }

        let tangent_vertical = Vec3::new(2.0 / h as f32, 0.0, d_vertical);
        let tangent_horizontal = Vec3::new(0.0, 2.0 / w as f32, d_horizontal);
        tangent_vertical
            .cross(tangent_horizontal)
            .try_normalize()
            .unwrap_or(Vec3::Z)
    }
}

#[inline(always)]
fn sample(hf: &Heightfield, row: usize, col: usize) -> f32 {
    hf.get(row, col).unwrap_or(0.0)
}

#[inline(always)]
fn index(width: usize, row: usize, col: usize) -> u32 {
    (row * width + col) as u32
}

fn grid_edges(width: usize, height: usize) -> Vec<[u32; 2]> {
    let mut edges = Vec::with_capacity((height - 1) * width + height * (width - 1));
    for row in 0..height {
        for col in 0..width {
            let here = index(width, row, col);
            if row > 0 {
                edges.push([index(width, row - 1, col), here]);
            }
            if col > 0 {
                edges.push([index(width, row, col - 1), here]);
            }
        }
    }
    edges
}

fn grid_triangles(width: usize, height: usize) -> Vec<[u32; 3]> {
    let mut tris = Vec::with_capacity(2 * (width - 1) * (height - 1));
    for row in 1..height {
        for col in 1..width {
            let v00 = index(width, row - 1, col - 1);
            let v01 = index(width, row - 1, col);
            let v10 = index(width, row, col - 1);
            let v11 = index(width, row, col);
            tris.push([v00, v01, v10]);
            tris.push([v01, v10, v11]);
        }
    }
    tris
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(width: usize, height: usize) -> Heightfield {
        Heightfield::from_fn(width, height, |row, _| row as f32 / height as f32)
    }

    #[test]
    fn wireframe_edge_count_matches_grid() {
        for (w, h) in [(2, 2), (3, 5), (7, 4)] {
            let mesh = MeshBuilder::new(1.0, MeshMode::Wireframe).build(&Heightfield::flat(w, h));
            assert_eq!(mesh.element_count(), (h - 1) * w + h * (w - 1), "{w}x{h}");
            assert_eq!(mesh.vertices().len(), w * h);
        }
    }

    #[test]
    fn triangle_count_matches_grid() {
        for (w, h) in [(2, 2), (3, 5), (7, 4)] {
            let mesh = MeshBuilder::new(1.0, MeshMode::Shaded).build(&Heightfield::flat(w, h));
            assert_eq!(mesh.element_count(), 2 * (w - 1) * (h - 1), "{w}x{h}");
        }
    }

    #[test]
    fn degenerate_grid_is_empty_not_error() {
        for (w, h) in [(0, 0), (1, 5), (5, 1)] {
            let mesh = MeshBuilder::new(1.0, MeshMode::Shaded).build(&Heightfield::flat(w, h));
            assert!(mesh.is_empty());
            let mesh = MeshBuilder::new(1.0, MeshMode::Wireframe).build(&Heightfield::flat(w, h));
            assert!(mesh.is_empty());
        }
    }

    #[test]
    fn first_cell_winding() {
        let mesh = MeshBuilder::new(1.0, MeshMode::Shaded).build(&Heightfield::flat(3, 2));
        let Mesh::Shaded { triangles, .. } = mesh else {
            panic!("expected shaded mesh");
        };
        assert_eq!(triangles[0], [0, 1, 3]);
        assert_eq!(triangles[1], [1, 3, 4]);
    }

    #[test]
    fn positions_follow_grid_and_z_scale() {
        let hf = Heightfield::from_fn(4, 2, |row, col| if row == 1 && col == 2 { 1.0 } else { 0.0 });
        let mesh = MeshBuilder::new(0.5, MeshMode::Shaded).build(&hf);
        let v = mesh.vertices()[4 + 2].position;
        assert_eq!(v, Vec3::new(1.0 / 2.0 - 0.5, 2.0 / 4.0 - 0.5, 0.5));
        assert_eq!(mesh.vertices()[0].position, Vec3::new(-0.5, -0.5, 0.0));
    }

    #[test]
    fn flat_normals_point_up() {
        let mesh = MeshBuilder::new(1.0, MeshMode::Shaded).build(&Heightfield::flat(5, 5));
        for v in mesh.vertices() {
            assert!((v.normal - Vec3::Z).length() < 1e-6);
        }
    }

    #[test]
    fn sloped_normals_are_unit_and_lean_downhill() {
        let mesh = MeshBuilder::new(1.0, MeshMode::Shaded).build(&ramp(6, 6));
        for v in mesh.vertices() {
            assert!((v.normal.length() - 1.0).abs() < 1e-5);
            // Elevation grows with row (x), so normals lean toward -x.
            assert!(v.normal.x < 0.0);
            assert!(v.normal.z > 0.0);
        }
    }

    #[test]
    fn interior_normal_uses_unscaled_deltas() {
        // Row (1, 1) of a 4x4 ramp: deltas sum to 0.5, tangents (0.5, 0, 0.5)
        // and (0, 0.5, 0), so the normal is (-1, 0, 1) / sqrt(2).
        let hf = Heightfield::from_fn(4, 4, |row, _| row as f32 / 4.0);
        let expected = Vec3::new(-1.0, 0.0, 1.0).normalize();
        for z_scale in [0.25, 1.0, 3.0] {
            let mesh = MeshBuilder::new(z_scale, MeshMode::Shaded).build(&hf);
            let normal = mesh.vertices()[4 + 1].normal;
            assert!((normal - expected).length() < 1e-5, "z_scale {z_scale}: {normal:?}");
        }
    }
}
