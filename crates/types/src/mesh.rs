//! Mesh data - vertices plus wireframe or triangle topology.

use glam::Vec3;

/// A model-space vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    /// Unit surface normal
    pub normal: Vec3,
    /// Last computed shading intensity in [0, 1]
    pub intensity: f32,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position,
            normal,
            intensity: 1.0,
        }
    }
}

/// Which topology to build from a heightfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MeshMode {
    /// Edges to the up and left neighbors of every grid point
    Wireframe,
    /// Two triangles per grid cell
    #[default]
    Shaded,
}

impl MeshMode {
    /// Parse a mode name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "wireframe" | "lines" => Some(MeshMode::Wireframe),
            "shaded" | "triangles" => Some(MeshMode::Shaded),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MeshMode::Wireframe => "wireframe",
            MeshMode::Shaded => "shaded",
        }
    }
}

/// Vertices plus an immutable topology, tagged by mode.
///
/// Indices refer into `vertices`. The topology is built once and never
/// mutated; only per-frame projected copies change.
#[derive(Debug, Clone, PartialEq)]
pub enum Mesh {
    Wireframe {
        vertices: Vec<Vertex>,
        edges: Vec<[u32; 2]>,
    },
    Shaded {
        vertices: Vec<Vertex>,
        triangles: Vec<[u32; 3]>,
    },
}

impl Mesh {
    pub fn mode(&self) -> MeshMode {
        match self {
            Mesh::Wireframe { .. } => MeshMode::Wireframe,
            Mesh::Shaded { .. } => MeshMode::Shaded,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        match self {
            Mesh::Wireframe { vertices, .. } | Mesh::Shaded { vertices, .. } => vertices,
        }
    }

    /// Number of edges or triangles.
    pub fn element_count(&self) -> usize {
        match self {
            Mesh::Wireframe { edges, .. } => edges.len(),
            Mesh::Shaded { triangles, .. } => triangles.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.element_count() == 0
    }
}
