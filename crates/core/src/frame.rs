//! Frame payload handed to a 2-D rasterizer.
//!
//! A frame is a transient value: it is rebuilt from scratch on every render
//! and never patched in place.

use serde::Serialize;

use crate::types::Rgba;

/// How `Frame::indices` groups vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Primitive {
    /// Consecutive index pairs are line segments
    Lines,
    /// Consecutive index triples are triangles, in draw order
    Triangles,
}

impl Primitive {
    /// Indices per element
    pub fn arity(&self) -> usize {
        match self {
            Primitive::Lines => 2,
            Primitive::Triangles => 3,
        }
    }
}

/// Screen-space geometry for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub primitive: Primitive,
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Pixel positions, one per vertex
    pub positions: Vec<[f32; 2]>,
    /// View-space depth, one per vertex
    pub depths: Vec<f32>,
    /// Shaded color, one per vertex
    pub colors: Vec<Rgba>,
    /// Element membership in draw order
    pub indices: Vec<u32>,
}

impl Frame {
    pub fn empty(primitive: Primitive, width: u32, height: u32) -> Self {
        Self {
            primitive,
            width,
            height,
            positions: Vec::new(),
            depths: Vec::new(),
            colors: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Number of lines or triangles.
    pub fn element_count(&self) -> usize {
        self.indices.len() / self.primitive.arity()
    }

    /// Index groups in draw order.
    pub fn elements(&self) -> impl Iterator<Item = &[u32]> {
        self.indices.chunks_exact(self.primitive.arity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elements_group_by_arity() {
        let mut frame = Frame::empty(Primitive::Lines, 4, 4);
        frame.indices = vec![0, 1, 1, 2, 2];
        assert_eq!(frame.element_count(), 2);
        assert_eq!(frame.elements().collect::<Vec<_>>(), vec![&[0, 1][..], &[1, 2][..]]);
    }

    #[test]
    fn serializes_with_camel_case_tags() {
        let mut frame = Frame::empty(Primitive::Triangles, 640, 480);
        frame.positions = vec![[1.0, 2.0]];
        frame.colors = vec![Rgba::WHITE];
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["primitive"], "triangles");
        assert_eq!(json["width"], 640);
        assert_eq!(json["positions"][0][1], 2.0);
        assert_eq!(json["colors"][0]["r"], 255);
    }
}
