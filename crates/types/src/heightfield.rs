//! Heightfield module - the raw elevation grid
//!
//! A heightfield is a `width x height` grid of elevation samples normalized
//! to [0, 1]. Storage is one contiguous row-major buffer (`row * width + col`).
//! Coordinates: `row` ranges 0..height (top to bottom), `col` ranges 0..width.
//! The grid is immutable once built.

use thiserror::Error;

/// Reasons a sample buffer cannot become a heightfield.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HeightfieldError {
    #[error("expected {expected} samples for a {width}x{height} grid, got {actual}")]
    SizeMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("sample at row {row}, col {col} is {value}, outside [0, 1]")]
    OutOfRange { row: usize, col: usize, value: f32 },
}

/// Immutable elevation grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Heightfield {
    width: usize,
    height: usize,
    /// Flat array of samples, row-major order (row * width + col)
    samples: Vec<f32>,
}

impl Heightfield {
    /// Build a heightfield from normalized samples.
    ///
    /// Fails if the buffer length does not match the dimensions or a sample
    /// is not a finite value in [0, 1].
    pub fn new(width: usize, height: usize, samples: Vec<f32>) -> Result<Self, HeightfieldError> {
        let expected = width * height;
        if samples.len() != expected {
            return Err(HeightfieldError::SizeMismatch {
                width,
                height,
                expected,
                actual: samples.len(),
            });
        }
        if let Some(idx) = samples
            .iter()
            .position(|s| !s.is_finite() || !(0.0..=1.0).contains(s))
        {
            return Err(HeightfieldError::OutOfRange {
                row: idx / width,
                col: idx % width,
                value: samples[idx],
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Build a heightfield from raw 8-bit samples (e.g. the red channel of a
    /// decoded image), mapping [0, 255] onto [0, 1].
    pub fn from_red_channel(
        width: usize,
        height: usize,
        bytes: &[u8],
    ) -> Result<Self, HeightfieldError> {
        let samples = bytes.iter().map(|&b| b as f32 / 255.0).collect();
        Self::new(width, height, samples)
    }

    /// Build a heightfield by evaluating `f(row, col)` for every cell.
    ///
    /// Results are clamped to [0, 1]; non-finite results become 0.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut samples = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                let v = f(row, col);
                samples.push(if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 });
            }
        }
        Self {
            width,
            height,
            samples,
        }
    }

    /// A flat (all zero) heightfield.
    pub fn flat(width: usize, height: usize) -> Self {
        Self::from_fn(width, height, |_, _| 0.0)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True when the grid is too small to produce any topology.
    pub fn is_degenerate(&self) -> bool {
        self.width < 2 || self.height < 2
    }

    /// Get the sample at (row, col).
    /// Returns None if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.samples[row * self.width + col])
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }
}
