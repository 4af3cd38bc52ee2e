//! Camera module - orthonormal view basis and orbit camera
//!
//! The basis is derived from the camera position, its focus point and a
//! world-up hint:
//!
//! - `look  = normalize(position - focus)` (points from the focus to the eye)
//! - `right = normalize(cross(up_hint, look))`
//! - `up    = normalize(cross(look, right))`
//!
//! The view matrix has columns `(right, up, look)`. It is a pure rotation,
//! so its transpose is its inverse and maps world offsets into view space.
//!
//! When `look` is parallel to the up hint the cross product vanishes; the
//! basis then swaps in a secondary world axis (Y, or X when looking along Y).

use glam::{Mat3, Quat, Vec3};
use tracing::debug;

use crate::types::{MAX_DISTANCE, MIN_DISTANCE, OrbitDirection};

/// Squared length below which a cross product counts as degenerate.
const DEGENERATE_EPS: f32 = 1e-10;

/// Orbit up/down stops this close (as a cosine) to the up hint.
const POLE_LIMIT: f32 = 0.999;

/// Orthonormal camera frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub right: Vec3,
    pub up: Vec3,
    pub look: Vec3,
}

impl CameraBasis {
    /// Derive the basis for an eye at `position` looking at `focus`.
    ///
    /// An eye sitting on its focus point looks down the negated up hint.
    pub fn new(position: Vec3, focus: Vec3, up_hint: Vec3) -> Self {
        let hint = up_hint.try_normalize().unwrap_or(Vec3::Z);
        let look = (position - focus).try_normalize().unwrap_or(hint);

        let mut right = hint.cross(look);
        if right.length_squared() < DEGENERATE_EPS {
            let fallback = fallback_hint(look);
            debug!(?look, ?fallback, "look parallel to up hint, using fallback axis");
            right = fallback.cross(look);
        }
        let right = right.normalize();
        let up = look.cross(right).normalize();

        Self { right, up, look }
    }

    /// Rotation with columns `(right, up, look)` (view to world).
    pub fn view_matrix(&self) -> Mat3 {
        Mat3::from_cols(self.right, self.up, self.look)
    }

    /// Map a world-space offset into view space.
    ///
    /// Equivalent to `view_matrix().transpose() * offset`.
    #[inline]
    pub fn to_view(&self, offset: Vec3) -> Vec3 {
        Vec3::new(
            self.right.dot(offset),
            self.up.dot(offset),
            self.look.dot(offset),
        )
    }
}

fn fallback_hint(look: Vec3) -> Vec3 {
    if look.y.abs() < 0.9 {
        Vec3::Y
    } else {
        Vec3::X
    }
}

/// Orbit camera: an eye circling a fixed focus point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: Vec3,
    focus: Vec3,
    up_hint: Vec3,
    basis: CameraBasis,
}

impl Default for Camera {
    /// Eye at (1, 1, 1) looking at the origin.
    fn default() -> Self {
        Self::looking_at_origin(Vec3::ONE)
    }
}

impl Camera {
    pub fn new(position: Vec3, focus: Vec3, up_hint: Vec3) -> Self {
        Self {
            position,
            focus,
            up_hint,
            basis: CameraBasis::new(position, focus, up_hint),
        }
    }

    /// Camera at `position` looking at the origin with +Z up.
    pub fn looking_at_origin(position: Vec3) -> Self {
        Self::new(position, Vec3::ZERO, Vec3::Z)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn focus(&self) -> Vec3 {
        self.focus
    }

    pub fn up_hint(&self) -> Vec3 {
        self.up_hint
    }

    pub fn basis(&self) -> &CameraBasis {
        &self.basis
    }

    pub fn distance(&self) -> f32 {
        (self.position - self.focus).length()
    }

    /// Rotate the eye about the focus by `step` radians.
    ///
    /// Left/right spin about the up hint; up/down tilt about the basis
    /// `right` axis. A tilt that would move the eye onto the up-hint axis
    /// is refused and returns false.
    pub fn orbit(&mut self, dir: OrbitDirection, step: f32) -> bool {
        let offset = self.position - self.focus;
        let rotation = match dir {
            OrbitDirection::Left => Quat::from_axis_angle(self.axis_up(), step),
            OrbitDirection::Right => Quat::from_axis_angle(self.axis_up(), -step),
            OrbitDirection::Up => Quat::from_axis_angle(self.basis.right, -step),
            OrbitDirection::Down => Quat::from_axis_angle(self.basis.right, step),
        };
        let next = rotation * offset;

        if matches!(dir, OrbitDirection::Up | OrbitDirection::Down) {
            let hint = self.axis_up();
            let before = offset.normalize_or_zero().dot(hint).abs();
            let after = next.normalize_or_zero().dot(hint).abs();
            if after > POLE_LIMIT && after > before {
                return false;
            }
        }

        self.set_position(self.focus + next);
        true
    }

    /// Scale the eye distance by `factor`, clamped to the allowed range.
    ///
    /// Returns the new distance.
    pub fn dolly(&mut self, factor: f32) -> f32 {
        let offset = self.position - self.focus;
        let dist = offset.length();
        let target = (dist * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
        let dir = offset.try_normalize().unwrap_or(self.basis.look);
        self.set_position(self.focus + dir * target);
        target
    }

    fn axis_up(&self) -> Vec3 {
        self.up_hint.try_normalize().unwrap_or(Vec3::Z)
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.basis = CameraBasis::new(position, self.focus, self.up_hint);
    }
}
