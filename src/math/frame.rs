use super::{normalize_or_zero, project_local, Point3d, Vector3d};
use crate::error::ObstacleError;
use cgmath::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tolerance used when validating that a frame's axes are orthonormal.
const ORTHONORMAL_TOLERANCE: f64 = 1e-6;

/// An oriented, positioned coordinate system.
///
/// The local X, Y and Z axes are the `side`, `up` and `forward` vectors respectively.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LocalFrame {
    side: Vector3d,
    up: Vector3d,
    forward: Vector3d,
    position: Point3d,
}

impl Default for LocalFrame {
    fn default() -> Self {
        Self {
            side: Vector3d::unit_x(),
            up: Vector3d::unit_y(),
            forward: Vector3d::unit_z(),
            position: Point3d::origin(),
        }
    }
}

impl LocalFrame {
    /// Creates a frame from its axes and origin. The axes are trusted to be orthonormal.
    pub const fn new(side: Vector3d, up: Vector3d, forward: Vector3d, position: Point3d) -> Self {
        Self {
            side,
            up,
            forward,
            position,
        }
    }

    /// Creates a frame, checking that the axes are unit length and mutually orthogonal.
    pub fn try_new(
        side: Vector3d,
        up: Vector3d,
        forward: Vector3d,
        position: Point3d,
    ) -> Result<Self, ObstacleError> {
        let unit = |v: Vector3d| (v.magnitude() - 1.0).abs() < ORTHONORMAL_TOLERANCE;
        let orthogonal = |a: Vector3d, b: Vector3d| a.dot(b).abs() < ORTHONORMAL_TOLERANCE;
        if unit(side)
            && unit(up)
            && unit(forward)
            && orthogonal(side, up)
            && orthogonal(up, forward)
            && orthogonal(forward, side)
        {
            Ok(Self::new(side, up, forward, position))
        } else {
            log::warn!("Rejected frame: side={side:?} up={up:?} forward={forward:?}");
            Err(ObstacleError::DegenerateFrame)
        }
    }

    /// Creates a frame looking along `forward`, keeping `up` as close to `up_hint` as possible.
    ///
    /// Falls back to another up vector when `forward` is parallel to `up_hint`.
    pub fn from_forward(position: Point3d, forward: Vector3d, up_hint: Vector3d) -> Self {
        let forward = normalize_or_zero(forward);
        if forward == Vector3d::zero() {
            return Self {
                position,
                ..Self::default()
            };
        }
        let mut side = normalize_or_zero(up_hint.cross(forward));
        if side == Vector3d::zero() {
            let fallback = if forward.x.abs() < 0.9 {
                Vector3d::unit_x()
            } else {
                Vector3d::unit_y()
            };
            side = normalize_or_zero(fallback.cross(forward));
        }
        let up = forward.cross(side);
        Self::new(side, up, forward, position)
    }

    /// The local X axis.
    pub fn side(&self) -> Vector3d {
        self.side
    }

    /// The local Y axis.
    pub fn up(&self) -> Vector3d {
        self.up
    }

    /// The local Z axis.
    pub fn forward(&self) -> Vector3d {
        self.forward
    }

    /// The origin of the frame in world space.
    pub fn position(&self) -> Point3d {
        self.position
    }

    pub fn set_position(&mut self, position: Point3d) {
        self.position = position;
    }

    /// Re-orients the frame to look along `forward`, keeping the current up vector as a hint.
    pub fn set_forward(&mut self, forward: Vector3d) {
        *self = Self::from_forward(self.position, forward, self.up);
    }

    /// Transforms a world space point into local coordinates.
    pub fn localize_position(&self, point: Point3d) -> Point3d {
        project_local(point, self.position, self.side, self.up, self.forward)
    }

    /// Transforms a world space direction into local coordinates.
    pub fn localize_direction(&self, dir: Vector3d) -> Vector3d {
        Vector3d::new(dir.dot(self.side), dir.dot(self.up), dir.dot(self.forward))
    }

    /// Transforms a local point into world space.
    pub fn globalize_position(&self, point: Point3d) -> Point3d {
        self.position + self.globalize_direction(point.to_vec())
    }

    /// Transforms a local direction into world space.
    pub fn globalize_direction(&self, dir: Vector3d) -> Vector3d {
        self.side * dir.x + self.up * dir.y + self.forward * dir.z
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn rotated() -> LocalFrame {
        LocalFrame::from_forward(
            Point3d::new(1.0, 2.0, 3.0),
            Vector3d::new(1.0, 0.0, 1.0),
            Vector3d::unit_y(),
        )
    }

    #[test]
    fn from_forward_is_orthonormal() {
        let f = rotated();
        assert!(LocalFrame::try_new(f.side(), f.up(), f.forward(), f.position()).is_ok());
        assert_approx_eq!(f.up().y, 1.0);
    }

    #[test]
    fn from_forward_parallel_to_hint() {
        let f = LocalFrame::from_forward(Point3d::origin(), Vector3d::unit_y(), Vector3d::unit_y());
        assert!(LocalFrame::try_new(f.side(), f.up(), f.forward(), f.position()).is_ok());
        assert_eq!(f.forward(), Vector3d::unit_y());
    }

    #[test]
    fn localize_round_trip() {
        let f = rotated();
        let p = Point3d::new(-4.0, 0.5, 7.0);
        let back = f.globalize_position(f.localize_position(p));
        assert_approx_eq!(back.x, p.x);
        assert_approx_eq!(back.y, p.y);
        assert_approx_eq!(back.z, p.z);
    }

    #[test]
    fn origin_localizes_to_zero() {
        let f = rotated();
        let local = f.localize_position(f.position());
        assert_eq!(local, Point3d::origin());
        let ahead = f.localize_position(f.position() + f.forward() * 2.0);
        assert_approx_eq!(ahead.z, 2.0);
    }

    #[test]
    fn rejects_skewed_axes() {
        let result = LocalFrame::try_new(
            Vector3d::unit_x(),
            Vector3d::new(1.0, 1.0, 0.0),
            Vector3d::unit_z(),
            Point3d::origin(),
        );
        assert_eq!(result, Err(ObstacleError::DegenerateFrame));
    }
}
