use super::{first_path_intersection_with_obstacle_group, Obstacle, PathIntersection, SeenFrom};
use super::RectangleObstacle;
use crate::error::{check_dimension, ObstacleError};
use crate::math::{normalize_or_zero, LocalFrame, Point3d};
use crate::vehicle::Vehicle;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A box-shaped (cuboid) obstacle centred on and aligned with a local frame.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoxObstacle {
    /// Extent along the local X (side) axis.
    width: f64,
    /// Extent along the local Y (up) axis.
    height: f64,
    /// Extent along the local Z (forward) axis.
    depth: f64,
    frame: LocalFrame,
    #[cfg_attr(feature = "serde", serde(default))]
    seen_from: SeenFrom,
}

impl BoxObstacle {
    pub fn new(width: f64, height: f64, depth: f64, frame: LocalFrame) -> Self {
        Self {
            width,
            height,
            depth,
            frame,
            seen_from: SeenFrom::default(),
        }
    }

    /// Creates a box, checking that all dimensions are finite and non-negative.
    pub fn try_new(
        width: f64,
        height: f64,
        depth: f64,
        frame: LocalFrame,
    ) -> Result<Self, ObstacleError> {
        Ok(Self::new(
            check_dimension("width", width)?,
            check_dimension("height", height)?,
            check_dimension("depth", depth)?,
            frame,
        ))
    }

    /// Returns a copy of this box with the given eversion.
    pub fn with_seen_from(self, seen_from: SeenFrom) -> Self {
        Self { seen_from, ..self }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn depth(&self) -> f64 {
        self.depth
    }

    pub fn frame(&self) -> &LocalFrame {
        &self.frame
    }

    /// The world space corner at the given local sign combination, e.g. `[1.0, -1.0, 1.0]`.
    pub fn corner(&self, signs: [f64; 3]) -> Point3d {
        self.frame.globalize_position(Point3d::new(
            0.5 * self.width * signs[0],
            0.5 * self.height * signs[1],
            0.5 * self.depth * signs[2],
        ))
    }

    /// The six faces of the box, each with its forward axis pointing out of the box.
    pub fn faces(&self) -> [RectangleObstacle; 6] {
        let (w, h, d) = (self.width, self.height, self.depth);
        let (s, u, f, p) = (
            self.frame.side(),
            self.frame.up(),
            self.frame.forward(),
            self.frame.position(),
        );
        let hw = s * (0.5 * w);
        let hh = u * (0.5 * h);
        let hd = f * (0.5 * d);
        let face = |width, height, side, up, forward, centre| {
            RectangleObstacle::new(width, height, LocalFrame::new(side, up, forward, centre))
                .with_seen_from(self.seen_from)
        };
        [
            face(w, h, s, u, f, p + hd),    // front
            face(w, h, -s, u, -f, p - hd),  // back
            face(d, h, -f, u, s, p + hw),   // side
            face(d, h, f, u, -s, p - hw),   // other side
            face(w, d, s, -f, u, p + hh),   // top
            face(w, d, -s, -f, -u, p - hh), // bottom
        ]
    }
}

impl Default for BoxObstacle {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0, LocalFrame::default())
    }
}

impl Obstacle for BoxObstacle {
    /// Finds the nearest face crossed by the vehicle's path.
    fn find_intersection_with_vehicle_path(&self, vehicle: &dyn Vehicle) -> PathIntersection<'_> {
        let faces = self.faces();
        let nearest = first_path_intersection_with_obstacle_group(vehicle, &faces).nearest;
        if !nearest.intersect {
            return PathIntersection::miss(self);
        }

        let mut pi = nearest.with_obstacle(self);
        let sign = if pi.vehicle_outside { 1.0 } else { -1.0 };
        pi.steer_hint = normalize_or_zero(pi.surface_point - self.frame.position()) * sign;
        pi
    }

    fn seen_from(&self) -> SeenFrom {
        self.seen_from
    }

    fn set_seen_from(&mut self, seen_from: SeenFrom) {
        self.seen_from = seen_from;
    }
}
