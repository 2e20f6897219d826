use super::{Obstacle, PathIntersection, SeenFrom};
use crate::error::{check_dimension, ObstacleError};
use crate::math::{normalize_or_zero, LocalFrame, Point3d, DIRECTION_EPSILON};
use crate::vehicle::Vehicle;
use cgmath::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 2D shape lying on the XY (side/up) plane of a local frame.
///
/// The +Z (forward) half-space is considered "outside" the obstacle.
pub trait PlanarShape: Obstacle {
    /// The frame the shape is defined in.
    fn frame(&self) -> &LocalFrame;

    /// Determines if a point on the local XY plane lies within the shape,
    /// with the shape grown by `radius` on every side.
    fn xy_point_inside_shape(&self, point: Point3d, radius: f64) -> bool;
}

/// Intersects a vehicle's path with a planar shape, working in the shape's local frame.
fn find_planar_intersection<'a, S: PlanarShape>(
    shape: &'a S,
    vehicle: &dyn Vehicle,
) -> PathIntersection<'a> {
    let mut pi = PathIntersection::miss(shape);
    let frame = shape.frame();

    let lp = frame.localize_position(vehicle.position());
    let ld = frame.localize_direction(vehicle.path_direction());

    // Path parallel to the plane, or no path at all
    if ld.z.abs() < DIRECTION_EPSILON {
        return pi;
    }

    // Heading away from the plane
    if (lp.z > 0.0 && ld.z > 0.0) || (lp.z < 0.0 && ld.z < 0.0) {
        return pi;
    }

    // The plane is not seen from the vehicle's side
    match shape.seen_from() {
        SeenFrom::Outside if lp.z < 0.0 => return pi,
        SeenFrom::Inside if lp.z > 0.0 => return pi,
        _ => {}
    }

    let t = -lp.z / ld.z;
    let crossing = Point3d::new(lp.x + ld.x * t, lp.y + ld.y * t, 0.0);
    if !shape.xy_point_inside_shape(crossing, vehicle.radius()) {
        return pi;
    }

    let radial = frame.globalize_direction(normalize_or_zero(crossing.to_vec()));
    let side_sign = if lp.z > 0.0 { 1.0 } else { -1.0 };
    let opposing_normal = frame.forward() * side_sign;

    pi.intersect = true;
    pi.distance = (lp - crossing).magnitude();
    pi.steer_hint = opposing_normal + radial;
    pi.surface_point = frame.globalize_position(crossing);
    pi.surface_normal = opposing_normal;
    pi.vehicle_outside = lp.z > 0.0;
    pi
}

/// An infinite planar obstacle: the XY plane of a local frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlaneObstacle {
    frame: LocalFrame,
    #[cfg_attr(feature = "serde", serde(default))]
    seen_from: SeenFrom,
}

impl PlaneObstacle {
    pub fn new(frame: LocalFrame) -> Self {
        Self {
            frame,
            seen_from: SeenFrom::default(),
        }
    }

    /// Returns a copy of this plane with the given eversion.
    pub fn with_seen_from(self, seen_from: SeenFrom) -> Self {
        Self { seen_from, ..self }
    }
}

impl PlanarShape for PlaneObstacle {
    fn frame(&self) -> &LocalFrame {
        &self.frame
    }

    fn xy_point_inside_shape(&self, _point: Point3d, _radius: f64) -> bool {
        true
    }
}

impl Obstacle for PlaneObstacle {
    fn find_intersection_with_vehicle_path(&self, vehicle: &dyn Vehicle) -> PathIntersection<'_> {
        find_planar_intersection(self, vehicle)
    }

    fn seen_from(&self) -> SeenFrom {
        self.seen_from
    }

    fn set_seen_from(&mut self, seen_from: SeenFrom) {
        self.seen_from = seen_from;
    }
}

/// A rectangle centred on the XY plane of a local frame.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RectangleObstacle {
    /// Extent along the local X (side) axis.
    width: f64,
    /// Extent along the local Y (up) axis.
    height: f64,
    frame: LocalFrame,
    #[cfg_attr(feature = "serde", serde(default))]
    seen_from: SeenFrom,
}

impl RectangleObstacle {
    pub fn new(width: f64, height: f64, frame: LocalFrame) -> Self {
        Self {
            width,
            height,
            frame,
            seen_from: SeenFrom::default(),
        }
    }

    /// Creates a rectangle, checking that both dimensions are finite and non-negative.
    pub fn try_new(width: f64, height: f64, frame: LocalFrame) -> Result<Self, ObstacleError> {
        Ok(Self::new(
            check_dimension("width", width)?,
            check_dimension("height", height)?,
            frame,
        ))
    }

    /// Returns a copy of this rectangle with the given eversion.
    pub fn with_seen_from(self, seen_from: SeenFrom) -> Self {
        Self { seen_from, ..self }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

impl Default for RectangleObstacle {
    fn default() -> Self {
        Self::new(1.0, 1.0, LocalFrame::default())
    }
}

impl PlanarShape for RectangleObstacle {
    fn frame(&self) -> &LocalFrame {
        &self.frame
    }

    fn xy_point_inside_shape(&self, point: Point3d, radius: f64) -> bool {
        let w = radius + 0.5 * self.width;
        let h = radius + 0.5 * self.height;
        point.x.abs() <= w && point.y.abs() <= h
    }
}

impl Obstacle for RectangleObstacle {
    fn find_intersection_with_vehicle_path(&self, vehicle: &dyn Vehicle) -> PathIntersection<'_> {
        find_planar_intersection(self, vehicle)
    }

    fn seen_from(&self) -> SeenFrom {
        self.seen_from
    }

    fn set_seen_from(&mut self, seen_from: SeenFrom) {
        self.seen_from = seen_from;
    }
}
