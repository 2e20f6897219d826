use super::{Obstacle, PathIntersection, SeenFrom};
use crate::error::{check_dimension, ObstacleError};
use crate::math::{normalize_or_zero, Point3d, Vector3d};
use crate::vehicle::Vehicle;
use cgmath::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A ball-shaped obstacle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SphereObstacle {
    radius: f64,
    center: Point3d,
    #[cfg_attr(feature = "serde", serde(default))]
    seen_from: SeenFrom,
}

impl SphereObstacle {
    pub fn new(radius: f64, center: Point3d) -> Self {
        Self {
            radius,
            center,
            seen_from: SeenFrom::default(),
        }
    }

    /// Creates a sphere, checking that the radius is finite and non-negative.
    pub fn try_new(radius: f64, center: Point3d) -> Result<Self, ObstacleError> {
        Ok(Self::new(check_dimension("radius", radius)?, center))
    }

    /// Returns a copy of this sphere with the given eversion.
    pub fn with_seen_from(self, seen_from: SeenFrom) -> Self {
        Self { seen_from, ..self }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn center(&self) -> Point3d {
        self.center
    }
}

impl Default for SphereObstacle {
    fn default() -> Self {
        Self::new(1.0, Point3d::origin())
    }
}

impl Obstacle for SphereObstacle {
    /// Intersects the vehicle's path with the sphere inflated by the vehicle's radius.
    fn find_intersection_with_vehicle_path(&self, vehicle: &dyn Vehicle) -> PathIntersection<'_> {
        let mut pi = PathIntersection::miss(self);

        let to_center = self.center - vehicle.position();
        let center_distance = to_center.magnitude();
        let combined_radius = self.radius + vehicle.radius();
        pi.vehicle_outside = center_distance >= combined_radius;

        // A vehicle whose centre has crossed the wall of a hollow sphere must head back in
        if self.seen_from == SeenFrom::Inside && center_distance > self.radius {
            pi.intersect = true;
            pi.vehicle_outside = true;
            pi.surface_normal = normalize_or_zero(-to_center);
            pi.surface_point = self.center + pi.surface_normal * self.radius;
            pi.steer_hint = normalize_or_zero(to_center);
            return pi;
        }

        // Solve |P + tD - C| = R + r for the path parameter t
        let dir = vehicle.path_direction();
        let along = to_center.dot(dir);
        let c = to_center.magnitude2() - combined_radius * combined_radius;
        let overlapping = c < 0.0;
        if dir == Vector3d::zero() && !overlapping {
            return pi;
        }
        let discriminant = along * along - c;
        if discriminant < 0.0 {
            return pi;
        }
        let s = discriminant.sqrt();
        let (near, far) = (along - s, along + s);

        // Both crossings are behind the vehicle
        if far <= 0.0 {
            return pi;
        }

        pi.intersect = true;
        pi.distance = if near > 0.0 {
            near
        } else if self.seen_from == SeenFrom::Outside || dir == Vector3d::zero() {
            // Inside a solid obstacle
            0.0
        } else {
            far
        };

        let contact = vehicle.position() + dir * pi.distance;
        pi.surface_normal = normalize_or_zero(contact - self.center);
        pi.surface_point = if pi.surface_normal == Vector3d::zero() {
            contact
        } else {
            self.center + pi.surface_normal * self.radius
        };
        pi.steer_hint = match self.seen_from {
            SeenFrom::Outside => pi.surface_normal,
            SeenFrom::Inside => -pi.surface_normal,
            SeenFrom::Both if pi.vehicle_outside => pi.surface_normal,
            SeenFrom::Both => -pi.surface_normal,
        };
        pi
    }

    fn seen_from(&self) -> SeenFrom {
        self.seen_from
    }

    fn set_seen_from(&mut self, seen_from: SeenFrom) {
        self.seen_from = seen_from;
    }
}
