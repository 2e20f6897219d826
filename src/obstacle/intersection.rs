use super::Obstacle;
use crate::math::{normalize_or_zero, perpendicular_component, Point3d, Vector3d};
use crate::vehicle::Vehicle;
use cgmath::prelude::*;
use std::fmt;

/// The result of testing a vehicle's path against an obstacle.
///
/// Every field other than `intersect` and `obstacle` is zeroed when `intersect` is false.
#[derive(Clone, Copy)]
pub struct PathIntersection<'a> {
    /// Whether the path meets the obstacle's surface.
    pub intersect: bool,
    /// The distance along the path from the vehicle to the intersection, in m.
    pub distance: f64,
    /// The world space point of intersection.
    pub surface_point: Point3d,
    /// The outward unit normal at `surface_point`.
    pub surface_normal: Vector3d,
    /// The direction to steer away from the intersection.
    pub steer_hint: Vector3d,
    /// Whether the vehicle is outside the obstacle's solid region.
    pub vehicle_outside: bool,
    /// The obstacle that produced this result.
    pub obstacle: Option<&'a dyn Obstacle>,
}

impl<'a> PathIntersection<'a> {
    /// An empty result not associated with any obstacle.
    pub fn none() -> Self {
        Self {
            intersect: false,
            distance: 0.0,
            surface_point: Point3d::origin(),
            surface_normal: Vector3d::zero(),
            steer_hint: Vector3d::zero(),
            vehicle_outside: false,
            obstacle: None,
        }
    }

    /// An empty result for the given obstacle.
    pub fn miss(obstacle: &'a dyn Obstacle) -> Self {
        Self {
            obstacle: Some(obstacle),
            ..Self::none()
        }
    }

    /// Returns true if this result was produced by `obstacle`.
    pub fn is_from(&self, obstacle: &dyn Obstacle) -> bool {
        self.obstacle.is_some_and(|own| {
            own as *const _ as *const () == obstacle as *const _ as *const ()
        })
    }

    /// Re-attributes this result to another obstacle.
    pub fn with_obstacle<'b>(self, obstacle: &'b dyn Obstacle) -> PathIntersection<'b> {
        PathIntersection {
            intersect: self.intersect,
            distance: self.distance,
            surface_point: self.surface_point,
            surface_normal: self.surface_normal,
            steer_hint: self.steer_hint,
            vehicle_outside: self.vehicle_outside,
            obstacle: Some(obstacle),
        }
    }

    /// Determines the steering needed to avoid this intersection.
    ///
    /// Returns zero unless the intersection will be reached in strictly less than
    /// `min_time_to_collision` seconds at the vehicle's current speed. Otherwise
    /// returns the lateral part of `steer_hint`, scaled to the vehicle's maximum force.
    pub fn steer_to_avoid_if_needed(
        &self,
        vehicle: &dyn Vehicle,
        min_time_to_collision: f64,
    ) -> Vector3d {
        let min_distance = min_time_to_collision * vehicle.speed();
        if !self.intersect || !(self.distance < min_distance) {
            return Vector3d::zero();
        }

        let lateral = normalize_or_zero(perpendicular_component(self.steer_hint, vehicle.forward()));
        // Head-on: no preferred side, so veer along the vehicle's own side axis
        let lateral = if lateral == Vector3d::zero() {
            vehicle.side()
        } else {
            lateral
        };
        lateral * vehicle.max_force()
    }
}

impl Default for PathIntersection<'_> {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Debug for PathIntersection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathIntersection")
            .field("intersect", &self.intersect)
            .field("distance", &self.distance)
            .field("surface_point", &self.surface_point)
            .field("surface_normal", &self.surface_normal)
            .field("steer_hint", &self.steer_hint)
            .field("vehicle_outside", &self.vehicle_outside)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::obstacle::SphereObstacle;
    use crate::vehicle::{SimpleVehicle, VehicleAttributes};
    use assert_approx_eq::assert_approx_eq;

    fn moving_vehicle(speed: f64) -> SimpleVehicle {
        let mut vehicle = SimpleVehicle::new(VehicleAttributes {
            max_force: 2.0,
            max_speed: 10.0,
            ..Default::default()
        });
        vehicle.set_speed(speed);
        vehicle
    }

    fn hit(distance: f64, hint: Vector3d) -> PathIntersection<'static> {
        PathIntersection {
            intersect: true,
            distance,
            steer_hint: hint,
            vehicle_outside: true,
            ..PathIntersection::none()
        }
    }

    #[test]
    fn no_intersection_no_steering() {
        let vehicle = moving_vehicle(1.0);
        let pi = PathIntersection::none();
        assert_eq!(pi.steer_to_avoid_if_needed(&vehicle, 100.0), Vector3d::zero());
    }

    #[test]
    fn horizon_gating() {
        // 10 m away at 2 m/s: reached in 5 s
        let vehicle = moving_vehicle(2.0);
        let pi = hit(10.0, Vector3d::new(1.0, 0.0, -1.0));
        assert_eq!(pi.steer_to_avoid_if_needed(&vehicle, 4.0), Vector3d::zero());
        assert_eq!(pi.steer_to_avoid_if_needed(&vehicle, 5.0), Vector3d::zero());
        let steer = pi.steer_to_avoid_if_needed(&vehicle, 6.0);
        assert_approx_eq!(steer.x, 2.0);
        assert_approx_eq!(steer.z, 0.0);
    }

    #[test]
    fn stationary_vehicle_never_steers() {
        let vehicle = moving_vehicle(0.0);
        let pi = hit(0.0, Vector3d::unit_x());
        assert_eq!(pi.steer_to_avoid_if_needed(&vehicle, 100.0), Vector3d::zero());
    }

    #[test]
    fn head_on_uses_side_axis() {
        let vehicle = moving_vehicle(1.0);
        let pi = hit(1.0, -Vector3d::unit_z());
        let steer = pi.steer_to_avoid_if_needed(&vehicle, 10.0);
        assert_approx_eq!(steer.magnitude(), 2.0);
        assert_approx_eq!(steer.dot(vehicle.side()), 2.0);
    }

    #[test]
    fn identifies_source_obstacle() {
        let a = SphereObstacle::default();
        let b = SphereObstacle::default();
        let pi = PathIntersection::miss(&a);
        assert!(pi.is_from(&a));
        assert!(!pi.is_from(&b));
        assert!(!PathIntersection::none().is_from(&a));
    }
}
