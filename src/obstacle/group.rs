use super::{Obstacle, PathIntersection};
use crate::math::Vector3d;
use crate::vehicle::Vehicle;

/// The nearest and next-nearest intersections of a vehicle's path with a group of obstacles.
#[derive(Clone, Copy, Debug, Default)]
pub struct GroupIntersection<'a> {
    pub nearest: PathIntersection<'a>,
    pub next: PathIntersection<'a>,
}

/// Keeps the two nearest intersections offered to it, along with a key for each.
///
/// Ties keep whichever intersection was offered first.
pub(crate) struct NearestPair<'a, K> {
    pub nearest: Option<(K, PathIntersection<'a>)>,
    pub next: Option<(K, PathIntersection<'a>)>,
}

impl<'a, K> NearestPair<'a, K> {
    pub fn new() -> Self {
        Self {
            nearest: None,
            next: None,
        }
    }

    pub fn offer(&mut self, key: K, pi: PathIntersection<'a>) {
        if !pi.intersect {
            return;
        }
        let closer = |other: &Option<(K, PathIntersection<'a>)>| {
            other.as_ref().map_or(true, |(_, o)| pi.distance < o.distance)
        };
        if closer(&self.nearest) {
            self.next = self.nearest.replace((key, pi));
        } else if closer(&self.next) {
            self.next = Some((key, pi));
        }
    }

    pub fn into_group(self) -> GroupIntersection<'a> {
        GroupIntersection {
            nearest: self.nearest.map_or_else(PathIntersection::none, |(_, pi)| pi),
            next: self.next.map_or_else(PathIntersection::none, |(_, pi)| pi),
        }
    }
}

/// Finds the nearest and next-nearest intersections of the vehicle's path with any of
/// the obstacles, in a single pass.
///
/// Either result has `intersect == false` if fewer obstacles were hit.
pub fn first_path_intersection_with_obstacle_group<'a, O, I>(
    vehicle: &dyn Vehicle,
    obstacles: I,
) -> GroupIntersection<'a>
where
    O: Obstacle + ?Sized + 'a,
    I: IntoIterator<Item = &'a O>,
{
    let mut pair = NearestPair::new();
    for (idx, obstacle) in obstacles.into_iter().enumerate() {
        pair.offer(idx, obstacle.find_intersection_with_vehicle_path(vehicle));
    }
    log::trace!(
        "Path intersection: nearest={:?} next={:?}",
        pair.nearest.as_ref().map(|(idx, pi)| (idx, pi.distance)),
        pair.next.as_ref().map(|(idx, pi)| (idx, pi.distance)),
    );
    pair.into_group()
}

/// Computes the steering needed to avoid the nearest obstacle on the vehicle's path.
pub fn steer_to_avoid_obstacles<'a, O, I>(
    vehicle: &dyn Vehicle,
    min_time_to_collision: f64,
    obstacles: I,
) -> Vector3d
where
    O: Obstacle + ?Sized + 'a,
    I: IntoIterator<Item = &'a O>,
{
    first_path_intersection_with_obstacle_group(vehicle, obstacles)
        .nearest
        .steer_to_avoid_if_needed(vehicle, min_time_to_collision)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::Point3d;
    use crate::obstacle::{ObstacleShape, PlaneObstacle, SphereObstacle};
    use crate::vehicle::{SimpleVehicle, VehicleAttributes};
    use assert_approx_eq::assert_approx_eq;
    use cgmath::prelude::*;

    fn vehicle() -> SimpleVehicle {
        let mut vehicle = SimpleVehicle::new(VehicleAttributes {
            radius: 0.0,
            max_force: 1.0,
            ..Default::default()
        });
        vehicle.set_speed(1.0);
        vehicle
    }

    /// A unit sphere whose near surface is `distance` ahead of the origin along +Z.
    fn sphere_ahead(distance: f64) -> SphereObstacle {
        SphereObstacle::new(1.0, Point3d::new(0.0, 0.0, distance + 1.0))
    }

    #[test]
    fn empty_group() {
        let group: [&dyn Obstacle; 0] = [];
        let result = first_path_intersection_with_obstacle_group(&vehicle(), group);
        assert!(!result.nearest.intersect);
        assert!(!result.next.intersect);
        assert_eq!(steer_to_avoid_obstacles(&vehicle(), 10.0, group), Vector3d::zero());
    }

    #[test]
    fn nearest_and_next() {
        let spheres = [sphere_ahead(5.0), sphere_ahead(10.0), sphere_ahead(2.0)];
        let result = first_path_intersection_with_obstacle_group(&vehicle(), &spheres);
        assert_approx_eq!(result.nearest.distance, 2.0);
        assert_approx_eq!(result.next.distance, 5.0);
        assert!(result.nearest.is_from(&spheres[2]));
        assert!(result.next.is_from(&spheres[0]));
    }

    #[test]
    fn single_hit_has_no_next() {
        let spheres = [sphere_ahead(5.0), SphereObstacle::new(1.0, Point3d::new(10.0, 0.0, 0.0))];
        let result = first_path_intersection_with_obstacle_group(&vehicle(), &spheres);
        assert!(result.nearest.intersect);
        assert!(result.nearest.is_from(&spheres[0]));
        assert!(!result.next.intersect);
    }

    #[test]
    fn ties_keep_first() {
        let spheres = [sphere_ahead(4.0), sphere_ahead(4.0), sphere_ahead(4.0)];
        let result = first_path_intersection_with_obstacle_group(&vehicle(), &spheres);
        assert!(result.nearest.is_from(&spheres[0]));
        assert!(result.next.is_from(&spheres[1]));
    }

    #[test]
    fn mixed_trait_objects() {
        let sphere = sphere_ahead(8.0);
        let mut frame = crate::math::LocalFrame::default();
        frame.set_position(Point3d::new(0.0, 0.0, 3.0));
        frame.set_forward(-Vector3d::unit_z());
        let plane = PlaneObstacle::new(frame);
        let group: Vec<&dyn Obstacle> = vec![&sphere as &dyn Obstacle, &plane];
        let result = first_path_intersection_with_obstacle_group(&vehicle(), group.iter().copied());
        assert!(result.nearest.is_from(&plane));
        assert!(result.next.is_from(&sphere));
        assert_approx_eq!(result.nearest.distance, 3.0);
    }

    #[test]
    fn enum_group_refers_to_members() {
        let shapes: Vec<ObstacleShape> = vec![sphere_ahead(6.0).into(), sphere_ahead(1.0).into()];
        let result = first_path_intersection_with_obstacle_group(&vehicle(), &shapes);
        assert!(result.nearest.is_from(&shapes[1]));
        assert!(result.next.is_from(&shapes[0]));
    }

    #[test]
    fn steers_for_nearest_only_within_horizon() {
        let spheres = [sphere_ahead(5.0), SphereObstacle::new(1.0, Point3d::new(0.5, 0.0, 3.0))];
        let far = steer_to_avoid_obstacles(&vehicle(), 1.0, &spheres);
        assert_eq!(far, Vector3d::zero());
        let near = steer_to_avoid_obstacles(&vehicle(), 10.0, &spheres);
        assert_approx_eq!(near.magnitude(), 1.0);
        // Obstacle centre is to the +X side, so steer toward -X
        assert!(near.x < 0.0);
    }
}
