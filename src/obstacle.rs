//! Obstacles and the avoidance policy built on top of them.

use crate::math::Vector3d;
use crate::vehicle::Vehicle;
pub use cuboid::BoxObstacle;
pub(crate) use group::NearestPair;
pub use group::{
    first_path_intersection_with_obstacle_group, steer_to_avoid_obstacles, GroupIntersection,
};
pub use intersection::PathIntersection;
pub use plane::{PlanarShape, PlaneObstacle, RectangleObstacle};
pub use shape::ObstacleShape;
pub use sphere::SphereObstacle;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod cuboid;
mod group;
mod intersection;
mod plane;
mod shape;
mod sphere;

/// Whether an obstacle constrains vehicles to stay outside it, inside it, or both.
///
/// "Inside" describes clear space within a solid, such as the interior of a room.
/// "Outside" describes a solid chunk in the midst of clear space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SeenFrom {
    #[default]
    Outside,
    Inside,
    Both,
}

/// A shape in space that vehicles should avoid.
pub trait Obstacle {
    /// Finds the first intersection of the vehicle's projected path with this obstacle.
    ///
    /// Returns a result with `intersect == false` when the path misses.
    fn find_intersection_with_vehicle_path(&self, vehicle: &dyn Vehicle) -> PathIntersection<'_>;

    fn seen_from(&self) -> SeenFrom;

    fn set_seen_from(&mut self, seen_from: SeenFrom);

    /// Computes the steering needed for the vehicle to avoid this obstacle, if any.
    fn steer_to_avoid(&self, vehicle: &dyn Vehicle, min_time_to_collision: f64) -> Vector3d {
        self.find_intersection_with_vehicle_path(vehicle)
            .steer_to_avoid_if_needed(vehicle, min_time_to_collision)
    }
}
