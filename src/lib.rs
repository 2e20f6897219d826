pub use cgmath;
pub use error::ObstacleError;
pub use math::{LocalFrame, Point3d, Vector3d};
pub use obstacle::{
    first_path_intersection_with_obstacle_group, steer_to_avoid_obstacles, BoxObstacle,
    GroupIntersection, Obstacle, ObstacleShape, PathIntersection, PlanarShape, PlaneObstacle,
    RectangleObstacle, SeenFrom, SphereObstacle,
};
pub use scene::{ObstacleSet, SceneIntersection};
use slotmap::new_key_type;
pub use slotmap::{Key, KeyData};
pub use vehicle::{SimpleVehicle, Vehicle, VehicleAttributes};

pub mod annotate;
mod error;
pub mod math;
mod obstacle;
mod scene;
mod vehicle;

new_key_type! {
    /// Unique ID of an obstacle in an [ObstacleSet].
    pub struct ObstacleId;
}
