use super::{BoxObstacle, Obstacle, PathIntersection, PlaneObstacle, RectangleObstacle};
use super::{SeenFrom, SphereObstacle};
use crate::vehicle::Vehicle;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Any of the built-in obstacle shapes.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum ObstacleShape {
    Sphere(SphereObstacle),
    Box(BoxObstacle),
    Plane(PlaneObstacle),
    Rectangle(RectangleObstacle),
}

impl ObstacleShape {
    fn as_obstacle(&self) -> &dyn Obstacle {
        match self {
            Self::Sphere(s) => s,
            Self::Box(b) => b,
            Self::Plane(p) => p,
            Self::Rectangle(r) => r,
        }
    }

    fn as_obstacle_mut(&mut self) -> &mut dyn Obstacle {
        match self {
            Self::Sphere(s) => s,
            Self::Box(b) => b,
            Self::Plane(p) => p,
            Self::Rectangle(r) => r,
        }
    }
}

impl Obstacle for ObstacleShape {
    fn find_intersection_with_vehicle_path(&self, vehicle: &dyn Vehicle) -> PathIntersection<'_> {
        self.as_obstacle()
            .find_intersection_with_vehicle_path(vehicle)
            .with_obstacle(self)
    }

    fn seen_from(&self) -> SeenFrom {
        self.as_obstacle().seen_from()
    }

    fn set_seen_from(&mut self, seen_from: SeenFrom) {
        self.as_obstacle_mut().set_seen_from(seen_from);
    }
}

impl From<SphereObstacle> for ObstacleShape {
    fn from(value: SphereObstacle) -> Self {
        Self::Sphere(value)
    }
}

impl From<BoxObstacle> for ObstacleShape {
    fn from(value: BoxObstacle) -> Self {
        Self::Box(value)
    }
}

impl From<PlaneObstacle> for ObstacleShape {
    fn from(value: PlaneObstacle) -> Self {
        Self::Plane(value)
    }
}

impl From<RectangleObstacle> for ObstacleShape {
    fn from(value: RectangleObstacle) -> Self {
        Self::Rectangle(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::Point3d;
    use cgmath::EuclideanSpace;

    #[test]
    fn seen_from_reaches_variant() {
        let mut shape = ObstacleShape::from(SphereObstacle::new(1.0, Point3d::origin()));
        assert_eq!(shape.seen_from(), SeenFrom::Outside);
        shape.set_seen_from(SeenFrom::Both);
        assert_eq!(shape.seen_from(), SeenFrom::Both);
        match shape {
            ObstacleShape::Sphere(s) => assert_eq!(s.seen_from(), SeenFrom::Both),
            _ => unreachable!(),
        }
    }
}
