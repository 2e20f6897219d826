use crate::math::Vector3d;
use crate::obstacle::{GroupIntersection, NearestPair, Obstacle, ObstacleShape, SeenFrom};
use crate::vehicle::Vehicle;
use crate::ObstacleId;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

/// A collection of obstacles owned on behalf of the application.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObstacleSet {
    obstacles: SlotMap<ObstacleId, ObstacleShape>,
}

/// The result of an intersection query against an [ObstacleSet].
#[derive(Clone, Copy, Debug, Default)]
pub struct SceneIntersection<'a> {
    /// The nearest and next-nearest intersections.
    pub intersections: GroupIntersection<'a>,
    /// The ID of the obstacle producing the nearest intersection, if any.
    pub nearest_id: Option<ObstacleId>,
    /// The ID of the obstacle producing the next-nearest intersection, if any.
    pub next_id: Option<ObstacleId>,
}

impl ObstacleSet {
    /// Creates an empty obstacle set.
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds an obstacle to the set.
    pub fn add(&mut self, obstacle: impl Into<ObstacleShape>) -> ObstacleId {
        let id = self.obstacles.insert(obstacle.into());
        log::debug!("Added obstacle {id:?}");
        id
    }

    /// Removes an obstacle from the set, returning it if it was present.
    pub fn remove(&mut self, id: ObstacleId) -> Option<ObstacleShape> {
        let obstacle = self.obstacles.remove(id);
        if obstacle.is_some() {
            log::debug!("Removed obstacle {id:?}");
        }
        obstacle
    }

    /// Gets a reference to the obstacle with the given ID.
    pub fn get(&self, id: ObstacleId) -> Option<&ObstacleShape> {
        self.obstacles.get(id)
    }

    /// Gets a mutable reference to the obstacle with the given ID.
    pub fn get_mut(&mut self, id: ObstacleId) -> Option<&mut ObstacleShape> {
        self.obstacles.get_mut(id)
    }

    /// Sets the eversion of an obstacle. Does nothing if the ID is unknown.
    pub fn set_seen_from(&mut self, id: ObstacleId, seen_from: SeenFrom) {
        if let Some(obstacle) = self.obstacles.get_mut(id) {
            obstacle.set_seen_from(seen_from);
        }
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Returns an iterator over all the obstacles in the set.
    pub fn iter(&self) -> impl Iterator<Item = (ObstacleId, &ObstacleShape)> {
        self.obstacles.iter()
    }

    /// Finds the nearest and next-nearest obstacles on the vehicle's path.
    pub fn first_path_intersection(&self, vehicle: &dyn Vehicle) -> SceneIntersection<'_> {
        let mut pair = NearestPair::new();
        for (id, obstacle) in &self.obstacles {
            pair.offer(id, obstacle.find_intersection_with_vehicle_path(vehicle));
        }
        let nearest_id = pair.nearest.as_ref().map(|(id, _)| *id);
        let next_id = pair.next.as_ref().map(|(id, _)| *id);
        log::trace!("Nearest obstacle {nearest_id:?}, next {next_id:?}");
        SceneIntersection {
            intersections: pair.into_group(),
            nearest_id,
            next_id,
        }
    }

    /// Computes the steering needed to avoid the nearest obstacle on the vehicle's path.
    pub fn steer_to_avoid(&self, vehicle: &dyn Vehicle, min_time_to_collision: f64) -> Vector3d {
        self.first_path_intersection(vehicle)
            .intersections
            .nearest
            .steer_to_avoid_if_needed(vehicle, min_time_to_collision)
    }
}
