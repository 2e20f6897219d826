use crate::error::{check_dimension, ObstacleError};
use crate::math::{normalize_or_zero, random_unit_vector_on_xz_plane, truncate_length};
use crate::math::{LocalFrame, Point3d, Vector3d};
use cgmath::prelude::*;
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kinematic state of a vehicle, as needed by obstacle avoidance.
///
/// The vehicle's projected path is the ray from [Vehicle::position] along its velocity.
pub trait Vehicle {
    /// The vehicle's local coordinate frame.
    fn frame(&self) -> &LocalFrame;

    /// The radius of the vehicle's bounding sphere.
    fn radius(&self) -> f64;

    /// The vehicle's speed along its forward axis.
    fn speed(&self) -> f64;

    /// The magnitude steering forces are scaled to.
    fn max_force(&self) -> f64;

    /// The vehicle's position in world space.
    fn position(&self) -> Point3d {
        self.frame().position()
    }

    fn forward(&self) -> Vector3d {
        self.frame().forward()
    }

    fn side(&self) -> Vector3d {
        self.frame().side()
    }

    fn up(&self) -> Vector3d {
        self.frame().up()
    }

    fn velocity(&self) -> Vector3d {
        self.forward() * self.speed()
    }

    /// Predicts the vehicle's position `time` seconds from now, assuming constant velocity.
    fn predict_future_position(&self, time: f64) -> Point3d {
        self.position() + self.velocity() * time
    }

    /// The unit direction of travel, or zero for a stationary vehicle.
    fn path_direction(&self) -> Vector3d {
        normalize_or_zero(self.velocity())
    }
}

/// The attributes of a [SimpleVehicle].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VehicleAttributes {
    /// The vehicle's mass; with unit mass acceleration equals force.
    pub mass: f64,
    /// The radius of the bounding sphere in m.
    pub radius: f64,
    /// Steering forces are clipped to this magnitude.
    pub max_force: f64,
    /// The velocity is clipped to this magnitude, in m/s.
    pub max_speed: f64,
}

impl VehicleAttributes {
    /// Checks that every attribute is finite and non-negative, and that the mass is positive.
    pub fn validate(&self) -> Result<(), ObstacleError> {
        check_dimension("radius", self.radius)?;
        check_dimension("max_force", self.max_force)?;
        check_dimension("max_speed", self.max_speed)?;
        if check_dimension("mass", self.mass)? == 0.0 {
            return Err(ObstacleError::ZeroMass);
        }
        Ok(())
    }
}

impl Default for VehicleAttributes {
    fn default() -> Self {
        Self {
            mass: 1.0,
            radius: 0.5,
            max_force: 0.1,
            max_speed: 1.0,
        }
    }
}

/// A point-mass vehicle whose frame stays aligned with its velocity.
#[derive(Clone, Debug)]
pub struct SimpleVehicle {
    /// The vehicle's position and orientation.
    frame: LocalFrame,
    /// The speed along the forward axis in m/s.
    speed: f64,
    attributes: VehicleAttributes,
}

impl SimpleVehicle {
    /// Creates a stationary vehicle at the origin, facing +Z.
    pub fn new(attributes: VehicleAttributes) -> Self {
        Self {
            frame: LocalFrame::default(),
            speed: 0.0,
            attributes,
        }
    }

    /// Creates a stationary vehicle, rejecting attributes that cannot be simulated.
    pub fn try_new(attributes: VehicleAttributes) -> Result<Self, ObstacleError> {
        attributes.validate()?;
        Ok(Self::new(attributes))
    }

    pub fn attributes(&self) -> &VehicleAttributes {
        &self.attributes
    }

    pub fn set_position(&mut self, position: Point3d) {
        self.frame.set_position(position);
    }

    /// Turns the vehicle to face `forward`. Zero vectors are ignored.
    pub fn set_forward(&mut self, forward: Vector3d) {
        if normalize_or_zero(forward) != Vector3d::zero() {
            self.frame.set_forward(forward);
        }
    }

    /// Sets the speed, clipped to the vehicle's maximum. A negative or NaN maximum stops the vehicle.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.max(0.0).min(self.attributes.max_speed.max(0.0));
    }

    pub fn set_radius(&mut self, radius: f64) {
        self.attributes.radius = radius;
    }

    /// Applies a steering force for `dt` seconds, keeping the frame aligned with the new velocity.
    pub fn apply_steering_force(&mut self, force: Vector3d, dt: f64) {
        let force = truncate_length(force, self.attributes.max_force);
        let acceleration = force / self.attributes.mass;
        let velocity = self.velocity() + acceleration * dt;
        let velocity = truncate_length(velocity, self.attributes.max_speed);

        self.speed = velocity.magnitude();
        self.frame
            .set_position(self.frame.position() + velocity * dt);
        if self.speed > 0.0 {
            self.frame.set_forward(velocity);
        }
    }

    /// Sets the up axis to global Y and faces a random direction on the XZ plane.
    pub fn randomize_heading_on_xz_plane(&mut self, rng: &mut impl Rng) {
        let forward = random_unit_vector_on_xz_plane(rng);
        self.frame = LocalFrame::from_forward(self.frame.position(), forward, Vector3d::unit_y());
    }
}

impl Default for SimpleVehicle {
    fn default() -> Self {
        Self::new(VehicleAttributes::default())
    }
}

impl Vehicle for SimpleVehicle {
    fn frame(&self) -> &LocalFrame {
        &self.frame
    }

    fn radius(&self) -> f64 {
        self.attributes.radius
    }

    fn speed(&self) -> f64 {
        self.speed
    }

    fn max_force(&self) -> f64 {
        self.attributes.max_force
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::SeedableRng;

    #[test]
    fn predicts_linear_motion() {
        let mut vehicle = SimpleVehicle::default();
        vehicle.set_position(Point3d::new(1.0, 0.0, 0.0));
        vehicle.set_speed(0.5);
        let p = vehicle.predict_future_position(4.0);
        assert_approx_eq!(p.x, 1.0);
        assert_approx_eq!(p.z, 2.0);
    }

    #[test]
    fn speed_is_clipped() {
        let mut vehicle = SimpleVehicle::default();
        vehicle.set_speed(10.0);
        assert_eq!(vehicle.speed(), 1.0);
    }

    #[test]
    fn bad_max_speed_stops_vehicle() {
        for max_speed in [-1.0, f64::NAN] {
            let mut vehicle = SimpleVehicle::new(VehicleAttributes {
                max_speed,
                ..Default::default()
            });
            vehicle.set_speed(0.5);
            assert_eq!(vehicle.speed(), 0.0);
        }
    }

    #[test]
    fn invalid_attributes_rejected() {
        let bad = [
            VehicleAttributes {
                max_speed: -1.0,
                ..Default::default()
            },
            VehicleAttributes {
                radius: f64::NAN,
                ..Default::default()
            },
            VehicleAttributes {
                mass: 0.0,
                ..Default::default()
            },
        ];
        for attributes in bad {
            assert!(SimpleVehicle::try_new(attributes).is_err(), "{attributes:?}");
        }
        assert_eq!(
            SimpleVehicle::try_new(VehicleAttributes {
                mass: 0.0,
                ..Default::default()
            })
            .unwrap_err(),
            ObstacleError::ZeroMass
        );
        assert!(SimpleVehicle::try_new(VehicleAttributes::default()).is_ok());
    }

    #[test]
    fn stationary_vehicle_has_no_path() {
        let vehicle = SimpleVehicle::default();
        assert_eq!(vehicle.path_direction(), Vector3d::zero());
    }

    #[test]
    fn steering_turns_vehicle() {
        let mut vehicle = SimpleVehicle::new(VehicleAttributes {
            max_force: 1.0,
            ..Default::default()
        });
        vehicle.set_speed(0.5);
        vehicle.apply_steering_force(Vector3d::new(5.0, 0.0, 0.0), 0.1);
        assert!(vehicle.forward().x > 0.0);
        assert_approx_eq!(vehicle.forward().magnitude(), 1.0);
        assert_approx_eq!(vehicle.side().dot(vehicle.forward()), 0.0);
        assert!(vehicle.speed() <= 1.0);
    }

    #[test]
    fn random_heading_stays_level() {
        let mut rng = rand::rngs::StdRng::from_seed(*b"Vegemite sandwhich is not fun...");
        let mut vehicle = SimpleVehicle::default();
        for _i in 0..20 {
            vehicle.randomize_heading_on_xz_plane(&mut rng);
            assert_approx_eq!(vehicle.forward().y, 0.0);
            assert_approx_eq!(vehicle.up().y, 1.0);
        }
    }
}
