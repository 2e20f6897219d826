//! Optional drawing of obstacles and avoidance decisions.
//!
//! Nothing in the avoidance code depends on this module; callers that want to
//! visualise what happened pass an [Annotator] to the functions here.

use crate::math::{Point3d, Vector3d};
use crate::obstacle::{BoxObstacle, ObstacleShape, PathIntersection, PlanarShape};
use crate::vehicle::Vehicle;
use cgmath::prelude::*;
#[cfg(feature = "debug")]
use serde_json::json;

/// Receives simple geometric primitives. Every method does nothing by default.
pub trait Annotator {
    fn line(&mut self, _name: &str, _p1: Point3d, _p2: Point3d) {}

    fn sphere(&mut self, _name: &str, _centre: Point3d, _radius: f64) {}
}

/// An [Annotator] that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAnnotations;

impl Annotator for NoAnnotations {}

/// Collects annotations for one frame as JSON records.
#[cfg(feature = "debug")]
#[derive(Clone, Debug, Default)]
pub struct JsonAnnotations {
    frame: Vec<serde_json::Value>,
}

#[cfg(feature = "debug")]
impl JsonAnnotations {
    pub fn new() -> Self {
        Default::default()
    }

    /// Takes the annotations recorded so far as a JSON array, leaving the recorder empty.
    pub fn take_frame(&mut self) -> serde_json::Value {
        json!(std::mem::take(&mut self.frame))
    }
}

#[cfg(feature = "debug")]
impl Annotator for JsonAnnotations {
    fn line(&mut self, name: &str, p1: Point3d, p2: Point3d) {
        self.frame.push(json!({
            "type": "line",
            "name": name,
            "p1": [p1.x, p1.y, p1.z],
            "p2": [p2.x, p2.y, p2.z],
        }))
    }

    fn sphere(&mut self, name: &str, centre: Point3d, radius: f64) {
        self.frame.push(json!({
            "type": "sphere",
            "name": name,
            "centre": [centre.x, centre.y, centre.z],
            "radius": radius,
        }))
    }
}

/// Draws a wireframe of the obstacle.
pub fn draw_obstacle(shape: &ObstacleShape, out: &mut dyn Annotator) {
    match shape {
        ObstacleShape::Sphere(sphere) => out.sphere("obstacle", sphere.center(), sphere.radius()),
        ObstacleShape::Box(cuboid) => draw_box(cuboid, out),
        ObstacleShape::Rectangle(rect) => {
            let frame = rect.frame();
            let (w, h) = (0.5 * rect.width(), 0.5 * rect.height());
            let corners = [(-w, -h), (w, -h), (w, h), (-w, h)]
                .map(|(x, y)| frame.globalize_position(Point3d::new(x, y, 0.0)));
            for (&from, &to) in corners.iter().zip(corners.iter().cycle().skip(1)) {
                out.line("obstacle", from, to);
            }
        }
        ObstacleShape::Plane(plane) => {
            // An infinite plane is drawn as a unit cross with its outward normal
            let frame = plane.frame();
            let p = frame.position();
            out.line("obstacle", p - frame.side(), p + frame.side());
            out.line("obstacle", p - frame.up(), p + frame.up());
            out.line("normal", p, p + frame.forward());
        }
    }
}

fn draw_box(cuboid: &BoxObstacle, out: &mut dyn Annotator) {
    let signs = [-1.0, 1.0];
    for a in signs {
        for b in signs {
            out.line("obstacle", cuboid.corner([-1.0, a, b]), cuboid.corner([1.0, a, b]));
            out.line("obstacle", cuboid.corner([a, -1.0, b]), cuboid.corner([a, 1.0, b]));
            out.line("obstacle", cuboid.corner([a, b, -1.0]), cuboid.corner([a, b, 1.0]));
        }
    }
}

/// Draws the vehicle's path to an intersection, the surface normal there and the
/// resulting steering force.
pub fn annotate_avoidance(
    vehicle: &dyn Vehicle,
    pi: &PathIntersection,
    steering: Vector3d,
    out: &mut dyn Annotator,
) {
    let position = vehicle.position();
    if pi.intersect {
        out.line("path", position, position + vehicle.path_direction() * pi.distance);
        out.line("normal", pi.surface_point, pi.surface_point + pi.surface_normal);
    }
    if steering != Vector3d::zero() {
        out.line("steering", position, position + steering);
    }
}
