use super::{Point3d, Vector3d};
use cgmath::prelude::*;
use rand::Rng;

/// Vectors shorter than this are treated as having no direction.
pub const DIRECTION_EPSILON: f64 = 1e-9;

/// Projects a point onto a local coordinate system.
///
/// # Parameters
/// * `point` - The point to project
/// * `origin` - The origin of the coordinate system
/// * `x_axis` - The basis vector pointing in the positive x-axis.
/// * `y_axis` - The basis vector pointing in the positive y-axis.
/// * `z_axis` - The basis vector pointing in the positive z-axis.
pub fn project_local(
    point: Point3d,
    origin: Point3d,
    x_axis: Vector3d,
    y_axis: Vector3d,
    z_axis: Vector3d,
) -> Point3d {
    let point = point - origin;
    Point3d::new(point.dot(x_axis), point.dot(y_axis), point.dot(z_axis))
}

/// Normalises a vector, returning the zero vector if `v` has no meaningful direction.
#[inline]
pub fn normalize_or_zero(v: Vector3d) -> Vector3d {
    let mag = v.magnitude();
    if mag > DIRECTION_EPSILON {
        v / mag
    } else {
        Vector3d::zero()
    }
}

/// The component of `v` parallel to the unit vector `basis`.
#[inline]
pub fn parallel_component(v: Vector3d, basis: Vector3d) -> Vector3d {
    basis * v.dot(basis)
}

/// The component of `v` perpendicular to the unit vector `basis`.
#[inline]
pub fn perpendicular_component(v: Vector3d, basis: Vector3d) -> Vector3d {
    v - parallel_component(v, basis)
}

/// Returns `v` with its magnitude clamped to at most `max`.
pub fn truncate_length(v: Vector3d, max: f64) -> Vector3d {
    let mag2 = v.magnitude2();
    if mag2 > max * max {
        v * (max / mag2.sqrt())
    } else {
        v
    }
}

/// A random unit vector lying on the XZ plane.
pub fn random_unit_vector_on_xz_plane(rng: &mut impl Rng) -> Vector3d {
    let angle = rng.gen_range(0.0..std::f64::consts::TAU);
    Vector3d::new(angle.cos(), 0.0, angle.sin())
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::SeedableRng;

    #[test]
    fn zero_vector_stays_zero() {
        assert_eq!(normalize_or_zero(Vector3d::zero()), Vector3d::zero());
        assert_eq!(normalize_or_zero(Vector3d::new(1e-12, 0.0, 0.0)), Vector3d::zero());
        assert_approx_eq!(normalize_or_zero(Vector3d::new(0.0, 3.0, 4.0)).magnitude(), 1.0);
    }

    #[test]
    fn components_sum_to_original() {
        let v = Vector3d::new(1.0, 2.0, 3.0);
        let basis = Vector3d::new(0.0, 0.0, 1.0);
        assert_eq!(parallel_component(v, basis), Vector3d::new(0.0, 0.0, 3.0));
        assert_eq!(perpendicular_component(v, basis), Vector3d::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn truncate() {
        let v = Vector3d::new(3.0, 0.0, 4.0);
        assert_approx_eq!(truncate_length(v, 1.0).magnitude(), 1.0);
        assert_eq!(truncate_length(v, 10.0), v);
    }

    #[test]
    fn xz_unit_vectors() {
        let mut rng = rand::rngs::StdRng::from_seed(*b"Vegemite sandwhich is not fun...");
        for _i in 0..100 {
            let v = random_unit_vector_on_xz_plane(&mut rng);
            assert_eq!(v.y, 0.0);
            assert_approx_eq!(v.magnitude(), 1.0);
        }
    }
}
