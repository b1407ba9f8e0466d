use cgmath::{InnerSpace, One, Quaternion, Rad, Rotation3, Vector3, Zero};

pub type Orientation = Quaternion<f32>;

/// The direction the disc mesh looks down before any rotation is applied.
pub const DISC_FORWARD: Vector3<f32> = Vector3 {
    x: 0.0,
    y: 0.0,
    z: -1.0,
};

// sin(theta) below this is treated as (anti-)parallel
const PARALLEL_EPSILON: f32 = 1e-7;

pub struct OrientationSystem {}

impl OrientationSystem {
    /// Rotation that lays the disc flat on the sphere at `surface_point`.
    ///
    /// `surface_point` is read as the outward normal. The disc's forward axis is
    /// turned onto the *inward* normal, which leaves its +Z front face pointing
    /// away from the globe. Roll about that axis is left unconstrained.
    pub fn orient(surface_point: Vector3<f32>) -> Orientation {
        if surface_point.magnitude2().is_zero() {
            return Orientation::one();
        }

        OrientationSystem::shortest_arc(DISC_FORWARD, -surface_point)
    }

    /// Shortest-arc rotation taking the direction of `from` onto the direction of `to`.
    pub fn shortest_arc(from: Vector3<f32>, to: Vector3<f32>) -> Orientation {
        let from = from.normalize();
        let to = to.normalize();
        let axis = from.cross(to);
        let sin_theta = axis.magnitude();
        let cos_theta = from.dot(to);

        if sin_theta <= PARALLEL_EPSILON {
            if cos_theta > 0.0 {
                return Orientation::one();
            }
            // half turn, any axis orthogonal to `from` will do
            return Quaternion::from_sv(0.0, OrientationSystem::orthogonal_axis(from));
        }

        // atan2 stays accurate near a half turn, 1 + cos(theta) does not
        Quaternion::from_axis_angle(axis / sin_theta, Rad(sin_theta.atan2(cos_theta)))
    }

    fn orthogonal_axis(v: Vector3<f32>) -> Vector3<f32> {
        if v.x.abs() < 0.9 {
            v.cross(Vector3::unit_x()).normalize()
        } else {
            v.cross(Vector3::unit_y()).normalize()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_turn_uses_an_axis_orthogonal_to_the_input() {
        let q = OrientationSystem::shortest_arc(Vector3::unit_x(), -Vector3::unit_x());
        assert!(q.s.abs() < 1e-6);
        assert!(q.v.dot(Vector3::unit_x()).abs() < 1e-6);
        assert!((q.magnitude() - 1.0).abs() < 1e-6);
        assert!((q * Vector3::unit_x() + Vector3::unit_x()).magnitude() < 1e-4);
    }

    #[test]
    fn shortest_arc_does_not_require_unit_inputs() {
        let q = OrientationSystem::shortest_arc(
            Vector3::new(0.0, 3.0, 0.0),
            Vector3::new(0.0, 0.0, 0.5),
        );
        assert!((q * Vector3::unit_y() - Vector3::unit_z()).magnitude() < 1e-4);
    }

    #[test]
    fn zero_vector_yields_identity() {
        assert_eq!(OrientationSystem::orient(Vector3::zero()), Orientation::one());
    }
}
