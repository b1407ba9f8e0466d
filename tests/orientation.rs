use cgmath::{InnerSpace, One, Quaternion, Vector3};
use dutch3d::systems::geospatial::{
    coordinates::CoordinatesSystem,
    orientation::{Orientation, OrientationSystem, DISC_FORWARD},
};

fn is_finite(q: Quaternion<f32>) -> bool {
    q.s.is_finite() && q.v.x.is_finite() && q.v.y.is_finite() && q.v.z.is_finite()
}

fn assert_faces_inward(v: Vector3<f32>) {
    let q = OrientationSystem::orient(v);
    assert!(is_finite(q), "orient({v:?}) = {q:?}");
    assert!((q.magnitude() - 1.0).abs() < 1e-4, "orient({v:?}) not unit");
    let rotated = q * DISC_FORWARD;
    assert!(
        (rotated + v).magnitude() < 1e-4,
        "orient({v:?}) maps forward to {rotated:?}"
    );
}

#[test]
fn forward_axis_lands_on_the_inward_normal() {
    for lat in (-90..=90).step_by(15) {
        for lon in (-180..=180).step_by(30) {
            assert_faces_inward(CoordinatesSystem::project(lat as f32, lon as f32));
        }
    }
}

#[test]
fn axis_directions() {
    for v in [
        Vector3::unit_x(),
        -Vector3::unit_x(),
        Vector3::unit_y(),
        -Vector3::unit_y(),
        Vector3::unit_z(),
        -Vector3::unit_z(),
    ] {
        assert_faces_inward(v);
    }
}

#[test]
fn target_equal_to_reference_is_identity() {
    // -(0, 0, 1) is the forward axis itself
    let q = OrientationSystem::orient(Vector3::unit_z());
    assert_eq!(q, Orientation::one());
    assert!((q * DISC_FORWARD - DISC_FORWARD).magnitude() < 1e-4);
}

#[test]
fn target_opposite_to_reference_is_a_finite_half_turn() {
    let q = OrientationSystem::orient(-Vector3::unit_z());
    assert!(is_finite(q));
    assert!((q.magnitude() - 1.0).abs() < 1e-6);
    assert!(q.s.abs() < 1e-6);
    assert!((q * DISC_FORWARD - Vector3::unit_z()).magnitude() < 1e-4);
}

#[test]
fn nearly_opposite_target_stays_finite() {
    let v = Vector3::new(1e-4, 0.0, -1.0).normalize();
    assert_faces_inward(v);
}

#[test]
fn orientation_is_deterministic() {
    let v = CoordinatesSystem::project(52.0, 5.0);
    assert_eq!(OrientationSystem::orient(v), OrientationSystem::orient(v));
    assert_eq!(
        OrientationSystem::orient(-Vector3::unit_z()),
        OrientationSystem::orient(-Vector3::unit_z())
    );
}
