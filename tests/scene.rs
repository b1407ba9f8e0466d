use cgmath::{InnerSpace, Vector3, Vector4};
use dutch3d::{
    build_scene,
    cli::{self, LaunchMode},
    components::scene::RoleComponent,
    config::ViewerConfig,
};

#[test]
fn netherlands_marker_sits_in_the_upper_hemisphere() {
    let args = cli::parse_from(["dutch3d", "52", "5"]).unwrap();
    let mut scene = build_scene(&ViewerConfig::default(), args.coordinate());

    assert_eq!(scene.len(), 3);
    let marker = scene.find(RoleComponent::Marker).expect("marker is placed");
    let position = scene.transform(marker).unwrap().translation;

    assert!(position.y > 0.0, "{position:?}");
    assert!((position.magnitude() - 1.0).abs() < 1e-5);
}

#[test]
fn disc_follows_the_marker_and_faces_away_from_the_globe() {
    let args = cli::parse_from(["dutch3d", "display", "-33.9", "151.2"]).unwrap();
    let mut scene = build_scene(&ViewerConfig::default(), args.coordinate());

    let marker = scene.find(RoleComponent::Marker).unwrap();
    let disc = scene.find(RoleComponent::Heading).unwrap();
    assert_eq!(scene.parent(disc), Some(marker));

    let marker_position = scene.transform(marker).unwrap().translation;
    let disc_world = scene.world_matrix(disc);

    let disc_origin = (disc_world * Vector4::new(0.0, 0.0, 0.0, 1.0)).truncate();
    assert!((disc_origin - marker_position).magnitude() < 1e-5);

    // the disc's front face is its local +Z
    let front = (disc_world * Vector4::new(0.0, 0.0, 1.0, 0.0)).truncate();
    assert!(front.dot(marker_position.normalize()) > 1.0 - 1e-4);
}

#[test]
fn too_few_arguments_give_a_globe_without_marker() {
    let args = cli::parse_from(["dutch3d", "52"]).unwrap();
    assert_eq!(args.mode, LaunchMode::GlobeOnly);
    assert!(cli::USAGE.starts_with("Usage:"));

    let mut scene = build_scene(&ViewerConfig::default(), args.coordinate());
    assert_eq!(scene.len(), 1);
    assert!(scene.find(RoleComponent::Globe).is_some());
    assert!(scene.find(RoleComponent::Marker).is_none());
    assert!(scene.find(RoleComponent::Heading).is_none());
}

#[test]
fn globe_sits_at_the_origin() {
    let mut scene = build_scene(&ViewerConfig::default(), None);
    let globe = scene.find(RoleComponent::Globe).unwrap();
    let origin = (scene.world_matrix(globe) * Vector4::new(0.0, 0.0, 0.0, 1.0)).truncate();
    assert_eq!(origin, Vector3::new(0.0, 0.0, 0.0));
}
