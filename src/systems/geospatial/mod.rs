pub mod coordinates;
pub mod orientation;

use cgmath::Vector3;

use self::{
    coordinates::GeoCoordinate,
    orientation::{Orientation, OrientationSystem},
};

/// Where the marker sits and how its disc is turned, for one coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPlacement {
    pub coordinate: GeoCoordinate,
    pub position: Vector3<f32>,
    pub orientation: Orientation,
}

impl MarkerPlacement {
    pub fn from_coordinate(coordinate: GeoCoordinate) -> Self {
        let position = coordinate.project();
        let orientation = OrientationSystem::orient(position);

        tracing::debug!(?coordinate, ?position, ?orientation, "computed marker placement");

        Self {
            coordinate,
            position,
            orientation,
        }
    }
}
