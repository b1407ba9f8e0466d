use cgmath::{InnerSpace, Vector3};

/// A latitude/longitude pair in degrees.
///
/// Bounds are not enforced. Values outside [-90, 90] / [-180, 180] still map
/// to a point on the sphere because the projection is periodic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinate {
    pub latitude_deg: f32,
    pub longitude_deg: f32,
}

impl GeoCoordinate {
    pub fn new(latitude_deg: f32, longitude_deg: f32) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
        }
    }

    pub fn project(&self) -> Vector3<f32> {
        CoordinatesSystem::project(self.latitude_deg, self.longitude_deg)
    }
}

pub struct CoordinatesSystem {}

impl CoordinatesSystem {
    /// Maps a geodetic coordinate onto the unit sphere, `y` up.
    ///
    /// Latitude is negated before use, so the north pole lands on -Y.
    /// Scene assembly and picking both rely on this convention.
    pub fn project(lat: f32, lon: f32) -> Vector3<f32> {
        let lat = -lat.to_radians();
        let lon = lon.to_radians();

        let x = lon.cos() * lat.cos();
        let y = lat.sin();
        let z = lon.sin() * lat.cos();

        Vector3::new(x, y, z)
    }

    /// Inverse of [`CoordinatesSystem::project`]. The point does not need to be unit length.
    pub fn unproject(point: Vector3<f32>) -> GeoCoordinate {
        let normalized_point = point.normalize();

        let latitude = -normalized_point.y.clamp(-1.0, 1.0).asin().to_degrees();
        let longitude = normalized_point.z.atan2(normalized_point.x).to_degrees();

        GeoCoordinate::new(latitude, longitude)
    }
}
