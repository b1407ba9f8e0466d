use cgmath::{InnerSpace, SquareMatrix, Vector4};

use crate::components::camera::Camera;

use super::geospatial::coordinates::{CoordinatesSystem, GeoCoordinate};

pub struct WindowSystem {}

impl WindowSystem {
    /// Casts a ray from the cursor into the scene and returns the coordinate
    /// where it first meets the globe, if it does.
    pub fn handle_left_click(
        screen_width: f32,
        screen_height: f32,
        position_x: f32,
        position_y: f32,
        globe_radius: f32,
        camera: &Camera,
    ) -> Option<GeoCoordinate> {
        if screen_width <= 0.0 || screen_height <= 0.0 {
            return None;
        }

        let inverse_view_proj = camera.build_view_projection_matrix().invert()?;

        let ndc_x = (position_x * 2.0) / screen_width - 1.0;
        let ndc_y = 1.0 - (2.0 * position_y) / screen_height;

        // wgpu clip space puts the near plane at z = 0 and the far plane at z = 1
        let near = inverse_view_proj * Vector4::new(ndc_x, ndc_y, 0.0, 1.0);
        let far = inverse_view_proj * Vector4::new(ndc_x, ndc_y, 1.0, 1.0);
        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;

        let ray_origin = near;
        let ray_direction = (far - near).normalize();

        // globe is centered on the origin
        let a = ray_direction.dot(ray_direction);
        let b = 2.0 * ray_origin.dot(ray_direction);
        let c = ray_origin.dot(ray_origin) - globe_radius * globe_radius;
        let discriminant = b * b - 4.0 * a * c;

        if discriminant < 0.0 {
            return None;
        }

        let discriminant_sqrt = discriminant.sqrt();
        let t1 = (-b - discriminant_sqrt) / (2.0 * a);
        let t2 = (-b + discriminant_sqrt) / (2.0 * a);
        let t = if t1 >= 0.0 { t1 } else { t2 };
        if t < 0.0 {
            return None;
        }

        let intersection_point = ray_origin + ray_direction * t;
        let coordinate = CoordinatesSystem::unproject(intersection_point);
        tracing::info!(
            latitude = coordinate.latitude_deg,
            longitude = coordinate.longitude_deg,
            "picked globe"
        );
        Some(coordinate)
    }
}
