use cgmath::{Point3, Vector3};

pub const WINDOW_TITLE: &str = "Dutch 3D";
pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;

pub const GLOBE_RADIUS: f32 = 1.0;
pub const GLOBE_SEGMENTS: u32 = 32;
pub const MARKER_RADIUS: f32 = 0.01;
pub const MARKER_SEGMENTS: u32 = 32;
pub const DISC_RADIUS: f32 = 0.1;
pub const DISC_SEGMENTS: u32 = 50;

pub const GLOBE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const MARKER_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
pub const DISC_COLOR: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

pub const AMBIENT_INTENSITY: f32 = 0.8;

/// Everything the viewer needs to build its window, scene and camera.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,

    pub globe_radius: f32,
    pub globe_segments: u32,
    pub marker_radius: f32,
    pub marker_segments: u32,
    pub disc_radius: f32,
    pub disc_segments: u32,

    pub globe_color: [f32; 4],
    pub marker_color: [f32; 4],
    pub disc_color: [f32; 4],

    pub camera_eye: Point3<f32>,
    pub camera_target: Point3<f32>,
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,

    pub ambient_intensity: f32,
    pub light_direction: Vector3<f32>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: WINDOW_TITLE.to_owned(),
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,

            globe_radius: GLOBE_RADIUS,
            globe_segments: GLOBE_SEGMENTS,
            marker_radius: MARKER_RADIUS,
            marker_segments: MARKER_SEGMENTS,
            disc_radius: DISC_RADIUS,
            disc_segments: DISC_SEGMENTS,

            globe_color: GLOBE_COLOR,
            marker_color: MARKER_COLOR,
            disc_color: DISC_COLOR,

            // +z is out of the screen
            camera_eye: Point3::new(0.0, 0.0, 10.0),
            camera_target: Point3::new(0.0, 0.0, 0.0),
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,

            ambient_intensity: AMBIENT_INTENSITY,
            light_direction: Vector3::unit_x(),
        }
    }
}
