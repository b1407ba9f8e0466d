// Matrix4::new takes columns: z' = 0.5 * z + 0.5 * w
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);
pub const IDENTITY_MATRIX_4: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

pub struct CameraComponent {
    pub camera: Camera,
    pub camera_uniform: CameraUniform,
    pub camera_buffer: wgpu::Buffer,
    pub camera_bind_group: wgpu::BindGroup,
    pub camera_bind_group_layout: wgpu::BindGroupLayout,
}

#[derive(Debug, Clone)]
pub struct Camera {
    pub eye: cgmath::Point3<f32>,
    pub target: cgmath::Point3<f32>,
    pub up: cgmath::Vector3<f32>,
    pub aspect: f32,
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    // cgmath builds OpenGL clip space (z in -1..1), wgpu wants z in 0..1
    pub fn build_view_projection_matrix(&self) -> cgmath::Matrix4<f32> {
        let view = cgmath::Matrix4::look_at_rh(self.eye, self.target, self.up);
        let proj = cgmath::perspective(cgmath::Deg(self.fovy), self.aspect, self.znear, self.zfar);
        OPENGL_TO_WGPU_MATRIX * proj * view
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    // We can't use cgmath with bytemuck directly so we'll have
    // to convert the Matrix4 into a 4x4 f32 array
    pub view_proj_matrix: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj_matrix: IDENTITY_MATRIX_4,
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj_matrix = camera.build_view_projection_matrix().into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Vector4;

    use super::*;

    fn camera() -> Camera {
        Camera {
            eye: (0.0, 0.0, 10.0).into(),
            target: (0.0, 0.0, 0.0).into(),
            up: cgmath::Vector3::unit_y(),
            aspect: 1.0,
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }

    #[test]
    fn globe_top_lands_at_the_perspective_height() {
        let clip = camera().build_view_projection_matrix() * Vector4::new(0.0, 1.0, 0.0, 1.0);
        let expected = 1.0 / (22.5f32.to_radians().tan() * 10.0);

        assert!((clip.w - 10.0).abs() < 1e-4, "{:?}", clip);
        assert!(clip.x.abs() < 1e-6);
        assert!((clip.y / clip.w - expected).abs() < 1e-4, "{:?}", clip);
    }

    #[test]
    fn depth_spans_zero_to_one_between_the_planes() {
        let camera = camera();
        let view_proj = camera.build_view_projection_matrix();
        let near = view_proj * Vector4::new(0.0, 0.0, 10.0 - camera.znear, 1.0);
        let far = view_proj * Vector4::new(0.0, 0.0, 10.0 - camera.zfar, 1.0);

        assert!((near.z / near.w).abs() < 1e-4, "{:?}", near);
        assert!((far.z / far.w - 1.0).abs() < 1e-4, "{:?}", far);

        let front = view_proj * Vector4::new(0.0, 0.0, 1.0, 1.0);
        let back = view_proj * Vector4::new(0.0, 0.0, -1.0, 1.0);
        assert!(front.z / front.w < back.z / back.w);
    }
}
