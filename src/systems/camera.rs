use wgpu::util::DeviceExt;

use crate::{
    components::camera::{Camera, CameraComponent, CameraUniform},
    config::ViewerConfig,
    Uniform,
};

pub struct CameraSystem {}

impl CameraSystem {
    pub fn create_camera(
        device: &wgpu::Device,
        config: &ViewerConfig,
        screen_width: u32,
        screen_height: u32,
    ) -> CameraComponent {
        let camera = Camera {
            eye: config.camera_eye,
            target: config.camera_target,
            // which way is "up"
            up: cgmath::Vector3::unit_y(),
            aspect: screen_width as f32 / screen_height.max(1) as f32,
            fovy: config.fovy,
            znear: config.znear,
            zfar: config.zfar,
        };

        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update_view_proj(&camera);

        let camera_buffer = CameraSystem::create_uniform_buffer(device, &camera_uniform);
        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("Camera Component Uniform Bind Group Layout"),
            });

        let camera_bind_group = CameraSystem::create_uniform_bind_group(
            device,
            &camera_buffer,
            &camera_bind_group_layout,
        );

        CameraComponent {
            camera,
            camera_uniform,
            camera_buffer,
            camera_bind_group,
            camera_bind_group_layout,
        }
    }

    pub fn resize(
        queue: &wgpu::Queue,
        camera_component: &mut CameraComponent,
        width: u32,
        height: u32,
    ) {
        camera_component.camera.aspect = width as f32 / height.max(1) as f32;
        camera_component
            .camera_uniform
            .update_view_proj(&camera_component.camera);
        queue.write_buffer(
            &camera_component.camera_buffer,
            0,
            bytemuck::cast_slice(&[camera_component.camera_uniform]),
        );
    }
}

impl Uniform for CameraSystem {
    fn create_uniform_buffer<T: bytemuck::Pod>(device: &wgpu::Device, data: &T) -> wgpu::Buffer {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Component Uniform Buffer"),
            contents: bytemuck::bytes_of(data),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        })
    }

    fn create_uniform_bind_group(
        device: &wgpu::Device,
        buffer: &wgpu::Buffer,
        layout: &wgpu::BindGroupLayout,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("Camera Component Uniform Bind Group"),
        })
    }
}
