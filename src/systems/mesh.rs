use std::f32::consts::PI;

use wgpu::util::DeviceExt;

use crate::{
    components::{
        material::MaterialUniform,
        mesh::{MeshComponent, Vertex},
        scene::ShapeComponent,
    },
    matrix4_to_array,
};

pub struct MeshSystem {}

impl MeshSystem {
    pub fn create_vertex_buffer(device: &wgpu::Device, data: &[Vertex]) -> wgpu::Buffer {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(data),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        })
    }

    pub fn create_index_buffer(device: &wgpu::Device, data: &[u32]) -> wgpu::Buffer {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(data),
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        })
    }

    pub fn create_object_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
            label: Some("Object Bind Group Layout"),
        })
    }

    /// Uploads geometry for `shape` along with its model matrix and material.
    pub fn create_mesh(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        shape: &ShapeComponent,
        model_matrix: cgmath::Matrix4<f32>,
        material: MaterialUniform,
    ) -> MeshComponent {
        let (vertices, indices) = MeshSystem::generate_mesh(shape);

        let model_matrix_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Model Matrix Buffer"),
            contents: bytemuck::cast_slice(&[matrix4_to_array(model_matrix)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let material_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Material Buffer"),
            contents: bytemuck::bytes_of(&material),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: model_matrix_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: material_buffer.as_entire_binding(),
                },
            ],
            label: Some("Object Bind Group"),
        });

        MeshComponent {
            vertex_buffer: MeshSystem::create_vertex_buffer(device, &vertices),
            index_buffer: MeshSystem::create_index_buffer(device, &indices),
            num_indices: indices.len() as u32,
            model_matrix_buffer,
            bind_group,
        }
    }

    pub fn generate_mesh(shape: &ShapeComponent) -> (Vec<Vertex>, Vec<u32>) {
        match *shape {
            ShapeComponent::Sphere { radius, segments } => {
                MeshSystem::generate_sphere_mesh(radius, segments)
            }
            ShapeComponent::Disc { radius, segments } => {
                MeshSystem::generate_disc_mesh(radius, segments)
            }
        }
    }

    fn map(value: u32, start1: u32, stop1: u32, start2: f32, stop2: f32) -> f32 {
        start2
            + (stop2 - start2) * ((value as f32 - start1 as f32) / (stop1 as f32 - start1 as f32))
    }

    /// UV sphere, `segments` stacks by `segments` slices, as a triangle list
    /// wound counter-clockwise when seen from outside.
    pub fn generate_sphere_mesh(radius: f32, segments: u32) -> (Vec<Vertex>, Vec<u32>) {
        let segments = segments.max(3);
        let mut vertices = Vec::with_capacity(((segments + 1) * (segments + 1)) as usize);
        let mut indices = Vec::with_capacity((segments * segments * 6) as usize);

        for i in 0..=segments {
            // polar angle measured from +y
            let theta = MeshSystem::map(i, 0, segments, 0.0, PI);
            for j in 0..=segments {
                let phi = MeshSystem::map(j, 0, segments, 0.0, 2.0 * PI);
                let normal = [theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin()];
                vertices.push(Vertex {
                    position: [normal[0] * radius, normal[1] * radius, normal[2] * radius],
                    normal,
                });
            }
        }

        let row = segments + 1;
        for i in 0..segments {
            for j in 0..segments {
                let a = i * row + j;
                let b = (i + 1) * row + j;
                let c = (i + 1) * row + j + 1;
                let d = i * row + j + 1;
                indices.extend_from_slice(&[a, c, b, a, d, c]);
            }
        }

        (vertices, indices)
    }

    /// Flat disc in the XY plane, front face +Z, as a triangle list fanning
    /// out from the center vertex.
    pub fn generate_disc_mesh(radius: f32, segments: u32) -> (Vec<Vertex>, Vec<u32>) {
        let segments = segments.max(3);
        let normal = [0.0, 0.0, 1.0];
        let mut vertices = Vec::with_capacity(segments as usize + 2);
        let mut indices = Vec::with_capacity(segments as usize * 3);

        vertices.push(Vertex {
            position: [0.0, 0.0, 0.0],
            normal,
        });
        for i in 0..=segments {
            let angle = MeshSystem::map(i, 0, segments, 0.0, 2.0 * PI);
            vertices.push(Vertex {
                position: [radius * angle.cos(), radius * angle.sin(), 0.0],
                normal,
            });
        }

        for i in 1..=segments {
            indices.extend_from_slice(&[0, i, i + 1]);
        }

        (vertices, indices)
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{InnerSpace, Vector3};

    use super::*;

    fn face_normals(vertices: &[Vertex], indices: &[u32]) -> Vec<(Vector3<f32>, Vector3<f32>)> {
        indices
            .chunks(3)
            .map(|tri| {
                let [a, b, c] = [tri[0], tri[1], tri[2]]
                    .map(|i| Vector3::from(vertices[i as usize].position));
                ((b - a).cross(c - a), (a + b + c) / 3.0)
            })
            .collect()
    }

    #[test]
    fn sphere_vertices_lie_on_the_radius() {
        let (vertices, indices) = MeshSystem::generate_sphere_mesh(2.0, 16);
        assert_eq!(vertices.len(), 17 * 17);
        assert_eq!(indices.len(), 16 * 16 * 6);
        for v in &vertices {
            assert!((Vector3::from(v.position).magnitude() - 2.0).abs() < 1e-5);
            assert!((Vector3::from(v.normal).magnitude() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn sphere_triangles_face_outward() {
        let (vertices, indices) = MeshSystem::generate_sphere_mesh(1.0, 12);
        let mut checked = 0;
        for (normal, centroid) in face_normals(&vertices, &indices) {
            // pole rows collapse into zero-area triangles
            if normal.magnitude() < 1e-6 {
                continue;
            }
            assert!(normal.dot(centroid) > 0.0);
            checked += 1;
        }
        assert!(checked > 0);
    }

    #[test]
    fn disc_faces_positive_z() {
        let (vertices, indices) = MeshSystem::generate_disc_mesh(0.1, 50);
        assert_eq!(vertices.len(), 52);
        assert_eq!(indices.len(), 150);
        for (normal, _) in face_normals(&vertices, &indices) {
            assert!(normal.normalize().z > 0.999);
        }
        for v in &vertices {
            assert_eq!(v.position[2], 0.0);
            assert_eq!(v.normal, [0.0, 0.0, 1.0]);
        }
    }
}
