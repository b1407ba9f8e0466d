use bevy_ecs::{component::Component, entity::Entity};
use cgmath::{One, Vector3, Zero};

use crate::systems::geospatial::orientation::Orientation;

/// Local translation and rotation of a scene node, relative to its parent.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct TransformComponent {
    pub translation: Vector3<f32>,
    pub rotation: Orientation,
}

impl TransformComponent {
    pub fn identity() -> Self {
        Self {
            translation: Vector3::zero(),
            rotation: Orientation::one(),
        }
    }

    pub fn from_translation(translation: Vector3<f32>) -> Self {
        Self {
            translation,
            ..Self::identity()
        }
    }

    pub fn from_rotation(rotation: Orientation) -> Self {
        Self {
            rotation,
            ..Self::identity()
        }
    }

    pub fn matrix(&self) -> cgmath::Matrix4<f32> {
        cgmath::Matrix4::from_translation(self.translation) * cgmath::Matrix4::from(self.rotation)
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentComponent(pub Entity);

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum ShapeComponent {
    Sphere { radius: f32, segments: u32 },
    // lies in the local XY plane, front face +Z
    Disc { radius: f32, segments: u32 },
}

/// Flat material color, RGBA.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct TintComponent(pub [f32; 4]);

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleComponent {
    Globe,
    Marker,
    Heading,
}
