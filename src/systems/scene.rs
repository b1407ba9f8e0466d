use crate::{
    components::scene::{RoleComponent, ShapeComponent, TintComponent, TransformComponent},
    config::ViewerConfig,
};

use super::geospatial::MarkerPlacement;

/// The scene-graph surface scene assembly needs. Child transforms compose
/// with their parent's.
pub trait SceneBuilder {
    type Node: Copy;

    fn add_node(
        &mut self,
        role: RoleComponent,
        shape: ShapeComponent,
        tint: TintComponent,
        transform: TransformComponent,
        parent: Option<Self::Node>,
    ) -> Self::Node;
}

pub struct SceneSystem {}

impl SceneSystem {
    /// Builds the globe, and when a placement is given the marker with its
    /// heading disc parented underneath.
    pub fn assemble<B: SceneBuilder>(
        builder: &mut B,
        config: &ViewerConfig,
        placement: Option<&MarkerPlacement>,
    ) {
        builder.add_node(
            RoleComponent::Globe,
            ShapeComponent::Sphere {
                radius: config.globe_radius,
                segments: config.globe_segments,
            },
            TintComponent(config.globe_color),
            TransformComponent::identity(),
            None,
        );

        let Some(placement) = placement else {
            tracing::info!("no coordinate given, showing the globe only");
            return;
        };

        let marker = builder.add_node(
            RoleComponent::Marker,
            ShapeComponent::Sphere {
                radius: config.marker_radius,
                segments: config.marker_segments,
            },
            TintComponent(config.marker_color),
            TransformComponent::from_translation(placement.position * config.globe_radius),
            None,
        );

        // the disc only carries the rotation, its position comes from the marker
        builder.add_node(
            RoleComponent::Heading,
            ShapeComponent::Disc {
                radius: config.disc_radius,
                segments: config.disc_segments,
            },
            TintComponent(config.disc_color),
            TransformComponent::from_rotation(placement.orientation),
            Some(marker),
        );

        tracing::info!(
            latitude = placement.coordinate.latitude_deg,
            longitude = placement.coordinate.longitude_deg,
            "placed marker"
        );
    }
}
