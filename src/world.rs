use bevy_ecs::{entity::Entity, world::World};
use cgmath::SquareMatrix;

use crate::{
    components::scene::{
        ParentComponent, RoleComponent, ShapeComponent, TintComponent, TransformComponent,
    },
    systems::scene::SceneBuilder,
};

/// A node ready to be uploaded: its shape, color and composed world matrix.
#[derive(Debug, Clone, Copy)]
pub struct Renderable {
    pub entity: Entity,
    pub role: RoleComponent,
    pub shape: ShapeComponent,
    pub tint: TintComponent,
    pub world_matrix: cgmath::Matrix4<f32>,
}

/// Scene graph storage. Nodes are plain-data entities; a child refers to its
/// parent through [`ParentComponent`].
pub struct SceneWorld {
    world: World,
}

impl SceneWorld {
    pub fn new() -> Self {
        Self {
            world: World::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.world.iter_entities().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find(&mut self, role: RoleComponent) -> Option<Entity> {
        self.world
            .query::<(Entity, &RoleComponent)>()
            .iter(&self.world)
            .find(|(_, r)| **r == role)
            .map(|(entity, _)| entity)
    }

    pub fn transform(&self, entity: Entity) -> Option<&TransformComponent> {
        self.world.get::<TransformComponent>(entity)
    }

    pub fn parent(&self, entity: Entity) -> Option<Entity> {
        self.world
            .get::<ParentComponent>(entity)
            .map(|parent| parent.0)
    }

    /// Local transforms composed from the root down to `entity`.
    pub fn world_matrix(&self, entity: Entity) -> cgmath::Matrix4<f32> {
        let mut matrix = cgmath::Matrix4::identity();
        let mut current = Some(entity);

        while let Some(node) = current {
            if let Some(transform) = self.transform(node) {
                matrix = transform.matrix() * matrix;
            }
            current = self.parent(node);
        }

        matrix
    }

    pub fn renderables(&mut self) -> Vec<Renderable> {
        let nodes: Vec<(Entity, RoleComponent, ShapeComponent, TintComponent)> = self
            .world
            .query::<(Entity, &RoleComponent, &ShapeComponent, &TintComponent)>()
            .iter(&self.world)
            .map(|(entity, role, shape, tint)| (entity, *role, *shape, *tint))
            .collect();

        nodes
            .into_iter()
            .map(|(entity, role, shape, tint)| Renderable {
                entity,
                role,
                shape,
                tint,
                world_matrix: self.world_matrix(entity),
            })
            .collect()
    }
}

impl Default for SceneWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneBuilder for SceneWorld {
    type Node = Entity;

    fn add_node(
        &mut self,
        role: RoleComponent,
        shape: ShapeComponent,
        tint: TintComponent,
        transform: TransformComponent,
        parent: Option<Entity>,
    ) -> Entity {
        let mut node = self.world.spawn((role, shape, tint, transform));
        if let Some(parent) = parent {
            node.insert(ParentComponent(parent));
        }
        node.id()
    }
}
