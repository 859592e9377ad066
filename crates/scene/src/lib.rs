#![warn(missing_docs)]
//! Collidable scene registry and sorted ray queries.

use bitflags::bitflags;
use glam::Vec3;
use handcast_physics::{Aabb, Ray, Sphere};
use std::collections::HashMap;

bitflags! {
    /// Collision layers a ray query can filter on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LayerMask: u32 {
        /// Clickable UI surfaces.
        const UI = 1 << 0;
        /// Touch-reactive entities.
        const TOUCHABLE = 1 << 1;
        /// Inert scenery.
        const SCENERY = 1 << 2;
    }
}

/// Identifies an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

/// Collidable surface attached to an entity.
#[derive(Debug, Clone, Copy)]
pub enum ColliderShape {
    /// Axis-aligned box in world space.
    Aabb(Aabb),
    /// Sphere in world space.
    Sphere(Sphere),
}

impl ColliderShape {
    fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        match self {
            ColliderShape::Aabb(aabb) => aabb.ray_intersection(ray),
            ColliderShape::Sphere(sphere) => sphere.ray_intersection(ray),
        }
    }
}

/// One intersection from a ray query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Struck entity.
    pub entity: EntityId,
    /// Hit point in world space.
    pub point: Vec3,
    /// Distance from the ray origin.
    pub distance: f32,
}

#[derive(Debug)]
struct SceneEntity {
    parent: Option<EntityId>,
    position: Vec3,
    collider: Option<(ColliderShape, LayerMask)>,
}

/// Flat entity store with parent links and collider shapes.
///
/// Positions and collider shapes are expressed in world space; parent
/// links exist only for descendant tests, not for transform inheritance.
#[derive(Debug, Default)]
pub struct Scene {
    entities: HashMap<EntityId, SceneEntity>,
    next_id: u64,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root entity at `position`.
    pub fn spawn(&mut self, position: Vec3) -> EntityId {
        self.spawn_inner(None, position)
    }

    /// Add an entity parented to `parent`.
    pub fn spawn_child(&mut self, parent: EntityId, position: Vec3) -> EntityId {
        debug_assert!(self.entities.contains_key(&parent));
        self.spawn_inner(Some(parent), position)
    }

    fn spawn_inner(&mut self, parent: Option<EntityId>, position: Vec3) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.insert(
            id,
            SceneEntity {
                parent,
                position,
                collider: None,
            },
        );
        id
    }

    /// Attach a collider shape to an entity.
    pub fn set_collider(&mut self, entity: EntityId, shape: ColliderShape, layers: LayerMask) {
        if let Some(stored) = self.entities.get_mut(&entity) {
            stored.collider = Some((shape, layers));
        }
    }

    /// Reference position of an entity, if it exists.
    pub fn position(&self, entity: EntityId) -> Option<Vec3> {
        self.entities.get(&entity).map(|e| e.position)
    }

    /// Move an entity's reference position.
    pub fn set_position(&mut self, entity: EntityId, position: Vec3) {
        if let Some(stored) = self.entities.get_mut(&entity) {
            stored.position = position;
        }
    }

    /// Whether `entity` is `ancestor` or transitively parented to it.
    pub fn is_descendant_of(&self, entity: EntityId, ancestor: EntityId) -> bool {
        let mut current = Some(entity);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.entities.get(&id).and_then(|e| e.parent);
        }
        false
    }

    /// Cast `ray` against every collider matching `layers`.
    ///
    /// Returns hits sorted ascending by distance (hard postcondition the
    /// dispatch layer depends on); empty when nothing intersects within
    /// the ray's reach. Pure query, no side effects.
    pub fn cast(&self, ray: &Ray, layers: LayerMask) -> Vec<Hit> {
        let mut hits: Vec<Hit> = self
            .entities
            .iter()
            .filter_map(|(&id, entity)| {
                let (shape, collider_layers) = entity.collider.as_ref()?;
                if !collider_layers.intersects(layers) {
                    return None;
                }
                let distance = shape.ray_intersection(ray)?;
                if distance > ray.max_distance {
                    return None;
                }
                Some(Hit {
                    entity: id,
                    point: ray.point_at(distance),
                    distance,
                })
            })
            .collect();

        // Ties broken by entity id so query results are deterministic
        hits.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then_with(|| a.entity.cmp(&b.entity))
        });
        hits
    }
}
