//! SandboxWorld - hecs world with stable IDs, names, and parent links

use bimap::BiMap;
use std::collections::HashMap;
use vantage_core::{EntityId, Ray, RayHit, Result, Transform, VantageError, Vec3};
use vantage_gameplay::{Interactable, InteractableInfo, InteractionWorld};

/// Axis-aligned box collider, centered on the entity's world position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub half_extents: Vec3,
}

impl Collider {
    pub fn new(half_extents: Vec3) -> Self {
        Self {
            half_extents: half_extents.abs(),
        }
    }
}

/// The sandbox scene
///
/// Wraps hecs::World with:
/// - Stable EntityId mapping
/// - Named entity lookup
/// - Parent links for root resolution and world transforms
pub struct SandboxWorld {
    world: hecs::World,
    /// Bidirectional mapping: EntityId <-> hecs::Entity
    id_map: BiMap<EntityId, hecs::Entity>,
    name_map: HashMap<String, EntityId>,
    /// child -> parent
    parents: HashMap<EntityId, EntityId>,
}

impl Default for SandboxWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SandboxWorld {
    pub fn new() -> Self {
        Self {
            world: hecs::World::new(),
            id_map: BiMap::new(),
            name_map: HashMap::new(),
            parents: HashMap::new(),
        }
    }

    /// Spawn a named entity with an identity transform
    pub fn spawn(&mut self, name: impl Into<String>) -> Result<EntityId> {
        let name = name.into();
        if self.name_map.contains_key(&name) {
            return Err(VantageError::DuplicateEntityName(name));
        }

        let id = EntityId::new();
        let entity = self.world.spawn((Transform::IDENTITY,));
        self.id_map.insert(id, entity);
        self.name_map.insert(name, id);
        Ok(id)
    }

    /// Despawn an entity and everything parented under it.
    ///
    /// Returns the ids removed, children first.
    pub fn despawn(&mut self, id: EntityId) -> Result<Vec<EntityId>> {
        if !self.contains(id) {
            return Err(VantageError::EntityNotFound(id.to_string()));
        }

        let mut removed = Vec::new();
        for child in self.children(id) {
            removed.extend(self.despawn(child)?);
        }

        if let Some((_, entity)) = self.id_map.remove_by_left(&id) {
            self.world
                .despawn(entity)
                .map_err(|_| VantageError::EntityNotFound(id.to_string()))?;
        }
        self.name_map.retain(|_, v| *v != id);
        self.parents.remove(&id);
        removed.push(id);
        Ok(removed)
    }

    pub fn get_id(&self, name: &str) -> Option<EntityId> {
        self.name_map.get(name).copied()
    }

    pub fn get_name(&self, id: EntityId) -> Option<&str> {
        self.name_map
            .iter()
            .find(|(_, v)| **v == id)
            .map(|(k, _)| k.as_str())
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.id_map.contains_left(&id)
    }

    pub fn entity_count(&self) -> usize {
        self.id_map.len()
    }

    // --- Hierarchy ---

    pub fn set_parent(&mut self, child: EntityId, parent: EntityId) -> Result<()> {
        if !self.contains(child) {
            return Err(VantageError::EntityNotFound(child.to_string()));
        }
        if !self.contains(parent) {
            return Err(VantageError::EntityNotFound(parent.to_string()));
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(VantageError::ScenarioError(format!(
                "parenting {} under {} would form a cycle",
                child, parent
            )));
        }
        self.parents.insert(child, parent);
        Ok(())
    }

    pub fn get_parent(&self, child: EntityId) -> Option<EntityId> {
        self.parents.get(&child).copied()
    }

    pub fn children(&self, parent: EntityId) -> Vec<EntityId> {
        let mut children: Vec<EntityId> = self
            .parents
            .iter()
            .filter(|(_, p)| **p == parent)
            .map(|(c, _)| *c)
            .collect();
        children.sort();
        children
    }

    /// Whether `ancestor` appears on the parent chain of `id`
    pub fn is_ancestor(&self, ancestor: EntityId, id: EntityId) -> bool {
        let mut current = id;
        while let Some(parent) = self.get_parent(current) {
            if parent == ancestor {
                return true;
            }
            current = parent;
        }
        false
    }

    /// Topmost ancestor, or the entity itself when it has no parent
    pub fn root_of(&self, id: EntityId) -> EntityId {
        let mut current = id;
        while let Some(parent) = self.get_parent(current) {
            current = parent;
        }
        current
    }

    // --- Components ---

    fn entity(&self, id: EntityId) -> Result<hecs::Entity> {
        self.id_map
            .get_by_left(&id)
            .copied()
            .ok_or_else(|| VantageError::EntityNotFound(id.to_string()))
    }

    /// Attach or replace a component
    pub fn insert<C: hecs::Component>(&mut self, id: EntityId, component: C) -> Result<()> {
        let entity = self.entity(id)?;
        self.world
            .insert_one(entity, component)
            .map_err(|_| VantageError::EntityNotFound(id.to_string()))
    }

    /// Detach a component, returning it
    pub fn take<C: hecs::Component>(&mut self, id: EntityId) -> Option<C> {
        let entity = self.entity(id).ok()?;
        self.world.remove_one::<C>(entity).ok()
    }

    pub fn has<C: hecs::Component>(&self, id: EntityId) -> bool {
        self.entity(id)
            .ok()
            .and_then(|entity| self.world.entity(entity).ok())
            .is_some_and(|entity| entity.has::<C>())
    }

    /// Shared borrow of a component
    pub fn get_ref<C: hecs::Component>(&self, id: EntityId) -> Option<hecs::Ref<'_, C>> {
        let entity = self.entity(id).ok()?;
        self.world.get::<&C>(entity).ok()
    }

    pub fn get<C: hecs::Component + Clone>(&self, id: EntityId) -> Option<C> {
        self.get_ref::<C>(id).map(|component| (*component).clone())
    }

    pub fn get_mut<C: hecs::Component>(&mut self, id: EntityId) -> Option<&mut C> {
        let entity = self.entity(id).ok()?;
        self.world.query_one_mut::<&mut C>(entity).ok()
    }

    /// Ids of every entity carrying `C`, in ascending order
    pub fn ids_with<C: hecs::Component>(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self
            .world
            .query::<&C>()
            .iter()
            .filter_map(|(entity, _)| self.id_map.get_by_right(&entity).copied())
            .collect();
        ids.sort();
        ids
    }

    // --- Transforms ---

    /// Local transform (relative to the parent)
    pub fn transform(&self, id: EntityId) -> Option<Transform> {
        self.get::<Transform>(id)
    }

    pub fn set_transform(&mut self, id: EntityId, transform: Transform) -> Result<()> {
        match self.get_mut::<Transform>(id) {
            Some(current) => {
                *current = transform;
                Ok(())
            }
            None => Err(VantageError::EntityNotFound(id.to_string())),
        }
    }

    /// World transform, composed down the parent chain
    pub fn world_transform(&self, id: EntityId) -> Option<Transform> {
        let local = self.transform(id)?;
        match self.get_parent(id) {
            Some(parent) => Some(self.world_transform(parent)?.mul_transform(&local)),
            None => Some(local),
        }
    }

    pub fn world_position(&self, id: EntityId) -> Option<Vec3> {
        self.world_transform(id).map(|t| t.position)
    }
}

/// Ray-AABB intersection using the slab method.
///
/// Returns the distance along the ray to the nearest hit, or None if the box
/// is missed or lies behind the origin.
pub fn ray_intersect(ray: &Ray, center: Vec3, half_extents: Vec3) -> Option<f32> {
    let min = center - half_extents;
    let max = center + half_extents;
    let mut tmin = f32::NEG_INFINITY;
    let mut tmax = f32::INFINITY;

    for i in 0..3 {
        let origin = ray.origin[i];
        let direction = ray.direction[i];
        if direction.abs() < 1e-8 {
            // Parallel to this slab
            if origin < min[i] || origin > max[i] {
                return None;
            }
        } else {
            let inv_d = 1.0 / direction;
            let mut t1 = (min[i] - origin) * inv_d;
            let mut t2 = (max[i] - origin) * inv_d;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            tmin = tmin.max(t1);
            tmax = tmax.min(t2);
            if tmin > tmax {
                return None;
            }
        }
    }

    if tmax < 0.0 {
        None
    } else {
        Some(tmin.max(0.0))
    }
}

impl InteractionWorld for SandboxWorld {
    fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<RayHit> {
        let mut best: Option<RayHit> = None;
        for id in self.ids_with::<Collider>() {
            let (Some(collider), Some(center)) = (self.get::<Collider>(id), self.world_position(id))
            else {
                continue;
            };
            let Some(distance) = ray_intersect(ray, center, collider.half_extents) else {
                continue;
            };
            if distance <= max_distance && best.map_or(true, |b| distance < b.distance) {
                best = Some(RayHit {
                    entity: id,
                    distance,
                    point: ray.at(distance),
                });
            }
        }
        best
    }

    fn resolve_interactable(&self, hit_entity: EntityId) -> Option<EntityId> {
        // Pre-order over the hit's whole hierarchy, root first
        let mut pending = vec![self.root_of(hit_entity)];
        while let Some(id) = pending.pop() {
            if self.has::<InteractableInfo>(id) {
                return Some(id);
            }
            pending.extend(self.children(id).into_iter().rev());
        }
        None
    }

    fn interactable_mut(&mut self, id: EntityId) -> Option<&mut dyn Interactable> {
        self.get_mut::<InteractableInfo>(id)
            .map(|info| info as &mut dyn Interactable)
    }
}
