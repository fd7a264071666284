//! Registry - hecs world with stable instance ids and insertion order

use crate::instance::PlacedInstance;
use bimap::BiMap;
use furnish_core::{
    FurnishError, FurnitureType, FurnitureTypeId, InstanceId, Placement, Result, Vec2,
};

/// The spatial registry of placed instances
///
/// Wraps hecs::World with:
/// - Stable InstanceId mapping (ids are never reused)
/// - Insertion order for deterministic listing and snapshots
pub struct Registry {
    /// The underlying hecs world, one `PlacedInstance` component per entity
    world: hecs::World,
    /// Bidirectional mapping: InstanceId <-> hecs::Entity
    id_map: BiMap<InstanceId, hecs::Entity>,
    /// Instance ids in insertion order
    order: Vec<InstanceId>,
    next_id: u64,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            world: hecs::World::new(),
            id_map: BiMap::new(),
            order: Vec::new(),
            next_id: 1,
        }
    }

    /// Add an instance of `kind` at `(x, z)` with yaw `rotation`
    pub fn add(&mut self, kind: &FurnitureType, x: f32, z: f32, rotation: f32) -> InstanceId {
        self.insert(kind, Vec2::new(x, z), rotation, None)
    }

    /// Add an instance from a value-copy, keeping its annotation
    pub fn restore(&mut self, kind: &FurnitureType, placement: &Placement) -> InstanceId {
        self.insert(
            kind,
            placement.position(),
            placement.rotation,
            placement.annotation.clone(),
        )
    }

    fn insert(
        &mut self,
        kind: &FurnitureType,
        position: Vec2,
        rotation: f32,
        annotation: Option<String>,
    ) -> InstanceId {
        let id = InstanceId(self.next_id);
        self.next_id += 1;

        let entity = self.world.spawn((PlacedInstance {
            id,
            type_id: kind.id,
            position,
            rotation,
            wall_item: kind.wall_item,
            annotation,
        },));

        self.id_map.insert(id, entity);
        self.order.push(id);
        id
    }

    /// Remove an instance, returning its last state
    pub fn remove(&mut self, id: InstanceId) -> Result<PlacedInstance> {
        let entity = self
            .id_map
            .get_by_left(&id)
            .copied()
            .ok_or_else(|| FurnishError::InstanceNotFound(id.to_string()))?;

        let instance = self
            .world
            .remove_one::<PlacedInstance>(entity)
            .map_err(|_| FurnishError::InstanceNotFound(id.to_string()))?;
        self.world
            .despawn(entity)
            .map_err(|_| FurnishError::InstanceNotFound(id.to_string()))?;

        self.id_map.remove_by_left(&id);
        self.order.retain(|other| *other != id);

        Ok(instance)
    }

    /// Remove every instance, returning the removed ids in insertion order
    pub fn clear(&mut self) -> Vec<InstanceId> {
        self.world.clear();
        self.id_map.clear();
        std::mem::take(&mut self.order)
    }

    /// Get a copy of an instance
    pub fn get(&self, id: InstanceId) -> Option<PlacedInstance> {
        let entity = self.id_map.get_by_left(&id)?;
        self.world
            .get::<&PlacedInstance>(*entity)
            .ok()
            .map(|instance| (*instance).clone())
    }

    /// Check if an instance exists
    pub fn contains(&self, id: InstanceId) -> bool {
        self.id_map.contains_left(&id)
    }

    /// All instances in insertion order
    pub fn list(&self) -> Vec<PlacedInstance> {
        self.order.iter().filter_map(|id| self.get(*id)).collect()
    }

    /// Instances of one furniture type, in insertion order
    pub fn find_by_type(&self, type_id: FurnitureTypeId) -> Vec<PlacedInstance> {
        self.list()
            .into_iter()
            .filter(|instance| instance.type_id == type_id)
            .collect()
    }

    /// Instance ids in insertion order
    pub fn ids(&self) -> &[InstanceId] {
        &self.order
    }

    /// Move and/or rotate an instance in place
    pub fn set_transform(&mut self, id: InstanceId, position: Vec2, rotation: f32) -> Result<()> {
        let entity = self
            .id_map
            .get_by_left(&id)
            .copied()
            .ok_or_else(|| FurnishError::InstanceNotFound(id.to_string()))?;

        let mut instance = self
            .world
            .get::<&mut PlacedInstance>(entity)
            .map_err(|_| FurnishError::InstanceNotFound(id.to_string()))?;
        instance.position = position;
        instance.rotation = rotation;
        Ok(())
    }

    /// Replace an instance's free-text annotation
    pub fn set_annotation(&mut self, id: InstanceId, annotation: Option<String>) -> Result<()> {
        let entity = self
            .id_map
            .get_by_left(&id)
            .copied()
            .ok_or_else(|| FurnishError::InstanceNotFound(id.to_string()))?;

        let mut instance = self
            .world
            .get::<&mut PlacedInstance>(entity)
            .map_err(|_| FurnishError::InstanceNotFound(id.to_string()))?;
        instance.annotation = annotation;
        Ok(())
    }

    /// Value-copies of all instances in insertion order
    pub fn snapshot(&self) -> Vec<Placement> {
        self.list().iter().map(PlacedInstance::to_placement).collect()
    }

    /// Number of placed instances
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
