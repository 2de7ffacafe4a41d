// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! World management
//!
//! The World is the authoritative registry of entities and their component
//! records. It is an ordinary owned value: a simulation session creates one
//! and passes it by reference to whatever needs it.

use crate::ecs::query::Query;
use crate::ecs::{Component, ComponentKinds, ComponentRecord, ComponentType, Entity};
use crate::error::{EcsError, EcsResult};
use log::debug;
use slotmap::SlotMap;

/// The entity/component store
///
/// Records are kept in a generational slot map, so handles of deleted
/// entities never resolve to a newer entity. Iteration order is the slot
/// order and is not stable across deletions.
///
/// # Examples
///
/// ```
/// use collision_engine::ecs::World;
/// use collision_engine::ecs::components::{Position, Velocity};
///
/// let mut world = World::new();
/// let entity = world.create();
/// world.add_component(entity, Position::new(1.0, 2.0))?;
/// world.add_component(entity, Velocity::new(0.5, 0.0))?;
///
/// let moving = world.query::<(Position, Velocity)>();
/// assert_eq!(moving.len(), 1);
/// # Ok::<(), collision_engine::EcsError>(())
/// ```
#[derive(Debug, Default)]
pub struct World {
    records: SlotMap<Entity, ComponentRecord>,
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        World {
            records: SlotMap::with_key(),
        }
    }

    /// Create a new entity with an empty record
    pub fn create(&mut self) -> Entity {
        self.records.insert_with_key(ComponentRecord::new)
    }

    /// Delete an entity and return its record
    ///
    /// Fails with [`EcsError::NotFound`] if the entity is unknown, including
    /// when it was already deleted.
    pub fn delete(&mut self, entity: Entity) -> EcsResult<ComponentRecord> {
        let record = self.records.remove(entity).ok_or(EcsError::NotFound(entity))?;
        debug!("deleted {} ({} left)", entity, self.records.len());
        Ok(record)
    }

    /// Attach a component, overwriting any existing one of the same kind
    pub fn add_component(&mut self, entity: Entity, component: impl Into<ComponentType>) -> EcsResult<()> {
        let record = self.records.get_mut(entity).ok_or(EcsError::NotFound(entity))?;
        record.insert(component.into());
        Ok(())
    }

    /// Empty every slot listed in `kinds`; empty slots are left alone
    pub fn remove_component(&mut self, entity: Entity, kinds: ComponentKinds) -> EcsResult<()> {
        let record = self.records.get_mut(entity).ok_or(EcsError::NotFound(entity))?;
        record.remove(kinds);
        Ok(())
    }

    /// Every record holding all components of `Q`, narrowed to them
    pub fn query<'a, Q: Query<'a>>(&'a self) -> Vec<(Entity, Q::Item)> {
        self.records
            .iter()
            .filter_map(|(entity, record)| Q::fetch(record).map(|item| (entity, item)))
            .collect()
    }

    /// Every record with all of `kinds` populated
    pub fn query_kinds(&self, kinds: ComponentKinds) -> Vec<&ComponentRecord> {
        self.records.values().filter(|record| record.has(kinds)).collect()
    }

    /// The full record of an entity
    pub fn get(&self, entity: Entity) -> EcsResult<&ComponentRecord> {
        self.records.get(entity).ok_or(EcsError::NotFound(entity))
    }

    /// A record narrowed to `Q`
    ///
    /// Use this when an earlier query already established that the
    /// components exist; presence is still verified and reported as
    /// [`EcsError::MissingComponent`].
    pub fn tap<'a, Q: Query<'a>>(&'a self, entity: Entity) -> EcsResult<Q::Item> {
        let record = self.get(entity)?;
        Q::fetch(record).ok_or_else(|| EcsError::MissingComponent {
            entity,
            missing: Q::kinds().difference(record.kinds()),
        })
    }

    /// Mutable access to one component
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> EcsResult<&mut T> {
        let record = self.records.get_mut(entity).ok_or(EcsError::NotFound(entity))?;
        T::slot_mut(record).ok_or(EcsError::MissingComponent {
            entity,
            missing: T::KIND.flag(),
        })
    }

    /// Check if an entity is alive
    pub fn contains(&self, entity: Entity) -> bool {
        self.records.contains_key(entity)
    }

    /// Get the number of alive entities
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check whether the world holds no entities
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Remove all entities and records
    ///
    /// Meant for full resets such as a scene restart. Old handles stay invalid.
    /// A collision system tracking contacts in this world should be cleared
    /// too, see [`CollisionSystem::reset`](crate::collision::CollisionSystem::reset).
    pub fn clear(&mut self) {
        debug!("clearing {} entities", self.records.len());
        self.records.clear();
    }

    /// Get an iterator over all alive entities
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.records.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{Collider, Position, Velocity};

    #[test]
    fn test_world_entity_lifecycle() {
        let mut world = World::new();

        let e1 = world.create();
        let e2 = world.create();

        assert_eq!(world.len(), 2);
        assert!(world.contains(e1));
        assert!(world.contains(e2));

        world.delete(e1).unwrap();
        assert_eq!(world.len(), 1);
        assert!(!world.contains(e1));
        assert!(world.contains(e2));
    }

    #[test]
    fn test_double_delete_fails() {
        let mut world = World::new();
        let entity = world.create();
        assert!(world.delete(entity).is_ok());
        assert_eq!(world.delete(entity).unwrap_err(), EcsError::NotFound(entity));
    }

    #[test]
    fn test_add_component_to_unknown_entity() {
        let mut world = World::new();
        let entity = world.create();
        world.delete(entity).unwrap();

        let result = world.add_component(entity, Position::zero());
        assert_eq!(result, Err(EcsError::NotFound(entity)));
    }

    #[test]
    fn test_remove_component_is_noop_when_empty() {
        let mut world = World::new();
        let entity = world.create();
        world.add_component(entity, Position::zero()).unwrap();

        world
            .remove_component(entity, ComponentKinds::VELOCITY | ComponentKinds::COLLIDER)
            .unwrap();
        assert_eq!(world.get(entity).unwrap().kinds(), ComponentKinds::POSITION);

        world.remove_component(entity, ComponentKinds::POSITION).unwrap();
        assert_eq!(world.get(entity).unwrap().kinds(), ComponentKinds::empty());
    }

    #[test]
    fn test_query_filters_by_all_kinds() {
        let mut world = World::new();
        let both = world.create();
        let only_pos = world.create();
        let _empty = world.create();

        world.add_component(both, Position::new(1.0, 1.0)).unwrap();
        world.add_component(both, Velocity::new(2.0, 2.0)).unwrap();
        world.add_component(only_pos, Position::new(3.0, 3.0)).unwrap();

        assert_eq!(world.query::<Position>().len(), 2);

        let moving = world.query::<(Position, Velocity)>();
        assert_eq!(moving.len(), 1);
        assert_eq!(moving[0].0, both);

        let records = world.query_kinds(ComponentKinds::POSITION | ComponentKinds::VELOCITY);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].identity(), both);

        // An empty kind set matches every record
        assert_eq!(world.query_kinds(ComponentKinds::empty()).len(), 3);
    }

    #[test]
    fn test_tap_reports_missing_kinds() {
        let mut world = World::new();
        let entity = world.create();
        world.add_component(entity, Position::zero()).unwrap();

        assert!(world.tap::<Position>(entity).is_ok());
        let err = world.tap::<(Position, Collider)>(entity).unwrap_err();
        assert_eq!(
            err,
            EcsError::MissingComponent {
                entity,
                missing: ComponentKinds::COLLIDER,
            }
        );
    }

    #[test]
    fn test_get_component_mut() {
        let mut world = World::new();
        let entity = world.create();
        world.add_component(entity, Collider::new(0.0, 0.0, 1.0, 1.0)).unwrap();

        world.get_component_mut::<Collider>(entity).unwrap().set_position(4.0, 5.0);
        let collider = world.tap::<Collider>(entity).unwrap();
        assert_eq!((collider.x, collider.y), (4.0, 5.0));

        assert!(world.get_component_mut::<Velocity>(entity).is_err());
    }

    #[test]
    fn test_world_clear() {
        let mut world = World::new();
        let entity = world.create();
        world.add_component(entity, Position::zero()).unwrap();
        world.create();

        assert_eq!(world.len(), 2);
        world.clear();
        assert!(world.is_empty());
        assert!(world.query::<Position>().is_empty());
        assert!(world.query_kinds(ComponentKinds::empty()).is_empty());
        assert!(world.get(entity).is_err());

        // Handles created after a clear do not collide with old ones
        let fresh = world.create();
        assert_ne!(fresh, entity);
    }
}
