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
//! Per-tick collision detection, resolution and notification
//!
//! The driver calls [`CollisionSystem::move_entity`] once per moving entity
//! per tick. Each call:
//!
//! 1. computes the intended displacement `(vx * dt, vy * dt)`,
//! 2. finds every collider in the mover's `interacts_with` groups that the
//!    tested region overlaps ([`CollisionSystem::check`]),
//! 3. sorts those collisions by resolution priority,
//! 4. when anything was hit, diffs the collisions against the mover's active
//!    contacts and emits touch/enter/exit/collided events,
//! 5. applies the resolution policy and emits a `collision` event when a
//!    conflict was resolved.
//!
//! A move that hits nothing applies the full displacement and leaves the
//! mover's contacts untouched.
//!
//! The system never creates or destroys entities; it only writes
//! `Collider.x/y` of the mover.

use crate::collision::config::{CollisionConfig, SweepMode};
use crate::collision::events::{CollisionEvent, CollisionPayload, ContactPayload};
use crate::collision::resolution::{self, Outcome};
use crate::ecs::components::{Collider, ColliderRecord, CollisionNotifier};
use crate::ecs::{ComponentRecord, Entity, World};
use crate::error::EcsResult;
use crate::events::Dispatcher;
use log::{debug, trace, warn};
use std::collections::HashMap;

/// Collision detection and resolution for one simulation session
///
/// # Examples
///
/// ```
/// use collision_engine::collision::{CollisionEventKind, CollisionSystem};
/// use collision_engine::ecs::components::{Collider, CollisionGroup, Resolution};
/// use collision_engine::ecs::World;
///
/// let mut world = World::new();
/// let player = world.create();
/// world.add_component(
///     player,
///     Collider::new(0.0, 0.0, 10.0, 10.0)
///         .with_group(CollisionGroup::PLAYER)
///         .interacting_with(CollisionGroup::WALL),
/// )?;
/// let wall = world.create();
/// world.add_component(
///     wall,
///     Collider::new(15.0, 0.0, 10.0, 10.0)
///         .with_group(CollisionGroup::WALL)
///         .with_resolution(Resolution::Static),
/// )?;
///
/// let mut collisions = CollisionSystem::new();
/// collisions.events_mut().on(CollisionEventKind::Collision, |event| {
///     println!("{} was blocked", event.mover().entity);
/// });
///
/// let hits = collisions.move_entity(&mut world, 0.1, player, 100.0, 0.0)?;
/// assert_eq!(hits.len(), 1);
/// assert_eq!(world.tap::<Collider>(player)?.x, 0.0);
/// # Ok::<(), collision_engine::EcsError>(())
/// ```
#[derive(Debug, Default)]
pub struct CollisionSystem {
    events: Dispatcher<CollisionEvent>,
    /// What each mover was touching after its last colliding move, as last seen
    active: HashMap<Entity, Vec<ColliderRecord>>,
    config: CollisionConfig,
}

impl CollisionSystem {
    /// Create a collision system with default settings
    pub fn new() -> Self {
        Self::with_config(CollisionConfig::default())
    }

    /// Create a collision system with custom settings
    pub fn with_config(config: CollisionConfig) -> Self {
        CollisionSystem {
            events: Dispatcher::new(),
            active: HashMap::new(),
            config,
        }
    }

    /// Current settings
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// The event channel
    pub fn events(&self) -> &Dispatcher<CollisionEvent> {
        &self.events
    }

    /// The event channel, for subscribing
    pub fn events_mut(&mut self) -> &mut Dispatcher<CollisionEvent> {
        &mut self.events
    }

    /// Entities `mover` was touching after its last colliding move, in contact order
    pub fn touching(&self, mover: Entity) -> Vec<Entity> {
        self.active
            .get(&mover)
            .map(|contacts| contacts.iter().map(|record| record.entity).collect())
            .unwrap_or_default()
    }

    /// Teleport an entity's collider, bypassing collision checks
    ///
    /// Fails with `MissingComponent` if the entity has no collider.
    pub fn update(&self, world: &mut World, entity: Entity, x: f64, y: f64) -> EcsResult<()> {
        world.get_component_mut::<Collider>(entity)?.set_position(x, y);
        trace!("teleported {} to ({}, {})", entity, x, y);
        Ok(())
    }

    /// Every other collider the mover would hit when displaced by `(dx, dy)`
    ///
    /// A candidate is returned when the mover's `interacts_with` mask shares
    /// a bit with the candidate's `group` and the candidate overlaps the
    /// tested region (see [`SweepMode`]). The candidate's own mask is not
    /// consulted. The mover is never returned. Results are in store order.
    pub fn check(&self, world: &World, mover: &ColliderRecord, dx: f64, dy: f64) -> Vec<ColliderRecord> {
        let start = mover.collider.rect();
        let destination = start.translated(dx, dy);

        world
            .query::<Collider>()
            .into_iter()
            .filter(|(entity, collider)| {
                if *entity == mover.entity || !mover.collider.detects(collider.group) {
                    return false;
                }
                let rect = collider.rect();
                match self.config.sweep {
                    SweepMode::Discrete => destination.intersects(&rect),
                    SweepMode::Swept => {
                        destination.intersects(&rect)
                            || (start.sweep_intersects(dx, dy, &rect) && !start.intersects(&rect))
                    }
                }
            })
            .map(|(entity, collider)| ColliderRecord::new(entity, collider.clone()))
            .collect()
    }

    /// Move an entity at velocity `(vx, vy)` for `dt` seconds, resolving collisions
    ///
    /// Returns the colliders hit, sorted by resolution priority. Fails with
    /// `NotFound` or `MissingComponent` if the entity is unknown or has no
    /// collider; nothing is moved or emitted in that case.
    pub fn move_entity(
        &mut self,
        world: &mut World,
        dt: f64,
        entity: Entity,
        vx: f64,
        vy: f64,
    ) -> EcsResult<Vec<ColliderRecord>> {
        self.prune(world);
        let mover = ColliderRecord::new(entity, world.tap::<Collider>(entity)?.clone());

        let target_x = vx * dt;
        let target_y = vy * dt;
        if !(target_x.is_finite() && target_y.is_finite()) {
            warn!("{} has a non-finite displacement ({}, {})", entity, target_x, target_y);
        }

        let mut collisions = self.check(world, &mover, target_x, target_y);
        if collisions.is_empty() {
            world.get_component_mut::<Collider>(entity)?.translate(target_x, target_y);
            return Ok(collisions);
        }
        resolution::sort_by_priority(&mut collisions);

        if !mover.collider.notify.is_empty() {
            self.notify_contacts(world, &mover, &collisions, dt, target_x, target_y);
        }

        // Custom resolvers reposition this copy; it replaces the stored collider.
        let mut resolved = mover.clone();
        let outcome = resolution::resolve(&mut resolved, &collisions, target_x, target_y, self.config.bounce_factor);
        trace!("{} hit {} collider(s): {:?}", entity, collisions.len(), outcome);

        let (dx, dy, report) = match outcome {
            Outcome::PassThrough => (target_x, target_y, true),
            Outcome::Handled { dx, dy } => (dx, dy, true),
            Outcome::Unhandled { dx, dy } => (dx, dy, false),
        };
        let collider = world.get_component_mut::<Collider>(entity)?;
        *collider = resolved.collider;
        collider.translate(dx, dy);

        if report {
            let mover = ColliderRecord::new(entity, world.tap::<Collider>(entity)?.clone());
            self.events.emit(&CollisionEvent::Collision(CollisionPayload {
                mover,
                collisions: collisions.clone(),
            }));
        }

        Ok(collisions)
    }

    /// Drop an entity from contact tracking, as a mover and as a contact
    ///
    /// No exit events are raised for the removed contacts.
    pub fn forget(&mut self, entity: Entity) {
        self.active.remove(&entity);
        for contacts in self.active.values_mut() {
            contacts.retain(|touched| touched.entity != entity);
        }
        self.active.retain(|_, contacts| !contacts.is_empty());
    }

    /// Delete an entity from the store and from contact tracking
    pub fn despawn(&mut self, world: &mut World, entity: Entity) -> EcsResult<ComponentRecord> {
        let record = world.delete(entity)?;
        self.forget(entity);
        Ok(record)
    }

    /// Forget every tracked contact
    ///
    /// Pair this with [`World::clear`], or use [`reset`](Self::reset).
    pub fn clear_contacts(&mut self) {
        self.active.clear();
    }

    /// Clear the store and every tracked contact, e.g. on a scene restart
    pub fn reset(&mut self, world: &mut World) {
        world.clear();
        self.clear_contacts();
    }

    /// Drop the contacts of movers that no longer exist
    fn prune(&mut self, world: &World) {
        let before = self.active.len();
        self.active.retain(|mover, _| world.contains(*mover));
        if self.active.len() != before {
            debug!("pruned contacts of {} deleted mover(s)", before - self.active.len());
        }
    }

    /// Diff this move's collisions against the mover's active contacts
    fn notify_contacts(
        &mut self,
        world: &World,
        mover: &ColliderRecord,
        collisions: &[ColliderRecord],
        dt: f64,
        moved_x: f64,
        moved_y: f64,
    ) {
        let notify = mover.collider.notify;
        let previous = self.active.remove(&mover.entity).unwrap_or_default();
        let mut active = Vec::with_capacity(previous.len().max(collisions.len()));

        for last_seen in previous {
            if let Some(current) = collisions.iter().find(|record| record.entity == last_seen.entity) {
                active.push(current.clone());
                continue;
            }
            if !world.contains(last_seen.entity) {
                debug!("dropping stale contact of {}: {} was deleted", mover.entity, last_seen.entity);
                continue;
            }
            let other = match world.tap::<Collider>(last_seen.entity) {
                Ok(collider) => ColliderRecord::new(last_seen.entity, collider.clone()),
                Err(_) => last_seen,
            };
            self.events.emit(&CollisionEvent::Exit(contact(mover, other, dt, moved_x, moved_y)));
        }

        for other in collisions {
            if notify.contains(CollisionNotifier::CONTINUOUS) {
                self.events
                    .emit(&CollisionEvent::Collided(contact(mover, other.clone(), dt, moved_x, moved_y)));
            } else if !active.iter().any(|record| record.entity == other.entity) {
                active.push(other.clone());
                if notify.contains(CollisionNotifier::TOUCH) {
                    self.events
                        .emit(&CollisionEvent::Touch(contact(mover, other.clone(), dt, moved_x, moved_y)));
                }
                if notify.contains(CollisionNotifier::ENTER) {
                    self.events
                        .emit(&CollisionEvent::Enter(contact(mover, other.clone(), dt, moved_x, moved_y)));
                }
            }
        }

        if !active.is_empty() {
            self.active.insert(mover.entity, active);
        }
    }
}

fn contact(mover: &ColliderRecord, other: ColliderRecord, dt: f64, moved_x: f64, moved_y: f64) -> ContactPayload {
    ContactPayload {
        mover: mover.clone(),
        other,
        dt,
        moved_x,
        moved_y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{CollisionGroup, Resolution};
    use crate::error::EcsError;

    fn spawn(world: &mut World, collider: Collider) -> Entity {
        let entity = world.create();
        world.add_component(entity, collider).unwrap();
        entity
    }

    fn snapshot(world: &World, entity: Entity) -> ColliderRecord {
        ColliderRecord::new(entity, world.tap::<Collider>(entity).unwrap().clone())
    }

    #[test]
    fn test_check_excludes_self() {
        let mut world = World::new();
        let mover = spawn(
            &mut world,
            Collider::new(0.0, 0.0, 10.0, 10.0)
                .with_group(CollisionGroup::all())
                .interacting_with(CollisionGroup::all()),
        );
        let system = CollisionSystem::new();
        assert!(system.check(&world, &snapshot(&world, mover), 0.0, 0.0).is_empty());
    }

    #[test]
    fn test_check_ignores_candidate_mask() {
        let mut world = World::new();
        let mover = spawn(
            &mut world,
            Collider::new(0.0, 0.0, 10.0, 10.0)
                .with_group(CollisionGroup::PLAYER)
                .interacting_with(CollisionGroup::ENEMY),
        );
        // The enemy does not care about players, but the mover detects it anyway.
        let enemy = spawn(
            &mut world,
            Collider::new(5.0, 5.0, 10.0, 10.0)
                .with_group(CollisionGroup::ENEMY)
                .interacting_with(CollisionGroup::empty()),
        );
        let system = CollisionSystem::new();
        let hits = system.check(&world, &snapshot(&world, mover), 0.0, 0.0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].entity, enemy);
    }

    #[test]
    fn test_swept_mode_catches_tunneling() {
        let mut world = World::new();
        let mover = spawn(
            &mut world,
            Collider::new(0.0, 0.0, 10.0, 10.0).interacting_with(CollisionGroup::WALL),
        );
        spawn(
            &mut world,
            Collider::new(30.0, -50.0, 2.0, 100.0).with_group(CollisionGroup::WALL),
        );
        let record = snapshot(&world, mover);

        let swept = CollisionSystem::new();
        assert_eq!(swept.check(&world, &record, 100.0, 0.0).len(), 1);

        let discrete = CollisionSystem::with_config(CollisionConfig::new().with_sweep(SweepMode::Discrete));
        assert!(discrete.check(&world, &record, 100.0, 0.0).is_empty());
    }

    #[test]
    fn test_swept_mode_allows_backing_away() {
        let mut world = World::new();
        let mover = spawn(
            &mut world,
            Collider::new(0.0, 0.0, 10.0, 10.0).interacting_with(CollisionGroup::WALL),
        );
        // Touching the mover's right edge
        spawn(
            &mut world,
            Collider::new(10.0, 0.0, 10.0, 10.0)
                .with_group(CollisionGroup::WALL)
                .with_resolution(Resolution::Static),
        );
        let record = snapshot(&world, mover);
        let system = CollisionSystem::new();

        assert_eq!(system.check(&world, &record, 1.0, 0.0).len(), 1);
        assert!(system.check(&world, &record, -1.0, 0.0).is_empty());
    }

    #[test]
    fn test_update_requires_collider() {
        let mut world = World::new();
        let bare = world.create();
        let system = CollisionSystem::new();
        assert!(matches!(
            system.update(&mut world, bare, 1.0, 1.0),
            Err(EcsError::MissingComponent { .. })
        ));

        let mover = spawn(&mut world, Collider::new(0.0, 0.0, 1.0, 1.0));
        system.update(&mut world, mover, 7.0, 8.0).unwrap();
        let collider = world.tap::<Collider>(mover).unwrap();
        assert_eq!((collider.x, collider.y), (7.0, 8.0));
    }

    #[test]
    fn test_move_without_collider_fails_and_emits_nothing() {
        let mut world = World::new();
        let bare = world.create();
        let mut system = CollisionSystem::new();
        let result = system.move_entity(&mut world, 0.1, bare, 1.0, 1.0);
        assert!(matches!(result, Err(EcsError::MissingComponent { .. })));
        assert!(system.touching(bare).is_empty());
    }
}
