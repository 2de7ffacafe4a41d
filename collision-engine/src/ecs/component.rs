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
//! Component records and kinds
//!
//! Every live entity owns exactly one [`ComponentRecord`]: a bag holding at
//! most one instance of each component kind plus a back-reference to the
//! entity. An empty slot means the entity does not have that component.

use crate::ecs::components::{Collider, Position, Velocity};
use crate::ecs::Entity;

/// Trait implemented by every component type that can live in a record
///
/// Each implementation names its [`ComponentKind`] and knows which slot of a
/// [`ComponentRecord`] it occupies. Components are plain data.
pub trait Component: 'static + Send + Sync + Sized {
    /// Tag identifying this component's slot
    const KIND: ComponentKind;

    /// Borrow this component's slot from a record
    fn slot(record: &ComponentRecord) -> Option<&Self>;

    /// Mutably borrow this component's slot from a record
    fn slot_mut(record: &mut ComponentRecord) -> Option<&mut Self>;
}

/// Tag naming one component slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    /// [`Position`] slot
    Position,
    /// [`Velocity`] slot
    Velocity,
    /// [`Collider`] slot
    Collider,
}

impl ComponentKind {
    /// The single-bit set for this kind
    pub fn flag(self) -> ComponentKinds {
        match self {
            ComponentKind::Position => ComponentKinds::POSITION,
            ComponentKind::Velocity => ComponentKinds::VELOCITY,
            ComponentKind::Collider => ComponentKinds::COLLIDER,
        }
    }
}

bitflags::bitflags! {
    /// A set of component kinds, used for queries and bulk removal
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ComponentKinds: u8 {
        /// [`Position`] slot
        const POSITION = 1 << 0;
        /// [`Velocity`] slot
        const VELOCITY = 1 << 1;
        /// [`Collider`] slot
        const COLLIDER = 1 << 2;
    }
}

impl From<ComponentKind> for ComponentKinds {
    fn from(kind: ComponentKind) -> Self {
        kind.flag()
    }
}

/// Tagged component value accepted by [`World::add_component`](crate::ecs::World::add_component)
#[derive(Debug, Clone)]
pub enum ComponentType {
    /// A position
    Position(Position),
    /// A velocity
    Velocity(Velocity),
    /// A collider
    Collider(Collider),
}

impl ComponentType {
    /// The slot this value will occupy
    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentType::Position(_) => ComponentKind::Position,
            ComponentType::Velocity(_) => ComponentKind::Velocity,
            ComponentType::Collider(_) => ComponentKind::Collider,
        }
    }
}

impl From<Position> for ComponentType {
    fn from(position: Position) -> Self {
        ComponentType::Position(position)
    }
}

impl From<Velocity> for ComponentType {
    fn from(velocity: Velocity) -> Self {
        ComponentType::Velocity(velocity)
    }
}

impl From<Collider> for ComponentType {
    fn from(collider: Collider) -> Self {
        ComponentType::Collider(collider)
    }
}

/// All components currently attached to one entity
#[derive(Debug, Clone)]
pub struct ComponentRecord {
    identity: Entity,
    /// Position slot
    pub position: Option<Position>,
    /// Velocity slot
    pub velocity: Option<Velocity>,
    /// Collider slot
    pub collider: Option<Collider>,
}

impl ComponentRecord {
    pub(crate) fn new(identity: Entity) -> Self {
        ComponentRecord {
            identity,
            position: None,
            velocity: None,
            collider: None,
        }
    }

    /// The entity owning this record
    pub fn identity(&self) -> Entity {
        self.identity
    }

    /// Set of kinds with a populated slot
    pub fn kinds(&self) -> ComponentKinds {
        let mut kinds = ComponentKinds::empty();
        kinds.set(ComponentKinds::POSITION, self.position.is_some());
        kinds.set(ComponentKinds::VELOCITY, self.velocity.is_some());
        kinds.set(ComponentKinds::COLLIDER, self.collider.is_some());
        kinds
    }

    /// Check that every kind in `kinds` is populated
    pub fn has(&self, kinds: ComponentKinds) -> bool {
        self.kinds().contains(kinds)
    }

    /// Borrow a component by type
    pub fn component<T: Component>(&self) -> Option<&T> {
        T::slot(self)
    }

    /// Overwrite the slot matching the component's kind
    pub(crate) fn insert(&mut self, component: ComponentType) {
        match component {
            ComponentType::Position(position) => self.position = Some(position),
            ComponentType::Velocity(velocity) => self.velocity = Some(velocity),
            ComponentType::Collider(collider) => self.collider = Some(collider),
        }
    }

    /// Empty every slot named in `kinds`
    pub(crate) fn remove(&mut self, kinds: ComponentKinds) {
        if kinds.contains(ComponentKinds::POSITION) {
            self.position = None;
        }
        if kinds.contains(ComponentKinds::VELOCITY) {
            self.velocity = None;
        }
        if kinds.contains(ComponentKinds::COLLIDER) {
            self.collider = None;
        }
    }
}
