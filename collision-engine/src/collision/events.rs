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
//! Events raised by the collision system

use crate::ecs::components::ColliderRecord;
use crate::events::Event;

/// Tag of a [`CollisionEvent`], used to register listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionEventKind {
    /// A move was resolved against at least one collider
    Collision,
    /// First contact with a collider (`TOUCH` notifier)
    Touch,
    /// Contact started (`ENTER` notifier)
    Enter,
    /// Contact ended
    Exit,
    /// Contact on this move (`CONTINUOUS` notifier)
    Collided,
}

/// Payload of [`CollisionEvent::Collision`]
#[derive(Debug, Clone)]
pub struct CollisionPayload {
    /// The mover after resolution
    pub mover: ColliderRecord,
    /// Every collider hit, in processing order
    pub collisions: Vec<ColliderRecord>,
}

/// Payload of the per-contact events
#[derive(Debug, Clone)]
pub struct ContactPayload {
    /// The mover before resolution
    pub mover: ColliderRecord,
    /// The collider this event is about
    pub other: ColliderRecord,
    /// Tick length passed to the move
    pub dt: f64,
    /// Intended x displacement (`vx * dt`)
    pub moved_x: f64,
    /// Intended y displacement (`vy * dt`)
    pub moved_y: f64,
}

/// Everything the collision system can emit
#[derive(Debug, Clone)]
pub enum CollisionEvent {
    /// A move ran into one or more colliders and was resolved
    Collision(CollisionPayload),
    /// First contact
    Touch(ContactPayload),
    /// Contact started
    Enter(ContactPayload),
    /// Contact ended
    Exit(ContactPayload),
    /// Contact on this move
    Collided(ContactPayload),
}

impl CollisionEvent {
    /// The tag of this event
    pub fn kind(&self) -> CollisionEventKind {
        match self {
            CollisionEvent::Collision(_) => CollisionEventKind::Collision,
            CollisionEvent::Touch(_) => CollisionEventKind::Touch,
            CollisionEvent::Enter(_) => CollisionEventKind::Enter,
            CollisionEvent::Exit(_) => CollisionEventKind::Exit,
            CollisionEvent::Collided(_) => CollisionEventKind::Collided,
        }
    }

    /// The moving collider this event concerns
    pub fn mover(&self) -> &ColliderRecord {
        match self {
            CollisionEvent::Collision(payload) => &payload.mover,
            CollisionEvent::Touch(payload)
            | CollisionEvent::Enter(payload)
            | CollisionEvent::Exit(payload)
            | CollisionEvent::Collided(payload) => &payload.mover,
        }
    }

    /// The per-contact payload, for every kind except `Collision`
    pub fn contact(&self) -> Option<&ContactPayload> {
        match self {
            CollisionEvent::Collision(_) => None,
            CollisionEvent::Touch(payload)
            | CollisionEvent::Enter(payload)
            | CollisionEvent::Exit(payload)
            | CollisionEvent::Collided(payload) => Some(payload),
        }
    }

    /// The resolved-move payload of a `Collision` event
    pub fn collision(&self) -> Option<&CollisionPayload> {
        match self {
            CollisionEvent::Collision(payload) => Some(payload),
            _ => None,
        }
    }
}

impl Event for CollisionEvent {
    type Tag = CollisionEventKind;

    fn tag(&self) -> CollisionEventKind {
        self.kind()
    }
}
