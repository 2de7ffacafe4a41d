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
//! # Collision Engine
//!
//! The simulation core of a small real-time 2D application: an
//! entity/component store paired with a per-tick collision detection and
//! resolution engine.
//!
//! ## Features
//!
//! - **Component store**: generational entity handles, one record per entity,
//!   typed queries that narrow records to the requested components
//! - **Group filtering**: bitmask groups decide what a mover can hit
//! - **Resolution policies**: deterministic priority ordering of `bounce`,
//!   `static`, `custom` and pass-through colliders
//! - **Lifecycle events**: touch/enter/exit/continuous notifications computed
//!   by diffing contacts across ticks, delivered on a typed channel
//!
//! ## Example
//!
//! ```rust
//! use collision_engine::collision::CollisionSystem;
//! use collision_engine::ecs::components::{Collider, CollisionGroup};
//! use collision_engine::ecs::World;
//!
//! let mut world = World::new();
//! let player = world.create();
//! world.add_component(
//!     player,
//!     Collider::new(0.0, 0.0, 16.0, 16.0)
//!         .with_group(CollisionGroup::PLAYER)
//!         .interacting_with(CollisionGroup::ENEMY),
//! )?;
//!
//! let mut collisions = CollisionSystem::new();
//! let hits = collisions.move_entity(&mut world, 0.5, player, 10.0, 0.0)?;
//! assert!(hits.is_empty());
//! assert_eq!(world.tap::<Collider>(player)?.x, 5.0);
//! # Ok::<(), collision_engine::EcsError>(())
//! ```

#![warn(missing_docs)]

/// Axis-aligned box geometry
pub mod aabb;

/// Collision detection and resolution
pub mod collision;

/// Entity/component store
pub mod ecs;

/// Store and precondition errors
pub mod error;

/// Typed publish/subscribe channels
pub mod events;

pub use collision::CollisionSystem;
pub use ecs::{Entity, World};
pub use error::{EcsError, EcsResult};
