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
//! Collision detection, resolution and lifecycle notifications
//!
//! - [`CollisionSystem`]: the per-tick move/check/update entry points
//! - [`CollisionConfig`]: sweep shape and bounce strength
//! - [`CollisionEvent`]: everything emitted on the system's channel
//! - [`resolution`]: the priority sort and policy scan

mod config;
mod events;
mod system;

pub mod resolution;

pub use config::{CollisionConfig, SweepMode, DEFAULT_BOUNCE_FACTOR};
pub use events::{CollisionEvent, CollisionEventKind, CollisionPayload, ContactPayload};
pub use system::CollisionSystem;
