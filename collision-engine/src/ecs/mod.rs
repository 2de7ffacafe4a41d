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
//! Entity/component store
//!
//! This module provides the store queried by the collision system every tick:
//! - Entity handles
//! - Per-entity component records
//! - Typed queries that narrow records to the requested components

mod entity;
mod component;
mod world;

pub mod components;
pub mod query;

pub use component::{Component, ComponentKind, ComponentKinds, ComponentRecord, ComponentType};
pub use entity::Entity;
pub use query::Query;
pub use world::World;
