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
//! Error types shared by the store and the collision system

use crate::ecs::{ComponentKinds, Entity};

/// Alias for `Result<T, EcsError>`.
pub type EcsResult<T> = Result<T, EcsError>;

/// Errors raised by store lookups and collision preconditions
///
/// Neither variant is retryable: both mean the caller holds a stale handle
/// or skipped a setup step.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EcsError {
    /// The entity is unknown to the store (never created, deleted, or cleared).
    #[error("{0} not found")]
    NotFound(Entity),

    /// The entity exists but lacks components the operation requires.
    #[error("{entity} is missing required components {missing:?}")]
    MissingComponent {
        /// The entity that was looked up.
        entity: Entity,
        /// The required kinds that are not populated.
        missing: ComponentKinds,
    },
}
