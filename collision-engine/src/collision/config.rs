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
//! Collision system configuration

/// Default multiplier applied to the intended displacement by `bounce`
///
/// This pushes the mover back ten times further than it tried to go. It is
/// a gameplay placeholder, not a physical reflection.
pub const DEFAULT_BOUNCE_FACTOR: f64 = -10.0;

/// Shape of the region tested for collisions during a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepMode {
    /// Test only the box at the destination
    ///
    /// Cheap, but a fast mover can tunnel through a thin collider.
    Discrete,
    /// Test the destination box, and also every box the mover passes over
    /// travelling in a straight line from the start to the destination
    ///
    /// Colliders already overlapping the start box are only reported when
    /// they also overlap the destination, so a mover can always back away
    /// from something it is touching.
    #[default]
    Swept,
}

/// Tunable behavior of a [`CollisionSystem`](crate::collision::CollisionSystem)
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionConfig {
    /// Sweep shape for `check`
    pub sweep: SweepMode,
    /// Multiplier applied to the displacement by the `bounce` policy
    pub bounce_factor: f64,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        CollisionConfig {
            sweep: SweepMode::default(),
            bounce_factor: DEFAULT_BOUNCE_FACTOR,
        }
    }
}

impl CollisionConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sweep shape
    pub fn with_sweep(mut self, sweep: SweepMode) -> Self {
        self.sweep = sweep;
        self
    }

    /// Set the bounce multiplier
    ///
    /// # Panics
    ///
    /// Panics if `factor` is NaN or infinite.
    pub fn with_bounce_factor(mut self, factor: f64) -> Self {
        assert!(factor.is_finite(), "Bounce factor must be finite");
        self.bounce_factor = factor;
        self
    }
}
