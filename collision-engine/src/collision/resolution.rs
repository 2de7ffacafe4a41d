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
//! Resolution policy dispatch
//!
//! Collisions are processed in priority order (see
//! [`Resolution::priority`]); the sort is stable, so colliders with equal
//! priority keep their discovery order. The scan stops at the first
//! `bounce` or `static` collider.

use crate::ecs::components::{ColliderRecord, Resolution};
use log::trace;

/// What the mover should do after the policy scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// Every collider uses `none`: move the full distance and report it
    PassThrough,
    /// A policy handled the conflict: apply this displacement and report it
    Handled {
        /// x displacement to apply
        dx: f64,
        /// y displacement to apply
        dy: f64,
    },
    /// Nothing handled the conflict: apply this displacement silently
    ///
    /// This is the full move when any `none` collider was present, and
    /// zero otherwise.
    Unhandled {
        /// x displacement to apply
        dx: f64,
        /// y displacement to apply
        dy: f64,
    },
}

/// Stable-sort collisions so lower priorities are processed first
pub fn sort_by_priority(collisions: &mut [ColliderRecord]) {
    collisions.sort_by_key(|record| record.collider.resolution.priority());
}

/// Run the policy scan over collisions already sorted by priority
///
/// `(dx, dy)` is the intended displacement and `bounce_factor` scales it for
/// the `bounce` policy. `custom` callbacks may reposition `mover` in place;
/// the returned displacement is applied on top of those writes.
pub fn resolve(
    mover: &mut ColliderRecord,
    sorted: &[ColliderRecord],
    dx: f64,
    dy: f64,
    bounce_factor: f64,
) -> Outcome {
    if sorted.iter().all(|record| record.collider.resolution.is_none()) {
        return Outcome::PassThrough;
    }

    let mut handled = false;
    let (mut move_x, mut move_y) = (0.0, 0.0);

    for other in sorted {
        match &other.collider.resolution {
            Resolution::None => {}
            Resolution::Custom(resolver) => {
                if let Some(resolver) = resolver {
                    if resolver.resolve(&mut mover.collider, other) {
                        handled = true;
                    }
                }
            }
            Resolution::Bounce => {
                move_x += dx * bounce_factor;
                move_y += dy * bounce_factor;
                handled = true;
                break;
            }
            Resolution::Static => {
                handled = true;
                break;
            }
            Resolution::Slide | Resolution::Absorb | Resolution::Soft | Resolution::Stick => {
                trace!(
                    "{} hit {} with reserved policy '{}', ignoring",
                    mover.entity,
                    other.entity,
                    other.collider.resolution.name()
                );
            }
        }
    }

    if handled {
        Outcome::Handled { dx: move_x, dy: move_y }
    } else if sorted.iter().any(|record| record.collider.resolution.is_none()) {
        Outcome::Unhandled { dx, dy }
    } else {
        Outcome::Unhandled { dx: 0.0, dy: 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::Collider;
    use crate::ecs::World;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn record(world: &mut World, resolution: Resolution) -> ColliderRecord {
        ColliderRecord::new(
            world.create(),
            Collider::new(0.0, 0.0, 1.0, 1.0).with_resolution(resolution),
        )
    }

    fn names(records: &[ColliderRecord]) -> Vec<&'static str> {
        records.iter().map(|r| r.collider.resolution.name()).collect()
    }

    #[test]
    fn test_sort_is_stable_by_priority() {
        let mut world = World::new();
        let mut collisions = vec![
            record(&mut world, Resolution::Stick),
            record(&mut world, Resolution::Static),
            record(&mut world, Resolution::Custom(None)),
            record(&mut world, Resolution::Bounce),
            record(&mut world, Resolution::None),
            record(&mut world, Resolution::Slide),
        ];
        sort_by_priority(&mut collisions);
        assert_eq!(names(&collisions), vec!["custom", "none", "bounce", "slide", "static", "stick"]);
    }

    #[test]
    fn test_static_bounce_none_sorts_and_bounces() {
        let mut world = World::new();
        let mut mover = record(&mut world, Resolution::None);
        let mut collisions = vec![
            record(&mut world, Resolution::Static),
            record(&mut world, Resolution::Bounce),
            record(&mut world, Resolution::None),
        ];
        sort_by_priority(&mut collisions);
        assert_eq!(names(&collisions), vec!["none", "bounce", "static"]);

        let outcome = resolve(&mut mover, &collisions, 10.0, 0.0, -10.0);
        assert_eq!(outcome, Outcome::Handled { dx: -100.0, dy: 0.0 });
    }

    #[test]
    fn test_all_none_passes_through() {
        let mut world = World::new();
        let mut mover = record(&mut world, Resolution::None);
        let collisions = vec![record(&mut world, Resolution::None), record(&mut world, Resolution::None)];
        assert_eq!(resolve(&mut mover, &collisions, 3.0, 4.0, -10.0), Outcome::PassThrough);
    }

    #[test]
    fn test_static_blocks() {
        let mut world = World::new();
        let mut mover = record(&mut world, Resolution::None);
        let collisions = vec![record(&mut world, Resolution::None), record(&mut world, Resolution::Static)];
        assert_eq!(
            resolve(&mut mover, &collisions, 3.0, 4.0, -10.0),
            Outcome::Handled { dx: 0.0, dy: 0.0 }
        );
    }

    #[test]
    fn test_reserved_policies_fall_back_to_none() {
        let mut world = World::new();
        let mut mover = record(&mut world, Resolution::None);

        let with_none = vec![record(&mut world, Resolution::None), record(&mut world, Resolution::Soft)];
        assert_eq!(
            resolve(&mut mover, &with_none, 3.0, 4.0, -10.0),
            Outcome::Unhandled { dx: 3.0, dy: 4.0 }
        );

        let without_none = vec![record(&mut world, Resolution::Absorb), record(&mut world, Resolution::Stick)];
        assert_eq!(
            resolve(&mut mover, &without_none, 3.0, 4.0, -10.0),
            Outcome::Unhandled { dx: 0.0, dy: 0.0 }
        );
    }

    #[test]
    fn test_custom_resolver_decides_handled() {
        let mut world = World::new();
        let mut mover = record(&mut world, Resolution::None);
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        let accepting = record(
            &mut world,
            Resolution::custom(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
                true
            }),
        );
        let declining = record(&mut world, Resolution::custom(|_, _| false));

        assert_eq!(
            resolve(&mut mover, &[declining.clone(), accepting], 3.0, 4.0, -10.0),
            Outcome::Handled { dx: 0.0, dy: 0.0 }
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let none = record(&mut world, Resolution::None);
        assert_eq!(
            resolve(&mut mover, &[declining, none], 3.0, 4.0, -10.0),
            Outcome::Unhandled { dx: 3.0, dy: 4.0 }
        );
    }

    #[test]
    fn test_custom_without_callback_is_noop() {
        let mut world = World::new();
        let mut mover = record(&mut world, Resolution::None);
        let collisions = vec![record(&mut world, Resolution::Custom(None))];
        assert_eq!(
            resolve(&mut mover, &collisions, 3.0, 4.0, -10.0),
            Outcome::Unhandled { dx: 0.0, dy: 0.0 }
        );
    }

    #[test]
    fn test_custom_writes_are_kept() {
        let mut world = World::new();
        let mut mover = record(&mut world, Resolution::None);
        let wall = ColliderRecord::new(
            world.create(),
            Collider::new(5.0, 0.0, 2.0, 2.0).with_resolution(Resolution::custom(|mover, other| {
                mover.x = other.collider.x - mover.w;
                true
            })),
        );

        assert_eq!(
            resolve(&mut mover, &[wall], 6.0, 0.0, -10.0),
            Outcome::Handled { dx: 0.0, dy: 0.0 }
        );
        assert_eq!(mover.collider.x, 4.0);
    }
}
