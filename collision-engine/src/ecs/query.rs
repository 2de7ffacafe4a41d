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
//! Typed required views over component records
//!
//! A [`Query`] names one component type or a tuple of them. Fetching it from
//! a record yields references to every requested component, or `None` when
//! any of them is missing, so callers never deal with empty slots.

use crate::ecs::components::{Collider, Position, Velocity};
use crate::ecs::{Component, ComponentKinds, ComponentRecord};

/// A set of components that can be fetched together from a record
pub trait Query<'a> {
    /// References handed out on a successful fetch
    type Item;

    /// Kinds that must be populated
    fn kinds() -> ComponentKinds;

    /// Narrow a record, returning `None` if any requested slot is empty
    fn fetch(record: &'a ComponentRecord) -> Option<Self::Item>;
}

macro_rules! impl_component_query {
    ($($component:ty),*) => {
        $(
            impl<'a> Query<'a> for $component {
                type Item = &'a $component;

                fn kinds() -> ComponentKinds {
                    <$component as Component>::KIND.flag()
                }

                fn fetch(record: &'a ComponentRecord) -> Option<Self::Item> {
                    <$component as Component>::slot(record)
                }
            }
        )*
    };
}

impl_component_query!(Position, Velocity, Collider);

macro_rules! impl_tuple_query {
    ($($name:ident),+) => {
        impl<'a, $($name: Query<'a>),+> Query<'a> for ($($name,)+) {
            type Item = ($($name::Item,)+);

            fn kinds() -> ComponentKinds {
                ComponentKinds::empty() $(| $name::kinds())+
            }

            fn fetch(record: &'a ComponentRecord) -> Option<Self::Item> {
                Some(($($name::fetch(record)?,)+))
            }
        }
    };
}

impl_tuple_query!(A);
impl_tuple_query!(A, B);
impl_tuple_query!(A, B, C);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::World;

    #[test]
    fn test_query_kinds() {
        assert_eq!(<Position as Query>::kinds(), ComponentKinds::POSITION);
        assert_eq!(
            <(Position, Collider) as Query>::kinds(),
            ComponentKinds::POSITION | ComponentKinds::COLLIDER
        );
        assert_eq!(<(Position, Velocity, Collider) as Query>::kinds(), ComponentKinds::all());
    }

    #[test]
    fn test_fetch_requires_every_slot() {
        let mut world = World::new();
        let entity = world.create();
        world.add_component(entity, Position::new(1.0, 2.0)).unwrap();

        let record = world.get(entity).unwrap();
        assert!(<Position as Query>::fetch(record).is_some());
        assert!(<(Position, Velocity) as Query>::fetch(record).is_none());

        world.add_component(entity, Velocity::new(3.0, 4.0)).unwrap();
        let record = world.get(entity).unwrap();
        let (pos, vel) = <(Position, Velocity) as Query>::fetch(record).unwrap();
        assert_eq!(pos.x(), 1.0);
        assert_eq!(vel.dy(), 4.0);
    }
}
