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
//! Entity management
//!
//! Entities are opaque handles that tie together the components of one
//! simulated object. Handles are generational: once an entity is deleted
//! (or the store is cleared) its handle never resolves again, even if the
//! underlying slot is reused.

use slotmap::Key;
use std::fmt;

slotmap::new_key_type! {
    /// Generational entity handle
    ///
    /// Only a [`World`](crate::ecs::World) hands these out.
    pub struct Entity;
}

impl Entity {
    /// Raw 64-bit encoding of the handle (slot index and generation)
    ///
    /// Useful for logs and stable ordering in tests; it cannot be turned back
    /// into a live handle.
    pub fn to_bits(self) -> u64 {
        self.data().as_ffi()
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({:?})", self.data())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn test_entity_equality() {
        let mut slots: SlotMap<Entity, ()> = SlotMap::with_key();
        let e1 = slots.insert(());
        let e2 = slots.insert(());
        assert_eq!(e1, e1);
        assert_ne!(e1, e2);
    }

    #[test]
    fn test_reused_slot_gets_new_generation() {
        let mut slots: SlotMap<Entity, ()> = SlotMap::with_key();
        let old = slots.insert(());
        slots.remove(old);
        let new = slots.insert(());
        assert_ne!(old, new);
        assert_ne!(old.to_bits(), new.to_bits());
        assert!(!slots.contains_key(old));
    }

    #[test]
    fn test_display() {
        let mut slots: SlotMap<Entity, ()> = SlotMap::with_key();
        let e = slots.insert(());
        assert!(e.to_string().starts_with("Entity("));
    }
}
