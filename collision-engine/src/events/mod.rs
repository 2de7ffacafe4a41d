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
//! Synchronous publish/subscribe channels
//!
//! [`Signal`] is a single stream of one payload type. [`Dispatcher`] keys a
//! set of signals by the tag of a closed event enum, so every event that can
//! be emitted is known at compile time.
//!
//! Delivery is in-line: `emit` calls every current listener in registration
//! order before returning. A panicking listener propagates to the emitter.

use log::trace;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Handle returned by a subscription, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

struct Listener<T> {
    id: ListenerId,
    once: bool,
    handler: Box<dyn FnMut(&T)>,
}

/// A single-stream broadcast channel
///
/// # Examples
///
/// ```
/// use collision_engine::events::Signal;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let total = Rc::new(Cell::new(0));
/// let mut signal = Signal::new();
/// let sink = Rc::clone(&total);
/// signal.subscribe(move |value: &i32| sink.set(sink.get() + *value));
///
/// signal.emit(&3);
/// signal.emit(&4);
/// assert_eq!(total.get(), 7);
/// ```
pub struct Signal<T> {
    listeners: Vec<Listener<T>>,
    next_id: u64,
}

impl<T> Signal<T> {
    /// Create a signal with no listeners
    pub fn new() -> Self {
        Signal {
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Call `handler` on every emission until unsubscribed
    pub fn subscribe(&mut self, handler: impl FnMut(&T) + 'static) -> ListenerId {
        let id = self.allocate_id();
        self.insert(id, false, Box::new(handler));
        id
    }

    /// Call `handler` on the next emission only
    pub fn once(&mut self, handler: impl FnMut(&T) + 'static) -> ListenerId {
        let id = self.allocate_id();
        self.insert(id, true, Box::new(handler));
        id
    }

    /// Remove one listener, or every listener when `id` is `None`
    ///
    /// Returns whether anything was removed.
    pub fn unsubscribe(&mut self, id: Option<ListenerId>) -> bool {
        let before = self.listeners.len();
        match id {
            Some(id) => self.listeners.retain(|listener| listener.id != id),
            None => self.listeners.clear(),
        }
        self.listeners.len() != before
    }

    /// Remove every listener
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    /// Deliver `detail` to every listener in registration order
    pub fn emit(&mut self, detail: &T) {
        for listener in &mut self.listeners {
            (listener.handler)(detail);
        }
        self.listeners.retain(|listener| !listener.once);
    }

    /// Get the number of registered listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Check whether no listener is registered
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    fn allocate_id(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        id
    }

    fn insert(&mut self, id: ListenerId, once: bool, handler: Box<dyn FnMut(&T)>) {
        self.listeners.push(Listener { id, once, handler });
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// A closed set of events that can travel through a [`Dispatcher`]
pub trait Event: 'static {
    /// Payload-free discriminant used to register listeners
    type Tag: Copy + Eq + Hash + fmt::Debug;

    /// The tag of this event
    fn tag(&self) -> Self::Tag;
}

/// Tag-keyed event channel
///
/// Listeners register for one tag and receive only events carrying it.
pub struct Dispatcher<E: Event> {
    channels: HashMap<E::Tag, Signal<E>>,
    next_id: u64,
}

impl<E: Event> Dispatcher<E> {
    /// Create a dispatcher with no listeners
    pub fn new() -> Self {
        Dispatcher {
            channels: HashMap::new(),
            next_id: 0,
        }
    }

    /// Listen to every event tagged `tag`
    pub fn on(&mut self, tag: E::Tag, handler: impl FnMut(&E) + 'static) -> ListenerId {
        self.register(tag, false, Box::new(handler))
    }

    /// Listen to the next event tagged `tag` only
    pub fn once(&mut self, tag: E::Tag, handler: impl FnMut(&E) + 'static) -> ListenerId {
        self.register(tag, true, Box::new(handler))
    }

    /// Remove one listener of `tag`, or all of them when `id` is `None`
    pub fn off(&mut self, tag: E::Tag, id: Option<ListenerId>) -> bool {
        self.channels
            .get_mut(&tag)
            .map_or(false, |signal| signal.unsubscribe(id))
    }

    /// Remove every listener of every tag
    pub fn clear(&mut self) {
        self.channels.clear();
    }

    /// Deliver an event to the listeners of its tag
    pub fn emit(&mut self, event: &E) {
        let tag = event.tag();
        if let Some(signal) = self.channels.get_mut(&tag) {
            trace!("emitting {:?} to {} listener(s)", tag, signal.len());
            signal.emit(event);
        }
    }

    /// Get the number of listeners registered for `tag`
    pub fn listener_count(&self, tag: E::Tag) -> usize {
        self.channels.get(&tag).map_or(0, Signal::len)
    }

    fn register(&mut self, tag: E::Tag, once: bool, handler: Box<dyn FnMut(&E)>) -> ListenerId {
        // Ids are unique across tags so a stray id never removes another tag's listener.
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.channels.entry(tag).or_default().insert(id, once, handler);
        id
    }
}

impl<E: Event> Default for Dispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> fmt::Debug for Dispatcher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (tag, signal) in &self.channels {
            map.entry(tag, &signal.len());
        }
        map.finish()
    }
}
