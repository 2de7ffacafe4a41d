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
//! Simulation components
//!
//! This module provides the components the collision core works with:
//! 2D position and velocity, and the axis-aligned [`Collider`] together with
//! its group/notifier masks and resolution policy.

use crate::aabb::Rect;
use crate::ecs::{Component, ComponentKind, ComponentRecord, Entity};
use std::fmt;
use std::sync::Arc;

/// 2D position component
///
/// # Examples
///
/// ```
/// use collision_engine::ecs::components::Position;
///
/// let pos = Position::new(1.0, 2.0);
/// assert_eq!(pos.x(), 1.0);
/// assert!(pos.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    /// Create a new position with the given coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }

    /// Create a position at the origin
    pub fn zero() -> Self {
        Position::new(0.0, 0.0)
    }

    /// Get the x coordinate
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Get the y coordinate
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Set the x coordinate
    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    /// Set the y coordinate
    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    /// Check if both coordinates are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Component for Position {
    const KIND: ComponentKind = ComponentKind::Position;

    fn slot(record: &ComponentRecord) -> Option<&Self> {
        record.position.as_ref()
    }

    fn slot_mut(record: &mut ComponentRecord) -> Option<&mut Self> {
        record.position.as_mut()
    }
}

/// 2D velocity component, in units per second
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    dx: f64,
    dy: f64,
}

impl Velocity {
    /// Create a new velocity with the given components
    pub fn new(dx: f64, dy: f64) -> Self {
        Velocity { dx, dy }
    }

    /// Create a zero velocity (at rest)
    pub fn zero() -> Self {
        Velocity::new(0.0, 0.0)
    }

    /// Get the x component
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Get the y component
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Set the x component
    pub fn set_dx(&mut self, dx: f64) {
        self.dx = dx;
    }

    /// Set the y component
    pub fn set_dy(&mut self, dy: f64) {
        self.dy = dy;
    }

    /// Check if both components are finite
    pub fn is_valid(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite()
    }
}

impl Component for Velocity {
    const KIND: ComponentKind = ComponentKind::Velocity;

    fn slot(record: &ComponentRecord) -> Option<&Self> {
        record.velocity.as_ref()
    }

    fn slot_mut(record: &mut ComponentRecord) -> Option<&mut Self> {
        record.velocity.as_mut()
    }
}

bitflags::bitflags! {
    /// What an entity *is*, for collision filtering
    ///
    /// The "everything" sentinel is [`CollisionGroup::all()`], which is
    /// derived from the declared flags, so adding a group keeps it correct.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CollisionGroup: u32 {
        /// Player-controlled entities
        const PLAYER = 1 << 0;
        /// Hostile entities
        const ENEMY = 1 << 1;
        /// Static level geometry
        const WALL = 1 << 2;
        /// Collectibles
        const PICKUP = 1 << 3;
    }
}

bitflags::bitflags! {
    /// Which lifecycle notifications a moving collider wants
    ///
    /// [`CollisionNotifier::all()`] requests everything.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CollisionNotifier: u8 {
        /// First frame of contact
        const TOUCH = 1 << 0;
        /// Every frame of contact; replaces touch/enter tracking
        const CONTINUOUS = 1 << 1;
        /// Contact started
        const ENTER = 1 << 2;
        /// Contact ended
        const EXIT = 1 << 3;
    }
}

/// Narrowed view of a record that is guaranteed to carry a collider
///
/// This is a snapshot: it is what [`check`](crate::collision::CollisionSystem::check)
/// returns and what event payloads and custom resolvers receive.
#[derive(Debug, Clone)]
pub struct ColliderRecord {
    /// Owning entity
    pub entity: Entity,
    /// Collider state at snapshot time
    pub collider: Collider,
}

impl ColliderRecord {
    /// Create a snapshot
    pub fn new(entity: Entity, collider: Collider) -> Self {
        ColliderRecord { entity, collider }
    }
}

/// Callback deciding a `custom` resolution
///
/// Receives the mover's collider, which it may reposition, and the collider
/// it ran into. Returns whether it fully handled the conflict. Writes to the
/// mover are kept whatever the return value.
#[derive(Clone)]
pub struct CustomResolver(Arc<dyn Fn(&mut Collider, &ColliderRecord) -> bool + Send + Sync>);

impl CustomResolver {
    /// Wrap a resolver function
    pub fn new<F>(resolver: F) -> Self
    where
        F: Fn(&mut Collider, &ColliderRecord) -> bool + Send + Sync + 'static,
    {
        CustomResolver(Arc::new(resolver))
    }

    /// Run the resolver
    pub fn resolve(&self, mover: &mut Collider, other: &ColliderRecord) -> bool {
        (self.0)(mover, other)
    }
}

impl fmt::Debug for CustomResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomResolver(..)")
    }
}

/// How a mover's position is resolved when it runs into a collider
///
/// The policy is read from the collider being hit, not from the mover.
#[derive(Debug, Clone, Default)]
pub enum Resolution {
    /// No response; the mover passes through
    #[default]
    None,
    /// Delegate to a callback; `None` means no callback was attached
    Custom(Option<CustomResolver>),
    /// Push the mover back along its path
    Bounce,
    /// Reserved, currently a no-op
    Slide,
    /// Reserved, currently a no-op
    Absorb,
    /// Reserved, currently a no-op
    Soft,
    /// Block the move entirely
    Static,
    /// Reserved, currently a no-op
    Stick,
}

impl Resolution {
    /// Build a `Custom` policy from a function
    pub fn custom<F>(resolver: F) -> Self
    where
        F: Fn(&mut Collider, &ColliderRecord) -> bool + Send + Sync + 'static,
    {
        Resolution::Custom(Some(CustomResolver::new(resolver)))
    }

    /// Tie-break priority; lower values are processed first
    pub fn priority(&self) -> u8 {
        match self {
            Resolution::None | Resolution::Custom(_) => 0,
            Resolution::Bounce => 1,
            Resolution::Slide => 2,
            Resolution::Absorb => 3,
            Resolution::Soft => 4,
            Resolution::Static => 5,
            Resolution::Stick => 6,
        }
    }

    /// Check for the pass-through policy
    pub fn is_none(&self) -> bool {
        matches!(self, Resolution::None)
    }

    /// Lowercase policy name, for logs
    pub fn name(&self) -> &'static str {
        match self {
            Resolution::None => "none",
            Resolution::Custom(_) => "custom",
            Resolution::Bounce => "bounce",
            Resolution::Slide => "slide",
            Resolution::Absorb => "absorb",
            Resolution::Soft => "soft",
            Resolution::Static => "static",
            Resolution::Stick => "stick",
        }
    }
}

/// Axis-aligned box collider
///
/// The collider's `x`/`y` are the authoritative location used by the
/// collision system; only [`CollisionSystem`](crate::collision::CollisionSystem)
/// and the caller's explicit `update` calls should write them.
///
/// # Examples
///
/// ```
/// use collision_engine::ecs::components::{Collider, CollisionGroup, CollisionNotifier, Resolution};
///
/// let player = Collider::new(100.0, 100.0, 32.0, 32.0)
///     .with_group(CollisionGroup::PLAYER)
///     .interacting_with(CollisionGroup::ENEMY | CollisionGroup::WALL)
///     .with_notify(CollisionNotifier::ENTER | CollisionNotifier::EXIT)
///     .with_resolution(Resolution::Static);
/// assert!(player.interacts_with.contains(CollisionGroup::WALL));
/// ```
#[derive(Debug, Clone)]
pub struct Collider {
    /// Origin x coordinate
    pub x: f64,
    /// Origin y coordinate
    pub y: f64,
    /// Width
    pub w: f64,
    /// Height
    pub h: f64,
    /// Groups this collider belongs to
    pub group: CollisionGroup,
    /// Groups this collider detects while moving
    pub interacts_with: CollisionGroup,
    /// Notifications requested while moving
    pub notify: CollisionNotifier,
    /// Policy applied to movers that hit this collider
    pub resolution: Resolution,
}

impl Collider {
    /// Create a collider with empty masks and the `None` policy
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Collider {
            x,
            y,
            w,
            h,
            group: CollisionGroup::empty(),
            interacts_with: CollisionGroup::empty(),
            notify: CollisionNotifier::empty(),
            resolution: Resolution::None,
        }
    }

    /// Set the groups this collider belongs to
    pub fn with_group(mut self, group: CollisionGroup) -> Self {
        self.group = group;
        self
    }

    /// Set the groups this collider detects
    pub fn interacting_with(mut self, groups: CollisionGroup) -> Self {
        self.interacts_with = groups;
        self
    }

    /// Set the requested notifications
    pub fn with_notify(mut self, notify: CollisionNotifier) -> Self {
        self.notify = notify;
        self
    }

    /// Set the resolution policy
    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// The collider's box
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    /// Move the collider's origin
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Translate the collider's origin
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Check whether this collider detects anything in `group`
    pub fn detects(&self, group: CollisionGroup) -> bool {
        self.interacts_with.intersects(group)
    }
}

impl Component for Collider {
    const KIND: ComponentKind = ComponentKind::Collider;

    fn slot(record: &ComponentRecord) -> Option<&Self> {
        record.collider.as_ref()
    }

    fn slot_mut(record: &mut ComponentRecord) -> Option<&mut Self> {
        record.collider.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_accessors() {
        let mut pos = Position::new(1.0, 2.0);
        pos.set_x(5.0);
        pos.set_y(-3.0);
        assert_eq!(pos.x(), 5.0);
        assert_eq!(pos.y(), -3.0);
        assert!(pos.is_valid());
        assert!(!Position::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_velocity_accessors() {
        let mut vel = Velocity::new(3.0, 4.0);
        vel.set_dx(-1.0);
        assert_eq!((vel.dx(), vel.dy()), (-1.0, 4.0));
        assert_eq!(Velocity::zero(), Velocity::new(0.0, 0.0));
        assert!(!Velocity::new(f64::INFINITY, 0.0).is_valid());
    }

    #[test]
    fn test_group_sentinel_is_derived() {
        let all = CollisionGroup::all();
        assert!(all.contains(CollisionGroup::PLAYER));
        assert!(all.contains(CollisionGroup::ENEMY));
        assert!(all.contains(CollisionGroup::WALL));
        assert!(all.contains(CollisionGroup::PICKUP));
        assert_eq!(all.bits(), (1 << 4) - 1);
    }

    #[test]
    fn test_notifier_sentinel_is_derived() {
        let all = CollisionNotifier::all();
        assert_eq!(
            all,
            CollisionNotifier::TOUCH
                | CollisionNotifier::CONTINUOUS
                | CollisionNotifier::ENTER
                | CollisionNotifier::EXIT
        );
    }

    #[test]
    fn test_resolution_priorities() {
        assert_eq!(Resolution::None.priority(), 0);
        assert_eq!(Resolution::Custom(None).priority(), 0);
        assert_eq!(Resolution::Bounce.priority(), 1);
        assert_eq!(Resolution::Slide.priority(), 2);
        assert_eq!(Resolution::Absorb.priority(), 3);
        assert_eq!(Resolution::Soft.priority(), 4);
        assert_eq!(Resolution::Static.priority(), 5);
        assert_eq!(Resolution::Stick.priority(), 6);
    }

    #[test]
    fn test_custom_resolver_runs() {
        // Snap the mover flush against the left edge of the other collider
        let resolution = Resolution::custom(|mover, other| {
            mover.x = other.collider.x - mover.w;
            other.collider.resolution.priority() == 0
        });
        let Resolution::Custom(Some(resolver)) = resolution else {
            panic!("expected a custom resolver");
        };

        let mut world = crate::ecs::World::new();
        let other = ColliderRecord::new(world.create(), Collider::new(20.0, 0.0, 5.0, 5.0));
        let mut mover = Collider::new(17.0, 0.0, 4.0, 4.0);
        assert!(resolver.resolve(&mut mover, &other));
        assert_eq!(mover.x, 16.0);
    }

    #[test]
    fn test_collider_builders() {
        let mut collider = Collider::new(0.0, 0.0, 10.0, 20.0)
            .with_group(CollisionGroup::ENEMY)
            .interacting_with(CollisionGroup::PLAYER)
            .with_notify(CollisionNotifier::all())
            .with_resolution(Resolution::Bounce);

        assert!(collider.detects(CollisionGroup::PLAYER | CollisionGroup::WALL));
        assert!(!collider.detects(CollisionGroup::ENEMY));
        assert_eq!(collider.resolution.name(), "bounce");

        collider.translate(5.0, -5.0);
        assert_eq!(collider.rect(), Rect::new(5.0, -5.0, 10.0, 20.0));
        collider.set_position(1.0, 2.0);
        assert_eq!((collider.x, collider.y), (1.0, 2.0));
    }
}
