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
//! Axis-aligned box geometry
//!
//! Boxes are stored as a corner plus an extent (`x, y, w, h`), matching the
//! layout of the [`Collider`](crate::ecs::components::Collider) component.
//! All intersection tests are inclusive: two boxes that only share an edge
//! are considered overlapping, and so is a point lying on a box edge.

/// A point in 2D space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Axis-aligned rectangle described by its origin corner and size
///
/// # Examples
///
/// ```
/// use collision_engine::aabb::Rect;
///
/// let a = Rect::new(0.0, 0.0, 10.0, 10.0);
/// let b = Rect::new(10.0, 0.0, 5.0, 5.0);
/// assert!(a.intersects(&b)); // shared edge counts
/// assert!(!a.intersects(&b.translated(0.5, 0.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Origin x coordinate
    pub x: f64,
    /// Origin y coordinate
    pub y: f64,
    /// Width
    pub w: f64,
    /// Height
    pub h: f64,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Rect { x, y, w, h }
    }

    /// Min/max corners of this rectangle
    pub fn bounds(&self) -> Bounds {
        let (min_x, max_x) = axis_span(self.x, self.w);
        let (min_y, max_y) = axis_span(self.y, self.h);
        Bounds { min_x, min_y, max_x, max_y }
    }

    /// The same rectangle moved by `(dx, dy)`
    pub fn translated(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Inclusive test of whether this rectangle touches `other` at any
    /// point while moving in a straight line by `(dx, dy)`
    ///
    /// Solved as the path of the origin corner against `other` grown by this
    /// rectangle's size, so a thin obstacle between the start and the
    /// destination is found at any speed, and boxes near the path that the
    /// mover never passes over are not. Returns `false` when any coordinate
    /// is NaN.
    pub fn sweep_intersects(&self, dx: f64, dy: f64, other: &Rect) -> bool {
        let mover = self.bounds();
        let target = other.bounds();
        let x = axis_contact(mover.min_x, mover.max_x - mover.min_x, dx, target.min_x, target.max_x);
        let y = axis_contact(mover.min_y, mover.max_y - mover.min_y, dy, target.min_y, target.max_y);
        match (x, y) {
            (Some((x_in, x_out)), Some((y_in, y_out))) => x_in.max(y_in) <= x_out.min(y_out),
            _ => false,
        }
    }

    /// Inclusive rectangle/rectangle overlap test
    ///
    /// Returns `false` when any coordinate is NaN.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.bounds().intersects(&other.bounds())
    }

    /// Inclusive point containment test
    pub fn contains_point(&self, point: Point) -> bool {
        let b = self.bounds();
        point.x >= b.min_x && point.x <= b.max_x && point.y >= b.min_y && point.y <= b.max_y
    }

    /// Check that every field is finite
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.w.is_finite() && self.h.is_finite()
    }
}

/// Rectangle expressed as its minimum and maximum corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Left edge
    pub min_x: f64,
    /// Top edge
    pub min_y: f64,
    /// Right edge
    pub max_x: f64,
    /// Bottom edge
    pub max_y: f64,
}

impl Bounds {
    /// Inclusive overlap test on both axes
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }
}

impl From<Rect> for Bounds {
    fn from(rect: Rect) -> Self {
        rect.bounds()
    }
}

// Negative extents are normalized so a box is never "inside out".
fn axis_span(start: f64, size: f64) -> (f64, f64) {
    let end = start + size;
    if end < start {
        (end, start)
    } else {
        (start, end)
    }
}

// Range of t in [0, 1] during which the span [start, start + size] moved by
// t * delta overlaps [lo, hi].
fn axis_contact(start: f64, size: f64, delta: f64, lo: f64, hi: f64) -> Option<(f64, f64)> {
    if [start, size, delta, lo, hi].iter().any(|v| v.is_nan()) {
        return None;
    }
    let near = lo - size - start;
    let far = hi - start;
    if delta == 0.0 {
        return (near <= 0.0 && 0.0 <= far).then_some((0.0, 1.0));
    }
    let (t0, t1) = (near / delta, far / delta);
    let (t_in, t_out) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
    let (t_in, t_out) = (t_in.max(0.0), t_out.min(1.0));
    (t_in <= t_out).then_some((t_in, t_out))
}
