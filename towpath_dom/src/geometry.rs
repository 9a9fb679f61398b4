// Copyright 2025 the Towpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel geometry shared by the drag core and hosts.

use kurbo::{Point, Vec2};

/// A CSS `left`/`top` pixel pair.
///
/// `Offset` is the unit of every position, margin, and scroll quantity in
/// Towpath. It is a plain value: operations return new offsets rather than
/// mutating in place.
///
/// Kurbo draws a distinction between points and vectors; an `Offset` is
/// deliberately both, because the CSS quantities it models (an absolute page
/// position, a margin pair, a click offset) flow into the same arithmetic.
/// Use [`Offset::to_point`] / [`Offset::to_vec2`] at the Kurbo boundary.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Offset {
    /// Horizontal component in pixels.
    pub left: f64,
    /// Vertical component in pixels.
    pub top: f64,
}

impl Offset {
    /// The zero offset.
    pub const ZERO: Self = Self { left: 0.0, top: 0.0 };

    /// Creates an offset from `left` and `top` pixel components.
    #[must_use]
    pub const fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }

    /// Returns this offset translated by `(dx, dy)`.
    #[must_use]
    pub fn add(self, dx: f64, dy: f64) -> Self {
        Self::new(self.left + dx, self.top + dy)
    }

    /// Converts to a Kurbo point.
    #[must_use]
    pub const fn to_point(self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Converts to a Kurbo vector.
    #[must_use]
    pub const fn to_vec2(self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }
}

impl core::ops::Add for Offset {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.left + rhs.left, self.top + rhs.top)
    }
}

impl core::ops::Sub for Offset {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.left - rhs.left, self.top - rhs.top)
    }
}

impl From<Point> for Offset {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<Vec2> for Offset {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

/// A width/height pixel pair.
///
/// Used for element outer dimensions (border box), scrollable extents, and
/// the host viewport.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// The zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Creates a size from `width` and `height` pixel components.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Per-edge pixel widths, used for borders and padding.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Edges {
    /// Left edge width in pixels.
    pub left: f64,
    /// Top edge width in pixels.
    pub top: f64,
    /// Right edge width in pixels.
    pub right: f64,
    /// Bottom edge width in pixels.
    pub bottom: f64,
}

impl Edges {
    /// All edges zero.
    pub const ZERO: Self = Self {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    /// Creates edge widths in CSS order (top, right, bottom, left).
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The same width on all four edges.
    #[must_use]
    pub const fn uniform(width: f64) -> Self {
        Self::new(width, width, width, width)
    }
}

/// The positioning scheme of an element's box.
///
/// The drag core reads this to decide which ancestor establishes the helper's
/// coordinate frame and whether scroll compensation applies (`Fixed` boxes do
/// not scroll with content).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CssPosition {
    /// Normal flow; `left`/`top` offsets are ignored.
    #[default]
    Static,
    /// Offset from the element's normal-flow position.
    Relative,
    /// Positioned against the nearest positioned ancestor.
    Absolute,
    /// Positioned against the viewport.
    Fixed,
}

impl CssPosition {
    /// Returns `true` for schemes that establish an offset reference
    /// (anything but `Static`).
    #[must_use]
    pub fn is_positioned(self) -> bool {
        self != Self::Static
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_add_translates_both_components() {
        let o = Offset::new(10.0, 20.0).add(5.0, -3.0);
        assert_eq!(o, Offset::new(15.0, 17.0));
    }

    #[test]
    fn offset_operators() {
        let a = Offset::new(10.0, 20.0);
        let b = Offset::new(1.0, 2.0);
        assert_eq!(a + b, Offset::new(11.0, 22.0));
        assert_eq!(a - b, Offset::new(9.0, 18.0));
    }

    #[test]
    fn offset_kurbo_round_trip() {
        let o = Offset::new(3.0, 4.0);
        assert_eq!(Offset::from(o.to_point()), o);
        assert_eq!(Offset::from(o.to_vec2()), o);
    }

    #[test]
    fn edges_css_order() {
        let e = Edges::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(e.top, 1.0);
        assert_eq!(e.right, 2.0);
        assert_eq!(e.bottom, 3.0);
        assert_eq!(e.left, 4.0);
    }

    #[test]
    fn static_is_not_positioned() {
        assert!(!CssPosition::Static.is_positioned());
        assert!(CssPosition::Relative.is_positioned());
        assert!(CssPosition::Absolute.is_positioned());
        assert!(CssPosition::Fixed.is_positioned());
    }
}
