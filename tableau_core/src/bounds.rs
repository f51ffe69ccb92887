// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! World-space bounds of a node's polygon.

use alloc::vec::Vec;

use kurbo::{Point, Rect};

/// A transformed polygon together with its enclosing axis-aligned box.
///
/// The box fields are derived from [`vertices`](Self::vertices); rebuilding a
/// `Bounds` from the same vertices always yields the same box.
#[derive(Clone, Debug, PartialEq)]
pub struct Bounds {
    /// Transformed vertices, in the order of the source polygon.
    pub vertices: Vec<Point>,
    /// Left edge of the enclosing box.
    pub x: f64,
    /// Top edge of the enclosing box.
    pub y: f64,
    /// Width of the enclosing box.
    pub width: f64,
    /// Height of the enclosing box.
    pub height: f64,
}

impl Bounds {
    /// Builds bounds from already-transformed vertices.
    ///
    /// The first vertex seeds both the minimum and the maximum. After that a
    /// coordinate only replaces the minimum when strictly smaller, and
    /// otherwise only replaces the maximum when strictly larger.
    ///
    /// Returns `None` for an empty vertex list.
    #[must_use]
    pub fn from_vertices(vertices: Vec<Point>) -> Option<Self> {
        let first = *vertices.first()?;
        let (mut min_x, mut max_x) = (first.x, first.x);
        let (mut min_y, mut max_y) = (first.y, first.y);

        for p in &vertices[1..] {
            if min_x > p.x {
                min_x = p.x;
            } else if max_x < p.x {
                max_x = p.x;
            }
            if min_y > p.y {
                min_y = p.y;
            } else if max_y < p.y {
                max_y = p.y;
            }
        }

        Some(Self {
            vertices,
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        })
    }

    /// Returns the enclosing box as a [`Rect`].
    #[inline]
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Does the enclosing box contain `point`? All four edges are inclusive.
    #[inline]
    #[must_use]
    pub fn box_contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Do the enclosing boxes of `self` and `other` overlap? Touching edges
    /// count as overlap.
    #[inline]
    #[must_use]
    pub fn box_overlaps(&self, other: &Self) -> bool {
        self.x <= other.x + other.width
            && other.x <= self.x + self.width
            && self.y <= other.y + other.height
            && other.y <= self.y + self.height
    }
}
