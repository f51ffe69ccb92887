// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polygon hit-testing primitives.
//!
//! These functions operate on world-space vertex lists, typically the
//! [`vertices`](crate::bounds::Bounds::vertices) of a node's bounds. The
//! node-level queries that feed them live on
//! [`NodeStore`](crate::scene::NodeStore).

use kurbo::{Point, Vec2};

/// How precisely a hit test is evaluated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HitTestMode {
    /// Axis-aligned bounding box only.
    #[default]
    BoundingBox,
    /// Bounding box first, then the exact transformed polygon.
    Polygon,
}

impl HitTestMode {
    /// Whether a box hit should be refined against the polygon.
    #[inline]
    #[must_use]
    pub const fn is_polygon(self) -> bool {
        matches!(self, Self::Polygon)
    }
}

/// The minimum-penetration axis found by [`sat_check`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SatResult {
    /// Signed overlap along [`normal`](Self::normal). Always negative for
    /// intersecting polygons; closer to zero means shallower penetration.
    pub overlap: f64,
    /// Unit axis of the shallowest penetration.
    pub normal: Vec2,
}

impl SatResult {
    /// The starting state: no axis tested yet.
    pub const INITIAL: Self = Self {
        overlap: f64::NEG_INFINITY,
        normal: Vec2::ZERO,
    };
}

impl Default for SatResult {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Ray-casting point-in-polygon test.
///
/// Points on an edge or vertex count as inside. Edges are taken in order,
/// wrapping from the last vertex back to the first. An empty polygon contains
/// nothing.
#[must_use]
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    let len = polygon.len();
    let Point { x, y } = point;
    let mut crossings = 0_usize;
    let mut on_border = false;

    for i in 0..len {
        let p1 = polygon[i];
        let p2 = polygon[(i + 1) % len];

        if p1.y == p2.y && y == p1.y {
            let (min_x, max_x) = if p1.x > p2.x { (p2.x, p1.x) } else { (p1.x, p2.x) };
            if x >= min_x && x <= max_x {
                on_border = true;
                continue;
            }
        }

        let (min_y, max_y) = if p1.y > p2.y { (p2.y, p1.y) } else { (p1.y, p2.y) };
        if y < min_y || y > max_y {
            continue;
        }

        // NaN for a horizontal edge off to the side, which counts as neither.
        let nx = (y - p1.y) * (p2.x - p1.x) / (p2.y - p1.y) + p1.x;
        if nx > x {
            crossings += 1;
        } else if nx == x {
            on_border = true;
        }

        // Ray passes through the start vertex: count it once if the two
        // neighbouring vertices lie on opposite sides of the ray.
        if p1.x > x && p1.y == y {
            let p0 = polygon[(len + i - 1) % len];
            if (p0.y < y && p2.y > y) || (p0.y > y && p2.y < y) {
                crossings += 1;
            }
        }
    }

    on_border || crossings % 2 == 1
}

/// Do two convex polygons intersect?
///
/// Touching polygons (zero-width overlap) are not considered intersecting.
#[must_use]
pub fn polygon_collision(poly1: &[Point], poly2: &[Point]) -> bool {
    polygon_penetration(poly1, poly2).is_some()
}

/// Runs the separating-axis test in both directions and returns the
/// shallowest penetration axis, or `None` if a separating axis exists.
///
/// An empty polygon never collides.
#[must_use]
pub fn polygon_penetration(poly1: &[Point], poly2: &[Point]) -> Option<SatResult> {
    let result = sat_check(poly1, poly2, SatResult::INITIAL)?;
    sat_check(poly2, poly1, result)
}

/// Tests every edge normal of `poly1` as a candidate separating axis.
///
/// Returns `None` as soon as a separating axis is found. Otherwise returns
/// `running` updated with the axis of greatest (least negative) overlap. The
/// stored normal is flipped whenever `poly1` projects below `poly2`.
///
/// Zero-length edges are skipped. An empty polygon on either side yields
/// `None`.
#[must_use]
pub fn sat_check(poly1: &[Point], poly2: &[Point], running: SatResult) -> Option<SatResult> {
    if poly1.is_empty() || poly2.is_empty() {
        return None;
    }

    let mut result = running;
    let len = poly1.len();
    for i in 0..len {
        let current = poly1[i];
        let next = poly1[if i + 1 < len { i + 1 } else { 0 }];
        let edge = next - current;
        let length = edge.hypot();
        if length == 0.0 {
            continue;
        }
        let mut normal = Vec2::new(edge.y, -edge.x) / length;

        let (min1, max1) = project(poly1, normal);
        let (min2, max2) = project(poly2, normal);

        let overlap = if min1 < min2 {
            normal = -normal;
            min2 - max1
        } else {
            min1 - max2
        };

        if overlap >= 0.0 {
            return None;
        }
        if overlap > result.overlap {
            result = SatResult { overlap, normal };
        }
    }
    Some(result)
}

/// Projects a non-empty polygon onto `axis`, returning `(min, max)`.
fn project(polygon: &[Point], axis: Vec2) -> (f64, f64) {
    let first = polygon[0].to_vec2().dot(axis);
    let (mut min, mut max) = (first, first);
    for p in &polygon[1..] {
        let d = p.to_vec2().dot(axis);
        if d > max {
            max = d;
        } else if d < min {
            min = d;
        }
    }
    (min, max)
}
