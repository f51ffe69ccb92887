// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounds and hit-test queries.

use alloc::vec::Vec;

use kurbo::Point;

use crate::bounds::Bounds;
use crate::error::GeometryError;
use crate::hit::{HitTestMode, point_in_polygon, polygon_collision};

use super::id::{INVALID, NodeId};
use super::store::NodeStore;

impl NodeStore {
    /// Returns the world-space bounds of a node.
    ///
    /// The node's polygon is its custom bounds area if one is set, otherwise
    /// the rectangle `(0, 0)..(width, height)`. Every vertex is mapped
    /// through [`concatenated_matrix`](Self::concatenated_matrix), keeping
    /// the polygon's order.
    ///
    /// # Errors
    ///
    /// [`GeometryError::InvalidGeometry`] if the custom bounds area is set
    /// but empty.
    pub fn bounds(&self, id: NodeId) -> Result<Bounds, GeometryError> {
        let m = self.concatenated_matrix(id, None);
        let i = id.idx as usize;
        let vertices: Vec<Point> = match &self.bounds_area[i] {
            Some(area) => area
                .iter()
                .map(|&p| m.transform_point(p, false, false))
                .collect(),
            None => {
                let g = &self.geometry[i];
                [
                    Point::new(0.0, 0.0),
                    Point::new(g.width, 0.0),
                    Point::new(g.width, g.height),
                    Point::new(0.0, g.height),
                ]
                .into_iter()
                .map(|p| m.transform_point(p, false, false))
                .collect()
            }
        };
        Bounds::from_vertices(vertices).ok_or(GeometryError::InvalidGeometry { node: id })
    }

    /// Does the node contain the world-space `point`?
    ///
    /// Box containment is inclusive on every edge. In
    /// [`HitTestMode::Polygon`] a box hit is confirmed against the
    /// transformed polygon.
    ///
    /// # Errors
    ///
    /// Propagates [`bounds`](Self::bounds) failures.
    pub fn hit_test_point(
        &self,
        id: NodeId,
        point: Point,
        mode: HitTestMode,
    ) -> Result<bool, GeometryError> {
        let bound = self.bounds(id)?;
        let hit = bound.box_contains(point);
        Ok(if hit && mode.is_polygon() {
            point_in_polygon(point, &bound.vertices)
        } else {
            hit
        })
    }

    /// Do two nodes overlap?
    ///
    /// Disjoint bounding boxes answer `false` straight away. In
    /// [`HitTestMode::Polygon`] overlapping boxes are confirmed with the
    /// separating-axis test on both transformed polygons.
    ///
    /// # Errors
    ///
    /// Propagates [`bounds`](Self::bounds) failures for either node.
    pub fn hit_test_shape(
        &self,
        a: NodeId,
        b: NodeId,
        mode: HitTestMode,
    ) -> Result<bool, GeometryError> {
        let ba = self.bounds(a)?;
        let bb = self.bounds(b)?;
        let hit = ba.box_overlaps(&bb);
        Ok(if hit && mode.is_polygon() {
            polygon_collision(&ba.vertices, &bb.vertices)
        } else {
            hit
        })
    }

    /// Returns the topmost descendant of `container` under the world-space
    /// `point`.
    ///
    /// Children are searched from the top of the stacking order down. A
    /// child with children of its own is searched first; if none of its
    /// descendants is hit, the child itself is tested. Invisible children,
    /// children with `alpha <= 0`, and in `event_mode` children with pointer
    /// picking disabled are skipped together with their subtrees.
    ///
    /// # Errors
    ///
    /// Propagates [`bounds`](Self::bounds) failures of visited nodes.
    pub fn view_at_point(
        &self,
        container: NodeId,
        point: Point,
        mode: HitTestMode,
        event_mode: bool,
    ) -> Result<Option<NodeId>, GeometryError> {
        self.validate(container);
        let mut found = Vec::new();
        self.pick(container.idx, point, mode, event_mode, true, &mut found)?;
        Ok(found.first().copied())
    }

    /// Like [`view_at_point`](Self::view_at_point), but returns every hit,
    /// topmost first.
    ///
    /// # Errors
    ///
    /// Propagates [`bounds`](Self::bounds) failures of visited nodes.
    pub fn views_at_point(
        &self,
        container: NodeId,
        point: Point,
        mode: HitTestMode,
        event_mode: bool,
    ) -> Result<Vec<NodeId>, GeometryError> {
        self.validate(container);
        let mut found = Vec::new();
        self.pick(container.idx, point, mode, event_mode, false, &mut found)?;
        Ok(found)
    }

    /// Collects hits below `container` into `out`. With `first_only`, stops
    /// after the first hit.
    fn pick(
        &self,
        container: u32,
        point: Point,
        mode: HitTestMode,
        event_mode: bool,
        first_only: bool,
        out: &mut Vec<NodeId>,
    ) -> Result<(), GeometryError> {
        let mut child = self.last_child(container);
        while child != INVALID {
            let slot = child;
            let c = slot as usize;
            child = self.prev_sibling[c];

            if !self.visible[c] || self.alpha[c] <= 0.0 || (event_mode && !self.pointer_enabled[c])
            {
                continue;
            }

            let before = out.len();
            if self.first_child[c] != INVALID {
                self.pick(slot, point, mode, event_mode, first_only, out)?;
            }
            if out.len() > before {
                if first_only {
                    return Ok(());
                }
                continue;
            }

            let Some(id) = self.id_at(slot) else {
                continue;
            };
            if self.hit_test_point(id, point, mode)? {
                out.push(id);
                if first_only {
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    /// Returns the slot of the topmost child, or [`INVALID`].
    fn last_child(&self, idx: u32) -> u32 {
        let mut last = self.first_child[idx as usize];
        if last == INVALID {
            return INVALID;
        }
        while self.next_sibling[last as usize] != INVALID {
            last = self.next_sibling[last as usize];
        }
        last
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::scene::NodeKind;

    const EPS: f64 = 1e-9;

    fn near(a: f64, b: f64) -> bool {
        a - b < EPS && b - a < EPS
    }

    fn stage_with(store: &mut NodeStore, kind: NodeKind) -> (NodeId, NodeId) {
        let stage = store.create_node(NodeKind::Stage);
        let node = store.create_node(kind);
        store.add_child(stage, node);
        (stage, node)
    }

    fn boxed(store: &mut NodeStore, parent: NodeId, x: f64, y: f64, w: f64, h: f64) -> NodeId {
        let id = store.create_node(NodeKind::Sprite);
        store.set_position(id, x, y);
        store.set_size(id, w, h);
        store.add_child(parent, id);
        id
    }

    #[test]
    fn identity_node_bounds_match_local_rectangle() {
        let mut store = NodeStore::new();
        let node = store.create_node(NodeKind::Sprite);
        store.set_size(node, 20.0, 10.0);
        let b = store.bounds(node).unwrap();
        assert_eq!(
            b.vertices,
            vec![
                Point::new(0.0, 0.0),
                Point::new(20.0, 0.0),
                Point::new(20.0, 10.0),
                Point::new(0.0, 10.0),
            ]
        );
        assert_eq!((b.x, b.y, b.width, b.height), (0.0, 0.0, 20.0, 10.0));
    }

    #[test]
    fn child_bounds_include_parent_chain() {
        let mut store = NodeStore::new();
        let stage = store.create_node(NodeKind::Stage);
        let child = boxed(&mut store, stage, 10.0, 0.0, 20.0, 10.0);
        let b = store.bounds(child).unwrap();
        assert_eq!((b.x, b.y, b.width, b.height), (10.0, 0.0, 20.0, 10.0));
    }

    #[test]
    fn pivot_rotation_keeps_box_centered() {
        let mut store = NodeStore::new();
        let (_, node) = stage_with(&mut store, NodeKind::Sprite);
        store.set_size(node, 20.0, 20.0);
        store.set_pivot(node, 10.0, 10.0);

        let before = store.bounds(node).unwrap();
        store.set_rotation(node, 90.0);
        let after = store.bounds(node).unwrap();

        assert!(near(after.width, 20.0), "width {}", after.width);
        assert!(near(after.height, 20.0), "height {}", after.height);
        let c0 = before.rect().center();
        let c1 = after.rect().center();
        assert!(c0.distance(c1) < EPS, "{c0:?} vs {c1:?}");
    }

    #[test]
    fn scaled_bounds() {
        let mut store = NodeStore::new();
        let (_, node) = stage_with(&mut store, NodeKind::Shape);
        store.set_size(node, 10.0, 10.0);
        store.set_scale(node, 2.0, 0.5);
        store.set_position(node, 1.0, 1.0);
        let b = store.bounds(node).unwrap();
        assert_eq!((b.x, b.y, b.width, b.height), (1.0, 1.0, 20.0, 5.0));
    }

    #[test]
    fn custom_bounds_area_keeps_order() {
        let mut store = NodeStore::new();
        let (_, node) = stage_with(&mut store, NodeKind::Shape);
        store.set_position(node, 5.0, 5.0);
        store.set_bounds_area(
            node,
            Some(vec![
                Point::new(0.0, 0.0),
                Point::new(4.0, 2.0),
                Point::new(-3.0, 6.0),
            ]),
        );
        let b = store.bounds(node).unwrap();
        assert_eq!(
            b.vertices,
            vec![
                Point::new(5.0, 5.0),
                Point::new(9.0, 7.0),
                Point::new(2.0, 11.0),
            ]
        );
        assert_eq!((b.x, b.y, b.width, b.height), (2.0, 5.0, 7.0, 6.0));
    }

    #[test]
    fn empty_bounds_area_is_invalid() {
        let mut store = NodeStore::new();
        let (_, node) = stage_with(&mut store, NodeKind::Shape);
        store.set_bounds_area(node, Some(Vec::new()));
        assert_eq!(
            store.bounds(node),
            Err(GeometryError::InvalidGeometry { node })
        );
        assert!(store.hit_test_point(node, Point::ZERO, HitTestMode::BoundingBox).is_err());
    }

    #[test]
    fn bounds_are_idempotent() {
        let mut store = NodeStore::new();
        let (_, node) = stage_with(&mut store, NodeKind::Sprite);
        store.set_size(node, 13.0, 7.0);
        store.set_rotation(node, 27.0);
        store.set_pivot(node, 3.0, 1.0);
        let first = store.bounds(node).unwrap();
        let second = store.bounds(node).unwrap();
        assert_eq!(first, second);
        assert_eq!(Bounds::from_vertices(first.vertices.clone()), Some(first));
    }

    #[test]
    fn point_hit_box_vs_polygon() {
        let mut store = NodeStore::new();
        let (_, node) = stage_with(&mut store, NodeKind::Shape);
        store.set_size(node, 10.0, 10.0);
        store.set_pivot(node, 5.0, 5.0);
        store.set_position(node, 20.0, 20.0);
        store.set_rotation(node, 45.0);

        // Inside the rotated box's corner region, outside the diamond.
        let corner = Point::new(14.5, 14.5);
        assert!(store.hit_test_point(node, corner, HitTestMode::BoundingBox).unwrap());
        assert!(!store.hit_test_point(node, corner, HitTestMode::Polygon).unwrap());

        let center = Point::new(20.0, 20.0);
        assert!(store.hit_test_point(node, center, HitTestMode::Polygon).unwrap());
    }

    #[test]
    fn point_hit_is_inclusive_on_edges() {
        let mut store = NodeStore::new();
        let stage = store.create_node(NodeKind::Stage);
        let node = boxed(&mut store, stage, 0.0, 0.0, 10.0, 10.0);
        for p in [Point::new(0.0, 5.0), Point::new(10.0, 10.0), Point::new(5.0, 0.0)] {
            assert!(store.hit_test_point(node, p, HitTestMode::BoundingBox).unwrap(), "{p:?}");
            assert!(store.hit_test_point(node, p, HitTestMode::Polygon).unwrap(), "{p:?}");
        }
    }

    #[test]
    fn nan_geometry_never_hits() {
        let mut store = NodeStore::new();
        let stage = store.create_node(NodeKind::Stage);
        let node = boxed(&mut store, stage, f64::NAN, 0.0, 10.0, 10.0);
        assert!(!store.hit_test_point(node, Point::new(5.0, 5.0), HitTestMode::Polygon).unwrap());
    }

    #[test]
    fn shape_overlap_box_and_polygon() {
        let mut store = NodeStore::new();
        let stage = store.create_node(NodeKind::Stage);
        let a = boxed(&mut store, stage, 0.0, 0.0, 10.0, 10.0);
        let b = boxed(&mut store, stage, 5.0, 5.0, 10.0, 10.0);
        let c = boxed(&mut store, stage, 20.0, 20.0, 10.0, 10.0);
        assert!(store.hit_test_shape(a, b, HitTestMode::BoundingBox).unwrap());
        assert!(store.hit_test_shape(a, b, HitTestMode::Polygon).unwrap());
        assert!(!store.hit_test_shape(a, c, HitTestMode::BoundingBox).unwrap());
        assert!(!store.hit_test_shape(a, c, HitTestMode::Polygon).unwrap());
    }

    #[test]
    fn disjoint_boxes_short_circuit_polygon_test() {
        // Single-point polygons carry no separating axis, so the polygon test
        // alone would report a collision.
        let mut store = NodeStore::new();
        let stage = store.create_node(NodeKind::Stage);
        let a = boxed(&mut store, stage, 0.0, 0.0, 0.0, 0.0);
        let b = boxed(&mut store, stage, 100.0, 100.0, 0.0, 0.0);
        store.set_bounds_area(a, Some(vec![Point::ZERO]));
        store.set_bounds_area(b, Some(vec![Point::ZERO]));

        let va = store.bounds(a).unwrap().vertices;
        let vb = store.bounds(b).unwrap().vertices;
        assert!(polygon_collision(&va, &vb));

        assert!(!store.hit_test_shape(a, b, HitTestMode::BoundingBox).unwrap());
        assert!(!store.hit_test_shape(a, b, HitTestMode::Polygon).unwrap());
    }

    #[test]
    fn rotated_shapes_separated_by_polygon_test() {
        let mut store = NodeStore::new();
        let stage = store.create_node(NodeKind::Stage);
        let a = boxed(&mut store, stage, 0.0, 0.0, 0.0, 0.0);
        let b = boxed(&mut store, stage, 0.0, 0.0, 0.0, 0.0);
        for (id, at) in [(a, 10.0), (b, 20.0)] {
            store.set_size(id, 10.0, 10.0);
            store.set_pivot(id, 5.0, 5.0);
            store.set_position(id, at, at);
            store.set_rotation(id, 45.0);
        }
        // Diamonds with half-diagonal ~7.07 placed diagonally apart: the
        // boxes overlap in a corner, the diamonds do not.
        assert!(store.hit_test_shape(a, b, HitTestMode::BoundingBox).unwrap());
        assert!(!store.hit_test_shape(a, b, HitTestMode::Polygon).unwrap());
    }

    #[test]
    fn view_at_point_prefers_topmost() {
        let mut store = NodeStore::new();
        let stage = store.create_node(NodeKind::Stage);
        let a = boxed(&mut store, stage, 0.0, 0.0, 10.0, 10.0);
        let b = boxed(&mut store, stage, 5.0, 5.0, 10.0, 10.0);
        let p = Point::new(7.0, 7.0);

        assert_eq!(store.view_at_point(stage, p, HitTestMode::Polygon, false), Ok(Some(b)));
        assert_eq!(
            store.views_at_point(stage, p, HitTestMode::Polygon, false),
            Ok(vec![b, a])
        );
        assert_eq!(
            store.view_at_point(stage, Point::new(50.0, 50.0), HitTestMode::Polygon, false),
            Ok(None)
        );
    }

    #[test]
    fn view_at_point_skips_hidden_transparent_and_disabled() {
        let mut store = NodeStore::new();
        let stage = store.create_node(NodeKind::Stage);
        let a = boxed(&mut store, stage, 0.0, 0.0, 10.0, 10.0);
        let b = boxed(&mut store, stage, 0.0, 0.0, 10.0, 10.0);
        let p = Point::new(5.0, 5.0);

        store.set_visible(b, false);
        assert_eq!(store.view_at_point(stage, p, HitTestMode::BoundingBox, false), Ok(Some(a)));
        store.set_visible(b, true);

        store.set_alpha(b, 0.0);
        assert_eq!(store.view_at_point(stage, p, HitTestMode::BoundingBox, false), Ok(Some(a)));
        store.set_alpha(b, 1.0);

        store.set_pointer_enabled(b, false);
        assert_eq!(store.view_at_point(stage, p, HitTestMode::BoundingBox, true), Ok(Some(a)));
        assert_eq!(store.view_at_point(stage, p, HitTestMode::BoundingBox, false), Ok(Some(b)));
    }

    #[test]
    fn view_at_point_descends_into_containers() {
        let mut store = NodeStore::new();
        let stage = store.create_node(NodeKind::Stage);
        let group = store.create_node(NodeKind::Container);
        store.add_child(stage, group);
        store.set_position(group, 100.0, 0.0);
        let leaf = boxed(&mut store, group, 0.0, 0.0, 10.0, 10.0);
        let under = boxed(&mut store, stage, 100.0, 0.0, 10.0, 10.0);
        // `under` was added after `group`, so it is on top.
        let p = Point::new(105.0, 5.0);
        assert_eq!(store.view_at_point(stage, p, HitTestMode::Polygon, true), Ok(Some(under)));

        store.remove_from_parent(under);
        assert_eq!(store.view_at_point(stage, p, HitTestMode::Polygon, true), Ok(Some(leaf)));

        store.set_visible(group, false);
        assert_eq!(store.view_at_point(stage, p, HitTestMode::Polygon, true), Ok(None));
    }

    #[test]
    fn container_itself_is_tested_when_no_descendant_hits() {
        let mut store = NodeStore::new();
        let stage = store.create_node(NodeKind::Stage);
        let group = store.create_node(NodeKind::Container);
        store.add_child(stage, group);
        store.set_size(group, 50.0, 50.0);
        let _leaf = boxed(&mut store, group, 0.0, 0.0, 10.0, 10.0);
        assert_eq!(
            store.view_at_point(stage, Point::new(40.0, 40.0), HitTestMode::Polygon, false),
            Ok(Some(group))
        );
    }
}
