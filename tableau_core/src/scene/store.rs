// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays node storage with allocation, topology, and property management.

use alloc::vec::Vec;

use kurbo::Point;

use crate::config::SceneConfig;

use super::id::{INVALID, NodeId, NodeKind};
use super::traverse::Children;

/// Local placement of a node relative to its parent.
///
/// Rotation is in degrees; positive angles turn clockwise in the y-down
/// coordinate system. Rotation and scale are applied about the pivot, which
/// is given in the node's own coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    /// Horizontal position in the parent.
    pub x: f64,
    /// Vertical position in the parent.
    pub y: f64,
    /// Unscaled width.
    pub width: f64,
    /// Unscaled height.
    pub height: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Pivot x in local coordinates.
    pub pivot_x: f64,
    /// Pivot y in local coordinates.
    pub pivot_y: f64,
    /// Horizontal scale factor.
    pub scale_x: f64,
    /// Vertical scale factor.
    pub scale_y: f64,
}

impl Geometry {
    /// Origin placement, zero size, no rotation, unit scale.
    pub const DEFAULT: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
        rotation: 0.0,
        pivot_x: 0.0,
        pivot_y: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
    };
}

impl Default for Geometry {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Struct-of-arrays storage for all nodes of a scene.
///
/// Nodes are addressed by [`NodeId`] handles. Each node occupies a slot in
/// parallel arrays; destroyed nodes are recycled through a free list and
/// generation counters reject stale handles.
///
/// Parent links are raw slot indices. The store owns the tree, and a node
/// never keeps its parent alive.
#[derive(Debug)]
pub struct NodeStore {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Local properties --
    pub(crate) kind: Vec<NodeKind>,
    pub(crate) geometry: Vec<Geometry>,
    pub(crate) bounds_area: Vec<Option<Vec<Point>>>,
    pub(crate) visible: Vec<bool>,
    pub(crate) alpha: Vec<f32>,
    pub(crate) pointer_enabled: Vec<bool>,

    // -- Dispatch state --
    pub(crate) pointer_over: Vec<bool>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Frame state --
    pub(crate) frame_index: u64,

    pub(crate) config: SceneConfig,
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeStore {
    /// Creates an empty store with [`SceneConfig::standard`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SceneConfig::standard())
    }

    /// Creates an empty store with the given configuration.
    #[must_use]
    pub fn with_config(config: SceneConfig) -> Self {
        Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            kind: Vec::new(),
            geometry: Vec::new(),
            bounds_area: Vec::new(),
            visible: Vec::new(),
            alpha: Vec::new(),
            pointer_enabled: Vec::new(),
            pointer_over: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            frame_index: 0,
            config,
        }
    }

    /// Returns the scene configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> SceneConfig {
        self.config
    }

    /// Returns the number of render passes run so far.
    ///
    /// Each call to [`render`](Self::render) increments it before drawing, so
    /// the first pass reports frame 1.
    #[inline]
    #[must_use]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    // -- Allocation API --

    /// Creates a node of the given kind and returns its handle.
    ///
    /// The node starts with [`Geometry::DEFAULT`], no custom bounds area,
    /// visible, fully opaque, pointer-enabled, and with no parent.
    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let idx = if let Some(idx) = self.free_list.pop() {
            let i = idx as usize;
            self.generation[i] += 1;
            self.parent[i] = INVALID;
            self.first_child[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.prev_sibling[i] = INVALID;
            self.kind[i] = kind;
            self.geometry[i] = Geometry::DEFAULT;
            self.bounds_area[i] = None;
            self.visible[i] = true;
            self.alpha[i] = 1.0;
            self.pointer_enabled[i] = true;
            self.pointer_over[i] = false;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.kind.push(kind);
            self.geometry.push(Geometry::DEFAULT);
            self.bounds_area.push(None);
            self.visible.push(true);
            self.alpha.push(1.0);
            self.pointer_enabled.push(true);
            self.pointer_over.push(false);
            self.generation.push(0);
            idx
        };

        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Destroys a node, freeing its slot for reuse.
    ///
    /// # Panics
    ///
    /// Panics if the node has children (remove them first) or if the handle
    /// is stale.
    pub fn destroy_node(&mut self, id: NodeId) {
        self.validate(id);
        let idx = id.idx;
        assert!(
            self.first_child[idx as usize] == INVALID,
            "cannot destroy node with children"
        );

        if self.parent[idx as usize] != INVALID {
            self.unlink_from_parent(idx);
        }

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;
        self.bounds_area[idx as usize] = None;
        self.free_list.push(idx);
    }

    /// Returns whether the given handle refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    // -- Topology API --

    /// Adds `child` as the last (topmost) child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, if `child` already has a parent, if
    /// `parent` is not a container kind, or if `parent` is `child` or one of
    /// its descendants.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        self.validate(parent);
        self.validate(child);
        assert!(
            self.parent[child.idx as usize] == INVALID,
            "child already has a parent"
        );
        self.check_can_adopt(parent.idx, child.idx);
        self.link_last(parent.idx, child.idx);
    }

    /// Removes `child` from its current parent.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the node has no parent.
    pub fn remove_from_parent(&mut self, child: NodeId) {
        self.validate(child);
        assert!(
            self.parent[child.idx as usize] != INVALID,
            "node has no parent"
        );
        self.unlink_from_parent(child.idx);
    }

    /// Moves `child` to be the last child of `new_parent`.
    ///
    /// If `child` already has a parent, it is removed first.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, if `new_parent` is not a container
    /// kind, or if `new_parent` is `child` or one of its descendants.
    pub fn reparent(&mut self, child: NodeId, new_parent: NodeId) {
        self.validate(child);
        self.validate(new_parent);
        self.check_can_adopt(new_parent.idx, child.idx);

        if self.parent[child.idx as usize] != INVALID {
            self.unlink_from_parent(child.idx);
        }
        self.link_last(new_parent.idx, child.idx);
    }

    /// Inserts `child` before `sibling` in the sibling list, so it draws
    /// beneath `sibling`.
    ///
    /// # Panics
    ///
    /// Panics if handles are stale, `child` already has a parent, `sibling`
    /// has no parent, or `child` is an ancestor of `sibling`.
    pub fn insert_before(&mut self, child: NodeId, sibling: NodeId) {
        self.validate(child);
        self.validate(sibling);
        let c = child.idx;
        let s = sibling.idx;
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );
        let p = self.parent[s as usize];
        assert!(p != INVALID, "sibling has no parent");
        self.check_can_adopt(p, c);

        self.parent[c as usize] = p;
        self.next_sibling[c as usize] = s;
        self.prev_sibling[c as usize] = self.prev_sibling[s as usize];

        if self.prev_sibling[s as usize] != INVALID {
            self.next_sibling[self.prev_sibling[s as usize] as usize] = c;
        } else {
            self.first_child[p as usize] = c;
        }
        self.prev_sibling[s as usize] = c;
    }

    /// Returns the parent of a node, if any.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        self.id_at(self.parent[id.idx as usize])
    }

    /// Returns an iterator over the direct children of a node, bottom to top.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    /// Returns the live nodes that have no parent.
    #[must_use]
    pub fn roots(&self) -> Vec<NodeId> {
        let mut roots = Vec::new();
        for idx in 0..self.len {
            if self.parent[idx as usize] == INVALID && !self.free_list.contains(&idx) {
                roots.push(NodeId {
                    idx,
                    generation: self.generation[idx as usize],
                });
            }
        }
        roots
    }

    // -- Property getters --

    /// Returns the kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.validate(id);
        self.kind[id.idx as usize]
    }

    /// Whether the node is a stage (the root marker of a displayed tree).
    #[must_use]
    pub fn is_stage(&self, id: NodeId) -> bool {
        self.kind(id) == NodeKind::Stage
    }

    /// Returns the local geometry of a node.
    #[must_use]
    pub fn geometry(&self, id: NodeId) -> Geometry {
        self.validate(id);
        self.geometry[id.idx as usize]
    }

    /// Returns the custom local-space bounds polygon, if one is set.
    #[must_use]
    pub fn bounds_area(&self, id: NodeId) -> Option<&[Point]> {
        self.validate(id);
        self.bounds_area[id.idx as usize].as_deref()
    }

    /// Returns whether the node is visible.
    #[must_use]
    pub fn visible(&self, id: NodeId) -> bool {
        self.validate(id);
        self.visible[id.idx as usize]
    }

    /// Returns the node's alpha.
    #[must_use]
    pub fn alpha(&self, id: NodeId) -> f32 {
        self.validate(id);
        self.alpha[id.idx as usize]
    }

    /// Returns whether the node takes part in pointer picking.
    #[must_use]
    pub fn pointer_enabled(&self, id: NodeId) -> bool {
        self.validate(id);
        self.pointer_enabled[id.idx as usize]
    }

    /// Returns whether the pointer is currently considered over the node.
    ///
    /// Set by a `MouseMove` reaching the node during
    /// [`dispatch_event`](Self::dispatch_event), cleared by `MouseOut`.
    #[must_use]
    pub fn pointer_over(&self, id: NodeId) -> bool {
        self.validate(id);
        self.pointer_over[id.idx as usize]
    }

    // -- Mutation API --

    /// Replaces the whole local geometry of a node.
    pub fn set_geometry(&mut self, id: NodeId, geometry: Geometry) {
        self.validate(id);
        self.geometry[id.idx as usize] = geometry;
    }

    /// Sets the position of a node in its parent.
    pub fn set_position(&mut self, id: NodeId, x: f64, y: f64) {
        self.validate(id);
        let g = &mut self.geometry[id.idx as usize];
        g.x = x;
        g.y = y;
    }

    /// Sets the unscaled size of a node.
    pub fn set_size(&mut self, id: NodeId, width: f64, height: f64) {
        self.validate(id);
        let g = &mut self.geometry[id.idx as usize];
        g.width = width;
        g.height = height;
    }

    /// Sets the rotation of a node, in degrees.
    pub fn set_rotation(&mut self, id: NodeId, degrees: f64) {
        self.validate(id);
        self.geometry[id.idx as usize].rotation = degrees;
    }

    /// Sets the pivot of a node, in local coordinates.
    pub fn set_pivot(&mut self, id: NodeId, pivot_x: f64, pivot_y: f64) {
        self.validate(id);
        let g = &mut self.geometry[id.idx as usize];
        g.pivot_x = pivot_x;
        g.pivot_y = pivot_y;
    }

    /// Sets the scale factors of a node.
    pub fn set_scale(&mut self, id: NodeId, scale_x: f64, scale_y: f64) {
        self.validate(id);
        let g = &mut self.geometry[id.idx as usize];
        g.scale_x = scale_x;
        g.scale_y = scale_y;
    }

    /// Sets or clears the custom local-space bounds polygon.
    ///
    /// `None` restores the default rectangle derived from width and height.
    /// An explicitly empty polygon is accepted here, but bounds queries on
    /// the node then fail with
    /// [`GeometryError::InvalidGeometry`](crate::GeometryError::InvalidGeometry).
    pub fn set_bounds_area(&mut self, id: NodeId, area: Option<Vec<Point>>) {
        self.validate(id);
        self.bounds_area[id.idx as usize] = area;
    }

    /// Shows or hides a node and its subtree.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        self.validate(id);
        self.visible[id.idx as usize] = visible;
    }

    /// Sets the alpha of a node. Nodes with `alpha <= 0` are not picked.
    pub fn set_alpha(&mut self, id: NodeId, alpha: f32) {
        self.validate(id);
        self.alpha[id.idx as usize] = alpha;
    }

    /// Enables or disables pointer picking for a node.
    pub fn set_pointer_enabled(&mut self, id: NodeId, enabled: bool) {
        self.validate(id);
        self.pointer_enabled[id.idx as usize] = enabled;
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: NodeId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale NodeId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Turns a raw slot index into a handle, or `None` for [`INVALID`].
    pub(crate) fn id_at(&self, idx: u32) -> Option<NodeId> {
        if idx == INVALID {
            None
        } else {
            Some(NodeId {
                idx,
                generation: self.generation[idx as usize],
            })
        }
    }

    /// Panics unless `parent` may take `child` as a child.
    fn check_can_adopt(&self, parent: u32, child: u32) {
        let kind = self.kind[parent as usize];
        assert!(
            kind.is_container(),
            "cannot add children to a {} node",
            kind.name()
        );
        let mut cur = parent;
        while cur != INVALID {
            assert!(cur != child, "would create a cycle");
            cur = self.parent[cur as usize];
        }
    }

    /// Appends `child` to the end of `parent`'s child list.
    fn link_last(&mut self, parent: u32, child: u32) {
        let (p, c) = (parent, child);
        self.parent[c as usize] = p;
        self.prev_sibling[c as usize] = INVALID;
        self.next_sibling[c as usize] = INVALID;

        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
            self.prev_sibling[c as usize] = last;
        }
    }

    /// Removes `idx` from its parent's child list.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn create_and_destroy() {
        let mut store = NodeStore::new();
        let id = store.create_node(NodeKind::Sprite);
        assert!(store.is_alive(id));
        store.destroy_node(id);
        assert!(!store.is_alive(id));
    }

    #[test]
    fn new_nodes_have_defaults() {
        let mut store = NodeStore::new();
        let id = store.create_node(NodeKind::Shape);
        assert_eq!(store.geometry(id), Geometry::default());
        assert_eq!(store.geometry(id).scale_x, 1.0);
        assert!(store.bounds_area(id).is_none());
        assert!(store.visible(id));
        assert_eq!(store.alpha(id), 1.0);
        assert!(store.pointer_enabled(id));
        assert!(!store.pointer_over(id));
        assert_eq!(store.kind(id), NodeKind::Shape);
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut store = NodeStore::new();
        let id1 = store.create_node(NodeKind::Sprite);
        store.set_rotation(id1, 45.0);
        store.destroy_node(id1);
        let id2 = store.create_node(NodeKind::Text);
        assert!(!store.is_alive(id1));
        assert!(store.is_alive(id2));
        assert_eq!(id1.idx, id2.idx);
        assert_ne!(id1.generation, id2.generation);
        // Reused slots are reset.
        assert_eq!(store.geometry(id2).rotation, 0.0);
        assert_eq!(store.kind(id2), NodeKind::Text);
    }

    #[test]
    fn add_child_and_query() {
        let mut store = NodeStore::new();
        let parent = store.create_node(NodeKind::Container);
        let child1 = store.create_node(NodeKind::Sprite);
        let child2 = store.create_node(NodeKind::Sprite);

        store.add_child(parent, child1);
        store.add_child(parent, child2);

        assert_eq!(store.parent(child1), Some(parent));
        assert_eq!(store.parent(child2), Some(parent));
        let kids: Vec<_> = store.children(parent).collect();
        assert_eq!(kids, vec![child1, child2]);
    }

    #[test]
    fn remove_from_parent_works() {
        let mut store = NodeStore::new();
        let parent = store.create_node(NodeKind::Container);
        let child = store.create_node(NodeKind::Sprite);

        store.add_child(parent, child);
        store.remove_from_parent(child);
        assert_eq!(store.parent(child), None);
        assert!(store.children(parent).next().is_none());
    }

    #[test]
    fn insert_before_works() {
        let mut store = NodeStore::new();
        let parent = store.create_node(NodeKind::Stage);
        let a = store.create_node(NodeKind::Sprite);
        let b = store.create_node(NodeKind::Sprite);
        let c = store.create_node(NodeKind::Sprite);

        store.add_child(parent, a);
        store.add_child(parent, c);
        store.insert_before(b, c);
        let kids: Vec<_> = store.children(parent).collect();
        assert_eq!(kids, vec![a, b, c]);

        let d = store.create_node(NodeKind::Sprite);
        store.insert_before(d, a);
        let kids: Vec<_> = store.children(parent).collect();
        assert_eq!(kids, vec![d, a, b, c]);
    }

    #[test]
    fn reparent_works() {
        let mut store = NodeStore::new();
        let p1 = store.create_node(NodeKind::Container);
        let p2 = store.create_node(NodeKind::Container);
        let child = store.create_node(NodeKind::Sprite);

        store.add_child(p1, child);
        store.reparent(child, p2);
        assert_eq!(store.parent(child), Some(p2));
        assert!(store.children(p1).next().is_none());
    }

    #[test]
    fn roots_returns_parentless_nodes() {
        let mut store = NodeStore::new();
        let a = store.create_node(NodeKind::Stage);
        let b = store.create_node(NodeKind::Container);
        let c = store.create_node(NodeKind::Sprite);
        let gone = store.create_node(NodeKind::Sprite);
        store.destroy_node(gone);

        store.add_child(a, c);

        let roots = store.roots();
        assert_eq!(roots, vec![a, b]);
    }

    #[test]
    fn stage_marker() {
        let mut store = NodeStore::new();
        let stage = store.create_node(NodeKind::Stage);
        let group = store.create_node(NodeKind::Container);
        assert!(store.is_stage(stage));
        assert!(!store.is_stage(group));
    }

    #[test]
    fn setters_update_geometry() {
        let mut store = NodeStore::new();
        let id = store.create_node(NodeKind::Sprite);
        store.set_position(id, 1.0, 2.0);
        store.set_size(id, 3.0, 4.0);
        store.set_rotation(id, 5.0);
        store.set_pivot(id, 6.0, 7.0);
        store.set_scale(id, 8.0, 9.0);
        assert_eq!(
            store.geometry(id),
            Geometry {
                x: 1.0,
                y: 2.0,
                width: 3.0,
                height: 4.0,
                rotation: 5.0,
                pivot_x: 6.0,
                pivot_y: 7.0,
                scale_x: 8.0,
                scale_y: 9.0,
            }
        );

        store.set_bounds_area(id, Some(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]));
        assert_eq!(store.bounds_area(id).map(<[Point]>::len), Some(2));
        store.set_bounds_area(id, None);
        assert!(store.bounds_area(id).is_none());
    }

    #[test]
    #[should_panic(expected = "cannot destroy node with children")]
    fn destroy_with_children_panics() {
        let mut store = NodeStore::new();
        let parent = store.create_node(NodeKind::Container);
        let child = store.create_node(NodeKind::Sprite);
        store.add_child(parent, child);
        store.destroy_node(parent);
    }

    #[test]
    #[should_panic(expected = "cannot add children to a sprite node")]
    fn leaf_kinds_reject_children() {
        let mut store = NodeStore::new();
        let leaf = store.create_node(NodeKind::Sprite);
        let child = store.create_node(NodeKind::Sprite);
        store.add_child(leaf, child);
    }

    #[test]
    #[should_panic(expected = "would create a cycle")]
    fn reparent_under_descendant_panics() {
        let mut store = NodeStore::new();
        let a = store.create_node(NodeKind::Container);
        let b = store.create_node(NodeKind::Container);
        store.add_child(a, b);
        store.reparent(a, b);
    }

    #[test]
    #[should_panic(expected = "would create a cycle")]
    fn add_self_as_child_panics() {
        let mut store = NodeStore::new();
        let a = store.create_node(NodeKind::Container);
        store.add_child(a, a);
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn destroyed_handle_panics_on_geometry() {
        let mut store = NodeStore::new();
        let id = store.create_node(NodeKind::Sprite);
        store.destroy_node(id);
        let _ = store.geometry(id);
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn destroyed_handle_panics_on_set_position() {
        let mut store = NodeStore::new();
        let id = store.create_node(NodeKind::Sprite);
        store.destroy_node(id);
        store.set_position(id, 1.0, 1.0);
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn destroyed_handle_panics_on_add_child() {
        let mut store = NodeStore::new();
        let root = store.create_node(NodeKind::Stage);
        let id = store.create_node(NodeKind::Sprite);
        store.destroy_node(id);
        store.add_child(root, id);
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn destroyed_handle_panics_on_parent() {
        let mut store = NodeStore::new();
        let id = store.create_node(NodeKind::Sprite);
        store.destroy_node(id);
        let _ = store.parent(id);
    }
}
