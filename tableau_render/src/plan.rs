// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render plan: an ordered sequence of draw items for one frame.

use alloc::vec::Vec;

use kurbo::Rect;
use tableau_core::error::GeometryError;
use tableau_core::matrix::Matrix2d;
use tableau_core::render::Renderer;
use tableau_core::scene::{NodeId, NodeKind, NodeStore};

/// A single draw command in the render plan.
///
/// Items are produced in back-to-front order, matching the tree's render
/// order.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderItem {
    /// The node this item originates from.
    pub node: NodeId,
    /// Kind of the node.
    pub kind: NodeKind,
    /// Local-to-world transform.
    pub world_transform: Matrix2d,
    /// World-space bounding box, or the error from
    /// [`NodeStore::bounds`] when the node's bounds area is empty.
    pub bounds: Result<Rect, GeometryError>,
    /// Opacity multiplied through the drawn ancestors.
    pub effective_alpha: f32,
    /// Depth below the render root.
    pub depth: u32,
}

/// An ordered list of draw commands for a single frame.
#[derive(Clone, Debug, Default)]
pub struct RenderPlan {
    /// Frame counter of the render pass that produced the plan.
    pub frame_index: u64,
    /// Draw items in back-to-front order.
    pub items: Vec<RenderItem>,
}

impl RenderPlan {
    /// Creates an empty render plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the plan for reuse.
    pub fn clear(&mut self) {
        self.frame_index = 0;
        self.items.clear();
    }
}

#[derive(Clone, Copy, Debug)]
struct Frame {
    world_transform: Matrix2d,
    alpha: f32,
}

/// A [`Renderer`] that records a [`RenderPlan`].
///
/// Hidden and fully transparent nodes are rejected in `start_draw`, which
/// prunes their subtrees.
///
/// The plan holds one frame. The first `start_draw` of a new render pass
/// discards items left over from an earlier frame that was not taken.
#[derive(Debug, Default)]
pub struct PlanRenderer {
    plan: RenderPlan,
    stack: Vec<Frame>,
}

impl PlanRenderer {
    /// Creates a renderer with an empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The plan recorded so far.
    #[must_use]
    pub fn plan(&self) -> &RenderPlan {
        &self.plan
    }

    /// Returns the recorded plan and leaves an empty one in its place.
    pub fn take_plan(&mut self) -> RenderPlan {
        self.stack.clear();
        core::mem::take(&mut self.plan)
    }
}

impl Renderer for PlanRenderer {
    fn start_draw(&mut self, scene: &NodeStore, node: NodeId) -> bool {
        if self.stack.is_empty() && scene.frame_index() != self.plan.frame_index {
            self.plan.clear();
            self.plan.frame_index = scene.frame_index();
        }
        scene.visible(node) && scene.alpha(node) > 0.0
    }

    fn transform(&mut self, scene: &NodeStore, node: NodeId) {
        let inherited = self.stack.last().map_or(1.0, |f| f.alpha);
        self.stack.push(Frame {
            world_transform: scene.concatenated_matrix(node, None),
            alpha: inherited * scene.alpha(node),
        });
    }

    fn draw(&mut self, scene: &NodeStore, node: NodeId) {
        let Some(frame) = self.stack.last().copied() else {
            return;
        };
        let depth = u32::try_from(self.stack.len() - 1).unwrap_or(u32::MAX);
        self.plan.items.push(RenderItem {
            node,
            kind: scene.kind(node),
            world_transform: frame.world_transform,
            bounds: scene.bounds(node).map(|b| b.rect()),
            effective_alpha: frame.alpha,
            depth,
        });
    }

    fn end_draw(&mut self, _scene: &NodeStore, _node: NodeId) {
        self.stack.pop();
    }
}
