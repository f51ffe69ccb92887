// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render dispatch capabilities.
//!
//! [`NodeStore::render`](crate::scene::NodeStore::render) drives a
//! [`Renderer`] over a subtree once per frame, asking an [`UpdateHook`]
//! first whether each node takes part.

use crate::scene::{NodeId, NodeStore};

/// The drawing backend.
///
/// For each accepted node the calls arrive as `start_draw`, `transform`,
/// `draw`, the node's children (containers only), then `end_draw`.
pub trait Renderer {
    /// Prepares to draw `node`. Returning `false` skips the node and its
    /// subtree, and `end_draw` is not called.
    fn start_draw(&mut self, scene: &NodeStore, node: NodeId) -> bool;

    /// Applies the node's transform.
    fn transform(&mut self, scene: &NodeStore, node: NodeId);

    /// Draws the node's own content.
    fn draw(&mut self, scene: &NodeStore, node: NodeId);

    /// Finishes drawing `node`, after its children.
    fn end_draw(&mut self, scene: &NodeStore, node: NodeId);
}

/// Per-node, per-frame update callback.
///
/// Runs before `start_draw` with mutable access to the scene, so it can
/// animate geometry. Returning `false` skips the node and its subtree for
/// this frame without touching the tree.
pub trait UpdateHook {
    /// Updates `node` for a frame that advanced by `delta`.
    fn on_update(&mut self, scene: &mut NodeStore, node: NodeId, delta: f64) -> bool;
}

/// An [`UpdateHook`] that accepts every node unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoUpdate;

impl UpdateHook for NoUpdate {
    fn on_update(&mut self, scene: &mut NodeStore, node: NodeId, delta: f64) -> bool {
        _ = (scene, node, delta);
        true
    }
}

impl<F> UpdateHook for F
where
    F: FnMut(&mut NodeStore, NodeId, f64) -> bool,
{
    fn on_update(&mut self, scene: &mut NodeStore, node: NodeId, delta: f64) -> bool {
        self(scene, node, delta)
    }
}
