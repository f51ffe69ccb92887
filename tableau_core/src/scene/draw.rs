// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame render dispatch.

use alloc::vec::Vec;

use crate::render::{Renderer, UpdateHook};
use crate::trace::{DrawBeginEvent, DrawEndEvent, DrawSkipEvent, RenderStats, SkipReason, Tracer};

use super::id::NodeId;
use super::store::NodeStore;

/// Borrowed state of one render pass.
struct Pass<'p, 't> {
    renderer: &'p mut dyn Renderer,
    hook: &'p mut dyn UpdateHook,
    tracer: &'p mut Tracer<'t>,
    delta: f64,
    stats: RenderStats,
}

impl Pass<'_, '_> {
    fn skip(&mut self, node: NodeId, depth: u32, reason: SkipReason) {
        self.stats.skipped += 1;
        self.tracer.draw_skip(&DrawSkipEvent {
            frame_index: self.stats.frame_index,
            node_index: node.idx,
            depth,
            reason,
        });
    }
}

impl NodeStore {
    /// Renders the subtree rooted at `root` for one frame.
    ///
    /// For every node, depth first in child order:
    ///
    /// 1. `hook.on_update(scene, node, delta)`; `false` skips the subtree.
    /// 2. `renderer.start_draw`; `false` skips the subtree.
    /// 3. `renderer.transform`, then `renderer.draw`.
    /// 4. For stages and containers, each child from a snapshot of the child
    ///    list taken after `draw`. A child that was detached or destroyed in
    ///    the meantime is skipped.
    /// 5. `renderer.end_draw`.
    ///
    /// Increments the store's [`frame_index`](Self::frame_index) before
    /// starting.
    ///
    /// # Panics
    ///
    /// Panics if `root` is stale.
    pub fn render(
        &mut self,
        root: NodeId,
        renderer: &mut dyn Renderer,
        hook: &mut dyn UpdateHook,
        delta: f64,
        tracer: &mut Tracer<'_>,
    ) -> RenderStats {
        self.validate(root);
        self.frame_index += 1;
        let mut pass = Pass {
            renderer,
            hook,
            tracer,
            delta,
            stats: RenderStats {
                frame_index: self.frame_index,
                ..RenderStats::default()
            },
        };
        self.render_node(&mut pass, root, 0);
        pass.tracer.render_stats(&pass.stats);
        pass.stats
    }

    fn render_node(&mut self, pass: &mut Pass<'_, '_>, id: NodeId, depth: u32) {
        pass.stats.visited += 1;

        if !pass.hook.on_update(self, id, pass.delta) {
            pass.skip(id, depth, SkipReason::UpdateVeto);
            return;
        }
        if !self.is_alive(id) {
            pass.skip(id, depth, SkipReason::Detached);
            return;
        }
        if !pass.renderer.start_draw(self, id) {
            pass.skip(id, depth, SkipReason::StartDrawRejected);
            return;
        }

        let kind = self.kind[id.idx as usize];
        let frame_index = pass.stats.frame_index;
        pass.tracer.draw_begin(&DrawBeginEvent {
            frame_index,
            node_index: id.idx,
            kind,
            depth,
        });

        pass.renderer.transform(self, id);
        pass.renderer.draw(self, id);

        if kind.is_container() {
            let children: Vec<NodeId> = self.children(id).collect();
            for child in children {
                if self.is_alive(child) && self.parent[child.idx as usize] == id.idx {
                    self.render_node(pass, child, depth + 1);
                } else {
                    pass.stats.visited += 1;
                    pass.skip(child, depth + 1, SkipReason::Detached);
                }
            }
        }

        pass.renderer.end_draw(self, id);
        pass.stats.drawn += 1;
        pass.stats.max_depth = pass.stats.max_depth.max(depth);
        pass.tracer.draw_end(&DrawEndEvent {
            frame_index,
            node_index: id.idx,
            kind,
            depth,
        });
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;
    use alloc::vec;

    use super::*;
    use crate::render::NoUpdate;
    use crate::scene::NodeKind;

    /// Logs every call as `"<op> <slot>"`.
    #[derive(Default)]
    struct LogRenderer {
        log: Vec<String>,
        reject: Option<NodeId>,
    }

    impl Renderer for LogRenderer {
        fn start_draw(&mut self, _: &NodeStore, node: NodeId) -> bool {
            self.log.push(format!("start {}", node.index()));
            self.reject != Some(node)
        }
        fn transform(&mut self, _: &NodeStore, node: NodeId) {
            self.log.push(format!("transform {}", node.index()));
        }
        fn draw(&mut self, _: &NodeStore, node: NodeId) {
            self.log.push(format!("draw {}", node.index()));
        }
        fn end_draw(&mut self, _: &NodeStore, node: NodeId) {
            self.log.push(format!("end {}", node.index()));
        }
    }

    /// stage(0) > [group(1) > [a(2)], b(3)]
    fn scene() -> (NodeStore, [NodeId; 4]) {
        let mut store = NodeStore::new();
        let stage = store.create_node(NodeKind::Stage);
        let group = store.create_node(NodeKind::Container);
        let a = store.create_node(NodeKind::Sprite);
        let b = store.create_node(NodeKind::Text);
        store.add_child(stage, group);
        store.add_child(group, a);
        store.add_child(stage, b);
        (store, [stage, group, a, b])
    }

    #[test]
    fn calls_arrive_in_tree_order() {
        let (mut store, [stage, ..]) = scene();
        let mut renderer = LogRenderer::default();
        let stats = store.render(stage, &mut renderer, &mut NoUpdate, 16.0, &mut Tracer::none());
        assert_eq!(
            renderer.log,
            vec![
                "start 0", "transform 0", "draw 0", //
                "start 1", "transform 1", "draw 1", //
                "start 2", "transform 2", "draw 2", "end 2", //
                "end 1", //
                "start 3", "transform 3", "draw 3", "end 3", //
                "end 0",
            ]
        );
        assert_eq!(
            stats,
            RenderStats {
                frame_index: 1,
                visited: 4,
                drawn: 4,
                skipped: 0,
                max_depth: 2,
            }
        );
        assert_eq!(store.frame_index(), 1);
    }

    #[test]
    fn update_veto_skips_subtree() {
        let (mut store, [stage, group, ..]) = scene();
        let mut renderer = LogRenderer::default();
        let mut hook = |_: &mut NodeStore, node: NodeId, _: f64| node != group;
        let stats = store.render(stage, &mut renderer, &mut hook, 16.0, &mut Tracer::none());
        assert_eq!(
            renderer.log,
            vec![
                "start 0", "transform 0", "draw 0", //
                "start 3", "transform 3", "draw 3", "end 3", //
                "end 0",
            ]
        );
        assert_eq!(stats.visited, 3);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.drawn, 2);
    }

    #[test]
    fn rejected_start_draw_skips_end_draw() {
        let (mut store, [stage, group, ..]) = scene();
        let mut renderer = LogRenderer {
            reject: Some(group),
            ..LogRenderer::default()
        };
        let stats = store.render(stage, &mut renderer, &mut NoUpdate, 16.0, &mut Tracer::none());
        assert!(renderer.log.contains(&String::from("start 1")));
        assert!(!renderer.log.contains(&String::from("end 1")));
        assert!(!renderer.log.contains(&String::from("start 2")));
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn update_hook_receives_delta_and_can_mutate() {
        let (mut store, [stage, _, a, _]) = scene();
        let mut renderer = LogRenderer::default();
        let mut hook = |scene: &mut NodeStore, node: NodeId, delta: f64| {
            if node == a {
                let g = scene.geometry(node);
                scene.set_position(node, g.x + delta, g.y);
            }
            true
        };
        store.render(stage, &mut renderer, &mut hook, 2.5, &mut Tracer::none());
        store.render(stage, &mut renderer, &mut hook, 2.5, &mut Tracer::none());
        assert_eq!(store.geometry(a).x, 5.0);
        assert_eq!(store.frame_index(), 2);
    }

    #[test]
    fn child_detached_during_frame_is_skipped() {
        let (mut store, [stage, group, _, b]) = scene();
        let mut renderer = LogRenderer::default();
        // While updating the group, move `b` out of the stage.
        let mut hook = |scene: &mut NodeStore, node: NodeId, _: f64| {
            if node == group {
                scene.remove_from_parent(b);
            }
            true
        };
        let stats = store.render(stage, &mut renderer, &mut hook, 16.0, &mut Tracer::none());
        assert!(!renderer.log.contains(&String::from("start 3")));
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.drawn, 3);
    }

    #[test]
    fn leaf_kinds_do_not_recurse() {
        let mut store = NodeStore::new();
        let leaf = store.create_node(NodeKind::Shape);
        let mut renderer = LogRenderer::default();
        store.render(leaf, &mut renderer, &mut NoUpdate, 0.0, &mut Tracer::none());
        assert_eq!(renderer.log, vec!["start 0", "transform 0", "draw 0", "end 0"]);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn draw_events_are_traced() {
        use crate::trace::TraceSink;

        #[derive(Default)]
        struct Sink {
            begins: Vec<u32>,
            ends: Vec<u32>,
            skips: Vec<SkipReason>,
            stats: Vec<RenderStats>,
        }
        impl TraceSink for Sink {
            fn on_draw_begin(&mut self, e: &DrawBeginEvent) {
                self.begins.push(e.node_index);
            }
            fn on_draw_end(&mut self, e: &DrawEndEvent) {
                self.ends.push(e.node_index);
            }
            fn on_draw_skip(&mut self, e: &DrawSkipEvent) {
                self.skips.push(e.reason);
            }
            fn on_render_stats(&mut self, s: &RenderStats) {
                self.stats.push(*s);
            }
        }

        let (mut store, [stage, _, _, b]) = scene();
        let mut renderer = LogRenderer {
            reject: Some(b),
            ..LogRenderer::default()
        };
        let mut sink = Sink::default();
        store.render(stage, &mut renderer, &mut NoUpdate, 16.0, &mut Tracer::new(&mut sink));
        assert_eq!(sink.begins, vec![0, 1, 2]);
        assert_eq!(sink.ends, vec![2, 1, 0]);
        assert_eq!(sink.skips, vec![SkipReason::StartDrawRejected]);
        assert_eq!(sink.stats.len(), 1);
        assert_eq!(sink.stats[0].drawn, 3);
    }
}
