// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event bubbling along the parent chain.

use crate::error::GeometryError;
use crate::event::{EventKind, EventListener, PointerEvent};
use crate::trace::{BubbleEnd, BubbleEndEvent, DispatchHopEvent, Tracer};

use super::store::NodeStore;

impl NodeStore {
    /// Delivers `event` to its target and bubbles it toward the root.
    ///
    /// At each node the listener receives the event with
    /// `current_target` set to that node. A `MouseMove` arriving at a node
    /// whose pointer-over flag is clear sets the flag and, if
    /// [`SceneConfig::synthesize_pointer_over`](crate::SceneConfig::synthesize_pointer_over)
    /// is on, delivers a separate `MouseOver` copy. A `MouseOut` clears the
    /// flag.
    ///
    /// Bubbling ends when the listener stops the event, when a node has no
    /// parent, or when an out event (`MouseOut`/`TouchOut`) reaches a parent
    /// that still contains `event.stage_point` under
    /// [`SceneConfig::pointer_out_hit_mode`](crate::SceneConfig::pointer_out_hit_mode).
    ///
    /// # Errors
    ///
    /// Propagates [`bounds`](Self::bounds) failures from the out-event
    /// containment check. Listeners that already ran are not rolled back.
    ///
    /// # Panics
    ///
    /// Panics if `event.target` is stale.
    pub fn dispatch_event(
        &mut self,
        event: &mut PointerEvent,
        listener: &mut dyn EventListener,
        tracer: &mut Tracer<'_>,
    ) -> Result<BubbleEnd, GeometryError> {
        self.validate(event.target);
        let mut current = event.target;
        let mut hop = 0_u32;

        let end = loop {
            let i = current.idx as usize;
            event.current_target = Some(current);
            tracer.dispatch_hop(&DispatchHopEvent {
                node_index: current.idx,
                kind: event.kind,
                synthesized: false,
                hop,
            });
            listener.fire(self, event);

            match event.kind {
                EventKind::MouseMove if !self.pointer_over[i] => {
                    self.pointer_over[i] = true;
                    if self.config.synthesize_pointer_over {
                        let mut over = event.derive(EventKind::MouseOver);
                        tracer.dispatch_hop(&DispatchHopEvent {
                            node_index: current.idx,
                            kind: EventKind::MouseOver,
                            synthesized: true,
                            hop,
                        });
                        listener.fire(self, &mut over);
                    }
                }
                EventKind::MouseOut => self.pointer_over[i] = false,
                _ => {}
            }

            if event.is_stopped() {
                break BubbleEnd::Stopped;
            }
            if event.is_propagation_stopped() {
                break BubbleEnd::PropagationStopped;
            }
            let Some(parent) = self.id_at(self.parent[i]) else {
                break BubbleEnd::Root;
            };
            if event.kind.is_out()
                && self.hit_test_point(parent, event.stage_point, self.config.pointer_out_hit_mode)?
            {
                break BubbleEnd::PointerStillOver;
            }

            current = parent;
            hop += 1;
        };

        tracer.bubble_end(&BubbleEndEvent {
            target_index: event.target.idx,
            kind: event.kind,
            hops: hop + 1,
            reason: end,
        });
        Ok(end)
    }
}
