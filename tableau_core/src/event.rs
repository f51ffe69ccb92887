// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer events and the listener capability used by bubbling.
//!
//! [`NodeStore::dispatch_event`](crate::scene::NodeStore::dispatch_event)
//! walks a [`PointerEvent`] from its target up the parent chain and hands it
//! to an [`EventListener`] at every hop. Listeners stop the walk through the
//! event's [`stop`](PointerEvent::stop) and
//! [`stop_propagation`](PointerEvent::stop_propagation) flags.

use kurbo::Point;

use crate::scene::{NodeId, NodeStore};

/// The kind of a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A mouse button was pressed.
    MouseDown,
    /// A mouse button was released.
    MouseUp,
    /// The mouse moved.
    MouseMove,
    /// The mouse entered a node. Synthesized from the first `MouseMove`.
    MouseOver,
    /// The mouse left a node.
    MouseOut,
    /// A touch began.
    TouchStart,
    /// A touch moved.
    TouchMove,
    /// A touch ended.
    TouchEnd,
    /// A touch left a node.
    TouchOut,
}

impl EventKind {
    /// Whether this kind reports the pointer leaving a node.
    #[inline]
    #[must_use]
    pub const fn is_out(self) -> bool {
        matches!(self, Self::MouseOut | Self::TouchOut)
    }

    /// Stable lowercase name, used by trace output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MouseDown => "mousedown",
            Self::MouseUp => "mouseup",
            Self::MouseMove => "mousemove",
            Self::MouseOver => "mouseover",
            Self::MouseOut => "mouseout",
            Self::TouchStart => "touchstart",
            Self::TouchMove => "touchmove",
            Self::TouchEnd => "touchend",
            Self::TouchOut => "touchout",
        }
    }
}

/// A pointer event travelling up the node tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub kind: EventKind,
    /// The node the event was first dispatched to.
    pub target: NodeId,
    /// The node currently handling the event. Set at every hop.
    pub current_target: Option<NodeId>,
    /// Pointer position in stage (world) coordinates.
    pub stage_point: Point,
    stopped: bool,
    propagation_stopped: bool,
}

impl PointerEvent {
    /// Creates an event aimed at `target`.
    #[must_use]
    pub const fn new(kind: EventKind, target: NodeId, stage_point: Point) -> Self {
        Self {
            kind,
            target,
            current_target: None,
            stage_point,
            stopped: false,
            propagation_stopped: false,
        }
    }

    /// Returns a copy with a different kind and cleared stop flags.
    #[must_use]
    pub const fn derive(&self, kind: EventKind) -> Self {
        Self {
            kind,
            stopped: false,
            propagation_stopped: false,
            ..*self
        }
    }

    /// Stops the event entirely.
    #[inline]
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    /// Stops the event from reaching further ancestors.
    #[inline]
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Whether [`stop`](Self::stop) was called.
    #[inline]
    #[must_use]
    pub const fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Whether [`stop_propagation`](Self::stop_propagation) was called.
    #[inline]
    #[must_use]
    pub const fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Receives events as they bubble.
///
/// The store is passed read-only; the listener may inspect any node but
/// must not restructure the tree while an event is in flight.
pub trait EventListener {
    /// Handles `event` at `event.current_target`.
    fn fire(&mut self, scene: &NodeStore, event: &mut PointerEvent);
}

impl<F> EventListener for F
where
    F: FnMut(&NodeStore, &mut PointerEvent),
{
    fn fire(&mut self, scene: &NodeStore, event: &mut PointerEvent) {
        self(scene, event);
    }
}
