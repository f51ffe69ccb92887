// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for render dispatch and event bubbling.
//!
//! This module provides a [`TraceSink`] trait with one method per event.
//! [`NodeStore::render`](crate::scene::NodeStore::render) and
//! [`NodeStore::dispatch_event`](crate::scene::NodeStore::dispatch_event)
//! call it at each step. All method bodies default to no-ops, so
//! implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.

use crate::event::EventKind;
use crate::scene::NodeKind;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Why a node was not drawn this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The update hook returned `false`.
    UpdateVeto,
    /// The renderer's `start_draw` returned `false`.
    StartDrawRejected,
    /// The node left its parent, or was destroyed, earlier in the frame.
    Detached,
}

/// Why bubbling stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BubbleEnd {
    /// A listener called `stop`.
    Stopped,
    /// A listener called `stop_propagation`.
    PropagationStopped,
    /// The event reached a node without a parent.
    Root,
    /// An out event reached a parent that still contains the pointer.
    PointerStillOver,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after `start_draw` accepted a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawBeginEvent {
    /// Frame counter of the render pass.
    pub frame_index: u64,
    /// Slot index of the node.
    pub node_index: u32,
    /// Kind of the node.
    pub kind: NodeKind,
    /// Depth below the render root (root is 0).
    pub depth: u32,
}

/// Emitted after `end_draw` for a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawEndEvent {
    /// Frame counter of the render pass.
    pub frame_index: u64,
    /// Slot index of the node.
    pub node_index: u32,
    /// Kind of the node.
    pub kind: NodeKind,
    /// Depth below the render root.
    pub depth: u32,
}

/// Emitted when a node (and its subtree) is skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawSkipEvent {
    /// Frame counter of the render pass.
    pub frame_index: u64,
    /// Slot index of the node.
    pub node_index: u32,
    /// Depth below the render root.
    pub depth: u32,
    /// Why the node was skipped.
    pub reason: SkipReason,
}

/// Emitted each time a listener receives an event during bubbling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DispatchHopEvent {
    /// Slot index of the node handling the event.
    pub node_index: u32,
    /// Kind of the delivered event.
    pub kind: EventKind,
    /// Whether this delivery is a synthesized `MouseOver`.
    pub synthesized: bool,
    /// Number of parent links followed so far (target is 0).
    pub hop: u32,
}

/// Emitted once when bubbling ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BubbleEndEvent {
    /// Slot index of the original target.
    pub target_index: u32,
    /// Kind of the dispatched event.
    pub kind: EventKind,
    /// Number of nodes that received the event.
    pub hops: u32,
    /// Why bubbling ended.
    pub reason: BubbleEnd,
}

/// Per-frame counts produced by a render pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frame counter of the render pass.
    pub frame_index: u64,
    /// Nodes offered to the update hook.
    pub visited: u32,
    /// Nodes that completed `start_draw` through `end_draw`.
    pub drawn: u32,
    /// Nodes skipped, for any [`SkipReason`].
    pub skipped: u32,
    /// Deepest depth that was drawn.
    pub max_depth: u32,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from rendering and dispatch.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a node begins drawing.
    fn on_draw_begin(&mut self, e: &DrawBeginEvent) {
        _ = e;
    }

    /// Called when a node finishes drawing.
    fn on_draw_end(&mut self, e: &DrawEndEvent) {
        _ = e;
    }

    /// Called when a node is skipped.
    fn on_draw_skip(&mut self, e: &DrawSkipEvent) {
        _ = e;
    }

    /// Called with the totals of a finished render pass.
    fn on_render_stats(&mut self, s: &RenderStats) {
        _ = s;
    }

    /// Called for every listener delivery during bubbling.
    fn on_dispatch_hop(&mut self, e: &DispatchHopEvent) {
        _ = e;
    }

    /// Called when bubbling ends.
    fn on_bubble_end(&mut self, e: &BubbleEndEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`DrawBeginEvent`].
    #[inline]
    pub fn draw_begin(&mut self, e: &DrawBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_draw_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DrawEndEvent`].
    #[inline]
    pub fn draw_end(&mut self, e: &DrawEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_draw_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DrawSkipEvent`].
    #[inline]
    pub fn draw_skip(&mut self, e: &DrawSkipEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_draw_skip(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits [`RenderStats`].
    #[inline]
    pub fn render_stats(&mut self, s: &RenderStats) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_render_stats(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }

    /// Emits a [`DispatchHopEvent`].
    #[inline]
    pub fn dispatch_hop(&mut self, e: &DispatchHopEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_dispatch_hop(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`BubbleEndEvent`].
    #[inline]
    pub fn bubble_end(&mut self, e: &BubbleEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_bubble_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
