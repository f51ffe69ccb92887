// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].

use tableau_core::event::EventKind;
use tableau_core::scene::NodeKind;
use tableau_core::trace::{
    BubbleEnd, BubbleEndEvent, DispatchHopEvent, DrawBeginEvent, DrawEndEvent, DrawSkipEvent,
    RenderStats, SkipReason, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_DRAW_BEGIN: u8 = 1;
const TAG_DRAW_END: u8 = 2;
const TAG_DRAW_SKIP: u8 = 3;
const TAG_RENDER_STATS: u8 = 4;
const TAG_DISPATCH_HOP: u8 = 5;
const TAG_BUBBLE_END: u8 = 6;

const NODE_KINDS: [NodeKind; 5] = [
    NodeKind::Stage,
    NodeKind::Container,
    NodeKind::Sprite,
    NodeKind::Shape,
    NodeKind::Text,
];

const EVENT_KINDS: [EventKind; 9] = [
    EventKind::MouseDown,
    EventKind::MouseUp,
    EventKind::MouseMove,
    EventKind::MouseOver,
    EventKind::MouseOut,
    EventKind::TouchStart,
    EventKind::TouchMove,
    EventKind::TouchEnd,
    EventKind::TouchOut,
];

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_node_kind(&mut self, k: NodeKind) {
        self.write_u8(match k {
            NodeKind::Stage => 0,
            NodeKind::Container => 1,
            NodeKind::Sprite => 2,
            NodeKind::Shape => 3,
            NodeKind::Text => 4,
        });
    }

    fn write_event_kind(&mut self, k: EventKind) {
        self.write_u8(match k {
            EventKind::MouseDown => 0,
            EventKind::MouseUp => 1,
            EventKind::MouseMove => 2,
            EventKind::MouseOver => 3,
            EventKind::MouseOut => 4,
            EventKind::TouchStart => 5,
            EventKind::TouchMove => 6,
            EventKind::TouchEnd => 7,
            EventKind::TouchOut => 8,
        });
    }

    fn write_draw(&mut self, tag: u8, frame_index: u64, node_index: u32, kind: NodeKind, depth: u32) {
        self.write_u8(tag);
        self.write_u64(frame_index);
        self.write_u32(node_index);
        self.write_node_kind(kind);
        self.write_u32(depth);
    }
}

impl TraceSink for RecorderSink {
    fn on_draw_begin(&mut self, e: &DrawBeginEvent) {
        self.write_draw(TAG_DRAW_BEGIN, e.frame_index, e.node_index, e.kind, e.depth);
    }

    fn on_draw_end(&mut self, e: &DrawEndEvent) {
        self.write_draw(TAG_DRAW_END, e.frame_index, e.node_index, e.kind, e.depth);
    }

    fn on_draw_skip(&mut self, e: &DrawSkipEvent) {
        self.write_u8(TAG_DRAW_SKIP);
        self.write_u64(e.frame_index);
        self.write_u32(e.node_index);
        self.write_u32(e.depth);
        self.write_u8(match e.reason {
            SkipReason::UpdateVeto => 0,
            SkipReason::StartDrawRejected => 1,
            SkipReason::Detached => 2,
        });
    }

    fn on_render_stats(&mut self, s: &RenderStats) {
        self.write_u8(TAG_RENDER_STATS);
        self.write_u64(s.frame_index);
        self.write_u32(s.visited);
        self.write_u32(s.drawn);
        self.write_u32(s.skipped);
        self.write_u32(s.max_depth);
    }

    fn on_dispatch_hop(&mut self, e: &DispatchHopEvent) {
        self.write_u8(TAG_DISPATCH_HOP);
        self.write_u32(e.node_index);
        self.write_event_kind(e.kind);
        self.write_u8(u8::from(e.synthesized));
        self.write_u32(e.hop);
    }

    fn on_bubble_end(&mut self, e: &BubbleEndEvent) {
        self.write_u8(TAG_BUBBLE_END);
        self.write_u32(e.target_index);
        self.write_event_kind(e.kind);
        self.write_u32(e.hops);
        self.write_u8(match e.reason {
            BubbleEnd::Stopped => 0,
            BubbleEnd::PropagationStopped => 1,
            BubbleEnd::Root => 2,
            BubbleEnd::PointerStillOver => 3,
        });
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// A [`DrawBeginEvent`].
    DrawBegin(DrawBeginEvent),
    /// A [`DrawEndEvent`].
    DrawEnd(DrawEndEvent),
    /// A [`DrawSkipEvent`].
    DrawSkip(DrawSkipEvent),
    /// A [`RenderStats`].
    RenderStats(RenderStats),
    /// A [`DispatchHopEvent`].
    DispatchHop(DispatchHopEvent),
    /// A [`BubbleEndEvent`].
    BubbleEnd(BubbleEndEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Iteration stops at the first unknown tag or truncated record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_node_kind(&mut self) -> Option<NodeKind> {
        NODE_KINDS.get(usize::from(self.read_u8()?)).copied()
    }

    fn read_event_kind(&mut self) -> Option<EventKind> {
        EVENT_KINDS.get(usize::from(self.read_u8()?)).copied()
    }

    fn decode_draw_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::DrawBegin(DrawBeginEvent {
            frame_index: self.read_u64()?,
            node_index: self.read_u32()?,
            kind: self.read_node_kind()?,
            depth: self.read_u32()?,
        }))
    }

    fn decode_draw_end(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::DrawEnd(DrawEndEvent {
            frame_index: self.read_u64()?,
            node_index: self.read_u32()?,
            kind: self.read_node_kind()?,
            depth: self.read_u32()?,
        }))
    }

    fn decode_draw_skip(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::DrawSkip(DrawSkipEvent {
            frame_index: self.read_u64()?,
            node_index: self.read_u32()?,
            depth: self.read_u32()?,
            reason: match self.read_u8()? {
                0 => SkipReason::UpdateVeto,
                1 => SkipReason::StartDrawRejected,
                _ => SkipReason::Detached,
            },
        }))
    }

    fn decode_render_stats(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::RenderStats(RenderStats {
            frame_index: self.read_u64()?,
            visited: self.read_u32()?,
            drawn: self.read_u32()?,
            skipped: self.read_u32()?,
            max_depth: self.read_u32()?,
        }))
    }

    fn decode_dispatch_hop(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::DispatchHop(DispatchHopEvent {
            node_index: self.read_u32()?,
            kind: self.read_event_kind()?,
            synthesized: self.read_u8()? != 0,
            hop: self.read_u32()?,
        }))
    }

    fn decode_bubble_end(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::BubbleEnd(BubbleEndEvent {
            target_index: self.read_u32()?,
            kind: self.read_event_kind()?,
            hops: self.read_u32()?,
            reason: match self.read_u8()? {
                0 => BubbleEnd::Stopped,
                1 => BubbleEnd::PropagationStopped,
                2 => BubbleEnd::Root,
                _ => BubbleEnd::PointerStillOver,
            },
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_DRAW_BEGIN => self.decode_draw_begin(),
            TAG_DRAW_END => self.decode_draw_end(),
            TAG_DRAW_SKIP => self.decode_draw_skip(),
            TAG_RENDER_STATS => self.decode_render_stats(),
            TAG_DISPATCH_HOP => self.decode_dispatch_hop(),
            TAG_BUBBLE_END => self.decode_bubble_end(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
