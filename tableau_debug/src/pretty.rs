// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Draw events
//! are indented by tree depth.

use std::io::Write;

use tableau_core::trace::{
    BubbleEnd, BubbleEndEvent, DispatchHopEvent, DrawBeginEvent, DrawEndEvent, DrawSkipEvent,
    RenderStats, SkipReason, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

fn indent(depth: u32) -> usize {
    depth as usize * 2
}

fn skip_name(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::UpdateVeto => "veto",
        SkipReason::StartDrawRejected => "rejected",
        SkipReason::Detached => "detached",
    }
}

fn end_name(reason: BubbleEnd) -> &'static str {
    match reason {
        BubbleEnd::Stopped => "stopped",
        BubbleEnd::PropagationStopped => "propagation-stopped",
        BubbleEnd::Root => "root",
        BubbleEnd::PointerStillOver => "still-over",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_draw_begin(&mut self, e: &DrawBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[draw:begin] frame={} {:indent$}{}#{}",
            e.frame_index,
            "",
            e.kind.name(),
            e.node_index,
            indent = indent(e.depth),
        );
    }

    fn on_draw_end(&mut self, e: &DrawEndEvent) {
        let _ = writeln!(
            self.writer,
            "[draw:end] frame={} {:indent$}{}#{}",
            e.frame_index,
            "",
            e.kind.name(),
            e.node_index,
            indent = indent(e.depth),
        );
    }

    fn on_draw_skip(&mut self, e: &DrawSkipEvent) {
        let _ = writeln!(
            self.writer,
            "[draw:skip] frame={} {:indent$}#{} reason={}",
            e.frame_index,
            "",
            e.node_index,
            skip_name(e.reason),
            indent = indent(e.depth),
        );
    }

    fn on_render_stats(&mut self, s: &RenderStats) {
        let _ = writeln!(
            self.writer,
            "[stats] frame={} visited={} drawn={} skipped={} depth={}",
            s.frame_index, s.visited, s.drawn, s.skipped, s.max_depth,
        );
    }

    fn on_dispatch_hop(&mut self, e: &DispatchHopEvent) {
        let synthesized = if e.synthesized { " (synthesized)" } else { "" };
        let _ = writeln!(
            self.writer,
            "[event] {} hop={} node=#{}{synthesized}",
            e.kind.name(),
            e.hop,
            e.node_index,
        );
    }

    fn on_bubble_end(&mut self, e: &BubbleEndEvent) {
        let _ = writeln!(
            self.writer,
            "[event:end] {} target=#{} hops={} reason={}",
            e.kind.name(),
            e.target_index,
            e.hops,
            end_name(e.reason),
        );
    }
}
