// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Recordings carry no wall-clock time, so each event's `ts` is its sequence
/// number in the recording. Draws appear as nested `B`/`E` slices on
/// thread 0 and event bubbling as instants on thread 1.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for (ts, recorded) in decode(bytes).enumerate() {
        match recorded {
            RecordedEvent::DrawBegin(e) => {
                events.push(json!({
                    "ph": "B",
                    "name": format!("{}#{}", e.kind.name(), e.node_index),
                    "cat": "Render",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "frame_index": e.frame_index,
                        "depth": e.depth,
                    }
                }));
            }
            RecordedEvent::DrawEnd(e) => {
                events.push(json!({
                    "ph": "E",
                    "name": format!("{}#{}", e.kind.name(), e.node_index),
                    "cat": "Render",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "frame_index": e.frame_index,
                    }
                }));
            }
            RecordedEvent::DrawSkip(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "DrawSkip",
                    "cat": "Render",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "frame_index": e.frame_index,
                        "node_index": e.node_index,
                        "depth": e.depth,
                        "reason": format!("{:?}", e.reason),
                    }
                }));
            }
            RecordedEvent::RenderStats(s) => {
                events.push(json!({
                    "ph": "i",
                    "name": "RenderStats",
                    "cat": "Summary",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "frame_index": s.frame_index,
                        "visited": s.visited,
                        "drawn": s.drawn,
                        "skipped": s.skipped,
                        "max_depth": s.max_depth,
                    }
                }));
            }
            RecordedEvent::DispatchHop(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": e.kind.name(),
                    "cat": "Dispatch",
                    "ts": ts,
                    "pid": 0,
                    "tid": 1,
                    "s": "t",
                    "args": {
                        "node_index": e.node_index,
                        "hop": e.hop,
                        "synthesized": e.synthesized,
                    }
                }));
            }
            RecordedEvent::BubbleEnd(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "BubbleEnd",
                    "cat": "Dispatch",
                    "ts": ts,
                    "pid": 0,
                    "tid": 1,
                    "s": "t",
                    "args": {
                        "kind": e.kind.name(),
                        "target_index": e.target_index,
                        "hops": e.hops,
                        "reason": format!("{:?}", e.reason),
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}
