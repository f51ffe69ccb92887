// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animated scene that exercises rendering, picking, and event bubbling
//! with tracing enabled.
//!
//! Spins a panel for a few frames, recording render passes to both a
//! [`PrettyPrintSink`](tableau_debug::pretty::PrettyPrintSink) and a
//! [`RecorderSink`](tableau_debug::recorder::RecorderSink), then moves a
//! pointer over and off a diamond-shaped button and exports a Chrome trace
//! JSON file.

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;

use kurbo::{Point, Vec2};
use tableau_core::event::{EventKind, PointerEvent};
use tableau_core::hit::HitTestMode;
use tableau_core::scene::{NodeId, NodeKind, NodeStore};
use tableau_core::trace::{
    BubbleEndEvent, DispatchHopEvent, DrawBeginEvent, DrawEndEvent, DrawSkipEvent, RenderStats,
    TraceSink, Tracer,
};
use tableau_render::PlanRenderer;

use tableau_debug::pretty::PrettyPrintSink;
use tableau_debug::recorder::RecorderSink;

const FRAME_COUNT: u64 = 4;
/// Frame interval in milliseconds (≈60 Hz).
const FRAME_DELTA_MS: f64 = 16.667;
/// Panel spin speed in degrees per millisecond.
const SPIN_RATE: f64 = 0.09;

/// Forwards every event to both sinks.
struct Tee {
    pretty: PrettyPrintSink,
    recorder: RecorderSink,
}

impl TraceSink for Tee {
    fn on_draw_begin(&mut self, e: &DrawBeginEvent) {
        self.pretty.on_draw_begin(e);
        self.recorder.on_draw_begin(e);
    }

    fn on_draw_end(&mut self, e: &DrawEndEvent) {
        self.pretty.on_draw_end(e);
        self.recorder.on_draw_end(e);
    }

    fn on_draw_skip(&mut self, e: &DrawSkipEvent) {
        self.pretty.on_draw_skip(e);
        self.recorder.on_draw_skip(e);
    }

    fn on_render_stats(&mut self, s: &RenderStats) {
        self.pretty.on_render_stats(s);
        self.recorder.on_render_stats(s);
    }

    fn on_dispatch_hop(&mut self, e: &DispatchHopEvent) {
        self.pretty.on_dispatch_hop(e);
        self.recorder.on_dispatch_hop(e);
    }

    fn on_bubble_end(&mut self, e: &BubbleEndEvent) {
        self.pretty.on_bubble_end(e);
        self.recorder.on_bubble_end(e);
    }
}

struct Scene {
    store: NodeStore,
    stage: NodeId,
    panel: NodeId,
    button: NodeId,
}

/// stage > panel > [button (diamond), label]
fn build_scene() -> Scene {
    let mut store = NodeStore::new();
    let stage = store.create_node(NodeKind::Stage);
    let panel = store.create_node(NodeKind::Container);
    let button = store.create_node(NodeKind::Shape);
    let label = store.create_node(NodeKind::Text);
    store.add_child(stage, panel);
    store.add_child(panel, button);
    store.add_child(panel, label);

    store.set_size(stage, 800.0, 600.0);
    store.set_position(panel, 300.0, 200.0);
    store.set_size(panel, 200.0, 200.0);
    store.set_pivot(panel, 100.0, 100.0);

    store.set_position(button, 50.0, 50.0);
    store.set_size(button, 100.0, 100.0);
    store.set_bounds_area(
        button,
        Some(vec![
            Point::new(50.0, 0.0),
            Point::new(100.0, 50.0),
            Point::new(50.0, 100.0),
            Point::new(0.0, 50.0),
        ]),
    );

    store.set_position(label, 0.0, 180.0);
    store.set_size(label, 200.0, 20.0);
    store.set_pointer_enabled(label, false);

    Scene {
        store,
        stage,
        panel,
        button,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let Scene {
        mut store,
        stage,
        panel,
        button,
    } = build_scene();

    // -- sinks -------------------------------------------------------------
    let mut sinks = Tee {
        pretty: PrettyPrintSink::new(Box::new(std::io::stdout())),
        recorder: RecorderSink::new(),
    };

    // -- render loop ---------------------------------------------------------
    let mut renderer = PlanRenderer::new();
    let mut spin = |scene: &mut NodeStore, node: NodeId, delta: f64| {
        if node == panel {
            let rotation = scene.geometry(node).rotation;
            scene.set_rotation(node, rotation + delta * SPIN_RATE);
        }
        true
    };
    for _ in 0..FRAME_COUNT {
        store.render(
            stage,
            &mut renderer,
            &mut spin,
            FRAME_DELTA_MS,
            &mut Tracer::new(&mut sinks),
        );
        let plan = renderer.take_plan();
        println!(
            "frame {}: {} items, panel at {:.1}°",
            plan.frame_index,
            plan.items.len(),
            store.geometry(panel).rotation,
        );
    }

    // -- pointer -------------------------------------------------------------
    let mut log = |scene: &NodeStore, e: &mut PointerEvent| {
        if let Some(node) = e.current_target {
            println!("  {} at {:?} ({})", e.kind.name(), node, scene.kind(node).name());
        }
    };

    let centre = store.local_to_global(button, Point::new(50.0, 50.0));
    for (kind, point) in [
        (EventKind::MouseMove, centre),
        (EventKind::MouseMove, centre + Vec2::new(5.0, 5.0)),
        (EventKind::MouseOut, Point::new(20.0, 20.0)),
    ] {
        let target = match kind {
            EventKind::MouseOut => Some(button),
            _ => store.view_at_point(stage, point, HitTestMode::Polygon, true)?,
        };
        let Some(target) = target else {
            println!("{} at {point:?} hit nothing", kind.name());
            continue;
        };
        let mut event = PointerEvent::new(kind, target, point);
        let end = store.dispatch_event(&mut event, &mut log, &mut Tracer::new(&mut sinks))?;
        println!("{} ended: {end:?}", kind.name());
    }

    // -- export Chrome trace -------------------------------------------------
    let path = "trace.json";
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    tableau_debug::chrome::export(sinks.recorder.as_bytes(), &mut writer)?;

    println!("Wrote {path} ({FRAME_COUNT} frames)");
    Ok(())
}
