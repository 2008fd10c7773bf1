//! Builds a waypoint graph and steers a probe around it.
//!
//! Run: cargo run --bin waygraph-track [markers.json]
//!
//! The optional file holds a JSON array of markers. Without one, a random
//! oval circuit with a shortcut across one bend is generated.

use std::error::Error;
use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use waygraph::{
    AlwaysVisible, DebugMode, Direction, LookupMode, MarkerStatus, NodeHandle, Traversal,
    WaypointGraph,
};
use waygraph_core::{Marker, Vec3};

const OVAL_MARKERS: u32 = 24;

fn main() -> Result<(), Box<dyn Error>> {
    let markers = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)?;
            serde_json::from_str::<Vec<Marker>>(&text)?
        }
        None => oval(&mut StdRng::seed_from_u64(7)),
    };

    let mut graph = WaypointGraph::new();
    let report = graph.build(&markers)?;
    println!(
        "{} markers -> {} waypoints, {} edges",
        markers.len(),
        report.nodes,
        report.edges
    );
    for warning in &report.warnings {
        println!("warning: {warning}");
    }
    println!("circuit length: {}", graph.circuit_length());

    let view = graph.debug_view(&markers, DebugMode::Next, None);
    let unlinked = view
        .markers
        .iter()
        .filter(|m| m.status != MarkerStatus::Linked)
        .count();
    println!("{} edge lines, {unlinked} markers not fully linked", view.lines.len());

    if let Some(at) = graph.best_node_for_entity(Vec3::ZERO, &AlwaysVisible) {
        println!("an entity at the origin counts as at waypoint {}", label(&graph, at));
    }

    let start = graph.find_node_for_marker(1, LookupMode::Graph);
    let (Some(start), Some(finish)) = (start, graph.finish_node()) else {
        return Ok(());
    };
    for traversal in [Traversal::NoShortcuts, Traversal::AllEnabled] {
        let trace = steer(&mut graph, start, finish, traversal);
        let ids: Vec<_> = trace.iter().map(|&n| label(&graph, n)).collect();
        println!("{traversal:?}: {}", ids.join(" -> "));
    }

    Ok(())
}

/// Follow next hops from `start` until `finish`, at most one lap's worth.
fn steer(
    graph: &mut WaypointGraph,
    start: NodeHandle,
    finish: NodeHandle,
    traversal: Traversal,
) -> Vec<NodeHandle> {
    let mut trace = vec![start];
    let mut current = start;
    while current != finish && trace.len() <= graph.node_count() {
        match graph.next_hop(current, finish, traversal, Direction::Forward) {
            Some(next) => {
                trace.push(next);
                current = next;
            }
            None => break,
        }
    }
    trace
}

fn label(graph: &WaypointGraph, node: NodeHandle) -> String {
    match graph.node(node) {
        Some(w) if w.is_shortcut() => format!("{}*", w.id()),
        Some(w) => w.id().to_string(),
        None => "?".to_string(),
    }
}

/// A jittered oval of waypoints with a shortcut cutting across the bend
/// between waypoints 4 and 8.
fn oval(rng: &mut StdRng) -> Vec<Marker> {
    let (rx, ry) = (4096.0, 2048.0);
    let mut markers: Vec<_> = (0..OVAL_MARKERS)
        .map(|i| {
            let angle = TAU * f64::from(i) / f64::from(OVAL_MARKERS);
            let jitter = rng.random_range(0.9..1.1);
            let position = Vec3::new(rx * jitter * angle.cos(), ry * jitter * angle.sin(), 0.0);
            let marker = Marker::new(i, position).with_next((i + 1) % OVAL_MARKERS);
            if i == 0 { marker.finish_line() } else { marker }
        })
        .collect();

    // A second waypoint 5, inside the bend, leading straight to 8.
    let inside = markers[6].position * 0.6;
    markers.push(Marker::new(5, inside).with_next(8).shortcut());
    markers
}
