//! Graph construction from a marker list.
//!
//! Every marker becomes a waypoint. A waypoint gets one outgoing edge to
//! each marker whose id equals its successor id, weighted by the distance
//! between the two. Waypoints are numbered in depth-first order from the
//! first marker: a marker's successors are built (and their own successors,
//! and so on) before the scan moves on to the next marker in the list.
//! The traversal uses an explicit stack, so long chains cost heap, not call
//! stack.

use std::fmt;

use waygraph_core::Marker;
use waygraph_paths::edge_cost;

use crate::config::TrackLayout;
use crate::graph::{NodeHandle, Waypoint, WaypointFlags, WaypointGraph};

/// Why a build produced no graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The marker list was empty.
    NoMarkers,
    /// No waypoint could be created from the markers.
    NoWaypoints,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMarkers => write!(f, "no waypoints in map"),
            Self::NoWaypoints => write!(f, "no waypoint could be set up from the map's markers"),
        }
    }
}

impl std::error::Error for BuildError {}

/// A map-authoring problem found during a build. The graph is still usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    /// More than one finish-line marker; the later one was kept.
    MultipleFinishLines { kept: u32, dropped: u32 },
    /// No finish-line marker; the first waypoint built stands in.
    MissingFinishLine { fallback: u32 },
    /// A waypoint has no successor.
    DeadEnd { id: u32 },
    /// A circuit track whose finish line is not on a loop.
    NotACircuit,
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MultipleFinishLines { kept, dropped } => write!(
                f,
                "multiple finish line waypoints with IDs {dropped} and {kept}, using {kept}"
            ),
            Self::MissingFinishLine { fallback } => write!(
                f,
                "no finish line waypoint in the map, using first set up waypoint with ID {fallback}"
            ),
            Self::DeadEnd { id } => write!(f, "waypoint with ID {id} has no next waypoint"),
            Self::NotACircuit => write!(f, "circuit track waypoints do not form a circuit"),
        }
    }
}

/// Summary of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub nodes: usize,
    pub edges: usize,
    pub first: NodeHandle,
    pub finish: NodeHandle,
    pub circuit_length: u32,
    pub warnings: Vec<BuildWarning>,
}

impl WaypointGraph {
    /// Replace the graph with one built from `markers`.
    ///
    /// All earlier handles become stale, whether or not the build succeeds.
    /// Authoring problems (finish-line conflicts, dead ends, a circuit that
    /// does not loop) are logged and listed in the report; they never fail
    /// the build.
    pub fn build(&mut self, markers: &[Marker]) -> Result<BuildReport, BuildError> {
        self.clear();

        if markers.is_empty() {
            log::error!("No waypoints in map.");
            return Err(BuildError::NoMarkers);
        }

        let built = Builder::new(markers).run();
        let (Some(first), false) = (built.first, built.nodes.is_empty()) else {
            log::error!("No waypoints in map.");
            return Err(BuildError::NoWaypoints);
        };
        let mut warnings = built.warnings;

        let finish = match built.finish {
            Some(finish) => finish,
            None => {
                let fallback = built.nodes[first].id;
                log::warn!(
                    "No finish line waypoint in the map! Using first setup waypoint with ID {fallback}."
                );
                warnings.push(BuildWarning::MissingFinishLine { fallback });
                first
            }
        };

        self.nodes = built.nodes;
        self.first = Some(first);
        self.finish = Some(finish);
        log::debug!("Successfully setup {} waypoints.", self.nodes.len());

        self.circuit_length = self.measure_circuit();
        if self.circuit_length == 0 && self.config.layout == TrackLayout::Circuit {
            log::error!("Circuit track waypoints do not form a circuit.");
            warnings.push(BuildWarning::NotACircuit);
        }

        Ok(BuildReport {
            nodes: self.nodes.len(),
            edges: self.nodes.iter().map(|w| w.next_nodes.len()).sum(),
            first: self.handle(first),
            finish: self.handle(finish),
            circuit_length: self.circuit_length,
            warnings,
        })
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// A waypoint whose successor scan is in progress.
struct Frame {
    marker: usize,
    node: usize,
    /// Next marker index to test against the successor id.
    cursor: usize,
    /// The waypoint that discovered this one; linked once this frame is done.
    parent: Option<usize>,
}

struct Built {
    nodes: Vec<Waypoint>,
    first: Option<usize>,
    finish: Option<usize>,
    warnings: Vec<BuildWarning>,
}

struct Builder<'m> {
    markers: &'m [Marker],
    node_of: Vec<Option<usize>>,
    built: Built,
}

impl<'m> Builder<'m> {
    fn new(markers: &'m [Marker]) -> Self {
        Self {
            markers,
            node_of: vec![None; markers.len()],
            built: Built {
                nodes: Vec::with_capacity(markers.len()),
                first: None,
                finish: None,
                warnings: Vec::new(),
            },
        }
    }

    fn run(mut self) -> Built {
        let markers = self.markers;
        let mut stack: Vec<Frame> = Vec::new();

        for root in 0..markers.len() {
            if self.node_of[root].is_some() {
                continue;
            }
            let node = self.materialize(root);
            stack.push(Frame {
                marker: root,
                node,
                cursor: 0,
                parent: None,
            });

            while let Some(frame) = stack.last_mut() {
                let successor = markers[frame.marker].successor();
                let target = successor.and_then(|next| {
                    markers[frame.cursor..]
                        .iter()
                        .position(|m| m.id == next)
                        .map(|offset| frame.cursor + offset)
                });

                let Some(target) = target else {
                    if let Some(done) = stack.pop() {
                        if let Some(parent) = done.parent {
                            self.link(parent, done.node);
                        }
                    }
                    continue;
                };

                frame.cursor = target + 1;
                let from = frame.node;
                match self.node_of[target] {
                    Some(to) => self.link(from, to),
                    None => {
                        let to = self.materialize(target);
                        stack.push(Frame {
                            marker: target,
                            node: to,
                            cursor: 0,
                            parent: Some(from),
                        });
                    }
                }
            }
        }

        self.built
    }

    /// Create the waypoint for `marker`, sizing its edge lists up front.
    fn materialize(&mut self, marker: usize) -> usize {
        let markers = self.markers;
        let m = &markers[marker];
        let next_count = m
            .successor()
            .map_or(0, |next| markers.iter().filter(|other| other.id == next).count());
        let prev_count = markers
            .iter()
            .filter(|other| other.successor() == Some(m.id))
            .count();

        if !m.position.is_finite() {
            log::warn!("Waypoint with ID {} has a non-finite position {}.", m.id, m.position);
        }

        let index = self.built.nodes.len();
        self.built.nodes.push(Waypoint {
            marker,
            id: m.id,
            next_id: m.next_id,
            position: m.position,
            radius: m.radius,
            flags: WaypointFlags {
                enabled: m.enabled,
                shortcut: m.shortcut,
                finish_line: m.finish_line,
                spawn_point: m.spawn_point,
            },
            next_nodes: Vec::with_capacity(next_count),
            next_weights: Vec::with_capacity(next_count),
            prev_nodes: Vec::with_capacity(prev_count),
            prev_weights: Vec::with_capacity(prev_count),
        });
        self.node_of[marker] = Some(index);
        self.built.first.get_or_insert(index);

        if m.finish_line {
            if let Some(old) = self.built.finish {
                let dropped = self.built.nodes[old].id;
                log::warn!(
                    "Multiple finish line waypoints with IDs {dropped} and {id}! Using {id}.",
                    id = m.id
                );
                self.built.warnings.push(BuildWarning::MultipleFinishLines {
                    kept: m.id,
                    dropped,
                });
            }
            self.built.finish = Some(index);
        }

        if next_count == 0 {
            log::warn!("Waypoint with ID {} has no next waypoint.", m.id);
            self.built.warnings.push(BuildWarning::DeadEnd { id: m.id });
        }

        index
    }

    /// Add the edge `from -> to` and its mirror in `to`'s incoming list.
    fn link(&mut self, from: usize, to: usize) {
        let nodes = &mut self.built.nodes;
        let distance = edge_cost(nodes[from].position, nodes[to].position);
        nodes[from].next_nodes.push(to);
        nodes[from].next_weights.push(distance);
        nodes[to].prev_nodes.push(from);
        nodes[to].prev_weights.push(distance);
    }
}
