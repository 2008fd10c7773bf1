//! Read-only view of the graph for debug rendering.
//!
//! Nothing here draws. [`WaypointGraph::debug_view`] reports, for every
//! marker a map placed, whether it made it into the graph and how well it is
//! connected, plus one sampled line per edge so a renderer can scatter
//! sparkles along it.

use waygraph_core::{Marker, Vec3};

use crate::graph::{NodeHandle, WaypointGraph};
use crate::pather::Direction;

/// Base number of segments drawn per edge.
pub const SAMPLES_PER_LINE: u32 = 16;

/// Every this many units of edge weight doubles, triples, ... the samples.
pub const SAMPLE_STEP: u32 = 2048;

/// Which edge lists to draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DebugMode {
    /// Lines to each waypoint's next waypoints.
    #[default]
    Next,
    /// Lines to each waypoint's previous waypoints.
    Prev,
}

impl DebugMode {
    fn direction(self) -> Direction {
        match self {
            Self::Next => Direction::Forward,
            Self::Prev => Direction::Reverse,
        }
    }
}

/// How a marker shows up in the graph.
///
/// Renderers conventionally draw `Unlinked` and `Isolated` red, `DeadEnd`
/// yellow, `Target` green and `Linked` blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerStatus {
    /// No waypoint was built from the marker.
    Unlinked,
    /// A waypoint with no edges at all.
    Isolated,
    /// A waypoint missing either its next or its previous edges.
    DeadEnd,
    /// The highlighted waypoint, connected both ways.
    Target,
    /// Connected both ways.
    Linked,
}

/// Colour of an edge line, picked from the id of the waypoint it leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkColour {
    Red,
    Blue,
    Orange,
    Pink,
    Dream,
    Cyan,
    White,
}

impl LinkColour {
    pub const ALL: [LinkColour; 7] = [
        Self::Red,
        Self::Blue,
        Self::Orange,
        Self::Pink,
        Self::Dream,
        Self::Cyan,
        Self::White,
    ];

    #[inline]
    pub fn for_id(id: u32) -> Self {
        Self::ALL[id as usize % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DebugMarker {
    /// Index into the marker list.
    pub marker: usize,
    pub position: Vec3,
    pub node: Option<NodeHandle>,
    pub status: MarkerStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DebugLine {
    pub from: Vec3,
    pub to: Vec3,
    pub colour: LinkColour,
    /// Number of segments the line is cut into.
    pub samples: u32,
}

impl DebugLine {
    fn new(from: Vec3, to: Vec3, id: u32, weight: u32) -> Self {
        Self {
            from,
            to,
            colour: LinkColour::for_id(id),
            samples: SAMPLES_PER_LINE * (weight / SAMPLE_STEP + 1),
        }
    }

    /// The `samples + 1` evenly spaced points from `from` to `to`.
    pub fn points(&self) -> impl Iterator<Item = Vec3> + '_ {
        let n = f64::from(self.samples);
        (0..=self.samples).map(move |k| self.from.lerp(self.to, f64::from(k) / n))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebugView {
    pub markers: Vec<DebugMarker>,
    pub lines: Vec<DebugLine>,
}

impl WaypointGraph {
    /// Describe the graph for drawing. `markers` should be the list last
    /// given to [`build`](Self::build), so markers that were never turned into
    /// waypoints show up too. `target` is the waypoint to highlight, usually
    /// the one the viewing player heads for.
    pub fn debug_view(&self, markers: &[Marker], mode: DebugMode, target: Option<NodeHandle>) -> DebugView {
        let target = target.and_then(|t| self.resolve(t, "debug_view"));
        let mut node_of = vec![None; markers.len()];
        for (i, w) in self.nodes.iter().enumerate() {
            if let Some(slot) = node_of.get_mut(w.marker) {
                *slot = Some(i);
            }
        }

        let mut view = DebugView::default();
        let direction = mode.direction();
        for (marker, m) in markers.iter().enumerate() {
            let Some(i) = node_of[marker] else {
                view.markers.push(DebugMarker {
                    marker,
                    position: m.position,
                    node: None,
                    status: MarkerStatus::Unlinked,
                });
                continue;
            };

            let w = &self.nodes[i];
            let (next, prev) = (w.next_nodes.len(), w.prev_nodes.len());
            let status = if next == 0 && prev == 0 {
                MarkerStatus::Isolated
            } else if next == 0 || prev == 0 {
                MarkerStatus::DeadEnd
            } else if target == Some(i) {
                MarkerStatus::Target
            } else {
                MarkerStatus::Linked
            };
            view.markers.push(DebugMarker {
                marker,
                position: w.position,
                node: Some(self.handle(i)),
                status,
            });

            for (&other, &weight) in w.neighbors(direction).iter().zip(w.weights(direction)) {
                view.lines.push(DebugLine::new(
                    w.position,
                    self.nodes[other].position,
                    w.id,
                    weight,
                ));
            }
        }
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GraphConfig, TrackLayout};

    fn at(x: f64, y: f64) -> Vec3 {
        Vec3::new(x, y, 0.0)
    }

    #[test]
    fn colours_cycle_by_id() {
        assert_eq!(LinkColour::for_id(0), LinkColour::Red);
        assert_eq!(LinkColour::for_id(6), LinkColour::White);
        assert_eq!(LinkColour::for_id(7), LinkColour::Red);
        assert_eq!(LinkColour::for_id(10), LinkColour::Pink);
    }

    #[test]
    fn sample_count_grows_with_weight() {
        let short = DebugLine::new(Vec3::ZERO, at(100.0, 0.0), 0, 100);
        assert_eq!(short.samples, 16);
        let long = DebugLine::new(Vec3::ZERO, at(5000.0, 0.0), 0, 5000);
        assert_eq!(long.samples, 48);

        let points: Vec<_> = short.points().collect();
        assert_eq!(points.len(), 17);
        assert_eq!(points[0], Vec3::ZERO);
        assert_eq!(points[16], at(100.0, 0.0));
        assert!((points[8].x - 50.0).abs() < 1e-9);
    }

    #[test]
    fn statuses_and_lines() {
        let markers = vec![
            Marker::new(0, at(0.0, 0.0)).with_next(1).finish_line(),
            Marker::new(1, at(100.0, 0.0)).with_next(2),
            Marker::new(2, at(100.0, 100.0)).with_next(0),
            Marker::new(3, at(500.0, 0.0)),
            Marker::new(4, at(600.0, 0.0)).with_next(2),
        ];
        let mut g = WaypointGraph::with_config(GraphConfig::with_layout(TrackLayout::Sprint));
        g.build(&markers).unwrap();
        let target = g.find_node_by_id(1);

        let view = g.debug_view(&markers, DebugMode::Next, target);
        let status: Vec<_> = view.markers.iter().map(|m| m.status).collect();
        assert_eq!(
            status,
            vec![
                MarkerStatus::Linked,
                MarkerStatus::Target,
                MarkerStatus::Linked,
                MarkerStatus::Isolated,
                MarkerStatus::DeadEnd,
            ]
        );
        // One line per outgoing edge.
        assert_eq!(view.lines.len(), 4);
        assert!(view.lines.iter().all(|l| l.samples == SAMPLES_PER_LINE));
        assert_eq!(view.lines[0].colour, LinkColour::Red);

        let prev = g.debug_view(&markers, DebugMode::Prev, None);
        assert_eq!(prev.lines.len(), 4);
        assert!(prev.markers.iter().all(|m| m.status != MarkerStatus::Target));
    }

    #[test]
    fn markers_without_waypoints_are_unlinked() {
        let markers = vec![Marker::new(0, at(0.0, 0.0)).finish_line()];
        let g = WaypointGraph::new();
        let view = g.debug_view(&markers, DebugMode::Next, None);
        assert_eq!(view.markers.len(), 1);
        assert_eq!(view.markers[0].status, MarkerStatus::Unlinked);
        assert!(view.lines.is_empty());
    }
}
