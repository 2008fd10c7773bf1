//! The graph store: [`WaypointGraph`], [`Waypoint`] and [`NodeHandle`].

use waygraph_core::Vec3;
use waygraph_paths::{PathFinder, ScratchHints};

use crate::config::GraphConfig;
use crate::pather::Direction;

// ---------------------------------------------------------------------------
// NodeHandle
// ---------------------------------------------------------------------------

/// Opaque reference to a waypoint of one particular build of a graph.
///
/// Every build and every clear invalidates all earlier handles; passing a
/// stale handle to a query is a soft failure, not a panic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    index: u32,
    generation: u32,
}

/// A directed, weighted connection as seen from one end.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    /// The waypoint at the other end.
    pub node: NodeHandle,
    /// Edge weight: distance between the two waypoints at build time.
    pub distance: u32,
}

// ---------------------------------------------------------------------------
// Waypoint
// ---------------------------------------------------------------------------

/// Routing attributes copied from the marker at build time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WaypointFlags {
    pub enabled: bool,
    pub shortcut: bool,
    pub finish_line: bool,
    pub spawn_point: bool,
}

/// One node of the graph.
///
/// Outgoing ("next") and incoming ("prev") edges are stored as parallel
/// node/weight arrays so they can be handed to the search engine as slices.
#[derive(Clone, Debug)]
pub struct Waypoint {
    pub(crate) marker: usize,
    pub(crate) id: u32,
    pub(crate) next_id: Option<u32>,
    pub(crate) position: Vec3,
    pub(crate) radius: f64,
    pub(crate) flags: WaypointFlags,
    pub(crate) next_nodes: Vec<usize>,
    pub(crate) next_weights: Vec<u32>,
    pub(crate) prev_nodes: Vec<usize>,
    pub(crate) prev_weights: Vec<u32>,
}

impl Waypoint {
    /// Index of the marker this waypoint was built from.
    #[inline]
    pub fn marker(&self) -> usize {
        self.marker
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The successor id as placed in the map.
    #[inline]
    pub fn next_id(&self) -> Option<u32> {
        self.next_id
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Radius of the influence volume.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn flags(&self) -> WaypointFlags {
        self.flags
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.flags.enabled
    }

    #[inline]
    pub fn is_shortcut(&self) -> bool {
        self.flags.shortcut
    }

    #[inline]
    pub fn is_finish_line(&self) -> bool {
        self.flags.finish_line
    }

    #[inline]
    pub fn is_spawn_point(&self) -> bool {
        self.flags.spawn_point
    }

    /// Number of edges leaving this waypoint in `direction`.
    #[inline]
    pub fn edge_count(&self, direction: Direction) -> usize {
        self.neighbors(direction).len()
    }

    #[inline]
    pub(crate) fn neighbors(&self, direction: Direction) -> &[usize] {
        match direction {
            Direction::Forward => &self.next_nodes,
            Direction::Reverse => &self.prev_nodes,
        }
    }

    #[inline]
    pub(crate) fn weights(&self, direction: Direction) -> &[u32] {
        match direction {
            Direction::Forward => &self.next_weights,
            Direction::Reverse => &self.prev_weights,
        }
    }
}

// ---------------------------------------------------------------------------
// WaypointGraph
// ---------------------------------------------------------------------------

/// A waypoint graph and everything needed to query it.
///
/// The graph is built wholesale from a marker list with
/// [`build`](Self::build) and replaced entirely by the next build or by
/// [`clear`](Self::clear). Queries that run a search take `&mut self`
/// because they update the pathfinding [`ScratchHints`], which survive
/// rebuilds.
#[derive(Debug, Clone, Default)]
pub struct WaypointGraph {
    pub(crate) config: GraphConfig,
    pub(crate) nodes: Vec<Waypoint>,
    pub(crate) first: Option<usize>,
    pub(crate) finish: Option<usize>,
    pub(crate) circuit_length: u32,
    pub(crate) generation: u32,
    pub(crate) finder: PathFinder,
}

impl WaypointGraph {
    /// Create an empty graph with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph from a configuration.
    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            config,
            finder: PathFinder::new(config.scratch),
            ..Self::default()
        }
    }

    #[inline]
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Current pathfinding capacity hints.
    #[inline]
    pub fn scratch_hints(&self) -> ScratchHints {
        self.finder.hints()
    }

    /// Drop every node and reset the graph metadata. Scratch hints are kept.
    pub fn clear(&mut self) {
        self.nodes = Vec::new();
        self.first = None;
        self.finish = None;
        self.circuit_length = 0;
        self.generation = self.generation.wrapping_add(1);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of waypoints in the graph.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The waypoint stored at `index`, or `None` if out of range.
    pub fn node_at(&self, index: usize) -> Option<NodeHandle> {
        if index >= self.nodes.len() {
            log::debug!(
                "node_at: index {index} out of range ({} waypoints)",
                self.nodes.len()
            );
            return None;
        }
        Some(self.handle(index))
    }

    /// Storage index of a waypoint, or `None` for a stale handle.
    pub fn index_of(&self, node: NodeHandle) -> Option<usize> {
        self.resolve(node, "index_of")
    }

    /// Read access to a waypoint.
    pub fn node(&self, node: NodeHandle) -> Option<&Waypoint> {
        let i = self.resolve(node, "node")?;
        Some(&self.nodes[i])
    }

    /// All waypoints with their handles, in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeHandle, &Waypoint)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(move |(i, w)| (self.handle(i), w))
    }

    /// The first waypoint built; flood searches start here.
    pub fn first_node(&self) -> Option<NodeHandle> {
        self.first.map(|i| self.handle(i))
    }

    /// The designated finish-line waypoint.
    pub fn finish_node(&self) -> Option<NodeHandle> {
        self.finish.map(|i| self.handle(i))
    }

    /// Length of the shortest lap from the finish line back to itself, or 0
    /// on sprint tracks and tracks that do not loop.
    #[inline]
    pub fn circuit_length(&self) -> u32 {
        self.circuit_length
    }

    pub fn is_finish_line(&self, node: NodeHandle) -> bool {
        self.node_flag(node, "is_finish_line", Waypoint::is_finish_line)
    }

    pub fn is_shortcut(&self, node: NodeHandle) -> bool {
        self.node_flag(node, "is_shortcut", Waypoint::is_shortcut)
    }

    pub fn is_spawn_point(&self, node: NodeHandle) -> bool {
        self.node_flag(node, "is_spawn_point", Waypoint::is_spawn_point)
    }

    pub fn is_enabled(&self, node: NodeHandle) -> bool {
        self.node_flag(node, "is_enabled", Waypoint::is_enabled)
    }

    /// The waypoint's id, or `None` for a stale handle.
    pub fn id(&self, node: NodeHandle) -> Option<u32> {
        self.resolve(node, "id").map(|i| self.nodes[i].id)
    }

    /// The successor id the waypoint was placed with.
    pub fn next_id(&self, node: NodeHandle) -> Option<u32> {
        self.resolve(node, "next_id")
            .and_then(|i| self.nodes[i].next_id)
    }

    /// Edges leaving `node` in `direction`, in build order.
    pub fn edges(
        &self,
        node: NodeHandle,
        direction: Direction,
    ) -> impl Iterator<Item = Edge> + '_ {
        let (nodes, weights): (&[usize], &[u32]) = match self.resolve(node, "edges") {
            Some(i) => (
                self.nodes[i].neighbors(direction),
                self.nodes[i].weights(direction),
            ),
            None => (&[], &[]),
        };
        nodes.iter().zip(weights).map(move |(&n, &distance)| Edge {
            node: self.handle(n),
            distance,
        })
    }

    /// Enable or disable a waypoint at run time. Returns `false` for a stale
    /// handle.
    pub fn set_enabled(&mut self, node: NodeHandle, enabled: bool) -> bool {
        match self.resolve(node, "set_enabled") {
            Some(i) => {
                self.nodes[i].flags.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Move a waypoint after the build. Heuristics and spatial queries see
    /// the new position; edge weights keep their build-time values.
    pub fn move_node(&mut self, node: NodeHandle, position: Vec3) -> bool {
        match self.resolve(node, "move_node") {
            Some(i) => {
                self.nodes[i].position = position;
                true
            }
            None => false,
        }
    }

    // -----------------------------------------------------------------------
    // Handle helpers
    // -----------------------------------------------------------------------

    #[inline]
    pub(crate) fn handle(&self, index: usize) -> NodeHandle {
        NodeHandle {
            index: index as u32,
            generation: self.generation,
        }
    }

    /// Map a handle to a storage index, logging stale handles.
    pub(crate) fn resolve(&self, node: NodeHandle, caller: &str) -> Option<usize> {
        let index = node.index as usize;
        if node.generation != self.generation || index >= self.nodes.len() {
            log::debug!("{caller}: stale or foreign waypoint handle {node:?}");
            return None;
        }
        Some(index)
    }

    fn node_flag(&self, node: NodeHandle, caller: &str, flag: fn(&Waypoint) -> bool) -> bool {
        self.resolve(node, caller)
            .is_some_and(|i| flag(&self.nodes[i]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waygraph_core::Marker;

    fn square() -> Vec<Marker> {
        vec![
            Marker::new(0, Vec3::new(0.0, 0.0, 0.0)).with_next(1).finish_line(),
            Marker::new(1, Vec3::new(100.0, 0.0, 0.0)).with_next(2).spawn_point(),
            Marker::new(2, Vec3::new(100.0, 100.0, 0.0)).with_next(3).shortcut(),
            Marker::new(3, Vec3::new(0.0, 100.0, 0.0)).with_next(0).disabled(),
        ]
    }

    #[test]
    fn empty_graph_queries() {
        let g = WaypointGraph::new();
        assert!(g.is_empty());
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.node_at(0), None);
        assert_eq!(g.finish_node(), None);
        assert_eq!(g.first_node(), None);
        assert_eq!(g.circuit_length(), 0);
    }

    #[test]
    fn flag_accessors() {
        let mut g = WaypointGraph::new();
        g.build(&square()).unwrap();
        let by_id = |id| g.find_node_by_id(id).unwrap();
        assert!(g.is_finish_line(by_id(0)));
        assert!(g.is_spawn_point(by_id(1)));
        assert!(g.is_shortcut(by_id(2)));
        assert!(!g.is_enabled(by_id(3)));
        assert!(g.is_enabled(by_id(0)));
        assert_eq!(g.id(by_id(2)), Some(2));
        assert_eq!(g.next_id(by_id(3)), Some(0));
    }

    #[test]
    fn index_round_trip() {
        let mut g = WaypointGraph::new();
        g.build(&square()).unwrap();
        for i in 0..g.node_count() {
            let h = g.node_at(i).unwrap();
            assert_eq!(g.index_of(h), Some(i));
        }
        assert_eq!(g.node_at(g.node_count()), None);
    }

    #[test]
    fn stale_handles_are_rejected() {
        let mut g = WaypointGraph::new();
        g.build(&square()).unwrap();
        let h = g.node_at(0).unwrap();
        g.build(&square()).unwrap();
        assert_eq!(g.index_of(h), None);
        assert!(!g.is_finish_line(h));
        assert!(!g.is_enabled(h));
        assert_eq!(g.id(h), None);
        assert_eq!(g.edges(h, Direction::Forward).count(), 0);

        let fresh = g.node_at(0).unwrap();
        g.clear();
        assert_eq!(g.index_of(fresh), None);
        assert!(g.is_empty());
    }

    #[test]
    fn edges_in_both_directions() {
        let mut g = WaypointGraph::new();
        g.build(&square()).unwrap();
        let a = g.find_node_by_id(0).unwrap();
        let b = g.find_node_by_id(1).unwrap();
        let d = g.find_node_by_id(3).unwrap();
        let next: Vec<_> = g.edges(a, Direction::Forward).collect();
        assert_eq!(next, vec![Edge { node: b, distance: 100 }]);
        let prev: Vec<_> = g.edges(a, Direction::Reverse).collect();
        assert_eq!(prev, vec![Edge { node: d, distance: 100 }]);
    }

    #[test]
    fn set_enabled_and_move() {
        let mut g = WaypointGraph::new();
        g.build(&square()).unwrap();
        let d = g.find_node_by_id(3).unwrap();
        assert!(g.set_enabled(d, true));
        assert!(g.is_enabled(d));

        assert!(g.move_node(d, Vec3::new(0.0, 500.0, 0.0)));
        assert_eq!(g.node(d).unwrap().position(), Vec3::new(0.0, 500.0, 0.0));
        // Weights keep their build-time value.
        assert!(g.edges(d, Direction::Forward).all(|e| e.distance == 100));
    }

    #[test]
    fn iterate_with_handles_and_edge_counts() {
        let mut g = WaypointGraph::new();
        g.build(&square()).unwrap();
        let listed: Vec<_> = g.iter().map(|(h, w)| (g.index_of(h), w.id())).collect();
        assert_eq!(listed, vec![(Some(0), 0), (Some(1), 1), (Some(2), 2), (Some(3), 3)]);
        for (_, w) in g.iter() {
            assert_eq!(w.edge_count(Direction::Forward), 1);
            assert_eq!(w.edge_count(Direction::Reverse), 1);
        }
    }

    #[test]
    fn keeps_its_configuration() {
        let config = GraphConfig {
            layout: crate::config::TrackLayout::Sprint,
            scratch: ScratchHints {
                open: 64,
                closed: 512,
                nodes: 512,
            },
        };
        let mut g = WaypointGraph::with_config(config);
        g.build(&square()).unwrap();
        assert_eq!(*g.config(), config);
        assert_eq!(g.circuit_length(), 0);
        assert_eq!(g.scratch_hints().open, 64);
    }

    #[test]
    fn clear_keeps_scratch_hints() {
        let mut g = WaypointGraph::new();
        g.build(&square()).unwrap();
        let hints = g.scratch_hints();
        g.clear();
        assert_eq!(g.scratch_hints(), hints);
    }
}
