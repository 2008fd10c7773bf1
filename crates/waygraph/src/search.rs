//! Predicate lookups over the graph.
//!
//! A flood search walks outgoing edges depth-first from the first waypoint,
//! so it only finds what is connected to the start of the track. A linear
//! search scans storage and ignores edges entirely.

use crate::graph::{NodeHandle, Waypoint, WaypointGraph};
use crate::pather::{Direction, Traversal, WaypointPather};

/// How a lookup walks the graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LookupMode {
    /// Depth-first over outgoing edges from the first waypoint.
    #[default]
    Graph,
    /// In storage order.
    Store,
}

impl WaypointGraph {
    /// Depth-first search from the first waypoint for one matching `pred`.
    ///
    /// `visited` needs one flag per waypoint and should start cleared;
    /// waypoints already flagged are skipped. Each waypoint is checked at
    /// most once, so cyclic tracks terminate.
    pub fn flood_find(
        &mut self,
        visited: &mut [bool],
        mut pred: impl FnMut(&Waypoint) -> bool,
    ) -> Option<NodeHandle> {
        let first = self.first?;
        if visited.len() < self.nodes.len() {
            log::debug!(
                "flood_find: visited holds {} flags for {} waypoints",
                visited.len(),
                self.nodes.len()
            );
            return None;
        }
        let nodes = &self.nodes;
        let pather = WaypointPather::new(nodes, Direction::Forward, Traversal::AllEnabled);
        let found = self
            .finder
            .flood_find(&pather, first, visited, |i| pred(&nodes[i]))?;
        Some(self.handle(found))
    }

    /// The first waypoint in storage order matching `pred`.
    pub fn linear_find(&self, pred: impl FnMut(&Waypoint) -> bool) -> Option<NodeHandle> {
        self.nodes.iter().position(pred).map(|i| self.handle(i))
    }

    /// Find a waypoint matching `pred` the way `mode` says.
    pub fn find_node(
        &mut self,
        mode: LookupMode,
        pred: impl FnMut(&Waypoint) -> bool,
    ) -> Option<NodeHandle> {
        match mode {
            LookupMode::Graph => {
                let mut visited = vec![false; self.nodes.len()];
                self.flood_find(&mut visited, pred)
            }
            LookupMode::Store => self.linear_find(pred),
        }
    }

    /// The waypoint built from the marker at `marker` in the list last given
    /// to [`build`](Self::build).
    pub fn find_node_for_marker(&mut self, marker: usize, mode: LookupMode) -> Option<NodeHandle> {
        let found = self.find_node(mode, |w| w.marker == marker);
        if found.is_none() {
            log::debug!("find_node_for_marker: no waypoint for marker {marker} ({mode:?})");
        }
        found
    }

    /// The first waypoint in storage order with waypoint id `id`.
    pub fn find_node_by_id(&self, id: u32) -> Option<NodeHandle> {
        self.linear_find(|w| w.id == id)
    }
}
