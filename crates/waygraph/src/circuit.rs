//! Lap length of circuit tracks.

use crate::config::TrackLayout;
use crate::graph::WaypointGraph;
use crate::pather::{LapPather, Traversal};

impl WaypointGraph {
    /// Shortest distance around the track from the finish line back to
    /// itself, shortcuts excluded. Sprint tracks and tracks without a loop
    /// through the finish line measure 0.
    pub(crate) fn measure_circuit(&mut self) -> u32 {
        if self.config.layout == TrackLayout::Sprint {
            return 0;
        }
        let Some(finish) = self.finish else {
            return 0;
        };

        // Search from a copy of the finish line so start and goal differ.
        let pather = LapPather::new(&self.nodes, finish, Traversal::NoShortcuts);
        self.finder
            .astar_path(&pather, pather.copy(), finish)
            .map_or(0, |path| path.distance)
    }
}
