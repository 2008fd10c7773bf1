//! Graph configuration.

use waygraph_paths::ScratchHints;

/// Whether the track loops back onto its finish line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackLayout {
    /// Racers lap the track; the circuit length is measured at build time
    /// and a track that does not loop is reported.
    #[default]
    Circuit,
    /// Point-to-point or sectioned track; the circuit length is always 0.
    Sprint,
}

/// Configuration for creating a [`WaypointGraph`](crate::WaypointGraph).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GraphConfig {
    pub layout: TrackLayout,
    /// Starting capacities for pathfinding working sets.
    pub scratch: ScratchHints,
}

impl GraphConfig {
    /// Defaults with the given layout.
    pub fn with_layout(layout: TrackLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }
}
