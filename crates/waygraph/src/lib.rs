//! Waypoint graphs for racing AI and race progress.
//!
//! A map places waypoint [`Marker`]s, each naming the id of the marker that
//! follows it. [`WaypointGraph::build`] turns that list into a directed graph
//! with weighted edges both ways, and the graph then answers the questions
//! a race simulation asks every tick:
//!
//! - **Steering**: which waypoint to head for next
//!   ([`WaypointGraph::next_hop`]), or the whole best path
//!   ([`WaypointGraph::pathfind`]), forwards or backwards, with or without
//!   shortcuts.
//! - **Progress**: which waypoint an entity is at
//!   ([`WaypointGraph::best_node_for_entity`]) and how long a lap is
//!   ([`WaypointGraph::circuit_length`]).
//! - **Lookup**: nearest waypoint to a point, or the first waypoint matching
//!   a predicate by flood or linear search.
//!
//! Waypoints are addressed by [`NodeHandle`]. A handle is only good for the
//! graph build that produced it; queries given a stale handle log at debug
//! level and return `None` or `false`.
//!
//! ```
//! use waygraph::{Direction, Marker, Traversal, Vec3, WaypointGraph};
//!
//! let markers = [
//!     Marker::new(0, Vec3::new(0.0, 0.0, 0.0)).with_next(1).finish_line(),
//!     Marker::new(1, Vec3::new(100.0, 0.0, 0.0)).with_next(2),
//!     Marker::new(2, Vec3::new(100.0, 100.0, 0.0)).with_next(0),
//! ];
//! let mut graph = WaypointGraph::new();
//! let report = graph.build(&markers).unwrap();
//! assert!(report.warnings.is_empty());
//!
//! assert_eq!(graph.circuit_length(), 342);
//!
//! let here = graph.find_node_by_id(1).unwrap();
//! let finish = graph.finish_node().unwrap();
//! let hop = graph.next_hop(here, finish, Traversal::NoShortcuts, Direction::Forward);
//! assert_eq!(graph.id(hop.unwrap()), Some(2));
//! ```

mod adjust;
mod build;
mod circuit;
mod config;
mod debug;
mod graph;
mod pather;
mod query;
mod search;

pub use adjust::{AdjustSummary, adjust_markers};
pub use build::{BuildError, BuildReport, BuildWarning};
pub use config::{GraphConfig, TrackLayout};
pub use debug::{
    DebugLine, DebugMarker, DebugMode, DebugView, LinkColour, MarkerStatus, SAMPLE_STEP,
    SAMPLES_PER_LINE,
};
pub use graph::{Edge, NodeHandle, Waypoint, WaypointFlags, WaypointGraph};
pub use pather::{Direction, Traversal};
pub use query::{VERTICAL_WEIGHT, WaypointPath};
pub use search::LookupMode;

pub use waygraph_core::{AlwaysVisible, Anchor, LineOfSight, Marker, Riser, Vec3};
pub use waygraph_paths::ScratchHints;
