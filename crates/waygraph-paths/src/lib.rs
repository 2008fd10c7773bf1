//! Generic search algorithms over caller-described graphs.
//!
//! Nothing in this crate knows what a waypoint is. A graph is described to
//! the algorithms through a small trait hierarchy over dense node indices
//! `0..node_count`, so the same stored graph can be searched forwards or
//! backwards, or under different traversal policies, just by handing in a
//! different view of it:
//!
//! - **A\*** best-path search ([`PathFinder::astar_path`])
//! - **Flood search** by predicate ([`PathFinder::flood_find`])
//!
//! [`PathFinder`] carries [`ScratchHints`], the capacities its working sets
//! start with. Hints only ever grow, so repeated searches stop paying for
//! reallocation once the largest search has been seen.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | flood search |
//! | [`WeightedPather`] : [`Pather`] | (edge costs) |
//! | [`AstarPather`] : [`WeightedPather`] | A* |

mod astar;
mod distance;
mod flood;
mod pathfinder;
mod traits;

pub use distance::{edge_cost, estimate};
pub use pathfinder::{Path, PathFinder, ScratchHints};
pub use traits::{AstarPather, Pather, WeightedPather};
