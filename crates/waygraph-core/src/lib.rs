//! Core types for the waypoint graph engine.
//!
//! This crate provides the types shared across the *waygraph* crates:
//! 3D geometry, the placement markers a map loader hands to the graph
//! builder, and the traits through which the simulation layer answers
//! questions the graph cannot answer itself (line of sight).

pub mod geom;
pub mod marker;
pub mod sight;

pub use geom::Vec3;
pub use marker::{Anchor, Marker, Riser};
pub use sight::{AlwaysVisible, LineOfSight};
