//! Views of a waypoint graph for the search engine.
//!
//! The same stored nodes are searched forwards over "next" edges or
//! backwards over "prev" edges, under one of two traversal policies, by
//! wrapping them in a [`WaypointPather`].

use waygraph_paths::{AstarPather, Pather, WeightedPather, estimate};

use crate::graph::Waypoint;

/// Which edge list a search follows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Follow outgoing ("next") edges.
    #[default]
    Forward,
    /// Follow incoming ("prev") edges, walking the track backwards.
    Reverse,
}

impl Direction {
    /// `Reverse` when `reverse` is set.
    #[inline]
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse { Self::Reverse } else { Self::Forward }
    }

    /// The opposite direction.
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }
}

/// Which waypoints a search may step onto.
///
/// Shortcuts are valid alternate routes but must not shorten canonical
/// distances unless the caller asks for them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Traversal {
    /// Every enabled waypoint, shortcuts included.
    AllEnabled,
    /// Enabled waypoints that are not shortcuts.
    #[default]
    NoShortcuts,
}

impl Traversal {
    /// `AllEnabled` when `allow_shortcuts` is set.
    #[inline]
    pub fn from_shortcuts(allow_shortcuts: bool) -> Self {
        if allow_shortcuts {
            Self::AllEnabled
        } else {
            Self::NoShortcuts
        }
    }

    #[inline]
    pub fn allows_shortcuts(self) -> bool {
        self == Self::AllEnabled
    }

    /// Whether `waypoint` may be entered under this policy.
    #[inline]
    pub fn admits(self, waypoint: &Waypoint) -> bool {
        match self {
            Self::AllEnabled => waypoint.is_enabled(),
            Self::NoShortcuts => waypoint.is_enabled() && !waypoint.is_shortcut(),
        }
    }
}

// ---------------------------------------------------------------------------
// WaypointPather
// ---------------------------------------------------------------------------

/// Waypoints seen through one direction and traversal policy.
pub(crate) struct WaypointPather<'a> {
    nodes: &'a [Waypoint],
    direction: Direction,
    traversal: Traversal,
}

impl<'a> WaypointPather<'a> {
    pub(crate) fn new(nodes: &'a [Waypoint], direction: Direction, traversal: Traversal) -> Self {
        Self {
            nodes,
            direction,
            traversal,
        }
    }
}

impl Pather for WaypointPather<'_> {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn neighbors(&self, node: usize) -> &[usize] {
        self.nodes[node].neighbors(self.direction)
    }
}

impl WeightedPather for WaypointPather<'_> {
    fn costs(&self, node: usize) -> &[u32] {
        self.nodes[node].weights(self.direction)
    }
}

impl AstarPather for WaypointPather<'_> {
    fn estimate(&self, from: usize, to: usize) -> u32 {
        estimate(self.nodes[from].position, self.nodes[to].position)
    }

    fn traversable(&self, node: usize) -> bool {
        self.traversal.admits(&self.nodes[node])
    }
}

// ---------------------------------------------------------------------------
// LapPather
// ---------------------------------------------------------------------------

/// A forward view with one extra node: a copy of `origin` that shares its
/// outgoing edges but is a different node. Searching from the copy back to
/// `origin` measures the shortest loop through `origin`.
pub(crate) struct LapPather<'a> {
    inner: WaypointPather<'a>,
    origin: usize,
}

impl<'a> LapPather<'a> {
    pub(crate) fn new(nodes: &'a [Waypoint], origin: usize, traversal: Traversal) -> Self {
        Self {
            inner: WaypointPather::new(nodes, Direction::Forward, traversal),
            origin,
        }
    }

    /// Index of the copy of `origin`.
    #[inline]
    pub(crate) fn copy(&self) -> usize {
        self.inner.nodes.len()
    }

    #[inline]
    fn real(&self, node: usize) -> usize {
        if node == self.copy() { self.origin } else { node }
    }
}

impl Pather for LapPather<'_> {
    fn node_count(&self) -> usize {
        self.inner.node_count() + 1
    }

    fn neighbors(&self, node: usize) -> &[usize] {
        self.inner.neighbors(self.real(node))
    }
}

impl WeightedPather for LapPather<'_> {
    fn costs(&self, node: usize) -> &[u32] {
        self.inner.costs(self.real(node))
    }
}

impl AstarPather for LapPather<'_> {
    fn estimate(&self, from: usize, to: usize) -> u32 {
        self.inner.estimate(self.real(from), self.real(to))
    }

    fn traversable(&self, node: usize) -> bool {
        self.inner.traversable(self.real(node))
    }
}
