/// A found path: node indices from source to destination inclusive, plus the
/// summed cost of the edges walked.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    pub nodes: Vec<usize>,
    pub distance: u32,
}

impl Path {
    /// The single-node path of a search whose start is its goal.
    pub fn trivial(node: usize) -> Self {
        Self {
            nodes: vec![node],
            distance: 0,
        }
    }

    /// Number of nodes on the path.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node after the source, if the path has one.
    #[inline]
    pub fn second(&self) -> Option<usize> {
        self.nodes.get(1).copied()
    }
}

// ---------------------------------------------------------------------------
// Scratch hints
// ---------------------------------------------------------------------------

/// Initial capacities for the working sets of a search.
///
/// After every search the hints are raised to the largest size each set
/// actually reached. They are never lowered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScratchHints {
    /// Frontier (open set) capacity.
    pub open: usize,
    /// Finalised-node (closed set) size; a reopened node counts once.
    pub closed: usize,
    /// Per-node bookkeeping array capacity.
    pub nodes: usize,
}

impl ScratchHints {
    pub const DEFAULT_OPEN: usize = 16;
    pub const DEFAULT_CLOSED: usize = 256;
    pub const DEFAULT_NODES: usize = 256;

    /// Raise each hint to `seen` where `seen` is larger. Returns whether any
    /// hint changed.
    pub fn absorb(&mut self, seen: ScratchHints) -> bool {
        let before = *self;
        self.open = self.open.max(seen.open);
        self.closed = self.closed.max(seen.closed);
        self.nodes = self.nodes.max(seen.nodes);
        before != *self
    }
}

impl Default for ScratchHints {
    fn default() -> Self {
        Self {
            open: Self::DEFAULT_OPEN,
            closed: Self::DEFAULT_CLOSED,
            nodes: Self::DEFAULT_NODES,
        }
    }
}

// ---------------------------------------------------------------------------
// Internal records for the A* search
// ---------------------------------------------------------------------------

pub(crate) const NO_SLOT: usize = usize::MAX;

/// Bookkeeping for one node touched by a search.
#[derive(Clone, Copy)]
pub(crate) struct Record {
    pub(crate) node: usize,
    pub(crate) g: u32,
    pub(crate) parent: usize,
    pub(crate) closed: bool,
    /// Closed at least once; a reopened node keeps this set.
    pub(crate) expanded: bool,
}

/// Reference into the record array, ordered by `f` for use in `BinaryHeap`.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) slot: usize,
    pub(crate) f: u32,
    pub(crate) g: u32,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first; among
        // equal f prefer the deeper node.
        other.f.cmp(&self.f).then(self.g.cmp(&other.g))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// PathFinder
// ---------------------------------------------------------------------------

/// Entry point for searches.
///
/// A `PathFinder` is not tied to any graph; each call receives the graph
/// view to search. It owns the [`ScratchHints`] used to size the working
/// sets and a reusable stack for flood searches. Searches take `&mut self`,
/// so a finder shared between threads must be behind a lock, or each thread
/// should own its own.
#[derive(Debug, Clone, Default)]
pub struct PathFinder {
    pub(crate) hints: ScratchHints,
    pub(crate) flood_stack: Vec<usize>,
}

impl PathFinder {
    /// Create a finder starting from the given hints.
    pub fn new(hints: ScratchHints) -> Self {
        Self {
            hints,
            flood_stack: Vec::new(),
        }
    }

    /// Current capacity hints.
    #[inline]
    pub fn hints(&self) -> ScratchHints {
        self.hints
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn hints_only_grow() {
        let mut h = ScratchHints::default();
        assert!(!h.absorb(ScratchHints {
            open: 1,
            closed: 1,
            nodes: 1
        }));
        assert_eq!(h, ScratchHints::default());

        assert!(h.absorb(ScratchHints {
            open: 40,
            closed: 2,
            nodes: 300
        }));
        assert_eq!(
            h,
            ScratchHints {
                open: 40,
                closed: ScratchHints::DEFAULT_CLOSED,
                nodes: 300
            }
        );
    }

    #[test]
    fn closed_hint_compares_against_itself() {
        // A closed-set size between the open and closed defaults must not
        // lower or replace the closed hint.
        let mut h = ScratchHints::default();
        h.absorb(ScratchHints {
            open: 0,
            closed: 100,
            nodes: 0,
        });
        assert_eq!(h.closed, ScratchHints::DEFAULT_CLOSED);
    }

    #[test]
    fn heap_pops_lowest_f_first() {
        let mut heap = BinaryHeap::new();
        heap.push(NodeRef { slot: 0, f: 30, g: 0 });
        heap.push(NodeRef { slot: 1, f: 10, g: 0 });
        heap.push(NodeRef { slot: 2, f: 20, g: 0 });
        heap.push(NodeRef { slot: 3, f: 10, g: 5 });
        assert_eq!(heap.pop().map(|n| n.slot), Some(3));
        assert_eq!(heap.pop().map(|n| n.slot), Some(1));
        assert_eq!(heap.pop().map(|n| n.slot), Some(2));
        assert_eq!(heap.pop().map(|n| n.slot), Some(0));
    }

    #[test]
    fn trivial_path() {
        let p = Path::trivial(4);
        assert_eq!(p.nodes, vec![4]);
        assert_eq!(p.distance, 0);
        assert_eq!(p.second(), None);
    }
}
