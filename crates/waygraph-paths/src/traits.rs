/// Minimal search interface: node count and neighbor enumeration.
///
/// Nodes are dense indices in `0..node_count()`.
pub trait Pather {
    /// Number of addressable nodes.
    fn node_count(&self) -> usize;

    /// Nodes reachable from `node` in one step, in a stable order.
    fn neighbors(&self, node: usize) -> &[usize];
}

/// Pather with weighted edges.
pub trait WeightedPather: Pather {
    /// Costs aligned with [`neighbors`](Pather::neighbors): `costs(n)[i]` is
    /// the cost of stepping from `n` to `neighbors(n)[i]`.
    fn costs(&self, node: usize) -> &[u32];
}

/// Full A* pather with a heuristic and a traversal policy.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of the cost from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: usize, to: usize) -> u32;

    /// Whether the search may step onto `node`. The start node is never
    /// checked.
    fn traversable(&self, node: usize) -> bool {
        let _ = node;
        true
    }
}
