use std::collections::BinaryHeap;

use crate::pathfinder::{NO_SLOT, NodeRef, Path, PathFinder, Record, ScratchHints};
use crate::traits::AstarPather;

impl PathFinder {
    /// Compute the cheapest path from `from` to `to` using A*.
    ///
    /// Returns the full path (including both endpoints) or `None` if `to`
    /// cannot be reached through traversable nodes. A search whose start is
    /// its goal succeeds with a single-node path of distance 0.
    ///
    /// The open set and record array start at the capacities
    /// given by [`hints`](Self::hints); the hints are raised afterwards to
    /// whatever each set grew to.
    pub fn astar_path<P: AstarPather>(&mut self, pather: &P, from: usize, to: usize) -> Option<Path> {
        let len = pather.node_count();
        if from >= len || to >= len {
            log::debug!("astar_path: node out of range (from {from}, to {to}, {len} nodes)");
            return None;
        }

        if from == to {
            return Some(Path::trivial(from));
        }

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::with_capacity(self.hints.open);
        let mut closed_count = 0;
        let mut records: Vec<Record> = Vec::with_capacity(self.hints.nodes);
        let mut slots = vec![NO_SLOT; len];
        let mut open_peak = 0;

        slots[from] = 0;
        records.push(Record {
            node: from,
            g: 0,
            parent: NO_SLOT,
            closed: false,
            expanded: false,
        });
        open.push(NodeRef {
            slot: 0,
            f: pather.estimate(from, to),
            g: 0,
        });

        let found = 'search: loop {
            open_peak = open_peak.max(open.len());
            let Some(current) = open.pop() else {
                break 'search None;
            };

            let cs = current.slot;
            let record = records[cs];

            // Skip stale entries.
            if record.closed || record.g != current.g {
                continue;
            }

            if record.node == to {
                break 'search Some(cs);
            }

            records[cs].closed = true;
            if !records[cs].expanded {
                records[cs].expanded = true;
                closed_count += 1;
            }

            let neighbors = pather.neighbors(record.node);
            let costs = pather.costs(record.node);
            if neighbors.len() != costs.len() {
                log::debug!(
                    "astar_path: node {} has {} neighbors but {} costs",
                    record.node,
                    neighbors.len(),
                    costs.len()
                );
            }

            for (&next, &cost) in neighbors.iter().zip(costs) {
                if next >= len || !pather.traversable(next) {
                    continue;
                }
                let tentative_g = record.g.saturating_add(cost);

                let slot = match slots[next] {
                    NO_SLOT => {
                        records.push(Record {
                            node: next,
                            g: tentative_g,
                            parent: cs,
                            closed: false,
                            expanded: false,
                        });
                        slots[next] = records.len() - 1;
                        records.len() - 1
                    }
                    slot => {
                        let r = &mut records[slot];
                        if tentative_g >= r.g {
                            continue;
                        }
                        // Only an inconsistent heuristic can improve a
                        // closed node; reopen it.
                        r.g = tentative_g;
                        r.parent = cs;
                        r.closed = false;
                        slot
                    }
                };

                open.push(NodeRef {
                    slot,
                    f: tentative_g.saturating_add(pather.estimate(next, to)),
                    g: tentative_g,
                });
            }
        };

        let seen = ScratchHints {
            open: open_peak,
            closed: closed_count,
            nodes: records.len(),
        };
        if self.hints.absorb(seen) {
            log::trace!("astar_path: scratch hints grew to {:?}", self.hints);
        }

        let goal_slot = found?;

        // Reconstruct path.
        let distance = records[goal_slot].g;
        let mut nodes = Vec::new();
        let mut cs = goal_slot;
        while cs != NO_SLOT {
            nodes.push(records[cs].node);
            cs = records[cs].parent;
        }
        nodes.reverse();
        Some(Path { nodes, distance })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{Pather, WeightedPather};

    /// Adjacency-list graph on a line: node `i` sits at `x = pos[i]`.
    struct LineGraph {
        pos: Vec<u32>,
        next: Vec<Vec<usize>>,
        costs: Vec<Vec<u32>>,
        blocked: Vec<bool>,
    }

    impl LineGraph {
        fn new(pos: &[u32]) -> Self {
            let n = pos.len();
            Self {
                pos: pos.to_vec(),
                next: vec![Vec::new(); n],
                costs: vec![Vec::new(); n],
                blocked: vec![false; n],
            }
        }

        fn edge(mut self, a: usize, b: usize, cost: u32) -> Self {
            self.next[a].push(b);
            self.costs[a].push(cost);
            self
        }

        fn block(mut self, n: usize) -> Self {
            self.blocked[n] = true;
            self
        }
    }

    impl Pather for LineGraph {
        fn node_count(&self) -> usize {
            self.pos.len()
        }
        fn neighbors(&self, node: usize) -> &[usize] {
            &self.next[node]
        }
    }

    impl WeightedPather for LineGraph {
        fn costs(&self, node: usize) -> &[u32] {
            &self.costs[node]
        }
    }

    impl AstarPather for LineGraph {
        fn estimate(&self, from: usize, to: usize) -> u32 {
            self.pos[from].abs_diff(self.pos[to])
        }
        fn traversable(&self, node: usize) -> bool {
            !self.blocked[node]
        }
    }

    fn diamond() -> LineGraph {
        // 0 -> 1 -> 3 costs 10 + 10, 0 -> 2 -> 3 costs 5 + 30.
        LineGraph::new(&[0, 10, 5, 20])
            .edge(0, 1, 10)
            .edge(1, 3, 10)
            .edge(0, 2, 5)
            .edge(2, 3, 30)
    }

    #[test]
    fn picks_cheapest_branch() {
        let mut pf = PathFinder::default();
        let path = pf.astar_path(&diamond(), 0, 3).unwrap();
        assert_eq!(path.nodes, vec![0, 1, 3]);
        assert_eq!(path.distance, 20);
    }

    #[test]
    fn same_start_and_goal() {
        let mut pf = PathFinder::default();
        let path = pf.astar_path(&diamond(), 2, 2).unwrap();
        assert_eq!(path, Path::trivial(2));
    }

    #[test]
    fn respects_traversable() {
        let mut pf = PathFinder::default();
        let g = diamond().block(1);
        let path = pf.astar_path(&g, 0, 3).unwrap();
        assert_eq!(path.nodes, vec![0, 2, 3]);
        assert_eq!(path.distance, 35);
    }

    #[test]
    fn blocked_goal_is_unreachable() {
        let mut pf = PathFinder::default();
        let g = diamond().block(3);
        assert!(pf.astar_path(&g, 0, 3).is_none());
    }

    #[test]
    fn unreachable_returns_none() {
        let mut pf = PathFinder::default();
        // Edges only go forward.
        assert!(pf.astar_path(&diamond(), 3, 0).is_none());
    }

    #[test]
    fn out_of_range_returns_none() {
        let mut pf = PathFinder::default();
        assert!(pf.astar_path(&diamond(), 0, 9).is_none());
        assert!(pf.astar_path(&diamond(), 9, 0).is_none());
    }

    #[test]
    fn handles_cycles() {
        let g = LineGraph::new(&[0, 10, 20, 30])
            .edge(0, 1, 10)
            .edge(1, 2, 10)
            .edge(2, 0, 20)
            .edge(2, 3, 10)
            .edge(3, 0, 30);
        let mut pf = PathFinder::default();
        let path = pf.astar_path(&g, 1, 0).unwrap();
        assert_eq!(path.nodes, vec![1, 2, 0]);
        assert_eq!(path.distance, 30);
    }

    #[test]
    fn hints_grow_to_high_water_mark() {
        // A fan of 40 children, each leading to the goal.
        let n = 42;
        let goal = n - 1;
        let mut pos = vec![0u32; n];
        pos[goal] = 2;
        let mut g = LineGraph::new(&pos);
        for child in 1..goal {
            g.pos[child] = 1;
            g = g.edge(0, child, 1).edge(child, goal, 1);
        }

        let mut pf = PathFinder::new(ScratchHints {
            open: 1,
            closed: 1,
            nodes: 1,
        });
        let path = pf.astar_path(&g, 0, goal).unwrap();
        assert_eq!(path.distance, 2);
        let grown = pf.hints();
        assert!(grown.open >= 40);
        assert!(grown.nodes >= 41);
        assert!(grown.closed >= 2);

        // A tiny search afterwards never shrinks them.
        pf.astar_path(&g, 1, goal).unwrap();
        assert_eq!(pf.hints(), grown);
    }

    #[test]
    fn reopened_node_counts_once_in_closed_hint() {
        // The heuristic overestimates at node 1, so node 2 is closed via the
        // direct edge before the cheaper route through 1 reopens it.
        let g = LineGraph::new(&[0, 10, 0, 0])
            .edge(0, 1, 1)
            .edge(0, 2, 3)
            .edge(1, 2, 1)
            .edge(2, 3, 10);
        let mut pf = PathFinder::new(ScratchHints {
            open: 1,
            closed: 1,
            nodes: 1,
        });
        let path = pf.astar_path(&g, 0, 3).unwrap();
        assert_eq!(path.nodes, vec![0, 1, 2, 3]);
        assert_eq!(path.distance, 12);
        // Nodes 0, 2 and 1 were closed; 2 twice.
        assert_eq!(pf.hints().closed, 3);
        assert_eq!(pf.hints().nodes, 4);
    }
}
