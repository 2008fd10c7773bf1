//! Depth-first flood search by predicate.

use crate::PathFinder;
use crate::traits::Pather;

impl PathFinder {
    /// Depth-first search from `start` for the first node matching `pred`.
    ///
    /// Only neighbors are followed, so nodes unreachable from `start` are
    /// never checked. Branches are explored in neighbor order, each one to
    /// exhaustion before the next. `visited` must hold one flag per node; it
    /// is where the search records what it has seen, and nodes already
    /// flagged on entry are skipped. Every node is checked at most once, so
    /// the search terminates on cyclic graphs.
    ///
    /// Chains of single-neighbor nodes are walked in place; only branching
    /// nodes push onto the explicit stack, so depth never touches the call
    /// stack.
    pub fn flood_find<P: Pather>(
        &mut self,
        pather: &P,
        start: usize,
        visited: &mut [bool],
        mut pred: impl FnMut(usize) -> bool,
    ) -> Option<usize> {
        let len = pather.node_count().min(visited.len());
        if start >= len {
            log::debug!("flood_find: start {start} out of range ({len} nodes)");
            return None;
        }

        self.flood_stack.clear();
        self.flood_stack.push(start);

        let mut found = None;
        'branches: while let Some(branch) = self.flood_stack.pop() {
            let mut ci = branch;
            loop {
                if ci >= len || visited[ci] {
                    continue 'branches;
                }
                visited[ci] = true;

                if pred(ci) {
                    found = Some(ci);
                    break 'branches;
                }

                match pather.neighbors(ci) {
                    [next] => ci = *next,
                    neighbors => {
                        // Reverse so the first neighbor is popped first.
                        self.flood_stack.extend(neighbors.iter().rev());
                        continue 'branches;
                    }
                }
            }
        }

        self.flood_stack.clear();
        found
    }
}
