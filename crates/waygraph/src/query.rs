//! Pathfinding, steering and spatial queries.

use waygraph_core::{LineOfSight, Vec3};
use waygraph_paths::Path;

use crate::graph::{NodeHandle, WaypointGraph};
use crate::pather::{Direction, Traversal, WaypointPather};

/// Height differences count this many times over when deciding which
/// waypoint volume an entity is in.
pub const VERTICAL_WEIGHT: f64 = 4.0;

/// A path through the graph, source to destination inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaypointPath {
    pub nodes: Vec<NodeHandle>,
    /// Sum of the edge weights along the path.
    pub distance: u32,
}

impl WaypointPath {
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl WaypointGraph {
    /// Best path from `source` to `destination`.
    ///
    /// `Direction::Reverse` walks incoming edges, answering "how is
    /// `destination` reached from behind `source`". Returns `None` when no
    /// path exists under `traversal`; that is an expected outcome, not an
    /// error. A source equal to its destination yields a one-node path.
    pub fn pathfind(
        &mut self,
        source: NodeHandle,
        destination: NodeHandle,
        traversal: Traversal,
        direction: Direction,
    ) -> Option<WaypointPath> {
        let src = self.resolve(source, "pathfind")?;
        let dst = self.resolve(destination, "pathfind")?;
        let path = self.path_between(src, dst, traversal, direction)?;
        Some(WaypointPath {
            nodes: path.nodes.iter().map(|&i| self.handle(i)).collect(),
            distance: path.distance,
        })
    }

    /// The waypoint to head for next on the way from `source` to
    /// `destination`.
    ///
    /// A source with exactly one edge in `direction` always answers with
    /// that edge's target, whatever its flags: there is nowhere else to go,
    /// so no search is run. Otherwise the best path decides. When there is
    /// no path, the first enabled shortcut target is taken if `traversal`
    /// allows shortcuts, else the first enabled target; with none enabled
    /// there is no next waypoint.
    pub fn next_hop(
        &mut self,
        source: NodeHandle,
        destination: NodeHandle,
        traversal: Traversal,
        direction: Direction,
    ) -> Option<NodeHandle> {
        let src = self.resolve(source, "next_hop")?;
        let dst = self.resolve(destination, "next_hop")?;

        if src == dst {
            // Already there.
            return Some(destination);
        }
        if !self.has_route_ends(src, dst, direction, "next_hop") {
            return None;
        }

        let candidates = self.nodes[src].neighbors(direction);
        if let [only] = candidates {
            return Some(self.handle(*only));
        }

        if let Some(path) = self.path_between(src, dst, traversal, direction) {
            let next = match path.second() {
                Some(next) => next,
                None => {
                    log::debug!("next_hop: only one waypoint pathfound");
                    path.nodes[0]
                }
            };
            return Some(self.handle(next));
        }

        // No route: pick something sensible from what is right ahead.
        let candidates = self.nodes[src].neighbors(direction);
        let enabled = |&&i: &&usize| self.nodes[i].is_enabled();
        let shortcut = if traversal.allows_shortcuts() {
            candidates
                .iter()
                .filter(enabled)
                .find(|&&i| self.nodes[i].is_shortcut())
        } else {
            None
        };
        shortcut
            .or_else(|| candidates.iter().find(enabled))
            .map(|&i| self.handle(i))
    }

    /// The waypoint whose centre is nearest to `point`, or `None` for an
    /// empty graph.
    pub fn closest_node_to_point(&self, point: Vec3) -> Option<NodeHandle> {
        let mut closest = None;
        let mut closest_dist = f64::INFINITY;
        for (node, w) in self.iter() {
            let dist = point.distance(w.position);
            if dist < closest_dist {
                closest = Some(node);
                closest_dist = dist;
            }
        }
        closest
    }

    /// The waypoint an entity at `position` should count as being at, for
    /// race progress.
    ///
    /// When the entity is inside one or more waypoint volumes, the one with
    /// the shortest shortcut-free path to the finish line wins, so overlap
    /// near a turn does not make progress flicker. If none of those has such
    /// a path, the nearest waypoint the entity can see is used, whether or
    /// not the entity is inside it. Visibility is only asked about waypoints
    /// that are nearer than any seen so far, and not at all once a volume
    /// with a path to the finish line has been found.
    pub fn best_node_for_entity<S: LineOfSight + ?Sized>(
        &mut self,
        position: Vec3,
        sight: &S,
    ) -> Option<NodeHandle> {
        let mut on_route: Option<(usize, u32)> = None;
        let mut nearest = None;
        let mut nearest_dist = f64::INFINITY;
        let finish = self.finish;

        for i in 0..self.nodes.len() {
            let w = &self.nodes[i];
            let (centre, radius) = (w.position, w.radius);
            let dist = position.weighted_distance(centre, VERTICAL_WEIGHT);

            if let (Some(finish), true) = (finish, dist < radius) {
                let to_finish = self
                    .path_between(i, finish, Traversal::NoShortcuts, Direction::Forward)
                    .map(|path| path.distance);
                if let Some(d) = to_finish {
                    if on_route.is_none_or(|(_, best)| d < best) {
                        on_route = Some((i, d));
                    }
                }
            }

            if on_route.is_some() || dist >= nearest_dist {
                continue;
            }
            if !sight.has_line_of_sight(position, centre) {
                continue;
            }
            nearest = Some(i);
            nearest_dist = dist;
        }

        on_route
            .map(|(i, _)| i)
            .or(nearest)
            .map(|i| self.handle(i))
    }

    // -----------------------------------------------------------------------
    // Index-level helpers
    // -----------------------------------------------------------------------

    /// Whether `src` has a way out and `dst` a way in, in `direction`.
    fn has_route_ends(&self, src: usize, dst: usize, direction: Direction, caller: &str) -> bool {
        if self.nodes[src].edge_count(direction) == 0 {
            log::debug!(
                "{caller}: source waypoint with ID {} has no next waypoint",
                self.nodes[src].id
            );
            return false;
        }
        if self.nodes[dst].edge_count(direction.flipped()) == 0 {
            log::debug!(
                "{caller}: destination waypoint with ID {} has no previous waypoint",
                self.nodes[dst].id
            );
            return false;
        }
        true
    }

    pub(crate) fn path_between(
        &mut self,
        src: usize,
        dst: usize,
        traversal: Traversal,
        direction: Direction,
    ) -> Option<Path> {
        if src == dst {
            return Some(Path::trivial(src));
        }
        if !self.has_route_ends(src, dst, direction, "pathfind") {
            return None;
        }
        let pather = WaypointPather::new(&self.nodes, direction, traversal);
        self.finder.astar_path(&pather, src, dst)
    }
}
