use waygraph_core::Vec3;

/// Edge weight between two positions: Euclidean distance rounded up.
#[inline]
pub fn edge_cost(a: Vec3, b: Vec3) -> u32 {
    clamp_u32(a.distance(b).ceil())
}

/// A* heuristic between two positions: Euclidean distance rounded down.
///
/// Paired with [`edge_cost`] this never overestimates, and it satisfies the
/// triangle inequality against any single edge.
#[inline]
pub fn estimate(a: Vec3, b: Vec3) -> u32 {
    clamp_u32(a.distance(b).floor())
}

#[inline]
fn clamp_u32(d: f64) -> u32 {
    if d.is_nan() {
        u32::MAX
    } else {
        d.clamp(0.0, u32::MAX as f64) as u32
    }
}
