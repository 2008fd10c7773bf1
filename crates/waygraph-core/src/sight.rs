//! Line-of-sight checks supplied by the simulation layer.

use crate::geom::Vec3;

/// Answers whether two world positions can see each other.
///
/// The graph never inspects level geometry itself; spatial queries that
/// need visibility defer to whatever implements this trait.
pub trait LineOfSight {
    fn has_line_of_sight(&self, from: Vec3, to: Vec3) -> bool;
}

impl<F> LineOfSight for F
where
    F: Fn(Vec3, Vec3) -> bool,
{
    #[inline]
    fn has_line_of_sight(&self, from: Vec3, to: Vec3) -> bool {
        self(from, to)
    }
}

/// A world without obstacles: every position sees every other.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysVisible;

impl LineOfSight for AlwaysVisible {
    #[inline]
    fn has_line_of_sight(&self, _from: Vec3, _to: Vec3) -> bool {
        true
    }
}
