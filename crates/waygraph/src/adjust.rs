//! Pre-build marker adjustment from risers and anchors.

use waygraph_core::{Anchor, Marker, Riser};

/// What [`adjust_markers`] changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdjustSummary {
    /// Markers whose height was set by a riser.
    pub raised: usize,
    /// Markers whose radius was set by an anchor.
    pub anchored: usize,
}

/// Apply `risers` and `anchors` to `markers` in place. Run this before
/// [`WaypointGraph::build`](crate::WaypointGraph::build).
///
/// A marker takes its height from the first riser that applies to it. Each
/// applicable anchor then sets the marker's radius to its horizontal
/// distance from the anchor, so the last one listed wins.
pub fn adjust_markers(markers: &mut [Marker], risers: &[Riser], anchors: &[Anchor]) -> AdjustSummary {
    let mut summary = AdjustSummary::default();

    for marker in markers.iter_mut() {
        if let Some(riser) = risers.iter().find(|r| r.applies_to(marker)) {
            marker.position = marker.position.with_z(riser.position.z);
            summary.raised += 1;
        }
    }

    for anchor in anchors {
        for marker in markers.iter_mut().filter(|m| anchor.applies_to(m)) {
            marker.radius = marker.position.planar_distance(anchor.position);
            summary.anchored += 1;
        }
    }

    if summary != AdjustSummary::default() {
        log::debug!(
            "Adjusted waypoint markers: {} raised, {} radius changes.",
            summary.raised,
            summary.anchored
        );
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use waygraph_core::Vec3;
    use waygraph_core::marker::DEFAULT_RADIUS;

    fn markers() -> Vec<Marker> {
        vec![
            Marker::new(0, Vec3::new(0.0, 0.0, 0.0)).with_tag(1),
            Marker::new(1, Vec3::new(30.0, 40.0, 5.0)).with_tag(2),
            Marker::new(2, Vec3::new(60.0, 80.0, 0.0)),
        ]
    }

    #[test]
    fn tagged_riser_only_raises_matching_markers() {
        let mut ms = markers();
        let risers = [Riser {
            position: Vec3::new(0.0, 0.0, 128.0),
            tag: Some(2),
        }];
        let summary = adjust_markers(&mut ms, &risers, &[]);
        assert_eq!(summary, AdjustSummary { raised: 1, anchored: 0 });
        assert_eq!(ms[0].position.z, 0.0);
        assert_eq!(ms[1].position.z, 128.0);
        assert_eq!(ms[2].position.z, 0.0);
    }

    #[test]
    fn first_applicable_riser_wins() {
        let mut ms = markers();
        let risers = [
            Riser {
                position: Vec3::new(0.0, 0.0, 64.0),
                tag: Some(1),
            },
            Riser {
                position: Vec3::new(0.0, 0.0, 32.0),
                tag: None,
            },
        ];
        let summary = adjust_markers(&mut ms, &risers, &[]);
        assert_eq!(summary.raised, 3);
        assert_eq!(ms[0].position.z, 64.0);
        assert_eq!(ms[1].position.z, 32.0);
        assert_eq!(ms[2].position.z, 32.0);
    }

    #[test]
    fn anchors_set_planar_radius() {
        let mut ms = markers();
        let anchors = [
            Anchor {
                position: Vec3::new(0.0, 0.0, 900.0),
                tag: 2,
            },
            Anchor {
                position: Vec3::new(0.0, 40.0, 0.0),
                tag: 2,
            },
        ];
        let summary = adjust_markers(&mut ms, &[], &anchors);
        assert_eq!(summary.anchored, 2);
        // The later anchor overrides the earlier one.
        assert_eq!(ms[1].radius, 30.0);
        assert_eq!(ms[0].radius, DEFAULT_RADIUS);
        // Untagged markers carry tag 0 and no anchor here uses it.
        assert_eq!(ms[2].radius, DEFAULT_RADIUS);
    }

    #[test]
    fn nothing_to_apply() {
        let mut ms = markers();
        let before = ms.clone();
        assert_eq!(adjust_markers(&mut ms, &[], &[]), AdjustSummary::default());
        assert_eq!(ms, before);
    }
}
