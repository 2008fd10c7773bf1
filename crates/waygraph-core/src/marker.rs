//! Placement markers as handed over by the map loader.
//!
//! A [`Marker`] is one waypoint thing placed in a map: where it is, how big
//! its influence volume is, which marker id comes after it and a handful of
//! routing flags. [`Riser`] and [`Anchor`] are helper things that adjust
//! markers before the graph is built.

use crate::geom::Vec3;

/// Radius given to markers that do not specify one.
pub const DEFAULT_RADIUS: f64 = 384.0;

/// A waypoint marker placed in the map.
///
/// Several markers may share an `id`; a marker whose `next_id` names such
/// an id gets an edge to every one of them. A `next_id` equal to the
/// marker's own `id` means "no next marker".
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Marker {
    pub position: Vec3,
    pub radius: f64,
    pub id: u32,
    pub next_id: Option<u32>,
    pub enabled: bool,
    pub shortcut: bool,
    pub finish_line: bool,
    pub spawn_point: bool,
    /// Matches the marker with risers and anchors carrying the same tag.
    pub tag: u16,
}

impl Default for Marker {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            radius: DEFAULT_RADIUS,
            id: 0,
            next_id: None,
            enabled: true,
            shortcut: false,
            finish_line: false,
            spawn_point: false,
            tag: 0,
        }
    }
}

impl Marker {
    /// Create an enabled marker with no successor.
    pub fn new(id: u32, position: Vec3) -> Self {
        Self {
            id,
            position,
            ..Self::default()
        }
    }

    /// Set the id of the marker(s) that follow this one.
    pub fn with_next(mut self, next_id: u32) -> Self {
        self.next_id = Some(next_id);
        self
    }

    /// Set the influence radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Set the riser/anchor tag.
    pub fn with_tag(mut self, tag: u16) -> Self {
        self.tag = tag;
        self
    }

    /// Mark as a finish-line marker.
    pub fn finish_line(mut self) -> Self {
        self.finish_line = true;
        self
    }

    /// Mark as a shortcut marker.
    pub fn shortcut(mut self) -> Self {
        self.shortcut = true;
        self
    }

    /// Mark as a spawn point.
    pub fn spawn_point(mut self) -> Self {
        self.spawn_point = true;
        self
    }

    /// Mark as disabled.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// The successor id, or `None` when absent or pointing at itself.
    #[inline]
    pub fn successor(&self) -> Option<u32> {
        self.next_id.filter(|&next| next != self.id)
    }
}

/// Sets the height of waypoint markers.
///
/// An untagged riser applies to every marker; a tagged one only to markers
/// with the same tag.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Riser {
    pub position: Vec3,
    pub tag: Option<u16>,
}

impl Riser {
    /// Whether this riser adjusts `marker`.
    #[inline]
    pub fn applies_to(&self, marker: &Marker) -> bool {
        self.tag.is_none_or(|tag| tag == marker.tag)
    }
}

/// Sets the radius of waypoint markers with the same tag to their
/// horizontal distance from the anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Anchor {
    pub position: Vec3,
    pub tag: u16,
}

impl Anchor {
    /// Whether this anchor adjusts `marker`.
    #[inline]
    pub fn applies_to(&self, marker: &Marker) -> bool {
        self.tag == marker.tag
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn marker_fields_default_when_missing() {
        let json = r#"{"position":{"x":0.0,"y":64.0,"z":0.0},"id":2,"next_id":3}"#;
        let m: Marker = serde_json::from_str(json).unwrap();
        assert_eq!(m.id, 2);
        assert_eq!(m.next_id, Some(3));
        assert!(m.enabled);
        assert!(!m.finish_line);
        assert_eq!(m.radius, DEFAULT_RADIUS);
    }
}
