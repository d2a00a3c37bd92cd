//! Hand-authored vessel centerlines of a standing adult body.
//!
//! Coordinates are in normalized body units: `x` lateral (0 = midline,
//! `+x` = patient right), `y` vertical (0 = sole, ~16 = top of head), `z`
//! anteroposterior (`+z` anterior). Right-side paired vessels are authored
//! once and mirrored to the left.

mod arterial;
mod capillary;
mod venous;

use serde::Serialize;

use crate::geom::{BBox, Point3, Tolerance, mirror_lateral, polyline_length};

pub use capillary::CAPILLARY_LABEL;

/// Deepest branching tier (capillary networks).
pub const MAX_DEPTH_TIER: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VesselKind {
    Artery,
    Vein,
}

impl VesselKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Artery => "artery",
            Self::Vein => "vein",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnatomyError {
    #[error("segment '{label}' requires at least 2 control points, got {count}")]
    TooFewPoints { label: String, count: usize },
    #[error("segment '{label}' has non-finite control points")]
    NonFinitePoint { label: String },
    #[error("segment '{label}' radius must be finite and > 0, got {radius}")]
    InvalidRadius { label: String, radius: f64 },
    #[error("segment '{label}' centerline has zero length")]
    DegenerateCenterline { label: String },
    #[error("segment '{label}' depth tier {tier} exceeds {MAX_DEPTH_TIER}")]
    InvalidTier { label: String, tier: u8 },
}

/// One vessel centerline with its cross-section and classification.
#[derive(Debug, Clone, PartialEq)]
pub struct VesselSegment {
    control_points: Vec<Point3>,
    radius: f64,
    kind: VesselKind,
    depth_tier: u8,
    label: String,
}

impl VesselSegment {
    pub fn new(
        control_points: Vec<Point3>,
        radius: f64,
        kind: VesselKind,
        depth_tier: u8,
        label: impl Into<String>,
    ) -> Result<Self, AnatomyError> {
        let label = label.into();
        if control_points.len() < 2 {
            return Err(AnatomyError::TooFewPoints {
                label,
                count: control_points.len(),
            });
        }
        if control_points.iter().any(|p| !p.is_finite()) {
            return Err(AnatomyError::NonFinitePoint { label });
        }
        if polyline_length(&control_points) <= Tolerance::default_geom().eps {
            return Err(AnatomyError::DegenerateCenterline { label });
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(AnatomyError::InvalidRadius { label, radius });
        }
        if depth_tier > MAX_DEPTH_TIER {
            return Err(AnatomyError::InvalidTier {
                label,
                tier: depth_tier,
            });
        }
        Ok(Self {
            control_points,
            radius,
            kind,
            depth_tier,
            label,
        })
    }

    #[must_use]
    pub fn control_points(&self) -> &[Point3] {
        &self.control_points
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn kind(&self) -> VesselKind {
        self.kind
    }

    #[must_use]
    pub fn depth_tier(&self) -> u8 {
        self.depth_tier
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The same vessel reflected across the midline under a new label.
    #[must_use]
    pub fn mirrored(&self, label: impl Into<String>) -> Self {
        Self {
            control_points: mirror_lateral(&self.control_points),
            radius: self.radius,
            kind: self.kind,
            depth_tier: self.depth_tier,
            label: label.into(),
        }
    }
}

/// Left-side label for a right-side vessel.
///
/// An explicit label wins; otherwise the first `"R."` becomes `"L."`. Labels
/// without `"R."` are returned unchanged, so both sides share the name.
#[must_use]
pub fn left_label(right_label: &str, explicit: Option<&str>) -> String {
    match explicit {
        Some(label) => label.to_string(),
        None => right_label.replacen("R.", "L.", 1),
    }
}

/// Accumulates authored segments, keeping authoring errors aside.
#[derive(Debug, Default)]
pub(crate) struct SegmentSet {
    segments: Vec<VesselSegment>,
    errors: Vec<AnatomyError>,
}

impl SegmentSet {
    fn add(&mut self, kind: VesselKind, tier: u8, radius: f64, label: &str, points: &[[f64; 3]]) {
        let points = points.iter().copied().map(Point3::from_array).collect();
        match VesselSegment::new(points, radius, kind, tier, label) {
            Ok(segment) => self.segments.push(segment),
            Err(err) => self.errors.push(err),
        }
    }

    fn artery(&mut self, tier: u8, radius: f64, label: &str, points: &[[f64; 3]]) {
        self.add(VesselKind::Artery, tier, radius, label, points);
    }

    fn vein(&mut self, tier: u8, radius: f64, label: &str, points: &[[f64; 3]]) {
        self.add(VesselKind::Vein, tier, radius, label, points);
    }

    /// Adds a right-side segment and its exact mirror on the left.
    fn bilateral(
        &mut self,
        kind: VesselKind,
        tier: u8,
        radius: f64,
        right_label: &str,
        left: Option<&str>,
        points: &[[f64; 3]],
    ) {
        let before = self.segments.len();
        self.add(kind, tier, radius, right_label, points);
        if self.segments.len() > before {
            let right = &self.segments[before];
            let mirrored = right.mirrored(left_label(right_label, left));
            self.segments.push(mirrored);
        }
    }

    fn finish(self) -> Result<AnatomyModel, AnatomyError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(AnatomyModel {
                segments: self.segments,
            }),
        }
    }
}

/// Immutable set of vessel segments.
#[derive(Debug, Clone, PartialEq)]
pub struct AnatomyModel {
    segments: Vec<VesselSegment>,
}

impl AnatomyModel {
    /// The full authored vascular tree: arteries, veins and capillary beds.
    ///
    /// Deterministic and side-effect free. Authoring mistakes are logged and
    /// the offending segment left out; [`AnatomyModel::try_standard`] reports them.
    #[must_use]
    pub fn standard() -> Self {
        let set = Self::authored();
        for err in &set.errors {
            log::error!("vessel dataset rejected a segment: {err}");
        }
        Self {
            segments: set.segments,
        }
    }

    pub fn try_standard() -> Result<Self, AnatomyError> {
        Self::authored().finish()
    }

    fn authored() -> SegmentSet {
        let mut set = SegmentSet::default();
        arterial::author(&mut set);
        venous::author(&mut set);
        capillary::author(&mut set);
        set
    }

    /// Build a model from arbitrary segments (tests, tools).
    #[must_use]
    pub fn from_segments(segments: Vec<VesselSegment>) -> Self {
        Self { segments }
    }

    #[must_use]
    pub fn segments(&self) -> &[VesselSegment] {
        &self.segments
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VesselSegment> {
        self.segments.iter()
    }

    /// First segment carrying `label`.
    #[must_use]
    pub fn find(&self, label: &str) -> Option<&VesselSegment> {
        self.segments.iter().find(|s| s.label == label)
    }

    /// Bounding box of all control points.
    #[must_use]
    pub fn bounds(&self) -> Option<BBox> {
        BBox::from_points(
            self.segments
                .iter()
                .flat_map(|s| s.control_points.iter().copied()),
        )
    }
}

impl<'a> IntoIterator for &'a AnatomyModel {
    type Item = &'a VesselSegment;
    type IntoIter = std::slice::Iter<'a, VesselSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_dataset_is_valid() {
        let model = AnatomyModel::try_standard().expect("authored data should validate");
        assert_eq!(model, AnatomyModel::standard());
        assert!(model.len() > 100);
        for segment in &model {
            assert!(segment.control_points().len() >= 2);
            assert!(segment.radius() > 0.0);
            assert!(segment.depth_tier() <= MAX_DEPTH_TIER);
        }
    }

    #[test]
    fn test_ascending_aorta() {
        let model = AnatomyModel::standard();
        let aorta = model.find("Ascending Aorta").expect("aorta");
        assert_eq!(aorta.control_points().len(), 4);
        assert_eq!(aorta.radius(), 0.32);
        assert_eq!(aorta.kind(), VesselKind::Artery);
        assert_eq!(aorta.depth_tier(), 0);
    }

    #[test]
    fn test_every_right_segment_has_exact_mirror() {
        let model = AnatomyModel::standard();
        let mut pairs = 0;
        for right in model.iter().filter(|s| s.label().starts_with("R. ")) {
            let left_name = left_label(right.label(), None);
            let left = model.find(&left_name).expect("left counterpart");
            assert_eq!(left.control_points(), mirror_lateral(right.control_points()).as_slice());
            assert_eq!(left.radius(), right.radius());
            assert_eq!(left.kind(), right.kind());
            assert_eq!(left.depth_tier(), right.depth_tier());
            pairs += 1;
        }
        assert!(pairs > 20);
    }

    #[test]
    fn test_left_label_fallback() {
        assert_eq!(left_label("R. Radial Artery", None), "L. Radial Artery");
        assert_eq!(left_label("R. Renal Vein", Some("Left Renal Vein")), "Left Renal Vein");
        assert_eq!(left_label("Capillary Network", None), "Capillary Network");
    }

    #[test]
    fn test_segment_validation() {
        let pts = vec![Point3::ORIGIN, Point3::new(0.0, 1.0, 0.0)];
        assert!(matches!(
            VesselSegment::new(vec![Point3::ORIGIN], 0.1, VesselKind::Vein, 1, "x"),
            Err(AnatomyError::TooFewPoints { count: 1, .. })
        ));
        let p = Point3::new(0.3, 4.0, 0.1);
        assert!(matches!(
            VesselSegment::new(vec![p, p, p], 0.1, VesselKind::Vein, 2, "stub"),
            Err(AnatomyError::DegenerateCenterline { label }) if label == "stub"
        ));
        assert!(matches!(
            VesselSegment::new(pts.clone(), 0.0, VesselKind::Vein, 1, "x"),
            Err(AnatomyError::InvalidRadius { .. })
        ));
        assert!(matches!(
            VesselSegment::new(pts.clone(), 0.1, VesselKind::Vein, 5, "x"),
            Err(AnatomyError::InvalidTier { tier: 5, .. })
        ));
        assert!(VesselSegment::new(pts, 0.1, VesselKind::Vein, 4, "x").is_ok());
    }

    #[test]
    fn test_capillaries_are_thin() {
        let model = AnatomyModel::standard();
        let capillaries: Vec<_> = model.iter().filter(|s| s.depth_tier() == 4).collect();
        assert!(!capillaries.is_empty());
        assert!(capillaries.iter().all(|s| s.radius() <= 0.02));
        assert!(capillaries.iter().all(|s| s.label() == CAPILLARY_LABEL));
        assert!(capillaries.iter().any(|s| s.kind() == VesselKind::Artery));
        assert!(capillaries.iter().any(|s| s.kind() == VesselKind::Vein));
    }

    #[test]
    fn test_dataset_fits_body_frame() {
        let bbox = AnatomyModel::standard().bounds().expect("bounds");
        assert!(bbox.min.y >= 0.0 && bbox.max.y <= 16.0);
        assert!(bbox.min.x < -2.0 && bbox.max.x > 2.0);
        assert_eq!(bbox.min.x, -bbox.max.x);
    }
}
