//! Vessel meshes and their grouping into render batches.
//!
//! Every segment becomes an open tube: smoothed centerline, arc-length
//! resampling, tier-dependent cross-section, organic displacement and
//! vertex colours. Tubes are then merged into at most six batches keyed by
//! vessel kind and size tier, each with a fixed material.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::anatomy::{AnatomyModel, VesselKind, VesselSegment};
use crate::geom::{
    DisplacementError, DisplacementOptions, GeomMesh, GeomMeshDiagnostics, GeomMetrics,
    Point3, SmoothError, TimingBucket, Tolerance, TubeError, TubeOptions,
    displace_organic, merge_meshes, polyline_length, segment_seed, smooth_points,
    tube_along_centerline,
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::palette::color_mesh;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeTier {
    Major,
    Medium,
    Small,
}

impl SizeTier {
    #[must_use]
    pub const fn from_depth_tier(depth_tier: u8) -> Self {
        match depth_tier {
            0 | 1 => Self::Major,
            2 => Self::Medium,
            _ => Self::Small,
        }
    }
}

/// Render bucket: vessel kind × size tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BatchKey {
    pub kind: VesselKind,
    pub size: SizeTier,
}

impl BatchKey {
    pub const ALL: [Self; 6] = [
        Self::new(VesselKind::Artery, SizeTier::Major),
        Self::new(VesselKind::Artery, SizeTier::Medium),
        Self::new(VesselKind::Artery, SizeTier::Small),
        Self::new(VesselKind::Vein, SizeTier::Major),
        Self::new(VesselKind::Vein, SizeTier::Medium),
        Self::new(VesselKind::Vein, SizeTier::Small),
    ];

    #[must_use]
    pub const fn new(kind: VesselKind, size: SizeTier) -> Self {
        Self { kind, size }
    }

    #[must_use]
    pub fn for_segment(segment: &VesselSegment) -> Self {
        Self::new(segment.kind(), SizeTier::from_depth_tier(segment.depth_tier()))
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match (self.kind, self.size) {
            (VesselKind::Artery, SizeTier::Major) => "arteryMajor",
            (VesselKind::Artery, SizeTier::Medium) => "arteryMedium",
            (VesselKind::Artery, SizeTier::Small) => "arterySmall",
            (VesselKind::Vein, SizeTier::Major) => "veinMajor",
            (VesselKind::Vein, SizeTier::Medium) => "veinMedium",
            (VesselKind::Vein, SizeTier::Small) => "veinSmall",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }
}

impl fmt::Display for BatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for BatchKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Physically based material settings of one batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialParams {
    pub emissive_intensity: f64,
    pub roughness: f64,
    pub opacity: f64,
    pub transmission: f64,
    pub thickness: f64,
    pub clearcoat: f64,
    pub metalness: f64,
}

impl MaterialParams {
    const fn row(
        emissive_intensity: f64,
        roughness: f64,
        opacity: f64,
        transmission: f64,
        thickness: f64,
        clearcoat: f64,
        metalness: f64,
    ) -> Self {
        Self {
            emissive_intensity,
            roughness,
            opacity,
            transmission,
            thickness,
            clearcoat,
            metalness,
        }
    }

    /// Major vessels are the most opaque and reflective, small ones the most
    /// translucent.
    #[must_use]
    pub const fn for_key(key: BatchKey) -> Self {
        match (key.kind, key.size) {
            (VesselKind::Artery, SizeTier::Major) => Self::row(0.25, 0.28, 0.96, 0.05, 0.60, 0.80, 0.10),
            (VesselKind::Artery, SizeTier::Medium) => Self::row(0.30, 0.35, 0.90, 0.12, 0.40, 0.60, 0.05),
            (VesselKind::Artery, SizeTier::Small) => Self::row(0.40, 0.45, 0.72, 0.30, 0.15, 0.30, 0.00),
            (VesselKind::Vein, SizeTier::Major) => Self::row(0.20, 0.32, 0.94, 0.06, 0.60, 0.70, 0.10),
            (VesselKind::Vein, SizeTier::Medium) => Self::row(0.25, 0.38, 0.88, 0.14, 0.40, 0.50, 0.05),
            (VesselKind::Vein, SizeTier::Small) => Self::row(0.35, 0.48, 0.70, 0.32, 0.15, 0.25, 0.00),
        }
    }

    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

/// Tuning of the per-vessel mesh build.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshBuildOptions {
    /// Smoothed points per control-point span.
    pub density: usize,
    /// Lower bound on tubular segments per vessel.
    pub min_tubular_segments: usize,
    /// Tubular segments per unit of centerline length.
    pub segments_per_unit: f64,
    /// Tubular segments per control-point span.
    pub segments_per_span: usize,
    /// Displacement amplitude relative to the radius.
    pub displacement_ratio: f64,
    /// Vessels at or below this radius are not displaced.
    pub displacement_min_radius: f64,
    /// Per-vertex brightness variance.
    pub color_variance: f64,
    pub displace: bool,
    pub tolerance: Tolerance,
}

impl Default for MeshBuildOptions {
    fn default() -> Self {
        Self {
            density: 12,
            min_tubular_segments: 20,
            segments_per_unit: 8.0,
            segments_per_span: 6,
            displacement_ratio: 0.12,
            displacement_min_radius: 0.02,
            color_variance: 0.06,
            displace: true,
            tolerance: Tolerance::default_geom(),
        }
    }
}

impl MeshBuildOptions {
    #[must_use]
    pub const fn density(mut self, density: usize) -> Self {
        self.density = density;
        self
    }

    #[must_use]
    pub const fn min_tubular_segments(mut self, min: usize) -> Self {
        self.min_tubular_segments = min;
        self
    }

    #[must_use]
    pub const fn segments_per_unit(mut self, per_unit: f64) -> Self {
        self.segments_per_unit = per_unit;
        self
    }

    #[must_use]
    pub const fn displacement_ratio(mut self, ratio: f64) -> Self {
        self.displacement_ratio = ratio;
        self
    }

    #[must_use]
    pub const fn displacement_min_radius(mut self, radius: f64) -> Self {
        self.displacement_min_radius = radius;
        self
    }

    #[must_use]
    pub const fn color_variance(mut self, variance: f64) -> Self {
        self.color_variance = variance;
        self
    }

    #[must_use]
    pub const fn displace(mut self, displace: bool) -> Self {
        self.displace = displace;
        self
    }

    #[must_use]
    pub const fn tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn displacement(&self) -> DisplacementOptions {
        DisplacementOptions::default()
            .ratio(self.displacement_ratio)
            .min_radius(self.displacement_min_radius)
    }

    /// Whether a vessel of `radius` will be displaced under these options.
    #[must_use]
    pub fn displaces(&self, radius: f64) -> bool {
        self.displace && self.displacement().applies_to(radius)
    }
}

/// Sides of the tube cross-section for a depth tier.
#[must_use]
pub const fn radial_segments_for_tier(depth_tier: u8) -> usize {
    match depth_tier {
        0 | 1 => 12,
        2 => 8,
        _ => 6,
    }
}

/// Tubular segments for a centerline of `arc_length` through `control_count` points.
#[must_use]
pub fn tubular_segments_for(arc_length: f64, control_count: usize, options: &MeshBuildOptions) -> usize {
    let by_length = if arc_length.is_finite() && arc_length > 0.0 {
        (arc_length * options.segments_per_unit).ceil() as usize
    } else {
        0
    };
    let by_spans = control_count.saturating_sub(1) * options.segments_per_span;
    options.min_tubular_segments.max(by_length).max(by_spans)
}

/// Tube settings for a segment, derived from its smoothed centerline.
#[must_use]
pub fn tube_options_for(segment: &VesselSegment, centerline: &[Point3], options: &MeshBuildOptions) -> TubeOptions {
    TubeOptions::new(
        radial_segments_for_tier(segment.depth_tier()),
        tubular_segments_for(polyline_length(centerline), segment.control_points().len(), options),
    )
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error("segment '{label}': {source}")]
    Smooth {
        label: String,
        #[source]
        source: SmoothError,
    },
    #[error("segment '{label}': {source}")]
    Tube {
        label: String,
        #[source]
        source: TubeError,
    },
    #[error("segment '{label}': {source}")]
    Displacement {
        label: String,
        #[source]
        source: DisplacementError,
    },
}

/// Finished mesh of a single vessel, before batching.
#[derive(Debug, Clone, PartialEq)]
pub struct VesselMesh {
    pub segment_index: usize,
    pub key: BatchKey,
    pub tube: TubeOptions,
    pub mesh: GeomMesh,
    pub diagnostics: GeomMeshDiagnostics,
}

/// Build the coloured, displaced tube of one segment.
///
/// `segment_index` seeds the displacement and colour patterns.
pub fn build_vessel_mesh(
    segment: &VesselSegment,
    segment_index: usize,
    options: &MeshBuildOptions,
) -> Result<VesselMesh, BuildError> {
    let mut metrics = GeomMetrics::default();
    metrics.begin();
    let label = segment.label();

    let centerline: Vec<Point3> = metrics.time(TimingBucket::CurveSmoothing, || {
        smooth_points(segment.control_points(), options.density).map(|points| points.collect::<Vec<_>>())
    })
    .map_err(|source| BuildError::Smooth {
        label: label.to_string(),
        source,
    })?;

    let tube = tube_options_for(segment, &centerline, options);
    let (mut mesh, mut diagnostics) = metrics
        .time(TimingBucket::Tube, || {
            tube_along_centerline(&centerline, segment.radius(), tube, options.tolerance)
        })
        .map_err(|source| BuildError::Tube {
            label: label.to_string(),
            source,
        })?;

    if options.displace {
        let displacement = options.displacement().recompute_normals(false);
        let displaced = metrics
            .time(TimingBucket::Displacement, || {
                displace_organic(&mut mesh, segment.radius(), segment_seed(segment_index), displacement)
            })
            .map_err(|source| BuildError::Displacement {
                label: label.to_string(),
                source,
            })?;
        if displaced.displaced_vertex_count > 0 {
            metrics.time(TimingBucket::Normals, || mesh.recompute_normals());
        }
        diagnostics.displaced_vertex_count = displaced.displaced_vertex_count;
    }

    metrics.time(TimingBucket::Coloring, || {
        color_mesh(
            &mut mesh,
            segment.kind(),
            segment.depth_tier(),
            segment_index,
            options.color_variance,
        );
    });

    diagnostics.segment_count = 1;
    diagnostics.timing = metrics.end();

    Ok(VesselMesh {
        segment_index,
        key: BatchKey::for_segment(segment),
        tube,
        mesh,
        diagnostics,
    })
}

#[cfg(feature = "parallel")]
fn build_vessel_meshes(segments: &[VesselSegment], options: &MeshBuildOptions) -> Result<Vec<VesselMesh>, BuildError> {
    segments
        .par_iter()
        .enumerate()
        .map(|(index, segment)| build_vessel_mesh(segment, index, options))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn build_vessel_meshes(segments: &[VesselSegment], options: &MeshBuildOptions) -> Result<Vec<VesselMesh>, BuildError> {
    segments
        .iter()
        .enumerate()
        .map(|(index, segment)| build_vessel_mesh(segment, index, options))
        .collect()
}

/// One draw call: the merged vessels of a bucket and their material.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderBatch {
    pub key: BatchKey,
    pub mesh: GeomMesh,
    pub material: MaterialParams,
    pub segment_count: usize,
}

impl RenderBatch {
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.key.name()
    }
}

/// The non-empty batches of a build, in [`BatchKey`] order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VesselBatches {
    batches: Vec<RenderBatch>,
    diagnostics: GeomMeshDiagnostics,
}

impl VesselBatches {
    #[must_use]
    pub fn batches(&self) -> &[RenderBatch] {
        &self.batches
    }

    #[must_use]
    pub fn get(&self, key: BatchKey) -> Option<&RenderBatch> {
        self.batches.iter().find(|batch| batch.key == key)
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&RenderBatch> {
        BatchKey::from_name(name).and_then(|key| self.get(key))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RenderBatch> {
        self.batches.iter()
    }

    #[must_use]
    pub fn diagnostics(&self) -> &GeomMeshDiagnostics {
        &self.diagnostics
    }

    #[must_use]
    pub fn total_vertex_count(&self) -> usize {
        self.batches.iter().map(|batch| batch.mesh.vertex_count()).sum()
    }
}

/// Turns an [`AnatomyModel`] into render batches.
#[derive(Debug, Clone, Default)]
pub struct MeshBuilder {
    options: MeshBuildOptions,
}

impl MeshBuilder {
    #[must_use]
    pub fn new(options: MeshBuildOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &MeshBuildOptions {
        &self.options
    }

    /// Build every vessel, then merge them bucket by bucket.
    ///
    /// Identical input gives identical output, with or without `parallel`.
    pub fn build(&self, model: &AnatomyModel) -> Result<VesselBatches, BuildError> {
        let vessels = build_vessel_meshes(model.segments(), &self.options)?;
        log::debug!("built {} vessel tubes", vessels.len());
        Ok(self.batch(vessels))
    }

    /// Merge per-vessel meshes into batches. The vessel meshes are consumed.
    #[must_use]
    pub fn batch(&self, vessels: Vec<VesselMesh>) -> VesselBatches {
        let mut metrics = GeomMetrics::default();
        metrics.begin();
        let mut diagnostics = GeomMeshDiagnostics::new();
        let mut buckets: BTreeMap<BatchKey, Vec<GeomMesh>> = BTreeMap::new();

        for vessel in vessels {
            diagnostics.merge(&vessel.diagnostics);
            metrics.absorb(vessel.diagnostics.timing.as_ref());
            buckets.entry(vessel.key).or_default().push(vessel.mesh);
        }

        let mut batches = Vec::with_capacity(buckets.len());
        for (key, meshes) in buckets {
            let segment_count = meshes.len();
            match metrics.time(TimingBucket::Merge, || merge_meshes(meshes)) {
                Ok(mesh) => {
                    log::debug!(
                        "batch {key}: {segment_count} vessels, {} vertices",
                        mesh.vertex_count()
                    );
                    batches.push(RenderBatch {
                        key,
                        mesh,
                        material: MaterialParams::for_key(key),
                        segment_count,
                    });
                }
                Err(err) => {
                    log::warn!("dropping batch {key}: {err}");
                    diagnostics.skipped_batch_count += 1;
                    diagnostics.add_warning(format!("batch {key} dropped: {err}"));
                }
            }
        }

        diagnostics.timing = metrics.end();
        VesselBatches { batches, diagnostics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(kind: VesselKind, tier: u8, radius: f64) -> VesselSegment {
        VesselSegment::new(
            vec![
                Point3::new(0.3, 2.0, 0.0),
                Point3::new(0.4, 2.5, 0.1),
                Point3::new(0.35, 3.0, 0.05),
            ],
            radius,
            kind,
            tier,
            "test vessel",
        )
        .unwrap()
    }

    #[test]
    fn test_size_tiers() {
        assert_eq!(SizeTier::from_depth_tier(0), SizeTier::Major);
        assert_eq!(SizeTier::from_depth_tier(1), SizeTier::Major);
        assert_eq!(SizeTier::from_depth_tier(2), SizeTier::Medium);
        assert_eq!(SizeTier::from_depth_tier(3), SizeTier::Small);
        assert_eq!(SizeTier::from_depth_tier(4), SizeTier::Small);
    }

    #[test]
    fn test_key_names_are_stable_and_ordered() {
        let names: Vec<&str> = BatchKey::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(
            names,
            ["arteryMajor", "arteryMedium", "arterySmall", "veinMajor", "veinMedium", "veinSmall"]
        );
        let mut sorted = BatchKey::ALL;
        sorted.sort();
        assert_eq!(sorted, BatchKey::ALL);
        for key in BatchKey::ALL {
            assert_eq!(BatchKey::from_name(key.name()), Some(key));
        }
        assert_eq!(BatchKey::from_name("capillary"), None);
    }

    #[test]
    fn test_material_table() {
        let major = MaterialParams::for_key(BatchKey::new(VesselKind::Artery, SizeTier::Major));
        let small = MaterialParams::for_key(BatchKey::new(VesselKind::Artery, SizeTier::Small));
        assert_eq!(major.opacity, 0.96);
        assert_eq!(small.transmission, 0.30);
        for kind in [VesselKind::Artery, VesselKind::Vein] {
            let m = MaterialParams::for_key(BatchKey::new(kind, SizeTier::Major));
            let s = MaterialParams::for_key(BatchKey::new(kind, SizeTier::Small));
            assert!(m.opacity > s.opacity);
            assert!(m.transmission < s.transmission);
            assert!(m.roughness < s.roughness);
        }
    }

    #[test]
    fn test_segment_counts() {
        let options = MeshBuildOptions::default();
        assert_eq!(radial_segments_for_tier(0), 12);
        assert_eq!(radial_segments_for_tier(1), 12);
        assert_eq!(radial_segments_for_tier(2), 8);
        assert_eq!(radial_segments_for_tier(3), 6);
        assert_eq!(radial_segments_for_tier(4), 6);
        assert_eq!(tubular_segments_for(0.5, 2, &options), 20);
        assert_eq!(tubular_segments_for(3.01, 2, &options), 25);
        assert_eq!(tubular_segments_for(0.5, 6, &options), 30);
    }

    #[test]
    fn test_vessel_mesh_counts_follow_tier() {
        let options = MeshBuildOptions::default();
        for (tier, radial) in [(0, 12), (2, 8), (3, 6)] {
            let vessel = build_vessel_mesh(&segment(VesselKind::Vein, tier, 0.1), 0, &options).unwrap();
            assert_eq!(vessel.tube.radial_segments, radial);
            assert_eq!(vessel.tube.tubular_segments, 20);
            assert_eq!(vessel.mesh.vertex_count(), 21 * radial);
            assert_eq!(vessel.mesh.triangle_count(), 40 * radial);
            assert_eq!(vessel.mesh.colors.as_ref().map(Vec::len), Some(21 * radial));
            assert_eq!(vessel.mesh.normals.as_ref().map(Vec::len), Some(21 * radial));
        }
    }

    #[test]
    fn test_thin_vessels_skip_displacement() {
        let options = MeshBuildOptions::default();
        let thin = build_vessel_mesh(&segment(VesselKind::Artery, 4, 0.02), 7, &options).unwrap();
        assert_eq!(thin.diagnostics.displaced_vertex_count, 0);

        let undisplaced = build_vessel_mesh(
            &segment(VesselKind::Artery, 4, 0.02),
            7,
            &options.displace(false),
        )
        .unwrap();
        assert_eq!(thin.mesh.positions, undisplaced.mesh.positions);

        let thick = build_vessel_mesh(&segment(VesselKind::Artery, 1, 0.2), 7, &options).unwrap();
        assert_eq!(thick.diagnostics.displaced_vertex_count, thick.mesh.vertex_count());
    }

    #[test]
    fn test_batching_skips_empty_buckets() {
        let model = AnatomyModel::from_segments(vec![
            segment(VesselKind::Artery, 0, 0.3),
            segment(VesselKind::Artery, 1, 0.2),
            segment(VesselKind::Vein, 3, 0.05),
        ]);
        let batches = MeshBuilder::default().build(&model).unwrap();
        assert_eq!(batches.len(), 2);

        let major = batches.by_name("arteryMajor").unwrap();
        assert_eq!(major.segment_count, 2);
        assert_eq!(major.mesh.vertex_count(), 2 * 21 * 12);
        assert_eq!(batches.by_name("veinSmall").unwrap().segment_count, 1);
        assert!(batches.by_name("veinMajor").is_none());
        assert_eq!(batches.diagnostics().segment_count, 3);
        assert!(batches.diagnostics().is_clean());
    }

    #[test]
    fn test_merge_failure_drops_bucket() {
        let options = MeshBuildOptions::default();
        let good = build_vessel_mesh(&segment(VesselKind::Vein, 2, 0.08), 0, &options).unwrap();
        let mut broken = build_vessel_mesh(&segment(VesselKind::Vein, 2, 0.08), 1, &options).unwrap();
        broken.mesh.colors = None;
        let artery = build_vessel_mesh(&segment(VesselKind::Artery, 2, 0.08), 2, &options).unwrap();

        let batches = MeshBuilder::new(options).batch(vec![good, broken, artery]);
        assert_eq!(batches.len(), 1);
        assert!(batches.by_name("arteryMedium").is_some());
        assert_eq!(batches.diagnostics().skipped_batch_count, 1);
        assert!(batches.diagnostics().warnings.iter().any(|w| w.contains("veinMedium")));
    }
}
