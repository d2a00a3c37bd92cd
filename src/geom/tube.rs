//! Open circular tubes swept along a centerline.
//!
//! This module provides:
//! - [`compute_arc_lengths`] / [`resample_by_arc_length`]: uniform spacing of a
//!   dense centerline
//! - [`tube_along_centerline`]: a constant-radius tube with rotation-minimising
//!   frames, no caps and no seam duplication
//!
//! Vertex `r * radial + s` is ring `r`, radial step `s`. Triangles are wound so
//! their normals point away from the centerline.

use super::diagnostics::GeomMeshDiagnostics;
use super::frame::compute_rail_frames;
use super::mesh::GeomMesh;
use super::{Point3, Tolerance};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TubeOptions {
    /// Number of segments around the circular cross-section.
    pub radial_segments: usize,
    /// Number of segments along the centerline; the tube has one more ring.
    pub tubular_segments: usize,
}

impl Default for TubeOptions {
    fn default() -> Self {
        Self {
            radial_segments: 12,
            tubular_segments: 20,
        }
    }
}

impl TubeOptions {
    #[must_use]
    pub const fn new(radial_segments: usize, tubular_segments: usize) -> Self {
        Self {
            radial_segments,
            tubular_segments,
        }
    }

    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        (self.tubular_segments + 1) * self.radial_segments
    }

    #[must_use]
    pub const fn triangle_count(&self) -> usize {
        2 * self.tubular_segments * self.radial_segments
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TubeError {
    #[error("centerline requires at least 2 points")]
    CenterlineTooShort,
    #[error("centerline must have finite points")]
    NonFiniteCenterline,
    #[error("centerline has zero length")]
    DegenerateCenterline,
    #[error("radius must be finite and > 0")]
    InvalidRadius,
    #[error("tube requires at least 3 radial segments")]
    NotEnoughRadialSegments,
    #[error("tube requires at least 1 tubular segment")]
    NotEnoughTubularSegments,
}

/// Cumulative arc length at each point, starting at 0.
#[must_use]
pub fn compute_arc_lengths(points: &[Point3]) -> Vec<f64> {
    let mut arc_lengths = Vec::with_capacity(points.len());
    let mut cumulative = 0.0;
    arc_lengths.push(cumulative);

    for pair in points.windows(2) {
        let segment_length = pair[1].distance_to(pair[0]);
        if segment_length.is_finite() {
            cumulative += segment_length;
        }
        arc_lengths.push(cumulative);
    }

    arc_lengths.truncate(points.len());
    arc_lengths
}

/// Total length of a polyline.
#[must_use]
pub fn polyline_length(points: &[Point3]) -> f64 {
    points.windows(2).map(|pair| pair[1].distance_to(pair[0])).sum()
}

/// Resample a polyline into `segments + 1` points evenly spaced by arc length.
///
/// The first and last points are kept exactly.
pub fn resample_by_arc_length(points: &[Point3], segments: usize, tol: Tolerance) -> Result<Vec<Point3>, TubeError> {
    if points.len() < 2 {
        return Err(TubeError::CenterlineTooShort);
    }
    if points.iter().any(|p| !p.is_finite()) {
        return Err(TubeError::NonFiniteCenterline);
    }
    if segments == 0 {
        return Err(TubeError::NotEnoughTubularSegments);
    }

    let arc_lengths = compute_arc_lengths(points);
    let total = arc_lengths.last().copied().unwrap_or(0.0);
    if total <= tol.eps {
        return Err(TubeError::DegenerateCenterline);
    }

    let mut out = Vec::with_capacity(segments + 1);
    let mut span = 0usize;
    for k in 0..=segments {
        if k == segments {
            out.push(points[points.len() - 1]);
            break;
        }
        let target = total * k as f64 / segments as f64;
        while span + 2 < points.len() && arc_lengths[span + 1] < target {
            span += 1;
        }
        let a = arc_lengths[span];
        let b = arc_lengths[span + 1];
        let u = if b - a > tol.eps { ((target - a) / (b - a)).clamp(0.0, 1.0) } else { 0.0 };
        out.push(points[span].lerp(points[span + 1], u));
    }

    Ok(out)
}

/// Sweep a circle of `radius` along `centerline`.
///
/// The centerline is resampled to `options.tubular_segments + 1` rings by arc
/// length. Output has `(tubular + 1) · radial` vertices, `2 · tubular · radial`
/// triangles and analytic outward normals; colours are left unset.
pub fn tube_along_centerline(
    centerline: &[Point3],
    radius: f64,
    options: TubeOptions,
    tol: Tolerance,
) -> Result<(GeomMesh, GeomMeshDiagnostics), TubeError> {
    if !radius.is_finite() || radius <= tol.eps {
        return Err(TubeError::InvalidRadius);
    }
    if options.radial_segments < 3 {
        return Err(TubeError::NotEnoughRadialSegments);
    }

    let rail = resample_by_arc_length(centerline, options.tubular_segments, tol)?;
    let (frames, warnings) = compute_rail_frames(&rail, tol);

    let radial = options.radial_segments;
    let ring_count = rail.len();
    let mut positions: Vec<[f64; 3]> = Vec::with_capacity(ring_count * radial);
    let mut normals: Vec<[f64; 3]> = Vec::with_capacity(ring_count * radial);

    for (origin, frame) in rail.iter().zip(frames.iter()) {
        for seg in 0..radial {
            let angle = 2.0 * std::f64::consts::PI * seg as f64 / radial as f64;
            let (sin, cos) = angle.sin_cos();
            let dir = frame.normal * cos + frame.binormal * sin;
            positions.push(origin.add_vec(dir * radius).to_array());
            normals.push(dir.to_array());
        }
    }

    let mut indices: Vec<u32> = Vec::with_capacity(options.triangle_count() * 3);
    for r in 0..ring_count - 1 {
        for seg in 0..radial {
            let seg_next = (seg + 1) % radial;

            let i0 = (r * radial + seg) as u32;
            let i1 = (r * radial + seg_next) as u32;
            let i2 = ((r + 1) * radial + seg_next) as u32;
            let i3 = ((r + 1) * radial + seg) as u32;

            indices.extend_from_slice(&[i0, i1, i2]);
            indices.extend_from_slice(&[i0, i2, i3]);
        }
    }

    let mesh = GeomMesh::with_attributes(positions, indices, Some(normals), None);
    let diagnostics = GeomMeshDiagnostics {
        vertex_count: mesh.vertex_count(),
        triangle_count: mesh.triangle_count(),
        // Both end rings are boundaries.
        open_edge_count: 2 * radial,
        warnings,
        ..Default::default()
    };

    Ok((mesh, diagnostics))
}
