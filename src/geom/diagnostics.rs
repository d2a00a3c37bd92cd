//! Mesh diagnostics for the vessel pipeline.
//!
//! Every tube build returns a [`GeomMeshDiagnostics`] next to its mesh; the
//! batch builder merges them into one report per build. Vessel tubes are open
//! by construction (no caps), so open edges are expected and reported rather
//! than treated as failures.
//!
//! ```ignore
//! let (mesh, diagnostics) = tube_along_centerline(&rail, 0.3, TubeOptions::default())?;
//! log::debug!("tube built: {}", diagnostics.summary());
//! ```

use std::fmt;

/// Counts and warnings collected while building vessel meshes.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GeomMeshDiagnostics {
    /// Total number of vertices in the produced mesh(es).
    pub vertex_count: usize,

    /// Total number of triangles in the produced mesh(es).
    pub triangle_count: usize,

    /// Boundary edges (one adjacent triangle). An open tube has
    /// `2 * radial_segments` of them.
    pub open_edge_count: usize,

    /// Vertices moved by organic displacement.
    pub displaced_vertex_count: usize,

    /// Number of vessel segments that contributed geometry.
    pub segment_count: usize,

    /// Render buckets dropped because their meshes could not be merged.
    pub skipped_batch_count: usize,

    /// Optional timing breakdown; only populated with `mesh_engine_metrics`
    /// on native targets.
    pub timing: Option<super::metrics::GeomTimingReport>,

    /// Human-readable warnings, e.g. "rail continuity warning: 2 sharp tangent changes".
    pub warnings: Vec<String>,
}

impl GeomMeshDiagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// `true` when nothing was skipped and no warnings were recorded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped_batch_count == 0 && self.warnings.is_empty()
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Merges another diagnostics struct into this one.
    ///
    /// Counts are summed and warnings appended. `timing` from `other` is
    /// ignored; use a parent `GeomMetrics` to time across operations.
    pub fn merge(&mut self, other: &GeomMeshDiagnostics) {
        self.vertex_count += other.vertex_count;
        self.triangle_count += other.triangle_count;
        self.open_edge_count += other.open_edge_count;
        self.displaced_vertex_count += other.displaced_vertex_count;
        self.segment_count += other.segment_count;
        self.skipped_batch_count += other.skipped_batch_count;
        self.warnings.extend(other.warnings.iter().cloned());
    }

    /// Short summary suitable for logging.
    ///
    /// Format: `"V:{vertices} T:{triangles} [details...]"`
    #[must_use]
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("V:{} T:{}", self.vertex_count, self.triangle_count)];

        if self.segment_count > 0 {
            parts.push(format!("segments:{}", self.segment_count));
        }
        if self.open_edge_count > 0 {
            parts.push(format!("open:{}", self.open_edge_count));
        }
        if self.displaced_vertex_count > 0 {
            parts.push(format!("displaced:{}", self.displaced_vertex_count));
        }
        if self.skipped_batch_count > 0 {
            parts.push(format!("skipped:{}", self.skipped_batch_count));
        }
        if !self.warnings.is_empty() {
            parts.push(format!("warnings:{}", self.warnings.len()));
        }

        parts.join(" ")
    }
}

impl fmt::Display for GeomMeshDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mesh Diagnostics:")?;
        writeln!(f, "  Segments: {}", self.segment_count)?;
        writeln!(f, "  Vertices: {}", self.vertex_count)?;
        writeln!(f, "  Triangles: {}", self.triangle_count)?;
        writeln!(f, "  Open edges: {}", self.open_edge_count)?;

        if self.displaced_vertex_count > 0 {
            writeln!(f, "  Displaced vertices: {}", self.displaced_vertex_count)?;
        }
        if self.skipped_batch_count > 0 {
            writeln!(f, "  Skipped batches: {}", self.skipped_batch_count)?;
        }

        if !self.warnings.is_empty() {
            writeln!(f, "  Warnings:")?;
            for warning in &self.warnings {
                writeln!(f, "    - {warning}")?;
            }
        }

        if let Some(ref timing) = self.timing {
            writeln!(f, "  Timing: {} ms total", timing.total_ms())?;
        }

        let status = if self.is_clean() { "CLEAN" } else { "ISSUES DETECTED" };
        writeln!(f, "  Status: {status}")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_clean() {
        let diag = GeomMeshDiagnostics::default();
        assert!(diag.is_clean());
        assert!(!diag.has_warnings());
    }

    #[test]
    fn test_merge() {
        let mut diag1 = GeomMeshDiagnostics {
            vertex_count: 100,
            triangle_count: 50,
            open_edge_count: 24,
            segment_count: 1,
            warnings: vec!["first warning".to_string()],
            ..Default::default()
        };

        let diag2 = GeomMeshDiagnostics {
            vertex_count: 200,
            triangle_count: 100,
            open_edge_count: 12,
            displaced_vertex_count: 200,
            segment_count: 1,
            skipped_batch_count: 1,
            warnings: vec!["second warning".to_string()],
            ..Default::default()
        };

        diag1.merge(&diag2);

        assert_eq!(diag1.vertex_count, 300);
        assert_eq!(diag1.triangle_count, 150);
        assert_eq!(diag1.open_edge_count, 36);
        assert_eq!(diag1.displaced_vertex_count, 200);
        assert_eq!(diag1.segment_count, 2);
        assert_eq!(diag1.skipped_batch_count, 1);
        assert_eq!(diag1.warnings.len(), 2);
        assert!(!diag1.is_clean());
    }

    #[test]
    fn test_summary() {
        let diag = GeomMeshDiagnostics {
            vertex_count: 100,
            triangle_count: 50,
            displaced_vertex_count: 5,
            open_edge_count: 2,
            ..Default::default()
        };

        let summary = diag.summary();
        assert!(summary.starts_with("V:100 T:50"));
        assert!(summary.contains("displaced:5"));
        assert!(summary.contains("open:2"));
        assert!(!summary.contains("skipped"));
    }

    #[test]
    fn test_display() {
        let diag = GeomMeshDiagnostics {
            vertex_count: 100,
            triangle_count: 50,
            skipped_batch_count: 1,
            warnings: vec!["batch veinSmall dropped".to_string()],
            ..Default::default()
        };

        let output = format!("{diag}");
        assert!(output.contains("Vertices: 100"));
        assert!(output.contains("Triangles: 50"));
        assert!(output.contains("Skipped batches: 1"));
        assert!(output.contains("batch veinSmall dropped"));
        assert!(output.contains("ISSUES DETECTED"));
    }
}
