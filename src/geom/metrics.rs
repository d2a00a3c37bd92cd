//! Opt-in timing hooks for the vessel mesh pipeline.
//!
//! Timing is only collected when the `mesh_engine_metrics` feature is enabled
//! and the target is not `wasm32` (`std::time::Instant` is unavailable there).
//! Otherwise every call compiles down to invoking the closure.
//!
//! ```ignore
//! let mut metrics = GeomMetrics::default();
//! metrics.begin();
//! let mesh = metrics.time(TimingBucket::Tube, || tube_along_centerline(&rail, 0.3, options, tol));
//! if let Some(report) = metrics.end() {
//!     println!("tube: {} ns", report.tube_ns);
//! }
//! ```

/// Phases of the vessel mesh build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimingBucket {
    /// Catmull-Rom sampling and arc-length resampling.
    CurveSmoothing,
    /// Frame computation and ring sweep.
    Tube,
    /// Organic surface displacement.
    Displacement,
    /// Per-vertex colour assignment.
    Coloring,
    /// Normal recomputation after displacement.
    Normals,
    /// Batch merging.
    Merge,
}

/// Cumulative nanoseconds per [`TimingBucket`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GeomTimingReport {
    pub curve_smoothing_ns: u64,
    pub tube_ns: u64,
    pub displacement_ns: u64,
    pub coloring_ns: u64,
    pub normals_ns: u64,
    pub merge_ns: u64,
}

impl GeomTimingReport {
    #[must_use]
    pub fn total_ns(&self) -> u64 {
        self.curve_smoothing_ns
            .saturating_add(self.tube_ns)
            .saturating_add(self.displacement_ns)
            .saturating_add(self.coloring_ns)
            .saturating_add(self.normals_ns)
            .saturating_add(self.merge_ns)
    }

    #[must_use]
    pub fn total_ms(&self) -> f64 {
        self.total_ns() as f64 / 1_000_000.0
    }

    /// Adds every bucket of `other` into `self`.
    pub fn accumulate(&mut self, other: &Self) {
        self.curve_smoothing_ns = self.curve_smoothing_ns.saturating_add(other.curve_smoothing_ns);
        self.tube_ns = self.tube_ns.saturating_add(other.tube_ns);
        self.displacement_ns = self.displacement_ns.saturating_add(other.displacement_ns);
        self.coloring_ns = self.coloring_ns.saturating_add(other.coloring_ns);
        self.normals_ns = self.normals_ns.saturating_add(other.normals_ns);
        self.merge_ns = self.merge_ns.saturating_add(other.merge_ns);
    }

    fn bucket_mut(&mut self, bucket: TimingBucket) -> &mut u64 {
        match bucket {
            TimingBucket::CurveSmoothing => &mut self.curve_smoothing_ns,
            TimingBucket::Tube => &mut self.tube_ns,
            TimingBucket::Displacement => &mut self.displacement_ns,
            TimingBucket::Coloring => &mut self.coloring_ns,
            TimingBucket::Normals => &mut self.normals_ns,
            TimingBucket::Merge => &mut self.merge_ns,
        }
    }

    /// Adds `nanos` to a single bucket.
    pub fn add(&mut self, bucket: TimingBucket, nanos: u64) {
        let slot = self.bucket_mut(bucket);
        *slot = slot.saturating_add(nanos);
    }
}

/// Accumulator for timing pipeline phases.
///
/// Call [`begin`](Self::begin) to reset, wrap work in [`time`](Self::time),
/// and read the result with [`end`](Self::end). With metrics disabled, `end`
/// always returns `None`.
#[derive(Debug, Default)]
pub struct GeomMetrics {
    #[cfg(all(feature = "mesh_engine_metrics", not(target_arch = "wasm32")))]
    report: GeomTimingReport,
}

impl GeomMetrics {
    pub fn begin(&mut self) {
        #[cfg(all(feature = "mesh_engine_metrics", not(target_arch = "wasm32")))]
        {
            self.report = GeomTimingReport::default();
        }
    }

    #[must_use]
    pub fn end(&self) -> Option<GeomTimingReport> {
        #[cfg(all(feature = "mesh_engine_metrics", not(target_arch = "wasm32")))]
        {
            Some(self.report.clone())
        }
        #[cfg(not(all(feature = "mesh_engine_metrics", not(target_arch = "wasm32"))))]
        {
            None
        }
    }

    /// Runs `f` and charges its wall time to `bucket`.
    pub fn time<R>(&mut self, bucket: TimingBucket, f: impl FnOnce() -> R) -> R {
        #[cfg(all(feature = "mesh_engine_metrics", not(target_arch = "wasm32")))]
        {
            let start = std::time::Instant::now();
            let result = f();
            // Cap at u64::MAX to prevent overflow
            let nanos = start.elapsed().as_nanos().min(u128::from(u64::MAX)) as u64;
            self.report.add(bucket, nanos);
            result
        }

        #[cfg(not(all(feature = "mesh_engine_metrics", not(target_arch = "wasm32"))))]
        {
            let _ = bucket;
            f()
        }
    }

    /// Folds a report produced elsewhere (e.g. a worker thread) into this one.
    pub fn absorb(&mut self, other: Option<&GeomTimingReport>) {
        #[cfg(all(feature = "mesh_engine_metrics", not(target_arch = "wasm32")))]
        if let Some(other) = other {
            self.report.accumulate(other);
        }
        #[cfg(not(all(feature = "mesh_engine_metrics", not(target_arch = "wasm32"))))]
        {
            let _ = other;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_report_total() {
        let mut report = GeomTimingReport::default();
        report.tube_ns = 1000;
        report.merge_ns = 2000;
        report.add(TimingBucket::Displacement, 3000);
        assert_eq!(report.total_ns(), 6000);
        assert!((report.total_ms() - 0.006).abs() < 1e-9);
    }

    #[test]
    fn test_accumulate_sums_buckets() {
        let mut a = GeomTimingReport {
            coloring_ns: 5,
            ..Default::default()
        };
        let b = GeomTimingReport {
            coloring_ns: 7,
            normals_ns: 1,
            ..Default::default()
        };
        a.accumulate(&b);
        assert_eq!(a.coloring_ns, 12);
        assert_eq!(a.normals_ns, 1);
    }

    #[test]
    fn test_time_returns_closure_result() {
        let mut metrics = GeomMetrics::default();
        metrics.begin();
        let result = metrics.time(TimingBucket::CurveSmoothing, || 42);
        assert_eq!(result, 42);
        let _ = metrics.end();
    }
}
