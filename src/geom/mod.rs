mod core;
mod diagnostics;
mod displacement;
mod frame;
mod mesh;
mod metrics;
mod spline;
mod tube;

pub use core::{BBox, Point3, Tolerance, Transform, Vec3};
pub use diagnostics::GeomMeshDiagnostics;
pub use displacement::{
    DisplacementDiagnostics, DisplacementError, DisplacementOptions,
    displace_organic, organic_offset, segment_seed,
};
pub use frame::{RailFrame, compute_rail_frames};
pub use mesh::{GeomMesh, MergeError, compute_smooth_normals, count_open_edges, merge_meshes};
pub use metrics::{GeomMetrics, GeomTimingReport, TimingBucket};
pub use spline::{
    CatmullRomCurve, MIN_SMOOTH_DIVISIONS, MirrorLateral, SmoothError, SmoothedPoints,
    mirror_lateral, smooth_point_count, smooth_points,
};
pub use tube::{
    TubeError, TubeOptions, compute_arc_lengths, polyline_length, resample_by_arc_length,
    tube_along_centerline,
};

#[cfg(test)]
mod tests;
