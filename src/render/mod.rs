//! Vessel meshes, batching and scene composition.

mod batch;
mod legend;
mod palette;
mod scene;

pub use batch::{
    BatchKey, BuildError, MaterialParams, MeshBuildOptions, MeshBuilder, RenderBatch, SizeTier,
    VesselBatches, VesselMesh, build_vessel_mesh, radial_segments_for_tier, tube_options_for,
    tubular_segments_for,
};
pub use legend::{EXPORT_FILE_NAME, LegendEntry, export_placeholder, legend};
pub use palette::{ARTERY_PALETTE, VEIN_PALETTE, base_color, brightness_factor, color_mesh, to_hex, vertex_color};
pub use scene::{
    Bloom, CameraRig, IdleSway, Light, OrbitControls, PostProcessing, SceneDescription,
    VascularScene, Vignette, ViewerState, studio_lights,
};
