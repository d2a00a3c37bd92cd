//! Depth-graded vessel colours.

use crate::anatomy::{MAX_DEPTH_TIER, VesselKind};
use crate::geom::GeomMesh;

/// Great vessels to capillaries: deep crimson to pale pink.
pub const ARTERY_PALETTE: [[f64; 3]; 5] = [
    [0.55, 0.02, 0.05],
    [0.75, 0.06, 0.08],
    [0.88, 0.20, 0.22],
    [0.95, 0.45, 0.48],
    [1.00, 0.72, 0.75],
];

/// Great vessels to capillaries: deep navy to pale blue.
pub const VEIN_PALETTE: [[f64; 3]; 5] = [
    [0.04, 0.08, 0.35],
    [0.08, 0.18, 0.55],
    [0.20, 0.35, 0.75],
    [0.45, 0.60, 0.90],
    [0.72, 0.82, 0.98],
];

/// Base colour for a vessel class; tiers past the palette reuse the last entry.
#[must_use]
pub fn base_color(kind: VesselKind, depth_tier: u8) -> [f64; 3] {
    let tier = usize::from(depth_tier.min(MAX_DEPTH_TIER));
    match kind {
        VesselKind::Artery => ARTERY_PALETTE[tier],
        VesselKind::Vein => VEIN_PALETTE[tier],
    }
}

/// Brightness factor `1 + variance · sin(12.9898·v + 78.233·i)`.
#[must_use]
pub fn brightness_factor(vertex_index: usize, segment_index: usize, variance: f64) -> f64 {
    1.0 + variance * (12.9898 * vertex_index as f64 + 78.233 * segment_index as f64).sin()
}

#[must_use]
pub fn vertex_color(base: [f64; 3], vertex_index: usize, segment_index: usize, variance: f64) -> [f64; 3] {
    let k = brightness_factor(vertex_index, segment_index, variance);
    base.map(|c| (c * k).clamp(0.0, 1.0))
}

/// Assigns a colour to every vertex of `mesh`, replacing any existing colours.
pub fn color_mesh(mesh: &mut GeomMesh, kind: VesselKind, depth_tier: u8, segment_index: usize, variance: f64) {
    let base = base_color(kind, depth_tier);
    mesh.colors = Some(
        (0..mesh.vertex_count())
            .map(|v| vertex_color(base, v, segment_index, variance))
            .collect(),
    );
}

/// `#rrggbb` for the legend.
#[must_use]
pub fn to_hex(color: [f64; 3]) -> String {
    let [r, g, b] = color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    format!("#{r:02x}{g:02x}{b:02x}")
}
