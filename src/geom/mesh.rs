use super::{BBox, Point3};

/// Indexed triangle mesh with optional per-vertex attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeomMesh {
    pub positions: Vec<[f64; 3]>,
    pub indices: Vec<u32>,
    pub normals: Option<Vec<[f64; 3]>>,
    /// Linear RGB in `[0, 1]`.
    pub colors: Option<Vec<[f64; 3]>>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MergeError {
    #[error("no meshes to merge")]
    Empty,
    #[error("mesh {index} has inconsistent attributes: {reason}")]
    AttributeMismatch { index: usize, reason: &'static str },
    #[error("mesh {index} is invalid: {reason}")]
    InvalidMesh { index: usize, reason: String },
    #[error("merged mesh exceeds the u32 index range")]
    IndexOverflow,
}

impl GeomMesh {
    /// Create a new mesh with positions and indices only.
    #[must_use]
    pub fn new(positions: Vec<[f64; 3]>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            indices,
            normals: None,
            colors: None,
        }
    }

    #[must_use]
    pub fn with_attributes(
        positions: Vec<[f64; 3]>,
        indices: Vec<u32>,
        normals: Option<Vec<[f64; 3]>>,
        colors: Option<Vec<[f64; 3]>>,
    ) -> Self {
        Self {
            positions,
            indices,
            normals,
            colors,
        }
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns true if any vertex position contains NaN or Inf values.
    #[must_use]
    pub fn has_invalid_vertices(&self) -> bool {
        self.positions
            .iter()
            .any(|p| !p[0].is_finite() || !p[1].is_finite() || !p[2].is_finite())
    }

    #[must_use]
    pub fn has_valid_indices(&self) -> bool {
        let n = self.positions.len() as u32;
        self.indices.iter().all(|&i| i < n)
    }

    #[must_use]
    pub fn has_triangle_indices(&self) -> bool {
        self.indices.len() % 3 == 0
    }

    /// Returns true if all optional vertex attribute buffers match `positions.len()`.
    #[must_use]
    pub fn has_valid_attribute_lengths(&self) -> bool {
        let n = self.positions.len();
        self.normals.as_ref().is_none_or(|normals| normals.len() == n)
            && self.colors.as_ref().is_none_or(|colors| colors.len() == n)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.has_triangle_indices() {
            return Err("mesh indices are not a triangle list (len % 3 != 0)".to_string());
        }
        if self.has_invalid_vertices() {
            return Err("mesh has invalid vertex coordinates (NaN/Inf)".to_string());
        }
        if !self.has_valid_indices() {
            return Err("mesh has out-of-bounds vertex indices".to_string());
        }
        if !self.has_valid_attribute_lengths() {
            return Err("mesh attribute buffers do not match vertex count".to_string());
        }
        Ok(())
    }

    /// Position buffer as a flat slice: `[x0, y0, z0, x1, y1, z1, ...]`.
    #[must_use]
    pub fn positions_flat(&self) -> &[f64] {
        flatten_f64_array_slice::<3>(&self.positions)
    }

    #[must_use]
    pub fn normals_flat(&self) -> Option<&[f64]> {
        self.normals.as_deref().map(flatten_f64_array_slice::<3>)
    }

    #[must_use]
    pub fn colors_flat(&self) -> Option<&[f64]> {
        self.colors.as_deref().map(flatten_f64_array_slice::<3>)
    }

    /// Positions narrowed to `f32`, the precision WebGL vertex buffers use.
    #[must_use]
    pub fn positions_f32(&self) -> Vec<f32> {
        to_f32(self.positions_flat())
    }

    #[must_use]
    pub fn normals_f32(&self) -> Vec<f32> {
        self.normals_flat().map(to_f32).unwrap_or_default()
    }

    #[must_use]
    pub fn colors_f32(&self) -> Vec<f32> {
        self.colors_flat().map(to_f32).unwrap_or_default()
    }

    #[must_use]
    pub fn bounds(&self) -> Option<BBox> {
        BBox::from_points(self.positions.iter().copied().map(Point3::from_array))
    }

    /// Replaces `normals` with area-weighted smooth normals.
    pub fn recompute_normals(&mut self) {
        self.normals = Some(compute_smooth_normals(&self.positions, &self.indices));
    }
}

fn flatten_f64_array_slice<const N: usize>(data: &[[f64; N]]) -> &[f64] {
    let count = data.len().checked_mul(N).unwrap_or(0);
    let ptr = data.as_ptr().cast::<f64>();
    // SAFETY: `[[f64; N]]` is stored contiguously, and we compute the element count as `len * N`.
    unsafe { std::slice::from_raw_parts(ptr, count) }
}

fn to_f32(values: &[f64]) -> Vec<f32> {
    values.iter().map(|&v| v as f32).collect()
}

/// Area-weighted vertex normals; isolated vertices get `+Z`.
#[must_use]
pub fn compute_smooth_normals(positions: &[[f64; 3]], indices: &[u32]) -> Vec<[f64; 3]> {
    let mut normals = vec![[0.0, 0.0, 0.0]; positions.len()];

    for tri in indices.chunks_exact(3) {
        let i0 = tri[0] as usize;
        let i1 = tri[1] as usize;
        let i2 = tri[2] as usize;

        let (Some(a), Some(b), Some(c)) = (positions.get(i0), positions.get(i1), positions.get(i2)) else {
            continue;
        };

        let ab = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
        let ac = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];

        let n = [
            ab[1] * ac[2] - ab[2] * ac[1],
            ab[2] * ac[0] - ab[0] * ac[2],
            ab[0] * ac[1] - ab[1] * ac[0],
        ];

        for idx in [i0, i1, i2] {
            normals[idx][0] += n[0];
            normals[idx][1] += n[1];
            normals[idx][2] += n[2];
        }
    }

    for n in &mut normals {
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        if len.is_finite() && len > 0.0 {
            let inv = 1.0 / len;
            n[0] *= inv;
            n[1] *= inv;
            n[2] *= inv;
        } else {
            *n = [0.0, 0.0, 1.0];
        }
    }

    normals
}

/// Counts edges used by exactly one triangle.
#[must_use]
pub fn count_open_edges(indices: &[u32]) -> usize {
    use std::collections::HashMap;

    let mut edge_counts: HashMap<(u32, u32), u32> = HashMap::new();

    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0], tri[1], tri[2]);
        if i0 == i1 || i1 == i2 || i0 == i2 {
            continue;
        }
        for (ea, eb) in [(i0, i1), (i1, i2), (i2, i0)] {
            let key = if ea <= eb { (ea, eb) } else { (eb, ea) };
            *edge_counts.entry(key).or_insert(0) += 1;
        }
    }

    edge_counts.values().filter(|&&count| count == 1).count()
}

/// Concatenates meshes into one, re-basing each mesh's indices.
///
/// The inputs are consumed. All meshes must agree on which optional
/// attributes they carry.
pub fn merge_meshes(meshes: Vec<GeomMesh>) -> Result<GeomMesh, MergeError> {
    let Some(first) = meshes.first() else {
        return Err(MergeError::Empty);
    };
    let with_normals = first.normals.is_some();
    let with_colors = first.colors.is_some();

    let mut vertex_total = 0usize;
    let mut index_total = 0usize;
    for (index, mesh) in meshes.iter().enumerate() {
        mesh.validate()
            .map_err(|reason| MergeError::InvalidMesh { index, reason })?;
        if mesh.normals.is_some() != with_normals {
            return Err(MergeError::AttributeMismatch {
                index,
                reason: "normals present on some meshes only",
            });
        }
        if mesh.colors.is_some() != with_colors {
            return Err(MergeError::AttributeMismatch {
                index,
                reason: "colors present on some meshes only",
            });
        }
        vertex_total += mesh.vertex_count();
        index_total += mesh.indices.len();
    }
    if u32::try_from(vertex_total).is_err() {
        return Err(MergeError::IndexOverflow);
    }

    let mut merged = GeomMesh {
        positions: Vec::with_capacity(vertex_total),
        indices: Vec::with_capacity(index_total),
        normals: with_normals.then(|| Vec::with_capacity(vertex_total)),
        colors: with_colors.then(|| Vec::with_capacity(vertex_total)),
    };

    for mesh in meshes {
        let base = merged.positions.len() as u32;
        merged.indices.extend(mesh.indices.iter().map(|&i| i + base));
        merged.positions.extend(mesh.positions);
        if let (Some(dst), Some(src)) = (merged.normals.as_mut(), mesh.normals) {
            dst.extend(src);
        }
        if let (Some(dst), Some(src)) = (merged.colors.as_mut(), mesh.colors) {
            dst.extend(src);
        }
    }

    Ok(merged)
}
