//! Rotation-minimising frames along a polyline.

use super::{Point3, Tolerance, Vec3};

/// Threshold for detecting sharp tangent changes in the rail.
/// A dot product below this value (~75° turn) counts as cusp-like.
const CUSP_DOT_THRESHOLD: f64 = 0.25;

/// Orthonormal frame attached to a point of a curve.
///
/// `binormal = tangent × normal`, so a ring offset `normal·cos θ + binormal·sin θ`
/// winds counter-clockwise when looking down the tangent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RailFrame {
    pub tangent: Vec3,
    pub normal: Vec3,
    pub binormal: Vec3,
}

impl RailFrame {
    /// Frame from a tangent alone, using world X as reference unless the
    /// tangent is nearly parallel to it.
    #[must_use]
    pub fn from_tangent(tangent: Vec3) -> Option<Self> {
        let tangent = tangent.normalized()?;
        let reference = if tangent.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
        let normal = tangent.cross(reference).normalized()?;
        let binormal = tangent.cross(normal).normalized()?;
        Some(Self {
            tangent,
            normal,
            binormal,
        })
    }

    /// Default frame for a rail running along `+Z`.
    #[must_use]
    pub const fn z_up() -> Self {
        // Same frame `from_tangent(Vec3::Z)` yields.
        Self {
            tangent: Vec3::Z,
            normal: Vec3::new(0.0, 1.0, 0.0),
            binormal: Vec3::new(-1.0, 0.0, 0.0),
        }
    }
}

/// One frame per rail point, carried along by parallel transport.
///
/// Returns the frames and any warnings about degenerate or sharply turning
/// segments. The rail must contain at least 2 points to get meaningful output.
#[must_use]
pub fn compute_rail_frames(rail: &[Point3], tol: Tolerance) -> (Vec<RailFrame>, Vec<String>) {
    let mut warnings = Vec::new();

    if rail.len() < 2 {
        return (
            vec![RailFrame::z_up(); rail.len()],
            vec!["rail too short; using default frame".to_string()],
        );
    }

    let mut frames = Vec::with_capacity(rail.len());

    let first_frame = match RailFrame::from_tangent(rail[1].sub_point(rail[0])) {
        Some(f) => f,
        None => {
            warnings.push("rail has degenerate initial tangent; using default frame".to_string());
            RailFrame::z_up()
        }
    };
    frames.push(first_frame);

    let mut cusp_like = 0usize;

    for i in 1..rail.len() {
        let prev_idx = i - 1;

        let tangent = if i < rail.len() - 1 {
            let forward = rail[i + 1].sub_point(rail[i]);
            let backward = rail[i].sub_point(rail[prev_idx]);
            forward + backward
        } else {
            rail[i].sub_point(rail[prev_idx])
        };

        let tangent = match tangent.normalized() {
            Some(t) => t,
            None => {
                warnings.push("rail has degenerate segment; reusing previous tangent".to_string());
                frames[prev_idx].tangent
            }
        };

        if frames[prev_idx].tangent.dot(tangent) < CUSP_DOT_THRESHOLD {
            cusp_like += 1;
        }

        let new_frame = parallel_transport_frame(&frames[prev_idx], tangent, tol);
        frames.push(new_frame);
    }

    if cusp_like > 0 {
        warnings.push(format!(
            "rail continuity warning: {cusp_like} sharp tangent changes"
        ));
    }

    (frames, warnings)
}

fn parallel_transport_frame(prev_frame: &RailFrame, new_tangent: Vec3, tol: Tolerance) -> RailFrame {
    let old_tangent = prev_frame.tangent;
    let cross = old_tangent.cross(new_tangent);

    if cross.length_squared() < tol.eps_squared() {
        let flip = if old_tangent.dot(new_tangent) < 0.0 { -1.0 } else { 1.0 };
        return RailFrame {
            tangent: new_tangent,
            normal: prev_frame.normal * flip,
            binormal: prev_frame.binormal * flip,
        };
    }

    let axis = cross.normalized().unwrap_or(Vec3::Z);
    let angle = old_tangent.dot(new_tangent).clamp(-1.0, 1.0).acos();

    let rotated = rotate_vector(prev_frame.normal, axis, angle);
    // Re-orthogonalise against the new tangent to stop drift over long rails.
    let normal = (rotated - new_tangent * rotated.dot(new_tangent))
        .normalized()
        .unwrap_or(prev_frame.normal);
    let binormal = new_tangent
        .cross(normal)
        .normalized()
        .unwrap_or(prev_frame.binormal);

    RailFrame {
        tangent: new_tangent,
        normal,
        binormal,
    }
}

/// Rodrigues rotation of `v` about the unit `axis`.
fn rotate_vector(v: Vec3, axis: Vec3, angle: f64) -> Vec3 {
    let (sin_angle, cos_angle) = angle.sin_cos();
    v * cos_angle + axis.cross(v) * sin_angle + axis * (axis.dot(v) * (1.0 - cos_angle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_orthonormal(frame: &RailFrame) {
        assert!((frame.tangent.length() - 1.0).abs() < 1e-9);
        assert!((frame.normal.length() - 1.0).abs() < 1e-9);
        assert!((frame.binormal.length() - 1.0).abs() < 1e-9);
        assert!(frame.tangent.dot(frame.normal).abs() < 1e-9);
        assert!(frame.tangent.dot(frame.binormal).abs() < 1e-9);
        assert!(frame.normal.dot(frame.binormal).abs() < 1e-9);
    }

    #[test]
    fn test_from_tangent_is_orthonormal() {
        for t in [Vec3::X, Vec3::Y, Vec3::Z, Vec3::new(1.0, 2.0, -3.0)] {
            let frame = RailFrame::from_tangent(t).unwrap();
            assert_orthonormal(&frame);
            let expected = frame.tangent.cross(frame.normal);
            assert!((expected - frame.binormal).length() < 1e-9);
        }
        assert!(RailFrame::from_tangent(Vec3::ZERO).is_none());
    }

    #[test]
    fn test_straight_rail_keeps_frame() {
        let rail: Vec<Point3> = (0..5).map(|i| Point3::new(0.0, i as f64, 0.0)).collect();
        let (frames, warnings) = compute_rail_frames(&rail, Tolerance::default_geom());
        assert!(warnings.is_empty());
        assert_eq!(frames.len(), 5);
        for frame in &frames {
            assert!((frame.normal - frames[0].normal).length() < 1e-12);
        }
    }

    #[test]
    fn test_bent_rail_stays_orthonormal() {
        let rail: Vec<Point3> = (0..=16)
            .map(|i| {
                let a = i as f64 / 16.0 * std::f64::consts::FRAC_PI_2;
                Point3::new(a.cos(), a.sin(), 0.1 * i as f64)
            })
            .collect();
        let (frames, warnings) = compute_rail_frames(&rail, Tolerance::default_geom());
        assert!(warnings.is_empty(), "{warnings:?}");
        frames.iter().for_each(assert_orthonormal);
    }
}
