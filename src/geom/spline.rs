//! Centerline smoothing for authored vessel curves.
//!
//! This module provides:
//! - [`CatmullRomCurve`]: a centripetal Catmull-Rom spline through a list of
//!   control points
//! - [`smooth_points`]: a lazy, deterministic dense sampling of that spline
//! - [`mirror_lateral`] / [`MirrorLateral`]: reflection across the body midline,
//!   used to derive left-side anatomy from right-side curves
//!
//! The centripetal parametrization (alpha = 0.5) keeps the curve from forming
//! cusps or loops between unevenly spaced control points.

use super::Point3;

/// Lower bound on the number of divisions produced by [`smooth_points`].
pub const MIN_SMOOTH_DIVISIONS: usize = 8;

/// Knot spacings below this value are treated as coincident points.
const MIN_KNOT_SPACING: f64 = 1e-4;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SmoothError {
    #[error("curve requires at least 2 control points, got {0}")]
    TooFewPoints(usize),
    #[error("control points must be finite")]
    NonFinitePoint,
    #[error("density must be at least 1")]
    ZeroDensity,
}

/// Centripetal Catmull-Rom spline over borrowed control points.
///
/// The curve is parametrized over `[0, 1]`; control point `k` of `n` sits at
/// `t = k / (n - 1)`. Open ends use a phantom point reflected through the end
/// control point.
#[derive(Debug, Clone, Copy)]
pub struct CatmullRomCurve<'a> {
    points: &'a [Point3],
}

impl<'a> CatmullRomCurve<'a> {
    pub fn new(points: &'a [Point3]) -> Result<Self, SmoothError> {
        if points.len() < 2 {
            return Err(SmoothError::TooFewPoints(points.len()));
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(SmoothError::NonFinitePoint);
        }
        Ok(Self { points })
    }

    #[must_use]
    pub fn control_points(&self) -> &'a [Point3] {
        self.points
    }

    #[must_use]
    pub fn span_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Evaluate the curve at `t` (clamped to `[0, 1]`).
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3 {
        let spans = self.span_count();
        let scaled = t.clamp(0.0, 1.0) * spans as f64;
        let mut span = scaled.floor() as usize;
        let mut weight = scaled - span as f64;
        if span >= spans {
            span = spans - 1;
            weight = 1.0;
        }
        self.eval_span(span, weight)
    }

    /// Curve parameter at which control point `k` is interpolated.
    #[must_use]
    pub fn knot_parameter(&self, k: usize) -> f64 {
        k as f64 / self.span_count() as f64
    }

    fn eval_span(&self, span: usize, u: f64) -> Point3 {
        let pts = self.points;
        let n = pts.len();

        let p1 = pts[span];
        let p2 = pts[span + 1];
        let p0 = if span > 0 {
            pts[span - 1]
        } else {
            reflect(pts[0], pts[1])
        };
        let p3 = if span + 2 < n {
            pts[span + 2]
        } else {
            reflect(pts[n - 1], pts[n - 2])
        };

        let mut dt1 = knot_spacing(p1, p2);
        if dt1 < MIN_KNOT_SPACING {
            dt1 = 1.0;
        }
        let mut dt0 = knot_spacing(p0, p1);
        if dt0 < MIN_KNOT_SPACING {
            dt0 = dt1;
        }
        let mut dt2 = knot_spacing(p2, p3);
        if dt2 < MIN_KNOT_SPACING {
            dt2 = dt1;
        }

        let v0 = p0.to_vec3();
        let v1 = p1.to_vec3();
        let v2 = p2.to_vec3();
        let v3 = p3.to_vec3();

        // Hermite tangents of the non-uniform spline, rescaled to the span [0, 1].
        let m1 = ((v1 - v0) / dt0 - (v2 - v0) / (dt0 + dt1) + (v2 - v1) / dt1) * dt1;
        let m2 = ((v2 - v1) / dt1 - (v3 - v1) / (dt1 + dt2) + (v3 - v2) / dt2) * dt1;

        let c2 = v1 * -3.0 + v2 * 3.0 - m1 * 2.0 - m2;
        let c3 = v1 * 2.0 - v2 * 2.0 + m1 + m2;

        let u2 = u * u;
        let u3 = u2 * u;
        let v = v1 + m1 * u + c2 * u2 + c3 * u3;
        Point3::new(v.x, v.y, v.z)
    }
}

fn reflect(end: Point3, neighbor: Point3) -> Point3 {
    end.add_vec(end.sub_point(neighbor))
}

/// Centripetal knot spacing: `|b - a|^0.5`.
fn knot_spacing(a: Point3, b: Point3) -> f64 {
    b.sub_point(a).length_squared().powf(0.25)
}

/// Number of points [`smooth_points`] yields for `control_count` inputs.
#[must_use]
pub fn smooth_point_count(control_count: usize, density: usize) -> usize {
    smooth_divisions(control_count, density) + 1
}

fn smooth_divisions(control_count: usize, density: usize) -> usize {
    control_count
        .saturating_sub(1)
        .saturating_mul(density)
        .max(MIN_SMOOTH_DIVISIONS)
}

/// Lazily sample a smooth curve through `points`.
///
/// Yields `max(8, (n - 1) * density) + 1` points at uniform curve parameter,
/// starting at the first and ending at the last control point. The iterator is
/// finite and deterministic; clone it to walk the sequence again.
///
/// # Errors
/// Fails for fewer than two points, non-finite points, or a zero density.
pub fn smooth_points(points: &[Point3], density: usize) -> Result<SmoothedPoints<'_>, SmoothError> {
    if density == 0 {
        return Err(SmoothError::ZeroDensity);
    }
    let curve = CatmullRomCurve::new(points)?;
    Ok(SmoothedPoints {
        curve,
        divisions: smooth_divisions(points.len(), density),
        next: 0,
    })
}

/// Iterator returned by [`smooth_points`].
#[derive(Debug, Clone)]
pub struct SmoothedPoints<'a> {
    curve: CatmullRomCurve<'a>,
    divisions: usize,
    next: usize,
}

impl SmoothedPoints<'_> {
    #[must_use]
    pub fn divisions(&self) -> usize {
        self.divisions
    }
}

impl Iterator for SmoothedPoints<'_> {
    type Item = Point3;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.divisions {
            return None;
        }
        let i = self.next;
        self.next += 1;

        // Exact end points, independent of floating-point drift in `t`.
        let pts = self.curve.control_points();
        if i == 0 {
            return pts.first().copied();
        }
        if i == self.divisions {
            return pts.last().copied();
        }
        Some(self.curve.point_at(i as f64 / self.divisions as f64))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.divisions + 1).saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SmoothedPoints<'_> {}

impl std::iter::FusedIterator for SmoothedPoints<'_> {}

/// Mirror a point sequence across the body midline (`x -> -x`).
#[must_use]
pub fn mirror_lateral(points: &[Point3]) -> Vec<Point3> {
    MirrorLateral::new(points.iter().copied()).collect()
}

/// Iterator adaptor applying [`Point3::mirror_lateral`] to each item.
#[derive(Debug, Clone)]
pub struct MirrorLateral<I> {
    inner: I,
}

impl<I> MirrorLateral<I>
where
    I: Iterator<Item = Point3>,
{
    pub fn new(inner: I) -> Self {
        Self { inner }
    }
}

impl<I> Iterator for MirrorLateral<I>
where
    I: Iterator<Item = Point3>,
{
    type Item = Point3;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Point3::mirror_lateral)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I> ExactSizeIterator for MirrorLateral<I> where I: ExactSizeIterator<Item = Point3> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_count_formula() {
        assert_eq!(smooth_point_count(2, 1), 9);
        assert_eq!(smooth_point_count(2, 12), 13);
        assert_eq!(smooth_point_count(4, 12), 37);
        assert_eq!(smooth_point_count(3, 3), 9);
    }

    #[test]
    fn test_two_point_curve_is_straight() {
        let pts = [Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 4.0, 0.0)];
        let samples: Vec<Point3> = smooth_points(&pts, 1).unwrap().collect();
        assert_eq!(samples.len(), 9);
        for (i, p) in samples.iter().enumerate() {
            assert!(p.x.abs() < 1e-12);
            assert!(p.z.abs() < 1e-12);
            assert!((p.y - i as f64 * 0.5).abs() < 1e-9, "sample {i}: {p:?}");
        }
    }

    #[test]
    fn test_rejects_degenerate_input() {
        let one = [Point3::ORIGIN];
        assert_eq!(
            smooth_points(&one, 4).unwrap_err(),
            SmoothError::TooFewPoints(1)
        );
        let pts = [Point3::ORIGIN, Point3::new(1.0, 0.0, 0.0)];
        assert_eq!(smooth_points(&pts, 0).unwrap_err(), SmoothError::ZeroDensity);
        let bad = [Point3::ORIGIN, Point3::new(f64::NAN, 0.0, 0.0)];
        assert_eq!(smooth_points(&bad, 2).unwrap_err(), SmoothError::NonFinitePoint);
    }

    #[test]
    fn test_size_hint_tracks_progress() {
        let pts = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        let mut iter = smooth_points(&pts, 5).unwrap();
        assert_eq!(iter.len(), 11);
        iter.next();
        iter.next();
        assert_eq!(iter.len(), 9);
        assert_eq!(iter.by_ref().count(), 9);
        assert!(iter.next().is_none());
    }
}
