use crate::anatomy::AnatomyModel;
use crate::geom::{
    CatmullRomCurve, MirrorLateral, Point3, Tolerance, mirror_lateral, smooth_point_count,
    smooth_points,
};

fn aorta_like() -> Vec<Point3> {
    vec![
        Point3::new(0.05, 10.9, 0.15),
        Point3::new(0.10, 11.3, 0.20),
        Point3::new(0.12, 11.7, 0.18),
        Point3::new(0.08, 12.0, 0.10),
    ]
}

#[test]
fn smoothed_curve_passes_through_control_points() {
    let pts = aorta_like();
    let density = 12;
    let samples: Vec<Point3> = smooth_points(&pts, density)
        .expect("smoothing should succeed")
        .collect();

    assert_eq!(samples.len(), smooth_point_count(pts.len(), density));
    assert_eq!(samples.len(), 37);
    assert_eq!(samples[0], pts[0]);
    assert_eq!(samples[36], pts[3]);

    let tol = Tolerance::new(1e-9);
    for (k, p) in pts.iter().enumerate() {
        let sample = samples[k * density];
        assert!(tol.approx_eq_point3(sample, *p), "knot {k}: {sample:?} vs {p:?}");
    }
}

#[test]
fn every_dataset_curve_passes_through_its_control_points() {
    let density = 12;
    let tol = Tolerance::new(1e-6);
    for segment in &AnatomyModel::standard() {
        let pts = segment.control_points();
        let samples: Vec<Point3> = smooth_points(pts, density)
            .expect("dataset curves smooth")
            .collect();
        assert_eq!(samples.len(), (pts.len() - 1) * density + 1, "{}", segment.label());
        for (k, p) in pts.iter().enumerate() {
            let sample = samples[k * density];
            assert!(
                tol.approx_eq_point3(sample, *p),
                "{} knot {k}: {sample:?} vs {p:?}",
                segment.label()
            );
        }
    }
}

#[test]
fn curve_point_at_knot_parameters() {
    let pts = aorta_like();
    let curve = CatmullRomCurve::new(&pts).expect("curve");
    let tol = Tolerance::new(1e-9);
    for (k, p) in pts.iter().enumerate() {
        let q = curve.point_at(curve.knot_parameter(k));
        assert!(tol.approx_eq_point3(q, *p), "knot {k}: {q:?}");
    }
}

#[test]
fn smoothing_is_deterministic_and_restartable() {
    let pts = aorta_like();
    let iter = smooth_points(&pts, 7).expect("smoothing");
    let first: Vec<Point3> = iter.clone().collect();
    let second: Vec<Point3> = iter.collect();
    let third: Vec<Point3> = smooth_points(&pts, 7).expect("smoothing").collect();
    assert_eq!(first, second);
    assert_eq!(first, third);
}

#[test]
fn coincident_control_points_stay_finite() {
    let pts = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ];
    let samples: Vec<Point3> = smooth_points(&pts, 4).expect("smoothing").collect();
    assert_eq!(samples.len(), 9);
    assert!(samples.iter().all(|p| p.is_finite()));
}

#[test]
fn mirror_is_an_involution() {
    let pts = aorta_like();
    let mirrored = mirror_lateral(&pts);
    assert_eq!(mirrored.len(), pts.len());
    for (m, p) in mirrored.iter().zip(pts.iter()) {
        assert_eq!(m.x, -p.x);
        assert_eq!(m.y, p.y);
        assert_eq!(m.z, p.z);
    }
    assert_eq!(mirror_lateral(&mirrored), pts);
}

#[test]
fn mirror_commutes_with_smoothing() {
    let pts = vec![
        Point3::new(1.6, 13.1, 0.0),
        Point3::new(2.1, 12.2, 0.1),
        Point3::new(2.4, 11.0, 0.15),
    ];
    let mirrored_input = mirror_lateral(&pts);

    let a: Vec<Point3> = MirrorLateral::new(smooth_points(&pts, 9).expect("smoothing")).collect();
    let b: Vec<Point3> = smooth_points(&mirrored_input, 9).expect("smoothing").collect();

    assert_eq!(a.len(), b.len());
    let tol = Tolerance::new(1e-12);
    for (p, q) in a.iter().zip(b.iter()) {
        assert!(tol.approx_eq_point3(*p, *q));
    }
}
