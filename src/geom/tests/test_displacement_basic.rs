use crate::geom::{
    DisplacementOptions, Point3, Tolerance, TubeOptions, displace_organic, segment_seed,
    tube_along_centerline,
};

fn tube(radius: f64) -> crate::geom::GeomMesh {
    let rail = vec![Point3::new(0.5, 2.0, 0.0), Point3::new(0.6, 4.0, 0.2)];
    tube_along_centerline(&rail, radius, TubeOptions::new(8, 20), Tolerance::default_geom())
        .expect("tube should succeed")
        .0
}

#[test]
fn thin_vessels_are_left_untouched() {
    let mut mesh = tube(0.02);
    let before = mesh.clone();
    let diag = displace_organic(&mut mesh, 0.02, segment_seed(3), DisplacementOptions::default())
        .expect("displacement should succeed");

    assert_eq!(diag.displaced_vertex_count, 0);
    assert_eq!(mesh, before);
}

#[test]
fn displacement_is_bounded_by_radius_ratio() {
    let radius = 0.3;
    let mut mesh = tube(radius);
    let before = mesh.clone();
    let diag = displace_organic(&mut mesh, radius, segment_seed(0), DisplacementOptions::default())
        .expect("displacement should succeed");

    assert_eq!(diag.displaced_vertex_count, mesh.vertex_count());
    assert_eq!(mesh.indices, before.indices);
    assert!(diag.max_displacement_applied <= 0.12 * radius + 1e-12);
    assert!(diag.min_displacement_applied >= -0.12 * radius - 1e-12);

    let mut moved = 0;
    for (a, b) in mesh.positions.iter().zip(before.positions.iter()) {
        let d = ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)).sqrt();
        assert!(d <= 0.12 * radius + 1e-12);
        if d > 0.0 {
            moved += 1;
        }
    }
    assert!(moved > 0);

    // Normals were recomputed from the displaced surface and stay unit length.
    for n in mesh.normals.as_ref().expect("normals") {
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        assert!((len - 1.0).abs() < 1e-9);
    }
}

#[test]
fn seeds_decorrelate_segments() {
    let mut a = tube(0.3);
    let mut b = tube(0.3);
    displace_organic(&mut a, 0.3, segment_seed(0), DisplacementOptions::default()).expect("a");
    displace_organic(&mut b, 0.3, segment_seed(1), DisplacementOptions::default()).expect("b");
    assert_ne!(a.positions, b.positions);
}

#[test]
fn displacement_is_deterministic() {
    let mut a = tube(0.3);
    let mut b = tube(0.3);
    displace_organic(&mut a, 0.3, segment_seed(5), DisplacementOptions::default()).expect("a");
    displace_organic(&mut b, 0.3, segment_seed(5), DisplacementOptions::default()).expect("b");
    assert_eq!(a, b);
}
