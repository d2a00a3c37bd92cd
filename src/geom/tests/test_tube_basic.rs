use crate::geom::{
    Point3, Tolerance, TubeError, TubeOptions, Vec3, count_open_edges, tube_along_centerline,
};

fn vertical_line() -> Vec<Point3> {
    vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 3.0, 0.0)]
}

#[test]
fn tube_counts_match_options() {
    let tol = Tolerance::default_geom();
    for radial in [12, 8, 6] {
        let options = TubeOptions::new(radial, 20);
        let (mesh, diag) = tube_along_centerline(&vertical_line(), 0.2, options, tol)
            .expect("tube should succeed");

        assert_eq!(mesh.vertex_count(), 21 * radial);
        assert_eq!(mesh.triangle_count(), 40 * radial);
        assert_eq!(diag.vertex_count, mesh.vertex_count());
        assert_eq!(diag.open_edge_count, 2 * radial);
        assert_eq!(count_open_edges(&mesh.indices), 2 * radial);
        mesh.validate().expect("mesh should be valid");
    }
}

#[test]
fn tube_vertices_sit_on_radius() {
    let tol = Tolerance::default_geom();
    let (mesh, _) = tube_along_centerline(&vertical_line(), 0.25, TubeOptions::new(8, 20), tol)
        .expect("tube should succeed");

    for p in &mesh.positions {
        let r = (p[0] * p[0] + p[2] * p[2]).sqrt();
        assert!((r - 0.25).abs() < 1e-9, "{p:?}");
    }
}

#[test]
fn tube_faces_point_outward() {
    let tol = Tolerance::default_geom();
    let (mesh, _) = tube_along_centerline(&vertical_line(), 0.3, TubeOptions::new(12, 20), tol)
        .expect("tube should succeed");

    for tri in mesh.indices.chunks_exact(3) {
        let a = Point3::from_array(mesh.positions[tri[0] as usize]);
        let b = Point3::from_array(mesh.positions[tri[1] as usize]);
        let c = Point3::from_array(mesh.positions[tri[2] as usize]);
        let face_normal = b.sub_point(a).cross(c.sub_point(a));
        let centroid = Vec3::new((a.x + b.x + c.x) / 3.0, 0.0, (a.z + b.z + c.z) / 3.0);
        assert!(face_normal.dot(centroid) > 0.0);
    }

    let normals = mesh.normals.as_ref().expect("normals");
    for (p, n) in mesh.positions.iter().zip(normals.iter()) {
        assert!(p[0] * n[0] + p[2] * n[2] > 0.0);
    }
}

#[test]
fn tube_rejects_bad_input() {
    let tol = Tolerance::default_geom();
    let options = TubeOptions::default();

    assert_eq!(
        tube_along_centerline(&vertical_line(), 0.0, options, tol).unwrap_err(),
        TubeError::InvalidRadius
    );
    assert_eq!(
        tube_along_centerline(&vertical_line(), 0.1, TubeOptions::new(2, 20), tol).unwrap_err(),
        TubeError::NotEnoughRadialSegments
    );
    assert_eq!(
        tube_along_centerline(&[Point3::ORIGIN], 0.1, options, tol).unwrap_err(),
        TubeError::CenterlineTooShort
    );
}

#[test]
fn curved_tube_has_no_warnings() {
    let rail: Vec<Point3> = (0..=30)
        .map(|i| {
            let t = i as f64 / 30.0 * std::f64::consts::PI;
            Point3::new(t.cos(), t.sin(), 0.0)
        })
        .collect();
    let (mesh, diag) = tube_along_centerline(&rail, 0.1, TubeOptions::new(6, 40), Tolerance::default_geom())
        .expect("tube should succeed");
    assert!(diag.warnings.is_empty(), "{:?}", diag.warnings);
    assert!(!mesh.has_invalid_vertices());
}
