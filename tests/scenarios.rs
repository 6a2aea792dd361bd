//! End-to-end scenarios over the public surface: literal inputs, literal
//! expectations, and the structural invariants after every step.

use approx::assert_relative_eq;
use cdt2d::prelude::*;

fn unit_square() -> Mesh {
    Mesh::from_polygon(&[
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(0.0, 1.0),
    ])
    .unwrap()
}

fn euler(mesh: &Mesh) -> i64 {
    mesh.number_of_vertices() as i64 - mesh.number_of_edges() as i64
        + mesh.number_of_triangles() as i64
}

fn covered_area(mesh: &Mesh) -> f64 {
    mesh.triangles().values().map(Triangle::area).sum()
}

#[test]
fn unit_square_without_interior_points() {
    let mesh = unit_square();

    assert_eq!(mesh.number_of_vertices(), 4);
    assert_eq!(mesh.number_of_edges(), 5);
    assert_eq!(mesh.number_of_triangles(), 2);

    // The two triangles share a diagonal of length √2.
    let diagonal = mesh
        .edges()
        .iter()
        .find(|(_, e)| !e.is_boundary())
        .map(|(k, _)| k)
        .expect("one interior edge");
    let [a, b] = mesh.edge(diagonal).unwrap().vertices();
    let length = mesh
        .vertex(a)
        .unwrap()
        .point()
        .distance(mesh.vertex(b).unwrap().point());
    assert_relative_eq!(length, 2.0_f64.sqrt(), epsilon = 1e-9);

    let (delaunay, offenders) = mesh.is_delaunay();
    assert!(delaunay, "offenders: {offenders:?}");
    assert!(mesh.is_valid().is_ok());
    assert_relative_eq!(covered_area(&mesh), 1.0, epsilon = 1e-9);
    assert_eq!(euler(&mesh), 1);
}

#[test]
fn unit_square_with_centroid() {
    let mut mesh = unit_square();
    mesh.add_interior_point(Point::new(0.5, 0.5)).unwrap();

    assert_eq!(mesh.number_of_vertices(), 5);
    assert_eq!(mesh.number_of_edges(), 8);
    assert_eq!(mesh.number_of_triangles(), 4);
    for tri in mesh.triangles().values() {
        assert_relative_eq!(tri.area(), 0.25, epsilon = 1e-9);
    }

    // The bootstrap diagonal is gone: every interior edge now ends at the
    // centroid.
    let centroid = mesh.find_vertex(Point::new(0.5, 0.5)).unwrap();
    for (_, edge) in mesh.edges().iter().filter(|(_, e)| !e.is_boundary()) {
        assert!(edge.has_vertex(centroid));
    }

    let (delaunay, offenders) = mesh.is_delaunay();
    assert!(delaunay, "offenders: {offenders:?}");
    assert!(mesh.is_valid().is_ok());
    assert_eq!(euler(&mesh), 1);
}

#[test]
fn pentagon_bootstrap() {
    let mesh = Mesh::from_polygon(&[
        Point::new(0.0, 0.0),
        Point::new(2.0, 0.0),
        Point::new(3.0, 1.0),
        Point::new(1.0, 2.0),
        Point::new(-1.0, 1.0),
    ])
    .unwrap();

    assert_eq!(mesh.number_of_triangles(), 3);
    assert_eq!(euler(&mesh), 1);
    let (delaunay, offenders) = mesh.is_delaunay();
    assert!(delaunay, "offenders: {offenders:?}");
    assert!(mesh.is_valid().is_ok());
    // Coverage: triangles tile exactly the pentagon (shoelace area 5).
    assert_relative_eq!(covered_area(&mesh), 5.0, epsilon = 1e-9);
}

#[test]
fn collinear_perimeter_is_rejected_as_degenerate() {
    let result = Mesh::from_polygon(&[
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(2.0, 0.0),
    ]);
    assert!(matches!(result, Err(TriangulationError::Degenerate { .. })));
}

#[test]
fn duplicate_insertion_is_idempotent() {
    let mut mesh = unit_square();
    let first = mesh.add_interior_point(Point::new(0.5, 0.5)).unwrap();
    let snapshot = (
        mesh.number_of_vertices(),
        mesh.number_of_edges(),
        mesh.number_of_triangles(),
    );

    let second = mesh.add_interior_point(Point::new(0.5, 0.5)).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        (
            mesh.number_of_vertices(),
            mesh.number_of_edges(),
            mesh.number_of_triangles(),
        ),
        snapshot
    );
    assert!(mesh.is_valid().is_ok());
}

#[test]
fn forced_edge_through_the_centroid() {
    let mut mesh = unit_square();
    mesh.add_interior_point(Point::new(0.5, 0.5)).unwrap();

    let chain = mesh
        .cut_edge(Point::new(0.0, 0.0), Point::new(1.0, 1.0))
        .unwrap();

    // Two collinear edges meeting at the centroid.
    assert_eq!(chain.len(), 2);
    let centroid = mesh.find_vertex(Point::new(0.5, 0.5)).unwrap();
    for &e in &chain {
        let edge = mesh.edge(e).unwrap();
        assert!(edge.is_constrained());
        assert!(edge.has_vertex(centroid));
        let [u, w] = edge.vertices();
        for v in [u, w] {
            let p = mesh.vertex(v).unwrap().point();
            // Every chain endpoint lies on the cut segment.
            assert_relative_eq!(p.x, p.y, epsilon = 1e-9);
        }
    }
    assert!(mesh.is_valid().is_ok());
    assert_eq!(euler(&mesh), 1);
}

#[test]
fn perimeter_stream_matches_batch_bootstrap() {
    let points = [
        Point::new(0.0, 0.0),
        Point::new(2.0, 0.0),
        Point::new(3.0, 1.0),
        Point::new(1.0, 2.0),
        Point::new(-1.0, 1.0),
    ];

    let mut streamed = Mesh::new();
    for &p in &points {
        streamed.add_perimeter_point(p).unwrap();
    }

    assert_eq!(streamed.number_of_vertices(), 5);
    assert_eq!(streamed.perimeter().len(), 5);
    assert!(streamed.is_valid().is_ok());
    let (delaunay, offenders) = streamed.is_delaunay();
    assert!(delaunay, "offenders: {offenders:?}");
    // The stream covers the convex hull of the points, which for this
    // convex pentagon equals the polygon itself.
    assert_relative_eq!(covered_area(&streamed), 5.0, epsilon = 1e-9);
    assert_eq!(euler(&streamed), 1);
}

#[test]
fn refinement_keeps_invariants_through_many_inserts() {
    let mut mesh = Mesh::from_polygon(&[
        Point::new(0.0, 0.0),
        Point::new(4.0, 0.0),
        Point::new(4.0, 4.0),
        Point::new(0.0, 4.0),
    ])
    .unwrap();

    for i in 1..4 {
        for j in 1..4 {
            mesh.add_interior_point(Point::new(f64::from(i), f64::from(j)))
                .unwrap();
            assert!(mesh.is_valid().is_ok());
        }
    }

    assert_eq!(mesh.number_of_vertices(), 13);
    let (delaunay, offenders) = mesh.is_delaunay();
    assert!(delaunay, "offenders: {offenders:?}");
    assert_relative_eq!(covered_area(&mesh), 16.0, epsilon = 1e-9);
    assert_eq!(euler(&mesh), 1);
}

#[test]
fn determinism_identical_inputs_identical_meshes() {
    let build = || {
        let mut mesh = Mesh::from_polygon(&[
            Point::new(0.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(3.0, 2.0),
            Point::new(0.0, 2.0),
        ])
        .unwrap();
        mesh.add_interior_point(Point::new(1.0, 1.0)).unwrap();
        mesh.add_interior_point(Point::new(2.2, 0.7)).unwrap();
        mesh.cut_edge(Point::new(0.0, 0.0), Point::new(1.0, 1.0))
            .unwrap();
        mesh
    };

    let (m1, m2) = (build(), build());

    assert_eq!(m1.number_of_vertices(), m2.number_of_vertices());
    assert_eq!(m1.number_of_edges(), m2.number_of_edges());
    assert_eq!(m1.number_of_triangles(), m2.number_of_triangles());

    // Same edge set up to unordered comparison of endpoint coordinates.
    let edge_set = |mesh: &Mesh| {
        let mut set: Vec<[(i64, i64); 2]> = mesh
            .edges()
            .values()
            .map(|e| {
                let [a, b] = e.vertices();
                let quantize = |p: Point| ((p.x * 1e9) as i64, (p.y * 1e9) as i64);
                let mut pair = [
                    quantize(mesh.vertex(a).unwrap().point()),
                    quantize(mesh.vertex(b).unwrap().point()),
                ];
                pair.sort_unstable();
                pair
            })
            .collect();
        set.sort_unstable();
        set
    };
    assert_eq!(edge_set(&m1), edge_set(&m2));
}

#[test]
fn exterior_interior_insert_falls_through_to_extension() {
    let mut mesh = unit_square();
    let v = mesh.add_interior_point(Point::new(-1.0, 0.5)).unwrap();

    assert_eq!(mesh.number_of_vertices(), 5);
    assert!(mesh.vertex(v).unwrap().degree() >= 2);
    assert!(mesh.is_valid().is_ok());
    let (delaunay, offenders) = mesh.is_delaunay();
    assert!(delaunay, "offenders: {offenders:?}");
}

#[test]
fn failed_operations_leave_the_mesh_untouched() {
    let mut mesh = unit_square();
    let snapshot = (
        mesh.number_of_vertices(),
        mesh.number_of_edges(),
        mesh.number_of_triangles(),
    );

    // Unknown endpoints.
    assert!(mesh
        .cut_edge(Point::new(0.25, 0.25), Point::new(0.75, 0.75))
        .is_err());
    assert_eq!(
        (
            mesh.number_of_vertices(),
            mesh.number_of_edges(),
            mesh.number_of_triangles(),
        ),
        snapshot
    );
    assert!(mesh.is_valid().is_ok());
}
