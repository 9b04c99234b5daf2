mod support;

use handlebody::{Cage, MeshError, Polyhedron, ValidationError};
use nalgebra::Point3;

use crate::support::resolved;

fn octahedron() -> Cage {
    let points = vec![
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(-1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, -1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(0.0, 0.0, -1.0),
    ];
    let faces: Vec<Vec<usize>> = vec![
        vec![0, 2, 4],
        vec![2, 1, 4],
        vec![1, 3, 4],
        vec![3, 0, 4],
        vec![2, 0, 5],
        vec![1, 2, 5],
        vec![3, 1, 5],
        vec![0, 3, 5],
    ];
    Cage::new(points, faces)
}

#[test]
fn build_shares_edges_between_faces() {
    let poly = Cage::cube(1.0).build().unwrap();
    assert_eq!(poly.vertices().len(), 8);
    assert_eq!(poly.edges().len(), 12);
    assert_eq!(poly.faces().len(), 6);
    for edge in poly.edges() {
        assert_eq!(edge.faces.len(), 2);
        assert!(edge.vertices[0] < edge.vertices[1]);
    }
    assert!(!poly.is_resolved());
}

#[test]
fn face_edges_join_consecutive_corners() {
    let poly = octahedron().build().unwrap();
    for face in poly.faces() {
        let m = face.vertices.len();
        for i in 0..m {
            let edge = &poly.edges()[face.edges[i]];
            assert!(edge.joins(face.vertices[i], face.vertices[(i + 1) % m]));
        }
    }
}

#[test]
fn build_accepts_index_arrays() {
    let points = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ];
    let poly = Polyhedron::build(&points, &[[0usize, 1, 2]]).unwrap();
    assert_eq!(poly.faces()[0].vertices, vec![0, 1, 2]);
}

#[test]
fn resolved_rings_alternate_edges_and_faces() {
    for cage in [Cage::cube(1.0), octahedron(), Cage::segmented_bar(2, 1.0)] {
        let poly = resolved(&cage);
        for (v, vertex) in poly.vertices().iter().enumerate() {
            let m = vertex.valence();
            assert!(m >= 3);
            assert_eq!(vertex.faces.len(), m);
            for i in 0..m {
                let face = &poly.faces()[vertex.faces[i]];
                let e_in = vertex.edges[i];
                let e_out = vertex.edges[(i + 1) % m];
                assert!(poly.edges()[e_in].contains_vertex(v));
                assert!(face.vertices.contains(&v));
                assert!(face.edges.contains(&e_in), "vertex {v}: ring edge {i} not in face");
                assert!(face.edges.contains(&e_out), "vertex {v}: ring edge {} not in face", i + 1);
            }
        }
        assert_eq!(poly.check(), Ok(()));
    }
}

#[test]
fn ring_lists_every_incident_edge_once() {
    let poly = resolved(&octahedron());
    for (v, vertex) in poly.vertices().iter().enumerate() {
        let mut ring = vertex.edges.clone();
        ring.sort_unstable();
        let mut incident: Vec<usize> = (0..poly.edges().len())
            .filter(|&e| poly.edges()[e].contains_vertex(v))
            .collect();
        incident.sort_unstable();
        assert_eq!(ring, incident);
    }
}

#[test]
fn open_surface_fails_to_resolve() {
    let mut cube = Cage::cube(1.0);
    cube.faces.pop();
    let mut poly = cube.build().unwrap();
    assert!(matches!(
        poly.update_vertices(),
        Err(MeshError::Inconsistent { .. })
    ));
    assert!(!poly.is_resolved());
    assert!(matches!(
        poly.check_edges(),
        Err(ValidationError::EdgeFaceCount { count: 1, .. })
    ));
}

#[test]
fn non_manifold_edge_is_reported() {
    // Two tetrahedra glued along a single edge give an edge with four faces
    let points = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(0.0, -1.0, 0.0),
        Point3::new(0.0, 0.0, -1.0),
    ];
    let faces: Vec<Vec<usize>> = vec![
        vec![0, 2, 1],
        vec![0, 1, 3],
        vec![0, 3, 2],
        vec![1, 2, 3],
        vec![0, 4, 1],
        vec![0, 1, 5],
        vec![0, 5, 4],
        vec![1, 4, 5],
    ];
    let poly = Polyhedron::build(&points, &faces).unwrap();
    assert!(matches!(
        poly.check_edges(),
        Err(ValidationError::EdgeFaceCount { count: 3.., .. })
    ));
}

#[test]
fn out_of_range_index_is_rejected() {
    let cage = Cage::new(vec![Point3::origin(); 3], vec![vec![0, 1, 3]]);
    assert_eq!(
        cage.build().unwrap_err(),
        MeshError::PointIndexOutOfRange {
            face: 0,
            index: 3,
            count: 3
        }
    );
}

#[test]
fn closed_surfaces_have_expected_genus() {
    assert_eq!(Cage::cube(1.0).build().unwrap().genus(), Some(0));
    assert_eq!(octahedron().build().unwrap().euler_characteristic(), 2);

    let mut bar = Cage::segmented_bar(3, 1.0);
    bar.add_handle(1, 9).unwrap();
    let poly = resolved(&bar);
    assert_eq!(poly.check(), Ok(()));
    assert_eq!(poly.genus(), Some(1));
}
