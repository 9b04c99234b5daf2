//! Structural invariant checks for `Polyhedron`

use crate::errors::ValidationError;
use crate::polyhedron::Polyhedron;

impl Polyhedron {
    /// Run every structural check: faces, edges, then vertex rings.
    ///
    /// Meant for development and debugging rather than the per-frame path.
    /// Stops at the first violated invariant.
    pub fn check(&self) -> Result<(), ValidationError> {
        self.check_faces()?;
        self.check_edges()?;
        self.check_vertices()
    }

    /// Every face has as many edges as vertices (at least 3), no consecutive
    /// corners coincide, and edge `i` joins corners `i` and `i + 1`.
    pub fn check_faces(&self) -> Result<(), ValidationError> {
        for (face_idx, face) in self.faces.iter().enumerate() {
            let m = face.vertices.len();
            if m != face.edges.len() {
                return Err(ValidationError::FaceEdgeCountMismatch {
                    face: face_idx,
                    vertices: m,
                    edges: face.edges.len(),
                });
            }
            if m < 3 {
                return Err(ValidationError::FaceTooSmall {
                    face: face_idx,
                    count: m,
                });
            }
            for i in 0..m {
                let a = face.vertices[i];
                let b = face.vertices[(i + 1) % m];
                if a == b {
                    return Err(ValidationError::RepeatedVertex {
                        face: face_idx,
                        vertex: a,
                        corner: i,
                    });
                }
                let edge = face.edges[i];
                if !self.edges[edge].joins(a, b) {
                    return Err(ValidationError::FaceEdgeMismatch {
                        face: face_idx,
                        edge,
                        a,
                        b,
                    });
                }
            }
        }
        Ok(())
    }

    /// Every edge joins two distinct vertices, borders exactly two faces, and
    /// is listed by each of them.
    pub fn check_edges(&self) -> Result<(), ValidationError> {
        for (edge_idx, edge) in self.edges.iter().enumerate() {
            let [a, b] = edge.vertices;
            if a == b {
                return Err(ValidationError::DegenerateEdge {
                    edge: edge_idx,
                    vertex: a,
                });
            }
            if edge.faces.len() != 2 {
                return Err(ValidationError::EdgeFaceCount {
                    edge: edge_idx,
                    count: edge.faces.len(),
                });
            }
            for &face in &edge.faces {
                if !self.faces[face].edges.contains(&edge_idx) {
                    return Err(ValidationError::EdgeNotInFace {
                        edge: edge_idx,
                        face,
                    });
                }
            }
        }
        Ok(())
    }

    /// Every vertex ring has matching edge/face counts of at least 3, and
    /// `edges[i]`, `edges[i + 1]` both border `faces[i]`, all touching the vertex.
    ///
    /// Requires resolved neighborhoods.
    pub fn check_vertices(&self) -> Result<(), ValidationError> {
        if !self.resolved {
            return Err(ValidationError::Unresolved);
        }
        for (vertex_idx, vertex) in self.vertices.iter().enumerate() {
            let m = vertex.faces.len();
            if m != vertex.edges.len() {
                return Err(ValidationError::VertexRingMismatch {
                    vertex: vertex_idx,
                    faces: m,
                    edges: vertex.edges.len(),
                });
            }
            if m < 3 {
                return Err(ValidationError::VertexValence {
                    vertex: vertex_idx,
                    valence: m,
                });
            }
            for i in 0..m {
                let e0 = vertex.edges[i];
                let e1 = vertex.edges[(i + 1) % m];
                let f = vertex.faces[i];
                let face = &self.faces[f];
                let consistent = face.edges.contains(&e0)
                    && face.edges.contains(&e1)
                    && self.edges[e0].faces.contains(&f)
                    && self.edges[e1].faces.contains(&f)
                    && self.edges[e0].contains_vertex(vertex_idx)
                    && face.vertices.contains(&vertex_idx);
                if !consistent {
                    return Err(ValidationError::VertexRingBroken {
                        vertex: vertex_idx,
                        position: i,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn open_triangle_fails_edge_check() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let tri = Polyhedron::build(&points, &[[0usize, 1, 2]]).unwrap();
        assert_eq!(tri.check_faces(), Ok(()));
        assert_eq!(
            tri.check_edges(),
            Err(ValidationError::EdgeFaceCount { edge: 0, count: 1 })
        );
        assert_eq!(
            tri.check(),
            Err(ValidationError::EdgeFaceCount { edge: 0, count: 1 })
        );
    }

    #[test]
    fn repeated_corner_fails_face_check() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let poly = Polyhedron::build(&points, &[[0usize, 1, 1, 2]]).unwrap();
        assert_eq!(
            poly.check_faces(),
            Err(ValidationError::RepeatedVertex {
                face: 0,
                vertex: 1,
                corner: 1
            })
        );
    }

    #[test]
    fn unresolved_vertices_are_reported() {
        let points = [
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(1.0, -1.0, -1.0),
            Point3::new(-1.0, 1.0, -1.0),
            Point3::new(-1.0, -1.0, 1.0),
        ];
        let faces: [[usize; 3]; 4] = [[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]];
        let tet = Polyhedron::build(&points, &faces).unwrap();
        assert_eq!(tet.check_faces(), Ok(()));
        assert_eq!(tet.check_edges(), Ok(()));
        assert_eq!(tet.check_vertices(), Err(ValidationError::Unresolved));
    }
}
