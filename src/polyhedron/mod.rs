//! `Polyhedron` struct: an arena of vertices, edges and faces with mutual adjacency

use crate::errors::{MeshError, Result, ValidationError};
use crate::float_types::{Real, tolerance};
use hashbrown::HashMap;
use nalgebra::{Point3, Vector3};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub mod export;
pub mod neighborhood;
pub mod subdivision;
pub mod validate;

/// A polyhedron vertex.
///
/// `edges` and `faces` are the cyclically ordered ring around the vertex:
/// `edges[i]` and `edges[i + 1]` both border `faces[i]`. Both are empty until
/// [`Polyhedron::update_vertices`] has run.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub pos: Point3<Real>,
    pub edges: Vec<usize>,
    pub faces: Vec<usize>,
}

impl Vertex {
    pub const fn new(pos: Point3<Real>) -> Self {
        Vertex {
            pos,
            edges: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Number of faces around this vertex (0 if unresolved)
    #[inline]
    pub fn valence(&self) -> usize {
        self.faces.len()
    }
}

/// An undirected edge. `vertices` is stored as `[min, max]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub vertices: [usize; 2],
    /// Faces bordering this edge, in discovery order (exactly 2 on a closed manifold)
    pub faces: Vec<usize>,
}

impl Edge {
    /// Does this edge join `a` and `b` (in either order)?
    #[inline]
    pub fn joins(&self, a: usize, b: usize) -> bool {
        self.vertices == [a.min(b), a.max(b)]
    }

    #[inline]
    pub fn contains_vertex(&self, vertex: usize) -> bool {
        self.vertices.contains(&vertex)
    }
}

/// A face: cyclic vertex sequence and the edges between consecutive corners.
/// `edges[i]` joins `vertices[i]` and `vertices[(i + 1) % m]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    pub vertices: Vec<usize>,
    pub edges: Vec<usize>,
}

/// A closed, oriented polygonal surface.
///
/// Every vertex, edge and face is identified by its position in the owning
/// array; all cross references are plain indices. The arrays are only
/// reachable through slices so connectivity cannot change behind the back of
/// the derived vertex rings.
#[derive(Debug, Clone, Default)]
pub struct Polyhedron {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    faces: Vec<Face>,
    resolved: bool,
}

impl Polyhedron {
    /// Build a polyhedron from raw points and face index lists.
    ///
    /// Each face lists indices into `points` in cyclic order with consistent
    /// winding across the surface. Edges discovered from adjoining faces are
    /// merged through a `(min, max)` vertex pair table, so a shared edge becomes a
    /// single [`Edge`] listing both faces.
    ///
    /// Only out-of-range indices and faces with fewer than 3 corners are rejected
    /// here. Manifoldness is not verified: malformed input yields adjacency that
    /// [`check`](Self::check) or [`update_vertices`](Self::update_vertices) will report.
    pub fn build<F: AsRef<[usize]>>(points: &[Point3<Real>], faces: &[F]) -> Result<Self> {
        let vertices: Vec<Vertex> = points.iter().copied().map(Vertex::new).collect();
        let mut edges: Vec<Edge> = Vec::new();
        let mut built_faces: Vec<Face> = Vec::with_capacity(faces.len());

        // (min, max) -> edge index, scoped to this build
        let mut edge_table: HashMap<(usize, usize), usize> = HashMap::new();

        for (face_idx, indices) in faces.iter().enumerate() {
            let indices = indices.as_ref();
            let m = indices.len();
            if m < 3 {
                return Err(ValidationError::FaceTooSmall {
                    face: face_idx,
                    count: m,
                }
                .into());
            }
            if let Some(&index) = indices.iter().find(|&&i| i >= points.len()) {
                return Err(MeshError::PointIndexOutOfRange {
                    face: face_idx,
                    index,
                    count: points.len(),
                });
            }

            let mut face_edges = Vec::with_capacity(m);
            for i in 0..m {
                let a = indices[i];
                let b = indices[(i + 1) % m];
                let key = (a.min(b), a.max(b));
                let edge_idx = *edge_table.entry(key).or_insert_with(|| {
                    edges.push(Edge {
                        vertices: [key.0, key.1],
                        faces: Vec::with_capacity(2),
                    });
                    edges.len() - 1
                });
                edges[edge_idx].faces.push(face_idx);
                face_edges.push(edge_idx);
            }

            built_faces.push(Face {
                vertices: indices.to_vec(),
                edges: face_edges,
            });
        }

        Ok(Polyhedron {
            vertices,
            edges,
            faces: built_faces,
            resolved: false,
        })
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Whether vertex rings are current (see [`update_vertices`](Self::update_vertices))
    #[inline]
    pub const fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// All vertex positions, in vertex order
    pub fn positions(&self) -> Vec<Point3<Real>> {
        self.vertices.iter().map(|v| v.pos).collect()
    }

    /// Centroid (arithmetic mean of the corners) of face `face`.
    ///
    /// # Panics
    /// If `face` is out of range.
    pub fn face_center(&self, face: usize) -> Point3<Real> {
        centroid(
            self.faces[face]
                .vertices
                .iter()
                .map(|&v| self.vertices[v].pos),
        )
    }

    /// Midpoint of edge `edge`.
    ///
    /// # Panics
    /// If `edge` is out of range.
    pub fn edge_midpoint(&self, edge: usize) -> Point3<Real> {
        let [a, b] = self.edges[edge].vertices;
        Point3::from((self.vertices[a].pos.coords + self.vertices[b].pos.coords) * 0.5)
    }

    /// Unit normal of face `face`, `cross(p0 - c, p1 - c)` about its centroid `c`.
    /// Returns `None` for degenerate faces.
    ///
    /// # Panics
    /// If `face` is out of range.
    pub fn face_normal(&self, face: usize) -> Option<Vector3<Real>> {
        let center = self.face_center(face);
        let corners = &self.faces[face].vertices;
        let p0 = self.vertices[corners[0]].pos;
        let p1 = self.vertices[corners[1]].pos;
        (p0 - center).cross(&(p1 - center)).try_normalize(tolerance())
    }

    /// Face centroids, in face order
    #[cfg(not(feature = "parallel"))]
    pub fn face_centers(&self) -> Vec<Point3<Real>> {
        (0..self.faces.len()).map(|f| self.face_center(f)).collect()
    }

    /// Parallel face centroids, in face order
    #[cfg(feature = "parallel")]
    pub fn face_centers(&self) -> Vec<Point3<Real>> {
        (0..self.faces.len())
            .into_par_iter()
            .map(|f| self.face_center(f))
            .collect()
    }

    /// Edge midpoints, in edge order
    #[cfg(not(feature = "parallel"))]
    pub fn edge_midpoints(&self) -> Vec<Point3<Real>> {
        (0..self.edges.len()).map(|e| self.edge_midpoint(e)).collect()
    }

    /// Parallel edge midpoints, in edge order
    #[cfg(feature = "parallel")]
    pub fn edge_midpoints(&self) -> Vec<Point3<Real>> {
        (0..self.edges.len())
            .into_par_iter()
            .map(|e| self.edge_midpoint(e))
            .collect()
    }

    /// Euler characteristic χ = V - E + F
    pub fn euler_characteristic(&self) -> i64 {
        self.vertices.len() as i64 - self.edges.len() as i64 + self.faces.len() as i64
    }

    /// Genus of a closed, connected, orientable surface: `(2 - χ) / 2`.
    ///
    /// Returns `None` when χ is odd or greater than 2, which no such surface has.
    pub fn genus(&self) -> Option<u64> {
        let chi = self.euler_characteristic();
        if chi > 2 || (2 - chi) % 2 != 0 {
            return None;
        }
        Some(((2 - chi) / 2) as u64)
    }
}

/// Arithmetic mean of a set of points (origin for an empty set)
pub(crate) fn centroid(points: impl Iterator<Item = Point3<Real>>) -> Point3<Real> {
    let mut sum = Vector3::zeros();
    let mut count = 0usize;
    for p in points {
        sum += p.coords;
        count += 1;
    }
    if count == 0 {
        return Point3::origin();
    }
    Point3::from(sum / count as Real)
}

#[cfg(test)]
mod test {
    use super::*;

    fn tetrahedron() -> Polyhedron {
        let points = [
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(1.0, -1.0, -1.0),
            Point3::new(-1.0, 1.0, -1.0),
            Point3::new(-1.0, -1.0, 1.0),
        ];
        let faces: [[usize; 3]; 4] = [[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]];
        Polyhedron::build(&points, &faces).unwrap()
    }

    #[test]
    fn build_merges_shared_edges() {
        let tet = tetrahedron();
        assert_eq!(tet.vertices().len(), 4);
        assert_eq!(tet.edges().len(), 6);
        assert_eq!(tet.faces().len(), 4);
        assert!(tet.edges().iter().all(|e| e.faces.len() == 2));
        assert!(!tet.is_resolved());
    }

    #[test]
    fn identities_follow_insertion_order() {
        let tet = tetrahedron();
        // First face discovers edges 0, 1, 2 in corner order
        assert_eq!(tet.faces()[0].edges, vec![0, 1, 2]);
        assert!(tet.edges()[0].joins(1, 0));
        assert!(tet.edges()[1].joins(1, 2));
        assert!(tet.edges()[2].joins(2, 0));
        assert_eq!(tet.edges()[0].faces, vec![0, 1]);
    }

    #[test]
    fn build_rejects_out_of_range_index() {
        let points = [Point3::origin(), Point3::new(1.0, 0.0, 0.0)];
        let err = Polyhedron::build(&points, &[[0usize, 1, 5]]).unwrap_err();
        assert_eq!(
            err,
            MeshError::PointIndexOutOfRange {
                face: 0,
                index: 5,
                count: 2
            }
        );
    }

    #[test]
    fn build_rejects_small_faces() {
        let points = [Point3::origin(), Point3::new(1.0, 0.0, 0.0)];
        let faces: Vec<Vec<usize>> = vec![vec![0, 1]];
        let err = Polyhedron::build(&points, &faces).unwrap_err();
        assert_eq!(
            err,
            MeshError::Validation(ValidationError::FaceTooSmall { face: 0, count: 2 })
        );
    }

    #[test]
    fn tetrahedron_is_genus_zero() {
        let tet = tetrahedron();
        assert_eq!(tet.euler_characteristic(), 2);
        assert_eq!(tet.genus(), Some(0));
    }

    #[test]
    fn face_normal_points_outward() {
        let tet = tetrahedron();
        for f in 0..tet.faces().len() {
            let n = tet.face_normal(f).unwrap();
            let c = tet.face_center(f);
            assert!(n.dot(&c.coords) > 0.0, "face {f} normal points inward");
        }
    }
}
