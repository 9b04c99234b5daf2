//! Catmull-Clark subdivision for `Polyhedron`

use crate::errors::{Result, ValidationError};
use crate::float_types::Real;
use crate::polyhedron::{Polyhedron, centroid};
use log::debug;
use nalgebra::Point3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

impl Polyhedron {
    /// **Catmull-Clark Subdivision**
    ///
    /// Refines an arbitrary closed manifold polyhedron into an all-quad one.
    /// For every face of `m` sides, `m` quads are emitted.
    ///
    /// ```text
    /// face point   F = centroid of the face
    /// edge point   E = (2·mid + F0 + F1) / 4
    /// vertex point V = ((m-3)/m)·P + (1/m)·avg(F) + (2/m)·avg(mid)
    /// ```
    /// where `m` is the vertex valence. Quad `i` of a face is
    /// `[V(v[i+1]), E(e[i+1]), F, E(e[i])]`, which keeps the source orientation.
    ///
    /// The output point list is laid out as face points, then edge points, then
    /// vertex points. `self` is left untouched; the result is unresolved.
    ///
    /// ### Errors
    /// - [`ValidationError::Unresolved`] unless [`update_vertices`](Self::update_vertices) ran
    /// - [`ValidationError::EdgeFaceCount`] if an edge does not border two faces
    pub fn catmull_clark(&self) -> Result<Polyhedron> {
        if !self.resolved {
            return Err(ValidationError::Unresolved.into());
        }

        let face_points = self.face_centers();
        let midpoints = self.edge_midpoints();
        let edge_points = self.edge_points(&face_points, &midpoints)?;
        let vertex_points = self.vertex_points(&face_points, &midpoints);

        let face_base = 0;
        let edge_base = face_points.len();
        let vertex_base = edge_base + edge_points.len();

        let mut points = Vec::with_capacity(vertex_base + vertex_points.len());
        points.extend(face_points);
        points.extend(edge_points);
        points.extend(vertex_points);

        let quad_count = self.faces.iter().map(|f| f.vertices.len()).sum();
        let mut quads: Vec<[usize; 4]> = Vec::with_capacity(quad_count);
        for (face_idx, face) in self.faces.iter().enumerate() {
            let m = face.vertices.len();
            for i in 0..m {
                let i1 = (i + 1) % m;
                quads.push([
                    vertex_base + face.vertices[i1],
                    edge_base + face.edges[i1],
                    face_base + face_idx,
                    edge_base + face.edges[i],
                ]);
            }
        }

        let refined = Polyhedron::build(&points, &quads)?;
        debug!(
            "catmull-clark: {}v/{}e/{}f -> {}v/{}e/{}f",
            self.vertices.len(),
            self.edges.len(),
            self.faces.len(),
            refined.vertices.len(),
            refined.edges.len(),
            refined.faces.len()
        );
        Ok(refined)
    }

    /// Resolve neighborhoods and apply [`catmull_clark`](Self::catmull_clark)
    /// `iterations` times. Zero iterations return `self` as is.
    pub fn subdivide(self, iterations: usize) -> Result<Polyhedron> {
        let mut current = self;
        for _ in 0..iterations {
            current.update_vertices()?;
            current = current.catmull_clark()?;
        }
        Ok(current)
    }

    #[cfg(not(feature = "parallel"))]
    fn edge_points(
        &self,
        face_points: &[Point3<Real>],
        midpoints: &[Point3<Real>],
    ) -> Result<Vec<Point3<Real>>> {
        (0..self.edges.len())
            .map(|e| self.edge_point(e, face_points, midpoints))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn edge_points(
        &self,
        face_points: &[Point3<Real>],
        midpoints: &[Point3<Real>],
    ) -> Result<Vec<Point3<Real>>> {
        (0..self.edges.len())
            .into_par_iter()
            .map(|e| self.edge_point(e, face_points, midpoints))
            .collect()
    }

    fn edge_point(
        &self,
        edge: usize,
        face_points: &[Point3<Real>],
        midpoints: &[Point3<Real>],
    ) -> Result<Point3<Real>> {
        match self.edges[edge].faces[..] {
            [f0, f1] => Ok(Point3::from(
                (midpoints[edge].coords * 2.0 + face_points[f0].coords + face_points[f1].coords)
                    * 0.25,
            )),
            _ => Err(ValidationError::EdgeFaceCount {
                edge,
                count: self.edges[edge].faces.len(),
            }
            .into()),
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn vertex_points(
        &self,
        face_points: &[Point3<Real>],
        midpoints: &[Point3<Real>],
    ) -> Vec<Point3<Real>> {
        (0..self.vertices.len())
            .map(|v| self.vertex_point(v, face_points, midpoints))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn vertex_points(
        &self,
        face_points: &[Point3<Real>],
        midpoints: &[Point3<Real>],
    ) -> Vec<Point3<Real>> {
        (0..self.vertices.len())
            .into_par_iter()
            .map(|v| self.vertex_point(v, face_points, midpoints))
            .collect()
    }

    /// Vertices with an empty ring keep their position.
    fn vertex_point(
        &self,
        vertex: usize,
        face_points: &[Point3<Real>],
        midpoints: &[Point3<Real>],
    ) -> Point3<Real> {
        let v = &self.vertices[vertex];
        let m = v.valence();
        if m == 0 {
            return v.pos;
        }
        let m = m as Real;

        let avg_face = centroid(v.faces.iter().map(|&f| face_points[f]));
        let avg_mid = centroid(v.edges.iter().map(|&e| midpoints[e]));

        Point3::from(
            v.pos.coords * ((m - 3.0) / m)
                + avg_face.coords * (1.0 / m)
                + avg_mid.coords * (2.0 / m),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cage::Cage;
    use crate::errors::MeshError;

    #[test]
    fn unresolved_input_is_rejected() {
        let cube = Cage::cube(1.0).build().unwrap();
        assert_eq!(
            cube.catmull_clark().unwrap_err(),
            MeshError::Validation(ValidationError::Unresolved)
        );
    }

    #[test]
    fn zero_iterations_is_identity() {
        let cube = Cage::cube(1.0).build().unwrap();
        let same = cube.clone().subdivide(0).unwrap();
        assert_eq!(same.positions(), cube.positions());
        assert_eq!(same.faces(), cube.faces());
    }

    #[test]
    fn point_layout_is_faces_edges_vertices() {
        let mut cube = Cage::cube(1.0).build().unwrap();
        cube.update_vertices().unwrap();
        let refined = cube.catmull_clark().unwrap();

        let f = cube.faces().len();
        let e = cube.edges().len();
        for face in 0..f {
            assert_eq!(refined.vertices()[face].pos, cube.face_center(face));
        }
        // Every refined quad's third corner is a face point
        assert!(refined.faces().iter().all(|q| q.vertices[2] < f));
        // ... and its first corner a vertex point
        assert!(refined.faces().iter().all(|q| q.vertices[0] >= f + e));
    }
}
