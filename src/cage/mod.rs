//! `Cage`: the raw point / face-index lists a `Polyhedron` is built from, and
//! the topology editing primitives that work on them.

use crate::errors::{MeshError, Result};
use crate::float_types::{Real, tolerance};
use crate::polyhedron::{Polyhedron, centroid};
use nalgebra::{Matrix4, Point3, Vector3};

pub mod extrude;
pub mod handle;
pub mod shapes;

pub use handle::{HandleConfig, HandleShape};

/// A control cage: points plus faces given as cyclic index lists into `points`.
///
/// Faces are expected to be consistently wound so that the right-hand normal
/// points outward. Editing primitives append to both lists and may rewrite
/// existing face entries in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cage {
    pub points: Vec<Point3<Real>>,
    pub faces: Vec<Vec<usize>>,
}

impl Cage {
    pub const fn new(points: Vec<Point3<Real>>, faces: Vec<Vec<usize>>) -> Self {
        Cage { points, faces }
    }

    /// Build the [`Polyhedron`] described by this cage
    pub fn build(&self) -> Result<Polyhedron> {
        Polyhedron::build(&self.points, &self.faces)
    }

    /// Apply a homogeneous transform to every point
    pub fn transform(&mut self, matrix: &Matrix4<Real>) {
        for p in &mut self.points {
            *p = matrix.transform_point(p);
        }
    }

    /// Index list of face `face`
    pub fn face(&self, face: usize) -> Result<&[usize]> {
        self.faces
            .get(face)
            .map(Vec::as_slice)
            .ok_or(MeshError::FaceIndexOutOfRange {
                index: face,
                count: self.faces.len(),
            })
    }

    /// Corner positions of face `face`, with index checks
    pub fn face_points(&self, face: usize) -> Result<Vec<Point3<Real>>> {
        self.face(face)?
            .iter()
            .map(|&i| {
                self.points
                    .get(i)
                    .copied()
                    .ok_or(MeshError::PointIndexOutOfRange {
                        face,
                        index: i,
                        count: self.points.len(),
                    })
            })
            .collect()
    }

    /// Centroid of face `face`
    pub fn face_center(&self, face: usize) -> Result<Point3<Real>> {
        Ok(centroid(self.face_points(face)?.into_iter()))
    }

    /// Unit normal of face `face`, `cross(p0 - c, p1 - c)` about its centroid `c`
    pub fn face_normal(&self, face: usize) -> Result<Vector3<Real>> {
        let corners = self.face_points(face)?;
        if corners.len() < 3 {
            return Err(MeshError::DegenerateFace { face });
        }
        let c = centroid(corners.iter().copied());
        (corners[0] - c)
            .cross(&(corners[1] - c))
            .try_normalize(tolerance())
            .ok_or(MeshError::DegenerateFace { face })
    }
}
