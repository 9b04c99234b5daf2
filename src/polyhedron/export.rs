//! Conversion of a `Polyhedron` into renderer-facing buffers: a triangulated
//! surface and a wireframe line list.

use crate::errors::{MeshError, Result};
use crate::float_types::{Real, tolerance};
use crate::polyhedron::Polyhedron;
use nalgebra::{Point3, Vector3};

/// RGBA color of a wireframe point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color { r, g, b, a }
    }

    /// Default edge color
    pub const EDGE: Color = Color::new(0.7, 0.7, 0.2, 1.0);
    /// Face outline color (debug overlay)
    pub const FACE_OUTLINE: Color = Color::new(1.0, 0.0, 1.0, 1.0);
    /// Face normal indicator color (debug overlay)
    pub const FACE_NORMAL: Color = Color::new(0.0, 1.0, 1.0, 1.0);
}

/// Triangulated surface, ready for upload.
///
/// `positions` and `normals` are flat `xyz` buffers with one entry per
/// polyhedron vertex; `indices` holds three vertex indices per triangle, so a
/// surface has at most `u32::MAX + 1` vertices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceMesh {
    pub positions: Vec<Real>,
    pub indices: Vec<u32>,
    pub normals: Vec<Real>,
}

impl SurfaceMesh {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Normal of vertex `i`
    pub fn normal(&self, i: usize) -> Vector3<Real> {
        Vector3::new(
            self.normals[3 * i],
            self.normals[3 * i + 1],
            self.normals[3 * i + 2],
        )
    }

    /// Position of vertex `i`
    pub fn position(&self, i: usize) -> Point3<Real> {
        Point3::new(
            self.positions[3 * i],
            self.positions[3 * i + 1],
            self.positions[3 * i + 2],
        )
    }
}

/// Polylines with one color per point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wireframe {
    pub lines: Vec<Vec<Point3<Real>>>,
    pub colors: Vec<Vec<Color>>,
}

impl Wireframe {
    fn push(&mut self, line: Vec<Point3<Real>>, color: Color) {
        self.colors.push(vec![color; line.len()]);
        self.lines.push(line);
    }
}

impl Polyhedron {
    /// Flatten positions and fan-triangulate every face from its first corner.
    ///
    /// Face `[v0, v1, .., vm-1]` yields triangles `(v0, v(i+1), vi)` for `i` in
    /// `1..m-1`; per-vertex normals come from [`compute_normals`] and point
    /// outward for outward-wound faces.
    ///
    /// ### Errors
    /// [`MeshError::TooManyVertices`] if vertex indices do not fit in `u32`.
    pub fn create_mesh(&self) -> Result<SurfaceMesh> {
        check_index_range(self.vertices.len())?;

        let positions: Vec<Real> = self
            .vertices
            .iter()
            .flat_map(|v| [v.pos.x, v.pos.y, v.pos.z])
            .collect();

        let mut indices = Vec::new();
        for face in &self.faces {
            let ii = &face.vertices;
            for i in 1..ii.len() - 1 {
                indices.extend([ii[0] as u32, ii[i + 1] as u32, ii[i] as u32]);
            }
        }

        let normals = compute_normals(&positions, &indices);
        Ok(SurfaceMesh {
            positions,
            indices,
            normals,
        })
    }

    /// One segment per edge in `color` (or [`Color::EDGE`]).
    ///
    /// With `show_faces`, every face also gets a closed outline shrunk toward
    /// its centroid and a unit normal indicator from the centroid, both in the
    /// fixed overlay colors.
    pub fn create_line_system(&self, color: Option<Color>, show_faces: bool) -> Wireframe {
        let edge_color = color.unwrap_or(Color::EDGE);
        let mut wireframe = Wireframe::default();

        for edge in &self.edges {
            let [a, b] = edge.vertices;
            wireframe.push(
                vec![self.vertices[a].pos, self.vertices[b].pos],
                edge_color,
            );
        }

        if show_faces {
            for face_idx in 0..self.faces.len() {
                wireframe.push(self.face_outline(face_idx), Color::FACE_OUTLINE);

                let center = self.face_center(face_idx);
                let normal = self.face_normal(face_idx).unwrap_or_else(Vector3::zeros);
                wireframe.push(vec![center, center + normal], Color::FACE_NORMAL);
            }
        }

        wireframe
    }

    /// Corners pulled 10% toward the centroid, plus a closing point 90% of the
    /// way from the last corner back to the first.
    fn face_outline(&self, face: usize) -> Vec<Point3<Real>> {
        let center = self.face_center(face);
        let mut outline: Vec<Point3<Real>> = self.faces[face]
            .vertices
            .iter()
            .map(|&v| lerp(&self.vertices[v].pos, &center, 0.1))
            .collect();
        if let (Some(&first), Some(&last)) = (outline.first(), outline.last()) {
            outline.push(lerp(&last, &first, 0.9));
        }
        outline
    }
}

/// Every index below `vertex_count` must convert to `u32` without loss
fn check_index_range(vertex_count: usize) -> Result<()> {
    match vertex_count.checked_sub(1) {
        Some(last) if u32::try_from(last).is_err() => Err(MeshError::TooManyVertices {
            count: vertex_count,
        }),
        _ => Ok(()),
    }
}

#[inline]
fn lerp(a: &Point3<Real>, b: &Point3<Real>, t: Real) -> Point3<Real> {
    a + (b - a) * t
}

/// Area-independent vertex normals for an indexed triangle list.
///
/// For triangle `(p1, p2, p3)` the face normal is `normalize((p1 - p2) × (p3 - p2))`;
/// each vertex normal is the normalized sum of the face normals around it.
/// Degenerate triangles contribute nothing and isolated vertices get a zero normal.
///
/// # Panics
/// If an entry of `indices` is not below `positions.len() / 3`.
pub fn compute_normals(positions: &[Real], indices: &[u32]) -> Vec<Real> {
    let point = |i: u32| {
        let i = i as usize * 3;
        Point3::new(positions[i], positions[i + 1], positions[i + 2])
    };

    let mut accum = vec![Vector3::<Real>::zeros(); positions.len() / 3];
    for tri in indices.chunks_exact(3) {
        let (p1, p2, p3) = (point(tri[0]), point(tri[1]), point(tri[2]));
        let Some(face_normal) = (p1 - p2).cross(&(p3 - p2)).try_normalize(tolerance()) else {
            continue;
        };
        for &i in tri {
            accum[i as usize] += face_normal;
        }
    }

    accum
        .into_iter()
        .flat_map(|n| {
            let n = n.try_normalize(tolerance()).unwrap_or_else(Vector3::zeros);
            [n.x, n.y, n.z]
        })
        .collect()
}
