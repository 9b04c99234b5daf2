//! Per-vertex neighborhood resolution.
//!
//! Reconstructs the cyclic (edge, face) ring around every vertex from the
//! unordered incidences collected at build time, in time linear in the number
//! of face corners and without any angular information.

use crate::errors::{MeshError, Result};
use crate::polyhedron::{Face, Polyhedron};
use hashbrown::{HashMap, HashSet};
use log::warn;

/// Arrival at a vertex through one edge of a face: the face's other edge at
/// that corner, and the face itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Link {
    next: usize,
    face: usize,
}

/// Incidences of a single vertex: edge -> links through each face bordering it.
#[derive(Debug, Default)]
struct FanTable {
    links: HashMap<usize, Vec<Link>>,
    first_edge: Option<usize>,
}

/// A resolved vertex ring: `faces[i]` is bordered by `edges[i]` and `edges[i + 1]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexRing {
    pub edges: Vec<usize>,
    pub faces: Vec<usize>,
}

impl Polyhedron {
    /// Compute the ordered edge/face ring of every vertex and mark the
    /// polyhedron resolved.
    ///
    /// Faces are checked first. Rings are recomputed from scratch on every call.
    /// A vertex no face touches is logged and left with an empty ring.
    ///
    /// ### Errors
    /// - [`ValidationError`](crate::errors::ValidationError) if a face is malformed
    /// - [`MeshError::Inconsistent`] if an edge at some vertex does not have
    ///   exactly two face links (open or non-manifold surface)
    pub fn update_vertices(&mut self) -> Result<()> {
        self.check_faces()?;
        self.resolved = false;

        let rings = resolve_rings(self.vertices.len(), &self.faces)?;
        for (vertex, ring) in self.vertices.iter_mut().zip(rings) {
            vertex.edges = ring.edges;
            vertex.faces = ring.faces;
        }

        self.resolved = true;
        Ok(())
    }
}

/// Resolve the ring of every vertex in `0..vertex_count` from the face list.
pub fn resolve_rings(vertex_count: usize, faces: &[Face]) -> Result<Vec<VertexRing>> {
    let tables = fan_tables(vertex_count, faces);
    tables
        .iter()
        .enumerate()
        .map(|(vertex, table)| walk_fan(vertex, table))
        .collect()
}

/// For every corner (e0, v, e1) of every face, record e0 -> (e1, face) and
/// e1 -> (e0, face) in the table of `v`.
fn fan_tables(vertex_count: usize, faces: &[Face]) -> Vec<FanTable> {
    let mut tables: Vec<FanTable> = (0..vertex_count).map(|_| FanTable::default()).collect();

    for (face_idx, face) in faces.iter().enumerate() {
        let m = face.vertices.len();
        for i in 0..m {
            let i1 = (i + 1) % m;
            let e0 = face.edges[i];
            let e1 = face.edges[i1];
            let table = &mut tables[face.vertices[i1]];

            table.links.entry(e0).or_default().push(Link {
                next: e1,
                face: face_idx,
            });
            table.links.entry(e1).or_default().push(Link {
                next: e0,
                face: face_idx,
            });
            table.first_edge.get_or_insert(e0);
        }
    }

    tables
}

/// Walk around one vertex: leave each edge through the face link that did not
/// bring us there, until the start edge (or an already visited edge) comes back.
fn walk_fan(vertex: usize, table: &FanTable) -> Result<VertexRing> {
    let Some(start) = table.first_edge else {
        warn!("V{vertex} without edges");
        return Ok(VertexRing::default());
    };

    let mut link = first_link(vertex, table, start)?;
    let mut touched: HashSet<usize> = HashSet::new();
    touched.insert(start);

    let mut ring = VertexRing {
        edges: vec![start],
        faces: Vec::new(),
    };
    let mut edge = start;

    loop {
        ring.faces.push(link.face);
        let previous = edge;
        edge = link.next;
        if edge == start || !touched.insert(edge) {
            break;
        }
        ring.edges.push(edge);

        let candidates = table.links.get(&edge).map(Vec::as_slice).unwrap_or(&[]);
        link = match candidates {
            [a, b] if a.next == previous => *b,
            [a, b] if b.next == previous => *a,
            _ => return Err(MeshError::Inconsistent { vertex, edge }),
        };
    }

    // Several fans meeting at one vertex
    if ring.edges.len() != table.links.len() {
        return Err(MeshError::Inconsistent { vertex, edge });
    }
    Ok(ring)
}

fn first_link(vertex: usize, table: &FanTable, start: usize) -> Result<Link> {
    match table.links.get(&start).map(Vec::as_slice) {
        Some([a, _]) => Ok(*a),
        _ => Err(MeshError::Inconsistent {
            vertex,
            edge: start,
        }),
    }
}
