//! Structural-integrity and topology errors

/// A violated polyhedron invariant, reported by [`Polyhedron::check`](crate::Polyhedron::check)
/// and its per-entity variants. Checking aborts at the first violation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// (FaceTooSmall) A face has fewer than 3 vertices
    #[error("(FaceTooSmall) Face {face} has {count} vertices, at least 3 are required")]
    FaceTooSmall { face: usize, count: usize },
    /// (FaceEdgeCountMismatch) A face's vertex and edge cycles differ in length
    #[error("(FaceEdgeCountMismatch) Face {face} has {vertices} vertices but {edges} edges")]
    FaceEdgeCountMismatch {
        face: usize,
        vertices: usize,
        edges: usize,
    },
    /// (RepeatedVertex) Two consecutive face corners are the same vertex
    #[error("(RepeatedVertex) Face {face} repeats vertex {vertex} at corner {corner}")]
    RepeatedVertex {
        face: usize,
        vertex: usize,
        corner: usize,
    },
    /// (FaceEdgeMismatch) Edge `i` of a face does not join corners `i` and `i + 1`
    #[error("(FaceEdgeMismatch) Edge {edge} of face {face} does not join vertices {a} and {b}")]
    FaceEdgeMismatch {
        face: usize,
        edge: usize,
        a: usize,
        b: usize,
    },
    /// (DegenerateEdge) Both endpoints of an edge are the same vertex
    #[error("(DegenerateEdge) Edge {edge} starts and ends at vertex {vertex}")]
    DegenerateEdge { edge: usize, vertex: usize },
    /// (EdgeFaceCount) An edge does not border exactly two faces
    #[error("(EdgeFaceCount) Edge {edge} borders {count} faces, expected 2")]
    EdgeFaceCount { edge: usize, count: usize },
    /// (EdgeNotInFace) An edge references a face that does not list it
    #[error("(EdgeNotInFace) Edge {edge} references face {face}, which does not list it")]
    EdgeNotInFace { edge: usize, face: usize },
    /// (VertexRingMismatch) A vertex ring has different edge and face counts
    #[error("(VertexRingMismatch) Vertex {vertex} has {faces} faces but {edges} edges")]
    VertexRingMismatch {
        vertex: usize,
        faces: usize,
        edges: usize,
    },
    /// (VertexValence) A vertex has fewer than 3 incident faces
    #[error("(VertexValence) Vertex {vertex} has valence {valence}, at least 3 is required")]
    VertexValence { vertex: usize, valence: usize },
    /// (VertexRingBroken) Ring entries `i` and `i + 1` do not interleave around face `i`
    #[error("(VertexRingBroken) Vertex {vertex} ring is inconsistent at position {position}")]
    VertexRingBroken { vertex: usize, position: usize },
    /// (Unresolved) Vertex neighborhoods were never computed
    #[error("(Unresolved) Vertex neighborhoods have not been resolved, call update_vertices first")]
    Unresolved,
}

/// Errors raised while building, resolving or editing a polyhedron.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    /// A structural invariant failed
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The fan walk around a vertex found no consistent successor edge
    #[error("Vertex {vertex}: no consistent successor for edge {edge} in its fan (non-manifold or open surface)")]
    Inconsistent { vertex: usize, edge: usize },
    /// A face references a point that does not exist
    #[error("Face {face} references point {index}, but only {count} points exist")]
    PointIndexOutOfRange {
        face: usize,
        index: usize,
        count: usize,
    },
    /// A face index passed to an editing primitive is out of range
    #[error("Face index {index} is out of range ({count} faces)")]
    FaceIndexOutOfRange { index: usize, count: usize },
    /// A handle was requested on a face that is not a quad
    #[error("Face {face} has {count} vertices, handles connect quads only")]
    NotQuad { face: usize, count: usize },
    /// A face normal could not be computed (collinear or coincident corners)
    #[error("Face {face} is degenerate, its normal is undefined")]
    DegenerateFace { face: usize },
    /// Both ends of a handle are the same face
    #[error("Cannot attach a handle from face {face} to itself")]
    SameFace { face: usize },
    /// A surface mesh indexes vertices with `u32`
    #[error("{count} vertices do not fit a u32 index buffer")]
    TooManyVertices { count: usize },
    /// The local frame of a handle could not be built
    #[error("Handle between faces {f1} and {f2} has no well-defined frame")]
    DegenerateHandle { f1: usize, f2: usize },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, MeshError>;
