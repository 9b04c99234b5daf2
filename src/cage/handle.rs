//! Handle bridging: connecting two quad faces of a `Cage` with a tube.

use crate::cage::Cage;
use crate::errors::{MeshError, Result};
use crate::float_types::{Real, tolerance};
use log::{debug, trace};
use nalgebra::{Point3, Vector3};

// Rounding leaves unit normals of opposite faces about one ulp of 1.0 apart
#[cfg(feature = "f64")]
const DEFAULT_ANTIPARALLEL_THRESHOLD: Real = 1e-8;
#[cfg(feature = "f32")]
const DEFAULT_ANTIPARALLEL_THRESHOLD: Real = 1e-4;

/// Tuning knobs for [`Cage::add_handle_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleConfig {
    /// Number of interior cross-section rings sampled along the arc
    pub rings: usize,
    /// Below this half-angle the face normals count as antiparallel and the
    /// faces are stitched directly, without an arc
    pub antiparallel_threshold: Real,
}

impl Default for HandleConfig {
    fn default() -> Self {
        HandleConfig {
            rings: 4,
            antiparallel_threshold: DEFAULT_ANTIPARALLEL_THRESHOLD,
        }
    }
}

/// Geometry chosen for a handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HandleShape {
    /// Antiparallel faces, zipped together with four quads and no new points
    Direct,
    /// Circular arc in the plane of the handle frame
    Arc {
        center: Point3<Real>,
        radius: Real,
        /// Angle of the first face center, measured from the frame's `e1` toward `e0`
        start_angle: Real,
        /// Angle of the second face center
        end_angle: Real,
    },
}

/// Orthonormal frame of a handle: `e0` runs from the first face center to the
/// second, `e1` is the mean normal made orthogonal to `e0`, `e2 = e0 × e1`.
#[derive(Debug, Clone, Copy)]
struct Frame {
    e0: Vector3<Real>,
    e1: Vector3<Real>,
    e2: Vector3<Real>,
}

impl Cage {
    /// [`add_handle_with`](Self::add_handle_with) using [`HandleConfig::default`]
    pub fn add_handle(&mut self, f1: usize, f2: usize) -> Result<HandleShape> {
        self.add_handle_with(f1, f2, &HandleConfig::default())
    }

    /// **Bridge two quad faces with a tube following a circular arc.**
    ///
    /// Let `c1, c2` be the face centroids and `n1, n2` their outward normals
    /// (`cross(p0 - c, p1 - c)`). With `θ = (π - ∠(n1, n2)) / 2`:
    ///
    /// - `θ < antiparallel_threshold`: the faces look straight at each other. They
    ///   are zipped with four quads, face 2 taken in `[1, 0, 3, 2]` order.
    /// - otherwise the arc center sits at `mid(c1, c2) - e1·h` with
    ///   `h = |c1c2| / 2 / tan θ` (negated when `(n1 × n2)·e2 < 0`), and the radius
    ///   `R` is the mean distance from the center to `c1` and `c2`. The first
    ///   face's corners, expressed in the `(a0, a1)` cross-section basis, are swept
    ///   along the arc into `config.rings` interior rings.
    ///
    /// Consecutive rings are joined into bands of four quads. The first two quads
    /// replace `faces[f1]` and `faces[f2]`; the rest are appended, for
    /// `4 * (rings + 1) - 2` new faces and `4 * rings` new points.
    ///
    /// ### Errors
    /// Out-of-range faces, non-quad faces, `f1 == f2`, degenerate faces, and
    /// coincident centers or collinear normals (no frame) are rejected before
    /// anything is modified.
    pub fn add_handle_with(
        &mut self,
        f1: usize,
        f2: usize,
        config: &HandleConfig,
    ) -> Result<HandleShape> {
        if f1 == f2 {
            return Err(MeshError::SameFace { face: f1 });
        }
        let face1 = self.quad(f1)?;
        let face2 = self.quad(f2)?;
        let reversed2 = [face2[1], face2[0], face2[3], face2[2]];

        let c1 = self.face_center(f1)?;
        let c2 = self.face_center(f2)?;
        let norm1 = self.face_normal(f1)?;
        let norm2 = self.face_normal(f2)?;

        let c12 = c2 - c1;
        let theta = half_opening_angle(&norm1, &norm2);

        if theta < config.antiparallel_threshold {
            debug!("handle {f1} -> {f2}: antiparallel faces, stitching directly");
            self.stitch_bands(f1, f2, &[face1, reversed2]);
            return Ok(HandleShape::Direct);
        }

        let frame = handle_frame(c12, norm1 + norm2).ok_or(MeshError::DegenerateHandle { f1, f2 })?;

        let mut h = c12.norm() * 0.5 / theta.tan();
        if norm1.cross(&norm2).dot(&frame.e2) < 0.0 {
            h = -h;
        }
        let center = c1 + c12 * 0.5 - frame.e1 * h;
        let radius = 0.5 * ((center - c1).norm() + (center - c2).norm());

        let angle_of = |p: Point3<Real>| {
            let e = p - center;
            frame.e0.dot(&e).atan2(frame.e1.dot(&e))
        };
        let phi1 = angle_of(c1);
        let phi2 = angle_of(c2);

        // Cross-section basis at the first face
        let a0 = (c1 - center)
            .try_normalize(tolerance())
            .ok_or(MeshError::DegenerateHandle { f1, f2 })?;
        let a1 = (frame.e2 - a0 * frame.e2.dot(&a0))
            .try_normalize(tolerance())
            .ok_or(MeshError::DegenerateHandle { f1, f2 })?;
        let profile = face1.map(|i| {
            let d = self.points[i] - c1;
            (a0.dot(&d), a1.dot(&d))
        });

        let n = config.rings;
        let base = self.points.len();
        for i in 0..n {
            let t = (i + 1) as Real / (n + 1) as Real;
            let phi = phi1 * (1.0 - t) + phi2 * t;
            let (sn, cs) = phi.sin_cos();
            for &(x, y) in &profile {
                let rr = radius + x;
                self.points
                    .push(center + frame.e0 * (rr * sn) + frame.e1 * (rr * cs) + frame.e2 * y);
            }
        }

        let mut rings = Vec::with_capacity(n + 2);
        rings.push(face1);
        rings.extend((0..n).map(|i| {
            let k = base + 4 * i;
            [k, k + 1, k + 2, k + 3]
        }));
        rings.push(reversed2);
        self.stitch_bands(f1, f2, &rings);

        debug!(
            "handle {f1} -> {f2}: arc center {center}, radius {radius}, angles {phi1}..{phi2}, {n} rings"
        );
        Ok(HandleShape::Arc {
            center,
            radius,
            start_angle: phi1,
            end_angle: phi2,
        })
    }

    /// Index list of face `face`, which must be a quad
    fn quad(&self, face: usize) -> Result<[usize; 4]> {
        let indices = self.face(face)?;
        let quad: [usize; 4] = indices.try_into().map_err(|_| MeshError::NotQuad {
            face,
            count: indices.len(),
        })?;
        // validates point indices and rejects degenerate faces up front
        self.face_normal(face)?;
        Ok(quad)
    }

    /// Join each pair of consecutive rings with four quads
    /// `[t1[j], t1[j+1], t2[j+1], t2[j]]`. The first quad replaces `faces[f1]`,
    /// the second `faces[f2]`, the rest are appended.
    fn stitch_bands(&mut self, f1: usize, f2: usize, rings: &[[usize; 4]]) {
        let mut count = 0;
        for pair in rings.windows(2) {
            let (t1, t2) = (pair[0], pair[1]);
            for j in 0..4 {
                let j1 = (j + 1) % 4;
                let quad = vec![t1[j], t1[j1], t2[j1], t2[j]];
                match count {
                    0 => self.faces[f1] = quad,
                    1 => self.faces[f2] = quad,
                    _ => self.faces.push(quad),
                }
                count += 1;
            }
        }
        trace!("stitched {count} quads between faces {f1} and {f2}");
    }
}

/// `(π - ∠(n1, n2)) / 2`, measured as half the angle between `n1` and `-n2`.
///
/// `atan2(|n1 × n2|, -n1 · n2)` stays accurate when the normals are nearly
/// antiparallel, where `acos` of the dot product loses most of its digits.
fn half_opening_angle(n1: &Vector3<Real>, n2: &Vector3<Real>) -> Real {
    n1.cross(n2).norm().atan2(-n1.dot(n2)) * 0.5
}

/// Build the handle frame from the center offset `c12` and the normal sum.
/// `None` when the centers coincide or the normal sum is parallel to `c12`.
fn handle_frame(c12: Vector3<Real>, normal_sum: Vector3<Real>) -> Option<Frame> {
    let e0 = c12.try_normalize(tolerance())?;
    let e1 = (normal_sum - e0 * e0.dot(&normal_sum)).try_normalize(tolerance())?;
    let e2 = e0.cross(&e1).normalize();
    Some(Frame { e0, e1, e2 })
}
