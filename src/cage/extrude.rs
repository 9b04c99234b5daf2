//! Face extrusion on a `Cage`

use crate::cage::Cage;
use crate::errors::{MeshError, Result, ValidationError};
use crate::float_types::{Real, tolerance};
use log::trace;

impl Cage {
    /// Push face `face` out by `distance` along its normal, turning it into a prism.
    ///
    /// The normal is `cross(p1 - p0, p2 - p0)` over the first three corners, so
    /// the face is assumed planar and convex there. A displaced copy of the
    /// corners is appended to `points`, `faces[face]` is rewritten to use the
    /// copies, and one wall quad `[a(j), a(j+1), b(j+1), b(j)]` per original edge
    /// is appended. A zero distance changes topology only.
    pub fn extrude(&mut self, face: usize, distance: Real) -> Result<()> {
        let corners = self.face_points(face)?;
        let m = corners.len();
        if m < 3 {
            return Err(ValidationError::FaceTooSmall { face, count: m }.into());
        }

        let normal = (corners[1] - corners[0])
            .cross(&(corners[2] - corners[0]))
            .try_normalize(tolerance())
            .ok_or(MeshError::DegenerateFace { face })?;
        let delta = normal * distance;

        let base = self.points.len();
        let ring = self.faces[face].clone();
        self.points.extend(corners.iter().map(|p| p + delta));

        for j in 0..m {
            let j1 = (j + 1) % m;
            self.faces.push(vec![ring[j], ring[j1], base + j1, base + j]);
        }
        self.faces[face] = (base..base + m).collect();

        trace!("extruded face {face} by {distance}: {m} walls, points {base}..{}", base + m);
        Ok(())
    }
}
