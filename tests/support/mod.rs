//! Test support library
//! Provides shared cages and helpers for the integration tests.

#![allow(dead_code)]

use handlebody::float_types::Real;
use handlebody::{Cage, Polyhedron};
use nalgebra::Point3;

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Build and resolve a cage, failing the test on any error.
pub fn resolved(cage: &Cage) -> Polyhedron {
    let mut poly = cage.build().expect("cage should build");
    poly.update_vertices().expect("neighborhoods should resolve");
    poly
}

/// Two unit squares in the `y = 0` plane, both facing +Y, centered at
/// `(-offset, 0, 0)` and `(offset, 0, 0)`. The second starts two corners
/// later so a handle between them is not twisted.
pub fn parallel_squares(offset: Real) -> Cage {
    let mut points = Vec::new();
    for (dx, dz) in [(-0.5, -0.5), (-0.5, 0.5), (0.5, 0.5), (0.5, -0.5)] {
        points.push(Point3::new(-offset + dx, 0.0, dz));
    }
    for (dx, dz) in [(0.5, 0.5), (0.5, -0.5), (-0.5, -0.5), (-0.5, 0.5)] {
        points.push(Point3::new(offset + dx, 0.0, dz));
    }
    Cage::new(points, vec![vec![0, 1, 2, 3], vec![4, 5, 6, 7]])
}

/// Two unit squares facing each other across a gap: the first at `y = 0`
/// facing +Y, the second at `y = gap` facing -Y.
pub fn facing_squares(gap: Real) -> Cage {
    let mut points = Vec::new();
    for (dx, dz) in [(-0.5, -0.5), (-0.5, 0.5), (0.5, 0.5), (0.5, -0.5)] {
        points.push(Point3::new(dx, 0.0, dz));
    }
    for (dx, dz) in [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)] {
        points.push(Point3::new(dx, gap, dz));
    }
    Cage::new(points, vec![vec![0, 1, 2, 3], vec![4, 5, 6, 7]])
}

/// Does every face of `poly` have exactly four corners?
pub fn all_quads(poly: &Polyhedron) -> bool {
    poly.faces().iter().all(|f| f.vertices.len() == 4)
}
