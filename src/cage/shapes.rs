//! Starter control cages

use crate::cage::Cage;
use crate::float_types::Real;
use nalgebra::Point3;

impl Cage {
    /// Axis-aligned cube of edge `size`, centered at the origin.
    ///
    /// ```text
    /// Vertex i sits at (±s/2, ±s/2, ±s/2) with x = bit 0, y = bit 1, z = bit 2:
    ///
    ///     6-------7
    ///    /|      /|
    ///   4-------5 |
    ///   | 2-----|-3
    ///   |/      |/
    ///   0-------1
    /// ```
    /// Faces, in order: -Z, +Z, -Y, +Y, -X, +X, each wound counter-clockwise
    /// seen from outside.
    pub fn cube(size: Real) -> Cage {
        let h = size * 0.5;
        let points = (0..8)
            .map(|i| {
                let coord = |bit: usize| if i & (1 << bit) != 0 { h } else { -h };
                Point3::new(coord(0), coord(1), coord(2))
            })
            .collect();
        let faces = vec![
            vec![0, 2, 3, 1],
            vec![4, 5, 7, 6],
            vec![0, 1, 5, 4],
            vec![2, 6, 7, 3],
            vec![0, 4, 6, 2],
            vec![1, 3, 7, 5],
        ];
        Cage::new(points, faces)
    }

    /// A box of `cells` unit cells (scaled by `cell_size`) laid along +X, with
    /// its corner at the origin and square cross-section in Y/Z.
    ///
    /// Points come in rings of four per slice `r` (`4r..4r+4`), cycling through
    /// `(y, z)` = (0,0), (1,0), (1,1), (0,1). Side faces come first, four per cell
    /// in the order -Z, +Y, +Z, -Y, so side `k` of cell `c` is face `4c + k`;
    /// the -X and +X caps are the last two faces.
    ///
    /// A side face starts on the ring nearer its end of the bar, so matching
    /// sides of mirrored cells (`4c + k` and `4(cells - 1 - c) + k`) line up
    /// corner for corner under [`add_handle`](Self::add_handle).
    ///
    /// # Panics
    /// If `cells` is zero.
    pub fn segmented_bar(cells: usize, cell_size: Real) -> Cage {
        assert!(cells > 0, "a bar needs at least one cell");

        const RING: [(Real, Real); 4] = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];

        let mut points = Vec::with_capacity(4 * (cells + 1));
        for r in 0..=cells {
            for (y, z) in RING {
                points.push(Point3::new(r as Real, y, z) * cell_size);
            }
        }

        let mut faces = Vec::with_capacity(4 * cells + 2);
        for c in 0..cells {
            let (a, b) = (4 * c, 4 * (c + 1));
            let far_half = 2 * c >= cells;
            for k in 0..4 {
                let k1 = (k + 1) % 4;
                if far_half {
                    faces.push(vec![b + k1, b + k, a + k, a + k1]);
                } else {
                    faces.push(vec![a + k, a + k1, b + k1, b + k]);
                }
            }
        }
        faces.push(vec![3, 2, 1, 0]);
        let last = 4 * cells;
        faces.push(vec![last, last + 1, last + 2, last + 3]);

        Cage::new(points, faces)
    }
}
