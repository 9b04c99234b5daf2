//! Procedural polyhedral control cages smoothed with **Catmull-Clark subdivision**.
//!
//! A [`Cage`] holds raw points and face index lists. It is edited with
//! [`Cage::extrude`] and [`Cage::add_handle`] (a tube between two quads, which
//! raises the genus of a closed surface), then built into a [`Polyhedron`]:
//! an index arena of vertices, edges and faces with full mutual adjacency.
//! After [`Polyhedron::update_vertices`] resolves the ring around every vertex,
//! [`Polyhedron::catmull_clark`] produces a finer polyhedron, and the result is
//! exported as a triangulated [`SurfaceMesh`](polyhedron::export::SurfaceMesh)
//! or a [`Wireframe`](polyhedron::export::Wireframe).
//!
//! ```
//! use handlebody::Cage;
//!
//! let mut cage = Cage::segmented_bar(3, 1.0);
//! cage.add_handle(1, 9).unwrap();
//!
//! let smooth = cage.build().unwrap().subdivide(2).unwrap();
//! assert_eq!(smooth.genus(), Some(1));
//! let surface = smooth.create_mesh().unwrap();
//! assert_eq!(surface.vertex_count(), smooth.vertices().len());
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon for the per-element passes of subdivision

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod cage;
pub mod errors;
pub mod float_types;
pub mod polyhedron;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use cage::{Cage, HandleConfig, HandleShape};
pub use errors::{MeshError, Result, ValidationError};
pub use polyhedron::Polyhedron;
pub use polyhedron::export::{Color, SurfaceMesh, Wireframe};
