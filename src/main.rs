// main.rs
//
// Builds a small genus-one cage (a three-cell bar whose outer top faces are
// bridged by a handle), smooths it, and reports what would be handed to a renderer.
// Set RUST_LOG=debug to see per-level subdivision statistics.

use handlebody::{Cage, Polyhedron};
use log::{error, info};

const SUBDIVISION_LEVELS: usize = 2;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> handlebody::Result<()> {
    let mut cage = Cage::segmented_bar(3, 1.0);
    // Raise the outer cells before bridging them
    cage.extrude(1, 0.5)?;
    cage.extrude(9, 0.5)?;
    let shape = cage.add_handle(1, 9)?;
    info!("handle: {shape:?}");

    let mut control = cage.build()?;
    control.update_vertices()?;
    control.check()?;
    report("control cage", &control);

    let cage_lines = control.create_line_system(None, true);
    info!("control wireframe: {} polylines", cage_lines.lines.len());

    let smooth = control.subdivide(SUBDIVISION_LEVELS)?;
    report("smoothed", &smooth);

    let surface = smooth.create_mesh()?;
    info!(
        "surface: {} vertices, {} triangles",
        surface.vertex_count(),
        surface.triangle_count()
    );
    Ok(())
}

fn report(label: &str, poly: &Polyhedron) {
    info!(
        "{label}: {} vertices, {} edges, {} faces, genus {:?}",
        poly.vertices().len(),
        poly.edges().len(),
        poly.faces().len(),
        poly.genus()
    );
}
