//! Complete workflow demonstration for hex_terrain
//!
//! Run with `RUST_LOG=debug` to see the triangulation log.

use std::collections::HashMap;

use hex_terrain::mesh::classify_corner;
use hex_terrain::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn main() -> Result<()> {
    env_logger::init();

    println!("=== hex_terrain Demo ===\n");

    // Step 1: Configure grid
    println!("Step 1: Configuring grid...");
    let metrics = HexMetricsBuilder::new()
        .terraces_per_slope(2)?
        .cell_perturb_strength(3.0)?
        .build()?;
    let config = GridConfigBuilder::new()
        .size(12, 10)?
        .noise_seed(12345)
        .metrics(metrics)
        .build()?;

    println!("  Size: {} x {} ({} cells)", config.width, config.height, config.cell_count());
    println!("  Noise seed: {}", config.noise_seed);
    println!("  Terrace steps per slope: {}", config.metrics.terrace_steps());

    // Step 2: Create grid
    println!("\nStep 2: Creating grid...");
    let mut grid = HexGrid::generate(config)?;
    println!("  Flat mesh: {} triangles", grid.mesh().triangle_count());

    // Step 3: Paint random elevations and colors
    println!("\nStep 3: Painting terrain...");
    let palette: [HexColor; 4] = [
        [0.2, 0.5, 0.9, 1.0],
        [0.3, 0.7, 0.3, 1.0],
        [0.6, 0.5, 0.3, 1.0],
        [0.9, 0.9, 0.9, 1.0],
    ];
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for index in 0..grid.cell_count() {
        let elevation = rng.gen_range(0..4);
        grid.set_elevation(index, elevation)?;
        grid.set_color(index, palette[elevation as usize])?;
    }

    // Step 4: Analyze connections and corners
    println!("\nStep 4: Connection types:");
    let mut edges = HashMap::new();
    let mut corners = HashMap::new();
    for cell in grid.cells() {
        for direction in HexDirection::ALL {
            if !direction.owns_connection() {
                continue;
            }
            let Some(neighbor) = cell.neighbor(direction).and_then(|i| grid.cell(i)) else {
                continue;
            };
            *edges.entry(cell.edge_type_to(neighbor)).or_insert(0usize) += 1;

            if !direction.owns_corner() {
                continue;
            }
            if let Some(next) = cell.neighbor(direction.next()).and_then(|i| grid.cell(i)) {
                let mut elevations = [cell.elevation(), neighbor.elevation(), next.elevation()];
                let lowest = (0..3).min_by_key(|&i| elevations[i]).unwrap_or(0);
                elevations.rotate_left(lowest);
                let case = classify_corner(elevations[0], elevations[1], elevations[2]);
                *corners.entry(format!("{:?}", case)).or_insert(0usize) += 1;
            }
        }
    }
    let mut sorted_edges: Vec<_> = edges.iter().collect();
    sorted_edges.sort_by_key(|(edge, _)| format!("{:?}", edge));
    for (edge, count) in sorted_edges {
        println!("  {:?}: {}", edge, count);
    }
    println!("  Corners:");
    let mut sorted_corners: Vec<_> = corners.iter().collect();
    sorted_corners.sort();
    for (case, count) in sorted_corners {
        println!("    {}: {}", case, count);
    }

    // Step 5: Rebuild mesh
    println!("\nStep 5: Triangulating...");
    let mut mesh = grid.refresh().clone();
    mesh.recalculate_normals();
    println!("  Vertices: {}", mesh.vertex_count());
    println!("  Triangles: {}", mesh.triangle_count());

    // Memory estimate
    let mem = (mesh.positions.len() * 12 + mesh.normals.len() * 12 +
               mesh.colors.len() * 16 + mesh.indices.len() * 4) as f32 / 1024.0 / 1024.0;
    println!("  Memory: {:.2} MB", mem);

    // Step 6: Position lookups and picking
    println!("\nStep 6: Queries:");
    let center = grid.cells()[25].position();
    if let Some(cell) = grid.cell_at(center) {
        println!("  Position {:?} -> {}", center, cell.coordinates);
    }
    #[cfg(feature = "picking")]
    {
        let origin = center + Vec3::new(1.0, 100.0, 2.0);
        match grid.pick(origin, Vec3::NEG_Y) {
            Some(index) => println!("  Ray from {:?} picked cell {}", origin, index),
            None => println!("  Ray from {:?} missed", origin),
        }
    }

    println!("\n=== Demo Complete ===");

    Ok(())
}
