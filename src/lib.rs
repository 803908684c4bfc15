//! Terraced hex-grid terrain mesh generation
//!
//! A standalone library that turns a rectangular grid of hexagonal cells,
//! each with an elevation and a color, into a renderable triangle mesh with
//! blended color bands, stepped terraces on gentle slopes, vertical cliffs on
//! steep ones and noise-jittered vertices. The output is plain vertex, color
//! and index buffers suitable for any engine (Bevy, Godot, etc.)
//!
//! # Quick Start
//!
//! ```rust
//! use hex_terrain::*;
//!
//! // Create a grid
//! let config = GridConfigBuilder::new()
//!     .size(8, 8).unwrap()
//!     .noise_seed(42)
//!     .build().unwrap();
//!
//! let mut grid = HexGrid::generate(config).unwrap();
//!
//! // Raise a few cells, then rebuild the mesh for rendering
//! grid.set_elevation(9, 1).unwrap();
//! grid.set_elevation(10, 3).unwrap();
//! grid.set_color(10, [0.4, 0.3, 0.2, 1.0]).unwrap();
//!
//! let mesh = grid.refresh();
//! println!("Generated {} triangles", mesh.triangle_count());
//! ```
//!
//! # Features
//!
//! - `picking` (default): ray casts against the mesh via `parry3d`
//! - `serde`: Enables serialization support for configuration and coordinates

// Modules
pub mod error;
pub mod config;
pub mod hex;
pub mod metrics;
pub mod noise;
pub mod cell;
pub mod grid;
pub mod mesh;

#[cfg(feature = "picking")]
pub mod picking;

// Re-export core types for convenience
pub use error::{HexError, Result};
pub use config::{GridConfig, GridConfigBuilder, HexMetricsBuilder};
pub use hex::{EdgeType, HexCoordinates, HexDirection};
pub use metrics::{classify_edge, HexMetrics, OUTER_TO_INNER};
pub use noise::{ConstantNoise, NoiseSource, NoiseTexture, PerlinConfig};
pub use cell::HexCell;
pub use grid::HexGrid;
pub use mesh::{triangulate, HexColor, HexMesh, MeshData};

#[cfg(feature = "picking")]
pub use picking::RayHit;

// Re-export glam::Vec3 for convenience
pub use glam::Vec3;
