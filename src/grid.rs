//! HexGrid main structure

use glam::Vec3;
use log::debug;

use crate::cell::{link_neighbors, HexCell};
use crate::config::GridConfig;
use crate::error::{HexError, Result};
use crate::hex::{HexCoordinates, HexDirection};
use crate::mesh::{HexColor, HexMesh, MeshData};
use crate::metrics::HexMetrics;
use crate::noise::{NoiseSource, NoiseTexture, PerlinConfig};

/// A rectangular map of hex cells together with its mesh
///
/// Cells are stored row by row; a cell's index is `row * width + col`. The
/// grid owns the noise used to perturb vertices and the reusable mesh
/// buffers, which [`HexGrid::refresh`] rebuilds after edits.
///
/// # Type Parameters
///
/// * `N` - Noise source used for vertex perturbation (defaults to a generated
///   [`NoiseTexture`])
///
/// # Examples
///
/// ```
/// use hex_terrain::*;
///
/// let config = GridConfigBuilder::new()
///     .size(4, 3)
///     .unwrap()
///     .noise_seed(42)
///     .build()
///     .unwrap();
///
/// let mut grid = HexGrid::generate(config).unwrap();
/// grid.set_elevation(5, 1).unwrap();
///
/// let mesh = grid.refresh();
/// println!("{} triangles", mesh.triangle_count());
/// ```
#[derive(Debug, Clone)]
pub struct HexGrid<N = NoiseTexture> {
    config: GridConfig,
    cells: Vec<HexCell>,
    noise: N,
    mesh: HexMesh,
}

impl HexGrid<NoiseTexture> {
    /// Create a grid whose perturbation noise is generated from
    /// `config.noise_seed`
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration is invalid.
    pub fn generate(config: GridConfig) -> Result<Self> {
        let noise = NoiseTexture::generate(config.noise_seed, &PerlinConfig::default())?;
        Self::with_noise(config, noise)
    }
}

impl<N: NoiseSource> HexGrid<N> {
    /// Create a grid that perturbs vertices with a custom noise source
    ///
    /// All cells start at elevation 0 with `config.default_color`. The mesh is
    /// triangulated once before returning.
    ///
    /// # Example
    ///
    /// ```
    /// use hex_terrain::*;
    ///
    /// // Unperturbed, exactly hexagonal geometry
    /// let config = GridConfigBuilder::new().size(3, 3).unwrap().build().unwrap();
    /// let grid = HexGrid::with_noise(config, ConstantNoise::neutral()).unwrap();
    /// assert_eq!(grid.cell_count(), 9);
    /// assert!(!grid.mesh().is_empty());
    /// ```
    pub fn with_noise(config: GridConfig, noise: N) -> Result<Self> {
        if config.width == 0 || config.height == 0 {
            return Err(HexError::InvalidConfig(format!(
                "grid size must be at least 1 x 1 (got {} x {})",
                config.width, config.height
            )));
        }
        let width = i32::try_from(config.width).map_err(|_| {
            HexError::InvalidConfig(format!("grid width too large: {}", config.width))
        })?;
        let height = i32::try_from(config.height).map_err(|_| {
            HexError::InvalidConfig(format!("grid height too large: {}", config.height))
        })?;

        let metrics = config.metrics;
        let mut cells = Vec::with_capacity(config.cell_count());
        for row in 0..height {
            for col in 0..width {
                cells.push(HexCell::new(
                    HexCoordinates::from_offset(col, row),
                    metrics.cell_position(col, row, 0),
                    config.default_color,
                ));
            }
        }
        link_grid(&mut cells, config.width);

        let mut grid = Self {
            config,
            cells,
            noise,
            mesh: HexMesh::new(),
        };
        grid.refresh();

        debug!(
            "created {}x{} hex grid with {} cells",
            grid.width(),
            grid.height(),
            grid.cell_count()
        );

        Ok(grid)
    }

    /// Rebuild the whole mesh from the current cell state
    pub fn refresh(&mut self) -> &MeshData {
        self.mesh
            .triangulate(&self.cells, &self.config.metrics, &self.noise)
    }

    /// Mesh from the last refresh
    #[inline]
    pub fn mesh(&self) -> &MeshData {
        self.mesh.data()
    }

    /// Change the elevation of a cell
    ///
    /// Call [`HexGrid::refresh`] afterwards to update the mesh.
    ///
    /// # Errors
    ///
    /// Returns `CellNotFound` if `index` is out of range.
    pub fn set_elevation(&mut self, index: usize, elevation: i32) -> Result<()> {
        let metrics = self.config.metrics;
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(HexError::CellNotFound(index))?;
        cell.set_elevation(elevation, &metrics);
        Ok(())
    }

    /// Change the color of a cell
    ///
    /// Call [`HexGrid::refresh`] afterwards to update the mesh.
    ///
    /// # Errors
    ///
    /// Returns `CellNotFound` if `index` is out of range.
    pub fn set_color(&mut self, index: usize, color: HexColor) -> Result<()> {
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(HexError::CellNotFound(index))?;
        cell.color = color;
        Ok(())
    }

    /// Index of the cell containing a world-space position
    ///
    /// Height is ignored. Returns `None` for positions outside the grid,
    /// including non-finite ones.
    pub fn cell_index_at(&self, position: Vec3) -> Option<usize> {
        if !position.is_finite() {
            return None;
        }
        let coordinates = HexCoordinates::from_position(position, &self.config.metrics);
        let (col, row) = coordinates.to_offset();
        if col < 0 || row < 0 {
            return None;
        }
        if col as usize >= self.config.width || row as usize >= self.config.height {
            return None;
        }
        Some(coordinates.to_offset_index(self.config.width as i32) as usize)
    }

    /// Cell containing a world-space position
    pub fn cell_at(&self, position: Vec3) -> Option<&HexCell> {
        self.cell_index_at(position).map(|index| &self.cells[index])
    }

    /// Index of the first cell hit by a ray through the current mesh
    ///
    /// # Example
    ///
    /// ```
    /// # use hex_terrain::*;
    /// let config = GridConfigBuilder::new().size(3, 3).unwrap().build().unwrap();
    /// let grid = HexGrid::with_noise(config, ConstantNoise::neutral()).unwrap();
    ///
    /// let above = grid.cell(4).unwrap().position() + Vec3::new(1.0, 50.0, 2.0);
    /// let picked = grid.pick(above, Vec3::NEG_Y);
    /// assert_eq!(picked, Some(4));
    /// ```
    #[cfg(feature = "picking")]
    pub fn pick(&self, origin: Vec3, direction: Vec3) -> Option<usize> {
        let hit = crate::picking::raycast(self.mesh(), origin, direction, f32::MAX)?;
        self.cell_index_at(hit.point)
    }
}

impl<N> HexGrid<N> {
    #[inline]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    #[inline]
    pub fn metrics(&self) -> &HexMetrics {
        &self.config.metrics
    }

    #[inline]
    pub fn noise(&self) -> &N {
        &self.noise
    }

    /// Number of columns
    #[inline]
    pub fn width(&self) -> usize {
        self.config.width
    }

    /// Number of rows
    #[inline]
    pub fn height(&self) -> usize {
        self.config.height
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Get a cell by index (returns None if out of bounds)
    #[inline]
    pub fn cell(&self, index: usize) -> Option<&HexCell> {
        self.cells.get(index)
    }

    /// All cells, row by row
    #[inline]
    pub fn cells(&self) -> &[HexCell] {
        &self.cells
    }
}

/// Wire up neighbor links for cells stored row by row
///
/// Every cell links to the cells already created before it (west, and the
/// row below); the reverse links are set by [`link_neighbors`].
fn link_grid(cells: &mut [HexCell], width: usize) {
    for i in 0..cells.len() {
        let col = i % width;
        let row = i / width;

        if col > 0 {
            link_neighbors(cells, i, HexDirection::W, i - 1);
        }
        if row == 0 {
            continue;
        }

        // Odd rows are shifted half a cell to the right
        if row % 2 == 0 {
            link_neighbors(cells, i, HexDirection::SE, i - width);
            if col > 0 {
                link_neighbors(cells, i, HexDirection::SW, i - width - 1);
            }
        } else {
            link_neighbors(cells, i, HexDirection::SW, i - width);
            if col < width - 1 {
                link_neighbors(cells, i, HexDirection::SE, i - width + 1);
            }
        }
    }
}
