//! Mesh generation for hex grids
//!
//! Turns a slice of [`HexCell`]s into engine-agnostic vertex, color and index
//! buffers. Every cell gets a solid hexagonal body; the gaps between cells are
//! closed with blended strips (flat, cliff or terraced) and the three-cell
//! corners are plugged according to the corner decision table in
//! [`classify_corner`].

mod colors;
mod corner;
mod edge;

pub use colors::{lerp_color, HexColor, WHITE};
pub use corner::{classify_corner, CornerCase};
pub use edge::EdgeVertices;

use glam::Vec3;
use log::debug;

use crate::cell::{neighbors_are_symmetric, HexCell};
use crate::hex::{EdgeType, HexDirection};
use crate::metrics::HexMetrics;
use crate::noise::NoiseSource;

/// Engine-agnostic mesh data output
///
/// Every triangle owns its three vertices, so colors never bleed between
/// triangles that merely share a position.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// Vertex positions (3D coordinates)
    pub positions: Vec<[f32; 3]>,
    /// Vertex colors (RGBA), one per position
    pub colors: Vec<HexColor>,
    /// Triangle indices, three per triangle
    pub indices: Vec<u32>,
    /// Vertex normals; empty until [`MeshData::recalculate_normals`] is called
    pub normals: Vec<[f32; 3]>,
}

impl MeshData {
    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Drop all geometry but keep the allocations
    pub fn clear(&mut self) {
        self.positions.clear();
        self.colors.clear();
        self.indices.clear();
        self.normals.clear();
    }

    /// Iterate over the corner positions of every triangle
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(move |tri| [tri[0], tri[1], tri[2]].map(|i| self.position(i)))
    }

    #[inline]
    fn position(&self, index: u32) -> Vec3 {
        Vec3::from_array(self.positions[index as usize])
    }

    /// Rebuild the normal buffer from the triangle faces
    pub fn recalculate_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| self.position(i));
            let face = (b - a).cross(c - a);
            for &i in tri {
                normals[i as usize] += face;
            }
        }
        self.normals = normals
            .into_iter()
            .map(|n| n.normalize_or_zero().to_array())
            .collect();
    }

    fn add_triangle_unperturbed(&mut self, v1: Vec3, v2: Vec3, v3: Vec3) {
        let vertex_index = self.positions.len() as u32;
        self.positions.extend([v1, v2, v3].map(|v| v.to_array()));
        self.indices
            .extend([vertex_index, vertex_index + 1, vertex_index + 2]);
    }

    /// Append a quad as two triangles: (v1, v3, v2) and (v2, v3, v4)
    fn add_quad_unperturbed(&mut self, v1: Vec3, v2: Vec3, v3: Vec3, v4: Vec3) {
        let vertex_index = self.positions.len() as u32;
        self.positions.extend([v1, v2, v3, v4].map(|v| v.to_array()));
        self.indices.extend([
            vertex_index,
            vertex_index + 2,
            vertex_index + 1,
            vertex_index + 1,
            vertex_index + 2,
            vertex_index + 3,
        ]);
    }

    fn add_triangle_color(&mut self, color: HexColor) {
        self.colors.extend([color; 3]);
    }

    fn add_triangle_colors(&mut self, c1: HexColor, c2: HexColor, c3: HexColor) {
        self.colors.extend([c1, c2, c3]);
    }

    /// First two vertices get `c1`, the last two `c2`
    fn add_quad_color(&mut self, c1: HexColor, c2: HexColor) {
        self.colors.extend([c1, c1, c2, c2]);
    }

    fn add_quad_colors(&mut self, c1: HexColor, c2: HexColor, c3: HexColor, c4: HexColor) {
        self.colors.extend([c1, c2, c3, c4]);
    }
}

/// Reusable triangulation buffers
///
/// Each call to [`HexMesh::triangulate`] clears the buffers and rebuilds the
/// whole mesh; there is no incremental update. A single instance must not be
/// shared between threads while a pass is running.
#[derive(Debug, Clone, Default)]
pub struct HexMesh {
    data: MeshData,
}

impl HexMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the mesh for `cells`.
    ///
    /// Neighbor indices refer to positions in `cells`.
    ///
    /// # Panics
    ///
    /// Panics if the neighbor links of `cells` are not symmetric.
    pub fn triangulate<N>(
        &mut self,
        cells: &[HexCell],
        metrics: &HexMetrics,
        noise: &N,
    ) -> &MeshData
    where
        N: NoiseSource + ?Sized,
    {
        assert!(neighbors_are_symmetric(cells), "asymmetric neighbor links");

        self.data.clear();
        let mut triangulator = Triangulator {
            cells,
            metrics,
            noise,
            data: &mut self.data,
        };
        for cell in cells {
            triangulator.triangulate_cell(cell);
        }

        debug!(
            "triangulated {} cells into {} vertices, {} triangles",
            cells.len(),
            self.data.vertex_count(),
            self.data.triangle_count()
        );

        &self.data
    }

    /// Buffers from the last triangulation pass
    pub fn data(&self) -> &MeshData {
        &self.data
    }

    pub fn into_data(self) -> MeshData {
        self.data
    }
}

/// Triangulate `cells` into fresh buffers
///
/// # Example
///
/// ```
/// use hex_terrain::*;
///
/// let config = GridConfigBuilder::new().size(2, 2).unwrap().build().unwrap();
/// let grid = HexGrid::with_noise(config, ConstantNoise::neutral()).unwrap();
///
/// let mesh = triangulate(grid.cells(), grid.metrics(), &ConstantNoise::neutral());
/// assert_eq!(mesh.positions.len(), mesh.colors.len());
/// assert_eq!(mesh.indices.len() % 3, 0);
/// ```
pub fn triangulate<N>(cells: &[HexCell], metrics: &HexMetrics, noise: &N) -> MeshData
where
    N: NoiseSource + ?Sized,
{
    let mut mesh = HexMesh::new();
    mesh.triangulate(cells, metrics, noise);
    mesh.into_data()
}

/// State of a single triangulation pass
struct Triangulator<'a, N: ?Sized> {
    cells: &'a [HexCell],
    metrics: &'a HexMetrics,
    noise: &'a N,
    data: &'a mut MeshData,
}

impl<'a, N: NoiseSource + ?Sized> Triangulator<'a, N> {
    fn triangulate_cell(&mut self, cell: &'a HexCell) {
        for direction in HexDirection::ALL {
            self.triangulate_direction(direction, cell);
        }
    }

    fn neighbor(&self, cell: &HexCell, direction: HexDirection) -> Option<&'a HexCell> {
        let cells = self.cells;
        cell.neighbor(direction).map(|index| &cells[index])
    }

    fn triangulate_direction(&mut self, direction: HexDirection, cell: &'a HexCell) {
        let center = cell.position();
        let e = EdgeVertices::new(
            center + self.metrics.first_solid_corner(direction),
            center + self.metrics.second_solid_corner(direction),
        );

        self.triangulate_edge_fan(center, &e, cell.color);

        if direction.owns_connection() {
            self.triangulate_connection(direction, cell, &e);
        }
    }

    fn triangulate_connection(
        &mut self,
        direction: HexDirection,
        cell: &'a HexCell,
        e1: &EdgeVertices,
    ) {
        let Some(neighbor) = self.neighbor(cell, direction) else {
            return;
        };

        let mut bridge = self.metrics.bridge(direction);
        bridge.y = neighbor.position().y - cell.position().y;
        let e2 = EdgeVertices::new(e1.v1 + bridge, e1.v4 + bridge);

        if cell.edge_type_to(neighbor) == EdgeType::Slope {
            self.triangulate_edge_terraces(e1, cell, &e2, neighbor);
        } else {
            self.triangulate_edge_strip(e1, cell.color, &e2, neighbor.color);
        }

        if !direction.owns_corner() {
            return;
        }
        if let Some(next_neighbor) = self.neighbor(cell, direction.next()) {
            let mut v5 = e1.v4 + self.metrics.bridge(direction.next());
            v5.y = next_neighbor.position().y;

            let (bottom, left, right) = corner::lowest_first(
                corner::CornerVertex::new(e1.v4, cell),
                corner::CornerVertex::new(e2.v4, neighbor),
                corner::CornerVertex::new(v5, next_neighbor),
            );
            self.triangulate_corner(bottom, left, right);
        }
    }

    fn triangulate_edge_terraces(
        &mut self,
        begin: &EdgeVertices,
        begin_cell: &HexCell,
        end: &EdgeVertices,
        end_cell: &HexCell,
    ) {
        let metrics = self.metrics;
        let mut e2 = EdgeVertices::terrace_lerp(begin, end, 1, metrics);
        let mut c2 = metrics.terrace_lerp_color(begin_cell.color, end_cell.color, 1);
        self.triangulate_edge_strip(begin, begin_cell.color, &e2, c2);

        for step in 2..metrics.terrace_steps() {
            let e1 = e2;
            let c1 = c2;
            e2 = EdgeVertices::terrace_lerp(begin, end, step, metrics);
            c2 = metrics.terrace_lerp_color(begin_cell.color, end_cell.color, step);
            self.triangulate_edge_strip(&e1, c1, &e2, c2);
        }

        self.triangulate_edge_strip(&e2, c2, end, end_cell.color);
    }

    fn triangulate_edge_fan(&mut self, center: Vec3, edge: &EdgeVertices, color: HexColor) {
        self.add_triangle(center, edge.v1, edge.v2);
        self.data.add_triangle_color(color);
        self.add_triangle(center, edge.v2, edge.v3);
        self.data.add_triangle_color(color);
        self.add_triangle(center, edge.v3, edge.v4);
        self.data.add_triangle_color(color);
    }

    fn triangulate_edge_strip(
        &mut self,
        e1: &EdgeVertices,
        c1: HexColor,
        e2: &EdgeVertices,
        c2: HexColor,
    ) {
        self.add_quad(e1.v1, e1.v2, e2.v1, e2.v2);
        self.data.add_quad_color(c1, c2);
        self.add_quad(e1.v2, e1.v3, e2.v2, e2.v3);
        self.data.add_quad_color(c1, c2);
        self.add_quad(e1.v3, e1.v4, e2.v3, e2.v4);
        self.data.add_quad_color(c1, c2);
    }

    #[inline]
    fn perturb(&self, position: Vec3) -> Vec3 {
        self.metrics.perturb(position, self.noise)
    }

    fn add_triangle(&mut self, v1: Vec3, v2: Vec3, v3: Vec3) {
        let (v1, v2, v3) = (self.perturb(v1), self.perturb(v2), self.perturb(v3));
        self.data.add_triangle_unperturbed(v1, v2, v3);
    }

    fn add_quad(&mut self, v1: Vec3, v2: Vec3, v3: Vec3, v4: Vec3) {
        let (v1, v2, v3, v4) = (
            self.perturb(v1),
            self.perturb(v2),
            self.perturb(v3),
            self.perturb(v4),
        );
        self.data.add_quad_unperturbed(v1, v2, v3, v4);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::link_neighbors;
    use crate::hex::HexCoordinates;
    use crate::noise::ConstantNoise;

    /// Row-major cells linked like a grid, with the given elevations
    fn row_of_cells(elevations: &[i32], metrics: &HexMetrics) -> Vec<HexCell> {
        let mut cells: Vec<HexCell> = elevations
            .iter()
            .enumerate()
            .map(|(col, &elevation)| {
                let col = col as i32;
                let mut cell = HexCell::new(
                    HexCoordinates::from_offset(col, 0),
                    metrics.cell_position(col, 0, 0),
                    WHITE,
                );
                cell.set_elevation(elevation, metrics);
                cell
            })
            .collect();
        for i in 1..cells.len() {
            link_neighbors(&mut cells, i, HexDirection::W, i - 1);
        }
        cells
    }

    #[test]
    fn test_single_cell_body() {
        let metrics = HexMetrics::default();
        let cells = row_of_cells(&[0], &metrics);
        let mesh = triangulate(&cells, &metrics, &ConstantNoise::neutral());

        // Six directions, three fan triangles each
        assert_eq!(mesh.triangle_count(), 18);
        assert_eq!(mesh.vertex_count(), 54);
        assert_eq!(mesh.colors.len(), mesh.vertex_count());
        assert!(mesh.colors.iter().all(|&c| c == WHITE));
    }

    #[test]
    fn test_flat_pair_gets_one_strip() {
        let metrics = HexMetrics::default();
        let cells = row_of_cells(&[0, 0], &metrics);
        let mesh = triangulate(&cells, &metrics, &ConstantNoise::neutral());
        // 2 bodies + 3 quads, no corner (a single row has no third cell)
        assert_eq!(mesh.triangle_count(), 36 + 6);
    }

    #[test]
    fn test_slope_connection_is_terraced() {
        let metrics = HexMetrics::default();
        let mut cells = row_of_cells(&[0, 1], &metrics);
        cells[1].color = [0.0, 0.0, 1.0, 1.0];
        let mesh = triangulate(&cells, &metrics, &ConstantNoise::neutral());

        let steps = metrics.terrace_steps() as usize;
        assert_eq!(steps, 5);
        // 2 bodies + one strip of three quads per terrace step
        assert_eq!(mesh.triangle_count(), 36 + steps * 3 * 2);

        // Cell 0 emits its NE fan, then its E fan, then the E connection
        let start = 18;
        let quads_per_strip = 3 * 4;
        let step = metrics.elevation_step / 3.0;
        let rows = [0.0, 1.0, 1.0, 2.0, 2.0, 3.0];
        for k in 0..steps {
            let first_quad = start + k * quads_per_strip;
            let near = mesh.positions[first_quad][1];
            let far = mesh.positions[first_quad + 2][1];
            assert!((near - rows[k] * step).abs() < 1e-4, "strip {} near {}", k, near);
            assert!((far - rows[k + 1] * step).abs() < 1e-4, "strip {} far {}", k, far);
        }

        // Colors blend continuously across the terraces
        let blue_at_end = mesh.colors[start + (steps - 1) * quads_per_strip + 2];
        assert_eq!(blue_at_end, [0.0, 0.0, 1.0, 1.0]);
        let blend = mesh.colors[start + 2][0];
        assert!((blend - 0.8).abs() < 1e-5);
    }

    #[test]
    fn test_cliff_connection_is_single_strip() {
        let metrics = HexMetrics::default();
        let cells = row_of_cells(&[0, 3], &metrics);
        let mesh = triangulate(&cells, &metrics, &ConstantNoise::neutral());
        assert_eq!(mesh.triangle_count(), 36 + 6);
    }

    #[test]
    fn test_rebuild_discards_previous_buffers() {
        let metrics = HexMetrics::default();
        let noise = ConstantNoise::neutral();
        let mut mesh = HexMesh::new();

        let cells = row_of_cells(&[0, 1], &metrics);
        let first = mesh.triangulate(&cells, &metrics, &noise).triangle_count();
        let again = mesh.triangulate(&cells, &metrics, &noise).triangle_count();
        assert_eq!(first, again);

        let flat = row_of_cells(&[0, 0], &metrics);
        assert_eq!(mesh.triangulate(&flat, &metrics, &noise).triangle_count(), 42);
    }

    #[test]
    fn test_perturbation_moves_vertices() {
        let metrics = HexMetrics::default();
        let cells = row_of_cells(&[0], &metrics);
        let still = triangulate(&cells, &metrics, &ConstantNoise::neutral());
        let moved = triangulate(&cells, &metrics, &ConstantNoise::new(glam::Vec4::ONE));
        let a = still.positions[0];
        let b = moved.positions[0];
        assert!((b[0] - a[0] - 4.0).abs() < 1e-5);
        assert_eq!(b[1], a[1]);
        assert!((b[2] - a[2] - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_recalculate_normals_point_up_on_flat_ground() {
        let metrics = HexMetrics::default();
        let cells = row_of_cells(&[0, 0], &metrics);
        let mut mesh = triangulate(&cells, &metrics, &ConstantNoise::neutral());
        assert!(mesh.normals.is_empty());
        mesh.recalculate_normals();
        assert_eq!(mesh.normals.len(), mesh.vertex_count());
        for n in &mesh.normals {
            assert!((n[1] - 1.0).abs() < 1e-4, "normal {:?}", n);
        }
    }

    #[test]
    fn test_triangles_iterator() {
        let metrics = HexMetrics::default();
        let cells = row_of_cells(&[0], &metrics);
        let mesh = triangulate(&cells, &metrics, &ConstantNoise::neutral());
        let triangles: Vec<_> = mesh.triangles().collect();
        assert_eq!(triangles.len(), mesh.triangle_count());
        // The first fan triangle starts at the cell center
        assert_eq!(triangles[0][0], cells[0].position());
    }
}
