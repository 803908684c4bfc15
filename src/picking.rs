//! Ray picking against generated meshes
//!
//! Used to turn a pointer ray into the triangle, and from there the cell, it
//! lands on. Requires the `picking` feature.

use glam::Vec3;
use parry3d::math::{Point, Vector};
use parry3d::query::{Ray, RayCast};
use parry3d::shape::Triangle;

use crate::mesh::MeshData;

/// The nearest intersection of a ray with a mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space intersection point
    pub point: Vec3,
    /// Distance from the ray origin
    pub distance: f32,
    /// Index of the triangle that was hit (`indices[3 * triangle..]`)
    pub triangle: usize,
}

#[inline]
fn to_point(v: Vec3) -> Point<f32> {
    Point::new(v.x, v.y, v.z)
}

/// Cast a ray against every triangle of `mesh` and return the closest hit
///
/// Triangles are hit from either side. Returns `None` for a zero-length
/// direction or when nothing lies within `max_distance`.
///
/// # Example
///
/// ```
/// use hex_terrain::*;
/// use hex_terrain::picking::raycast;
///
/// let config = GridConfigBuilder::new().size(1, 1).unwrap().build().unwrap();
/// let grid = HexGrid::with_noise(config, ConstantNoise::neutral()).unwrap();
///
/// let hit = raycast(grid.mesh(), Vec3::new(1.0, 10.0, 2.0), Vec3::NEG_Y, 100.0).unwrap();
/// assert!((hit.distance - 10.0).abs() < 1e-4);
/// ```
pub fn raycast(
    mesh: &MeshData,
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
) -> Option<RayHit> {
    let direction = direction.try_normalize()?;
    let ray = Ray::new(to_point(origin), Vector::new(direction.x, direction.y, direction.z));

    let mut nearest: Option<RayHit> = None;
    for (index, [a, b, c]) in mesh.triangles().enumerate() {
        let triangle = Triangle::new(to_point(a), to_point(b), to_point(c));
        let Some(distance) = triangle.cast_local_ray(&ray, max_distance, true) else {
            continue;
        };
        if nearest.map_or(true, |hit| distance < hit.distance) {
            nearest = Some(RayHit {
                point: origin + direction * distance,
                distance,
                triangle: index,
            });
        }
    }

    nearest
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two triangles stacked above each other at y = 0 and y = 5
    fn stacked() -> MeshData {
        let mut mesh = MeshData::default();
        for y in [0.0, 5.0] {
            let base = mesh.positions.len() as u32;
            mesh.positions
                .extend([[0.0, y, 0.0], [0.0, y, 10.0], [10.0, y, 0.0]]);
            mesh.colors.extend([[1.0; 4]; 3]);
            mesh.indices.extend([base, base + 1, base + 2]);
        }
        mesh
    }

    #[test]
    fn test_nearest_hit_wins() {
        let mesh = stacked();
        let hit = raycast(&mesh, Vec3::new(1.0, 20.0, 1.0), Vec3::NEG_Y, 100.0).unwrap();
        assert_eq!(hit.triangle, 1);
        assert!((hit.distance - 15.0).abs() < 1e-4);
        assert!((hit.point - Vec3::new(1.0, 5.0, 1.0)).length() < 1e-4);

        // From below, the lower triangle is closer
        let hit = raycast(&mesh, Vec3::new(1.0, -3.0, 1.0), Vec3::Y, 100.0).unwrap();
        assert_eq!(hit.triangle, 0);
        assert!((hit.distance - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_direction_is_normalized() {
        let mesh = stacked();
        let origin = Vec3::new(1.0, 20.0, 1.0);
        let hit = raycast(&mesh, origin, Vec3::new(0.0, -4.0, 0.0), 100.0).unwrap();
        assert!((hit.distance - 15.0).abs() < 1e-4);
    }

    #[test]
    fn test_misses() {
        let mesh = stacked();
        assert!(raycast(&mesh, Vec3::new(20.0, 20.0, 20.0), Vec3::NEG_Y, 100.0).is_none());
        assert!(raycast(&mesh, Vec3::new(1.0, 20.0, 1.0), Vec3::Y, 100.0).is_none());
        assert!(raycast(&mesh, Vec3::new(1.0, 20.0, 1.0), Vec3::NEG_Y, 10.0).is_none());
        assert!(raycast(&mesh, Vec3::new(1.0, 20.0, 1.0), Vec3::ZERO, 100.0).is_none());
        assert!(raycast(&MeshData::default(), Vec3::ZERO, Vec3::NEG_Y, 100.0).is_none());
    }
}
