//! Subdivided cell edges

use glam::Vec3;

use crate::metrics::HexMetrics;

/// Four points along a cell edge at 0, 1/3, 2/3 and 1
///
/// Splitting every edge in three keeps the blended strips between cells from
/// bleeding color into the corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeVertices {
    pub v1: Vec3,
    pub v2: Vec3,
    pub v3: Vec3,
    pub v4: Vec3,
}

impl EdgeVertices {
    pub fn new(corner1: Vec3, corner2: Vec3) -> Self {
        Self {
            v1: corner1,
            v2: corner1.lerp(corner2, 1.0 / 3.0),
            v3: corner1.lerp(corner2, 2.0 / 3.0),
            v4: corner2,
        }
    }

    /// Terrace-interpolate each of the four vertex pairs
    pub fn terrace_lerp(
        a: &EdgeVertices,
        b: &EdgeVertices,
        step: u32,
        metrics: &HexMetrics,
    ) -> Self {
        Self {
            v1: metrics.terrace_lerp(a.v1, b.v1, step),
            v2: metrics.terrace_lerp(a.v2, b.v2, step),
            v3: metrics.terrace_lerp(a.v3, b.v3, step),
            v4: metrics.terrace_lerp(a.v4, b.v4, step),
        }
    }
}
