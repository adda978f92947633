//! Wireframe geometry for debug helpers
//!
//! Both shapes are built in a light's local frame: apex at the origin,
//! opening along -Z, matching a right-handed look-at view.

use super::GeometryData;
use cgmath::Rad;
use std::f32::consts::TAU;

const LINE_NORMAL: [f32; 3] = [0.0, 0.0, 1.0];

/// Cone of a spot light: a circle at `length` plus rays from the apex
pub fn generate_spot_cone_lines(length: f32, angle: Rad<f32>, segments: u32) -> GeometryData {
    let mut data = GeometryData::lines();
    let segments = segments.max(4);
    let radius = length * angle.0.tan();

    let apex = data.push_vertex([0.0, 0.0, 0.0], LINE_NORMAL);
    let ring = data.vertices.len() as u32;

    for i in 0..segments {
        let theta = TAU * i as f32 / segments as f32;
        data.push_vertex(
            [radius * theta.cos(), radius * theta.sin(), -length],
            LINE_NORMAL,
        );
    }

    for i in 0..segments {
        data.indices
            .extend_from_slice(&[ring + i, ring + (i + 1) % segments]);
    }

    // Four rays are enough to read the cone's opening
    for i in (0..segments).step_by((segments / 4) as usize) {
        data.indices.extend_from_slice(&[apex, ring + i]);
    }

    data
}

/// Perspective frustum with a vertical field of view
pub fn generate_frustum_lines(fovy: Rad<f32>, aspect: f32, near: f32, far: f32) -> GeometryData {
    let mut data = GeometryData::lines();
    let tan_half = (fovy.0 * 0.5).tan();

    let apex = data.push_vertex([0.0, 0.0, 0.0], LINE_NORMAL);
    let mut planes = [[0u32; 4]; 2];

    for (plane, distance) in [near, far].into_iter().enumerate() {
        let half_h = distance * tan_half;
        let half_w = half_h * aspect;
        for (corner, (sx, sy)) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)]
            .into_iter()
            .enumerate()
        {
            planes[plane][corner] =
                data.push_vertex([sx * half_w, sy * half_h, -distance], LINE_NORMAL);
        }
    }

    let [near_corners, far_corners] = planes;
    for i in 0..4 {
        let j = (i + 1) % 4;
        data.indices.extend_from_slice(&[near_corners[i], near_corners[j]]);
        data.indices.extend_from_slice(&[far_corners[i], far_corners[j]]);
        data.indices.extend_from_slice(&[near_corners[i], far_corners[i]]);
        data.indices.extend_from_slice(&[apex, near_corners[i]]);
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::Topology;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn test_spot_cone_lines() {
        let cone = generate_spot_cone_lines(10.0, Rad(FRAC_PI_4), 32);
        assert_eq!(cone.topology, Topology::Lines);
        assert_eq!(cone.vertex_count(), 33);
        assert_eq!(cone.indices.len(), 32 * 2 + 4 * 2);
        assert_eq!(cone.triangle_count(), 0);

        // radius at the far end equals length * tan(angle)
        let rim = cone.vertices[1];
        assert!((rim[0] - 10.0).abs() < 1e-4);
        assert_eq!(rim[2], -10.0);
    }

    #[test]
    fn test_frustum_lines() {
        let frustum = generate_frustum_lines(Rad(FRAC_PI_4 * 2.0), 1.0, 10.0, 200.0);
        assert_eq!(frustum.vertex_count(), 9);
        assert_eq!(frustum.indices.len(), 16 * 2);

        let (min, max) = frustum.bounds().unwrap();
        assert_eq!(min[2], -200.0);
        assert_eq!(max[2], 0.0);
        // 90 degree fov: half extent equals the distance
        assert!((max[0] - 200.0).abs() < 1e-2);
    }
}
