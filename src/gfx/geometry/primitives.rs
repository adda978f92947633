//! # Primitive Shape Generation
//!
//! Common 3D primitives, generated with outward facing normals and
//! counter-clockwise winding.

use super::GeometryData;
use std::f32::consts::TAU;

/// Generate an axis-aligned box centered at the origin
///
/// Each face has its own four vertices so normals stay flat.
pub fn generate_box(width: f32, height: f32, depth: f32) -> GeometryData {
    let mut data = GeometryData::new();
    let (x, y, z) = (width * 0.5, height * 0.5, depth * 0.5);

    #[rustfmt::skip]
    let faces: [([[f32; 3]; 4], [f32; 3]); 6] = [
        // Front face
        ([[-x, -y,  z], [ x, -y,  z], [ x,  y,  z], [-x,  y,  z]], [0.0, 0.0, 1.0]),
        // Back face
        ([[-x, -y, -z], [-x,  y, -z], [ x,  y, -z], [ x, -y, -z]], [0.0, 0.0, -1.0]),
        // Left face
        ([[-x, -y, -z], [-x, -y,  z], [-x,  y,  z], [-x,  y, -z]], [-1.0, 0.0, 0.0]),
        // Right face
        ([[ x, -y,  z], [ x, -y, -z], [ x,  y, -z], [ x,  y,  z]], [1.0, 0.0, 0.0]),
        // Top face
        ([[-x,  y,  z], [ x,  y,  z], [ x,  y, -z], [-x,  y, -z]], [0.0, 1.0, 0.0]),
        // Bottom face
        ([[-x, -y, -z], [ x, -y, -z], [ x, -y,  z], [-x, -y,  z]], [0.0, -1.0, 0.0]),
    ];

    for (corners, normal) in faces {
        let base = data.vertices.len() as u32;
        for corner in corners {
            data.push_vertex(corner, normal);
        }
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate a plane in the XY plane
///
/// # Arguments
/// * `width` - Width of the plane (X direction)
/// * `height` - Height of the plane (Y direction)
/// * `width_segments` - Number of subdivisions along width
/// * `height_segments` - Number of subdivisions along height
///
/// Returns a plane centered at the origin with normal pointing along +Z.
pub fn generate_plane(
    width: f32,
    height: f32,
    width_segments: u32,
    height_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(1);
    let h_segs = height_segments.max(1);

    for y in 0..=h_segs {
        let pos_y = (y as f32 / h_segs as f32 - 0.5) * height;

        for x in 0..=w_segs {
            let pos_x = (x as f32 / w_segs as f32 - 0.5) * width;
            data.push_vertex([pos_x, pos_y, 0.0], [0.0, 0.0, 1.0]);
        }
    }

    for y in 0..h_segs {
        for x in 0..w_segs {
            let i = y * (w_segs + 1) + x;
            let next_row = i + w_segs + 1;

            data.indices.extend_from_slice(&[i, i + 1, next_row + 1]);
            data.indices.extend_from_slice(&[i, next_row + 1, next_row]);
        }
    }

    data
}

/// Generate a capped cylinder
///
/// # Arguments
/// * `radius` - Radius of the cylinder
/// * `height` - Height of the cylinder (along Z-axis)
/// * `segments` - Number of circular segments
///
/// Returns a cylinder centered at the origin extending from -height/2 to height/2 in Z.
/// The caps get their own vertices so their normals point straight along Z.
pub fn generate_cylinder(radius: f32, height: f32, segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    let half_height = height * 0.5;

    // Side wall
    for i in 0..=segs {
        let angle = i as f32 * TAU / segs as f32;
        let (sin_a, cos_a) = angle.sin_cos();
        let (x, y) = (radius * cos_a, radius * sin_a);

        data.push_vertex([x, y, -half_height], [cos_a, sin_a, 0.0]);
        data.push_vertex([x, y, half_height], [cos_a, sin_a, 0.0]);
    }

    for i in 0..segs {
        let bottom = i * 2;
        let top = bottom + 1;
        let bottom_next = bottom + 2;
        let top_next = bottom + 3;

        data.indices.extend_from_slice(&[bottom, bottom_next, top]);
        data.indices.extend_from_slice(&[top, bottom_next, top_next]);
    }

    // Caps
    for (z, normal_z) in [(half_height, 1.0), (-half_height, -1.0)] {
        let center = data.push_vertex([0.0, 0.0, z], [0.0, 0.0, normal_z]);
        let ring = data.vertices.len() as u32;

        for [x, y] in sample_circle(radius, segs as usize, false) {
            data.push_vertex([x, y, z], [0.0, 0.0, normal_z]);
        }

        for i in 0..segs {
            let current = ring + i;
            let next = ring + (i + 1) % segs;
            if normal_z > 0.0 {
                data.indices.extend_from_slice(&[center, current, next]);
            } else {
                data.indices.extend_from_slice(&[center, next, current]);
            }
        }
    }

    data
}

/// Sample `segments` points on a circle around the origin, starting on +X
///
/// Points run counter-clockwise unless `clockwise` is set.
pub fn sample_circle(radius: f32, segments: usize, clockwise: bool) -> Vec<[f32; 2]> {
    let direction = if clockwise { -1.0 } else { 1.0 };
    (0..segments)
        .map(|i| {
            let angle = direction * TAU * i as f32 / segments as f32;
            [radius * angle.cos(), radius * angle.sin()]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_normal(data: &GeometryData, tri: &[u32]) -> [f32; 3] {
        let a = data.vertices[tri[0] as usize];
        let b = data.vertices[tri[1] as usize];
        let c = data.vertices[tri[2] as usize];
        let e1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
        let e2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
        [
            e1[1] * e2[2] - e1[2] * e2[1],
            e1[2] * e2[0] - e1[0] * e2[2],
            e1[0] * e2[1] - e1[1] * e2[0],
        ]
    }

    /// Winding must agree with the stored vertex normal on every triangle
    fn assert_winding_matches_normals(data: &GeometryData) {
        for tri in data.indices.chunks(3) {
            let face = triangle_normal(data, tri);
            let stored = data.normals[tri[0] as usize];
            let dot = face[0] * stored[0] + face[1] * stored[1] + face[2] * stored[2];
            assert!(dot > 0.0, "triangle {:?} winds against its normal", tri);
        }
    }

    #[test]
    fn test_box_generation() {
        let cube = generate_box(1.0, 1.0, 1.0);
        assert_eq!(cube.vertex_count(), 24); // 6 faces * 4 vertices
        assert_eq!(cube.indices.len(), 36); // 6 faces * 2 triangles * 3 indices
        assert_eq!(cube.triangle_count(), 12);
        assert_winding_matches_normals(&cube);
    }

    #[test]
    fn test_box_extents() {
        let marking = generate_box(0.5, 0.1, 0.04);
        let (min, max) = marking.bounds().unwrap();
        assert_eq!(min, [-0.25, -0.05, -0.02]);
        assert_eq!(max, [0.25, 0.05, 0.02]);
    }

    #[test]
    fn test_plane_generation() {
        let plane = generate_plane(2.0, 2.0, 2, 2);
        assert_eq!(plane.vertices.len(), 9); // 3x3 grid
        assert_eq!(plane.indices.len(), 24); // 4 quads * 2 triangles * 3 indices
        assert_winding_matches_normals(&plane);
    }

    #[test]
    fn test_cylinder_generation() {
        let cylinder = generate_cylinder(4.0, 0.1, 50);
        // side ring pairs + two caps with centers
        assert_eq!(cylinder.vertex_count(), 51 * 2 + 2 * 51);
        assert_eq!(cylinder.triangle_count(), 50 * 2 + 50 * 2);
        assert_winding_matches_normals(&cylinder);

        let (min, max) = cylinder.bounds().unwrap();
        assert!((max[0] - 4.0).abs() < 1e-5);
        assert!((min[2] + 0.05).abs() < 1e-6);
        assert!((max[2] - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_sample_circle_direction() {
        let ccw = sample_circle(1.0, 4, false);
        let cw = sample_circle(1.0, 4, true);
        assert!((ccw[1][1] - 1.0).abs() < 1e-6);
        assert!((cw[1][1] + 1.0).abs() < 1e-6);
        assert_eq!(ccw.len(), 4);
    }
}
