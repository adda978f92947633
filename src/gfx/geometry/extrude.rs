//! # Outline Extrusion
//!
//! Sweeps flat 2D outlines along +Z into closed solids. An outline is an
//! ordered list of points in the XY plane; the solid spans `z = 0` to
//! `z = depth` with a cap on each end and side walls in between.

use super::{primitives::sample_circle, GeometryData};

/// Parameters for sweeping an outline along Z
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrudeSettings {
    /// Distance swept along +Z
    pub depth: f32,
    /// Number of subdivisions of each side wall along the depth axis
    pub steps: u32,
}

impl Default for ExtrudeSettings {
    fn default() -> Self {
        Self {
            depth: 1.0,
            steps: 1,
        }
    }
}

/// Signed area of a polygon; positive when counter-clockwise
pub fn signed_area(points: &[[f32; 2]]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let [x0, y0] = points[i];
            let [x1, y1] = points[(i + 1) % n];
            x0 * y1 - x1 * y0
        })
        .sum::<f32>()
        * 0.5
}

fn cross(a: [f32; 2], b: [f32; 2], c: [f32; 2]) -> f32 {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

fn point_in_triangle(p: [f32; 2], a: [f32; 2], b: [f32; 2], c: [f32; 2]) -> bool {
    cross(a, b, p) >= 0.0 && cross(b, c, p) >= 0.0 && cross(c, a, p) >= 0.0
}

/// Triangulates a simple polygon by ear clipping
///
/// Accepts either winding. The returned triangles index into `points` and
/// are always counter-clockwise.
pub fn triangulate_polygon(points: &[[f32; 2]]) -> Vec<[u32; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    let mut remaining: Vec<usize> = if signed_area(points) >= 0.0 {
        (0..n).collect()
    } else {
        (0..n).rev().collect()
    };
    let mut triangles = Vec::with_capacity(n - 2);

    while remaining.len() > 3 {
        let len = remaining.len();
        let ear = (0..len).find(|&i| {
            let prev = remaining[(i + len - 1) % len];
            let curr = remaining[i];
            let next = remaining[(i + 1) % len];
            let (a, b, c) = (points[prev], points[curr], points[next]);

            cross(a, b, c) > f32::EPSILON
                && !remaining.iter().any(|&p| {
                    p != prev && p != curr && p != next && point_in_triangle(points[p], a, b, c)
                })
        });

        let Some(i) = ear else {
            // Collinear runs or self-intersections leave no clean ear; fan the rest
            break;
        };

        let prev = remaining[(i + len - 1) % len];
        let next = remaining[(i + 1) % len];
        triangles.push([prev as u32, remaining[i] as u32, next as u32]);
        remaining.remove(i);
    }

    for i in 1..remaining.len().saturating_sub(1) {
        triangles.push([
            remaining[0] as u32,
            remaining[i] as u32,
            remaining[i + 1] as u32,
        ]);
    }

    triangles
}

/// Extrudes a simple polygon outline into a closed solid
///
/// The outline may wind either way; it is normalized to counter-clockwise so
/// that every wall faces outward.
pub fn extrude_polygon(outline: &[[f32; 2]], settings: &ExtrudeSettings) -> GeometryData {
    let mut data = GeometryData::new();
    if outline.len() < 3 {
        return data;
    }

    let ccw: Vec<[f32; 2]> = if signed_area(outline) < 0.0 {
        outline.iter().rev().copied().collect()
    } else {
        outline.to_vec()
    };

    let triangles = triangulate_polygon(&ccw);
    push_cap(&mut data, &ccw, &triangles, settings.depth, true);
    push_cap(&mut data, &ccw, &triangles, 0.0, false);
    push_walls(&mut data, &ccw, settings);

    data
}

/// Extrudes an annulus (a disc with a concentric hole)
///
/// Both circles are sampled with `segments` points.
pub fn extrude_ring(
    outer_radius: f32,
    inner_radius: f32,
    segments: usize,
    settings: &ExtrudeSettings,
) -> GeometryData {
    let mut data = GeometryData::new();
    let segments = segments.max(3);

    let outer = sample_circle(outer_radius, segments, false);
    let inner = sample_circle(inner_radius, segments, false);

    for (z, facing_up) in [(settings.depth, true), (0.0, false)] {
        let normal = [0.0, 0.0, if facing_up { 1.0 } else { -1.0 }];
        let base = data.vertices.len() as u32;

        for (o, n) in outer.iter().zip(&inner) {
            data.push_vertex([o[0], o[1], z], normal);
            data.push_vertex([n[0], n[1], z], normal);
        }

        for i in 0..segments as u32 {
            let j = (i + 1) % segments as u32;
            let (o_i, n_i) = (base + i * 2, base + i * 2 + 1);
            let (o_j, n_j) = (base + j * 2, base + j * 2 + 1);

            if facing_up {
                data.indices.extend_from_slice(&[n_i, o_i, o_j, n_i, o_j, n_j]);
            } else {
                data.indices.extend_from_slice(&[n_i, o_j, o_i, n_i, n_j, o_j]);
            }
        }
    }

    push_walls(&mut data, &outer, settings);
    // The hole runs clockwise so its walls face the ring's center
    let hole: Vec<[f32; 2]> = inner.iter().rev().copied().collect();
    push_walls(&mut data, &hole, settings);

    data
}

fn push_cap(
    data: &mut GeometryData,
    points: &[[f32; 2]],
    triangles: &[[u32; 3]],
    z: f32,
    facing_up: bool,
) {
    let normal = [0.0, 0.0, if facing_up { 1.0 } else { -1.0 }];
    let base = data.vertices.len() as u32;

    for p in points {
        data.push_vertex([p[0], p[1], z], normal);
    }

    for [a, b, c] in triangles {
        if facing_up {
            data.indices.extend_from_slice(&[base + a, base + b, base + c]);
        } else {
            data.indices.extend_from_slice(&[base + a, base + c, base + b]);
        }
    }
}

/// Side walls for a closed loop; each wall faces the right-hand side of travel
fn push_walls(data: &mut GeometryData, loop_points: &[[f32; 2]], settings: &ExtrudeSettings) {
    let steps = settings.steps.max(1);
    let n = loop_points.len();

    for i in 0..n {
        let a = loop_points[i];
        let b = loop_points[(i + 1) % n];
        let (dx, dy) = (b[0] - a[0], b[1] - a[1]);
        let length = (dx * dx + dy * dy).sqrt();
        if length <= f32::EPSILON {
            continue;
        }

        let normal = [dy / length, -dx / length, 0.0];
        let base = data.vertices.len() as u32;

        for step in 0..=steps {
            let z = settings.depth * step as f32 / steps as f32;
            data.push_vertex([a[0], a[1], z], normal);
            data.push_vertex([b[0], b[1], z], normal);
        }

        for step in 0..steps {
            let low = base + step * 2;
            let high = low + 2;
            data.indices
                .extend_from_slice(&[low, low + 1, high + 1, low, high + 1, high]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    fn face_normal(data: &GeometryData, tri: &[u32]) -> [f32; 3] {
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

    fn assert_outward(data: &GeometryData) {
        for tri in data.indices.chunks(3) {
            let face = face_normal(data, tri);
            let stored = data.normals[tri[0] as usize];
            let dot = face[0] * stored[0] + face[1] * stored[1] + face[2] * stored[2];
            assert!(dot > 0.0, "triangle {:?} winds against its normal", tri);
        }
    }

    fn triangle_area_sum(points: &[[f32; 2]], triangles: &[[u32; 3]]) -> f32 {
        triangles
            .iter()
            .map(|t| {
                cross(
                    points[t[0] as usize],
                    points[t[1] as usize],
                    points[t[2] as usize],
                ) * 0.5
            })
            .sum()
    }

    #[test]
    fn test_signed_area_orientation() {
        assert!((signed_area(&SQUARE) - 1.0).abs() < 1e-6);
        let mut reversed = SQUARE;
        reversed.reverse();
        assert!((signed_area(&reversed) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_triangulate_convex_polygon() {
        let triangles = triangulate_polygon(&SQUARE);
        assert_eq!(triangles.len(), 2);
        assert!((triangle_area_sum(&SQUARE, &triangles) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_triangulate_concave_polygon() {
        // L-shape with area 3
        let l_shape = [
            [0.0, 0.0],
            [2.0, 0.0],
            [2.0, 1.0],
            [1.0, 1.0],
            [1.0, 2.0],
            [0.0, 2.0],
        ];
        let triangles = triangulate_polygon(&l_shape);
        assert_eq!(triangles.len(), 4);
        // Every triangle is counter-clockwise and together they cover the shape exactly
        for t in &triangles {
            assert!(cross(l_shape[t[0] as usize], l_shape[t[1] as usize], l_shape[t[2] as usize]) > 0.0);
        }
        assert!((triangle_area_sum(&l_shape, &triangles) - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_triangulate_clockwise_input() {
        let clockwise = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]];
        let triangles = triangulate_polygon(&clockwise);
        assert_eq!(triangles.len(), 2);
        assert!((triangle_area_sum(&clockwise, &triangles) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_extrude_polygon_is_closed_and_outward() {
        let slab = extrude_polygon(&SQUARE, &ExtrudeSettings { depth: 0.2, steps: 1 });
        // two caps of 2 triangles + 4 walls of 2 triangles
        assert_eq!(slab.triangle_count(), 12);
        assert_outward(&slab);

        let (min, max) = slab.bounds().unwrap();
        assert_eq!(min[2], 0.0);
        assert!((max[2] - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_extrude_steps_subdivide_walls() {
        let stepped = extrude_polygon(&SQUARE, &ExtrudeSettings { depth: 1.0, steps: 5 });
        assert_eq!(stepped.triangle_count(), 2 * 2 + 4 * 5 * 2);
        assert_outward(&stepped);
    }

    #[test]
    fn test_extrude_clockwise_outline_faces_outward() {
        let mut clockwise = SQUARE;
        clockwise.reverse();
        let slab = extrude_polygon(&clockwise, &ExtrudeSettings::default());
        assert_outward(&slab);
    }

    #[test]
    fn test_extrude_degenerate_outline_is_empty() {
        let line = extrude_polygon(&[[0.0, 0.0], [1.0, 0.0]], &ExtrudeSettings::default());
        assert_eq!(line.vertex_count(), 0);
    }

    #[test]
    fn test_extrude_ring() {
        let ring = extrude_ring(4.0, 3.65, 64, &ExtrudeSettings { depth: 0.2, steps: 1 });
        // two caps of 2 triangles per segment + outer and inner walls
        assert_eq!(ring.triangle_count(), 64 * 2 * 2 + 64 * 2 * 2);
        assert_outward(&ring);

        // Nothing reaches inside the hole
        for v in &ring.vertices {
            let r = (v[0] * v[0] + v[1] * v[1]).sqrt();
            assert!(r > 3.64 && r < 4.01);
        }
    }
}
