//! CPU-side wireframe geometry for the decorative shapes.
//!
//! Each generator returns a line list: consecutive vertex pairs form one
//! segment.

use glam::Vec3;
use std::f32::consts::TAU;

/// Regular tetrahedron inscribed in a sphere of `radius`. 6 edges.
pub fn tetrahedron_wireframe(radius: f32) -> Vec<Vec3> {
    let s = radius / 3.0_f32.sqrt();
    let v = [
        Vec3::new(s, s, s),
        Vec3::new(s, -s, -s),
        Vec3::new(-s, s, -s),
        Vec3::new(-s, -s, s),
    ];
    let edges = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];
    edges.iter().flat_map(|&(a, b)| [v[a], v[b]]).collect()
}

/// Regular octahedron inscribed in a sphere of `radius`. 12 edges.
pub fn octahedron_wireframe(radius: f32) -> Vec<Vec3> {
    let v = [
        Vec3::X * radius,
        Vec3::NEG_X * radius,
        Vec3::Y * radius,
        Vec3::NEG_Y * radius,
        Vec3::Z * radius,
        Vec3::NEG_Z * radius,
    ];
    let edges = [
        (0, 2),
        (0, 3),
        (0, 4),
        (0, 5),
        (1, 2),
        (1, 3),
        (1, 4),
        (1, 5),
        (2, 4),
        (2, 5),
        (3, 4),
        (3, 5),
    ];
    edges.iter().flat_map(|&(a, b)| [v[a], v[b]]).collect()
}

/// Regular icosahedron inscribed in a sphere of `radius`. 30 edges, found as
/// the minimal-distance vertex pairs.
pub fn icosahedron_wireframe(radius: f32) -> Vec<Vec3> {
    let phi = (1.0 + 5.0_f32.sqrt()) * 0.5;
    let norm = (1.0 + phi * phi).sqrt();
    let s = radius / norm;
    let p = phi * s;
    let v = [
        Vec3::new(0.0, s, p),
        Vec3::new(0.0, s, -p),
        Vec3::new(0.0, -s, p),
        Vec3::new(0.0, -s, -p),
        Vec3::new(s, p, 0.0),
        Vec3::new(s, -p, 0.0),
        Vec3::new(-s, p, 0.0),
        Vec3::new(-s, -p, 0.0),
        Vec3::new(p, 0.0, s),
        Vec3::new(-p, 0.0, s),
        Vec3::new(p, 0.0, -s),
        Vec3::new(-p, 0.0, -s),
    ];

    let mut min_dist = f32::MAX;
    for a in 0..v.len() {
        for b in (a + 1)..v.len() {
            min_dist = min_dist.min(v[a].distance(v[b]));
        }
    }

    let mut out = Vec::with_capacity(60);
    for a in 0..v.len() {
        for b in (a + 1)..v.len() {
            if v[a].distance(v[b]) <= min_dist * 1.001 {
                out.push(v[a]);
                out.push(v[b]);
            }
        }
    }
    out
}

/// Torus in the xy plane: rings around the tube at each major step plus
/// segments along the major direction.
pub fn torus_wireframe(
    major_radius: f32,
    tube_radius: f32,
    major_segments: usize,
    tube_segments: usize,
) -> Vec<Vec3> {
    let point = |ui: usize, vi: usize| {
        let u = ui as f32 / major_segments as f32 * TAU;
        let v = vi as f32 / tube_segments as f32 * TAU;
        let r = major_radius + tube_radius * v.cos();
        Vec3::new(r * u.cos(), r * u.sin(), tube_radius * v.sin())
    };

    let mut out = Vec::with_capacity(major_segments * tube_segments * 4);
    for ui in 0..major_segments {
        for vi in 0..tube_segments {
            // around the tube
            out.push(point(ui, vi));
            out.push(point(ui, vi + 1));
            // along the ring
            out.push(point(ui, vi));
            out.push(point(ui + 1, vi));
        }
    }
    out
}
