//! Flat-faced solids: boxes, extruded profiles, frustums and the catalog
//! pieces assembled from them.

use glam::{DVec2, DVec3};

use crate::mesh::{face_normal, Mesh, MeshBuilder};

/// Height of the metal strip on top of a ledge.
const COPING_LIFT: f64 = 0.005;
const COPING_WIDTH: f64 = 0.08;

/// Hubba ledge dimensions relative to the stair flight.
const HUBBA_RISE: f64 = 0.5;
const HUBBA_WIDTH: f64 = 0.6;

/// Axis-aligned box of `size` centred on `center`: 6 faces, 24 vertices.
pub fn box_mesh(size: DVec3, center: DVec3) -> Mesh {
    let h = size * 0.5;
    let c = center;
    let v = |x: f64, y: f64, z: f64| c + DVec3::new(x, y, z);

    let faces: [([DVec3; 4], DVec3); 6] = [
        // Front (+Z)
        ([v(-h.x, -h.y, h.z), v(h.x, -h.y, h.z), v(h.x, h.y, h.z), v(-h.x, h.y, h.z)], DVec3::Z),
        // Back (-Z)
        ([v(h.x, -h.y, -h.z), v(-h.x, -h.y, -h.z), v(-h.x, h.y, -h.z), v(h.x, h.y, -h.z)], DVec3::NEG_Z),
        // Right (+X)
        ([v(h.x, -h.y, h.z), v(h.x, -h.y, -h.z), v(h.x, h.y, -h.z), v(h.x, h.y, h.z)], DVec3::X),
        // Left (-X)
        ([v(-h.x, -h.y, -h.z), v(-h.x, -h.y, h.z), v(-h.x, h.y, h.z), v(-h.x, h.y, -h.z)], DVec3::NEG_X),
        // Top (+Y)
        ([v(-h.x, h.y, h.z), v(h.x, h.y, h.z), v(h.x, h.y, -h.z), v(-h.x, h.y, -h.z)], DVec3::Y),
        // Bottom (-Y)
        ([v(-h.x, -h.y, -h.z), v(h.x, -h.y, -h.z), v(h.x, -h.y, h.z), v(-h.x, -h.y, h.z)], DVec3::NEG_Y),
    ];

    let mut b = MeshBuilder::with_capacity(24, 36);
    for (quad, normal) in faces {
        b.push_quad(quad, normal);
    }
    b.build()
}

/// Box of the given size resting on y = 0.
pub fn block(width: f64, height: f64, depth: f64) -> Mesh {
    box_mesh(
        DVec3::new(width, height, depth),
        DVec3::new(0.0, height * 0.5, 0.0),
    )
}

/// Ground slab whose top face sits at y = 0.
pub fn ground(size: f64) -> Mesh {
    box_mesh(DVec3::new(size, 0.5, size), DVec3::new(0.0, -0.25, 0.0))
}

/// Direction a 2D profile is swept along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtrudeAxis {
    /// Profile lies in the (z, y) plane.
    X,
    /// Profile lies in the (x, y) plane.
    Z,
}

impl ExtrudeAxis {
    fn lift(self, p: DVec2, depth: f64) -> DVec3 {
        match self {
            ExtrudeAxis::X => DVec3::new(depth, p.y, p.x),
            ExtrudeAxis::Z => DVec3::new(p.x, p.y, depth),
        }
    }

    fn lift_normal(self, n: DVec2) -> DVec3 {
        match self {
            ExtrudeAxis::X => DVec3::new(0.0, n.y, n.x),
            ExtrudeAxis::Z => DVec3::new(n.x, n.y, 0.0),
        }
    }

    fn unit(self) -> DVec3 {
        match self {
            ExtrudeAxis::X => DVec3::X,
            ExtrudeAxis::Z => DVec3::Z,
        }
    }
}

/// Sweep a convex 2D profile from `from` to `to` along `axis`.
///
/// One quad per profile edge plus a fan cap at each end.
pub fn extrude_profile(profile: &[DVec2], axis: ExtrudeAxis, from: f64, to: f64) -> Mesh {
    let n = profile.len();
    let centroid = profile.iter().copied().sum::<DVec2>() / n.max(1) as f64;
    let mut b = MeshBuilder::with_capacity(n * 6, n * 12);

    for i in 0..n {
        let p0 = profile[i];
        let p1 = profile[(i + 1) % n];
        let edge = p1 - p0;
        let mut out = DVec2::new(edge.y, -edge.x).normalize_or_zero();
        if out.dot(p0 - centroid) < 0.0 {
            out = -out;
        }
        b.push_quad(
            [
                axis.lift(p0, from),
                axis.lift(p1, from),
                axis.lift(p1, to),
                axis.lift(p0, to),
            ],
            axis.lift_normal(out),
        );
    }

    if n >= 3 {
        let (near, far) = if from <= to { (from, to) } else { (to, from) };
        let rim_near: Vec<DVec3> = profile[1..].iter().map(|p| axis.lift(*p, near)).collect();
        let rim_far: Vec<DVec3> = profile[1..].iter().map(|p| axis.lift(*p, far)).collect();
        b.push_fan(axis.lift(profile[0], near), &rim_near, -axis.unit());
        b.push_fan(axis.lift(profile[0], far), &rim_far, axis.unit());
    }

    b.build()
}

/// Bank: right-triangle profile rising along +X, swept across the width.
pub fn slope(length: f64, height: f64, width: f64) -> Mesh {
    let profile = [
        DVec2::new(0.0, 0.0),
        DVec2::new(length, 0.0),
        DVec2::new(length, height),
    ];
    extrude_profile(&profile, ExtrudeAxis::Z, -width * 0.5, width * 0.5)
}

/// Square frustum: sloped sides computed from their defining planes.
pub fn pyramid(base_half: f64, top_half: f64, height: f64) -> Mesh {
    let corner = |half: f64, y: f64| {
        [
            DVec3::new(-half, y, -half),
            DVec3::new(half, y, -half),
            DVec3::new(half, y, half),
            DVec3::new(-half, y, half),
        ]
    };
    let bottom = corner(base_half, 0.0);
    let top = corner(top_half, height);
    let interior = DVec3::new(0.0, height * 0.5, 0.0);

    let mut b = MeshBuilder::with_capacity(24, 36);
    for i in 0..4 {
        let j = (i + 1) % 4;
        let normal = face_normal(bottom[i], bottom[j], top[j], interior);
        b.push_quad([bottom[i], bottom[j], top[j], top[i]], normal);
    }
    b.push_quad(top, DVec3::Y);
    b.push_quad(bottom, DVec3::NEG_Y);
    b.build()
}

/// Ledge body plus a metal coping strip along the front top edge.
/// The coping is a single upward quad lifted just above the body, a decal
/// rather than a closed solid.
pub fn ledge(length: f64, height: f64, depth: f64) -> Mesh {
    let mut b = MeshBuilder::with_capacity(28, 42);
    b.append(&block(length, height, depth));

    let (hx, hz) = (length * 0.5, depth * 0.5);
    let y = height + COPING_LIFT;
    b.push_quad(
        [
            DVec3::new(-hx, y, hz),
            DVec3::new(hx, y, hz),
            DVec3::new(hx, y, hz - COPING_WIDTH),
            DVec3::new(-hx, y, hz - COPING_WIDTH),
        ],
        DVec3::Y,
    );
    b.build()
}

/// Stair flight rising toward -Z. Each step is a solid block down to the
/// ground; `hubba` adds a sloped ledge along the +X side.
pub fn stairs(steps: u32, step_height: f64, step_depth: f64, step_width: f64, hubba: bool) -> Mesh {
    let mut b = MeshBuilder::with_capacity(24 * (steps as usize + 1), 36 * (steps as usize + 1));

    for i in 0..steps {
        let h = step_height * f64::from(i + 1);
        b.append(&box_mesh(
            DVec3::new(step_width, h, step_depth),
            DVec3::new(0.0, h * 0.5, -step_depth * f64::from(i)),
        ));
    }

    if hubba && steps > 0 {
        let front = step_depth * 0.5;
        let back = -step_depth * f64::from(steps - 1) - step_depth * 0.5;
        let profile = [
            DVec2::new(front, 0.0),
            DVec2::new(back, 0.0),
            DVec2::new(back, step_height * f64::from(steps) + HUBBA_RISE),
            DVec2::new(front, step_height + HUBBA_RISE),
        ];
        let x0 = step_width * 0.5;
        b.append(&extrude_profile(&profile, ExtrudeAxis::X, x0, x0 + HUBBA_WIDTH));
    }

    b.build()
}

/// Park bench: seat on two legs.
pub fn bench() -> Mesh {
    let mut b = MeshBuilder::with_capacity(72, 108);
    b.append(&box_mesh(DVec3::new(2.0, 0.1, 0.5), DVec3::new(0.0, 0.5, 0.0)));
    for x in [-0.8, 0.8] {
        b.append(&box_mesh(DVec3::new(0.1, 0.5, 0.5), DVec3::new(x, 0.25, 0.0)));
    }
    b.build()
}
