//! Curved solids: transitions, kickers and cylinders.
//!
//! Curves are sampled at a fixed segment count; surface normals come from
//! the analytic tangent rotated by 90°.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use glam::{DVec2, DVec3};

use super::solids::box_mesh;
use crate::mesh::{Mesh, MeshBuilder, Vertex};
use crate::transform::{transform_mesh, InstanceTransform};

/// Inset of rail support posts from the bar ends.
const POST_INSET: f64 = 0.5;
const POST_RADIUS: f64 = 0.05;

/// Thickness of the flat bottom between half-pipe walls.
const FLAT_THICKNESS: f64 = 0.1;

/// One sample of a profile curve in the (x, y) plane.
struct CurveSample {
    point: DVec2,
    normal: DVec2,
    t: f64,
}

/// Sweep `curve` across z ∈ [-width/2, width/2] and close the solid with a
/// fan side panel at each end, hinged on `corner`.
fn ruled_solid(b: &mut MeshBuilder, curve: &[CurveSample], width: f64, corner: DVec2) {
    let hw = width * 0.5;
    let rows: Vec<(Vertex, Vertex)> = curve
        .iter()
        .map(|s| {
            let n = DVec3::new(s.normal.x, s.normal.y, 0.0);
            (
                Vertex::new(s.point.extend(-hw), n, DVec2::new(s.t, 0.0)),
                Vertex::new(s.point.extend(hw), n, DVec2::new(s.t, 1.0)),
            )
        })
        .collect();
    b.push_strip(&rows);

    for (z, normal) in [(-hw, DVec3::NEG_Z), (hw, DVec3::Z)] {
        let rim: Vec<DVec3> = curve.iter().map(|s| s.point.extend(z)).collect();
        b.push_fan(corner.extend(z), &rim, normal);
    }
}

/// Concave quarter-circle transition rising toward +X: from `(-r, 0)` flat
/// to `(0, r)` vertical, closed by side panels, a back wall and a bottom.
pub fn quarter_pipe(radius: f64, width: f64, segments: u32) -> Mesh {
    let r = radius;
    let hw = width * 0.5;
    let curve: Vec<CurveSample> = (0..=segments)
        .map(|i| {
            let t = f64::from(i) / f64::from(segments.max(1));
            let (sin, cos) = (FRAC_PI_2 * t).sin_cos();
            CurveSample {
                point: DVec2::new(-r + r * sin, r - r * cos),
                // tangent (cos, sin) rotated a quarter turn
                normal: DVec2::new(-sin, cos),
                t,
            }
        })
        .collect();

    let mut b = MeshBuilder::new();
    ruled_solid(&mut b, &curve, width, DVec2::ZERO);
    b.push_quad(
        [
            DVec3::new(0.0, 0.0, -hw),
            DVec3::new(0.0, 0.0, hw),
            DVec3::new(0.0, r, hw),
            DVec3::new(0.0, r, -hw),
        ],
        DVec3::X,
    );
    b.push_quad(
        [
            DVec3::new(-r, 0.0, -hw),
            DVec3::new(0.0, 0.0, -hw),
            DVec3::new(0.0, 0.0, hw),
            DVec3::new(-r, 0.0, hw),
        ],
        DVec3::NEG_Y,
    );
    b.build()
}

/// Two quarter pipes facing each other across a flat bottom of length `flat`.
pub fn half_pipe(radius: f64, width: f64, flat: f64, segments: u32) -> Mesh {
    let wall = quarter_pipe(radius, width, segments);
    let offset = flat * 0.5 + radius;

    let mut b = MeshBuilder::new();
    b.append(&transform_mesh(
        &wall,
        &InstanceTransform::new(DVec3::new(offset, 0.0, 0.0), 0.0, 1.0),
        1.0,
    ));
    b.append(&transform_mesh(
        &wall,
        &InstanceTransform::new(DVec3::new(-offset, 0.0, 0.0), PI, 1.0),
        1.0,
    ));
    b.append(&box_mesh(
        DVec3::new(flat, FLAT_THICKNESS, width),
        DVec3::new(0.0, -FLAT_THICKNESS * 0.5, 0.0),
    ));
    b.build()
}

/// Kicker: quadratic Bézier `(0,0) → (0.75L, 0) → (L, H)` rising toward +X.
pub fn kicker(length: f64, height: f64, width: f64, segments: u32) -> Mesh {
    let (l, h) = (length, height);
    let hw = width * 0.5;
    let control = 0.75 * l;
    let curve: Vec<CurveSample> = (0..=segments)
        .map(|i| {
            let t = f64::from(i) / f64::from(segments.max(1));
            let s = 1.0 - t;
            let point = DVec2::new(2.0 * s * t * control + t * t * l, t * t * h);
            let tangent = DVec2::new(2.0 * s * control + 2.0 * t * (l - control), 2.0 * t * h);
            let normal = DVec2::new(-tangent.y, tangent.x).normalize_or_zero();
            CurveSample {
                point,
                normal: if normal == DVec2::ZERO { DVec2::Y } else { normal },
                t,
            }
        })
        .collect();

    let mut b = MeshBuilder::new();
    ruled_solid(&mut b, &curve, width, DVec2::new(l, 0.0));
    b.push_quad(
        [
            DVec3::new(l, 0.0, -hw),
            DVec3::new(l, 0.0, hw),
            DVec3::new(l, h, hw),
            DVec3::new(l, h, -hw),
        ],
        DVec3::X,
    );
    b.push_quad(
        [
            DVec3::new(0.0, 0.0, -hw),
            DVec3::new(l, 0.0, -hw),
            DVec3::new(l, 0.0, hw),
            DVec3::new(0.0, 0.0, hw),
        ],
        DVec3::NEG_Y,
    );
    b.build()
}

/// Capped cylinder between two arbitrary points.
pub fn cylinder(start: DVec3, end: DVec3, radius: f64, segments: u32) -> Mesh {
    let axis = (end - start).normalize_or_zero();
    let helper = if axis.y.abs() < 0.9 { DVec3::Y } else { DVec3::X };
    let u = axis.cross(helper).normalize_or_zero();
    let v = axis.cross(u);

    let ring: Vec<DVec3> = (0..=segments)
        .map(|i| {
            let a = TAU * f64::from(i) / f64::from(segments.max(1));
            u * a.cos() + v * a.sin()
        })
        .collect();

    let mut b = MeshBuilder::new();
    let rows: Vec<(Vertex, Vertex)> = ring
        .iter()
        .enumerate()
        .map(|(i, dir)| {
            let s = i as f64 / f64::from(segments.max(1));
            (
                Vertex::new(start + *dir * radius, *dir, DVec2::new(s, 0.0)),
                Vertex::new(end + *dir * radius, *dir, DVec2::new(s, 1.0)),
            )
        })
        .collect();
    b.push_strip(&rows);

    let rim_start: Vec<DVec3> = ring.iter().map(|d| start + *d * radius).collect();
    let rim_end: Vec<DVec3> = ring.iter().map(|d| end + *d * radius).collect();
    b.push_fan(start, &rim_start, -axis);
    b.push_fan(end, &rim_end, axis);
    b.build()
}

/// Rail bar along X with two support posts. `drop` lowers the +X end
/// relative to the -X end for a down rail.
pub fn rail(length: f64, height: f64, drop: f64, radius: f64, segments: u32) -> Mesh {
    let half = length * 0.5;
    let bar_height = |x: f64| {
        if length > 0.0 {
            height + drop * (half - x) / length
        } else {
            height
        }
    };

    let mut b = MeshBuilder::new();
    b.append(&cylinder(
        DVec3::new(-half, bar_height(-half), 0.0),
        DVec3::new(half, bar_height(half), 0.0),
        radius,
        segments,
    ));
    for x in [-half + POST_INSET, half - POST_INSET] {
        b.append(&cylinder(
            DVec3::new(x, 0.0, 0.0),
            DVec3::new(x, bar_height(x), 0.0),
            POST_RADIUS,
            segments,
        ));
    }
    b.build()
}

/// Upright capped cylinder standing on y = 0 (trash cans, bollards).
pub fn prop(radius: f64, height: f64, segments: u32) -> Mesh {
    cylinder(DVec3::ZERO, DVec3::new(0.0, height, 0.0), radius, segments)
}
