//! Factory functions for creating test data.
//!
//! Provides helpers to construct meshes, placed instances and whole park
//! documents used by unit and integration tests.

use glam::{DVec2, DVec3};
use shared::{ParkDescription, PlacedInstance};

use crate::catalog;
use crate::generators::box_mesh;
use crate::mesh::{Mesh, Vertex};

// ── Mesh factories ──────────────────────────────────────────────

/// 1×1 quad in the z = 0 plane facing +Z; indices `[0, 1, 2, 0, 2, 3]`.
pub fn unit_quad() -> Mesh {
    let v = |x: f64, y: f64| Vertex::new(DVec3::new(x, y, 0.0), DVec3::Z, DVec2::new(x, y));
    Mesh {
        vertices: vec![v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0), v(0.0, 1.0)],
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

/// Unit cube centred on the origin (24 vertices, 36 indices).
pub fn unit_cube() -> Mesh {
    box_mesh(DVec3::ONE, DVec3::ZERO)
}

// ── Instance factories ──────────────────────────────────────────

/// Unrotated, unscaled instance at `pos`.
pub fn instance(kind: &str, pos: [f64; 3]) -> PlacedInstance {
    PlacedInstance::new(kind, pos, 0.0, 1.0)
}

/// Instance with yaw (radians) and uniform scale.
pub fn instance_with(kind: &str, pos: [f64; 3], yaw: f64, scale: f64) -> PlacedInstance {
    PlacedInstance::new(kind, pos, yaw, scale)
}

/// One instance of every catalog entry, spaced 12 m apart along X.
pub fn every_catalog_piece() -> Vec<PlacedInstance> {
    catalog::entries()
        .iter()
        .enumerate()
        .map(|(i, e)| instance(e.id, [i as f64 * 12.0, 0.0, 0.0]))
        .collect()
}

// ── Park factories ──────────────────────────────────────────────

/// Small mixed park, including one type the catalog does not know.
pub fn sample_park() -> ParkDescription {
    ParkDescription {
        name: "Sunset Plaza".to_string(),
        objects: vec![
            instance("quarter-pipe", [-10.0, 0.0, 0.0]),
            instance_with("quarter-pipe", [10.0, 0.0, 0.0], std::f64::consts::PI, 1.0),
            instance("ledge", [0.0, 0.0, 6.0]),
            instance_with("rail-down", [0.0, 0.0, -6.0], std::f64::consts::FRAC_PI_2, 1.0),
            instance_with("kicker", [4.0, 0.0, 0.0], 0.0, 1.5),
            instance("volcano", [0.0, 0.0, 0.0]),
        ],
    }
}

/// Park JSON as the editor sends it.
pub fn sample_park_json() -> String {
    r#"{
  "name": "Sunset Plaza",
  "objects": [
    { "type": "quarter-pipe", "position": { "x": -10, "y": 0, "z": 0 }, "rotation": { "y": 0 }, "scale": 1 },
    { "type": "quarter-pipe", "position": { "x": 10, "y": 0, "z": 0 }, "rotation": { "y": 3.141592653589793 } },
    { "type": "ledge", "position": { "x": 0, "y": 0, "z": 6 } },
    { "type": "rail-down", "position": { "x": 0, "y": 0, "z": -6 }, "rotation": { "y": 1.5707963267948966 } },
    { "type": "kicker", "position": { "x": 4, "y": 0, "z": 0 }, "scale": 1.5 },
    { "type": "volcano" }
  ]
}"#
    .to_string()
}
