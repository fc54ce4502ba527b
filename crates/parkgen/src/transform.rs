//! Placement transform: local object space → world space → target units.

use glam::DVec3;
use shared::PlacedInstance;

use crate::mesh::{Mesh, Vertex};

/// The target engine measures in centimetres; the editor in metres.
pub const TARGET_UNIT_SCALE: f64 = 100.0;

/// Position, yaw (radians about +Y) and uniform scale of one placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceTransform {
    pub position: DVec3,
    pub yaw: f64,
    pub scale: f64,
}

impl Default for InstanceTransform {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            yaw: 0.0,
            scale: 1.0,
        }
    }
}

impl InstanceTransform {
    pub fn new(position: DVec3, yaw: f64, scale: f64) -> Self {
        Self {
            position,
            yaw,
            scale,
        }
    }

    pub fn from_instance(instance: &PlacedInstance) -> Self {
        Self::new(
            DVec3::from_array(instance.position.to_array()),
            instance.yaw(),
            instance.scale,
        )
    }
}

/// Rotate the (x, z) pair about the vertical axis.
fn rotate_yaw(v: DVec3, sin: f64, cos: f64) -> DVec3 {
    DVec3::new(v.x * cos - v.z * sin, v.y, v.x * sin + v.z * cos)
}

/// Map one local-space vertex into world space, then multiply by `unit_scale`.
///
/// Order: uniform scale, yaw rotation, translation, unit scale. Normals only
/// receive the rotation and are re-normalised; scale is always isotropic so
/// no inverse-transpose is needed.
pub fn transform_vertex(vertex: &Vertex, transform: &InstanceTransform, unit_scale: f64) -> Vertex {
    let (sin, cos) = transform.yaw.sin_cos();
    let scaled = vertex.position * transform.scale;
    let world = rotate_yaw(scaled, sin, cos) + transform.position;
    let normal = rotate_yaw(vertex.normal, sin, cos).normalize_or_zero();

    Vertex {
        position: world * unit_scale,
        normal,
        uv: vertex.uv,
        uv2: vertex.uv2,
    }
}

/// Transform every vertex of `mesh`; the index list is copied unchanged.
pub fn transform_mesh(mesh: &Mesh, transform: &InstanceTransform, unit_scale: f64) -> Mesh {
    Mesh {
        vertices: mesh
            .vertices
            .iter()
            .map(|v| transform_vertex(v, transform, unit_scale))
            .collect(),
        indices: mesh.indices.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn sample() -> Vertex {
        Vertex::new(
            DVec3::new(1.5, 0.25, -2.0),
            DVec3::new(0.6, 0.0, 0.8),
            DVec2::new(0.3, 0.9),
        )
    }

    #[test]
    fn test_identity_only_applies_unit_scale() {
        let v = sample();
        let out = transform_vertex(&v, &InstanceTransform::default(), TARGET_UNIT_SCALE);
        assert!((out.position - v.position * 100.0).length() < 1e-9);
        assert!((out.normal - v.normal).length() < 1e-12);
        assert!((out.normal.length() - 1.0).abs() < 1e-6);
        assert_eq!(out.uv, v.uv);
        assert_eq!(out.uv2, v.uv2);
    }

    #[test]
    fn test_quarter_turn() {
        let v = Vertex::new(DVec3::X, DVec3::X, DVec2::ZERO);
        let t = InstanceTransform::new(DVec3::ZERO, FRAC_PI_2, 1.0);
        let out = transform_vertex(&v, &t, 1.0);
        assert!((out.position - DVec3::Z).length() < 1e-12);
        assert!((out.normal - DVec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_scale_then_translate() {
        let v = Vertex::new(DVec3::new(1.0, 1.0, 1.0), DVec3::Y, DVec2::ZERO);
        let t = InstanceTransform::new(DVec3::new(2.0, 0.0, 3.0), 0.0, 2.0);
        let out = transform_vertex(&v, &t, TARGET_UNIT_SCALE);
        assert!((out.position - DVec3::new(400.0, 200.0, 500.0)).length() < 1e-9);
        assert!((out.normal - DVec3::Y).length() < 1e-12);
    }

    #[test]
    fn test_yaw_composition() {
        let (a, b) = (0.7, 2.9);
        let v = sample();
        let once = transform_vertex(&v, &InstanceTransform::new(DVec3::ZERO, a + b, 1.0), 1.0);
        let first = transform_vertex(&v, &InstanceTransform::new(DVec3::ZERO, a, 1.0), 1.0);
        let twice = transform_vertex(&first, &InstanceTransform::new(DVec3::ZERO, b, 1.0), 1.0);
        assert!((once.position - twice.position).length() < 1e-9);
        assert!((once.normal - twice.normal).length() < 1e-9);

        let wrapped = transform_vertex(&v, &InstanceTransform::new(DVec3::ZERO, a + b - 2.0 * PI, 1.0), 1.0);
        assert!((once.position - wrapped.position).length() < 1e-9);
    }

    #[test]
    fn test_normals_stay_unit_under_scale() {
        let v = sample();
        let t = InstanceTransform::new(DVec3::new(-4.0, 1.0, 9.0), 1.234, 3.5);
        let out = transform_vertex(&v, &t, TARGET_UNIT_SCALE);
        assert!((out.normal.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_transform_mesh_keeps_indices() {
        let mesh = Mesh {
            vertices: vec![sample(); 3],
            indices: vec![0, 1, 2],
        };
        let out = transform_mesh(&mesh, &InstanceTransform::default(), TARGET_UNIT_SCALE);
        assert_eq!(out.indices, mesh.indices);
        assert_eq!(out.vertex_count(), 3);
    }
}
