//! Integration tests for the geometry layer.
//!
//! Tests end-to-end: catalog entry -> generator -> transform -> validate mesh output.

use std::f64::consts::{FRAC_PI_2, PI};

use glam::DVec3;
use parkgen::catalog;
use parkgen::fixtures::*;
use parkgen::transform::{transform_mesh, InstanceTransform, TARGET_UNIT_SCALE};
use parkgen::validation::MeshValidator;

#[test]
fn test_every_catalog_piece_validates() {
    for entry in catalog::entries() {
        let mesh = entry.generate();
        let v = MeshValidator::new(&mesh);
        let errors = v.validate_all();
        assert!(errors.is_empty(), "{}: {:?}", entry.id, errors);
        assert!(v.vertex_count() > 0, "{} is empty", entry.id);
        assert!(v.triangle_count() > 0, "{} has no triangles", entry.id);
    }
}

#[test]
fn test_generators_are_deterministic() {
    for entry in catalog::entries() {
        assert_eq!(entry.generate(), entry.generate(), "{}", entry.id);
    }
}

#[test]
fn test_pieces_rest_on_the_ground() {
    for entry in catalog::entries() {
        if entry.id == "ground-flat" || entry.id == "half-pipe" {
            continue;
        }
        let mesh = entry.generate();
        let aabb = MeshValidator::new(&mesh).aabb().unwrap();
        assert!(aabb.min.y.abs() < 1e-9, "{} min y = {}", entry.id, aabb.min.y);
    }
}

#[test]
fn test_ground_top_is_flush() {
    let mesh = catalog::lookup("ground-flat").unwrap().generate();
    let v = MeshValidator::new(&mesh);
    assert!(v.assert_dimensions_approx([10.0, 0.5, 10.0], 1e-9));
    assert!(v.aabb().unwrap().max.y.abs() < 1e-12);
}

#[test]
fn test_ledge_dimensions() {
    let mesh = catalog::lookup("ledge").unwrap().generate();
    assert_eq!(mesh.vertex_count(), 28);
    let dims = MeshValidator::new(&mesh).dimensions();
    assert!((dims.x - 5.0).abs() < 1e-9);
    // coping sits slightly above the body
    assert!(dims.y > 0.6 && dims.y < 0.61);
}

#[test]
fn test_transformed_pieces_keep_winding() {
    for entry in catalog::entries() {
        let mesh = entry.generate();
        for yaw in [0.0, FRAC_PI_2, PI, 2.5] {
            let t = InstanceTransform::new(DVec3::new(3.0, 0.5, -7.0), yaw, 1.7);
            let placed = transform_mesh(&mesh, &t, TARGET_UNIT_SCALE);
            let errors = MeshValidator::new(&placed).validate_all();
            assert!(errors.is_empty(), "{} at yaw {yaw}: {:?}", entry.id, errors);
        }
    }
}

#[test]
fn test_scaled_instance_dimensions() {
    let mesh = catalog::lookup("manual-pad").unwrap().generate();
    let inst = instance_with("manual-pad", [0.0; 3], FRAC_PI_2, 2.0);
    let placed = transform_mesh(&mesh, &InstanceTransform::from_instance(&inst), 1.0);
    // 4 × 0.3 × 2 block, doubled and turned a quarter
    assert!(MeshValidator::new(&placed).assert_dimensions_approx([4.0, 0.6, 8.0], 1e-9));
}

#[test]
fn test_every_catalog_piece_fixture_covers_catalog() {
    let pieces = every_catalog_piece();
    assert_eq!(pieces.len(), catalog::entries().len());
    assert!(pieces.iter().all(|p| catalog::lookup(&p.kind).is_some()));
}
