//! Mesh validation utilities.
//!
//! `MeshValidator` checks generated geometry: index stride and range, unit
//! normals, triangle winding against the declared normals, bounding box.

use glam::DVec3;

use crate::mesh::Mesh;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    /// `None` for a mesh without vertices.
    pub fn from_mesh(mesh: &Mesh) -> Option<Self> {
        let first = mesh.vertices.first()?.position;
        Some(mesh.vertices.iter().fold(
            Self {
                min: first,
                max: first,
            },
            |b, v| Self {
                min: b.min.min(v.position),
                max: b.max.max(v.position),
            },
        ))
    }

    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }
}

/// Validator for `Mesh` integrity checks.
pub struct MeshValidator<'a> {
    mesh: &'a Mesh,
}

impl<'a> MeshValidator<'a> {
    pub fn new(mesh: &'a Mesh) -> Self {
        Self { mesh }
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    /// Check that the index buffer length is a multiple of 3.
    pub fn is_index_stride_valid(&self) -> bool {
        self.mesh.indices.len() % 3 == 0
    }

    /// Check that all indices are within the valid vertex range.
    pub fn are_indices_in_range(&self) -> bool {
        let max_idx = self.vertex_count() as u32;
        self.mesh.indices.iter().all(|&i| i < max_idx)
    }

    /// Check that all vertex normals have unit length (within epsilon).
    pub fn are_normals_normalized(&self, epsilon: f64) -> bool {
        self.mesh
            .vertices
            .iter()
            .all(|v| (v.normal.length() - 1.0).abs() <= epsilon)
    }

    /// Triangles whose CCW geometric normal points against the average of
    /// their vertex normals. Degenerate triangles are not counted.
    pub fn winding_mismatches(&self) -> usize {
        if !self.are_indices_in_range() {
            return 0;
        }
        let v = &self.mesh.vertices;
        self.mesh
            .triangles()
            .filter(|&[a, b, c]| {
                let (a, b, c) = (&v[a as usize], &v[b as usize], &v[c as usize]);
                let geometric = (b.position - a.position).cross(c.position - a.position);
                let declared = a.normal + b.normal + c.normal;
                geometric.length_squared() > 1e-18
                    && declared.length_squared() > 1e-18
                    && geometric.dot(declared) < 0.0
            })
            .count()
    }

    pub fn aabb(&self) -> Option<Aabb> {
        Aabb::from_mesh(self.mesh)
    }

    /// Width, height, depth of the bounding box (zero for an empty mesh).
    pub fn dimensions(&self) -> DVec3 {
        self.aabb().map(|b| b.size()).unwrap_or(DVec3::ZERO)
    }

    /// Check that the AABB dimensions are approximately equal to `expected`.
    pub fn assert_dimensions_approx(&self, expected: [f64; 3], tolerance: f64) -> bool {
        let dims = self.dimensions().to_array();
        dims.iter()
            .zip(expected)
            .all(|(d, e)| (d - e).abs() < tolerance)
    }

    /// Run all validation checks and return a list of error messages.
    /// An empty list means the mesh is valid.
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.is_index_stride_valid() {
            errors.push(format!(
                "Index buffer length {} is not a multiple of 3",
                self.mesh.indices.len()
            ));
        }

        if !self.are_indices_in_range() {
            let max_idx = self.vertex_count() as u32;
            let out_of_range: Vec<_> = self
                .mesh
                .indices
                .iter()
                .filter(|&&i| i >= max_idx)
                .take(5)
                .collect();
            errors.push(format!(
                "Indices out of range (vertex_count={}): {:?}",
                max_idx, out_of_range
            ));
        }

        if !self.are_normals_normalized(1e-6) {
            errors.push("Some normals are not unit-length (epsilon=1e-6)".to_string());
        }

        let flipped = self.winding_mismatches();
        if flipped > 0 {
            errors.push(format!("{flipped} triangles wound against their normals"));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_valid_quad() {
        let mesh = fixtures::unit_quad();
        let v = MeshValidator::new(&mesh);
        assert_eq!(v.vertex_count(), 4);
        assert_eq!(v.triangle_count(), 2);
        assert!(v.validate_all().is_empty());
    }

    #[test]
    fn test_out_of_range_index() {
        let mut mesh = fixtures::unit_quad();
        mesh.indices[0] = 17;
        let errors = MeshValidator::new(&mesh).validate_all();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("17"));
    }

    #[test]
    fn test_index_stride() {
        let mut mesh = fixtures::unit_quad();
        mesh.indices.pop();
        assert!(!MeshValidator::new(&mesh).is_index_stride_valid());
    }

    #[test]
    fn test_flipped_triangle_is_reported() {
        let mut mesh = fixtures::unit_quad();
        mesh.indices.swap(1, 2);
        let v = MeshValidator::new(&mesh);
        assert_eq!(v.winding_mismatches(), 1);
        assert!(!v.validate_all().is_empty());
    }

    #[test]
    fn test_non_unit_normal() {
        let mut mesh = fixtures::unit_quad();
        mesh.vertices[3].normal *= 2.0;
        assert!(!MeshValidator::new(&mesh).are_normals_normalized(1e-6));
    }

    #[test]
    fn test_cube_dimensions() {
        let mesh = fixtures::unit_cube();
        let v = MeshValidator::new(&mesh);
        assert!(v.assert_dimensions_approx([1.0, 1.0, 1.0], 1e-9));
        assert!(v.validate_all().is_empty());
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = Mesh::default();
        let v = MeshValidator::new(&mesh);
        assert!(v.aabb().is_none());
        assert_eq!(v.dimensions(), DVec3::ZERO);
        assert!(v.validate_all().is_empty());
    }
}
