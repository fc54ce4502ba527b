//! Triangle mesh data and the builder every generator assembles into.

use glam::{DVec2, DVec3};

/// A single vertex: position, normal and two UV sets.
///
/// The second UV set is written to the scene file as the lightmap channel
/// and currently always mirrors the first one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: DVec3,
    pub normal: DVec3,
    pub uv: DVec2,
    pub uv2: DVec2,
}

impl Vertex {
    pub fn new(position: DVec3, normal: DVec3, uv: DVec2) -> Self {
        Self {
            position,
            normal,
            uv,
            uv2: uv,
        }
    }
}

/// Vertex buffer plus flat triangle index list (stride 3, CCW).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }
}

/// Unit normal of the plane through `a`, `b`, `c`, flipped if needed so it
/// points away from `interior`.
pub fn face_normal(a: DVec3, b: DVec3, c: DVec3, interior: DVec3) -> DVec3 {
    let n = (b - a).cross(c - a).normalize_or_zero();
    if n.dot(a - interior) < 0.0 {
        -n
    } else {
        n
    }
}

/// Planar texture coordinates: drop the dominant axis of `normal`.
pub fn planar_uv(p: DVec3, normal: DVec3) -> DVec2 {
    let n = normal.abs();
    if n.y >= n.x && n.y >= n.z {
        DVec2::new(p.x, p.z)
    } else if n.x >= n.z {
        DVec2::new(p.z, p.y)
    } else {
        DVec2::new(p.x, p.y)
    }
}

/// Growing vertex/index buffers. Owns the running vertex offset so callers
/// never re-base indices by hand.
#[derive(Debug, Default)]
pub struct MeshBuilder {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    /// Index the next pushed vertex will receive.
    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// Append a sub-mesh, re-basing its indices by the current vertex count.
    pub fn append(&mut self, mesh: &Mesh) {
        let base = self.vertex_count();
        self.vertices.extend_from_slice(&mesh.vertices);
        self.indices.extend(mesh.indices.iter().map(|&i| i + base));
    }

    pub fn push_vertex(&mut self, vertex: Vertex) -> u32 {
        let id = self.vertex_count();
        self.vertices.push(vertex);
        id
    }

    /// Triangle over already pushed vertices, wound so its geometric normal
    /// agrees with `facing`.
    fn push_oriented(&mut self, a: u32, b: u32, c: u32, facing: DVec3) {
        let pa = self.vertices[a as usize].position;
        let pb = self.vertices[b as usize].position;
        let pc = self.vertices[c as usize].position;
        if (pb - pa).cross(pc - pa).dot(facing) < 0.0 {
            self.indices.extend_from_slice(&[a, c, b]);
        } else {
            self.indices.extend_from_slice(&[a, b, c]);
        }
    }

    /// Quad over already pushed vertices `a b c d` (cyclic order).
    fn push_oriented_quad(&mut self, [a, b, c, d]: [u32; 4], facing: DVec3) {
        let p = |i: u32| self.vertices[i as usize].position;
        // Diagonal cross product stays valid when one triangle is degenerate.
        let geometric = (p(c) - p(a)).cross(p(d) - p(b));
        if geometric.dot(facing) < 0.0 {
            self.indices.extend_from_slice(&[a, c, b, a, d, c]);
        } else {
            self.indices.extend_from_slice(&[a, b, c, a, c, d]);
        }
    }

    /// Flat quad with unit UVs; `corners` in cyclic order.
    pub fn push_quad(&mut self, corners: [DVec3; 4], normal: DVec3) {
        const UVS: [[f64; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let base = self.vertex_count();
        for (p, uv) in corners.iter().zip(UVS) {
            self.vertices.push(Vertex::new(*p, normal, DVec2::from(uv)));
        }
        self.push_oriented_quad([base, base + 1, base + 2, base + 3], normal);
    }

    /// Flat triangle with explicit UVs.
    pub fn push_triangle(&mut self, corners: [DVec3; 3], normal: DVec3, uvs: [DVec2; 3]) {
        let base = self.vertex_count();
        for (p, uv) in corners.iter().zip(uvs) {
            self.vertices.push(Vertex::new(*p, normal, uv));
        }
        self.push_oriented(base, base + 1, base + 2, normal);
    }

    /// Fan from `center` over consecutive `rim` points, all sharing `normal`.
    /// Used for cylinder caps and the side panels of curved ramps.
    pub fn push_fan(&mut self, center: DVec3, rim: &[DVec3], normal: DVec3) {
        let hub = self.push_vertex(Vertex::new(center, normal, planar_uv(center, normal)));
        let first = self.vertex_count();
        for p in rim {
            self.vertices.push(Vertex::new(*p, normal, planar_uv(*p, normal)));
        }
        for i in 0..rim.len().saturating_sub(1) as u32 {
            self.push_oriented(hub, first + i, first + i + 1, normal);
        }
    }

    /// Ruled surface between two equally long rows of vertices. Quad `i`
    /// spans rows `i` and `i + 1`; each keeps the facing of its own normals.
    pub fn push_strip(&mut self, rows: &[(Vertex, Vertex)]) {
        let base = self.vertex_count();
        for (left, right) in rows {
            self.vertices.push(*left);
            self.vertices.push(*right);
        }
        for i in 0..rows.len().saturating_sub(1) {
            let l0 = base + 2 * i as u32;
            let (r0, l1, r1) = (l0 + 1, l0 + 2, l0 + 3);
            let facing = rows[i].0.normal + rows[i].1.normal + rows[i + 1].0.normal + rows[i + 1].1.normal;
            self.push_oriented_quad([l0, l1, r1, r0], facing);
        }
    }

    pub fn build(self) -> Mesh {
        Mesh {
            vertices: self.vertices,
            indices: self.indices,
        }
    }
}
