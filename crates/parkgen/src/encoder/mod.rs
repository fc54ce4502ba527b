//! Scene-file encoder for the target skate game's text format.
//!
//! The file is a newline-separated token stream with `#comment` tags and four
//! bracketed sections in fixed order: `VIS`, `COL`, `EDGE`, `VOLU`.

mod materials;

use std::fmt::Display;

pub use materials::{Material, MATERIALS};

use crate::mesh::Mesh;

/// Per-byte ASCII codes opening every file.
pub const MAGIC: &[u8; 4] = b"TASK";
pub const FORMAT_VERSION: u32 = 1003;
/// Constant following the `<VIS` tag.
pub const VIS_TAG_VALUE: u32 = 17;
/// 1 normal set, 2 colour sets, 2 UV sets.
pub const MESH_FLAGS: u32 = 0x1;
pub const COLOUR_SETS: u32 = 2;
pub const UV_SETS: u32 = 2;

/// All vertices are opaque white in both colour sets.
const VERTEX_COLOUR: u8 = 255;
/// Every collision triangle uses material/flag 0.
const COLLISION_FLAG: u32 = 0;

/// Builds the file one token line at a time.
pub(crate) struct LineWriter {
    out: String,
}

impl LineWriter {
    fn with_capacity(bytes: usize) -> Self {
        Self {
            out: String::with_capacity(bytes),
        }
    }

    fn line(&mut self, s: &str) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        self.out.push_str(s);
    }

    pub(crate) fn text(&mut self, s: &str) {
        self.line(s);
    }

    pub(crate) fn int(&mut self, v: impl Display) {
        self.line(&v.to_string());
    }

    pub(crate) fn float(&mut self, v: f64) {
        self.line(&format_float(v));
    }

    pub(crate) fn tagged(&mut self, v: impl Display, comment: &str) {
        self.line(&format!("{v} #{comment}"));
    }

    pub(crate) fn tagged_float(&mut self, v: f64, comment: &str) {
        self.line(&format!("{} #{comment}", format_float(v)));
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Fixed six-decimal float; negative zero prints as `0.000000`.
pub fn format_float(v: f64) -> String {
    let s = format!("{v:.6}");
    if s == "-0.000000" {
        "0.000000".to_string()
    } else {
        s
    }
}

/// Aggregate counts shared by the VIS and COL sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SceneTotals {
    pub meshes: usize,
    pub vertices: usize,
    pub indices: usize,
}

impl SceneTotals {
    pub fn of(meshes: &[Mesh]) -> Self {
        Self {
            meshes: meshes.len(),
            vertices: meshes.iter().map(Mesh::vertex_count).sum(),
            indices: meshes.iter().map(Mesh::index_count).sum(),
        }
    }

    pub fn triangles(&self) -> usize {
        self.indices / 3
    }
}

/// Encode world-space meshes (already in target units) into the scene file.
pub fn encode_scene(meshes: &[Mesh], textures: &[String]) -> String {
    let totals = SceneTotals::of(meshes);
    // ~10 bytes per line, 18 lines per vertex
    let mut w = LineWriter::with_capacity(8192 + totals.vertices * 180 + totals.indices * 12);

    write_header(&mut w);
    write_vis(&mut w, meshes, textures, &totals);
    write_col(&mut w, meshes, &totals);
    write_edge(&mut w);
    write_volu(&mut w);

    tracing::debug!(
        "encoded scene: {} meshes, {} vertices, {} triangles",
        totals.meshes,
        totals.vertices,
        totals.triangles()
    );
    w.finish()
}

fn write_header(w: &mut LineWriter) {
    for b in MAGIC {
        w.int(b);
    }
    w.tagged(FORMAT_VERSION, "Version");
}

fn write_vis(w: &mut LineWriter, meshes: &[Mesh], textures: &[String], totals: &SceneTotals) {
    w.text("<VIS ");
    w.int(VIS_TAG_VALUE);

    w.tagged(textures.len(), "Num Textures");
    for t in textures {
        w.text(t);
    }

    w.tagged(MATERIALS.len(), "Num Materials");
    for m in &MATERIALS {
        m.write(w);
    }

    w.tagged(totals.vertices, "Num Vertices");
    w.int(totals.meshes);

    // ── Pass 1: every mesh header ────────────────────────────
    for mesh in meshes {
        w.text("#Mesh");
        w.tagged(mesh.index_count(), "Num Indices");
        w.tagged(mesh.vertex_count(), "Num Vertices");
        w.text("#Normals (Flags |= 0x1)");
        w.tagged(MESH_FLAGS, "Flags");
        w.tagged(COLOUR_SETS, "Num Colour Sets");
        w.tagged(UV_SETS, "Num Uv Sets");
    }

    // ── Pass 2: every mesh's vertex records ──────────────────
    for mesh in meshes {
        for v in &mesh.vertices {
            for c in v.normal.to_array() {
                w.float(c);
            }
            for c in v.position.to_array() {
                w.float(c);
            }
            for c in [v.uv.x, v.uv.y, v.uv2.x, v.uv2.y] {
                w.float(c);
            }
            for _ in 0..(4 * COLOUR_SETS) {
                w.int(VERTEX_COLOUR);
            }
        }
    }

    // ── Pass 3: every mesh's index list ──────────────────────
    for mesh in meshes {
        for i in &mesh.indices {
            w.int(i);
        }
    }

    w.text(">");
}

fn write_col(w: &mut LineWriter, meshes: &[Mesh], totals: &SceneTotals) {
    w.text("<COL ");
    w.tagged(totals.vertices, "Num Vertices");
    for mesh in meshes {
        for v in &mesh.vertices {
            for c in v.position.to_array() {
                w.float(c);
            }
        }
    }

    w.tagged(totals.triangles(), "Num Triangles");
    let mut base = 0u32;
    for mesh in meshes {
        for [a, b, c] in mesh.triangles() {
            w.int(a + base);
            w.int(b + base);
            w.int(c + base);
            w.int(COLLISION_FLAG);
        }
        base += mesh.vertex_count() as u32;
    }
    w.text(">");
}

fn write_edge(w: &mut LineWriter) {
    w.text("<EDGE");
    w.tagged(0, "Num Edges");
    w.text(">");
}

fn write_volu(w: &mut LineWriter) {
    w.text("<VOLU");
    w.int(0);
    w.text(">");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Vertex;
    use glam::{DVec2, DVec3};

    fn triangle(offset: f64) -> Mesh {
        let v = |x: f64, y: f64| Vertex::new(DVec3::new(x + offset, y, 0.0), DVec3::Z, DVec2::new(x, y));
        Mesh {
            vertices: vec![v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0)],
            indices: vec![0, 1, 2],
        }
    }

    fn lines(text: &str) -> Vec<&str> {
        text.split('\n').collect()
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(1.0), "1.000000");
        assert_eq!(format_float(-0.0), "0.000000");
        assert_eq!(format_float(-1e-9), "0.000000");
        assert_eq!(format_float(-250.5), "-250.500000");
    }

    #[test]
    fn test_header_lines() {
        let text = encode_scene(&[triangle(0.0)], &["concrete_gray".to_string()]);
        let l = lines(&text);
        assert_eq!(&l[..8], &["84", "65", "83", "75", "1003 #Version", "<VIS ", "17", "1 #Num Textures"]);
        assert_eq!(l[8], "concrete_gray");
        assert_eq!(l[9], "6 #Num Materials");
        assert_eq!(l[10], "#Material");
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_material_record_shape() {
        let text = encode_scene(&[], &[]);
        let l = lines(&text);
        // 7 header lines, texture count, material count, then 24 lines per material
        let first = 9;
        assert_eq!(l[first + 3], "128");
        assert_eq!(l[first + 7], "1.000000 #Specular");
        assert_eq!(l[first + 21], "0 #Texture index");
        assert_eq!(l[first + 24], "#Material");
        assert_eq!(l[first + 24 + 3], "100");
        assert_eq!(l[first + 24 * 6], "0 #Num Vertices");
    }

    #[test]
    fn test_three_pass_layout() {
        let text = encode_scene(&[triangle(0.0), triangle(5.0)], &[]);
        let l = lines(&text);
        let start = l.iter().position(|s| *s == "6 #Num Vertices").unwrap();
        assert_eq!(l[start + 1], "2");
        // both headers come before any vertex data
        assert_eq!(l[start + 2], "#Mesh");
        assert_eq!(l[start + 9], "#Mesh");
        assert_eq!(l[start + 10], "3 #Num Indices");
        // first vertex: normal then position
        assert_eq!(&l[start + 16..start + 22], &["0.000000", "0.000000", "1.000000", "0.000000", "0.000000", "0.000000"]);
        // 18 tokens per vertex, 6 vertices, then local indices of both meshes
        let indices = start + 16 + 18 * 6;
        assert_eq!(&l[indices..indices + 7], &["0", "1", "2", "0", "1", "2", ">"]);
    }

    #[test]
    fn test_collision_indices_are_rebased() {
        let text = encode_scene(&[triangle(0.0), triangle(5.0)], &[]);
        let l = lines(&text);
        let col = l.iter().position(|s| *s == "<COL ").unwrap();
        assert_eq!(l[col + 1], "6 #Num Vertices");
        assert_eq!(l[col + 2 + 9], "5.000000");
        let tris = col + 2 + 18;
        assert_eq!(l[tris], "2 #Num Triangles");
        assert_eq!(&l[tris + 1..tris + 10], &["0", "1", "2", "0", "3", "4", "5", "0", ">"]);
    }

    #[test]
    fn test_trailing_sections() {
        let text = encode_scene(&[triangle(0.0)], &[]);
        assert!(text.ends_with("<EDGE\n0 #Num Edges\n>\n<VOLU\n0\n>"));
    }
}
