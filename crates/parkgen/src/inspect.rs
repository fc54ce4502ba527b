//! Reads an encoded scene file back and checks its structure.
//!
//! The reader walks the token stream the way the game loader does: one
//! whitespace-delimited value at a time, skipping everything after `#` on a
//! line. Counts declared in headers are cross-checked against the data that
//! follows them.

use std::str::FromStr;

use crate::encoder::MAGIC;
use crate::error::InspectError;

type Result<T> = std::result::Result<T, InspectError>;

/// Per-mesh header values from the `VIS` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshHeader {
    pub index_count: usize,
    pub vertex_count: usize,
    pub flags: u32,
    pub colour_sets: usize,
    pub uv_sets: usize,
}

impl MeshHeader {
    /// `None` when the declared set counts overflow.
    fn tokens_per_vertex(&self) -> Option<usize> {
        let normals = if self.flags & 0x1 != 0 { 3 } else { 0 };
        let uvs = self.uv_sets.checked_mul(2)?;
        let colours = self.colour_sets.checked_mul(4)?;
        uvs.checked_add(colours)?.checked_add(normals + 3)
    }
}

/// Summary of a well-formed scene file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneFileStats {
    pub version: u32,
    pub textures: Vec<String>,
    pub material_count: usize,
    pub meshes: Vec<MeshHeader>,
    /// Total from the `VIS` header; equals the sum over `meshes`.
    pub vertex_count: usize,
    pub index_count: usize,
    pub collision_vertices: Vec<[f64; 3]>,
    pub collision_triangles: Vec<[u32; 3]>,
}

impl SceneFileStats {
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.collision_triangles.len()
    }
}

/// Tokens of a single material record after the `#Material` comment line.
const MATERIAL_TOKENS: usize = 20;

struct Tokens<'a> {
    items: Vec<(usize, &'a str)>,
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        let mut items = Vec::new();
        for (n, line) in text.lines().enumerate() {
            for tok in line.split_whitespace() {
                if tok.starts_with('#') {
                    break;
                }
                items.push((n + 1, tok));
            }
        }
        Self { items, pos: 0 }
    }

    fn next(&mut self, expected: &'static str) -> Result<(usize, &'a str)> {
        let tok = self
            .items
            .get(self.pos)
            .copied()
            .ok_or(InspectError::UnexpectedEnd { expected })?;
        self.pos += 1;
        Ok(tok)
    }

    fn parse<T: FromStr>(&mut self, expected: &'static str) -> Result<T> {
        let (line, tok) = self.next(expected)?;
        tok.parse().map_err(|_| InspectError::BadToken {
            line,
            expected,
            found: tok.to_string(),
        })
    }

    fn expect(&mut self, literal: &'static str) -> Result<()> {
        let (line, tok) = self.next(literal)?;
        if tok == literal {
            Ok(())
        } else {
            Err(InspectError::BadToken {
                line,
                expected: literal,
                found: tok.to_string(),
            })
        }
    }

    fn remaining(&self) -> usize {
        self.items.len() - self.pos
    }

    /// Token length of `count` records of `width` tokens each. Fails unless
    /// the rest of the file can hold them.
    fn span(&self, count: usize, width: usize, what: &'static str) -> Result<usize> {
        count
            .checked_mul(width)
            .filter(|&n| n <= self.remaining())
            .ok_or(InspectError::CountTooLarge { what, count })
    }

    fn skip_records(&mut self, count: usize, width: usize, what: &'static str) -> Result<()> {
        self.pos += self.span(count, width, what)?;
        Ok(())
    }

    fn finish(&self) -> Result<()> {
        match self.items.get(self.pos) {
            Some(&(line, _)) => Err(InspectError::TrailingData { line }),
            None => Ok(()),
        }
    }
}

/// Parse and validate an encoded scene file.
pub fn inspect_scene(text: &str) -> Result<SceneFileStats> {
    let mut t = Tokens::new(text);
    let mut stats = SceneFileStats::default();

    for &b in MAGIC {
        let v: u8 = t.parse("magic byte").map_err(|_| InspectError::BadMagic)?;
        if v != b {
            return Err(InspectError::BadMagic);
        }
    }
    stats.version = t.parse("format version")?;

    read_vis(&mut t, &mut stats)?;
    read_col(&mut t, &mut stats)?;

    t.expect("<EDGE")?;
    let edges: usize = t.parse("edge count")?;
    t.skip_records(edges, 2, "edge records")?;
    t.expect(">")?;

    t.expect("<VOLU")?;
    let volumes: usize = t.parse("volume count")?;
    if volumes != 0 {
        let (line, found) = t.next("end of volume section")?;
        return Err(InspectError::BadToken {
            line,
            expected: "empty volume section",
            found: found.to_string(),
        });
    }
    t.expect(">")?;
    t.finish()?;

    Ok(stats)
}

fn read_vis(t: &mut Tokens<'_>, stats: &mut SceneFileStats) -> Result<()> {
    t.expect("<VIS")?;
    let _tag: u32 = t.parse("VIS tag value")?;

    let texture_count: usize = t.parse("texture count")?;
    t.span(texture_count, 1, "texture names")?;
    for _ in 0..texture_count {
        let (_, name) = t.next("texture name")?;
        stats.textures.push(name.to_string());
    }

    stats.material_count = t.parse("material count")?;
    t.skip_records(stats.material_count, MATERIAL_TOKENS, "material records")?;

    stats.vertex_count = t.parse("total vertex count")?;
    let mesh_count: usize = t.parse("mesh count")?;
    t.span(mesh_count, 5, "mesh headers")?;

    for _ in 0..mesh_count {
        stats.meshes.push(MeshHeader {
            index_count: t.parse("index count")?,
            vertex_count: t.parse("vertex count")?,
            flags: t.parse("mesh flags")?,
            colour_sets: t.parse("colour set count")?,
            uv_sets: t.parse("uv set count")?,
        });
    }

    let actual = checked_total(stats.meshes.iter().map(|m| m.vertex_count), "vertices")?;
    if actual != stats.vertex_count {
        return Err(InspectError::VertexTotalMismatch {
            declared: stats.vertex_count,
            actual,
        });
    }

    for header in &stats.meshes {
        let width = header
            .tokens_per_vertex()
            .ok_or(InspectError::CountTooLarge {
                what: "vertex attributes",
                count: header.colour_sets.max(header.uv_sets),
            })?;
        let values = t.span(header.vertex_count, width, "vertex records")?;
        for _ in 0..values {
            let _: f64 = t.parse("vertex value")?;
        }
    }

    for (mesh, header) in stats.meshes.iter().enumerate() {
        if header.index_count % 3 != 0 {
            return Err(InspectError::IndexStride {
                mesh,
                count: header.index_count,
            });
        }
        t.span(header.index_count, 1, "vertex indices")?;
        for _ in 0..header.index_count {
            let index: u32 = t.parse("vertex index")?;
            if index as usize >= header.vertex_count {
                return Err(InspectError::IndexOutOfRange {
                    mesh,
                    index,
                    vertex_count: header.vertex_count,
                });
            }
        }
    }
    stats.index_count = checked_total(stats.meshes.iter().map(|m| m.index_count), "indices")?;

    t.expect(">")
}

fn read_col(t: &mut Tokens<'_>, stats: &mut SceneFileStats) -> Result<()> {
    t.expect("<COL")?;
    let vertex_count: usize = t.parse("collision vertex count")?;
    if vertex_count != stats.vertex_count {
        return Err(InspectError::CollisionMismatch {
            what: "vertex count",
            vis: stats.vertex_count,
            col: vertex_count,
        });
    }
    t.span(vertex_count, 3, "collision vertices")?;
    stats.collision_vertices.reserve(vertex_count);
    for _ in 0..vertex_count {
        stats.collision_vertices.push([
            t.parse("collision x")?,
            t.parse("collision y")?,
            t.parse("collision z")?,
        ]);
    }

    let triangle_count: usize = t.parse("triangle count")?;
    if triangle_count != stats.index_count / 3 {
        return Err(InspectError::CollisionMismatch {
            what: "triangle count",
            vis: stats.index_count / 3,
            col: triangle_count,
        });
    }
    t.span(triangle_count, 4, "collision triangles")?;
    stats.collision_triangles.reserve(triangle_count);
    for triangle in 0..triangle_count {
        let tri: [u32; 3] = [
            t.parse("collision index")?,
            t.parse("collision index")?,
            t.parse("collision index")?,
        ];
        let _flag: u32 = t.parse("collision flag")?;
        if let Some(&index) = tri.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(InspectError::CollisionIndexOutOfRange {
                triangle,
                index,
                vertex_count,
            });
        }
        stats.collision_triangles.push(tri);
    }

    t.expect(">")
}

fn checked_total(counts: impl Iterator<Item = usize>, what: &'static str) -> Result<usize> {
    counts.into_iter().try_fold(0usize, |acc, n| {
        acc.checked_add(n)
            .ok_or(InspectError::CountTooLarge { what, count: n })
    })
}
