//! Export trigger: placed instances → scene file, metadata, textures, archive.

use std::path::{Path, PathBuf};

use glam::DVec3;
use shared::PlacedInstance;

use crate::archive::{ArchiveWriter, DirectoryArchive, ZipArchive};
use crate::catalog;
use crate::encoder::{encode_scene, SceneTotals};
use crate::error::{ExportError, Result};
use crate::generators;
use crate::mesh::Mesh;
use crate::metadata::{render_mod_json, MOD_FILE_NAME};
use crate::settings::ExportSettings;
use crate::textures::generate_textures;
use crate::transform::{transform_mesh, InstanceTransform};

/// One named file of an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Counts reported after an export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Includes the ground slab.
    pub meshes: usize,
    pub vertices: usize,
    pub triangles: usize,
    /// Type ids of instances that had no catalog entry.
    pub skipped: Vec<String>,
}

/// Everything one export produces, in archive order.
#[derive(Debug, Clone)]
pub struct ExportBundle {
    pub park_name: String,
    pub safe_name: String,
    pub entries: Vec<ArchiveEntry>,
    pub stats: ExportStats,
}

impl ExportBundle {
    /// `<safe_name>.txt`
    pub fn scene_file_name(&self) -> String {
        scene_file_name(&self.safe_name)
    }

    pub fn entry(&self, name: &str) -> Option<&ArchiveEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// The encoded scene file as text.
    pub fn scene_text(&self) -> Option<&str> {
        self.entry(&self.scene_file_name())
            .and_then(|e| std::str::from_utf8(&e.bytes).ok())
    }

    pub fn entry_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Stream every entry into `writer` and seal it.
    pub fn write_to<W: ArchiveWriter>(&self, mut writer: W) -> Result<W::Output> {
        for entry in &self.entries {
            writer.add(&entry.name, &entry.bytes)?;
        }
        writer.finish()
    }
}

fn scene_file_name(safe_name: &str) -> String {
    format!("{safe_name}.txt")
}

/// Lowercase, each whitespace character replaced by `_`. Path separators
/// and the characters Windows rejects in file names map to `_` as well.
/// A blank (or dots-only) name falls back to the default park name.
pub fn safe_file_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.chars().all(|c| c == '.') {
        return safe_file_name(shared::DEFAULT_PARK_NAME);
    }
    name.chars()
        .map(|c| match c {
            c if c.is_whitespace() => '_',
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect::<String>()
        .to_lowercase()
}

struct SceneBuild {
    meshes: Vec<Mesh>,
    skipped: Vec<String>,
}

/// Runs exports with a fixed set of settings. Holds no per-export state.
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    settings: ExportSettings,
}

impl Exporter {
    pub fn new(settings: ExportSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// World-space meshes in target units: the ground slab first, then one
    /// mesh per recognised instance in input order.
    pub fn build_meshes(&self, instances: &[PlacedInstance]) -> Vec<Mesh> {
        self.build_scene(instances).meshes
    }

    fn build_scene(&self, instances: &[PlacedInstance]) -> SceneBuild {
        let unit_scale = self.settings.unit_scale;
        let mut meshes = Vec::with_capacity(instances.len() + 1);
        let mut skipped = Vec::new();

        let ground = InstanceTransform::new(DVec3::from_array(self.settings.ground_position), 0.0, 1.0);
        meshes.push(transform_mesh(
            &generators::ground(self.settings.ground_size),
            &ground,
            unit_scale,
        ));

        for instance in instances {
            let Some(entry) = catalog::lookup(&instance.kind) else {
                tracing::warn!("skipping unknown object type `{}`", instance.kind);
                skipped.push(instance.kind.clone());
                continue;
            };
            let mesh = transform_mesh(
                &entry.generate(),
                &InstanceTransform::from_instance(instance),
                unit_scale,
            );
            tracing::debug!(
                "+ {} at ({}, {}, {}): {} vertices",
                entry.id,
                instance.position.x,
                instance.position.y,
                instance.position.z,
                mesh.vertex_count()
            );
            meshes.push(mesh);
        }

        SceneBuild { meshes, skipped }
    }

    /// Produce all archive entries for one park.
    ///
    /// Fails with [`ExportError::EmptyScene`] before any generation when
    /// `instances` is empty.
    pub fn export(&self, instances: &[PlacedInstance], park_name: &str) -> Result<ExportBundle> {
        if instances.is_empty() {
            return Err(ExportError::EmptyScene);
        }

        let park_name = if park_name.trim().is_empty() {
            self.settings.default_park_name.clone()
        } else {
            park_name.to_string()
        };
        let safe_name = safe_file_name(&park_name);
        let scene_file = scene_file_name(&safe_name);

        let SceneBuild { meshes, skipped } = self.build_scene(instances);
        let totals = SceneTotals::of(&meshes);

        // ── Phase 1: geometry + metadata text ────────────────────
        let scene = encode_scene(&meshes, &self.settings.textures);
        let mod_json = render_mod_json(&park_name, &scene_file, &self.settings.world);

        // ── Phase 2: textures ────────────────────────────────────
        let textures = generate_textures(self.settings.texture_size, self.settings.jpeg_quality())?;

        // ── Phase 3: assemble entries ────────────────────────────
        let mut entries = Vec::with_capacity(2 + textures.len());
        entries.push(ArchiveEntry {
            name: scene_file,
            bytes: scene.into_bytes(),
        });
        entries.push(ArchiveEntry {
            name: MOD_FILE_NAME.to_string(),
            bytes: mod_json.into_bytes(),
        });
        entries.extend(
            textures
                .into_iter()
                .map(|(name, bytes)| ArchiveEntry { name, bytes }),
        );

        let stats = ExportStats {
            meshes: totals.meshes,
            vertices: totals.vertices,
            triangles: totals.triangles(),
            skipped,
        };
        tracing::info!(
            "exported '{}': {} meshes, {} vertices, {} triangles ({} skipped)",
            park_name,
            stats.meshes,
            stats.vertices,
            stats.triangles,
            stats.skipped.len()
        );

        Ok(ExportBundle {
            park_name,
            safe_name,
            entries,
            stats,
        })
    }

    /// Export and pack into an in-memory zip.
    pub fn export_zip(&self, instances: &[PlacedInstance], park_name: &str) -> Result<Vec<u8>> {
        self.export(instances, park_name)?.write_to(ZipArchive::new())
    }

    /// Export into `<dir>/<safe_name>/`, replacing a previous export of the
    /// same park. Returns the folder path.
    pub fn export_to_dir(
        &self,
        instances: &[PlacedInstance],
        park_name: &str,
        dir: &Path,
    ) -> Result<PathBuf> {
        let bundle = self.export(instances, park_name)?;
        std::fs::create_dir_all(dir)?;
        let target = DirectoryArchive::create(dir.join(&bundle.safe_name))?;
        bundle.write_to(target)
    }
}
