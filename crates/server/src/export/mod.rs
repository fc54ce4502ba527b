use parkgen::archive::ZipArchive;
use parkgen::inspect::{inspect_scene, SceneFileStats};
use parkgen::{ExportError, Exporter, InspectError};
use serde_json::{json, Value};
use shared::ParkDescription;

/// Finished zip download.
pub struct ParkArchive {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub skipped: Vec<String>,
}

/// Park document → zip archive. CPU-bound; run on the blocking pool.
pub fn build_park_zip(exporter: &Exporter, park: &ParkDescription) -> Result<ParkArchive, ExportError> {
    let bundle = exporter.export(&park.objects, &park.name)?;
    let file_name = format!("{}.zip", bundle.safe_name);
    let skipped = bundle.stats.skipped.clone();
    let bytes = bundle.write_to(ZipArchive::new())?;
    Ok(ParkArchive {
        file_name,
        bytes,
        skipped,
    })
}

/// Scene file text → JSON summary.
pub fn inspect_scene_text(text: &str) -> Result<Value, InspectError> {
    let stats: SceneFileStats = inspect_scene(text)?;
    Ok(json!({
        "version": stats.version,
        "textures": stats.textures,
        "materials": stats.material_count,
        "meshes": stats.mesh_count(),
        "vertices": stats.vertex_count,
        "triangles": stats.triangle_count(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkgen::fixtures::{instance, sample_park};
    use parkgen::ExportSettings;

    fn exporter() -> Exporter {
        Exporter::new(ExportSettings {
            texture_size: 8,
            ..Default::default()
        })
    }

    #[test]
    fn test_zip_file_name() {
        let archive = build_park_zip(&exporter(), &sample_park()).unwrap();
        assert_eq!(archive.file_name, "sunset_plaza.zip");
        assert_eq!(&archive.bytes[..2], b"PK");
        assert_eq!(archive.skipped, vec!["volcano".to_string()]);
    }

    #[test]
    fn test_empty_park() {
        let park = ParkDescription::default();
        assert!(matches!(
            build_park_zip(&exporter(), &park),
            Err(ExportError::EmptyScene)
        ));
    }

    #[test]
    fn test_inspect_summary() {
        let bundle = exporter()
            .export(&[instance("ledge", [0.0; 3])], "x")
            .unwrap();
        let summary = inspect_scene_text(bundle.scene_text().unwrap()).unwrap();
        assert_eq!(summary["meshes"], 2);
        assert_eq!(summary["vertices"], 52);
    }
}
