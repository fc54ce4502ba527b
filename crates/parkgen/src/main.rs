use std::path::{Path, PathBuf};
use std::process::ExitCode;

use parkgen::inspect::inspect_scene;
use parkgen::{catalog, ExportSettings, Exporter};
use shared::ParkDescription;

const USAGE: &str = "usage:
  parkgen export <park.json> [output_dir] [--zip] [--settings <file>]
  parkgen verify <scene.txt>
  parkgen catalog";

#[derive(Debug, PartialEq)]
enum Command {
    Export {
        park: PathBuf,
        output: PathBuf,
        zip: bool,
        settings: Option<PathBuf>,
    },
    Verify {
        scene: PathBuf,
    },
    Catalog,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parkgen=info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let result = match command {
        Command::Export {
            park,
            output,
            zip,
            settings,
        } => run_export(&park, &output, zip, settings.as_deref()),
        Command::Verify { scene } => run_verify(&scene),
        Command::Catalog => {
            for item in catalog::items() {
                println!("{:<14} {}", item.id, item.name);
            }
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let (name, rest) = args.split_first().ok_or("missing command")?;
    match name.as_str() {
        "export" => {
            let mut positional = Vec::new();
            let mut zip = false;
            let mut settings = None;
            let mut i = 0;
            while i < rest.len() {
                match rest[i].as_str() {
                    "--zip" => zip = true,
                    "--settings" => {
                        i += 1;
                        let path = rest.get(i).ok_or("--settings needs a file")?;
                        settings = Some(PathBuf::from(path));
                    }
                    flag if flag.starts_with("--") => return Err(format!("unknown flag {flag}")),
                    value => positional.push(PathBuf::from(value)),
                }
                i += 1;
            }
            let mut positional = positional.into_iter();
            let park = positional.next().ok_or("missing <park.json>")?;
            let output = positional.next().unwrap_or_else(|| PathBuf::from("."));
            if positional.next().is_some() {
                return Err("too many arguments".to_string());
            }
            Ok(Command::Export {
                park,
                output,
                zip,
                settings,
            })
        }
        "verify" => match rest {
            [scene] => Ok(Command::Verify {
                scene: PathBuf::from(scene),
            }),
            _ => Err("verify takes exactly one file".to_string()),
        },
        "catalog" => Ok(Command::Catalog),
        other => Err(format!("unknown command {other}")),
    }
}

fn run_export(park: &Path, output: &Path, zip: bool, settings: Option<&Path>) -> Result<(), String> {
    let settings = match settings {
        Some(path) => ExportSettings::load_from(path).map_err(|e| e.to_string())?,
        None => ExportSettings::load(),
    };

    let json = std::fs::read_to_string(park)
        .map_err(|e| format!("Failed to read park file {}: {e}", park.display()))?;
    let park_doc: ParkDescription = serde_json::from_str(&json)
        .map_err(|e| format!("Failed to parse park JSON from {}: {e}", park.display()))?;
    tracing::info!(
        "Loaded '{}' from {} ({} objects)",
        park_doc.name,
        park.display(),
        park_doc.objects.len()
    );

    let exporter = Exporter::new(settings);
    if zip {
        let bundle = exporter
            .export(&park_doc.objects, &park_doc.name)
            .map_err(|e| e.to_string())?;
        let bytes = bundle
            .write_to(parkgen::archive::ZipArchive::new())
            .map_err(|e| e.to_string())?;
        std::fs::create_dir_all(output).map_err(|e| e.to_string())?;
        let path = output.join(format!("{}.zip", bundle.safe_name));
        std::fs::write(&path, bytes).map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
        tracing::info!("Wrote {}", path.display());
    } else {
        let dir = exporter
            .export_to_dir(&park_doc.objects, &park_doc.name, output)
            .map_err(|e| e.to_string())?;
        tracing::info!("Export complete, files saved to {}", dir.display());
    }
    Ok(())
}

fn run_verify(scene: &Path) -> Result<(), String> {
    let text = std::fs::read_to_string(scene)
        .map_err(|e| format!("Failed to read {}: {e}", scene.display()))?;
    let stats = inspect_scene(&text).map_err(|e| format!("{}: {e}", scene.display()))?;
    println!("version        {}", stats.version);
    println!("textures       {}", stats.textures.join(", "));
    println!("materials      {}", stats.material_count);
    println!("meshes         {}", stats.mesh_count());
    println!("vertices       {}", stats.vertex_count);
    println!("triangles      {}", stats.triangle_count());
    for (i, mesh) in stats.meshes.iter().enumerate() {
        println!(
            "  mesh {i:>3}: {:>6} vertices {:>6} indices",
            mesh.vertex_count, mesh.index_count
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_export_defaults() {
        assert_eq!(
            parse_args(&args(&["export", "park.json"])),
            Ok(Command::Export {
                park: PathBuf::from("park.json"),
                output: PathBuf::from("."),
                zip: false,
                settings: None,
            })
        );
    }

    #[test]
    fn test_parse_export_flags() {
        assert_eq!(
            parse_args(&args(&["export", "--zip", "p.json", "out", "--settings", "s.json"])),
            Ok(Command::Export {
                park: PathBuf::from("p.json"),
                output: PathBuf::from("out"),
                zip: true,
                settings: Some(PathBuf::from("s.json")),
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&[]).is_err());
        assert!(parse_args(&args(&["export"])).is_err());
        assert!(parse_args(&args(&["export", "a", "b", "c"])).is_err());
        assert!(parse_args(&args(&["export", "a", "--settings"])).is_err());
        assert!(parse_args(&args(&["verify"])).is_err());
        assert!(parse_args(&args(&["explode"])).is_err());
    }

    #[test]
    fn test_parse_other_commands() {
        assert_eq!(parse_args(&args(&["catalog"])), Ok(Command::Catalog));
        assert_eq!(
            parse_args(&args(&["verify", "x.txt"])),
            Ok(Command::Verify {
                scene: PathBuf::from("x.txt")
            })
        );
    }
}
