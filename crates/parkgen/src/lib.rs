// Library crate: geometry, scene encoding and packaging for skatepark exports.
// The `parkgen` binary and the HTTP server are thin shells over `Exporter`.

pub mod archive;
pub mod catalog;
pub mod encoder;
pub mod error;
pub mod export;
pub mod fixtures;
pub mod generators;
pub mod inspect;
pub mod mesh;
pub mod metadata;
pub mod settings;
pub mod textures;
pub mod transform;
pub mod validation;

pub use error::{ExportError, InspectError, SettingsError};
pub use export::{safe_file_name, ExportBundle, Exporter};
pub use settings::ExportSettings;
