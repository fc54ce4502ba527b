//! Error types for the export pipeline.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = ::std::result::Result<T, ExportError>;

/// Terminal failures of one export. No partial output is left behind.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The snapshot contained no placed instances.
    #[error("scene is empty: place at least one object before exporting")]
    EmptyScene,

    #[error("texture encoding failed: {0}")]
    Texture(#[from] image::ImageError),

    #[error("archive packaging failed: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Structural problems found while reading back a scene file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InspectError {
    #[error("unexpected end of file, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("line {line}: expected {expected}, found `{found}`")]
    BadToken {
        line: usize,
        expected: &'static str,
        found: String,
    },

    #[error("file does not start with the TASK magic bytes")]
    BadMagic,

    #[error("declared {declared} vertices but meshes hold {actual}")]
    VertexTotalMismatch { declared: usize, actual: usize },

    #[error("declared {count} {what}, more than the file holds")]
    CountTooLarge { what: &'static str, count: usize },

    #[error("mesh {mesh}: index count {count} is not a multiple of 3")]
    IndexStride { mesh: usize, count: usize },

    #[error("mesh {mesh}: index {index} out of range (vertex count {vertex_count})")]
    IndexOutOfRange {
        mesh: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("collision {what} is {col}, visual section has {vis}")]
    CollisionMismatch {
        what: &'static str,
        vis: usize,
        col: usize,
    },

    #[error("collision triangle {triangle}: index {index} out of range (vertex count {vertex_count})")]
    CollisionIndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("line {line}: trailing data after the last section")]
    TrailingData { line: usize },
}

/// Settings file problems. `ExportSettings::load` swallows these and falls
/// back to defaults; `load_from` reports them.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("no platform config directory available")]
    NoConfigDir,

    #[error("cannot write settings: {0}")]
    Write(#[from] std::io::Error),

    #[error("cannot serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}
