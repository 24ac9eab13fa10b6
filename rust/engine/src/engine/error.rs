// rust/engine/src/engine/error.rs
#![forbid(unsafe_code)]

use std::path::PathBuf;

use thiserror::Error;

/// Fatal construction failures. No World is produced when one of these is returned.
///
/// Blocked moves and empty-cell picks are not errors; they are reported as outcomes.
#[derive(Debug, Error)]
pub enum ConstructionError {
    #[error("world must be at least 3x3, got {height}x{width}")]
    InvalidSize { height: usize, width: usize },

    #[error("line {line}, column {column}: `{glyph}` is not a valid map character")]
    UnknownGlyph {
        line: usize,
        column: usize,
        glyph: char,
    },

    #[error("line {line} has {found} cells, expected {expected}")]
    RaggedMap {
        line: usize,
        found: usize,
        expected: usize,
    },

    #[error("map contains no rows")]
    EmptyMap,

    #[error("map contains no hero")]
    MissingHero,

    #[error("line {line}, column {column}: second hero in map")]
    DuplicateHero { line: usize, column: usize },

    #[error("hero at ({x}, {y}) stands on a wall")]
    HeroOnWall { x: i32, y: i32 },

    #[error("tensor must have {expected} channels, got {found}")]
    ChannelCount { expected: usize, found: usize },

    #[error("malformed state tensor: {0}")]
    MalformedState(String),

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode tensor file {path}: {source}")]
    TensorFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A primitive name that is neither an action nor a sensor.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("unknown primitive `{0}`")]
pub struct UnknownPrimitive(pub String);
