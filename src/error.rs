//! Error type shared by the library and the CLI input pipeline.
//!
//! Inference and rendering never fail on valid JSON; everything here is about
//! getting a document into memory in the first place.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to decode JSON at {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("glob pattern matched no files: {0}")]
    NoInput(String),

    #[error("JSON pointer {pointer} selected nothing in {origin}")]
    PointerMiss { pointer: String, origin: String },

    #[error("jq filter failed: {0}")]
    Filter(String),
}

pub type Result<T> = std::result::Result<T, Error>;
