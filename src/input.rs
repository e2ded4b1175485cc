//! Getting documents into memory: decoding with path-aware errors, resolving
//! input patterns, NDJSON splitting, pointer selection and jq pre-filters.
use std::io::Read;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::filter;

/// Input name meaning standard input.
pub const STDIN: &str = "-";

/// Raw text of one input and where it came from (for messages).
#[derive(Debug, Clone)]
pub struct Source {
    pub origin: String,
    pub text: String,
}

// ------------------------------ Decoding ---------------------------------- //

/// Decode a whole document; on failure report the JSON path reached.
pub fn decode_str(src: &str) -> Result<Value> {
    let de = &mut serde_json::Deserializer::from_str(src);
    let value = decode_with_path(de)?;
    de.end().map_err(|source| Error::Decode { path: "end of input".into(), source })?;
    Ok(value)
}

pub fn decode_reader<R: Read>(reader: R) -> Result<Value> {
    let de = &mut serde_json::Deserializer::from_reader(reader);
    let value = decode_with_path(de)?;
    de.end().map_err(|source| Error::Decode { path: "end of input".into(), source })?;
    Ok(value)
}

fn decode_with_path<'de, R>(de: &mut serde_json::Deserializer<R>) -> Result<Value>
where
    R: serde_json::de::Read<'de>,
{
    serde_path_to_error::deserialize::<_, Value>(de).map_err(|err| Error::Decode {
        path: err.path().to_string(),
        source: err.into_inner(),
    })
}

// ------------------------------ Sources ----------------------------------- //

/// Expand literal paths and glob patterns; `-` stays as stdin.
pub fn resolve_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();
    for raw in patterns {
        let pattern = raw.as_ref();
        if !has_glob_chars(pattern) {
            out.push(PathBuf::from(pattern));
            continue;
        }
        let before = out.len();
        for entry in glob::glob(pattern)? {
            let path = entry.map_err(|e| Error::Io {
                path: e.path().to_path_buf(),
                source: e.into_error(),
            })?;
            out.push(path);
        }
        if out.len() == before {
            return Err(Error::NoInput(pattern.to_string()));
        }
    }
    Ok(out)
}

/// Read every input; no inputs means stdin.
pub fn read_sources(inputs: &[String]) -> Result<Vec<Source>> {
    if inputs.is_empty() {
        return Ok(vec![read_stdin()?]);
    }
    let paths = resolve_patterns(inputs)?;
    paths
        .par_iter()
        .map(|path| {
            if path.as_path() == Path::new(STDIN) {
                return read_stdin();
            }
            let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?;
            Ok(Source { origin: path.display().to_string(), text })
        })
        .collect()
}

fn read_stdin() -> Result<Source> {
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text).map_err(|source| Error::Io {
        path: PathBuf::from("<stdin>"),
        source,
    })?;
    Ok(Source { origin: "<stdin>".into(), text })
}

// ------------------------------ Pipeline ---------------------------------- //

/// How raw sources turn into samples.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    /// one document per non-empty line
    pub ndjson: bool,
    /// JSON Pointer selecting a sub-node of each document
    pub json_pointer: Option<String>,
    /// jq filter applied to each (selected) document
    pub jq_expr: Option<String>,
}

impl Pipeline {
    /// Samples from all sources, in source order. Sources are decoded in
    /// parallel.
    pub fn samples(&self, sources: &[Source]) -> Result<Vec<Value>> {
        let per_source: Vec<Vec<Value>> = sources
            .par_iter()
            .map(|source| self.source_samples(source))
            .collect::<Result<_>>()?;
        let samples: Vec<Value> = per_source.into_iter().flatten().collect();
        debug!(sources = sources.len(), samples = samples.len(), "inputs decoded");
        Ok(samples)
    }

    fn source_samples(&self, source: &Source) -> Result<Vec<Value>> {
        let docs = if self.ndjson {
            source
                .text
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(decode_str)
                .collect::<Result<Vec<_>>>()?
        } else {
            vec![decode_str(&source.text)?]
        };

        let mut out = Vec::with_capacity(docs.len());
        for doc in docs {
            let doc = match &self.json_pointer {
                None => doc,
                Some(pointer) => doc.pointer(pointer).cloned().ok_or_else(|| Error::PointerMiss {
                    pointer: pointer.clone(),
                    origin: source.origin.clone(),
                })?,
            };
            match &self.jq_expr {
                None => out.push(doc),
                Some(expr) => out.extend(filter::apply(expr, &doc)?),
            }
        }
        Ok(out)
    }
}
