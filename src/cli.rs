//! Minimal CLI: JSON in → Go structs (or the inferred structure) out
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser};
use json2struct::input::Pipeline;
use json2struct::{Inference, Options};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer Go struct declarations from JSON read from stdin or files
#[derive(Parser, Debug)]
#[command(name = "json2struct", version)]
pub struct CommandLineInterface {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    naming_settings: NamingSettings,

    /// add `,omitempty` to every tag and use pointers for nested structs
    #[arg(long)]
    omitempty: bool,

    /// add `example:"..."` tags with a sampled value
    #[arg(long)]
    example: bool,

    /// skip column alignment of struct fields
    #[arg(long)]
    no_format: bool,

    /// print the inferred structure tree as JSON instead of Go source
    #[arg(long)]
    structure: bool,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// log the walk and dump the inferred structure to stderr
    #[arg(long)]
    pub debug: bool,
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document
    #[arg(long)]
    jq_expr: Option<String>,

    /// literal paths, quoted glob patterns, or '-' for stdin (the default)
    #[arg(long, short, num_args = 1..)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct NamingSettings {
    /// root struct name
    #[arg(long, default_value = json2struct::DEFAULT_ROOT_NAME)]
    name: String,

    /// prefix for every struct name
    #[arg(long, default_value = "")]
    prefix: String,

    /// suffix for every struct name
    #[arg(long, default_value = "")]
    suffix: String,

    /// name structs by their innermost key only
    #[arg(long)]
    short: bool,

    /// unexported (lower-first) struct and field names
    #[arg(long)]
    local: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn pipeline(&self) -> Pipeline {
        Pipeline {
            ndjson: self.ndjson,
            json_pointer: self.json_pointer.clone(),
            jq_expr: self.jq_expr.clone(),
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn options(&self) -> Options {
        Options {
            omit_empty: self.omitempty,
            short_names: self.naming_settings.short,
            local: self.naming_settings.local,
            example: self.example,
            prefix: self.naming_settings.prefix.clone(),
            suffix: self.naming_settings.suffix.clone(),
            root_name: self.naming_settings.name.clone(),
            gofmt: !self.no_format,
        }
    }

    pub fn run(&self) -> anyhow::Result<()> {
        let options = self.options();
        tracing::debug!(?options, "starting");

        // 1) load & decode
        let sources = json2struct::input::read_sources(&self.input_settings.input)
            .context("failed to load input")?;
        let samples = self.input_settings.pipeline().samples(&sources)?;

        // 2) infer
        let mut inf = Inference::new(&options);
        for value in &samples {
            inf.observe_value(value);
        }
        let root = inf.solve();

        // 3) render
        let rendered = if self.structure {
            serde_json::to_string_pretty(&root)?
        } else {
            if self.debug {
                tracing::debug!("inferred structure:\n{}", serde_json::to_string_pretty(&root)?);
            }
            json2struct::render(&root, &options)
        };

        if let Some(out) = self.out.as_ref() {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, format!("{rendered}\n"))
                .with_context(|| format!("failed to write {}", out.display()))?;
        } else {
            println!("{rendered}");
        }
        Ok(())
    }
}
