//! Go source emission for inferred structures.
//!
//! Declarations come out in pre-order: a struct, then the structs its fields
//! reference, each type name exactly once. Output is syntactically valid but
//! not aligned; see [`crate::format`] for that.
use std::collections::HashSet;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::warn;

use crate::inference::{Kind, Property, Root, Structure};
use crate::naming;
use crate::options::Options;

const DYNAMIC: &str = "interface{}";

pub struct Codegen {
    options: Options,
    decls: IndexMap<String, String>,
}

impl Codegen {
    pub fn new(options: &Options) -> Self {
        Self {
            options: options.resolved(),
            decls: IndexMap::new(),
        }
    }

    pub fn emit(&mut self, root: &Root) {
        match &root.kind {
            Kind::Object(s) => self.emit_structure(s),
            Kind::List(wrapper) if !wrapper.nested().is_empty() => self.emit_structure(wrapper),
            other => {
                // scalar, null, or a list without records: a defined type
                let (ty, _) = self.field_type(other);
                self.declare(&root.name, format!("type {} {ty}", root.name));
            }
        }
    }

    pub fn into_declarations(self) -> Vec<String> {
        self.decls.into_values().collect()
    }

    pub fn into_string(self) -> String {
        self.into_declarations().join("\n\n")
    }

    fn emit_structure(&mut self, s: &Structure) {
        if !s.is_list() && !s.name.is_empty() {
            let decl = self.declaration(s);
            self.declare(&s.name, decl);
        }
        for nested in s.nested() {
            self.emit_structure(nested);
        }
    }

    fn declare(&mut self, name: &str, decl: String) {
        match self.decls.get(name) {
            None => {
                self.decls.insert(name.to_string(), decl);
            }
            Some(existing) if *existing != decl => {
                warn!(type_name = name, "type name collision; keeping the first shape");
            }
            Some(_) => {}
        }
    }

    fn declaration(&self, s: &Structure) -> String {
        let mut used = HashSet::new();
        let fields: Vec<String> = s
            .properties
            .iter()
            .map(|p| self.field_line(p, &mut used))
            .collect();
        if fields.is_empty() {
            format!("type {} struct {{\n}}", s.name)
        } else {
            format!("type {} struct {{\n{}\n}}", s.name, fields.join("\n"))
        }
    }

    fn field_line(&self, p: &Property, used: &mut HashSet<String>) -> String {
        let ident = unique_ident(naming::field_ident(&p.name, &self.options), used);
        let (ty, is_record) = self.field_type(&p.kind);

        let mut tag = format!("json:\"{}", escape_tag(&p.name));
        if self.options.omit_empty {
            tag.push_str(",omitempty");
        }
        tag.push('"');
        if self.options.example && !is_record {
            let text = p.sample.as_ref().map(example_text).unwrap_or_default();
            if !text.is_empty() {
                tag.push_str(&format!(" example:\"{}\"", escape_tag(&text)));
            }
        }
        format!("\t{ident} {ty} `{tag}`")
    }

    /// Go type of a field, and whether it names a generated struct.
    fn field_type(&self, kind: &Kind) -> (String, bool) {
        match kind {
            Kind::Object(s) if !s.name.is_empty() => {
                if self.options.omit_empty {
                    (format!("*{}", s.name), true)
                } else {
                    (s.name.clone(), true)
                }
            }
            Kind::List(wrapper) => {
                let (elem, is_record) = self.element_type(wrapper);
                (format!("[]{elem}"), is_record)
            }
            other => (scalar_type(other).to_string(), false),
        }
    }

    /// Element type of a list. The wrapper has at most one field (keyed by
    /// the item name), so a list of scalars flattens to `[]T` and a list of
    /// records to `[]Item`.
    fn element_type(&self, wrapper: &Structure) -> (String, bool) {
        if wrapper.name.is_empty() {
            return (DYNAMIC.to_string(), false);
        }
        match wrapper.properties.as_slice() {
            [] => (DYNAMIC.to_string(), false),
            [only] => match &only.kind {
                Kind::Object(item) if !item.name.is_empty() => (item.name.clone(), true),
                Kind::List(_) => self.field_type(&only.kind),
                other => (scalar_type(other).to_string(), false),
            },
            _ => (wrapper.name.clone(), true),
        }
    }
}

fn scalar_type(kind: &Kind) -> &'static str {
    match kind {
        Kind::String => "string",
        Kind::Bool => "bool",
        Kind::Integer => "int",
        Kind::Float => "float64",
        Kind::AnyScalar | Kind::Dynamic | Kind::List(_) | Kind::Object(_) => DYNAMIC,
    }
}

fn unique_ident(ident: String, used: &mut HashSet<String>) -> String {
    if used.insert(ident.clone()) {
        return ident;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{ident}{n}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// Sample rendered for an `example` tag; lists become `a,b,c`.
fn example_text(v: &Value) -> String {
    match v {
        Value::Array(xs) => xs.iter().map(example_atom).collect::<Vec<_>>().join(","),
        other => example_atom(other),
    }
}

fn example_atom(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(_) | Value::Object(_) => v.to_string(),
    }
}

/// Tag values are Go string literals inside a raw string literal.
fn escape_tag(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '`' => out.push_str("\\x60"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}
