//! Paths, Go identifiers, and English singularization.
//!
//! A path is the dotted, root-relative location where a shape was first seen:
//! `$` is the root marker and a segment ending in `[]` stands for "items of
//! this list". Type names are derived from the path; field names from keys.
use once_cell::sync::Lazy;
use regex::Regex;

use crate::options::Options;

pub const ROOT: &str = "$";
pub const LIST_MARKER: &str = "[]";
const SEPARATOR: char = '.';

// ------------------------------- Paths ------------------------------------ //

pub fn child_path(path: &str, key: &str) -> String {
    if key.is_empty() {
        path.to_string()
    } else {
        format!("{path}{SEPARATOR}{key}")
    }
}

pub fn list_path(path: &str) -> String {
    format!("{path}{LIST_MARKER}")
}

pub fn is_list_path(path: &str) -> bool {
    path.ends_with(LIST_MARKER)
}

/// Concatenated Go name of every named segment of `path`. Items of a list
/// have no segment of their own, so `key` names them.
pub fn path_name(path: &str, key: &str) -> String {
    let mut out = String::new();
    for segment in path.split(SEPARATOR) {
        if segment == ROOT || is_list_path(segment) {
            continue;
        }
        out.push_str(&segment_name(segment));
    }
    if is_list_path(path) {
        out.push_str(&segment_name(key));
    }
    out
}

/// Go name of one path segment. A key with no letters or digits (`"@"`)
/// still contributes `X`, so a nested shape never reuses its parent's name.
fn segment_name(segment: &str) -> String {
    let name = to_go_name(segment);
    if name.is_empty() && !segment.is_empty() {
        "X".to_string()
    } else {
        name
    }
}

// ---------------------------- Type / field names -------------------------- //

/// Rendered type name for a shape first observed at `path` under `key`.
pub fn type_name(path: &str, key: &str, opts: &Options) -> String {
    let mut base = if opts.short_names {
        segment_name(key)
    } else {
        path_name(path, key)
    };
    if base.is_empty() {
        base = to_go_name(&opts.root_name);
    }
    let name = format!("{}{}{}", opts.prefix, to_go_name(&base), opts.suffix);
    visibility(name, opts)
}

/// Struct field identifier for a JSON key.
pub fn field_ident(key: &str, opts: &Options) -> String {
    let mut name = to_go_name(key);
    if name.is_empty() {
        name = to_go_name(&opts.root_name);
    }
    visibility(name, opts)
}

fn visibility(name: String, opts: &Options) -> String {
    if !opts.local {
        return name;
    }
    let var = to_var_name(&name);
    if GO_KEYWORDS.contains(&var.as_str()) {
        format!("{var}_")
    } else {
        var
    }
}

// ------------------------------ Casing ------------------------------------ //

/// Upper/lower-case run, or a lower-case/other-letter run, digits attached.
static WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\p{Lu}+[\p{Ll}\p{Nd}]*|[\p{Ll}\p{Lo}\p{Nd}]+").expect("word pattern is valid")
});

const INITIALISMS: &[&str] = &[
    "ACL", "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTP", "HTTPS", "ID", "IP",
    "JSON", "LHS", "QPS", "RAM", "RHS", "RPC", "SLA", "SMTP", "SQL", "SSH", "TCP", "TLS", "TTL",
    "UDP", "UI", "UID", "UUID", "URI", "URL", "UTF8", "VM", "XML", "XMPP", "XSRF", "XSS",
];

const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough", "for",
    "func", "go", "goto", "if", "import", "interface", "map", "package", "range", "return",
    "select", "struct", "switch", "type", "var",
];

/// Words of an identifier-ish string: `profile_image_url`, `profileImageURL`
/// and `HTTPServer` all split the way a human would read them.
pub fn split_words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    for m in WORD.find_iter(s) {
        let w = m.as_str();
        // "HTTPServer": the last capital of a run starts the next word
        let upper = w.chars().take_while(|c| c.is_uppercase()).count();
        let total = w.chars().count();
        let next_is_lower = w.chars().nth(upper).is_some_and(|c| c.is_lowercase());
        if upper >= 2 && total > upper && next_is_lower {
            let cut = w.char_indices().nth(upper - 1).map_or(0, |(i, _)| i);
            words.push(w[..cut].to_string());
            words.push(w[cut..].to_string());
        } else {
            words.push(w.to_string());
        }
    }
    words
}

fn go_word(w: &str) -> String {
    let upper = w.to_uppercase();
    if INITIALISMS.contains(&upper.as_str()) {
        return upper;
    }
    let mut chars = w.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Exported Go identifier: `accept_comment` → `AcceptComment`, `url` → `URL`.
pub fn to_go_name(s: &str) -> String {
    let name: String = split_words(s).iter().map(|w| go_word(w)).collect();
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("X{name}")
    } else {
        name
    }
}

/// Unexported Go identifier: `DataNest` → `dataNest`, `URLPath` → `urlPath`.
pub fn to_var_name(s: &str) -> String {
    let words = split_words(s);
    let mut iter = words.iter();
    let Some(first) = iter.next() else {
        return String::new();
    };
    let mut name = first.to_lowercase();
    for w in iter {
        name.push_str(&go_word(w));
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("x{name}")
    } else {
        name
    }
}

// --------------------------- Singularization ------------------------------ //

const UNCOUNTABLE: &[&str] = &[
    "equipment", "fish", "information", "jeans", "money", "news", "rice", "series", "sheep",
    "species",
];

/// Singular of an English plural. Regular rules only; anything unknown passes
/// through unchanged.
pub fn singularize(word: &str) -> String {
    let lower = word.to_lowercase();
    if lower.is_empty() || UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }
    let keep = |n: usize| word.get(..word.len().saturating_sub(n)).unwrap_or(word).to_string();
    if lower.len() > 3 && lower.ends_with("ies") {
        let y = if word.ends_with("IES") { "Y" } else { "y" };
        return keep(3) + y;
    }
    if lower.ends_with("quizzes") {
        return keep(3);
    }
    for suffix in ["sses", "shes", "ches", "xes", "statuses", "buses", "aliases"] {
        if lower.ends_with(suffix) {
            return keep(2);
        }
    }
    if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
        return word.to_string();
    }
    if lower.len() > 1 && lower.ends_with('s') {
        return keep(1);
    }
    word.to_string()
}

// ------------------------------- Tests ------------------------------------ //
