use serde::{Deserialize, Serialize};

use crate::naming;

/// Root type name used when none is given.
pub const DEFAULT_ROOT_NAME: &str = "data";

/// Knobs for a single conversion. Passed by reference everywhere; there is no
/// global configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// add `,omitempty` to tags and render nested records as pointers
    pub omit_empty: bool,
    /// type names use only the innermost key instead of the full path
    pub short_names: bool,
    /// lower-first ("unexported") identifiers
    pub local: bool,
    /// add `example:"..."` tags
    pub example: bool,
    pub prefix: String,
    pub suffix: String,
    pub root_name: String,
    /// align struct bodies like gofmt
    pub gofmt: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            omit_empty: false,
            short_names: false,
            local: false,
            example: false,
            prefix: String::new(),
            suffix: String::new(),
            root_name: DEFAULT_ROOT_NAME.to_string(),
            gofmt: true,
        }
    }
}

impl Options {
    /// Normalized copy: empty root name falls back to the default, prefix and
    /// suffix are turned into Go identifier fragments.
    pub fn resolved(&self) -> Self {
        let root_name = if self.root_name.trim().is_empty() {
            DEFAULT_ROOT_NAME.to_string()
        } else {
            self.root_name.clone()
        };
        Self {
            prefix: naming::to_go_name(&self.prefix),
            suffix: naming::to_go_name(&self.suffix),
            root_name,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_fills_root_and_camelizes_affixes() {
        let opts = Options {
            root_name: "  ".into(),
            prefix: "input".into(),
            suffix: "api_result".into(),
            ..Options::default()
        };
        let r = opts.resolved();
        assert_eq!(r.root_name, "data");
        assert_eq!(r.prefix, "Input");
        assert_eq!(r.suffix, "APIResult");
    }

    #[test]
    fn deserializes_partial_json() {
        let opts: Options = serde_json::from_str(r#"{"omit_empty": true, "root_name": "blog"}"#).unwrap();
        assert!(opts.omit_empty);
        assert!(opts.gofmt);
        assert_eq!(opts.root_name, "blog");
    }
}
