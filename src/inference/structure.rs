use serde::Serialize;
use serde_json::Value;

use super::Kind;
use crate::naming;
use crate::options::Options;

/// One inferred record type.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Structure {
    /// where the shape was first seen, e.g. `$.data.categories[]`
    pub path: String,
    pub name: String,
    /// unique by name, sorted by name
    pub properties: Vec<Property>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Property {
    /// the JSON key as written in the document
    pub name: String,
    pub kind: Kind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample: Option<Value>,
}

impl Structure {
    pub fn new(path: &str, key: &str, opts: &Options) -> Self {
        Self::with_name(path, naming::type_name(path, key, opts))
    }

    pub fn with_name(path: &str, name: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            name: name.into(),
            properties: Vec::new(),
        }
    }

    /// Wrappers describe list items and are never declared themselves.
    pub fn is_list(&self) -> bool {
        naming::is_list_path(&self.path)
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.find(name).ok().map(|i| &self.properties[i])
    }

    fn find(&self, name: &str) -> Result<usize, usize> {
        self.properties.binary_search_by(|p| p.name.as_str().cmp(name))
    }

    /// Record one more observation of a field, merging with what is known.
    pub fn add_property(&mut self, prop: Property) {
        match self.find(&prop.name) {
            Ok(i) => {
                let current = self.properties.remove(i);
                self.properties.insert(i, current.join(prop));
            }
            Err(i) => self.properties.insert(i, prop),
        }
    }

    /// Union of both field sets; identity (path, name) stays with `self`.
    pub fn join(mut self, other: Structure) -> Structure {
        for prop in other.properties {
            self.add_property(prop);
        }
        self
    }

    /// Record types referenced from this structure, in field order. List
    /// fields are looked through: their items count, not the wrapper.
    pub fn nested(&self) -> Vec<&Structure> {
        let mut out = Vec::new();
        for prop in &self.properties {
            match &prop.kind {
                Kind::Object(s) => out.push(s),
                Kind::List(wrapper) => out.extend(wrapper.nested()),
                _ => {}
            }
        }
        out
    }
}

impl Property {
    pub fn new(name: impl Into<String>, kind: Kind, sample: Option<Value>) -> Self {
        Self { name: name.into(), kind, sample }
    }

    /// Merge two observations of the same field. The first sample wins unless
    /// the field degrades to `Dynamic`, where no single sample is meaningful.
    pub fn join(self, other: Property) -> Property {
        let kind = self.kind.join(other.kind);
        let sample = match kind {
            Kind::Dynamic => None,
            _ => self.sample.or(other.sample),
        };
        Property { name: self.name, kind, sample }
    }
}
