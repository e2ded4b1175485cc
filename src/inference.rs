//! Structure inference over decoded JSON.
//!
//! Each sample is walked once, top-down. Every call of the walk returns the
//! observation for its own node as a [`Property`]; the caller attaches it to
//! its structure with [`Structure::add_property`], which is where repeated
//! observations (list elements, several samples) are merged and widened.
//!
//! Join rules, in short:
//! - same kind: records and lists merge field-wise, scalars stay;
//! - `int` ⊔ `float64` = `float64`;
//! - anything else ⊔ = `Dynamic` (rendered as `interface{}`).
pub mod kind;
pub mod structure;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

pub use kind::{classify, Class, Kind};
pub use structure::{Property, Structure};

use crate::naming;
use crate::options::Options;

/// Result of inference: the root type name and what the document root is.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Root {
    pub name: String,
    pub kind: Kind,
}

// ------------------------------- Front API -------------------------------- //

pub struct Inference {
    options: Options,
    state: Option<Property>,
    samples: usize,
}

impl Inference {
    pub fn new(options: &Options) -> Self {
        Self {
            options: options.resolved(),
            state: None,
            samples: 0,
        }
    }

    /// Walk one sample and merge it into what was observed so far.
    pub fn observe_value(&mut self, v: &Value) {
        let obs = self.walk(naming::ROOT, &self.options.root_name, v, 0);
        self.samples += 1;
        self.state = Some(match self.state.take() {
            None => obs,
            Some(prev) => prev.join(obs),
        });
    }

    pub fn solve(&self) -> Root {
        let root_name = &self.options.root_name;
        let path = naming::child_path(naming::ROOT, root_name);
        let root = Root {
            name: naming::type_name(&path, root_name, &self.options),
            kind: self.state.as_ref().map_or(Kind::Dynamic, |p| p.kind.clone()),
        };
        debug!(samples = self.samples, root = root.kind.label(), name = %root.name, "inference solved");
        root
    }

    fn walk(&self, path: &str, key: &str, value: &Value, depth: usize) -> Property {
        let path = naming::child_path(path, key);
        let sample = || self.options.example.then(|| value.clone());

        match classify(value) {
            Class::Scalar(kind) => {
                trace!(depth, %path, kind = kind.label());
                Property::new(key, kind, sample())
            }
            Class::List(items) => {
                let path = naming::list_path(&path);
                let item = naming::singularize(key);
                trace!(depth, %path, len = items.len(), item = %item, "list");
                let mut wrapper = Structure::new(&path, &item, &self.options);
                for el in items {
                    wrapper.add_property(self.walk(&path, &item, el, depth + 1));
                }
                Property::new(key, Kind::List(wrapper), sample())
            }
            Class::Object(map) => {
                trace!(depth, %path, fields = map.len(), "object");
                let mut current = Structure::new(&path, key, &self.options);
                for (k, v) in map {
                    current.add_property(self.walk(&path, k, v, depth + 1));
                }
                Property::new(key, Kind::Object(current), None)
            }
            Class::Unknown => {
                trace!(depth, %path, "null");
                Property::new(key, Kind::Dynamic, None)
            }
        }
    }
}

/// Infer from a sequence of samples in one go.
pub fn infer_from_values<'a, I>(values: I, options: &Options) -> Root
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut inf = Inference::new(options);
    for v in values {
        inf.observe_value(v);
    }
    inf.solve()
}

// ------------------------------- Tests ------------------------------------ //
