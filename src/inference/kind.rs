use serde::Serialize;
use serde_json::{Map, Number, Value};

use super::Structure;

/// Resolution used to tell integers from fractions: four decimal places.
const DECIMALS: i128 = 10_000;

/// Magnitude from which every `f64` is a whole number.
const EXACT_INT_LIMIT: f64 = 9_007_199_254_740_992.0; // 2^53

/// Inferred type of one field.
///
/// Composite kinds carry the structure they describe, so a field has a nested
/// structure exactly when its kind is `List` or `Object`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum Kind {
    String,
    Bool,
    Integer,
    Float,
    /// a scalar that is neither string, bool, nor a representable number
    AnyScalar,
    /// null, or observations that cannot be reconciled
    Dynamic,
    /// list items, described by a wrapper keyed by the singular item name
    List(Structure),
    Object(Structure),
}

/// Coarse classification of a JSON node.
#[derive(Debug)]
pub enum Class<'a> {
    Scalar(Kind),
    List(&'a [Value]),
    Object(&'a Map<String, Value>),
    Unknown,
}

pub fn classify(v: &Value) -> Class<'_> {
    match v {
        Value::Null => Class::Unknown,
        Value::Bool(_) => Class::Scalar(Kind::Bool),
        Value::Number(n) => Class::Scalar(number_kind(n)),
        Value::String(_) => Class::Scalar(Kind::String),
        Value::Array(xs) => Class::List(xs),
        Value::Object(m) => Class::Object(m),
    }
}

pub fn number_kind(n: &Number) -> Kind {
    if n.is_i64() || n.is_u64() {
        return Kind::Integer;
    }
    match n.as_f64() {
        Some(f) if is_integral(f) => Kind::Integer,
        Some(_) => Kind::Float,
        None => Kind::AnyScalar,
    }
}

/// Scale by 10^4, truncate, and check for a multiple of 10^4.
pub fn is_integral(f: f64) -> bool {
    if !f.is_finite() {
        return false;
    }
    if f.abs() >= EXACT_INT_LIMIT {
        return true;
    }
    let scaled = (f * DECIMALS as f64).trunc() as i128;
    scaled % DECIMALS == 0
}

impl Kind {
    /// Least general kind covering both observations.
    ///
    /// Records and lists merge field-wise, `int` and `float64` meet at
    /// `float64`, and every other disagreement collapses to `Dynamic`.
    pub fn join(self, other: Kind) -> Kind {
        match (self, other) {
            (Kind::Object(a), Kind::Object(b)) => Kind::Object(a.join(b)),
            (Kind::List(a), Kind::List(b)) => Kind::List(a.join(b)),
            (Kind::Integer, Kind::Float) | (Kind::Float, Kind::Integer) => Kind::Float,
            (a, b) if std::mem::discriminant(&a) == std::mem::discriminant(&b) => a,
            _ => Kind::Dynamic,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Bool => "bool",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::AnyScalar => "scalar",
            Kind::Dynamic => "dynamic",
            Kind::List(_) => "list",
            Kind::Object(_) => "object",
        }
    }
}
