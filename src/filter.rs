//! jq pre-filters, evaluated with jaq.
use std::fmt::Debug;

use jaq_core::{load, Compiler, Ctx, RcIter};
use jaq_json::Val;
use serde_json::Value;

use crate::error::{Error, Result};

/// Apply the jq program `expr` to one document. Every value it yields is a
/// separate sample; a filter yielding nothing contributes no samples.
pub fn apply(expr: &str, document: &Value) -> Result<Vec<Value>> {
    let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = load::Arena::default();
    let program = load::File { code: expr, path: () };

    let modules = loader
        .load(&arena, program)
        .map_err(|errs| rejected(expr, "syntax", errs.into_iter().map(|(_, e)| e)))?;

    let filter = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(|errs| {
            let names = errs.into_iter().flat_map(|(_, list)| list).map(|(name, _)| name);
            rejected(expr, "undefined", names)
        })?;

    let inputs = RcIter::new(core::iter::empty());
    let outputs = filter.run((Ctx::new([], &inputs), Val::from(document.clone())));

    let mut samples = Vec::new();
    for output in outputs {
        let val = output.map_err(|e| Error::Filter(format!("`{expr}` failed: {e:?}")))?;
        samples.push(to_sample(expr, &val)?);
    }
    tracing::debug!(expr, samples = samples.len(), "jq filter applied");
    Ok(samples)
}

/// jaq values display as JSON text.
fn to_sample(expr: &str, val: &Val) -> Result<Value> {
    serde_json::from_str(&val.to_string()).map_err(|source| Error::Decode {
        path: format!("output of `{expr}`"),
        source,
    })
}

fn rejected<I>(expr: &str, what: &str, problems: I) -> Error
where
    I: IntoIterator,
    I::Item: Debug,
{
    let problems: Vec<String> = problems.into_iter().map(|p| format!("{p:?}")).collect();
    Error::Filter(format!("{what} error in `{expr}`: {}", problems.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn each_output_is_a_sample() {
        let out = apply(".items[]", &json!({"items": [{"a": 1}, {"a": 2}]})).unwrap();
        assert_eq!(out, vec![json!({"a": 1}), json!({"a": 2})]);
    }

    #[test]
    fn empty_output_yields_no_samples() {
        assert!(apply("empty", &json!({"a": 1})).unwrap().is_empty());
    }

    #[test]
    fn bad_syntax_is_a_filter_error() {
        let err = apply(".[", &json!({})).unwrap_err();
        assert!(matches!(err, Error::Filter(msg) if msg.starts_with("syntax error")));
    }

    #[test]
    fn unknown_functions_are_reported_by_name() {
        let err = apply("no_such_fn", &json!({})).unwrap_err();
        assert!(matches!(err, Error::Filter(msg) if msg.contains("no_such_fn")));
    }
}
