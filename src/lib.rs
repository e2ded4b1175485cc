//! Infer Go struct declarations from unannotated JSON.
//!
//! ```
//! let out = json2struct::convert_str(r#"{"id": 1, "tags": ["a"]}"#, &Default::default()).unwrap();
//! assert_eq!(out, "type Data struct {\n\tID   int      `json:\"id\"`\n\tTags []string `json:\"tags\"`\n}");
//! ```
//!
//! Pipeline: decode → [`inference`] (walk + merge/widen) → [`codegen`] →
//! optional [`format`] alignment. Every entry point takes its [`Options`] by
//! reference; conversions share no state and can run concurrently.
pub mod codegen;
pub mod error;
pub mod filter;
pub mod format;
pub mod inference;
pub mod input;
pub mod naming;
pub mod options;

use std::io::Read;

use serde_json::Value;
use tracing::{debug, enabled, Level};

pub use codegen::Codegen;
pub use error::{Error, Result};
pub use inference::{Inference, Kind, Property, Root, Structure};
pub use options::{Options, DEFAULT_ROOT_NAME};

/// Render inferred types as Go source.
pub fn render(root: &Root, options: &Options) -> String {
    let mut cg = Codegen::new(options);
    cg.emit(root);
    let src = cg.into_string();
    if options.gofmt { format::align(&src) } else { src }
}

/// Infer and render; several values are merged into one set of types.
pub fn convert_values<'a, I>(values: I, options: &Options) -> String
where
    I: IntoIterator<Item = &'a Value>,
{
    let root = inference::infer_from_values(values, options);
    if enabled!(Level::DEBUG) {
        if let Ok(tree) = serde_json::to_string_pretty(&root) {
            debug!("inferred structure:\n{tree}");
        }
    }
    render(&root, options)
}

pub fn convert_value(value: &Value, options: &Options) -> String {
    convert_values([value], options)
}

/// Decode and convert. Malformed JSON yields [`Error::Decode`] and no output.
pub fn convert_str(src: &str, options: &Options) -> Result<String> {
    let value = input::decode_str(src)?;
    Ok(convert_value(&value, options))
}

pub fn convert_reader<R: Read>(reader: R, options: &Options) -> Result<String> {
    let value = input::decode_reader(reader)?;
    Ok(convert_value(&value, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn convert(input: &str, options: Options) -> String {
        convert_str(input, &options).unwrap()
    }

    #[test]
    fn single_string_field() {
        assert_eq!(convert(r#"{"text": "hello"}"#, Options::default()), indoc! {r#"
            type Data struct {
            	Text string `json:"text"`
            }"#});
    }

    #[test]
    fn root_list_is_named_by_singular_root_name() {
        let opts = Options { root_name: "Categories".into(), ..Options::default() };
        assert_eq!(convert(r#"[{"id": 123}]"#, opts), indoc! {r#"
            type Category struct {
            	ID int `json:"id"`
            }"#});
    }

    #[test]
    fn integer_then_float_widens_to_float() {
        let opts = Options { root_name: "Tags".into(), ..Options::default() };
        assert_eq!(convert(r#"[{"name": 123},{"name": 3.14}]"#, opts), indoc! {r#"
            type Tag struct {
            	Name float64 `json:"name"`
            }"#});
    }

    #[test]
    fn integer_then_string_widens_to_interface() {
        let opts = Options { root_name: "Tags".into(), ..Options::default() };
        assert_eq!(convert(r#"[{"name": 123},{"name": "stringer"}]"#, opts), indoc! {r#"
            type Tag struct {
            	Name interface{} `json:"name"`
            }"#});
    }

    #[test]
    fn nested_record_gets_path_name() {
        assert_eq!(convert(r#"{"nest": {"text": "hello"}}"#, Options::default()), indoc! {r#"
            type Data struct {
            	Nest DataNest `json:"nest"`
            }

            type DataNest struct {
            	Text string `json:"text"`
            }"#});
    }

    #[test]
    fn short_names_use_the_innermost_key() {
        let opts = Options { short_names: true, ..Options::default() };
        assert_eq!(convert(r#"{"nest": {"text": "hello"}}"#, opts), indoc! {r#"
            type Data struct {
            	Nest Nest `json:"nest"`
            }

            type Nest struct {
            	Text string `json:"text"`
            }"#});
    }

    #[test]
    fn local_casing_applies_to_types_and_fields() {
        let opts = Options { local: true, ..Options::default() };
        assert_eq!(convert(r#"{"nest": {"text": "hello"}}"#, opts), indoc! {r#"
            type data struct {
            	nest dataNest `json:"nest"`
            }

            type dataNest struct {
            	text string `json:"text"`
            }"#});
    }

    #[test]
    fn omit_empty_marks_every_field() {
        let opts = Options { omit_empty: true, ..Options::default() };
        assert_eq!(convert(r#"{"nest": {"text": "hello"}}"#, opts), indoc! {r#"
            type Data struct {
            	Nest *DataNest `json:"nest,omitempty"`
            }

            type DataNest struct {
            	Text string `json:"text,omitempty"`
            }"#});
    }

    #[test]
    fn prefix_and_suffix_wrap_every_type_name() {
        let opts = Options { prefix: "input".into(), suffix: "result".into(), ..Options::default() };
        assert_eq!(convert(r#"{"nest": {"text": "hello"}}"#, opts), indoc! {r#"
            type InputDataResult struct {
            	Nest InputDataNestResult `json:"nest"`
            }

            type InputDataNestResult struct {
            	Text string `json:"text"`
            }"#});
    }

    #[test]
    fn list_shapes() {
        assert_eq!(convert(r#"{"categories": [{}]}"#, Options::default()), indoc! {r#"
            type Data struct {
            	Categories []DataCategory `json:"categories"`
            }

            type DataCategory struct {
            }"#});
        assert_eq!(convert(r#"{"categories": []}"#, Options::default()), indoc! {r#"
            type Data struct {
            	Categories []interface{} `json:"categories"`
            }"#});
        assert_eq!(convert(r#"{"categories": [1]}"#, Options::default()), indoc! {r#"
            type Data struct {
            	Categories []int `json:"categories"`
            }"#});
        assert_eq!(convert(r#"{"categories": [1,"abc"]}"#, Options::default()), indoc! {r#"
            type Data struct {
            	Categories []interface{} `json:"categories"`
            }"#});
        assert_eq!(convert(r#"{"categories": null}"#, Options::default()), indoc! {r#"
            type Data struct {
            	Categories interface{} `json:"categories"`
            }"#});
    }

    const BLOG: &str = r#"{"post": {"status": 1, "accept_comment": true, "title": "hello world", "tags": [1,2,4]}, "categories": [{"name": "aws", "num": 123}, {"name": 123, "num": 3.14}], "url": "http://blog.yudppp.com", "profile_image_url": "http://blog.yudppp.com/img/profile.gif", "comments": []}"#;

    #[test]
    fn blog_document_matches_gofmt_layout() {
        assert_eq!(convert(BLOG, Options::default()), indoc! {r#"
            type Data struct {
            	Categories      []DataCategory `json:"categories"`
            	Comments        []interface{}  `json:"comments"`
            	Post            DataPost       `json:"post"`
            	ProfileImageURL string         `json:"profile_image_url"`
            	URL             string         `json:"url"`
            }

            type DataCategory struct {
            	Name interface{} `json:"name"`
            	Num  float64     `json:"num"`
            }

            type DataPost struct {
            	AcceptComment bool   `json:"accept_comment"`
            	Status        int    `json:"status"`
            	Tags          []int  `json:"tags"`
            	Title         string `json:"title"`
            }"#});
    }

    #[test]
    fn blog_list_with_short_names() {
        let opts = Options { short_names: true, root_name: "json".into(), ..Options::default() };
        assert_eq!(convert(&format!("[{BLOG}]"), opts), indoc! {r#"
            type JSON struct {
            	Categories      []Category    `json:"categories"`
            	Comments        []interface{} `json:"comments"`
            	Post            Post          `json:"post"`
            	ProfileImageURL string        `json:"profile_image_url"`
            	URL             string        `json:"url"`
            }

            type Category struct {
            	Name interface{} `json:"name"`
            	Num  float64     `json:"num"`
            }

            type Post struct {
            	AcceptComment bool   `json:"accept_comment"`
            	Status        int    `json:"status"`
            	Tags          []int  `json:"tags"`
            	Title         string `json:"title"`
            }"#});
    }

    #[test]
    fn repeated_scalar_list_widens_its_items() {
        assert_eq!(convert(r#"[{"t": [1]}, {"t": [1.5]}]"#, Options::default()), indoc! {r#"
            type Data struct {
            	T []float64 `json:"t"`
            }"#});
    }

    #[test]
    fn repeated_record_list_merges_into_one_item_type() {
        let input = r#"[{"t": [{"a": 1}]}, {"t": [{"b": "x"}]}]"#;
        assert_eq!(convert(input, Options::default()), indoc! {r#"
            type Data struct {
            	T []DataT `json:"t"`
            }

            type DataT struct {
            	A int    `json:"a"`
            	B string `json:"b"`
            }"#});
    }

    #[test]
    fn list_items_drop_only_the_plural_s() {
        let input = r#"{"houses": [{"sizes": [{"w": 1}]}]}"#;
        assert_eq!(convert(input, Options::default()), indoc! {r#"
            type Data struct {
            	Houses []DataHouse `json:"houses"`
            }

            type DataHouse struct {
            	Sizes []DataHouseSize `json:"sizes"`
            }

            type DataHouseSize struct {
            	W int `json:"w"`
            }"#});
    }

    #[test]
    fn symbol_only_key_does_not_shadow_its_parent() {
        assert_eq!(convert(r#"{"@": {"a": 1}}"#, Options::default()), indoc! {r#"
            type Data struct {
            	Data DataX `json:"@"`
            }

            type DataX struct {
            	A int `json:"a"`
            }"#});
    }

    #[test]
    fn unformatted_output_keeps_single_spaces() {
        let opts = Options { gofmt: false, ..Options::default() };
        assert_eq!(
            convert(r#"{"ab": 1, "c": "x"}"#, opts),
            "type Data struct {\n\tAb int `json:\"ab\"`\n\tC string `json:\"c\"`\n}"
        );
    }

    #[test]
    fn conversion_is_deterministic() {
        let opts = Options { example: true, ..Options::default() };
        assert_eq!(convert(BLOG, opts.clone()), convert(BLOG, opts));
    }

    #[test]
    fn malformed_input_is_a_decode_error() {
        let err = convert_str(r#"{"text": "#, &Options::default()).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn reader_and_str_agree() {
        let opts = Options::default();
        let from_reader = convert_reader(BLOG.as_bytes(), &opts).unwrap();
        assert_eq!(from_reader, convert_str(BLOG, &opts).unwrap());
    }

    #[test]
    fn conversions_run_concurrently() {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    let opts = Options { local: i % 2 == 0, ..Options::default() };
                    (i, convert_str(r#"{"nest": {"text": "x"}}"#, &opts).unwrap())
                })
            })
            .collect();
        for h in handles {
            let (i, out) = h.join().unwrap();
            let want = if i % 2 == 0 { "type data struct" } else { "type Data struct" };
            assert!(out.starts_with(want), "{out}");
        }
    }
}
