//! Config record loading.
//!
//! A config is a YAML document whose top-level mapping becomes the template's
//! variable namespace. No schema is applied. Merge keys (`<<: *anchor`) are
//! resolved before conversion.

use std::path::Path;

use serde_json::{Map, Number, Value as Json};
use serde_yaml::Value as Yaml;

use crate::error::RecordError;
use crate::types::ConfigRecord;

/// Read and parse the config file at `path`.
pub fn load(path: &Path) -> Result<ConfigRecord, RecordError> {
    let content = std::fs::read_to_string(path).map_err(|source| RecordError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(path, &content)
}

/// Parse `content` as a config record. `path` is only used for error context.
///
/// An empty document (or one holding only comments or `null`) is an empty
/// record; any other non-mapping top level is rejected.
pub fn parse_str(path: &Path, content: &str) -> Result<ConfigRecord, RecordError> {
    let parse_err = |source| RecordError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let mut doc: Yaml = serde_yaml::from_str(content).map_err(parse_err)?;
    doc.apply_merge().map_err(parse_err)?;

    match untag(doc) {
        Yaml::Null => Ok(ConfigRecord::default()),
        Yaml::Mapping(mapping) => Ok(ConfigRecord(convert_mapping(path, mapping)?)),
        other => Err(RecordError::NotAMapping {
            path: path.to_path_buf(),
            found: kind_of(&other),
        }),
    }
}

fn untag(value: Yaml) -> Yaml {
    match value {
        Yaml::Tagged(tagged) => untag(tagged.value),
        other => other,
    }
}

fn kind_of(value: &Yaml) -> &'static str {
    match value {
        Yaml::Null => "null",
        Yaml::Bool(_) => "a boolean",
        Yaml::Number(_) => "a number",
        Yaml::String(_) => "a string",
        Yaml::Sequence(_) => "a sequence",
        Yaml::Mapping(_) => "a mapping",
        Yaml::Tagged(_) => "a tagged value",
    }
}

fn convert_mapping(
    path: &Path,
    mapping: serde_yaml::Mapping,
) -> Result<Map<String, Json>, RecordError> {
    let mut out = Map::with_capacity(mapping.len());
    for (key, value) in mapping {
        let key = match untag(key) {
            Yaml::String(s) => s,
            Yaml::Bool(b) => b.to_string(),
            Yaml::Number(n) => n.to_string(),
            Yaml::Null => "null".to_string(),
            other => {
                return Err(RecordError::UnsupportedKey {
                    path: path.to_path_buf(),
                    reason: format!("{} cannot be used as a key", kind_of(&other)),
                })
            }
        };
        out.insert(key, convert(path, value)?);
    }
    Ok(out)
}

fn convert(path: &Path, value: Yaml) -> Result<Json, RecordError> {
    Ok(match untag(value) {
        Yaml::Null => Json::Null,
        Yaml::Bool(b) => Json::Bool(b),
        Yaml::Number(n) => convert_number(&n),
        Yaml::String(s) => Json::String(s),
        Yaml::Sequence(items) => Json::Array(
            items
                .into_iter()
                .map(|item| convert(path, item))
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(mapping) => Json::Object(convert_mapping(path, mapping)?),
        Yaml::Tagged(_) => unreachable!("untag strips every tag layer"),
    })
}

fn convert_number(n: &serde_yaml::Number) -> Json {
    if let Some(i) = n.as_i64() {
        Json::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        Json::Number(u.into())
    } else {
        // `.nan` and `.inf` have no JSON form; keep their YAML spelling.
        n.as_f64()
            .and_then(Number::from_f64)
            .map(Json::Number)
            .unwrap_or_else(|| Json::String(n.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(content: &str) -> Result<ConfigRecord, RecordError> {
        parse_str(Path::new("jenerator.yaml"), content)
    }

    #[test]
    fn top_level_keys_become_variables() {
        let record = parse("name: x\nsteps:\n  - build\n  - test\n").unwrap();
        assert_eq!(record.get("name"), Some(&json!("x")));
        assert_eq!(record.get("steps"), Some(&json!(["build", "test"])));
    }

    #[test]
    fn nested_values_and_scalars_survive() {
        let record = parse(
            "# comment\nretries: 3\nratio: 0.5\nenabled: true\nnothing: ~\nagent:\n  label: linux\n",
        )
        .unwrap();
        assert_eq!(record.get("retries"), Some(&json!(3)));
        assert_eq!(record.get("ratio"), Some(&json!(0.5)));
        assert_eq!(record.get("enabled"), Some(&json!(true)));
        assert_eq!(record.get("nothing"), Some(&json!(null)));
        assert_eq!(record.get("agent"), Some(&json!({"label": "linux"})));
    }

    #[test]
    fn empty_and_comment_only_documents_are_empty_records() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("# nothing here\n").unwrap().is_empty());
    }

    #[test]
    fn sequence_top_level_is_rejected() {
        let err = parse("- a\n- b\n").unwrap_err();
        assert!(matches!(err, RecordError::NotAMapping { found: "a sequence", .. }), "got: {err}");
    }

    #[test]
    fn scalar_keys_are_stringified() {
        let record = parse("1: one\ntrue: yes\n").unwrap();
        assert_eq!(record.get("1"), Some(&json!("one")));
        assert_eq!(record.get("true"), Some(&json!("yes")));
    }

    #[test]
    fn sequence_keys_are_rejected() {
        let err = parse("? [a, b]\n: value\n").unwrap_err();
        assert!(matches!(err, RecordError::UnsupportedKey { .. }), "got: {err}");
    }

    #[test]
    fn merge_keys_are_applied() {
        let record = parse("base: &base\n  image: alpine\njob:\n  <<: *base\n  name: lint\n").unwrap();
        assert_eq!(record.get("job"), Some(&json!({"image": "alpine", "name": "lint"})));
    }

    #[test]
    fn mapping_keys_keep_document_order() {
        let record = parse("zeta: 1\nalpha: 2\nstages:\n  test: t\n  build: b\n  deploy: d\n").unwrap();
        let top: Vec<&str> = record.0.keys().map(String::as_str).collect();
        assert_eq!(top, vec!["zeta", "alpha", "stages"]);
        let stages: Vec<&str> = record.get("stages").unwrap().as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(stages, vec!["test", "build", "deploy"]);
    }

    #[test]
    fn duplicate_keys_are_a_parse_error() {
        let err = parse("name: a\nname: b\n").unwrap_err();
        assert!(matches!(err, RecordError::Parse { .. }), "got: {err}");
    }

    #[test]
    fn bad_indentation_is_a_parse_error_with_path() {
        let err = parse("name: x\n  steps: [a\n").unwrap_err();
        assert!(matches!(err, RecordError::Parse { .. }), "got: {err}");
        assert!(err.to_string().contains("jenerator.yaml"));
    }
}
