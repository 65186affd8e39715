//! Template context: the config record exposed as Tera variables.

use jenerator_core::ConfigRecord;

use crate::error::RenderError;

/// Convert a record into a [`tera::Context`]; each top-level key becomes a
/// variable.
pub fn to_tera_context(record: &ConfigRecord) -> Result<tera::Context, RenderError> {
    tera::Context::from_serialize(record).map_err(RenderError::Context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keys_become_context_variables() {
        let record = ConfigRecord(
            json!({"name": "x", "steps": ["build", "test"]})
                .as_object()
                .cloned()
                .unwrap(),
        );
        let ctx = to_tera_context(&record).expect("context conversion");
        assert_eq!(ctx.get("name"), Some(&json!("x")));
        assert_eq!(ctx.get("steps"), Some(&json!(["build", "test"])));
    }

    #[test]
    fn empty_record_gives_empty_context() {
        let ctx = to_tera_context(&ConfigRecord::default()).expect("context conversion");
        assert!(ctx.get("anything").is_none());
    }
}
