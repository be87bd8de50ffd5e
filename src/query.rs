//! Query-string assembly for Engine API endpoints.
//!
//! Every endpoint follows the same rule: a parameter appears in the query
//! string only when the caller actually supplied a value. Primitives are
//! stringified, maps and arrays are JSON-encoded, and all values are
//! percent-encoded. Presence is decided by the `Option`, not by truthiness,
//! so an explicit `false` is sent as `"false"`.

use serde::Serialize;

use crate::error::EngineError;

/// Accumulates `(key, value)` pairs and renders them onto an endpoint path.
#[derive(Debug, Default)]
pub(crate) struct QueryString {
    params: Vec<(&'static str, String)>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter from anything with a canonical string form.
    pub fn push(&mut self, key: &'static str, value: impl ToString) {
        self.params.push((key, value.to_string()));
    }

    /// Append a parameter from an optional value, skipping `None`.
    pub fn push_opt<T: ToString>(&mut self, key: &'static str, value: Option<T>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    /// Append a parameter whose wire form is compact JSON (filter maps,
    /// build args, label sets).
    pub fn push_json<T: Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), EngineError> {
        let encoded = serde_json::to_string(value)?;
        self.params.push((key, encoded));
        Ok(())
    }

    /// JSON-encoding variant of [`push_opt`](Self::push_opt).
    pub fn push_json_opt<T: Serialize>(
        &mut self,
        key: &'static str,
        value: Option<&T>,
    ) -> Result<(), EngineError> {
        if let Some(value) = value {
            self.push_json(key, value)?;
        }
        Ok(())
    }

    /// Render `path` plus the accumulated parameters. Values are
    /// percent-encoded; keys are fixed API identifiers and left as-is.
    pub fn apply(&self, path: &str) -> String {
        let mut out = String::from(path);
        for (i, (key, value)) in self.params.iter().enumerate() {
            out.push(if i == 0 { '?' } else { '&' });
            out.push_str(key);
            out.push('=');
            out.push_str(&urlencoding::encode(value));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn empty_query_leaves_path_untouched() {
        let query = QueryString::new();
        assert_eq!(query.apply("/containers/json"), "/containers/json");
    }

    #[test]
    fn unset_options_are_absent_not_empty() {
        let mut query = QueryString::new();
        query.push_opt::<bool>("all", None);
        query.push_opt::<i64>("limit", None);
        assert_eq!(query.apply("/containers/json"), "/containers/json");
    }

    #[test]
    fn explicit_false_is_sent() {
        // Presence is carried by the Option, so `Some(false)` goes on the
        // wire; only `None` is omitted (see DESIGN.md).
        let mut query = QueryString::new();
        query.push_opt("all", Some(false));
        assert_eq!(query.apply("/images/json"), "/images/json?all=false");
    }

    #[test]
    fn booleans_and_integers_stringify() {
        let mut query = QueryString::new();
        query.push("all", true);
        query.push("limit", 5);
        assert_eq!(query.apply("/p"), "/p?all=true&limit=5");
    }

    #[test]
    fn json_values_are_compact_and_percent_encoded() {
        let mut filters: HashMap<String, Vec<String>> = HashMap::new();
        filters.insert("status".to_string(), vec!["running".to_string()]);

        let mut query = QueryString::new();
        query.push_json("filters", &filters).unwrap();
        assert_eq!(
            query.apply("/containers/json"),
            "/containers/json?filters=%7B%22status%22%3A%5B%22running%22%5D%7D"
        );
    }

    #[test]
    fn repeated_keys_are_kept_in_order() {
        let mut query = QueryString::new();
        query.push("t", "web:latest");
        query.push("t", "web:1.2");
        assert_eq!(query.apply("/build"), "/build?t=web%3Alatest&t=web%3A1.2");
    }

    #[test]
    fn values_are_percent_encoded() {
        let mut query = QueryString::new();
        query.push("name", "my container");
        assert_eq!(query.apply("/r"), "/r?name=my%20container");
    }
}
