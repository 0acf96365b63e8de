//! Opaque filter parameters for collection requests.

use std::fmt;

/// Scalar query value.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Text(v) => f.write_str(v),
            QueryValue::Integer(v) => write!(f, "{}", v),
            QueryValue::Float(v) => write!(f, "{}", v),
            QueryValue::Bool(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Integer(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Integer(i64::from(value))
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Float(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

/// String-keyed filter parameters.
///
/// Keys keep insertion order; setting a key again replaces its value in
/// place. Absent (`None`) values are tracked but never serialized, so an
/// unset filter never reaches the server as an empty string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    entries: Vec<(String, Option<QueryValue>)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: Option<QueryValue>) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.set(key, Some(value.into()));
        self
    }

    pub fn with_opt<V: Into<QueryValue>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.set(key, value.map(Into::into));
        self
    }

    /// Appends every entry of `other`, replacing keys already present.
    pub fn extend(&mut self, other: &QueryParams) {
        for (key, value) in &other.entries {
            self.set(key.clone(), value.clone());
        }
    }

    /// Present entries rendered as strings, in insertion order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.clone(), v.to_string())))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|(_, v)| v.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_values_are_omitted() {
        let params = QueryParams::new()
            .with("category", "policies")
            .with_opt::<String>("author", None)
            .with("archived", false);

        assert_eq!(
            params.to_pairs(),
            vec![
                ("category".to_string(), "policies".to_string()),
                ("archived".to_string(), "false".to_string()),
            ]
        );
    }

    #[test]
    fn setting_a_key_twice_replaces_in_place() {
        let mut params = QueryParams::new().with("page", 1u32).with("limit", 10u32);
        params.set("page", Some(QueryValue::from(3u32)));

        assert_eq!(
            params.to_pairs(),
            vec![
                ("page".to_string(), "3".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn only_absent_entries_count_as_empty() {
        let params = QueryParams::new().with_opt::<&str>("q", None);
        assert!(params.is_empty());
        assert!(!params.with("q", "x").is_empty());
    }
}
