//! Serde utilities for backend payloads.

use serde::de::{self, Visitor};
use serde::Deserializer;
use std::fmt;

struct StringOrIntVisitor;

impl Visitor<'_> for StringOrIntVisitor {
    type Value = String;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string or integer representing an identifier")
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(value.to_string())
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(value.to_string())
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(value.to_string())
    }

    fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(value)
    }
}

/// Deserializes identifiers that the backend emits either as JSON strings or
/// as 64-bit integers.
pub mod string_or_int {
    use super::{Deserializer, StringOrIntVisitor};

    /// Deserializes an identifier into its string form.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is neither a string nor an integer.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(StringOrIntVisitor)
    }
}

/// Optional variant of [`string_or_int`]; `null` and absent fields become `None`.
pub mod opt_string_or_int {
    use serde::Deserialize;

    use super::Deserializer;

    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "super::string_or_int::deserialize")] String);

    /// Deserializes an optional identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if a present value is neither a string nor an integer.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<Wrapper>::deserialize(deserializer).map(|w| w.map(|Wrapper(s)| s))
    }
}

/// Listing fields the backend may omit, null out or send in the wrong shape.
///
/// Anything other than an array becomes `None`. Inside an array, rows that
/// fail to decode are skipped so one bad row does not empty the listing.
pub mod lenient_list {
    use serde::de::DeserializeOwned;
    use serde::Deserialize;
    use serde_json::Value;

    use super::Deserializer;

    /// Deserializes an optional list, dropping what does not fit.
    ///
    /// # Errors
    ///
    /// Only fails when the input is not valid JSON for the deserializer.
    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        let rows = match value {
            Some(Value::Array(rows)) => rows,
            Some(other) => {
                tracing::warn!(kind = %json_kind(&other), "Listing field is not an array, treating as empty");
                return Ok(None);
            }
            None => return Ok(None),
        };

        let total = rows.len();
        let parsed: Vec<T> = rows
            .into_iter()
            .filter_map(|row| serde_json::from_value(row).ok())
            .collect();
        if parsed.len() < total {
            tracing::warn!(
                skipped = total - parsed.len(),
                "Dropped malformed rows from listing"
            );
        }
        Ok(Some(parsed))
    }

    fn json_kind(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Payload {
        #[serde(deserialize_with = "super::string_or_int::deserialize")]
        id: String,
        #[serde(default, deserialize_with = "super::opt_string_or_int::deserialize")]
        parent: Option<String>,
    }

    #[test]
    fn test_accepts_string_and_number_ids() {
        let a: Payload = serde_json::from_str(r#"{"id":"1840"}"#).unwrap();
        assert_eq!(a.id, "1840");
        assert!(a.parent.is_none());

        let b: Payload = serde_json::from_str(r#"{"id":1840,"parent":7}"#).unwrap();
        assert_eq!(b.id, "1840");
        assert_eq!(b.parent.as_deref(), Some("7"));
    }

    #[test]
    fn test_null_parent_is_none() {
        let p: Payload = serde_json::from_str(r#"{"id":"1","parent":null}"#).unwrap();
        assert!(p.parent.is_none());
    }

    #[derive(Deserialize)]
    struct Listing {
        #[serde(default, deserialize_with = "super::lenient_list::deserialize")]
        rows: Option<Vec<Payload>>,
    }

    #[test]
    fn test_wrong_shaped_list_is_none() {
        let l: Listing = serde_json::from_str(r#"{"rows":{"oops":1}}"#).unwrap();
        assert!(l.rows.is_none());
        let l: Listing = serde_json::from_str(r#"{"rows":"nope"}"#).unwrap();
        assert!(l.rows.is_none());
        let l: Listing = serde_json::from_str(r#"{"rows":null}"#).unwrap();
        assert!(l.rows.is_none());
        let l: Listing = serde_json::from_str("{}").unwrap();
        assert!(l.rows.is_none());
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let l: Listing =
            serde_json::from_str(r#"{"rows":[{"id":"1"},{"id":true},7,{"id":2}]}"#).unwrap();
        let ids: Vec<_> = l.rows.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }
}
