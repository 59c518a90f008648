//! Query-string field helpers
//!
//! HTML forms submit every field, so a filter left blank arrives as
//! `key=`. These fields deserialize blank values as absent.

use std::fmt::Display;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer};

/// Blank or whitespace-only value as `None`, anything else parsed with `FromStr`.
///
/// Use with `#[serde(default, deserialize_with = "empty_as_none")]`.
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "empty_as_none")]
        owner_id: Option<i32>,
        #[serde(default, deserialize_with = "empty_as_none")]
        minimum_rating: Option<f64>,
    }

    fn parse(query: &str) -> Result<Form, String> {
        let uri: axum::http::Uri = format!("/search?{}", query).parse().unwrap();
        axum::extract::Query::<Form>::try_from_uri(&uri)
            .map(|axum::extract::Query(form)| form)
            .map_err(|rejection| rejection.body_text())
    }

    #[test]
    fn blank_fields_are_absent() {
        let form = parse("owner_id=&minimum_rating=%20").unwrap();
        assert_eq!(form.owner_id, None);
        assert_eq!(form.minimum_rating, None);
    }

    #[test]
    fn missing_fields_are_absent() {
        let form = parse("").unwrap();
        assert_eq!(form.owner_id, None);
    }

    #[test]
    fn values_are_parsed() {
        let form = parse("owner_id=3&minimum_rating=4.5").unwrap();
        assert_eq!(form.owner_id, Some(3));
        assert_eq!(form.minimum_rating, Some(4.5));
    }

    #[test]
    fn unparsable_value_is_an_error() {
        let err = parse("owner_id=abc").unwrap_err();
        assert!(err.contains("invalid digit"));
    }
}
