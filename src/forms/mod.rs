//! Query-string forms and their typed payloads.
//!
//! Query parameters arrive as free text. Each form keeps the raw strings and
//! converts into a payload by coercing every value, falling back to the
//! documented default instead of rejecting the request.

use std::collections::HashMap;

use actix_web::web;

pub mod collect;
pub mod vod;

/// Decoded query parameters; the first value of a repeated key wins.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams(HashMap<String, String>);

impl QueryParams {
    /// Decode a raw query string. A query that cannot be decoded at all
    /// yields no parameters, so every field takes its default.
    pub fn parse(query: &str) -> Self {
        let pairs = web::Query::<Vec<(String, String)>>::from_query(query)
            .map(web::Query::into_inner)
            .unwrap_or_else(|e| {
                log::debug!("Ignoring undecodable query string '{query}': {e}");
                Vec::new()
            });

        let mut params = HashMap::with_capacity(pairs.len());
        for (key, value) in pairs {
            params.entry(key).or_insert(value);
        }
        Self(params)
    }

    /// Remove and return the value of `key`.
    pub fn take(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }
}

/// Parse `raw` as a number, returning `None` for absent or non-numeric input.
pub(crate) fn parse_number<T: std::str::FromStr>(raw: Option<&str>) -> Option<T> {
    raw.map(str::trim).and_then(|value| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_keys_keep_the_first_value() {
        let mut params = QueryParams::parse("page=1&page=2&q=a%20b");
        assert_eq!(params.take("page").as_deref(), Some("1"));
        assert_eq!(params.take("q").as_deref(), Some("a b"));
        assert_eq!(params.take("page"), None);
    }

    #[test]
    fn empty_query_has_no_params() {
        let mut params = QueryParams::parse("");
        assert_eq!(params.take("page"), None);
    }

    #[test]
    fn parses_numbers_leniently() {
        assert_eq!(parse_number::<i64>(Some(" 7 ")), Some(7));
        assert_eq!(parse_number::<i64>(Some("7a")), None);
        assert_eq!(parse_number::<i64>(None), None);
    }
}
