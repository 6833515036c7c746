//! Per-integration request schemas.
//!
//! Each integration declares the query parameters it accepts as a
//! [`RequestSchema`]. The routing layer validates raw query strings against
//! it and hands the integration typed [`FetchParams`].

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{ProviderError, ProviderResult};

/// The type a parameter value is parsed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Integer,
    Boolean,
}

impl ParamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }
}

/// Declaration of one accepted parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    /// Raw default applied when the parameter is absent.
    pub default: Option<&'static str>,
    pub description: &'static str,
}

impl ParamSpec {
    /// A parameter that must be present.
    pub const fn required(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
            description,
        }
    }

    /// A parameter that may be omitted.
    pub const fn optional(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: None,
            description,
        }
    }

    /// Builder method to set the default value.
    pub const fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    fn parse(&self, raw: &str) -> ProviderResult<ParamValue> {
        match self.kind {
            ParamKind::String => Ok(ParamValue::String(raw.to_string())),
            ParamKind::Integer => raw.trim().parse::<i64>().map(ParamValue::Integer).map_err(|_| {
                ProviderError::bad_request(format!(
                    "Invalid value for parameter '{}': expected an integer, got '{}'",
                    self.name, raw
                ))
            }),
            ParamKind::Boolean => parse_bool(raw).map(ParamValue::Boolean).ok_or_else(|| {
                ProviderError::bad_request(format!(
                    "Invalid value for parameter '{}': expected a boolean, got '{}'",
                    self.name, raw
                ))
            }),
        }
    }
}

/// Parses the boolean spellings accepted in query strings.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// A typed parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    String(String),
    Integer(i64),
    Boolean(bool),
}

/// The full set of parameters an integration accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequestSchema {
    params: Vec<ParamSpec>,
}

impl RequestSchema {
    pub fn new(params: Vec<ParamSpec>) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Validates raw query values and converts them to typed parameters.
    ///
    /// Parameters not declared in the schema are ignored.
    ///
    /// # Errors
    ///
    /// Returns a bad request error when a required parameter is missing or a
    /// value does not parse as the declared kind.
    pub fn validate(&self, raw: &HashMap<String, String>) -> ProviderResult<FetchParams> {
        let mut params = FetchParams::default();

        for spec in &self.params {
            let value = match (raw.get(spec.name), spec.default) {
                (Some(value), _) => spec.parse(value)?,
                (None, Some(default)) => spec.parse(default)?,
                (None, None) if spec.required => {
                    return Err(ProviderError::bad_request(format!(
                        "Missing required parameter: {}",
                        spec.name
                    )));
                }
                (None, None) => continue,
            };
            params.values.insert(spec.name.to_string(), value);
        }

        Ok(params)
    }
}

/// Validated parameters for a single fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchParams {
    values: HashMap<String, ParamValue>,
}

impl FetchParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set a value directly.
    pub fn with(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ParamValue::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(ParamValue::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(ParamValue::Boolean(b)) => Some(*b),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;

    fn schema() -> RequestSchema {
        RequestSchema::new(vec![
            ParamSpec::required("location", ParamKind::String, "City name"),
            ParamSpec::optional("api_key", ParamKind::String, "API key"),
            ParamSpec::optional("days", ParamKind::Integer, "Days").with_default("5"),
            ParamSpec::optional("verbose", ParamKind::Boolean, "Verbose"),
        ])
    }

    fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn applies_defaults_and_skips_absent_optionals() {
        let params = schema().validate(&raw(&[("location", "London")])).unwrap();

        assert_eq!(params.get_str("location"), Some("London"));
        assert_eq!(params.get_i64("days"), Some(5));
        assert!(params.get("api_key").is_none());
        assert!(params.get("verbose").is_none());
    }

    #[test]
    fn parses_declared_kinds() {
        let params = schema()
            .validate(&raw(&[("location", "Paris"), ("days", " 3 "), ("verbose", "YES")]))
            .unwrap();

        assert_eq!(params.get_i64("days"), Some(3));
        assert_eq!(params.get_bool("verbose"), Some(true));
    }

    #[test]
    fn missing_required_parameter_is_bad_request() {
        let err = schema().validate(&raw(&[("days", "2")])).unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::BadRequest);
        assert_eq!(err.message(), "Missing required parameter: location");
    }

    #[test]
    fn invalid_integer_is_bad_request() {
        let err = schema()
            .validate(&raw(&[("location", "Oslo"), ("days", "many")]))
            .unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::BadRequest);
        assert!(err.message().contains("'days'"));
    }

    #[test]
    fn unknown_parameters_are_ignored() {
        let params = schema()
            .validate(&raw(&[("location", "Oslo"), ("colour", "blue")]))
            .unwrap();
        assert!(params.get("colour").is_none());
    }

    #[test]
    fn empty_string_satisfies_presence() {
        let params = schema().validate(&raw(&[("location", "")])).unwrap();
        assert_eq!(params.get_str("location"), Some(""));
    }

    #[test]
    fn bool_spellings() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("Off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn schema_serializes_as_list() {
        let json = serde_json::to_value(schema()).unwrap();
        assert_eq!(json[0]["name"], "location");
        assert_eq!(json[0]["required"], true);
        assert_eq!(json[2]["kind"], "integer");
        assert_eq!(json[2]["default"], "5");
    }
}
