use crate::errors::{ProviderError, Result};
use catchpoint_api::{CatchpointClient, ClientError, Environment};
use serde::{Deserialize, Deserializer};

pub const API_TOKEN_VAR: &str = "CATCHPOINT_API_TOKEN";
pub const LOG_JSON_VAR: &str = "LOG_JSON";
pub const ENVIRONMENT_VAR: &str = "CATCHPOINT_ENVIRONMENT";

/// Provider-level settings as written in a config file. Anything left out is
/// taken from the environment.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_token: Option<String>,
    /// Accepts a YAML boolean or any string `strconv`-style booleans parse
    /// from ("1", "t", "TRUE", ...).
    #[serde(default, deserialize_with = "lenient_bool")]
    pub log_json: Option<String>,
    #[serde(default)]
    pub catchpoint_environment: Option<String>,
}

/// Resolved provider settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_token: String,
    pub log_json: bool,
    pub environment: Environment,
}

impl ProviderConfig {
    pub fn resolve(&self) -> Result<Settings> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolves the settings, consulting `lookup` for every value the config
    /// leaves unset.
    pub fn resolve_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<Settings> {
        let api_token = self
            .api_token
            .clone()
            .or_else(|| lookup(API_TOKEN_VAR))
            .filter(|token| !token.is_empty())
            .ok_or(ProviderError::MissingToken)?;

        let log_json = self
            .log_json
            .clone()
            .or_else(|| lookup(LOG_JSON_VAR))
            .map(|value| parse_bool(&value))
            .unwrap_or(false);

        let environment = self
            .catchpoint_environment
            .clone()
            .or_else(|| lookup(ENVIRONMENT_VAR))
            .map(|name| Environment::from_name(&name))
            .unwrap_or_default();

        tracing::debug!(log_json, environment = ?environment, "resolved provider settings");

        Ok(Settings {
            api_token,
            log_json,
            environment,
        })
    }
}

impl Settings {
    pub fn client(&self) -> std::result::Result<CatchpointClient, ClientError> {
        CatchpointClient::new(self.api_token.clone(), self.environment, self.log_json)
    }
}

/// Unparsable values are false.
pub fn parse_bool(value: &str) -> bool {
    matches!(value, "1" | "t" | "T" | "TRUE" | "true" | "True")
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrString {
    Bool(bool),
    String(String),
}

fn lenient_bool<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<BoolOrString>::deserialize(deserializer)?.map(|value| match value {
            BoolOrString::Bool(flag) => flag.to_string(),
            BoolOrString::String(text) => text,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn explicit_values_win_over_environment() {
        let config = ProviderConfig {
            api_token: Some("from-config".into()),
            log_json: Some("true".into()),
            catchpoint_environment: Some("qa".into()),
        };
        let settings = config
            .resolve_with(env(&[(API_TOKEN_VAR, "from-env"), (ENVIRONMENT_VAR, "stage")]))
            .unwrap();

        assert_eq!(settings.api_token, "from-config");
        assert!(settings.log_json);
        assert_eq!(settings.environment, Environment::Qa);
    }

    #[test]
    fn environment_fills_the_gaps() {
        let settings = ProviderConfig::default()
            .resolve_with(env(&[
                (API_TOKEN_VAR, "from-env"),
                (LOG_JSON_VAR, "1"),
                (ENVIRONMENT_VAR, "stage"),
            ]))
            .unwrap();

        assert_eq!(settings.api_token, "from-env");
        assert!(settings.log_json);
        assert_eq!(settings.environment, Environment::Stage);
    }

    #[test]
    fn defaults() {
        let settings = ProviderConfig::default()
            .resolve_with(env(&[(API_TOKEN_VAR, "t"), (LOG_JSON_VAR, "maybe")]))
            .unwrap();

        assert!(!settings.log_json);
        assert_eq!(settings.environment, Environment::Prod);
    }

    #[test]
    fn missing_token() {
        let err = ProviderConfig::default().resolve_with(env(&[])).unwrap_err();
        assert!(matches!(err, ProviderError::MissingToken));

        let empty = ProviderConfig {
            api_token: Some(String::new()),
            ..Default::default()
        };
        assert!(empty.resolve_with(env(&[])).is_err());
    }

    #[test]
    fn log_json_accepts_yaml_booleans() {
        let config: ProviderConfig = serde_yaml::from_str("api_token: abc\nlog_json: true\n").unwrap();
        assert_eq!(config.log_json.as_deref(), Some("true"));

        let config: ProviderConfig = serde_yaml::from_str("log_json: \"F\"\n").unwrap();
        assert_eq!(config.log_json.as_deref(), Some("F"));
        assert!(!parse_bool("F"));
    }
}
