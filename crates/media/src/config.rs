//! Storage configuration and credential parsing.

use std::fmt;

use serde::Deserialize;

/// Endpoint used when the credentials do not name one.
pub const DEFAULT_ENDPOINT: &str = "https://storage.googleapis.com";

/// Region used when the credentials do not name one.
pub const DEFAULT_REGION: &str = "auto";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("STORAGE_CREDENTIALS is not valid credential JSON: {0}")]
    InvalidCredentials(#[from] serde_json::Error),
}

/// HMAC key pair for the bucket's S3-compatible API.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl fmt::Debug for StorageCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl StorageCredentials {
    /// Parse the credential blob.
    ///
    /// Deployment tooling sometimes wraps the JSON in an extra pair of single
    /// or double quotes and backslash-escapes the inner quotes. Such a wrapper
    /// is stripped and `\"` unescaped before parsing.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        let json = match strip_outer_quotes(trimmed) {
            Some(inner) => inner.replace("\\\"", "\""),
            None => trimmed.to_string(),
        };
        Ok(serde_json::from_str(&json)?)
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn region(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_REGION)
    }
}

fn strip_outer_quotes(s: &str) -> Option<&str> {
    ['"', '\''].into_iter().find_map(|q| {
        s.strip_prefix(q)
            .and_then(|rest| rest.strip_suffix(q))
    })
}

/// Storage settings loaded from the environment.
///
/// | Env Var                   | Default                              |
/// |---------------------------|--------------------------------------|
/// | `STORAGE_BUCKET`          | required                             |
/// | `STORAGE_CREDENTIALS`     | required                             |
/// | `STORAGE_PUBLIC_BASE_URL` | credential endpoint, else GCS        |
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub credentials: StorageCredentials,
    pub public_base_url: String,
}

impl StorageConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bucket = non_empty_var("STORAGE_BUCKET")?;
        let credentials = StorageCredentials::parse(&non_empty_var("STORAGE_CREDENTIALS")?)?;
        let public_base_url = std::env::var("STORAGE_PUBLIC_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| credentials.endpoint().to_string());

        Ok(Self {
            bucket,
            credentials,
            public_base_url,
        })
    }
}

fn non_empty_var(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(name))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const PLAIN: &str = r#"{"accessKeyId":"AK","secretAccessKey":"SK"}"#;

    #[test]
    fn plain_json_parses_with_defaults() {
        let creds = StorageCredentials::parse(PLAIN).unwrap();
        assert_eq!(creds.access_key_id, "AK");
        assert_eq!(creds.secret_access_key, "SK");
        assert_eq!(creds.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(creds.region(), DEFAULT_REGION);
    }

    #[test]
    fn quote_wrapped_escaped_json_parses() {
        let wrapped = r#"'{\"accessKeyId\":\"AK\",\"secretAccessKey\":\"SK\",\"region\":\"eu\"}'"#;
        let creds = StorageCredentials::parse(wrapped).unwrap();
        assert_eq!(creds.access_key_id, "AK");
        assert_eq!(creds.region(), "eu");

        let double = format!("\"{}\"", PLAIN.replace('"', "\\\""));
        assert!(StorageCredentials::parse(&double).is_ok());
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert_matches!(
            StorageCredentials::parse("{not json"),
            Err(ConfigError::InvalidCredentials(_))
        );
        assert_matches!(
            StorageCredentials::parse(r#"{"accessKeyId":"AK"}"#),
            Err(ConfigError::InvalidCredentials(_))
        );
    }

    #[test]
    fn debug_output_redacts_secret() {
        let creds = StorageCredentials::parse(PLAIN).unwrap();
        let shown = format!("{creds:?}");
        assert!(!shown.contains("SK\""));
        assert!(shown.contains("<redacted>"));
    }
}
