//! Storage configuration read once at startup

use crate::errors::ConfigError;
use std::str::FromStr;

pub const DEFAULT_REGION: &str = "us-east-1";

pub const ENV_REGION: &str = "S3_AWS_REGION";
pub const ENV_ACCESS_KEY_ID: &str = "S3_AWS_ACCESS_KEY_ID";
pub const ENV_SECRET_ACCESS_KEY: &str = "S3_AWS_SECRET_ACCESS_KEY";
pub const ENV_ENDPOINT_URL: &str = "S3_ENDPOINT_URL";
pub const ENV_FORCE_PATH_STYLE: &str = "S3_FORCE_PATH_STYLE";
pub const ENV_MISSING_BUCKET_DETECTION: &str = "S3_MISSING_BUCKET_DETECTION";

/// How a failed existence check is recognised as "bucket absent"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingBucketDetection {
    /// Only the modeled `NotFound` error or a `NotFound`/`NoSuchBucket` code
    ServiceCode,
    /// Service code, or any raw HTTP 404 response
    #[default]
    ServiceCodeOrStatus,
}

impl FromStr for MissingBucketDetection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "service-code" => Ok(MissingBucketDetection::ServiceCode),
            "service-code-or-status" => Ok(MissingBucketDetection::ServiceCodeOrStatus),
            _ => Err(ConfigError::InvalidValue {
                name: ENV_MISSING_BUCKET_DETECTION,
                value: s.to_string(),
            }),
        }
    }
}

/// Static access key pair
#[derive(Clone)]
pub struct StaticCredentials {
    pub key_id: String,
    pub secret_key: String,
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("key_id", &mask(&self.key_id))
            .field("secret_key", &"****")
            .finish()
    }
}

fn mask(value: &str) -> String {
    format!("{}****", value.chars().take(4).collect::<String>())
}

/// Immutable configuration handed to the S3 client at construction
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub region: String,
    /// `None` falls back to the default AWS credential chain
    pub credentials: Option<StaticCredentials>,
    pub endpoint_url: Option<String>,
    pub force_path_style: bool,
    pub missing_bucket_detection: MissingBucketDetection,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            credentials: None,
            endpoint_url: None,
            force_path_style: false,
            missing_bucket_detection: MissingBucketDetection::default(),
        }
    }
}

impl StorageConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let region = get(ENV_REGION).unwrap_or_else(|| DEFAULT_REGION.to_string());

        let credentials = match (get(ENV_ACCESS_KEY_ID), get(ENV_SECRET_ACCESS_KEY)) {
            (Some(key_id), Some(secret_key)) => Some(StaticCredentials { key_id, secret_key }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(ConfigError::IncompleteCredentials(
                    ENV_ACCESS_KEY_ID,
                    ENV_SECRET_ACCESS_KEY,
                ));
            }
            (None, Some(_)) => {
                return Err(ConfigError::IncompleteCredentials(
                    ENV_SECRET_ACCESS_KEY,
                    ENV_ACCESS_KEY_ID,
                ));
            }
        };

        let force_path_style = match get(ENV_FORCE_PATH_STYLE) {
            Some(value) => parse_bool(ENV_FORCE_PATH_STYLE, &value)?,
            None => false,
        };

        let missing_bucket_detection = match get(ENV_MISSING_BUCKET_DETECTION) {
            Some(value) => value.parse()?,
            None => MissingBucketDetection::default(),
        };

        Ok(Self {
            region,
            credentials,
            endpoint_url: get(ENV_ENDPOINT_URL),
            force_path_style,
            missing_bucket_detection,
        })
    }

    /// Whether bucket creation needs an explicit location constraint.
    /// AWS rejects constraint-less creation outside us-east-1; custom
    /// endpoints (MinIO, R2, B2) generally reject the constraint instead.
    pub fn needs_location_constraint(&self) -> bool {
        self.endpoint_url.is_none() && self.region != DEFAULT_REGION
    }
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = StorageConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.region, "us-east-1");
        assert!(config.credentials.is_none());
        assert!(config.endpoint_url.is_none());
        assert!(!config.force_path_style);
        assert_eq!(
            config.missing_bucket_detection,
            MissingBucketDetection::ServiceCodeOrStatus
        );
    }

    #[test]
    fn full_environment_is_read() {
        let config = StorageConfig::from_lookup(lookup_from(&[
            (ENV_REGION, "eu-west-1"),
            (ENV_ACCESS_KEY_ID, "AKIAEXAMPLE"),
            (ENV_SECRET_ACCESS_KEY, "secret"),
            (ENV_ENDPOINT_URL, "http://localhost:9000"),
            (ENV_FORCE_PATH_STYLE, "true"),
            (ENV_MISSING_BUCKET_DETECTION, "service-code"),
        ]))
        .unwrap();

        assert_eq!(config.region, "eu-west-1");
        let creds = config.credentials.as_ref().unwrap();
        assert_eq!(creds.key_id, "AKIAEXAMPLE");
        assert_eq!(creds.secret_key, "secret");
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:9000"));
        assert!(config.force_path_style);
        assert_eq!(
            config.missing_bucket_detection,
            MissingBucketDetection::ServiceCode
        );
    }

    #[test]
    fn half_credentials_are_rejected() {
        let err = StorageConfig::from_lookup(lookup_from(&[(ENV_ACCESS_KEY_ID, "AKIA")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::IncompleteCredentials(..)));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = StorageConfig::from_lookup(lookup_from(&[
            (ENV_REGION, "  "),
            (ENV_ACCESS_KEY_ID, ""),
            (ENV_SECRET_ACCESS_KEY, ""),
        ]))
        .unwrap();
        assert_eq!(config.region, DEFAULT_REGION);
        assert!(config.credentials.is_none());
    }

    #[test]
    fn bad_flag_values_are_rejected() {
        assert!(
            StorageConfig::from_lookup(lookup_from(&[(ENV_FORCE_PATH_STYLE, "maybe")])).is_err()
        );
        assert!(
            StorageConfig::from_lookup(lookup_from(&[(ENV_MISSING_BUCKET_DETECTION, "always")]))
                .is_err()
        );
    }

    #[test]
    fn location_constraint_only_for_aws_outside_us_east_1() {
        let mut config = StorageConfig::default();
        assert!(!config.needs_location_constraint());

        config.region = "eu-central-1".to_string();
        assert!(config.needs_location_constraint());

        config.endpoint_url = Some("http://minio:9000".to_string());
        assert!(!config.needs_location_constraint());
    }

    #[test]
    fn debug_output_masks_secrets() {
        let creds = StaticCredentials {
            key_id: "AKIAEXAMPLE".to_string(),
            secret_key: "topsecret".to_string(),
        };
        let printed = format!("{creds:?}");
        assert!(printed.contains("AKIA****"));
        assert!(!printed.contains("topsecret"));
    }
}
