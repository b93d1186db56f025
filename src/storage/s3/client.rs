use crate::config::StorageConfig;
use crate::storage::s3::models::S3StorageClient;
use aws_config::BehaviorVersion;
use aws_config::retry::RetryConfig;
use aws_credential_types::Credentials;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Region;

impl S3StorageClient {
    /// Build a client from the provided config.
    ///
    /// Static credentials from the config take precedence; without them the
    /// default AWS provider chain is consulted.
    pub async fn connect(config: StorageConfig) -> Self {
        tracing::debug!(
            region = %config.region,
            endpoint = ?config.endpoint_url,
            force_path_style = config.force_path_style,
            credentials = ?config.credentials,
            "creating S3-compatible client"
        );

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .retry_config(RetryConfig::standard().with_max_attempts(3));

        if let Some(creds) = &config.credentials {
            loader = loader.credentials_provider(Credentials::new(
                creds.key_id.clone(),
                creds.secret_key.clone(),
                None, // No session token
                None, // No expiry
                "S3GatewayStaticCredentials",
            ));
        }

        let shared = loader.load().await;

        let mut builder =
            aws_sdk_s3::config::Builder::from(&shared).force_path_style(config.force_path_style);
        if let Some(endpoint) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }

        Self::from_client(Client::from_conf(builder.build()), config)
    }

    /// Wrap an already configured SDK client
    pub fn from_client(client: Client, config: StorageConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}
