use aws_config::{Region, SdkConfig, meta::region::RegionProviderChain};

use crate::environment::Environment;

/// The table every invoice is written to
pub const INVOICE_TABLE_NAME: &str = "NotasFiscais";

/// The configuration parameters for the handler.
///
/// These are pulled from environment variables, a local `.env` file is loaded first when present.
#[derive(Debug, Clone)]
pub struct Config {
    /// The environment we are in
    pub environment: Environment,

    /// Endpoint used for both S3 and DynamoDB, e.g. a LocalStack url.
    /// When unset the SDK resolves the regional AWS endpoints.
    pub endpoint_url: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let environment = Environment::new_or_prod();
        let endpoint_url = std::env::var("AWS_ENDPOINT_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        Ok(Config {
            environment,
            endpoint_url,
        })
    }

    /// S3 emulators only serve path-style requests
    pub fn force_path_style(&self) -> bool {
        self.endpoint_url.is_some()
    }

    pub async fn load_aws_config(&self) -> SdkConfig {
        let region_provider =
            RegionProviderChain::default_provider().or_else(Region::new("us-east-1"));
        let loader =
            aws_config::defaults(aws_config::BehaviorVersion::latest()).region(region_provider);

        match self.endpoint_url.as_deref() {
            Some(url) => loader.endpoint_url(url).load().await,
            None => loader.load().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_style_follows_custom_endpoint() {
        let local = Config {
            environment: Environment::Local,
            endpoint_url: Some("http://host.docker.internal:4566".to_string()),
        };
        assert!(local.force_path_style());

        let aws = Config {
            environment: Environment::Production,
            endpoint_url: None,
        };
        assert!(!aws.force_path_style());
    }
}
