/// Shared SDK configuration and the blocking runtime that drives SDK calls.
use std::future::Future;

use anyhow::Context;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use tokio::runtime::{Builder, Runtime};

/// Overrides for the default credential/region chain.
#[derive(Debug, Clone, Default)]
pub struct AwsOptions {
    pub profile: Option<String>,
    pub region: Option<String>,
    /// Custom DynamoDB endpoint, e.g. DynamoDB Local. STS keeps the default.
    pub endpoint_url: Option<String>,
}

/// A loaded SDK configuration plus the runtime its clients run on.
///
/// The program is strictly sequential: every SDK future is driven to
/// completion with [`AwsSession::block_on`] before the next step starts.
pub struct AwsSession {
    runtime: Runtime,
    config: SdkConfig,
    /// Applied to DynamoDB clients only, never to the shared config.
    dynamodb_endpoint: Option<String>,
}

impl AwsSession {
    /// Load configuration from the environment, honoring `opts`.
    ///
    /// # Errors
    ///
    /// Fails if the runtime cannot be created.
    pub fn load(opts: &AwsOptions) -> anyhow::Result<Self> {
        let runtime = build_runtime()?;

        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = &opts.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = &opts.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let config = runtime.block_on(loader.load());
        tracing::debug!(
            region = ?config.region(),
            dynamodb_endpoint = ?opts.endpoint_url,
            "loaded AWS configuration"
        );

        Ok(Self {
            runtime,
            config,
            dynamodb_endpoint: opts.endpoint_url.clone(),
        })
    }

    /// Wrap an already built configuration.
    ///
    /// # Errors
    ///
    /// Fails if the runtime cannot be created.
    pub fn from_config(config: SdkConfig, dynamodb_endpoint: Option<String>) -> anyhow::Result<Self> {
        Ok(Self {
            runtime: build_runtime()?,
            config,
            dynamodb_endpoint,
        })
    }

    /// Borrow the SDK configuration shared by every client.
    #[must_use]
    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    /// Endpoint override for DynamoDB, if any.
    #[must_use]
    pub fn dynamodb_endpoint(&self) -> Option<&str> {
        self.dynamodb_endpoint.as_deref()
    }

    /// Run `future` to completion on the session runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

fn build_runtime() -> anyhow::Result<Runtime> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build async runtime")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> SdkConfig {
        SdkConfig::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("eu-west-1"))
            .build()
    }

    #[test]
    fn endpoint_override_stays_off_the_shared_config() {
        let session =
            AwsSession::from_config(base_config(), Some("http://localhost:8000".to_owned()))
                .unwrap();

        // STS clients are built from `config()`, so it must not carry the override.
        assert_eq!(session.config().endpoint_url(), None);
        assert_eq!(session.dynamodb_endpoint(), Some("http://localhost:8000"));
    }

    #[test]
    fn no_override_by_default() {
        let session = AwsSession::from_config(base_config(), None).unwrap();
        assert_eq!(session.dynamodb_endpoint(), None);
        assert_eq!(session.config().region(), Some(&Region::new("eu-west-1")));
    }
}
