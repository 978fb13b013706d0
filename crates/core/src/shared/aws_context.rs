use std::future::Future;
use std::sync::Arc;

use aws_config::{BehaviorVersion, Region, SdkConfig};
use tokio::runtime::Runtime;

/// Resolved AWS configuration plus the runtime that drives SDK futures.
///
/// The rest of the crate is synchronous; adapters call [`AwsContext::block_on`]
/// for each request so the caller suspends for exactly one remote call.
#[derive(Clone)]
pub struct AwsContext {
    runtime: Arc<Runtime>,
    config: SdkConfig,
}

impl AwsContext {
    /// Resolve credentials and endpoints for `region` using the default
    /// provider chain (environment, profile, instance metadata).
    pub fn load(region: &str) -> Result<Self, std::io::Error> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let config = runtime.block_on(
            aws_config::defaults(BehaviorVersion::latest())
                .region(Region::new(region.to_string()))
                .load(),
        );
        Ok(Self {
            runtime: Arc::new(runtime),
            config,
        })
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    pub fn region(&self) -> Option<&str> {
        self.config.region().map(|r| r.as_ref())
    }

    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}
