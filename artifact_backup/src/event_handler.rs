use aws_sdk_codeartifact::Client as CodeArtifactClient;
use aws_sdk_s3::Client as S3Client;
use lambda_runtime::{tracing, Error, LambdaEvent};
use serde_json::Value;

use crate::config::{AssetPolicy, Config};
use crate::download::ArtifactFetcher;
use crate::error::BackupError;
use crate::event::InboundEvent;
use crate::{registry, store};

/// Clients and configuration shared by every invocation of the function.
pub(crate) struct ArtifactBackup<F> {
    codeartifact: CodeArtifactClient,
    s3: S3Client,
    fetcher: F,
    config: Config,
}

impl<F: ArtifactFetcher> ArtifactBackup<F> {
    pub(crate) fn new(
        codeartifact: CodeArtifactClient,
        s3: S3Client,
        fetcher: F,
        config: Config,
    ) -> Self {
        Self {
            codeartifact,
            s3,
            fetcher,
            config,
        }
    }

    /// Copies the package version's assets to the destination bucket and
    /// returns the keys written. Stops at the first failure.
    async fn copy_assets(&self, event: &InboundEvent) -> Result<Vec<String>, BackupError> {
        let notification = &event.detail;
        let credential =
            registry::authenticate(&self.codeartifact, &notification.domain_name).await?;
        let locations = registry::list_asset_locations(&self.codeartifact, notification).await?;

        let mut stored = Vec::with_capacity(locations.len());
        for location in &locations {
            let url = self
                .config
                .endpoint
                .asset_url(notification, &event.region, location);
            tracing::info!("Downloading {}", url);
            let bytes = self.fetcher.fetch(&url, &credential).await?;

            let bucket = self.config.destination_bucket()?;
            let key = location.destination_key(&notification.domain_name);
            store::upload(&self.s3, bucket, &key, bytes).await?;
            stored.push(key);

            if self.config.asset_policy == AssetPolicy::First {
                if locations.len() > 1 {
                    tracing::warn!(
                        "Backing up only the first of {} assets for {} {}",
                        locations.len(),
                        notification.package_name,
                        notification.package_version
                    );
                }
                break;
            }
        }
        Ok(stored)
    }
}

pub(crate) async fn function_handler<F: ArtifactFetcher>(
    event: LambdaEvent<Value>,
    backup: &ArtifactBackup<F>,
) -> Result<Value, Error> {
    let payload = event.payload;
    let inbound = InboundEvent::parse(&payload)?;
    let notification = &inbound.detail;
    tracing::info!(
        "{}: backing up {}:{} {} ({}) from {}/{} in account {}",
        inbound.detail_type,
        notification.package_namespace,
        notification.package_name,
        notification.package_version,
        notification.package_version_state,
        notification.domain_name,
        notification.repository_name,
        inbound.account
    );

    let stored = backup.copy_assets(&inbound).await?;
    tracing::info!(
        "Backed up {} asset(s) of {} {}",
        stored.len(),
        notification.package_name,
        notification.package_version
    );
    Ok(payload)
}
