use aws_config::timeout::TimeoutConfig;
use aws_config::BehaviorVersion;
use aws_sdk_codeartifact::Client as CodeArtifactClient;
use aws_sdk_s3::Client as S3Client;
use lambda_runtime::{run, service_fn, tracing, Error};
mod config;
mod download;
mod error;
mod event;
mod event_handler;
mod location;
mod registry;
mod store;
use config::Config;
use download::HttpFetcher;
use event_handler::{function_handler, ArtifactBackup};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::subscriber::fmt().json().init();
    let config = Config::from_env()?;
    if !config.has_destination_bucket() {
        tracing::warn!("DESTINATION_BUCKET is not set; every backup will fail at upload");
    }

    let timeouts = TimeoutConfig::builder()
        .connect_timeout(config.request_timeout)
        .read_timeout(config.request_timeout)
        .build();
    let shared_config = aws_config::defaults(BehaviorVersion::v2025_08_07())
        .timeout_config(timeouts)
        .load()
        .await;
    let backup = ArtifactBackup::new(
        CodeArtifactClient::new(&shared_config),
        S3Client::new(&shared_config),
        HttpFetcher::new(config.request_timeout)?,
        config,
    );
    run(service_fn(|event| function_handler(event, &backup))).await
}
