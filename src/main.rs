mod logging;

use clap::Parser;
use std::path::PathBuf;
use threads_client::{ImpressionsAggregator, PacingConfig, ThreadsApiClient};
use threads_core::{AppConfig, CoreError, ErrorExt};

#[derive(Parser, Debug)]
#[command(
    name = "threads-impressions",
    about = "Average views across a Threads account's recent posts"
)]
struct Cli {
    /// Optional TOML config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, env = "THREADS_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Label used in log output
    #[arg(long)]
    username: Option<String>,

    /// Trailing window in days
    #[arg(long)]
    days: Option<u32>,

    #[arg(long)]
    api_base_url: Option<String>,

    /// Pause between view lookups, in milliseconds
    #[arg(long)]
    pacing_ms: Option<u64>,
}

impl Cli {
    fn into_config(self) -> Result<AppConfig, CoreError> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };

        if let Some(token) = self.access_token {
            config.access_token = Some(token);
        }
        if let Some(username) = self.username {
            config.username = username;
        }
        if let Some(days) = self.days {
            config.days = days;
        }
        if let Some(base_url) = self.api_base_url {
            config.api_base_url = base_url;
        }
        if let Some(pacing_ms) = self.pacing_ms {
            config.pacing_interval_ms = pacing_ms;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CoreError> {
    let config = Cli::parse().into_config().map_err(|e| {
        eprintln!("{}", e.user_friendly_message());
        e
    })?;

    let _logging = logging::init(&config.log_filter);
    tracing::debug!("Loaded configuration: {:?}", config);

    let client = ThreadsApiClient::new(&config.api_base_url).map_err(|e| {
        e.log_error();
        e
    })?;
    let access_token = config.access_token()?;

    let aggregator = ImpressionsAggregator::new(
        &client,
        PacingConfig {
            interval: config.pacing_interval(),
        },
    );

    match aggregator
        .compute_average_impressions(access_token, config.days, &config.username)
        .await
    {
        Some(average) => tracing::info!(
            "Average Impressions for user '{}' over the last {} days: {:.2}",
            config.username,
            config.days,
            average
        ),
        None => tracing::error!(
            "Failed to retrieve average impressions for user '{}'",
            config.username
        ),
    }

    let metrics = client.get_metrics().await;
    tracing::info!(
        "Made {} API requests ({} failed, average response time {:?})",
        metrics.total_requests,
        metrics.failed_requests,
        metrics.average_response_time
    );
    for (endpoint, endpoint_metrics) in &metrics.requests_by_endpoint {
        tracing::debug!(
            "{}: {} requests, {} errors, average {:?}",
            endpoint,
            endpoint_metrics.request_count,
            endpoint_metrics.error_count,
            endpoint_metrics.average_response_time()
        );
    }
    if metrics.detailed_errors > 0 {
        tracing::debug!(
            "Responses by status: {:?} ({} with error detail)",
            metrics.responses_by_status,
            metrics.detailed_errors
        );
    }
    if let Ok(exported) = client.export_metrics().await {
        tracing::debug!("API metrics: {}", exported);
    }

    Ok(())
}
