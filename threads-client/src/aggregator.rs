use crate::api::ThreadsApiClient;
use crate::pacing::{PacingConfig, Pacer, TokioPacer};
use threads_core::{AggregationResult, ViewCount};
use tracing::{info, warn};

/// Drives the fetch-posts, fetch-views, average workflow.
///
/// View lookups run strictly one after another, with a pause after every
/// lookup including the last.
#[derive(Debug)]
pub struct ImpressionsAggregator<'a, P = TokioPacer> {
    client: &'a ThreadsApiClient,
    pacer: P,
    pacing: PacingConfig,
}

impl<'a> ImpressionsAggregator<'a, TokioPacer> {
    pub fn new(client: &'a ThreadsApiClient, pacing: PacingConfig) -> Self {
        Self::with_pacer(client, TokioPacer, pacing)
    }
}

impl<'a, P: Pacer> ImpressionsAggregator<'a, P> {
    pub fn with_pacer(client: &'a ThreadsApiClient, pacer: P, pacing: PacingConfig) -> Self {
        Self {
            client,
            pacer,
            pacing,
        }
    }

    #[cfg(test)]
    pub(crate) fn pacer(&self) -> &P {
        &self.pacer
    }

    pub async fn compute_average_impressions(
        &self,
        access_token: &str,
        days: u32,
        username: &str,
    ) -> Option<f64> {
        self.aggregate(access_token, days, username)
            .await
            .map(|result| result.average)
    }

    /// Average views across posts whose lookup succeeded. Failed lookups count
    /// toward neither the sum nor the post count.
    pub async fn aggregate(
        &self,
        access_token: &str,
        days: u32,
        username: &str,
    ) -> Option<AggregationResult> {
        info!(
            "Calculating average impressions for user '{}' for the last {} days",
            username, days
        );

        let posts = self.client.fetch_posts(access_token, days, username).await;

        let mut total_views: ViewCount = 0;
        let mut valid_post_count = 0usize;

        for post in &posts {
            if let Some(views) = self
                .client
                .fetch_views(&post.id, access_token, username)
                .await
            {
                total_views = total_views.saturating_add(views);
                valid_post_count += 1;
            }

            self.pacer.pause(self.pacing.interval).await;
        }

        match AggregationResult::from_totals(total_views, valid_post_count) {
            Some(result) => {
                info!(
                    "Average impressions for user '{}': {:.2} (based on {} posts)",
                    username, result.average, result.post_count
                );
                Some(result)
            }
            None => {
                warn!(
                    "No valid posts found to calculate average impressions for user '{}'",
                    username
                );
                None
            }
        }
    }
}
