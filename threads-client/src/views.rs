use crate::api::ThreadsApiClient;
use serde_json::Value;
use threads_core::{ThreadsApiError, ViewCount};
use tracing::{debug, error, info};

impl ThreadsApiClient {
    /// `views` metric of one post, or `None` if the lookup failed or the
    /// response was not shaped as `data[0].values[0].value`.
    pub async fn fetch_views(
        &self,
        media_id: &str,
        access_token: &str,
        username: &str,
    ) -> Option<ViewCount> {
        info!("Fetching views for post {} (User: '{}')", media_id, username);

        match self.get_post_views(media_id, access_token).await {
            Ok(views) => {
                info!(
                    "Post {} has {} views (User: '{}')",
                    media_id, views, username
                );
                Some(views)
            }
            Err(e) => {
                debug!(
                    code = %e.error_code(),
                    endpoint = e.endpoint(),
                    "Views lookup error: {}",
                    e
                );
                error!(
                    "Failed to fetch views for post {} (User: '{}')",
                    media_id, username
                );
                None
            }
        }
    }

    async fn get_post_views(
        &self,
        media_id: &str,
        access_token: &str,
    ) -> Result<ViewCount, ThreadsApiError> {
        let endpoint = self.endpoint(&format!("{}/insights", media_id));
        let params = [("metric", "views"), ("access_token", access_token)];

        let body = self.request(&endpoint, &params).await?;
        extract_view_count(&body).ok_or_else(|| ThreadsApiError::InvalidResponse {
            endpoint,
            details: "expected data[0].values[0].value".to_string(),
        })
    }
}

pub(crate) fn extract_view_count(body: &Value) -> Option<ViewCount> {
    body.get("data")?
        .get(0)?
        .get("values")?
        .get(0)?
        .get("value")?
        .as_u64()
}
