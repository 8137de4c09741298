use crate::api::ThreadsApiClient;
use chrono::Local;
use serde::Deserialize;
use serde_json::Value;
use threads_core::{Post, PostWindow, ThreadsApiError};
use tracing::{debug, error, info};

pub const POST_FIELDS: &str = "id,media_product_type,media_type,media_url,permalink,owner,username,text,timestamp,shortcode,thumbnail_url,children,is_quote_post";

/// Single page only; posts beyond this in the window are not considered.
pub const POST_PAGE_LIMIT: u32 = 100;

#[derive(Debug, Deserialize)]
struct PostsPage {
    #[serde(default)]
    data: Vec<Value>,
}

impl ThreadsApiClient {
    /// Posts from the last `days` calendar days. Failures degrade to an empty list.
    pub async fn fetch_posts(&self, access_token: &str, days: u32, username: &str) -> Vec<Post> {
        let window = PostWindow::trailing_days(Local::now().date_naive(), days);
        self.fetch_posts_in_window(access_token, window, days, username)
            .await
    }

    pub async fn fetch_posts_in_window(
        &self,
        access_token: &str,
        window: PostWindow,
        days: u32,
        username: &str,
    ) -> Vec<Post> {
        info!(
            "Fetching posts for user '{}' for the last {} days",
            username, days
        );

        match self.get_posts_page(access_token, &window).await {
            Ok(posts) => {
                info!("Retrieved {} posts for user '{}'", posts.len(), username);
                posts
            }
            Err(e) => {
                debug!(
                    code = %e.error_code(),
                    endpoint = e.endpoint(),
                    "Posts lookup error: {}",
                    e
                );
                error!("Failed to fetch posts for user '{}'", username);
                Vec::new()
            }
        }
    }

    async fn get_posts_page(
        &self,
        access_token: &str,
        window: &PostWindow,
    ) -> Result<Vec<Post>, ThreadsApiError> {
        let endpoint = self.endpoint("me/threads");
        let since = window.since_param();
        let until = window.until_param();
        let limit = POST_PAGE_LIMIT.to_string();

        let params = [
            ("fields", POST_FIELDS),
            ("since", since.as_str()),
            ("until", until.as_str()),
            ("limit", limit.as_str()),
            ("access_token", access_token),
        ];

        let body = self.request(&endpoint, &params).await?;
        let page: PostsPage = serde_json::from_value(body).map_err(|e| {
            error!("Failed to parse posts page: {}", e);
            ThreadsApiError::InvalidResponse {
                endpoint: endpoint.clone(),
                details: e.to_string(),
            }
        })?;

        Ok(decode_posts(page.data))
    }
}

/// Decodes each entry on its own so one malformed post does not discard the page.
/// Entries without a string `id` are skipped.
fn decode_posts(entries: Vec<Value>) -> Vec<Post> {
    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<Post>(entry) {
            Ok(post) => Some(post),
            Err(e) => {
                error!("Skipping post without a usable id: {}", e);
                None
            }
        })
        .collect()
}
