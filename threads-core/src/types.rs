use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// View count of a single post at lookup time.
pub type ViewCount = u64;

/// One thread as returned by `/me/threads`. Only `id` is used for aggregation;
/// every other field is carried untouched in `metadata`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl Post {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.metadata.get(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregationResult {
    pub average: f64,
    pub post_count: usize,
}

impl AggregationResult {
    /// Returns `None` when no post contributed a view count.
    pub fn from_totals(total_views: ViewCount, post_count: usize) -> Option<Self> {
        if post_count == 0 {
            return None;
        }
        Some(Self {
            average: total_views as f64 / post_count as f64,
            post_count,
        })
    }
}

/// Inclusive calendar-date range `[today - days, today]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostWindow {
    pub since: NaiveDate,
    pub until: NaiveDate,
}

impl PostWindow {
    pub fn trailing_days(today: NaiveDate, days: u32) -> Self {
        let since = today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        Self {
            since,
            until: today,
        }
    }

    pub fn since_param(&self) -> String {
        self.since.format("%Y-%m-%d").to_string()
    }

    pub fn until_param(&self) -> String {
        self.until.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_window_crosses_month() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        let window = PostWindow::trailing_days(today, 7);
        assert_eq!(window.since_param(), "2024-02-25");
        assert_eq!(window.until_param(), "2024-03-03");
    }

    #[test]
    fn test_post_window_zero_days() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let window = PostWindow::trailing_days(today, 0);
        assert_eq!(window.since, window.until);
    }

    #[test]
    fn test_aggregation_excludes_empty() {
        assert!(AggregationResult::from_totals(0, 0).is_none());

        let result = AggregationResult::from_totals(400, 2).unwrap();
        assert_eq!(result.average, 200.0);
        assert_eq!(result.post_count, 2);
    }

    #[test]
    fn test_post_passes_metadata_through() {
        let post: Post = serde_json::from_value(serde_json::json!({
            "id": "1789",
            "media_type": "TEXT_POST",
            "text": "hello",
            "shortcode": 12345,
            "is_quote_post": false,
            "owner": {"id": "42"}
        }))
        .unwrap();

        assert_eq!(post.id, "1789");
        assert_eq!(post.field("media_type"), Some(&Value::from("TEXT_POST")));
        assert_eq!(post.field("shortcode"), Some(&Value::from(12345)));
        assert_eq!(post.field("is_quote_post"), Some(&Value::Bool(false)));
        assert!(post.field("permalink").is_none());
        assert!(!post.metadata.contains_key("id"));
    }

    #[test]
    fn test_post_requires_id() {
        let result: Result<Post, _> = serde_json::from_value(serde_json::json!({"text": "x"}));
        assert!(result.is_err());
    }
}
