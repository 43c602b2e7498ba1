//! Feedback domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// A rating and comment left after a swap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: String,
    pub swap_request_id: String,
    pub from_user_id: String,
    pub to_user_id: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl Feedback {
    pub fn new(
        swap_request_id: impl Into<String>,
        from_user_id: impl Into<String>,
        to_user_id: impl Into<String>,
        rating: u8,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            swap_request_id: swap_request_id.into(),
            from_user_id: from_user_id.into(),
            to_user_id: to_user_id.into(),
            rating,
            comment: comment.into(),
            created_at: Utc::now(),
        }
    }
}

/// Check a star rating is within 1..=5
pub fn validate_rating(rating: u8) -> Result<(), String> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(format!(
            "rating must be between {} and {}, got {}",
            MIN_RATING, MAX_RATING, rating
        ))
    }
}

/// Aggregate of the feedback a member has received
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingSummary {
    pub count: usize,
    pub average: Option<f64>,
}

impl RatingSummary {
    pub fn from_feedbacks<'a>(feedbacks: impl IntoIterator<Item = &'a Feedback>) -> Self {
        let (count, total) = feedbacks
            .into_iter()
            .fold((0usize, 0u64), |(n, sum), f| (n + 1, sum + f.rating as u64));
        Self {
            count,
            average: (count > 0).then(|| total as f64 / count as f64),
        }
    }
}
