// src/feedback.rs
//
// Marketplace feedback (rating + suggestions), open to any visitor.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::client;
use crate::errors::ApiError;
use crate::state::ClientContext;

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackCreate {
    #[validate(email(message = "invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,

    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: u8,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: Uuid,
    pub email: String,
    pub category: String,
    pub rating: u8,
    #[serde(default)]
    pub suggestions: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackStats {
    #[serde(rename = "totalFeedBacks")]
    pub total_feedbacks: u64,
    #[serde(rename = "averageRating")]
    pub average_rating: f64,
    #[serde(rename = "categoryCounts")]
    pub category_counts: HashMap<String, u64>,
    #[serde(rename = "ratingDistribution")]
    pub rating_distribution: HashMap<String, u64>,
}

pub async fn send_feedback(
    ctx: &ClientContext,
    feedback: &FeedbackCreate,
) -> Result<Feedback, ApiError> {
    feedback.validate()?;
    client::post_json(ctx, "feedback", feedback).await
}

pub async fn recent_feedback(ctx: &ClientContext, count: u32) -> Result<Vec<Feedback>, ApiError> {
    client::get_json(ctx, &format!("feedback/recent?count={}", count)).await
}

pub async fn feedback_stats(ctx: &ClientContext) -> Result<FeedbackStats, ApiError> {
    client::get_json(ctx, "feedback/statistics").await
}

pub async fn feedback_by_email(
    ctx: &ClientContext,
    email: &str,
) -> Result<Vec<Feedback>, ApiError> {
    let path = format!("feedback/email/{}", urlencoding::encode(email));
    client::get_json(ctx, &path).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_outside_the_scale_is_rejected() {
        let mut feedback = FeedbackCreate {
            email: "sara@uni.edu".to_string(),
            category: "Delivery".to_string(),
            rating: 5,
            suggestions: None,
        };
        assert!(feedback.validate().is_ok());
        feedback.rating = 0;
        assert!(feedback.validate().is_err());
        feedback.rating = 6;
        assert!(feedback.validate().is_err());
    }
}
