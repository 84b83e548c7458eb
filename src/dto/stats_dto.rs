use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyTrendPoint {
    pub date: NaiveDate,
    pub views: i64,
    pub responses: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeeklyEngagementPoint {
    /// "Week 1" is the oldest bucket.
    pub week: String,
    pub applications: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobStats {
    pub total_views: i64,
    pub total_responses: i64,
    pub total_conversions: i64,
    pub response_rate: f64,
    pub conversion_rate: f64,
    pub average_response_time_hours: f64,
    pub daily_trend: Vec<DailyTrendPoint>,
    pub weekly_engagement: Vec<WeeklyEngagementPoint>,
    pub status_distribution: BTreeMap<String, i64>,
}
