//! Request and response bodies for the review REST API

use crate::idea::{Idea, RawIdea};
use crate::session::{Role, User};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of any non-2xx answer
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
  #[serde(default)]
  pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
  pub username: String,
  pub display_name: String,
  pub email: String,
  pub password: String,
  pub role: Role,
}

/// Successful login or registration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthGrant {
  pub token: String,
  pub user: User,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProfileResponse {
  pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitIdeaRequest {
  pub title: String,
  pub category: String,
  pub description: String,
  pub service_area: String,
  pub benefit_level: u8,
  pub assigned_sdm_id: String,
  pub implemented: bool,
  pub security_gap: String,
  pub possible_solution: String,
  pub automation_opportunity: String,
  pub automation_solution: String,
  pub innovative_idea: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitReceipt {
  #[serde(default)]
  pub message: Option<String>,
  #[serde(default)]
  pub idea: Option<RawIdea>,
}

impl SubmitReceipt {
  pub fn idea_id(&self) -> Option<String> {
    self.idea.as_ref().and_then(crate::idea::raw_id)
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApproveReceipt {
  #[serde(default)]
  pub message: Option<String>,
  #[serde(default)]
  pub points_awarded: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RejectRequest<'a> {
  pub rejection_reason: &'a str,
}

/// One entry of a similarity check, only kept for a single display
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatch {
  pub idea: Idea,
  /// Percentage, 0-100
  pub score: f64,
}

impl SimilarityMatch {
  pub fn from_raw(raw: &RawIdea) -> Self {
    let score = match raw.get("similarity_score") {
      Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
      Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
      _ => 0.0,
    };
    let score = if score.is_finite() { score.clamp(0.0, 100.0) } else { 0.0 };

    Self { idea: Idea::from_raw(raw), score }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LeaderboardEntry {
  #[serde(default)]
  pub display_name: Option<String>,
  #[serde(default)]
  pub username: Option<String>,
  #[serde(default)]
  pub total_points: Option<i64>,
  #[serde(default)]
  pub total_ideas: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Activity {
  #[serde(default)]
  pub engineer_name: Option<String>,
  #[serde(default)]
  pub category: Option<String>,
  #[serde(default)]
  pub points: Option<i64>,
  #[serde(default)]
  pub submission_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Leaderboard {
  #[serde(default)]
  pub leaderboard: Vec<LeaderboardEntry>,
  #[serde(default)]
  pub recent_activities: Vec<Activity>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SdmSummary {
  pub id: String,
  pub display_name: String,
  #[serde(default)]
  pub username: Option<String>,
  #[serde(default)]
  pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SdmsResponse {
  #[serde(default)]
  pub sdms: Vec<SdmSummary>,
}
