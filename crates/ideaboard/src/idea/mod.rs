//! Canonical idea model and the adapter that builds it from raw records
//!
//! The server returns loosely shaped JSON objects (different field sets per
//! endpoint, numbers and booleans encoded a few different ways). Raw records
//! stay as [`RawIdea`] maps while they are being merged during enrichment;
//! [`Idea::from_raw`] is the only place that reads them field by field.

pub mod normalize;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub use normalize::{describe, describe_raw, NO_DESCRIPTION};

/// An idea record exactly as the server sent it
pub type RawIdea = Map<String, Value>;

pub const UNTITLED: &str = "Untitled Idea";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
  Security,
  Automation,
  Innovation,
  Other,
}

impl Category {
  /// Exact, case-sensitive match; anything unrecognized is `Other`
  pub fn parse(value: &str) -> Self {
    match value {
      "Security" => Category::Security,
      "Automation" => Category::Automation,
      "Innovation" => Category::Innovation,
      _ => Category::Other,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Category::Security => "Security",
      Category::Automation => "Automation",
      Category::Innovation => "Innovation",
      Category::Other => "Other",
    }
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdeaStatus {
  Pending,
  Approved,
  Rejected,
}

impl IdeaStatus {
  pub fn parse(value: &str) -> Option<Self> {
    match value.trim().to_ascii_lowercase().as_str() {
      "pending" => Some(IdeaStatus::Pending),
      "approved" => Some(IdeaStatus::Approved),
      "rejected" => Some(IdeaStatus::Rejected),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      IdeaStatus::Pending => "pending",
      IdeaStatus::Approved => "approved",
      IdeaStatus::Rejected => "rejected",
    }
  }
}

impl fmt::Display for IdeaStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Review state of an idea. Points exist only once approved and a rejection
/// reason only once rejected, so the two can never coexist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ReviewState {
  Pending,
  Approved { points: i64 },
  Rejected { rejection_reason: String },
}

impl ReviewState {
  pub fn status(&self) -> IdeaStatus {
    match self {
      ReviewState::Pending => IdeaStatus::Pending,
      ReviewState::Approved { .. } => IdeaStatus::Approved,
      ReviewState::Rejected { .. } => IdeaStatus::Rejected,
    }
  }

  pub fn points(&self) -> Option<i64> {
    match self {
      ReviewState::Approved { points } => Some(*points),
      _ => None,
    }
  }

  pub fn rejection_reason(&self) -> Option<&str> {
    match self {
      ReviewState::Rejected { rejection_reason } => Some(rejection_reason),
      _ => None,
    }
  }
}

/// Ordinal impact rating, 1 (Marginal) through 5 (Gamechanger)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct BenefitLevel(u8);

impl BenefitLevel {
  pub const LABELS: [&'static str; 5] = ["Marginal", "Moderate", "High", "Very High", "Gamechanger"];

  pub fn new(level: u8) -> Option<Self> {
    (1..=5).contains(&level).then_some(Self(level))
  }

  /// Accepts `3`, `"3"`, or a label such as `"Very High"`
  pub fn from_value(value: &Value) -> Option<Self> {
    match value {
      Value::Number(n) => n.as_u64().and_then(|n| u8::try_from(n).ok()).and_then(Self::new),
      Value::String(s) => Self::from_label(s),
      _ => None,
    }
  }

  pub fn from_label(text: &str) -> Option<Self> {
    let text = text.trim();
    if let Ok(level) = text.parse::<u8>() {
      return Self::new(level);
    }

    Self::LABELS
      .iter()
      .position(|label| label.eq_ignore_ascii_case(text))
      .and_then(|index| Self::new(index as u8 + 1))
  }

  pub fn level(&self) -> u8 {
    self.0
  }

  pub fn label(&self) -> &'static str {
    Self::LABELS[usize::from(self.0) - 1]
  }
}

impl TryFrom<u8> for BenefitLevel {
  type Error = String;

  fn try_from(level: u8) -> Result<Self, Self::Error> {
    Self::new(level).ok_or_else(|| format!("benefit level must be 1-5, got {level}"))
  }
}

impl From<BenefitLevel> for u8 {
  fn from(level: BenefitLevel) -> Self {
    level.0
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Idea {
  pub id: Option<String>,
  pub title: String,
  pub category: Category,
  pub description: String,
  pub benefit_level: Option<BenefitLevel>,
  #[serde(flatten)]
  pub state: ReviewState,
  pub engineer_name: Option<String>,
  pub assigned_sdm_name: Option<String>,
  pub service_area: Option<String>,
  pub submission_date: Option<String>,
  pub implemented: bool,
}

impl Idea {
  pub fn from_raw(raw: &RawIdea) -> Self {
    let status = raw
      .get("status")
      .and_then(Value::as_str)
      .and_then(IdeaStatus::parse)
      .unwrap_or(IdeaStatus::Pending);

    let state = match status {
      IdeaStatus::Pending => ReviewState::Pending,
      IdeaStatus::Approved => {
        ReviewState::Approved { points: raw.get("points").and_then(as_integer).unwrap_or(0) }
      }
      IdeaStatus::Rejected => ReviewState::Rejected {
        rejection_reason: text(raw, "rejection_reason").unwrap_or_default(),
      },
    };

    Self {
      id: raw_id(raw),
      title: text(raw, "title").unwrap_or_else(|| UNTITLED.to_string()),
      category: raw.get("category").and_then(Value::as_str).map(Category::parse).unwrap_or(Category::Other),
      description: describe_raw(raw),
      benefit_level: raw.get("benefit_level").and_then(BenefitLevel::from_value),
      state,
      engineer_name: text(raw, "engineer_name"),
      assigned_sdm_name: text(raw, "assigned_sdm_name"),
      service_area: text(raw, "service_area"),
      submission_date: text(raw, "submission_date"),
      implemented: raw.get("implemented").map(as_flag).unwrap_or(false),
    }
  }

  pub fn status(&self) -> IdeaStatus {
    self.state.status()
  }

  pub fn points(&self) -> Option<i64> {
    self.state.points()
  }

  pub fn rejection_reason(&self) -> Option<&str> {
    self.state.rejection_reason()
  }
}

/// The record's id as an opaque string, if it has a usable one
pub fn raw_id(raw: &RawIdea) -> Option<String> {
  match raw.get("id")? {
    Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
    Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
    _ => None,
  }
}

pub fn raw_status(raw: &RawIdea) -> Option<IdeaStatus> {
  raw.get("status").and_then(Value::as_str).and_then(IdeaStatus::parse)
}

fn text(raw: &RawIdea, key: &str) -> Option<String> {
  raw.get(key).and_then(Value::as_str).map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

fn as_integer(value: &Value) -> Option<i64> {
  match value {
    Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
    Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f.round() as i64),
    _ => None,
  }
}

// SQLite hands booleans back as 0/1
fn as_flag(value: &Value) -> bool {
  match value {
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
    Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"),
    _ => false,
  }
}
