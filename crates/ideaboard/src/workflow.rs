//! Approve / reject / similarity review workflow
//!
//! An idea moves `pending -> approved` or `pending -> rejected` only on the
//! server. Nothing here mutates local copies: after a successful decision the
//! coordinator refreshes from the server exactly once and hands the fresh
//! data back in the [`ReviewOutcome`].

use crate::api::{IdeaApi, SimilarityMatch};
use crate::config::RefreshPolicy;
use crate::dashboard::{Dashboard, DashboardLoader};
use crate::error::{ClientError, Result};
use crate::idea::Idea;
use crate::notify::Notifier;
use std::sync::Arc;

pub const MIN_REJECTION_REASON_CHARS: usize = 5;

const DEFAULT_SUBJECT: &str = "this idea";

/// The idea a pending approve/reject action applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedIdea {
  pub id: String,
  pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
  Approved { points_awarded: Option<i64> },
  Rejected { reason: String },
}

/// Server state fetched after a decision
#[derive(Debug, Clone, PartialEq)]
pub enum Refreshed {
  Dashboard(Box<Dashboard>),
  Idea(Box<Idea>),
  /// The affected idea could not be re-fetched; the decision still stands
  Unavailable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewOutcome {
  pub idea: SelectedIdea,
  pub decision: Decision,
  pub refreshed: Refreshed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityReport {
  pub idea_id: String,
  pub title: String,
  pub matches: Vec<SimilarityMatch>,
}

/// Trimmed rejection reason, or the validation error to show
pub fn validate_rejection_reason(reason: &str) -> Result<&str> {
  let reason = reason.trim();
  if reason.is_empty() {
    return Err(ClientError::validation("Please provide a rejection reason"));
  }
  if reason.chars().count() < MIN_REJECTION_REASON_CHARS {
    return Err(ClientError::validation(format!(
      "Rejection reason must be at least {MIN_REJECTION_REASON_CHARS} characters"
    )));
  }
  Ok(reason)
}

pub struct ReviewCoordinator {
  api: Arc<dyn IdeaApi>,
  loader: DashboardLoader,
  notifier: Arc<dyn Notifier>,
  refresh_policy: RefreshPolicy,
  selected: Option<SelectedIdea>,
}

impl ReviewCoordinator {
  pub fn new(
    api: Arc<dyn IdeaApi>,
    loader: DashboardLoader,
    notifier: Arc<dyn Notifier>,
    refresh_policy: RefreshPolicy,
  ) -> Self {
    Self { api, loader, notifier, refresh_policy, selected: None }
  }

  /// Remember which idea the next confirm applies to
  pub fn select(&mut self, id: &str, title: Option<&str>) {
    let title = title.map(str::trim).filter(|t| !t.is_empty()).unwrap_or(DEFAULT_SUBJECT);
    self.selected = Some(SelectedIdea { id: id.to_string(), title: title.to_string() });
  }

  pub fn selected(&self) -> Option<&SelectedIdea> {
    self.selected.as_ref()
  }

  /// Drop the selection without acting on it
  pub fn cancel(&mut self) {
    self.selected = None;
  }

  pub async fn approve(&mut self, id: &str, title: Option<&str>) -> Result<ReviewOutcome> {
    self.select(id, title);
    self.confirm_approval().await
  }

  pub async fn reject(&mut self, id: &str, title: Option<&str>, reason: &str) -> Result<ReviewOutcome> {
    self.select(id, title);
    self.confirm_rejection(reason).await
  }

  /// Approve the selected idea
  ///
  /// The selection is cleared once the request completes, whether or not it
  /// succeeded.
  pub async fn confirm_approval(&mut self) -> Result<ReviewOutcome> {
    let selected = self.selected.clone().ok_or_else(|| ClientError::validation("No idea selected"))?;

    let result = self.api.approve(&selected.id).await;
    self.selected = None;

    match result {
      Ok(receipt) => {
        self.notifier.success("Idea approved successfully!");
        let refreshed = self.refresh(&selected.id).await;
        Ok(ReviewOutcome {
          idea: selected,
          decision: Decision::Approved { points_awarded: receipt.points_awarded },
          refreshed,
        })
      }
      Err(err) => {
        tracing::warn!(idea_id = %selected.id, error = %err, "approve failed");
        self.notifier.error(&err.user_message("Failed to approve idea"));
        Err(err)
      }
    }
  }

  /// Reject the selected idea
  ///
  /// A reason that fails validation is reported without any request being
  /// made, and the selection is kept so the reason can be corrected.
  pub async fn confirm_rejection(&mut self, reason: &str) -> Result<ReviewOutcome> {
    let selected = self.selected.clone().ok_or_else(|| ClientError::validation("No idea selected"))?;

    let reason = match validate_rejection_reason(reason) {
      Ok(reason) => reason.to_string(),
      Err(err) => {
        self.notifier.error(&err.to_string());
        return Err(err);
      }
    };

    let result = self.api.reject(&selected.id, &reason).await;
    self.selected = None;

    match result {
      Ok(()) => {
        self.notifier.success("Idea rejected successfully!");
        let refreshed = self.refresh(&selected.id).await;
        Ok(ReviewOutcome { idea: selected, decision: Decision::Rejected { reason }, refreshed })
      }
      Err(err) => {
        tracing::warn!(idea_id = %selected.id, error = %err, "reject failed");
        self.notifier.error(&err.user_message("Failed to reject idea"));
        Err(err)
      }
    }
  }

  /// Read-only lookup of ideas resembling `id`
  pub async fn check_similarity(&self, id: &str, title: Option<&str>) -> Result<SimilarityReport> {
    let title = title.map(str::trim).filter(|t| !t.is_empty()).unwrap_or(DEFAULT_SUBJECT).to_string();

    match self.api.similar_ideas(id).await {
      Ok(matches) => Ok(SimilarityReport { idea_id: id.to_string(), title, matches }),
      Err(err) => {
        tracing::warn!(idea_id = %id, error = %err, "similarity check failed");
        self.notifier.error("Failed to check similarity");
        Err(err)
      }
    }
  }

  async fn refresh(&self, id: &str) -> Refreshed {
    match self.refresh_policy {
      RefreshPolicy::FullReload => Refreshed::Dashboard(Box::new(self.loader.load().await)),
      RefreshPolicy::AffectedIdea => match self.api.idea_detail(id).await {
        Ok(raw) => Refreshed::Idea(Box::new(Idea::from_raw(&raw))),
        Err(err) => {
          tracing::warn!(idea_id = %id, error = %err, "could not re-fetch reviewed idea");
          Refreshed::Unavailable
        }
      },
    }
  }
}
