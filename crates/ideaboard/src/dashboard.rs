//! Role-specific dashboard assembly
//!
//! Engineers see their own submissions; SDMs see the pending worklist next to
//! everything already approved. Both views go through the same enrichment
//! pass before the statistics are derived.

use crate::api::IdeaApi;
use crate::config::ClientConfig;
use crate::enrich::enrich_all;
use crate::error::Result;
use crate::idea::{Idea, RawIdea};
use crate::notify::Notifier;
use crate::session::Role;
use crate::stats::{EngineerStats, SdmStats};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Everything one role's dashboard shows, freshly fetched
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Dashboard {
  Engineer { ideas: Vec<Idea>, stats: EngineerStats },
  Sdm { worklist: Vec<Idea>, approved: Vec<Idea>, stats: SdmStats },
}

impl Dashboard {
  pub fn role(&self) -> Role {
    match self {
      Dashboard::Engineer { .. } => Role::ServiceEngineer,
      Dashboard::Sdm { .. } => Role::Sdm,
    }
  }

  pub fn ideas(&self) -> impl Iterator<Item = &Idea> {
    let none: &[Idea] = &[];
    let (first, second) = match self {
      Dashboard::Engineer { ideas, .. } => (ideas.as_slice(), none),
      Dashboard::Sdm { worklist, approved, .. } => (worklist.as_slice(), approved.as_slice()),
    };
    first.iter().chain(second.iter())
  }

  pub fn find(&self, id: &str) -> Option<&Idea> {
    self.ideas().find(|idea| idea.id.as_deref() == Some(id))
  }
}

/// Fetches and assembles the dashboard for one role
///
/// Never fails: a list that cannot be fetched is shown as empty.
pub struct DashboardLoader {
  api: Arc<dyn IdeaApi>,
  notifier: Arc<dyn Notifier>,
  role: Role,
  enrich_limit: usize,
}

impl DashboardLoader {
  pub fn new(api: Arc<dyn IdeaApi>, notifier: Arc<dyn Notifier>, role: Role, enrich_limit: usize) -> Self {
    Self { api, notifier, role, enrich_limit: enrich_limit.max(1) }
  }

  pub fn from_config(
    api: Arc<dyn IdeaApi>,
    notifier: Arc<dyn Notifier>,
    role: Role,
    config: &ClientConfig,
  ) -> Self {
    Self::new(api, notifier, role, config.enrich_concurrency)
  }

  pub fn role(&self) -> Role {
    self.role
  }

  pub async fn load(&self) -> Dashboard {
    tracing::debug!(role = %self.role, "loading dashboard");
    match self.role {
      Role::ServiceEngineer => self.load_engineer().await,
      Role::Sdm => self.load_sdm().await,
    }
  }

  async fn load_engineer(&self) -> Dashboard {
    let raw = match self.api.my_ideas().await {
      Ok(ideas) => ideas,
      Err(err) => {
        tracing::warn!(error = %err, "failed to load engineer ideas");
        self.notifier.error(&err.user_message("Failed to load dashboard data"));
        Vec::new()
      }
    };

    let ideas = self.canonical(raw).await;
    let stats = EngineerStats::from_ideas(&ideas);
    Dashboard::Engineer { ideas, stats }
  }

  async fn load_sdm(&self) -> Dashboard {
    let (worklist, approved) = tokio::join!(self.api.worklist(), self.api.approved_ideas());
    let worklist = or_empty(worklist, "worklist");
    let approved = or_empty(approved, "approved ideas");

    let approved: Vec<RawIdea> = approved.into_iter().map(mark_approved).collect();

    // One enrichment stream so the limit covers both lists together
    let pending_len = worklist.len();
    let combined = worklist.into_iter().chain(approved).collect();
    let mut worklist = enrich_all(self.api.as_ref(), combined, self.enrich_limit).await;
    let approved = worklist.split_off(pending_len);

    let worklist: Vec<Idea> = worklist.iter().map(Idea::from_raw).collect();
    let approved: Vec<Idea> =
      approved.into_iter().map(mark_approved).map(|raw| Idea::from_raw(&raw)).collect();
    let stats = SdmStats::from_lists(&worklist, &approved);
    Dashboard::Sdm { worklist, approved, stats }
  }

  async fn canonical(&self, raw: Vec<RawIdea>) -> Vec<Idea> {
    enrich_all(self.api.as_ref(), raw, self.enrich_limit).await.iter().map(Idea::from_raw).collect()
  }
}

/// Entries of the approved list are approved whatever their record says
fn mark_approved(mut raw: RawIdea) -> RawIdea {
  raw.insert("status".to_string(), Value::String("approved".to_string()));
  raw
}

fn or_empty(result: Result<Vec<RawIdea>>, list: &str) -> Vec<RawIdea> {
  result.unwrap_or_else(|err| {
    tracing::warn!(list, error = %err, "failed to load list, showing it empty");
    Vec::new()
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::MockIdeaApi;
  use crate::error::ClientError;
  use crate::idea::IdeaStatus;
  use crate::notify::NotificationLevel;
  use serde_json::json;
  use std::sync::Mutex;

  #[derive(Default)]
  struct Collected(Mutex<Vec<(NotificationLevel, String)>>);

  impl Notifier for Collected {
    fn notify(&self, level: NotificationLevel, message: &str) {
      self.0.lock().unwrap().push((level, message.to_string()));
    }
  }

  fn raw(value: serde_json::Value) -> RawIdea {
    value.as_object().cloned().unwrap()
  }

  #[tokio::test]
  async fn test_engineer_dashboard_uses_only_my_ideas() {
    let mut api = MockIdeaApi::new();
    api.expect_my_ideas().times(1).returning(|| {
      Ok(vec![
        raw(json!({"id": "1", "status": "pending", "description": "a"})),
        raw(json!({"id": "2", "status": "rejected", "description": "b", "rejection_reason": "dup"})),
      ])
    });
    api.expect_worklist().times(0);
    api.expect_approved_ideas().times(0);

    let loader = DashboardLoader::new(Arc::new(api), Arc::new(Collected::default()), Role::ServiceEngineer, 4);
    match loader.load().await {
      Dashboard::Engineer { ideas, stats } => {
        assert_eq!(ideas.len(), 2);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.rejected, 1);
      }
      other => panic!("unexpected dashboard: {other:?}"),
    }
  }

  #[tokio::test]
  async fn test_engineer_failure_notifies_and_shows_empty() {
    let mut api = MockIdeaApi::new();
    api.expect_my_ideas().times(1).returning(|| Err(ClientError::http(403, "Insufficient permissions")));

    let notifier = Arc::new(Collected::default());
    let loader = DashboardLoader::new(Arc::new(api), notifier.clone(), Role::ServiceEngineer, 4);
    let dashboard = loader.load().await;

    assert_eq!(dashboard, Dashboard::Engineer { ideas: vec![], stats: EngineerStats::default() });
    let notes = notifier.0.lock().unwrap();
    assert_eq!(notes.as_slice(), &[(NotificationLevel::Error, "Insufficient permissions".to_string())]);
  }

  #[tokio::test]
  async fn test_sdm_list_failures_are_independent() {
    let mut api = MockIdeaApi::new();
    api.expect_worklist().times(1).returning(|| Err(ClientError::http(500, "worklist down")));
    api.expect_approved_ideas().times(1).returning(|| {
      Ok(vec![raw(json!({"id": "a", "status": "approved", "points": 20, "description": "kept"}))])
    });
    api.expect_idea_detail().returning(|_| Err(ClientError::http(404, "gone")));

    let loader = DashboardLoader::new(Arc::new(api), Arc::new(Collected::default()), Role::Sdm, 2);
    match loader.load().await {
      Dashboard::Sdm { worklist, approved, stats } => {
        assert!(worklist.is_empty());
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].description, "kept");
        assert_eq!(stats, SdmStats { pending_count: 0, approved_count: 1, total_points: 20, avg_points: 20 });
      }
      other => panic!("unexpected dashboard: {other:?}"),
    }
  }

  #[tokio::test]
  async fn test_approved_list_membership_decides_points() {
    let mut api = MockIdeaApi::new();
    api.expect_worklist().times(1).returning(|| Ok(vec![]));
    api.expect_approved_ideas().times(1).returning(|| {
      Ok(vec![
        raw(json!({"id": "a", "points": 10, "description": "no status"})),
        raw(json!({"id": "b", "status": "approved", "points": 20, "description": "tagged"})),
        raw(json!({"id": "c", "status": "approved", "points": 30})),
      ])
    });
    api.expect_idea_detail().returning(|id| match id {
      "c" => Ok(raw(json!({"id": "c", "status": "pending", "description": "stale detail"}))),
      _ => Err(ClientError::http(404, "gone")),
    });

    let loader = DashboardLoader::new(Arc::new(api), Arc::new(Collected::default()), Role::Sdm, 2);
    match loader.load().await {
      Dashboard::Sdm { approved, stats, .. } => {
        assert!(approved.iter().all(|idea| idea.state.status() == IdeaStatus::Approved));
        assert_eq!(approved[2].description, "stale detail");
        assert_eq!(stats, SdmStats { pending_count: 0, approved_count: 3, total_points: 60, avg_points: 20 });
      }
      other => panic!("unexpected dashboard: {other:?}"),
    }
  }

  #[test]
  fn test_find_searches_both_sdm_lists() {
    let dashboard = Dashboard::Sdm {
      worklist: vec![Idea::from_raw(&raw(json!({"id": "w1"})))],
      approved: vec![Idea::from_raw(&raw(json!({"id": "a1", "status": "approved"})))],
      stats: SdmStats::default(),
    };
    assert!(dashboard.find("a1").is_some());
    assert!(dashboard.find("w1").is_some());
    assert!(dashboard.find("zz").is_none());
    assert_eq!(dashboard.role(), Role::Sdm);
  }
}
