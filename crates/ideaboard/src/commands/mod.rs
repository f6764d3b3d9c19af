pub mod approve;
pub mod dashboard;
pub mod leaderboard;
pub mod login;
pub mod logout;
pub mod register;
pub mod reject;
pub mod sdms;
pub mod show;
pub mod similar;
pub mod submit;
pub mod whoami;

use crate::api::{HttpIdeaApi, IdeaApi};
use crate::auth;
use crate::config::ClientConfig;
use crate::dashboard::DashboardLoader;
use crate::display;
use crate::error::ClientError;
use crate::idea::Idea;
use crate::notify::{Notifier, TerminalNotifier};
use crate::session::{Role, Session, SessionStore};
use crate::workflow::{Refreshed, ReviewCoordinator, ReviewOutcome};
use anyhow::{anyhow, Result};
use std::sync::Arc;

/// A failure the notifier has already shown to the user
///
/// `main` exits non-zero on this without printing it a second time.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Reported(#[from] pub ClientError);

pub fn reported(err: ClientError) -> anyhow::Error {
  Reported(err).into()
}

/// Shared state every subcommand starts from
pub struct AppContext {
  pub config: ClientConfig,
  pub store: SessionStore,
  pub notifier: Arc<dyn Notifier>,
}

impl AppContext {
  pub fn new(config: ClientConfig) -> Result<Self> {
    Self::with_store(config, SessionStore::new())
  }

  pub fn with_store(config: ClientConfig, store: SessionStore) -> Result<Self> {
    let config = config.validated()?;
    Ok(Self { config, store, notifier: Arc::new(TerminalNotifier) })
  }

  pub fn api(&self, session: Option<Session>) -> Result<Arc<HttpIdeaApi>> {
    Ok(Arc::new(HttpIdeaApi::new(&self.config, session)?))
  }

  /// Restore the saved session and confirm the server still accepts it
  pub async fn require_session(&self) -> Result<(Session, Arc<HttpIdeaApi>)> {
    let session = self
      .store
      .load()?
      .ok_or_else(|| anyhow!("Not logged in. Use 'ideaboard login' first."))?;

    let api = self.api(Some(session.clone()))?;
    let session = auth::verify(api.as_ref(), &self.store, session)
      .await?
      .ok_or_else(|| anyhow!("Session expired. Use 'ideaboard login' to sign in again."))?;

    Ok((session.clone(), Arc::new(api.with_session(Some(session)))))
  }

  pub async fn require_role(&self, role: Role) -> Result<(Session, Arc<HttpIdeaApi>)> {
    let (session, api) = self.require_session().await?;
    if session.role() != role {
      return Err(anyhow!("This command is only available to {} accounts", role));
    }
    Ok((session, api))
  }

  pub fn loader(&self, api: Arc<dyn IdeaApi>, role: Role) -> DashboardLoader {
    DashboardLoader::from_config(api, self.notifier.clone(), role, &self.config)
  }

  pub fn coordinator(&self, api: Arc<dyn IdeaApi>, role: Role) -> ReviewCoordinator {
    let loader = self.loader(api.clone(), role);
    ReviewCoordinator::new(api, loader, self.notifier.clone(), self.config.refresh_policy)
  }
}

/// Best-effort title lookup so confirmations can name the idea
pub(crate) async fn idea_title(api: &dyn IdeaApi, id: &str) -> Option<String> {
  match api.idea_detail(id).await {
    Ok(raw) => Some(Idea::from_raw(&raw).title),
    Err(err) => {
      tracing::debug!(idea_id = %id, error = %err, "title lookup failed");
      None
    }
  }
}

pub(crate) fn show_refreshed(outcome: &ReviewOutcome, session: &Session) {
  match &outcome.refreshed {
    Refreshed::Dashboard(dashboard) => display::display_dashboard(dashboard, &session.user),
    Refreshed::Idea(idea) => display::display_idea_details(idea),
    Refreshed::Unavailable => {
      bentley::warn("Could not refresh the reviewed idea; run 'ideaboard dashboard' to see it")
    }
  }
}
