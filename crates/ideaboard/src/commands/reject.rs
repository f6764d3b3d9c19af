use super::{idea_title, reported, show_refreshed, AppContext};
use crate::session::Role;
use crate::workflow::validate_rejection_reason;
use anyhow::Result;

pub async fn handle(ctx: &AppContext, id: String, reason: String) -> Result<()> {
  // A bad reason is reported before any session lookup or request
  if let Err(err) = validate_rejection_reason(&reason) {
    ctx.notifier.error(&err.to_string());
    return Err(reported(err));
  }

  let (session, api) = ctx.require_role(Role::Sdm).await?;
  let title = idea_title(api.as_ref(), &id).await;

  let mut coordinator = ctx.coordinator(api, session.role());
  let outcome = coordinator.reject(&id, title.as_deref(), &reason).await.map_err(reported)?;

  bentley::info(&format!("Rejected \"{}\"", outcome.idea.title));
  show_refreshed(&outcome, &session);
  Ok(())
}
