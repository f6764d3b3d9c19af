use super::{idea_title, reported, show_refreshed, AppContext};
use crate::session::Role;
use crate::workflow::Decision;
use anyhow::Result;

pub async fn handle(ctx: &AppContext, id: String) -> Result<()> {
  let (session, api) = ctx.require_role(Role::Sdm).await?;
  let title = idea_title(api.as_ref(), &id).await;

  let mut coordinator = ctx.coordinator(api, session.role());
  let outcome = coordinator.approve(&id, title.as_deref()).await.map_err(reported)?;

  if let Decision::Approved { points_awarded: Some(points) } = &outcome.decision {
    bentley::info(&format!("Awarded {points} points for \"{}\"", outcome.idea.title));
  }
  show_refreshed(&outcome, &session);
  Ok(())
}
