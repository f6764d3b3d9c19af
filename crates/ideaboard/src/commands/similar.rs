use super::{idea_title, reported, AppContext};
use crate::display;
use crate::session::Role;
use anyhow::Result;

pub async fn handle(ctx: &AppContext, id: String) -> Result<()> {
  let (session, api) = ctx.require_role(Role::Sdm).await?;
  let title = idea_title(api.as_ref(), &id).await;

  let coordinator = ctx.coordinator(api, session.role());
  let report = coordinator.check_similarity(&id, title.as_deref()).await.map_err(reported)?;
  display::display_similarity(&report);
  Ok(())
}
