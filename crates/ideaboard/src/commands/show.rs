use super::AppContext;
use crate::api::IdeaApi;
use crate::display;
use crate::idea::Idea;
use anyhow::Result;

pub async fn handle(ctx: &AppContext, id: String) -> Result<()> {
  let (_, api) = ctx.require_session().await?;
  let raw = api.idea_detail(&id).await?;
  display::display_idea_details(&Idea::from_raw(&raw));
  Ok(())
}
