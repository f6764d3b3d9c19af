use super::AppContext;
use crate::api::IdeaApi;
use crate::display;
use anyhow::Result;

pub async fn handle(ctx: &AppContext) -> Result<()> {
  let (_, api) = ctx.require_session().await?;
  let sdms = api.sdms().await?;
  display::display_sdms(&sdms);
  Ok(())
}
