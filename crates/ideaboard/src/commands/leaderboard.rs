use super::AppContext;
use crate::api::IdeaApi;
use crate::display;
use anyhow::Result;

pub async fn handle(ctx: &AppContext) -> Result<()> {
  let api = ctx.api(None)?;
  let board = api.leaderboard().await.unwrap_or_else(|err| {
    tracing::warn!(error = %err, "leaderboard unavailable, showing empty standings");
    Default::default()
  });

  bentley::announce("Top Contributors");
  display::display_leaderboard(&board);
  Ok(())
}
