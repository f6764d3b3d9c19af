use super::AppContext;
use crate::auth;
use anyhow::Result;

pub async fn handle(ctx: &AppContext) -> Result<()> {
  if !ctx.store.session_exists() {
    bentley::info("Not logged in");
    return Ok(());
  }

  auth::logout(&ctx.store)?;
  bentley::success("Logged out");
  Ok(())
}
