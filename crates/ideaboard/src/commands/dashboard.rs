use super::AppContext;
use crate::display;
use anyhow::Result;

pub async fn handle(ctx: &AppContext, json: bool) -> Result<()> {
  let (session, api) = ctx.require_session().await?;
  let dashboard = ctx.loader(api, session.role()).load().await;

  if json {
    println!("{}", serde_json::to_string_pretty(&dashboard)?);
  } else {
    display::display_dashboard(&dashboard, &session.user);
  }
  Ok(())
}
