use super::{reported, AppContext};
use crate::api::Credentials;
use crate::auth;
use anyhow::Result;

pub async fn handle(ctx: &AppContext, username: String, password: String) -> Result<()> {
  let api = ctx.api(None)?;
  let credentials = Credentials { username, password };

  match auth::login(api.as_ref(), &ctx.store, &credentials).await {
    Ok(session) => {
      bentley::success(&format!("Logged in as {} ({})", session.user.display_name, session.role()));
      bentley::info("Use 'ideaboard dashboard' to see your ideas");
      Ok(())
    }
    Err(err) => {
      ctx.notifier.error(&err.user_message("Login failed"));
      Err(reported(err))
    }
  }
}
