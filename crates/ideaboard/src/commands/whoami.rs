use super::AppContext;
use anyhow::Result;

pub async fn handle(ctx: &AppContext) -> Result<()> {
  let (session, _) = ctx.require_session().await?;
  let user = &session.user;

  println!("{} ({})", user.display_name, user.role);
  if let Some(username) = &user.username {
    println!("Username: {username}");
  }
  if let Some(email) = &user.email {
    println!("Email: {email}");
  }
  println!("Signed in: {}", session.created_at.format("%Y-%m-%d %H:%M UTC"));
  Ok(())
}
