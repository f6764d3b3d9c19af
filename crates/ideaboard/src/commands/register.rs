use super::{reported, AppContext};
use crate::api::Registration;
use crate::auth;
use crate::session::Role;
use anyhow::{anyhow, Result};

pub struct RegisterArgs {
  pub username: String,
  pub display_name: String,
  pub email: String,
  pub password: String,
  pub sdm: bool,
}

pub async fn handle(ctx: &AppContext, args: RegisterArgs) -> Result<()> {
  if args.username.trim().is_empty() || args.display_name.trim().is_empty() {
    return Err(anyhow!("Username and display name are required"));
  }
  if !args.email.contains('@') {
    return Err(anyhow!("Please provide a valid email address"));
  }

  let role = if args.sdm { Role::Sdm } else { Role::ServiceEngineer };
  let registration = Registration {
    username: args.username.trim().to_string(),
    display_name: args.display_name.trim().to_string(),
    email: args.email.trim().to_string(),
    password: args.password,
    role,
  };

  let api = ctx.api(None)?;
  match auth::register(api.as_ref(), &ctx.store, &registration).await {
    Ok(session) => {
      bentley::success(&format!("Welcome {}! Registered as {}", session.user.display_name, role));
      Ok(())
    }
    Err(err) => {
      ctx.notifier.error(&err.user_message("Registration failed"));
      Err(reported(err))
    }
  }
}
