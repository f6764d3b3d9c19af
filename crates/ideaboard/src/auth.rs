//! Session lifecycle: create at login/registration, restore, clear at logout

use crate::api::{AuthGrant, Credentials, IdeaApi, Registration};
use crate::error::{ClientError, Result};
use crate::session::{Session, SessionStore};

pub async fn login<A>(api: &A, store: &SessionStore, credentials: &Credentials) -> Result<Session>
where
  A: IdeaApi + ?Sized,
{
  if credentials.username.trim().is_empty() || credentials.password.is_empty() {
    return Err(ClientError::validation("Username and password are required"));
  }

  let grant = api.login(credentials).await?;
  establish(store, grant)
}

pub async fn register<A>(api: &A, store: &SessionStore, registration: &Registration) -> Result<Session>
where
  A: IdeaApi + ?Sized,
{
  let grant = api.register(registration).await?;
  establish(store, grant)
}

fn establish(store: &SessionStore, grant: AuthGrant) -> Result<Session> {
  let session = Session::new(grant.user, grant.token);
  store.save(&session)?;
  tracing::debug!(user = %session.user.id, role = %session.user.role, "session created");
  Ok(session)
}

/// Check a persisted session against the server
///
/// `api` must carry the session being verified. On success the stored user
/// details are refreshed; if the server rejects the token, or cannot be
/// reached, the session is cleared and `None` returned.
pub async fn verify<A>(api: &A, store: &SessionStore, session: Session) -> Result<Option<Session>>
where
  A: IdeaApi + ?Sized,
{
  match api.profile().await {
    Ok(user) => {
      let session = session.with_user(user);
      store.save(&session)?;
      Ok(Some(session))
    }
    Err(err) => {
      tracing::warn!(error = %err, "stored session rejected, logging out");
      store.clear()?;
      Ok(None)
    }
  }
}

pub fn logout(store: &SessionStore) -> Result<()> {
  store.clear()
}
