use crate::config;
use crate::error::{ClientError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
  #[serde(rename = "Service Engineer")]
  ServiceEngineer,
  #[serde(rename = "SDM")]
  Sdm,
}

impl Role {
  pub fn as_str(&self) -> &'static str {
    match self {
      Role::ServiceEngineer => "Service Engineer",
      Role::Sdm => "SDM",
    }
  }
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
  pub id: String,
  pub display_name: String,
  pub role: Role,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub username: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub email: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub avatar_data: Option<String>,
}

/// The logged-in user and their bearer token
///
/// Read-only once created: login replaces it wholesale and logout drops it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
  pub user: User,
  pub token: String,
  pub created_at: DateTime<Utc>,
}

impl Session {
  pub fn new(user: User, token: String) -> Self {
    Self { user, token, created_at: Utc::now() }
  }

  pub fn role(&self) -> Role {
    self.user.role
  }

  /// Same token, refreshed user details
  pub fn with_user(&self, user: User) -> Self {
    Self { user, token: self.token.clone(), created_at: self.created_at }
  }
}

/// Persists the session between invocations
pub struct SessionStore {
  session_dir: PathBuf,
}

impl SessionStore {
  pub fn new() -> Self {
    Self::at(config::data_dir())
  }

  pub fn at(session_dir: impl Into<PathBuf>) -> Self {
    Self { session_dir: session_dir.into() }
  }

  pub fn path(&self) -> PathBuf {
    self.session_dir.join(SESSION_FILE)
  }

  pub fn session_exists(&self) -> bool {
    self.path().exists()
  }

  pub fn save(&self, session: &Session) -> Result<()> {
    fs::create_dir_all(&self.session_dir)?;
    let json = serde_json::to_string_pretty(session)
      .map_err(|e| ClientError::decode(SESSION_FILE, e))?;
    fs::write(self.path(), json)?;
    restrict_permissions(&self.path())?;
    Ok(())
  }

  /// Load the persisted session
  ///
  /// A file that no longer parses is treated as no session and removed, so a
  /// format change never locks the user out.
  pub fn load(&self) -> Result<Option<Session>> {
    let session_file = self.path();
    if !session_file.exists() {
      return Ok(None);
    }

    let json = fs::read_to_string(&session_file)?;
    match serde_json::from_str::<Session>(&json) {
      Ok(session) => Ok(Some(session)),
      Err(e) => {
        tracing::warn!(path = %session_file.display(), error = %e, "discarding unreadable session");
        self.clear()?;
        Ok(None)
      }
    }
  }

  pub fn clear(&self) -> Result<()> {
    let session_file = self.path();
    if session_file.exists() {
      fs::remove_file(session_file)?;
    }
    Ok(())
  }
}

impl Default for SessionStore {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
  use std::os::unix::fs::PermissionsExt;
  let mut perms = fs::metadata(path)?.permissions();
  perms.set_mode(0o600);
  fs::set_permissions(path, perms)?;
  Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;
  use tempfile::TempDir;

  fn sample_user(role: Role) -> User {
    User {
      id: "u-1".to_string(),
      display_name: "Dana Reviewer".to_string(),
      role,
      username: Some("dana".to_string()),
      email: None,
      avatar_data: None,
    }
  }

  #[test]
  fn test_role_wire_names() {
    assert_eq!(serde_json::to_value(Role::ServiceEngineer).unwrap(), json!("Service Engineer"));
    assert_eq!(serde_json::from_value::<Role>(json!("SDM")).unwrap(), Role::Sdm);
    assert!(serde_json::from_value::<Role>(json!("Admin")).is_err());
  }

  #[test]
  fn test_save_load_clear_lifecycle() {
    let temp_dir = TempDir::new().unwrap();
    let store = SessionStore::at(temp_dir.path().join("nested"));
    assert!(store.load().unwrap().is_none());

    let session = Session::new(sample_user(Role::Sdm), "token-abc".to_string());
    store.save(&session).unwrap();
    assert!(store.session_exists());
    assert_eq!(store.load().unwrap(), Some(session));

    store.clear().unwrap();
    assert!(!store.session_exists());
    assert!(store.load().unwrap().is_none());
  }

  #[test]
  fn test_corrupt_session_is_discarded() {
    let temp_dir = TempDir::new().unwrap();
    let store = SessionStore::at(temp_dir.path());
    fs::write(store.path(), "{not json").unwrap();

    assert!(store.load().unwrap().is_none());
    assert!(!store.session_exists());
  }

  #[test]
  fn test_with_user_keeps_token() {
    let session = Session::new(sample_user(Role::ServiceEngineer), "t".to_string());
    let mut renamed = sample_user(Role::ServiceEngineer);
    renamed.display_name = "Renamed".to_string();

    let refreshed = session.with_user(renamed);
    assert_eq!(refreshed.token, "t");
    assert_eq!(refreshed.user.display_name, "Renamed");
  }
}
