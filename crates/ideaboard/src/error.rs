use thiserror::Error;

/// Failures surfaced by the review client.
///
/// The split mirrors how each kind is handled: transport failures and HTTP
/// errors come from the server boundary, validation errors never leave the
/// client.
#[derive(Error, Debug)]
pub enum ClientError {
  #[error("Network failure: {0}")]
  Network(#[from] reqwest::Error),

  #[error("{message}")]
  Http { status: u16, message: String },

  #[error("{0}")]
  Validation(String),

  #[error("Unexpected response from {endpoint}: {message}")]
  Decode { endpoint: String, message: String },

  #[error("Please log in to continue")]
  NotAuthenticated,

  #[error("Session storage failed: {0}")]
  Storage(#[from] std::io::Error),

  #[error("Invalid configuration: {0}")]
  Config(String),
}

impl ClientError {
  pub fn http(status: u16, message: impl Into<String>) -> Self {
    Self::Http { status, message: message.into() }
  }

  pub fn validation(message: impl Into<String>) -> Self {
    Self::Validation(message.into())
  }

  pub fn decode(endpoint: impl Into<String>, message: impl ToString) -> Self {
    Self::Decode { endpoint: endpoint.into(), message: message.to_string() }
  }

  /// True for a non-2xx answer from the server, as opposed to a transport failure.
  pub fn is_http(&self) -> bool {
    matches!(self, Self::Http { .. })
  }

  /// Message suitable for a user notification.
  ///
  /// Server-provided messages pass through; anything else collapses to the
  /// operation's generic fallback.
  pub fn user_message(&self, fallback: &str) -> String {
    match self {
      Self::Http { message, .. } if !message.trim().is_empty() => message.clone(),
      Self::Validation(message) => message.clone(),
      Self::NotAuthenticated => self.to_string(),
      _ => fallback.to_string(),
    }
  }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_user_message_prefers_server_text() {
    let err = ClientError::http(404, "Idea not found");
    assert_eq!(err.user_message("Failed to approve idea"), "Idea not found");
  }

  #[test]
  fn test_user_message_falls_back_for_blank_server_text() {
    let err = ClientError::http(500, "  ");
    assert_eq!(err.user_message("Failed to approve idea"), "Failed to approve idea");
  }

  #[test]
  fn test_user_message_for_decode_uses_fallback() {
    let err = ClientError::decode("/ideas/1/approve", "expected value");
    assert_eq!(err.user_message("Failed to approve idea"), "Failed to approve idea");
    assert!(!err.is_http());
  }
}
