//! User-facing notifications
//!
//! Workflow results are reported through a [`Notifier`] rather than printed
//! directly, so the same coordinator can run under the CLI or under test.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
  Success,
  Info,
  Error,
}

pub trait Notifier: Send + Sync {
  fn notify(&self, level: NotificationLevel, message: &str);

  fn success(&self, message: &str) {
    self.notify(NotificationLevel::Success, message);
  }

  fn info(&self, message: &str) {
    self.notify(NotificationLevel::Info, message);
  }

  fn error(&self, message: &str) {
    self.notify(NotificationLevel::Error, message);
  }
}

/// Prints notifications through bentley
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
  fn notify(&self, level: NotificationLevel, message: &str) {
    match level {
      NotificationLevel::Success => bentley::success(message),
      NotificationLevel::Info => bentley::info(message),
      NotificationLevel::Error => bentley::error(message),
    }
  }
}
