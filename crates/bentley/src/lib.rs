//! Status-line output for the ideaboard CLI
//!
//! Every line goes to stderr with a short colored level prefix, so command
//! output on stdout stays pipeable. `verbose()` and `debug()` lines only appear
//! once [`set_verbose`] has been switched on.
//!
//! Each line is also emitted as a `tracing` event with target `bentley`, so a
//! subscriber sees the same messages the terminal does.

use colored::*;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Show or hide `verbose()` and `debug()` lines
pub fn set_verbose(enabled: bool) {
  VERBOSE.store(enabled, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
  VERBOSE.load(Ordering::Relaxed)
}

/// Core logging function that handles the actual output
pub fn log(message: &str) {
  for line in message.lines() {
    eprintln!("{line}");
  }
}

fn format_prefix(color: Color, prefix: &str) -> String {
  format!("[{}]{:<width$}", prefix.color(color).bold(), "", width = 7 - prefix.len() - 2)
}

/// Prefix every line of `message`
pub fn prefixed(color: Color, prefix: &str, message: &str) -> Vec<String> {
  let prefix = format_prefix(color, prefix);
  message.lines().map(|line| format!("{prefix} {line}")).collect()
}

fn emit(color: Color, prefix: &str, message: &str) {
  match prefix {
    "error" => tracing::error!(target: "bentley", "{message}"),
    "warn" => tracing::warn!(target: "bentley", "{message}"),
    "debug" | "verb" => tracing::debug!(target: "bentley", "{message}"),
    _ => tracing::info!(target: "bentley", "{message}"),
  }

  for line in prefixed(color, prefix, message) {
    log(&line);
  }
}

/// Create a banner line of the specified length and character
pub fn banner_line(length: usize, char: char) -> String {
  char.to_string().repeat(length)
}

/// Display a message with a banner around it
pub fn as_banner<F>(log_fn: F, message: &str, width: Option<usize>, border_char: Option<char>)
where
  F: Fn(&str),
{
  let width = width.unwrap_or(50);
  let border_char = border_char.unwrap_or('=');

  let banner = banner_line(width, border_char);

  log_fn(&banner);
  log_fn(message);
  log_fn(&banner);
}

pub fn verbose(message: &str) {
  if is_verbose() {
    emit(Color::Cyan, "verb", message);
  }
}

/// Info level logging - general information
pub fn info(message: &str) {
  emit(Color::Blue, "info", message);
}

/// Warning level logging - something needs attention
pub fn warn(message: &str) {
  emit(Color::Yellow, "warn", message);
}

/// Error level logging - something went wrong
pub fn error(message: &str) {
  emit(Color::Red, "error", message);
}

pub fn debug(message: &str) {
  if is_verbose() {
    emit(Color::Magenta, "debug", message);
  }
}

/// Success level logging - something completed successfully
pub fn success(message: &str) {
  emit(Color::Green, "sccs", message);
}

/// Section heading
pub fn announce(message: &str) {
  as_banner(|msg| log(&msg.blue().bold().to_string()), message, Some(50), Some('-'));
}

/// Coverage-excluded call site for `verbose()`
#[macro_export]
macro_rules! verbose {
  ($msg:expr) => {
    $crate::verbose($msg); // LCOV_EXCL_LINE
  };
}
