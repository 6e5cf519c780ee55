//! Desktop notifications for error alerts
//!
//! Only errors and conflict warnings are surfaced to avoid being noisy.

use notify_rust::{Notification, Timeout};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::warn;

/// Global flag to enable/disable notifications
static NOTIFICATIONS_ENABLED: AtomicBool = AtomicBool::new(false);

/// Initialize notifications with the enabled setting
pub fn init(enabled: bool) {
    NOTIFICATIONS_ENABLED.store(enabled, Ordering::SeqCst);
}

/// Check if notifications are enabled
pub fn is_enabled() -> bool {
    NOTIFICATIONS_ENABLED.load(Ordering::SeqCst)
}

/// Notification severity level
#[derive(Debug, Clone, Copy)]
pub enum NotificationKind {
    /// A rename sequence failed partway through
    RenameError,
    /// Watch folder issue
    WatchError,
    /// A template was requested for a file that already has content
    ContentConflict,
}

impl NotificationKind {
    fn icon(&self) -> &'static str {
        match self {
            NotificationKind::RenameError => "dialog-error",
            NotificationKind::WatchError => "dialog-warning",
            NotificationKind::ContentConflict => "dialog-warning",
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            NotificationKind::RenameError => "Rename Error",
            NotificationKind::WatchError => "Watch Error",
            NotificationKind::ContentConflict => "Existing Content",
        }
    }
}

/// Send a notification if enabled
///
/// This is fire-and-forget - errors are logged but don't propagate.
pub fn notify(kind: NotificationKind, message: &str) {
    if !is_enabled() {
        return;
    }

    let result = Notification::new()
        .appname("Renote")
        .summary(&format!("Renote: {}", kind.prefix()))
        .body(message)
        .icon(kind.icon())
        .timeout(Timeout::Milliseconds(5000))
        .show();

    if let Err(e) = result {
        warn!("Failed to send notification: {}", e);
    }
}

/// Convenience function for rename errors
pub fn notify_rename_error(file: &str, error: &str) {
    notify(
        NotificationKind::RenameError,
        &format!("Renaming '{}' failed: {}", file, error),
    );
}

/// Convenience function for watch errors
pub fn notify_watch_error(path: &str, error: &str) {
    notify(
        NotificationKind::WatchError,
        &format!("Watch '{}': {}", path, error),
    );
}

/// Convenience function for content conflicts
pub fn notify_content_conflict(path: &str) {
    notify(
        NotificationKind::ContentConflict,
        &format!("{} already has content. Not overwriting it.", path),
    );
}
