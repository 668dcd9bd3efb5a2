use crate::core::workspace::NotificationSink;

/// Prints notices to stderr, the terminal's version of a toast.
pub struct ConsoleNotices;

impl NotificationSink for ConsoleNotices {
    fn notice(&self, message: &str) {
        tracing::debug!(notice = message, "Showing notice");
        eprintln!("{}", message);
    }
}
