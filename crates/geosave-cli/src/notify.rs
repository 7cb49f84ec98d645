//! Console rendering of engine notifications.

use geosave_core::{Notifier, Severity};

/// Prints progress to stdout and failures to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

pub fn format_notification(message: &str, severity: Severity) -> String {
    match severity {
        Severity::Info => message.to_string(),
        Severity::Ok => format!("✓ {message}"),
        Severity::Alert => format!("! {message}"),
        Severity::Error => format!("✗ {message}"),
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        let line = format_notification(message, severity);
        if severity == Severity::Error {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }
}
