//! User-facing outcome notices.
//!
//! Every export flow reports exactly one outcome through this seam.

use std::io::{self, Write};

use colored::Colorize;

/// Outcome reporting for export flows.
///
/// Delivery is best-effort and must never fail the flow; implementations
/// degrade to the log when they cannot display a notice.
pub trait Notifier: Send + Sync {
    /// Show one outcome notice.
    fn notify(&self, title: &str, message: &str, is_error: bool);
}

/// Notifier printing colored status lines to the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

fn write_notice(
    out: &mut dyn Write,
    title: &str,
    message: &str,
    is_error: bool,
) -> io::Result<()> {
    if is_error {
        writeln!(out, "{} {} {}", "✗".red().bold(), format!("[{title}]").red(), message)
    } else {
        writeln!(out, "{} {} {}", "✓".green().bold(), format!("[{title}]").bold(), message)
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, title: &str, message: &str, is_error: bool) {
        tracing::debug!("Notification [{}]: {}", title, message);
        // A closed stream must not fail the flow; the log line above is
        // the surviving record.
        let _ = if is_error {
            write_notice(&mut io::stderr(), title, message, true)
        } else {
            write_notice(&mut io::stdout(), title, message, false)
        };
    }
}
