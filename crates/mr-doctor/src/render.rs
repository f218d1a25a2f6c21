use mr_doctor_core::Notice;
use mr_doctor_core::triage::{Alert, Severity};
use owo_colors::OwoColorize;

const BAR_CHAR: &str = "▎";

/// Formats an alert as a single terminal line, colored by severity.
pub fn severity_badge(alert: &Alert) -> String {
    let text = format!("{} {}", alert.title, alert.description);
    match alert.severity {
        Severity::Emergency => {
            format!("{}{}", BAR_CHAR.bright_red(), text.bright_red().bold())
        }
        Severity::Warning => {
            format!("{}{}", BAR_CHAR.bright_yellow(), text.bright_yellow())
        }
        Severity::Info => {
            format!("{}{}", BAR_CHAR.bright_blue(), text.bright_blue())
        }
        Severity::Safe => {
            format!("{}{}", BAR_CHAR.bright_green(), text.bright_green())
        }
    }
}

/// Formats a notice as a single dimmed terminal line.
pub fn notice_line(notice: &Notice) -> String {
    format!("{}{}", BAR_CHAR.yellow(), notice.message.yellow().dimmed())
}
