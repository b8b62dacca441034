use dnsm_core::api::{Level, Notice, Notifier};

/// Prints notices to stderr, keeping stdout for command output
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    fn prefix(level: Level) -> &'static str {
        match level {
            Level::Success => "[ok]",
            Level::Info => "[info]",
            Level::Warning => "[warn]",
            Level::Error => "[error]",
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        eprintln!("{} {}", Self::prefix(notice.level), notice.text);
    }
}
