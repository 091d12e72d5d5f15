//! Console log format
//!
//! Renders every tracing event as
//! `[ component ] [ dd/mm/YYYY HH:MM ] [ LEVEL ] message`.
//! The component is the name of the outermost span (`TakerBOT` when none is
//! entered). An `info!` event carrying `success = true` is shown as SUCCESS.

use chrono::Local;
use colored::Colorize;
use std::fmt::{self, Write as _};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Component shown for events outside any span
pub const DEFAULT_COMPONENT: &str = "TakerBOT";

/// Component of the wallet converter
pub const CONVERTER_COMPONENT: &str = "Wallet Converter";

const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Console level labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warn,
    Error,
}

impl LogLevel {
    pub fn from_event(level: &Level, success: bool) -> Self {
        match *level {
            Level::ERROR => LogLevel::Error,
            Level::WARN => LogLevel::Warn,
            _ if success => LogLevel::Success,
            _ => LogLevel::Info,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Success => "SUCCESS",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Build one console line
pub fn render_line(
    component: &str,
    timestamp: &str,
    level: LogLevel,
    message: &str,
    ansi: bool,
) -> String {
    if !ansi {
        return format!(
            "[ {} ] [ {} ] [ {} ] {}",
            component,
            timestamp,
            level.label(),
            message
        );
    }

    let level_label = match level {
        LogLevel::Info | LogLevel::Success => level.label().green(),
        LogLevel::Warn => level.label().yellow(),
        LogLevel::Error => level.label().red(),
    };

    format!(
        "{} {} {} {}",
        format!("[ {} ]", component).green(),
        format!("[ {} ]", timestamp).cyan(),
        format!("[ {} ]", level_label),
        message.white()
    )
}

/// Collects the message, the success flag and any extra fields
#[derive(Default)]
struct LineVisitor {
    message: String,
    success: bool,
    extra: String,
}

impl Visit for LineVisitor {
    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "success" {
            self.success = value;
        } else {
            let _ = write!(self.extra, " {}={}", field.name(), value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            let _ = write!(self.extra, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            let _ = write!(self.extra, " {}={:?}", field.name(), value);
        }
    }
}

/// Event formatter for `tracing_subscriber::fmt`
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleFormat;

impl<S, N> FormatEvent<S, N> for ConsoleFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let component = ctx
            .event_scope()
            .and_then(|scope| scope.from_root().next().map(|span| span.name()))
            .unwrap_or(DEFAULT_COMPONENT);

        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);

        let level = LogLevel::from_event(event.metadata().level(), visitor.success);
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let message = format!("{}{}", visitor.message, visitor.extra);
        let ansi = writer.has_ansi_escapes();

        writeln!(
            writer,
            "{}",
            render_line(component, &timestamp, level, &message, ansi)
        )
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` extends the default `taker_bot=info` directive.
pub fn init() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("taker_bot=info".parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(ConsoleFormat)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(LogLevel::from_event(&Level::INFO, false), LogLevel::Info);
        assert_eq!(LogLevel::from_event(&Level::INFO, true), LogLevel::Success);
        assert_eq!(LogLevel::from_event(&Level::WARN, true), LogLevel::Warn);
        assert_eq!(LogLevel::from_event(&Level::ERROR, false), LogLevel::Error);
        assert_eq!(LogLevel::from_event(&Level::DEBUG, false), LogLevel::Info);
    }

    #[test]
    fn test_plain_line() {
        let line = render_line(
            DEFAULT_COMPONENT,
            "16/10/2026 10:00",
            LogLevel::Success,
            "Login successful for 0xAAA",
            false,
        );
        assert_eq!(
            line,
            "[ TakerBOT ] [ 16/10/2026 10:00 ] [ SUCCESS ] Login successful for 0xAAA"
        );
    }

    #[test]
    fn test_colored_line_keeps_text() {
        colored::control::set_override(true);
        let line = render_line(
            CONVERTER_COMPONENT,
            "16/10/2026 10:00",
            LogLevel::Error,
            "boom",
            true,
        );
        assert!(line.contains("Wallet Converter"));
        assert!(line.contains("ERROR"));
        assert!(line.contains('\u{1b}'));
    }
}
