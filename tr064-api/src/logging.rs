//! Subscriber setup for programs built on the TR-064 crates
//!
//! The library crates only emit `tracing` events: one per SOAP exchange and
//! descriptor fetch at debug level, connects at info, name collisions at
//! warn. Programs that don't install their own subscriber can use
//! [`init_logging`].

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Crates whose events the default filters let through
const WORKSPACE_TARGETS: [&str; 3] = ["soap_client", "tr064_descriptor", "tr064_api"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingMode {
    /// Install nothing
    Silent,
    /// Compact lines, workspace events from info up
    Development,
    /// Source locations and every SOAP exchange
    Debug,
    /// One JSON object per event, for log collectors
    Json,
}

impl LoggingMode {
    fn default_level(self) -> Option<&'static str> {
        match self {
            LoggingMode::Silent => None,
            LoggingMode::Development | LoggingMode::Json => Some("info"),
            LoggingMode::Debug => Some("debug"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),
}

/// Install a global subscriber for `mode`
///
/// The filter comes from `TR064_LOG_LEVEL`, then `RUST_LOG`, then the mode's
/// default: other crates at warn, the workspace crates at the mode's level.
pub fn init_logging(mode: LoggingMode) -> Result<(), LoggingError> {
    init_with_lookup(mode, |key| std::env::var(key).ok())
}

/// Install a subscriber for the mode named by `TR064_LOG_MODE`
/// ("development", "debug" or "json"); anything else stays silent.
pub fn init_logging_from_env() -> Result<(), LoggingError> {
    let lookup = |key: &str| std::env::var(key).ok();
    init_with_lookup(mode_from_lookup(lookup), lookup)
}

fn init_with_lookup(
    mode: LoggingMode,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), LoggingError> {
    let Some(directives) = filter_directives(mode, lookup) else {
        return Ok(());
    };
    let filter = EnvFilter::new(directives);

    let result = match mode {
        LoggingMode::Silent => return Ok(()),
        LoggingMode::Development => Registry::default()
            .with(fmt::layer().with_target(false).compact())
            .with(filter)
            .try_init(),
        LoggingMode::Debug => Registry::default()
            .with(
                fmt::layer()
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init(),
        LoggingMode::Json => Registry::default()
            .with(fmt::layer().json().with_current_span(false))
            .with(filter)
            .try_init(),
    };

    result.map_err(|e| LoggingError::TracingInit(e.to_string()))
}

fn mode_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> LoggingMode {
    match lookup("TR064_LOG_MODE").as_deref().map(str::trim) {
        Some("development") => LoggingMode::Development,
        Some("debug") => LoggingMode::Debug,
        Some("json") => LoggingMode::Json,
        _ => LoggingMode::Silent,
    }
}

/// Filter directives for `mode`, or `None` when nothing is installed
fn filter_directives(mode: LoggingMode, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    let level = mode.default_level()?;

    let configured = lookup("TR064_LOG_LEVEL")
        .or_else(|| lookup("RUST_LOG"))
        .filter(|directives| !directives.trim().is_empty());

    Some(configured.unwrap_or_else(|| {
        let targets: Vec<String> = WORKSPACE_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, level))
            .collect();
        format!("warn,{}", targets.join(","))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_silent_mode_installs_nothing() {
        assert!(init_logging(LoggingMode::Silent).is_ok());
        assert_eq!(filter_directives(LoggingMode::Silent, lookup(&[("TR064_LOG_LEVEL", "trace")])), None);
    }

    #[rstest]
    #[case(LoggingMode::Development, "warn,soap_client=info,tr064_descriptor=info,tr064_api=info")]
    #[case(LoggingMode::Json, "warn,soap_client=info,tr064_descriptor=info,tr064_api=info")]
    #[case(LoggingMode::Debug, "warn,soap_client=debug,tr064_descriptor=debug,tr064_api=debug")]
    fn test_default_filter_targets_workspace(#[case] mode: LoggingMode, #[case] expected: &str) {
        assert_eq!(filter_directives(mode, lookup(&[])).as_deref(), Some(expected));
    }

    #[test]
    fn test_filter_precedence() {
        let both = lookup(&[("TR064_LOG_LEVEL", "soap_client=trace"), ("RUST_LOG", "debug")]);
        assert_eq!(
            filter_directives(LoggingMode::Development, both).as_deref(),
            Some("soap_client=trace")
        );

        let rust_log = lookup(&[("RUST_LOG", "debug")]);
        assert_eq!(filter_directives(LoggingMode::Development, rust_log).as_deref(), Some("debug"));

        let blank = lookup(&[("TR064_LOG_LEVEL", "  ")]);
        assert_eq!(
            filter_directives(LoggingMode::Debug, blank).as_deref(),
            Some("warn,soap_client=debug,tr064_descriptor=debug,tr064_api=debug")
        );
    }

    #[rstest]
    #[case(&[("TR064_LOG_MODE", "development")], LoggingMode::Development)]
    #[case(&[("TR064_LOG_MODE", "debug")], LoggingMode::Debug)]
    #[case(&[("TR064_LOG_MODE", "json")], LoggingMode::Json)]
    #[case(&[("TR064_LOG_MODE", "verbose")], LoggingMode::Silent)]
    #[case(&[], LoggingMode::Silent)]
    fn test_mode_from_env(#[case] vars: &[(&str, &str)], #[case] expected: LoggingMode) {
        assert_eq!(mode_from_lookup(lookup(vars)), expected);
    }
}
