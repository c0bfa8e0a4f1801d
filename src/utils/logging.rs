use crate::engine::AccessDecision;
use env_logger::{Builder, Target};
use log::{Level, LevelFilter};
use std::env;
use std::io::Write;

pub fn init_logging() -> Result<(), log::SetLoggerError> {
    let env = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let log_level = match env.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };

    let mut builder = Builder::from_default_env();

    // Customize format for better readability
    builder.format(|buf, record| {
        let timestamp = buf.timestamp();
        let target = record.target();
        let file = record.file().unwrap_or("unknown");
        let line = record.line().unwrap_or(0);

        match record.level() {
            Level::Info => {
                writeln!(buf, "{} [INFO] [{}]: {}", timestamp, target, record.args())
            }
            level => {
                writeln!(
                    buf,
                    "{} [{}] [{}:{}] {}: {}",
                    timestamp,
                    level,
                    file,
                    line,
                    target,
                    record.args()
                )
            }
        }
    });

    // Filter out noisy modules in production
    if env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string()) == "production" {
        builder.filter_module("sqlx", LevelFilter::Warn);
        builder.filter_module("tokio", LevelFilter::Info);
    }

    builder
        .filter_level(log_level)
        .target(Target::Stdout)
        .init();
    Ok(())
}

/// One log line per access evaluation: info for admissions, warn for
/// refusals so denials stand out at the default filter level.
pub fn log_access_decision(meeting_id: &str, user: &str, decision: &AccessDecision) {
    match decision {
        AccessDecision::Allowed => {
            log::info!(
                "[Access] meeting '{}' user '{}' -> {}",
                meeting_id,
                user,
                describe_decision(decision)
            );
        }
        AccessDecision::Denied(_) => {
            log::warn!(
                "[Access] meeting '{}' user '{}' -> {}",
                meeting_id,
                user,
                describe_decision(decision)
            );
        }
    }
}

fn describe_decision(decision: &AccessDecision) -> String {
    match decision {
        AccessDecision::Allowed => "allowed".to_string(),
        AccessDecision::Denied(reason) => format!("denied: {}", reason),
    }
}

pub fn log_database_operation(operation: &str, table: &str, duration_ms: u64) {
    log::debug!(
        "[Database] {} on table {} took {}ms",
        operation,
        table,
        duration_ms
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DeniedReason;

    #[test]
    fn test_describe_allowed_decision() {
        assert_eq!(describe_decision(&AccessDecision::Allowed), "allowed");
    }

    #[test]
    fn test_describe_denied_decision_carries_the_reason() {
        let decision = AccessDecision::Denied(DeniedReason::MeetingEnded);
        assert_eq!(describe_decision(&decision), "denied: Meeting has ended.");

        let decision = AccessDecision::Denied(DeniedReason::NotYetStarted {
            scheduled_for: "2030-07-01".parse().unwrap(),
        });
        assert_eq!(
            describe_decision(&decision),
            "denied: Meeting is on 2030-07-01"
        );
    }
}
