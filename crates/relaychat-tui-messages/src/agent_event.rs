//! Text for agent events.
//!
//! Event sub-types fail soft: anything unrecognized renders the generic
//! unknown-event label, and a limit time that cannot be decoded renders the
//! unknown-time label.

use chrono::{DateTime, Local, TimeZone};
use relaychat_core::AgentEvent;
use relaychat_tui_core::Labels;
use serde_json::Value;

/// Short time-of-day format for limit notices.
pub const LIMIT_TIME_FORMAT: &str = "%H:%M";

/// Centered notice text for an agent event, in the local time zone.
pub fn event_text(event: &AgentEvent, labels: &Labels) -> String {
    event_text_in(event, labels, &Local)
}

/// Notice text for an agent event, formatting times in `tz`.
pub fn event_text_in<Tz>(event: &AgentEvent, labels: &Labels, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match event {
        AgentEvent::Switch { mode } => labels.switched_to_mode(mode),
        AgentEvent::Message { message } => message.clone(),
        AgentEvent::LimitReached { ends_at } => {
            let time = format_limit_time(ends_at, tz)
                .unwrap_or_else(|| labels.unknown_time().to_string());
            labels.usage_limit_until(&time)
        }
        AgentEvent::Unknown { kind } => {
            tracing::debug!(kind = %kind, "Rendering unknown agent event");
            labels.unknown_event().to_string()
        }
    }
}

/// Format an epoch-seconds value as a short local time.
///
/// Returns `None` for non-numeric, non-finite or out-of-range values.
pub fn format_limit_time<Tz>(ends_at: &Value, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let seconds = match ends_at {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !seconds.is_finite() {
        return None;
    }

    let millis = (seconds * 1000.0).round();
    if millis.abs() > i64::MAX as f64 {
        return None;
    }

    let utc = DateTime::from_timestamp_millis(millis as i64)?;
    Some(
        utc.with_timezone(tz)
            .format(LIMIT_TIME_FORMAT)
            .to_string(),
    )
}
