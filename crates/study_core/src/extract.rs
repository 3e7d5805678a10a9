use crate::config::MAX_PLAN_HOURS;
use regex::Regex;
use std::sync::LazyLock;

static HOURS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"for\s+([0-9]+)\s*hours").expect("hours pattern is valid"));

static HOURS_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\s*hours?$").expect("hours-only pattern is valid"));

#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    pub topic: Option<String>,
    pub hours: Option<f64>,
}

/// Pull hours and topic out of a lower-cased plan message.
///
/// The two extractions run independently, so "for 2 hours on dsa" yields
/// both `hours = 2` and the topic "2 hours on dsa".
pub fn plan_request(text: &str) -> PlanRequest {
    PlanRequest {
        topic: topic(text),
        hours: hours(text),
    }
}

/// First "for <N> hours" phrase, capped at `MAX_PLAN_HOURS`.
pub fn hours(text: &str) -> Option<f64> {
    let captures = HOURS.captures(text)?;
    // An all-digit capture always parses; overlong values come back infinite.
    let value: f64 = captures[1].parse().ok()?;
    Some(value.min(MAX_PLAN_HOURS))
}

/// Tail after the last "for", unless it is only an hour count.
///
/// "for" is matched as a substring, so words like "before" split too.
pub fn topic(text: &str) -> Option<String> {
    let (_, tail) = text.rsplit_once("for")?;
    let tail = tail.trim();
    if tail.is_empty() || HOURS_ONLY.is_match(tail) {
        return None;
    }
    Some(tail.to_string())
}
