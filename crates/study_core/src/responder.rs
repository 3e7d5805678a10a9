use crate::clock::{format_timestamp, local_now};
use crate::error::AppError;
use crate::extract;
use crate::model::{HelpMessage, Intent, ProgressReport, ReminderEntry, Response};
use crate::planner::generate_plan;
use crate::storage::ReminderStore;
use crate::time_parse::parse_time_at;
use time::{Duration, OffsetDateTime};

pub const HELP_DESCRIPTION: &str = "I generate study plans, set reminders, and report simple progress. Try: 'Plan my study for 2 hours on DSA' or 'Remind me to study at 6 pm tomorrow'.";
pub const PROGRESS_PERCENT: u8 = 60;
pub const PROGRESS_NOTES: &str = "placeholder";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub default_hours: f64,
    pub reminder_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_hours: 2.0,
            reminder_delay: Duration::hours(1),
        }
    }
}

struct Request<'a> {
    /// As typed; stored verbatim in reminders.
    message: &'a str,
    /// Trimmed and lower-cased; used for every match.
    text: String,
    now: OffsetDateTime,
}

type Handler = fn(&Responder<'_>, &Request<'_>) -> Result<Response, AppError>;

struct Rule {
    intent: Intent,
    keywords: &'static [&'static str],
    handler: Handler,
}

impl Rule {
    fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|keyword| text.contains(keyword))
    }
}

// Evaluated top to bottom, first match wins: "plan ... remind" is a plan.
const RULES: &[Rule] = &[
    Rule {
        intent: Intent::Plan,
        keywords: &["plan", "study plan", "study for", "schedule"],
        handler: handle_plan,
    },
    Rule {
        intent: Intent::Reminder,
        keywords: &["remind", "reminder", "remind me"],
        handler: handle_reminder,
    },
    Rule {
        intent: Intent::Progress,
        keywords: &["progress", "completed", "progress check"],
        handler: handle_progress,
    },
];

/// Keyword dispatcher over a reminder store.
pub struct Responder<'a> {
    store: &'a dyn ReminderStore,
    settings: Settings,
}

impl<'a> Responder<'a> {
    pub fn new(store: &'a dyn ReminderStore) -> Self {
        Self::with_settings(store, Settings::default())
    }

    pub fn with_settings(store: &'a dyn ReminderStore, settings: Settings) -> Self {
        Self { store, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn respond(&self, message: &str) -> Result<Response, AppError> {
        self.respond_at(message, local_now())
    }

    /// Classify `message` and build its response against the clock `now`.
    ///
    /// Only the reminder path can fail, and only through the store.
    pub fn respond_at(&self, message: &str, now: OffsetDateTime) -> Result<Response, AppError> {
        let request = Request {
            message,
            text: normalize(message),
            now,
        };

        match matching_rule(&request.text) {
            Some(rule) => {
                log::debug!("classified message as {}", rule.intent);
                (rule.handler)(self, &request)
            }
            None => {
                log::debug!("no intent keywords matched, answering with help");
                Ok(help())
            }
        }
    }
}

/// Intent the dispatcher would pick for `message`.
pub fn classify(message: &str) -> Intent {
    matching_rule(&normalize(message)).map_or(Intent::Help, |rule| rule.intent)
}

fn normalize(message: &str) -> String {
    message.trim().to_lowercase()
}

fn matching_rule(text: &str) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.matches(text))
}

fn handle_plan(responder: &Responder<'_>, request: &Request<'_>) -> Result<Response, AppError> {
    let params = extract::plan_request(&request.text);
    let hours = params.hours.unwrap_or(responder.settings.default_hours);
    Ok(Response::Plan(generate_plan(params.topic.as_deref(), hours)))
}

fn handle_reminder(
    responder: &Responder<'_>,
    request: &Request<'_>,
) -> Result<Response, AppError> {
    let when = match parse_time_at(&request.text, request.now) {
        Some(when) => when,
        None => request
            .now
            .checked_add(responder.settings.reminder_delay)
            .ok_or_else(|| AppError::invalid_data("reminder time is out of range"))?,
    };

    let entry = ReminderEntry {
        text: request.message.to_string(),
        when: format_timestamp(when)?,
    };
    responder.store.append(entry.clone())?;
    log::info!("saved reminder due {}", entry.when);

    Ok(Response::Reminder(entry))
}

fn handle_progress(
    _responder: &Responder<'_>,
    _request: &Request<'_>,
) -> Result<Response, AppError> {
    Ok(Response::Progress(ProgressReport {
        percent_complete: PROGRESS_PERCENT,
        notes: PROGRESS_NOTES.to_string(),
    }))
}

fn help() -> Response {
    Response::Help(HelpMessage {
        description: HELP_DESCRIPTION.to_string(),
    })
}
