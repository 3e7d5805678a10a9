use crate::model::{ReminderEntry, StudyPlan};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Plan,
    Reminder,
    Progress,
    Help,
}

impl Intent {
    pub fn label(self) -> &'static str {
        match self {
            Self::Plan => "plan",
            Self::Reminder => "reminder",
            Self::Progress => "progress",
            Self::Help => "help",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub percent_complete: u8,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpMessage {
    pub description: String,
}

/// Serializes as `{"intent": ..., "result": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", content = "result", rename_all = "snake_case")]
pub enum Response {
    Plan(StudyPlan),
    Reminder(ReminderEntry),
    Progress(ProgressReport),
    Help(HelpMessage),
}

impl Response {
    pub fn intent(&self) -> Intent {
        match self {
            Self::Plan(_) => Intent::Plan,
            Self::Reminder(_) => Intent::Reminder,
            Self::Progress(_) => Intent::Progress,
            Self::Help(_) => Intent::Help,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HelpMessage, Intent, ProgressReport, Response};

    #[test]
    fn response_serializes_intent_and_result() {
        let response = Response::Progress(ProgressReport {
            percent_complete: 60,
            notes: "placeholder".to_string(),
        });

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["intent"], "progress");
        assert_eq!(value["result"]["percent_complete"], 60);
        assert_eq!(value["result"]["notes"], "placeholder");
        assert_eq!(value.as_object().unwrap().len(), 2);
    }

    #[test]
    fn response_reports_matching_intent() {
        let response = Response::Help(HelpMessage {
            description: "demo".to_string(),
        });
        assert_eq!(response.intent(), Intent::Help);
        assert_eq!(response.intent().to_string(), "help");
    }
}
