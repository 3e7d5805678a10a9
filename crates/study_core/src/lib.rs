pub mod clock;
pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod planner;
pub mod responder;
pub mod storage;
pub mod time_parse;

pub use responder::{Responder, Settings, classify};

#[cfg(test)]
mod tests {
    use crate::error::AppError;
    use crate::model::{Intent, ReminderEntry, Response};
    use crate::storage::MemoryStore;
    use crate::{Responder, classify};

    #[test]
    fn demo_messages_cover_every_intent() {
        assert_eq!(classify("Plan my study for 2 hours on DSA"), Intent::Plan);
        assert_eq!(classify("Remind me to study DSA tomorrow"), Intent::Reminder);
        assert_eq!(classify("Check my progress"), Intent::Progress);
        assert_eq!(classify("Hello"), Intent::Help);
    }

    #[test]
    fn reminder_entry_has_required_fields() {
        let store = MemoryStore::with_entries(Vec::new());
        let response = Responder::new(&store)
            .respond("remind me at 6 pm")
            .unwrap();

        match response {
            Response::Reminder(ReminderEntry { text, when }) => {
                assert_eq!(text, "remind me at 6 pm");
                assert!(when.contains("T18:00:00"));
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn app_error_exposes_code() {
        let err = AppError::invalid_input("missing message");
        assert_eq!(err.code(), "invalid_input");
        assert_eq!(err.to_string(), "invalid_input - missing message");
    }
}
