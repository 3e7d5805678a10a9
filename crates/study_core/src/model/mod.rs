mod plan;
mod reminder;
mod response;

pub use plan::{PlanCycle, StudyPlan};
pub use reminder::ReminderEntry;
pub use response::{HelpMessage, Intent, ProgressReport, Response};
