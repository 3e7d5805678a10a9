use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanCycle {
    pub step: u32,
    pub study_minutes: u32,
    pub break_minutes: u32,
    pub task: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyPlan {
    pub topic: String,
    /// Always `cycles.len() * 55`, not the requested duration.
    pub total_minutes: u64,
    pub cycles: Vec<PlanCycle>,
}
