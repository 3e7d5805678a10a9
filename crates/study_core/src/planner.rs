use crate::model::{PlanCycle, StudyPlan};

pub const STUDY_MINUTES: u32 = 45;
pub const BREAK_MINUTES: u32 = 10;
pub const CYCLE_MINUTES: u32 = STUDY_MINUTES + BREAK_MINUTES;
pub const DEFAULT_TOPIC: &str = "general";

/// Split `hours` into 45/10 study/break cycles, at least one.
///
/// An empty topic is treated as absent. The caller bounds `hours`; the cycle
/// count grows linearly with it.
pub fn generate_plan(topic: Option<&str>, hours: f64) -> StudyPlan {
    let topic = topic.filter(|value| !value.is_empty());
    let count = cycle_count(hours);

    let cycles = (1..=count)
        .map(|step| PlanCycle {
            step,
            study_minutes: STUDY_MINUTES,
            break_minutes: BREAK_MINUTES,
            task: task_label(topic, step),
        })
        .collect();

    StudyPlan {
        topic: topic.unwrap_or(DEFAULT_TOPIC).to_string(),
        total_minutes: u64::from(count) * u64::from(CYCLE_MINUTES),
        cycles,
    }
}

fn cycle_count(hours: f64) -> u32 {
    // `as` saturates and maps NaN to zero.
    let total_minutes = (hours * 60.0).floor() as i64;
    let count = total_minutes.div_euclid(i64::from(CYCLE_MINUTES)).max(1);
    u32::try_from(count).unwrap_or(u32::MAX)
}

fn task_label(topic: Option<&str>, step: u32) -> String {
    match topic {
        Some(topic) => format!("Focus on topic: {topic} (part {step})"),
        None => format!("Focus on key concepts (part {step})"),
    }
}
