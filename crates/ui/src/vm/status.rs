use learn_core::model::StepStatus;

#[must_use]
pub fn status_label(status: StepStatus) -> &'static str {
    match status {
        StepStatus::NotStarted => "Not started",
        StepStatus::InProgress => "In progress",
        StepStatus::Completed => "Completed",
    }
}

/// CSS class for a status badge.
#[must_use]
pub fn status_class(status: StepStatus) -> &'static str {
    match status {
        StepStatus::NotStarted => "not-started",
        StepStatus::InProgress => "in-progress",
        StepStatus::Completed => "completed",
    }
}
