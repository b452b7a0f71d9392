use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;

use crate::model::quiz::QuestionSet;

//
// ─── STATUS ────────────────────────────────────────────────────────────────────
//

/// Completion state shared by steps and substeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl StepStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StepStatus::NotStarted => "not_started",
            StepStatus::InProgress => "in_progress",
            StepStatus::Completed => "completed",
        }
    }

    /// Percentage a step is worth when its status is set directly.
    #[must_use]
    pub fn progress_percent(self) -> u8 {
        match self {
            StepStatus::NotStarted => 0,
            StepStatus::InProgress => 50,
            StepStatus::Completed => 100,
        }
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── PLAN TYPES ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubStep {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub exercise: String,
    #[serde(default)]
    pub tip: String,
    #[serde(default)]
    pub status: StepStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub exercise: String,
    #[serde(default)]
    pub tip: String,
    #[serde(default)]
    pub sub_steps: Vec<SubStep>,
    #[serde(default)]
    pub status: StepStatus,
    #[serde(default)]
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mcqs: Option<QuestionSet>,
}

impl Step {
    /// Text handed to the quiz generator: one field per line, title first.
    #[must_use]
    pub fn quiz_content(&self) -> String {
        [
            self.title.as_str(),
            self.explanation.as_str(),
            self.exercise.as_str(),
            self.tip.as_str(),
        ]
        .join("\n")
    }

    /// Cached questions, if any were generated and survived validation.
    #[must_use]
    pub fn cached_questions(&self) -> Option<&QuestionSet> {
        self.mcqs.as_ref().filter(|set| !set.is_empty())
    }
}

/// A learning path for one skill, keyed by `skill_name` within a user's plans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPlan {
    pub skill_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub overall_progress: u8,
    #[serde(deserialize_with = "deserialize_created_at")]
    pub created_at: DateTime<Utc>,
}

/// Timestamp layout of plan documents written without a UTC offset.
const NAIVE_CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses an RFC 3339 timestamp, or a naive `YYYY-MM-DD HH:MM:SS` read as UTC.
#[must_use]
pub fn parse_created_at(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, NAIVE_CREATED_AT_FORMAT)
                .ok()
                .map(|naive| naive.and_utc())
        })
}

fn deserialize_created_at<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_created_at(&raw)
        .ok_or_else(|| de::Error::custom(format!("invalid created_at timestamp {raw:?}")))
}

impl LearningPlan {
    #[must_use]
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    #[must_use]
    pub fn step_mut(&mut self, index: usize) -> Option<&mut Step> {
        self.steps.get_mut(index)
    }

    #[must_use]
    pub fn has_step(&self, index: usize) -> bool {
        index < self.steps.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.overall_progress >= 100
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
