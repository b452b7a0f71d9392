use learn_core::model::{Question, QuestionSet};
use serde_json::Value;
use tracing::debug;

const DEFAULT_TOPIC: &str = "This topic";

/// Keeps the well-formed questions of a generated payload, in order.
///
/// Anything that is not an object with a `questions` array yields an empty
/// set. Never fails.
#[must_use]
pub fn validate_question_set(raw: &Value) -> QuestionSet {
    let Some(candidates) = raw.get("questions").and_then(Value::as_array) else {
        return QuestionSet::empty();
    };

    let questions = candidates
        .iter()
        .filter_map(|candidate| {
            let question = validate_question(candidate);
            if question.is_none() {
                debug!(%candidate, "skipping invalid question format");
            }
            question
        })
        .collect();

    QuestionSet { questions }
}

fn validate_question(candidate: &Value) -> Option<Question> {
    let object = candidate.as_object()?;
    let question = object.get("question")?.as_str()?.to_string();
    let options = object
        .get("options")?
        .as_array()?
        .iter()
        .map(|option| option.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()?;
    let raw_index = object.get("correctIndex")?;

    let correct_index = raw_index
        .as_u64()
        .and_then(|index| usize::try_from(index).ok())
        .filter(|&index| index < options.len())
        .unwrap_or(0);
    let explanation = object
        .get("explanation")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Some(Question {
        question,
        options,
        correct_index,
        explanation,
    })
}

/// Stand-in quiz used when generation fails or returns an unknown shape.
///
/// The first line of `content` names the topic.
#[must_use]
pub fn default_question_set(content: &str) -> QuestionSet {
    let topic = content
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .unwrap_or(DEFAULT_TOPIC);

    QuestionSet {
        questions: vec![Question {
            question: format!("What is the main purpose of {topic}?"),
            options: vec![
                "To understand core concepts".into(),
                "To practice implementation".into(),
                "To learn advanced techniques".into(),
                "To debug common issues".into(),
            ],
            correct_index: 0,
            explanation: "Understanding core concepts is the foundation of learning.".into(),
        }],
    }
}
