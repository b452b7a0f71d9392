use serde::{Deserialize, Serialize};

/// A multiple-choice question attached to a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    #[serde(rename = "correctIndex")]
    pub correct_index: usize,
    #[serde(default)]
    pub explanation: String,
}

impl Question {
    #[must_use]
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_index).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuestionSet {
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl QuestionSet {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_index_keeps_camel_case_name() {
        let q = Question {
            question: "Q".into(),
            options: vec!["a".into(), "b".into()],
            correct_index: 1,
            explanation: String::new(),
        };
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["correctIndex"], 1);
        assert_eq!(q.correct_option(), Some("b"));
    }
}
