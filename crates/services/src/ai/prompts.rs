//! Prompt text sent to the completion API.

/// Instructions placed before the topic when asking for a learning plan.
pub const PLAN_PREAMBLE: &str = r#"You are an educational AI assistant.
IMPORTANT: Your ENTIRE response must be ONLY a valid JSON object.
DO NOT include explanations, markdown formatting, code blocks, or any text outside the JSON.
Keep your response concise to avoid truncation. Limit to 8-10 steps maximum.
Respond with ONLY this JSON structure:

{
    "skill_name": "Skill Name",
    "description": "Brief description",
    "steps": [
        {
            "title": "Step title",
            "explanation": "Short explanation (1-2 sentences)",
            "exercise": "Brief exercise",
            "tip": "Short tip",
            "sub_steps": [
                {
                    "title": "Sub-step title",
                    "explanation": "Short sub-step explanation",
                    "exercise": "Brief sub-step exercise",
                    "tip": "Short sub-step tip"
                }
            ]
        }
    ]
}"#;

#[must_use]
pub fn plan_prompt(topic: &str) -> String {
    format!("{PLAN_PREAMBLE}\n\nTopic: {topic}")
}

#[must_use]
pub fn quiz_prompt(step_content: &str) -> String {
    format!(
        r#"Based on the following educational content, create 3 multiple-choice questions that test understanding of key concepts.

CONTENT:
{step_content}

FORMAT YOUR RESPONSE AS JSON WITH THE FOLLOWING STRUCTURE ONLY:
{{
    "questions": [
        {{
            "question": "Question text here?",
            "options": ["Option A", "Option B", "Option C", "Option D"],
            "correctIndex": 0,
            "explanation": "Brief explanation of why this answer is correct"
        }}
    ]
}}

IMPORTANT: Your response MUST be a valid JSON object containing ONLY a 'questions' array.
Make sure each question has EXACTLY 4 options. The correctIndex should be the index (0-3) of the correct answer."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_prompt_ends_with_topic() {
        assert!(plan_prompt("Watercolor").ends_with("Topic: Watercolor"));
    }

    #[test]
    fn quiz_prompt_embeds_content_and_literal_braces() {
        let prompt = quiz_prompt("Scales\nPractice daily");
        assert!(prompt.contains("CONTENT:\nScales\nPractice daily"));
        assert!(prompt.contains("\"correctIndex\": 0"));
    }
}
