//! Paths served by the web app, with skill names percent-encoded.

use urlencoding::encode;

#[must_use]
pub fn skill_href(skill_name: &str) -> String {
    format!("/skill/{}", encode(skill_name))
}

#[must_use]
pub fn step_href(skill_name: &str, step_index: usize) -> String {
    format!("/step/{}/{step_index}", encode(skill_name))
}

#[must_use]
pub fn questions_href(skill_name: &str, step_index: usize) -> String {
    format!("/get-mcqs/{}/{step_index}", encode(skill_name))
}

#[must_use]
pub fn congratulations_href(skill_name: &str) -> String {
    format!("/congratulations/{}", encode(skill_name))
}

#[must_use]
pub fn generate_href(topic: &str) -> String {
    format!("/generate-plan/{}", encode(topic))
}
