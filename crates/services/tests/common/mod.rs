#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use services::{ApiError, Completion, CompletionBackend, CompletionRequest};

/// Backend that replays canned completions and records every request.
#[derive(Default)]
pub struct ScriptedBackend {
    responses: Mutex<VecDeque<Result<Completion, ApiError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_text(&self, text: &str, truncated: bool) {
        self.responses.lock().unwrap().push_back(Ok(Completion {
            text: text.to_string(),
            truncated,
        }));
    }

    pub fn push_error(&self, err: ApiError) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ApiError::NoCandidates))
    }
}

pub const GUITAR_PLAN: &str = r#"{
    "skill_name": "Guitar",
    "description": "Strum along",
    "steps": [
        {
            "title": "Hold the guitar",
            "explanation": "Posture first",
            "exercise": "Sit and hold it for 5 minutes",
            "tip": "Relax your shoulders",
            "sub_steps": [
                {"title": "Sitting"},
                {"title": "Standing"},
                {"title": "Strap"},
                {"title": "Picks"}
            ]
        },
        {"title": "Tune", "explanation": "Use a tuner"},
        {"title": "First chords", "sub_steps": []}
    ]
}"#;
