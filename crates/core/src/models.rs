//! Wire Models
//!
//! Request and response bodies exchanged with the learning backend. Optional
//! request fields are left out of the JSON entirely when they are not set.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{action::Action, error::AssistantError};

/// The JSON body posted to `{base_url}/{action}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestPayload {
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl RequestPayload {
    pub fn explain(language: String, topic: String, grade: String) -> Self {
        Self {
            language,
            topic: Some(topic),
            grade: Some(grade),
            text: None,
        }
    }

    pub fn summary(language: String, text: String) -> Self {
        Self {
            language,
            topic: None,
            grade: None,
            text: Some(text),
        }
    }

    pub fn quiz(language: String, topic: String) -> Self {
        Self {
            language,
            topic: Some(topic),
            grade: None,
            text: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainResponse {
    #[serde(default)]
    pub title: Option<String>,
    pub explanation: String,
    #[serde(default)]
    pub key_terms: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
    #[serde(default)]
    pub bullet_points: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizItem {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResponse {
    pub quiz: Vec<QuizItem>,
}

/// The body the backend sends alongside a failure status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Reply of the backend's `/health` route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
}

/// A successful response, already decoded into the shape of its action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResponse {
    Explain(ExplainResponse),
    Summary(SummaryResponse),
    Quiz(QuizResponse),
}

impl ActionResponse {
    /// Decodes a parsed body according to the action that produced it.
    pub fn decode(action: Action, body: Value) -> Result<Self, AssistantError> {
        let decoded = match action {
            Action::Explain => serde_json::from_value(body).map(ActionResponse::Explain),
            Action::Summary => serde_json::from_value(body).map(ActionResponse::Summary),
            Action::Quiz => serde_json::from_value(body).map(ActionResponse::Quiz),
        };
        decoded.map_err(|e| AssistantError::Transport(format!("Malformed {action} response: {e}")))
    }

    pub fn action(&self) -> Action {
        match self {
            ActionResponse::Explain(_) => Action::Explain,
            ActionResponse::Summary(_) => Action::Summary,
            ActionResponse::Quiz(_) => Action::Quiz,
        }
    }
}
