use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AssistantError;

/// One of the operations the backend offers.
///
/// The action decides which inputs are required, which route the payload is
/// posted to, and which layout the response is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// A grade-appropriate explanation of the topic.
    Explain,
    /// A summary of the text currently shown in the output area.
    Summary,
    /// A multiple choice quiz about the topic.
    Quiz,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Explain, Action::Summary, Action::Quiz];

    /// The path segment appended to the backend base URL.
    pub fn route(self) -> &'static str {
        match self {
            Action::Explain => "explain",
            Action::Summary => "summary",
            Action::Quiz => "quiz",
        }
    }

    /// Whether the action needs a non-empty topic.
    pub fn requires_topic(self) -> bool {
        !matches!(self, Action::Summary)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route())
    }
}

impl FromStr for Action {
    type Err = AssistantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "explain" => Ok(Action::Explain),
            "summary" => Ok(Action::Summary),
            "quiz" => Ok(Action::Quiz),
            other => Err(AssistantError::UnknownAction(other.to_string())),
        }
    }
}
