//! Input Collector
//!
//! Turns the current form values into a request payload, or refuses with a
//! validation error before anything touches the network.

use crate::{action::Action, error::AssistantError, models::RequestPayload};

/// Text shown in the output area before anything has been generated.
pub const PLACEHOLDER_SENTINEL: &str = "Results will appear here";

pub const MISSING_TOPIC_MESSAGE: &str = "Please enter a topic first.";
pub const NOTHING_TO_SUMMARIZE_MESSAGE: &str = "No text found in output to summarize.";

/// The three user-editable fields of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInputs {
    pub topic: String,
    pub language: String,
    pub grade: String,
}

impl FormInputs {
    pub fn new(
        topic: impl Into<String>,
        language: impl Into<String>,
        grade: impl Into<String>,
    ) -> Self {
        Self {
            topic: topic.into(),
            language: language.into(),
            grade: grade.into(),
        }
    }
}

/// Builds the payload for `action`.
///
/// `visible_text` is the output area's plain text; it is only consulted for
/// [`Action::Summary`].
pub fn collect(
    action: Action,
    inputs: &FormInputs,
    visible_text: Option<&str>,
) -> Result<RequestPayload, AssistantError> {
    let topic = inputs.topic.trim();
    let language = inputs.language.clone();

    if action.requires_topic() && topic.is_empty() {
        return Err(AssistantError::Validation(MISSING_TOPIC_MESSAGE.to_string()));
    }

    match action {
        Action::Explain => Ok(RequestPayload::explain(
            language,
            topic.to_string(),
            inputs.grade.clone(),
        )),
        Action::Quiz => Ok(RequestPayload::quiz(language, topic.to_string())),
        Action::Summary => {
            let text = visible_text.unwrap_or_default();
            if text.trim().is_empty() || text.contains(PLACEHOLDER_SENTINEL) {
                return Err(AssistantError::Validation(
                    NOTHING_TO_SUMMARIZE_MESSAGE.to_string(),
                ));
            }
            Ok(RequestPayload::summary(language, text.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(topic: &str) -> FormInputs {
        FormInputs::new(topic, "German", "Grade 8")
    }

    #[test]
    fn test_blank_topic_rejected_for_topic_actions() {
        for topic in ["", "   ", "\t\n"] {
            for action in [Action::Explain, Action::Quiz] {
                let err = collect(action, &inputs(topic), None).unwrap_err();
                assert_eq!(err, AssistantError::Validation(MISSING_TOPIC_MESSAGE.to_string()));
            }
        }
    }

    #[test]
    fn test_explain_payload_trims_topic() {
        let payload = collect(Action::Explain, &inputs("  Gravity "), None).unwrap();
        assert_eq!(
            payload,
            RequestPayload::explain("German".into(), "Gravity".into(), "Grade 8".into())
        );
    }

    #[test]
    fn test_quiz_payload_has_no_grade() {
        let payload = collect(Action::Quiz, &inputs("Gravity"), None).unwrap();
        assert_eq!(payload.topic.as_deref(), Some("Gravity"));
        assert_eq!(payload.grade, None);
        assert_eq!(payload.text, None);
    }

    #[test]
    fn test_summary_ignores_topic_and_uses_visible_text() {
        let payload = collect(Action::Summary, &inputs(""), Some("Hello world")).unwrap();
        assert_eq!(payload, RequestPayload::summary("German".into(), "Hello world".into()));
    }

    #[test]
    fn test_summary_rejects_empty_or_placeholder() {
        let placeholder = format!("{PLACEHOLDER_SENTINEL}...");
        for text in [None, Some(""), Some("  "), Some(placeholder.as_str())] {
            let err = collect(Action::Summary, &inputs("Gravity"), text).unwrap_err();
            assert_eq!(
                err,
                AssistantError::Validation(NOTHING_TO_SUMMARIZE_MESSAGE.to_string())
            );
        }
    }
}
