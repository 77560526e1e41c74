//! The single shared display slot.
//!
//! The area holds an explicit [`UiState`] together with the latest issued
//! generation. A result is only written back if it carries that generation,
//! which makes stale responses detectable instead of letting the last one to
//! arrive win.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    action::Action,
    render::{self, RenderedOutput},
};

pub type SharedOutput = Arc<Mutex<OutputArea>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiState {
    /// Nothing generated yet; the placeholder is shown.
    Idle,
    Loading {
        generation: u64,
        action: Action,
    },
    Rendered {
        action: Option<Action>,
        output: RenderedOutput,
    },
    Errored {
        message: String,
        output: RenderedOutput,
    },
}

#[derive(Debug)]
pub struct OutputArea {
    state: UiState,
    latest_generation: u64,
}

impl Default for OutputArea {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputArea {
    pub fn new() -> Self {
        Self {
            state: UiState::Idle,
            latest_generation: 0,
        }
    }

    pub fn shared() -> SharedOutput {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, UiState::Loading { .. })
    }

    pub fn latest_generation(&self) -> u64 {
        self.latest_generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.latest_generation
    }

    /// The HTML currently shown.
    pub fn html(&self) -> String {
        self.current().html
    }

    /// The plain text a reader currently sees.
    pub fn visible_text(&self) -> String {
        self.current().text
    }

    fn current(&self) -> RenderedOutput {
        match &self.state {
            UiState::Idle => render::render_placeholder(),
            UiState::Loading { .. } => render::render_loading(),
            UiState::Rendered { output, .. } | UiState::Errored { output, .. } => output.clone(),
        }
    }

    fn issue(&mut self) -> u64 {
        self.latest_generation += 1;
        self.latest_generation
    }

    /// Issues a new generation and replaces the content with the loading layout.
    pub fn begin_loading(&mut self, action: Action) -> u64 {
        let generation = self.issue();
        self.state = UiState::Loading { generation, action };
        generation
    }

    /// Shows an error that was raised before any request went out.
    ///
    /// This still issues a generation so that a request already in flight
    /// cannot overwrite the message when it resolves.
    pub fn show_immediate_error(&mut self, message: &str) -> u64 {
        let generation = self.issue();
        self.state = errored(message);
        generation
    }

    /// Replaces the content with plain text, as if the user had pasted it.
    pub fn show_text(&mut self, text: &str) -> u64 {
        let generation = self.issue();
        self.state = UiState::Rendered {
            action: None,
            output: render::render_text(text),
        };
        generation
    }

    /// Writes a finished result for `generation`.
    ///
    /// Returns `false` and leaves the area untouched when a newer generation
    /// has been issued since.
    pub fn apply(
        &mut self,
        generation: u64,
        action: Action,
        result: Result<RenderedOutput, String>,
    ) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.state = match result {
            Ok(output) => UiState::Rendered {
                action: Some(action),
                output,
            },
            Err(message) => errored(&message),
        };
        true
    }

    /// Clears the loading layout if it still belongs to `generation`.
    ///
    /// Safe to call any number of times; returns whether anything changed.
    pub fn release_loading(&mut self, generation: u64) -> bool {
        match self.state {
            UiState::Loading { generation: g, .. } if g == generation => {
                self.state = UiState::Idle;
                true
            }
            _ => false,
        }
    }
}

fn errored(message: &str) -> UiState {
    UiState::Errored {
        message: message.to_string(),
        output: render::render_error(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PLACEHOLDER_SENTINEL;

    fn output(text: &str) -> RenderedOutput {
        RenderedOutput {
            html: format!("<p>{text}</p>"),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_starts_idle_with_placeholder() {
        let area = OutputArea::new();
        assert_eq!(area.state(), &UiState::Idle);
        assert!(area.visible_text().contains(PLACEHOLDER_SENTINEL));
        assert_eq!(area.latest_generation(), 0);
    }

    #[test]
    fn test_loading_then_apply() {
        let mut area = OutputArea::new();
        let generation = area.begin_loading(Action::Quiz);
        assert!(area.is_loading());
        assert_eq!(area.visible_text(), render::LOADING_TEXT);

        assert!(area.apply(generation, Action::Quiz, Ok(output("done"))));
        assert!(!area.is_loading());
        assert_eq!(area.visible_text(), "done");
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let mut area = OutputArea::new();
        let first = area.begin_loading(Action::Explain);
        let second = area.begin_loading(Action::Quiz);
        assert!(second > first);

        assert!(area.apply(second, Action::Quiz, Ok(output("new"))));
        assert!(!area.apply(first, Action::Explain, Ok(output("old"))));
        assert_eq!(area.visible_text(), "new");
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut area = OutputArea::new();
        let generation = area.begin_loading(Action::Explain);
        assert!(area.release_loading(generation));
        assert!(!area.release_loading(generation));
        assert_eq!(area.state(), &UiState::Idle);
    }

    #[test]
    fn test_release_does_not_touch_other_generations() {
        let mut area = OutputArea::new();
        let first = area.begin_loading(Action::Explain);
        let second = area.begin_loading(Action::Explain);
        assert!(!area.release_loading(first));
        assert_eq!(
            area.state(),
            &UiState::Loading {
                generation: second,
                action: Action::Explain
            }
        );
    }

    #[test]
    fn test_release_after_apply_keeps_result() {
        let mut area = OutputArea::new();
        let generation = area.begin_loading(Action::Summary);
        area.apply(generation, Action::Summary, Err("bad topic".to_string()));
        assert!(!area.release_loading(generation));
        assert_eq!(area.visible_text(), "Error: bad topic");
    }

    #[test]
    fn test_immediate_error_supersedes_pending_request() {
        let mut area = OutputArea::new();
        let pending = area.begin_loading(Action::Explain);
        area.show_immediate_error("Please enter a topic first.");
        assert!(!area.apply(pending, Action::Explain, Ok(output("late"))));
        assert!(area.html().contains("Please enter a topic first."));
    }

    #[test]
    fn test_show_text() {
        let mut area = OutputArea::new();
        area.show_text("Hello world");
        assert_eq!(area.visible_text(), "Hello world");
        assert!(matches!(area.state(), UiState::Rendered { action: None, .. }));
    }
}
